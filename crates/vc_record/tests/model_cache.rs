use std::sync::Barrier;
use std::thread;

use vc_record::{ModelCache, ModelError, Record, TriState, TypeModel};

const THREADS: usize = 8;

#[derive(Record, Default, Debug)]
#[record(default, rename_all = "camelCase")]
struct Session {
    user_id: u64,
    token: TriState<String>,
}

#[derive(Record, Debug)]
struct Unbuildable {
    value: u32,
}

/// Runs `f` on every thread at once and collects the results.
fn race<R: Send>(f: fn() -> R) -> Vec<R> {
    let barrier = Barrier::new(THREADS);
    thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    f()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

#[test]
fn concurrent_first_builds_share_one_model() {
    assert!(ModelCache::global().get::<Session>().is_none());

    let models: Vec<&'static TypeModel> = race(|| Session::type_model().unwrap());
    let first = models[0];
    assert!(models.iter().all(|m| core::ptr::eq(*m, first)));
    assert_eq!(first.members().len(), 2);

    let cached = ModelCache::global().get::<Session>().unwrap().unwrap();
    assert!(core::ptr::eq(cached, first));
}

#[test]
fn concurrent_failures_agree() {
    let errors: Vec<ModelError> = race(|| Unbuildable::type_model().unwrap_err());
    assert!(matches!(errors[0], ModelError::NoConstructor { .. }), "{}", errors[0]);
    assert!(errors.iter().all(|e| *e == errors[0]));
    assert_eq!(
        ModelCache::global().get::<Unbuildable>().unwrap().unwrap_err(),
        errors[0],
    );
}
