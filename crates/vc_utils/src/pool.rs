//! Thread-local pools for short-lived scratch values.
//!
//! A [`LocalPool`] lives in a `thread_local!` slot. [`Pooled::acquire`]
//! takes a value out of it (or creates a fresh one) and the guard hands the
//! value back when dropped, on every exit path, after calling
//! [`Recycle::recycle`] on it.
//!
//! Wiping a recycled `String` is best-effort, see its [`Recycle`] impl.
//!
//! # Examples
//!
//! ```
//! use vc_utils::pool::{LocalPool, Pooled};
//!
//! thread_local! {
//!     static BUFFERS: LocalPool<String> = const { LocalPool::new(4) };
//! }
//!
//! {
//!     let mut buf = Pooled::acquire(&BUFFERS);
//!     buf.push_str("secret");
//! }
//!
//! // The buffer came back wiped.
//! let buf = Pooled::acquire(&BUFFERS);
//! assert!(buf.is_empty());
//! ```

use core::cell::RefCell;
use core::fmt;
use core::ops::{Deref, DerefMut};
use std::thread::LocalKey;

// -----------------------------------------------------------------------------
// Recycle

/// A value that can be reset before going back into a pool.
pub trait Recycle: Default {
    /// Clears the value so that no content leaks into the next user.
    fn recycle(&mut self);
}

/// Overwrites the used bytes with zeros before truncating.
///
/// The wipe is best-effort: it is an ordinary write, kept observable through
/// [`black_box`](core::hint::black_box), but the language gives no guarantee
/// that the old bytes never survive elsewhere, e.g. in a reallocated copy.
impl Recycle for String {
    fn recycle(&mut self) {
        let len = self.len();
        self.clear();
        self.extend(core::iter::repeat_n('\0', len));
        core::hint::black_box(self.as_str());
        self.clear();
    }
}

impl<T> Recycle for Vec<T> {
    #[inline]
    fn recycle(&mut self) {
        self.clear();
    }
}

// -----------------------------------------------------------------------------
// LocalPool

/// A per-thread free list holding at most `limit` idle values.
pub struct LocalPool<T> {
    free: RefCell<Vec<T>>,
    limit: usize,
}

impl<T: Recycle> LocalPool<T> {
    /// Creates an empty pool keeping at most `limit` idle values.
    #[inline]
    pub const fn new(limit: usize) -> Self {
        Self {
            free: RefCell::new(Vec::new()),
            limit,
        }
    }

    /// Returns the number of idle values.
    #[inline]
    pub fn idle(&self) -> usize {
        self.free.borrow().len()
    }

    fn take(&self) -> T {
        self.free.borrow_mut().pop().unwrap_or_default()
    }

    fn put(&self, value: T) {
        let mut free = self.free.borrow_mut();
        if free.len() < self.limit {
            free.push(value);
        }
    }
}

// -----------------------------------------------------------------------------
// Pooled

/// A value borrowed from a thread-local [`LocalPool`].
///
/// Dereferences to the value. Dropping the guard recycles the value and
/// returns it to its pool.
pub struct Pooled<T: Recycle + 'static> {
    pool: &'static LocalKey<LocalPool<T>>,
    value: T,
}

impl<T: Recycle + 'static> Pooled<T> {
    /// Takes a value from `pool`, creating a default one when it is empty.
    pub fn acquire(pool: &'static LocalKey<LocalPool<T>>) -> Self {
        let value = pool.try_with(LocalPool::take).unwrap_or_default();
        Self { pool, value }
    }
}

impl<T: Recycle + 'static> Deref for Pooled<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Recycle + 'static> DerefMut for Pooled<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Recycle + 'static> Drop for Pooled<T> {
    fn drop(&mut self) {
        let mut value = core::mem::take(&mut self.value);
        value.recycle();
        // The pool may already be gone during thread teardown.
        let _ = self.pool.try_with(move |pool| pool.put(value));
    }
}

impl<T: Recycle + fmt::Debug + 'static> fmt::Debug for Pooled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

#[cfg(test)]
mod tests {
    use super::{LocalPool, Pooled, Recycle};

    thread_local! {
        static STRINGS: LocalPool<String> = const { LocalPool::new(2) };
        static VECS: LocalPool<Vec<u32>> = const { LocalPool::new(1) };
    }

    #[test]
    fn string_wipe_keeps_capacity() {
        let mut s = String::from("hunter2");
        let capacity = s.capacity();
        s.recycle();
        assert!(s.is_empty());
        assert_eq!(s.capacity(), capacity);
        s.push('x');
        assert_eq!(s, "x");
    }

    #[test]
    fn values_return_cleared() {
        {
            let mut s = Pooled::acquire(&STRINGS);
            s.push_str("hello");
            assert_eq!(&*s, "hello");
        }
        assert_eq!(STRINGS.with(LocalPool::idle), 1);

        let s = Pooled::acquire(&STRINGS);
        assert!(s.is_empty());
        assert!(s.capacity() >= 5);
    }

    #[test]
    fn limit_caps_idle_values() {
        let a = Pooled::acquire(&VECS);
        let b = Pooled::acquire(&VECS);
        drop(a);
        drop(b);
        assert_eq!(VECS.with(LocalPool::idle), 1);
    }

    #[test]
    fn released_on_unwind() {
        let result = std::panic::catch_unwind(|| {
            let mut v = Pooled::acquire(&VECS);
            v.push(7);
            panic!("decode failed");
        });
        assert!(result.is_err());
        let v = Pooled::acquire(&VECS);
        assert!(v.is_empty());
    }
}
