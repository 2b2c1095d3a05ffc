use alloc::boxed::Box;
use alloc::string::String;

use vc_utils::hash::HashMap;

use super::KeyMatching;

/// Wire key to member index, precomputed per type model.
///
/// Keys longer than the longest known key are rejected before any lookup
/// or case folding.
#[derive(Debug, Default)]
pub(crate) struct NameTable {
    exact: HashMap<Box<str>, usize>,
    folded: HashMap<Box<str>, usize>,
    max_len: usize,
    max_folded_chars: usize,
}

impl NameTable {
    /// Builds the table from keys in model order.
    ///
    /// When two keys fold to the same string the earlier one wins.
    pub(crate) fn new<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut table = Self::default();
        let mut buf = String::new();
        for (index, key) in keys.into_iter().enumerate() {
            table.max_len = table.max_len.max(key.len());
            table.exact.entry(Box::from(key)).or_insert(index);

            fold_into(key, &mut buf);
            table.max_folded_chars = table.max_folded_chars.max(buf.chars().count());
            table.folded.entry(Box::from(buf.as_str())).or_insert(index);
        }
        table
    }

    #[inline]
    pub(crate) fn contains(&self, key: &str) -> bool {
        key.len() <= self.max_len && self.exact.contains_key(key)
    }

    /// Finds the member index for `key`.
    ///
    /// `scratch` receives the folded key in case-insensitive mode.
    pub(crate) fn lookup(&self, key: &str, matching: KeyMatching, scratch: &mut String) -> Option<usize> {
        if key.len() <= self.max_len
            && let Some(&index) = self.exact.get(key)
        {
            return Some(index);
        }
        if matching == KeyMatching::Exact {
            return None;
        }
        // Lower-casing never shrinks the char count.
        if key.chars().count() > self.max_folded_chars {
            return None;
        }
        fold_into(key, scratch);
        self.folded.get(scratch.as_str()).copied()
    }
}

fn fold_into(key: &str, out: &mut String) {
    out.clear();
    out.extend(key.chars().flat_map(char::to_lowercase));
}
