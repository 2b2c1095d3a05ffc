/// How object keys are matched against member keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyMatching {
    /// Byte-for-byte.
    #[default]
    Exact,
    /// Ignoring letter case; an exact match still takes precedence.
    CaseInsensitive,
}

/// Per-call decode settings.
///
/// # Examples
///
/// ```
/// use vc_record::{DecodeOptions, KeyMatching};
///
/// let options = DecodeOptions::new().key_matching(KeyMatching::CaseInsensitive);
/// assert!(options.capture_unmatched);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
    pub key_matching: KeyMatching,
    /// Copy unmatched keys into the record's capture slot, if it has one.
    pub capture_unmatched: bool,
}

impl DecodeOptions {
    /// Exact key matching, unmatched keys captured.
    pub const fn new() -> Self {
        Self {
            key_matching: KeyMatching::Exact,
            capture_unmatched: true,
        }
    }

    pub const fn key_matching(mut self, key_matching: KeyMatching) -> Self {
        self.key_matching = key_matching;
        self
    }

    pub const fn capture_unmatched(mut self, capture: bool) -> Self {
        self.capture_unmatched = capture;
        self
    }
}

impl Default for DecodeOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
