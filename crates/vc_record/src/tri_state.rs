use core::fmt;

/// A field value that is absent, explicitly null, or present.
///
/// On the wire `Unset` omits the key, `Null` writes `"key": null` and
/// `Value` writes the payload. Decoding restores the same state, so a
/// `TriState` survives a round trip with its presence intact.
///
/// The mapping methods leave `Unset` and `Null` untouched and never call
/// the provided function for them.
///
/// # Examples
///
/// ```
/// use vc_record::TriState;
///
/// let name: TriState<String> = TriState::Value("Ada".into());
/// assert_eq!(name.as_ref().map(|s| s.len()), TriState::Value(3));
///
/// let missing: TriState<String> = TriState::Unset;
/// assert!(missing.map(|s| s.len()).is_unset());
///
/// // `None` converts to an explicit null.
/// assert!(TriState::<u32>::from(None).is_null());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TriState<T> {
    /// The key was absent.
    #[default]
    Unset,
    /// The key was present with an explicit null.
    Null,
    /// The key was present with a value.
    Value(T),
}

impl<T> TriState<T> {
    #[inline]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Returns `true` unless the value is `Unset`.
    #[inline]
    pub const fn is_set(&self) -> bool {
        !self.is_unset()
    }

    #[inline]
    pub const fn as_ref(&self) -> TriState<&T> {
        match self {
            Self::Unset => TriState::Unset,
            Self::Null => TriState::Null,
            Self::Value(v) => TriState::Value(v),
        }
    }

    #[inline]
    pub const fn as_mut(&mut self) -> TriState<&mut T> {
        match self {
            Self::Unset => TriState::Unset,
            Self::Null => TriState::Null,
            Self::Value(v) => TriState::Value(v),
        }
    }

    /// Returns the payload, if any.
    #[inline]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Converts into the payload, dropping the `Unset`/`Null` distinction.
    #[inline]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Converts into an `Option`, keeping the presence of the key.
    ///
    /// `Unset` becomes `None`, `Null` becomes `Some(None)`.
    #[inline]
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Unset => None,
            Self::Null => Some(None),
            Self::Value(v) => Some(Some(v)),
        }
    }

    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> TriState<U> {
        match self {
            Self::Unset => TriState::Unset,
            Self::Null => TriState::Null,
            Self::Value(v) => TriState::Value(f(v)),
        }
    }

    #[inline]
    pub fn and_then<U, F: FnOnce(T) -> TriState<U>>(self, f: F) -> TriState<U> {
        match self {
            Self::Unset => TriState::Unset,
            Self::Null => TriState::Null,
            Self::Value(v) => f(v),
        }
    }

    /// Returns the payload or `default` for `Unset` and `Null`.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Value(v) => v,
            _ => default,
        }
    }

    /// Takes the value out, leaving `Unset` in its place.
    #[inline]
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    /// Replaces the value with `value`, returning the old one.
    #[inline]
    pub fn replace(&mut self, value: T) -> Self {
        core::mem::replace(self, Self::Value(value))
    }

    /// Overwrites `self` with `other` unless `other` is `Unset`.
    ///
    /// This is how a patch is applied: absent keys keep the current value.
    #[inline]
    pub fn update(&mut self, other: Self) {
        if other.is_set() {
            *self = other;
        }
    }
}

impl<T> From<Option<T>> for TriState<T> {
    /// `None` is an explicit null.
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TriState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("Unset"),
            Self::Null => f.write_str("Null"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TriState;

    #[test]
    fn map_skips_unset_and_null() {
        let mut calls = 0;
        let unset: TriState<i32> = TriState::Unset;
        let null: TriState<i32> = TriState::Null;
        assert_eq!(
            unset.map(|v| {
                calls += 1;
                v
            }),
            TriState::Unset
        );
        assert_eq!(
            null.and_then(|v| {
                calls += 1;
                TriState::Value(v)
            }),
            TriState::Null
        );
        assert_eq!(calls, 0);
        assert_eq!(TriState::Value(2).map(|v| v * 2), TriState::Value(4));
    }

    #[test]
    fn update_ignores_unset() {
        let mut v = TriState::Value(1);
        v.update(TriState::Unset);
        assert_eq!(v, TriState::Value(1));
        v.update(TriState::Null);
        assert_eq!(v, TriState::Null);
        assert_eq!(v.take(), TriState::Null);
        assert!(v.is_unset());
    }

    #[test]
    fn option_conversions() {
        assert_eq!(TriState::<i32>::from(Some(3)), TriState::Value(3));
        assert_eq!(TriState::<i32>::from(None), TriState::Null);
        assert_eq!(TriState::<i32>::Unset.into_option(), None);
        assert_eq!(TriState::<i32>::Null.into_option(), Some(None));
        assert_eq!(TriState::Value(1).into_value(), Some(1));
    }
}
