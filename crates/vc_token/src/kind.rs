use core::fmt;

/// The kind of a token, as seen by [`TokenReader::peek_kind`].
///
/// [`TokenReader::peek_kind`]: crate::TokenReader::peek_kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    /// A property name inside an object.
    Name,
    Null,
    Bool,
    /// An integer or floating point number.
    Number,
    String,
}

impl TokenKind {
    /// Returns `true` for kinds that start a value.
    #[inline]
    pub const fn starts_value(self) -> bool {
        !matches!(self, Self::EndObject | Self::EndArray | Self::Name)
    }

    /// Returns a lower-case description used in error messages.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::BeginObject => "start of object",
            Self::EndObject => "end of object",
            Self::BeginArray => "start of array",
            Self::EndArray => "end of array",
            Self::Name => "property name",
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
