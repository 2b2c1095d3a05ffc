use core::fmt;

use crate::{TokenKind, TokenReader};

// -----------------------------------------------------------------------------
// Token

/// A byte range into [`TokenBuffer::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    start: u32,
    len: u32,
}

/// One entry of a token buffer.
///
/// Container starts store the index of their matching end token.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Token {
    BeginObject { end: usize },
    EndObject,
    BeginArray { end: usize },
    EndArray,
    Name(Span),
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Str(Span),
}

impl Token {
    pub(crate) const fn kind(self) -> TokenKind {
        match self {
            Token::BeginObject { .. } => TokenKind::BeginObject,
            Token::EndObject => TokenKind::EndObject,
            Token::BeginArray { .. } => TokenKind::BeginArray,
            Token::EndArray => TokenKind::EndArray,
            Token::Name(_) => TokenKind::Name,
            Token::Null => TokenKind::Null,
            Token::Bool(_) => TokenKind::Bool,
            Token::I64(_) | Token::U64(_) | Token::F64(_) => TokenKind::Number,
            Token::Str(_) => TokenKind::String,
        }
    }
}

// -----------------------------------------------------------------------------
// TokenBuffer

/// A recorded token stream.
///
/// All names and strings share one text arena. A buffer produced by
/// [`TokenWriter::finish`] always holds zero or one complete value.
///
/// Equality is semantic: two buffers are equal when they hold the same
/// token sequence with the same names, strings, and numbers.
///
/// [`TokenWriter::finish`]: crate::TokenWriter::finish
#[derive(Clone, Default)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    text: String,
}

impl TokenBuffer {
    /// Creates an empty buffer.
    #[inline]
    pub const fn new() -> Self {
        Self {
            tokens: Vec::new(),
            text: String::new(),
        }
    }

    /// Creates a buffer holding a single `null`.
    pub fn null() -> Self {
        Self {
            tokens: vec![Token::Null],
            text: String::new(),
        }
    }

    /// Returns the number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the buffer holds no tokens.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns a reader positioned at the first token.
    #[inline]
    pub fn reader(&self) -> TokenReader<'_> {
        TokenReader::new(self)
    }

    /// Returns the kind of the token at `index`.
    #[inline]
    pub fn kind_at(&self, index: usize) -> Option<TokenKind> {
        self.tokens.get(index).map(|t| t.kind())
    }

    #[inline]
    pub(crate) fn token(&self, index: usize) -> Option<Token> {
        self.tokens.get(index).copied()
    }

    #[inline]
    pub(crate) fn text(&self, span: Span) -> &str {
        let start = span.start as usize;
        &self.text[start..start + span.len as usize]
    }

    /// Index one past the value starting at `index`.
    #[inline]
    pub(crate) fn value_end(&self, index: usize) -> usize {
        match self.tokens[index] {
            Token::BeginObject { end } | Token::BeginArray { end } => end + 1,
            _ => index + 1,
        }
    }

    pub(crate) fn push(&mut self, token: Token) -> usize {
        self.tokens.push(token);
        self.tokens.len() - 1
    }

    pub(crate) fn push_text(&mut self, s: &str) -> Span {
        let start = self.text.len();
        self.text.push_str(s);
        // Arena offsets are 32-bit; a buffer this large is not a supported input.
        Span {
            start: start as u32,
            len: s.len() as u32,
        }
    }

    /// Points the container start at `start` to its end token at `end`.
    pub(crate) fn close(&mut self, start: usize, end: usize) {
        match &mut self.tokens[start] {
            Token::BeginObject { end: slot } | Token::BeginArray { end: slot } => *slot = end,
            _ => unreachable!("closing a non-container token"),
        }
    }

    /// Copies the tokens in `start..end` into a new buffer, rebasing
    /// container indices and strings.
    pub(crate) fn copy_range(&self, start: usize, end: usize) -> TokenBuffer {
        let mut out = TokenBuffer {
            tokens: Vec::with_capacity(end - start),
            text: String::new(),
        };
        for token in &self.tokens[start..end] {
            let token = match *token {
                Token::BeginObject { end } => Token::BeginObject { end: end - start },
                Token::BeginArray { end } => Token::BeginArray { end: end - start },
                Token::Name(span) => Token::Name(out.push_text(self.text(span))),
                Token::Str(span) => Token::Str(out.push_text(self.text(span))),
                other => other,
            };
            out.tokens.push(token);
        }
        out
    }
}

impl PartialEq for TokenBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.len() == other.tokens.len()
            && self
                .tokens
                .iter()
                .zip(&other.tokens)
                .all(|(x, y)| match (*x, *y) {
                    (Token::BeginObject { end: a }, Token::BeginObject { end: b })
                    | (Token::BeginArray { end: a }, Token::BeginArray { end: b }) => a == b,
                    (Token::EndObject, Token::EndObject)
                    | (Token::EndArray, Token::EndArray)
                    | (Token::Null, Token::Null) => true,
                    (Token::Name(a), Token::Name(b)) | (Token::Str(a), Token::Str(b)) => {
                        self.text(a) == other.text(b)
                    }
                    (Token::Bool(a), Token::Bool(b)) => a == b,
                    (Token::I64(a), Token::I64(b)) => a == b,
                    (Token::U64(a), Token::U64(b)) => a == b,
                    (Token::F64(a), Token::F64(b)) => a == b,
                    _ => false,
                })
    }
}

impl fmt::Debug for TokenBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Entry<'a>(&'a TokenBuffer, Token);

        impl fmt::Debug for Entry<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.1 {
                    Token::BeginObject { .. } => f.write_str("{"),
                    Token::EndObject => f.write_str("}"),
                    Token::BeginArray { .. } => f.write_str("["),
                    Token::EndArray => f.write_str("]"),
                    Token::Name(span) => write!(f, "{:?}:", self.0.text(span)),
                    Token::Null => f.write_str("null"),
                    Token::Bool(v) => write!(f, "{v}"),
                    Token::I64(v) => write!(f, "{v}"),
                    Token::U64(v) => write!(f, "{v}u"),
                    Token::F64(v) => write!(f, "{v:?}"),
                    Token::Str(span) => write!(f, "{:?}", self.0.text(span)),
                }
            }
        }

        f.write_str("TokenBuffer ")?;
        f.debug_list()
            .entries(self.tokens.iter().map(|t| Entry(self, *t)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::TokenWriter;

    fn sample(tag: &str) -> crate::TokenBuffer {
        let mut w = TokenWriter::new();
        w.begin_object().unwrap();
        w.write_name("tag").unwrap();
        w.write_str(tag).unwrap();
        w.write_name("items").unwrap();
        w.begin_array().unwrap();
        w.write_i64(-1).unwrap();
        w.write_null().unwrap();
        w.end_array().unwrap();
        w.end_object().unwrap();
        w.finish().unwrap()
    }

    #[test]
    fn equality_compares_text_not_offsets() {
        assert_eq!(sample("a"), sample("a"));
        assert_ne!(sample("a"), sample("b"));

        // The same value read out of a larger buffer sits elsewhere in its arena.
        let inner = sample("x");
        let mut w = TokenWriter::new();
        w.begin_array().unwrap();
        w.write_str("padding").unwrap();
        w.write_raw(&inner).unwrap();
        w.end_array().unwrap();
        let outer = w.finish().unwrap();
        let mut r = outer.reader();
        r.begin_array().unwrap();
        assert!(r.next_element().unwrap());
        r.skip_value().unwrap();
        assert!(r.next_element().unwrap());
        assert_eq!(r.read_raw().unwrap(), inner);
    }

    #[test]
    fn equality_keeps_number_kinds_apart() {
        let number = |f: fn(&mut TokenWriter) -> Result<(), crate::TokenError>| {
            let mut w = TokenWriter::new();
            f(&mut w).unwrap();
            w.finish().unwrap()
        };
        assert_eq!(number(|w| w.write_u64(1)), number(|w| w.write_u64(1)));
        assert_ne!(number(|w| w.write_i64(1)), number(|w| w.write_u64(1)));
    }

    #[test]
    fn copy_range_rebases() {
        let buf = sample("x");
        // `items` array spans tokens 4..=7.
        let copy = buf.copy_range(4, 8);
        let mut r = copy.reader();
        r.skip_value().unwrap();
        assert!(r.is_finished());
        assert_eq!(format!("{copy:?}"), "TokenBuffer [[, -1, null, ]]");
    }

    #[test]
    fn debug_output() {
        assert_eq!(
            format!("{:?}", sample("x")),
            r#"TokenBuffer [{, "tag":, "x", "items":, [, -1, null, ], }]"#
        );
    }
}
