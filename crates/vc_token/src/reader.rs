use crate::buffer::Token;
use crate::{TokenBuffer, TokenError, TokenKind};

// -----------------------------------------------------------------------------
// Checkpoint

/// A saved reader position, see [`TokenReader::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

// -----------------------------------------------------------------------------
// TokenReader

/// A forward cursor over a [`TokenBuffer`].
///
/// Readers are cheap to copy. Restoring a [`Checkpoint`] rewinds the
/// cursor, which is how a value can be scanned twice.
#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
    buf: &'a TokenBuffer,
    pos: usize,
}

impl<'a> TokenReader<'a> {
    /// Creates a reader at the start of `buf`.
    #[inline]
    pub const fn new(buf: &'a TokenBuffer) -> Self {
        Self { buf, pos: 0 }
    }

    /// Index of the next token.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` once every token has been consumed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Returns the kind of the next token without consuming it.
    #[inline]
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.buf.kind_at(self.pos)
    }

    /// Saves the current position.
    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    /// Rewinds (or advances) to a saved position.
    #[inline]
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.0;
    }

    fn next(&mut self, expected: &'static str) -> Result<Token, TokenError> {
        match self.buf.token(self.pos) {
            Some(token) => {
                self.pos += 1;
                Ok(token)
            }
            None => Err(TokenError::UnexpectedEnd {
                expected,
                position: self.pos,
            }),
        }
    }

    #[cold]
    fn unexpected(&self, expected: &'static str, token: Token) -> TokenError {
        TokenError::Unexpected {
            expected,
            found: token.kind(),
            position: self.pos - 1,
        }
    }

    /// Consumes the start of an object.
    pub fn begin_object(&mut self) -> Result<(), TokenError> {
        match self.next("start of object")? {
            Token::BeginObject { .. } => Ok(()),
            other => Err(self.unexpected("start of object", other)),
        }
    }

    /// Reads the next property name of the current object.
    ///
    /// Returns `None` after consuming the end of the object.
    pub fn read_name(&mut self) -> Result<Option<&'a str>, TokenError> {
        match self.next("property name or end of object")? {
            Token::Name(span) => Ok(Some(self.buf.text(span))),
            Token::EndObject => Ok(None),
            other => Err(self.unexpected("property name or end of object", other)),
        }
    }

    /// Consumes the start of an array.
    pub fn begin_array(&mut self) -> Result<(), TokenError> {
        match self.next("start of array")? {
            Token::BeginArray { .. } => Ok(()),
            other => Err(self.unexpected("start of array", other)),
        }
    }

    /// Returns `true` if another array element follows.
    ///
    /// Returns `false` after consuming the end of the array.
    pub fn next_element(&mut self) -> Result<bool, TokenError> {
        match self.peek_kind() {
            Some(TokenKind::EndArray) => {
                self.pos += 1;
                Ok(false)
            }
            Some(kind) if kind.starts_value() => Ok(true),
            Some(kind) => Err(TokenError::Unexpected {
                expected: "array element or end of array",
                found: kind,
                position: self.pos,
            }),
            None => Err(TokenError::UnexpectedEnd {
                expected: "array element or end of array",
                position: self.pos,
            }),
        }
    }

    /// Consumes a `null` if one is next.
    #[inline]
    pub fn try_read_null(&mut self) -> bool {
        let is_null = self.peek_kind() == Some(TokenKind::Null);
        if is_null {
            self.pos += 1;
        }
        is_null
    }

    pub fn read_null(&mut self) -> Result<(), TokenError> {
        match self.next("null")? {
            Token::Null => Ok(()),
            other => Err(self.unexpected("null", other)),
        }
    }

    pub fn read_bool(&mut self) -> Result<bool, TokenError> {
        match self.next("boolean")? {
            Token::Bool(v) => Ok(v),
            other => Err(self.unexpected("boolean", other)),
        }
    }

    pub fn read_i64(&mut self) -> Result<i64, TokenError> {
        match self.next("integer")? {
            Token::I64(v) => Ok(v),
            Token::U64(v) => i64::try_from(v).map_err(|_| TokenError::OutOfRange {
                target: "i64",
                position: self.pos - 1,
            }),
            other => Err(self.unexpected("integer", other)),
        }
    }

    pub fn read_u64(&mut self) -> Result<u64, TokenError> {
        match self.next("integer")? {
            Token::U64(v) => Ok(v),
            Token::I64(v) => u64::try_from(v).map_err(|_| TokenError::OutOfRange {
                target: "u64",
                position: self.pos - 1,
            }),
            other => Err(self.unexpected("integer", other)),
        }
    }

    /// Reads any number as `f64`.
    pub fn read_f64(&mut self) -> Result<f64, TokenError> {
        match self.next("number")? {
            Token::F64(v) => Ok(v),
            Token::I64(v) => Ok(v as f64),
            Token::U64(v) => Ok(v as f64),
            other => Err(self.unexpected("number", other)),
        }
    }

    pub fn read_str(&mut self) -> Result<&'a str, TokenError> {
        match self.next("string")? {
            Token::Str(span) => Ok(self.buf.text(span)),
            other => Err(self.unexpected("string", other)),
        }
    }

    /// Returns the bounds of the value starting at the cursor.
    fn value_bounds(&self) -> Result<(usize, usize), TokenError> {
        match self.buf.token(self.pos) {
            Some(token) if token.kind().starts_value() => {
                Ok((self.pos, self.buf.value_end(self.pos)))
            }
            Some(token) => Err(TokenError::Unexpected {
                expected: "value",
                found: token.kind(),
                position: self.pos,
            }),
            None => Err(TokenError::UnexpectedEnd {
                expected: "value",
                position: self.pos,
            }),
        }
    }

    /// Skips one complete value, nested containers included.
    pub fn skip_value(&mut self) -> Result<(), TokenError> {
        let (_, end) = self.value_bounds()?;
        self.pos = end;
        Ok(())
    }

    /// Consumes one complete value and returns a copy of its tokens.
    pub fn read_raw(&mut self) -> Result<TokenBuffer, TokenError> {
        let (start, end) = self.value_bounds()?;
        self.pos = end;
        Ok(self.buf.copy_range(start, end))
    }
}

#[cfg(test)]
mod tests {
    use crate::{TokenError, TokenKind, TokenWriter};

    fn nested() -> crate::TokenBuffer {
        let mut w = TokenWriter::new();
        w.begin_object().unwrap();
        w.write_name("deep").unwrap();
        w.begin_object().unwrap();
        w.write_name("list").unwrap();
        w.begin_array().unwrap();
        w.begin_object().unwrap();
        w.end_object().unwrap();
        w.write_u64(u64::MAX).unwrap();
        w.end_array().unwrap();
        w.end_object().unwrap();
        w.write_name("after").unwrap();
        w.write_bool(true).unwrap();
        w.end_object().unwrap();
        w.finish().unwrap()
    }

    #[test]
    fn skip_nested_value() {
        let buf = nested();
        let mut r = buf.reader();
        r.begin_object().unwrap();
        assert_eq!(r.read_name().unwrap(), Some("deep"));
        r.skip_value().unwrap();
        assert_eq!(r.read_name().unwrap(), Some("after"));
        assert!(r.read_bool().unwrap());
        assert_eq!(r.read_name().unwrap(), None);
        assert!(r.is_finished());
    }

    #[test]
    fn checkpoint_rescans() {
        let buf = nested();
        let mut r = buf.reader();
        r.begin_object().unwrap();
        let cp = r.checkpoint();
        assert_eq!(r.read_name().unwrap(), Some("deep"));
        r.skip_value().unwrap();
        r.restore(cp);
        assert_eq!(r.read_name().unwrap(), Some("deep"));
        assert_eq!(r.peek_kind(), Some(TokenKind::BeginObject));
    }

    #[test]
    fn integer_range() {
        let buf = nested();
        let mut r = buf.reader();
        r.begin_object().unwrap();
        r.read_name().unwrap();
        r.begin_object().unwrap();
        r.read_name().unwrap();
        r.begin_array().unwrap();
        assert!(r.next_element().unwrap());
        r.skip_value().unwrap();
        assert!(r.next_element().unwrap());
        let err = r.clone().read_i64().unwrap_err();
        assert!(matches!(err, TokenError::OutOfRange { target: "i64", .. }));
        assert_eq!(r.read_u64().unwrap(), u64::MAX);
        assert!(!r.next_element().unwrap());
    }

    #[test]
    fn wrong_kind_reports_position() {
        let buf = nested();
        let mut r = buf.reader();
        let err = r.read_str().unwrap_err();
        assert_eq!(
            err,
            TokenError::Unexpected {
                expected: "string",
                found: TokenKind::BeginObject,
                position: 0,
            }
        );
    }

    #[test]
    fn raw_copy_is_standalone() {
        let buf = nested();
        let mut r = buf.reader();
        r.begin_object().unwrap();
        r.read_name().unwrap();
        let raw = r.read_raw().unwrap();
        assert_eq!(raw.kind_at(0), Some(TokenKind::BeginObject));
        let mut inner = raw.reader();
        inner.skip_value().unwrap();
        assert!(inner.is_finished());
        assert_eq!(r.read_name().unwrap(), Some("after"));
    }
}
