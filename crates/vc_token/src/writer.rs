use crate::buffer::Token;
use crate::{TokenBuffer, TokenError};

#[derive(Debug, Clone, Copy)]
enum Frame {
    Object { start: usize, awaiting_value: bool },
    Array { start: usize },
}

/// Builds a [`TokenBuffer`] holding a single value.
///
/// Every write is validated against the open containers, so a finished
/// buffer is always balanced.
#[derive(Debug, Default)]
pub struct TokenWriter {
    buf: TokenBuffer,
    frames: Vec<Frame>,
    root_written: bool,
}

impl TokenWriter {
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: TokenBuffer::new(),
            frames: Vec::new(),
            root_written: false,
        }
    }

    /// Number of open containers.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn before_value(&mut self, what: &'static str) -> Result<(), TokenError> {
        match self.frames.last_mut() {
            None if self.root_written => Err(TokenError::InvalidWrite {
                what,
                reason: "a top-level value was already written",
            }),
            None => {
                self.root_written = true;
                Ok(())
            }
            Some(Frame::Object { awaiting_value, .. }) => {
                if !*awaiting_value {
                    return Err(TokenError::InvalidWrite {
                        what,
                        reason: "an object member needs a name first",
                    });
                }
                *awaiting_value = false;
                Ok(())
            }
            Some(Frame::Array { .. }) => Ok(()),
        }
    }

    pub fn begin_object(&mut self) -> Result<(), TokenError> {
        self.before_value("start of object")?;
        let start = self.buf.push(Token::BeginObject { end: 0 });
        self.frames.push(Frame::Object {
            start,
            awaiting_value: false,
        });
        Ok(())
    }

    pub fn write_name(&mut self, name: &str) -> Result<(), TokenError> {
        match self.frames.last_mut() {
            Some(Frame::Object { awaiting_value, .. }) if !*awaiting_value => {
                *awaiting_value = true;
            }
            Some(Frame::Object { .. }) => {
                return Err(TokenError::InvalidWrite {
                    what: "property name",
                    reason: "the previous name has no value",
                });
            }
            _ => {
                return Err(TokenError::InvalidWrite {
                    what: "property name",
                    reason: "no object is open",
                });
            }
        }
        let span = self.buf.push_text(name);
        self.buf.push(Token::Name(span));
        Ok(())
    }

    pub fn end_object(&mut self) -> Result<(), TokenError> {
        match self.frames.last() {
            Some(&Frame::Object {
                start,
                awaiting_value: false,
            }) => {
                self.frames.pop();
                let end = self.buf.push(Token::EndObject);
                self.buf.close(start, end);
                Ok(())
            }
            Some(Frame::Object { .. }) => Err(TokenError::InvalidWrite {
                what: "end of object",
                reason: "the last name has no value",
            }),
            _ => Err(TokenError::InvalidWrite {
                what: "end of object",
                reason: "no object is open",
            }),
        }
    }

    pub fn begin_array(&mut self) -> Result<(), TokenError> {
        self.before_value("start of array")?;
        let start = self.buf.push(Token::BeginArray { end: 0 });
        self.frames.push(Frame::Array { start });
        Ok(())
    }

    pub fn end_array(&mut self) -> Result<(), TokenError> {
        match self.frames.last() {
            Some(&Frame::Array { start }) => {
                self.frames.pop();
                let end = self.buf.push(Token::EndArray);
                self.buf.close(start, end);
                Ok(())
            }
            _ => Err(TokenError::InvalidWrite {
                what: "end of array",
                reason: "no array is open",
            }),
        }
    }

    pub fn write_null(&mut self) -> Result<(), TokenError> {
        self.before_value("null")?;
        self.buf.push(Token::Null);
        Ok(())
    }

    pub fn write_bool(&mut self, v: bool) -> Result<(), TokenError> {
        self.before_value("boolean")?;
        self.buf.push(Token::Bool(v));
        Ok(())
    }

    pub fn write_i64(&mut self, v: i64) -> Result<(), TokenError> {
        self.before_value("number")?;
        self.buf.push(Token::I64(v));
        Ok(())
    }

    pub fn write_u64(&mut self, v: u64) -> Result<(), TokenError> {
        self.before_value("number")?;
        self.buf.push(Token::U64(v));
        Ok(())
    }

    pub fn write_f64(&mut self, v: f64) -> Result<(), TokenError> {
        self.before_value("number")?;
        self.buf.push(Token::F64(v));
        Ok(())
    }

    pub fn write_str(&mut self, v: &str) -> Result<(), TokenError> {
        self.before_value("string")?;
        let span = self.buf.push_text(v);
        self.buf.push(Token::Str(span));
        Ok(())
    }

    /// Replays every token of `raw` at the current position.
    ///
    /// `raw` must hold exactly one value, as produced by
    /// [`TokenReader::read_raw`](crate::TokenReader::read_raw).
    pub fn write_raw(&mut self, raw: &TokenBuffer) -> Result<(), TokenError> {
        if raw.is_empty() {
            return Err(TokenError::InvalidWrite {
                what: "raw value",
                reason: "the buffer is empty",
            });
        }
        if raw.value_end(0) != raw.len() {
            return Err(TokenError::InvalidWrite {
                what: "raw value",
                reason: "the buffer holds more than one value",
            });
        }
        for index in 0..raw.len() {
            match raw.token(index) {
                Some(Token::BeginObject { .. }) => self.begin_object()?,
                Some(Token::EndObject) => self.end_object()?,
                Some(Token::BeginArray { .. }) => self.begin_array()?,
                Some(Token::EndArray) => self.end_array()?,
                Some(Token::Name(span)) => self.write_name(raw.text(span))?,
                Some(Token::Null) => self.write_null()?,
                Some(Token::Bool(v)) => self.write_bool(v)?,
                Some(Token::I64(v)) => self.write_i64(v)?,
                Some(Token::U64(v)) => self.write_u64(v)?,
                Some(Token::F64(v)) => self.write_f64(v)?,
                Some(Token::Str(span)) => self.write_str(raw.text(span))?,
                None => unreachable!(),
            }
        }
        Ok(())
    }

    /// Returns the finished buffer.
    ///
    /// Fails if any container is still open.
    pub fn finish(self) -> Result<TokenBuffer, TokenError> {
        if !self.frames.is_empty() {
            return Err(TokenError::Incomplete {
                open: self.frames.len(),
            });
        }
        Ok(self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::TokenWriter;
    use crate::TokenError;

    #[test]
    fn rejects_value_without_name() {
        let mut w = TokenWriter::new();
        w.begin_object().unwrap();
        assert!(matches!(
            w.write_i64(1),
            Err(TokenError::InvalidWrite { .. })
        ));
        w.write_name("a").unwrap();
        assert!(w.write_name("b").is_err());
        assert!(w.end_object().is_err());
        w.write_i64(1).unwrap();
        w.end_object().unwrap();
        assert!(w.write_i64(2).is_err());
    }

    #[test]
    fn finish_requires_balance() {
        let mut w = TokenWriter::new();
        w.begin_array().unwrap();
        w.begin_object().unwrap();
        assert!(w.end_array().is_err());
        assert_eq!(w.depth(), 2);
        assert_eq!(w.finish().unwrap_err(), TokenError::Incomplete { open: 2 });
    }

    #[test]
    fn raw_splice() {
        let mut inner = TokenWriter::new();
        inner.begin_array().unwrap();
        inner.write_str("x").unwrap();
        inner.end_array().unwrap();
        let inner = inner.finish().unwrap();

        let mut w = TokenWriter::new();
        w.begin_object().unwrap();
        w.write_name("raw").unwrap();
        w.write_raw(&inner).unwrap();
        w.end_object().unwrap();
        let buf = w.finish().unwrap();

        let mut r = buf.reader();
        r.begin_object().unwrap();
        assert_eq!(r.read_name().unwrap(), Some("raw"));
        assert_eq!(r.read_raw().unwrap(), inner);
        assert_eq!(r.read_name().unwrap(), None);
    }
}
