use serde_core::ser::{Error as _, SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

use crate::TokenBuffer;
use crate::buffer::Token;

impl Serialize for TokenBuffer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_empty() {
            return serializer.serialize_unit();
        }
        ValueAt {
            buf: self,
            index: 0,
        }
        .serialize(serializer)
    }
}

/// The value starting at `index`.
struct ValueAt<'a> {
    buf: &'a TokenBuffer,
    index: usize,
}

impl ValueAt<'_> {
    /// Counts the direct children of the container at `self.index`.
    fn children(&self, end: usize, step_over_names: bool) -> usize {
        let mut count = 0;
        let mut i = self.index + 1;
        while i < end {
            if step_over_names {
                i += 1;
            }
            i = self.buf.value_end(i);
            count += 1;
        }
        count
    }
}

impl Serialize for ValueAt<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let buf = self.buf;
        match buf.token(self.index) {
            Some(Token::BeginObject { end }) => {
                let mut map = serializer.serialize_map(Some(self.children(end, true)))?;
                let mut i = self.index + 1;
                while i < end {
                    let Some(Token::Name(span)) = buf.token(i) else {
                        return Err(S::Error::custom("object entry without a name"));
                    };
                    map.serialize_entry(buf.text(span), &ValueAt { buf, index: i + 1 })?;
                    i = buf.value_end(i + 1);
                }
                map.end()
            }
            Some(Token::BeginArray { end }) => {
                let mut seq = serializer.serialize_seq(Some(self.children(end, false)))?;
                let mut i = self.index + 1;
                while i < end {
                    seq.serialize_element(&ValueAt { buf, index: i })?;
                    i = buf.value_end(i);
                }
                seq.end()
            }
            Some(Token::Null) => serializer.serialize_unit(),
            Some(Token::Bool(v)) => serializer.serialize_bool(v),
            Some(Token::I64(v)) => serializer.serialize_i64(v),
            Some(Token::U64(v)) => serializer.serialize_u64(v),
            Some(Token::F64(v)) => serializer.serialize_f64(v),
            Some(Token::Str(span)) => serializer.serialize_str(buf.text(span)),
            _ => Err(S::Error::custom("token does not start a value")),
        }
    }
}
