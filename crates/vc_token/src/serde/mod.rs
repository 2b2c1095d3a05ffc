//! `serde_core` bridge for [`TokenBuffer`](crate::TokenBuffer).
//!
//! - `Deserialize` records any self-describing input through
//!   `deserialize_any`, so any `serde` format can feed a token buffer.
//! - `Serialize` replays a buffer into any `serde` output format.

mod de;
mod ser;

#[cfg(test)]
mod tests {
    use crate::{TokenBuffer, TokenKind};

    const TEXT: &str = r#"{"id":-3,"big":18446744073709551615,"ratio":0.5,"name":"x\"y","tags":["a",null,true],"empty":{}}"#;

    #[test]
    fn json_round_trip() {
        let buf: TokenBuffer = serde_json::from_str(TEXT).unwrap();
        assert_eq!(buf.kind_at(0), Some(TokenKind::BeginObject));
        assert_eq!(serde_json::to_string(&buf).unwrap(), TEXT);
    }

    #[test]
    fn reads_recorded_values() {
        let buf: TokenBuffer = serde_json::from_str(TEXT).unwrap();
        let mut r = buf.reader();
        r.begin_object().unwrap();
        assert_eq!(r.read_name().unwrap(), Some("id"));
        assert_eq!(r.read_i64().unwrap(), -3);
        assert_eq!(r.read_name().unwrap(), Some("big"));
        assert_eq!(r.read_u64().unwrap(), u64::MAX);
        assert_eq!(r.read_name().unwrap(), Some("ratio"));
        assert_eq!(r.read_f64().unwrap(), 0.5);
        assert_eq!(r.read_name().unwrap(), Some("name"));
        assert_eq!(r.read_str().unwrap(), "x\"y");
    }

    #[test]
    fn scalar_root() {
        let buf: TokenBuffer = serde_json::from_str("null").unwrap();
        assert_eq!(buf.len(), 1);
        assert_eq!(serde_json::to_string(&buf).unwrap(), "null");
    }
}
