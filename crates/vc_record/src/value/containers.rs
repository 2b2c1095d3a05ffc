use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::hash::BuildHasher;

use vc_token::{TokenReader, TokenWriter};
use vc_utils::hash::HashMap;

use super::Wire;
use crate::codec::{DecodeError, DecodeOptions, EncodeError};

impl<T: Wire> Wire for Option<T> {
    const NULLABLE: bool = true;

    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        match self {
            Some(v) => v.encode(writer),
            None => Ok(writer.write_null()?),
        }
    }

    fn decode(reader: &mut TokenReader<'_>, options: &DecodeOptions) -> Result<Self, DecodeError> {
        if reader.try_read_null() {
            return Ok(None);
        }
        T::decode(reader, options).map(Some)
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
    }

    #[inline]
    fn null() -> Option<Self> {
        Some(None)
    }
}

impl<T: Wire> Wire for Box<T> {
    const NULLABLE: bool = T::NULLABLE;

    #[inline]
    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        T::encode(self, writer)
    }

    #[inline]
    fn decode(reader: &mut TokenReader<'_>, options: &DecodeOptions) -> Result<Self, DecodeError> {
        T::decode(reader, options).map(Box::new)
    }

    #[inline]
    fn is_null(&self) -> bool {
        T::is_null(self)
    }

    #[inline]
    fn null() -> Option<Self> {
        T::null().map(Box::new)
    }
}

impl<T: Wire> Wire for Vec<T> {
    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        writer.begin_array()?;
        for item in self {
            item.encode(writer)?;
        }
        Ok(writer.end_array()?)
    }

    fn decode(reader: &mut TokenReader<'_>, options: &DecodeOptions) -> Result<Self, DecodeError> {
        reader.begin_array()?;
        let mut items = Vec::new();
        while reader.next_element()? {
            items.push(T::decode(reader, options)?);
        }
        Ok(items)
    }
}

impl<T: Wire> Wire for BTreeMap<String, T> {
    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        writer.begin_object()?;
        for (key, value) in self {
            writer.write_name(key)?;
            value.encode(writer)?;
        }
        Ok(writer.end_object()?)
    }

    fn decode(reader: &mut TokenReader<'_>, options: &DecodeOptions) -> Result<Self, DecodeError> {
        reader.begin_object()?;
        let mut map = BTreeMap::new();
        while let Some(key) = reader.read_name()? {
            let value = T::decode(reader, options)?;
            map.insert(key.to_string(), value);
        }
        Ok(map)
    }
}

impl<T, S> Wire for HashMap<String, T, S>
where
    T: Wire,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        writer.begin_object()?;
        for (key, value) in self {
            writer.write_name(key)?;
            value.encode(writer)?;
        }
        Ok(writer.end_object()?)
    }

    fn decode(reader: &mut TokenReader<'_>, options: &DecodeOptions) -> Result<Self, DecodeError> {
        reader.begin_object()?;
        let mut map = HashMap::with_hasher(S::default());
        while let Some(key) = reader.read_name()? {
            let value = T::decode(reader, options)?;
            map.insert(key.to_string(), value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use vc_token::TokenWriter;

    use crate::codec::DecodeOptions;
    use crate::value::Wire;

    fn round_trip<T: Wire>(value: &T) -> T {
        let mut w = TokenWriter::new();
        value.encode(&mut w).unwrap();
        let buf = w.finish().unwrap();
        let mut r = buf.reader();
        let out = T::decode(&mut r, &DecodeOptions::default()).unwrap();
        assert!(r.is_finished());
        out
    }

    #[test]
    fn nested_containers() {
        let value: Vec<Option<u16>> = vec![Some(1), None, Some(3)];
        assert_eq!(round_trip(&value), value);

        let mut map = BTreeMap::new();
        map.insert(String::from("a"), vec![true]);
        map.insert(String::from("b"), Vec::new());
        assert_eq!(round_trip(&map), map);
    }

    #[test]
    fn option_reports_null() {
        assert!(<Option<u8> as Wire>::NULLABLE);
        assert!(Wire::is_null(&None::<u8>));
        assert_eq!(<Option<u8> as Wire>::null(), Some(None));
        assert_eq!(<u8 as Wire>::null(), None);
    }
}
