use alloc::string::{String, ToString};

use vc_token::{TokenReader, TokenWriter};

use super::Wire;
use crate::codec::{DecodeError, DecodeOptions, EncodeError};

impl Wire for bool {
    #[inline]
    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        Ok(writer.write_bool(*self)?)
    }

    #[inline]
    fn decode(reader: &mut TokenReader<'_>, _: &DecodeOptions) -> Result<Self, DecodeError> {
        Ok(reader.read_bool()?)
    }
}

impl Wire for String {
    #[inline]
    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        Ok(writer.write_str(self)?)
    }

    #[inline]
    fn decode(reader: &mut TokenReader<'_>, _: &DecodeOptions) -> Result<Self, DecodeError> {
        Ok(reader.read_str()?.to_string())
    }
}

impl Wire for f64 {
    #[inline]
    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        Ok(writer.write_f64(*self)?)
    }

    #[inline]
    fn decode(reader: &mut TokenReader<'_>, _: &DecodeOptions) -> Result<Self, DecodeError> {
        Ok(reader.read_f64()?)
    }
}

impl Wire for f32 {
    #[inline]
    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        Ok(writer.write_f64(f64::from(*self))?)
    }

    #[inline]
    fn decode(reader: &mut TokenReader<'_>, _: &DecodeOptions) -> Result<Self, DecodeError> {
        Ok(reader.read_f64()? as f32)
    }
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {$(
        impl Wire for $ty {
            #[inline]
            fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
                Ok(writer.write_i64(*self as i64)?)
            }

            fn decode(reader: &mut TokenReader<'_>, _: &DecodeOptions) -> Result<Self, DecodeError> {
                let v = reader.read_i64()?;
                <$ty>::try_from(v).map_err(|_| DecodeError::OutOfRange {
                    target: stringify!($ty),
                    value: v.to_string(),
                })
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl Wire for $ty {
            #[inline]
            fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
                Ok(writer.write_u64(*self as u64)?)
            }

            fn decode(reader: &mut TokenReader<'_>, _: &DecodeOptions) -> Result<Self, DecodeError> {
                let v = reader.read_u64()?;
                <$ty>::try_from(v).map_err(|_| DecodeError::OutOfRange {
                    target: stringify!($ty),
                    value: v.to_string(),
                })
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use vc_token::TokenWriter;

    use crate::codec::{DecodeError, DecodeOptions};
    use crate::value::Wire;

    fn decode<T: Wire>(write: impl FnOnce(&mut TokenWriter)) -> Result<T, DecodeError> {
        let mut w = TokenWriter::new();
        write(&mut w);
        let buf = w.finish().unwrap();
        T::decode(&mut buf.reader(), &DecodeOptions::default())
    }

    #[test]
    fn narrowing_is_checked() {
        assert_eq!(decode::<u8>(|w| w.write_u64(255).unwrap()).unwrap(), 255);
        let err = decode::<u8>(|w| w.write_u64(256).unwrap()).unwrap_err();
        assert!(matches!(err, DecodeError::OutOfRange { target: "u8", .. }));
        let err = decode::<u32>(|w| w.write_i64(-1).unwrap()).unwrap_err();
        assert!(matches!(err, DecodeError::Token(_)));
        assert_eq!(decode::<i16>(|w| w.write_i64(-300).unwrap()).unwrap(), -300);
    }

    #[test]
    fn floats_accept_integers() {
        assert_eq!(decode::<f64>(|w| w.write_u64(2).unwrap()).unwrap(), 2.0);
        assert_eq!(decode::<f32>(|w| w.write_f64(0.5).unwrap()).unwrap(), 0.5);
    }

    #[test]
    fn null_is_not_a_string() {
        assert!(decode::<String>(|w| w.write_null().unwrap()).is_err());
    }
}
