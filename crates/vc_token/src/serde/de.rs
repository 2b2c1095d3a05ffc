use core::fmt;

use serde_core::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde_core::{Deserialize, Deserializer};

use crate::{TokenBuffer, TokenWriter};

impl<'de> Deserialize<'de> for TokenBuffer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut writer = TokenWriter::new();
        ValueSeed {
            writer: &mut writer,
        }
        .deserialize(deserializer)?;
        writer.finish().map_err(de::Error::custom)
    }
}

/// Records one value into the writer.
struct ValueSeed<'w> {
    writer: &'w mut TokenWriter,
}

impl<'de> DeserializeSeed<'de> for ValueSeed<'_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for ValueSeed<'_> {
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any self-describing value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<(), E> {
        self.writer.write_bool(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<(), E> {
        self.writer.write_i64(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<(), E> {
        self.writer.write_u64(v).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<(), E> {
        self.writer.write_f64(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<(), E> {
        self.writer.write_str(v).map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> Result<(), E> {
        self.writer.write_null().map_err(E::custom)
    }

    fn visit_none<E: de::Error>(self) -> Result<(), E> {
        self.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        self.deserialize(deserializer)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        self.deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        let writer = self.writer;
        writer.begin_array().map_err(de::Error::custom)?;
        while seq
            .next_element_seed(ValueSeed {
                writer: &mut *writer,
            })?
            .is_some()
        {}
        writer.end_array().map_err(de::Error::custom)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        let writer = self.writer;
        writer.begin_object().map_err(de::Error::custom)?;
        while map
            .next_key_seed(NameSeed {
                writer: &mut *writer,
            })?
            .is_some()
        {
            map.next_value_seed(ValueSeed {
                writer: &mut *writer,
            })?;
        }
        writer.end_object().map_err(de::Error::custom)
    }
}

/// Records one property name into the writer.
struct NameSeed<'w> {
    writer: &'w mut TokenWriter,
}

impl<'de> DeserializeSeed<'de> for NameSeed<'_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_str(self)
    }
}

impl<'de> Visitor<'de> for NameSeed<'_> {
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string property name")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<(), E> {
        self.writer.write_name(v).map_err(E::custom)
    }
}
