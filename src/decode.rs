//! This module defines the [`Decode`] trait, which maps each type to the
//! decoder used for it.
//!
//! Scalars are decoded with their ordinary serde `Deserialize` impl.
//! Containers decode their elements through `Decode` again, so a record
//! nested anywhere inside a field value is itself decoded strictly.
//! Record types implement `Decode` by calling
//! [`read_record`](crate::reader::read_record), usually via
//! [`impl_decode_for_record!`](crate::impl_decode_for_record).

use crate::context::DecodeSession;
use crate::value::Value;
use serde::de::{
    self, DeserializeOwned, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor,
};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// A type that can be decoded within a [`DecodeSession`].
pub trait Decode: Sized {
    /// Whether a null input is a valid value of this type.
    const NULLABLE: bool = false;

    /// Decode a value of this type.
    fn decode<'de, D>(deserializer: D, session: &DecodeSession<'_>) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>;
}

/// Adapts [`Decode`] to serde's `DeserializeSeed`.
///
/// This is how the decoder hands field and element values back to the
/// data format, and it can also be used to run the strict decoder inside
/// some other serde-based deserializer.
pub struct DecodeSeed<'s, 'd, T> {
    session: &'s DecodeSession<'d>,
    marker: PhantomData<fn() -> T>,
}

impl<'s, 'd, T> DecodeSeed<'s, 'd, T> {
    /// Create a seed that decodes a `T` within `session`.
    pub fn new(session: &'s DecodeSession<'d>) -> Self {
        DecodeSeed {
            session,
            marker: PhantomData,
        }
    }
}

impl<'de, T: Decode> DeserializeSeed<'de> for DecodeSeed<'_, '_, T> {
    type Value = T;

    fn deserialize<D>(self, deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::decode(deserializer, self.session)
    }
}

// Types that are always decoded with their plain serde impl.
macro_rules! decode_with_default {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Decode for $ty {
                fn decode<'de, D>(
                    deserializer: D,
                    _session: &DecodeSession<'_>,
                ) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    <$ty as Deserialize>::deserialize(deserializer)
                }
            }
        )*
    };
}

decode_with_default!(
    bool, char, String, (), i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64, Value,
);

#[cfg(feature = "serde_json")]
decode_with_default!(serde_json::Value);

/// A wrapper that decodes any `Deserialize` type with its plain serde impl.
///
/// Use this for field types that aren't records and have no [`Decode`]
/// impl of their own.  Records inside a `Permissive` value are not decoded
/// strictly.
///
/// A `Permissive` field is never nullable, even if `T` accepts null, so it
/// is required whenever the record requires its fields.  Declare the field
/// as `Option<Permissive<T>>` to make it nullable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Permissive<T>(pub T);

impl<T: DeserializeOwned> Decode for Permissive<T> {
    fn decode<'de, D>(deserializer: D, _session: &DecodeSession<'_>) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Permissive)
    }
}

impl<T: Decode> Decode for Box<T> {
    const NULLABLE: bool = T::NULLABLE;

    fn decode<'de, D>(deserializer: D, session: &DecodeSession<'_>) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::decode(deserializer, session).map(Box::new)
    }
}

struct OptionVisitor<'s, 'd, T> {
    session: &'s DecodeSession<'d>,
    marker: PhantomData<fn() -> T>,
}

impl<'de, T: Decode> Visitor<'de> for OptionVisitor<'_, '_, T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an optional value")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::decode(deserializer, self.session).map(Some)
    }
}

impl<T: Decode> Decode for Option<T> {
    const NULLABLE: bool = true;

    fn decode<'de, D>(deserializer: D, session: &DecodeSession<'_>) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionVisitor {
            session,
            marker: PhantomData,
        })
    }
}

// Sequences and maps share one visitor per shape; `C` is the collection
// being built.
struct SeqVisitor<'s, 'd, C, T> {
    session: &'s DecodeSession<'d>,
    marker: PhantomData<fn() -> (C, T)>,
}

impl<'de, C, T> Visitor<'de> for SeqVisitor<'_, '_, C, T>
where
    C: Default + Extend<T>,
    T: Decode,
{
    type Value = C;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<C, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut collection = C::default();
        while let Some(element) = seq.next_element_seed(DecodeSeed::<T>::new(self.session))? {
            collection.extend(Some(element));
        }
        Ok(collection)
    }
}

macro_rules! decode_seq {
    ($($coll:ident),*) => {
        $(
            impl<T: Decode> Decode for $coll<T> {
                fn decode<'de, D>(
                    deserializer: D,
                    session: &DecodeSession<'_>,
                ) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    deserializer.deserialize_seq(SeqVisitor::<Self, T> {
                        session,
                        marker: PhantomData,
                    })
                }
            }
        )*
    };
}

decode_seq!(Vec, VecDeque);

struct MapVisitor<'s, 'd, C, K, V> {
    session: &'s DecodeSession<'d>,
    marker: PhantomData<fn() -> (C, K, V)>,
}

impl<'de, C, K, V> Visitor<'de> for MapVisitor<'_, '_, C, K, V>
where
    C: Default + Extend<(K, V)>,
    K: Deserialize<'de>,
    V: Decode,
{
    type Value = C;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A>(self, mut map: A) -> Result<C, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut collection = C::default();
        while let Some(entry) =
            map.next_entry_seed(PhantomData::<K>, DecodeSeed::<V>::new(self.session))?
        {
            collection.extend(Some(entry));
        }
        Ok(collection)
    }
}

// Map keys are plain data, so they always use the default decoder.
impl<K, V> Decode for BTreeMap<K, V>
where
    K: DeserializeOwned + Ord,
    V: Decode,
{
    fn decode<'de, D>(deserializer: D, session: &DecodeSession<'_>) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MapVisitor::<Self, K, V> {
            session,
            marker: PhantomData,
        })
    }
}

impl<K, V> Decode for HashMap<K, V>
where
    K: DeserializeOwned + Eq + Hash,
    V: Decode,
{
    fn decode<'de, D>(deserializer: D, session: &DecodeSession<'_>) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MapVisitor::<Self, K, V> {
            session,
            marker: PhantomData,
        })
    }
}

#[test]
fn test_nullable_types() {
    assert!(!<String as Decode>::NULLABLE);
    assert!(<Option<String> as Decode>::NULLABLE);
    assert!(<Box<Option<i32>> as Decode>::NULLABLE);
    assert!(!<Vec<Option<i32>> as Decode>::NULLABLE);
}
