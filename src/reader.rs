//! This module contains the strict object reader.
//!
//! It walks the key/value pairs of one input object exactly once, left to
//! right, matching each key against the record's [`FieldSchema`].  Matched
//! values are decoded through [`Decode`] (so nested records are strict as
//! well); unmatched keys are skipped or rejected according to the decoder's
//! configuration.  After the object ends, any required field that never
//! appeared is reported.
//!
//! [`FieldSchema`]: crate::schema::FieldSchema
//! [`Decode`]: crate::decode::Decode

use crate::context::{DecodeSession, Policy};
use crate::record::{FieldAccess, Record};
use crate::schema::FieldSchema;
use crate::util::DecodeError;
use crate::value::Value;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Unexpected, Visitor};
use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Decode a record of type `T`, where the input may also be null.
///
/// A null input is consumed and returns `None`.  Whether `None` is
/// acceptable is up to the caller.
pub fn read_nullable_record<'de, T, D>(
    deserializer: D,
    session: &DecodeSession<'_>,
) -> Result<Option<T>, D::Error>
where
    T: Record,
    D: Deserializer<'de>,
{
    // The schema is resolved before the input is touched, so a bad record
    // declaration fails no matter what the input is.
    let decoder = session.decoder();
    let schema = decoder
        .schema::<T>()
        .map_err(|e| session.fail::<D::Error>(e.into()))?;

    let visitor = RecordVisitor::<T> {
        session,
        schema,
        policy: decoder.policy::<T>(),
        marker: PhantomData,
    };
    deserializer.deserialize_option(NullableVisitor(visitor))
}

/// Decode a record of type `T`.
///
/// A null input is an error, because `T` has no null value.
pub fn read_record<'de, T, D>(deserializer: D, session: &DecodeSession<'_>) -> Result<T, D::Error>
where
    T: Record,
    D: Deserializer<'de>,
{
    match read_nullable_record(deserializer, session)? {
        Some(record) => Ok(record),
        None => Err(de::Error::invalid_type(
            Unexpected::Option,
            &ExpectingRecord(T::type_name()),
        )),
    }
}

struct ExpectingRecord(&'static str);

impl de::Expected for ExpectingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object for type {}", self.0)
    }
}

// Handles the null check, then hands the object to RecordVisitor.
struct NullableVisitor<'s, 'd, T>(RecordVisitor<'s, 'd, T>);

impl<'de, T: Record> Visitor<'de> for NullableVisitor<'_, '_, T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.expecting(f)
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
        deserializer.deserialize_map(self.0).map(Some)
    }
}

struct RecordVisitor<'s, 'd, T> {
    session: &'s DecodeSession<'d>,
    schema: Arc<FieldSchema>,
    policy: Policy,
    marker: PhantomData<fn() -> T>,
}

impl<'de, T: Record> Visitor<'de> for RecordVisitor<'_, '_, T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object for type {}", self.schema.type_name())
    }

    fn visit_map<A>(self, mut map: A) -> Result<T, A::Error>
    where
        A: MapAccess<'de>,
    {
        let schema = &self.schema;
        let mut instance = T::default();

        // Positions of required fields not seen yet.
        let mut missing: Option<BTreeSet<usize>> = if self.policy.require_all_class_fields_used {
            Some(schema.required().map(|f| f.position()).collect())
        } else {
            None
        };

        while let Some(key) = map.next_key::<String>()? {
            let field = match schema.lookup(&key) {
                Some(field) => field,
                None => {
                    if !self.policy.require_all_json_fields_used {
                        tracing::trace!(
                            type_name = schema.type_name(),
                            %key,
                            "skipping unmatched key"
                        );
                        map.next_value::<IgnoredAny>()?;
                        continue;
                    }
                    let value: Value = map.next_value()?;
                    if value.is_null() && self.policy.allow_unused_nulls {
                        tracing::trace!(
                            type_name = schema.type_name(),
                            %key,
                            "skipping unmatched null"
                        );
                        continue;
                    }
                    return Err(self.session.fail(DecodeError::UnknownField {
                        type_name: schema.type_name(),
                        key,
                        value,
                    }));
                }
            };

            let access = FieldAccess::new(&mut map, self.session, field.is_nullable());
            instance.decode_field(field.position(), access)?;
            if let Some(missing) = missing.as_mut() {
                missing.remove(&field.position());
            }
        }

        if let Some(missing) = missing {
            if !missing.is_empty() {
                let fields = schema
                    .fields()
                    .iter()
                    .filter(|f| missing.contains(&f.position()))
                    .map(|f| f.primary_name().to_string())
                    .collect();
                return Err(self.session.fail(DecodeError::MissingFields {
                    type_name: schema.type_name(),
                    fields,
                }));
            }
        }

        Ok(instance)
    }
}
