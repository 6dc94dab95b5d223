//! This module defines the decoding context.
//!
//! A [`Decoder`] is used to specify runtime behavior for decoding.  It owns
//! an immutable [`Config`] and a [`SchemaCache`]; when decoding needs the
//! schema of a record type, it asks the `Decoder` for it.
//!
//! Each top-level decode creates a [`DecodeSession`], which borrows the
//! `Decoder` and records the first failure of that call.
//!

use crate::naming::NamingStrategy;
use crate::record::Record;
use crate::schema::FieldSchema;
use crate::util::{DecodeError, DecodeResult, SchemaError};
use crate::Decode;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::error;
use std::sync::{Arc, PoisonError, RwLock};

/// Options controlling how strictly records are decoded.
///
/// `Config` can be deserialized (e.g. from a JSON configuration file); any
/// missing option takes its default.  The included types can only be set in
/// code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Every required field must appear in the input; default true.
    ///
    /// Nullable fields and fields marked
    /// [`optional`](crate::record::FieldDef::optional) are never required.
    /// When false, missing fields keep their default value.
    pub require_all_class_fields_used: bool,

    /// Every input key must match a field; default true.
    ///
    /// When false, unmatched keys are skipped.
    pub require_all_json_fields_used: bool,

    /// An unmatched key whose value is null is always skipped, even when
    /// `require_all_json_fields_used` is true; default true.
    pub allow_unused_nulls: bool,

    /// How declared field names become input keys.
    pub field_naming: NamingStrategy,

    /// If set, only these record types are decoded strictly; all others are
    /// decoded permissively.
    #[serde(skip)]
    pub included_types: Option<HashSet<TypeId>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            require_all_class_fields_used: true,
            require_all_json_fields_used: true,
            allow_unused_nulls: true,
            field_naming: NamingStrategy::Identity,
            included_types: None,
        }
    }
}

impl Config {
    /// Add a record type to the set of strictly-decoded types.
    ///
    /// Once any type is included, types that weren't included are decoded
    /// permissively.
    pub fn include<T: Record>(mut self) -> Self {
        self.included_types
            .get_or_insert_with(HashSet::new)
            .insert(TypeId::of::<T>());
        self
    }
}

/// The acceptance rules applied to one record decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Policy {
    pub(crate) require_all_class_fields_used: bool,
    pub(crate) require_all_json_fields_used: bool,
    pub(crate) allow_unused_nulls: bool,
}

impl Policy {
    // The behavior of an ordinary non-strict decoder: unknown keys are
    // skipped and missing fields are left at their defaults.
    const PERMISSIVE: Policy = Policy {
        require_all_class_fields_used: false,
        require_all_json_fields_used: false,
        allow_unused_nulls: true,
    };
}

/// A cache of field schemas, keyed by record type.
///
/// Lookups may happen from many threads at once.  Two threads that build the
/// same schema at the same time each produce an identical schema, and the
/// first one stored wins.  Failed builds are not cached.
#[derive(Debug, Default)]
pub struct SchemaCache {
    naming: NamingStrategy,
    schemas: RwLock<HashMap<TypeId, Arc<FieldSchema>>>,
}

impl SchemaCache {
    /// Create an empty cache whose schemas use the given naming strategy.
    pub fn new(naming: NamingStrategy) -> SchemaCache {
        SchemaCache {
            naming,
            schemas: RwLock::default(),
        }
    }

    /// Fetch the schema for `T`, building it if necessary.
    pub fn lookup<T: Record>(&self) -> Result<Arc<FieldSchema>, SchemaError> {
        let id = TypeId::of::<T>();
        {
            let schemas = self.schemas.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(schema) = schemas.get(&id) {
                return Ok(Arc::clone(schema));
            }
        }

        let schema = Arc::new(FieldSchema::build::<T>(self.naming)?);
        tracing::debug!(
            type_name = schema.type_name(),
            fields = schema.len(),
            naming = %self.naming,
            "built field schema"
        );

        let mut schemas = self.schemas.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(schemas.entry(id).or_insert(schema)))
    }

    /// The number of cached schemas.
    pub fn len(&self) -> usize {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no schema has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A decoding context: configuration plus the schema cache.
///
/// A `Decoder` is immutable and may be shared between threads.
#[derive(Debug, Default)]
pub struct Decoder {
    config: Config,
    schemas: SchemaCache,
}

impl Decoder {
    /// Create a new `Decoder` from a configuration.
    pub fn new(config: Config) -> Decoder {
        let schemas = SchemaCache::new(config.field_naming);
        Decoder { config, schemas }
    }

    /// The configuration this decoder was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The schema cache owned by this decoder.
    pub fn schemas(&self) -> &SchemaCache {
        &self.schemas
    }

    /// Fetch (or build) the schema for a record type.
    pub fn schema<T: Record>(&self) -> Result<Arc<FieldSchema>, SchemaError> {
        self.schemas.lookup::<T>()
    }

    /// Returns true if `T` is decoded strictly by this decoder.
    pub fn applies_to<T: Record>(&self) -> bool {
        match &self.config.included_types {
            Some(types) => types.contains(&TypeId::of::<T>()),
            None => true,
        }
    }

    pub(crate) fn policy<T: Record>(&self) -> Policy {
        if self.applies_to::<T>() {
            Policy {
                require_all_class_fields_used: self.config.require_all_class_fields_used,
                require_all_json_fields_used: self.config.require_all_json_fields_used,
                allow_unused_nulls: self.config.allow_unused_nulls,
            }
        } else {
            Policy::PERMISSIVE
        }
    }

    /// Decode a value of type `T` from any serde `Deserializer`.
    ///
    /// This doesn't check for trailing input; the format modules
    /// ([`json`](crate::json), [`cbor`](crate::cbor)) do.
    pub fn decode<'de, T, D>(&self, deserializer: D) -> DecodeResult<T>
    where
        T: Decode,
        D: Deserializer<'de>,
        D::Error: Send + Sync + 'static,
    {
        let session = DecodeSession::new(self);
        let result = T::decode(deserializer, &session);
        result.map_err(|e| session.into_error(e))
    }
}

/// The state of one top-level decode call.
///
/// serde visitors can only return the data format's own error type, so
/// when the strict decoder rejects the input it records the structured
/// [`DecodeError`] here and returns a format error carrying the same
/// message.  [`into_error`](DecodeSession::into_error) recovers it.
#[derive(Debug)]
pub struct DecodeSession<'d> {
    decoder: &'d Decoder,
    failure: RefCell<Option<DecodeError>>,
}

impl<'d> DecodeSession<'d> {
    /// Start a decode using `decoder`.
    pub fn new(decoder: &'d Decoder) -> DecodeSession<'d> {
        DecodeSession {
            decoder,
            failure: RefCell::new(None),
        }
    }

    /// The decoder this session belongs to.
    pub fn decoder(&self) -> &'d Decoder {
        self.decoder
    }

    /// Record a failure and convert it to the format's error type.
    pub(crate) fn fail<E: de::Error>(&self, error: DecodeError) -> E {
        tracing::debug!(%error, "strict decode failed");
        let format_error = E::custom(&error);
        let mut failure = self.failure.borrow_mut();
        // The first failure is the innermost one; the decode is aborted
        // after it, so anything later is only a consequence.
        if failure.is_none() {
            *failure = Some(error);
        }
        format_error
    }

    /// Convert the error returned by a failed decode into a [`DecodeError`].
    ///
    /// If the strict decoder recorded a failure, that is returned;
    /// otherwise the format error is wrapped as
    /// [`DecodeError::MalformedStream`].
    pub fn into_error<E>(self, err: E) -> DecodeError
    where
        E: error::Error + Send + Sync + 'static,
    {
        match self.failure.into_inner() {
            Some(failure) => failure,
            None => DecodeError::malformed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FieldAccess, FieldDef};
    use serde::de::MapAccess;

    #[derive(Default)]
    struct Thing {
        some_name: String,
    }

    impl Record for Thing {
        fn fields() -> Vec<FieldDef> {
            vec![FieldDef::of::<String>("some_name")]
        }

        fn decode_field<'de, A>(
            &mut self,
            _position: usize,
            field: FieldAccess<'_, A>,
        ) -> Result<(), A::Error>
        where
            A: MapAccess<'de>,
        {
            field.assign(&mut self.some_name)
        }
    }

    #[test]
    fn cache_reuses_schemas() {
        let decoder = Decoder::default();
        assert!(decoder.schemas().is_empty());
        let first = decoder.schema::<Thing>().unwrap();
        let second = decoder.schema::<Thing>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(decoder.schemas().len(), 1);
    }

    #[test]
    fn cache_uses_naming() {
        let config = Config {
            field_naming: NamingStrategy::UpperCamelCase,
            ..Config::default()
        };
        let decoder = Decoder::new(config.clone());
        assert_eq!(decoder.config(), &config);
        let schema = decoder.schema::<Thing>().unwrap();
        assert!(schema.lookup("SomeName").is_some());
        assert!(schema.lookup("some_name").is_none());
    }

    #[test]
    fn included_types() {
        let decoder = Decoder::default();
        assert!(decoder.applies_to::<Thing>());

        #[derive(Default)]
        struct Other;
        impl Record for Other {
            fn fields() -> Vec<FieldDef> {
                Vec::new()
            }
            fn decode_field<'de, A>(
                &mut self,
                _position: usize,
                field: FieldAccess<'_, A>,
            ) -> Result<(), A::Error>
            where
                A: MapAccess<'de>,
            {
                field.skip()
            }
        }

        let decoder = Decoder::new(Config::default().include::<Thing>());
        assert!(decoder.applies_to::<Thing>());
        assert!(!decoder.applies_to::<Other>());
        assert_eq!(decoder.policy::<Other>(), Policy::PERMISSIVE);
        assert!(decoder.policy::<Thing>().require_all_json_fields_used);
    }

    #[test]
    fn decoder_is_shareable() {
        fn is_send_sync<T: Send + Sync>() {}
        is_send_sync::<Decoder>();
    }
}
