//! `strict-record` is a library for decoding JSON or CBOR objects into Rust
//! record types, strictly.
//!
//! An ordinary serde decoder is forgiving: unknown keys are ignored and
//! (with `#[serde(default)]`) missing fields are filled in.  This library
//! requires instead that the keys of an input object and the fields of the
//! record type correspond one-to-one.  An extra key or a missing field is an
//! error that names the type and the keys involved.
//!
//! The exceptions are explicit:
//!
//! - Nullable fields (any `Option<_>`, or fields marked
//!   [`nullable`](FieldDef::nullable)) and fields marked
//!   [`optional`](FieldDef::optional) may be missing.
//! - An unknown key whose value is `null` is ignored (unless
//!   [`Config::allow_unused_nulls`] is turned off).
//! - Either direction of the check can be turned off in the [`Config`],
//!   and the strict rules can be limited to a set of record types.
//!
//! Writing is never affected: serializing a record produces exactly what
//! `serde_json` or `serde_cbor` would produce.
//!
//! # Implementation Details
//!
//! - Record types describe their fields by implementing [`Record`].  The
//!   declarations are validated into a [`FieldSchema`](schema::FieldSchema)
//!   the first time the type is decoded; a record that declares two fields
//!   with the same name is rejected before any input is read.
//!
//! - Schemas are cached by the [`Decoder`], which is immutable and can be
//!   shared between threads.
//!
//! - Decoding runs on top of any serde `Deserializer`, in a single forward
//!   pass.  Every type is decoded through the [`Decode`] trait, so a record
//!   nested in a field, a `Vec` or a map is also decoded strictly.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "serde_json")]
//! # {
//! use serde::de::MapAccess;
//! use strict_record::{impl_decode_for_record, json, Config, DecodeError, Decoder};
//! use strict_record::{FieldAccess, FieldDef, Record};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Pair {
//!     a: String,
//!     b: i64,
//! }
//!
//! impl Record for Pair {
//!     fn type_name() -> &'static str {
//!         "Pair"
//!     }
//!
//!     fn fields() -> Vec<FieldDef> {
//!         vec![FieldDef::of::<String>("a"), FieldDef::of::<i64>("b")]
//!     }
//!
//!     fn decode_field<'de, A>(
//!         &mut self,
//!         position: usize,
//!         field: FieldAccess<'_, A>,
//!     ) -> Result<(), A::Error>
//!     where
//!         A: MapAccess<'de>,
//!     {
//!         match position {
//!             0 => field.assign(&mut self.a),
//!             1 => field.assign(&mut self.b),
//!             _ => field.skip(),
//!         }
//!     }
//! }
//!
//! impl_decode_for_record!(Pair);
//!
//! let decoder = Decoder::default();
//!
//! let pair: Pair = json::from_str(&decoder, r#"{"a": "x", "b": 1}"#).unwrap();
//! assert_eq!(pair, Pair { a: "x".into(), b: 1 });
//!
//! // A missing field is an error.
//! let err = json::from_str::<Pair>(&decoder, r#"{"a": "x"}"#).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "type Pair requires field(s) which were not present in the input: `b`"
//! );
//!
//! // So is an extra one.
//! let input = r#"{"a": "x", "b": 1, "c": "y"}"#;
//! let err = json::from_str::<Pair>(&decoder, input).unwrap_err();
//! assert!(matches!(err, DecodeError::UnknownField { .. }));
//!
//! // ...unless the decoder is told to skip unknown keys.
//! let relaxed = Decoder::new(Config {
//!     require_all_json_fields_used: false,
//!     ..Config::default()
//! });
//! let pair: Pair = json::from_str(&relaxed, input).unwrap();
//! assert_eq!(pair.b, 1);
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![warn(clippy::cast_possible_truncation)]

pub mod context;
pub mod decode;
pub mod naming;
pub mod reader;
pub mod record;
pub mod schema;
pub mod util;
pub mod value;

#[doc(inline)]
pub use context::{Config, DecodeSession, Decoder, SchemaCache};
#[doc(inline)]
pub use decode::{Decode, DecodeSeed, Permissive};
#[doc(inline)]
pub use naming::NamingStrategy;
#[doc(inline)]
pub use reader::{read_nullable_record, read_record};
#[doc(inline)]
pub use record::{FieldAccess, FieldDef, Record};
#[doc(inline)]
pub use schema::{FieldDescriptor, FieldSchema};
#[doc(inline)]
pub use util::{DecodeError, DecodeResult, SchemaError};
#[doc(inline)]
pub use value::Value;

#[cfg(feature = "serde_cbor")]
pub mod cbor;

#[cfg(feature = "serde_json")]
pub mod json;

// Used by `impl_decode_for_record!`.
#[doc(hidden)]
pub mod __private {
    pub use serde;
}
