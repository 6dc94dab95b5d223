//! This module defines error and result types.
//!

use crate::value::Value;
use std::error;
use std::result::Result;
use thiserror::Error;

/// A record type's declared fields can't be turned into a [`FieldSchema`].
///
/// This is a bug in the record declaration, not in the input data, so it is
/// reported for every input regardless of the decoder configuration.
///
/// [`FieldSchema`]: crate::schema::FieldSchema
#[rustversion::attr(since(1.40), non_exhaustive)]
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two distinct fields resolve to the same accepted name.
    #[error("type {type_name} declares multiple fields named `{name}`")]
    DuplicateFieldName {
        /// The record type being described.
        type_name: &'static str,
        /// The ambiguous name.
        name: String,
    },
}

/// An error that occurred while decoding a record.
#[rustversion::attr(since(1.40), non_exhaustive)]
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The schema for a record type involved in this decode was rejected.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// An input key matched no field of the record type.
    #[error("type {type_name} does not contain a field for property `{key}` with value `{value}`")]
    UnknownField {
        /// The record type being decoded.
        type_name: &'static str,
        /// The unmatched input key.
        key: String,
        /// The value that was stored under `key`.
        value: Value,
    },
    /// Required fields were absent from the input.
    #[error(
        "type {type_name} requires field(s) which were not present in the input: {}",
        render_names(.fields)
    )]
    MissingFields {
        /// The record type being decoded.
        type_name: &'static str,
        /// Every missing field, by primary name, in declaration order.
        fields: Vec<String>,
    },
    /// The input itself was malformed, or had the wrong shape for a value.
    #[error("malformed input: {0}")]
    MalformedStream(Box<dyn error::Error + Send + Sync + 'static>),
}

impl DecodeError {
    /// Wrap an error produced by the underlying data format.
    pub fn malformed<E>(err: E) -> DecodeError
    where
        E: error::Error + Send + Sync + 'static,
    {
        DecodeError::MalformedStream(Box::new(err))
    }

    /// The name of the record type the error was raised for, if any.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            DecodeError::Schema(SchemaError::DuplicateFieldName { type_name, .. }) => {
                Some(*type_name)
            }
            DecodeError::UnknownField { type_name, .. } => Some(*type_name),
            DecodeError::MissingFields { type_name, .. } => Some(*type_name),
            DecodeError::MalformedStream(_) => None,
        }
    }
}

fn render_names(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("`{}`", name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The result of a top-level decode.
pub type DecodeResult<T> = Result<T, DecodeError>;
