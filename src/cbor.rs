//! This module implements strict decoding from CBOR, using [`serde_cbor`].
//!
//! CBOR maps may have keys of any type; record objects must use text keys,
//! and anything else is reported as a malformed stream.

#![cfg(feature = "serde_cbor")]

use crate::context::Decoder;
use crate::decode::Decode;
use crate::util::{DecodeError, DecodeResult};
use serde::Serialize;

/// Decode CBOR bytes into a `T`.
pub fn from_slice<T: Decode>(decoder: &Decoder, cbor: &[u8]) -> DecodeResult<T> {
    let mut deserializer = serde_cbor::Deserializer::from_slice(cbor);
    let value = decoder.decode(&mut deserializer)?;
    deserializer.end().map_err(DecodeError::malformed)?;
    Ok(value)
}

/// Serialize `value` as CBOR, exactly as `serde_cbor` would.
pub fn to_vec<T: Serialize>(value: &T) -> serde_cbor::Result<Vec<u8>> {
    serde_cbor::to_vec(value)
}
