//! This module declares a generic Value enum, used to capture input values
//! for diagnostics.
//!
//! When an input key doesn't match any field, the decoder still has to
//! consume its value.  If that key is going to be reported, the value is
//! captured as a [`Value`] so the error can show what was there.

use std::collections::BTreeMap;
use std::fmt;

use float_ord::FloatOrd;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

/// `Value` represents any data value the decoder can encounter.
#[derive(Clone, Eq, Ord, PartialEq, PartialOrd)]
#[allow(missing_docs)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i128),
    Float(FloatOrd<f64>),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<Value>),
    Map(BTreeMap<Value, Value>),
}

// FloatOrd doesn't implement Debug, so we have to do all the work by hand.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(x) => x.fmt(f),
            Value::Integer(x) => x.fmt(f),
            Value::Float(x) => x.0.fmt(f),
            Value::Bytes(x) => x.fmt(f),
            Value::Text(x) => x.fmt(f),
            Value::Array(x) => x.fmt(f),
            Value::Map(x) => x.fmt(f),
        }
    }
}

// Only exists so implementers don't need to use/see float_ord::FloatOrd
impl Value {
    pub(crate) fn from_float<F: Into<f64>>(f: F) -> Value {
        Value::Float(FloatOrd(f.into()))
    }

    /// Returns true if this is `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    // Text is only quoted when it's nested inside a container, so that a
    // top-level string renders the way it was written.
    fn render(&self, f: &mut fmt::Formatter<'_>, nested: bool) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{:?}", fl.0),
            Value::Bytes(b) => write!(f, "h'{}'", hex::encode(b)),
            Value::Text(t) if nested => write!(f, "\"{}\"", escape8259::escape(t)),
            Value::Text(t) => f.write_str(t),
            Value::Array(a) => {
                f.write_str("[")?;
                for (i, element) in a.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    element.render(f, true)?;
                }
                f.write_str("]")
            }
            Value::Map(m) => {
                f.write_str("{")?;
                for (i, (key, value)) in m.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    key.render(f, true)?;
                    f.write_str(": ")?;
                    value.render(f, true)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Integer(v.into()))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Value, E> {
        Ok(Value::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Integer(v.into()))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Value, E> {
        use std::convert::TryFrom;
        i128::try_from(v)
            .map(Value::Integer)
            .map_err(|_| E::custom(format!("integer {} out of range", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::from_float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Text(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Value, E> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Value, E> {
        Ok(Value::Bytes(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut array = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(256));
        while let Some(element) = seq.next_element()? {
            array.push(element);
        }
        Ok(Value::Array(array))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut tree = BTreeMap::new();
        while let Some((key, value)) = map.next_entry()? {
            tree.insert(key, value);
        }
        Ok(Value::Map(tree))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[test]
fn test_value_display() {
    let text = Value::Text("y".into());
    assert_eq!(text.to_string(), "y");
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::from_float(1.0).to_string(), "1.0");

    let array = Value::Array(vec![
        Value::Integer(1),
        Value::Text("a\"b".into()),
        Value::Bytes(vec![0x0a, 0xff]),
    ]);
    assert_eq!(array.to_string(), r#"[1, "a\"b", h'0aff']"#);

    let mut tree = BTreeMap::new();
    tree.insert(Value::Text("k".into()), Value::Bool(true));
    assert_eq!(Value::Map(tree).to_string(), r#"{"k": true}"#);
}
