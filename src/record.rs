//! This module defines how a record type describes itself to the decoder.
//!
//! Rust has no runtime reflection, so a record type declares its fields
//! explicitly by implementing [`Record`].  The declarations are turned into a
//! validated [`FieldSchema`] the first time the type is decoded.
//!
//! ```
//! use serde::de::MapAccess;
//! use strict_record::{impl_decode_for_record, FieldAccess, FieldDef, Record};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Pair {
//!     a: String,
//!     b: i64,
//! }
//!
//! impl Record for Pair {
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
//! ```
//!
//! [`FieldSchema`]: crate::schema::FieldSchema

use crate::context::DecodeSession;
use crate::decode::{Decode, DecodeSeed};
use serde::de::{IgnoredAny, MapAccess};

/// A record type that can be decoded strictly.
///
/// Instances start out as `Default::default()`; each matched input key then
/// overwrites one field through [`decode_field`](Record::decode_field).
/// Fields that never appear in the input keep their default value.
pub trait Record: Default + 'static {
    /// The name used for this type in error messages.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// The declared fields of this type.
    ///
    /// The index of each [`FieldDef`] is the field's position, which is
    /// passed back to [`decode_field`](Record::decode_field).
    fn fields() -> Vec<FieldDef>;

    /// Decode the next value from the input into the field at `position`.
    ///
    /// Implementations must consume exactly one value from `field`, either
    /// with [`FieldAccess::assign`], [`FieldAccess::value`] or
    /// [`FieldAccess::skip`].
    fn decode_field<'de, A>(
        &mut self,
        position: usize,
        field: FieldAccess<'_, A>,
    ) -> Result<(), A::Error>
    where
        A: MapAccess<'de>;
}

/// The declaration of one field of a [`Record`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
    pub(crate) declared_name: &'static str,
    pub(crate) rename: Option<String>,
    pub(crate) alternates: Vec<String>,
    pub(crate) nullable: bool,
    pub(crate) optional: bool,
    pub(crate) stored: bool,
}

impl FieldDef {
    /// Declare a stored field of type `T`.
    ///
    /// The field is nullable if `T` is (e.g. any `Option<_>`).
    pub fn of<T: Decode>(name: &'static str) -> FieldDef {
        FieldDef {
            declared_name: name,
            rename: None,
            alternates: Vec::new(),
            nullable: T::NULLABLE,
            optional: false,
            stored: true,
        }
    }

    /// Declare a field that has no storage (e.g. a value computed from other
    /// fields).  It is not part of the schema, so it can't be decoded.
    pub fn computed(name: &'static str) -> FieldDef {
        FieldDef {
            declared_name: name,
            rename: None,
            alternates: Vec::new(),
            nullable: false,
            optional: false,
            stored: false,
        }
    }

    /// Use `name` as the input key instead of the name produced by the
    /// naming strategy.
    pub fn rename<S: Into<String>>(mut self, name: S) -> FieldDef {
        self.rename = Some(name.into());
        self
    }

    /// Also accept `name` as an input key for this field.
    ///
    /// Alternates are explicit names, so the naming strategy is not applied
    /// to a field that has any.
    pub fn alternate<S: Into<String>>(mut self, name: S) -> FieldDef {
        self.alternates.push(name.into());
        self
    }

    /// Mark the field nullable, even if its type isn't.
    ///
    /// The field is no longer required, and a null input for it leaves the
    /// field at its default value.
    pub fn nullable(mut self) -> FieldDef {
        self.nullable = true;
        self
    }

    /// Exempt the field from being required.
    pub fn optional(mut self) -> FieldDef {
        self.optional = true;
        self
    }

    /// The name the field was declared with.
    pub fn declared_name(&self) -> &'static str {
        self.declared_name
    }
}

/// Write access to the value of one matched input key.
///
/// This is handed to [`Record::decode_field`]; consuming it reads the value
/// from the input.
pub struct FieldAccess<'a, A> {
    map: &'a mut A,
    session: &'a DecodeSession<'a>,
    nullable: bool,
}

impl<'a, A> FieldAccess<'a, A> {
    pub(crate) fn new(map: &'a mut A, session: &'a DecodeSession<'a>, nullable: bool) -> Self {
        FieldAccess {
            map,
            session,
            nullable,
        }
    }

    /// Returns true if the field accepts a null value.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Decode the value and store it in `slot`.
    ///
    /// If the field was marked [`nullable`](FieldDef::nullable) but its type
    /// has no null value, a null input leaves `slot` unchanged.
    pub fn assign<'de, T>(self, slot: &mut T) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
        T: Decode,
    {
        if self.nullable && !T::NULLABLE {
            let value: Option<T> = self.map.next_value_seed(DecodeSeed::new(self.session))?;
            if let Some(value) = value {
                *slot = value;
            }
            return Ok(());
        }
        *slot = self.value()?;
        Ok(())
    }

    /// Decode the value and return it.
    ///
    /// The value is decoded as a `T`, so a null input is an error unless `T`
    /// itself is nullable.  Use [`assign`](FieldAccess::assign) for fields
    /// marked [`nullable`](FieldDef::nullable).
    pub fn value<'de, T>(self) -> Result<T, A::Error>
    where
        A: MapAccess<'de>,
        T: Decode,
    {
        self.map.next_value_seed(DecodeSeed::new(self.session))
    }

    /// Consume the value and throw it away.
    pub fn skip<'de>(self) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        self.map.next_value::<IgnoredAny>().map(|_| ())
    }
}

/// Implement [`Decode`] for non-generic [`Record`] types, so that they
/// decode strictly wherever they appear.
///
/// Generic record types implement [`Decode`] by hand, calling
/// [`read_record`](crate::reader::read_record).
#[macro_export]
macro_rules! impl_decode_for_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Decode for $ty {
                fn decode<'de, D>(
                    deserializer: D,
                    session: &$crate::DecodeSession<'_>,
                ) -> ::std::result::Result<Self, D::Error>
                where
                    D: $crate::__private::serde::Deserializer<'de>,
                {
                    $crate::reader::read_record(deserializer, session)
                }
            }
        )+
    };
}
