// Record types shared by the integration tests.
#![allow(dead_code)]

use serde::de::MapAccess;
use serde::{Deserialize, Serialize};
use strict_record::{impl_decode_for_record, read_record, Decode, DecodeSession};
use strict_record::{FieldAccess, FieldDef, Record};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub a: String,
    pub b: i64,
}

impl Record for Pair {
    fn fields() -> Vec<FieldDef> {
        vec![FieldDef::of::<String>("a"), FieldDef::of::<i64>("b")]
    }

    fn decode_field<'de, A>(
        &mut self,
        position: usize,
        field: FieldAccess<'_, A>,
    ) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        match position {
            0 => field.assign(&mut self.a),
            1 => field.assign(&mut self.b),
            _ => field.skip(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestObject {
    pub string_field: String,
    pub int_field: i32,
    pub nullable_string_field: Option<String>,
    pub nested_object: Option<Box<TestObject>>,
}

impl TestObject {
    pub fn new(string_field: &str, int_field: i32) -> TestObject {
        TestObject {
            string_field: string_field.to_string(),
            int_field,
            ..TestObject::default()
        }
    }
}

impl Record for TestObject {
    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::of::<String>("string_field"),
            FieldDef::of::<i32>("int_field"),
            FieldDef::of::<Option<String>>("nullable_string_field"),
            FieldDef::of::<Option<Box<TestObject>>>("nested_object"),
        ]
    }

    fn decode_field<'de, A>(
        &mut self,
        position: usize,
        field: FieldAccess<'_, A>,
    ) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        match position {
            0 => field.assign(&mut self.string_field),
            1 => field.assign(&mut self.int_field),
            2 => field.assign(&mut self.nullable_string_field),
            3 => field.assign(&mut self.nested_object),
            _ => field.skip(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestObjectWithGenerics {
    pub string_list: Vec<String>,
    pub test_objects: Vec<TestObject>,
}

impl TestObjectWithGenerics {
    pub fn no_backing_field(&self) -> usize {
        self.string_list.len()
    }
}

impl Record for TestObjectWithGenerics {
    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::of::<Vec<String>>("string_list"),
            FieldDef::computed("no_backing_field"),
            FieldDef::of::<Vec<TestObject>>("test_objects"),
        ]
    }

    fn decode_field<'de, A>(
        &mut self,
        position: usize,
        field: FieldAccess<'_, A>,
    ) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        match position {
            0 => field.assign(&mut self.string_list),
            2 => field.assign(&mut self.test_objects),
            _ => field.skip(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedNameTestObject {
    #[serde(rename = "field_name")]
    pub field: String,
}

impl Record for SerializedNameTestObject {
    fn fields() -> Vec<FieldDef> {
        vec![FieldDef::of::<String>("field")
            .rename("field_name")
            .alternate("fieldName")]
    }

    fn decode_field<'de, A>(
        &mut self,
        position: usize,
        field: FieldAccess<'_, A>,
    ) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        match position {
            0 => field.assign(&mut self.field),
            _ => field.skip(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionalFieldTestObject {
    pub required_field: String,
    pub optional_field: String,
    pub nullable_field: Option<String>,
    pub annotated_field: String,
}

impl Record for OptionalFieldTestObject {
    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::of::<String>("required_field"),
            FieldDef::of::<String>("optional_field").optional(),
            FieldDef::of::<Option<String>>("nullable_field"),
            FieldDef::of::<String>("annotated_field").nullable(),
        ]
    }

    fn decode_field<'de, A>(
        &mut self,
        position: usize,
        field: FieldAccess<'_, A>,
    ) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        match position {
            0 => field.assign(&mut self.required_field),
            1 => field.assign(&mut self.optional_field),
            2 => field.assign(&mut self.nullable_field),
            3 => field.assign(&mut self.annotated_field),
            _ => field.skip(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BadTestObject {
    pub field: String,
    pub same_field: String,
}

impl Record for BadTestObject {
    fn type_name() -> &'static str {
        "BadTestObject"
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::of::<String>("field"),
            FieldDef::of::<String>("same_field").rename("field"),
        ]
    }

    fn decode_field<'de, A>(
        &mut self,
        position: usize,
        field: FieldAccess<'_, A>,
    ) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        match position {
            0 => field.assign(&mut self.field),
            1 => field.assign(&mut self.same_field),
            _ => field.skip(),
        }
    }
}

/// A generic record; each instantiation gets its own schema.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wrapper<T> {
    pub value: T,
    pub items: Vec<T>,
}

impl<T: Decode + Default + 'static> Record for Wrapper<T> {
    fn fields() -> Vec<FieldDef> {
        vec![FieldDef::of::<T>("value"), FieldDef::of::<Vec<T>>("items")]
    }

    fn decode_field<'de, A>(
        &mut self,
        position: usize,
        field: FieldAccess<'_, A>,
    ) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        match position {
            0 => field.assign(&mut self.value),
            1 => field.assign(&mut self.items),
            _ => field.skip(),
        }
    }
}

impl<T: Decode + Default + 'static> Decode for Wrapper<T> {
    fn decode<'de, D>(deserializer: D, session: &DecodeSession<'_>) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        read_record(deserializer, session)
    }
}

impl_decode_for_record!(
    Pair,
    TestObject,
    TestObjectWithGenerics,
    SerializedNameTestObject,
    OptionalFieldTestObject,
    BadTestObject,
);

/// Fixtures that should survive a write/strict-read round trip.
pub fn test_objects() -> Vec<TestObject> {
    vec![
        TestObject::new("abc", 123),
        TestObject {
            nullable_string_field: Some("xyz".into()),
            ..TestObject::new("abc", 123)
        },
        TestObject {
            nested_object: Some(Box::new(TestObject::new("nested", 42))),
            ..TestObject::new("abc", 123)
        },
    ]
}

pub fn test_object_with_generics() -> TestObjectWithGenerics {
    TestObjectWithGenerics {
        string_list: vec!["a".into(), "b".into()],
        test_objects: test_objects(),
    }
}
