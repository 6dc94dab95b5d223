//! This module defines how declared field names become input keys.
//!

use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

/// A policy for translating a declared field name into the key expected in
/// the input.
///
/// The strategy is only applied to fields without an explicit name
/// override; see [`FieldDef::rename`](crate::record::FieldDef::rename).
///
/// Declared names are split into words at `_`, `-`, `.` and spaces, and
/// wherever a lowercase letter or digit is followed by an uppercase letter.
/// So `user_id`, `userId` and `UserId` all split into `["user", "id"]`.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// Use the declared name unchanged.
    #[default]
    Identity,
    /// `someFieldName`
    LowerCamelCase,
    /// `SomeFieldName`
    UpperCamelCase,
    /// `Some Field Name`
    UpperCamelCaseWithSpaces,
    /// `some_field_name`
    LowerCaseWithUnderscores,
    /// `some-field-name`
    LowerCaseWithDashes,
    /// `some.field.name`
    LowerCaseWithDots,
    /// `SOME_FIELD_NAME`
    UpperCaseWithUnderscores,
}

impl NamingStrategy {
    /// Translate a declared field name.
    pub fn translate(self, declared: &str) -> String {
        if self == NamingStrategy::Identity {
            return declared.to_string();
        }
        let words = split_words(declared);
        match self {
            NamingStrategy::Identity => declared.to_string(),
            NamingStrategy::LowerCamelCase => words
                .iter()
                .enumerate()
                .map(|(i, w)| if i == 0 { w.clone() } else { capitalize(w) })
                .collect(),
            NamingStrategy::UpperCamelCase => words.iter().map(|w| capitalize(w)).collect(),
            NamingStrategy::UpperCamelCaseWithSpaces => words
                .iter()
                .map(|w| capitalize(w))
                .collect::<Vec<_>>()
                .join(" "),
            NamingStrategy::LowerCaseWithUnderscores => words.join("_"),
            NamingStrategy::LowerCaseWithDashes => words.join("-"),
            NamingStrategy::LowerCaseWithDots => words.join("."),
            NamingStrategy::UpperCaseWithUnderscores => words
                .iter()
                .map(|w| w.to_uppercase())
                .collect::<Vec<_>>()
                .join("_"),
        }
    }
}

// Split a name into lowercase words.
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in name.chars() {
        if matches!(c, '_' | '-' | '.' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[test]
fn test_translate() {
    use NamingStrategy::*;

    assert_eq!(Identity.translate("some_field_name"), "some_field_name");
    assert_eq!(LowerCamelCase.translate("some_field_name"), "someFieldName");
    assert_eq!(UpperCamelCase.translate("some_field_name"), "SomeFieldName");
    assert_eq!(
        UpperCamelCaseWithSpaces.translate("some_field_name"),
        "Some Field Name"
    );
    assert_eq!(LowerCaseWithDashes.translate("some_field_name"), "some-field-name");
    assert_eq!(LowerCaseWithDots.translate("some_field_name"), "some.field.name");
    assert_eq!(
        UpperCaseWithUnderscores.translate("some_field_name"),
        "SOME_FIELD_NAME"
    );

    // camelCase input splits the same way.
    assert_eq!(LowerCaseWithUnderscores.translate("someFieldName"), "some_field_name");
    assert_eq!(LowerCaseWithUnderscores.translate("field2Name"), "field2_name");
    assert_eq!(LowerCamelCase.translate("x"), "x");
}

#[test]
fn test_strategy_names() {
    assert_eq!(NamingStrategy::LowerCamelCase.to_string(), "lower_camel_case");
    let name: &'static str = NamingStrategy::Identity.into();
    assert_eq!(name, "identity");
}
