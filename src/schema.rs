//! This module defines the field schema of a record type.
//!
//! A [`FieldSchema`] is a validated, simplified form of a record's
//! [`FieldDef`] declarations.  Computed fields are dropped, every field's
//! accepted names are resolved, and the name index is checked so that no
//! input key could match two different fields.
//!
//! Schemas are built once per record type and cached by the
//! [`Decoder`](crate::Decoder); they are never modified afterwards.

use crate::naming::NamingStrategy;
use crate::record::{FieldDef, Record};
use crate::util::SchemaError;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// One stored field of a record type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    position: usize,
    accepted_names: Vec<String>,
    nullable: bool,
    optional: bool,
}

impl FieldDescriptor {
    /// The declared position of this field; see [`Record::fields`].
    pub fn position(&self) -> usize {
        self.position
    }

    /// The input keys that map to this field.  Never empty; the first entry
    /// is the primary name.
    pub fn accepted_names(&self) -> &[String] {
        &self.accepted_names
    }

    /// The name used for this field in error messages.
    pub fn primary_name(&self) -> &str {
        &self.accepted_names[0]
    }

    /// The field's type permits a null value.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The field is explicitly exempted from being required.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The field must be present in the input (when the decoder requires
    /// all class fields to be used).
    pub fn is_required(&self) -> bool {
        !self.nullable && !self.optional
    }

    fn from_def(position: usize, def: &FieldDef, naming: NamingStrategy) -> FieldDescriptor {
        let explicit = def.rename.is_some() || !def.alternates.is_empty();
        let mut accepted_names = Vec::with_capacity(1 + def.alternates.len());
        accepted_names.push(match &def.rename {
            Some(name) => name.clone(),
            None if explicit => def.declared_name.to_string(),
            None => naming.translate(def.declared_name),
        });
        for alternate in &def.alternates {
            if !accepted_names.contains(alternate) {
                accepted_names.push(alternate.clone());
            }
        }

        FieldDescriptor {
            position,
            accepted_names,
            nullable: def.nullable,
            optional: def.optional,
        }
    }
}

/// The complete set of field descriptors for one record type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSchema {
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
    // accepted name -> index into `fields`
    by_name: HashMap<String, usize>,
}

impl FieldSchema {
    /// Build the schema for a record type.
    pub fn build<T: Record>(naming: NamingStrategy) -> Result<FieldSchema, SchemaError> {
        FieldSchema::from_defs(T::type_name(), &T::fields(), naming)
    }

    /// Build a schema from a list of field declarations.
    ///
    /// Fails if two fields resolve to the same accepted name.
    pub fn from_defs(
        type_name: &'static str,
        defs: &[FieldDef],
        naming: NamingStrategy,
    ) -> Result<FieldSchema, SchemaError> {
        let fields: Vec<FieldDescriptor> = defs
            .iter()
            .enumerate()
            .filter(|(_, def)| def.stored)
            .map(|(position, def)| FieldDescriptor::from_def(position, def, naming))
            .collect();

        let mut by_name = HashMap::new();
        for (index, field) in fields.iter().enumerate() {
            for name in &field.accepted_names {
                match by_name.entry(name.clone()) {
                    Entry::Occupied(_) => {
                        return Err(SchemaError::DuplicateFieldName {
                            type_name,
                            name: name.clone(),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(index);
                    }
                }
            }
        }

        Ok(FieldSchema {
            type_name,
            fields,
            by_name,
        })
    }

    /// The name of the record type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// All field descriptors, in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The fields that are required to be present.
    pub fn required(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_required())
    }

    /// Find the field that accepts an input key.
    pub fn lookup(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&index| &self.fields[index])
    }

    /// The number of stored fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no stored fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
