//! Typed key-value field maps.
//!
//! [`Fields`] holds blueprint defaults and per-call overrides. Keys are
//! [`FieldDescriptor`]s whose declared type is the type the value produces,
//! so a literal override replaces a lazy default of the same name and type.

use std::collections::HashMap;
use std::fmt;

use crate::field::FieldDescriptor;
use crate::value::FieldValue;

/// An insertion-ordered map from [`FieldDescriptor`] to [`FieldValue`].
///
/// # Examples
/// ```
/// use plant_core::fields::Fields;
///
/// let defaults = Fields::new()
///     .set("first_name", String::from("Barbara"))
///     .set("age", 40u32);
///
/// let overrides = Fields::new().set("first_name", String::from("James"));
/// let merged = defaults.merged_with(&overrides);
///
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged.names(), vec!["first_name", "age"]);
/// ```
#[derive(Clone, Default)]
pub struct Fields {
    entries: Vec<(FieldDescriptor, FieldValue)>,
    index: HashMap<FieldDescriptor, usize>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a literal value, cloned into every instance.
    pub fn set<T>(mut self, name: &'static str, value: T) -> Self
    where
        T: Clone + fmt::Debug + Send + Sync + 'static,
    {
        self.insert(name, FieldValue::literal(value));
        self
    }

    /// Adds a value computed each time the field is assigned.
    pub fn lazy<T: 'static>(
        mut self,
        name: &'static str,
        compute: impl Fn() -> T + Send + Sync + 'static,
    ) -> Self {
        self.insert(name, FieldValue::lazy(compute));
        self
    }

    /// Adds a value computed from the creation index of the blueprint.
    pub fn sequence<T: 'static>(
        mut self,
        name: &'static str,
        compute: impl Fn(usize) -> T + Send + Sync + 'static,
    ) -> Self {
        self.insert(name, FieldValue::sequence(compute));
        self
    }

    /// Inserts a value under `name`, keyed by the type it produces.
    ///
    /// Returns the value previously stored under the same name and type.
    pub fn insert(&mut self, name: &'static str, value: FieldValue) -> Option<FieldValue> {
        let descriptor = FieldDescriptor::new(name, value.value_type());
        self.insert_entry(descriptor, value)
    }

    fn insert_entry(&mut self, descriptor: FieldDescriptor, value: FieldValue) -> Option<FieldValue> {
        match self.index.get(&descriptor) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.index.insert(descriptor.clone(), self.entries.len());
                self.entries.push((descriptor, value));
                None
            }
        }
    }

    pub fn get(&self, descriptor: &FieldDescriptor) -> Option<&FieldValue> {
        self.index
            .get(descriptor)
            .map(|&position| &self.entries[position].1)
    }

    pub fn contains(&self, descriptor: &FieldDescriptor) -> bool {
        self.index.contains_key(descriptor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldDescriptor, &FieldValue)> {
        self.entries.iter().map(|(descriptor, value)| (descriptor, value))
    }

    /// Field names in insertion order (repeated when a name is stored
    /// under several types).
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(descriptor, _)| descriptor.name()).collect()
    }

    /// Merges `overrides` over these defaults.
    ///
    /// - default only: kept
    /// - override only: appended
    /// - both (same name and type): the override wins, in the default's position
    pub fn merged_with(&self, overrides: &Fields) -> Fields {
        let mut merged = self.clone();
        for (descriptor, value) in &overrides.entries {
            merged.insert_entry(descriptor.clone(), value.clone());
        }
        merged
    }
}

impl fmt::Debug for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(d, v)| (d.to_string(), v)))
            .finish()
    }
}
