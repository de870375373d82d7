//! Field identification.
//!
//! [`TypeTag`] names a Rust type at runtime. [`FieldDescriptor`] pairs a
//! field name with the [`TypeTag`] of the value it holds and is the key of
//! every field map in the crate.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use plant_support::rendering::shorten_type_name;

/// Runtime identity of a Rust type.
///
/// Two tags are equal iff they were built from the same type.
///
/// # Examples
/// ```
/// use plant_core::field::TypeTag;
///
/// let tag = TypeTag::of::<String>();
/// assert_eq!(tag.name(), "alloc::string::String");
/// assert_eq!(tag.short_name(), "String");
/// assert_ne!(tag, TypeTag::of::<&str>());
/// ```
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Creates the tag for type `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the tagged type.
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the fully qualified type name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the type name without module paths.
    pub fn short_name(&self) -> String {
        shorten_type_name(self.name)
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Identifies one field by name and declared type.
///
/// Descriptors with the same name but different types are distinct keys,
/// so `age: u32` and `age: &str` never replace each other in a map.
///
/// # Examples
/// ```
/// use plant_core::field::FieldDescriptor;
///
/// let a = FieldDescriptor::of::<String>("first_name");
/// let b = FieldDescriptor::of::<String>("first_name");
/// assert_eq!(a, b);
/// assert_ne!(a, FieldDescriptor::of::<u32>("first_name"));
/// ```
#[derive(Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    declared_type: TypeTag,
}

impl FieldDescriptor {
    /// Creates a descriptor from a name and a type tag.
    #[inline]
    pub fn new(name: &'static str, declared_type: TypeTag) -> Self {
        Self { name, declared_type }
    }

    /// Creates a descriptor for a field of type `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self::new(name, TypeTag::of::<T>())
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn declared_type(&self) -> TypeTag {
        self.declared_type
    }
}

impl PartialEq for FieldDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.declared_type == other.declared_type
    }
}

impl Eq for FieldDescriptor {}

impl Hash for FieldDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.declared_type.hash(state);
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldDescriptor({}: {})", self.name, self.declared_type.name)
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.declared_type.short_name())
    }
}
