//! Instantiation strategies.
//!
//! Every blueprint picks how its instances are built:
//! - [`Strategy::PropertyInjection`]: zero-argument constructor, then one
//!   setter call per field
//! - [`Strategy::ConstructorInjection`]: a single call to the parameterized
//!   constructor with positionally ordered arguments
use std::fmt;

/// How a blueprint's type is instantiated.
///
/// # Examples
/// ```
/// use plant_core::strategy::Strategy;
///
/// assert!(Strategy::ConstructorInjection.uses_constructor());
/// assert_eq!(Strategy::PropertyInjection.to_string(), "property injection");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Build with the zero-argument constructor, then assign fields.
    ///
    /// Supports lazy values, sequences and post-build hooks.
    PropertyInjection,

    /// Build with the type's one parameterized constructor.
    ///
    /// Field names are matched to parameter names case-insensitively.
    ConstructorInjection,
}

impl Strategy {
    #[inline]
    pub fn uses_constructor(&self) -> bool {
        matches!(self, Strategy::ConstructorInjection)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::PropertyInjection => write!(f, "property injection"),
            Strategy::ConstructorInjection => write!(f, "constructor injection"),
        }
    }
}
