//! Error types for Plant operations.
//!
//! Every failure is a setup mistake in test code, so messages name the
//! type, the field and what to change.

use std::fmt;

use plant_support::rendering::render_list;

use crate::field::{FieldDescriptor, TypeTag};
use crate::strategy::Strategy;

/// Boxed error returned by post-build hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for all Plant operations.
#[derive(Debug, thiserror::Error)]
pub enum PlantError {
    /// `create` was called for a type without a blueprint.
    #[error("{}", .0)]
    TypeNotConfigured(TypeNotConfiguredError),

    /// A field in the merged map has no setter on the target type.
    #[error("{}", .0)]
    FieldNotFound(FieldNotFoundError),

    /// A lazy value or sequence produces a type other than the field's.
    #[error("{}", .0)]
    LazyValueTypeMismatch(TypeMismatchError),

    /// A literal value is not of the field's declared type.
    #[error("{}", .0)]
    FieldTypeMismatch(TypeMismatchError),

    /// Property injection on a type without a zero-argument constructor.
    #[error(
        "{} has no zero-argument constructor\n  Hint: Register one with Schema::default_constructor, or use define_construction_of",
        .target
    )]
    NoDefaultConstructor { target: TypeTag },

    /// Constructor injection needs exactly one parameterized constructor.
    #[error(
        "{} must declare exactly one parameterized constructor, found {}",
        .target,
        .found
    )]
    NoQualifyingConstructor { target: TypeTag, found: usize },

    /// A second blueprint was registered for the same type.
    #[error("{}", .0)]
    DuplicateBlueprint(DuplicateBlueprintError),

    /// A field in the merged map has no matching constructor parameter.
    #[error("No constructor parameter matches field {}", .0)]
    UnmatchedConstructorArgument(ConstructorArgumentError),

    /// Two fields map to the same constructor parameter.
    #[error("Several fields match constructor parameter {}", .0)]
    AmbiguousConstructorArgument(ConstructorArgumentError),

    /// A constructor parameter received no value.
    #[error("No value for constructor parameter {}", .0)]
    MissingConstructorArgument(ConstructorArgumentError),

    /// A post-build hook returned an error.
    #[error("Post-build hook for {target} failed: {source}")]
    HookFailed {
        target: TypeTag,
        #[source]
        source: BoxError,
    },
}

/// Error when a type has no blueprint.
#[derive(Debug)]
pub struct TypeNotConfiguredError {
    pub requested: TypeTag,
    /// Registered types with similar names.
    pub suggestions: Vec<TypeTag>,
}

impl fmt::Display for TypeNotConfiguredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type not configured: {}", self.requested)?;

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        write!(
            f,
            "\n  Hint: Call .define_properties_of::<{0}>() or .define_construction_of::<{0}>() first",
            self.requested.short_name()
        )
    }
}

/// Error when a field name does not exist on the target type.
#[derive(Debug)]
pub struct FieldNotFoundError {
    pub target: TypeTag,
    pub field: FieldDescriptor,
    /// The offending value, rendered without evaluating it.
    pub value: String,
    /// Field names of the target with similar spelling.
    pub suggestions: Vec<String>,
}

impl fmt::Display for FieldNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Field `{}` with value {} not found on {}",
            self.field.name(),
            self.value,
            self.target
        )?;

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean: {}?", render_list(&self.suggestions))?;
        }

        Ok(())
    }
}

/// Error when a value's type differs from the field or parameter type.
#[derive(Debug)]
pub struct TypeMismatchError {
    pub target: TypeTag,
    pub field: &'static str,
    pub expected: TypeTag,
    pub found: TypeTag,
}

impl fmt::Display for TypeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Field `{}` of {} expects {}, but the value produces {}",
            self.field,
            self.target,
            self.expected.short_name(),
            self.found.short_name()
        )
    }
}

/// Error when a type already has a blueprint.
#[derive(Debug)]
pub struct DuplicateBlueprintError {
    pub target: TypeTag,
    pub existing: Strategy,
}

impl fmt::Display for DuplicateBlueprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Blueprint already defined for {} ({})",
            self.target, self.existing
        )?;
        write!(
            f,
            "\n  Hint: Pass per-call overrides to create_with, or enable allow_redefinition on the plant"
        )
    }
}

/// Error when merged fields and constructor parameters do not line up.
#[derive(Debug)]
pub struct ConstructorArgumentError {
    pub target: TypeTag,
    /// The field or parameter at fault.
    pub name: &'static str,
    /// The constructor's declared parameter names, in order.
    pub parameters: Vec<&'static str>,
}

impl fmt::Display for ConstructorArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` of {}", self.name, self.target)?;
        write!(
            f,
            "\n  Constructor parameters: ({})",
            render_list(&self.parameters)
        )
    }
}

/// Convenient Result type for Plant operations.
pub type Result<T> = std::result::Result<T, PlantError>;
