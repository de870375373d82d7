//! Instance assembly.
//!
//! Turns a merged field map into an instance, by property injection or
//! by constructor injection, then runs the post-build hooks. Every check
//! happens before the first constructor call, so a failing assembly never
//! evaluates a deferred value.

use plant_support::rendering::suggest_similar;
use tracing::trace;

use crate::error::{
    ConstructorArgumentError, FieldNotFoundError, PlantError, Result, TypeMismatchError,
};
use crate::field::{FieldDescriptor, TypeTag};
use crate::fields::Fields;
use crate::schema::{Constructor, FieldSlot, Schema};
use crate::store::Binding;
use crate::strategy::Strategy;
use crate::value::FieldValue;

/// Builds a `T` from `fields` with the given strategy.
///
/// `index` is the creation index handed to sequences.
pub(crate) fn assemble<T: 'static>(
    strategy: Strategy,
    binding: &Binding<T>,
    fields: &Fields,
    index: usize,
) -> Result<T> {
    let mut instance = match strategy {
        Strategy::PropertyInjection => inject_properties(&binding.schema, fields, index)?,
        Strategy::ConstructorInjection => inject_constructor(&binding.schema, fields, index)?,
    };

    for hook in &binding.hooks {
        hook(&mut instance).map_err(|source| PlantError::HookFailed {
            target: TypeTag::of::<T>(),
            source,
        })?;
    }

    Ok(instance)
}

fn inject_properties<T: 'static>(schema: &Schema<T>, fields: &Fields, index: usize) -> Result<T> {
    let target = TypeTag::of::<T>();
    let construct = schema
        .zero_argument_constructor()
        .ok_or(PlantError::NoDefaultConstructor { target })?;

    let mut plan: Vec<(&FieldSlot<T>, &FieldValue)> = Vec::with_capacity(fields.len());
    for (descriptor, value) in fields.iter() {
        let slot = schema
            .field_slot(descriptor.name())
            .ok_or_else(|| field_not_found(schema, descriptor, value))?;

        check_type(target, descriptor.name(), slot.descriptor().declared_type(), value)?;
        trace!(field = %descriptor, deferred = value.is_deferred(), "Planned assignment");
        plan.push((slot, value));
    }

    let mut instance = construct();
    for (slot, value) in plan {
        slot.assign(&mut instance, value.resolve(index))
            .map_err(|_| mismatch(target, slot.descriptor(), value))?;
    }

    Ok(instance)
}

fn inject_constructor<T: 'static>(schema: &Schema<T>, fields: &Fields, index: usize) -> Result<T> {
    let target = TypeTag::of::<T>();
    let constructor: &Constructor<T> = match schema.constructors() {
        [only] => only,
        others => {
            return Err(PlantError::NoQualifyingConstructor {
                target,
                found: others.len(),
            });
        }
    };

    let parameters = constructor.parameters();
    let canonical: Vec<String> = parameters.iter().map(|p| p.name().to_lowercase()).collect();
    let argument_error = |name: &'static str| ConstructorArgumentError {
        target,
        name,
        parameters: constructor.parameter_names(),
    };

    let mut slots: Vec<Option<&FieldValue>> = vec![None; parameters.len()];
    for (descriptor, value) in fields.iter() {
        let key = descriptor.name().to_lowercase();
        let position = canonical
            .iter()
            .position(|name| *name == key)
            .ok_or_else(|| {
                PlantError::UnmatchedConstructorArgument(argument_error(descriptor.name()))
            })?;

        let parameter = &parameters[position];
        check_type(target, descriptor.name(), parameter.declared_type(), value)?;

        if slots[position].replace(value).is_some() {
            return Err(PlantError::AmbiguousConstructorArgument(argument_error(
                parameter.name(),
            )));
        }
        trace!(field = %descriptor, position, "Ordered constructor argument");
    }

    let values = parameters
        .iter()
        .zip(slots)
        .map(|(parameter, slot)| {
            slot.ok_or_else(|| {
                PlantError::MissingConstructorArgument(argument_error(parameter.name()))
            })
        })
        .collect::<Result<Vec<&FieldValue>>>()?;

    let arguments = values.iter().map(|value| value.resolve(index)).collect();
    constructor.invoke(arguments).map_err(|position| {
        match (parameters.get(position), values.get(position)) {
            (Some(parameter), Some(value)) => mismatch(target, parameter, value),
            _ => PlantError::MissingConstructorArgument(argument_error(
                parameters.last().map_or("", FieldDescriptor::name),
            )),
        }
    })
}

fn check_type(target: TypeTag, field: &'static str, expected: TypeTag, value: &FieldValue) -> Result<()> {
    let found = value.value_type();
    if found == expected {
        return Ok(());
    }

    let error = TypeMismatchError {
        target,
        field,
        expected,
        found,
    };
    Err(if value.is_deferred() {
        PlantError::LazyValueTypeMismatch(error)
    } else {
        PlantError::FieldTypeMismatch(error)
    })
}

fn mismatch(target: TypeTag, field: &FieldDescriptor, value: &FieldValue) -> PlantError {
    match check_type(target, field.name(), field.declared_type(), value) {
        Err(error) => error,
        Ok(()) => PlantError::FieldTypeMismatch(TypeMismatchError {
            target,
            field: field.name(),
            expected: field.declared_type(),
            found: value.value_type(),
        }),
    }
}

fn field_not_found<T: 'static>(
    schema: &Schema<T>,
    descriptor: &FieldDescriptor,
    value: &FieldValue,
) -> PlantError {
    let known = schema.field_names();
    PlantError::FieldNotFound(FieldNotFoundError {
        target: TypeTag::of::<T>(),
        field: descriptor.clone(),
        value: value.describe(),
        suggestions: suggest_similar(descriptor.name(), &known, 3),
    })
}
