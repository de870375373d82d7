//! Core blueprint engine for Plant.
//!
//! Register a blueprint per type, then create populated instances from
//! it, overriding individual fields per call.

mod assembler;
pub mod blueprint;
pub mod error;
pub mod field;
pub mod fields;
pub mod lazy;
mod plant;
pub mod schema;
pub mod store;
pub mod strategy;
pub mod value;

#[doc(hidden)]
pub use inventory;

pub use blueprint::Blueprint;
pub use error::{BoxError, PlantError, Result};
pub use field::{FieldDescriptor, TypeTag};
pub use fields::Fields;
pub use lazy::{LazyValue, Sequence};
pub use plant::{Plant, prelude};
pub use schema::{Model, Schema};
pub use strategy::Strategy;
pub use value::FieldValue;
