//! Derive macros for Plant models.

pub use plant_macros::Model;
