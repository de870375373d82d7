//! # Plant: blueprint-driven test fixtures
//!
//! Describe once how a valid instance of a type looks, then create as
//! many instances as a test needs, overriding only the fields the test
//! cares about.
//!
//! ```rust
//! use plant::prelude::*;
//!
//! #[derive(Debug, Default, plant::Model)]
//! #[plant(default)]
//! struct Person {
//!     first_name: String,
//!     email: String,
//! }
//!
//! let mut plant = Plant::new();
//! plant
//!     .define_properties_of::<Person>(
//!         Fields::new()
//!             .set("first_name", String::from("Barbara"))
//!             .sequence("email", |n| format!("barbara{n}@example.com")),
//!     )
//!     .expect("Failed to define Person");
//!
//! let person: Person = plant
//!     .create_with(Fields::new().set("first_name", String::from("James")))
//!     .expect("Failed to create Person");
//!
//! assert_eq!(person.first_name, "James");
//! assert_eq!(person.email, "barbara0@example.com");
//! ```

extern crate self as plant;

pub use plant_core::*;
pub use plant_derive::*;
pub use plant_support::*;
