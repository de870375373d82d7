//! Blueprint modules: groups of related definitions.
//!
//! A blueprint module registers the blueprints of one area of a test
//! suite. Modules are loaded explicitly with [`Plant::with_blueprint`],
//! or submitted once with [`blueprint!`](crate::blueprint!) and loaded
//! all together with [`Plant::with_registered_blueprints`].
//!
//! # Examples
//! ```rust
//! use plant_core::prelude::*;
//!
//! # #[derive(Default)]
//! # struct Person {
//! #     first_name: String,
//! # }
//! # impl Model for Person {
//! #     fn schema() -> Schema<Self> {
//! #         Schema::new()
//! #             .default_constructor(Person::default)
//! #             .field("first_name", |p: &mut Person, v: String| p.first_name = v)
//! #     }
//! # }
//! #[derive(Default)]
//! struct PeopleBlueprints;
//!
//! impl Blueprint for PeopleBlueprints {
//!     fn setup(&self, plant: &mut Plant) -> Result<()> {
//!         plant.define_properties_of::<Person>(
//!             Fields::new().set("first_name", String::from("Barbara")),
//!         )?;
//!         Ok(())
//!     }
//! }
//!
//! plant_core::blueprint!(PeopleBlueprints);
//!
//! fn main() -> Result<()> {
//!     let plant = Plant::new().with_registered_blueprints()?;
//!     assert_eq!(plant.create::<Person>()?.first_name, "Barbara");
//!     Ok(())
//! }
//! ```

use tracing::{debug, warn};

use crate::error::Result;
use crate::plant::Plant;

/// A module that registers related blueprints into a plant.
pub trait Blueprint: Send + Sync {
    /// Register blueprints, hooks and definitions.
    fn setup(&self, plant: &mut Plant) -> Result<()>;

    /// Human-readable name for logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A blueprint module submitted with [`blueprint!`](crate::blueprint!).
pub struct BlueprintRegistration {
    pub name: &'static str,
    pub setup: fn(&mut Plant) -> Result<()>,
}

inventory::collect!(BlueprintRegistration);

/// Loads a default-constructed blueprint module.
#[doc(hidden)]
pub fn setup_default<B: Blueprint + Default>(plant: &mut Plant) -> Result<()> {
    plant.load_blueprint(&B::default())?;
    Ok(())
}

/// Runs every submitted blueprint module, stopping at the first failure.
///
/// Returns the number of modules loaded. Submission order across
/// compilation units is unspecified.
pub(crate) fn load_registered(plant: &mut Plant) -> Result<usize> {
    let mut loaded = 0;
    for registration in inventory::iter::<BlueprintRegistration> {
        debug!(blueprint = registration.name, "Running registered blueprint");
        (registration.setup)(plant).inspect_err(|err| {
            warn!(blueprint = registration.name, error = %err, "Registered blueprint failed");
        })?;
        loaded += 1;
    }
    Ok(loaded)
}

/// Submits a blueprint module for [`Plant::with_registered_blueprints`].
///
/// The type must implement [`Blueprint`] and [`Default`].
#[macro_export]
macro_rules! blueprint {
    ($blueprint:ty) => {
        $crate::inventory::submit! {
            $crate::blueprint::BlueprintRegistration {
                name: ::core::stringify!($blueprint),
                setup: $crate::blueprint::setup_default::<$blueprint>,
            }
        }
    };
}
