//! # Plant: entry point of the crate
//!
//! Registers blueprints and creates fully populated instances from them.
//!
//! # Architecture
//! ```text
//! define_properties_of / define_construction_of / after_build
//!                      │
//!                      ▼
//!               BlueprintStore
//!                      │
//!   create_with(overrides) ── merge defaults ──> assembler ──> hooks ──> T
//! ```
//!
//! # Examples
//! ```rust
//! use plant_core::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct Person {
//!     first_name: String,
//!     last_name: String,
//! }
//!
//! impl Model for Person {
//!     fn schema() -> Schema<Self> {
//!         Schema::new()
//!             .default_constructor(Person::default)
//!             .field("first_name", |p: &mut Person, v: String| p.first_name = v)
//!             .field("last_name", |p: &mut Person, v: String| p.last_name = v)
//!     }
//! }
//!
//! let mut plant = Plant::new();
//! plant
//!     .define_properties_of::<Person>(
//!         Fields::new()
//!             .set("first_name", String::from("Barbara"))
//!             .set("last_name", String::from("Smith")),
//!     )
//!     .expect("Failed to define Person");
//!
//! let person: Person = plant
//!     .create_with(Fields::new().set("first_name", String::from("James")))
//!     .expect("Failed to create Person");
//!
//! assert_eq!(person.first_name, "James");
//! assert_eq!(person.last_name, "Smith");
//! ```

use std::fmt;

use tracing::{debug, instrument, trace};

use crate::assembler;
use crate::blueprint::{self, Blueprint};
use crate::error::{BoxError, Result};
use crate::field::TypeTag;
use crate::fields::Fields;
use crate::schema::Model;
use crate::store::BlueprintStore;
use crate::strategy::Strategy;

/// Creates test objects from registered blueprints.
///
/// Registration takes `&mut self` and creation takes `&self`, so a plant
/// is fully configured before anything is created from it. Produced
/// instances are owned by the caller; the plant keeps no reference.
pub struct Plant {
    store: BlueprintStore,
    allow_redefinition: bool,
}

impl Plant {
    /// Creates a plant without blueprints.
    pub fn new() -> Self {
        Self {
            store: BlueprintStore::new(),
            allow_redefinition: false,
        }
    }

    /// Allow a second definition for a type to replace the first.
    ///
    /// Off by default: redefining fails with `DuplicateBlueprint`.
    pub fn allow_redefinition(mut self, allow: bool) -> Self {
        self.allow_redefinition = allow;
        self
    }

    // ── Registration ──

    /// Registers property-injection defaults for `T`.
    ///
    /// Instances are built with the zero-argument constructor, then every
    /// field is assigned through its setter.
    pub fn define_properties_of<T: Model>(&mut self, defaults: Fields) -> Result<&mut Self> {
        self.store
            .define_properties_of::<T>(defaults, self.allow_redefinition)?;
        Ok(self)
    }

    /// Registers constructor-injection defaults for `T`.
    ///
    /// Instances are built by calling the one parameterized constructor,
    /// with field values ordered by parameter name.
    pub fn define_construction_of<T: Model>(&mut self, defaults: Fields) -> Result<&mut Self> {
        self.store
            .define_construction_of::<T>(defaults, self.allow_redefinition)?;
        Ok(self)
    }

    /// Attaches a hook that runs on every finished `T`.
    ///
    /// ```rust
    /// # use plant_core::prelude::*;
    /// # struct House {
    /// #     color: String,
    /// #     square_foot: u32,
    /// #     summary: String,
    /// # }
    /// # impl Model for House {
    /// #     fn schema() -> Schema<Self> {
    /// #         Schema::new().constructor(["color", "square_foot"], |(color, square_foot): (String, u32)| {
    /// #             House { color, square_foot, summary: String::new() }
    /// #         })
    /// #     }
    /// # }
    /// # fn main() -> plant_core::Result<()> {
    /// let mut plant = Plant::new();
    /// plant
    ///     .define_construction_of::<House>(
    ///         Fields::new()
    ///             .set("color", String::from("Red"))
    ///             .set("square_foot", 3000u32),
    ///     )?
    ///     .after_build::<House>(|house| {
    ///         house.summary = format!("{} house, {} sq ft", house.color, house.square_foot);
    ///         Ok(())
    ///     })?;
    ///
    /// let house: House = plant.create()?;
    /// assert_eq!(house.summary, "Red house, 3000 sq ft");
    /// # Ok(())
    /// # }
    /// ```
    pub fn after_build<T: Model>(
        &mut self,
        hook: impl Fn(&mut T) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
    ) -> Result<&mut Self> {
        self.store.attach_hook::<T>(Box::new(hook))?;
        Ok(self)
    }

    // ── Blueprint modules ──

    /// Runs a [`Blueprint`] module against this plant.
    pub fn load_blueprint(&mut self, blueprint: &dyn Blueprint) -> Result<&mut Self> {
        debug!(blueprint = blueprint.name(), "Loading blueprint");
        blueprint.setup(self)?;
        Ok(self)
    }

    /// Builder form of [`load_blueprint`](Self::load_blueprint).
    pub fn with_blueprint(mut self, blueprint: &dyn Blueprint) -> Result<Self> {
        self.load_blueprint(blueprint)?;
        Ok(self)
    }

    /// Runs every blueprint submitted with [`crate::blueprint!`].
    pub fn with_registered_blueprints(mut self) -> Result<Self> {
        let loaded = blueprint::load_registered(&mut self)?;
        debug!(loaded, "Loaded registered blueprints");
        Ok(self)
    }

    // ── Creation ──

    /// Creates a `T` from its blueprint defaults.
    pub fn create<T: Model>(&self) -> Result<T> {
        self.create_with(Fields::new())
    }

    /// Creates a `T` from its blueprint defaults merged with `overrides`.
    ///
    /// An override replaces the default with the same name and type;
    /// override-only fields are added. Fails without returning a partial
    /// instance.
    #[instrument(skip_all, name = "plant_create", fields(model = TypeTag::of::<T>().name()))]
    pub fn create_with<T: Model>(&self, overrides: Fields) -> Result<T> {
        let target = TypeTag::of::<T>();
        let strategy = self.store.strategy_for(target)?;
        let binding = self.store.binding::<T>()?;
        let fields = self.store.defaults_for(target)?.merged_with(&overrides);
        let index = self.store.next_index(target)?;

        trace!(%strategy, fields = fields.len(), index, "Assembling");
        assembler::assemble(strategy, binding, &fields, index)
    }

    // ── Introspection ──

    /// Returns how `T` is instantiated.
    pub fn strategy_for<T: Model>(&self) -> Result<Strategy> {
        self.store.strategy_for(TypeTag::of::<T>())
    }

    /// Returns the registered defaults of `T`.
    pub fn defaults_for<T: Model>(&self) -> Result<&Fields> {
        self.store.defaults_for(TypeTag::of::<T>())
    }

    /// Returns true if `T` has a blueprint.
    pub fn is_defined<T: Model>(&self) -> bool {
        self.store.contains(TypeTag::of::<T>())
    }

    pub fn store(&self) -> &BlueprintStore {
        &self.store
    }
}

impl Default for Plant {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plant")
            .field("blueprints", &self.store.len())
            .field("allow_redefinition", &self.allow_redefinition)
            .finish()
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::Plant;
    pub use crate::blueprint::Blueprint;
    pub use crate::error::{BoxError, PlantError, Result};
    pub use crate::fields::Fields;
    pub use crate::lazy::{LazyValue, Sequence};
    pub use crate::schema::{Model, Schema};
    pub use crate::strategy::Strategy;
    pub use crate::value::FieldValue;
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
