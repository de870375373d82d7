//! Blueprint store holding every registered blueprint of a plant.
//!
//! The store maps a target [`TypeTag`] to its strategy, its default
//! [`Fields`], and the typed schema and post-build hooks resolved when
//! the blueprint was registered.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use plant_support::rendering::suggest_similar;
use tracing::{debug, warn};

use crate::error::{BoxError, DuplicateBlueprintError, PlantError, Result, TypeNotConfiguredError};
use crate::field::TypeTag;
use crate::fields::Fields;
use crate::schema::{Model, Schema};
use crate::strategy::Strategy;

/// A post-build hook: runs on the finished instance.
pub type HookFn<T> = Box<dyn Fn(&mut T) -> std::result::Result<(), BoxError> + Send + Sync>;

/// Typed half of a blueprint, stored type-erased in [`Entry`].
pub(crate) struct Binding<T> {
    pub schema: Schema<T>,
    pub hooks: Vec<HookFn<T>>,
}

/// One registered blueprint.
struct Entry {
    target: TypeTag,
    strategy: Strategy,
    defaults: Fields,
    binding: Box<dyn Any + Send + Sync>,
    created: AtomicUsize,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("target", &self.target)
            .field("strategy", &self.strategy)
            .field("defaults", &self.defaults)
            .field("created", &self.created.load(Ordering::Relaxed))
            .finish()
    }
}

/// Stores all blueprints of a plant.
///
/// At most one blueprint exists per type. Entries live as long as the
/// store; there is no removal.
#[derive(Debug, Default)]
pub struct BlueprintStore {
    entries: HashMap<TypeTag, Entry>,
}

impl BlueprintStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a property-injection blueprint for `T`.
    ///
    /// # Errors
    /// Returns [`PlantError::DuplicateBlueprint`] if `T` already has a
    /// blueprint and `allow_redefinition` is false.
    pub fn define_properties_of<T: Model>(
        &mut self,
        defaults: Fields,
        allow_redefinition: bool,
    ) -> Result<()> {
        self.define::<T>(Strategy::PropertyInjection, defaults, allow_redefinition)
    }

    /// Registers a constructor-injection blueprint for `T`.
    ///
    /// # Errors
    /// Same as [`define_properties_of`](Self::define_properties_of).
    pub fn define_construction_of<T: Model>(
        &mut self,
        defaults: Fields,
        allow_redefinition: bool,
    ) -> Result<()> {
        self.define::<T>(Strategy::ConstructorInjection, defaults, allow_redefinition)
    }

    fn define<T: Model>(
        &mut self,
        strategy: Strategy,
        defaults: Fields,
        allow_redefinition: bool,
    ) -> Result<()> {
        let target = TypeTag::of::<T>();

        if let Some(existing) = self.entries.get(&target) {
            if !allow_redefinition {
                warn!(model = %target, existing = %existing.strategy, "Rejected duplicate blueprint");
                return Err(PlantError::DuplicateBlueprint(DuplicateBlueprintError {
                    target,
                    existing: existing.strategy,
                }));
            }
            debug!(model = %target, "Redefining blueprint");
        }

        let binding = Binding::<T> {
            schema: T::schema(),
            hooks: Vec::new(),
        };

        debug!(
            model = %target,
            strategy = %strategy,
            defaults = defaults.len(),
            "Defined blueprint"
        );
        self.entries.insert(
            target,
            Entry {
                target,
                strategy,
                defaults,
                binding: Box::new(binding),
                created: AtomicUsize::new(0),
            },
        );
        Ok(())
    }

    /// Appends a post-build hook to the blueprint of `T`.
    ///
    /// Hooks run in attachment order after every successful assembly.
    pub fn attach_hook<T: 'static>(&mut self, hook: HookFn<T>) -> Result<()> {
        let target = TypeTag::of::<T>();
        let binding = self
            .entries
            .get_mut(&target)
            .and_then(|entry| entry.binding.downcast_mut::<Binding<T>>());

        match binding {
            Some(binding) => {
                binding.hooks.push(hook);
                debug!(model = %target, hooks = binding.hooks.len(), "Attached post-build hook");
                Ok(())
            }
            None => Err(self.not_configured(target)),
        }
    }

    /// Returns the strategy registered for `target`.
    ///
    /// # Errors
    /// [`PlantError::TypeNotConfigured`] when no blueprint exists.
    pub fn strategy_for(&self, target: TypeTag) -> Result<Strategy> {
        self.entry(target).map(|entry| entry.strategy)
    }

    /// Returns the default fields registered for `target`.
    pub fn defaults_for(&self, target: TypeTag) -> Result<&Fields> {
        self.entry(target).map(|entry| &entry.defaults)
    }

    /// Typed access to the schema and hooks of `T`.
    pub(crate) fn binding<T: 'static>(&self) -> Result<&Binding<T>> {
        let target = TypeTag::of::<T>();
        self.entry(target)?
            .binding
            .downcast_ref::<Binding<T>>()
            .ok_or_else(|| self.not_configured(target))
    }

    /// Claims the next creation index of `target`.
    pub(crate) fn next_index(&self, target: TypeTag) -> Result<usize> {
        self.entry(target)
            .map(|entry| entry.created.fetch_add(1, Ordering::Relaxed))
    }

    pub fn contains(&self, target: TypeTag) -> bool {
        self.entries.contains_key(&target)
    }

    /// Returns the number of registered blueprints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no blueprints are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn registered_types(&self) -> Vec<TypeTag> {
        self.entries.keys().copied().collect()
    }

    fn entry(&self, target: TypeTag) -> Result<&Entry> {
        self.entries
            .get(&target)
            .ok_or_else(|| self.not_configured(target))
    }

    fn not_configured(&self, requested: TypeTag) -> PlantError {
        let names: Vec<&str> = self.entries.keys().map(TypeTag::name).collect();
        let suggestions = suggest_similar(requested.name(), &names, 3)
            .into_iter()
            .filter_map(|name| self.entries.keys().find(|tag| tag.name() == name).copied())
            .collect();

        PlantError::TypeNotConfigured(TypeNotConfiguredError {
            requested,
            suggestions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Person {
        first_name: String,
    }

    impl Model for Person {
        fn schema() -> Schema<Self> {
            Schema::new()
                .default_constructor(Person::default)
                .field("first_name", |p: &mut Person, v: String| p.first_name = v)
        }
    }

    struct Persons;

    impl Model for Persons {
        fn schema() -> Schema<Self> {
            Schema::new().default_constructor(|| Persons)
        }
    }

    struct Car;

    #[test]
    fn define_and_lookup() {
        let mut store = BlueprintStore::new();
        store
            .define_properties_of::<Person>(Fields::new().set("first_name", String::from("Barbara")), false)
            .unwrap();

        let target = TypeTag::of::<Person>();
        assert!(store.contains(target));
        assert_eq!(store.strategy_for(target).unwrap(), Strategy::PropertyInjection);
        assert_eq!(store.defaults_for(target).unwrap().names(), vec!["first_name"]);
        assert!(store.binding::<Person>().unwrap().hooks.is_empty());
    }

    #[test]
    fn construction_strategy_recorded() {
        let mut store = BlueprintStore::new();
        store.define_construction_of::<Person>(Fields::new(), false).unwrap();
        assert_eq!(
            store.strategy_for(TypeTag::of::<Person>()).unwrap(),
            Strategy::ConstructorInjection
        );
    }

    #[test]
    fn unknown_type_fails() {
        let store = BlueprintStore::new();
        match store.strategy_for(TypeTag::of::<Car>()).unwrap_err() {
            PlantError::TypeNotConfigured(e) => assert!(e.requested.name().contains("Car")),
            other => panic!("Expected TypeNotConfigured, got: {other:?}"),
        }
        assert!(store.defaults_for(TypeTag::of::<Car>()).is_err());
    }

    #[test]
    fn unknown_type_suggests_similar_names() {
        let mut store = BlueprintStore::new();
        store.define_properties_of::<Persons>(Fields::new(), false).unwrap();

        match store.strategy_for(TypeTag::of::<Person>()).unwrap_err() {
            PlantError::TypeNotConfigured(e) => {
                assert_eq!(e.suggestions, vec![TypeTag::of::<Persons>()]);
            }
            other => panic!("Expected TypeNotConfigured, got: {other:?}"),
        }
    }

    #[test]
    fn duplicate_fails() {
        let mut store = BlueprintStore::new();
        store.define_properties_of::<Person>(Fields::new(), false).unwrap();

        let err = store.define_construction_of::<Person>(Fields::new(), false).unwrap_err();
        assert!(matches!(err, PlantError::DuplicateBlueprint(ref e) if e.existing == Strategy::PropertyInjection));
        assert_eq!(
            store.strategy_for(TypeTag::of::<Person>()).unwrap(),
            Strategy::PropertyInjection
        );
    }

    #[test]
    fn duplicate_with_redefinition_overwrites() {
        let mut store = BlueprintStore::new();
        store.define_properties_of::<Person>(Fields::new(), false).unwrap();
        store.define_construction_of::<Person>(Fields::new(), true).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.strategy_for(TypeTag::of::<Person>()).unwrap(),
            Strategy::ConstructorInjection
        );
    }

    #[test]
    fn hooks_require_blueprint() {
        let mut store = BlueprintStore::new();
        let hook: HookFn<Person> = Box::new(|_: &mut Person| Ok(()));
        assert!(matches!(
            store.attach_hook(hook),
            Err(PlantError::TypeNotConfigured(_))
        ));

        store.define_properties_of::<Person>(Fields::new(), false).unwrap();
        store.attach_hook::<Person>(Box::new(|_: &mut Person| Ok(()))).unwrap();
        store.attach_hook::<Person>(Box::new(|_: &mut Person| Ok(()))).unwrap();
        assert_eq!(store.binding::<Person>().unwrap().hooks.len(), 2);
    }

    #[test]
    fn creation_index_counts_per_type() {
        let mut store = BlueprintStore::new();
        store.define_properties_of::<Person>(Fields::new(), false).unwrap();
        store.define_properties_of::<Persons>(Fields::new(), false).unwrap();

        let person = TypeTag::of::<Person>();
        assert_eq!(store.next_index(person).unwrap(), 0);
        assert_eq!(store.next_index(person).unwrap(), 1);
        assert_eq!(store.next_index(TypeTag::of::<Persons>()).unwrap(), 0);
        assert!(store.next_index(TypeTag::of::<Car>()).is_err());
    }

    #[test]
    fn registered_types_lists_all() {
        let mut store = BlueprintStore::new();
        assert!(store.is_empty());
        store.define_properties_of::<Person>(Fields::new(), false).unwrap();
        store.define_properties_of::<Persons>(Fields::new(), false).unwrap();

        let types = store.registered_types();
        assert_eq!(types.len(), 2);
        assert!(types.contains(&TypeTag::of::<Person>()));
    }
}
