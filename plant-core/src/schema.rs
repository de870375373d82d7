//! Typed accessors for constructible types.
//!
//! A [`Schema`] tells the assembler how to build a type without runtime
//! reflection: which zero-argument constructor to call, which setter owns
//! each field name, and which parameterized constructor takes which
//! ordered parameter names. Types expose their schema through [`Model`],
//! written by hand or generated with `#[derive(Model)]`.
//!
//! # Examples
//! ```
//! use plant_core::schema::{Model, Schema};
//!
//! #[derive(Default)]
//! struct Car {
//!     make: String,
//! }
//!
//! struct Book {
//!     author: String,
//!     publisher: String,
//! }
//!
//! impl Model for Car {
//!     fn schema() -> Schema<Self> {
//!         Schema::new()
//!             .default_constructor(Car::default)
//!             .field("make", |car: &mut Car, make: String| car.make = make)
//!     }
//! }
//!
//! impl Model for Book {
//!     fn schema() -> Schema<Self> {
//!         Schema::new().constructor(
//!             ["author", "publisher"],
//!             |(author, publisher): (String, String)| Book { author, publisher },
//!         )
//!     }
//! }
//!
//! assert_eq!(Car::schema().field_names(), vec!["make"]);
//! assert_eq!(Book::schema().constructors()[0].parameter_names(), vec!["author", "publisher"]);
//! ```

use std::any::Any;
use std::fmt;

use crate::field::{FieldDescriptor, TypeTag};

/// A type that can be assembled from a blueprint.
pub trait Model: Sized + 'static {
    /// Describes how to construct and populate `Self`.
    ///
    /// Called once per registration, never per `create`.
    fn schema() -> Schema<Self>;
}

type SetterFn<T> = Box<dyn Fn(&mut T, Box<dyn Any>) -> Result<(), Box<dyn Any>> + Send + Sync>;
type InvokeFn<T> = Box<dyn Fn(Vec<Box<dyn Any>>) -> Result<T, usize> + Send + Sync>;

/// A typed setter for one named field.
pub struct FieldSlot<T> {
    descriptor: FieldDescriptor,
    assign: SetterFn<T>,
}

impl<T> FieldSlot<T> {
    #[inline]
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Stores `value` into `target`.
    ///
    /// Hands the value back when it is not of the declared type.
    pub fn assign(&self, target: &mut T, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        (self.assign)(target, value)
    }
}

/// A parameterized constructor with its ordered parameter list.
pub struct Constructor<T> {
    parameters: Vec<FieldDescriptor>,
    invoke: InvokeFn<T>,
}

impl<T> Constructor<T> {
    pub fn parameters(&self) -> &[FieldDescriptor] {
        &self.parameters
    }

    pub fn parameter_names(&self) -> Vec<&'static str> {
        self.parameters.iter().map(FieldDescriptor::name).collect()
    }

    /// Calls the constructor with positionally ordered arguments.
    ///
    /// On a type mismatch returns the index of the offending argument.
    pub fn invoke(&self, arguments: Vec<Box<dyn Any>>) -> Result<T, usize> {
        (self.invoke)(arguments)
    }
}

/// How to construct and populate a `T`.
pub struct Schema<T> {
    default_constructor: Option<fn() -> T>,
    fields: Vec<FieldSlot<T>>,
    constructors: Vec<Constructor<T>>,
}

impl<T: 'static> Schema<T> {
    pub fn new() -> Self {
        Self {
            default_constructor: None,
            fields: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Registers the zero-argument constructor used by property injection.
    pub fn default_constructor(mut self, construct: fn() -> T) -> Self {
        self.default_constructor = Some(construct);
        self
    }

    /// Registers a setter for the field `name` of type `V`.
    ///
    /// A later setter with the same name replaces the earlier one.
    pub fn field<V: 'static>(
        mut self,
        name: &'static str,
        set: impl Fn(&mut T, V) + Send + Sync + 'static,
    ) -> Self {
        let assign: SetterFn<T> = Box::new(move |target, value| {
            let value = value.downcast::<V>()?;
            set(target, *value);
            Ok(())
        });

        self.fields.retain(|slot| slot.descriptor.name() != name);
        self.fields.push(FieldSlot {
            descriptor: FieldDescriptor::of::<V>(name),
            assign,
        });
        self
    }

    /// Registers a parameterized constructor.
    ///
    /// `parameters` names the arguments in order; their types come from the
    /// argument tuple `A`, and the compiler checks that both have length `N`.
    pub fn constructor<A, const N: usize>(
        mut self,
        parameters: [&'static str; N],
        construct: impl Fn(A) -> T + Send + Sync + 'static,
    ) -> Self
    where
        A: ArgList<N>,
    {
        let parameters = parameters
            .into_iter()
            .zip(A::types())
            .map(|(name, declared_type)| FieldDescriptor::new(name, declared_type))
            .collect();

        self.constructors.push(Constructor {
            parameters,
            invoke: Box::new(move |arguments| A::from_values(arguments).map(&construct)),
        });
        self
    }

    #[inline]
    pub fn zero_argument_constructor(&self) -> Option<fn() -> T> {
        self.default_constructor
    }

    /// Finds the setter for `name` (exact, case-sensitive match).
    pub fn field_slot(&self, name: &str) -> Option<&FieldSlot<T>> {
        self.fields.iter().find(|slot| slot.descriptor.name() == name)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|slot| slot.descriptor.name()).collect()
    }

    pub fn constructors(&self) -> &[Constructor<T>] {
        &self.constructors
    }
}

impl<T: 'static> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("target", &TypeTag::of::<T>().short_name())
            .field("default_constructor", &self.default_constructor.is_some())
            .field(
                "fields",
                &self.fields.iter().map(|s| &s.descriptor).collect::<Vec<_>>(),
            )
            .field("constructors", &self.constructors.len())
            .finish()
    }
}

/// An argument tuple of arity `N` for [`Schema::constructor`].
pub trait ArgList<const N: usize>: Sized + 'static {
    /// Declared types of the arguments, in order.
    fn types() -> [TypeTag; N];

    /// Downcasts positional values into the tuple.
    ///
    /// Fails with the index of the first value of the wrong type, or with
    /// `N` when there are fewer than `N` values.
    fn from_values(values: Vec<Box<dyn Any>>) -> Result<Self, usize>;
}

macro_rules! impl_arg_list {
    ($n:literal => $($ty:ident),+) => {
        impl<$($ty: 'static),+> ArgList<$n> for ($($ty,)+) {
            fn types() -> [TypeTag; $n] {
                [$(TypeTag::of::<$ty>()),+]
            }

            fn from_values(values: Vec<Box<dyn Any>>) -> Result<Self, usize> {
                let mut values = values.into_iter().enumerate();
                Ok(($(
                    {
                        let (index, value) = values.next().ok_or::<usize>($n)?;
                        *value.downcast::<$ty>().map_err(|_| index)?
                    },
                )+))
            }
        }
    };
}

impl_arg_list!(1 => A);
impl_arg_list!(2 => A, B);
impl_arg_list!(3 => A, B, C);
impl_arg_list!(4 => A, B, C, D);
impl_arg_list!(5 => A, B, C, D, E);
impl_arg_list!(6 => A, B, C, D, E, F);
impl_arg_list!(7 => A, B, C, D, E, F, G);
impl_arg_list!(8 => A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Person {
        first_name: String,
        age: u32,
    }

    struct House {
        color: String,
        square_foot: u32,
    }

    fn person_schema() -> Schema<Person> {
        Schema::new()
            .default_constructor(Person::default)
            .field("first_name", |p: &mut Person, v: String| p.first_name = v)
            .field("age", |p: &mut Person, v: u32| p.age = v)
    }

    #[test]
    fn field_lookup_is_exact() {
        let schema = person_schema();
        assert!(schema.field_slot("first_name").is_some());
        assert!(schema.field_slot("First_Name").is_none());
        assert!(schema.field_slot("foo").is_none());
    }

    #[test]
    fn slot_carries_declared_type() {
        let schema = person_schema();
        let slot = schema.field_slot("age").unwrap();
        assert_eq!(slot.descriptor().declared_type(), TypeTag::of::<u32>());
    }

    #[test]
    fn assign_typed_value() {
        let schema = person_schema();
        let mut person = (schema.zero_argument_constructor().unwrap())();

        schema
            .field_slot("first_name")
            .unwrap()
            .assign(&mut person, Box::new(String::from("James")))
            .unwrap();

        assert_eq!(person.first_name, "James");
    }

    #[test]
    fn assign_wrong_type_hands_value_back() {
        let schema = person_schema();
        let mut person = Person::default();

        let rejected = schema
            .field_slot("age")
            .unwrap()
            .assign(&mut person, Box::new("forty"))
            .unwrap_err();

        assert_eq!(*rejected.downcast::<&str>().unwrap(), "forty");
        assert_eq!(person.age, 0);
    }

    #[test]
    fn later_setter_replaces_earlier() {
        let schema = person_schema().field("age", |p: &mut Person, v: u64| p.age = v as u32);
        assert_eq!(schema.field_names(), vec!["first_name", "age"]);
        assert_eq!(
            schema.field_slot("age").unwrap().descriptor().declared_type(),
            TypeTag::of::<u64>()
        );
    }

    #[test]
    fn constructor_records_parameters() {
        let schema: Schema<House> = Schema::new().constructor(
            ["color", "square_foot"],
            |(color, square_foot): (String, u32)| House { color, square_foot },
        );

        let ctor = &schema.constructors()[0];
        assert_eq!(ctor.parameter_names(), vec!["color", "square_foot"]);
        assert_eq!(ctor.parameters()[1].declared_type(), TypeTag::of::<u32>());
    }

    #[test]
    fn constructor_invokes_positionally() {
        let schema: Schema<House> = Schema::new().constructor(
            ["color", "square_foot"],
            |(color, square_foot): (String, u32)| House { color, square_foot },
        );

        let house = schema.constructors()[0]
            .invoke(vec![Box::new(String::from("Red")), Box::new(3000u32)])
            .unwrap();

        assert_eq!(house.color, "Red");
        assert_eq!(house.square_foot, 3000);
    }

    #[test]
    fn constructor_reports_bad_argument_index() {
        let schema: Schema<House> = Schema::new().constructor(
            ["color", "square_foot"],
            |(color, square_foot): (String, u32)| House { color, square_foot },
        );

        let result = schema.constructors()[0].invoke(vec![Box::new(String::from("Red")), Box::new("big")]);
        assert_eq!(result.err(), Some(1));
    }

    #[test]
    fn constructor_reports_missing_argument() {
        let types = <(String, u32) as ArgList<2>>::types();
        assert_eq!(types, [TypeTag::of::<String>(), TypeTag::of::<u32>()]);

        let result = <(String, u32) as ArgList<2>>::from_values(vec![Box::new(String::new())]);
        assert_eq!(result.err(), Some(2));
    }

    #[test]
    fn single_argument_tuple() {
        let value = <(u8,) as ArgList<1>>::from_values(vec![Box::new(7u8)]).unwrap();
        assert_eq!(value, (7,));
    }

    #[test]
    fn eight_argument_tuple() {
        let values: Vec<Box<dyn Any>> = (1..=8u8).map(|n| Box::new(n) as Box<dyn Any>).collect();
        let tuple = <(u8, u8, u8, u8, u8, u8, u8, u8) as ArgList<8>>::from_values(values).unwrap();
        assert_eq!(tuple, (1, 2, 3, 4, 5, 6, 7, 8));

        let short: Vec<Box<dyn Any>> = vec![Box::new(1u8)];
        assert_eq!(
            <(u8, u8, u8, u8, u8, u8, u8, u8) as ArgList<8>>::from_values(short).unwrap_err(),
            8
        );
    }

    #[test]
    fn debug_summarizes() {
        let debug = format!("{:?}", person_schema());
        assert!(debug.contains("Person"));
        assert!(debug.contains("first_name"));
    }
}
