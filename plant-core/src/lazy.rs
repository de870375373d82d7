//! Deferred field values.
//!
//! A [`LazyValue`] wraps a zero-argument computation and a [`Sequence`]
//! wraps a computation over the creation index. Neither runs when a
//! blueprint is registered; both run each time their field is assigned.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::field::TypeTag;

type LazyFn = Arc<dyn Fn() -> Box<dyn Any> + Send + Sync>;
type SequenceFn = Arc<dyn Fn(usize) -> Box<dyn Any> + Send + Sync>;

/// A value computed at assignment time.
///
/// The result is never cached, so a stateful computation can yield a
/// different value for every `create` call.
///
/// # Examples
/// ```
/// use plant_core::lazy::LazyValue;
/// use plant_core::field::TypeTag;
///
/// let lazy = LazyValue::new(|| String::from("Johnny"));
/// assert_eq!(lazy.return_type(), TypeTag::of::<String>());
///
/// let value = lazy.evaluate().downcast::<String>().unwrap();
/// assert_eq!(*value, "Johnny");
/// ```
#[derive(Clone)]
pub struct LazyValue {
    compute: LazyFn,
    returns: TypeTag,
}

impl LazyValue {
    pub fn new<T: 'static>(compute: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            compute: Arc::new(move || Box::new(compute()) as Box<dyn Any>),
            returns: TypeTag::of::<T>(),
        }
    }

    /// The declared return type of the computation.
    #[inline]
    pub fn return_type(&self) -> TypeTag {
        self.returns
    }

    /// Runs the computation.
    pub fn evaluate(&self) -> Box<dyn Any> {
        (self.compute)()
    }
}

impl fmt::Debug for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LazyValue(<{}>)", self.returns.short_name())
    }
}

/// A value computed from the creation index of its blueprint.
///
/// The index starts at 0 for the first instance a plant creates of a type.
///
/// # Examples
/// ```
/// use plant_core::lazy::Sequence;
///
/// let email = Sequence::new(|n| format!("user{n}@example.com"));
/// let value = email.evaluate(3).downcast::<String>().unwrap();
/// assert_eq!(*value, "user3@example.com");
/// ```
#[derive(Clone)]
pub struct Sequence {
    compute: SequenceFn,
    returns: TypeTag,
}

impl Sequence {
    pub fn new<T: 'static>(compute: impl Fn(usize) -> T + Send + Sync + 'static) -> Self {
        Self {
            compute: Arc::new(move |index| Box::new(compute(index)) as Box<dyn Any>),
            returns: TypeTag::of::<T>(),
        }
    }

    #[inline]
    pub fn return_type(&self) -> TypeTag {
        self.returns
    }

    pub fn evaluate(&self, index: usize) -> Box<dyn Any> {
        (self.compute)(index)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence(<{}>)", self.returns.short_name())
    }
}
