//! The variant value stored against each field of a blueprint.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::field::TypeTag;
use crate::lazy::{LazyValue, Sequence};

/// A stored literal, cloned out once per `create`.
///
/// Sealed: only [`FieldValue::literal`] creates one.
pub trait LiteralValue: Send + Sync + private::Sealed {
    fn value_type(&self) -> TypeTag;
    fn render(&self) -> String;
    #[doc(hidden)]
    fn clone_value(&self) -> Box<dyn Any>;
}

mod private {
    pub trait Sealed {}
}

struct LiteralCell<T>(T);

impl<T> private::Sealed for LiteralCell<T> {}

impl<T> LiteralValue for LiteralCell<T>
where
    T: Clone + fmt::Debug + Send + Sync + 'static,
{
    fn value_type(&self) -> TypeTag {
        TypeTag::of::<T>()
    }

    fn render(&self) -> String {
        format!("{:?}", self.0)
    }

    fn clone_value(&self) -> Box<dyn Any> {
        Box::new(self.0.clone())
    }
}

/// A field value: a literal, a [`LazyValue`] or a [`Sequence`].
#[derive(Clone)]
pub enum FieldValue {
    Literal(Arc<dyn LiteralValue>),
    Lazy(LazyValue),
    Sequence(Sequence),
}

impl FieldValue {
    pub fn literal<T: Clone + fmt::Debug + Send + Sync + 'static>(value: T) -> Self {
        Self::Literal(Arc::new(LiteralCell(value)))
    }

    pub fn lazy<T: 'static>(compute: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self::Lazy(LazyValue::new(compute))
    }

    pub fn sequence<T: 'static>(compute: impl Fn(usize) -> T + Send + Sync + 'static) -> Self {
        Self::Sequence(Sequence::new(compute))
    }

    /// The type this value produces when resolved.
    pub fn value_type(&self) -> TypeTag {
        match self {
            Self::Literal(literal) => literal.value_type(),
            Self::Lazy(lazy) => lazy.return_type(),
            Self::Sequence(sequence) => sequence.return_type(),
        }
    }

    /// Returns `true` for values computed at assignment time.
    #[inline]
    pub fn is_deferred(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }

    /// Produces the concrete value: a clone of a literal, or a fresh
    /// evaluation of a deferred computation.
    pub fn resolve(&self, index: usize) -> Box<dyn Any> {
        match self {
            Self::Literal(literal) => literal.clone_value(),
            Self::Lazy(lazy) => lazy.evaluate(),
            Self::Sequence(sequence) => sequence.evaluate(index),
        }
    }

    /// Renders the value for error messages without evaluating it.
    pub fn describe(&self) -> String {
        match self {
            Self::Literal(literal) => literal.render(),
            Self::Lazy(lazy) => format!("<lazy {}>", lazy.return_type().short_name()),
            Self::Sequence(sequence) => {
                format!("<sequence {}>", sequence.return_type().short_name())
            }
        }
    }
}

impl From<LazyValue> for FieldValue {
    fn from(lazy: LazyValue) -> Self {
        Self::Lazy(lazy)
    }
}

impl From<Sequence> for FieldValue {
    fn from(sequence: Sequence) -> Self {
        Self::Sequence(sequence)
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldValue({})", self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn literal_resolves_to_a_clone() {
        let value = FieldValue::literal(String::from("Barbara"));
        let a = value.resolve(0).downcast::<String>().unwrap();
        let b = value.resolve(1).downcast::<String>().unwrap();
        assert_eq!(*a, "Barbara");
        assert_eq!(*b, "Barbara");
    }

    #[test]
    fn value_types() {
        assert_eq!(FieldValue::literal(3i32).value_type(), TypeTag::of::<i32>());
        assert_eq!(
            FieldValue::lazy(|| String::new()).value_type(),
            TypeTag::of::<String>()
        );
        assert_eq!(
            FieldValue::sequence(|n| n).value_type(),
            TypeTag::of::<usize>()
        );
    }

    #[test]
    fn deferred_flags() {
        assert!(!FieldValue::literal(1u8).is_deferred());
        assert!(FieldValue::lazy(|| 1u8).is_deferred());
        assert!(FieldValue::sequence(|n| n).is_deferred());
    }

    #[test]
    fn describe_does_not_evaluate() {
        let calls = Arc::new(AtomicU32::new(0));
        let value = FieldValue::lazy({
            let calls = calls.clone();
            move || calls.fetch_add(1, Ordering::SeqCst)
        });

        assert_eq!(value.describe(), "<lazy u32>");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn describe_literal_uses_debug() {
        assert_eq!(FieldValue::literal("Nothing").describe(), "\"Nothing\"");
        assert_eq!(FieldValue::sequence(|n| n as i64).describe(), "<sequence i64>");
    }

    #[test]
    fn sequence_resolves_with_index() {
        let value = FieldValue::sequence(|n| format!("user{n}"));
        assert_eq!(*value.resolve(7).downcast::<String>().unwrap(), "user7");
    }

    #[test]
    fn deferred_values_convert_into_field_values() {
        let lazy: FieldValue = LazyValue::new(|| 5u8).into();
        let sequence: FieldValue = Sequence::new(|n| n * 2).into();

        assert!(matches!(lazy, FieldValue::Lazy(_)));
        assert!(matches!(sequence, FieldValue::Sequence(_)));
        assert_eq!(sequence.value_type(), TypeTag::of::<usize>());
        assert_eq!(*sequence.resolve(3).downcast::<usize>().unwrap(), 6);
    }
}
