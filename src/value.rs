use std::any::Any;

use thiserror::Error;

/// A dynamically typed argument value.
///
/// Conversion functions produce an `ArgValue`; retrieval goes through the
/// checked downcast [`ArgValue::get`], which yields `None` on a type mismatch.
pub struct ArgValue(Box<dyn Any + Send + Sync>);

impl ArgValue {
    /// Wrap a value of any sendable type.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Borrow the value as `T`, or `None` if the stored type is not `T`.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ArgValue(..)")
    }
}

/// The error when a matched token (or token slice) fails its type conversion.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot convert '{token}' to {type_name}.")]
pub struct ConversionError {
    /// The offending input token.
    pub token: String,
    /// The name of the conversion target type.
    pub type_name: &'static str,
}
