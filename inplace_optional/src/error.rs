use std::{
    any,
    error,
    fmt::{self, Display},
};

/// Returned by the checked accessors of an [`Optional`](crate::Optional)
/// when it holds no value.
///
/// # Example
///
/// ```
/// use inplace_optional::Optional;
///
/// let opt = Optional::<u8>::new();
/// let err = opt.value().unwrap_err();
/// assert_eq!(err.type_name(), "u8");
///
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EmptyOptionalError {
    type_name: &'static str,
}

impl EmptyOptionalError {
    pub(crate) fn new<T>() -> Self {
        Self {
            type_name: any::type_name::<T>(),
        }
    }

    /// The name of the type the `Optional` would hold.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl Display for EmptyOptionalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attempted to access the value of an empty Optional<{}>",
            self.type_name,
        )
    }
}

impl error::Error for EmptyOptionalError {}
