use thiserror::Error;

/// Errors that can occur when using the containers in this crate
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A value or key failed its declared type, or a required key was missing
    #[error("{0}")]
    InvalidArgument(String),
    /// A read that must succeed was attempted on an empty container
    #[error("{0}")]
    NoSuchElement(String),
    /// Two collections of a different kind or element type were combined
    #[error("{0}")]
    CollectionMismatch(String),
    /// A member accessor was used on elements that have no members
    #[error("{0}")]
    UnsupportedOperation(String),
    /// A member accessor named a key, property or method the element lacks
    #[error("{0}")]
    InvalidPropertyOrMethod(String),
}

impl CollectionError {
    /// Check if this error is a rejected value, key or missing key
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CollectionError::InvalidArgument(_))
    }

    /// Check if this error comes from reading an empty container
    pub fn is_no_such_element(&self) -> bool {
        matches!(self, CollectionError::NoSuchElement(_))
    }

    /// Check if this error comes from combining incompatible collections
    pub fn is_mismatch(&self) -> bool {
        matches!(self, CollectionError::CollectionMismatch(_))
    }

    /// Check if this error was raised while extracting a member from an element
    pub fn is_extraction_error(&self) -> bool {
        matches!(
            self,
            CollectionError::UnsupportedOperation(_) | CollectionError::InvalidPropertyOrMethod(_)
        )
    }
}
