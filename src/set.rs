use crate::array::{fill, Array, ArrayInterface, Iter, Storage};
use crate::collection::CollectionInterface;
use crate::error::CollectionError;
use crate::types::{ensure_type, TypeDescriptor};
use crate::value::{Key, Value};
use tracing::trace;

/// A collection that holds each element at most once.
///
/// Adding an element that is already present (by strict equality) is not an
/// error: `add` returns `false` and nothing is written.
///
/// # Examples
///
/// ```
/// use sovran_collections::{ArrayInterface, CollectionInterface, Set};
///
/// let mut tags = Set::new("string");
/// assert!(tags.add("rust")?);
/// assert!(!tags.add("rust")?);
/// assert_eq!(tags.count(), 1);
/// # Ok::<(), sovran_collections::CollectionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Set {
    set_type: TypeDescriptor,
    data: Array,
}

impl Set {
    /// Creates an empty set of the given element type
    pub fn new(set_type: impl Into<TypeDescriptor>) -> Self {
        Self {
            set_type: set_type.into(),
            data: Array::new(),
        }
    }

    /// Creates a set from existing data, dropping duplicates
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if any element has the wrong type.
    pub fn from_array(set_type: impl Into<TypeDescriptor>, data: Array) -> Result<Self, CollectionError> {
        let mut set = Self::new(set_type);
        fill(&mut set, data)?;
        Ok(set)
    }

    /// Creates a set from a list of values, dropping duplicates
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if any element has the wrong type.
    pub fn from_values<V, I>(set_type: impl Into<TypeDescriptor>, values: I) -> Result<Self, CollectionError>
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Self::from_array(set_type, Array::from_values(values))
    }
}

impl Storage for Set {
    fn storage(&self) -> &Array {
        &self.data
    }

    fn storage_mut(&mut self) -> &mut Array {
        &mut self.data
    }
}

impl ArrayInterface for Set {
    fn offset_set(&mut self, offset: Option<Value>, value: Value) -> Result<(), CollectionError> {
        if self.contains(&value, true) {
            trace!(value = %value, "set already holds value; skipping write");
            return Ok(());
        }

        ensure_type(&self.set_type, &value, "Value")?;
        match offset {
            None => {
                self.data.push(value)?;
            }
            Some(key) => self.data.set(Key::from_value(&key)?, value),
        }
        Ok(())
    }
}

impl CollectionInterface for Set {
    fn collection_type(&self) -> &TypeDescriptor {
        &self.set_type
    }

    fn kind(&self) -> &'static str {
        "Set"
    }

    fn derive(&self, data: Array) -> Self {
        Self {
            set_type: self.set_type.clone(),
            data,
        }
    }

    fn add(&mut self, element: impl Into<Value>) -> Result<bool, CollectionError>
    where
        Self: Sized,
    {
        let element = element.into();
        if self.contains(&element, true) {
            return Ok(false);
        }
        self.offset_set(None, element)?;
        Ok(true)
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
