use crate::array::{fill, Array, ArrayInterface, Iter, Storage};
use crate::error::CollectionError;
use crate::map::{write_entry, MapInterface};
use crate::types::{ensure_type, TypeDescriptor};
use crate::value::{Key, Value};

/// A map whose keys and values both carry a declared type.
pub trait TypedMapInterface: MapInterface {
    /// The type every key must satisfy
    fn key_type(&self) -> &TypeDescriptor;

    /// The type every value must satisfy
    fn value_type(&self) -> &TypeDescriptor;
}

/// A map that checks every key and value against declared types
///
/// Keys are checked as given, before enum-like keys are normalized to their
/// case name.
///
/// # Examples
///
/// ```
/// use sovran_collections::{MapInterface, TypedMap, CollectionError};
///
/// let mut ages = TypedMap::new("string", "int");
/// ages.put("alice", 31)?;
///
/// match ages.put("bob", "thirty") {
///     Err(CollectionError::InvalidArgument(msg)) => {
///         assert_eq!(msg, "Value must be of type int; value is thirty");
///     }
///     other => panic!("unexpected: {:?}", other),
/// }
///
/// assert!(ages.put(7, 31).is_err());
/// # Ok::<(), CollectionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TypedMap {
    key_type: TypeDescriptor,
    value_type: TypeDescriptor,
    data: Array,
}

impl TypedMap {
    /// Creates an empty map with the given key and value types
    pub fn new(key_type: impl Into<TypeDescriptor>, value_type: impl Into<TypeDescriptor>) -> Self {
        Self {
            key_type: key_type.into(),
            value_type: value_type.into(),
            data: Array::new(),
        }
    }

    /// Creates a map from existing data, checking every entry
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` naming the first key or value
    /// with the wrong type.
    pub fn from_array(
        key_type: impl Into<TypeDescriptor>,
        value_type: impl Into<TypeDescriptor>,
        data: Array,
    ) -> Result<Self, CollectionError> {
        let mut map = Self::new(key_type, value_type);
        fill(&mut map, data)?;
        Ok(map)
    }

    /// Creates a map from key/value pairs, checking every entry
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` naming the first key or value
    /// with the wrong type.
    pub fn from_pairs<K, V, I>(
        key_type: impl Into<TypeDescriptor>,
        value_type: impl Into<TypeDescriptor>,
        pairs: I,
    ) -> Result<Self, CollectionError>
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new(key_type, value_type);
        for (key, value) in pairs {
            map.offset_set(Some(key.into()), value.into())?;
        }
        Ok(map)
    }
}

impl Storage for TypedMap {
    fn storage(&self) -> &Array {
        &self.data
    }

    fn storage_mut(&mut self) -> &mut Array {
        &mut self.data
    }
}

impl ArrayInterface for TypedMap {
    fn offset_set(&mut self, offset: Option<Value>, value: Value) -> Result<(), CollectionError> {
        let raw_key = offset.clone().unwrap_or_default();
        ensure_type(&self.key_type, &raw_key, "Key")?;
        ensure_type(&self.value_type, &value, "Value")?;
        write_entry(&mut self.data, offset, value)
    }
}

impl MapInterface for TypedMap {}

impl TypedMapInterface for TypedMap {
    fn key_type(&self) -> &TypeDescriptor {
        &self.key_type
    }

    fn value_type(&self) -> &TypeDescriptor {
        &self.value_type
    }
}

impl<'a> IntoIterator for &'a TypedMap {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
