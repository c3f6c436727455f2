use crate::array::{fill, Array, ArrayInterface, Iter, Storage};
use crate::error::CollectionError;
use crate::value::{Key, Value};
use tracing::debug;

/// Converts a map key, replacing enum-like objects with their case name.
pub(crate) fn normalize_key(key: &Value) -> Result<Key, CollectionError> {
    if let Value::Object(object) = key {
        if let Some(name) = object.as_object().enum_name() {
            return Ok(Key::from_str_key(name));
        }
    }
    Key::from_value(key)
}

/// The write path shared by all maps: a key is mandatory.
pub(crate) fn write_entry(
    data: &mut Array,
    offset: Option<Value>,
    value: Value,
) -> Result<(), CollectionError> {
    let Some(key) = offset else {
        debug!(value = %value, "map write without a key");
        return Err(CollectionError::InvalidArgument(format!(
            "Map elements are key/value pairs; a key must be provided for value {}",
            value
        )));
    };

    data.set(normalize_key(&key)?, value);
    Ok(())
}

/// Key/value operations shared by every map.
///
/// Keys are given as values so enum-like objects can be used directly; they
/// are stored under their case name. A key holding `null` reads as absent for
/// `get`, `put_if_absent`, `remove_if` and `replace_if`, but still counts for
/// `contains_key`.
pub trait MapInterface: ArrayInterface {
    /// Returns true if `key` is present, even when it holds `null`
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the key cannot be used as a key.
    fn contains_key(&self, key: impl Into<Value>) -> Result<bool, CollectionError>
    where
        Self: Sized,
    {
        Ok(self.storage().contains_key(&normalize_key(&key.into())?))
    }

    /// Returns true if some key holds a value strictly equal to `value`
    fn contains_value(&self, value: &Value) -> bool {
        self.storage().values().any(|v| v.strict_eq(value))
    }

    /// All keys in insertion order
    fn keys(&self) -> Vec<Key> {
        self.storage().keys().cloned().collect()
    }

    /// The non-null value stored at `key`
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the key cannot be used as a key.
    fn get(&self, key: impl Into<Value>) -> Result<Option<&Value>, CollectionError>
    where
        Self: Sized,
    {
        let key = normalize_key(&key.into())?;
        Ok(self.storage().get(&key).filter(|v| !v.is_null()))
    }

    /// The non-null value stored at `key`, or `default`
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the key cannot be used as a key.
    fn get_or(&self, key: impl Into<Value>, default: impl Into<Value>) -> Result<Value, CollectionError>
    where
        Self: Sized,
    {
        Ok(self.get(key)?.cloned().unwrap_or_else(|| default.into()))
    }

    /// Stores `value` at `key` and returns the previous value
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the map rejects the key or value.
    fn put(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<Option<Value>, CollectionError>
    where
        Self: Sized,
    {
        let key = key.into();
        let previous = self.get(key.clone())?.cloned();
        self.offset_set(Some(key), value.into())?;
        Ok(previous)
    }

    /// Stores `value` only if `key` is absent or null; returns the current value
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the map rejects the key or value.
    fn put_if_absent(
        &mut self,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, CollectionError>
    where
        Self: Sized,
    {
        let key = key.into();
        let current = self.get(key.clone())?.cloned();
        if current.is_none() {
            self.offset_set(Some(key), value.into())?;
        }
        Ok(current)
    }

    /// Removes `key` and returns the value it held
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the key cannot be used as a key.
    fn remove(&mut self, key: impl Into<Value>) -> Result<Option<Value>, CollectionError>
    where
        Self: Sized,
    {
        let key = normalize_key(&key.into())?;
        let previous = self.storage().get(&key).filter(|v| !v.is_null()).cloned();
        self.offset_unset(&key);
        Ok(previous)
    }

    /// Removes `key` only if it currently holds `value` (strictly equal)
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the key cannot be used as a key.
    fn remove_if(&mut self, key: impl Into<Value>, value: &Value) -> Result<bool, CollectionError>
    where
        Self: Sized,
    {
        let key = normalize_key(&key.into())?;
        let current = self.storage().get(&key).cloned().unwrap_or_default();
        if current.strict_eq(value) {
            self.offset_unset(&key);
            return Ok(true);
        }
        Ok(false)
    }

    /// Replaces the value at `key` only if the key exists; returns the
    /// previous value
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the map rejects the key or value.
    fn replace(
        &mut self,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, CollectionError>
    where
        Self: Sized,
    {
        let key = key.into();
        let current = self.get(key.clone())?.cloned();
        if self.contains_key(key.clone())? {
            self.offset_set(Some(key), value.into())?;
        }
        Ok(current)
    }

    /// Replaces the value at `key` only if it currently holds `old`
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the map rejects the key or value.
    fn replace_if(
        &mut self,
        key: impl Into<Value>,
        old: &Value,
        new: impl Into<Value>,
    ) -> Result<bool, CollectionError>
    where
        Self: Sized,
    {
        let key = key.into();
        let current = self.get(key.clone())?.cloned().unwrap_or_default();
        if current.strict_eq(old) {
            self.offset_set(Some(key), new.into())?;
            return Ok(true);
        }
        Ok(false)
    }
}

/// A plain associative array with no type constraints.
///
/// # Examples
///
/// ```
/// use sovran_collections::{AssociativeArrayMap, MapInterface};
///
/// let mut map = AssociativeArrayMap::new();
/// assert!(map.put("answer", 41)?.is_none());
/// let previous = map.put("answer", 42)?;
/// assert_eq!(previous.and_then(|v| v.as_int()), Some(41));
/// # Ok::<(), sovran_collections::CollectionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssociativeArrayMap {
    data: Array,
}

impl AssociativeArrayMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map holding the entries of `data`
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if `data` has an integer-keyed
    /// entry that cannot be stored.
    pub fn from_array(data: Array) -> Result<Self, CollectionError> {
        let mut map = Self::new();
        fill(&mut map, data)?;
        Ok(map)
    }

    /// Builds a map from key/value pairs
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if a key cannot be used as a key.
    pub fn from_pairs<K, V, I>(pairs: I) -> Result<Self, CollectionError>
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.offset_set(Some(key.into()), value.into())?;
        }
        Ok(map)
    }
}

impl Storage for AssociativeArrayMap {
    fn storage(&self) -> &Array {
        &self.data
    }

    fn storage_mut(&mut self) -> &mut Array {
        &mut self.data
    }
}

impl ArrayInterface for AssociativeArrayMap {
    fn offset_set(&mut self, offset: Option<Value>, value: Value) -> Result<(), CollectionError> {
        write_entry(&mut self.data, offset, value)
    }
}

impl MapInterface for AssociativeArrayMap {}

impl<'a> IntoIterator for &'a AssociativeArrayMap {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
