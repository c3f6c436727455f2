use crate::error::CollectionError;
use crate::value::{Key, Value};
use std::cmp::Ordering;
use std::collections::{btree_map, BTreeMap, HashMap};
use std::fmt;

/// An insertion-ordered key/value store, the backing storage of every container.
///
/// Keys are unique. Overwriting a key keeps its position; new keys go to the
/// end. `push` appends under the next free integer key, which is one past the
/// largest integer key inserted so far. Once `i64::MAX` is used there is no
/// next free key and `push` fails.
///
/// # Examples
///
/// ```
/// use sovran_collections::{Array, Key, Value};
///
/// let mut array = Array::new();
/// array.set(Key::from("name"), Value::from("Ada"));
/// array.push(Value::from(1))?;
/// array.push(Value::from(2))?;
///
/// let keys: Vec<String> = array.keys().map(|k| k.to_string()).collect();
/// assert_eq!(keys, vec!["name", "0", "1"]);
/// # Ok::<(), sovran_collections::CollectionError>(())
/// ```
#[derive(Clone, Default)]
pub struct Array {
    slots: BTreeMap<u64, (Key, Value)>,
    positions: HashMap<Key, u64>,
    next_slot: u64,
    next_index: i64,
    // Set once i64::MAX is in use; `next_index` is meaningless while true
    exhausted: bool,
}

impl Array {
    /// Creates a new, empty array
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from values, keyed 0..n
    pub fn from_values<V, I>(values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        values.into_iter().map(Into::into).collect()
    }

    /// Builds an array from key/value pairs, later keys overwriting earlier ones
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the array holds no entries
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The value stored at `key`, if any
    pub fn get(&self, key: &Key) -> Option<&Value> {
        let slot = self.positions.get(key)?;
        self.slots.get(slot).map(|(_, v)| v)
    }

    /// Mutable access to the value stored at `key`
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        let slot = self.positions.get(key)?;
        self.slots.get_mut(slot).map(|(_, v)| v)
    }

    /// Returns true if `key` is present, whatever its value
    pub fn contains_key(&self, key: &Key) -> bool {
        self.positions.contains_key(key)
    }

    /// Stores `value` at `key`, keeping the position of an existing key
    pub fn set(&mut self, key: Key, value: Value) {
        if let Some(slot) = self.positions.get(&key) {
            if let Some(entry) = self.slots.get_mut(slot) {
                entry.1 = value;
                return;
            }
        }

        if let Key::Int(i) = key {
            if !self.exhausted && i >= self.next_index {
                match i.checked_add(1) {
                    Some(next) => self.next_index = next,
                    None => self.exhausted = true,
                }
            }
        }

        let slot = self.next_slot;
        self.next_slot += 1;
        self.positions.insert(key.clone(), slot);
        self.slots.insert(slot, (key, value));
    }

    /// Appends `value` under the next free integer key and returns that key
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if `i64::MAX` is already in
    /// use. Nothing is written.
    pub fn push(&mut self, value: Value) -> Result<Key, CollectionError> {
        if self.exhausted {
            return Err(CollectionError::InvalidArgument(
                "Cannot add element to the array as the next element is already occupied"
                    .to_string(),
            ));
        }
        let key = Key::Int(self.next_index);
        self.set(key.clone(), value);
        Ok(key)
    }

    /// Removes `key`, returning its value. Integer keys are not renumbered.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        let slot = self.positions.remove(key)?;
        self.slots.remove(&slot).map(|(_, v)| v)
    }

    /// Removes everything and restarts integer keys at 0
    pub fn clear(&mut self) {
        self.slots.clear();
        self.positions.clear();
        self.next_slot = 0;
        self.next_index = 0;
        self.exhausted = false;
    }

    /// The oldest entry
    pub fn first(&self) -> Option<(&Key, &Value)> {
        self.slots.values().next().map(|(k, v)| (k, v))
    }

    /// The newest entry
    pub fn last(&self) -> Option<(&Key, &Value)> {
        self.slots.values().next_back().map(|(k, v)| (k, v))
    }

    /// Removes the oldest entry. The next free integer key is unchanged.
    pub fn pop_first(&mut self) -> Option<(Key, Value)> {
        let (_, (key, value)) = self.slots.pop_first()?;
        self.positions.remove(&key);
        Some((key, value))
    }

    /// Removes the last entry. If it held the highest integer key, that key
    /// is released so the next `push` reuses it.
    pub fn pop_last(&mut self) -> Option<(Key, Value)> {
        let (_, (key, value)) = self.slots.pop_last()?;
        self.positions.remove(&key);
        if let Key::Int(i) = key {
            if self.exhausted {
                if i == i64::MAX {
                    self.exhausted = false;
                    self.next_index = i;
                }
            } else if i == self.next_index - 1 {
                self.next_index = i;
            }
        }
        Some((key, value))
    }

    /// Prepends `value`, renumbering integer keys from 0 and keeping string keys
    pub fn unshift(&mut self, value: Value) {
        let rebuilt = renumbered(Some(value), self.iter());
        *self = rebuilt;
    }

    /// Appends every entry of `other`: integer-keyed values are pushed,
    /// string-keyed values overwrite
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if integer keys run out.
    /// Entries before the failing one stay merged.
    pub fn merge(&mut self, other: &Array) -> Result<(), CollectionError> {
        for (key, value) in other {
            match key {
                Key::Int(_) => {
                    self.push(value.clone())?;
                }
                Key::Str(_) => self.set(key.clone(), value.clone()),
            }
        }
        Ok(())
    }

    /// A copy with integer keys renumbered from 0 and string keys kept
    pub fn reindexed(&self) -> Array {
        renumbered(None, self.iter())
    }

    /// Up to `length` entries starting at position `offset`, with integer keys
    /// renumbered. `None` takes everything to the end.
    pub fn slice(&self, offset: usize, length: Option<usize>) -> Array {
        let taken = self.iter().skip(offset).take(length.unwrap_or(usize::MAX));
        renumbered(None, taken)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.slots.values(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Key> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Same pairs in the same order, values strictly equal
    pub fn strict_eq(&self, other: &Array) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va.strict_eq(vb))
    }

    /// Same keys, values loosely equal, order ignored
    pub fn loose_eq(&self, other: &Array) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| v.loose_eq(o)))
    }

    /// Total order used when sorting arrays: shorter arrays first, then the
    /// sorted key sets, then the values taken in key order.
    pub fn compare(&self, other: &Array) -> Ordering {
        let mine = self.sorted_entries();
        let theirs = other.sorted_entries();

        self.len()
            .cmp(&other.len())
            .then_with(|| mine.iter().map(|(k, _)| *k).cmp(theirs.iter().map(|(k, _)| *k)))
            .then_with(|| {
                mine.iter()
                    .zip(&theirs)
                    .map(|((_, a), (_, b))| a.compare(b))
                    .find(|o| *o != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            })
    }

    fn sorted_entries(&self) -> Vec<(&Key, &Value)> {
        let mut entries: Vec<(&Key, &Value)> = self.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }
}

/// Copies `entries` into a fresh array, numbering integer-keyed values from 0
/// (after `leading`, if given) and keeping string keys.
fn renumbered<'a, I>(leading: Option<Value>, entries: I) -> Array
where
    I: IntoIterator<Item = (&'a Key, &'a Value)>,
{
    let mut out = Array::new();
    let mut index: i64 = 0;
    if let Some(value) = leading {
        out.set(Key::Int(index), value);
        index += 1;
    }
    for (key, value) in entries {
        match key {
            Key::Int(_) => {
                out.set(Key::Int(index), value.clone());
                index += 1;
            }
            Key::Str(_) => out.set(key.clone(), value.clone()),
        }
    }
    out
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut array = Array::new();
        for (index, value) in (0_i64..).zip(iter) {
            array.set(Key::Int(index), value);
        }
        array
    }
}

impl FromIterator<(Key, Value)> for Array {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        let mut array = Array::new();
        for (key, value) in iter {
            array.set(key, value);
        }
        array
    }
}

/// Iterator over the entries of an [`Array`] in insertion order.
#[derive(Clone)]
pub struct Iter<'a> {
    inner: btree_map::Values<'a, u64, (Key, Value)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Array {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

mod sealed {
    use super::Array;

    pub trait Storage {
        fn storage(&self) -> &Array;
        fn storage_mut(&mut self) -> &mut Array;
    }
}

pub(crate) use sealed::Storage;

/// Array-style access shared by every container.
///
/// `offset_set` is the single write path: each container validates there
/// before anything reaches its store.
pub trait ArrayInterface: sealed::Storage {
    /// Writes `value` at `offset`, or appends it when `offset` is `None`
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the container rejects the
    /// key or value.
    fn offset_set(&mut self, offset: Option<Value>, value: Value) -> Result<(), CollectionError>;

    fn offset_get(&self, key: &Key) -> Option<&Value> {
        self.storage().get(key)
    }

    /// Returns true if `key` holds a non-null value
    fn offset_exists(&self, key: &Key) -> bool {
        self.storage().get(key).is_some_and(|v| !v.is_null())
    }

    fn offset_unset(&mut self, key: &Key) {
        self.storage_mut().remove(key);
    }

    /// Appends a value through `offset_set`
    fn push(&mut self, value: impl Into<Value>) -> Result<(), CollectionError>
    where
        Self: Sized,
    {
        self.offset_set(None, value.into())
    }

    /// Writes a value at a key through `offset_set`
    fn set(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<(), CollectionError>
    where
        Self: Sized,
    {
        self.offset_set(Some(key.into()), value.into())
    }

    fn clear(&mut self) {
        self.storage_mut().clear();
    }

    fn count(&self) -> usize {
        self.storage().len()
    }

    fn is_empty(&self) -> bool {
        self.storage().is_empty()
    }

    /// A copy of the backing store
    fn to_array(&self) -> Array {
        self.storage().clone()
    }

    fn iter(&self) -> Iter<'_> {
        self.storage().iter()
    }
}

/// Routes every initial entry through the container's own `offset_set`.
pub(crate) fn fill<C: ArrayInterface>(container: &mut C, data: Array) -> Result<(), CollectionError> {
    for (key, value) in &data {
        container.offset_set(Some(key.to_value()), value.clone())?;
    }
    Ok(())
}

/// An untyped array container with no constraints on keys or values.
///
/// # Examples
///
/// ```
/// use sovran_collections::{ArrayInterface, GenericArray, Key};
///
/// let mut array = GenericArray::new();
/// array.set("foo", "bar").unwrap();
/// array.push(123).unwrap();
///
/// assert_eq!(array.count(), 2);
/// assert_eq!(array.offset_get(&Key::Int(0)).and_then(|v| v.as_int()), Some(123));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GenericArray {
    data: Array,
}

impl GenericArray {
    /// Creates an empty array
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an array holding a copy of `data`
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if `data` cannot be appended.
    pub fn from_array(data: Array) -> Result<Self, CollectionError> {
        let mut array = Self::new();
        fill(&mut array, data)?;
        Ok(array)
    }
}

impl Storage for GenericArray {
    fn storage(&self) -> &Array {
        &self.data
    }

    fn storage_mut(&mut self) -> &mut Array {
        &mut self.data
    }
}

impl ArrayInterface for GenericArray {
    fn offset_set(&mut self, offset: Option<Value>, value: Value) -> Result<(), CollectionError> {
        match offset {
            None => {
                self.data.push(value)?;
            }
            Some(key) => self.data.set(Key::from_value(&key)?, value),
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a GenericArray {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(array: &Array) -> Vec<i64> {
        array.values().filter_map(Value::as_int).collect()
    }

    #[test]
    fn test_push_follows_largest_int_key() {
        let mut array = Array::new();
        array.set(Key::Int(5), Value::Int(1));
        array.set(Key::from("x"), Value::Int(2));
        assert_eq!(array.push(Value::Int(3)).unwrap(), Key::Int(6));

        array.remove(&Key::Int(6));
        assert_eq!(array.push(Value::Int(4)).unwrap(), Key::Int(7));
    }

    #[test]
    fn test_push_fails_once_int_keys_are_exhausted() {
        let mut array = Array::new();
        array.set(Key::Int(i64::MAX), Value::Int(1));

        let err = array.push(Value::Int(2)).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(array.len(), 1);
        assert_eq!(array.get(&Key::Int(i64::MAX)).and_then(Value::as_int), Some(1));

        // Releasing the top key makes it the next free one again
        array.pop_last();
        assert_eq!(array.push(Value::Int(3)).unwrap(), Key::Int(i64::MAX));

        array.clear();
        assert_eq!(array.push(Value::Int(4)).unwrap(), Key::Int(0));
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut array = Array::from_values([1, 2, 3]);
        array.set(Key::Int(0), Value::Int(9));
        assert_eq!(ints(&array), vec![9, 2, 3]);
    }

    #[test]
    fn test_pop_last_releases_key() {
        let mut array = Array::from_values([1, 2, 3]);
        let (key, value) = array.pop_last().unwrap();
        assert_eq!(key, Key::Int(2));
        assert_eq!(value.as_int(), Some(3));
        assert_eq!(array.push(Value::Int(4)).unwrap(), Key::Int(2));
    }

    #[test]
    fn test_pop_first_keeps_next_index() {
        let mut array = Array::from_values([1, 2]);
        array.pop_first();
        assert_eq!(array.push(Value::Int(3)).unwrap(), Key::Int(2));
        assert_eq!(ints(&array), vec![2, 3]);
    }

    #[test]
    fn test_unshift_renumbers_int_keys() {
        let mut array = Array::new();
        array.set(Key::Int(4), Value::Int(1));
        array.set(Key::from("k"), Value::Int(2));
        array.unshift(Value::Int(0));

        let keys: Vec<Key> = array.keys().cloned().collect();
        assert_eq!(keys, vec![Key::Int(0), Key::Int(1), Key::from("k")]);
    }

    #[test]
    fn test_merge_appends_ints_and_overwrites_strings() {
        let mut left = Array::from_pairs([("a", 1)]);
        left.push(Value::Int(2)).unwrap();
        let mut right = Array::from_pairs([("a", 10)]);
        right.push(Value::Int(3)).unwrap();

        left.merge(&right).unwrap();
        assert_eq!(ints(&left), vec![10, 2, 3]);
        assert_eq!(left.get(&Key::from("a")).and_then(Value::as_int), Some(10));
    }

    #[test]
    fn test_slice_clamps() {
        let array = Array::from_values([1, 2, 3]);
        assert_eq!(ints(&array.slice(1, Some(10))), vec![2, 3]);
        assert!(array.slice(5, Some(10)).is_empty());
        assert!(array.slice(0, Some(0)).is_empty());
        assert_eq!(ints(&array.slice(0, None)), vec![1, 2, 3]);
    }

    #[test]
    fn test_clear_restarts_keys() {
        let mut array = Array::from_values([1, 2]);
        array.clear();
        assert_eq!(array.push(Value::Int(1)).unwrap(), Key::Int(0));
    }

    #[test]
    fn test_strict_eq_is_order_sensitive() {
        let a = Array::from_pairs([("x", 1), ("y", 2)]);
        let b = Array::from_pairs([("y", 2), ("x", 1)]);
        assert!(!a.strict_eq(&b));
        assert!(a.loose_eq(&b));
    }

    #[test]
    fn test_generic_array_offset_exists_with_null() {
        let mut array = GenericArray::new();
        array.set("foo", Value::Null).unwrap();
        assert!(!array.offset_exists(&Key::from("foo")));
        assert!(array.offset_get(&Key::from("foo")).is_some());
    }
}
