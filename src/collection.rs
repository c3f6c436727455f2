use crate::array::{fill, Array, ArrayInterface, Iter, Storage};
use crate::error::CollectionError;
use crate::extract::extract_value;
use crate::sort::Sort;
use crate::types::{ensure_type, TypeDescriptor};
use crate::value::{Key, Value};
use std::cmp::Ordering;
use tracing::debug;

/// Element-level operations shared by [`Collection`] and [`Set`](crate::Set).
///
/// Derived results (`sort`, `filter`, `where_eq`, `diff`, `intersect`,
/// `merge`, `limit`) are new containers of the same kind and element type;
/// the receiver is never modified by them.
pub trait CollectionInterface: ArrayInterface {
    /// The declared element type
    fn collection_type(&self) -> &TypeDescriptor;

    /// The concrete container kind, compared by `diff`, `intersect` and `merge`
    fn kind(&self) -> &'static str;

    /// A container with this one's configuration holding `data` as-is
    fn derive(&self, data: Array) -> Self
    where
        Self: Sized;

    /// Appends an element after checking it against the element type.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the element has the wrong type.
    fn add(&mut self, element: impl Into<Value>) -> Result<bool, CollectionError>
    where
        Self: Sized,
    {
        self.offset_set(None, element.into())?;
        Ok(true)
    }

    /// Membership test with strict (kind and value) or loose equality
    fn contains(&self, element: &Value, strict: bool) -> bool {
        self.storage().values().any(|v| {
            if strict {
                v.strict_eq(element)
            } else {
                v.loose_eq(element)
            }
        })
    }

    /// Removes the first strictly-equal element. Other keys are left as they are.
    fn remove(&mut self, element: &Value) -> bool {
        let position = self
            .storage()
            .iter()
            .find(|(_, v)| v.strict_eq(element))
            .map(|(k, _)| k.clone());

        match position {
            Some(key) => {
                self.offset_unset(&key);
                true
            }
            None => false,
        }
    }

    /// The accessor's value for every element, in order
    ///
    /// # Errors
    ///
    /// Fails with `UnsupportedOperation` or `InvalidPropertyOrMethod` when the
    /// accessor cannot be resolved on an element.
    fn column(&self, accessor: &str) -> Result<Vec<Value>, CollectionError> {
        self.storage()
            .values()
            .map(|v| extract_value(v, Some(accessor), self.collection_type()))
            .collect()
    }

    /// # Errors
    ///
    /// Returns `CollectionError::NoSuchElement` if the collection is empty.
    fn first(&self) -> Result<&Value, CollectionError> {
        self.storage().first().map(|(_, v)| v).ok_or_else(|| {
            CollectionError::NoSuchElement(
                "Can't determine first item. Collection is empty".to_string(),
            )
        })
    }

    /// # Errors
    ///
    /// Returns `CollectionError::NoSuchElement` if the collection is empty.
    fn last(&self) -> Result<&Value, CollectionError> {
        self.storage().last().map(|(_, v)| v).ok_or_else(|| {
            CollectionError::NoSuchElement(
                "Can't determine last item. Collection is empty".to_string(),
            )
        })
    }

    /// Sorts by the accessor's value (or the element itself when `None`).
    ///
    /// The sort is stable. Elements are renumbered from 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_collections::{ArrayInterface, Collection, CollectionInterface, Sort};
    ///
    /// let numbers = Collection::from_values("int", [3, 1, 2])?;
    /// let sorted = numbers.sort(None, Sort::Descending)?;
    ///
    /// let values: Vec<i64> = sorted.iter().filter_map(|(_, v)| v.as_int()).collect();
    /// assert_eq!(values, vec![3, 2, 1]);
    /// # Ok::<(), sovran_collections::CollectionError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Fails with `UnsupportedOperation` or `InvalidPropertyOrMethod` when the
    /// accessor cannot be resolved on an element.
    fn sort(&self, accessor: Option<&str>, order: Sort) -> Result<Self, CollectionError>
    where
        Self: Sized,
    {
        let ty = self.collection_type();
        let mut keyed = self
            .storage()
            .values()
            .map(|v| Ok((extract_value(v, accessor, ty)?, v.clone())))
            .collect::<Result<Vec<(Value, Value)>, CollectionError>>()?;

        keyed.sort_by(|(a, _), (b, _)| match order {
            Sort::Ascending => a.compare(b),
            Sort::Descending => b.compare(a),
        });

        Ok(self.derive(keyed.into_iter().map(|(_, v)| v).collect()))
    }

    /// Elements for which `predicate` returns true, in order
    fn filter<F>(&self, mut predicate: F) -> Self
    where
        Self: Sized,
        F: FnMut(&Value) -> bool,
    {
        let kept: Array = self
            .storage()
            .iter()
            .filter(|(_, v)| predicate(*v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self.derive(kept.reindexed())
    }

    /// Elements whose accessor value is strictly equal to `value`
    ///
    /// # Errors
    ///
    /// Fails with `UnsupportedOperation` or `InvalidPropertyOrMethod` when the
    /// accessor cannot be resolved on an element.
    fn where_eq(&self, accessor: Option<&str>, value: &Value) -> Result<Self, CollectionError>
    where
        Self: Sized,
    {
        let mut kept = Array::new();
        for (key, element) in self.storage() {
            if extract_value(element, accessor, self.collection_type())?.strict_eq(value) {
                kept.set(key.clone(), element.clone());
            }
        }
        Ok(self.derive(kept.reindexed()))
    }

    /// Applies `f` to every element, producing an untyped collection with the
    /// same keys
    fn map<F, R>(&self, mut f: F) -> Collection
    where
        Self: Sized,
        F: FnMut(&Value) -> R,
        R: Into<Value>,
    {
        let mapped: Array = self
            .storage()
            .iter()
            .map(|(k, v)| (k.clone(), f(v).into()))
            .collect();
        Collection::with_storage(TypeDescriptor::Mixed, mapped)
    }

    /// Left fold over the elements
    fn reduce<A, F>(&self, mut f: F, initial: A) -> A
    where
        Self: Sized,
        F: FnMut(A, &Value) -> A,
    {
        let mut acc = initial;
        for value in self.storage().values() {
            acc = f(acc, value);
        }
        acc
    }

    /// Elements present in exactly one of the two collections.
    ///
    /// Objects match only when they are the same instance.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::CollectionMismatch` if `other` is of another
    /// kind or element type.
    fn diff(&self, other: &dyn CollectionInterface) -> Result<Self, CollectionError>
    where
        Self: Sized,
    {
        ensure_compatible(self, other)?;

        let mine = self.storage();
        let theirs = other.storage();

        let mut result = only_in(mine, theirs).reindexed();
        result.merge(&only_in(theirs, mine))?;

        Ok(self.derive(result))
    }

    /// Elements of this collection also present in `other`, keys preserved.
    ///
    /// Objects match only when they are the same instance.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::CollectionMismatch` if `other` is of another
    /// kind or element type.
    fn intersect(&self, other: &dyn CollectionInterface) -> Result<Self, CollectionError>
    where
        Self: Sized,
    {
        ensure_compatible(self, other)?;

        let theirs = other.storage();
        let common: Array = self
            .storage()
            .iter()
            .filter(|(_, v)| theirs.values().any(|o| compare_elements(v, o) == Ordering::Equal))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(self.derive(common))
    }

    /// A copy of this collection with every element of `others` added:
    /// integer-keyed elements are appended, string-keyed elements overwrite.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::CollectionMismatch` if any collection is of
    /// another kind or element type. The receiver is left unchanged.
    fn merge(&self, others: &[&dyn CollectionInterface]) -> Result<Self, CollectionError>
    where
        Self: Sized,
    {
        let mut merged = self.derive(self.storage().clone());

        for (index, other) in others.iter().enumerate() {
            if other.kind() != self.kind() {
                debug!(index, expected = self.kind(), found = other.kind(), "merge rejected");
                return Err(CollectionError::CollectionMismatch(format!(
                    "Collection with index {} must be of type {}",
                    index,
                    self.kind()
                )));
            }

            if other.collection_type() != self.collection_type() {
                debug!(
                    index,
                    expected = %self.collection_type(),
                    found = %other.collection_type(),
                    "merge rejected"
                );
                return Err(CollectionError::CollectionMismatch(format!(
                    "Collection items in collection with index {} must be of type {}",
                    index,
                    self.collection_type()
                )));
            }

            for (key, value) in other.storage() {
                match key {
                    Key::Int(_) => merged.offset_set(None, value.clone())?,
                    Key::Str(_) => merged.offset_set(Some(key.to_value()), value.clone())?,
                }
            }
        }

        Ok(merged)
    }

    /// At most `limit` elements starting at `offset`; `None` takes the rest
    fn limit(&self, offset: usize, limit: Option<usize>) -> Self
    where
        Self: Sized,
    {
        self.derive(self.storage().slice(offset, limit))
    }
}

/// Orders two elements for `diff` and `intersect`.
///
/// Two objects compare by identity, never by contents. Anything else is
/// `Equal` only when strictly equal; unequal values follow `Value::compare`,
/// with loosely equal pairs such as `10` and `"10"` split by type name.
pub fn compare_elements(a: &Value, b: &Value) -> Ordering {
    if let (Value::Object(x), Value::Object(y)) = (a, b) {
        return x.id().cmp(&y.id());
    }
    if a.strict_eq(b) {
        return Ordering::Equal;
    }
    match a
        .compare(b)
        .then_with(|| a.type_name().cmp(b.type_name()))
        .then_with(|| a.to_string().cmp(&b.to_string()))
    {
        // Same kind and rendering but not identical, e.g. reordered arrays
        Ordering::Equal => Ordering::Less,
        unequal => unequal,
    }
}

fn only_in(source: &Array, other: &Array) -> Array {
    source
        .iter()
        .filter(|(_, v)| {
            !other
                .values()
                .any(|o| compare_elements(v, o) == Ordering::Equal)
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn ensure_compatible<C>(this: &C, other: &dyn CollectionInterface) -> Result<(), CollectionError>
where
    C: CollectionInterface + ?Sized,
{
    if other.kind() != this.kind() {
        debug!(expected = this.kind(), found = other.kind(), "collection kind mismatch");
        return Err(CollectionError::CollectionMismatch(format!(
            "Collection must be of type {}",
            this.kind()
        )));
    }

    if other.collection_type() != this.collection_type() {
        debug!(
            expected = %this.collection_type(),
            found = %other.collection_type(),
            "collection type mismatch"
        );
        return Err(CollectionError::CollectionMismatch(format!(
            "Collection items must be of type {}",
            this.collection_type()
        )));
    }

    Ok(())
}

/// A list of elements of one declared type.
///
/// # Examples
///
/// ```
/// use sovran_collections::{Collection, CollectionInterface, CollectionError};
///
/// let mut names = Collection::new("string");
/// names.add("alice")?;
/// names.add("bob")?;
///
/// assert!(names.add(42).is_err());
/// assert_eq!(names.first()?.as_str(), Some("alice"));
/// # Ok::<(), CollectionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Collection {
    collection_type: TypeDescriptor,
    data: Array,
}

impl Collection {
    /// Creates an empty collection of the given element type
    pub fn new(collection_type: impl Into<TypeDescriptor>) -> Self {
        Self::with_storage(collection_type.into(), Array::new())
    }

    /// Creates a collection from existing data, checking every element
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if any element has the wrong type.
    pub fn from_array(
        collection_type: impl Into<TypeDescriptor>,
        data: Array,
    ) -> Result<Self, CollectionError> {
        let mut collection = Self::new(collection_type);
        fill(&mut collection, data)?;
        Ok(collection)
    }

    /// Creates a collection from a list of values, checking every element
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if any element has the wrong type.
    pub fn from_values<V, I>(
        collection_type: impl Into<TypeDescriptor>,
        values: I,
    ) -> Result<Self, CollectionError>
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Self::from_array(collection_type, Array::from_values(values))
    }

    pub(crate) fn with_storage(collection_type: TypeDescriptor, data: Array) -> Self {
        Self {
            collection_type,
            data,
        }
    }
}

impl Storage for Collection {
    fn storage(&self) -> &Array {
        &self.data
    }

    fn storage_mut(&mut self) -> &mut Array {
        &mut self.data
    }
}

impl ArrayInterface for Collection {
    fn offset_set(&mut self, offset: Option<Value>, value: Value) -> Result<(), CollectionError> {
        ensure_type(&self.collection_type, &value, "Value")?;
        match offset {
            None => {
                self.data.push(value)?;
            }
            Some(key) => self.data.set(Key::from_value(&key)?, value),
        }
        Ok(())
    }
}

impl CollectionInterface for Collection {
    fn collection_type(&self) -> &TypeDescriptor {
        &self.collection_type
    }

    fn kind(&self) -> &'static str {
        "Collection"
    }

    fn derive(&self, data: Array) -> Self {
        Self::with_storage(self.collection_type.clone(), data)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
