use crate::array::{fill, Array, ArrayInterface, Iter, Storage};
use crate::error::CollectionError;
use crate::types::{ensure_type, TypeDescriptor};
use crate::value::{Key, Value};
use tracing::debug;

pub(crate) fn empty_queue() -> CollectionError {
    CollectionError::NoSuchElement("Can't return element from Queue. Queue is empty.".to_string())
}

/// First-in, first-out access to a typed container.
///
/// `peek`/`poll` return `None` on an empty queue; `element`/`remove` fail
/// with `CollectionError::NoSuchElement` instead.
pub trait QueueInterface: ArrayInterface {
    /// The declared element type
    fn queue_type(&self) -> &TypeDescriptor;

    /// Appends an element at the tail
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

    /// Like `add`, but reports a rejected element as `false`
    fn offer(&mut self, element: impl Into<Value>) -> bool
    where
        Self: Sized,
    {
        match self.add(element) {
            Ok(added) => added,
            Err(err) => {
                debug!(error = %err, "offer declined element");
                false
            }
        }
    }

    /// The head of the queue, if any
    fn peek(&self) -> Option<&Value> {
        self.storage().first().map(|(_, v)| v)
    }

    /// Removes and returns the head of the queue, if any
    fn poll(&mut self) -> Option<Value> {
        self.storage_mut().pop_first().map(|(_, v)| v)
    }

    /// # Errors
    ///
    /// Returns `CollectionError::NoSuchElement` if the queue is empty.
    fn element(&self) -> Result<&Value, CollectionError> {
        self.peek().ok_or_else(empty_queue)
    }

    /// # Errors
    ///
    /// Returns `CollectionError::NoSuchElement` if the queue is empty.
    fn remove(&mut self) -> Result<Value, CollectionError> {
        self.poll().ok_or_else(empty_queue)
    }
}

/// A typed FIFO queue.
///
/// Any key passed to `offset_set` is ignored: values always go to the tail.
///
/// # Examples
///
/// ```
/// use sovran_collections::{Queue, QueueInterface};
///
/// let mut jobs = Queue::new("int");
/// jobs.add(1)?;
/// jobs.add(2)?;
/// assert!(!jobs.offer("three"));
///
/// assert_eq!(jobs.poll().and_then(|v| v.as_int()), Some(1));
/// assert_eq!(jobs.poll().and_then(|v| v.as_int()), Some(2));
/// assert!(jobs.poll().is_none());
/// # Ok::<(), sovran_collections::CollectionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Queue {
    queue_type: TypeDescriptor,
    data: Array,
}

impl Queue {
    /// Creates an empty queue of the given element type
    pub fn new(queue_type: impl Into<TypeDescriptor>) -> Self {
        Self {
            queue_type: queue_type.into(),
            data: Array::new(),
        }
    }

    /// Creates a queue holding `values` in order
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if any element has the wrong type.
    pub fn from_values<V, I>(queue_type: impl Into<TypeDescriptor>, values: I) -> Result<Self, CollectionError>
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let mut queue = Self::new(queue_type);
        fill(&mut queue, Array::from_values(values))?;
        Ok(queue)
    }
}

impl Storage for Queue {
    fn storage(&self) -> &Array {
        &self.data
    }

    fn storage_mut(&mut self) -> &mut Array {
        &mut self.data
    }
}

impl ArrayInterface for Queue {
    fn offset_set(&mut self, _offset: Option<Value>, value: Value) -> Result<(), CollectionError> {
        ensure_type(&self.queue_type, &value, "Value")?;
        self.data.push(value)?;
        Ok(())
    }
}

impl QueueInterface for Queue {
    fn queue_type(&self) -> &TypeDescriptor {
        &self.queue_type
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
