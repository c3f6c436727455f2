use crate::array::{fill, Array, ArrayInterface, Iter, Storage};
use crate::error::CollectionError;
use crate::queue::{empty_queue, QueueInterface};
use crate::types::{ensure_type, TypeDescriptor};
use crate::value::{Key, Value};
use tracing::debug;

/// A queue that can be worked from both ends.
///
/// The `*_first` operations are the queue's head operations; the `*_last`
/// operations act on the tail.
pub trait DoubleEndedQueueInterface: QueueInterface {
    /// Inserts an element at the head
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the element has the wrong type.
    fn add_first(&mut self, element: impl Into<Value>) -> Result<bool, CollectionError>
    where
        Self: Sized,
    {
        let element = element.into();
        ensure_type(self.queue_type(), &element, "Value")?;
        self.storage_mut().unshift(element);
        Ok(true)
    }

    /// Inserts an element at the tail
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the element has the wrong type.
    fn add_last(&mut self, element: impl Into<Value>) -> Result<bool, CollectionError>
    where
        Self: Sized,
    {
        self.add(element)
    }

    /// Like `add_first`, but reports a rejected element as `false`
    fn offer_first(&mut self, element: impl Into<Value>) -> bool
    where
        Self: Sized,
    {
        match self.add_first(element) {
            Ok(added) => added,
            Err(err) => {
                debug!(error = %err, "offer_first declined element");
                false
            }
        }
    }

    /// Like `add_last`, but reports a rejected element as `false`
    fn offer_last(&mut self, element: impl Into<Value>) -> bool
    where
        Self: Sized,
    {
        self.offer(element)
    }

    /// # Errors
    ///
    /// Returns `CollectionError::NoSuchElement` if the queue is empty.
    fn remove_first(&mut self) -> Result<Value, CollectionError> {
        self.remove()
    }

    /// # Errors
    ///
    /// Returns `CollectionError::NoSuchElement` if the queue is empty.
    fn remove_last(&mut self) -> Result<Value, CollectionError> {
        self.poll_last().ok_or_else(empty_queue)
    }

    /// Removes and returns the head, or `None` if the queue is empty
    fn poll_first(&mut self) -> Option<Value> {
        self.poll()
    }

    /// Removes and returns the tail, or `None` if the queue is empty
    fn poll_last(&mut self) -> Option<Value> {
        self.storage_mut().pop_last().map(|(_, v)| v)
    }

    /// # Errors
    ///
    /// Returns `CollectionError::NoSuchElement` if the queue is empty.
    fn first_element(&self) -> Result<&Value, CollectionError> {
        self.element()
    }

    /// # Errors
    ///
    /// Returns `CollectionError::NoSuchElement` if the queue is empty.
    fn last_element(&self) -> Result<&Value, CollectionError> {
        self.peek_last().ok_or_else(empty_queue)
    }

    /// The head without removing it
    fn peek_first(&self) -> Option<&Value> {
        self.peek()
    }

    /// The tail without removing it
    fn peek_last(&self) -> Option<&Value> {
        self.storage().last().map(|(_, v)| v)
    }
}

/// A typed double-ended queue.
///
/// # Examples
///
/// ```
/// use sovran_collections::{DoubleEndedQueue, DoubleEndedQueueInterface, QueueInterface};
///
/// let mut deque = DoubleEndedQueue::new("string");
/// deque.add_last("middle")?;
/// deque.add_first("front")?;
/// deque.add_last("back")?;
///
/// assert_eq!(deque.peek_first().and_then(|v| v.as_str()), Some("front"));
/// assert_eq!(deque.poll_last().and_then(|v| v.as_str().map(String::from)), Some("back".to_string()));
/// assert_eq!(deque.last_element()?.as_str(), Some("middle"));
/// # Ok::<(), sovran_collections::CollectionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DoubleEndedQueue {
    queue_type: TypeDescriptor,
    data: Array,
}

impl DoubleEndedQueue {
    /// Creates an empty deque of the given element type
    pub fn new(queue_type: impl Into<TypeDescriptor>) -> Self {
        Self {
            queue_type: queue_type.into(),
            data: Array::new(),
        }
    }

    /// Creates a deque holding `values` from head to tail
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if any element has the wrong type.
    pub fn from_values<V, I>(queue_type: impl Into<TypeDescriptor>, values: I) -> Result<Self, CollectionError>
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let mut deque = Self::new(queue_type);
        fill(&mut deque, Array::from_values(values))?;
        Ok(deque)
    }
}

impl Storage for DoubleEndedQueue {
    fn storage(&self) -> &Array {
        &self.data
    }

    fn storage_mut(&mut self) -> &mut Array {
        &mut self.data
    }
}

impl ArrayInterface for DoubleEndedQueue {
    fn offset_set(&mut self, _offset: Option<Value>, value: Value) -> Result<(), CollectionError> {
        ensure_type(&self.queue_type, &value, "Value")?;
        self.data.push(value)?;
        Ok(())
    }
}

impl QueueInterface for DoubleEndedQueue {
    fn queue_type(&self) -> &TypeDescriptor {
        &self.queue_type
    }
}

impl DoubleEndedQueueInterface for DoubleEndedQueue {}

impl<'a> IntoIterator for &'a DoubleEndedQueue {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
