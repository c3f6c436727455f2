//! # sovran-collections
//!
//! Typed collections, sets, maps and queues over dynamic values.
//!
//! `sovran-collections` provides Java-style containers whose element, key and
//! value types are declared when the container is built and enforced on every
//! write. Values are dynamic ([`Value`]): scalars, nested arrays, callables,
//! resources and user objects implementing [`Object`]. Every container keeps
//! its entries in insertion order.
//!
//! ## Key Features
//!
//! - **Type-checked**: Every write is validated against the declared type descriptor
//! - **One write path**: All mutations go through `offset_set`, so rules can't be bypassed
//! - **Derived results**: `sort`, `filter`, `diff`, `intersect`, `merge` and `limit` never touch the receiver
//! - **Identity-aware**: Objects are compared by identity in `diff`/`intersect`
//! - **Familiar API**: `Collection`, `Set`, `TypedMap`, `NamedParameterMap`, `Queue`, `DoubleEndedQueue`
//!
//! ## Usage Examples
//!
//! ### Typed Collections
//!
//! ```rust
//! use sovran_collections::{ArrayInterface, Collection, CollectionInterface, CollectionError, Sort};
//!
//! fn main() -> Result<(), CollectionError> {
//!     let mut numbers = Collection::new("int");
//!     numbers.add(3)?;
//!     numbers.add(1)?;
//!     numbers.add(2)?;
//!
//!     // Wrong types are rejected and leave the collection untouched
//!     assert!(numbers.add("four").is_err());
//!     assert_eq!(numbers.count(), 3);
//!
//!     // Derived collections keep the element type
//!     let sorted = numbers.sort(None, Sort::Ascending)?;
//!     let evens = numbers.filter(|v| v.as_int().is_some_and(|i| i % 2 == 0));
//!     let total = numbers.reduce(|acc, v| acc + v.as_int().unwrap_or(0), 0);
//!
//!     assert_eq!(sorted.first()?.as_int(), Some(1));
//!     assert_eq!(evens.count(), 1);
//!     assert_eq!(total, 6);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Sets and Set Algebra
//!
//! ```rust
//! use sovran_collections::{ArrayInterface, Collection, CollectionInterface, CollectionError};
//!
//! fn main() -> Result<(), CollectionError> {
//!     let a = Collection::from_values("int", [1, 2, 3])?;
//!     let b = Collection::from_values("int", [2, 3, 4])?;
//!
//!     let common = a.intersect(&b)?;
//!     let different = a.diff(&b)?;
//!
//!     assert_eq!(common.count(), 2);
//!     assert_eq!(different.count(), 2);
//!
//!     // Collections of another element type can't be combined
//!     let words = Collection::from_values("string", ["a"])?;
//!     assert!(a.merge(&[&words]).is_err());
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Maps
//!
//! ```rust
//! use sovran_collections::{MapInterface, NamedParameterMap, TypedMap, CollectionError};
//!
//! fn main() -> Result<(), CollectionError> {
//!     let mut scores = TypedMap::new("string", "int");
//!     scores.put("alice", 10)?;
//!     let previous = scores.put("alice", 12)?;
//!     assert_eq!(previous.and_then(|v| v.as_int()), Some(10));
//!
//!     let mut options = NamedParameterMap::new([("verbose", "bool"), ("depth", "int")]);
//!     options.put("verbose", true)?;
//!     assert!(options.put("colour", "red").is_err());
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Queues
//!
//! ```rust
//! use sovran_collections::{DoubleEndedQueue, DoubleEndedQueueInterface, QueueInterface, CollectionError};
//!
//! fn main() -> Result<(), CollectionError> {
//!     let mut tasks = DoubleEndedQueue::new("string");
//!     tasks.add("write")?;
//!     tasks.add("review")?;
//!     tasks.add_first("plan")?;
//!
//!     assert_eq!(tasks.poll().and_then(|v| v.as_str().map(str::to_owned)), Some("plan".to_owned()));
//!     assert_eq!(tasks.peek_last().and_then(|v| v.as_str()), Some("review"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Error Handling
//!
//! ```rust
//! use sovran_collections::{Collection, CollectionInterface, CollectionError};
//!
//! let empty = Collection::new("int");
//!
//! match empty.first() {
//!     Ok(value) => println!("First: {}", value),
//!     Err(CollectionError::NoSuchElement(msg)) => println!("Nothing here: {}", msg),
//!     Err(e) => println!("Other error: {}", e),
//! }
//!
//! let mut names = Collection::new("string");
//! match names.add(42) {
//!     Ok(_) => println!("Added"),
//!     Err(CollectionError::InvalidArgument(msg)) => println!("Rejected: {}", msg),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

mod array;
mod collection;
mod deque;
mod error;
mod extract;
mod map;
mod named;
mod object;
mod queue;
mod set;
mod sort;
mod typed;
mod types;
mod value;

pub use array::{Array, ArrayInterface, GenericArray, Iter};
pub use collection::{compare_elements, Collection, CollectionInterface};
pub use deque::{DoubleEndedQueue, DoubleEndedQueueInterface};
pub use error::CollectionError;
pub use extract::extract_value;
pub use map::{AssociativeArrayMap, MapInterface};
pub use named::{NamedParameter, NamedParameterMap};
pub use object::{AsAny, Callable, Object, ObjectRef, Resource};
pub use queue::{Queue, QueueInterface};
pub use set::Set;
pub use sort::Sort;
pub use typed::{TypedMap, TypedMapInterface};
pub use types::{check_type, TypeDescriptor};
pub use value::{Key, Value};
