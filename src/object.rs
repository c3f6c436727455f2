use crate::value::Value;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Upcast helper so every [`Object`] can be downcast to its concrete type.
///
/// Implemented for all `'static` types; there is no need to implement it by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An object-shaped value that can live inside a container.
///
/// Implementors describe their class name and, optionally, the interfaces they
/// conform to, their readable properties and their zero-argument methods. This
/// is what named type descriptors and member accessors (`sort`, `where_eq`,
/// `column`) are resolved against.
///
/// # Examples
///
/// ```
/// use sovran_collections::{Object, ObjectRef, Value};
///
/// #[derive(Debug)]
/// struct Point { x: i64, y: i64 }
///
/// impl Object for Point {
///     fn class_name(&self) -> &str { "Point" }
///
///     fn property(&self, name: &str) -> Option<Value> {
///         match name {
///             "x" => Some(self.x.into()),
///             "y" => Some(self.y.into()),
///             _ => None,
///         }
///     }
/// }
///
/// let point = ObjectRef::new(Point { x: 1, y: 2 });
/// assert!(point.instance_of("Point"));
/// assert_eq!(point.downcast_ref::<Point>().map(|p| p.y), Some(2));
/// ```
pub trait Object: AsAny + fmt::Debug + Send + Sync {
    /// The concrete class name of this object
    fn class_name(&self) -> &str;

    /// Returns true if this object is an instance of `name`, either its own
    /// class or an interface it implements
    fn instance_of(&self, name: &str) -> bool {
        self.class_name() == name
    }

    /// Reads a public property by name
    fn property(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Invokes a zero-argument method by name
    fn call_method(&self, _name: &str) -> Option<Value> {
        None
    }

    /// The symbolic case name when this object is an enum-like value.
    ///
    /// Maps normalize such keys to this name before storing them.
    fn enum_name(&self) -> Option<&str> {
        None
    }

    /// Returns true if the object can be invoked like a function
    fn is_callable(&self) -> bool {
        false
    }

    /// A human-readable rendering used in error messages
    fn describe(&self) -> String {
        format!("({} Object)", self.class_name())
    }
}

/// A shared handle to an [`Object`] that preserves identity and concrete type.
///
/// Cloning an `ObjectRef` clones the handle, not the object: both handles
/// compare identical.
#[derive(Clone)]
pub struct ObjectRef {
    type_id: TypeId,
    inner: Arc<dyn Object>,
}

impl ObjectRef {
    /// Wraps a concrete object in a new shared handle
    pub fn new<T: Object>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            inner: Arc::new(value),
        }
    }

    /// Identity of the underlying object, stable for as long as it lives
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }

    /// Returns true if both handles point at the same object
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        self.id() == other.id()
    }

    /// Check if the contained object is of type T
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Get a reference to the contained object if it is of type T
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        AsAny::as_any(&*self.inner).downcast_ref::<T>()
    }

    /// Borrow the object through its trait interface
    pub fn as_object(&self) -> &dyn Object {
        &*self.inner
    }

    pub fn class_name(&self) -> &str {
        self.inner.class_name()
    }

    pub fn instance_of(&self, name: &str) -> bool {
        self.inner.instance_of(name)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("id", &self.id())
            .field("object", &self.inner)
            .finish()
    }
}

/// A type-erased function value, compared by identity.
#[derive(Clone)]
pub struct Callable {
    func: Arc<dyn Fn(&[Value]) -> Value + Send + Sync>,
}

impl Callable {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Invokes the function with the given arguments
    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }

    pub fn ptr_eq(&self, other: &Callable) -> bool {
        self.id() == other.id()
    }

    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.func) as *const () as usize
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({:#x})", self.id())
    }
}

/// An opaque handle to an external resource (file, socket, stream...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: u64,
    pub kind: String,
}

impl Resource {
    pub fn new(id: u64, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}
