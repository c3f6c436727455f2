use crate::error::CollectionError;
use crate::value::Value;
use std::fmt;
use tracing::debug;

/// The declared type of a container's elements, keys or values.
///
/// Primitive descriptors are matched by value kind; any other name is a
/// class or interface that object values must be an instance of.
///
/// # Examples
///
/// ```
/// use sovran_collections::{TypeDescriptor, Value};
///
/// let int = TypeDescriptor::from("integer");
/// assert_eq!(int, TypeDescriptor::Int);
/// assert!(int.satisfies(&Value::Int(4)));
/// assert!(!int.satisfies(&Value::from("4")));
///
/// assert!(TypeDescriptor::from("numeric").satisfies(&Value::from("4")));
/// assert_eq!(TypeDescriptor::from("Foo"), TypeDescriptor::Named("Foo".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Array,
    Bool,
    Callable,
    Float,
    Int,
    Null,
    Numeric,
    Object,
    Resource,
    Scalar,
    String,
    Mixed,
    /// A class or interface name
    Named(String),
}

impl TypeDescriptor {
    /// Parses a descriptor, accepting `integer`, `boolean` and `double` as
    /// aliases of `int`, `bool` and `float`
    pub fn parse(name: &str) -> Self {
        match name {
            "array" => TypeDescriptor::Array,
            "bool" | "boolean" => TypeDescriptor::Bool,
            "callable" => TypeDescriptor::Callable,
            "float" | "double" => TypeDescriptor::Float,
            "int" | "integer" => TypeDescriptor::Int,
            "null" => TypeDescriptor::Null,
            "numeric" => TypeDescriptor::Numeric,
            "object" => TypeDescriptor::Object,
            "resource" => TypeDescriptor::Resource,
            "scalar" => TypeDescriptor::Scalar,
            "string" => TypeDescriptor::String,
            "mixed" => TypeDescriptor::Mixed,
            other => TypeDescriptor::Named(other.to_string()),
        }
    }

    /// The canonical name of this descriptor
    pub fn name(&self) -> &str {
        match self {
            TypeDescriptor::Array => "array",
            TypeDescriptor::Bool => "bool",
            TypeDescriptor::Callable => "callable",
            TypeDescriptor::Float => "float",
            TypeDescriptor::Int => "int",
            TypeDescriptor::Null => "null",
            TypeDescriptor::Numeric => "numeric",
            TypeDescriptor::Object => "object",
            TypeDescriptor::Resource => "resource",
            TypeDescriptor::Scalar => "scalar",
            TypeDescriptor::String => "string",
            TypeDescriptor::Mixed => "mixed",
            TypeDescriptor::Named(name) => name,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, TypeDescriptor::Mixed)
    }

    /// Returns true if `value` satisfies this descriptor
    pub fn satisfies(&self, value: &Value) -> bool {
        match self {
            TypeDescriptor::Array => matches!(value, Value::Array(_)),
            TypeDescriptor::Bool => matches!(value, Value::Bool(_)),
            TypeDescriptor::Callable => match value {
                Value::Callable(_) => true,
                Value::Object(o) => o.as_object().is_callable(),
                _ => false,
            },
            TypeDescriptor::Float => matches!(value, Value::Float(_)),
            TypeDescriptor::Int => matches!(value, Value::Int(_)),
            TypeDescriptor::Null => value.is_null(),
            TypeDescriptor::Numeric => value.is_numeric(),
            TypeDescriptor::Object => matches!(value, Value::Object(_)),
            TypeDescriptor::Resource => matches!(value, Value::Resource(_)),
            TypeDescriptor::Scalar => value.is_scalar(),
            TypeDescriptor::String => matches!(value, Value::String(_)),
            TypeDescriptor::Mixed => true,
            TypeDescriptor::Named(name) => match value {
                Value::Object(o) => o.instance_of(name),
                _ => false,
            },
        }
    }
}

/// Checks `value` against `descriptor`. Never fails; callers decide how to
/// react to a `false`.
pub fn check_type(descriptor: &TypeDescriptor, value: &Value) -> bool {
    descriptor.satisfies(value)
}

/// Validate-then-write guard shared by every typed container.
pub(crate) fn ensure_type(
    descriptor: &TypeDescriptor,
    value: &Value,
    subject: &str,
) -> Result<(), CollectionError> {
    if descriptor.satisfies(value) {
        return Ok(());
    }
    debug!(expected = %descriptor, found = value.type_name(), "{} rejected", subject);
    Err(CollectionError::InvalidArgument(format!(
        "{} must be of type {}; {} is {}",
        subject,
        descriptor,
        subject.to_lowercase(),
        value
    )))
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for TypeDescriptor {
    fn from(name: &str) -> Self {
        TypeDescriptor::parse(name)
    }
}

impl From<String> for TypeDescriptor {
    fn from(name: String) -> Self {
        TypeDescriptor::parse(&name)
    }
}

impl From<&TypeDescriptor> for TypeDescriptor {
    fn from(descriptor: &TypeDescriptor) -> Self {
        descriptor.clone()
    }
}
