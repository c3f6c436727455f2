use crate::array::{Array, ArrayInterface, Iter, Storage};
use crate::error::CollectionError;
use crate::map::{normalize_key, MapInterface};
use crate::types::TypeDescriptor;
use crate::value::{Key, Value};
use tracing::debug;

/// One declared parameter of a [`NamedParameterMap`].
///
/// A bare name accepts any value; a `(name, type)` pair restricts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedParameter {
    pub name: String,
    pub parameter_type: TypeDescriptor,
}

impl NamedParameter {
    pub fn new(name: impl Into<String>, parameter_type: impl Into<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            parameter_type: parameter_type.into(),
        }
    }
}

impl From<&str> for NamedParameter {
    fn from(name: &str) -> Self {
        NamedParameter::new(name, TypeDescriptor::Mixed)
    }
}

impl From<String> for NamedParameter {
    fn from(name: String) -> Self {
        NamedParameter::new(name, TypeDescriptor::Mixed)
    }
}

impl From<(&str, &str)> for NamedParameter {
    fn from((name, parameter_type): (&str, &str)) -> Self {
        NamedParameter::new(name, parameter_type)
    }
}

impl From<(String, String)> for NamedParameter {
    fn from((name, parameter_type): (String, String)) -> Self {
        NamedParameter::new(name, parameter_type)
    }
}

/// A map restricted to a fixed set of named keys, each with its own type.
///
/// # Examples
///
/// ```
/// use sovran_collections::{ArrayInterface, MapInterface, NamedParameterMap};
///
/// let mut params = NamedParameterMap::new([("name", "string"), ("age", "int")]);
/// params.put("name", "Ada")?;
///
/// assert!(params.put("age", "old").is_err());
/// assert!(params.put("email", "ada@example.com").is_err());
/// assert_eq!(params.count(), 1);
/// # Ok::<(), sovran_collections::CollectionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NamedParameterMap {
    named_parameters: Vec<NamedParameter>,
    data: Array,
}

impl NamedParameterMap {
    /// Creates an empty map accepting only the given parameters.
    ///
    /// When a name is declared twice it keeps its first position and takes
    /// the last declared type.
    pub fn new<P, I>(named_parameters: I) -> Self
    where
        P: Into<NamedParameter>,
        I: IntoIterator<Item = P>,
    {
        let mut declared: Vec<NamedParameter> = Vec::new();
        for parameter in named_parameters.into_iter().map(Into::into) {
            match declared.iter_mut().find(|p| p.name == parameter.name) {
                Some(existing) => existing.parameter_type = parameter.parameter_type,
                None => declared.push(parameter),
            }
        }

        Self {
            named_parameters: declared,
            data: Array::new(),
        }
    }

    /// Creates a map and sets the given values
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` for the first undeclared name
    /// or mistyped value.
    pub fn from_pairs<P, I, K, V, D>(named_parameters: I, data: D) -> Result<Self, CollectionError>
    where
        P: Into<NamedParameter>,
        I: IntoIterator<Item = P>,
        K: Into<Value>,
        V: Into<Value>,
        D: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new(named_parameters);
        for (key, value) in data {
            map.offset_set(Some(key.into()), value.into())?;
        }
        Ok(map)
    }

    /// The declared parameters, in declaration order
    pub fn named_parameters(&self) -> &[NamedParameter] {
        &self.named_parameters
    }

    /// The declared type of `name`, if it is a parameter of this map
    pub fn parameter_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.named_parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.parameter_type)
    }
}

impl Storage for NamedParameterMap {
    fn storage(&self) -> &Array {
        &self.data
    }

    fn storage_mut(&mut self) -> &mut Array {
        &mut self.data
    }
}

impl ArrayInterface for NamedParameterMap {
    fn offset_set(&mut self, offset: Option<Value>, value: Value) -> Result<(), CollectionError> {
        let raw_key = offset.unwrap_or_default();
        let key = normalize_key(&raw_key)?;

        let Some(parameter) = self
            .named_parameters
            .iter()
            .find(|p| Key::from_str_key(&p.name) == key)
        else {
            debug!(key = %raw_key, "undeclared parameter");
            return Err(CollectionError::InvalidArgument(format!(
                "Attempting to set value for unconfigured parameter '{}'",
                raw_key
            )));
        };

        if !parameter.parameter_type.satisfies(&value) {
            debug!(
                parameter = %parameter.name,
                expected = %parameter.parameter_type,
                found = value.type_name(),
                "parameter value rejected"
            );
            return Err(CollectionError::InvalidArgument(format!(
                "Value for '{}' must be of type {}; value is {}",
                parameter.name, parameter.parameter_type, value
            )));
        }

        self.data.set(key, value);
        Ok(())
    }
}

impl MapInterface for NamedParameterMap {}

impl<'a> IntoIterator for &'a NamedParameterMap {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
