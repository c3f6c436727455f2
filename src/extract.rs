use crate::error::CollectionError;
use crate::types::TypeDescriptor;
use crate::value::{Key, Value};

/// Resolves a member accessor against an element.
///
/// With no accessor the element itself is returned. Array elements are looked
/// up by key, object elements by property and then by zero-argument method.
///
/// # Errors
///
/// - `CollectionError::UnsupportedOperation` if the element is neither an array
///   nor an object
/// - `CollectionError::InvalidPropertyOrMethod` if the key, property or method
///   does not exist (a null array entry counts as missing)
pub fn extract_value(
    element: &Value,
    accessor: Option<&str>,
    container_type: &TypeDescriptor,
) -> Result<Value, CollectionError> {
    let Some(name) = accessor else {
        return Ok(element.clone());
    };

    match element {
        Value::Array(array) => match array.get(&Key::from_str_key(name)) {
            Some(value) if !value.is_null() => Ok(value.clone()),
            _ => Err(CollectionError::InvalidPropertyOrMethod(format!(
                "Key or index \"{}\" not found in collection elements",
                name
            ))),
        },
        Value::Object(object) => {
            let object = object.as_object();
            object
                .property(name)
                .or_else(|| object.call_method(name))
                .ok_or_else(|| {
                    CollectionError::InvalidPropertyOrMethod(format!(
                        "Method or property \"{}\" not defined in {}",
                        name,
                        object.class_name()
                    ))
                })
        }
        _ => Err(CollectionError::UnsupportedOperation(format!(
            "The collection type \"{}\" does not support the property or method parameter",
            container_type
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use crate::object::Object;

    #[derive(Debug)]
    struct Person {
        name: String,
        age: i64,
    }

    impl Object for Person {
        fn class_name(&self) -> &str {
            "Person"
        }

        fn property(&self, name: &str) -> Option<Value> {
            match name {
                "name" => Some(self.name.clone().into()),
                _ => None,
            }
        }

        fn call_method(&self, name: &str) -> Option<Value> {
            match name {
                "getAge" => Some(self.age.into()),
                "name" => Some("from method".into()),
                _ => None,
            }
        }
    }

    fn person() -> Value {
        Value::object(Person {
            name: "Ada".to_string(),
            age: 36,
        })
    }

    #[test]
    fn test_no_accessor_is_identity() {
        let element = Value::Int(7);
        let extracted = extract_value(&element, None, &TypeDescriptor::Int).unwrap();
        assert!(extracted.strict_eq(&element));
    }

    #[test]
    fn test_array_lookup() {
        let mut row = Array::new();
        row.set(Key::from("id"), Value::Int(3));
        row.set(Key::from("missing"), Value::Null);
        let element = Value::Array(row);

        let id = extract_value(&element, Some("id"), &TypeDescriptor::Array).unwrap();
        assert_eq!(id.as_int(), Some(3));

        let err = extract_value(&element, Some("nope"), &TypeDescriptor::Array).unwrap_err();
        assert!(matches!(err, CollectionError::InvalidPropertyOrMethod(_)));

        let err = extract_value(&element, Some("missing"), &TypeDescriptor::Array).unwrap_err();
        assert!(matches!(err, CollectionError::InvalidPropertyOrMethod(_)));
    }

    #[test]
    fn test_list_arrays_are_addressed_by_index() {
        let element = Value::from(vec!["a", "b"]);
        let second = extract_value(&element, Some("1"), &TypeDescriptor::Array).unwrap();
        assert_eq!(second.as_str(), Some("b"));
    }

    #[test]
    fn test_object_prefers_property_over_method() {
        let element = person();
        let ty = TypeDescriptor::from("Person");

        let name = extract_value(&element, Some("name"), &ty).unwrap();
        assert_eq!(name.as_str(), Some("Ada"));

        let age = extract_value(&element, Some("getAge"), &ty).unwrap();
        assert_eq!(age.as_int(), Some(36));

        let err = extract_value(&element, Some("email"), &ty).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Method or property \"email\" not defined in Person"
        );
    }

    #[test]
    fn test_scalars_have_no_members() {
        let err = extract_value(&Value::Int(1), Some("x"), &TypeDescriptor::Int).unwrap_err();
        assert!(matches!(err, CollectionError::UnsupportedOperation(_)));
        assert!(err.to_string().contains("\"int\""));
    }
}
