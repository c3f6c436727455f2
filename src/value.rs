use crate::array::Array;
use crate::error::CollectionError;
use crate::object::{Callable, Object, ObjectRef, Resource};
use std::cmp::Ordering;
use std::fmt;

/// A key in a container: either an integer index or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    /// Converts a string to a key, turning canonical decimal integers
    /// (`"7"`, `"-3"`, but not `"07"` or `"+3"`) into integer keys.
    pub fn from_str_key(s: &str) -> Key {
        match canonical_int(s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s.to_string()),
        }
    }

    /// Converts a value to a key using array offset rules.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` for arrays, objects,
    /// callables and resources.
    pub fn from_value(value: &Value) -> Result<Key, CollectionError> {
        match value {
            Value::Int(i) => Ok(Key::Int(*i)),
            Value::String(s) => Ok(Key::from_str_key(s)),
            Value::Bool(b) => Ok(Key::Int(i64::from(*b))),
            Value::Float(f) if f.is_finite() => Ok(Key::Int(f.trunc() as i64)),
            Value::Null => Ok(Key::Str(String::new())),
            other => Err(CollectionError::InvalidArgument(format!(
                "Illegal offset type {}",
                other.type_name()
            ))),
        }
    }

    /// The key as a value
    pub fn to_value(&self) -> Value {
        match self {
            Key::Int(i) => Value::Int(*i),
            Key::Str(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(i64::from(value))
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Int(value as i64)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::from_str_key(value)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::from_str_key(&value)
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if digits == "0" && s.starts_with('-') {
        return None;
    }
    s.parse::<i64>().ok()
}

/// A dynamically typed value stored in a container.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Array),
    Object(ObjectRef),
    Callable(Callable),
    Resource(Resource),
}

impl Value {
    /// Wraps a concrete object in a value
    pub fn object<T: Object>(object: T) -> Value {
        Value::Object(ObjectRef::new(object))
    }

    /// The name of this value's primitive kind
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Callable(_) => "callable",
            Value::Resource(_) => "resource",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_)
        )
    }

    /// Ints, floats and numeric strings
    pub fn is_numeric(&self) -> bool {
        match self {
            Value::Int(_) | Value::Float(_) => true,
            Value::String(s) => parse_numeric(s).is_some(),
            _ => false,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Truthiness as used by loose comparisons
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !(s.is_empty() || s == "0"),
            Value::Array(a) => !a.is_empty(),
            Value::Object(_) | Value::Callable(_) | Value::Resource(_) => true,
        }
    }

    /// Strict equality: same kind and same value.
    ///
    /// Objects and callables compare by identity; arrays compare pairwise in
    /// order. `NaN` is never identical to itself.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.strict_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            (Value::Resource(a), Value::Resource(b)) => a == b,
            _ => false,
        }
    }

    /// Loose equality with numeric-string and boolean coercion.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(a), b) | (b, Value::Bool(a)) => *a == b.truthy(),
            (Value::Null, Value::Null) => true,
            (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
            (Value::Null, v) | (v, Value::Null) => !v.truthy(),
            (Value::String(a), Value::String(b)) => {
                match (parse_numeric(a), parse_numeric(b)) {
                    (Some(x), Some(y)) => x == y,
                    _ => a == b,
                }
            }
            (Value::Array(a), Value::Array(b)) => a.loose_eq(b),
            _ => match (self.number(), other.number()) {
                (Some(x), Some(y)) => x == y,
                (Some(_), None) | (None, Some(_)) => match (self, other) {
                    (Value::String(s), n) | (n, Value::String(s)) if n.number().is_some() => {
                        *s == n.to_string()
                    }
                    _ => false,
                },
                (None, None) => self.strict_eq(other),
            },
        }
    }

    /// Three-way comparison, the ordering used by `sort`.
    ///
    /// This is a total order. Values first group by kind: null, booleans,
    /// numbers (ints, floats and numeric strings), NaN, other strings,
    /// arrays, objects, callables, resources. Numbers compare exactly by
    /// value, so `10`, `10.0` and `"10"` are equal. Other strings compare
    /// byte-wise, arrays by length then keys then values, and distinct objects
    /// by class name then identity.
    pub fn compare(&self, other: &Value) -> Ordering {
        let (rank, theirs) = (self.rank(), other.rank());
        if rank != theirs {
            return rank.cmp(&theirs);
        }

        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => a.compare(b),
            (Value::Object(a), Value::Object(b)) => {
                if a.ptr_eq(b) {
                    Ordering::Equal
                } else {
                    a.class_name()
                        .cmp(b.class_name())
                        .then_with(|| a.id().cmp(&b.id()))
                }
            }
            (Value::Callable(a), Value::Callable(b)) => a.id().cmp(&b.id()),
            (Value::Resource(a), Value::Resource(b)) => {
                a.kind.cmp(&b.kind).then_with(|| a.id.cmp(&b.id))
            }
            _ if rank == Rank::Number => match (self.exact_number(), other.exact_number()) {
                (Some(a), Some(b)) => a.compare(b),
                _ => Ordering::Equal,
            },
            (Value::String(a), Value::String(b)) => a.as_bytes().cmp(b.as_bytes()),
            _ => Ordering::Equal,
        }
    }

    fn rank(&self) -> Rank {
        match self {
            Value::Null => Rank::Null,
            Value::Bool(_) => Rank::Bool,
            Value::Int(_) => Rank::Number,
            Value::Float(f) if f.is_nan() => Rank::NaN,
            Value::Float(_) => Rank::Number,
            Value::String(s) if parse_numeric(s).is_some() => Rank::Number,
            Value::String(_) => Rank::Text,
            Value::Array(_) => Rank::Array,
            Value::Object(_) => Rank::Object,
            Value::Callable(_) => Rank::Callable,
            Value::Resource(_) => Rank::Resource,
        }
    }

    fn exact_number(&self) -> Option<Number> {
        match self {
            Value::Int(i) => Some(Number::Int(*i)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::String(s) => {
                let t = s.trim_matches(is_numeric_space);
                match t.parse::<i64>() {
                    Ok(i) => Some(Number::Int(i)),
                    Err(_) => parse_numeric(s).map(Number::Float),
                }
            }
            _ => None,
        }
    }

    fn number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => parse_numeric(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Null,
    Bool,
    Number,
    NaN,
    Text,
    Array,
    Object,
    Callable,
    Resource,
}

// Never NaN: NaN floats rank on their own
#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn compare(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (Number::Int(a), Number::Float(b)) => cmp_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(b, a).reverse(),
        }
    }
}

/// Compares without rounding `i` to the nearest float
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, the first float above every i64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    i.cmp(&(whole as i64))
        .then_with(|| 0.0_f64.partial_cmp(&(f - whole)).unwrap_or(Ordering::Equal))
}

fn is_numeric_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Parses a numeric string: optional surrounding whitespace, an optional
/// sign, digits with an optional fraction, and an optional exponent.
pub(crate) fn parse_numeric(s: &str) -> Option<f64> {
    let t = s.trim_matches(is_numeric_space);
    let bytes = t.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return None;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == exp_start {
            return None;
        }
        i = j;
    }
    if i != bytes.len() {
        return None;
    }
    t.parse::<f64>().ok()
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NAN".to_string()
    } else if f.is_infinite() {
        let sign = if f > 0.0 { "" } else { "-" };
        format!("{}INF", sign)
    } else if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

/// Renders the value the way error messages show it.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(true) => f.write_str("TRUE"),
            Value::Bool(false) => f.write_str("FALSE"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::String(s) => f.write_str(s),
            Value::Array(_) => f.write_str("Array"),
            Value::Object(o) => f.write_str(&o.as_object().describe()),
            Value::Callable(_) => f.write_str("(Closure Object)"),
            Value::Resource(r) => write!(f, "({} resource #{})", r.kind, r.id),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::Object(value)
    }
}

impl From<Callable> for Value {
    fn from(value: Callable) -> Self {
        Value::Callable(value)
    }
}

impl From<Resource> for Value {
    fn from(value: Resource) -> Self {
        Value::Resource(value)
    }
}

impl From<Key> for Value {
    fn from(value: Key) -> Self {
        match value {
            Key::Int(i) => Value::Int(i),
            Key::Str(s) => Value::String(s),
        }
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_keys_become_ints_only_when_canonical() {
        assert_eq!(Key::from("5"), Key::Int(5));
        assert_eq!(Key::from("-12"), Key::Int(-12));
        assert_eq!(Key::from("05"), Key::Str("05".to_string()));
        assert_eq!(Key::from("-0"), Key::Str("-0".to_string()));
        assert_eq!(Key::from("1.5"), Key::Str("1.5".to_string()));
        assert_eq!(Key::from("foo"), Key::Str("foo".to_string()));
    }

    #[test]
    fn test_key_from_value() {
        assert_eq!(Key::from_value(&Value::Bool(true)), Ok(Key::Int(1)));
        assert_eq!(Key::from_value(&Value::Float(3.9)), Ok(Key::Int(3)));
        assert_eq!(Key::from_value(&Value::Null), Ok(Key::Str(String::new())));
        assert!(Key::from_value(&Value::Array(Array::new())).is_err());
    }

    #[test]
    fn test_numeric_strings() {
        assert!(Value::from("42").is_numeric());
        assert!(Value::from(" -4.5e3 ").is_numeric());
        assert!(Value::from(".5").is_numeric());
        assert!(!Value::from(".").is_numeric());
        assert!(!Value::from("1e").is_numeric());
        assert!(!Value::from("").is_numeric());
        assert!(!Value::from("abc").is_numeric());
        assert!(!Value::from("inf").is_numeric());
    }

    #[test]
    fn test_strict_and_loose_equality() {
        assert!(Value::Int(1).strict_eq(&Value::Int(1)));
        assert!(!Value::Int(1).strict_eq(&Value::Float(1.0)));
        assert!(!Value::Int(1).strict_eq(&Value::from("1")));

        assert!(Value::Int(1).loose_eq(&Value::Float(1.0)));
        assert!(Value::Int(1).loose_eq(&Value::from("1")));
        assert!(Value::from("1e1").loose_eq(&Value::from("10")));
        assert!(Value::Null.loose_eq(&Value::Bool(false)));
        assert!(Value::Null.loose_eq(&Value::from("")));
        assert!(!Value::Int(0).loose_eq(&Value::from("a")));
    }

    #[test]
    fn test_compare() {
        assert_eq!(Value::Int(1).compare(&Value::Int(2)), Ordering::Less);
        assert_eq!(Value::Float(2.5).compare(&Value::Int(2)), Ordering::Greater);
        assert_eq!(Value::from("10").compare(&Value::from("9")), Ordering::Greater);
        assert_eq!(Value::from("apple").compare(&Value::from("banana")), Ordering::Less);
        assert_eq!(Value::from("abc").compare(&Value::from("abc")), Ordering::Equal);
    }

    #[test]
    fn test_compare_mixed_strings_and_numbers_is_transitive() {
        let nine = Value::Int(9);
        let ten = Value::from("10");
        let word = Value::from("5a");

        assert_eq!(nine.compare(&ten), Ordering::Less);
        assert_eq!(ten.compare(&word), Ordering::Less);
        assert_eq!(nine.compare(&word), Ordering::Less);
        assert_eq!(word.compare(&nine), Ordering::Greater);
        assert_eq!(Value::Int(10).compare(&ten), Ordering::Equal);
        assert_eq!(Value::Float(10.0).compare(&Value::from(" 10 ")), Ordering::Equal);
    }

    #[test]
    fn test_compare_nan_sorts_after_numbers() {
        let nan = Value::Float(f64::NAN);
        assert_eq!(nan.compare(&Value::Float(f64::NAN)), Ordering::Equal);
        assert_eq!(nan.compare(&Value::Float(f64::INFINITY)), Ordering::Greater);
        assert_eq!(Value::Int(i64::MAX).compare(&nan), Ordering::Less);
        assert_eq!(nan.compare(&Value::from("abc")), Ordering::Less);
    }

    #[test]
    fn test_compare_large_ints_against_floats() {
        // i64::MAX rounds up to 2^63 as a float
        assert_eq!(Value::Int(i64::MAX).compare(&Value::Float(9.223_372_036_854_776e18)), Ordering::Less);
        assert_eq!(Value::Int(i64::MIN).compare(&Value::Float(-9.223_372_036_854_776e18)), Ordering::Equal);
        assert_eq!(Value::Int(-3).compare(&Value::Float(-2.5)), Ordering::Less);
        assert_eq!(Value::Int(0).compare(&Value::Float(-0.0)), Ordering::Equal);
    }

    #[test]
    fn test_compare_groups_by_kind() {
        assert_eq!(Value::Null.compare(&Value::Bool(false)), Ordering::Less);
        assert_eq!(Value::Bool(true).compare(&Value::Int(-5)), Ordering::Less);
        assert_eq!(Value::from("zzz").compare(&Value::from(vec![1])), Ordering::Less);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Bool(false).to_string(), "FALSE");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::from(vec![1, 2]).to_string(), "Array");
        assert_eq!(Value::from(Resource::new(3, "stream")).to_string(), "(stream resource #3)");
    }
}
