use serde::Serialize;
use std::collections::hash_map;
use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::str::FromStr;

/// A dynamically typed value that can be substituted into a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Null,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Infers the narrowest variant for a piece of text. Anything that is not
/// `null`, a boolean or a number stays a string.
impl FromStr for Value {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "null" {
            return Ok(Value::Null);
        }

        if let Ok(b) = s.parse::<bool>() {
            return Ok(Value::Bool(b));
        }

        // Numbers only when they print back exactly as written, so `007` and
        // `1.10` stay strings.
        if let Ok(i) = s.parse::<i64>() {
            if i.to_string() == s {
                return Ok(Value::Int(i));
            }
        }

        match s.parse::<f64>() {
            Ok(f) if f.is_finite() && f.to_string() == s => Ok(Value::Float(f)),
            _ => Ok(Value::String(String::from(s))),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(String::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i64::from(i))
                }
            }
        )*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
    fn from(map: BTreeMap<String, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Mapping from keys to values. Enumeration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Values {
    entries: HashMap<String, Value>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges every pair into the store, overwriting existing keys.
    pub fn add<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (k, v) in values {
            self.entries.insert(k.into(), v.into());
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Returns `None` when the key is absent. A stored [`Value::Null`] is
    /// returned as `Some(&Value::Null)`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn del(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_values(&self) -> bool {
        !self.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Values::new();
        values.add(iter);
        values
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Values {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.add(iter);
    }
}

impl<'a> IntoIterator for &'a Values {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Values {
    type Item = (String, Value);
    type IntoIter = hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn set_then_get() {
        let mut values = Values::new();
        values.set("author", "John Doe");

        assert_eq!(values.get("author"), Some(&Value::from("John Doe")));
    }

    #[test]
    fn get_missing_is_none() {
        let values = Values::new();
        assert_eq!(values.get("nothing"), None);
    }

    #[test]
    fn stored_null_is_not_absent() {
        let mut values = Values::new();
        values.set("nothing", Value::Null);

        assert_eq!(values.get("nothing"), Some(&Value::Null));
        assert!(values.has_values());
    }

    #[test]
    fn add_overwrites_existing_keys() {
        let mut values = Values::new();
        values.set("lang", "Rust");
        values.add([("lang", "Go"), ("version", "1.7")]);

        assert_eq!(values.len(), 2);
        assert_eq!(values.get("lang").and_then(Value::as_str), Some("Go"));
    }

    #[test]
    fn del_missing_is_noop() {
        let mut values: Values = [("a", 1)].into_iter().collect();
        values.del("b");

        assert_eq!(values.len(), 1);
    }

    #[test]
    fn keys_lists_each_key_once() {
        let values: Values = [("lang", "Go"), ("version", "1.7"), ("lang", "Rust")]
            .into_iter()
            .collect();

        let mut keys = values.keys();
        keys.sort();
        assert_eq!(keys, vec!["lang", "version"]);
    }

    #[test_case("null" => Value::Null)]
    #[test_case("true" => Value::Bool(true))]
    #[test_case("42" => Value::Int(42))]
    #[test_case("-7" => Value::Int(-7))]
    #[test_case("1.5" => Value::Float(1.5))]
    #[test_case("1.7.0" => Value::from("1.7.0"))]
    #[test_case("1.10" => Value::from("1.10"))]
    #[test_case("007" => Value::from("007"))]
    #[test_case("+5" => Value::from("+5"))]
    #[test_case("1e3" => Value::from("1e3"))]
    #[test_case("NaN" => Value::from("NaN"))]
    #[test_case("" => Value::from(""))]
    fn infers_value_from_text(input: &str) -> Value {
        input.parse().unwrap()
    }

    #[test]
    fn option_none_is_null() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }

    proptest! {
        #[test]
        fn set_get_del(key in ".*", value in any::<i64>()) {
            let mut values = Values::new();
            values.set(key.clone(), value);
            prop_assert_eq!(values.get(&key), Some(&Value::Int(value)));

            values.del(&key);
            prop_assert_eq!(values.get(&key), None);
        }

        #[test]
        fn len_after_add_counts_unique_keys(map in prop::collection::hash_map("[a-z]{1,8}", any::<bool>(), 0..32)) {
            let mut values = Values::new();
            values.add(map.clone());
            prop_assert_eq!(values.len(), map.len());
        }

        #[test]
        fn clear_always_empties(keys in prop::collection::vec(".*", 0..16)) {
            let mut values: Values = keys.into_iter().map(|k| (k, Value::Null)).collect();
            values.clear();
            prop_assert!(values.is_empty());
            prop_assert!(!values.has_values());
        }
    }
}
