//! Core data types: expected-variable schema, option descriptors, sources and values

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Declared type of an expected variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    String,
    Boolean,
    Number,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Number => "number",
        };
        f.write_str(name)
    }
}

/// A resolved configuration scalar.
///
/// Equality is strict: `String("3000")` never equals `Number(3000.0)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl EnvValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            EnvValue::String(_) => ValueType::String,
            EnvValue::Boolean(_) => ValueType::Boolean,
            EnvValue::Number(_) => ValueType::Number,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnvValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EnvValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            EnvValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Integral numbers serialize as integers so `3000` does not become `3000.0`.
impl Serialize for EnvValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
        match self {
            EnvValue::String(s) => serializer.serialize_str(s),
            EnvValue::Boolean(b) => serializer.serialize_bool(*b),
            EnvValue::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            EnvValue::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::String(s) => f.write_str(s),
            EnvValue::Boolean(b) => write!(f, "{}", b),
            EnvValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        EnvValue::String(value.to_string())
    }
}

impl From<String> for EnvValue {
    fn from(value: String) -> Self {
        EnvValue::String(value)
    }
}

impl From<bool> for EnvValue {
    fn from(value: bool) -> Self {
        EnvValue::Boolean(value)
    }
}

impl From<f64> for EnvValue {
    fn from(value: f64) -> Self {
        EnvValue::Number(value)
    }
}

impl From<i64> for EnvValue {
    fn from(value: i64) -> Self {
        EnvValue::Number(value as f64)
    }
}

impl From<i32> for EnvValue {
    fn from(value: i32) -> Self {
        EnvValue::Number(f64::from(value))
    }
}

/// Where a value came from. Used for tie-breaking and log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "env")]
    Env,
    #[serde(rename = "argv")]
    Argv,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "__defaultValue")]
    DefaultValue,
}

impl Source {
    pub fn tag(&self) -> &'static str {
        match self {
            Source::Env => "env",
            Source::Argv => "argv",
            Source::File => "file",
            Source::DefaultValue => "__defaultValue",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Option descriptor for one expected variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvOption {
    #[serde(default)]
    pub required: bool,
    #[serde(default, rename = "type")]
    pub value_type: ValueType,
    #[serde(default, rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<EnvValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptable_values: Option<Vec<EnvValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_breaker: Option<Source>,
}

impl EnvOption {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn default_value(mut self, value: impl Into<EnvValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn acceptable_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<EnvValue>,
    {
        self.acceptable_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn tie_breaker(mut self, source: Source) -> Self {
        self.tie_breaker = Some(source);
        self
    }
}

/// Schema entry: either the bare "required plain string" marker or a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectedVariable {
    Required,
    Options(EnvOption),
}

impl ExpectedVariable {
    pub fn options(&self) -> Option<&EnvOption> {
        match self {
            ExpectedVariable::Required => None,
            ExpectedVariable::Options(opt) => Some(opt),
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            ExpectedVariable::Required => true,
            ExpectedVariable::Options(opt) => opt.required,
        }
    }

    /// Declared type; the plain marker is always a string.
    pub fn value_type(&self) -> ValueType {
        self.options().map(|o| o.value_type).unwrap_or_default()
    }
}

impl From<EnvOption> for ExpectedVariable {
    fn from(opt: EnvOption) -> Self {
        ExpectedVariable::Options(opt)
    }
}

/// Expected variables keyed by exact (case-sensitive) name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    variables: IndexMap<String, ExpectedVariable>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required plain-string variable.
    pub fn required(mut self, key: impl Into<String>) -> Self {
        self.variables.insert(key.into(), ExpectedVariable::Required);
        self
    }

    /// Declare a variable with an option descriptor.
    pub fn option(mut self, key: impl Into<String>, option: EnvOption) -> Self {
        self.variables.insert(key.into(), ExpectedVariable::Options(option));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, expected: ExpectedVariable) {
        self.variables.insert(key.into(), expected);
    }

    pub fn get(&self, key: &str) -> Option<&ExpectedVariable> {
        self.variables.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ExpectedVariable)> {
        self.variables.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.variables.keys()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ExpectedVariable)> for Schema {
    fn from_iter<T: IntoIterator<Item = (K, ExpectedVariable)>>(iter: T) -> Self {
        Self { variables: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_preserves_declaration_order() {
        let schema = Schema::new()
            .required("ZED")
            .option("ALPHA", EnvOption::new().value_type(ValueType::Number))
            .required("MIDDLE");
        let keys: Vec<&str> = schema.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ZED", "ALPHA", "MIDDLE"]);
    }

    #[test]
    fn test_plain_marker_is_required_string() {
        let expected = ExpectedVariable::Required;
        assert!(expected.is_required());
        assert_eq!(expected.value_type(), ValueType::String);
        assert!(expected.options().is_none());
    }

    #[test]
    fn test_descriptor_defaults_to_optional_string() {
        let expected = ExpectedVariable::from(EnvOption::new());
        assert!(!expected.is_required());
        assert_eq!(expected.value_type(), ValueType::String);
    }

    #[test]
    fn test_env_value_equality_is_strict() {
        assert_ne!(EnvValue::from("3000"), EnvValue::from(3000));
        assert_eq!(EnvValue::from(3000), EnvValue::Number(3000.0));
        assert_ne!(EnvValue::from("true"), EnvValue::from(true));
    }

    #[test]
    fn test_env_value_display() {
        assert_eq!(EnvValue::from(3000).to_string(), "3000");
        assert_eq!(EnvValue::from(1234.5).to_string(), "1234.5");
        assert_eq!(EnvValue::from(false).to_string(), "false");
        assert_eq!(EnvValue::from("plain").to_string(), "plain");
    }

    #[test]
    fn test_env_value_serializes_integral_numbers_as_integers() {
        assert_eq!(serde_json::to_string(&EnvValue::from(3000)).unwrap(), "3000");
        assert_eq!(serde_json::to_string(&EnvValue::from(0.5)).unwrap(), "0.5");
        assert_eq!(serde_json::to_string(&EnvValue::from("x")).unwrap(), "\"x\"");
    }

    #[test]
    fn test_source_tags() {
        assert_eq!(Source::Env.to_string(), "env");
        assert_eq!(Source::DefaultValue.tag(), "__defaultValue");
    }
}
