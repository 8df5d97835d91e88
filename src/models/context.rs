//! Binding context supplied at render time.

use super::Value;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Name-to-value bindings for a render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    /// Variable values keyed by name.
    values: BTreeMap<String, Value>,
}

/// Document formats a context can be loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
    /// TOML document.
    Toml,
}

impl DataFormat {
    /// Picks a format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for missing or unknown extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(Error::InvalidInput(format!(
                "unsupported data file '{}': expected .json, .yaml, .yml or .toml",
                path.display()
            ))),
        }
    }
}

impl Context {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, returning the context for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a value, replacing any previous binding for the name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Gets a value from the context.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Checks if the context contains a value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of values in the context.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the context is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copies every binding of `other` into this context, overriding on conflict.
    pub fn merge(&mut self, other: Self) {
        self.values.extend(other.values);
    }

    /// Borrows the bindings as a map.
    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Builds a context from a value whose root is a map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the value is not a map.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Map(values) => Ok(Self { values }),
            other => Err(Error::InvalidInput(format!(
                "bindings root must be a map, got {}",
                kind_name(&other)
            ))),
        }
    }

    /// Parses a bindings document in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the document does not parse or its
    /// root is not a map.
    pub fn parse(input: &str, format: DataFormat) -> Result<Self> {
        let value: Value = match format {
            DataFormat::Json => serde_json::from_str(input).map_err(|e| parse_error("JSON", &e))?,
            DataFormat::Yaml => {
                serde_yaml_ng::from_str(input).map_err(|e| parse_error("YAML", &e))?
            },
            DataFormat::Toml => {
                let table: toml::Table =
                    toml::from_str(input).map_err(|e| parse_error("TOML", &e))?;
                from_toml(toml::Value::Table(table))
            },
        };
        Self::from_value(value)
    }

    /// Parses a JSON bindings document.
    ///
    /// # Errors
    ///
    /// See [`Context::parse`].
    pub fn from_json_str(input: &str) -> Result<Self> {
        Self::parse(input, DataFormat::Json)
    }

    /// Parses a YAML bindings document.
    ///
    /// # Errors
    ///
    /// See [`Context::parse`].
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        Self::parse(input, DataFormat::Yaml)
    }

    /// Parses a TOML bindings document.
    ///
    /// # Errors
    ///
    /// See [`Context::parse`].
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Self::parse(input, DataFormat::Toml)
    }

    /// Loads bindings from a file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the file cannot be read and
    /// [`Error::InvalidInput`] if it cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let format = DataFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_data_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;
        tracing::debug!(path = %path.display(), ?format, "loading bindings");
        Self::parse(&contents, format)
    }
}

impl From<Context> for Value {
    fn from(context: Context) -> Self {
        Self::Map(context.values)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Integer(_) | Value::Unsigned(_) | Value::Float(_) => "a number",
        Value::String(_) => "a string",
        Value::List(_) => "a list",
        Value::Map(_) => "a map",
    }
}

/// Datetimes have no counterpart in [`Value`]; they bind as their TOML text.
fn from_toml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Integer(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::List(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => Value::Map(
            table
                .into_iter()
                .map(|(key, value)| (key, from_toml(value)))
                .collect(),
        ),
    }
}

fn parse_error(format: &str, e: &dyn std::fmt::Display) -> Error {
    Error::InvalidInput(format!("invalid {format} bindings: {e}"))
}
