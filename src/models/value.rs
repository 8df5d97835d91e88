//! Bound values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

/// A value that can be bound to a template name.
///
/// Deserializes untagged, so any JSON, YAML or TOML document maps onto it
/// directly. Whole numbers become [`Value::Integer`], or [`Value::Unsigned`]
/// above `i64::MAX`; everything else numeric becomes [`Value::Float`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value; renders as empty text.
    #[default]
    Null,
    /// A boolean flag, mostly used to toggle sections.
    Bool(bool),
    /// A whole number.
    Integer(i64),
    /// A whole number that only fits unsigned.
    Unsigned(u64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// A list; sections iterate over it.
    List(Vec<Self>),
    /// A nested map; sections push it as a lookup scope.
    Map(BTreeMap<String, Self>),
}

impl Value {
    /// Creates a string value.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Creates a list value.
    #[must_use]
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns the value as a string slice, or None if not a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a list, or None if not a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the value as a map, or None if not a map.
    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Whether a section bound to this value renders its body.
    ///
    /// Null, `false` and empty lists are falsy. Empty strings and zero are
    /// truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null | Self::Bool(false) => false,
            Self::List(items) => !items.is_empty(),
            _ => true,
        }
    }

    /// Appends the textual form of the value to `out`.
    pub fn write_text(&self, out: &mut String) {
        match self {
            Self::Null => {},
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Integer(i) => {
                let _ = write!(out, "{i}");
            },
            Self::Unsigned(u) => {
                let _ = write!(out, "{u}");
            },
            Self::Float(f) => write_float(out, *f),
            Self::String(s) => out.push_str(s),
            Self::List(_) | Self::Map(_) => {
                out.push_str(&serde_json::to_string(self).unwrap_or_default());
            },
        }
    }

    /// Converts the value to its textual form.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }
}

/// Whole floats never read as integers: `6000.0` below 1e16, exponent form
/// (`1e16`) from there on.
fn write_float(out: &mut String, f: f64) {
    if !f.is_finite() || f.fract() != 0.0 {
        let _ = write!(out, "{f}");
    } else if f.abs() < 1e16 {
        let _ = write!(out, "{f:.1}");
    } else {
        let _ = write!(out, "{f:?}");
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or(Self::Unsigned(u), Self::Integer)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl<V: Into<Self>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Self::list(items)
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(map: BTreeMap<String, Self>) -> Self {
        Self::Map(map)
    }
}

impl<V: Into<Self>> From<Option<V>> for Value {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
