//! Parsed templates.
//!
//! A template is parsed once into an immutable tree of [`Node`]s and can then
//! be rendered any number of times.
//!
//! # Tag grammar
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | `{{name}}` | HTML-escaped reference |
//! | `{{{name}}}` | raw reference |
//! | `{{& name}}` | raw reference |
//! | `{{#name}}...{{/name}}` | section |
//! | `{{^name}}...{{/name}}` | inverted section |
//! | `{{! comment }}` | ignored |
//! | `{{=<% %>=}}` | switch delimiters |
//!
//! Names may be dotted (`user.name`); `.` is the current section value.

mod escape;
mod parser;

pub use escape::{escape_html, push_escaped};

use crate::{Error, Result};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

/// How a reference inserts its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// HTML entities are substituted.
    #[default]
    Escaped,
    /// The value is inserted verbatim.
    Raw,
}

/// One segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text, emitted unchanged.
    Text(String),
    /// A variable reference.
    Variable {
        /// Name to resolve.
        name: String,
        /// Whether the value is escaped.
        escape: EscapeMode,
    },
    /// A block rendered zero, one or many times.
    Section {
        /// Name to resolve.
        name: String,
        /// Render the body only when the value is falsy.
        inverted: bool,
        /// Body segments.
        children: Vec<Self>,
    },
}

/// A parsed, immutable template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Parses template source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateSyntax`] with the line and column of the first
    /// malformed tag.
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let nodes = parser::parse(&source)?;
        tracing::trace!(nodes = nodes.len(), bytes = source.len(), "parsed template");
        Ok(Self { source, nodes })
    }

    /// Reads and parses a template file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the file cannot be read, or
    /// [`Error::TemplateSyntax`] if it does not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_template".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;
        tracing::debug!(path = %path.display(), "loading template");
        Self::parse(source)
    }

    /// The original source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Top-level segments.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Distinct variable names referenced anywhere, in document order.
    ///
    /// Section names are not included.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        collect_variables(&self.nodes, &mut seen, &mut names);
        names
    }
}

fn collect_variables<'a>(
    nodes: &'a [Node],
    seen: &mut HashSet<&'a str>,
    names: &mut Vec<&'a str>,
) {
    for node in nodes {
        match node {
            Node::Text(_) => {},
            Node::Variable { name, .. } => {
                if seen.insert(name.as_str()) {
                    names.push(name);
                }
            },
            Node::Section { children, .. } => collect_variables(children, seen, names),
        }
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
