//! # rtemplate
//!
//! A logic-less HTML template engine.
//!
//! Templates mix literal text with `{{name}}` references. Escaped references
//! HTML-encode their values, raw references (`{{{name}}}` or `{{& name}}`)
//! insert them verbatim, and `{{#name}}...{{/name}}` sections repeat or hide
//! a block depending on the bound value.
//!
//! ## Features
//!
//! - Immutable parsed templates with line/column syntax errors
//! - Typed bindings loadable from JSON, YAML or TOML
//! - Strict or lenient handling of undefined variables
//! - Standalone tag lines removed from output
//!
//! ## Example
//!
//! ```rust
//! use rtemplate::{Context, Template, TemplateRenderer};
//!
//! let template = Template::parse("<h1>{{title}}</h1>")?;
//! let context = Context::new().with("title", "Bear > Shark");
//! let html = TemplateRenderer::new().render(&template, &context)?;
//! assert_eq!(html, "<h1>Bear &gt; Shark</h1>");
//! # Ok::<(), rtemplate::Error>(())
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cli;
pub mod config;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod showcase;
pub mod template;

// Re-exports for convenience
pub use config::{MissingVariablePolicy, RtemplateConfig};
pub use models::{Context, Value};
pub use rendering::{RenderOptions, TemplateRenderer, render};
pub use showcase::Example;
pub use template::{EscapeMode, Node, Template};

/// Error type for rtemplate operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `TemplateSyntax` | Unterminated tags, unmatched sections, malformed delimiters |
/// | `UndefinedVariable` | A referenced name is unbound and the policy is strict |
/// | `InvalidInput` | Malformed bindings documents, bad `KEY=VALUE` pairs, unknown examples |
/// | `OperationFailed` | File I/O, config parsing, logging initialization |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The template source is malformed.
    ///
    /// Raised when:
    /// - A tag is not terminated before end of input
    /// - A raw `{{{name}}}` tag is missing its closing brace
    /// - A tag name is empty or contains whitespace
    /// - A section is closed with the wrong name, never opened, or never closed
    /// - A set-delimiter tag is malformed
    /// - A partial tag is used
    #[error("template syntax error at line {line}, column {column}: {message}")]
    TemplateSyntax {
        /// 1-based line of the offending tag.
        line: usize,
        /// 1-based column of the offending tag.
        column: usize,
        /// What went wrong.
        message: String,
    },

    /// A variable reference has no binding.
    ///
    /// Raised only under [`MissingVariablePolicy::Error`]; the lenient policy
    /// renders empty text instead. Undefined section names are never an error.
    #[error("undefined variable '{name}'")]
    UndefinedVariable {
        /// The name as written in the template.
        name: String,
    },

    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A bindings document does not parse or its root is not a map
    /// - A `--var` argument is not of the form `KEY=VALUE`
    /// - A data file has an unsupported extension
    /// - An example name is unknown
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Template, data or config files cannot be read or written
    /// - The config file is not valid TOML
    /// - Logging is initialized twice or the log file cannot be opened
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for rtemplate operations.
pub type Result<T> = std::result::Result<T, Error>;
