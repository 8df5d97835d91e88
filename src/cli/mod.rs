//! CLI command implementations.
//!
//! Each submodule implements one `rtemplate` subcommand. Commands write their
//! output to a caller-supplied writer so they can be exercised without a
//! terminal.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `render` | Render a template file with bindings from a data file and `--var` pairs |
//! | `check` | Parse a template and list the variables it references |
//! | `example` | Render or list the built-in examples |
//! | `config` | Show the effective configuration |
//!
//! # Example Usage
//!
//! ```bash
//! # Render with bindings from YAML plus an override
//! rtemplate render page.html --data page.yaml --var title=Home
//!
//! # Validate a template
//! rtemplate check page.html
//!
//! # Show a built-in example
//! rtemplate example complex
//! ```

mod check;
mod config;
mod example;
mod render;

pub use check::cmd_check;
pub use config::cmd_config;
pub use example::cmd_example;
pub use render::{RenderArgs, cmd_render};

use crate::{Error, Result};
use std::io::Write;

/// Splits a `KEY=VALUE` argument.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when there is no `=` or the key is empty.
pub fn parse_var(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        },
        _ => Err(Error::InvalidInput(format!(
            "expected KEY=VALUE, got '{arg}'"
        ))),
    }
}

/// Writes `text` to `out`, mapping I/O failures.
fn write_out(out: &mut dyn Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| Error::OperationFailed {
            operation: "write_output".to_string(),
            cause: e.to_string(),
        })
}
