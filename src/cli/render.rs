//! Render CLI command.

use super::{parse_var, write_out};
use crate::config::{MissingVariablePolicy, RtemplateConfig};
use crate::models::Context;
use crate::rendering::{RenderOptions, TemplateRenderer};
use crate::template::Template;
use crate::{Error, Result};
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the `render` command.
#[derive(Debug, Clone, Default)]
pub struct RenderArgs {
    /// Template file.
    pub template: PathBuf,
    /// Optional JSON/YAML/TOML bindings file.
    pub data: Option<PathBuf>,
    /// `KEY=VALUE` string bindings, applied after the data file.
    pub vars: Vec<String>,
    /// Render undefined variables as empty text.
    pub lenient: bool,
    /// Write to this file instead of `out`.
    pub output: Option<PathBuf>,
}

impl RenderArgs {
    /// Builds the binding context from the data file and `--var` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be loaded or a pair is
    /// malformed.
    pub fn context(&self) -> Result<Context> {
        let mut context = match &self.data {
            Some(path) => Context::from_file(path)?,
            None => Context::new(),
        };
        for var in &self.vars {
            let (key, value) = parse_var(var)?;
            context.insert(key, value);
        }
        Ok(context)
    }

    fn options(&self, config: &RtemplateConfig) -> RenderOptions {
        let policy = if self.lenient {
            MissingVariablePolicy::Empty
        } else {
            config.missing_variables
        };
        RenderOptions::new().with_missing_variables(policy)
    }
}

/// Renders a template file.
///
/// # Errors
///
/// Returns an error if loading, parsing, rendering or writing fails.
pub fn cmd_render(args: &RenderArgs, config: &RtemplateConfig, out: &mut dyn Write) -> Result<()> {
    let template = Template::from_file(&args.template)?;
    let context = args.context()?;
    let renderer = TemplateRenderer::with_options(args.options(config));
    let html = renderer.render(&template, &context)?;

    match &args.output {
        Some(path) => std::fs::write(path, html).map_err(|e| Error::OperationFailed {
            operation: "write_output_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        }),
        None => write_out(out, &html),
    }
}
