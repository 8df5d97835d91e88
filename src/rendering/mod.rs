//! Template rendering engine.
//!
//! Resolves references against a binding context, escapes values and
//! expands sections.

mod template_renderer;

pub use template_renderer::{RenderOptions, TemplateRenderer};

use crate::Result;
use crate::models::Context;
use crate::template::Template;

/// Parses `source` and renders it with strict options.
///
/// # Errors
///
/// Returns any parse or render error.
pub fn render(source: &str, context: &Context) -> Result<String> {
    let template = Template::parse(source)?;
    TemplateRenderer::new().render(&template, context)
}
