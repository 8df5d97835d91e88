//! Built-in example templates.
//!
//! Each example is an explicit value: a name, a template source and the
//! bindings it renders with. Nothing is registered globally; [`Example::all`]
//! builds the fixed list on demand.
//!
//! | Example | Demonstrates |
//! |---------|--------------|
//! | `simple` | string, integer and float substitution |
//! | `complex` | list sections and boolean sections |
//! | `escaped` | HTML escaping |
//! | `unescaped` | raw insertion |

mod complex;
mod escaped;
mod simple;
mod unescaped;

use crate::models::Context;
use crate::rendering::TemplateRenderer;
use crate::template::Template;
use crate::{Error, Result};

/// A named template with its bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    name: &'static str,
    source: &'static str,
    context: Context,
}

impl Example {
    /// Names of every built-in example.
    pub const NAMES: [&'static str; 4] = ["simple", "complex", "escaped", "unescaped"];

    /// Greeting with a number, a float and a conditional line.
    #[must_use]
    pub fn simple() -> Self {
        Self::new("simple", simple::TEMPLATE, simple::context())
    }

    /// Heading and a colour list with one current item and two links.
    #[must_use]
    pub fn complex() -> Self {
        Self::new("complex", complex::TEMPLATE, complex::context())
    }

    /// Title containing `>` through an escaped reference.
    #[must_use]
    pub fn escaped() -> Self {
        Self::new("escaped", escaped::TEMPLATE, escaped::context())
    }

    /// Same title through a raw reference.
    #[must_use]
    pub fn unescaped() -> Self {
        Self::new("unescaped", unescaped::TEMPLATE, unescaped::context())
    }

    /// Builds an example from explicit parts.
    #[must_use]
    pub const fn new(name: &'static str, source: &'static str, context: Context) -> Self {
        Self {
            name,
            source,
            context,
        }
    }

    /// All built-in examples, in [`Example::NAMES`] order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![
            Self::simple(),
            Self::complex(),
            Self::escaped(),
            Self::unescaped(),
        ]
    }

    /// Looks up a built-in example by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for unknown names.
    pub fn by_name(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "simple" => Ok(Self::simple()),
            "complex" => Ok(Self::complex()),
            "escaped" => Ok(Self::escaped()),
            "unescaped" => Ok(Self::unescaped()),
            _ => Err(Error::InvalidInput(format!(
                "unknown example '{name}': expected one of {}",
                Self::NAMES.join(", ")
            ))),
        }
    }

    /// The example name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The template source.
    #[must_use]
    pub const fn source(&self) -> &'static str {
        self.source
    }

    /// The bindings.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Parses the template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateSyntax`] if the source is malformed.
    pub fn template(&self) -> Result<Template> {
        Template::parse(self.source)
    }

    /// Renders the example with a strict renderer.
    ///
    /// # Errors
    ///
    /// Returns any parse or render error.
    pub fn to_html(&self) -> Result<String> {
        self.render_with(&TemplateRenderer::new())
    }

    /// Renders the example with the given renderer.
    ///
    /// # Errors
    ///
    /// Returns any parse or render error.
    pub fn render_with(&self, renderer: &TemplateRenderer) -> Result<String> {
        renderer.render(&self.template()?, &self.context)
    }
}
