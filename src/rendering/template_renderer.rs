//! Template renderer implementation.
//!
//! Walks the parsed node tree once, resolving names against a stack of
//! scopes:
//! - the root binding context at the bottom
//! - one scope per entered section (the list item or section value)
//!
//! Output is accumulated in a local buffer and only returned when the whole
//! template rendered, so callers never see partial output.

use std::collections::BTreeMap;
use tracing::instrument;

use crate::config::{MissingVariablePolicy, RtemplateConfig};
use crate::models::{Context, Value};
use crate::template::{EscapeMode, Node, Template, push_escaped};
use crate::{Error, Result};

/// Options that change how names resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// What to do when a variable reference has no binding.
    pub missing_variables: MissingVariablePolicy,
}

impl RenderOptions {
    /// Creates default (strict) options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the missing-variable policy.
    #[must_use]
    pub const fn with_missing_variables(mut self, policy: MissingVariablePolicy) -> Self {
        self.missing_variables = policy;
        self
    }
}

/// A lookup scope on the render stack.
#[derive(Debug, Clone, Copy)]
enum Scope<'c> {
    Root(&'c BTreeMap<String, Value>),
    Value(&'c Value),
}

impl<'c> Scope<'c> {
    fn get(self, name: &str) -> Option<&'c Value> {
        match self {
            Self::Root(map) => map.get(name),
            Self::Value(value) => value.as_map().and_then(|map| map.get(name)),
        }
    }
}

/// Template rendering engine.
///
/// Holds no state between renders; one renderer can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    options: RenderOptions,
}

impl TemplateRenderer {
    /// Creates a new template renderer with strict options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer with explicit options.
    #[must_use]
    pub const fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Creates a renderer following the configured policies.
    #[must_use]
    pub const fn from_config(config: &RtemplateConfig) -> Self {
        Self::with_options(RenderOptions {
            missing_variables: config.missing_variables,
        })
    }

    /// The options this renderer applies.
    #[must_use]
    pub const fn options(&self) -> RenderOptions {
        self.options
    }

    /// Renders a template against a binding context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UndefinedVariable`] for an unbound reference when the
    /// policy is [`MissingVariablePolicy::Error`].
    #[instrument(skip_all, fields(nodes = template.nodes().len(), bindings = context.len()))]
    pub fn render(&self, template: &Template, context: &Context) -> Result<String> {
        let mut out = String::with_capacity(template.source().len());
        let mut scopes = vec![Scope::Root(context.as_map())];
        self.render_nodes(template.nodes(), &mut scopes, &mut out)?;
        tracing::debug!(bytes = out.len(), "rendered template");
        Ok(out)
    }

    fn render_nodes<'c>(
        &self,
        nodes: &[Node],
        scopes: &mut Vec<Scope<'c>>,
        out: &mut String,
    ) -> Result<()> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Variable { name, escape } => self.render_variable(name, *escape, scopes, out)?,
                Node::Section {
                    name,
                    inverted,
                    children,
                } => {
                    let value = lookup(scopes, name).filter(|v| v.is_truthy());
                    match (value, *inverted) {
                        (None, true) => self.render_nodes(children, scopes, out)?,
                        (Some(Value::List(items)), false) => {
                            for item in items {
                                self.render_scoped(item, children, scopes, out)?;
                            }
                        },
                        (Some(value), false) => self.render_scoped(value, children, scopes, out)?,
                        (None, false) | (Some(_), true) => {},
                    }
                },
            }
        }
        Ok(())
    }

    fn render_scoped<'c>(
        &self,
        value: &'c Value,
        nodes: &[Node],
        scopes: &mut Vec<Scope<'c>>,
        out: &mut String,
    ) -> Result<()> {
        scopes.push(Scope::Value(value));
        let result = self.render_nodes(nodes, scopes, out);
        scopes.pop();
        result
    }

    fn render_variable(
        &self,
        name: &str,
        escape: EscapeMode,
        scopes: &[Scope<'_>],
        out: &mut String,
    ) -> Result<()> {
        let Some(value) = lookup(scopes, name) else {
            return match self.options.missing_variables {
                MissingVariablePolicy::Error => Err(Error::UndefinedVariable {
                    name: name.to_string(),
                }),
                MissingVariablePolicy::Empty => {
                    tracing::debug!(name, "undefined variable rendered empty");
                    Ok(())
                },
            };
        };

        match escape {
            EscapeMode::Escaped => push_escaped(out, &value.to_text()),
            EscapeMode::Raw => value.write_text(out),
        }
        Ok(())
    }
}

/// Resolves a possibly dotted name against the scope stack.
///
/// The first segment is searched innermost-out; later segments descend into
/// maps and never fall back to outer scopes.
fn lookup<'c>(scopes: &[Scope<'c>], name: &str) -> Option<&'c Value> {
    if name == "." {
        return match scopes.last()? {
            Scope::Value(value) => Some(*value),
            Scope::Root(_) => None,
        };
    }

    let mut parts = name.split('.');
    let first = parts.next()?;
    let mut value = scopes.iter().rev().find_map(|scope| scope.get(first))?;
    for part in parts {
        value = value.as_map()?.get(part)?;
    }
    Some(value)
}
