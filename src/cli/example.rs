//! Example CLI command.

use super::write_out;
use crate::Result;
use crate::config::RtemplateConfig;
use crate::rendering::TemplateRenderer;
use crate::showcase::Example;
use std::io::Write;

/// Renders one built-in example, or lists them all.
///
/// Without a name and without `list`, every example is rendered in turn
/// under a `== name ==` header.
///
/// # Errors
///
/// Returns an error for unknown names or failed renders.
pub fn cmd_example(
    name: Option<&str>,
    list: bool,
    config: &RtemplateConfig,
    out: &mut dyn Write,
) -> Result<()> {
    if list {
        let mut names = Example::NAMES.join("\n");
        names.push('\n');
        return write_out(out, &names);
    }

    let renderer = TemplateRenderer::from_config(config);
    match name {
        Some(name) => write_out(out, &Example::by_name(name)?.render_with(&renderer)?),
        None => {
            for example in Example::all() {
                let html = example.render_with(&renderer)?;
                write_out(out, &format!("== {} ==\n{html}\n", example.name()))?;
            }
            Ok(())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(name: Option<&str>, list: bool) -> String {
        let mut out = Vec::new();
        cmd_example(name, list, &RtemplateConfig::default(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list() {
        assert_eq!(run(None, true), "simple\ncomplex\nescaped\nunescaped\n");
    }

    #[test]
    fn test_single() {
        assert_eq!(run(Some("escaped"), false), "<h1>Bear &gt; Shark</h1>");
    }

    #[test]
    fn test_all() {
        let output = run(None, false);
        for name in Example::NAMES {
            assert!(output.contains(&format!("== {name} ==")));
        }
    }

    #[test]
    fn test_unknown() {
        let mut out = Vec::new();
        assert!(cmd_example(Some("nope"), false, &RtemplateConfig::default(), &mut out).is_err());
    }
}
