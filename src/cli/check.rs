//! Check CLI command.

use super::write_out;
use crate::Result;
use crate::template::Template;
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

/// Parses a template and lists the variables it references.
///
/// # Errors
///
/// Returns the syntax error if the template does not parse.
pub fn cmd_check(path: &Path, out: &mut dyn Write) -> Result<()> {
    let template = Template::from_file(path)?;
    let variables = template.variables();

    let mut report = format!(
        "{}: ok, {} variable(s)\n",
        path.display(),
        variables.len()
    );
    for name in variables {
        let _ = writeln!(report, "  {name}");
    }
    write_out(out, &report)
}
