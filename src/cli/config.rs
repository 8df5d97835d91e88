//! Config CLI command.

use super::write_out;
use crate::Result;
use crate::config::RtemplateConfig;
use std::io::Write;

/// Prints the effective configuration as TOML when `show` is set.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn cmd_config(config: &RtemplateConfig, show: bool, out: &mut dyn Write) -> Result<()> {
    if !show {
        return write_out(out, "Use --show to print the effective configuration.\n");
    }
    write_out(out, &config.to_toml_string()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingVariablePolicy;

    #[test]
    fn test_show() {
        let config = RtemplateConfig::new().with_missing_variables(MissingVariablePolicy::Empty);
        let mut out = Vec::new();
        cmd_config(&config, true, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("missing_variables = \"empty\""));
    }

    #[test]
    fn test_hint_without_show() {
        let mut out = Vec::new();
        cmd_config(&RtemplateConfig::new(), false, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("--show"));
    }
}
