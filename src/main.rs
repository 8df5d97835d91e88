//! Binary entry point for rtemplate.
//!
//! This binary provides the CLI interface for the template engine.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use rtemplate::cli::{RenderArgs, cmd_check, cmd_config, cmd_example, cmd_render};
use rtemplate::config::RtemplateConfig;
use rtemplate::observability::{self, InitOptions};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// rtemplate - A logic-less HTML template engine.
#[derive(Parser)]
#[command(name = "rtemplate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file (overrides `RTEMPLATE_CONFIG_PATH`).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Render a template file.
    Render {
        /// Template file.
        template: PathBuf,

        /// Bindings file (.json, .yaml, .yml or .toml).
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Variable values as KEY=VALUE.
        #[arg(long = "var")]
        vars: Vec<String>,

        /// Render undefined variables as empty text.
        #[arg(short, long)]
        lenient: bool,

        /// Write output to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a template and list its variables.
    Check {
        /// Template file.
        template: PathBuf,
    },

    /// Render a built-in example.
    Example {
        /// Example name (simple, complex, escaped, unescaped); all when omitted.
        name: Option<String>,

        /// List example names.
        #[arg(long)]
        list: bool,
    },

    /// Manage configuration.
    Config {
        /// Show current configuration.
        #[arg(long)]
        show: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match RtemplateConfig::load(cli.config.as_deref())
        .and_then(RtemplateConfig::with_env_overrides)
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(
        &config.logging,
        InitOptions {
            verbose: cli.verbose,
        },
    ) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: &RtemplateConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Render {
            template,
            data,
            vars,
            lenient,
            output,
        } => {
            let args = RenderArgs {
                template,
                data,
                vars,
                lenient,
                output,
            };
            cmd_render(&args, config, &mut stdout)?;
        },

        Commands::Check { template } => cmd_check(&template, &mut stdout)?,

        Commands::Example { name, list } => {
            cmd_example(name.as_deref(), list, config, &mut stdout)?;
        },

        Commands::Config { show } => cmd_config(config, show, &mut stdout)?,

        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "rtemplate", &mut stdout);
        },
    }

    Ok(())
}
