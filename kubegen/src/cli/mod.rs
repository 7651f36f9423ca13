//! The `kubegen` command line interface.
//!
//! # Examples
//!
//! ```bash
//! # Write kubernetes.json for a single container
//! kubegen generate --name cheese --image fabric8/cheese --port 8080
//!
//! # Add a service and print the manifest instead of writing a file
//! kubegen generate --name cheese --image fabric8/cheese \
//!     --service-name cheese-svc --service-port 80 --service-container-port 8080 -o -
//!
//! # Show the variables the template would see
//! kubegen variables --from-file cheese.yaml
//! ```

pub mod error;
mod generate;
mod internal;
mod variables;

use std::{io::Write, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use snafu::ResultExt;

pub use self::error::Error;
use self::{generate::GenerateCommand, variables::VariablesCommand};
use crate::{config::Config, shadow, ui::table::SourceListExt};

/// Parsed command line of the `kubegen` binary.
#[derive(Parser)]
#[command(
    name = kubegen_base::CLI_PROGRAM_NAME,
    author,
    version,
    long_version = shadow::CLAP_LONG_VERSION,
    about = "Generate Kubernetes manifests from templates and a handful of parameters.",
    long_about = "kubegen expands a template into a Kubernetes manifest. The template sees \
                  variables derived from the given parameters (name, image, ports, labels, \
                  service settings and free-form variables) and is looked up in the template \
                  directories before the built-in templates.",
    color = clap::ColorChoice::Always
)]
pub struct Cli {
    #[clap(subcommand)]
    commands: Option<Commands>,

    #[clap(
        long = "config",
        short = 'c',
        env = "KUBEGEN_CONFIG_FILE_PATH",
        help = "Specify a configuration file. Defaults to ~/.config/kubegen/config.yaml or \
                KUBEGEN_CONFIG_FILE_PATH env var."
    )]
    config_file: Option<PathBuf>,

    #[clap(
        long = "log-level",
        env = "KUBEGEN_LOG_LEVEL",
        help = "Set the logging level (e.g., info, debug, trace)."
    )]
    log_level: Option<tracing::Level>,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Display version information")]
    Version,

    #[command(about = "Generate shell completion script for the specified shell (bash, zsh, fish)")]
    Completions { shell: clap_complete::Shell },

    #[command(about = "Output the default configuration in YAML format")]
    DefaultConfig,

    /// Expands a template and writes the manifest.
    #[command(alias = "g", about = "Generate a Kubernetes manifest from a template")]
    Generate(GenerateCommand),

    #[command(
        alias = "vars",
        about = "Show the variables a template would be expanded with"
    )]
    Variables(VariablesCommand),

    #[command(about = "List template sources in lookup order, with the built-in templates")]
    Templates,
}

impl Default for Cli {
    fn default() -> Self { Self::parse() }
}

impl Cli {
    /// Loads the configuration file given on the command line, or the first
    /// one found in the default locations. Without any file the defaults
    /// apply. `--log-level` overrides the file.
    fn load_config(&self) -> Result<Config, Error> {
        let mut config = match self.config_file.clone().or_else(Config::search_config_file_path) {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(log_level) = self.log_level {
            config.log.level = log_level;
        }

        Ok(config)
    }

    /// Runs the selected command and returns the process exit code.
    ///
    /// # Errors
    ///
    /// Returns an `Error` when the configuration cannot be loaded, when the
    /// command fails, or when standard output cannot be written.
    pub fn run(self) -> Result<i32, Error> {
        let mut stdout = std::io::stdout();
        match self.commands {
            Some(Commands::Version) => {
                let info = format!(
                    "{}Client Version: {}\n",
                    Self::command().render_long_version(),
                    *kubegen_base::PROJECT_SEMVER
                );
                stdout.write_all(info.as_bytes()).context(error::WriteStdoutSnafu)?;
                return Ok(0);
            }
            Some(Commands::Completions { shell }) => {
                let mut app = Self::command();
                let bin_name = app.get_name().to_string();
                clap_complete::generate(shell, &mut app, bin_name, &mut stdout);
                return Ok(0);
            }
            Some(Commands::DefaultConfig) => {
                stdout
                    .write_all(Config::template_basic()?.as_bytes())
                    .context(error::WriteStdoutSnafu)?;
                return Ok(0);
            }
            _ => {}
        }

        let config = self.load_config()?;
        config.log.registry();

        match self.commands {
            Some(Commands::Generate(cmd)) => cmd.run(&config)?,
            Some(Commands::Variables(cmd)) => cmd.run(&config)?,
            Some(Commands::Templates) => {
                stdout
                    .write_all(config.template_sources().render_table().as_bytes())
                    .context(error::WriteStdoutSnafu)?;
                stdout.write_all(b"\n").context(error::WriteStdoutSnafu)?;
            }
            _ => {
                eprint!("{}", Self::command().render_long_help().ansi());
                return Ok(-1);
            }
        }

        Ok(0)
    }
}
