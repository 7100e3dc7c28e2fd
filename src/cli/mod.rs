//! Command layer of the `sdk-resolver` binary
//!
//! - [`available`]: list SDK types, distributions and resolved versions
//! - [`patterns`]: patterns file inspection and initialisation

pub mod available;
pub mod patterns;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::config::{self, AppConfig};
use crate::version::extractor::Extractor;
use crate::version::pattern::{PatternTable, ensure_patterns_file};

#[derive(Debug, Parser)]
#[command(name = "sdk-resolver")]
#[command(version, about = "Resolve installable SDK versions from artifact registries")]
pub struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/sdk-resolver/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List SDK types, distributions of a type, or versions of a distribution
    Available(AvailableArgs),
    /// Inspect and initialise the version patterns file
    Patterns {
        #[command(subcommand)]
        action: PatternsCommand,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct AvailableArgs {
    /// SDK type (e.g., jdk, node)
    pub sdk_type: Option<String>,
    /// Distribution name from the configuration (e.g., temurin)
    pub distribution: Option<String>,
    /// Only show versions of this major version
    pub major: Option<String>,
    /// Only keep versions containing this text
    #[arg(long, value_name = "TEXT")]
    pub contains: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum PatternsCommand {
    /// Show the loaded pattern sets
    List {
        /// Only pattern sets applying to this SDK type
        #[arg(long = "type", value_name = "TYPE")]
        sdk_type: Option<String>,
    },
    /// Extract a version from a path with the loaded pattern sets
    Check {
        /// Artifact path or file name
        path: String,
        /// Only try pattern sets applying to this SDK type
        #[arg(long = "type", value_name = "TYPE", conflicts_with = "distribution")]
        sdk_type: Option<String>,
        /// Only try the pattern set with this name
        #[arg(long, value_name = "NAME")]
        distribution: Option<String>,
    },
    /// Write the built-in patterns file if it does not exist
    Init,
}

/// Where the loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file at the default location
    Defaults(PathBuf),
}

impl ConfigSource {
    /// Record the source once the subscriber is installed
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => debug!("Loaded configuration from {:?}", path),
            ConfigSource::Defaults(path) => {
                debug!("No configuration file at {:?}, using defaults", path)
            }
        }
    }
}

/// Load the configuration file.
///
/// A missing file at the default location yields an empty configuration;
/// a missing file given with `--config` is an error.
pub fn load_config(cli_path: Option<&Path>) -> anyhow::Result<(AppConfig, ConfigSource)> {
    let path = config::config_path(cli_path);

    if cli_path.is_none() && !path.exists() {
        return Ok((AppConfig::default(), ConfigSource::Defaults(path)));
    }

    let config = AppConfig::load(&path)
        .with_context(|| format!("loading configuration from {:?}", path))?;
    Ok((config, ConfigSource::File(path)))
}

/// Patterns file location for `config`
pub fn patterns_path(config: &AppConfig) -> PathBuf {
    config::patterns_path(config.general.patterns_file.as_deref())
}

/// Load the patterns file, creating it from the built-in table first if needed
pub fn load_extractor(patterns_path: &Path) -> anyhow::Result<Extractor> {
    ensure_patterns_file(patterns_path)?;
    let table = PatternTable::load(patterns_path)
        .with_context(|| format!("loading patterns from {:?}", patterns_path))?;
    Ok(Extractor::load(table))
}

/// Run a parsed command, writing user-facing output to `out`
pub async fn run(cli: Cli, config: AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let patterns_path = patterns_path(&config);

    match cli.command {
        Command::Available(args) => {
            available::run(&args, &config, &patterns_path, cli.json, out).await
        }
        Command::Patterns { action } => match action {
            PatternsCommand::List { sdk_type } => {
                patterns::list(&patterns_path, sdk_type.as_deref(), cli.json, out)
            }
            PatternsCommand::Check {
                path,
                sdk_type,
                distribution,
            } => patterns::check(
                &patterns_path,
                &path,
                patterns::CheckScope::from_args(sdk_type.as_deref(), distribution.as_deref()),
                cli.json,
                out,
            ),
            PatternsCommand::Init => patterns::init(&patterns_path, cli.json, out),
        },
    }
}
