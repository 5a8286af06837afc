use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4221;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Command-line flags. Anything given here overrides the config file.
#[derive(Debug, Default, Parser)]
#[command(name = "courier")]
#[command(about = "Minimal HTTP/1.1 server with echo and file endpoints", long_about = None)]
pub struct Cli {
    /// Directory served and written by `/files/`
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Port to listen on [default: 4221]
    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,

    /// Seconds a connection may take end to end, 0 to disable [default: 30]
    #[arg(long = "timeout")]
    pub timeout_secs: Option<u64>,

    /// Optional YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// On-disk shape of the YAML config file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub directory: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn from_yaml(source: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to unit, not a map
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).context("Invalid config file")
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Root of the file store; `None` makes `/files/` answer 500
    pub directory: Option<PathBuf>,
    /// Deadline for a whole connection; `None` waits forever
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            directory: None,
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl Config {
    /// Builds the runtime config from flags, reading `--config` if given.
    pub fn load(cli: Cli) -> anyhow::Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::from_path(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(file, cli))
    }

    /// Layers flags over file values over defaults.
    pub fn merge(file: FileConfig, cli: Cli) -> Self {
        let defaults = Self::default();
        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            host: cli.host.or(file.host).unwrap_or(defaults.host),
            port: cli.port.or(file.port).unwrap_or(defaults.port),
            directory: cli.directory.or(file.directory),
            request_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
