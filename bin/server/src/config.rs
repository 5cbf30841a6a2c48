use crate::constants::{
    DEFAULT_CLEANUP_INTERVAL_MINUTES, DEFAULT_HOST, DEFAULT_PORT, ENV_MAX_FILE_AGE,
    ENV_UPLOADS_DIRECTORY,
};
use clap::{Parser, ValueEnum};
use naming::NamingStrategy;
use std::path::PathBuf;
use std::time::Duration;
use storage::RetentionPolicy;
use thiserror::Error;

/// Command line flags, each with an environment variable fallback
#[derive(Debug, Clone, Parser)]
#[command(name = "filedrop")]
#[command(about = "Anonymous file drop server with age-based cleanup")]
pub struct Args {
    /// Directory where uploaded files are stored
    #[arg(long, env = ENV_UPLOADS_DIRECTORY, value_name = "DIR")]
    pub uploads_directory: Option<PathBuf>,

    /// Files older than this many hours are deleted by the collector
    #[arg(long, env = ENV_MAX_FILE_AGE, value_name = "HOURS")]
    pub max_file_age: Option<String>,

    /// Server host
    #[arg(long, env = "SERVER_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Server port
    #[arg(long, env = "SERVER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Minutes between collection passes
    #[arg(long, env = "CLEANUP_INTERVAL_MINUTES", default_value_t = DEFAULT_CLEANUP_INTERVAL_MINUTES)]
    pub cleanup_interval_minutes: u64,

    /// Comma separated wildcard patterns the collector never deletes (e.g. index.html,*.ico)
    #[arg(long, env = "GC_IGNORE", value_name = "PATTERNS", value_delimiter = ',')]
    pub gc_ignore: Vec<String>,

    /// Identifier style for stored files
    #[arg(long, env = "NAMING_MODE", value_enum, default_value_t = NamingMode::Token)]
    pub naming: NamingMode,
}

/// Identifier style selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NamingMode {
    /// Random 10 character base64url token
    Token,
    /// Readable words plus a file category
    Friendly,
}

impl From<NamingMode> for NamingStrategy {
    fn from(mode: NamingMode) -> Self {
        match mode {
            NamingMode::Token => NamingStrategy::default(),
            NamingMode::Friendly => NamingStrategy::Friendly,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("{name} is not a valid integer: {value:?}")]
    InvalidInteger { name: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Server configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Flat directory holding stored uploads
    pub uploads_directory: PathBuf,
    /// Maximum file age in whole hours; negative values expire everything
    pub max_file_age_hours: i64,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Sleep between collection passes
    pub cleanup_interval: Duration,
    /// Names the collector leaves alone
    pub gc_ignore: Vec<String>,
    /// Identifier generation strategy
    pub naming: NamingStrategy,
}

impl ServerConfig {
    /// Parse flags and environment. Clap exits on malformed flags; missing or
    /// invalid required settings come back as `ConfigError`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::try_from(Args::parse())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn retention_policy(&self) -> RetentionPolicy {
        RetentionPolicy::from_hours(self.max_file_age_hours).with_ignore(self.gc_ignore.clone())
    }
}

impl TryFrom<Args> for ServerConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let uploads_directory = args
            .uploads_directory
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or(ConfigError::Missing(ENV_UPLOADS_DIRECTORY))?;

        let max_file_age = args
            .max_file_age
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(ENV_MAX_FILE_AGE))?;
        let max_file_age_hours =
            max_file_age
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidInteger {
                    name: ENV_MAX_FILE_AGE,
                    value: max_file_age.clone(),
                })?;

        if args.cleanup_interval_minutes == 0 {
            return Err(ConfigError::Zero("CLEANUP_INTERVAL_MINUTES"));
        }

        let gc_ignore = args
            .gc_ignore
            .into_iter()
            .map(|pattern| pattern.trim().to_string())
            .filter(|pattern| !pattern.is_empty())
            .collect();

        Ok(ServerConfig {
            uploads_directory,
            max_file_age_hours,
            host: args.host,
            port: args.port,
            cleanup_interval: Duration::from_secs(
                args.cleanup_interval_minutes.saturating_mul(60),
            ),
            gc_ignore,
            naming: args.naming.into(),
        })
    }
}
