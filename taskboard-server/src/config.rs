//! Configuration system for the taskboard data service.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskboard-server/config.toml`)
//! 4. Compiled defaults

use std::path::PathBuf;

/// Errors that can occur when loading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure for the server.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerConfigFile {
    server: ServerFileSection,
}

/// `[server]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerFileSection {
    bind_addr: Option<String>,
}

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// CLI arguments for the data service.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Taskboard data service")]
pub struct ServerCliArgs {
    /// Address to bind the service to.
    #[arg(short, long, env = "TASKBOARD_SERVER_ADDR")]
    pub bind: Option<String>,

    /// Path to config file (default: `~/.config/taskboard-server/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKBOARD_SERVER_LOG")]
    pub log_level: String,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the service to (e.g., `0.0.0.0:5000`).
    pub bind_addr: String,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an error.
    /// If no `--config` is given, the default path is tried and a missing
    /// file is treated as empty config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed.
    pub fn load(cli: &ServerCliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `ServerConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    #[must_use]
    fn resolve(cli: &ServerCliArgs, file: &ServerConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: cli
                .bind
                .clone()
                .or_else(|| file.server.bind_addr.clone())
                .unwrap_or(defaults.bind_addr),
            log_level: cli.log_level.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file for the server.
fn load_config_file(
    explicit_path: Option<&std::path::Path>,
) -> Result<ServerConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ServerConfigFile::default());
        };
        config_dir.join("taskboard-server").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ServerConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
