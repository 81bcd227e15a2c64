//! Configuration system for the taskboard client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskboard/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;

/// Errors that can occur when loading configuration.
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

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    board: BoardFileConfig,
}

/// `[board]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct BoardFileConfig {
    server_url: Option<String>,
    default_column: Option<String>,
}

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// CLI arguments shared by every board subcommand.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Taskboard — kanban board client")]
pub struct CliArgs {
    /// Base URL of the data service.
    #[arg(short, long, env = "TASKBOARD_SERVER_URL")]
    pub server_url: Option<String>,

    /// Column new tasks are created in.
    #[arg(long, env = "TASKBOARD_DEFAULT_COLUMN")]
    pub default_column: Option<String>,

    /// Path to config file (default: `~/.config/taskboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", env = "TASKBOARD_LOG")]
    pub log_level: String,

    /// Board operation to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Board operations exposed by the CLI.
#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Load the board and print it column by column.
    Show,
    /// Create a task in the default column.
    Add {
        /// Task text.
        content: String,
        /// Assignee display name.
        #[arg(long)]
        assigned_to: Option<String>,
        /// Due date (YYYY-MM-DD).
        #[arg(long)]
        due: Option<chrono::NaiveDate>,
        /// Initial comment.
        #[arg(long)]
        comment: Option<String>,
    },
    /// Edit a task's content, assignee, or due date.
    Edit {
        /// Task id.
        id: String,
        /// Revised task text.
        content: String,
        /// Revised assignee.
        #[arg(long)]
        assigned_to: Option<String>,
        /// Revised due date (YYYY-MM-DD).
        #[arg(long)]
        due: Option<chrono::NaiveDate>,
    },
    /// Delete a task.
    Rm {
        /// Task id.
        id: String,
    },
    /// Add a comment to a task.
    Comment {
        /// Task id.
        id: String,
        /// Comment text.
        text: String,
    },
    /// Move a task to another column.
    Move {
        /// Task id.
        id: String,
        /// Destination column id.
        column: String,
    },
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the data service.
    pub server_url: String,
    /// Column new tasks are created in.
    pub default_column: String,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            default_column: "todo".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            server_url: cli
                .server_url
                .clone()
                .or_else(|| file.board.server_url.clone())
                .unwrap_or(defaults.server_url),
            default_column: cli
                .default_column
                .clone()
                .or_else(|| file.board.default_column.clone())
                .unwrap_or(defaults.default_column),
            log_level: cli.log_level.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("taskboard").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
