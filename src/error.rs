//! Error types for crossforge
//!
//! All modules use `ForgeResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for crossforge operations
pub type ForgeResult<T> = Result<T, ForgeError>;

/// All errors that can occur in crossforge
#[derive(Error, Debug)]
pub enum ForgeError {
    // Dependency errors
    #[error("Required tool not found: {tool}")]
    DependencyMissing { tool: String, hint: String },

    #[error("{tool} version {detected} is too old (need at least {minimum})")]
    DependencyTooOld {
        tool: String,
        detected: String,
        minimum: String,
        hint: String,
    },

    // Recipe errors
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Recipe {recipe} does not support target {target}")]
    UnsupportedTarget { recipe: String, target: String },

    #[error("Unknown compilation target: {0}")]
    UnknownTarget(String),

    // Repository errors
    #[error("Failed to clone {url}: {reason}")]
    Clone { url: String, reason: String },

    // Build tool errors
    #[error("{command} exited with status {code}\n{output}")]
    BuildTool {
        command: String,
        code: i32,
        output: String,
    },

    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl ForgeError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Remediation text for the error, if any
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::DependencyMissing { hint, .. } => Some(hint),
            Self::DependencyTooOld { hint, .. } => Some(hint),
            Self::RecipeNotFound(_) => Some("Run: crossforge list"),
            _ => None,
        }
    }
}
