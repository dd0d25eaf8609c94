//! Errors from loading, saving and validating reverb presets.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between a preset file and an engine.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Preset file could not be read
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Preset file could not be written
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Preset file is not valid TOML for a preset
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Preset could not be rendered as TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Preset not found on disk or among the factory presets
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// Parameter name that matches no reverb control
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Parameter value that cannot be used
    #[error("invalid value for parameter '{param}': {reason}")]
    InvalidValue {
        /// Name of the parameter.
        param: String,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// Stored values outside the engine's ranges
    #[error("validation failed: {0}")]
    Validation(#[from] crate::validation::ValidationError),

    /// Preset directory could not be created
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Wrap an I/O error from reading `path`.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Wrap an I/O error from writing `path`.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Wrap an I/O error from creating the directory `path`.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
