//! Preset and parameter validation.
//!
//! Values are checked against the engine's parameter descriptors. The engine
//! itself clamps anything it is given, so validation exists to tell a user
//! that a preset will not sound the way its file says.
//!
//! # Example
//!
//! ```rust
//! use gverb_config::{ReverbPreset, validate_preset};
//!
//! let mut preset = ReverbPreset::new("Hall");
//! preset.set_param("roomsize", 40.0).unwrap();
//! assert!(validate_preset(&preset).is_ok());
//!
//! preset.set_param("damping", 3.0).unwrap();
//! assert!(validate_preset(&preset).is_err());
//! ```

use gverb::params::{self, DESCRIPTORS, REVTIME};
use gverb_core::ParamDescriptor;
use thiserror::Error;

use crate::preset::ReverbPreset;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter name.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value, infinite when unbounded.
        max: f32,
    },

    /// Parameter value is NaN.
    #[error("parameter '{0}' is not a number")]
    NotANumber(String),

    /// Sample rate hint of zero.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Normalize a parameter name for consistent lookup.
fn normalize_param_name(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-', '_'], "")
}

/// Engine index of the parameter called `name`.
///
/// Matches the string id, the display name or the short name, ignoring
/// case, spaces, dashes and underscores.
pub fn param_index(name: &str) -> Option<usize> {
    let wanted = normalize_param_name(name);
    DESCRIPTORS.iter().position(|d| {
        [d.string_id, d.name, d.short_name]
            .iter()
            .any(|candidate| normalize_param_name(candidate) == wanted)
    })
}

/// Descriptor of the parameter called `name`.
pub fn param_descriptor(name: &str) -> Option<ParamDescriptor> {
    param_index(name).map(|i| DESCRIPTORS[i])
}

/// Check one value against the parameter at engine index `index`.
pub fn validate_param_value(index: usize, value: f32) -> ValidationResult<()> {
    let desc = DESCRIPTORS
        .get(index)
        .copied()
        .ok_or_else(|| ValidationError::UnknownParameter(index.to_string()))?;

    if value.is_nan() {
        return Err(ValidationError::NotANumber(desc.string_id.to_string()));
    }
    if params::in_range(index, value) {
        return Ok(());
    }

    let max = if index == REVTIME { f32::INFINITY } else { desc.max };
    Err(ValidationError::OutOfRange {
        param: desc.string_id.to_string(),
        value,
        min: desc.min,
        max,
    })
}

/// Check one value against the parameter called `name`.
pub fn validate_param(name: &str, value: f32) -> ValidationResult<()> {
    let index = param_index(name).ok_or_else(|| ValidationError::UnknownParameter(name.to_string()))?;
    validate_param_value(index, value)
}

/// Validate every stored value of a preset.
///
/// Reports all violations at once, wrapped in
/// [`ValidationError::Multiple`] when there is more than one.
pub fn validate_preset(preset: &ReverbPreset) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if preset.sample_rate == 0 {
        errors.push(ValidationError::InvalidSampleRate(preset.sample_rate));
    }
    for (index, value) in preset.parameters.iter() {
        if let Err(e) = validate_param_value(index, value) {
            errors.push(e);
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
