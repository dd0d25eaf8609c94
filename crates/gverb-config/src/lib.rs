//! Presets and validation for the gverb reverb.
//!
//! # Features
//!
//! - **Preset files**: load and save [`ReverbPreset`]s as TOML
//! - **Factory presets**: six rooms compiled into the library
//! - **Validation**: check stored values against the engine's parameter ranges
//! - **Paths**: platform-specific user preset directory
//!
//! # Example
//!
//! ```rust,no_run
//! use gverb::ReverbParameters;
//! use gverb_config::{ReverbPreset, paths};
//!
//! let preset = ReverbPreset::from_parameters(
//!     "Stairwell",
//!     &ReverbParameters {
//!         roomsize: 12.0,
//!         revtime: 3.5,
//!         ..Default::default()
//!     },
//! )
//! .with_description("Concrete and glass");
//!
//! let path = paths::user_presets_dir().join("stairwell.toml");
//! preset.save(&path).unwrap();
//!
//! let mut engine = ReverbPreset::load(&path).unwrap().engine();
//! let (_left, _right) = engine.process_sample(0.5);
//! ```

mod error;
mod preset;

/// Platform-specific paths for presets.
pub mod paths;

/// Preset and parameter validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{find_preset, list_user_presets, load_preset, user_presets_dir};
pub use preset::{PresetParameters, ReverbPreset};
pub use validation::{
    ValidationError, ValidationResult, param_index, validate_param, validate_preset,
};
