//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use gverb::params::PARAM_COUNT;
use gverb::{ReverbEngine, ReverbParameters};

use crate::error::ConfigError;
use crate::validation::{param_index, validate_preset};

/// Reverb controls stored in a preset. Unset controls take their defaults.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PresetParameters {
    /// Room size in metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roomsize: Option<f32>,
    /// Reverb time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revtime: Option<f32>,
    /// Feedback damping, 0 to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damping: Option<f32>,
    /// Input bandwidth, 0 to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<f32>,
    /// Stereo spread, 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<f32>,
    /// Dry level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry: Option<f32>,
    /// Early reflection level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early: Option<f32>,
    /// Tail level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail: Option<f32>,
}

impl PresetParameters {
    /// Every control set to the value in `params`.
    pub fn from_parameters(params: &ReverbParameters) -> Self {
        Self::from_array(params.to_array().map(Some))
    }

    /// Values in engine index order.
    pub fn to_array(&self) -> [Option<f32>; PARAM_COUNT] {
        [
            self.roomsize,
            self.revtime,
            self.damping,
            self.bandwidth,
            self.spread,
            self.dry,
            self.early,
            self.tail,
        ]
    }

    /// Build from values in engine index order.
    pub fn from_array(values: [Option<f32>; PARAM_COUNT]) -> Self {
        let [roomsize, revtime, damping, bandwidth, spread, dry, early, tail] = values;
        Self {
            roomsize,
            revtime,
            damping,
            bandwidth,
            spread,
            dry,
            early,
            tail,
        }
    }

    /// Value at engine index `index`, `None` when unset.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.to_array().get(index).copied().flatten()
    }

    /// Set or clear the value at engine index `index`.
    pub fn set(&mut self, index: usize, value: Option<f32>) {
        let mut values = self.to_array();
        if let Some(slot) = values.get_mut(index) {
            *slot = value;
            *self = Self::from_array(values);
        }
    }

    /// `(index, value)` of every control that is set.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> {
        self.to_array()
            .into_iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i, v)))
    }

    /// `base` with every set control overridden.
    pub fn resolve(&self, base: &ReverbParameters) -> ReverbParameters {
        let mut params = *base;
        for (index, value) in self.iter() {
            params.set(index, value);
        }
        params
    }
}

/// A named reverb setting.
///
/// # TOML Format
///
/// ```toml
/// name = "Nice Hall"
/// description = "Big and smooth"
/// sample_rate = 48000
///
/// [parameters]
/// roomsize = 40.0
/// revtime = 20.0
/// damping = 0.5
/// ```
///
/// Controls missing from `[parameters]` take their defaults. Unknown keys
/// are rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReverbPreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate hint (defaults to 48000), used by [`ReverbPreset::engine`].
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Reverb controls.
    #[serde(default)]
    pub parameters: PresetParameters,
}

fn default_sample_rate() -> u32 {
    48000
}

impl ReverbPreset {
    /// Create a preset that leaves every control at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            parameters: PresetParameters::default(),
        }
    }

    /// Create a preset that stores every control of `params`.
    pub fn from_parameters(name: impl Into<String>, params: &ReverbParameters) -> Self {
        Self::new(name).with_parameters(params)
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Store every control of `params`.
    pub fn with_parameters(mut self, params: &ReverbParameters) -> Self {
        self.parameters = PresetParameters::from_parameters(params);
        self
    }

    /// Set one control by name (`roomsize`, `Room Size`, `room`, ...).
    pub fn set_param(&mut self, name: &str, value: f32) -> Result<(), ConfigError> {
        let index = param_index(name).ok_or_else(|| ConfigError::UnknownParameter(name.to_string()))?;
        if value.is_nan() {
            return Err(ConfigError::InvalidValue {
                param: name.to_string(),
                reason: "not a number".to_string(),
            });
        }
        self.parameters.set(index, Some(value));
        Ok(())
    }

    /// Stored value of a control by name, `None` if unknown or unset.
    pub fn get_param(&self, name: &str) -> Option<f32> {
        param_index(name).and_then(|i| self.parameters.get(i))
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::read_file(path, e))?;
        let preset: ReverbPreset = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "preset loaded");
        Ok(preset)
    }

    /// Load a preset file and reject it if any stored value is out of range.
    ///
    /// [`load`](Self::load) accepts such files and clamps on use; this fails
    /// with [`ConfigError::Validation`] instead.
    pub fn load_strict(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let preset = Self::load(path)?;
        validate_preset(&preset)?;
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), name = %self.name, "preset saved");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Complete engine parameters: defaults overridden by the stored
    /// controls, clamped into range.
    pub fn to_parameters(&self) -> ReverbParameters {
        let defaults = ReverbParameters::default();
        self.parameters.resolve(&defaults).sanitized(&defaults)
    }

    /// Retarget a running engine to this preset. Changes glide in.
    pub fn apply_to(&self, engine: &mut ReverbEngine) {
        tracing::debug!(name = %self.name, "applying preset");
        engine.set_parameters(self.to_parameters());
    }

    /// Build an engine at the preset's sample rate, starting exactly at its
    /// parameters.
    pub fn engine(&self) -> ReverbEngine {
        ReverbEngine::with_parameters(self.sample_rate as f32, self.to_parameters())
    }
}

impl Default for ReverbPreset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
