//! Parameter introspection for hosts, presets and UIs.
//!
//! [`ParameterInfo`] exposes an effect's controls by index, each described
//! by a [`ParamDescriptor`] carrying display names, range, default, a stable
//! [`ParamId`] and a string id used as the preset key.
//!
//! ```rust
//! use gverb_core::{ParamDescriptor, ParamId, ParamScale, ParamUnit, ParameterInfo};
//!
//! struct Level {
//!     gain: f32,
//! }
//!
//! const GAIN: ParamDescriptor = ParamDescriptor::new("Gain", "Gain", ParamUnit::None, 0.0, 1.0, 0.5)
//!     .with_id(ParamId(1), "gain");
//!
//! impl ParameterInfo for Level {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         (index == 0).then_some(GAIN)
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         if index == 0 { self.gain } else { 0.0 }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.gain = GAIN.clamp(value);
//!         }
//!     }
//! }
//!
//! let mut level = Level { gain: 0.5 };
//! level.set_param(0, 3.0);
//! assert_eq!(level.get_param(0), 1.0);
//! assert_eq!(level.find_param_by_name("gain"), Some(0));
//! ```

/// Mapping between a plain value and the normalized \[0, 1\] range.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`, requires `min > 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// More resolution at low values. Used for sizes and times.
    Logarithmic,
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` never changes for a given parameter; hosts
/// record automation and presets against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Unit of a parameter value, used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Metres, for room dimensions.
    Meters,
    /// Seconds, for reverberation time.
    Seconds,
    /// Samples, for raw delay offsets.
    Samples,
    /// Dimensionless gain or coefficient.
    None,
}

impl ParamUnit {
    /// Suffix appended when formatting a value.
    ///
    /// ```rust
    /// use gverb_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Meters.suffix(), " m");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Meters => " m",
            ParamUnit::Seconds => " s",
            ParamUnit::Samples => " smp",
            ParamUnit::None => "",
        }
    }
}

/// Metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name, e.g. `"Room Size"`.
    pub name: &'static str,
    /// Name for narrow displays, at most 8 characters.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Smallest accepted value.
    pub min: f32,
    /// Largest value of the control range.
    pub max: f32,
    /// Value on construction.
    pub default: f32,
    /// Suggested encoder increment.
    pub step: f32,
    /// Stable numeric id. `ParamId(0)` means unassigned.
    pub id: ParamId,
    /// Stable string id, also the key in preset files.
    pub string_id: &'static str,
    /// Normalization curve.
    pub scale: ParamScale,
}

impl ParamDescriptor {
    /// Linear descriptor with a step of 0.01 and no id.
    pub const fn new(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
        }
    }

    /// Assign the numeric and string ids.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Set the normalization curve.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Set the encoder step.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Clamp `value` into `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// `true` if `value` lies inside `[min, max]` (NaN never does).
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Map a plain value to \[0, 1\] according to [`scale`](Self::scale).
    ///
    /// ```rust
    /// use gverb_core::{ParamDescriptor, ParamScale, ParamUnit};
    ///
    /// let size = ParamDescriptor::new("Size", "Size", ParamUnit::Meters, 1.0, 100.0, 10.0)
    ///     .with_scale(ParamScale::Logarithmic);
    /// assert!((size.normalize(10.0) - 0.5).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        }
    }

    /// Inverse of [`normalize`](Self::normalize).
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
        }
    }
}

/// Indexed access to an effect's parameters.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for `index`, `None` when out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index` (0.0 when out of range).
    fn get_param(&self, index: usize) -> f32;

    /// Set the parameter at `index`. Implementations clamp to the
    /// descriptor range and ignore unknown indices.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter by display name, short name or string id
    /// (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Stable id of the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Index of the parameter with stable id `id`. O(n), not for the audio path.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}
