//! The eight reverb controls, their ranges and their descriptors.
//!
//! | index | id | string id | range | default |
//! |---|---|---|---|---|
//! | 0 | 1600 | `roomsize` | 0.1 to 300 m | 75 |
//! | 1 | 1601 | `revtime` | 0.1 s and up | 11 |
//! | 2 | 1602 | `damping` | 0 to 1 | 0.7 |
//! | 3 | 1603 | `bandwidth` | 0 to 1 | 0.5 |
//! | 4 | 1604 | `spread` | 0 to 100 | 23 |
//! | 5 | 1605 | `dry` | 0 to 1 | 1 |
//! | 6 | 1606 | `early` | 0 to 1 | 0.25 |
//! | 7 | 1607 | `tail` | 0 to 1 | 0.25 |
//!
//! `revtime` has no upper limit; its descriptor's max of 1000 s only
//! anchors normalization for host sliders.

use gverb_core::{ParamDescriptor, ParamId, ParamScale, ParamUnit};

/// Number of reverb parameters.
pub const PARAM_COUNT: usize = 8;

/// Index of `roomsize`.
pub const ROOMSIZE: usize = 0;
/// Index of `revtime`.
pub const REVTIME: usize = 1;
/// Index of `damping`.
pub const DAMPING: usize = 2;
/// Index of `bandwidth`.
pub const BANDWIDTH: usize = 3;
/// Index of `spread`.
pub const SPREAD: usize = 4;
/// Index of `dry`.
pub const DRY: usize = 5;
/// Index of `early`.
pub const EARLY: usize = 6;
/// Index of `tail`.
pub const TAIL: usize = 7;

/// Smallest room, in metres.
pub const MIN_ROOM_SIZE: f32 = 0.1;
/// Largest room, in metres. Delay buffers are sized for it.
pub const MAX_ROOM_SIZE: f32 = 300.0;
/// Shortest reverberation time, in seconds.
pub const MIN_REVTIME: f32 = 0.1;
/// Largest spread offset.
pub const MAX_SPREAD: f32 = 100.0;

/// Descriptors for all parameters, in index order.
pub const DESCRIPTORS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::new(
        "Room Size",
        "Room",
        ParamUnit::Meters,
        MIN_ROOM_SIZE,
        MAX_ROOM_SIZE,
        75.0,
    )
    .with_id(ParamId(1600), "roomsize")
    .with_scale(ParamScale::Logarithmic)
    .with_step(0.1),
    ParamDescriptor::new(
        "Reverb Time",
        "RevTime",
        ParamUnit::Seconds,
        MIN_REVTIME,
        1000.0,
        11.0,
    )
    .with_id(ParamId(1601), "revtime")
    .with_scale(ParamScale::Logarithmic)
    .with_step(0.1),
    ParamDescriptor::new("Damping", "Damping", ParamUnit::None, 0.0, 1.0, 0.7)
        .with_id(ParamId(1602), "damping"),
    ParamDescriptor::new("Input Bandwidth", "Bandwdth", ParamUnit::None, 0.0, 1.0, 0.5)
        .with_id(ParamId(1603), "bandwidth"),
    ParamDescriptor::new("Stereo Spread", "Spread", ParamUnit::Samples, 0.0, MAX_SPREAD, 23.0)
        .with_id(ParamId(1604), "spread")
        .with_step(1.0),
    ParamDescriptor::new("Dry Level", "Dry", ParamUnit::None, 0.0, 1.0, 1.0)
        .with_id(ParamId(1605), "dry"),
    ParamDescriptor::new("Early Level", "Early", ParamUnit::None, 0.0, 1.0, 0.25)
        .with_id(ParamId(1606), "early"),
    ParamDescriptor::new("Tail Level", "Tail", ParamUnit::None, 0.0, 1.0, 0.25)
        .with_id(ParamId(1607), "tail"),
];

/// `true` if `value` is acceptable for the parameter at `index` without
/// clamping. `revtime` is only bounded below.
pub fn in_range(index: usize, value: f32) -> bool {
    match DESCRIPTORS.get(index) {
        Some(desc) if index == REVTIME => value >= desc.min,
        Some(desc) => desc.contains(value),
        None => false,
    }
}

/// Clamp `value` into the accepted range of the parameter at `index`.
///
/// NaN is passed through; callers decide what to keep instead.
pub fn clamp_value(index: usize, value: f32) -> f32 {
    match DESCRIPTORS.get(index) {
        Some(_) if value.is_nan() => value,
        Some(desc) if index == REVTIME => value.max(desc.min),
        Some(desc) => desc.clamp(value),
        None => value,
    }
}

/// Plain set of reverb controls.
///
/// Values are only guaranteed to lie in range after
/// [`sanitized`](Self::sanitized); the engine applies it on every update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParameters {
    /// Room size in metres, scales every delay length.
    pub roomsize: f32,
    /// Time in seconds for the tail to fall by 60 dB.
    pub revtime: f32,
    /// High-frequency damping inside the feedback loop.
    pub damping: f32,
    /// Input lowpass: 1 passes everything, 0 blocks everything.
    pub bandwidth: f32,
    /// Delay offset between the left and right output diffusers.
    pub spread: f32,
    /// Level of the unprocessed input.
    pub dry: f32,
    /// Level of the early reflections.
    pub early: f32,
    /// Level of the late reverb tail.
    pub tail: f32,
}

impl Default for ReverbParameters {
    fn default() -> Self {
        Self::from_array(DESCRIPTORS.map(|d| d.default))
    }
}

impl ReverbParameters {
    /// Values in index order.
    pub const fn to_array(&self) -> [f32; PARAM_COUNT] {
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

    /// Build from values in index order.
    pub const fn from_array(values: [f32; PARAM_COUNT]) -> Self {
        Self {
            roomsize: values[ROOMSIZE],
            revtime: values[REVTIME],
            damping: values[DAMPING],
            bandwidth: values[BANDWIDTH],
            spread: values[SPREAD],
            dry: values[DRY],
            early: values[EARLY],
            tail: values[TAIL],
        }
    }

    /// Value at `index`, `None` when out of range.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.to_array().get(index).copied()
    }

    /// Overwrite the value at `index`. Unknown indices are ignored.
    pub fn set(&mut self, index: usize, value: f32) {
        let mut values = self.to_array();
        if let Some(slot) = values.get_mut(index) {
            *slot = value;
            *self = Self::from_array(values);
        }
    }

    /// Clamp every field into range; NaN fields take the value from `fallback`.
    ///
    /// Applying it twice gives the same result as applying it once.
    pub fn sanitized(&self, fallback: &Self) -> Self {
        let requested = self.to_array();
        let previous = fallback.to_array();
        let mut values = [0.0; PARAM_COUNT];
        for (i, value) in values.iter_mut().enumerate() {
            let clamped = clamp_value(i, requested[i]);
            *value = if clamped.is_nan() {
                #[cfg(feature = "tracing")]
                tracing::warn!(param = DESCRIPTORS[i].string_id, "NaN ignored, keeping previous value");
                clamp_value(i, previous[i])
            } else {
                #[cfg(feature = "tracing")]
                if clamped.to_bits() != requested[i].to_bits() {
                    tracing::warn!(
                        param = DESCRIPTORS[i].string_id,
                        requested = requested[i],
                        clamped,
                        "parameter clamped"
                    );
                }
                clamped
            };
        }
        Self::from_array(values)
    }

    /// `true` if every field is in range.
    pub fn is_valid(&self) -> bool {
        self.to_array()
            .iter()
            .enumerate()
            .all(|(i, &v)| in_range(i, v))
    }
}
