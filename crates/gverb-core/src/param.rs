//! Exponentially smoothed control values.
//!
//! Reverb controls arrive at control rate from a host or UI thread, but the
//! network reads them every sample. [`SmoothedParam`] bridges the two with
//! a one-pole ramp towards the latest target so gain and coefficient jumps
//! do not click.
//!
//! ```rust
//! use gverb_core::SmoothedParam;
//!
//! let mut tail = SmoothedParam::with_config(0.25, 48000.0, 10.0);
//! tail.set_target(0.5);
//!
//! for _ in 0..4800 {
//!     tail.advance();
//! }
//! assert!((tail.get() - 0.5).abs() < 1e-3);
//! ```

use libm::expf;

use crate::math::ms_to_samples;

/// A control value that glides exponentially towards its target.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    /// Current smoothed value
    current: f32,
    /// Target value we're smoothing towards
    target: f32,
    /// Smoothing coefficient (1 = instant, ~0 = very slow)
    coeff: f32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Smoothing time constant in milliseconds
    smoothing_time_ms: f32,
}

impl SmoothedParam {
    /// Create a parameter at `initial` with smoothing disabled (instant changes).
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: 1.0,
            sample_rate: 48000.0,
            smoothing_time_ms: 0.0,
        }
    }

    /// Create a parameter with a smoothing time constant.
    ///
    /// # Arguments
    /// * `initial` - Initial value (current and target)
    /// * `sample_rate` - Sample rate in Hz
    /// * `smoothing_time_ms` - Time constant in milliseconds
    pub fn with_config(initial: f32, sample_rate: f32, smoothing_time_ms: f32) -> Self {
        let mut param = Self::new(initial);
        param.sample_rate = sample_rate;
        param.smoothing_time_ms = smoothing_time_ms;
        param.recalculate_coeff();
        param
    }

    /// Set the value to glide towards.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Set target and current value at once (no glide).
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Update sample rate and recalculate the smoothing coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    /// Advance one sample and return the smoothed value.
    ///
    /// Lands exactly on the target once the remaining step is too small to
    /// change the value in f32.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.current != self.target {
            // y[n] = y[n-1] + coeff * (target - y[n-1])
            let next = self.current + self.coeff * (self.target - self.current);
            self.current = if next == self.current { self.target } else { next };
        }
        self.current
    }

    /// Current smoothed value.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// `true` once the value is within 1e-6 of the target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }

    /// Jump straight to the target.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    /// `coeff = 1 - exp(-1 / (tau * sample_rate))`, tau in seconds.
    ///
    /// After one time constant the value has covered 63.2% of the distance
    /// to the target, after five about 99.3%.
    fn recalculate_coeff(&mut self) {
        if self.smoothing_time_ms <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0;
        } else {
            let samples = ms_to_samples(self.smoothing_time_ms, self.sample_rate);
            self.coeff = 1.0 - expf(-1.0 / samples);
        }
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}
