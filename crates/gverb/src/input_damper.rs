//! Bandwidth limiting of the excitation.

use gverb_core::OnePole;

/// One-pole lowpass on the mono input, controlled by `bandwidth`.
///
/// `history += bandwidth * (x - history)`: at 1 the input passes untouched,
/// at 0 the output holds its last value.
///
/// ```rust
/// use gverb::InputDamper;
///
/// let mut damper = InputDamper::new(1.0);
/// assert_eq!(damper.process(0.3), 0.3);
/// ```
#[derive(Debug, Clone)]
pub struct InputDamper {
    filter: OnePole,
}

impl InputDamper {
    /// Create a damper with the given bandwidth (clamped to [0, 1]).
    pub fn new(bandwidth: f32) -> Self {
        let mut damper = Self {
            filter: OnePole::default(),
        };
        damper.set_bandwidth(bandwidth);
        damper
    }

    /// Set the bandwidth, clamped to [0, 1].
    #[inline]
    pub fn set_bandwidth(&mut self, bandwidth: f32) {
        if !bandwidth.is_nan() {
            self.filter.set_coefficient(1.0 - bandwidth.clamp(0.0, 1.0));
        }
    }

    /// Current bandwidth.
    pub fn bandwidth(&self) -> f32 {
        1.0 - self.filter.coefficient()
    }

    /// Filter one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.filter.process(input)
    }

    /// Clear the filter history.
    pub fn reset(&mut self) {
        self.filter.reset();
    }
}
