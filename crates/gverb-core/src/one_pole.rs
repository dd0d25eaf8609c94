//! One-pole lowpass ("damper") for bandwidth limiting and HF damping.
//!
//! A single-pole IIR lowpass with the difference equation:
//!
//! ```text
//! y[n] = (1 - c) * x[n] + c * y[n-1]
//! ```
//!
//! The coefficient `c` is the amount of damping: `c = 0` passes the input
//! through unchanged, `c = 1` freezes the output at its last value. Written
//! in this form both ends are exact, with no rounding residue.
//!
//! The reverb uses it twice: once on the input (coefficient
//! `1 - bandwidth`) and once inside each feedback line (coefficient
//! `damping`), where it makes high frequencies decay faster than lows.
//!
//! # Usage
//!
//! ```rust
//! use gverb_core::OnePole;
//!
//! let mut lp = OnePole::new(0.5);
//! assert_eq!(lp.process(1.0), 0.5);
//! assert_eq!(lp.process(1.0), 0.75);
//! ```

use crate::flush_denormal;

/// One-pole (6 dB/oct) lowpass filter with a direct damping coefficient.
///
/// # Invariants
///
/// - `coeff` is always in [0, 1]; below 1 the filter is strictly stable
/// - `state` is flushed to zero when below 1e-20 (denormal protection)
#[derive(Debug, Clone)]
pub struct OnePole {
    state: f32,
    coeff: f32,
}

impl OnePole {
    /// Create a new filter with the given damping coefficient (clamped to [0, 1]).
    pub fn new(coeff: f32) -> Self {
        let mut filter = Self {
            state: 0.0,
            coeff: 0.0,
        };
        filter.set_coefficient(coeff);
        filter
    }

    /// Set the damping coefficient, clamped to [0, 1].
    ///
    /// NaN leaves the coefficient unchanged.
    #[inline]
    pub fn set_coefficient(&mut self, coeff: f32) {
        if !coeff.is_nan() {
            self.coeff = coeff.clamp(0.0, 1.0);
        }
    }

    /// Current damping coefficient.
    #[inline]
    pub fn coefficient(&self) -> f32 {
        self.coeff
    }

    /// Process one sample through the lowpass filter.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal((1.0 - self.coeff) * input + self.coeff * self.state);
        self.state
    }

    /// The last output sample.
    #[inline]
    pub fn state(&self) -> f32 {
        self.state
    }

    /// Reset filter state to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

impl Default for OnePole {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_dc() {
        let mut lp = OnePole::new(0.9);
        let mut out = 0.0;
        for _ in 0..2000 {
            out = lp.process(1.0);
        }
        assert!(
            (out - 1.0).abs() < 1e-4,
            "DC should pass through, got {out}"
        );
    }

    #[test]
    fn zero_coefficient_is_transparent() {
        let mut lp = OnePole::new(0.0);
        for x in [0.3, -0.7, 1.0, 0.123_456] {
            assert_eq!(lp.process(x), x);
        }
    }

    #[test]
    fn unit_coefficient_freezes() {
        let mut lp = OnePole::new(0.5);
        lp.process(1.0);
        lp.set_coefficient(1.0);
        for x in [0.3, -0.7, 1.0] {
            assert_eq!(lp.process(x), 0.5);
        }
    }

    #[test]
    fn attenuates_high_freq() {
        let mut lp = OnePole::new(0.99);
        let mut sum = 0.0f32;
        for i in 0..4800 {
            let input = if i % 2 == 0 { 1.0 } else { -1.0 };
            sum += lp.process(input).abs();
        }
        let avg = sum / 4800.0;
        assert!(
            avg < 0.05,
            "Nyquist signal should be heavily attenuated, avg = {avg}"
        );
    }

    #[test]
    fn coefficient_clamped() {
        let mut lp = OnePole::new(1.5);
        assert_eq!(lp.coefficient(), 1.0);
        lp.set_coefficient(-0.2);
        assert_eq!(lp.coefficient(), 0.0);
        lp.set_coefficient(f32::NAN);
        assert_eq!(lp.coefficient(), 0.0);
    }

    #[test]
    fn reset_clears_state() {
        let mut lp = OnePole::new(0.5);
        lp.process(1.0);
        lp.process(1.0);
        lp.reset();
        assert_eq!(lp.state(), 0.0);
        assert_eq!(lp.process(0.0), 0.0);
    }
}
