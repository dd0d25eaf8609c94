//! Allpass diffuser for reverb smearing.
//!
//! The Gigaverb-style allpass keeps a single delay line and feeds it with
//! the input minus the scaled delayed sample:
//!
//! ```text
//! buf  = delay.read()
//! feed = x - g * buf
//! delay.write(feed)
//! y    = buf + g * feed
//! ```
//!
//! The transfer function is `(g + z^-N) / (1 + g z^-N)`, so magnitude is
//! flat for |g| < 1 while the phase is smeared. Chained with mutually
//! different lengths, diffusers turn an impulse into dense noise-like
//! echoes without colouring the spectrum.

use crate::DelayLine;
use crate::flush_denormal;

/// Largest allowed |coefficient|; the allpass is stable for |g| < 1.
const MAX_COEFFICIENT: f32 = 0.99;

/// Single allpass diffusion stage.
///
/// # Example
///
/// ```rust
/// use gverb_core::Diffuser;
///
/// let mut diffuser = Diffuser::new(512, 0.75);
/// diffuser.set_length(300);
///
/// let first = diffuser.process(1.0);
/// assert_eq!(first, 0.75);
/// ```
#[derive(Debug, Clone)]
pub struct Diffuser {
    delay: DelayLine,
    coeff: f32,
}

impl Diffuser {
    /// Create a diffuser able to hold up to `max_length` samples.
    ///
    /// The length starts at `max_length`.
    pub fn new(max_length: usize, coeff: f32) -> Self {
        let mut diffuser = Self {
            delay: DelayLine::new(max_length),
            coeff: 0.0,
        };
        diffuser.set_coefficient(coeff);
        diffuser
    }

    /// Set the allpass coefficient, clamped to ±0.99.
    #[inline]
    pub fn set_coefficient(&mut self, coeff: f32) {
        if !coeff.is_nan() {
            self.coeff = coeff.clamp(-MAX_COEFFICIENT, MAX_COEFFICIENT);
        }
    }

    /// Current allpass coefficient.
    #[inline]
    pub fn coefficient(&self) -> f32 {
        self.coeff
    }

    /// Set the loop length in whole samples (clamped to the capacity, min 1).
    #[inline]
    pub fn set_length(&mut self, length: usize) {
        self.delay.set_delay(length as f32);
    }

    /// Current loop length in samples.
    #[inline]
    pub fn length(&self) -> usize {
        self.delay.delay() as usize
    }

    /// Process a single sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let buffered = self.delay.read();
        let feed = flush_denormal(input - self.coeff * buffered);
        self.delay.write(feed);
        buffered + self.coeff * feed
    }

    /// Clear the diffuser state.
    pub fn clear(&mut self) {
        self.delay.clear();
    }

    /// Maximum loop length in samples.
    pub fn capacity(&self) -> usize {
        self.delay.max_delay()
    }
}
