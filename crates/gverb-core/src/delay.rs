//! Circular-buffer delay line.
//!
//! [`DelayLine`] is the storage primitive behind every time-based stage of
//! the reverb: the four feedback lines, the allpass diffusers and the long
//! early-reflection tap line.
//!
//! # Read/write convention
//!
//! Reads happen *before* the write of the current sample. With a configured
//! delay of `d` samples, calling [`DelayLine::read`] and then
//! [`DelayLine::write`] once per sample returns the sample that was written
//! exactly `d` calls earlier:
//!
//! ```text
//! y[n] = x[n - d]      for 1 <= d <= max_delay
//! ```
//!
//! The write head therefore always leads the read head by the configured
//! delay (mod capacity). The buffer is allocated once in [`DelayLine::new`]
//! and never reallocates; changing the delay only moves the read head.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Interpolation method for fractional delay reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// No interpolation (truncate to the whole sample).
    None,
    /// Linear interpolation between the two neighbouring samples.
    #[default]
    Linear,
}

/// Fixed-capacity delay line with a configurable (and modulatable) length.
///
/// # Memory
///
/// The buffer holds `max_delay + 1` samples, heap-allocated during
/// construction. No allocation happens during audio processing.
///
/// # Example
///
/// ```rust
/// use gverb_core::DelayLine;
///
/// let mut line = DelayLine::new(100);
/// line.set_delay(3.0);
///
/// let mut out = Vec::new();
/// for x in [1.0, 0.0, 0.0, 0.0] {
///     out.push(line.read());
///     line.write(x);
/// }
/// assert_eq!(out, [0.0, 0.0, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    /// Circular buffer storage
    buffer: Vec<f32>,
    /// Index of the next write
    write_pos: usize,
    /// Configured delay in samples, within [1, max_delay]
    delay: f32,
    /// Interpolation used for fractional reads
    interpolation: Interpolation,
}

impl DelayLine {
    /// Creates a delay line able to delay by up to `max_delay_samples`.
    ///
    /// The configured delay starts at the maximum.
    ///
    /// # Panics
    ///
    /// Panics if `max_delay_samples` is 0.
    pub fn new(max_delay_samples: usize) -> Self {
        assert!(max_delay_samples > 0, "Delay size must be > 0");

        Self {
            buffer: vec![0.0; max_delay_samples + 1],
            write_pos: 0,
            delay: max_delay_samples as f32,
            interpolation: Interpolation::Linear,
        }
    }

    /// Sets the interpolation method for fractional reads.
    pub fn set_interpolation(&mut self, interp: Interpolation) {
        self.interpolation = interp;
    }

    /// Sets the delay length in samples, clamped to `[1, max_delay]`.
    ///
    /// Non-finite values are ignored.
    #[inline]
    pub fn set_delay(&mut self, delay_samples: f32) {
        if delay_samples.is_finite() {
            self.delay = delay_samples.clamp(1.0, self.max_delay() as f32);
        }
    }

    /// Returns the configured delay in samples.
    #[inline]
    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Returns the largest delay this line can produce.
    #[inline]
    pub fn max_delay(&self) -> usize {
        self.buffer.len() - 1
    }

    /// Reads the output for the configured delay.
    #[inline]
    pub fn read(&self) -> f32 {
        self.read_at(self.delay)
    }

    /// Reads a tap `delay_samples` behind the next write.
    ///
    /// The tap position is clamped to `[1, max_delay]`.
    #[inline]
    pub fn read_at(&self, delay_samples: f32) -> f32 {
        let len = self.buffer.len();
        let delay = delay_samples.max(1.0).min((len - 1) as f32);

        let delay_int = delay as usize;
        let frac = delay - delay_int as f32;

        let read_pos = (self.write_pos + len - delay_int) % len;

        match self.interpolation {
            Interpolation::None => self.buffer[read_pos],
            Interpolation::Linear => {
                let a = self.buffer[read_pos];
                if frac == 0.0 {
                    return a;
                }
                let b = self.buffer[(read_pos + len - 1) % len];
                a + (b - a) * frac
            }
        }
    }

    /// Writes a sample and advances the write head.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Clears the delay line to silence.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
