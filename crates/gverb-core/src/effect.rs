//! The processing trait for mono-in, stereo-out effects.
//!
//! A reverb takes one channel and spreads it over two, so [`Effect::process`]
//! maps a single input sample to a `(left, right)` pair. Block processing is
//! provided on top of the per-sample call and never allocates.

/// Mono-input, stereo-output audio effect.
///
/// The trait is object-safe; `dyn Effect` works for hosts that hold
/// heterogeneous processors, but static dispatch is preferred on the
/// audio thread.
///
/// # Example
///
/// ```rust
/// use gverb_core::Effect;
///
/// struct Pan {
///     position: f32,
/// }
///
/// impl Effect for Pan {
///     fn process(&mut self, input: f32) -> (f32, f32) {
///         (input * (1.0 - self.position), input * self.position)
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut pan = Pan { position: 0.25 };
/// assert_eq!(pan.process(1.0), (0.75, 0.25));
/// ```
pub trait Effect {
    /// Process a single sample, advancing internal state by one tick.
    fn process(&mut self, input: f32) -> (f32, f32);

    /// Process a block of mono input into two output buffers.
    ///
    /// Default implementation calls [`process`](Effect::process) per sample.
    /// Only `min(input, left, right)` samples are processed.
    fn process_block(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            left.len(),
            "Input and output buffers must have same length"
        );
        debug_assert_eq!(
            left.len(),
            right.len(),
            "Output buffers must have same length"
        );
        for ((inp, l), r) in input.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
            (*l, *r) = self.process(*inp);
        }
    }

    /// Update the sample rate and recompute everything derived from it.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear internal state (delay lines, filter history) without touching
    /// parameters.
    fn reset(&mut self);
}
