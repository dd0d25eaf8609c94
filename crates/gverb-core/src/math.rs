//! Math helpers shared by the reverb stages.
//!
//! - [`db_to_linear`] - level conversion
//! - [`flush_denormal`] - keeps feedback loops out of the subnormal range
//! - [`decay_coefficient`] / [`decay_gain`] - RT60 decay per sample and per delay
//! - [`ms_to_samples`] - time conversion

use libm::pow;

/// Attenuation that defines the reverberation time, in dB.
pub const RT60_DB: f64 = -60.0;

/// Convert decibels to linear amplitude.
///
/// # Example
/// ```rust
/// use gverb_core::db_to_linear;
///
/// assert_eq!(db_to_linear(0.0), 1.0);
/// assert!((db_to_linear(-60.0) - 0.001).abs() < 1e-12);
/// ```
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    pow(10.0, db / 20.0)
}

/// Convert milliseconds to (fractional) samples.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// Flush values below 1e-20 to zero.
///
/// Subnormal floats are very slow on most CPUs, and a decaying reverb tail
/// passes through that range on its way to silence.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Per-sample amplitude factor that decays 60 dB in `revtime` seconds.
///
/// ```text
/// alpha = (10^(-60/20)) ^ (1 / (revtime * sample_rate))
/// ```
///
/// Computed in `f64`: for long reverb times `alpha` is within 1e-6 of one,
/// which `f32` cannot resolve. An infinite `revtime` yields exactly `1.0`.
///
/// # Example
/// ```rust
/// use gverb_core::decay_coefficient;
///
/// let alpha = decay_coefficient(2.0, 48000.0);
/// // After two seconds the amplitude is down 60 dB.
/// let after = alpha.powf(96000.0);
/// assert!((after - 0.001).abs() < 1e-9);
/// ```
#[inline]
pub fn decay_coefficient(revtime: f64, sample_rate: f64) -> f64 {
    pow(db_to_linear(RT60_DB), 1.0 / (revtime * sample_rate))
}

/// Gain applied to a signal that travels `delay_samples` through a medium
/// decaying by `alpha` per sample.
#[inline]
pub fn decay_gain(alpha: f64, delay_samples: f64) -> f64 {
    pow(alpha, delay_samples)
}
