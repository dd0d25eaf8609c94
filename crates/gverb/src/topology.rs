//! Delay lengths and gains derived from the structural parameters.
//!
//! Everything time-based in the reverb scales with the room: the longest
//! feedback line is the time sound needs to cross the room,
//! `largest = roomsize * sample_rate / 340`. The other lines, the
//! diffusers and the early taps are fixed fractions of it.
//!
//! The loop gains make every recirculation lose the same amount per
//! sample, `alpha = 10^(-3 / (revtime * sample_rate))`, so a line of `len`
//! samples is scaled by `alpha^len` and the whole network decays 60 dB in
//! `revtime` seconds whatever the line lengths.

use gverb_core::{decay_coefficient, decay_gain};
use libm::roundf;

use crate::params::{MAX_ROOM_SIZE, MAX_SPREAD};

/// Speed of sound in m/s.
pub const SPEED_OF_SOUND: f32 = 340.0;

/// Feedback line lengths relative to the longest one.
pub const FDN_RATIOS: [f32; 4] = [1.0, 0.81649, 0.7071, 0.63245];

/// Prediffusion stage lengths relative to the first stage.
pub const PREDIFFUSION_RATIOS: [f32; 4] = [1.0, 0.81649, 0.7071, 0.63245];

/// Allpass coefficients of every four-stage diffuser chain.
pub const DIFFUSION_COEFFICIENTS: [f32; 4] = [0.75, 0.75, 0.625, 0.625];

/// Early tap positions as fractions of the longest line.
pub const TAP_RATIOS: [f32; 4] = [0.41, 0.3, 0.155, 0.0];

/// Fixed offset added to every tap, in samples.
pub const TAP_OFFSET: f32 = 5.0;

/// Output diffuser breakpoints at unit scale: `b`, `c`, `d` and the total.
const OUTPUT_B: f32 = 210.0;
const OUTPUT_C: f32 = 369.0;
const OUTPUT_D: f32 = 931.0;
const OUTPUT_TOTAL: f32 = 1341.0;

/// Spread sensitivity `(r1, r2)` of the left chain.
const LEFT_SPREAD: (f32, f32) = (0.125541, 0.854046);
/// Spread sensitivity `(r1, r2)` of the right chain.
const RIGHT_SPREAD: (f32, f32) = (-0.568366, -0.126815);

/// Output channel of the stereo diffusers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Left output.
    Left,
    /// Right output.
    Right,
}

impl Channel {
    fn spread_ratios(self) -> (f32, f32) {
        match self {
            Channel::Left => LEFT_SPREAD,
            Channel::Right => RIGHT_SPREAD,
        }
    }
}

/// Every derived length and gain for one set of structural parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Topology {
    /// Room crossing time in samples.
    pub largest: f32,
    /// Per-sample decay factor.
    pub alpha: f64,
    /// Feedback line lengths in samples.
    pub fdn_lengths: [usize; 4],
    /// Feedback loop gains, `-alpha^len`.
    pub fdn_gains: [f32; 4],
    /// Prediffusion stage lengths.
    pub prediffusion_lengths: [usize; 4],
    /// Left output diffuser lengths.
    pub left_lengths: [usize; 4],
    /// Right output diffuser lengths.
    pub right_lengths: [usize; 4],
    /// Early tap positions in (fractional) samples.
    pub taps: [f32; 4],
    /// Early tap gains, `alpha^tap`.
    pub tap_gains: [f32; 4],
}

impl Topology {
    /// Derive the topology for the given parameters.
    ///
    /// Inputs are expected sanitized; lengths are never below one sample.
    pub fn compute(roomsize: f32, spread: f32, revtime: f32, sample_rate: f32) -> Self {
        let largest = room_samples(roomsize, sample_rate);
        let fdn_lengths = fdn_lengths(largest);
        let alpha = decay_coefficient(f64::from(revtime), f64::from(sample_rate));

        let fdn_gains = fdn_lengths.map(|len| -decay_gain(alpha, len as f64) as f32);

        let diffscale = diffusion_scale(&fdn_lengths);
        let base = diffscale * OUTPUT_B;
        let prediffusion_lengths = PREDIFFUSION_RATIOS.map(|r| rounded_length(base * r));

        let taps = TAP_RATIOS.map(|r| TAP_OFFSET + r * largest);
        let tap_gains = taps.map(|t| decay_gain(alpha, f64::from(t)) as f32);

        Self {
            largest,
            alpha,
            fdn_lengths,
            fdn_gains,
            prediffusion_lengths,
            left_lengths: output_lengths(Channel::Left, spread, diffscale),
            right_lengths: output_lengths(Channel::Right, spread, diffscale),
            taps,
            tap_gains,
        }
    }

    /// Lengths for the given channel.
    pub fn output_lengths(&self, channel: Channel) -> &[usize; 4] {
        match channel {
            Channel::Left => &self.left_lengths,
            Channel::Right => &self.right_lengths,
        }
    }
}

/// Buffer sizes that hold every topology reachable at one sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// Feedback lines.
    pub fdn: [usize; 4],
    /// Prediffusion stages.
    pub prediffusion: [usize; 4],
    /// Left output stages.
    pub left: [usize; 4],
    /// Right output stages.
    pub right: [usize; 4],
    /// Early tap line.
    pub taps: usize,
}

impl Capacity {
    /// Capacity for the largest room at `sample_rate`.
    ///
    /// Output stage lengths move linearly with spread, so the extremes are
    /// at zero and maximum spread.
    pub fn for_sample_rate(sample_rate: f32) -> Self {
        let narrow = Topology::compute(MAX_ROOM_SIZE, 0.0, 1.0, sample_rate);
        let wide = Topology::compute(MAX_ROOM_SIZE, MAX_SPREAD, 1.0, sample_rate);
        let max4 = |a: [usize; 4], b: [usize; 4]| core::array::from_fn(|i| a[i].max(b[i]));

        // One extra sample keeps the interpolated tap inside the buffer.
        let longest_tap = narrow.taps.iter().fold(0.0f32, |m, &t| m.max(t));

        Self {
            fdn: narrow.fdn_lengths,
            prediffusion: narrow.prediffusion_lengths,
            left: max4(narrow.left_lengths, wide.left_lengths),
            right: max4(narrow.right_lengths, wide.right_lengths),
            taps: longest_tap as usize + 2,
        }
    }
}

/// Samples sound needs to cross `roomsize` metres.
#[inline]
pub fn room_samples(roomsize: f32, sample_rate: f32) -> f32 {
    roomsize * sample_rate / SPEED_OF_SOUND
}

/// Feedback line lengths for a room of `largest` samples.
#[inline]
pub fn fdn_lengths(largest: f32) -> [usize; 4] {
    FDN_RATIOS.map(|r| rounded_length(r * largest))
}

/// Scale of the diffuser lengths, relative to a 1341-sample shortest line.
#[inline]
fn diffusion_scale(fdn_lengths: &[usize; 4]) -> f32 {
    fdn_lengths[3] as f32 / OUTPUT_TOTAL
}

fn output_lengths(channel: Channel, spread: f32, diffscale: f32) -> [usize; 4] {
    let (r1, r2) = channel.spread_ratios();
    let s1 = spread;
    let s2 = 3.0 * spread;

    let b = OUTPUT_B;
    let c = OUTPUT_C + r1 * s1;
    let d = OUTPUT_D + r2 * s2;
    let stages = [b, c - b, d - c, OUTPUT_TOTAL - d];

    stages.map(|len| truncated_length(diffscale * len))
}

#[inline]
fn rounded_length(samples: f32) -> usize {
    (roundf(samples) as usize).max(1)
}

#[inline]
fn truncated_length(samples: f32) -> usize {
    (samples as usize).max(1)
}
