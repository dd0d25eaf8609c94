//! Allpass diffuser chains: prediffusion ahead of the network and the two
//! decorrelating output chains behind it.
//!
//! Both use four cascaded [`Diffuser`]s with coefficients
//! `0.75, 0.75, 0.625, 0.625`. Prediffusion lengths follow the room; the
//! output chains additionally shift their breakpoints with `spread`, in
//! opposite directions per channel.

use gverb_core::Diffuser;

use crate::topology::{Channel, DIFFUSION_COEFFICIENTS};

/// Four diffusers in series.
#[derive(Debug, Clone)]
struct DiffuserChain {
    stages: [Diffuser; 4],
}

impl DiffuserChain {
    fn new(capacity: &[usize; 4]) -> Self {
        Self {
            stages: core::array::from_fn(|i| Diffuser::new(capacity[i], DIFFUSION_COEFFICIENTS[i])),
        }
    }

    #[inline]
    fn set_lengths(&mut self, lengths: &[usize; 4]) {
        for (stage, &len) in self.stages.iter_mut().zip(lengths) {
            stage.set_length(len);
        }
    }

    fn lengths(&self) -> [usize; 4] {
        core::array::from_fn(|i| self.stages[i].length())
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.stages
            .iter_mut()
            .fold(input, |sample, stage| stage.process(sample))
    }

    fn clear(&mut self) {
        for stage in &mut self.stages {
            stage.clear();
        }
    }
}

/// Smears the damped input before it enters the feedback network.
#[derive(Debug, Clone)]
pub struct PrediffusionChain {
    chain: DiffuserChain,
}

impl PrediffusionChain {
    /// Create a chain whose stages can hold up to `capacity` samples each.
    pub fn new(capacity: &[usize; 4]) -> Self {
        Self {
            chain: DiffuserChain::new(capacity),
        }
    }

    /// Set the four stage lengths (clamped to capacity).
    pub fn set_lengths(&mut self, lengths: &[usize; 4]) {
        self.chain.set_lengths(lengths);
    }

    /// Current stage lengths.
    pub fn lengths(&self) -> [usize; 4] {
        self.chain.lengths()
    }

    /// Diffuse one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.chain.process(input)
    }

    /// Silence all stages.
    pub fn clear(&mut self) {
        self.chain.clear();
    }
}

/// Left and right output diffusers.
///
/// With zero spread both chains have the same lengths and, fed the same
/// signal, produce bit-identical output.
#[derive(Debug, Clone)]
pub struct DiffusionOutputChains {
    left: DiffuserChain,
    right: DiffuserChain,
}

impl DiffusionOutputChains {
    /// Create both chains with per-stage capacities.
    pub fn new(left_capacity: &[usize; 4], right_capacity: &[usize; 4]) -> Self {
        Self {
            left: DiffuserChain::new(left_capacity),
            right: DiffuserChain::new(right_capacity),
        }
    }

    /// Set the stage lengths of both chains.
    pub fn set_lengths(&mut self, left: &[usize; 4], right: &[usize; 4]) {
        self.left.set_lengths(left);
        self.right.set_lengths(right);
    }

    /// Current stage lengths of one chain.
    pub fn lengths(&self, channel: Channel) -> [usize; 4] {
        match channel {
            Channel::Left => self.left.lengths(),
            Channel::Right => self.right.lengths(),
        }
    }

    /// Diffuse one sample per channel.
    #[inline]
    pub fn process(&mut self, left: f32, right: f32) -> (f32, f32) {
        (self.left.process(left), self.right.process(right))
    }

    /// Silence both chains.
    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }
}
