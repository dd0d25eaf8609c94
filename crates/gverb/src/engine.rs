//! The complete reverb: one mono input, a stereo output.
//!
//! Per sample, in order:
//!
//! 1. advance the smoothed controls
//! 2. refresh delay lengths and gains if the structural controls moved
//! 3. input damper, then prediffusion
//! 4. early tap bank and feedback network, both fed the prediffused signal
//! 5. weighted early plus tail signal through the left and right diffusers
//! 6. add the dry input
//!
//! All buffers are sized for the largest room when the engine is built, so
//! processing and parameter changes never allocate.

use gverb_core::{Effect, ParamDescriptor, ParameterInfo, SmoothedParam};

use crate::diffusion::{DiffusionOutputChains, PrediffusionChain};
use crate::fdn::FeedbackDelayNetwork;
use crate::input_damper::InputDamper;
use crate::mixer::OutputMixer;
use crate::params::{DESCRIPTORS, PARAM_COUNT, ReverbParameters};
use crate::shared::SharedParameters;
use crate::taps::TapDelayBank;
use crate::topology::{Capacity, Topology, fdn_lengths, room_samples};

/// Input samples beyond this magnitude (or NaN) are replaced by silence.
pub const INPUT_LIMIT: f32 = 1e5;

/// Smoothing time of the dry, early and tail levels.
const LEVEL_SMOOTHING_MS: f32 = 10.0;
/// Smoothing time of damping and bandwidth.
const FILTER_SMOOTHING_MS: f32 = 20.0;
/// Smoothing time of roomsize, spread and revtime.
const STRUCTURE_SMOOTHING_MS: f32 = 50.0;

/// Gigaverb-style feedback delay network reverb.
///
/// # Example
///
/// ```rust
/// use gverb::{ReverbEngine, ReverbParameters};
///
/// let params = ReverbParameters {
///     roomsize: 40.0,
///     revtime: 4.0,
///     ..Default::default()
/// };
/// let mut reverb = ReverbEngine::with_parameters(48000.0, params);
///
/// let (left, right) = reverb.process_sample(1.0);
/// assert!(left.is_finite() && right.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct ReverbEngine {
    input_damper: InputDamper,
    prediffusion: PrediffusionChain,
    fdn: FeedbackDelayNetwork,
    taps: TapDelayBank,
    output: DiffusionOutputChains,
    mixer: OutputMixer,

    // Smoothed controls
    roomsize: SmoothedParam,
    revtime: SmoothedParam,
    damping: SmoothedParam,
    bandwidth: SmoothedParam,
    spread: SmoothedParam,
    dry: SmoothedParam,
    early: SmoothedParam,
    tail: SmoothedParam,

    /// Sanitized targets
    params: ReverbParameters,
    sample_rate: f32,
    topology: Topology,

    // Cache key of the applied topology
    cached_lengths: [usize; 4],
    cached_spread: f32,
    cached_revtime: f32,

    last_generation: Option<u32>,
}

impl ReverbEngine {
    /// Create an engine with default parameters.
    ///
    /// `sample_rate` is in Hz; values below 1 Hz are raised to 1 Hz.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_parameters(sample_rate, ReverbParameters::default())
    }

    /// Create an engine starting exactly at `params` (no initial ramp).
    ///
    /// Out-of-range values are clamped and NaN fields take their defaults.
    pub fn with_parameters(sample_rate: f32, params: ReverbParameters) -> Self {
        let sample_rate = sample_rate.max(1.0);
        let params = params.sanitized(&ReverbParameters::default());
        let capacity = Capacity::for_sample_rate(sample_rate);
        let topology = Topology::compute(params.roomsize, params.spread, params.revtime, sample_rate);

        let smoothed = |value, ms| SmoothedParam::with_config(value, sample_rate, ms);

        let mut engine = Self {
            input_damper: InputDamper::new(params.bandwidth),
            prediffusion: PrediffusionChain::new(&capacity.prediffusion),
            fdn: FeedbackDelayNetwork::new(&capacity.fdn),
            taps: TapDelayBank::new(capacity.taps),
            output: DiffusionOutputChains::new(&capacity.left, &capacity.right),
            mixer: OutputMixer::new(params.dry, params.early, params.tail),
            roomsize: smoothed(params.roomsize, STRUCTURE_SMOOTHING_MS),
            revtime: smoothed(params.revtime, STRUCTURE_SMOOTHING_MS),
            damping: smoothed(params.damping, FILTER_SMOOTHING_MS),
            bandwidth: smoothed(params.bandwidth, FILTER_SMOOTHING_MS),
            spread: smoothed(params.spread, STRUCTURE_SMOOTHING_MS),
            dry: smoothed(params.dry, LEVEL_SMOOTHING_MS),
            early: smoothed(params.early, LEVEL_SMOOTHING_MS),
            tail: smoothed(params.tail, LEVEL_SMOOTHING_MS),
            params,
            sample_rate,
            topology,
            cached_lengths: topology.fdn_lengths,
            cached_spread: params.spread,
            cached_revtime: params.revtime,
            last_generation: None,
        };
        engine.fdn.set_damping(params.damping);
        engine.apply_topology();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            roomsize = params.roomsize,
            revtime = params.revtime,
            fdn_capacity = capacity.fdn[0],
            tap_capacity = capacity.taps,
            "reverb engine created"
        );

        engine
    }

    /// Set new parameter targets.
    ///
    /// Values are clamped into range and NaN fields keep their previous
    /// value. Changes glide in over 10 to 50 ms depending on the control.
    pub fn set_parameters(&mut self, params: ReverbParameters) {
        let params = params.sanitized(&self.params);
        if params == self.params {
            return;
        }
        self.params = params;

        self.roomsize.set_target(params.roomsize);
        // An infinite reverb time cannot be approached or left gradually.
        if params.revtime.is_finite() && self.revtime.get().is_finite() {
            self.revtime.set_target(params.revtime);
        } else {
            self.revtime.set_immediate(params.revtime);
        }
        self.damping.set_target(params.damping);
        self.bandwidth.set_target(params.bandwidth);
        self.spread.set_target(params.spread);
        self.dry.set_target(params.dry);
        self.early.set_target(params.early);
        self.tail.set_target(params.tail);
    }

    /// Current parameter targets.
    pub fn parameters(&self) -> ReverbParameters {
        self.params
    }

    /// Pick up control-thread changes published to `shared`.
    ///
    /// Call at the start of each audio block; does nothing unless the
    /// store's generation moved since the last call.
    pub fn sync(&mut self, shared: &SharedParameters) {
        let generation = shared.generation();
        if self.last_generation != Some(generation) {
            self.last_generation = Some(generation);
            self.set_parameters(shared.load());
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Delay lengths and gains currently in use.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// `true` once every smoothed control has reached its target.
    pub fn is_settled(&self) -> bool {
        self.smoothed().iter().all(|p| p.is_settled())
    }

    /// Process one mono sample into a `(left, right)` pair.
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> (f32, f32) {
        let roomsize = self.roomsize.advance();
        let revtime = self.revtime.advance();
        let spread = self.spread.advance();
        let damping = self.damping.advance();
        let bandwidth = self.bandwidth.advance();
        let dry = self.dry.advance();
        let early = self.early.advance();
        let tail = self.tail.advance();

        self.refresh_topology(roomsize, spread, revtime);
        self.fdn.set_damping(damping);
        self.input_damper.set_bandwidth(bandwidth);
        self.mixer.set_levels(dry, early, tail);

        let x = guard_input(input);
        let damped = self.input_damper.process(x);
        let prediffused = self.prediffusion.process(damped);

        let taps = self.taps.process(prediffused);
        let lines = self.fdn.process(prediffused);

        let wet = self.mixer.wet(x, &taps, &lines);
        let diffused = self.output.process(wet, wet);
        self.mixer.mix(x, diffused)
    }

    /// Recompute the topology when a rounded line length, the spread or
    /// the reverb time changed.
    fn refresh_topology(&mut self, roomsize: f32, spread: f32, revtime: f32) {
        let lengths = fdn_lengths(room_samples(roomsize, self.sample_rate));
        if lengths == self.cached_lengths
            && spread == self.cached_spread
            && revtime == self.cached_revtime
        {
            return;
        }
        self.cached_lengths = lengths;
        self.cached_spread = spread;
        self.cached_revtime = revtime;

        self.topology = Topology::compute(roomsize, spread, revtime, self.sample_rate);
        self.apply_topology();
    }

    fn apply_topology(&mut self) {
        let topo = &self.topology;
        self.fdn.set_lengths(&topo.fdn_lengths);
        self.fdn.set_gains(&topo.fdn_gains);
        self.prediffusion.set_lengths(&topo.prediffusion_lengths);
        self.output.set_lengths(&topo.left_lengths, &topo.right_lengths);
        self.taps.set_taps(&topo.taps, &topo.tap_gains);
    }

    fn smoothed(&self) -> [&SmoothedParam; PARAM_COUNT] {
        [
            &self.roomsize,
            &self.revtime,
            &self.damping,
            &self.bandwidth,
            &self.spread,
            &self.dry,
            &self.early,
            &self.tail,
        ]
    }

    fn smoothed_mut(&mut self) -> [&mut SmoothedParam; PARAM_COUNT] {
        [
            &mut self.roomsize,
            &mut self.revtime,
            &mut self.damping,
            &mut self.bandwidth,
            &mut self.spread,
            &mut self.dry,
            &mut self.early,
            &mut self.tail,
        ]
    }
}

/// Replace NaN and absurdly large input by silence.
#[inline]
fn guard_input(x: f32) -> f32 {
    if x.abs() <= INPUT_LIMIT { x } else { 0.0 }
}

impl Effect for ReverbEngine {
    #[inline]
    fn process(&mut self, input: f32) -> (f32, f32) {
        self.process_sample(input)
    }

    /// Rebuild every buffer for the new rate. Allocates; not for the audio
    /// thread. Clears state and snaps the controls to their targets.
    fn set_sample_rate(&mut self, sample_rate: f32) {
        #[cfg(feature = "tracing")]
        tracing::debug!(from = self.sample_rate, to = sample_rate, "sample rate changed");

        let last_generation = self.last_generation;
        *self = Self::with_parameters(sample_rate, self.params);
        self.last_generation = last_generation;
    }

    fn reset(&mut self) {
        self.input_damper.reset();
        self.prediffusion.clear();
        self.fdn.clear();
        self.taps.clear();
        self.output.clear();

        for param in self.smoothed_mut() {
            param.snap_to_target();
        }

        let p = self.params;
        self.input_damper.set_bandwidth(p.bandwidth);
        self.fdn.set_damping(p.damping);
        self.mixer.set_levels(p.dry, p.early, p.tail);
        self.cached_lengths = [0; 4];
        self.refresh_topology(p.roomsize, p.spread, p.revtime);

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate = self.sample_rate, "reverb engine reset");
    }
}

impl ParameterInfo for ReverbEngine {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        DESCRIPTORS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get(index).unwrap_or(0.0)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if index < PARAM_COUNT {
            let mut params = self.params;
            params.set(index, value);
            self.set_parameters(params);
        }
    }
}
