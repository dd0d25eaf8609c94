//! gverb - a Gigaverb-style feedback delay network reverb
//!
//! Mono in, stereo out, eight controls. The signal path:
//!
//! ```text
//! x ─► InputDamper ─► PrediffusionChain ─┬─► TapDelayBank ──────────┐ early
//!                                        └─► FeedbackDelayNetwork ──┤ tail
//!                                                                   ▼
//!                                    OutputMixer ◄── DiffusionOutputChains (L, R)
//! ```
//!
//! - [`InputDamper`] - bandwidth-limits the excitation
//! - [`PrediffusionChain`] - four allpass diffusers smear the input
//! - [`FeedbackDelayNetwork`] - four damped lines scattered by [`MixingMatrix`]
//! - [`TapDelayBank`] - early reflections from four taps on one long line
//! - [`DiffusionOutputChains`] - decorrelate left and right using `spread`
//! - [`OutputMixer`] - dry, early and tail levels
//!
//! [`ReverbEngine`] owns all of them plus one [`SmoothedParam`](gverb_core::SmoothedParam)
//! per control. [`Topology`] derives every delay length and gain from
//! `roomsize`, `spread`, `revtime` and the sample rate. [`SharedParameters`]
//! carries updates from a control thread without locks.
//!
//! # Example
//!
//! ```rust
//! use gverb::{ReverbEngine, ReverbParameters};
//! use gverb_core::Effect;
//!
//! let mut reverb = ReverbEngine::with_parameters(
//!     44100.0,
//!     ReverbParameters {
//!         roomsize: 75.0,
//!         revtime: 6.0,
//!         ..Default::default()
//!     },
//! );
//!
//! let input = [1.0, 0.0, 0.0, 0.0];
//! let mut left = [0.0; 4];
//! let mut right = [0.0; 4];
//! reverb.process_block(&input, &mut left, &mut right);
//! assert!(left[0] >= 1.0);
//! ```
//!
//! # Features
//!
//! - `std` (default) - link the standard library; without it only `alloc` is needed
//! - `tracing` - `debug` logs on construction and reset, `warn` when a
//!   parameter is clamped or ignored

#![cfg_attr(not(feature = "std"), no_std)]

pub mod diffusion;
pub mod engine;
pub mod fdn;
pub mod input_damper;
pub mod mixer;
pub mod params;
pub mod shared;
pub mod taps;
pub mod topology;

pub use diffusion::{DiffusionOutputChains, PrediffusionChain};
pub use engine::{INPUT_LIMIT, ReverbEngine};
pub use fdn::{FeedbackDelayNetwork, MixingMatrix};
pub use input_damper::InputDamper;
pub use mixer::{OutputMixer, early_signal, tail_signal};
pub use params::{DESCRIPTORS, PARAM_COUNT, ReverbParameters};
pub use shared::SharedParameters;
pub use taps::TapDelayBank;
pub use topology::{Capacity, Channel, Topology};
