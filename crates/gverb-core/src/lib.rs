//! gverb core - DSP primitives for a feedback-delay-network reverb
//!
//! The building blocks the `gverb` engine is assembled from. Everything here
//! is allocation-free once constructed and runs without `std`.
//!
//! # Building blocks
//!
//! - [`DelayLine`] - Fixed-capacity circular buffer with a modulatable length
//! - [`OnePole`] - One-pole lowpass with a direct damping coefficient
//! - [`Diffuser`] - Single-delay allpass used for prediffusion and stereo output
//! - [`SmoothedParam`] - Exponential parameter smoothing
//!
//! # Traits
//!
//! - [`Effect`] - Mono-in, stereo-out processing
//! - [`ParameterInfo`] - Indexed parameter introspection with [`ParamDescriptor`]
//!
//! # Math
//!
//! [`flush_denormal`], [`db_to_linear`], [`ms_to_samples`]
//! and the RT60 helpers [`decay_coefficient`] / [`decay_gain`].
//!
//! # no_std Support
//!
//! Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! gverb-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use gverb_core::{Diffuser, OnePole};
//!
//! let mut damper = OnePole::new(0.5);
//! let mut diffusers = [Diffuser::new(142, 0.75), Diffuser::new(107, 0.625)];
//!
//! let mut out = damper.process(1.0);
//! for stage in &mut diffusers {
//!     out = stage.process(out);
//! }
//! assert!(out.is_finite());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod delay;
pub mod diffuser;
pub mod effect;
pub mod math;
pub mod one_pole;
pub mod param;
pub mod param_info;

pub use delay::{DelayLine, Interpolation};
pub use diffuser::Diffuser;
pub use effect::Effect;
pub use math::{
    RT60_DB, db_to_linear, decay_coefficient, decay_gain, flush_denormal, ms_to_samples,
};
pub use one_pole::OnePole;
pub use param::SmoothedParam;
pub use param_info::{ParamDescriptor, ParamId, ParamScale, ParamUnit, ParameterInfo};
