//! Lock-free hand-off of parameter updates from a control thread.
//!
//! [`SharedParameters`] keeps one `AtomicU32` (the f32 bits) per parameter
//! and a generation counter. The control thread writes values and then
//! bumps the generation with `Release`; the audio thread reads the
//! generation with `Acquire` at block start and only re-reads the values
//! when it moved. Neither side ever blocks.
//!
//! ```rust
//! use gverb::{ReverbEngine, ReverbParameters, SharedParameters};
//!
//! let shared = SharedParameters::new(ReverbParameters::default());
//! let mut engine = ReverbEngine::new(48000.0);
//!
//! // control thread
//! shared.set(gverb::params::TAIL, 0.6);
//!
//! // audio thread, once per block
//! engine.sync(&shared);
//! assert_eq!(engine.parameters().tail, 0.6);
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use crate::params::{PARAM_COUNT, ReverbParameters};

/// Parameter store shared between a control thread and the audio thread.
#[derive(Debug)]
pub struct SharedParameters {
    values: [AtomicU32; PARAM_COUNT],
    generation: AtomicU32,
}

impl SharedParameters {
    /// Create a store holding `params`, at generation 0.
    pub fn new(params: ReverbParameters) -> Self {
        Self {
            values: params.to_array().map(|v| AtomicU32::new(v.to_bits())),
            generation: AtomicU32::new(0),
        }
    }

    /// Publish a complete parameter set.
    pub fn store(&self, params: ReverbParameters) {
        for (slot, value) in self.values.iter().zip(params.to_array()) {
            slot.store(value.to_bits(), Ordering::Relaxed);
        }
        self.generation.fetch_add(1, Ordering::Release);
    }

    /// Publish a single parameter. Unknown indices are ignored.
    ///
    /// Values are stored as given; the engine sanitizes them on pickup.
    pub fn set(&self, index: usize, value: f32) {
        if let Some(slot) = self.values.get(index) {
            slot.store(value.to_bits(), Ordering::Relaxed);
            self.generation.fetch_add(1, Ordering::Release);
        }
    }

    /// Read one parameter, `None` for unknown indices.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values
            .get(index)
            .map(|slot| f32::from_bits(slot.load(Ordering::Acquire)))
    }

    /// Read the complete parameter set.
    pub fn load(&self) -> ReverbParameters {
        ReverbParameters::from_array(
            core::array::from_fn(|i| f32::from_bits(self.values[i].load(Ordering::Relaxed))),
        )
    }

    /// Counter bumped by every store; wraps on overflow.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation.load(Ordering::Acquire)
    }
}

impl Default for SharedParameters {
    fn default() -> Self {
        Self::new(ReverbParameters::default())
    }
}
