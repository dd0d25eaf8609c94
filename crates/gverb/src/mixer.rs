//! Final mix of the dry, early and tail paths.
//!
//! ```text
//! E     = x + u0 - u1 + u2 - u3          early taps, alternating signs
//! T     = out0 - out1 + out2 - out3      raw feedback line outputs
//! wet   = early * E + tail * T
//! left  = dry * x + diffuse_left(wet)
//! right = dry * x + diffuse_right(wet)
//! ```
//!
//! The output diffusers are linear, so diffusing the weighted sum once per
//! channel equals diffusing the early and tail signals separately. Gains
//! are not normalized; their sum may exceed one.

/// Sum of the early taps with alternating signs, plus the direct input.
#[inline]
pub fn early_signal(input: f32, taps: &[f32; 4]) -> f32 {
    input + taps[0] - taps[1] + taps[2] - taps[3]
}

/// Sum of the feedback line outputs with alternating signs.
#[inline]
pub fn tail_signal(lines: &[f32; 4]) -> f32 {
    lines[0] - lines[1] + lines[2] - lines[3]
}

/// Dry, early and tail levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputMixer {
    dry: f32,
    early: f32,
    tail: f32,
}

impl OutputMixer {
    /// Create a mixer with the given levels.
    pub fn new(dry: f32, early: f32, tail: f32) -> Self {
        Self { dry, early, tail }
    }

    /// Update all three levels.
    #[inline]
    pub fn set_levels(&mut self, dry: f32, early: f32, tail: f32) {
        self.dry = dry;
        self.early = early;
        self.tail = tail;
    }

    /// `(dry, early, tail)`.
    pub fn levels(&self) -> (f32, f32, f32) {
        (self.dry, self.early, self.tail)
    }

    /// Weighted early plus tail signal, ready for the output diffusers.
    #[inline]
    pub fn wet(&self, input: f32, taps: &[f32; 4], lines: &[f32; 4]) -> f32 {
        self.early * early_signal(input, taps) + self.tail * tail_signal(lines)
    }

    /// Add the dry input to both diffused channels.
    #[inline]
    pub fn mix(&self, input: f32, diffused: (f32, f32)) -> (f32, f32) {
        let dry = self.dry * input;
        (dry + diffused.0, dry + diffused.1)
    }
}
