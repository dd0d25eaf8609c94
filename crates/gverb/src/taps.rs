//! Early reflections from a multi-tap delay.

use gverb_core::DelayLine;

/// One long delay line read at four positions.
///
/// Each tap is scaled by its own gain, normally `alpha^tap` so an
/// earlier reflection is louder than a later one. Tap positions may be
/// fractional and are read with linear interpolation.
#[derive(Debug, Clone)]
pub struct TapDelayBank {
    line: DelayLine,
    taps: [f32; 4],
    gains: [f32; 4],
}

impl TapDelayBank {
    /// Create a bank whose line holds up to `capacity` samples.
    ///
    /// Taps start at one sample with zero gain.
    pub fn new(capacity: usize) -> Self {
        Self {
            line: DelayLine::new(capacity),
            taps: [1.0; 4],
            gains: [0.0; 4],
        }
    }

    /// Set tap positions (samples) and their gains.
    pub fn set_taps(&mut self, taps: &[f32; 4], gains: &[f32; 4]) {
        self.taps = *taps;
        self.gains = *gains;
    }

    /// Current tap positions.
    pub fn taps(&self) -> [f32; 4] {
        self.taps
    }

    /// Longest tap the line can hold.
    pub fn capacity(&self) -> usize {
        self.line.max_delay()
    }

    /// Read the four scaled taps, then push `input` into the line.
    #[inline]
    pub fn process(&mut self, input: f32) -> [f32; 4] {
        let out = core::array::from_fn(|i| self.gains[i] * self.line.read_at(self.taps[i]));
        self.line.write(input);
        out
    }

    /// Silence the line.
    pub fn clear(&mut self) {
        self.line.clear();
    }
}
