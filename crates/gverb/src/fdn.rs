//! Four-line feedback delay network, the source of the late tail.
//!
//! Each sample the network reads its four lines, scales and damps the
//! outputs, scatters them through an orthogonal 4x4 matrix and writes the
//! prediffused input plus the scattered feedback back into the lines:
//!
//! ```text
//! out[i]    = line[i].read()
//! damped[i] = damper[i](gain[i] * out[i])
//! f         = M * damped
//! line[i].write(input + f[i])
//! ```
//!
//! `M` is orthogonal and `|gain[i]| <= 1`, so with damping the loop can
//! only lose energy.

use gverb_core::{DelayLine, Interpolation, OnePole};

/// Orthogonal 4-point scattering matrix built from two butterfly stages.
///
/// ```text
/// b0 = 0.5 * ( d0 + d1 - d2 - d3)
/// b1 = 0.5 * ( d0 - d1 - d2 + d3)
/// b2 = 0.5 * (-d0 + d1 - d2 + d3)
/// b3 = 0.5 * ( d0 + d1 + d2 + d3)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MixingMatrix;

impl MixingMatrix {
    /// Scatter four line outputs into four feedback values.
    ///
    /// ```rust
    /// use gverb::MixingMatrix;
    ///
    /// assert_eq!(MixingMatrix::apply([1.0, 0.0, 0.0, 0.0]), [0.5, 0.5, -0.5, 0.5]);
    /// ```
    #[inline]
    pub fn apply(d: [f32; 4]) -> [f32; 4] {
        let sum01 = d[0] + d[1];
        let diff01 = d[0] - d[1];
        let sum23 = d[2] + d[3];
        let diff23 = d[2] - d[3];
        [
            0.5 * (sum01 - sum23),
            0.5 * (diff01 - diff23),
            0.5 * (-diff01 - diff23),
            0.5 * (sum01 + sum23),
        ]
    }
}

/// The recirculating core of the reverb.
#[derive(Debug, Clone)]
pub struct FeedbackDelayNetwork {
    lines: [DelayLine; 4],
    dampers: [OnePole; 4],
    gains: [f32; 4],
}

impl FeedbackDelayNetwork {
    /// Create a network whose lines hold up to `capacity[i]` samples.
    ///
    /// Lines start at full capacity with zero gain; call
    /// [`set_lengths`](Self::set_lengths) and [`set_gains`](Self::set_gains).
    pub fn new(capacity: &[usize; 4]) -> Self {
        Self {
            lines: core::array::from_fn(|i| {
                let mut line = DelayLine::new(capacity[i]);
                line.set_interpolation(Interpolation::None);
                line
            }),
            dampers: core::array::from_fn(|_| OnePole::default()),
            gains: [0.0; 4],
        }
    }

    /// Set the line lengths in samples (clamped to capacity).
    pub fn set_lengths(&mut self, lengths: &[usize; 4]) {
        for (line, &len) in self.lines.iter_mut().zip(lengths) {
            line.set_delay(len as f32);
        }
    }

    /// Current line lengths.
    pub fn lengths(&self) -> [usize; 4] {
        core::array::from_fn(|i| self.lines[i].delay() as usize)
    }

    /// Set the per-line loop gains.
    pub fn set_gains(&mut self, gains: &[f32; 4]) {
        self.gains = *gains;
    }

    /// Current loop gains.
    pub fn gains(&self) -> [f32; 4] {
        self.gains
    }

    /// Set the damping coefficient of every line, clamped to [0, 1].
    #[inline]
    pub fn set_damping(&mut self, damping: f32) {
        for damper in &mut self.dampers {
            damper.set_coefficient(damping);
        }
    }

    /// Advance one sample, injecting `input` into every line.
    ///
    /// Returns the raw line outputs read before the write.
    #[inline]
    pub fn process(&mut self, input: f32) -> [f32; 4] {
        let out: [f32; 4] = core::array::from_fn(|i| self.lines[i].read());

        let damped = core::array::from_fn(|i| self.dampers[i].process(self.gains[i] * out[i]));
        let feedback = MixingMatrix::apply(damped);

        for (line, f) in self.lines.iter_mut().zip(feedback) {
            line.write(input + f);
        }
        out
    }

    /// Silence the lines and damper histories.
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        for damper in &mut self.dampers {
            damper.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn energy(v: &[f32; 4]) -> f32 {
        v.iter().map(|x| x * x).sum()
    }

    #[test]
    fn matrix_rows() {
        assert_eq!(MixingMatrix::apply([0.0, 1.0, 0.0, 0.0]), [0.5, -0.5, 0.5, 0.5]);
        assert_eq!(MixingMatrix::apply([0.0, 0.0, 1.0, 0.0]), [-0.5, -0.5, -0.5, 0.5]);
        assert_eq!(MixingMatrix::apply([0.0, 0.0, 0.0, 1.0]), [-0.5, 0.5, 0.5, 0.5]);
        assert_eq!(MixingMatrix::apply([1.0; 4]), [0.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn matrix_preserves_energy() {
        for d in [
            [1.0, -2.0, 0.5, 3.0],
            [0.1, 0.2, 0.3, 0.4],
            [-1.0, -1.0, 1.0, 1.0],
        ] {
            let b = MixingMatrix::apply(d);
            assert!((energy(&b) - energy(&d)).abs() < 1e-5);
        }
    }

    #[test]
    fn matrix_is_linear() {
        let a = [0.3, -0.2, 0.9, 0.1];
        let b = [-0.5, 0.4, 0.2, 0.7];
        let sum: [f32; 4] = core::array::from_fn(|i| a[i] + b[i]);
        let ma = MixingMatrix::apply(a);
        let mb = MixingMatrix::apply(b);
        let msum = MixingMatrix::apply(sum);
        for i in 0..4 {
            assert!((msum[i] - (ma[i] + mb[i])).abs() < 1e-6);
        }
    }

    #[test]
    fn impulse_appears_after_line_length() {
        let mut fdn = FeedbackDelayNetwork::new(&[64; 4]);
        fdn.set_lengths(&[13, 11, 7, 5]);
        fdn.set_gains(&[-0.9; 4]);

        let mut first_arrival = [None; 4];
        for n in 0..20 {
            let out = fdn.process(if n == 0 { 1.0 } else { 0.0 });
            for i in 0..4 {
                if first_arrival[i].is_none() && out[i] != 0.0 {
                    first_arrival[i] = Some((n, out[i]));
                }
            }
        }
        assert_eq!(first_arrival[0], Some((13, 1.0)));
        assert_eq!(first_arrival[1], Some((11, 1.0)));
        assert_eq!(first_arrival[2], Some((7, 1.0)));
        assert_eq!(first_arrival[3], Some((5, 1.0)));
    }

    #[test]
    fn zero_gain_is_a_plain_delay() {
        let mut fdn = FeedbackDelayNetwork::new(&[16; 4]);
        fdn.set_lengths(&[4; 4]);
        for n in 0..40 {
            let out = fdn.process(if n == 0 { 1.0 } else { 0.0 });
            let expected = if n == 4 { 1.0 } else { 0.0 };
            assert_eq!(out, [expected; 4]);
        }
    }

    #[test]
    fn lossy_network_decays() {
        let mut fdn = FeedbackDelayNetwork::new(&[64; 4]);
        fdn.set_lengths(&[41, 37, 31, 29]);
        fdn.set_gains(&[-0.8; 4]);
        fdn.set_damping(0.3);

        fdn.process(1.0);
        let mut late_peak = 0.0f32;
        for n in 0..20_000 {
            let out = fdn.process(0.0);
            if n > 19_000 {
                late_peak = out.iter().fold(late_peak, |m, x| m.max(x.abs()));
            }
        }
        assert!(late_peak < 1e-6, "late peak {late_peak}");
    }

    #[test]
    fn lossless_network_keeps_energy_bounded() {
        let mut fdn = FeedbackDelayNetwork::new(&[64; 4]);
        fdn.set_lengths(&[41, 37, 31, 29]);
        fdn.set_gains(&[-1.0; 4]);

        fdn.process(1.0);
        for _ in 0..50_000 {
            let out = fdn.process(0.0);
            assert!(out.iter().all(|x| x.abs() <= 2.0 + 1e-3));
        }
    }

    #[test]
    fn clear_silences() {
        let mut fdn = FeedbackDelayNetwork::new(&[32; 4]);
        fdn.set_lengths(&[3, 5, 7, 11]);
        fdn.set_gains(&[-0.7; 4]);
        fdn.set_damping(0.5);
        for _ in 0..100 {
            fdn.process(0.5);
        }
        fdn.clear();
        for _ in 0..40 {
            assert_eq!(fdn.process(0.0), [0.0; 4]);
        }
        assert_eq!(fdn.lengths(), [3, 5, 7, 11]);
    }
}
