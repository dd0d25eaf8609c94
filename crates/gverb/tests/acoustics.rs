//! Acoustic behaviour of the complete reverb.
//!
//! Measures impulse responses of the engine: decay rate against the
//! configured reverb time, silence after the tail, dry-path transparency,
//! stereo decorrelation and repeatability of parameter updates.

use gverb::{ReverbEngine, ReverbParameters};
use gverb_core::Effect;

const SR: f32 = 44100.0;

/// Deterministic white noise in [-1, 1].
fn noise(len: usize, seed: u32) -> Vec<f32> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
        })
        .collect()
}

/// Run `input` through the engine, returning both channels.
fn render(engine: &mut ReverbEngine, input: &[f32]) -> (Vec<f32>, Vec<f32>) {
    let mut left = vec![0.0; input.len()];
    let mut right = vec![0.0; input.len()];
    engine.process_block(input, &mut left, &mut right);
    (left, right)
}

fn impulse(len: usize) -> Vec<f32> {
    let mut x = vec![0.0; len];
    x[0] = 1.0;
    x
}

/// RMS level in dB of consecutive windows.
fn windowed_rms_db(signal: &[f32], window: usize) -> Vec<f64> {
    signal
        .chunks_exact(window)
        .map(|w| {
            let power = w.iter().map(|&s| f64::from(s) * f64::from(s)).sum::<f64>() / window as f64;
            10.0 * power.max(1e-30).log10()
        })
        .collect()
}

/// Least-squares slope of `y` against `x`.
fn slope(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;
    let cov: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    let var: f64 = x.iter().map(|a| (a - mx) * (a - mx)).sum();
    cov / var
}

/// Settings that isolate the late tail: no dry, no early, no damping.
fn tail_only(roomsize: f32, revtime: f32) -> ReverbParameters {
    ReverbParameters {
        roomsize,
        revtime,
        damping: 0.0,
        bandwidth: 1.0,
        spread: 0.0,
        dry: 0.0,
        early: 0.0,
        tail: 1.0,
    }
}

/// Least-squares decay slope (dB/s) of `signal` between two times, from
/// 50 ms RMS windows.
fn decay_slope(signal: &[f32], sample_rate: f32, from_s: f64, to_s: f64) -> f64 {
    let window = (0.05 * f64::from(sample_rate)) as usize;
    let levels = windowed_rms_db(signal, window);
    let seconds_per_window = window as f64 / f64::from(sample_rate);

    let (times, dbs): (Vec<f64>, Vec<f64>) = levels
        .iter()
        .enumerate()
        .map(|(i, &db)| ((i as f64 + 0.5) * seconds_per_window, db))
        .filter(|&(t, _)| t >= from_s && t <= to_s)
        .unzip();
    slope(&times, &dbs)
}

/// Fit the decay slope (dB/s) of the left channel's impulse response.
fn measured_decay(params: ReverbParameters, sample_rate: f32, from_s: f64, to_s: f64) -> f64 {
    let mut engine = ReverbEngine::with_parameters(sample_rate, params);
    let len = (to_s * f64::from(sample_rate)) as usize + 1;
    let (left, _) = render(&mut engine, &impulse(len));
    decay_slope(&left, sample_rate, from_s, to_s)
}

#[test]
fn decay_rate_matches_revtime() {
    let rate = measured_decay(tail_only(20.0, 1.0), SR, 0.2, 0.8);
    assert!(
        (rate + 60.0).abs() < 0.10 * 60.0,
        "expected -60 dB/s, measured {rate:.1} dB/s"
    );
}

#[test]
fn decay_rate_matches_short_revtime_at_48k() {
    let rate = measured_decay(tail_only(10.0, 0.5), 48000.0, 0.1, 0.4);
    assert!(
        (rate + 120.0).abs() < 0.10 * 120.0,
        "expected -120 dB/s, measured {rate:.1} dB/s"
    );
}

#[test]
fn silence_in_silence_out() {
    let mut engine = ReverbEngine::new(SR);
    engine.reset();
    let (left, right) = render(&mut engine, &vec![0.0; 20_000]);
    assert!(left.iter().chain(&right).all(|&s| s == 0.0));
}

#[test]
fn tail_decays_to_numerical_silence() {
    let revtime = 0.5;
    let mut engine = ReverbEngine::with_parameters(
        SR,
        ReverbParameters {
            roomsize: 30.0,
            revtime,
            ..Default::default()
        },
    );

    // -60 dB per revtime; four of them leave far less than 1e-6.
    let len = (4.0 * revtime * SR) as usize;
    render(&mut engine, &impulse(len));

    let (left, right) = render(&mut engine, &vec![0.0; 2000]);
    let peak = left.iter().chain(&right).fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(peak < 1e-6, "residual tail {peak:e}");
}

#[test]
fn example_scenario() {
    let params = ReverbParameters {
        roomsize: 75.0,
        damping: 0.7,
        bandwidth: 0.5,
        spread: 23.0,
        dry: 1.0,
        early: 0.25,
        tail: 0.25,
        revtime: 6.0,
    };
    let mut engine = ReverbEngine::with_parameters(SR, params);

    let len = (1.1 * 6.0 * SR) as usize;
    let (left, right) = render(&mut engine, &impulse(len));

    // The first sample is the dry impulse plus a small diffused early part.
    for first in [left[0], right[0]] {
        assert!((1.0..1.1).contains(&first), "output[0] = {first}");
    }
    assert_eq!(left[0], right[0]);

    // The tail falls 60 dB in revtime, give or take 10%.
    let rate = decay_slope(&left, SR, 2.0, 6.0);
    let t60 = -60.0 / rate;
    assert!((t60 - 6.0).abs() < 0.6, "T60 {t60:.2} s");

    // By 110% of revtime the response is at least 60 dB below its loudest window.
    let levels = windowed_rms_db(&left, 2205);
    let loudest = levels.iter().copied().fold(f64::MIN, f64::max);
    let last = levels[levels.len() - 1];
    assert!(
        loudest - last >= 60.0,
        "only {:.1} dB down after {:.2} s",
        loudest - last,
        len as f32 / SR
    );
}

#[test]
fn dry_path_is_transparent() {
    let params = ReverbParameters {
        dry: 1.0,
        early: 0.0,
        tail: 0.0,
        ..Default::default()
    };
    let mut engine = ReverbEngine::with_parameters(SR, params);

    let input = noise(20_000, 7);
    let (left, right) = render(&mut engine, &input);
    assert_eq!(left, input);
    assert_eq!(right, input);
}

#[test]
fn spread_decorrelates_channels() {
    let mut engine = ReverbEngine::with_parameters(
        SR,
        ReverbParameters {
            dry: 0.0,
            spread: 23.0,
            ..Default::default()
        },
    );
    let mut input = noise(2205, 3);
    input.resize(SR as usize, 0.0);
    let (left, right) = render(&mut engine, &input);

    let dot: f64 = left.iter().zip(&right).map(|(&l, &r)| f64::from(l) * f64::from(r)).sum();
    let el: f64 = left.iter().map(|&l| f64::from(l) * f64::from(l)).sum();
    let er: f64 = right.iter().map(|&r| f64::from(r) * f64::from(r)).sum();
    let correlation = dot / (el * er).sqrt();
    assert!(correlation < 0.99, "correlation {correlation}");
}

#[test]
fn zero_spread_gives_identical_channels() {
    let mut engine = ReverbEngine::with_parameters(
        SR,
        ReverbParameters {
            spread: 0.0,
            ..Default::default()
        },
    );
    let mut input = noise(4410, 11);
    input.resize(30_000, 0.0);
    let (left, right) = render(&mut engine, &input);
    for (i, (l, r)) in left.iter().zip(&right).enumerate() {
        assert_eq!(l.to_bits(), r.to_bits(), "channels differ at sample {i}");
    }
}

#[test]
fn repeated_set_parameters_is_idempotent() {
    let params = ReverbParameters {
        roomsize: 40.0,
        revtime: 3.0,
        damping: 0.2,
        spread: 60.0,
        tail: 0.7,
        ..Default::default()
    };
    let mut once = ReverbEngine::new(SR);
    let mut twice = ReverbEngine::new(SR);
    once.set_parameters(params);
    twice.set_parameters(params);
    twice.set_parameters(params);

    let input = noise(10_000, 5);
    assert_eq!(render(&mut once, &input), render(&mut twice, &input));
}

#[test]
fn reset_matches_fresh_engine() {
    let params = ReverbParameters {
        roomsize: 12.0,
        revtime: 1.5,
        ..Default::default()
    };
    let mut used = ReverbEngine::new(SR);
    used.set_parameters(params);
    render(&mut used, &noise(5000, 1));
    used.reset();

    let mut fresh = ReverbEngine::with_parameters(SR, params);
    let input = noise(5000, 2);
    assert_eq!(render(&mut used, &input), render(&mut fresh, &input));
}

#[test]
fn longer_revtime_rings_longer() {
    let energy_after = |revtime: f32| {
        let mut engine = ReverbEngine::with_parameters(SR, tail_only(20.0, revtime));
        let (left, _) = render(&mut engine, &impulse(SR as usize));
        left[SR as usize / 2..].iter().map(|&s| f64::from(s) * f64::from(s)).sum::<f64>()
    };
    assert!(energy_after(2.0) > energy_after(0.5) * 10.0);
}

#[test]
fn damping_darkens_the_tail() {
    // Sample-to-sample differences emphasise high frequencies.
    let hf_ratio = |damping: f32| {
        let mut params = tail_only(20.0, 2.0);
        params.damping = damping;
        let mut engine = ReverbEngine::with_parameters(SR, params);
        let (left, _) = render(&mut engine, &impulse(SR as usize));
        let late = &left[SR as usize / 2..];
        let diff: f64 = late.windows(2).map(|w| f64::from(w[1] - w[0]).powi(2)).sum();
        let total: f64 = late.iter().map(|&s| f64::from(s).powi(2)).sum();
        diff / total
    };
    assert!(hf_ratio(0.8) < hf_ratio(0.0) * 0.5);
}
