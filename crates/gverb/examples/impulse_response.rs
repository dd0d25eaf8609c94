//! Render the impulse response of a few rooms and report their decay.
//!
//! The reverberation time is estimated by Schroeder backward integration
//! of the left channel and compared with the requested `revtime`.
//!
//! Run with: RUST_LOG=debug cargo run -p gverb --example impulse_response --features tracing

use gverb::{ReverbEngine, ReverbParameters};
use gverb_core::Effect;
use tracing_subscriber::EnvFilter;

const SAMPLE_RATE: f32 = 44100.0;

/// Estimate the 60 dB decay time from the -5 dB to -25 dB span of the
/// backward-integrated energy curve.
fn estimate_rt60(response: &[f32], sample_rate: f32) -> Option<f32> {
    let mut energy: Vec<f64> = response.iter().map(|&s| f64::from(s) * f64::from(s)).collect();
    for i in (0..energy.len().saturating_sub(1)).rev() {
        energy[i] += energy[i + 1];
    }
    let total = *energy.first()?;
    if total <= 0.0 {
        return None;
    }

    let db = |i: usize| 10.0 * (energy[i] / total).log10();
    let start = (0..energy.len()).find(|&i| db(i) <= -5.0)?;
    let end = (start..energy.len()).find(|&i| db(i) <= -25.0)?;
    Some((end - start) as f32 / sample_rate * 3.0)
}

fn render(params: ReverbParameters, seconds: f32) -> (Vec<f32>, Vec<f32>) {
    let len = (seconds * SAMPLE_RATE) as usize;
    let mut input = vec![0.0; len];
    input[0] = 1.0;

    let mut reverb = ReverbEngine::with_parameters(SAMPLE_RATE, params);
    let mut left = vec![0.0; len];
    let mut right = vec![0.0; len];
    reverb.process_block(&input, &mut left, &mut right);
    (left, right)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("Gverb Impulse Responses");
    println!("=======================\n");

    let rooms = [
        ("small room", 10.0, 0.8),
        ("hall", 40.0, 2.5),
        ("cathedral", 150.0, 6.0),
    ];

    for (name, roomsize, revtime) in rooms {
        let params = ReverbParameters {
            roomsize,
            revtime,
            damping: 0.0,
            bandwidth: 1.0,
            dry: 0.0,
            ..Default::default()
        };
        tracing::info!(name, roomsize, revtime, "rendering");

        let (left, right) = render(params, revtime * 1.5);
        let peak = left
            .iter()
            .chain(&right)
            .fold(0.0f32, |m, &s| m.max(s.abs()));

        println!("{name}: roomsize {roomsize} m, revtime {revtime} s");
        println!("  samples: {}", left.len());
        println!("  peak:    {peak:.4}");
        match estimate_rt60(&left, SAMPLE_RATE) {
            Some(rt60) => println!("  RT60:    {rt60:.2} s (requested {revtime} s)"),
            None => println!("  RT60:    not measurable"),
        }
        println!();
    }
}
