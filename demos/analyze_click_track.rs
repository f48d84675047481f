//! Example: Estimate the tempo of a synthetic click track
//!
//! Usage:
//!   RUST_LOG=debug cargo run --example analyze_click_track -- [BPM] [SAMPLE_RATE]

use std::env;
use wavelet_tempo::{compute, dynamic_range};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let target_bpm: f32 = args.first().map(|s| s.parse()).transpose()?.unwrap_or(120.0);
    let sample_rate: f32 = args.get(1).map(|s| s.parse()).transpose()?.unwrap_or(44100.0);

    // 20 seconds of unit clicks
    let period = (sample_rate * 60.0 / target_bpm).round() as usize;
    let mut samples = vec![0.0f32; (sample_rate * 20.0) as usize];
    for i in (period / 2..samples.len()).step_by(period.max(1)) {
        samples[i] = 1.0;
    }

    let result = compute(&samples, sample_rate)?;

    println!("Analysis Results:");
    println!("  Target BPM: {:.2}", target_bpm);
    println!("  BPM: {:.2} (beat period {:.3} s)", result.bpm, result.beat_period_seconds());
    println!("  Peak bin: {}", result.metadata.peak_bin);
    println!("  RMS: {:.5}", dynamic_range(&samples));
    println!("  Processing time: {:.2} ms", result.metadata.processing_time_ms);
    println!("  Levels:");
    for level in &result.metadata.levels {
        println!(
            "    k={} x{}: detail={} window={} candidates={} stable={} intervals={} votes={}{}",
            level.scale.level,
            level.scale.factor,
            level.detail_len,
            level.window_len,
            level.candidates,
            level.stable_peaks,
            level.intervals,
            level.votes,
            if level.skipped { " (skipped)" } else { "" }
        );
    }

    if let Some(debug) = &result.debug {
        // Strongest smoothed bins, as (interval seconds, raw, smoothed)
        let mut points = debug.points();
        points.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
        println!("  Top histogram bins:");
        for (seconds, occurrence, amplitude) in points.iter().take(3) {
            println!(
                "    {:.4} s: occurrence={:.2} amplitude={:.5}",
                seconds, occurrence, amplitude
            );
        }
    }

    Ok(())
}
