//! Example: Analyze a batch of synthetic click tracks in parallel
//!
//! Usage:
//!   cargo run --release --example analyze_batch -- [--jobs N] [--json] [BPM ...]
//!
//! Notes:
//! - Parallelism is across buffers. Each analysis is single-threaded.
//! - Default workers: (available CPU threads - 1), keeping one core free for the system.

use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::time::Instant;
use wavelet_tempo::{compute_with_config, AnalysisConfig, BpmResult};

const SAMPLE_RATE: f32 = 44100.0;

fn click_track(bpm: f32, seconds: f32) -> Vec<f32> {
    let period = ((SAMPLE_RATE * 60.0 / bpm).round() as usize).max(1);
    let mut samples = vec![0.0f32; (SAMPLE_RATE * seconds) as usize];
    for i in (period / 2..samples.len()).step_by(period) {
        samples[i] = 1.0;
    }
    samples
}

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

#[derive(Serialize)]
struct ItemOut {
    target_bpm: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<BpmResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut tempos: Vec<f32> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: analyze_batch [--jobs N] [--json] [BPM ...]\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n\
                     --json     Emit one JSON object per line (JSONL)\n"
                );
                return Ok(());
            }
            _ => tempos.push(a.parse::<f32>()?),
        }
    }

    if tempos.is_empty() {
        tempos = vec![80.0, 95.0, 110.0, 120.0, 128.0, 140.0, 160.0, 174.0];
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} click tracks, jobs={}", tempos.len(), jobs);

    // Histograms are large; keep JSONL lines short
    let config = AnalysisConfig {
        include_debug: false,
        ..Default::default()
    };

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<ItemOut> = pool.install(|| {
        tempos
            .par_iter()
            .map(|&target_bpm| {
                let samples = click_track(target_bpm, 20.0);
                match compute_with_config(&samples, SAMPLE_RATE, &config) {
                    Ok(result) => ItemOut {
                        target_bpm,
                        result: Some(result),
                        error: None,
                    },
                    Err(e) => ItemOut {
                        target_bpm,
                        result: None,
                        error: Some(format!("analysis failed: {e}")),
                    },
                }
            })
            .collect()
    });

    for (idx, o) in outs.iter().enumerate() {
        if json {
            println!("{}", serde_json::to_string(o)?);
            continue;
        }
        match (&o.result, &o.error) {
            (Some(r), _) => println!(
                "[{}/{}] target={:.1}: BPM={:.2} (error {:+.2}) time={:.2}ms",
                idx + 1,
                outs.len(),
                o.target_bpm,
                r.bpm,
                r.bpm - o.target_bpm,
                r.metadata.processing_time_ms
            ),
            (None, e) => println!(
                "[{}/{}] target={:.1}: ERROR: {}",
                idx + 1,
                outs.len(),
                o.target_bpm,
                e.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    let ok = outs.iter().filter(|o| o.result.is_some()).count();
    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        ok,
        outs.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
