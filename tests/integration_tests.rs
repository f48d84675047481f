//! Integration tests for tempo estimation

use rayon::prelude::*;
use wavelet_tempo::{
    compute, compute_with_config, dynamic_range, AnalysisConfig, AnalysisError, BpmResult,
    Daubechies,
};

/// Unit impulses every `60 / bpm` seconds, starting half a period in
fn click_train(sample_rate: f32, bpm: f32, seconds: f32) -> Vec<f32> {
    let len = (sample_rate * seconds) as usize;
    let period = (sample_rate * 60.0 / bpm).round() as usize;
    let mut samples = vec![0.0f32; len];
    let mut i = period / 2;
    while i < len {
        samples[i] = 1.0;
        i += period;
    }
    samples
}

/// Decaying 150 Hz bursts with a hard attack, one per beat
fn kick_track(sample_rate: f32, bpm: f32, seconds: f32) -> Vec<f32> {
    let len = (sample_rate * seconds) as usize;
    let period = (sample_rate * 60.0 / bpm).round() as usize;
    let burst_len = (sample_rate * 0.08) as usize;
    let burst: Vec<f32> = (0..burst_len)
        .map(|i| {
            let t = i as f32 / sample_rate;
            (2.0 * std::f32::consts::PI * 150.0 * t).cos() * (-t * 40.0).exp()
        })
        .collect();

    let mut samples = vec![0.0f32; len];
    let mut start = period / 2;
    while start + burst_len < len {
        samples[start..start + burst_len].copy_from_slice(&burst);
        start += period;
    }
    samples
}

fn assert_bpm_near(result: &BpmResult, expected: f32, tolerance: f32) {
    assert!(
        (result.bpm - expected).abs() < tolerance,
        "Expected {:.1} BPM, got {:.2} (peak bin {})",
        expected,
        result.bpm,
        result.metadata.peak_bin
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_train_musical_range() {
        let sample_rate = 44100.0;
        for bpm in [75.0, 90.0, 120.0, 128.0, 150.0, 174.0] {
            let samples = click_train(sample_rate, bpm, 12.0);
            let result = compute(&samples, sample_rate)
                .unwrap_or_else(|e| panic!("{} BPM analysis failed: {}", bpm, e));

            // Ground truth from the rounded click period
            let period = (sample_rate * 60.0 / bpm).round();
            let expected = sample_rate * 60.0 / period;
            assert_bpm_near(&result, expected, 2.0);

            println!(
                "{} BPM click train: {:.2} BPM, {} contributing levels, {:.2} ms",
                bpm,
                result.bpm,
                result.metadata.contributing_levels(),
                result.metadata.processing_time_ms
            );
        }
    }

    #[test]
    fn test_click_train_low_sample_rate() {
        let samples = click_train(8000.0, 120.0, 15.0);
        let result = compute(&samples, 8000.0).expect("Analysis should succeed");
        assert_bpm_near(&result, 120.0, 2.0);
        assert_eq!(result.debug.as_ref().unwrap().len(), 4000);
    }

    #[test]
    fn test_kick_track() {
        let samples = kick_track(44100.0, 125.0, 12.0);
        let result = compute(&samples, 44100.0).expect("Analysis should succeed");
        let expected = 44100.0 * 60.0 / (44100.0f32 * 60.0 / 125.0).round();
        assert_bpm_near(&result, expected, 2.0);
    }

    #[test]
    fn test_every_wavelet_family() {
        let samples = click_train(22050.0, 110.0, 15.0);
        let expected = 22050.0 * 60.0 / (22050.0f32 * 60.0 / 110.0).round();
        for wavelet in Daubechies::ALL {
            let config = AnalysisConfig {
                wavelet,
                ..Default::default()
            };
            let result = compute_with_config(&samples, 22050.0, &config)
                .unwrap_or_else(|e| panic!("{:?} failed: {}", wavelet, e));
            assert_bpm_near(&result, expected, 2.0);
        }
    }

    #[test]
    fn test_result_metadata_and_debug() {
        let samples = click_train(44100.0, 120.0, 12.0);
        let result = compute(&samples, 44100.0).unwrap();

        assert!((result.metadata.duration_seconds - 12.0).abs() < 1e-3);
        assert_eq!(result.metadata.sample_rate, 44100.0);
        assert!(result.metadata.processing_time_ms >= 0.0);
        assert_eq!(result.metadata.algorithm_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(result.metadata.levels.len(), 4);
        assert!(result.metadata.contributing_levels() >= 1);

        for (k, level) in result.metadata.levels.iter().enumerate() {
            assert_eq!(level.scale.level, k);
            assert_eq!(level.scale.factor, 1 << k);
        }

        let debug = result.debug.as_ref().expect("Debug histograms enabled by default");
        assert_eq!(debug.occurrence.len(), 22050);
        assert_eq!(debug.amplitude.len(), 22050);
        // The tempo is read from the smoothed curve's maximum
        let peak = result.metadata.peak_bin;
        assert!(debug.amplitude.iter().all(|&a| a <= debug.amplitude[peak]));
        assert!((result.bpm - 22050.0 * 60.0 / peak as f32).abs() < 1e-3);
        // Beat interval on the chart axis
        assert!((debug.interval_seconds(peak) - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_debug_can_be_disabled() {
        let samples = click_train(22050.0, 120.0, 12.0);
        let config = AnalysisConfig {
            include_debug: false,
            ..Default::default()
        };
        let result = compute_with_config(&samples, 22050.0, &config).unwrap();
        assert!(result.debug.is_none());
        assert_bpm_near(&result, 120.0, 2.0);
    }

    #[test]
    fn test_silence_reports_no_tempo() {
        let samples = vec![0.0f32; 44100 * 10];
        let result = compute(&samples, 44100.0);

        match result {
            Err(AnalysisError::NoTempoFound(msg)) => {
                assert!(!msg.is_empty());
            }
            other => panic!("Silence should report no tempo, got {:?}", other.map(|r| r.bpm)),
        }
    }

    #[test]
    fn test_sinusoid_does_not_crash() {
        let samples: Vec<f32> = (0..44100 * 8)
            .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin() * 0.5)
            .collect();

        match compute(&samples, 44100.0) {
            Ok(result) => assert!(result.bpm.is_finite() && result.bpm > 0.0),
            Err(e) => assert!(
                matches!(e, AnalysisError::NoTempoFound(_)),
                "Unexpected error: {}",
                e
            ),
        }
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            compute(&[], 44100.0),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(compute(&[0.0; 4096], 0.0).unwrap_err().is_invalid_input());
        assert!(compute(&[0.0; 4096], -1.0).unwrap_err().is_invalid_input());
        assert!(compute(&[0.0; 4096], f32::NAN).unwrap_err().is_invalid_input());
        assert!(compute(&[0.0; 3], 44100.0).unwrap_err().is_invalid_input());

        let config = AnalysisConfig {
            smoothing_sigma: -1.0,
            ..Default::default()
        };
        let samples = click_train(22050.0, 120.0, 12.0);
        assert!(compute_with_config(&samples, 22050.0, &config)
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_deterministic() {
        let samples = click_train(44100.0, 133.0, 12.0);
        let first = compute(&samples, 44100.0).unwrap();
        let second = compute(&samples, 44100.0).unwrap();

        assert_eq!(first.bpm.to_bits(), second.bpm.to_bits());
        assert_eq!(first.debug, second.debug);
        assert_eq!(first.metadata.levels, second.metadata.levels);
        assert_eq!(first.metadata.peak_bin, second.metadata.peak_bin);
    }

    #[test]
    fn test_parallel_calls_match_sequential() {
        let tempos = [96.0f32, 112.0, 124.0, 140.0];
        let buffers: Vec<Vec<f32>> = tempos
            .iter()
            .map(|&bpm| click_train(22050.0, bpm, 12.0))
            .collect();

        let sequential: Vec<f32> = buffers
            .iter()
            .map(|samples| compute(samples, 22050.0).unwrap().bpm)
            .collect();
        let parallel: Vec<f32> = buffers
            .par_iter()
            .map(|samples| compute(samples, 22050.0).unwrap().bpm)
            .collect();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_result_serializes_to_json() {
        let samples = click_train(22050.0, 120.0, 12.0);
        let result = compute(&samples, 22050.0).unwrap();

        let json = serde_json::to_string(&result).expect("Result should serialize");
        assert!(json.contains("\"bpm\""));
        assert!(json.contains("\"occurrence\""));
        assert!(json.contains("\"levels\""));

        let parsed: BpmResult = serde_json::from_str(&json).expect("Result should deserialize");
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_dynamic_range() {
        assert_eq!(dynamic_range(&vec![0.0f32; 1024]), 0.0);
        assert_eq!(dynamic_range(&vec![0.3f32; 1024]), 0.3);
        assert_eq!(dynamic_range(&vec![-0.7f32; 1024]), 0.7);

        // Independent of the tempo pipeline
        let samples = click_train(44100.0, 120.0, 2.0);
        let rms = dynamic_range(&samples);
        assert!(rms > 0.0 && rms < 0.01);
    }
}
