use crate::{
    CoreResult,
    capture::{CaptureService, CpalCapturer},
};

use std::time::Duration;

use serde::Serialize;
use tracing::{info, instrument};

const SIGNAL_PEAK_THRESHOLD: f32 = 0.01;
const SIGNAL_RMS_THRESHOLD: f32 = 0.005;

/// Longest capture window accepted for a probe.
const MAX_PROBE_DURATION: Duration = Duration::from_secs(10);

/// Map an RMS value onto a display level in `[0.0, 1.0]`.
pub fn normalized_level(rms: f32) -> f32 {
    (rms * 3.0).clamp(0.0, 1.0)
}

/// Result of a short signal probe on one input device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalProbe {
    /// Device the probe ran on.
    pub device_name: String,
    /// Probe window.
    pub duration_ms: u64,
    /// Samples observed.
    pub sample_count: u64,
    /// Highest absolute sample.
    pub peak: f32,
    /// Root mean square over all samples.
    pub rms: f32,
    /// `rms` mapped onto `[0.0, 1.0]`.
    pub normalized_level: f32,
    /// Whether anything above the noise floor was heard.
    pub has_signal: bool,
    /// Human-readable verdict.
    pub message: String,
}

/// Running statistics over probe samples.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignalStats {
    sum_squares: f64,
    peak: f32,
    sample_count: u64,
}

impl SignalStats {
    /// Fold `samples` into the running totals.
    pub fn accumulate(&mut self, samples: &[f32]) {
        for &sample in samples {
            self.sum_squares += f64::from(sample) * f64::from(sample);
            self.peak = self.peak.max(sample.abs());
        }
        self.sample_count += samples.len() as u64;
    }

    /// Produce the probe report.
    pub fn summarize(&self, device_name: &str, duration_ms: u64) -> SignalProbe {
        if self.sample_count == 0 {
            return SignalProbe {
                device_name: device_name.to_string(),
                duration_ms,
                sample_count: 0,
                peak: 0.0,
                rms: 0.0,
                normalized_level: 0.0,
                has_signal: false,
                message: "No samples captured during probe. Source may be inactive or blocked."
                    .to_string(),
            };
        }

        let rms = (self.sum_squares / self.sample_count as f64).sqrt() as f32;
        let has_signal = self.peak >= SIGNAL_PEAK_THRESHOLD || rms >= SIGNAL_RMS_THRESHOLD;
        let message = if has_signal {
            "Input signal detected.".to_string()
        } else {
            "Device is capturing but the signal is near silent. Check the mute switch and input gain."
                .to_string()
        };

        SignalProbe {
            device_name: device_name.to_string(),
            duration_ms,
            sample_count: self.sample_count,
            peak: self.peak,
            rms,
            normalized_level: normalized_level(rms),
            has_signal,
            message,
        }
    }
}

/// Capture from `device_id` for `duration` and report whether it hears anything.
///
/// Blocks the calling thread for the probe window.
#[track_caller]
#[instrument]
pub fn probe_input_signal(device_id: Option<&str>, duration: Duration) -> CoreResult<SignalProbe> {
    let duration = duration.min(MAX_PROBE_DURATION);
    let mut capturer = CpalCapturer::new();

    capturer.start_capture(duration + Duration::from_millis(250), device_id)?;
    std::thread::sleep(duration);
    let audio = capturer.stop_capture()?;

    let mut stats = SignalStats::default();
    stats.accumulate(&audio.samples);

    let device_name = capturer.device_name().unwrap_or("default").to_string();
    let probe = stats.summarize(&device_name, duration.as_millis() as u64);

    info!(
        device = %probe.device_name,
        peak = probe.peak,
        rms = probe.rms,
        has_signal = probe.has_signal,
        "Signal probe finished"
    );

    Ok(probe)
}
