mod cpal_capture;
mod level;
mod probe;

pub use {
    cpal_capture::CpalCapturer,
    level::{LEVEL_HISTORY_LEN, LevelHistory},
    probe::{SignalProbe, SignalStats, normalized_level, probe_input_signal},
};

use crate::CoreResult;

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Category of a capture failure, used to pick the user-facing summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureFailureKind {
    /// Microphone access was refused.
    Permission,
    /// Selected device is missing, unplugged or unusable.
    Device,
    /// Native capture threw for any other reason.
    Capture,
    /// Captured audio could not be converted to the output format.
    Conversion,
}

impl CaptureFailureKind {
    /// Actionable, non-technical message for this category.
    pub fn summary(self) -> &'static str {
        match self {
            CaptureFailureKind::Permission => {
                "Microphone access was denied. Allow microphone access in your system settings and try again."
            }
            CaptureFailureKind::Device => {
                "The selected microphone is unavailable or was disconnected. Reconnect it or choose another input device."
            }
            CaptureFailureKind::Capture => "Recording failed unexpectedly. Please try again.",
            CaptureFailureKind::Conversion => {
                "The recording could not be converted. Please record again."
            }
        }
    }
}

impl fmt::Display for CaptureFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaptureFailureKind::Permission => "permission",
            CaptureFailureKind::Device => "device",
            CaptureFailureKind::Capture => "capture",
            CaptureFailureKind::Conversion => "conversion",
        };
        f.write_str(name)
    }
}

/// Interleaved audio returned when a capture stops.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedAudio {
    /// Interleaved samples normalized to `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
    /// Frames per second.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
}

impl CapturedAudio {
    /// Length of the capture in wall-clock time.
    pub fn duration(&self) -> Duration {
        let frames_per_second = u64::from(self.sample_rate) * u64::from(self.channels.max(1));
        if frames_per_second == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / frames_per_second as f64)
    }
}

/// Native capture lifecycle consumed by a recording session.
///
/// Implementations report failures as [`crate::TrackerError::CaptureFailed`]
/// so the session can classify them.
pub trait CaptureService {
    /// Begin capturing from `device_id`, or the default device when `None`.
    fn start_capture(&mut self, max_duration: Duration, device_id: Option<&str>) -> CoreResult<()>;

    /// Suspend the running capture without discarding samples.
    fn pause(&mut self) -> CoreResult<()>;

    /// Continue a paused capture.
    fn resume(&mut self) -> CoreResult<()>;

    /// Stop capturing and hand back everything recorded.
    fn stop_capture(&mut self) -> CoreResult<CapturedAudio>;

    /// True once the capture has hit its maximum duration.
    fn limit_reached(&self) -> bool {
        false
    }

    /// Recent input levels in `[0.0, 1.0]`, oldest first.
    fn recent_levels(&self) -> Vec<f32> {
        Vec::new()
    }

    /// Error reported asynchronously by the native stream since the last call.
    fn take_error(&mut self) -> Option<crate::TrackerError> {
        None
    }
}
