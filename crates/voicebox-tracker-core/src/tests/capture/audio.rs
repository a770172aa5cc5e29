use crate::capture::{CaptureFailureKind, CapturedAudio};

use std::time::Duration;

/// WHAT: Duration accounts for interleaved channels
/// WHY: Stereo buffers hold two samples per frame
#[test]
fn given_stereo_buffer_when_measuring_duration_then_frames_counted() {
    let audio = CapturedAudio {
        samples: vec![0.0; 96_000],
        sample_rate: 48_000,
        channels: 2,
    };

    assert_eq!(audio.duration(), Duration::from_secs(1));
}

/// WHAT: An unknown format has zero duration
/// WHY: A failed stop leaves no format to divide by
#[test]
fn given_zero_sample_rate_when_measuring_duration_then_zero() {
    let audio = CapturedAudio {
        samples: vec![0.0; 10],
        sample_rate: 0,
        channels: 0,
    };

    assert_eq!(audio.duration(), Duration::ZERO);
}

/// WHAT: Each failure kind has its own non-technical summary
/// WHY: Permission and device problems need different remediation
#[test]
fn given_failure_kinds_when_summarizing_then_distinct_messages() {
    let kinds = [
        CaptureFailureKind::Permission,
        CaptureFailureKind::Device,
        CaptureFailureKind::Capture,
        CaptureFailureKind::Conversion,
    ];

    let summaries: std::collections::HashSet<_> = kinds.iter().map(|k| k.summary()).collect();

    assert_eq!(summaries.len(), kinds.len());
    assert!(CaptureFailureKind::Permission.summary().contains("microphone access"));
}
