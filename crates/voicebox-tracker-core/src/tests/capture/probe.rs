use crate::capture::{SignalStats, normalized_level};

/// WHAT: No samples yields an inactive-source verdict
/// WHY: A blocked device must not be reported as silent
#[test]
fn given_no_samples_when_summarizing_then_no_signal_with_inactive_message() {
    // Given: Nothing accumulated
    let stats = SignalStats::default();

    // When: Summarizing
    let probe = stats.summarize("USB Mic", 1500);

    // Then: No signal and the inactive message
    assert!(!probe.has_signal);
    assert_eq!(probe.sample_count, 0);
    assert!(probe.message.starts_with("No samples captured"));
}

/// WHAT: Near-silent input is flagged without a signal
/// WHY: A muted microphone still produces samples
#[test]
fn given_near_silence_when_summarizing_then_no_signal() {
    let mut stats = SignalStats::default();
    stats.accumulate(&[0.001, -0.002, 0.0015, 0.0]);

    let probe = stats.summarize("USB Mic", 1500);

    assert!(!probe.has_signal);
    assert_eq!(probe.sample_count, 4);
    assert!(probe.message.contains("near silent"));
}

/// WHAT: A single loud peak counts as signal
/// WHY: Short sounds must be detected even when RMS is low
#[test]
fn given_one_peak_when_summarizing_then_signal_detected() {
    // Given: Mostly silence with one peak across two batches
    let mut stats = SignalStats::default();
    stats.accumulate(&[0.0; 1000]);
    stats.accumulate(&[-0.5]);

    // When: Summarizing
    let probe = stats.summarize("USB Mic", 1500);

    // Then: Peak is absolute and detected
    assert!(probe.has_signal);
    assert_eq!(probe.peak, 0.5);
    assert_eq!(probe.sample_count, 1001);
}

/// WHAT: Level mapping is clamped to the unit range
/// WHY: Meters must never overflow
#[test]
fn given_rms_values_when_normalizing_level_then_clamped() {
    assert_eq!(normalized_level(0.0), 0.0);
    assert!((normalized_level(0.1) - 0.3).abs() < 1e-6);
    assert_eq!(normalized_level(2.0), 1.0);
    assert_eq!(normalized_level(-1.0), 0.0);
}
