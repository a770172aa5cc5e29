use crate::capture::{LEVEL_HISTORY_LEN, LevelHistory};

/// WHAT: History keeps only the newest levels
/// WHY: Metering runs for the whole capture and must stay bounded
#[test]
fn given_full_history_when_pushing_then_oldest_evicted() {
    // Given: A history filled past capacity
    let mut history = LevelHistory::new();
    for i in 0..LEVEL_HISTORY_LEN + 10 {
        history.push(i as f32 / 1000.0);
    }

    // When: Reading it back
    let levels = history.to_vec();

    // Then: Capacity entries, oldest first, the first ten evicted
    assert_eq!(levels.len(), LEVEL_HISTORY_LEN);
    assert_eq!(levels[0], 10.0 / 1000.0);
    assert_eq!(history.latest(), (LEVEL_HISTORY_LEN + 9) as f32 / 1000.0);
}

/// WHAT: Levels are clamped to the unit range
/// WHY: Meters assume normalized input
#[test]
fn given_out_of_range_levels_when_pushing_then_clamped() {
    let mut history = LevelHistory::new();

    history.push(-0.5);
    history.push(3.0);
    history.push(f32::NAN);

    assert_eq!(history.to_vec(), vec![0.0, 1.0, 0.0]);
}

/// WHAT: An empty history reads as silence
/// WHY: The meter renders before the first callback arrives
#[test]
fn given_empty_history_when_reading_latest_then_silence() {
    let mut history = LevelHistory::new();
    assert!(history.is_empty());
    assert_eq!(history.latest(), 0.0);

    history.push(0.4);
    history.clear();

    assert_eq!(history.len(), 0);
}
