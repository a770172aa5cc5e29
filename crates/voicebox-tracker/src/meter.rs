//! Text rendering of recent input levels.

use std::fmt;

/// Bar cells for a full-scale level.
const METER_WIDTH: usize = 20;

/// Levels considered for one reading; the capture pushes one per callback.
const METER_WINDOW: usize = 10;

/// Peak of the newest levels drawn as a bar, e.g. `level [#####-----] 0.50`.
pub(crate) struct LevelMeter<'a> {
    levels: &'a [f32],
}

impl<'a> LevelMeter<'a> {
    pub(crate) fn new(levels: &'a [f32]) -> Self {
        Self { levels }
    }

    /// Loudest of the newest levels, or silence.
    pub(crate) fn peak(&self) -> f32 {
        let start = self.levels.len().saturating_sub(METER_WINDOW);
        self.levels[start..]
            .iter()
            .copied()
            .fold(0.0, f32::max)
            .clamp(0.0, 1.0)
    }
}

impl fmt::Display for LevelMeter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let peak = self.peak();
        let filled = ((peak * METER_WIDTH as f32).round() as usize).min(METER_WIDTH);

        write!(
            f,
            "level [{}{}] {:.2}",
            "#".repeat(filled),
            "-".repeat(METER_WIDTH - filled),
            peak
        )
    }
}
