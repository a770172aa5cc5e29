use std::collections::VecDeque;

/// Number of input levels kept by [`LevelHistory`].
pub const LEVEL_HISTORY_LEN: usize = 240;

/// Bounded history of normalized input levels, oldest first.
///
/// Levels are clamped to `[0.0, 1.0]` on push; NaN counts as silence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelHistory {
    levels: VecDeque<f32>,
}

impl LevelHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self {
            levels: VecDeque::with_capacity(LEVEL_HISTORY_LEN),
        }
    }

    /// Record `level`, evicting the oldest entry when full.
    pub fn push(&mut self, level: f32) {
        let level = if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) };
        if self.levels.len() == LEVEL_HISTORY_LEN {
            self.levels.pop_front();
        }
        self.levels.push_back(level);
    }

    /// Most recent level, or silence when empty.
    pub fn latest(&self) -> f32 {
        self.levels.back().copied().unwrap_or(0.0)
    }

    /// Every stored level, oldest first.
    pub fn to_vec(&self) -> Vec<f32> {
        self.levels.iter().copied().collect()
    }

    /// Number of stored levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Forget every level.
    pub fn clear(&mut self) {
        self.levels.clear();
    }
}
