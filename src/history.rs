use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// When recorded colors are thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryPolicy {
    pub purge_on_resize: bool,
    pub purge_on_clear: bool,
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        Self {
            purge_on_resize: true,
            purge_on_clear: false,
        }
    }
}

/// Last color applied to each cell, independent of what is currently shown.
#[derive(Debug, Clone, Default)]
pub struct ColorHistory {
    entries: HashMap<(u32, u32), Color>,
}

impl ColorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, x: u32, y: u32, color: Color) {
        self.entries.insert((x, y), color);
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.entries.get(&(x, y)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn purge(&mut self) {
        self.entries.clear();
    }

    /// Drops entries that fall outside a `width` x `height` grid.
    pub fn retain_within(&mut self, width: u32, height: u32) {
        self.entries.retain(|&(x, y), _| x < width && y < height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_last_color_per_cell() {
        let mut history = ColorHistory::new();
        history.record(3, 4, Color::BLACK);
        history.record(3, 4, Color::WHITE);
        assert_eq!(history.get(3, 4), Some(Color::WHITE));
        assert_eq!(history.get(4, 3), None);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn retain_within_drops_out_of_range_entries() {
        let mut history = ColorHistory::new();
        history.record(0, 0, Color::BLACK);
        history.record(9, 0, Color::BLACK);
        history.record(0, 9, Color::BLACK);
        history.retain_within(5, 5);
        assert_eq!(history.len(), 1);
        assert_eq!(history.get(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn default_policy_keeps_history_across_clear() {
        let policy = HistoryPolicy::default();
        assert!(policy.purge_on_resize);
        assert!(!policy.purge_on_clear);
    }
}
