//! Editor state and the paint / drag-paint state machine.
//!
//! Every operation mutates an explicit [`EditorState`] and returns a [`Redraw`]
//! describing what changed; drawing is left to the renderer.

use crate::color::Color;
use crate::grid::{GridError, GridLimits, GridState};
use crate::history::{ColorHistory, HistoryPolicy};
use serde::{Deserialize, Serialize};

/// What a drag gesture does to the cells it passes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintMode {
    Idle,
    Selecting,
    Deselecting,
}

/// How a press decides between painting and erasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintStyle {
    /// Press on an empty cell paints, press on a filled cell erases.
    #[default]
    Toggle,
    /// Press always paints with the primary color; erasing needs the erase
    /// modifier.
    Brush,
}

/// Portion of the surface that must be redrawn after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redraw {
    None,
    Cells(Vec<(u32, u32)>),
    Full,
}

impl Redraw {
    pub fn cell(x: u32, y: u32) -> Self {
        Redraw::Cells(vec![(x, y)])
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Redraw::None)
    }

    pub fn merge(self, other: Redraw) -> Redraw {
        match (self, other) {
            (Redraw::Full, _) | (_, Redraw::Full) => Redraw::Full,
            (Redraw::None, other) | (other, Redraw::None) => other,
            (Redraw::Cells(mut cells), Redraw::Cells(more)) => {
                for cell in more {
                    if !cells.contains(&cell) {
                        cells.push(cell);
                    }
                }
                Redraw::Cells(cells)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorOptions {
    pub width: u32,
    pub height: u32,
    pub limits: GridLimits,
    pub primary_color: Color,
    pub guide_visible: bool,
    pub style: PaintStyle,
    pub history_policy: HistoryPolicy,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            limits: GridLimits::default(),
            primary_color: Color::rgb(0x00, 0x95, 0x78),
            guide_visible: true,
            style: PaintStyle::Toggle,
            history_policy: HistoryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorState {
    grid: GridState,
    history: ColorHistory,
    mode: PaintMode,
    primary_color: Color,
    guide_visible: bool,
    style: PaintStyle,
    history_policy: HistoryPolicy,
    limits: GridLimits,
}

impl EditorState {
    pub fn new(options: EditorOptions) -> Result<Self, GridError> {
        let grid = GridState::new(options.width, options.height, &options.limits)?;

        Ok(Self {
            grid,
            history: ColorHistory::new(),
            mode: PaintMode::Idle,
            primary_color: options.primary_color,
            guide_visible: options.guide_visible,
            style: options.style,
            history_policy: options.history_policy,
            limits: options.limits,
        })
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn history(&self) -> &ColorHistory {
        &self.history
    }

    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    pub fn style(&self) -> PaintStyle {
        self.style
    }

    pub fn limits(&self) -> GridLimits {
        self.limits
    }

    pub fn primary_color(&self) -> Color {
        self.primary_color
    }

    pub fn set_primary_color(&mut self, color: Color) {
        self.primary_color = color;
    }

    pub fn guide_visible(&self) -> bool {
        self.guide_visible
    }

    pub fn toggle_guide(&mut self) -> Redraw {
        self.guide_visible = !self.guide_visible;
        Redraw::Full
    }

    /// Paints one cell with `color` and records it. Always rewrites, even when
    /// the cell already holds `color`.
    pub fn paint(&mut self, x: u32, y: u32, color: Color) -> Redraw {
        if !self.in_bounds(x, y) {
            return Redraw::None;
        }
        self.grid.set_cell(x, y, Some(color));
        self.history.record(x, y, color);
        Redraw::cell(x, y)
    }

    /// Primary-button press over a cell. Starts a drag in the mode implied by
    /// the paint style and the cell's current state.
    pub fn press(&mut self, x: u32, y: u32) -> Redraw {
        if !self.in_bounds(x, y) {
            return Redraw::None;
        }

        match self.style {
            PaintStyle::Toggle if self.grid.is_filled(x, y) => self.press_erase(x, y),
            PaintStyle::Toggle | PaintStyle::Brush => {
                self.set_mode(PaintMode::Selecting);
                self.paint(x, y, self.primary_color)
            }
        }
    }

    /// Press with the erase modifier: empties the cell and starts deselecting.
    pub fn press_erase(&mut self, x: u32, y: u32) -> Redraw {
        if !self.in_bounds(x, y) {
            return Redraw::None;
        }
        self.set_mode(PaintMode::Deselecting);
        self.erase(x, y)
    }

    /// Pointer entered a cell while the button may be held.
    pub fn enter(&mut self, x: u32, y: u32) -> Redraw {
        if !self.in_bounds(x, y) {
            return Redraw::None;
        }

        match self.mode {
            PaintMode::Idle => Redraw::None,
            PaintMode::Selecting => {
                let current = self.grid.get_cell(x, y);
                let wants_paint = match self.style {
                    PaintStyle::Toggle => current.is_none(),
                    PaintStyle::Brush => current != Some(self.primary_color),
                };
                if wants_paint {
                    self.paint(x, y, self.primary_color)
                } else {
                    Redraw::None
                }
            }
            PaintMode::Deselecting => self.erase(x, y),
        }
    }

    pub fn release(&mut self) {
        self.set_mode(PaintMode::Idle);
    }

    /// Pointer left the drawable surface.
    pub fn leave(&mut self) {
        self.set_mode(PaintMode::Idle);
    }

    /// Picks up the last color applied at a cell as the primary color.
    /// Returns the recalled color, or `None` when nothing was recorded there.
    pub fn recall_color(&mut self, x: u32, y: u32) -> Option<Color> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let color = self.history.get(x, y)?;
        self.primary_color = color;
        log::debug!("Recalled {} from cell ({}, {})", color, x, y);
        Some(color)
    }

    /// Replaces the grid with an empty one of the new size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<Redraw, GridError> {
        self.grid = GridState::new(width, height, &self.limits)?;
        self.set_mode(PaintMode::Idle);

        if self.history_policy.purge_on_resize {
            self.history.purge();
        } else {
            self.history.retain_within(width, height);
        }

        log::info!("Grid resized to {}x{}", width, height);
        Ok(Redraw::Full)
    }

    /// Empties every cell. History survives unless the policy purges it.
    pub fn clear(&mut self) -> Redraw {
        self.grid.clear();
        self.set_mode(PaintMode::Idle);
        if self.history_policy.purge_on_clear {
            self.history.purge();
        }
        Redraw::Full
    }

    fn erase(&mut self, x: u32, y: u32) -> Redraw {
        if self.grid.set_cell(x, y, None) {
            Redraw::cell(x, y)
        } else {
            Redraw::None
        }
    }

    fn in_bounds(&self, x: u32, y: u32) -> bool {
        self.grid.contains(x as i64, y as i64)
    }

    fn set_mode(&mut self, mode: PaintMode) {
        if self.mode != mode {
            log::debug!("Paint mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEAL: Color = Color::rgb(0x00, 0x95, 0x78);

    fn editor(width: u32, height: u32) -> EditorState {
        EditorState::new(EditorOptions {
            width,
            height,
            ..EditorOptions::default()
        })
        .unwrap()
    }

    fn brush_editor(width: u32, height: u32) -> EditorState {
        EditorState::new(EditorOptions {
            width,
            height,
            style: PaintStyle::Brush,
            ..EditorOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn paint_records_color_in_history() {
        let mut state = editor(10, 10);
        for (x, y) in [(0, 0), (9, 9), (5, 2)] {
            let redraw = state.paint(x, y, Color::BLACK);
            assert_eq!(redraw, Redraw::cell(x, y));
            assert_eq!(state.history().get(x, y), Some(Color::BLACK));
        }
    }

    #[test]
    fn click_paints_single_cell() {
        let mut state = editor(10, 10);
        state.set_primary_color("#009578".parse().unwrap());

        let redraw = state.press(3, 4);
        state.release();

        assert_eq!(redraw, Redraw::cell(3, 4));
        assert_eq!(state.grid().get_cell(3, 4), Some(TEAL));
        assert_eq!(state.history().get(3, 4), Some(TEAL));
        assert_eq!(state.grid().filled_count(), 1);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn drag_from_empty_cell_fills_path() {
        let mut state = editor(10, 10);

        state.press(0, 0);
        assert_eq!(state.mode(), PaintMode::Selecting);
        state.enter(0, 1);
        state.enter(0, 2);
        state.release();

        assert_eq!(state.mode(), PaintMode::Idle);
        assert!(state.grid().is_filled(0, 0));
        assert!(state.grid().is_filled(0, 1));
        assert!(state.grid().is_filled(0, 2));
        assert_eq!(state.grid().filled_count(), 3);
    }

    #[test]
    fn press_on_filled_cell_starts_deselecting() {
        let mut state = editor(5, 5);
        state.paint(1, 1, TEAL);
        state.paint(2, 1, TEAL);

        let redraw = state.press(1, 1);
        assert_eq!(redraw, Redraw::cell(1, 1));
        assert_eq!(state.mode(), PaintMode::Deselecting);

        // empty cells stay empty while deselecting
        assert_eq!(state.enter(3, 3), Redraw::None);
        assert!(!state.grid().is_filled(3, 3));

        assert_eq!(state.enter(2, 1), Redraw::cell(2, 1));
        assert_eq!(state.grid().filled_count(), 0);
        // erasing keeps the recorded color
        assert_eq!(state.history().get(2, 1), Some(TEAL));
    }

    #[test]
    fn reentering_filled_cell_while_selecting_is_a_noop() {
        let mut state = editor(5, 5);
        state.paint(2, 2, Color::BLACK);

        state.press(0, 0);
        for _ in 0..3 {
            assert_eq!(state.enter(2, 2), Redraw::None);
            assert_eq!(state.enter(0, 0), Redraw::None);
        }
        assert_eq!(state.grid().get_cell(2, 2), Some(Color::BLACK));
        assert_eq!(state.history().get(2, 2), Some(Color::BLACK));
    }

    #[test]
    fn moves_after_release_change_nothing() {
        let mut state = editor(5, 5);
        state.press(0, 0);
        state.release();
        let before = state.grid().clone();

        for (x, y) in [(1, 0), (2, 0), (3, 3), (4, 4)] {
            assert_eq!(state.enter(x, y), Redraw::None);
        }
        assert_eq!(state.grid(), &before);
    }

    #[test]
    fn leaving_surface_ends_the_drag() {
        let mut state = editor(5, 5);
        state.press(0, 0);
        state.leave();
        assert_eq!(state.mode(), PaintMode::Idle);
        assert_eq!(state.enter(1, 0), Redraw::None);
    }

    #[test]
    fn out_of_range_coordinates_are_ignored() {
        let mut state = editor(5, 5);
        assert_eq!(state.paint(5, 0, TEAL), Redraw::None);
        assert_eq!(state.press(0, 5), Redraw::None);
        assert_eq!(state.mode(), PaintMode::Idle);
        assert!(state.history().is_empty());
        assert_eq!(state.recall_color(7, 7), None);
    }

    #[test]
    fn brush_style_repaints_different_colors_only() {
        let mut state = brush_editor(5, 5);
        state.paint(1, 0, Color::BLACK);
        state.paint(2, 0, TEAL);

        state.press(0, 0);
        assert_eq!(state.mode(), PaintMode::Selecting);
        assert_eq!(state.enter(1, 0), Redraw::cell(1, 0));
        assert_eq!(state.enter(2, 0), Redraw::None);
        assert_eq!(state.grid().get_cell(1, 0), Some(TEAL));
    }

    #[test]
    fn brush_press_on_filled_cell_repaints() {
        let mut state = brush_editor(5, 5);
        state.paint(0, 0, Color::BLACK);
        assert_eq!(state.press(0, 0), Redraw::cell(0, 0));
        assert_eq!(state.grid().get_cell(0, 0), Some(TEAL));
        assert_eq!(state.mode(), PaintMode::Selecting);
    }

    #[test]
    fn erase_modifier_deselects_in_brush_style() {
        let mut state = brush_editor(5, 5);
        state.paint(0, 0, TEAL);
        state.paint(0, 1, TEAL);
        state.press_erase(0, 0);
        state.enter(0, 1);
        assert_eq!(state.mode(), PaintMode::Deselecting);
        assert_eq!(state.grid().filled_count(), 0);
    }

    #[test]
    fn resize_discards_cells_and_history() {
        let mut state = editor(10, 10);
        state.paint(1, 1, TEAL);
        state.press(2, 2);

        assert_eq!(state.resize(4, 3), Ok(Redraw::Full));
        assert_eq!(state.mode(), PaintMode::Idle);
        assert_eq!(state.grid().width, 4);
        assert_eq!(state.grid().height, 3);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(state.grid().get_cell(x, y), None);
            }
        }
        assert!(state.history().is_empty());
    }

    #[test]
    fn resize_without_purge_drops_only_stale_entries() {
        let mut state = EditorState::new(EditorOptions {
            history_policy: HistoryPolicy {
                purge_on_resize: false,
                purge_on_clear: false,
            },
            ..EditorOptions::default()
        })
        .unwrap();
        state.paint(1, 1, TEAL);
        state.paint(8, 8, TEAL);

        state.resize(5, 5).unwrap();
        assert_eq!(state.grid().get_cell(1, 1), None);
        assert_eq!(state.history().get(1, 1), Some(TEAL));
        assert_eq!(state.history().get(8, 8), None);
    }

    #[test]
    fn resize_rejects_out_of_range_dimensions() {
        let mut state = editor(10, 10);
        state.paint(0, 0, TEAL);
        assert!(state.resize(0, 5).is_err());
        assert!(state.resize(51, 5).is_err());
        assert_eq!(state.grid().width, 10);
        assert!(state.grid().is_filled(0, 0));
    }

    #[test]
    fn clear_keeps_history_by_default() {
        let mut state = editor(5, 5);
        state.paint(3, 3, Color::BLACK);
        assert_eq!(state.clear(), Redraw::Full);
        assert_eq!(state.grid().filled_count(), 0);
        assert_eq!(state.recall_color(3, 3), Some(Color::BLACK));
        assert_eq!(state.primary_color(), Color::BLACK);
    }

    #[test]
    fn clear_can_purge_history() {
        let mut state = EditorState::new(EditorOptions {
            history_policy: HistoryPolicy {
                purge_on_resize: true,
                purge_on_clear: true,
            },
            ..EditorOptions::default()
        })
        .unwrap();
        state.paint(3, 3, Color::BLACK);
        state.clear();
        assert!(state.history().is_empty());
    }

    #[test]
    fn recall_without_entry_keeps_primary_color() {
        let mut state = editor(5, 5);
        assert_eq!(state.recall_color(1, 1), None);
        assert_eq!(state.primary_color(), TEAL);
    }

    #[test]
    fn redraw_merge() {
        let merged = Redraw::cell(1, 1)
            .merge(Redraw::None)
            .merge(Redraw::cell(2, 2))
            .merge(Redraw::cell(1, 1));
        assert_eq!(merged, Redraw::Cells(vec![(1, 1), (2, 2)]));
        assert_eq!(merged.merge(Redraw::Full), Redraw::Full);
        assert!(Redraw::None.merge(Redraw::None).is_none());
    }
}
