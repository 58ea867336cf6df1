//! Routes input actions to the editor and collects what needs redrawing.

use crate::color::Color;
use crate::editor::{EditorState, PaintMode, PaintStyle, Redraw};
use crate::input::{InputAction, PressGesture};
use crate::layout::SurfaceLayout;
use crate::status::StatusLine;

const CLEAR_PROMPT: &str = "Clear the canvas? Press Y to confirm, any other key cancels";

pub struct Session {
    editor: EditorState,
    status: StatusLine,
    palette: Vec<Color>,
    pending: Redraw,
    last_cell: Option<(u32, u32)>,
}

impl Session {
    pub fn new(editor: EditorState, palette: Vec<Color>) -> Self {
        Self {
            editor,
            status: StatusLine::default(),
            palette,
            pending: Redraw::Full,
            last_cell: None,
        }
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Hands over everything queued for redraw since the last call.
    pub fn take_redraw(&mut self) -> Redraw {
        std::mem::replace(&mut self.pending, Redraw::None)
    }

    pub fn request_full_redraw(&mut self) {
        self.queue(Redraw::Full);
    }

    pub fn status_text(&self) -> String {
        let grid = self.editor.grid();
        let style = match self.editor.style() {
            PaintStyle::Toggle => "toggle",
            PaintStyle::Brush => "brush",
        };
        let summary = format!(
            "{}x{}  {} stitches  {}  guide {}  {}",
            grid.width,
            grid.height,
            grid.filled_count(),
            self.editor.primary_color(),
            if self.editor.guide_visible() { "on" } else { "off" },
            style
        );
        self.status.display_text(&summary)
    }

    /// Applies one action. Returns `true` when the grid dimensions changed and
    /// the surface layout must be recomputed.
    pub fn handle(&mut self, action: InputAction, layout: &SurfaceLayout) -> bool {
        if self.status.has_prompt() && Self::cancels_prompt(&action) {
            self.status.take_prompt();
            self.status.add_message("Clear cancelled");
            return false;
        }

        match action {
            InputAction::None => {}
            InputAction::PointerPressed { x, y, gesture } => {
                let Some((cx, cy)) = layout.cell_at(x, y) else {
                    return false;
                };
                self.last_cell = Some((cx, cy));
                match gesture {
                    PressGesture::Paint => {
                        let redraw = self.editor.press(cx, cy);
                        self.queue(redraw);
                    }
                    PressGesture::Erase => {
                        let redraw = self.editor.press_erase(cx, cy);
                        self.queue(redraw);
                    }
                    PressGesture::Recall => {
                        if let Some(color) = self.editor.recall_color(cx, cy) {
                            self.status.add_message(&format!("Picked up {}", color));
                        }
                    }
                }
            }
            InputAction::PointerMoved { x, y } => match layout.cell_at(x, y) {
                Some(cell) => {
                    if self.last_cell != Some(cell) {
                        self.last_cell = Some(cell);
                        let redraw = self.editor.enter(cell.0, cell.1);
                        self.queue(redraw);
                    }
                }
                None => self.pointer_off_surface(),
            },
            InputAction::PointerReleased => self.editor.release(),
            InputAction::PointerLeft => self.pointer_off_surface(),
            InputAction::ToggleGuide => {
                let redraw = self.editor.toggle_guide();
                self.queue(redraw);
            }
            InputAction::RequestClear => self.status.set_prompt(CLEAR_PROMPT),
            InputAction::Confirm => {
                if self.status.take_prompt().is_some() {
                    let redraw = self.editor.clear();
                    self.queue(redraw);
                    self.status.add_message("Canvas cleared");
                }
            }
            InputAction::Cancel | InputAction::OtherKey => {}
            InputAction::ResizeBy(dx, dy) => return self.resize_by(dx, dy),
            InputAction::SelectPalette(slot) => match self.palette.get(slot) {
                Some(&color) => {
                    self.editor.set_primary_color(color);
                    self.status.add_message(&format!("Color {}", color));
                }
                None => log::debug!("No palette entry in slot {}", slot + 1),
            },
        }
        false
    }

    fn cancels_prompt(action: &InputAction) -> bool {
        matches!(
            action,
            InputAction::PointerPressed { .. }
                | InputAction::ToggleGuide
                | InputAction::RequestClear
                | InputAction::Cancel
                | InputAction::ResizeBy(..)
                | InputAction::SelectPalette(_)
                | InputAction::OtherKey
        )
    }

    fn pointer_off_surface(&mut self) {
        self.last_cell = None;
        if self.editor.mode() != PaintMode::Idle {
            self.editor.leave();
        }
    }

    fn resize_by(&mut self, dx: i32, dy: i32) -> bool {
        let grid = self.editor.grid();
        let limits = self.editor.limits();
        let (width, height) = limits.clamp(grid.width as i64 + dx as i64, grid.height as i64 + dy as i64);

        if width == grid.width && height == grid.height {
            log::warn!(
                "Resize to {}x{} clamped to current size",
                grid.width as i64 + dx as i64,
                grid.height as i64 + dy as i64
            );
            return false;
        }

        match self.editor.resize(width, height) {
            Ok(redraw) => {
                self.last_cell = None;
                self.queue(redraw);
                self.status.add_message(&format!("Grid {}x{}", width, height));
                true
            }
            Err(err) => {
                self.status.add_error(&err.to_string());
                false
            }
        }
    }

    fn queue(&mut self, redraw: Redraw) {
        let pending = std::mem::replace(&mut self.pending, Redraw::None);
        self.pending = pending.merge(redraw);
    }
}
