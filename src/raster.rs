//! Drawing primitives over an RGBA frame buffer, plus the code that turns a
//! [`Redraw`] into pixels. Nothing here needs a window.

use crate::color::Color;
use crate::editor::{EditorState, Redraw};
use crate::layout::{Rect, SurfaceLayout};

pub const WINDOW_BACKGROUND: [u8; 4] = [32, 32, 32, 255];
pub const STATUS_HEIGHT: u32 = 28;
pub const STATUS_BACKGROUND: [u8; 4] = [16, 16, 16, 255];
/// Strip color while a confirmation prompt waits for an answer.
pub const PROMPT_BACKGROUND: [u8; 4] = [150, 90, 0, 255];
pub const SWATCH_SIZE: u32 = 18;

/// Colors the renderer uses for everything that is not a painted cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub guide: Color,
}

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self { frame, width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.frame[..]
    }

    pub fn fill(&mut self, color: [u8; 4]) {
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = ((y * self.width + x) * 4) as usize;
        if let Some(pixel) = self.frame.get_mut(index..index + 4) {
            pixel.copy_from_slice(&color);
        }
    }

    /// Fills a rectangle, clipped to the frame.
    pub fn fill_rect(&mut self, rect: Rect, color: [u8; 4]) {
        let right = (rect.x + rect.width).min(self.width);
        let bottom = (rect.y + rect.height).min(self.height);
        for py in rect.y..bottom {
            for px in rect.x..right {
                self.put_pixel(px, py, color);
            }
        }
    }

    pub fn horizontal_line(&mut self, x: u32, y: u32, length: u32, color: [u8; 4]) {
        self.fill_rect(Rect { x, y, width: length, height: 1 }, color);
    }

    pub fn vertical_line(&mut self, x: u32, y: u32, length: u32, color: [u8; 4]) {
        self.fill_rect(Rect { x, y, width: 1, height: length }, color);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = ((y * self.width + x) * 4) as usize;
        let bytes = self.frame.get(index..index + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

/// Draws one cell: its fill, then its top and left guide edges.
pub fn draw_cell(canvas: &mut Canvas<'_>, editor: &EditorState, layout: &SurfaceLayout, theme: &Theme, x: u32, y: u32) {
    let rect = layout.cell_rect(x, y);
    let color = editor.grid().get_cell(x, y).unwrap_or(theme.background);
    canvas.fill_rect(rect, color.to_rgba());

    if editor.guide_visible() {
        let guide = theme.guide.to_rgba();
        canvas.horizontal_line(rect.x, rect.y, rect.width, guide);
        canvas.vertical_line(rect.x, rect.y, rect.height, guide);
    }
}

/// Redraws the whole surface: window background, every cell, guide overlay.
pub fn draw_surface(canvas: &mut Canvas<'_>, editor: &EditorState, layout: &SurfaceLayout, theme: &Theme) {
    canvas.fill(WINDOW_BACKGROUND);

    for y in 0..layout.grid_height {
        for x in 0..layout.grid_width {
            draw_cell(canvas, editor, layout, theme, x, y);
        }
    }

    if editor.guide_visible() {
        // closing right and bottom edges of the overlay
        let surface = layout.surface_rect();
        let guide = theme.guide.to_rgba();
        canvas.vertical_line(surface.x + surface.width, surface.y, surface.height + 1, guide);
        canvas.horizontal_line(surface.x, surface.y + surface.height, surface.width + 1, guide);
    }
}

/// Applies a redraw description. Returns whether any pixels were touched.
pub fn apply_redraw(
    canvas: &mut Canvas<'_>,
    editor: &EditorState,
    layout: &SurfaceLayout,
    theme: &Theme,
    redraw: &Redraw,
) -> bool {
    match redraw {
        Redraw::None => false,
        Redraw::Cells(cells) => {
            for &(x, y) in cells {
                if x < layout.grid_width && y < layout.grid_height {
                    draw_cell(canvas, editor, layout, theme, x, y);
                }
            }
            !cells.is_empty()
        }
        Redraw::Full => {
            draw_surface(canvas, editor, layout, theme);
            true
        }
    }
}

/// Draws the status strip along the bottom of the frame with a swatch of the
/// primary color. Returns the strip's top row.
pub fn draw_status_strip(canvas: &mut Canvas<'_>, primary: Color, prompt_pending: bool) -> u32 {
    let width = canvas.width();
    let top = canvas.height().saturating_sub(STATUS_HEIGHT);
    let background = if prompt_pending { PROMPT_BACKGROUND } else { STATUS_BACKGROUND };
    canvas.fill_rect(
        Rect {
            x: 0,
            y: top,
            width,
            height: STATUS_HEIGHT,
        },
        background,
    );

    canvas.fill_rect(
        Rect {
            x: 8,
            y: top + (STATUS_HEIGHT - SWATCH_SIZE) / 2,
            width: SWATCH_SIZE,
            height: SWATCH_SIZE,
        },
        primary.to_rgba(),
    );
    top
}
