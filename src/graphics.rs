use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

use crate::editor::{EditorState, Redraw};
use crate::font::FontRenderer;
use crate::layout::{CellSize, SurfaceLayout};
use crate::raster::{self, Canvas, Theme, STATUS_HEIGHT, SWATCH_SIZE};

const STATUS_TEXT: [u8; 3] = [200, 200, 200];

pub struct GraphicsRenderer {
    pixels: Pixels,
    width: u32,
    height: u32,
    cell_size: CellSize,
    layout: SurfaceLayout,
    theme: Theme,
    font: Option<FontRenderer>,
    status_text: String,
}

impl GraphicsRenderer {
    pub fn new(
        window: &Window,
        editor: &EditorState,
        cell_size: CellSize,
        theme: Theme,
        font: Option<FontRenderer>,
    ) -> Result<Self, pixels::Error> {
        let window_size = window.inner_size();
        let width = window_size.width.max(1);
        let height = window_size.height.max(1);
        let surface_texture = SurfaceTexture::new(width, height, window);
        let pixels = Pixels::new(width, height, surface_texture)?;

        let layout = Self::compute_layout(width, height, editor, cell_size);

        Ok(Self {
            pixels,
            width,
            height,
            cell_size,
            layout,
            theme,
            font,
            status_text: String::new(),
        })
    }

    fn compute_layout(width: u32, height: u32, editor: &EditorState, cell_size: CellSize) -> SurfaceLayout {
        SurfaceLayout::fit(
            width,
            height,
            editor.grid().width,
            editor.grid().height,
            cell_size,
            STATUS_HEIGHT,
        )
    }

    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    /// Window size changed: resize surface and buffer to match. The caller
    /// must follow up with a full redraw.
    pub fn resize(&mut self, width: u32, height: u32, editor: &EditorState) {
        if width == 0 || height == 0 {
            // minimized
            return;
        }
        self.width = width;
        self.height = height;

        if let Err(err) = self.pixels.resize_surface(width, height) {
            log::error!("Failed to resize surface: {}", err);
        }
        if let Err(err) = self.pixels.resize_buffer(width, height) {
            log::error!("Failed to resize buffer: {}", err);
        }
        self.relayout(editor);
    }

    /// Grid dimensions changed: recompute where the surface sits.
    pub fn relayout(&mut self, editor: &EditorState) {
        self.layout = Self::compute_layout(self.width, self.height, editor, self.cell_size);
        log::debug!(
            "Surface at ({}, {}) with {}x{} px cells",
            self.layout.origin_x,
            self.layout.origin_y,
            self.layout.cell_width,
            self.layout.cell_height
        );
    }

    /// Draws what `redraw` names plus the status strip when its text changed.
    /// A pending prompt tints the strip so it shows even without a font.
    /// Returns whether the frame needs presenting.
    pub fn render(&mut self, editor: &EditorState, redraw: &Redraw, status_text: &str, prompt_pending: bool) -> bool {
        let frame = self.pixels.frame_mut();
        let mut canvas = Canvas::new(frame, self.width, self.height);

        let mut dirty = raster::apply_redraw(&mut canvas, editor, &self.layout, &self.theme, redraw);
        if matches!(redraw, Redraw::Cells(_)) {
            log::trace!("Partial redraw: {:?}", redraw);
        }

        let full = matches!(redraw, Redraw::Full);
        if full || status_text != self.status_text {
            self.status_text = status_text.to_string();
            Self::render_status(&mut canvas, self.font.as_ref(), editor, &self.status_text, prompt_pending);
            dirty = true;
        }
        dirty
    }

    fn render_status(
        canvas: &mut Canvas<'_>,
        font: Option<&FontRenderer>,
        editor: &EditorState,
        text: &str,
        prompt_pending: bool,
    ) {
        let top = raster::draw_status_strip(canvas, editor.primary_color(), prompt_pending);

        if let Some(font) = font {
            let text_top = top + STATUS_HEIGHT.saturating_sub(font.line_height()) / 2;
            let text_left = 8 + SWATCH_SIZE + 8;
            let frame_width = canvas.width();
            font.draw_text(canvas.frame_mut(), frame_width, text, text_left, text_top, STATUS_TEXT);
        }
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}
