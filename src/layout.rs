//! Pointer-to-cell arithmetic and placement of the grid surface in the window.

use serde::{Deserialize, Serialize};

pub const GRID_PADDING: u32 = 10;

/// Pixel size of one cell. Width and height may differ (stitch fabrics are
/// rarely square).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl CellSize {
    pub fn square(side: f64) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::square(24.0)
    }
}

/// Maps a position relative to the surface origin to a cell coordinate.
///
/// The result is not bounds-checked: a position on or past the far edge
/// yields an index one past the last cell, and positions left of or above the
/// origin yield negative indices.
pub fn map_to_cell(rel_x: f64, rel_y: f64, cell: CellSize) -> (i64, i64) {
    (
        (rel_x / cell.width).floor() as i64,
        (rel_y / cell.height).floor() as i64,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Where the paintable surface sits inside the window for a given grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    pub origin_x: u32,
    pub origin_y: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub grid_width: u32,
    pub grid_height: u32,
}

impl SurfaceLayout {
    /// Fits the grid into the window above a `reserved_bottom` strip, shrinking
    /// the preferred cell size uniformly when it does not fit, and centers it.
    pub fn fit(
        window_width: u32,
        window_height: u32,
        grid_width: u32,
        grid_height: u32,
        preferred: CellSize,
        reserved_bottom: u32,
    ) -> Self {
        let available_width = window_width.saturating_sub(GRID_PADDING * 2);
        let available_height =
            window_height.saturating_sub(reserved_bottom + GRID_PADDING * 2);

        let grid_width = grid_width.max(1);
        let grid_height = grid_height.max(1);

        let wanted_width = preferred.width * grid_width as f64;
        let wanted_height = preferred.height * grid_height as f64;
        let scale = (available_width as f64 / wanted_width)
            .min(available_height as f64 / wanted_height)
            .min(1.0);

        let cell_width = ((preferred.width * scale).floor() as u32).max(1);
        let cell_height = ((preferred.height * scale).floor() as u32).max(1);

        let surface_width = cell_width * grid_width;
        let surface_height = cell_height * grid_height;

        Self {
            origin_x: GRID_PADDING + available_width.saturating_sub(surface_width) / 2,
            origin_y: GRID_PADDING + available_height.saturating_sub(surface_height) / 2,
            cell_width,
            cell_height,
            grid_width,
            grid_height,
        }
    }

    pub fn cell_size(&self) -> CellSize {
        CellSize {
            width: self.cell_width as f64,
            height: self.cell_height as f64,
        }
    }

    pub fn surface_rect(&self) -> Rect {
        Rect {
            x: self.origin_x,
            y: self.origin_y,
            width: self.cell_width * self.grid_width,
            height: self.cell_height * self.grid_height,
        }
    }

    pub fn cell_rect(&self, x: u32, y: u32) -> Rect {
        Rect {
            x: self.origin_x + x * self.cell_width,
            y: self.origin_y + y * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    /// Cell under a window position, or `None` when the position is off the
    /// surface.
    pub fn cell_at(&self, window_x: f64, window_y: f64) -> Option<(u32, u32)> {
        let rel_x = window_x - self.origin_x as f64;
        let rel_y = window_y - self.origin_y as f64;
        let (x, y) = map_to_cell(rel_x, rel_y, self.cell_size());

        if x < 0 || y < 0 || x >= self.grid_width as i64 || y >= self.grid_height as i64 {
            return None;
        }
        Some((x as u32, y as u32))
    }
}
