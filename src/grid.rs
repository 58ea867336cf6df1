use crate::color::Color;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Invalid grid dimensions {width}x{height} (allowed 1x1 to {max_width}x{max_height})")]
    InvalidDimensions {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },
}

/// Largest grid a session may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLimits {
    pub max_width: u32,
    pub max_height: u32,
}

impl GridLimits {
    pub fn check(&self, width: u32, height: u32) -> Result<(), GridError> {
        if width == 0 || height == 0 || width > self.max_width || height > self.max_height {
            return Err(GridError::InvalidDimensions {
                width,
                height,
                max_width: self.max_width,
                max_height: self.max_height,
            });
        }
        Ok(())
    }

    /// Pulls a requested size into the allowed range.
    pub fn clamp(&self, width: i64, height: i64) -> (u32, u32) {
        (
            width.clamp(1, self.max_width.max(1) as i64) as u32,
            height.clamp(1, self.max_height.max(1) as i64) as u32,
        )
    }
}

impl Default for GridLimits {
    fn default() -> Self {
        Self {
            max_width: 50,
            max_height: 20,
        }
    }
}

/// Cell state: `None` is empty, `Some(color)` is filled with that color.
pub type Cell = Option<Color>;

#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    pub width: u32,
    pub height: u32,
    cells: Vec<Vec<Cell>>, // rows of cells, indexed [y][x]
}

impl GridState {
    pub fn new(width: u32, height: u32, limits: &GridLimits) -> Result<Self, GridError> {
        limits.check(width, height)?;
        let cells = vec![vec![None; width as usize]; height as usize];

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    pub fn get_cell(&self, x: u32, y: u32) -> Cell {
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .flatten()
    }

    pub fn is_filled(&self, x: u32, y: u32) -> bool {
        self.get_cell(x, y).is_some()
    }

    /// Writes a cell and reports whether anything changed. Out-of-range
    /// coordinates are ignored.
    pub fn set_cell(&mut self, x: u32, y: u32, value: Cell) -> bool {
        match self.cells.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
            Some(cell) if *cell != value => {
                *cell = value;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.iter_mut().for_each(|cell| *cell = None);
        }
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }
}
