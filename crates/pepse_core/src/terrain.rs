//! Terrain rasterizer: turns the height field into stacked ground cells.
//!
//! Every column is `cell_size` wide and grid-aligned (`x % cell_size == 0`).
//! A column is filled from the bottom of the window up to the first cell that
//! reaches the surface, plus one buffer row whose top sits on the window's
//! bottom edge so foreground objects never reveal a gap.

use glam::Vec2;
use std::ops::Range;

use crate::config::WorldConfig;
use crate::height_field::HeightField;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundCell {
    pub top_left: Vec2,
    pub column: i64,
}

#[derive(Debug, Clone)]
pub struct Terrain {
    field: HeightField,
    cell_size: f32,
    window_height: f32,
}

impl Terrain {
    pub fn new(field: HeightField, config: &WorldConfig) -> Self {
        Self {
            field,
            cell_size: config.cell_size,
            window_height: config.window_height,
        }
    }

    pub fn field(&self) -> &HeightField {
        &self.field
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn height_at(&self, x: f32) -> f32 {
        self.field.height_at(x)
    }

    /// Grid columns covering `[min_x, max_x)` once `min_x` is snapped down and
    /// `max_x` snapped up to the cell grid.
    pub fn column_span(&self, min_x: f32, max_x: f32) -> Range<i64> {
        debug_assert!(min_x <= max_x, "column_span called with min_x > max_x");
        if min_x >= max_x {
            return 0..0;
        }
        let first = (min_x / self.cell_size).floor() as i64;
        let end = (max_x / self.cell_size).ceil() as i64;
        first..end
    }

    pub fn column_x(&self, column: i64) -> f32 {
        column as f32 * self.cell_size
    }

    /// Number of stacked cells in the column at `x`, buffer row included.
    pub fn column_depth(&self, x: f32) -> usize {
        let depth = self.window_height - self.height_at(x);
        let cells = (depth / self.cell_size).ceil() as i64 + 1;
        cells.max(1) as usize
    }

    /// y of the topmost ground cell in the column containing `x`.
    pub fn surface_y(&self, x: f32) -> f32 {
        let column_x = (x / self.cell_size).floor() * self.cell_size;
        let depth = self.column_depth(column_x);
        self.window_height - (depth - 1) as f32 * self.cell_size
    }

    pub fn generate_ground(&self, min_x: f32, max_x: f32) -> Vec<GroundCell> {
        self.generate_columns(self.column_span(min_x, max_x))
    }

    pub fn generate_columns(&self, columns: Range<i64>) -> Vec<GroundCell> {
        let mut cells = Vec::new();
        for column in columns {
            let x = self.column_x(column);
            for row in 0..self.column_depth(x) {
                cells.push(GroundCell {
                    top_left: Vec2::new(x, self.window_height - row as f32 * self.cell_size),
                    column,
                });
            }
        }
        cells
    }
}
