// src/views/grid/layout.rs
//
// Pure layout math for a GridView: where cells, labels and highlight
// overlays sit in the grid's local space.

use nannou::prelude::*;

use crate::config::GridStyle;
use crate::models::{Axis, Cell, Selection};

/// Fixed inset between the grid origin and the first cell.
pub const PADDING: f32 = 10.0;
/// Labels are drawn only for cells larger than this.
pub const LABEL_MIN_CELL_SIZE: f32 = 20.0;
pub const MAX_FONT_SIZE: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl GridStyle {
    /// Distance between the origins of adjacent cells.
    pub fn stride(&self) -> f32 {
        self.cell_size + self.gap_size
    }

    /// Where the grid's local space starts in the parent space.
    pub fn grid_origin(&self) -> Vec2 {
        vec2(self.origin_x + PADDING, self.origin_y + PADDING)
    }

    pub fn position(&self, row: usize, column: usize) -> Vec2 {
        let stride = self.stride();
        vec2(column as f32 * stride, row as f32 * stride)
    }

    pub fn cell_origin(&self, cell: &Cell) -> Vec2 {
        self.position(cell.row, cell.column)
    }

    /// Offset of a whole row or column from the grid origin.
    pub fn line_offset(&self, selection: Selection) -> Vec2 {
        match selection.axis {
            Axis::Row => self.position(selection.index, 0),
            Axis::Column => self.position(0, selection.index),
        }
    }

    pub fn shows_labels(&self) -> bool {
        self.cell_size > LABEL_MIN_CELL_SIZE
    }

    pub fn label_font_size(&self) -> u32 {
        (self.cell_size / 2.0).min(MAX_FONT_SIZE).ceil() as u32
    }

    pub fn label_center(&self) -> Vec2 {
        vec2(self.cell_size / 2.0, self.cell_size / 2.0)
    }

    /// Area of a highlight overlay: the row or column span grown by
    /// one gap on every side.
    pub fn highlight_bounds(&self, selection: Selection, rows: usize, columns: usize) -> Bounds {
        let stride = self.stride();
        let gap = self.gap_size;
        let offset = selection.index as f32 * stride - gap;
        match selection.axis {
            Axis::Row => Bounds {
                x: -gap,
                y: offset,
                width: columns as f32 * stride + gap,
                height: stride + gap,
            },
            Axis::Column => Bounds {
                x: offset,
                y: -gap,
                width: stride + gap,
                height: rows as f32 * stride + gap,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(cell_size: f32) -> GridStyle {
        GridStyle {
            cell_size,
            ..GridStyle::default()
        }
    }

    #[test]
    fn test_defaults_and_stride() {
        let style = GridStyle::default();
        assert_eq!(style.cell_size, 20.0);
        assert_eq!(style.gap_size, 4.0);
        assert_eq!(style.stride(), 24.0);
    }

    #[test]
    fn test_cell_origin() {
        let style = GridStyle::default();
        let cell = Cell::new("a", 2, 3);
        assert_eq!(style.cell_origin(&cell), vec2(72.0, 48.0));
    }

    #[test]
    fn test_grid_origin_includes_padding() {
        let style = GridStyle {
            origin_x: 5.0,
            origin_y: 7.0,
            ..GridStyle::default()
        };
        assert_eq!(style.grid_origin(), vec2(15.0, 17.0));
    }

    #[test]
    fn test_label_threshold() {
        assert!(!style(20.0).shows_labels());
        assert!(style(21.0).shows_labels());
    }

    #[test]
    fn test_label_font_size() {
        assert_eq!(style(21.0).label_font_size(), 11);
        assert_eq!(style(24.0).label_font_size(), 12);
        assert_eq!(style(31.0).label_font_size(), 16);
        assert_eq!(style(100.0).label_font_size(), 16);
    }

    #[test]
    fn test_line_offset() {
        let style = GridStyle::default();
        assert_eq!(style.line_offset(Selection::row(2)), vec2(0.0, 48.0));
        assert_eq!(style.line_offset(Selection::column(1)), vec2(24.0, 0.0));
    }

    #[test]
    fn test_highlight_bounds() {
        let style = GridStyle::default();

        let row = style.highlight_bounds(Selection::row(1), 3, 5);
        assert_eq!(
            row,
            Bounds {
                x: -4.0,
                y: 20.0,
                width: 124.0,
                height: 28.0,
            }
        );

        let column = style.highlight_bounds(Selection::column(2), 3, 5);
        assert_eq!(
            column,
            Bounds {
                x: 44.0,
                y: -4.0,
                width: 28.0,
                height: 76.0,
            }
        );
    }
}
