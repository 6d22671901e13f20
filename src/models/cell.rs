// src/models/cell.rs
//
// The Cell record and the small value types used to address
// rows and columns of a matrix.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::models::GridError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

impl FromStr for Axis {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "row" => Ok(Axis::Row),
            "column" | "col" => Ok(Axis::Column),
            _ => Err(GridError::UnknownAxis(s.to_string())),
        }
    }
}

/// One row or one column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub axis: Axis,
}

impl Selection {
    pub fn new(index: usize, axis: Axis) -> Self {
        Self { index, axis }
    }

    pub fn row(index: usize) -> Self {
        Self::new(index, Axis::Row)
    }

    pub fn column(index: usize) -> Self {
        Self::new(index, Axis::Column)
    }
}

/// Raw cell color. Channels are taken modulo 256 before use, so values
/// outside 0..=255 wrap around instead of clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct CellColor {
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

impl CellColor {
    pub fn new(r: i64, g: i64, b: i64) -> Self {
        Self { r, g, b }
    }

    pub fn wrapped(&self) -> (u8, u8, u8) {
        (wrap_channel(self.r), wrap_channel(self.g), wrap_channel(self.b))
    }
}

fn wrap_channel(channel: i64) -> u8 {
    channel.rem_euclid(256) as u8
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cell {
    pub id: String,
    pub row: usize,
    pub column: usize,
    pub color: CellColor,
    pub value: f64,
    pub label: String,
}

impl Cell {
    pub fn new(id: impl Into<String>, row: usize, column: usize) -> Self {
        Self {
            id: id.into(),
            row,
            column,
            color: CellColor::default(),
            value: 0.0,
            label: String::new(),
        }
    }

    pub fn with_color(mut self, color: CellColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn coordinate(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.row,
            Axis::Column => self.column,
        }
    }

    pub fn coordinate_mut(&mut self, axis: Axis) -> &mut usize {
        match axis {
            Axis::Row => &mut self.row,
            Axis::Column => &mut self.column,
        }
    }

    pub fn transpose(&mut self) {
        std::mem::swap(&mut self.row, &mut self.column);
    }
}
