// src/models/error.rs
//
// Errors raised by the checked grid operations and data validation.
// The plain operations never fail: bad input degenerates to a no-op.

use crate::models::Axis;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("{axis} index {index} is out of range (count {count})")]
    InvalidIndex {
        axis: Axis,
        index: usize,
        count: usize,
    },

    #[error("duplicate cell id '{0}'")]
    DuplicateId(String),

    #[error("cell '{id}' at ({row}, {column}) lies outside a {rows}x{columns} grid")]
    CellOutOfBounds {
        id: String,
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("unknown axis '{0}', expected 'row' or 'column'")]
    UnknownAxis(String),
}

impl GridError {
    pub fn invalid_index(axis: Axis, index: usize, count: usize) -> Self {
        Self::InvalidIndex { axis, index, count }
    }
}
