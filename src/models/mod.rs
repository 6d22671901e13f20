pub mod cell;
pub mod data_model;
pub mod error;

pub use cell::{Axis, Cell, CellColor, Selection};
pub use data_model::MatrixData;
pub use error::GridError;
