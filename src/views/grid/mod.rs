// src/views/grid/mod.rs

pub mod color;
pub mod grid_view;
pub mod layout;

pub use color::{contrasting_label_color, to_display_color, DisplayColor, LabelColor};
pub use grid_view::{CellVisual, GridView};
pub use layout::Bounds;
