// src/views/mod.rs

pub mod grid;
pub mod scene;

pub use grid::{CellVisual, GridView};
pub use scene::{Node, NodeId, NodeKind, RectShape, Scene, TextShape};
