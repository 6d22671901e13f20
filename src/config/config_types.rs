// src/config/config_types.rs
//
// Config types for the app

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct PathConfig {
    pub data_file: String,
}

#[derive(Debug, Deserialize)]
pub struct OscConfig {
    pub rx_port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DemoConfig {
    pub rows: usize,
    pub columns: usize,
}

/************************* Grid Style ***************************/

/// Size and placement of a GridView. Missing keys fall back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridStyle {
    pub cell_size: f32,
    pub corner_radius: f32,
    pub gap_size: f32,
    pub origin_x: f32,
    pub origin_y: f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            cell_size: 20.0,
            corner_radius: 0.0,
            gap_size: 4.0,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

/************************* Animation Timings ********************/

/// Durations of the GridView animations, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationTimings {
    pub transpose: f32,
    pub drop: f32,
    pub ghost_move: f32,
    pub ghost_hold: f32,
    pub ghost_fade: f32,
    pub highlight_fade: f32,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            transpose: 3.0,
            drop: 1.0,
            ghost_move: 1.0,
            ghost_hold: 3.0,
            ghost_fade: 1.0,
            highlight_fade: 0.5,
        }
    }
}
