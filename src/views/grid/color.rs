// src/views/grid/color.rs
//
// Color derivation for matrix cells.

use nannou::prelude::*;
use std::fmt;

use crate::models::CellColor;

/// Fill color of a highlight overlay (pink).
pub const HIGHLIGHT_COLOR: (u8, u8, u8) = (255, 192, 203);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl DisplayColor {
    pub fn to_rgba(self) -> Rgba {
        rgba(
            self.red as f32 / 255.0,
            self.green as f32 / 255.0,
            self.blue as f32 / 255.0,
            1.0,
        )
    }
}

// Same notation as a CSS color.
impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelColor {
    Black,
    White,
}

impl LabelColor {
    pub fn to_rgba(self) -> Rgba {
        match self {
            LabelColor::Black => rgba(0.0, 0.0, 0.0, 1.0),
            LabelColor::White => rgba(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Fill color of a cell. The blue slot deliberately repeats the wrapped
/// red channel; existing visuals depend on it.
pub fn to_display_color(color: &CellColor) -> DisplayColor {
    let (red, green, _) = color.wrapped();
    DisplayColor {
        red,
        green,
        blue: red,
    }
}

/// Perceived brightness in thousandths: 299*r + 587*g + 114*b over the
/// wrapped channels. Integer math keeps the 128 boundary exact.
fn brightness_millis(color: &CellColor) -> u32 {
    let (r, g, b) = color.wrapped();
    299 * r as u32 + 587 * g as u32 + 114 * b as u32
}

pub fn perceived_brightness(color: &CellColor) -> f64 {
    brightness_millis(color) as f64 / 1000.0
}

/// Border and label color that stays readable on the cell's fill.
pub fn contrasting_label_color(color: &CellColor) -> LabelColor {
    if brightness_millis(color) > 128_000 {
        LabelColor::Black
    } else {
        LabelColor::White
    }
}

pub fn highlight_color() -> Rgba {
    let (red, green, blue) = HIGHLIGHT_COLOR;
    DisplayColor { red, green, blue }.to_rgba()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_display_color_wraps_and_mirrors_red() {
        let a = to_display_color(&CellColor::new(300, 10, 50));
        let b = to_display_color(&CellColor::new(44, 10, 255));
        assert_eq!(a.red, b.red);
        assert_eq!(a.blue, b.blue);
        assert_eq!(a, DisplayColor { red: 44, green: 10, blue: 44 });
        assert_eq!(a.to_string(), "rgb(44, 10, 44)");
    }

    #[test]
    fn test_brightness_boundary_is_white() {
        let gray = CellColor::new(128, 128, 128);
        assert_eq!(perceived_brightness(&gray), 128.0);
        assert_eq!(contrasting_label_color(&gray), LabelColor::White);

        assert_eq!(
            contrasting_label_color(&CellColor::new(129, 128, 128)),
            LabelColor::Black
        );
        assert_eq!(
            contrasting_label_color(&CellColor::new(127, 128, 128)),
            LabelColor::White
        );
    }

    #[test]
    fn test_extremes() {
        assert_eq!(
            contrasting_label_color(&CellColor::new(255, 255, 255)),
            LabelColor::Black
        );
        assert_eq!(contrasting_label_color(&CellColor::new(0, 0, 0)), LabelColor::White);
        // 256 wraps to black
        assert_eq!(
            contrasting_label_color(&CellColor::new(256, 256, 256)),
            LabelColor::White
        );
    }

    #[test]
    fn test_label_rgba() {
        let white = LabelColor::White.to_rgba();
        assert_eq!((white.red, white.green, white.blue, white.alpha), (1.0, 1.0, 1.0, 1.0));
        let pink = highlight_color();
        assert_eq!(pink.red, 1.0);
        assert!(pink.green < pink.blue);
    }

    proptest! {
        #[test]
        fn label_color_depends_only_on_wrapped_channels(
            r in -1000i64..1000,
            g in -1000i64..1000,
            b in -1000i64..1000,
            dr in -3i64..3,
            dg in -3i64..3,
            db in -3i64..3,
        ) {
            let base = CellColor::new(r, g, b);
            let shifted = CellColor::new(r + 256 * dr, g + 256 * dg, b + 256 * db);
            prop_assert_eq!(contrasting_label_color(&base), contrasting_label_color(&shifted));
            prop_assert_eq!(to_display_color(&base), to_display_color(&shifted));
        }

        #[test]
        fn display_blue_mirrors_red(r in any::<i64>(), g in any::<i64>(), b in any::<i64>()) {
            let color = to_display_color(&CellColor::new(r, g, b));
            prop_assert_eq!(color.blue, color.red);
        }
    }
}
