// src/animation/easing.rs
//
// Easing curves for scene transitions. Each maps linear progress
// in [0, 1] to eased progress in [0, 1].

use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    SinInOut,
    #[default]
    CubicInOut,
}

impl EasingType {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseIn => ease_in(t),
            EasingType::EaseOut => ease_out(t),
            EasingType::EaseInOut => ease_in_out(t),
            EasingType::SinInOut => sin_in_out(t),
            EasingType::CubicInOut => cubic_in_out(t),
        }
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

fn ease_in(t: f32) -> f32 {
    t * t
}

fn ease_out(t: f32) -> f32 {
    t * (2.0 - t)
}

fn sin_in_out(t: f32) -> f32 {
    (1.0 - (PI * t).cos()) / 2.0
}

fn cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 6] = [
        EasingType::Linear,
        EasingType::EaseIn,
        EasingType::EaseOut,
        EasingType::EaseInOut,
        EasingType::SinInOut,
        EasingType::CubicInOut,
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_symmetric_curves_pass_midpoint() {
        for easing in [
            EasingType::EaseInOut,
            EasingType::SinInOut,
            EasingType::CubicInOut,
        ] {
            assert!((easing.apply(0.5) - 0.5).abs() < 1e-6, "{:?}", easing);
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(EasingType::Linear.apply(-2.0), 0.0);
        assert_eq!(EasingType::Linear.apply(3.0), 1.0);
    }

    #[test]
    fn test_cubic_is_slower_at_start() {
        assert!(EasingType::CubicInOut.apply(0.1) < EasingType::EaseInOut.apply(0.1));
        assert!(EasingType::CubicInOut.apply(0.25) < 0.25);
    }
}
