pub mod easing;
pub mod transition;

pub use easing::EasingType;
pub use transition::{EndCallback, Transition, TransitionEnd, Tween};
