// src/animation/transition.rs
//
// Timed property transitions for scene nodes.
//
// A Transition tweens a handful of node properties from wherever the
// node is when the transition starts (after its delay) to fixed targets.
// Transitions can chain a follow-up, remove their node when they end,
// and run a completion callback against the scene.

use nannou::prelude::*;
use std::fmt;

use crate::animation::EasingType;
use crate::views::{Node, Scene};

/// Runs once when a transition completes. Receives the scene only, so a
/// callback can schedule more scene work but can never re-enter a widget.
pub type EndCallback = Box<dyn FnOnce(&mut Scene)>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tween {
    Translate(Vec2),
    Opacity(f32),
    Width(f32),
    Height(f32),
}

#[derive(Debug, Clone, Copy)]
enum StartValue {
    Point(Vec2),
    Scalar(f32),
}

pub struct Transition {
    delay: f32,
    duration: f32,
    easing: EasingType,
    tweens: Vec<Tween>,
    start_values: Option<Vec<StartValue>>,
    elapsed: f32,
    remove_on_end: bool,
    on_end: Option<EndCallback>,
    next: Option<Box<Transition>>,
}

/// What is left of a transition once it has run to completion.
pub struct TransitionEnd {
    pub remove: bool,
    pub on_end: Option<EndCallback>,
    pub next: Option<Transition>,
}

impl Transition {
    pub fn new(duration: f32) -> Self {
        Self {
            delay: 0.0,
            duration: duration.max(0.0),
            easing: EasingType::default(),
            tweens: Vec::new(),
            start_values: None,
            elapsed: 0.0,
            remove_on_end: false,
            on_end: None,
            next: None,
        }
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn translate(self, to: Vec2) -> Self {
        self.tween(Tween::Translate(to))
    }

    pub fn opacity(self, to: f32) -> Self {
        self.tween(Tween::Opacity(to))
    }

    pub fn width(self, to: f32) -> Self {
        self.tween(Tween::Width(to))
    }

    pub fn height(self, to: f32) -> Self {
        self.tween(Tween::Height(to))
    }

    pub fn tween(mut self, tween: Tween) -> Self {
        self.tweens.push(tween);
        self
    }

    /// Remove the node from the scene when this transition ends.
    pub fn remove(mut self) -> Self {
        self.remove_on_end = true;
        self
    }

    pub fn on_end<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&mut Scene) + 'static,
    {
        self.on_end = Some(Box::new(callback));
        self
    }

    /// Queue `next` to start when the last transition of this chain ends.
    /// Its delay is measured from that moment.
    pub fn then(mut self, next: Transition) -> Self {
        match self.next.take() {
            Some(existing) => self.next = Some(Box::new(existing.then(next))),
            None => self.next = Some(Box::new(next)),
        }
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_started(&self) -> bool {
        self.start_values.is_some()
    }

    /// Advance by `dt` seconds and write the tweened values into `node`.
    /// Once the transition completes, returns the part of `dt` it did not
    /// use, so a follow-up can pick up from the exact end time.
    pub fn advance(&mut self, node: &mut Node, dt: f32) -> Option<f32> {
        self.elapsed += dt;
        if self.elapsed < self.delay {
            return None;
        }

        let start_values = match &self.start_values {
            Some(values) => values.clone(),
            None => {
                let values: Vec<StartValue> =
                    self.tweens.iter().map(|tween| capture(node, tween)).collect();
                self.start_values = Some(values.clone());
                values
            }
        };

        let progress = if self.duration <= 0.0 {
            1.0
        } else {
            ((self.elapsed - self.delay) / self.duration).clamp(0.0, 1.0)
        };
        let complete = progress >= 1.0;
        let eased = self.easing.apply(progress);

        for (tween, start) in self.tweens.iter().zip(start_values) {
            apply(node, tween, start, eased, complete);
        }

        complete.then(|| (self.elapsed - self.delay - self.duration).max(0.0))
    }

    pub fn finish(self) -> TransitionEnd {
        TransitionEnd {
            remove: self.remove_on_end,
            on_end: self.on_end,
            next: self.next.map(|next| *next),
        }
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("delay", &self.delay)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("tweens", &self.tweens)
            .field("elapsed", &self.elapsed)
            .field("remove_on_end", &self.remove_on_end)
            .field("has_on_end", &self.on_end.is_some())
            .field("next", &self.next)
            .finish()
    }
}

fn capture(node: &Node, tween: &Tween) -> StartValue {
    match tween {
        Tween::Translate(_) => StartValue::Point(node.translation),
        Tween::Opacity(_) => StartValue::Scalar(node.opacity),
        Tween::Width(_) => StartValue::Scalar(node.rect_shape().map_or(0.0, |rect| rect.width)),
        Tween::Height(_) => StartValue::Scalar(node.rect_shape().map_or(0.0, |rect| rect.height)),
    }
}

// The last frame writes the exact target so chained layouts don't drift.
fn apply(node: &mut Node, tween: &Tween, start: StartValue, eased: f32, complete: bool) {
    match (tween, start) {
        (Tween::Translate(to), StartValue::Point(from)) => {
            node.translation = if complete { *to } else { from.lerp(*to, eased) };
        }
        (Tween::Opacity(to), StartValue::Scalar(from)) => {
            node.opacity = lerp_scalar(from, *to, eased, complete);
        }
        (Tween::Width(to), StartValue::Scalar(from)) => {
            if let Some(rect) = node.rect_shape_mut() {
                rect.width = lerp_scalar(from, *to, eased, complete);
            }
        }
        (Tween::Height(to), StartValue::Scalar(from)) => {
            if let Some(rect) = node.rect_shape_mut() {
                rect.height = lerp_scalar(from, *to, eased, complete);
            }
        }
        _ => {}
    }
}

fn lerp_scalar(from: f32, to: f32, eased: f32, complete: bool) -> f32 {
    if complete {
        to
    } else {
        from + (to - from) * eased
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{Node, RectShape};

    fn test_rect() -> Node {
        Node::rect(RectShape {
            width: 20.0,
            height: 20.0,
            corner_radius: 0.0,
            fill: rgba(1.0, 0.0, 0.0, 1.0),
            stroke: None,
        })
    }

    #[test]
    fn test_translate_progress() {
        let mut node = Node::group();
        let mut transition = Transition::new(1.0)
            .easing(EasingType::Linear)
            .translate(vec2(10.0, 20.0));

        assert_eq!(transition.advance(&mut node, 0.5), None);
        assert!((node.translation.x - 5.0).abs() < 1e-5);
        assert!((node.translation.y - 10.0).abs() < 1e-5);

        assert_eq!(transition.advance(&mut node, 0.5), Some(0.0));
        assert_eq!(node.translation, vec2(10.0, 20.0));
    }

    #[test]
    fn test_delay_holds_start_capture() {
        let mut node = Node::group();
        let mut transition = Transition::new(1.0)
            .delay(2.0)
            .easing(EasingType::Linear)
            .opacity(0.0);

        assert_eq!(transition.advance(&mut node, 1.0), None);
        assert!(!transition.is_started());
        assert_eq!(node.opacity, 1.0);

        // the node changes before the transition starts; the tween picks it up
        node.opacity = 0.5;
        assert_eq!(transition.advance(&mut node, 1.5), None);
        assert!(transition.is_started());
        assert!((node.opacity - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_size_tweens_only_touch_rects() {
        let mut rect = test_rect();
        let mut transition = Transition::new(0.0).height(0.0);
        assert_eq!(transition.advance(&mut rect, 0.0), Some(0.0));
        let shape = rect.rect_shape().unwrap();
        assert_eq!(shape.height, 0.0);
        assert_eq!(shape.width, 20.0);

        let mut group = Node::group();
        let mut transition = Transition::new(1.0).width(0.0);
        assert!(transition.advance(&mut group, 1.0).is_some());
        assert!(group.rect_shape().is_none());
    }

    #[test]
    fn test_reports_unused_time() {
        let mut node = Node::group();
        let mut transition = Transition::new(1.0).delay(0.5).opacity(0.0);

        assert_eq!(transition.advance(&mut node, 1.0), None);
        let leftover = transition.advance(&mut node, 0.75).unwrap();
        assert!((leftover - 0.25).abs() < 1e-5);
        assert_eq!(node.opacity, 0.0);
    }

    #[test]
    fn test_then_appends_to_end_of_chain() {
        let chain = Transition::new(1.0)
            .then(Transition::new(2.0))
            .then(Transition::new(3.0).remove());

        let end = chain.finish();
        assert!(!end.remove);
        let second = end.next.unwrap();
        assert_eq!(second.duration(), 2.0);
        let third = second.finish().next.unwrap();
        assert_eq!(third.duration(), 3.0);
        assert!(third.finish().remove);
    }
}
