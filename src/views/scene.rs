// src/views/scene.rs
//
// A small retained scene graph.
//
// Nodes live in an arena keyed by NodeId and form a tree under a root
// group. Positions are in canvas space: origin at the top-left, y down.
// Every node may carry one running Transition; `update` advances them
// and `draw` renders the tree into a nannou Draw.

use nannou::prelude::*;
use std::collections::HashMap;
use std::f32::consts::PI;

use crate::animation::{EndCallback, Transition};

const CORNER_RESOLUTION: usize = 8;
const STROKE_WEIGHT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub fill: Rgba,
    pub stroke: Option<Rgba>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub text: String,
    pub font_size: u32,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    // translation is the top-left corner
    Rect(RectShape),
    // translation is the text center
    Text(TextShape),
}

#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub translation: Vec2,
    pub opacity: f32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    transition: Option<Transition>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            translation: Vec2::ZERO,
            opacity: 1.0,
            parent: None,
            children: Vec::new(),
            transition: None,
        }
    }

    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }

    pub fn rect(shape: RectShape) -> Self {
        Self::new(NodeKind::Rect(shape))
    }

    pub fn text(shape: TextShape) -> Self {
        Self::new(NodeKind::Text(shape))
    }

    pub fn at(mut self, translation: Vec2) -> Self {
        self.translation = translation;
        self
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group)
    }

    pub fn rect_shape(&self) -> Option<&RectShape> {
        match &self.kind {
            NodeKind::Rect(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn rect_shape_mut(&mut self) -> Option<&mut RectShape> {
        match &mut self.kind {
            NodeKind::Rect(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn text_shape(&self) -> Option<&TextShape> {
        match &self.kind {
            NodeKind::Text(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }
}

pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    next_id: u64,
    // unused frame time while a completion callback runs
    carry: Option<f32>,
    carried: Vec<(NodeId, f32)>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::group());
        Self {
            nodes,
            root,
            next_id: 1,
            carry: None,
            carried: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root is left.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(&id) {
            Some(node) => node.children(),
            None => &[],
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Add `node` as the last (topmost) child of `parent`.
    pub fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        self.insert_child(parent, node, None)
    }

    /// Add `node` under `parent`, drawn beneath the parent's first group child.
    pub fn insert_before_first_group(&mut self, parent: NodeId, node: Node) -> NodeId {
        let position = self.nodes.get(&parent).and_then(|parent_node| {
            parent_node
                .children
                .iter()
                .position(|child| self.nodes.get(child).is_some_and(Node::is_group))
        });
        self.insert_child(parent, node, position)
    }

    fn insert_child(&mut self, parent: NodeId, mut node: Node, position: Option<usize>) -> NodeId {
        let parent = if self.nodes.contains_key(&parent) {
            parent
        } else {
            tracing::warn!("parent {:?} is not in the scene, attaching to root", parent);
            self.root
        };

        let id = NodeId(self.next_id);
        self.next_id += 1;
        node.parent = Some(parent);
        self.nodes.insert(id, node);

        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            match position {
                Some(index) if index <= parent_node.children.len() => {
                    parent_node.children.insert(index, id)
                }
                _ => parent_node.children.push(id),
            }
        }
        id
    }

    /// Remove a node and its whole subtree. Pending transitions in the
    /// subtree are dropped without running their callbacks.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root {
            return false;
        }
        let Some(node) = self.nodes.remove(&id) else {
            return false;
        };

        if let Some(parent) = node.parent.and_then(|parent| self.nodes.get_mut(&parent)) {
            parent.children.retain(|child| *child != id);
        }

        let mut stack = node.children;
        while let Some(child) = stack.pop() {
            if let Some(child_node) = self.nodes.remove(&child) {
                stack.extend(child_node.children);
            }
        }
        true
    }

    /// Start `transition` on a node, replacing any transition already
    /// running there.
    pub fn transition(&mut self, id: NodeId, transition: Transition) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.transition = Some(transition);
                // started from a completion callback mid-update
                if let Some(carry) = self.carry.filter(|carry| *carry > 0.0) {
                    self.carried.push((id, carry));
                }
                true
            }
            None => false,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.nodes.values().any(Node::is_transitioning)
    }

    /// Advance every running transition by `dt` seconds.
    ///
    /// Time left over when a transition ends flows into whatever follows it
    /// in the same call: the next link of its chain, or transitions that its
    /// completion callback starts.
    pub fn update(&mut self, dt: f32) {
        let mut pending: Vec<(NodeId, f32)> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.is_transitioning())
            .map(|(id, _)| (*id, dt))
            .collect();

        while !pending.is_empty() {
            let mut removals = Vec::new();
            let mut callbacks = Vec::new();
            for (id, dt) in pending.drain(..) {
                self.advance_node(id, dt, &mut removals, &mut callbacks);
            }

            for id in removals {
                self.remove(id);
            }
            for (callback, leftover) in callbacks {
                self.carry = Some(leftover);
                callback(self);
                self.carry = None;
                pending.append(&mut self.carried);
            }
        }
    }

    // Runs one node's chain forward until a link is still in flight.
    fn advance_node(
        &mut self,
        id: NodeId,
        dt: f32,
        removals: &mut Vec<NodeId>,
        callbacks: &mut Vec<(EndCallback, f32)>,
    ) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        let Some(mut transition) = node.transition.take() else {
            return;
        };

        let mut dt = dt;
        while let Some(leftover) = transition.advance(node, dt) {
            let end = transition.finish();
            if let Some(callback) = end.on_end {
                callbacks.push((callback, leftover));
            }
            if end.remove {
                removals.push(id);
                return;
            }
            match end.next {
                Some(next) => {
                    transition = next;
                    dt = leftover;
                }
                None => return,
            }
        }
        node.transition = Some(transition);
    }

    /// Position of a node in canvas space.
    pub fn world_translation(&self, id: NodeId) -> Option<Vec2> {
        let mut node = self.nodes.get(&id)?;
        let mut translation = node.translation;
        while let Some(parent) = node.parent.and_then(|parent| self.nodes.get(&parent)) {
            translation += parent.translation;
            node = parent;
        }
        Some(translation)
    }

    /// Render the tree with the canvas origin at the top-left of `bounds`.
    pub fn draw(&self, draw: &Draw, bounds: Rect) {
        self.draw_node(draw, &bounds, self.root, Vec2::ZERO, 1.0);
    }

    fn draw_node(&self, draw: &Draw, bounds: &Rect, id: NodeId, offset: Vec2, opacity: f32) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let position = offset + node.translation;
        let opacity = opacity * node.opacity;
        if opacity <= 0.0 {
            return;
        }

        match &node.kind {
            NodeKind::Group => {}
            NodeKind::Rect(shape) => draw_rect(draw, bounds, position, shape, opacity),
            NodeKind::Text(shape) => draw_text(draw, bounds, position, shape, opacity),
        }

        for child in &node.children {
            self.draw_node(draw, bounds, *child, position, opacity);
        }
    }
}

// canvas space (y down) to nannou space (y up, centered)
fn to_screen(bounds: &Rect, point: Vec2) -> Point2 {
    pt2(bounds.left() + point.x, bounds.top() - point.y)
}

fn fade(color: Rgba, opacity: f32) -> Rgba {
    rgba(color.red, color.green, color.blue, color.alpha * opacity)
}

fn draw_rect(draw: &Draw, bounds: &Rect, position: Vec2, shape: &RectShape, opacity: f32) {
    if shape.width <= 0.0 || shape.height <= 0.0 {
        return;
    }

    let points: Vec<Point2> =
        rounded_rect_points(shape.width, shape.height, shape.corner_radius)
            .into_iter()
            .map(|point| to_screen(bounds, position + point))
            .collect();

    let fill = fade(shape.fill, opacity);
    match shape.stroke {
        Some(stroke) => {
            draw.polygon()
                .color(fill)
                .stroke(fade(stroke, opacity))
                .stroke_weight(STROKE_WEIGHT)
                .points(points);
        }
        None => {
            draw.polygon().color(fill).points(points);
        }
    }
}

fn draw_text(draw: &Draw, bounds: &Rect, position: Vec2, shape: &TextShape, opacity: f32) {
    let center = to_screen(bounds, position);
    draw.text(&shape.text)
        .font_size(shape.font_size)
        .center_justify()
        .align_text_middle_y()
        .color(fade(shape.color, opacity))
        .x_y(center.x, center.y);
}

/// Outline of a rectangle with its top-left corner at the origin,
/// corners sampled as quarter arcs. Clockwise on screen.
pub fn rounded_rect_points(width: f32, height: f32, corner_radius: f32) -> Vec<Vec2> {
    let radius = corner_radius.clamp(0.0, width.min(height) / 2.0);
    if radius <= 0.0 {
        return vec![
            vec2(0.0, 0.0),
            vec2(width, 0.0),
            vec2(width, height),
            vec2(0.0, height),
        ];
    }

    // (arc center, start angle); each arc sweeps a quarter turn
    let corners = [
        (vec2(radius, radius), PI),
        (vec2(width - radius, radius), 1.5 * PI),
        (vec2(width - radius, height - radius), 0.0),
        (vec2(radius, height - radius), 0.5 * PI),
    ];

    let mut points = Vec::with_capacity(corners.len() * (CORNER_RESOLUTION + 1));
    for (center, start_angle) in corners {
        for step in 0..=CORNER_RESOLUTION {
            let angle = start_angle + 0.5 * PI * step as f32 / CORNER_RESOLUTION as f32;
            points.push(center + vec2(angle.cos(), angle.sin()) * radius);
        }
    }
    points
}
