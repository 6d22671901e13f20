// src/views/grid/grid_view.rs
//
// GridView: an animated matrix of colored, labeled cells.
//
// The view keeps its own copy of the cells and an explicit map from
// cell id to the scene nodes drawing that cell. Structural edits update
// the data immediately and hand the visual changes to the scene as
// transitions, so every call returns without waiting on an animation.

use nannou::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::{
    animation::{EasingType, Transition},
    config::{AnimationTimings, GridStyle},
    models::{Axis, Cell, GridError, MatrixData, Selection},
    views::{
        grid::color::{contrasting_label_color, highlight_color, to_display_color},
        Node, NodeId, RectShape, Scene, TextShape,
    },
};

/// Scene nodes belonging to one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellVisual {
    pub group: NodeId,
    pub rect: NodeId,
    pub label: Option<NodeId>,
}

pub struct GridView {
    cells: Vec<Cell>,
    row_count: usize,
    column_count: usize,
    style: GridStyle,
    timings: AnimationTimings,

    // visual state
    group: NodeId,
    visuals: HashMap<String, CellVisual>,
    highlights: Vec<NodeId>,
}

impl GridView {
    /// Copies `cells` and draws them into `scene`.
    pub fn new(
        scene: &mut Scene,
        cells: &[Cell],
        row_count: usize,
        column_count: usize,
        style: GridStyle,
    ) -> Self {
        let group = scene.append(scene.root(), Node::group().at(style.grid_origin()));
        let mut view = Self {
            cells: cells.to_vec(),
            row_count,
            column_count,
            style,
            timings: AnimationTimings::default(),
            group,
            visuals: HashMap::new(),
            highlights: Vec::new(),
        };
        view.draw(scene);
        view
    }

    pub fn from_data(scene: &mut Scene, data: &MatrixData, style: GridStyle) -> Self {
        Self::new(scene, &data.cells, data.total_rows, data.total_columns, style)
    }

    pub fn with_timings(mut self, timings: AnimationTimings) -> Self {
        self.timings = timings;
        self
    }

    /************************** Accessors ************************************/

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.row_count,
            Axis::Column => self.column_count,
        }
    }

    pub fn style(&self) -> &GridStyle {
        &self.style
    }

    pub fn timings(&self) -> &AnimationTimings {
        &self.timings
    }

    /// Root node of the matrix in the scene.
    pub fn group(&self) -> NodeId {
        self.group
    }

    pub fn visual(&self, id: &str) -> Option<&CellVisual> {
        self.visuals.get(id)
    }

    /************************** Initial render *******************************/

    fn draw(&mut self, scene: &mut Scene) {
        for cell in &self.cells {
            let position = self.style.cell_origin(cell);
            let visual = Self::build_cell(scene, &self.style, self.group, cell, position);
            self.visuals.insert(cell.id.clone(), visual);
        }
        debug!(
            "Drew {} cells in a {}x{} grid",
            self.cells.len(),
            self.row_count,
            self.column_count
        );
    }

    fn build_cell(
        scene: &mut Scene,
        style: &GridStyle,
        parent: NodeId,
        cell: &Cell,
        position: Vec2,
    ) -> CellVisual {
        let label_color = contrasting_label_color(&cell.color).to_rgba();
        let group = scene.append(parent, Node::group().at(position));
        let rect = scene.append(
            group,
            Node::rect(RectShape {
                width: style.cell_size,
                height: style.cell_size,
                corner_radius: style.corner_radius,
                fill: to_display_color(&cell.color).to_rgba(),
                stroke: Some(label_color),
            }),
        );
        let label = style.shows_labels().then(|| {
            scene.append(
                group,
                Node::text(TextShape {
                    text: cell.label.clone(),
                    font_size: style.label_font_size(),
                    color: label_color,
                })
                .at(style.label_center()),
            )
        });

        CellVisual { group, rect, label }
    }

    /************************** Transpose ************************************/

    pub fn transpose(&mut self, scene: &mut Scene) {
        let stride = self.style.stride();
        for cell in &self.cells {
            if let Some(visual) = self.visuals.get(&cell.id) {
                let target = vec2(cell.row as f32 * stride, cell.column as f32 * stride);
                scene.transition(
                    visual.group,
                    Transition::new(self.timings.transpose)
                        .easing(EasingType::SinInOut)
                        .translate(target),
                );
            }
        }

        for cell in &mut self.cells {
            cell.transpose();
        }
        std::mem::swap(&mut self.row_count, &mut self.column_count);
        info!(
            "Transposed grid to {}x{}",
            self.row_count, self.column_count
        );
    }

    /************************** Drop *****************************************/

    /// Remove a row or column. An out-of-range index does nothing.
    pub fn drop(&mut self, scene: &mut Scene, selection: Selection) {
        let Selection { index, axis } = selection;
        if index >= self.count(axis) {
            debug!(
                "Ignoring drop of {} {}: grid has {}",
                axis,
                index,
                self.count(axis)
            );
            return;
        }

        // schedule the visuals first, from the pre-drop coordinates
        let duration = self.timings.drop;
        for cell in &self.cells {
            let Some(visual) = self.visuals.get(&cell.id) else {
                continue;
            };
            let coordinate = cell.coordinate(axis);
            if coordinate == index {
                let collapse = match axis {
                    Axis::Row => Transition::new(duration).height(0.0),
                    Axis::Column => Transition::new(duration).width(0.0),
                };
                scene.transition(visual.rect, collapse);
                scene.transition(
                    visual.group,
                    Transition::new(duration).opacity(0.0).remove(),
                );
            } else if coordinate > index {
                let target = match axis {
                    Axis::Row => self.style.position(cell.row - 1, cell.column),
                    Axis::Column => self.style.position(cell.row, cell.column - 1),
                };
                scene.transition(visual.group, Transition::new(duration).translate(target));
            }
        }

        // then the data
        let visuals = &mut self.visuals;
        self.cells.retain(|cell| {
            let keep = cell.coordinate(axis) != index;
            if !keep {
                visuals.remove(&cell.id);
            }
            keep
        });
        for cell in &mut self.cells {
            let coordinate = cell.coordinate_mut(axis);
            if *coordinate > index {
                *coordinate -= 1;
            }
        }
        match axis {
            Axis::Row => self.row_count -= 1,
            Axis::Column => self.column_count -= 1,
        }
        info!(
            "Dropped {} {}, grid is now {}x{}",
            axis, index, self.row_count, self.column_count
        );
    }

    pub fn try_drop(&mut self, scene: &mut Scene, selection: Selection) -> Result<(), GridError> {
        self.check_index(selection)?;
        self.drop(scene, selection);
        Ok(())
    }

    /************************** Highlight ************************************/

    /// Draw a highlight behind a row or column. The returned handle can be
    /// passed to `remove_highlight`.
    pub fn highlight(&mut self, scene: &mut Scene, selection: Selection) -> NodeId {
        let bounds =
            self.style
                .highlight_bounds(selection, self.row_count, self.column_count);
        let handle = scene.insert_before_first_group(
            self.group,
            Node::rect(RectShape {
                width: bounds.width,
                height: bounds.height,
                corner_radius: 0.0,
                fill: highlight_color(),
                stroke: None,
            })
            .at(vec2(bounds.x, bounds.y)),
        );

        self.highlights.retain(|id| scene.contains(*id));
        self.highlights.push(handle);
        debug!("Highlighted {} {}", selection.axis, selection.index);
        handle
    }

    pub fn try_highlight(
        &mut self,
        scene: &mut Scene,
        selection: Selection,
    ) -> Result<NodeId, GridError> {
        self.check_index(selection)?;
        Ok(self.highlight(scene, selection))
    }

    pub fn remove_highlight(&mut self, scene: &mut Scene, handle: NodeId) -> bool {
        let position = self.highlights.iter().position(|id| *id == handle);
        match position {
            Some(position) => {
                self.highlights.remove(position);
                scene.remove(handle)
            }
            None => false,
        }
    }

    pub fn clear_highlights(&mut self, scene: &mut Scene) {
        for handle in self.highlights.drain(..) {
            scene.remove(handle);
        }
    }

    /************************** Ghost move ***********************************/

    /// Preview moving a row or column by (dx, dy) without touching the data.
    ///
    /// The displacement is relative: the ghost copy starts where the row or
    /// column sits and ends at that offset plus (dx, dy). It is not an
    /// absolute target position in grid space.
    pub fn ghost_move_vector(&mut self, scene: &mut Scene, selection: Selection, dx: f32, dy: f32) {
        let highlight = self.highlight(scene, selection);

        let Selection { index, axis } = selection;
        let start = self.style.line_offset(selection);
        let ghost = scene.append(self.group, Node::group().at(start));
        let vector = self.cells.iter().filter(|cell| cell.coordinate(axis) == index);
        for cell in vector {
            let position = match axis {
                Axis::Row => self.style.position(0, cell.column),
                Axis::Column => self.style.position(cell.row, 0),
            };
            Self::build_cell(scene, &self.style, ghost, cell, position);
        }

        let timings = self.timings;
        let sequence = Transition::new(timings.ghost_move)
            .easing(EasingType::CubicInOut)
            .translate(start + vec2(dx, dy))
            .then(
                Transition::new(timings.ghost_fade)
                    .delay(timings.ghost_hold)
                    .opacity(0.0)
                    .remove()
                    .on_end(move |scene: &mut Scene| {
                        scene.transition(
                            highlight,
                            Transition::new(timings.highlight_fade)
                                .opacity(0.0)
                                .remove(),
                        );
                    }),
            );
        scene.transition(ghost, sequence);
        debug!("Ghost move of {} {} by ({}, {})", axis, index, dx, dy);
    }

    pub fn try_ghost_move_vector(
        &mut self,
        scene: &mut Scene,
        selection: Selection,
        dx: f32,
        dy: f32,
    ) -> Result<(), GridError> {
        self.check_index(selection)?;
        self.ghost_move_vector(scene, selection, dx, dy);
        Ok(())
    }

    fn check_index(&self, selection: Selection) -> Result<(), GridError> {
        let count = self.count(selection.axis);
        if selection.index < count {
            Ok(())
        } else {
            Err(GridError::invalid_index(selection.axis, selection.index, count))
        }
    }
}
