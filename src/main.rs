// src/main.rs
use nannou::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use matrixvis::{
    config::*,
    controllers::{OscCommand, OscController, OscSender},
    models::{Axis, MatrixData, Selection},
    views::{GridView, Scene},
};

const CURSOR_WEIGHT: f32 = 2.0;

struct Model {
    // Core components:
    scene: Scene,
    grid: GridView,

    // Comms components:
    osc_controller: OscController,
    osc_sender: OscSender,

    // Keyboard selection
    cursor_row: usize,
    cursor_column: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    // Load config
    let config = Config::load().expect("Failed to load config file");

    // Load matrix data, or make some up
    let data_path = config.resolve_data_path();
    let data = match MatrixData::load(&data_path) {
        Ok(data) => {
            info!("Loaded {} cells from {}", data.cells.len(), data_path.display());
            data
        }
        Err(e) => {
            warn!(
                "Could not load {}: {}. Generating a {}x{} matrix",
                data_path.display(),
                e,
                config.demo.rows,
                config.demo.columns
            );
            MatrixData::random(config.demo.rows, config.demo.columns, &mut rand::thread_rng())
        }
    };
    if let Err(e) = data.validate() {
        warn!("Matrix data is inconsistent: {}", e);
    }

    // Create OSC controller
    let osc_controller =
        OscController::new(config.osc.rx_port).expect("Failed to create OSC Controller");
    let osc_sender = OscSender::new(config.osc.rx_port).expect("Failed to create OSC Sender");

    // Create window
    app.new_window()
        .title("matrixvis 0.1.0")
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .build()
        .expect("Failed to create window");

    let mut scene = Scene::new();
    let grid = GridView::from_data(&mut scene, &data, config.grid).with_timings(config.animation);

    Model {
        scene,
        grid,
        osc_controller,
        osc_sender,
        cursor_row: 0,
        cursor_column: 0,
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    let row = Selection::row(model.cursor_row);
    let column = Selection::column(model.cursor_column);

    match key {
        Key::T => model.osc_sender.send_transpose(),
        Key::R => model.osc_sender.send_drop(row),
        Key::C => model.osc_sender.send_drop(column),
        Key::H => model.osc_sender.send_highlight(row),
        Key::G => {
            let stride = model.grid.style().stride();
            model.osc_sender.send_ghost_move(row, stride, stride);
        }
        Key::Escape => model.osc_sender.send_clear_highlights(),

        /***************** Cursor movement is local only ****************** */
        Key::Up => model.cursor_row = model.cursor_row.saturating_sub(1),
        Key::Down => model.cursor_row += 1,
        Key::Left => model.cursor_column = model.cursor_column.saturating_sub(1),
        Key::Right => model.cursor_column += 1,
        _ => (),
    }
    clamp_cursor(model);
}

fn update(_app: &App, model: &mut Model, update: Update) {
    // Process OSC messages
    model.osc_controller.process_messages();
    launch_commands(model);

    model.scene.update(update.since_last.as_secs_f32());
}

// Draw the state of Model into the given Frame
fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let bounds = app.window_rect();
    draw.background().color(BLACK);

    model.scene.draw(&draw, bounds);
    draw_cursor(&draw, bounds, model);

    draw.to_frame(app, &frame).ok();
}

fn draw_cursor(draw: &Draw, bounds: Rect, model: &Model) {
    if model.grid.row_count() == 0 || model.grid.column_count() == 0 {
        return;
    }

    let style = model.grid.style();
    let corner = style.grid_origin() + style.position(model.cursor_row, model.cursor_column);
    let half = style.cell_size / 2.0;
    let size = style.cell_size + style.gap_size;
    draw.rect()
        .no_fill()
        .stroke(YELLOW)
        .stroke_weight(CURSOR_WEIGHT)
        .w_h(size, size)
        .x_y(bounds.left() + corner.x + half, bounds.top() - corner.y - half);
}

fn clamp_cursor(model: &mut Model) {
    let last_row = model.grid.count(Axis::Row).saturating_sub(1);
    let last_column = model.grid.count(Axis::Column).saturating_sub(1);
    model.cursor_row = model.cursor_row.min(last_row);
    model.cursor_column = model.cursor_column.min(last_column);
}

fn launch_commands(model: &mut Model) {
    let commands = model.osc_controller.take_commands();
    if commands.is_empty() {
        return;
    }

    for command in commands {
        match command {
            OscCommand::Transpose => {
                model.grid.transpose(&mut model.scene);
                std::mem::swap(&mut model.cursor_row, &mut model.cursor_column);
            }
            OscCommand::Drop { selection } => {
                model.grid.drop(&mut model.scene, selection);
            }
            OscCommand::Highlight { selection } => {
                if let Err(e) = model.grid.try_highlight(&mut model.scene, selection) {
                    warn!("Ignoring highlight: {}", e);
                }
            }
            OscCommand::ClearHighlights => {
                model.grid.clear_highlights(&mut model.scene);
            }
            OscCommand::GhostMove { selection, dx, dy } => {
                if let Err(e) = model
                    .grid
                    .try_ghost_move_vector(&mut model.scene, selection, dx, dy)
                {
                    warn!("Ignoring ghost move: {}", e);
                }
            }
        }
    }
    clamp_cursor(model);
}
