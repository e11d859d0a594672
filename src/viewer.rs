use std::time::{Duration, Instant};

use log::info;
use minifb::{Key, KeyRepeat, MouseButton, Window, WindowOptions};

use crate::cell::CellState;
use crate::error::{CaveError, Result};
use crate::generator::{CaveGenerator, Phase};
use crate::grid::CaveGrid;

const PASSAGE_COLOR: u32 = 0xD8CFB8;
const WALL_COLOR: u32 = 0x3A3A44;
const BORDER_COLOR: u32 = 0x16161C;

/// Paint the grid into a 0RGB pixel buffer, `cell_size` pixels per cell.
pub fn render_buffer(grid: &CaveGrid, cell_size: usize) -> Vec<u32> {
    let pixel_width = grid.width() * cell_size;
    let mut buffer = vec![BORDER_COLOR; pixel_width * grid.height() * cell_size];

    for (coord, state) in grid.cells() {
        let on_border = grid.is_border(coord.x, coord.y).unwrap_or(true);
        let color = match state {
            CellState::Passage => PASSAGE_COLOR,
            CellState::Wall if on_border => BORDER_COLOR,
            CellState::Wall => WALL_COLOR,
        };

        let px = coord.x * cell_size;
        let py = coord.y * cell_size;
        for row in py..py + cell_size {
            let start = row * pixel_width + px;
            buffer[start..start + cell_size].fill(color);
        }
    }

    buffer
}

/// Run the animated cave viewer.
/// The generator advances one tick per interval; click or R restarts, Escape exits.
pub fn run_viewer(mut generator: CaveGenerator) -> Result<()> {
    let cell_size = generator.params().cell_size;
    let tick = Duration::from_millis(generator.params().tick_ms);
    let (window_width, window_height) = generator.params().pixel_size().ok_or_else(|| {
        CaveError::InvalidConfiguration("cave is too large to display".to_string())
    })?;

    let mut window = Window::new(
        "Cave Generator - Click or R: Restart, Esc: Exit",
        window_width,
        window_height,
        WindowOptions {
            resize: false,
            scale: minifb::Scale::X1,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| CaveError::Window(e.to_string()))?;

    window.set_target_fps(60);

    println!("Viewer started. Controls:");
    println!("  Click / R: Restart with a new seed");
    println!("  Esc: Exit");

    let mut buffer = render_buffer(generator.grid(), cell_size);
    let mut last_tick = Instant::now();
    let mut mouse_was_down = false;
    let mut reported = false;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let mouse_down = window.get_mouse_down(MouseButton::Left);
        let clicked = mouse_down && !mouse_was_down;
        mouse_was_down = mouse_down;

        if clicked || window.is_key_pressed(Key::R, KeyRepeat::No) {
            let seed = rand::random();
            info!("restarting with seed {}", seed);
            generator.reseed(seed);
            buffer = render_buffer(generator.grid(), cell_size);
            last_tick = Instant::now();
            reported = false;
        }

        if last_tick.elapsed() >= tick && !generator.is_complete() {
            last_tick = Instant::now();
            if generator.tick() == Phase::Complete && !reported {
                let summary = generator.summary();
                println!(
                    "Seed {}: {} passage cells after {} attempt(s)",
                    summary.seed, summary.stats.total_area, summary.attempts
                );
                reported = true;
            }
            buffer = render_buffer(generator.grid(), cell_size);
        }

        window
            .update_with_buffer(&buffer, window_width, window_height)
            .map_err(|e| CaveError::Window(e.to_string()))?;
    }

    Ok(())
}
