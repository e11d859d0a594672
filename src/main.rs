use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;

use cave_generator::{ascii, viewer, CaveGenerator, CaveParams, CavePreset};

#[derive(Parser, Debug)]
#[command(name = "cave_generator")]
#[command(about = "Generate cave levels with a cellular automaton")]
struct Args {
    /// JSON file with generation parameters (flags below override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start from a preset instead of the defaults
    #[arg(long, value_enum, conflicts_with = "config")]
    preset: Option<CavePreset>,

    /// List the presets with a short description and exit
    #[arg(long)]
    list_presets: bool,

    /// Width of the grid in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the grid in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Chance of each cell starting as a wall
    #[arg(long)]
    wall_chance: Option<f64>,

    /// Automaton generations per attempt
    #[arg(long)]
    steps: Option<usize>,

    /// Minimum passage area before a cave is accepted
    #[arg(long)]
    min_area: Option<usize>,

    /// Keep every cavern instead of only the largest
    #[arg(long)]
    no_cull: bool,

    /// Print the finished cave as text instead of opening a window
    #[arg(long)]
    ascii: bool,

    /// With --ascii, draw the largest cavern with '@'
    #[arg(long, requires = "ascii")]
    highlight: bool,

    /// Print the effective parameters as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

impl Args {
    fn params(&self) -> Result<CaveParams, Box<dyn Error>> {
        let mut params = match (&self.config, self.preset) {
            (Some(path), _) => CaveParams::load(path)?,
            (None, Some(preset)) => {
                info!("using {} preset: {}", preset, preset.description());
                CaveParams::from_preset(preset)
            }
            (None, None) => CaveParams::default(),
        };

        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
        if let Some(wall_chance) = self.wall_chance {
            params.wall_chance = wall_chance;
        }
        if let Some(steps) = self.steps {
            params.smoothing_steps = steps;
        }
        if let Some(min_area) = self.min_area {
            params.min_area = min_area;
        }
        if self.no_cull {
            params.cull = false;
        }

        params.validate()?;
        Ok(params)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();

    if args.list_presets {
        for preset in CavePreset::all() {
            println!("{:<10} {}", preset, preset.description());
        }
        return Ok(());
    }

    let params = args.params()?;

    if args.dump_config {
        println!("{}", params.to_json()?);
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(
        "generating {}x{} cave with seed {}",
        params.width, params.height, seed
    );
    let mut generator = CaveGenerator::new(params, seed)?;

    if args.ascii {
        let summary = generator.run_to_completion();
        let grid = generator.grid();
        let mut stdout = io::stdout().lock();
        match args.highlight.then(|| grid.largest_cavern()).flatten() {
            Some(cavern) => {
                stdout.write_all(ascii::render_with_cavern(grid, &cavern, '@').as_bytes())?
            }
            None => ascii::write_grid(grid, &mut stdout)?,
        }
        writeln!(
            stdout,
            "Seed {}: {} passage cells in {} cavern(s) after {} attempt(s){}",
            summary.seed,
            summary.stats.total_area,
            summary.stats.cavern_count,
            summary.attempts,
            if summary.met_min_area { "" } else { " (below minimum area)" }
        )?;
        return Ok(());
    }

    viewer::run_viewer(generator)?;
    Ok(())
}
