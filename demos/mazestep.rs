//! Terminal maze-search stepper.
//!
//! Run: cargo run --bin mazestep -- --algorithm uniform-cost --interval-ms 50
//!      cargo run --bin mazestep -- --maze maze.txt --algorithm depth-first --tree --max-depth 12

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::info;
use mazestep_core::{Connectivity, Grid};
use mazestep_demos::{
    DemoError, MazeGen, draw_frame, load_maze, render, render_path, status_line,
};
use mazestep_search::{Algorithm, Explorer, Mode, Reveal, SearchConfig, Status, StepDriver};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Strategy {
    BreadthFirst,
    DepthFirst,
    Bidirectional,
    UniformCost,
    /// Reveal random frontier cells, as a user clicking would.
    Explore,
}

/// Step a search over a maze and print every intermediate state
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Maze file (`#` wall, `.` open, `S` start, `G` goal); random if omitted
    #[arg(short, long)]
    maze: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "breadth-first")]
    algorithm: Strategy,

    /// Rooms per column of a generated maze
    #[arg(long, default_value_t = 8)]
    rooms_h: usize,

    /// Rooms per row of a generated maze
    #[arg(long, default_value_t = 12)]
    rooms_w: usize,

    /// Chance of removing each leftover inner wall of a generated maze
    #[arg(long, default_value_t = 0.1)]
    loops: f64,

    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Tree search: never mark cells visited
    #[arg(long)]
    tree: bool,

    #[arg(long)]
    max_depth: Option<u32>,

    /// Skip neighbors already on the path back to the start
    #[arg(long)]
    path_check: bool,

    /// Allow diagonal moves (the default for uniform cost)
    #[arg(long)]
    eight: bool,

    /// Only four-way moves, even for uniform cost
    #[arg(long, conflicts_with = "eight")]
    four: bool,

    #[arg(long, default_value_t = 30)]
    interval_ms: u64,

    /// Print only the final frame
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn connectivity(&self, default: Connectivity) -> Connectivity {
        if self.eight {
            Connectivity::Eight
        } else if self.four {
            Connectivity::Four
        } else {
            default
        }
    }

    fn config(&self, algorithm: Algorithm) -> SearchConfig {
        let mode = if self.tree { Mode::Tree } else { Mode::Graph };
        SearchConfig::new(algorithm)
            .with_connectivity(self.connectivity(algorithm.default_connectivity()))
            .with_mode(mode)
            .with_max_depth(self.max_depth)
            .with_path_check(self.path_check)
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), DemoError> {
    let grid = match &args.maze {
        Some(path) => load_maze(path)?,
        None => MazeGen::new(StdRng::seed_from_u64(args.seed)).generate(
            args.rooms_h,
            args.rooms_w,
            args.loops,
        )?,
    };
    let grid = Arc::new(grid);
    info!("maze is {}x{}", grid.height(), grid.width());

    let algorithm = match args.algorithm {
        Strategy::BreadthFirst => Algorithm::BreadthFirst,
        Strategy::DepthFirst => Algorithm::DepthFirst,
        Strategy::Bidirectional => Algorithm::Bidirectional,
        Strategy::UniformCost => Algorithm::UniformCost,
        Strategy::Explore => return explore(args, grid),
    };

    let mut driver = StepDriver::new();
    driver.initialize(Arc::clone(&grid), args.config(algorithm));

    let interval = if args.quiet {
        Duration::ZERO
    } else {
        Duration::from_millis(args.interval_ms)
    };
    let stop = driver.stop_handle();
    let mut draw_err = None;
    let status = driver.run(interval, |snap| {
        if args.quiet || draw_err.is_some() {
            return;
        }
        if let Err(e) = draw_frame(&mut io::stdout(), &render(&grid, snap), &status_line(snap)) {
            draw_err = Some(e);
            stop.stop();
        }
    })?;
    if let Some(e) = draw_err {
        return Err(e.into());
    }

    if let Some(snap) = driver.snapshot() {
        if args.quiet {
            draw_frame(&mut io::stdout(), &render(&grid, &snap), &status_line(&snap))?;
        }
        println!("{}", serde_json::to_string(&snap.stats())?);
    }
    let solution = driver.engine().and_then(|e| e.solution());
    if let (Status::Reached, Some(path)) = (status, solution) {
        println!("path of {} cells:", path.len());
        print!("{}", render_path(&grid, &path));
    }
    Ok(())
}

fn explore(args: &Args, grid: Arc<Grid>) -> Result<(), DemoError> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut explorer = Explorer::new(Arc::clone(&grid), args.connectivity(Connectivity::Four));
    while explorer.status() == Status::Running {
        let frontier: Vec<_> = explorer.state().frontier().iter().collect();
        let pick = frontier[rng.random_range(0..frontier.len())];
        if let Reveal::Reached(cell) = explorer.reveal(pick)? {
            info!("revealed the goal at {cell}");
        }
        if !args.quiet {
            let snap = explorer.snapshot();
            draw_frame(&mut io::stdout(), &render(&grid, &snap), &status_line(&snap))?;
            std::thread::sleep(Duration::from_millis(args.interval_ms));
        }
    }
    let snap = explorer.snapshot();
    if args.quiet {
        draw_frame(&mut io::stdout(), &render(&grid, &snap), &status_line(&snap))?;
    }
    println!("{}", serde_json::to_string(&snap.stats())?);
    Ok(())
}
