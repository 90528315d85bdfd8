//! Trigrid CLI - grid refinement command-line tool.
//!
//! Usage: trigrid <COMMAND> [OPTIONS] [COORDS] [CONN]
//!
//! Run `trigrid --help` for available commands.

mod problems;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use log::info;

use trigrid::algo::dirichlet::collect_dirichlet;
use trigrid::algo::Progress;
use trigrid::config::{self, Config};
use trigrid::field::ScalarField;
use trigrid::hierarchy::{Level, MeshHierarchy};
use trigrid::io::{self, PvdSeries};
use trigrid::mesh::TriMesh;

use problems::{sine_exp, CosineTopRight};

#[derive(Parser)]
#[command(name = "trigrid")]
#[command(author, version, about = "2D triangle grid refinement CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display grid information
    Info {
        #[command(flatten)]
        grid: GridArgs,
    },

    /// Refine a grid level by level and export the levels
    Refine {
        #[command(flatten)]
        grid: GridArgs,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Compute Dirichlet boundary data on every level and export it
    Dirichlet {
        #[command(flatten)]
        grid: GridArgs,

        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args)]
struct GridArgs {
    /// Vertex coordinate file
    #[arg(default_value = config::DEFAULT_COORDS_PATH)]
    coords: PathBuf,

    /// Triangle connectivity file (1-based indices)
    #[arg(default_value = config::DEFAULT_CONN_PATH)]
    conn: PathBuf,
}

#[derive(Args)]
struct RunArgs {
    /// Total number of levels, including the base grid
    #[arg(short, long, default_value_t = config::DEFAULT_LEVELS)]
    levels: usize,

    /// Output prefix for the .pvd/.vtu files
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT_PREFIX)]
    output: PathBuf,
}

impl RunArgs {
    fn config(&self, grid: &GridArgs) -> Config {
        Config::new(&grid.coords, &grid.conn)
            .with_levels(self.levels)
            .with_output_prefix(&self.output)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { grid } => {
            cmd_info(&grid.coords, &grid.conn)?;
        }

        Commands::Refine { grid, run } => {
            let config = run.config(&grid);
            config.validate()?;
            cmd_refine(&config)?;
        }

        Commands::Dirichlet { grid, run } => {
            let config = run.config(&grid);
            config.validate()?;
            cmd_dirichlet(&config)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let raw_percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Only ever move forward.
        let previous = max_percent.fetch_max(raw_percent, Ordering::Relaxed);
        let percent = previous.max(raw_percent);
        if percent == previous && percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {}", bar, space, percent, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn load(coords: &Path, conn: &Path) -> Result<TriMesh, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let mesh = io::load(coords, conn)?;
    info!(
        "Loaded {} and {} in {:.2?}",
        coords.display(),
        conn.display(),
        start.elapsed()
    );
    Ok(mesh)
}

fn print_level_header(level: usize) {
    println!("====================================================");
    println!("Level {}", level);
    println!("====================================================");
}

fn cmd_info(coords: &Path, conn: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load(coords, conn)?;

    println!("Coordinates: {}", coords.display());
    println!("Connectivity: {}", conn.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Triangles: {}", mesh.num_triangles());
    println!("Boundary vertices: {}", mesh.boundary_flags().count());

    let mut min_area = f64::MAX;
    let mut max_area = 0.0_f64;
    let mut flipped = 0;
    for i in 0..mesh.num_triangles() {
        let area = mesh.signed_area(i);
        if area < 0.0 {
            flipped += 1;
        }
        min_area = min_area.min(area.abs());
        max_area = max_area.max(area.abs());
    }

    println!("Area: {:.6}", mesh.total_area());
    println!("Triangle area range: [{:.6}, {:.6}]", min_area, max_area);
    if flipped > 0 {
        println!("Clockwise triangles: {}", flipped);
    }

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}) to ({:.3}, {:.3})",
            min.x, min.y, max.x, max.y
        );
    }

    Ok(())
}

/// Wall-clock times of a level-by-level refinement run.
struct RefineTimings {
    per_level: Vec<Duration>,
    total: Duration,
}

/// Refine until `hierarchy` has `levels` levels, printing each step.
fn refine_levels(
    hierarchy: &mut MeshHierarchy,
    levels: usize,
) -> Result<RefineTimings, Box<dyn std::error::Error>> {
    let mut per_level = Vec::new();
    let run_start = Instant::now();

    for level in hierarchy.num_levels()..levels {
        print_level_header(level);

        let progress = create_progress();
        let start = Instant::now();
        let refined = hierarchy.refine_next_with_progress(&progress)?;
        let elapsed = start.elapsed();
        per_level.push(elapsed);

        println!(
            "Refinement from level {} to level {} took {:.2?}",
            level - 1,
            level,
            elapsed
        );
        println!(
            "Vertices: {}, triangles: {}",
            refined.mesh.num_vertices(),
            refined.mesh.num_triangles()
        );
    }

    Ok(RefineTimings {
        per_level,
        total: run_start.elapsed(),
    })
}

fn cmd_refine(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load(&config.coords_path, &config.conn_path)?;

    print_level_header(0);
    println!("Vertices: {}, triangles: {}", mesh.num_vertices(), mesh.num_triangles());

    let mut hierarchy = MeshHierarchy::new(Level::new(mesh));
    let timings = refine_levels(&mut hierarchy, config.levels)?;
    println!("The refinement took {:.2?}", timings.total);

    let mut series = PvdSeries::new(&config.output_prefix);
    for (k, level) in hierarchy.levels().enumerate() {
        let flags = level.mesh.boundary_flags().to_field("Boundary flag");
        series.append(k as f64, &level.mesh, &[flags])?;
    }
    println!("Saved: {} ({} levels)", series.pvd_path().display(), series.len());

    Ok(())
}

fn cmd_dirichlet(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load(&config.coords_path, &config.conn_path)?;
    let interpolated = ScalarField::from_fn("sin(pi x) exp(y)", &mesh, sine_exp);

    let mut hierarchy = MeshHierarchy::new(Level::with_fields(mesh, vec![interpolated])?);
    let mut series = PvdSeries::new(&config.output_prefix);

    for level in 0..config.levels {
        print_level_header(level);

        if level > 0 {
            let progress = create_progress();
            let start = Instant::now();
            hierarchy.refine_next_with_progress(&progress)?;
            println!(
                "Refinement from level {} to level {} (including boundary flags) took {:.2?}",
                level - 1,
                level,
                start.elapsed()
            );
        }

        let current = hierarchy.level(level);
        let mesh = &current.mesh;
        println!("Number of nodes on level {}: {}", level, mesh.num_vertices());
        println!("Number of triangles on level {}: {}", level, mesh.num_triangles());

        let start = Instant::now();
        let data = collect_dirichlet(mesh, mesh.boundary_flags(), &CosineTopRight);
        println!(
            "Computation of Dirichlet boundary conditions took {:.2?} ({} nodes)",
            start.elapsed(),
            data.len()
        );

        let mut dirichlet = ScalarField::zeros("Dirichlet BC", mesh.num_vertices());
        data.apply(&mut dirichlet);

        let mut fields = vec![mesh.boundary_flags().to_field("Boundary flag"), dirichlet];
        fields.extend(current.fields().iter().cloned());
        series.append(level as f64, mesh, &fields)?;
    }

    println!("Saved: {} ({} levels)", series.pvd_path().display(), series.len());

    Ok(())
}
