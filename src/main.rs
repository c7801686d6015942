//! `park` - load park scenes and answer free-space queries.

use std::{fs, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use park_environment::{
    config::ParkConfig,
    domain::{Environment, Position},
    scene::SceneGenerator,
};

#[derive(Debug, Parser)]
#[command(name = "park", about = "Bounded 2D park environment for path planners")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Park width, overriding the configuration
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Park height, overriding the configuration
    #[arg(long, global = true)]
    height: Option<u32>,

    /// Grid cell size, overriding the configuration
    #[arg(long, global = true)]
    grid_size: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load scenes and print the occupancy grid
    Show {
        /// Scene files, merged after the configured ones
        scenes: Vec<PathBuf>,

        /// Robot radius used to inflate obstacles
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Load scenes and check points for free space
    Query {
        /// Scene files, merged after the configured ones
        scenes: Vec<PathBuf>,

        /// Point to check, as `x,y`
        #[arg(long = "at", required = true)]
        points: Vec<Point>,

        /// Robot radius used to inflate obstacles
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Generate a random fenced park scene as JSON
    Generate {
        /// Size of the fence blocks
        #[arg(long, default_value_t = 3.0)]
        block: f64,

        /// Number of interior obstacles
        #[arg(long, default_value_t = 10)]
        obstacles: usize,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug)]
struct Point(Position);

impl FromStr for Point {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid coordinate `{v}`: {e}"))
        };
        Ok(Point(Position::new(parse(x)?, parse(y)?)))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "park=info,park_environment=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            ParkConfig::load(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?
        }
        None => ParkConfig::default(),
    };
    if let Some(width) = cli.width {
        config.environment.width = width;
    }
    if let Some(height) = cli.height {
        config.environment.height = height;
    }
    if let Some(grid_size) = cli.grid_size {
        config.environment.grid_size = grid_size;
    }

    match cli.command {
        Command::Show { scenes, radius } => {
            let radius = radius.unwrap_or(config.query.robot_radius);
            let environment = build_environment(config, scenes)?;
            let grid = environment.occupancy_grid(radius)?;
            info!(
                columns = grid.columns(),
                rows = grid.rows(),
                free_cells = grid.free_cells(),
                robot_radius = radius,
                "Occupancy grid"
            );
            println!("{grid}");
        }
        Command::Query {
            scenes,
            points,
            radius,
        } => {
            let radius = radius.unwrap_or(config.query.robot_radius);
            let environment = build_environment(config, scenes)?;
            for Point(p) in points {
                let state = if environment.is_free(p.x(), p.y(), radius) {
                    "free"
                } else {
                    "blocked"
                };
                println!("{} {} {state}", p.x(), p.y());
            }
        }
        Command::Generate {
            block,
            obstacles,
            seed,
            output,
        } => {
            let generator = SceneGenerator::new(
                config.environment.width,
                config.environment.height,
                block,
                obstacles,
            )?;
            let scene = generator.generate(seed)?;
            let json = scene.to_json_pretty()?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(
                        obstacles = scene.obstacle_count(),
                        seed, "Scene written to {:?}", path
                    );
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

fn build_environment(mut config: ParkConfig, scenes: Vec<PathBuf>) -> Result<Environment> {
    config.scenes.extend(scenes);
    let environment = config
        .environment()
        .context("failed to build the park environment")?;
    info!(
        width = environment.width(),
        height = environment.height(),
        grid_size = environment.grid_size(),
        obstacles = environment.obstacles().len(),
        start = ?environment.start().map(|w| w.position()),
        goal = ?environment.goal().map(|w| w.position()),
        "Environment loaded"
    );
    Ok(environment)
}
