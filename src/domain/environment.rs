//! Park environment with obstacles, a start and a goal.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::{Footprint, HasFootprint, OccupancyGrid, Position};
use crate::scene::{Scene, SceneError};

#[derive(Clone, Debug, PartialEq)]
pub struct Environment {
    width: u32,
    height: u32,
    grid_size: u32,
    obstacles: Vec<Obstacle>,
    start: Option<Waypoint>,
    goal: Option<Waypoint>,
}

impl Environment {
    pub fn new(width: u32, height: u32, grid_size: u32) -> Result<Self, EnvironmentError> {
        for (name, value) in [("width", width), ("height", height), ("grid size", grid_size)] {
            if value == 0 {
                return Err(EnvironmentError::InvalidConfiguration(format!(
                    "{name} must be positive"
                )));
            }
        }

        Ok(Self {
            width,
            height,
            grid_size,
            obstacles: vec![],
            start: None,
            goal: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// All obstacles in load order, fence entries included.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn start(&self) -> Option<&Waypoint> {
        self.start.as_ref()
    }

    pub fn goal(&self) -> Option<&Waypoint> {
        self.goal.as_ref()
    }

    /// Merges a scene into the environment.
    ///
    /// Obstacles are appended in order, followed by the fence. Start and goal are replaced
    /// only if the scene carries them.
    pub fn load(&mut self, scene: Scene) {
        let Scene {
            start,
            goal,
            obstacles,
            fence,
        } = scene;

        debug!(
            obstacles = obstacles.len(),
            fence = fence.len(),
            start = start.is_some(),
            goal = goal.is_some(),
            "loading scene"
        );

        if start.is_some() {
            self.start = start;
        }
        if goal.is_some() {
            self.goal = goal;
        }
        self.obstacles.extend(obstacles);
        self.obstacles.extend(fence);
    }

    /// Reads, validates and merges a scene file. On error the environment is left untouched.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let scene = Scene::from_file(path)?;
        self.load(scene);
        Ok(())
    }

    /// Whether `position` lies within `[0, width] x [0, height]`.
    pub fn contains(&self, position: Position) -> bool {
        (0.0..=f64::from(self.width)).contains(&position.x())
            && (0.0..=f64::from(self.height)).contains(&position.y())
    }

    /// Whether a robot of `robot_radius` centred at `(x, y)` is clear of every obstacle.
    ///
    /// Points outside the park bounds are never free, regardless of the radius. Obstacle
    /// footprints are closed and inflated by `robot_radius` on all sides. A negative or NaN
    /// radius counts as zero.
    pub fn is_free(&self, x: f64, y: f64, robot_radius: f64) -> bool {
        let position = Position::new(x, y);
        if !self.contains(position) {
            return false;
        }

        let robot_radius = robot_radius.max(0.0);
        !self
            .obstacles
            .iter()
            .any(|o| o.blocks(position, robot_radius))
    }

    pub fn occupancy_grid(&self, robot_radius: f64) -> Result<OccupancyGrid, EnvironmentError> {
        OccupancyGrid::new(self, robot_radius)
    }
}

#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid obstacle shape: {0}")]
    InvalidObstacleShape(String),
}

/// A collidable rectangle occupying `[x, x + width] x [y, y + height]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    position: Position,
    width: f64,
    height: f64,
    image: Option<String>,
}

impl Obstacle {
    pub fn new(position: Position, width: f64, height: f64) -> Result<Self, EnvironmentError> {
        validate_shape(position, width, height)?;
        Ok(Self {
            position,
            width,
            height,
            image: None,
        })
    }

    pub fn with_image(self, image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            ..self
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Asset reference for renderers. Never interpreted here.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl HasFootprint for Obstacle {
    fn footprint(&self) -> Footprint {
        Footprint::new(self.position, self.width, self.height)
    }
}

/// A point of interest such as the start or the goal. Shaped like an obstacle, but never
/// collidable.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    position: Position,
    width: f64,
    height: f64,
    image: Option<String>,
}

impl Waypoint {
    pub fn new(position: Position, width: f64, height: f64) -> Result<Self, EnvironmentError> {
        validate_shape(position, width, height)?;
        Ok(Self {
            position,
            width,
            height,
            image: None,
        })
    }

    pub fn with_image(self, image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            ..self
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl HasFootprint for Waypoint {
    fn footprint(&self) -> Footprint {
        Footprint::new(self.position, self.width, self.height)
    }
}

fn validate_shape(position: Position, width: f64, height: f64) -> Result<(), EnvironmentError> {
    if !position.is_finite() {
        return Err(EnvironmentError::InvalidObstacleShape(format!(
            "position ({}, {}) is not finite",
            position.x(),
            position.y()
        )));
    }
    for (name, value) in [("width", width), ("height", height)] {
        if !value.is_finite() || value < 0.0 {
            return Err(EnvironmentError::InvalidObstacleShape(format!(
                "{name} {value} is not a non-negative number"
            )));
        }
    }
    Ok(())
}
