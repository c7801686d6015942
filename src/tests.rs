//! Test utils.

use std::path::PathBuf;

use crate::domain::{Obstacle, Position, Waypoint};
use crate::scene::Scene;

pub fn obstacle(x: f64, y: f64, width: f64, height: f64) -> Obstacle {
    Obstacle::new(Position::new(x, y), width, height).unwrap()
}

pub fn waypoint(x: f64, y: f64, width: f64, height: f64) -> Waypoint {
    Waypoint::new(Position::new(x, y), width, height).unwrap()
}

pub fn scene(obstacles: Vec<Obstacle>, fence: Vec<Obstacle>) -> Scene {
    Scene {
        obstacles,
        fence,
        ..Scene::default()
    }
}

pub fn asset_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join(name)
}
