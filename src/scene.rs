//! Scene descriptions feeding the environment.
//!
//! A scene is decoded from JSON and fully validated before it is handed to
//! [`Environment::load`](crate::domain::Environment::load), so a malformed source never leaves a
//! partially merged environment behind.

mod generator;
mod record;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::domain::{Obstacle, Waypoint};

pub use generator::SceneGenerator;
use record::SceneRecord;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub start: Option<Waypoint>,
    pub goal: Option<Waypoint>,
    pub obstacles: Vec<Obstacle>,
    /// Perimeter obstacles. Merged after `obstacles` and treated identically.
    pub fence: Vec<Obstacle>,
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Scene::try_from(SceneRecord::from_json(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SceneError::SourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&SceneRecord::from(self))
    }

    /// Number of obstacles the scene adds to an environment.
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len() + self.fence.len()
    }
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene source {} could not be read", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed scene source: {0}")]
    MalformedSource(String),
}

impl From<serde_json::Error> for SceneError {
    fn from(value: serde_json::Error) -> Self {
        SceneError::MalformedSource(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::Position;
    use crate::tests::{asset_path, obstacle, waypoint};

    const PARK: &str = r#"{
        "start": { "position": [0, 0], "width": 3, "height": 3, "image": "start.png" },
        "goal": { "position": [48.5, 48], "width": 3, "height": 3, "image": "goal.png" },
        "obstacles": [
            { "position": [20, 20], "width": 10, "height": 10, "image": "pond.png" },
            { "position": [5, 30], "width": 2.5, "height": 4 }
        ],
        "fence": [
            { "position": [0, 50], "width": 51, "height": 1, "image": "fence.png" },
            { "position": [50, 0], "width": 1, "height": 51, "image": "fence.png" },
            { "position": [0, 0], "width": 1, "height": 51, "image": "fence.png" }
        ]
    }"#;

    #[test]
    fn test_scene_from_json() {
        let scene = Scene::from_json(PARK).unwrap();

        let start = scene.start.as_ref().unwrap();
        assert_abs_diff_eq!(start.position(), Position::new(0.0, 0.0));
        assert_eq!(start.image(), Some("start.png"));
        let goal = scene.goal.as_ref().unwrap();
        assert_abs_diff_eq!(goal.position(), Position::new(48.5, 48.0));

        assert_eq!(scene.obstacles.len(), 2);
        assert_eq!(scene.fence.len(), 3);
        assert_eq!(scene.obstacle_count(), 5);
        assert_eq!(scene.obstacles[0].image(), Some("pond.png"));
        assert_eq!(scene.obstacles[1].image(), None);
        assert_abs_diff_eq!(scene.obstacles[1].width(), 2.5);
        assert_abs_diff_eq!(scene.fence[1].position(), Position::new(50.0, 0.0));
    }

    #[rstest]
    #[case::empty("{}")]
    #[case::null_waypoints(r#"{ "start": null, "goal": null }"#)]
    #[case::unknown_keys(r#"{ "name": "park", "version": 2 }"#)]
    fn test_scene_from_json_absent_fields(#[case] json: &str) {
        assert_eq!(Scene::from_json(json).unwrap(), Scene::default());
    }

    #[rstest]
    #[case::not_json("start: [0, 0]")]
    #[case::not_a_record("[]")]
    #[case::position_too_long(r#"{ "obstacles": [{ "position": [1, 2, 3], "width": 1, "height": 1 }] }"#)]
    #[case::position_not_numeric(r#"{ "obstacles": [{ "position": ["a", 2], "width": 1, "height": 1 }] }"#)]
    #[case::missing_width(r#"{ "fence": [{ "position": [1, 2], "height": 1 }] }"#)]
    #[case::obstacles_not_a_sequence(r#"{ "obstacles": { "position": [1, 2], "width": 1, "height": 1 } }"#)]
    #[case::obstacles_null(r#"{ "obstacles": null }"#)]
    #[case::start_not_a_record(r#"{ "start": [0, 0] }"#)]
    #[case::scene_as_sequence(r#"[null, null, [[[20, 20], 10, 10]], []]"#)]
    #[case::obstacle_as_sequence(r#"{ "obstacles": [[[20, 20], 10, 10]] }"#)]
    #[case::waypoint_as_sequence(r#"{ "goal": [[20, 20], 1, 1] }"#)]
    #[case::scene_as_number("42")]
    fn test_scene_from_json_malformed(#[case] json: &str) {
        assert!(matches!(
            Scene::from_json(json),
            Err(SceneError::MalformedSource(_))
        ));
    }

    #[rstest]
    #[case::fence(
        r#"{ "fence": [{ "position": [1, 2], "width": 1, "height": 1 }, { "position": [1, 2], "width": -1, "height": 1 }] }"#,
        "fence[1]"
    )]
    #[case::obstacle(
        r#"{ "obstacles": [{ "position": [1, 2], "width": 1, "height": -0.5 }] }"#,
        "obstacles[0]"
    )]
    #[case::goal(r#"{ "goal": { "position": [1, 2], "width": -1, "height": 1 } }"#, "goal")]
    #[case::fence_as_sequence(
        r#"{ "fence": [{ "position": [1, 2], "width": 1, "height": 1 }, [[1, 2], 1, 1]] }"#,
        "fence[1]"
    )]
    #[case::scene_as_sequence("[]", "scene")]
    fn test_scene_from_json_invalid_shape(#[case] json: &str, #[case] location: &str) {
        let Err(SceneError::MalformedSource(message)) = Scene::from_json(json) else {
            panic!("expected a malformed source");
        };
        assert!(message.starts_with(location), "{message}");
    }

    #[test]
    fn test_scene_from_file() {
        let scene = Scene::from_file(asset_path("park.json")).unwrap();
        assert!(scene.start.is_some());
        assert!(scene.goal.is_some());
        assert_eq!(scene.obstacle_count(), 7);
    }

    #[test]
    fn test_scene_from_file_not_found() {
        let path = asset_path("missing.json");
        let Err(SceneError::SourceNotFound { path: reported, .. }) = Scene::from_file(&path) else {
            panic!("expected a missing source");
        };
        assert_eq!(reported, path);
    }

    #[test]
    fn test_scene_to_json_pretty() {
        let scene = Scene {
            start: Some(waypoint(1.0, 1.0, 2.0, 2.0).with_image("start.png")),
            goal: None,
            obstacles: vec![obstacle(5.0, 6.0, 1.5, 2.0)],
            fence: vec![obstacle(0.0, 0.0, 10.0, 1.0).with_image("fence.png")],
        };
        let json = scene.to_json_pretty().unwrap();
        assert!(!json.contains("\"goal\""));
        assert_eq!(Scene::from_json(&json).unwrap(), scene);
    }
}
