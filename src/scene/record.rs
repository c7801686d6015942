//! Wire shape of a scene description.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Scene, SceneError};
use crate::domain::{EnvironmentError, Obstacle, Waypoint};

#[derive(Debug, Deserialize, Serialize)]
pub(super) struct SceneRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<ElementRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    goal: Option<ElementRecord>,
    #[serde(default)]
    obstacles: Vec<ElementRecord>,
    #[serde(default)]
    fence: Vec<ElementRecord>,
}

#[derive(Debug, Deserialize, Serialize)]
struct ElementRecord {
    position: [f64; 2],
    width: f64,
    height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

impl SceneRecord {
    /// Decodes a scene, accepting only JSON objects for the scene and each of its elements.
    pub(super) fn from_json(json: &str) -> Result<Self, SceneError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(fields) = &value else {
            return Err(not_a_record("scene"));
        };
        for key in ["start", "goal"] {
            if let Some(element) = fields.get(key) {
                if !element.is_object() && !element.is_null() {
                    return Err(not_a_record(key));
                }
            }
        }
        for key in ["obstacles", "fence"] {
            if let Some(Value::Array(elements)) = fields.get(key) {
                if let Some(i) = elements.iter().position(|e| !e.is_object()) {
                    return Err(not_a_record(&format!("{key}[{i}]")));
                }
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}

impl ElementRecord {
    fn into_obstacle(self) -> Result<Obstacle, EnvironmentError> {
        let obstacle = Obstacle::new(self.position.into(), self.width, self.height)?;
        Ok(match self.image {
            Some(image) => obstacle.with_image(image),
            None => obstacle,
        })
    }

    fn into_waypoint(self) -> Result<Waypoint, EnvironmentError> {
        let waypoint = Waypoint::new(self.position.into(), self.width, self.height)?;
        Ok(match self.image {
            Some(image) => waypoint.with_image(image),
            None => waypoint,
        })
    }
}

impl TryFrom<SceneRecord> for Scene {
    type Error = SceneError;

    fn try_from(record: SceneRecord) -> Result<Self, Self::Error> {
        Ok(Scene {
            start: record
                .start
                .map(ElementRecord::into_waypoint)
                .transpose()
                .map_err(|e| malformed("start", e))?,
            goal: record
                .goal
                .map(ElementRecord::into_waypoint)
                .transpose()
                .map_err(|e| malformed("goal", e))?,
            obstacles: obstacles("obstacles", record.obstacles)?,
            fence: obstacles("fence", record.fence)?,
        })
    }
}

impl From<&Scene> for SceneRecord {
    fn from(scene: &Scene) -> Self {
        Self {
            start: scene.start.as_ref().map(ElementRecord::from),
            goal: scene.goal.as_ref().map(ElementRecord::from),
            obstacles: scene.obstacles.iter().map(ElementRecord::from).collect(),
            fence: scene.fence.iter().map(ElementRecord::from).collect(),
        }
    }
}

impl From<&Obstacle> for ElementRecord {
    fn from(obstacle: &Obstacle) -> Self {
        Self {
            position: obstacle.position().into(),
            width: obstacle.width(),
            height: obstacle.height(),
            image: obstacle.image().map(str::to_owned),
        }
    }
}

impl From<&Waypoint> for ElementRecord {
    fn from(waypoint: &Waypoint) -> Self {
        Self {
            position: waypoint.position().into(),
            width: waypoint.width(),
            height: waypoint.height(),
            image: waypoint.image().map(str::to_owned),
        }
    }
}

fn obstacles(field: &str, records: Vec<ElementRecord>) -> Result<Vec<Obstacle>, SceneError> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            r.into_obstacle()
                .map_err(|e| malformed(&format!("{field}[{i}]"), e))
        })
        .collect()
}

fn not_a_record(location: &str) -> SceneError {
    SceneError::MalformedSource(format!("{location}: expected a record"))
}

fn malformed(location: &str, error: EnvironmentError) -> SceneError {
    SceneError::MalformedSource(format!("{location}: {error}"))
}
