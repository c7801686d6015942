//! Collision detection based on axis-aligned footprints.

use nalgebra::{Point2, Vector2};

use super::Position;

/// Anything occupying a rectangular region of the park.
pub trait HasFootprint {
    fn footprint(&self) -> Footprint;

    /// Whether `position` lies within the footprint inflated by `robot_radius`.
    fn blocks(&self, position: Position, robot_radius: f64) -> bool {
        self.footprint().inflated(robot_radius).contains(position)
    }
}

/// Axis-aligned rectangle `[min.x, max.x] x [min.y, max.y]`, closed on every side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    min: Point2<f64>,
    max: Point2<f64>,
}

impl Footprint {
    /// Footprint spanning from `corner` to `corner + (width, height)`.
    pub fn new(corner: Position, width: f64, height: f64) -> Self {
        let min = Point2::from(corner);
        Self {
            min,
            max: min + Vector2::new(width, height),
        }
    }

    pub fn min(&self) -> Position {
        self.min.into()
    }

    pub fn max(&self) -> Position {
        self.max.into()
    }

    /// Minkowski sum with a square of half-width `radius`: every edge moves outwards by
    /// `radius`.
    pub fn inflated(&self, radius: f64) -> Self {
        let margin = Vector2::repeat(radius);
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        let p = Point2::from(position);
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    pub fn intersects(&self, other: &Footprint) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}
