//! Bounded 2D park environment for path planners.
//!
//! A park is a `width` x `height` rectangle holding rectangular obstacles (a perimeter fence
//! included), a start and a goal. Scenes are loaded from JSON descriptions and merged into an
//! [`Environment`](domain::Environment), which answers whether a robot of a given radius fits at
//! a point.

#[cfg(test)]
mod tests;

pub mod config;
pub mod domain;
pub mod scene;
