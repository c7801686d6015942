//! The domain module encapsulates the park model. It defines the `Environment` together with its
//! `Obstacle`s and `Waypoint`s, and the collision rules used to answer free-space queries.
//!
//! The module does not know how scenes are encoded or how the park is drawn; loaders and
//! renderers work against its public interface.

mod basis;
mod collision;
mod environment;
mod grid;

pub use basis::Position;
pub use collision::{Footprint, HasFootprint};
pub use environment::{Environment, EnvironmentError, Obstacle, Waypoint};
pub use grid::{OccupancyGrid, MAX_CELLS};
