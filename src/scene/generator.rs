//! Random park scenes.
//!
//! The park is enclosed by a fence of square blocks. The start sits in the lower left corner
//! just inside the fence, the goal in the upper right corner, and the interior is scattered with
//! obstacles that never cover either of them. The same seed always yields the same scene.

use rand::{
    distr::{uniform, Distribution, Uniform},
    SeedableRng,
};
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use super::Scene;
use crate::domain::{EnvironmentError, Footprint, HasFootprint, Obstacle, Position, Waypoint};

const PLACEMENT_ATTEMPTS_PER_OBSTACLE: usize = 20;

/// Upper bound on the number of blocks making up the fence.
pub const MAX_FENCE_BLOCKS: f64 = 100_000.0;

#[derive(Clone, Debug)]
pub struct SceneGenerator {
    width: f64,
    height: f64,
    block: f64,
    obstacle_count: usize,
    obstacle_size: Uniform<f64>,
    placement: Uniform<f64>,
}

impl SceneGenerator {
    pub fn new(
        width: u32,
        height: u32,
        block: f64,
        obstacle_count: usize,
    ) -> Result<Self, EnvironmentError> {
        if !block.is_finite() || block <= 0.0 {
            return Err(EnvironmentError::InvalidConfiguration(format!(
                "block size {block} must be positive"
            )));
        }

        let (width, height) = (f64::from(width), f64::from(height));
        if width < 4.0 * block || height < 4.0 * block {
            return Err(EnvironmentError::InvalidConfiguration(format!(
                "a {width} x {height} park is too small for a fence of {block} blocks"
            )));
        }
        let fence_blocks =
            2.0 * (width / block).ceil() + 2.0 * ((height - 2.0 * block) / block).ceil();
        if fence_blocks > MAX_FENCE_BLOCKS {
            return Err(EnvironmentError::InvalidConfiguration(format!(
                "a fence of {block} blocks around a {width} x {height} park needs {fence_blocks} \
                 blocks, more than {MAX_FENCE_BLOCKS}"
            )));
        }

        Ok(Self {
            width,
            height,
            block,
            obstacle_count,
            obstacle_size: Uniform::try_from(0.5 * block..=2.0 * block).map_err(invalid)?,
            placement: Uniform::try_from(0.0..=1.0).map_err(invalid)?,
        })
    }

    pub fn generate(&self, seed: u64) -> Result<Scene, EnvironmentError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let start = Waypoint::new(Position::new(self.block, self.block), self.block, self.block)?;
        let goal = Waypoint::new(
            Position::new(self.width - 2.0 * self.block, self.height - 2.0 * self.block),
            self.block,
            self.block,
        )?;
        let keep_clear = [start.footprint(), goal.footprint()];
        let (low, high) = (self.interior().min(), self.interior().max());

        let mut obstacles = vec![];
        for _ in 0..self.obstacle_count * PLACEMENT_ATTEMPTS_PER_OBSTACLE {
            if obstacles.len() == self.obstacle_count {
                break;
            }
            let width = self.obstacle_size.sample(&mut rng);
            let height = self.obstacle_size.sample(&mut rng);
            let x_slack = high.x() - low.x() - width;
            let y_slack = high.y() - low.y() - height;
            let position = Position::new(
                low.x() + self.placement.sample(&mut rng) * x_slack,
                low.y() + self.placement.sample(&mut rng) * y_slack,
            );
            let obstacle = Obstacle::new(position, width, height)?;
            let footprint = obstacle.footprint();
            if keep_clear.iter().any(|f| f.intersects(&footprint)) {
                continue;
            }
            obstacles.push(obstacle);
        }

        if obstacles.len() < self.obstacle_count {
            warn!(
                placed = obstacles.len(),
                requested = self.obstacle_count,
                seed,
                "could not place all obstacles"
            );
        }

        Ok(Scene {
            start: Some(start),
            goal: Some(goal),
            obstacles,
            fence: self.fence()?,
        })
    }

    /// Blocks along the bottom and top edges, then along the left and right edges between them.
    /// The last block of a row is cut to fit the park.
    fn fence(&self) -> Result<Vec<Obstacle>, EnvironmentError> {
        let block = self.block;
        let mut fence = vec![];

        for (x, length) in steps(0.0, self.width, block) {
            fence.push(Obstacle::new(Position::new(x, 0.0), length, block)?);
            fence.push(Obstacle::new(
                Position::new(x, self.height - block),
                length,
                block,
            )?);
        }
        for (y, length) in steps(block, self.height - block, block) {
            fence.push(Obstacle::new(Position::new(0.0, y), block, length)?);
            fence.push(Obstacle::new(
                Position::new(self.width - block, y),
                block,
                length,
            )?);
        }

        Ok(fence)
    }

    /// Footprint of the park interior inside the fence.
    pub fn interior(&self) -> Footprint {
        Footprint::new(
            Position::new(self.block, self.block),
            self.width - 2.0 * self.block,
            self.height - 2.0 * self.block,
        )
    }
}

fn steps(from: f64, to: f64, step: f64) -> impl Iterator<Item = (f64, f64)> {
    (0u32..)
        .map(move |i| from + f64::from(i) * step)
        .take_while(move |x| *x < to)
        .map(move |x| (x, step.min(to - x)))
}

fn invalid(error: uniform::Error) -> EnvironmentError {
    EnvironmentError::InvalidConfiguration(error.to_string())
}
