//! Occupancy grid sampled on the environment's grid lattice.

use std::fmt;

use super::{Environment, EnvironmentError, Position};

/// Upper bound on the number of cells of a single grid.
pub const MAX_CELLS: u64 = 1 << 24;

#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyGrid {
    columns: u32,
    rows: u32,
    /// Row-major, starting at the bottom row (y = 0).
    blocked: Vec<bool>,
    start: Option<(u32, u32)>,
    goal: Option<(u32, u32)>,
}

impl OccupancyGrid {
    /// Samples `environment` at every cell centre. Centres of the partial cells along the far
    /// edges are clamped to the park bounds. Fails if the grid would exceed [`MAX_CELLS`].
    pub fn new(environment: &Environment, robot_radius: f64) -> Result<Self, EnvironmentError> {
        let grid_size = f64::from(environment.grid_size());
        let width = f64::from(environment.width());
        let height = f64::from(environment.height());
        let columns = environment.width().div_ceil(environment.grid_size());
        let rows = environment.height().div_ceil(environment.grid_size());
        let cells = u64::from(columns) * u64::from(rows);
        if cells > MAX_CELLS {
            return Err(EnvironmentError::InvalidConfiguration(format!(
                "a {columns} x {rows} occupancy grid exceeds {MAX_CELLS} cells"
            )));
        }

        let blocked = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| (column, row)))
            .map(|(column, row)| {
                let x = ((f64::from(column) + 0.5) * grid_size).min(width);
                let y = ((f64::from(row) + 0.5) * grid_size).min(height);
                !environment.is_free(x, y, robot_radius)
            })
            .collect();

        let mut grid = Self {
            columns,
            rows,
            blocked,
            start: None,
            goal: None,
        };
        grid.start = environment
            .start()
            .and_then(|w| grid.cell_of(w.position(), grid_size));
        grid.goal = environment
            .goal()
            .and_then(|w| grid.cell_of(w.position(), grid_size));
        Ok(grid)
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// `None` if the cell lies outside the grid.
    pub fn is_blocked(&self, column: u32, row: u32) -> Option<bool> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.blocked
            .get(row as usize * self.columns as usize + column as usize)
            .copied()
    }

    pub fn free_cells(&self) -> usize {
        self.blocked.iter().filter(|b| !**b).count()
    }

    pub fn start(&self) -> Option<(u32, u32)> {
        self.start
    }

    pub fn goal(&self) -> Option<(u32, u32)> {
        self.goal
    }

    fn cell_of(&self, position: Position, grid_size: f64) -> Option<(u32, u32)> {
        if !position.is_finite() {
            return None;
        }
        let index = |value: f64, count: u32| {
            ((value / grid_size).floor().max(0.0) as u32).min(count.saturating_sub(1))
        };
        Some((
            index(position.x(), self.columns),
            index(position.y(), self.rows),
        ))
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for column in 0..self.columns {
                let symbol = if self.start == Some((column, row)) {
                    'S'
                } else if self.goal == Some((column, row)) {
                    'G'
                } else if self.is_blocked(column, row) == Some(true) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{symbol}")?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
