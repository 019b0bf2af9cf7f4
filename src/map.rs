//! An occupancy grid built up from radar returns.

use crate::math::{heading_vector, Point2d};
use crate::radar::Detection;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The side length of a cell when none is given.
const DEFAULT_RESOLUTION: f64 = 5.0;

/// How much a single radar return raises a cell's occupancy.
const HIT_WEIGHT: f64 = 0.2;

/// A grid of occupancy estimates in `[0, 1]` covering the area from the origin
/// to `(width, height)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OccupancyMap {
    /// The side length of each square cell.
    resolution: f64,
    /// The number of cells along the x-axis.
    grid_width: usize,
    /// The number of cells along the y-axis.
    grid_height: usize,
    /// Row-major cell values.
    cells: Vec<f64>,
}

impl OccupancyMap {
    /// Creates an empty map.
    ///
    /// # Parameters
    /// * `width` - The extent of the mapped area along the x-axis
    /// * `height` - The extent of the mapped area along the y-axis
    /// * `resolution` - The side length of each cell; non-positive values fall back to the default
    ///
    /// Partial cells at the far edges are not mapped.
    pub fn new(width: f64, height: f64, resolution: f64) -> Self {
        let resolution = if resolution.is_finite() && resolution > 0.0 {
            resolution
        } else {
            DEFAULT_RESOLUTION
        };
        let cells_along = |extent: f64| {
            if extent.is_finite() && extent > 0.0 {
                (extent / resolution).floor() as usize
            } else {
                0
            }
        };
        let grid_width = cells_along(width);
        let grid_height = cells_along(height);
        Self {
            resolution,
            grid_width,
            grid_height,
            cells: vec![0.0; grid_width * grid_height],
        }
    }

    /// The side length of each cell.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// The number of cells along the x-axis.
    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    /// The number of cells along the y-axis.
    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    /// The occupancy of the cell at column `x`, row `y`, or `None` outside the grid.
    pub fn cell(&self, x: usize, y: usize) -> Option<f64> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// The grid coordinates of the cell containing a world space point.
    pub fn cell_at(&self, point: Point2d) -> Option<(usize, usize)> {
        let x = (point.x / self.resolution).floor();
        let y = (point.y / self.resolution).floor();
        if x >= 0.0 && y >= 0.0 && x < self.grid_width as f64 && y < self.grid_height as f64 {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }

    /// Marks the cells hit by a radar sweep.
    ///
    /// Each detection is placed in world space relative to the vehicle's
    /// position and heading at the time of the sweep. The containing cell gains
    /// a fixed weight, saturating at 1. Hits outside the grid are dropped.
    pub fn update(&mut self, pos: Point2d, heading: f64, detections: &[Detection]) {
        for detection in detections {
            let hit = pos + detection.distance * heading_vector(heading + detection.bearing);
            if let Some(idx) = self.cell_at(hit).and_then(|(x, y)| self.index(x, y)) {
                self.cells[idx] = f64::min(self.cells[idx] + HIT_WEIGHT, 1.0);
            }
        }
    }

    /// Resets every cell to unoccupied.
    pub fn clear(&mut self) {
        self.cells.fill(0.0);
    }

    /// Returns an iterator over the grid coordinates and values of all non-empty cells.
    pub fn iter_occupied(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, value)| **value > 0.0)
            .map(move |(idx, value)| ((idx % self.grid_width, idx / self.grid_width), *value))
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.grid_width && y < self.grid_height).then(|| y * self.grid_width + x)
    }
}
