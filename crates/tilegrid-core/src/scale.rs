//! Screen-to-grid mapping along one axis.

use log::trace;

/// Maps screen pixels along one axis onto grid cells of a fixed size.
///
/// The screen is divided into `grid_count` whole cells; the leftover pixels
/// ("redemption") are split evenly so the grid is centred. The outermost grid
/// lines are pinned to the screen edges, so the first and last cells absorb
/// the leftover.
///
/// # Examples
///
/// ```
/// # use tilegrid_core::scale::GridScale;
/// let scale = GridScale::new(16, 100);
/// assert_eq!(scale.grid_count(), 6);
/// assert_eq!(scale.grid_to_screen(0), 0);
/// assert_eq!(scale.grid_to_screen(1), 18);
/// assert_eq!(scale.grid_to_screen(6), 100);
/// assert_eq!(scale.screen_to_grid(40), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridScale {
    grid_size: i32,
    screen_size: i32,
    grid_count: i32,
    redemption: i32,
}

impl Default for GridScale {
    fn default() -> Self {
        Self::new(32, 128)
    }
}

impl GridScale {
    /// Creates a scale; sizes below one are raised to one.
    pub fn new(grid_size: i32, screen_size: i32) -> Self {
        let mut scale = Self {
            grid_size: grid_size.max(1),
            screen_size: screen_size.max(1),
            grid_count: 0,
            redemption: 0,
        };
        scale.compute();
        scale
    }

    /// Size of a single grid cell in pixels
    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    /// Sets the cell size; values below one are raised to one.
    pub fn set_grid_size(&mut self, value: i32) {
        let value = value.max(1);
        if self.grid_size != value {
            self.grid_size = value;
            self.compute();
        }
    }

    /// Screen length of the axis in pixels
    pub fn screen_size(&self) -> i32 {
        self.screen_size
    }

    /// Sets the screen length; values below one are raised to one.
    pub fn set_screen_size(&mut self, value: i32) {
        let value = value.max(1);
        if self.screen_size != value {
            self.screen_size = value;
            self.compute();
        }
    }

    /// Number of whole grid cells that fit on the screen
    pub fn grid_count(&self) -> i32 {
        self.grid_count
    }

    /// Returns the screen position of grid line `grid`.
    pub fn grid_to_screen(&self, grid: i32) -> i32 {
        if grid == 0 {
            0
        } else if grid == self.grid_count {
            self.screen_size
        } else {
            self.redemption
                .saturating_add(grid.saturating_mul(self.grid_size))
        }
    }

    /// Returns the grid line nearest to a screen position.
    pub fn screen_to_grid(&self, screen: i32) -> i32 {
        let cells = f64::from(screen - self.redemption) / f64::from(self.grid_size);
        cells.round() as i32
    }

    /// Snaps a screen position to the nearest grid line.
    pub fn round_screen(&self, screen: i32) -> i32 {
        self.grid_to_screen(self.screen_to_grid(screen))
    }

    fn compute(&mut self) {
        self.grid_count = self.screen_size / self.grid_size;
        self.redemption = self.screen_size % self.grid_size / 2;
        trace!(
            grid_size = self.grid_size,
            screen_size = self.screen_size,
            grid_count = self.grid_count;
            "Grid scale recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale() {
        let scale = GridScale::default();
        assert_eq!(scale.grid_size(), 32);
        assert_eq!(scale.screen_size(), 128);
        assert_eq!(scale.grid_count(), 4);
    }

    #[test]
    fn test_non_positive_sizes_are_raised() {
        let scale = GridScale::new(0, -10);
        assert_eq!(scale.grid_size(), 1);
        assert_eq!(scale.screen_size(), 1);
        assert_eq!(scale.grid_count(), 1);
    }

    #[test]
    fn test_edges_are_pinned() {
        let scale = GridScale::new(16, 250);
        assert_eq!(scale.grid_count(), 15);
        assert_eq!(scale.grid_to_screen(0), 0);
        assert_eq!(scale.grid_to_screen(15), 250);
        // 250 % 16 = 10, so interior lines are shifted by 5 pixels
        assert_eq!(scale.grid_to_screen(1), 21);
        assert_eq!(scale.grid_to_screen(14), 229);
    }

    #[test]
    fn test_screen_to_grid_rounds_to_nearest_line() {
        let scale = GridScale::new(16, 160);
        assert_eq!(scale.screen_to_grid(0), 0);
        assert_eq!(scale.screen_to_grid(7), 0);
        assert_eq!(scale.screen_to_grid(8), 1);
        assert_eq!(scale.screen_to_grid(-8), -1);
        assert_eq!(scale.round_screen(30), 32);
    }

    #[test]
    fn test_setters_recompute() {
        let mut scale = GridScale::new(16, 160);
        scale.set_screen_size(320);
        assert_eq!(scale.grid_count(), 20);
        scale.set_grid_size(32);
        assert_eq!(scale.grid_count(), 10);
    }
}
