//! Web-Mercator projection from coordinates to terminal cells.
//!
//! The world at zoom `z` is `256 * 2^z` pixels square. One terminal cell
//! covers [`CELL_WIDTH_PX`] x [`CELL_HEIGHT_PX`] world pixels, which keeps the
//! usual 1:2 aspect ratio of terminal glyphs.

use crate::domain::Coordinate;
use std::f64::consts::PI;

/// Side length of one map tile in pixels.
pub const TILE_SIZE_PX: f64 = 256.0;

/// World pixels covered by one terminal column.
pub const CELL_WIDTH_PX: f64 = 16.0;

/// World pixels covered by one terminal row.
pub const CELL_HEIGHT_PX: f64 = 32.0;

/// Latitude limit of the Web-Mercator projection.
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Size of the map canvas in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

/// Zero-based cell position inside a [`Viewport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

/// Projects a coordinate to world pixels at `zoom`.
#[must_use]
pub fn world_pixels(coordinate: Coordinate, zoom: u8) -> (f64, f64) {
    let scale = TILE_SIZE_PX * f64::from(2_u32.pow(u32::from(zoom)));
    let lat = coordinate.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();

    let x = (coordinate.lng + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
    (x, y)
}

/// Places `coordinate` on a viewport centered on `center`.
///
/// # Returns
///
/// `None` if the coordinate falls outside the viewport.
#[must_use]
pub fn project_to_cell(coordinate: Coordinate, center: Coordinate, zoom: u8, viewport: Viewport) -> Option<Cell> {
    let (px, py) = world_pixels(coordinate, zoom);
    let (cx, cy) = world_pixels(center, zoom);

    #[allow(clippy::cast_precision_loss)]
    let col = (px - cx) / CELL_WIDTH_PX + viewport.cols as f64 / 2.0;
    #[allow(clippy::cast_precision_loss)]
    let row = (py - cy) / CELL_HEIGHT_PX + viewport.rows as f64 / 2.0;

    let col = col.floor();
    let row = row.floor();

    #[allow(clippy::cast_precision_loss)]
    let inside = col >= 0.0 && row >= 0.0 && col < viewport.cols as f64 && row < viewport.rows as f64;
    if !inside {
        return None;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cell = Cell {
        row: row as usize,
        col: col as usize,
    };
    Some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport { rows: 20, cols: 60 };

    #[test]
    fn test_center_projects_to_middle_cell() {
        let center = Coordinate::new(40.7128, -74.0060);
        let cell = project_to_cell(center, center, 13, VIEWPORT).unwrap();
        assert_eq!(cell, Cell { row: 10, col: 30 });
    }

    #[test]
    fn test_north_east_is_up_and_right() {
        let center = Coordinate::new(40.7128, -74.0060);
        let north_east = Coordinate::new(40.7228, -73.9960);
        let cell = project_to_cell(north_east, center, 13, VIEWPORT).unwrap();
        assert!(cell.row < 10);
        assert!(cell.col > 30);
    }

    #[test]
    fn test_far_coordinate_is_outside() {
        let center = Coordinate::new(40.7128, -74.0060);
        let london = Coordinate::new(51.5074, -0.1278);
        assert!(project_to_cell(london, center, 13, VIEWPORT).is_none());
    }

    #[test]
    fn test_higher_zoom_spreads_points_apart() {
        let center = Coordinate::new(40.7128, -74.0060);
        let east = Coordinate::new(40.7128, -73.9990);

        let low = project_to_cell(east, center, 12, VIEWPORT).unwrap();
        let high = project_to_cell(east, center, 14, VIEWPORT).unwrap();
        assert!(high.col > low.col);
    }

    #[test]
    fn test_equator_and_prime_meridian_at_world_center() {
        let (x, y) = world_pixels(Coordinate::new(0.0, 0.0), 0);
        assert!((x - 128.0).abs() < 1e-9);
        assert!((y - 128.0).abs() < 1e-9);
    }
}
