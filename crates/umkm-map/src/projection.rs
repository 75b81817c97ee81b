//! Spherical Web Mercator (EPSG:3857) helpers.
//!
//! Matches the transform tile-based web maps use: longitude maps linearly to
//! `x`, latitude through the Mercator log-tan to `y`, both in meters on a
//! sphere of radius [`EARTH_RADIUS_M`]. `y` is clamped to the square world
//! extent. Inputs are not validated; a latitude past the poles yields NaN.

use std::f64::consts::PI;

use serde::Serialize;

pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Half the width of the projected world square, in meters.
pub const HALF_WORLD_M: f64 = PI * EARTH_RADIUS_M;

/// Tile edge in pixels used to derive zoom-level resolutions.
const TILE_SIZE_PX: f64 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

/// Screen position in CSS pixels, origin at the viewport's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pixel {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    /// 800×400, the detail page's map box.
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
        }
    }
}

/// Project a WGS84 longitude/latitude pair to Web Mercator meters.
#[must_use]
pub fn from_lon_lat(longitude: f64, latitude: f64) -> ProjectedPoint {
    let x = EARTH_RADIUS_M * longitude.to_radians();
    let mut y = EARTH_RADIUS_M * (PI * (latitude + 90.0) / 360.0).tan().ln();
    if y > HALF_WORLD_M {
        y = HALF_WORLD_M;
    } else if y < -HALF_WORLD_M {
        y = -HALF_WORLD_M;
    }
    ProjectedPoint { x, y }
}

/// Meters per pixel at `zoom`, zoom 0 fitting the world in one tile.
#[must_use]
pub fn resolution_for_zoom(zoom: u8) -> f64 {
    let max_resolution = 2.0 * HALF_WORLD_M / TILE_SIZE_PX;
    max_resolution / 2f64.powi(i32::from(zoom))
}

/// Pixel position of `point` in a viewport centered on `center`.
#[must_use]
pub fn pixel_of(point: ProjectedPoint, center: ProjectedPoint, zoom: u8, viewport: Viewport) -> Pixel {
    let resolution = resolution_for_zoom(zoom);
    Pixel {
        x: viewport.width / 2.0 + (point.x - center.x) / resolution,
        y: viewport.height / 2.0 - (point.y - center.y) / resolution,
    }
}
