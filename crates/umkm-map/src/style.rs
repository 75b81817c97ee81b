use serde::Serialize;

use crate::projection::Pixel;

pub const DEFAULT_MARKER_ICON_URL: &str = "https://cdn-icons-png.flaticon.com/512/684/684908.png";

/// Edge length of the source marker image, in pixels.
pub const MARKER_ICON_SOURCE_PX: f64 = 512.0;

pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TileSource {
    /// Standard OpenStreetMap raster tiles.
    Osm { url_template: String },
}

impl Default for TileSource {
    fn default() -> Self {
        TileSource::Osm {
            url_template: OSM_TILE_URL.to_string(),
        }
    }
}

/// Image drawn at the marker position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerIcon {
    pub src: String,
    pub scale: f64,
    /// Fraction of the rendered icon's width and height that sits on the
    /// coordinate. `(0.5, 1.0)` puts the pin's tip on the point.
    pub anchor: (f64, f64),
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            src: DEFAULT_MARKER_ICON_URL.to_string(),
            scale: 0.05,
            anchor: (0.5, 1.0),
        }
    }
}

impl MarkerIcon {
    /// Rendered edge length in pixels.
    #[must_use]
    pub fn rendered_size(&self) -> f64 {
        MARKER_ICON_SOURCE_PX * self.scale
    }

    /// Whether `click` lands on the icon when its anchor is drawn at `at`.
    #[must_use]
    pub fn hit(&self, at: Pixel, click: Pixel) -> bool {
        let size = self.rendered_size();
        let left = at.x - self.anchor.0 * size;
        let top = at.y - self.anchor.1 * size;
        (left..=left + size).contains(&click.x) && (top..=top + size).contains(&click.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayPositioning {
    BottomCenter,
    TopLeft,
}

/// Placement of the popup relative to the map position it is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlaySpec {
    pub positioning: OverlayPositioning,
    /// Pixel offset applied after positioning; negative `y` lifts it up.
    pub offset: (f64, f64),
    /// Whether pointer events on the popup are kept from reaching the map.
    pub stop_event: bool,
}

impl Default for OverlaySpec {
    fn default() -> Self {
        Self {
            positioning: OverlayPositioning::BottomCenter,
            offset: (0.0, -20.0),
            stop_event: false,
        }
    }
}
