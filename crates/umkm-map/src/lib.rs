//! Single-marker map view for a business location.
//!
//! [`MapMarkerWidget`] owns at most one live map instance on a mount point,
//! attached through a [`MapBackend`]. Changing the marker's coordinates or
//! label detaches the old instance before a new one is attached; dropping the
//! widget detaches whatever is live.

pub mod backend;
pub mod error;
pub mod projection;
pub mod style;
pub mod widget;

pub use backend::{HeadlessBackend, MapBackend, MapHandle, MapSpec, MarkerSpec, PopupContent};
pub use error::MapError;
pub use projection::{from_lon_lat, resolution_for_zoom, Pixel, ProjectedPoint, Viewport};
pub use style::{MarkerIcon, OverlayPositioning, OverlaySpec, TileSource};
pub use widget::{MapMarkerWidget, MarkerViewState, WidgetState, DEFAULT_ZOOM};
