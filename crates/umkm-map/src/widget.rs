use serde::Serialize;
use umkm_core::BusinessRecord;

use crate::backend::{MapBackend, MapHandle, MapSpec, MarkerSpec, PopupContent};
use crate::error::MapError;
use crate::projection::{from_lon_lat, pixel_of, Pixel, Viewport};
use crate::style::{MarkerIcon, OverlaySpec, TileSource};

pub const DEFAULT_ZOOM: u8 = 16;

/// Inputs of the map view: where the marker goes and what its popup says.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl MarkerViewState {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, label: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            label: label.into(),
        }
    }

    /// Marker for a business, labelled with its name. `None` when the record
    /// has no location.
    #[must_use]
    pub fn for_record(record: &BusinessRecord) -> Option<Self> {
        record
            .location
            .map(|loc| Self::new(loc.latitude, loc.longitude, record.name.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Uninitialized,
    Mounted,
    Destroyed,
}

#[derive(Debug)]
struct Mounted {
    handle: MapHandle,
    props: MarkerViewState,
    spec: MapSpec,
    popup: Option<PopupContent>,
}

#[derive(Debug)]
enum Phase {
    Uninitialized,
    Mounted(Mounted),
    Destroyed,
}

/// Owns the single live map on one mount point.
///
/// Acquisition happens in [`mount`](Self::mount); release happens on
/// remount, [`unmount`](Self::unmount) and drop. A previous instance is always
/// detached before the next one is attached.
#[derive(Debug)]
pub struct MapMarkerWidget<B: MapBackend> {
    backend: B,
    mount_point: String,
    viewport: Viewport,
    zoom: u8,
    tiles: TileSource,
    icon: MarkerIcon,
    overlay: OverlaySpec,
    phase: Phase,
}

impl<B: MapBackend> MapMarkerWidget<B> {
    #[must_use]
    pub fn new(backend: B, mount_point: impl Into<String>) -> Self {
        Self {
            backend,
            mount_point: mount_point.into(),
            viewport: Viewport::default(),
            zoom: DEFAULT_ZOOM,
            tiles: TileSource::default(),
            icon: MarkerIcon::default(),
            overlay: OverlaySpec::default(),
            phase: Phase::Uninitialized,
        }
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn state(&self) -> WidgetState {
        match self.phase {
            Phase::Uninitialized => WidgetState::Uninitialized,
            Phase::Mounted(_) => WidgetState::Mounted,
            Phase::Destroyed => WidgetState::Destroyed,
        }
    }

    #[must_use]
    pub fn props(&self) -> Option<&MarkerViewState> {
        match &self.phase {
            Phase::Mounted(mounted) => Some(&mounted.props),
            _ => None,
        }
    }

    #[must_use]
    pub fn spec(&self) -> Option<&MapSpec> {
        match &self.phase {
            Phase::Mounted(mounted) => Some(&mounted.spec),
            _ => None,
        }
    }

    #[must_use]
    pub fn popup(&self) -> Option<&PopupContent> {
        match &self.phase {
            Phase::Mounted(mounted) => mounted.popup.as_ref(),
            _ => None,
        }
    }

    /// Screen position of the marker's anchor in the current view.
    #[must_use]
    pub fn marker_pixel(&self) -> Option<Pixel> {
        self.spec()
            .map(|spec| pixel_of(spec.marker.position, spec.center, spec.zoom, self.viewport))
    }

    /// Build a fresh map for `props`, detaching any live one first.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`MapError`] when attaching fails. The widget is
    /// then `Destroyed` and holds no map.
    pub fn mount(&mut self, props: MarkerViewState) -> Result<(), MapError> {
        self.teardown();

        let spec = self.build_spec(&props);
        match self.backend.attach(&spec) {
            Ok(handle) => {
                tracing::debug!(
                    mount_point = %self.mount_point,
                    handle = handle.0,
                    label = %props.label,
                    "map attached"
                );
                self.phase = Phase::Mounted(Mounted {
                    handle,
                    props,
                    spec,
                    popup: None,
                });
                Ok(())
            }
            Err(error) => {
                tracing::error!(mount_point = %self.mount_point, error = %error, "map attach failed");
                Err(error)
            }
        }
    }

    /// Apply new props. Identical props keep the live map; anything else
    /// remounts.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`MapError`] when the remount fails.
    pub fn set_props(&mut self, props: MarkerViewState) -> Result<(), MapError> {
        if self.props() == Some(&props) {
            return Ok(());
        }
        self.mount(props)
    }

    /// Handle a single click at `at`. Reveals the popup and returns `true`
    /// when the click hits the marker.
    pub fn click(&mut self, at: Pixel) -> bool {
        let Some(anchor) = self.marker_pixel() else {
            return false;
        };
        if !self.icon.hit(anchor, at) {
            return false;
        }
        let Phase::Mounted(mounted) = &mut self.phase else {
            return false;
        };

        let popup = PopupContent {
            position: mounted.spec.marker.position,
            text: mounted.props.label.clone(),
            overlay: mounted.spec.popup,
        };
        self.backend.show_popup(mounted.handle, &popup);
        mounted.popup = Some(popup);
        true
    }

    /// Detach the live map, if any, and enter `Destroyed`.
    pub fn unmount(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Phase::Mounted(mounted) = std::mem::replace(&mut self.phase, Phase::Destroyed) {
            self.backend.detach(mounted.handle);
            tracing::debug!(
                mount_point = %self.mount_point,
                handle = mounted.handle.0,
                "map detached"
            );
        }
    }

    fn build_spec(&self, props: &MarkerViewState) -> MapSpec {
        let position = from_lon_lat(props.longitude, props.latitude);
        MapSpec {
            mount_point: self.mount_point.clone(),
            center: position,
            zoom: self.zoom,
            tiles: self.tiles.clone(),
            marker: MarkerSpec {
                position,
                icon: self.icon.clone(),
                label: props.label.clone(),
            },
            popup: self.overlay,
        }
    }
}

impl<B: MapBackend> Drop for MapMarkerWidget<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;
