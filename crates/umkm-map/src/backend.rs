use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;

use crate::error::MapError;
use crate::projection::ProjectedPoint;
use crate::style::{MarkerIcon, OverlaySpec, TileSource};

/// Opaque id of one attached map instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MapHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub position: ProjectedPoint,
    pub icon: MarkerIcon,
    pub label: String,
}

/// Everything a backend needs to build one map: view, base layer, the
/// marker layer and the (initially hidden) popup overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSpec {
    pub mount_point: String,
    pub center: ProjectedPoint,
    pub zoom: u8,
    pub tiles: TileSource,
    pub marker: MarkerSpec,
    pub popup: OverlaySpec,
}

/// Popup shown after a marker click. `text` is plain text, never markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupContent {
    pub position: ProjectedPoint,
    pub text: String,
    pub overlay: OverlaySpec,
}

/// Rendering surface a [`crate::MapMarkerWidget`] drives.
pub trait MapBackend {
    /// Build a map per `spec` and bind it to `spec.mount_point`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] when the mount point is missing or already hosts a
    /// live map.
    fn attach(&mut self, spec: &MapSpec) -> Result<MapHandle, MapError>;

    /// Release the map and unbind it from its mount point. Must not fail.
    fn detach(&mut self, handle: MapHandle);

    /// Reveal the popup overlay of a live map.
    fn show_popup(&mut self, handle: MapHandle, popup: &PopupContent);
}

#[derive(Debug)]
struct LiveMap {
    handle: MapHandle,
    spec: MapSpec,
    popup: Option<PopupContent>,
}

#[derive(Debug, Default)]
struct Surfaces {
    next_handle: u64,
    mount_points: BTreeMap<String, Option<LiveMap>>,
    attached: usize,
    detached: usize,
}

impl Surfaces {
    fn live_mut(&mut self, handle: MapHandle) -> Option<&mut Option<LiveMap>> {
        self.mount_points
            .values_mut()
            .find(|slot| slot.as_ref().is_some_and(|live| live.handle == handle))
    }
}

/// In-memory backend with named mount points.
///
/// Clones share the same surfaces, so a test or host can keep a clone to
/// inspect what the widget attached.
#[derive(Debug, Clone, Default)]
pub struct HeadlessBackend {
    surfaces: Rc<RefCell<Surfaces>>,
}

impl HeadlessBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mount_point(self, name: &str) -> Self {
        self.add_mount_point(name);
        self
    }

    pub fn add_mount_point(&self, name: &str) {
        self.surfaces
            .borrow_mut()
            .mount_points
            .entry(name.to_owned())
            .or_insert(None);
    }

    /// Number of maps currently attached across all mount points.
    #[must_use]
    pub fn live_instances(&self) -> usize {
        self.surfaces
            .borrow()
            .mount_points
            .values()
            .filter(|slot| slot.is_some())
            .count()
    }

    #[must_use]
    pub fn live_spec(&self, mount_point: &str) -> Option<MapSpec> {
        self.surfaces
            .borrow()
            .mount_points
            .get(mount_point)
            .and_then(Option::as_ref)
            .map(|live| live.spec.clone())
    }

    #[must_use]
    pub fn live_handle(&self, mount_point: &str) -> Option<MapHandle> {
        self.surfaces
            .borrow()
            .mount_points
            .get(mount_point)
            .and_then(Option::as_ref)
            .map(|live| live.handle)
    }

    #[must_use]
    pub fn popup(&self, mount_point: &str) -> Option<PopupContent> {
        self.surfaces
            .borrow()
            .mount_points
            .get(mount_point)
            .and_then(Option::as_ref)
            .and_then(|live| live.popup.clone())
    }

    /// Total attach and detach calls served, in that order.
    #[must_use]
    pub fn lifecycle_counts(&self) -> (usize, usize) {
        let surfaces = self.surfaces.borrow();
        (surfaces.attached, surfaces.detached)
    }
}

impl MapBackend for HeadlessBackend {
    fn attach(&mut self, spec: &MapSpec) -> Result<MapHandle, MapError> {
        let mut surfaces = self.surfaces.borrow_mut();
        let handle = MapHandle(surfaces.next_handle);

        let slot = surfaces
            .mount_points
            .get_mut(&spec.mount_point)
            .ok_or_else(|| MapError::MissingMountPoint(spec.mount_point.clone()))?;
        if slot.is_some() {
            return Err(MapError::MountPointBusy(spec.mount_point.clone()));
        }
        *slot = Some(LiveMap {
            handle,
            spec: spec.clone(),
            popup: None,
        });

        surfaces.next_handle += 1;
        surfaces.attached += 1;
        Ok(handle)
    }

    fn detach(&mut self, handle: MapHandle) {
        let mut surfaces = self.surfaces.borrow_mut();
        match surfaces.live_mut(handle) {
            Some(slot) => {
                *slot = None;
                surfaces.detached += 1;
            }
            None => tracing::warn!(handle = handle.0, "detach for unknown map handle"),
        }
    }

    fn show_popup(&mut self, handle: MapHandle, popup: &PopupContent) {
        let mut surfaces = self.surfaces.borrow_mut();
        if let Some(Some(live)) = surfaces.live_mut(handle) {
            live.popup = Some(popup.clone());
        }
    }
}
