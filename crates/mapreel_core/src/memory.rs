//! In-memory rendering surface
//!
//! A complete [`RenderSurface`] that records every write instead of
//! rendering. Used for headless runs and by the whole test suite: after
//! a run, tests read back the final camera, paths, features, and
//! property values and assert on them.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::geometry::LngLat;
use crate::surface::{CameraState, CameraUpdate, RenderSurface};

#[derive(Debug, Default)]
pub struct MemorySurface {
    camera: CameraState,
    bearing: f64,
    paint: FxHashMap<(String, String), f64>,
    layout: FxHashMap<(String, String), f64>,
    paths: FxHashMap<String, Vec<LngLat>>,
    features: FxHashMap<String, Vec<LngLat>>,
    layers: Vec<String>,
    next_layer_seq: u64,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera(camera: CameraState) -> Self {
        Self {
            camera,
            ..Self::default()
        }
    }

    /// The recorded path for a source, empty if never written.
    pub fn path(&self, source: &str) -> &[LngLat] {
        self.paths.get(source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The recorded point features for a collection.
    pub fn feature_points(&self, collection: &str) -> &[LngLat] {
        self.features
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids of transient layers that are currently alive.
    pub fn live_layers(&self) -> &[String] {
        &self.layers
    }
}

impl RenderSurface for MemorySurface {
    fn camera(&self) -> CameraState {
        self.camera
    }

    fn apply_camera(&mut self, update: &CameraUpdate) {
        if let Some(center) = update.center {
            self.camera.center = center;
        }
        if let Some(zoom) = update.zoom {
            self.camera.zoom = zoom;
        }
        if let Some(pitch) = update.pitch {
            self.camera.pitch = pitch;
        }
    }

    fn bearing(&self) -> f64 {
        self.bearing
    }

    fn set_bearing(&mut self, degrees: f64) {
        self.bearing = degrees;
    }

    fn paint_property(&self, layer: &str, prop: &str) -> Option<f64> {
        self.paint.get(&(layer.to_owned(), prop.to_owned())).copied()
    }

    fn set_paint_property(&mut self, layer: &str, prop: &str, value: f64) {
        self.paint
            .insert((layer.to_owned(), prop.to_owned()), value);
    }

    fn layout_property(&self, layer: &str, prop: &str) -> Option<f64> {
        self.layout
            .get(&(layer.to_owned(), prop.to_owned()))
            .copied()
    }

    fn set_layout_property(&mut self, layer: &str, prop: &str, value: f64) {
        self.layout
            .insert((layer.to_owned(), prop.to_owned()), value);
    }

    fn append_path_point(&mut self, source: &str, point: LngLat) {
        self.paths.entry(source.to_owned()).or_default().push(point);
    }

    fn replace_path_points(&mut self, source: &str, points: &[LngLat]) {
        self.paths.insert(source.to_owned(), points.to_vec());
    }

    fn truncate_path_front(&mut self, source: &str) -> usize {
        match self.paths.get_mut(source) {
            Some(points) => {
                if !points.is_empty() {
                    points.remove(0);
                }
                points.len()
            }
            None => 0,
        }
    }

    fn path_point_count(&self, source: &str) -> usize {
        self.paths.get(source).map(Vec::len).unwrap_or(0)
    }

    fn append_feature_point(&mut self, collection: &str, point: LngLat) {
        self.features
            .entry(collection.to_owned())
            .or_default()
            .push(point);
    }

    fn add_circle_layer(&mut self, source: &str, before: Option<&str>) -> String {
        let id = format!("{source}-ring-{}", self.next_layer_seq);
        self.next_layer_seq += 1;
        trace!(layer = %id, ?before, "transient circle layer added");

        match before.and_then(|b| self.layers.iter().position(|l| l == b)) {
            Some(pos) => self.layers.insert(pos, id.clone()),
            None => self.layers.push(id.clone()),
        }
        id
    }

    fn remove_layer(&mut self, layer: &str) {
        self.layers.retain(|l| l != layer);
        self.paint.retain(|(l, _), _| l != layer);
        self.layout.retain(|(l, _), _| l != layer);
    }
}
