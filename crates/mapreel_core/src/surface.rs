//! The abstract rendering surface
//!
//! Animations never talk to a concrete map. They mutate a
//! [`RenderSurface`]: camera state, per-layer paint/layout properties,
//! per-source path geometry, point-feature collections, and transient
//! circle layers. The production implementation wraps a real map
//! renderer; [`crate::MemorySurface`] implements the same trait in
//! memory for headless runs and tests.
//!
//! The surface is shared mutable state with no locking. Concurrently
//! live animations are expected to target disjoint (or deliberately
//! commutative) parts of it; the engine sequences everything on one
//! thread per tick.

use serde::{Deserialize, Serialize};

use crate::geometry::LngLat;

/// Camera position as read back from the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub center: LngLat,
    pub zoom: f64,
    pub pitch: f64,
}

/// Partial camera write. Dimensions left `None` are untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraUpdate {
    pub center: Option<LngLat>,
    pub zoom: Option<f64>,
    pub pitch: Option<f64>,
}

impl CameraUpdate {
    pub fn center(center: LngLat) -> Self {
        Self {
            center: Some(center),
            ..Self::default()
        }
    }
}

/// Everything an animation may read from or write to the outside world.
pub trait RenderSurface {
    fn camera(&self) -> CameraState;
    fn apply_camera(&mut self, update: &CameraUpdate);

    fn bearing(&self) -> f64;
    fn set_bearing(&mut self, degrees: f64);

    fn paint_property(&self, layer: &str, prop: &str) -> Option<f64>;
    fn set_paint_property(&mut self, layer: &str, prop: &str, value: f64);

    fn layout_property(&self, layer: &str, prop: &str) -> Option<f64>;
    fn set_layout_property(&mut self, layer: &str, prop: &str, value: f64);

    /// Append one point to a path geometry source.
    fn append_path_point(&mut self, source: &str, point: LngLat);

    /// Replace a source's geometry wholesale.
    fn replace_path_points(&mut self, source: &str, points: &[LngLat]);

    /// Drop the frontmost point of a path source. Returns how many
    /// points remain.
    fn truncate_path_front(&mut self, source: &str) -> usize;

    fn path_point_count(&self, source: &str) -> usize;

    /// Append a point feature to a feature-collection source.
    fn append_feature_point(&mut self, collection: &str, point: LngLat);

    /// Create a transient stroked-circle layer over `source`, optionally
    /// inserted before an existing layer. Returns the generated layer id.
    /// The creator owns the layer and must remove it when done.
    fn add_circle_layer(&mut self, source: &str, before: Option<&str>) -> String;

    fn remove_layer(&mut self, layer: &str);
}
