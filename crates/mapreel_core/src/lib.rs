//! mapreel Core
//!
//! Foundational primitives for the mapreel animation engine:
//!
//! - **Geometry**: planar coordinates and distances
//! - **Frame Clock**: fixed tick rate and the explicit global frame counter
//! - **Rendering Surface**: the abstract map the animations mutate
//! - **Memory Surface**: a headless in-memory surface implementation

pub mod clock;
pub mod error;
pub mod geometry;
pub mod memory;
pub mod surface;

pub use clock::{FrameClock, FrameRate};
pub use error::AnimationError;
pub use geometry::LngLat;
pub use memory::MemorySurface;
pub use surface::{CameraState, CameraUpdate, RenderSurface};
