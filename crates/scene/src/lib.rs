//! Scene Graph Setup and Frame Driver.
//!
//! `WaterScene` is the single owned state of the demo: the water surface, its
//! uniforms, the camera, the viewport and the clear color. Every mutation
//! arrives as a [`SceneEvent`] and is applied synchronously by
//! [`WaterScene::apply`].
//!
//! # Invariants
//! - All state is created once at startup and never torn down.
//! - Events are applied in arrival order on one thread.
//! - Camera aspect always equals the viewport's width / height.
//! - The clock is never reset; the time uniform only moves forward.

mod camera;
mod config;
pub mod driver;
mod event;
mod geometry;
mod scene;
mod viewport;

pub use camera::CameraState;
pub use config::SceneConfig;
pub use driver::{Clock, FrameDriver, FrameStamp};
pub use event::{ColorParam, ScalarParam, SceneEvent};
pub use geometry::PlaneGrid;
pub use scene::{FillMode, WaterScene, WaterSurface};
pub use viewport::{MAX_PIXEL_RATIO, Viewport};
