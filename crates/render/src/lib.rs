//! Rendering interface: renderer-agnostic trait plus a CPU probe.
//!
//! # Invariants
//! - Renderers read the scene; they never mutate it.
//! - The probe evaluates the same shading functions the GPU program mirrors,
//!   so its report describes what the window shows at that time.

mod renderer;

pub use renderer::{MAX_PROBE_SAMPLES, ProbeReport, Renderer, SurfaceProbe};

pub fn crate_info() -> &'static str {
    "tidewater-render v0.1.0"
}
