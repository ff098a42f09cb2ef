//! Shading Model: the per-vertex wave displacement and per-fragment color mix.
//!
//! The functions here are the CPU twin of the WGSL water program. They are
//! used by tests, by the headless probe, and as the reference the shader is
//! kept in step with.
//!
//! # Invariants
//! - Every function is pure: identical inputs give bit-identical outputs.
//! - Amplitude 0 means no displacement anywhere, at any time.
//! - Nothing here is fallible; degenerate parameters give degenerate output.

mod color;
mod noise;
mod uniforms;
mod wave;

pub use color::{fragment_color, mix_strength};
pub use noise::perlin3;
pub use uniforms::WaterUniforms;
pub use wave::{NOISE_FREQUENCY, NOISE_GAIN, NOISE_SPEED, displace, elevation};
