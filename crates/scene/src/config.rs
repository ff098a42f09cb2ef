use serde::{Deserialize, Serialize};

/// Startup parameters for the water plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Width and depth of the plane in world units.
    pub size: f32,
    /// Segments per side; the grid has `(subdivisions + 1)^2` vertices.
    pub subdivisions: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            size: 30.0,
            subdivisions: 1064,
        }
    }
}
