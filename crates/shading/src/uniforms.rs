use glam::Vec2;
use serde::{Deserialize, Serialize};
use tidewater_common::Rgb;

/// Values fed to the water program, constant across one frame.
///
/// `time` is written by the frame driver; everything else is edited from the
/// parameter panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterUniforms {
    /// Seconds since the clock was created.
    pub time: f32,
    /// Amplitude of the big waves.
    pub big_waves_elevation: f32,
    /// Spatial frequency along world X (`x`) and world Z (`y`).
    pub big_waves_frequency: Vec2,
    pub big_waves_speed: f32,
    /// Strength of the noise layered on top of the big waves.
    pub big_waves_noise: f32,
    /// Color at the bottom of the mix.
    pub depth_color: Rgb,
    /// Color at the top of the mix.
    pub surface_color: Rgb,
    pub color_offset: f32,
    pub color_multiplier: f32,
}

impl Default for WaterUniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            big_waves_elevation: 0.7,
            big_waves_frequency: Vec2::new(5.0, 1.0),
            big_waves_speed: 0.3,
            big_waves_noise: 0.0,
            depth_color: Rgb::new(0xff, 0x00, 0x00),
            surface_color: Rgb::new(0x00, 0x00, 0x4c),
            color_offset: 2.0,
            color_multiplier: 1.0,
        }
    }
}
