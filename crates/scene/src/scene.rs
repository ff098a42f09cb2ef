use crate::camera::CameraState;
use crate::config::SceneConfig;
use crate::event::{ColorParam, ScalarParam, SceneEvent};
use crate::geometry::PlaneGrid;
use crate::viewport::Viewport;
use glam::Mat4;
use std::f32::consts::FRAC_PI_2;
use tidewater_common::Rgb;
use tidewater_shading::WaterUniforms;

/// How the water mesh is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    #[default]
    Solid,
    Wireframe,
}

/// The water mesh: a plane grid laid flat, plus its fill mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterSurface {
    grid: PlaneGrid,
    fill_mode: FillMode,
}

impl WaterSurface {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            grid: PlaneGrid::new(config.size, config.subdivisions),
            fill_mode: FillMode::Solid,
        }
    }

    pub fn grid(&self) -> &PlaneGrid {
        &self.grid
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    pub fn wireframe(&self) -> bool {
        self.fill_mode == FillMode::Wireframe
    }

    pub fn set_wireframe(&mut self, on: bool) {
        self.fill_mode = if on {
            FillMode::Wireframe
        } else {
            FillMode::Solid
        };
    }

    /// Rest orientation: the grid's +Z face turned to point up (+Y).
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(-FRAC_PI_2)
    }
}

/// All mutable state of the demo, owned in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterScene {
    pub surface: WaterSurface,
    pub uniforms: WaterUniforms,
    pub camera: CameraState,
    pub viewport: Viewport,
    pub clear_color: Rgb,
}

impl WaterScene {
    pub fn new(config: &SceneConfig, viewport: Viewport) -> Self {
        let mut camera = CameraState::default();
        camera.aspect = viewport.aspect();
        tracing::debug!(
            size = config.size,
            subdivisions = config.subdivisions,
            "scene created"
        );
        Self {
            surface: WaterSurface::new(config),
            uniforms: WaterUniforms::default(),
            camera,
            viewport,
            clear_color: Rgb::BLACK,
        }
    }

    /// Apply one event. Runs to completion before the next is dispatched.
    pub fn apply(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::SetScalar(param, value) => {
                tracing::debug!(?param, value, "set scalar");
                self.set_scalar(param, value);
            }
            SceneEvent::SetColor(param, color) => {
                tracing::debug!(?param, %color, "set color");
                match param {
                    ColorParam::Depth => self.uniforms.depth_color = color,
                    ColorParam::Surface => self.uniforms.surface_color = color,
                    ColorParam::Background => self.clear_color = color,
                }
            }
            SceneEvent::SetWireframe(on) => {
                tracing::debug!(on, "set wireframe");
                self.surface.set_wireframe(on);
            }
            SceneEvent::Resized {
                width,
                height,
                scale_factor,
            } => {
                self.viewport.resize(width, height, scale_factor);
                self.camera.aspect = self.viewport.aspect();
                tracing::debug!(
                    width,
                    height,
                    scale_factor,
                    pixel_ratio = self.viewport.pixel_ratio(),
                    "viewport resized"
                );
            }
        }
    }

    fn set_scalar(&mut self, param: ScalarParam, value: f32) {
        let u = &mut self.uniforms;
        match param {
            ScalarParam::WaveElevation => u.big_waves_elevation = value,
            ScalarParam::WaveFrequencyX => u.big_waves_frequency.x = value,
            ScalarParam::WaveFrequencyZ => u.big_waves_frequency.y = value,
            ScalarParam::WaveSpeed => u.big_waves_speed = value,
            ScalarParam::WaveNoise => u.big_waves_noise = value,
            ScalarParam::ColorOffset => u.color_offset = value,
            ScalarParam::ColorMultiplier => u.color_multiplier = value,
            ScalarParam::CameraPosition(axis) => self.camera.set_position_axis(axis, value),
            ScalarParam::CameraRotation(axis) => self.camera.set_rotation_axis(axis, value),
        }
    }

    /// Current value of a scalar field, as the panel displays it.
    pub fn scalar(&self, param: ScalarParam) -> f32 {
        let u = &self.uniforms;
        match param {
            ScalarParam::WaveElevation => u.big_waves_elevation,
            ScalarParam::WaveFrequencyX => u.big_waves_frequency.x,
            ScalarParam::WaveFrequencyZ => u.big_waves_frequency.y,
            ScalarParam::WaveSpeed => u.big_waves_speed,
            ScalarParam::WaveNoise => u.big_waves_noise,
            ScalarParam::ColorOffset => u.color_offset,
            ScalarParam::ColorMultiplier => u.color_multiplier,
            ScalarParam::CameraPosition(axis) => axis.get(self.camera.position),
            ScalarParam::CameraRotation(axis) => axis.get(self.camera.rotation()),
        }
    }

    pub fn color(&self, param: ColorParam) -> Rgb {
        match param {
            ColorParam::Depth => self.uniforms.depth_color,
            ColorParam::Surface => self.uniforms.surface_color,
            ColorParam::Background => self.clear_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};
    use tidewater_common::Axis;

    fn scene() -> WaterScene {
        let config = SceneConfig {
            size: 30.0,
            subdivisions: 8,
        };
        WaterScene::new(&config, Viewport::new(1280, 720, 1.0))
    }

    #[test]
    fn setup_matches_defaults() {
        let s = scene();
        assert_eq!(s.camera.aspect, 1280.0 / 720.0);
        assert_eq!(s.camera.position, Vec3::new(12.0, 1.8, 6.0));
        assert_eq!(s.clear_color, Rgb::BLACK);
        assert_eq!(s.surface.fill_mode(), FillMode::Solid);
        assert_eq!(s.uniforms, WaterUniforms::default());
    }

    #[test]
    fn rest_rotation_lays_plane_flat() {
        let s = scene();
        let normal = s.surface.model_matrix() * Vec4::new(0.0, 0.0, 1.0, 0.0);
        assert!((normal.truncate() - Vec3::Y).length() < 1e-6);
        // Grid row 0 (+Y) ends up at -Z.
        let top = s.surface.model_matrix().transform_point3(Vec3::new(0.0, 15.0, 0.0));
        assert!((top - Vec3::new(0.0, 0.0, -15.0)).length() < 1e-5);
    }

    #[test]
    fn resize_updates_aspect_and_pixel_ratio() {
        let mut s = scene();
        s.apply(SceneEvent::Resized {
            width: 1000,
            height: 400,
            scale_factor: 2.5,
        });
        assert_eq!(s.camera.aspect, 1000.0 / 400.0);
        assert_eq!(s.viewport.pixel_ratio(), 2.0);
    }

    #[test]
    fn wireframe_toggled_twice_restores_fill() {
        let mut s = scene();
        let original = s.surface.fill_mode();
        s.apply(SceneEvent::SetWireframe(true));
        assert_eq!(s.surface.fill_mode(), FillMode::Wireframe);
        s.apply(SceneEvent::SetWireframe(false));
        assert_eq!(s.surface.fill_mode(), original);
    }

    #[test]
    fn rotation_edit_keeps_other_axes() {
        let mut s = scene();
        s.apply(SceneEvent::SetScalar(ScalarParam::CameraRotation(Axis::X), -0.2));
        s.apply(SceneEvent::SetScalar(ScalarParam::CameraRotation(Axis::Z), 0.3));
        let y_before = s.scalar(ScalarParam::CameraRotation(Axis::Y));
        s.apply(SceneEvent::SetScalar(ScalarParam::CameraRotation(Axis::X), 0.1));

        assert_eq!(s.scalar(ScalarParam::CameraRotation(Axis::X)), 0.1);
        assert_eq!(s.scalar(ScalarParam::CameraRotation(Axis::Y)), y_before);
        assert_eq!(s.scalar(ScalarParam::CameraRotation(Axis::Z)), 0.3);
    }

    #[test]
    fn scalar_edits_round_trip_through_getters() {
        let mut s = scene();
        let params = [
            ScalarParam::WaveElevation,
            ScalarParam::WaveFrequencyX,
            ScalarParam::WaveFrequencyZ,
            ScalarParam::WaveSpeed,
            ScalarParam::WaveNoise,
            ScalarParam::ColorOffset,
            ScalarParam::ColorMultiplier,
            ScalarParam::CameraPosition(Axis::Z),
        ];
        for (i, param) in params.into_iter().enumerate() {
            let value = 0.5 + i as f32;
            s.apply(SceneEvent::SetScalar(param, value));
            assert_eq!(s.scalar(param), value, "{param:?}");
        }
        assert_eq!(s.uniforms.big_waves_frequency.y, 2.5);
    }

    #[test]
    fn color_edits_hit_their_fields() {
        let mut s = scene();
        let teal = Rgb::new(0, 128, 128);
        s.apply(SceneEvent::SetColor(ColorParam::Background, teal));
        s.apply(SceneEvent::SetColor(ColorParam::Surface, Rgb::BLACK));
        assert_eq!(s.clear_color, teal);
        assert_eq!(s.color(ColorParam::Surface), Rgb::BLACK);
        assert_eq!(s.color(ColorParam::Depth), Rgb::new(255, 0, 0));
    }
}
