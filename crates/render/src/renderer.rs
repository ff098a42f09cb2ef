use glam::Vec3;
use serde::Serialize;
use std::fmt;
use tidewater_common::Rgb;
use tidewater_scene::{FillMode, PlaneGrid, WaterScene};
use tidewater_shading::{displace, fragment_color};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the scene and produces output. It never mutates the
/// scene; edits go through `WaterScene::apply`.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the scene as it stands.
    fn render(&self, scene: &WaterScene) -> Self::Output;
}

/// Summary of the water surface over a coarse sample grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReport {
    pub time: f32,
    /// Sample points per side.
    pub samples: u32,
    pub min_elevation: f32,
    pub max_elevation: f32,
    pub mean_elevation: f32,
    /// Mean fragment color in linear light, saturated like a render target.
    pub mean_color: [f32; 3],
    pub depth_color: Rgb,
    pub surface_color: Rgb,
    pub wireframe: bool,
    pub camera_position: [f32; 3],
    pub camera_rotation: [f32; 3],
    pub aspect: f32,
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Water surface (t={:.3}s, {}x{} samples) ===",
            self.time, self.samples, self.samples
        )?;
        writeln!(
            f,
            "Elevation: min={:.4} max={:.4} mean={:.4}",
            self.min_elevation, self.max_elevation, self.mean_elevation
        )?;
        writeln!(
            f,
            "Color: mean=({:.3}, {:.3}, {:.3}) depth={} surface={}",
            self.mean_color[0],
            self.mean_color[1],
            self.mean_color[2],
            self.depth_color,
            self.surface_color
        )?;
        writeln!(
            f,
            "Fill: {}",
            if self.wireframe { "wireframe" } else { "solid" }
        )?;
        write!(
            f,
            "Camera: pos=({:.1}, {:.1}, {:.1}) rot=({:.3}, {:.3}, {:.3})π aspect={:.3}",
            self.camera_position[0],
            self.camera_position[1],
            self.camera_position[2],
            self.camera_rotation[0],
            self.camera_rotation[1],
            self.camera_rotation[2],
            self.aspect
        )
    }
}

/// Upper bound on probe samples per side (about a million points).
pub const MAX_PROBE_SAMPLES: u32 = 1024;

/// CPU renderer that runs the shading model over a sample grid.
///
/// Useful for the CLI, logging, and testing the render interface without a GPU.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceProbe {
    samples: u32,
}

impl Default for SurfaceProbe {
    fn default() -> Self {
        Self::new(32)
    }
}

impl SurfaceProbe {
    /// `samples` points per side, clamped to `2..=MAX_PROBE_SAMPLES`.
    pub fn new(samples: u32) -> Self {
        Self {
            samples: samples.clamp(2, MAX_PROBE_SAMPLES),
        }
    }
}

impl Renderer for SurfaceProbe {
    type Output = ProbeReport;

    fn render(&self, scene: &WaterScene) -> ProbeReport {
        let u = &scene.uniforms;
        let model = scene.surface.model_matrix();
        let grid = PlaneGrid::new(scene.surface.grid().size(), self.samples - 1);

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut elevation_sum = 0.0_f64;
        let mut color_sum = Vec3::ZERO;
        let positions = grid.positions();
        for p in &positions {
            let world = model.transform_point3(Vec3::from(*p));
            let (_, e) = displace(world, u);
            min = min.min(e);
            max = max.max(e);
            elevation_sum += e as f64;
            color_sum += fragment_color(e, u).clamp(Vec3::ZERO, Vec3::ONE);
        }

        let n = positions.len() as f32;
        tracing::debug!(samples = positions.len(), time = u.time, "surface probed");

        let camera = &scene.camera;
        ProbeReport {
            time: u.time,
            samples: self.samples,
            min_elevation: min,
            max_elevation: max,
            mean_elevation: (elevation_sum / positions.len() as f64) as f32,
            mean_color: (color_sum / n).to_array(),
            depth_color: u.depth_color,
            surface_color: u.surface_color,
            wireframe: scene.surface.fill_mode() == FillMode::Wireframe,
            camera_position: camera.position.to_array(),
            camera_rotation: camera.rotation().to_array(),
            aspect: camera.aspect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidewater_scene::{ScalarParam, SceneConfig, SceneEvent, Viewport};

    fn scene() -> WaterScene {
        let config = SceneConfig {
            size: 30.0,
            subdivisions: 64,
        };
        WaterScene::new(&config, Viewport::new(1280, 720, 1.0))
    }

    #[test]
    fn flat_surface_reports_zero_elevation() {
        let mut scene = scene();
        scene.apply(SceneEvent::SetScalar(ScalarParam::WaveElevation, 0.0));
        scene.uniforms.time = 42.0;
        let report = SurfaceProbe::new(16).render(&scene);
        assert_eq!(report.min_elevation, 0.0);
        assert_eq!(report.max_elevation, 0.0);
        assert_eq!(report.mean_elevation, 0.0);
    }

    #[test]
    fn default_waves_stay_within_amplitude() {
        let mut scene = scene();
        scene.uniforms.time = 3.5;
        let report = SurfaceProbe::default().render(&scene);
        assert!(report.max_elevation <= 0.7 + 1e-5);
        assert!(report.min_elevation >= -0.7 - 1e-5);
        assert!(report.max_elevation > report.min_elevation);
        assert!(report.mean_color.iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn probe_is_deterministic() {
        let scene = scene();
        let probe = SurfaceProbe::new(20);
        assert_eq!(probe.render(&scene), probe.render(&scene));
    }

    #[test]
    fn report_display_and_json() {
        let report = SurfaceProbe::new(4).render(&scene());
        let text = report.to_string();
        assert!(text.contains("4x4 samples"));
        assert!(text.contains("surface=#00004c"));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["depth_color"], "#ff0000");
        assert_eq!(json["wireframe"], false);
    }

    #[test]
    fn samples_are_at_least_two() {
        let report = SurfaceProbe::new(0).render(&scene());
        assert_eq!(report.samples, 2);
    }

    #[test]
    fn oversized_sample_count_is_capped() {
        let report = SurfaceProbe::new(u32::MAX).render(&scene());
        assert_eq!(report.samples, MAX_PROBE_SAMPLES);
        assert!(report.max_elevation <= 0.7 + 1e-5);
        assert!(report.min_elevation >= -0.7 - 1e-5);
    }
}
