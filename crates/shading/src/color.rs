use crate::uniforms::WaterUniforms;
use glam::Vec3;

/// Blend factor between depth and surface color for a fragment at `elevation`.
pub fn mix_strength(elevation: f32, u: &WaterUniforms) -> f32 {
    (elevation + u.color_offset) * u.color_multiplier
}

/// Fragment stage: linear-light color of a fragment at `elevation`.
///
/// The lerp is not clamped, matching WGSL `mix`; the render target saturates.
pub fn fragment_color(elevation: f32, u: &WaterUniforms) -> Vec3 {
    u.depth_color
        .to_linear()
        .lerp(u.surface_color.to_linear(), mix_strength(elevation, u))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidewater_common::Rgb;

    fn baseline() -> WaterUniforms {
        WaterUniforms {
            color_offset: 0.0,
            color_multiplier: 1.0,
            depth_color: Rgb::new(200, 40, 0),
            surface_color: Rgb::new(0, 90, 255),
            ..WaterUniforms::default()
        }
    }

    #[test]
    fn baseline_is_plain_mix_by_elevation() {
        let u = baseline();
        let depth = u.depth_color.to_linear();
        let surface = u.surface_color.to_linear();
        for e in [-0.5, 0.0, 0.25, 0.7, 1.0] {
            assert_eq!(mix_strength(e, &u), e);
            assert_eq!(fragment_color(e, &u), depth.lerp(surface, e));
        }
    }

    #[test]
    fn flat_fragment_at_baseline_is_depth_color() {
        let u = baseline();
        assert_eq!(fragment_color(0.0, &u), u.depth_color.to_linear());
    }

    #[test]
    fn strength_one_is_surface_color() {
        let u = WaterUniforms {
            color_offset: 0.5,
            color_multiplier: 2.0,
            ..baseline()
        };
        let c = fragment_color(0.0, &u);
        assert!((c - u.surface_color.to_linear()).abs().max_element() < 1e-6);
    }

    #[test]
    fn default_offset_extrapolates_past_surface() {
        let u = WaterUniforms::default();
        assert_eq!(mix_strength(0.0, &u), 2.0);
        assert!(mix_strength(-0.7, &u) > 1.0);
    }
}
