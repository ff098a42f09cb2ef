use crate::noise::perlin3;
use crate::uniforms::WaterUniforms;
use glam::Vec3;

/// Horizontal scale of the noise layer relative to world units.
pub const NOISE_FREQUENCY: f32 = 3.0;
/// Rate at which the noise field scrolls through its third dimension.
pub const NOISE_SPEED: f32 = 0.2;
/// Weight of the noise layer before the `big_waves_noise` factor.
pub const NOISE_GAIN: f32 = 0.15;

/// Vertical displacement of the surface at world-space `(x, z)`.
///
/// Mirrors `wave_elevation` in the WGSL program term for term.
pub fn elevation(x: f32, z: f32, u: &WaterUniforms) -> f32 {
    let phase = u.time * u.big_waves_speed;
    let mut wave = (x * u.big_waves_frequency.x + phase).sin()
        * (z * u.big_waves_frequency.y + phase).sin();
    wave += u.big_waves_noise
        * NOISE_GAIN
        * perlin3(Vec3::new(
            x * NOISE_FREQUENCY,
            z * NOISE_FREQUENCY,
            u.time * NOISE_SPEED,
        ));
    wave * u.big_waves_elevation
}

/// Vertex stage: lift a world-space position along the surface normal (+Y).
///
/// Returns the displaced position and the elevation handed to the fragment
/// stage.
pub fn displace(world_position: Vec3, u: &WaterUniforms) -> (Vec3, f32) {
    let e = elevation(world_position.x, world_position.z, u);
    (world_position + Vec3::Y * e, e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn grid() -> impl Iterator<Item = (f32, f32)> {
        (-6..=6).flat_map(|i| (-6..=6).map(move |j| (i as f32 * 1.37, j as f32 * 2.11)))
    }

    #[test]
    fn zero_amplitude_is_flat_at_all_times() {
        let mut u = WaterUniforms {
            big_waves_elevation: 0.0,
            big_waves_noise: 3.0,
            ..WaterUniforms::default()
        };
        for t in [0.0, 0.5, 17.25, 1.0e4] {
            u.time = t;
            for (x, z) in grid() {
                assert_eq!(elevation(x, z, &u), 0.0);
                let (p, _) = displace(Vec3::new(x, 0.0, z), &u);
                assert_eq!(p.y, 0.0);
            }
        }
    }

    #[test]
    fn bit_identical_for_identical_inputs() {
        let u = WaterUniforms {
            time: 12.5,
            big_waves_noise: 1.5,
            ..WaterUniforms::default()
        };
        let copy = u;
        for (x, z) in grid() {
            assert_eq!(
                elevation(x, z, &u).to_bits(),
                elevation(x, z, &copy).to_bits()
            );
        }
    }

    #[test]
    fn continuous_in_time() {
        let mut u = WaterUniforms {
            big_waves_noise: 1.0,
            ..WaterUniforms::default()
        };
        let (x, z) = (1.3, -4.2);
        let mut last = elevation(x, z, &u);
        for step in 1..2000 {
            u.time = step as f32 * 1.0e-3;
            let e = elevation(x, z, &u);
            assert!((e - last).abs() < 0.05, "jump at t={}", u.time);
            last = e;
        }
    }

    #[test]
    fn bounded_by_amplitude_without_noise() {
        let u = WaterUniforms {
            time: 3.0,
            big_waves_elevation: 0.4,
            ..WaterUniforms::default()
        };
        for (x, z) in grid() {
            assert!(elevation(x, z, &u).abs() <= 0.4 + 1e-6);
        }
    }

    #[test]
    fn displacement_is_vertical_only() {
        let u = WaterUniforms {
            time: 2.0,
            big_waves_frequency: Vec2::new(1.0, 1.0),
            ..WaterUniforms::default()
        };
        let p = Vec3::new(0.8, 0.25, -1.1);
        let (moved, e) = displace(p, &u);
        assert_eq!(moved.x, p.x);
        assert_eq!(moved.z, p.z);
        assert_eq!(moved.y, p.y + e);
    }

    #[test]
    fn speed_scales_phase() {
        let still = WaterUniforms {
            time: 5.0,
            big_waves_speed: 0.0,
            ..WaterUniforms::default()
        };
        let at_rest = WaterUniforms {
            time: 0.0,
            ..still
        };
        for (x, z) in grid() {
            assert_eq!(elevation(x, z, &still), elevation(x, z, &at_rest));
        }
    }
}
