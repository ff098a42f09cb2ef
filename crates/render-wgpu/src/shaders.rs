/// WGSL program for the water surface.
///
/// `vs_main` lifts each grid vertex by the wave elevation; `fs_main` mixes
/// depth and surface colors by that elevation. Both the filled and the
/// wireframe pipelines use it.
pub const WATER_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
};

struct Water {
    big_waves_frequency: vec2<f32>,
    time: f32,
    big_waves_elevation: f32,
    depth_color: vec3<f32>,
    big_waves_speed: f32,
    surface_color: vec3<f32>,
    big_waves_noise: f32,
    color_offset: f32,
    color_multiplier: f32,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

@group(0) @binding(1)
var<uniform> water: Water;

const NOISE_FREQUENCY: f32 = 3.0;
const NOISE_SPEED: f32 = 0.2;
const NOISE_GAIN: f32 = 0.15;

fn hash3(c: vec3<i32>) -> u32 {
    var h = (bitcast<u32>(c.x) * 0x8da6b343u)
        ^ (bitcast<u32>(c.y) * 0xd8163841u)
        ^ (bitcast<u32>(c.z) * 0xcb1ab31fu);
    h ^= h >> 16u;
    h *= 0x7feb352du;
    h ^= h >> 15u;
    h *= 0x846ca68bu;
    h ^= h >> 16u;
    return h;
}

fn gradient(hash: u32, p: vec3<f32>) -> f32 {
    var g = -p.y - p.z;
    switch hash % 12u {
        case 0u: { g = p.x + p.y; }
        case 1u: { g = -p.x + p.y; }
        case 2u: { g = p.x - p.y; }
        case 3u: { g = -p.x - p.y; }
        case 4u: { g = p.x + p.z; }
        case 5u: { g = -p.x + p.z; }
        case 6u: { g = p.x - p.z; }
        case 7u: { g = -p.x - p.z; }
        case 8u: { g = p.y + p.z; }
        case 9u: { g = -p.y + p.z; }
        case 10u: { g = p.y - p.z; }
        default: {}
    }
    return g;
}

fn fade(t: vec3<f32>) -> vec3<f32> {
    return t * t * t * (t * (t * 6.0 - 15.0) + 10.0);
}

fn corner(cell: vec3<i32>, f: vec3<f32>, d: vec3<i32>) -> f32 {
    return gradient(hash3(cell + d), f - vec3<f32>(d));
}

fn perlin3(p: vec3<f32>) -> f32 {
    let base = floor(p);
    let cell = vec3<i32>(base);
    let f = p - base;
    let u = fade(f);

    let x00 = mix(corner(cell, f, vec3<i32>(0, 0, 0)), corner(cell, f, vec3<i32>(1, 0, 0)), u.x);
    let x10 = mix(corner(cell, f, vec3<i32>(0, 1, 0)), corner(cell, f, vec3<i32>(1, 1, 0)), u.x);
    let x01 = mix(corner(cell, f, vec3<i32>(0, 0, 1)), corner(cell, f, vec3<i32>(1, 0, 1)), u.x);
    let x11 = mix(corner(cell, f, vec3<i32>(0, 1, 1)), corner(cell, f, vec3<i32>(1, 1, 1)), u.x);

    let y0 = mix(x00, x10, u.y);
    let y1 = mix(x01, x11, u.y);
    return mix(y0, y1, u.z);
}

fn wave_elevation(p: vec2<f32>) -> f32 {
    let phase = water.time * water.big_waves_speed;
    var wave = sin(p.x * water.big_waves_frequency.x + phase)
        * sin(p.y * water.big_waves_frequency.y + phase);
    wave += water.big_waves_noise * NOISE_GAIN
        * perlin3(vec3<f32>(p * NOISE_FREQUENCY, water.time * NOISE_SPEED));
    return wave * water.big_waves_elevation;
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) elevation: f32,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VertexOutput {
    var world = camera.model * vec4<f32>(position, 1.0);
    let elevation = wave_elevation(world.xz);
    world.y += elevation;

    var out: VertexOutput;
    out.clip_position = camera.view_proj * world;
    out.elevation = elevation;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let strength = (in.elevation + water.color_offset) * water.color_multiplier;
    let color = mix(water.depth_color, water.surface_color, strength);
    return vec4<f32>(color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tidewater_shading::{NOISE_FREQUENCY, NOISE_GAIN, NOISE_SPEED};

    #[test]
    fn noise_constants_match_cpu_model() {
        for (name, value) in [
            ("NOISE_FREQUENCY", NOISE_FREQUENCY),
            ("NOISE_SPEED", NOISE_SPEED),
            ("NOISE_GAIN", NOISE_GAIN),
        ] {
            let decl = format!("const {name}: f32 = {value:?};");
            assert!(WATER_SHADER.contains(&decl), "missing `{decl}`");
        }
    }

    #[test]
    fn declares_entry_points() {
        assert!(WATER_SHADER.contains("fn vs_main("));
        assert!(WATER_SHADER.contains("fn fs_main("));
    }
}
