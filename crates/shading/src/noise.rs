use glam::Vec3;

/// Integer lattice hash. The WGSL `hash3` performs the same u32 operations,
/// so CPU and GPU agree on every lattice gradient.
fn hash3(x: i32, y: i32, z: i32) -> u32 {
    let mut h = (x as u32).wrapping_mul(0x8da6_b343)
        ^ (y as u32).wrapping_mul(0xd816_3841)
        ^ (z as u32).wrapping_mul(0xcb1a_b31f);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

/// Dot product of `(x, y, z)` with one of the twelve cube-edge gradients.
fn gradient(hash: u32, x: f32, y: f32, z: f32) -> f32 {
    match hash % 12 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x + z,
        5 => -x + z,
        6 => x - z,
        7 => -x - z,
        8 => y + z,
        9 => -y + z,
        10 => y - z,
        _ => -y - z,
    }
}

fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Same form as WGSL `mix`.
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Gradient noise in roughly `[-1, 1]`, zero at every lattice point.
pub fn perlin3(p: Vec3) -> f32 {
    let cell = p.floor();
    let (ix, iy, iz) = (cell.x as i32, cell.y as i32, cell.z as i32);
    let f = p - cell;

    let corner = |dx: i32, dy: i32, dz: i32| {
        gradient(
            hash3(ix + dx, iy + dy, iz + dz),
            f.x - dx as f32,
            f.y - dy as f32,
            f.z - dz as f32,
        )
    };

    let u = fade(f.x);
    let v = fade(f.y);
    let w = fade(f.z);

    let x00 = lerp(corner(0, 0, 0), corner(1, 0, 0), u);
    let x10 = lerp(corner(0, 1, 0), corner(1, 1, 0), u);
    let x01 = lerp(corner(0, 0, 1), corner(1, 0, 1), u);
    let x11 = lerp(corner(0, 1, 1), corner(1, 1, 1), u);

    let y0 = lerp(x00, x10, v);
    let y1 = lerp(x01, x11, v);

    lerp(y0, y1, w)
}
