//! Coherent noise for organic jitter
//!
//! Hash-based gradient (Perlin) noise in three dimensions: two spatial
//! coordinates plus a slowly advancing time coordinate. Output is normalized
//! to [0, 1] so callers can map it with `n * scale - bias`.

/// Noise field configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseField {
    /// Base seed for the lattice hash
    pub seed: u64,
    /// Octaves summed for fractal detail
    pub octaves: u32,
    /// Amplitude multiplier per octave
    pub falloff: f32,
}

impl NoiseField {
    /// Create a noise field with 4 octaves and 0.5 falloff
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            octaves: 4,
            falloff: 0.5,
        }
    }

    /// Sample the field at (x, y, z), result in [0, 1]
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        fbm_perlin_3d(x, y, z, self.octaves, self.falloff, self.seed)
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(0)
    }
}

// ========== Noise Implementations ==========

/// Hash function for noise
fn hash(x: i32, y: i32, z: i32, seed: u64) -> u32 {
    let mut h = seed as u32 ^ (seed >> 32) as u32;
    h = h.wrapping_mul(374761393);
    h = h.wrapping_add((x as u32).wrapping_mul(668265263));
    h = h.wrapping_add((y as u32).wrapping_mul(2654435761));
    h = h.wrapping_add((z as u32).wrapping_mul(3266489917));
    h ^= h >> 13;
    h = h.wrapping_mul(1274126177);
    h ^= h >> 16;
    h
}

/// Quintic interpolation
fn quintic(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Linear interpolation
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Dot product with one of the 12 cube-edge gradient directions
fn gradient_dot(h: u32, x: f32, y: f32, z: f32) -> f32 {
    match h % 12 {
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

/// 3D Perlin noise in [0, 1]
pub fn perlin_3d(x: f32, y: f32, z: f32, seed: u64) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let z0 = z.floor() as i32;

    let fx = x - x0 as f32;
    let fy = y - y0 as f32;
    let fz = z - z0 as f32;

    let u = quintic(fx);
    let v = quintic(fy);
    let w = quintic(fz);

    let corner = |dx: i32, dy: i32, dz: i32| {
        gradient_dot(
            hash(x0 + dx, y0 + dy, z0 + dz, seed),
            fx - dx as f32,
            fy - dy as f32,
            fz - dz as f32,
        )
    };

    let x00 = lerp(corner(0, 0, 0), corner(1, 0, 0), u);
    let x10 = lerp(corner(0, 1, 0), corner(1, 1, 0), u);
    let x01 = lerp(corner(0, 0, 1), corner(1, 0, 1), u);
    let x11 = lerp(corner(0, 1, 1), corner(1, 1, 1), u);

    let y0v = lerp(x00, x10, v);
    let y1v = lerp(x01, x11, v);
    let result = lerp(y0v, y1v, w);

    // Edge gradients keep the raw value inside [-1, 1]
    ((result + 1.0) * 0.5).clamp(0.0, 1.0)
}

/// FBM over 3D Perlin noise, normalized to [0, 1]
pub fn fbm_perlin_3d(x: f32, y: f32, z: f32, octaves: u32, falloff: f32, seed: u64) -> f32 {
    let mut result = 0.0;
    let mut freq = 1.0;
    let mut amp = 1.0;
    let mut max_amp = 0.0;

    for i in 0..octaves.max(1) {
        result += perlin_3d(x * freq, y * freq, z * freq, seed.wrapping_add(i as u64 * 1000)) * amp;
        max_amp += amp;
        freq *= 2.0;
        amp *= falloff;
    }

    if max_amp > 0.0 {
        result / max_amp
    } else {
        0.5
    }
}
