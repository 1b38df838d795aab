/// Hash-based height noise in `[-amplitude, amplitude]` for seeding terrain grids.
pub fn terrain_noise(x: f64, z: f64, scale: f64, amplitude: f64) -> f64 {
    let (x, z) = (x * scale, z * scale);
    let h = (x * 12.9898 + z * 78.233).sin() * 43758.5453;
    // Floor-based fraction keeps negative inputs in [0, 1).
    let unit = h - h.floor();
    (unit * 2.0 - 1.0) * amplitude
}
