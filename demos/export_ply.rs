use posecloud_core::{PointCloud, PointWithInfo};
use posecloud_io::write_ply;

fn main() {
    // A colored helix: 500 points, hue ramps from red to blue.
    let n = 500;
    let mut cloud = PointCloud::with_len(n);
    for i in 0..n {
        let t = i as f32 / n as f32;
        let angle = t * 8.0 * std::f32::consts::PI;
        cloud[i] = PointWithInfo::new(
            [angle.cos(), angle.sin(), t * 2.0, 1.0],
            [255.0 * (1.0 - t), 0.0, 255.0 * t, 255.0],
            1.0,
        );
    }
    println!("Built cloud: {} points", cloud.len());

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "helix.ply".to_string());
    if write_ply(&path, cloud.points(), "helix demo") {
        println!("Wrote {}", path);
    } else {
        println!("Could not write {}", path);
    }
}
