use posecloud_core::{PointCloud, PointWithInfo, PointWithInfoVec};
use posecloud_io::{read_ply, write_ply};

fn rgb_cloud() -> PointCloud {
    let points: PointWithInfoVec = [
        ([0.0, 0.0, 0.0, 1.0], [255.0, 0.0, 0.0, 255.0]),
        ([1.0, 0.0, 0.0, 1.0], [0.0, 255.0, 0.0, 255.0]),
        ([0.0, 1.0, 0.0, 1.0], [0.0, 0.0, 255.0, 255.0]),
    ]
    .into_iter()
    .map(|(xyzw, rgba)| PointWithInfo::new(xyzw, rgba, 1.0))
    .collect();
    PointCloud::from_points(points)
}

#[test]
fn ply_export_three_points_in_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rgb.ply");
    let cloud = rgb_cloud();

    assert!(write_ply(&path, cloud.points(), "three axes"));

    let text = std::fs::read_to_string(&path).unwrap();
    let (header, body) = text.split_once("end_header\n").unwrap();
    assert!(header.starts_with("ply\nformat ascii 1.0\n"));
    assert!(header.contains("element vertex 3\n"));
    assert!(header.contains("comment three axes\n"));

    let rows: Vec<Vec<&str>> = body.lines().map(|l| l.split(' ').collect()).collect();
    assert_eq!(rows.len(), 3);
    for (row, point) in rows.iter().zip(cloud.iter()) {
        assert_eq!(row.len(), 7);
        let xyz: Vec<f32> = row[..3].iter().map(|v| v.parse().unwrap()).collect();
        let rgba: Vec<u8> = row[3..].iter().map(|v| v.parse().unwrap()).collect();
        assert_eq!(xyz, point.xyz());
        let expected: Vec<u8> = point.color().iter().map(|&c| c as u8).collect();
        assert_eq!(rgba, expected);
    }
}

#[test]
fn ply_empty_cloud_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.ply");

    assert!(write_ply(&path, PointCloud::new().points(), ""));

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("element vertex 0\n"));
    assert!(text.ends_with("end_header\n"));
    assert!(read_ply(&path).unwrap().is_empty());
}

#[test]
fn ply_unwritable_path_returns_false() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does").join("not").join("exist.ply");
    assert!(!write_ply(&path, rgb_cloud().points(), ""));
}

#[test]
fn ply_write_then_read_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.ply");
    let cloud = rgb_cloud();

    assert!(write_ply(&path, cloud.points(), ""));
    let loaded = PointCloud::from_points(read_ply(&path).unwrap());

    assert_eq!(loaded.len(), cloud.len());
    for i in 0..cloud.len() {
        assert_eq!(loaded[i].position(), cloud[i].position());
        assert_eq!(loaded[i].color(), cloud[i].color());
    }
}
