//! Adversarial edge-case integration tests.
//!
//! These tests probe degenerate, boundary, and pathological inputs across
//! the crate stack: odd alignments, huge requests, non-finite values and
//! raw-byte views of point storage.

use posecloud_aligned::{AlignedAllocator, AlignedVec, AllocError};
use posecloud_core::{PointCloud, PointWithInfo, POINT_ALIGNMENT};
use posecloud_io::{read_ply, try_write_ply, write_ply, PlyError};

// ────────────────── Allocator ──────────────────

#[test]
fn page_alignment_with_single_byte_elements() {
    let alloc = AlignedAllocator::<u8, 4096>::new();
    for n in [1, 4095, 4096, 4097] {
        let ptr = alloc.allocate(n).unwrap();
        assert_eq!(ptr.as_ptr() as usize % 4096, 0);
        unsafe { alloc.deallocate(ptr, n) };
    }
}

#[test]
fn overflowing_request_is_an_error_not_a_null() {
    let alloc = AlignedAllocator::<PointWithInfo>::new();
    let err = alloc.allocate(usize::MAX / 2).unwrap_err();
    assert!(matches!(err, AllocError::CapacityOverflow { .. }));
}

#[test]
fn aligned_vec_of_points_keeps_every_record_aligned() {
    let mut v: AlignedVec<PointWithInfo, POINT_ALIGNMENT> = AlignedVec::new();
    for i in 0..1000 {
        v.push(PointWithInfo::new([i as f32; 4], [0.0; 4], 0.0));
    }
    for p in v.iter() {
        assert_eq!(p as *const PointWithInfo as usize % POINT_ALIGNMENT, 0);
    }
}

// ────────────────── Point records ──────────────────

#[test]
fn zeroed_storage_is_all_zero_bytes() {
    let mut cloud = PointCloud::with_len(8);
    assert!(bytemuck::cast_slice::<PointWithInfo, u8>(cloud.points()).iter().all(|&b| b == 0));

    for p in cloud.points_mut().iter_mut() {
        bytemuck::bytes_of_mut(p).fill(0x5A);
        p.set_zero();
    }
    let bytes: &[u8] = bytemuck::cast_slice(cloud.points());
    assert_eq!(bytes.len(), 8 * std::mem::size_of::<PointWithInfo>());
    assert!(bytes.iter().all(|&b| b == 0));
}

// ────────────────── PointCloud ──────────────────

#[test]
fn empty_cloud_operations() {
    let mut cloud = PointCloud::new();
    assert!(cloud.is_empty());
    cloud.clear();
    cloud.resize(0);
    cloud.reserve(0);
    assert_eq!(cloud.len(), 0);
    assert!(cloud.positions_in_reference_frame().is_empty());
}

#[test]
fn resize_up_down_up_zeroes_reappearing_slots() {
    let mut cloud = PointCloud::with_len(3);
    *cloud[2].weight_mut() = 9.0;
    cloud.resize(1);
    cloud.resize(3);
    assert_eq!(cloud[2], PointWithInfo::zeroed());
}

// ────────────────── PLY ──────────────────

#[test]
fn non_finite_values_are_written_and_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nonfinite.ply");
    let points = vec![PointWithInfo::new(
        [f32::INFINITY, f32::NEG_INFINITY, f32::NAN, 1.0],
        [f32::INFINITY, -1.0, 1e9, 0.0],
        0.0,
    )];

    assert!(write_ply(&path, &points, ""));
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().last(), Some("inf -inf NaN 255 0 255 0"));

    let loaded = read_ply(&path).unwrap();
    assert_eq!(loaded[0].position()[0], f32::INFINITY);
    assert_eq!(loaded[0].position()[1], f32::NEG_INFINITY);
    assert!(loaded[0].position()[2].is_nan());
}

#[test]
fn exporting_into_a_directory_path_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!write_ply(dir.path(), &[PointWithInfo::zeroed()], ""));
    assert!(matches!(
        try_write_ply(dir.path(), &[PointWithInfo::zeroed()], ""),
        Err(PlyError::Open { .. })
    ));
}

#[test]
fn reading_garbage_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.ply");
    std::fs::write(&path, [0xFFu8, 0x00, 0x13, 0x37]).unwrap();
    assert!(matches!(read_ply(&path), Err(PlyError::InvalidData(_))));
}
