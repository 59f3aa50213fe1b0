use std::ops::{Index, IndexMut};

use posecloud_aligned::AlignedVec;

use crate::{PointWithInfo, RigidTransform, POINT_ALIGNMENT};

/// Point records in aligned storage. Every record starts on a
/// [`POINT_ALIGNMENT`] boundary.
pub type PointWithInfoVec = AlignedVec<PointWithInfo, POINT_ALIGNMENT>;

/// An ordered set of points together with the pose of the frame they are
/// expressed in.
///
/// The pose is kept apart from the points: changing it never rewrites a
/// stored position, and editing points never touches the pose. A point's
/// index is stable until the cloud is cleared, truncated or the caller
/// rearranges [`PointCloud::points_mut`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointCloud {
    points: PointWithInfoVec,
    pose: RigidTransform,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: PointWithInfoVec) -> Self {
        Self::from_points_with_pose(points, RigidTransform::identity())
    }

    pub fn from_points_with_pose(points: PointWithInfoVec, pose: RigidTransform) -> Self {
        Self { points, pose }
    }

    /// `n` zeroed points with an identity pose.
    pub fn with_len(n: usize) -> Self {
        Self::with_len_and_pose(n, RigidTransform::identity())
    }

    pub fn with_len_and_pose(n: usize, pose: RigidTransform) -> Self {
        let mut points = PointWithInfoVec::with_capacity(n);
        points.resize(n, PointWithInfo::zeroed());
        Self { points, pose }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    pub fn points(&self) -> &PointWithInfoVec {
        &self.points
    }

    /// Bulk access for appending or editing many records at once.
    pub fn points_mut(&mut self) -> &mut PointWithInfoVec {
        &mut self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PointWithInfo> {
        self.points.iter()
    }

    /// Removes every point. The pose is left as is.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn reserve(&mut self, additional: usize) {
        self.points.reserve(additional);
    }

    /// Appends zeroed points or drops points from the end.
    pub fn resize(&mut self, n: usize) {
        self.points.resize(n, PointWithInfo::zeroed());
    }

    pub fn pose(&self) -> &RigidTransform {
        &self.pose
    }

    pub fn pose_mut(&mut self) -> &mut RigidTransform {
        &mut self.pose
    }

    pub fn set_pose(&mut self, pose: RigidTransform) {
        self.pose = pose;
    }

    /// Positions mapped through the pose into the reference frame.
    ///
    /// The stored points are not modified.
    pub fn positions_in_reference_frame(&self) -> Vec<[f32; 4]> {
        self.points
            .iter()
            .map(|p| self.pose.apply_to_homogeneous(p.position()))
            .collect()
    }
}

impl Index<usize> for PointCloud {
    type Output = PointWithInfo;

    fn index(&self, i: usize) -> &PointWithInfo {
        debug_assert!(i < self.len(), "point index {} out of range for cloud of {}", i, self.len());
        &self.points[i]
    }
}

impl IndexMut<usize> for PointCloud {
    fn index_mut(&mut self, i: usize) -> &mut PointWithInfo {
        debug_assert!(i < self.len(), "point index {} out of range for cloud of {}", i, self.len());
        &mut self.points[i]
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a PointWithInfo;
    type IntoIter = std::slice::Iter<'a, PointWithInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
