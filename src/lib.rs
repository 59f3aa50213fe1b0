//! Aligned point storage, posed point clouds and ASCII PLY export.
//!
//! Re-exports the workspace crates under one name.

pub use posecloud_aligned as aligned;
pub use posecloud_core as cloud;
pub use posecloud_io as io;

pub use posecloud_aligned::{AlignedAllocator, AlignedVec, AllocError, DEFAULT_ALIGNMENT};
pub use posecloud_core::{PointCloud, PointWithInfo, PointWithInfoVec, RigidTransform, POINT_ALIGNMENT};
pub use posecloud_io::{read_ply, try_write_ply, write_ply, PlyError};
