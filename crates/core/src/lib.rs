pub mod cloud;
pub mod point;
pub mod traits;
pub mod transform;

pub use cloud::{PointCloud, PointWithInfoVec};
pub use point::{PointWithInfo, POINT_ALIGNMENT};
pub use traits::{HasColor, HasPosition, HasWeight};
pub use transform::RigidTransform;
