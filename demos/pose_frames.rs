use posecloud_core::{PointCloud, PointWithInfo, RigidTransform};

fn main() {
    let mut cloud = PointCloud::new();
    cloud.points_mut().extend_from_slice(&[
        PointWithInfo::new([1.0, 0.0, 0.0, 1.0], [255.0, 0.0, 0.0, 255.0], 1.0),
        PointWithInfo::new([0.0, 1.0, 0.0, 1.0], [0.0, 255.0, 0.0, 255.0], 1.0),
    ]);

    // Camera rotated 90 degrees about z and moved 2 m along x.
    let pose = RigidTransform::new(
        [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
        [2.0, 0.0, 0.0],
    );
    cloud.set_pose(pose);

    for (local, world) in cloud.iter().zip(cloud.positions_in_reference_frame()) {
        println!("{}  ->  {:?}", local, world);
    }
    println!("Pose inverse: {:?}", cloud.pose().inverse());
}
