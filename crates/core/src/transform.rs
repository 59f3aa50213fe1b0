use nalgebra::{Matrix3, Vector3};

/// Rotation plus translation: `p' = R * p + t`.
///
/// Rotation is stored row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    pub rotation: [[f32; 3]; 3],
    pub translation: [f32; 3],
}

impl RigidTransform {
    pub fn identity() -> Self {
        Self {
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0, 0.0, 0.0],
        }
    }

    pub fn new(rotation: [[f32; 3]; 3], translation: [f32; 3]) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn from_translation(translation: [f32; 3]) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    pub fn is_identity(&self, eps: f32) -> bool {
        let id = Self::identity();
        let rotation_close = (0..3)
            .all(|r| (0..3).all(|c| (self.rotation[r][c] - id.rotation[r][c]).abs() <= eps));
        rotation_close && self.translation.iter().all(|t| t.abs() <= eps)
    }

    /// Apply the rigid transform to a single point: R * p + t
    pub fn apply_to_point(&self, p: &[f32; 3]) -> [f32; 3] {
        let r = &self.rotation;
        let t = &self.translation;
        [
            r[0][0] * p[0] + r[0][1] * p[1] + r[0][2] * p[2] + t[0],
            r[1][0] * p[0] + r[1][1] * p[1] + r[1][2] * p[2] + t[1],
            r[2][0] * p[0] + r[2][1] * p[1] + r[2][2] * p[2] + t[2],
        ]
    }

    /// Multiply the 4x4 form with `[x, y, z, w]`. The translation is scaled
    /// by `w`, so directions (`w == 0`) are only rotated.
    pub fn apply_to_homogeneous(&self, p: &[f32; 4]) -> [f32; 4] {
        let r = &self.rotation;
        let t = &self.translation;
        let w = p[3];
        [
            r[0][0] * p[0] + r[0][1] * p[1] + r[0][2] * p[2] + t[0] * w,
            r[1][0] * p[0] + r[1][1] * p[1] + r[1][2] * p[2] + t[1] * w,
            r[2][0] * p[0] + r[2][1] * p[1] + r[2][2] * p[2] + t[2] * w,
            w,
        ]
    }

    /// Compose two transforms: apply `self` first, then `other`.
    ///
    /// Result: R_new = other.R * self.R, t_new = other.R * self.t + other.t
    pub fn compose(&self, other: &RigidTransform) -> RigidTransform {
        let r_self = mat3_from_arrays(&self.rotation);
        let r_other = mat3_from_arrays(&other.rotation);
        let t_self = Vector3::from(self.translation);
        let t_other = Vector3::from(other.translation);

        let r_new = r_other * r_self;
        let t_new = r_other * t_self + t_other;

        RigidTransform {
            rotation: mat3_to_arrays(&r_new),
            translation: [t_new[0], t_new[1], t_new[2]],
        }
    }

    /// The transform undoing `self`: R^T, -R^T * t.
    pub fn inverse(&self) -> RigidTransform {
        let r_t = mat3_from_arrays(&self.rotation).transpose();
        let t = -(r_t * Vector3::from(self.translation));
        RigidTransform {
            rotation: mat3_to_arrays(&r_t),
            translation: [t[0], t[1], t[2]],
        }
    }

    /// Row-major 4x4 homogeneous matrix.
    pub fn to_matrix(&self) -> [[f32; 4]; 4] {
        let r = &self.rotation;
        let t = &self.translation;
        [
            [r[0][0], r[0][1], r[0][2], t[0]],
            [r[1][0], r[1][1], r[1][2], t[1]],
            [r[2][0], r[2][1], r[2][2], t[2]],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

fn mat3_to_arrays(m: &Matrix3<f32>) -> [[f32; 3]; 3] {
    [
        [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
        [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
        [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
    ]
}

fn mat3_from_arrays(a: &[[f32; 3]; 3]) -> Matrix3<f32> {
    Matrix3::new(
        a[0][0], a[0][1], a[0][2], a[1][0], a[1][1], a[1][2], a[2][0], a[2][1], a[2][2],
    )
}
