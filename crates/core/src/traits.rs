//! Per-point accessors consumed by exporters, so they work on any record
//! type rather than only [`PointWithInfo`](crate::PointWithInfo).

pub trait HasPosition {
    /// Homogeneous `[x, y, z, w]`.
    fn position(&self) -> [f32; 4];
}

pub trait HasColor {
    /// `[r, g, b, a]`, nominally in `0..=255`.
    fn color(&self) -> [f32; 4];
}

pub trait HasWeight {
    fn weight(&self) -> f32;
}

impl HasPosition for crate::PointWithInfo {
    fn position(&self) -> [f32; 4] {
        *crate::PointWithInfo::position(self)
    }
}

impl HasColor for crate::PointWithInfo {
    fn color(&self) -> [f32; 4] {
        *crate::PointWithInfo::color(self)
    }
}

impl HasWeight for crate::PointWithInfo {
    fn weight(&self) -> f32 {
        crate::PointWithInfo::weight(self)
    }
}
