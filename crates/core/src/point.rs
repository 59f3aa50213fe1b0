use std::fmt;
use std::mem::size_of;

use bytemuck::{Pod, Zeroable};
use posecloud_aligned::DEFAULT_ALIGNMENT;

/// Byte boundary that point records and their storage are laid out for.
pub const POINT_ALIGNMENT: usize = DEFAULT_ALIGNMENT;

const PAYLOAD_BYTES: usize = 9 * size_of::<f32>();
const PAD_BYTES: usize = (POINT_ALIGNMENT - PAYLOAD_BYTES % POINT_ALIGNMENT) % POINT_ALIGNMENT;

/// One point: homogeneous position, RGBA color and a confidence weight.
///
/// Color shares the position's `f32` width so the record is a flat run of
/// scalars. Explicit trailing padding rounds the size up to a multiple of
/// [`POINT_ALIGNMENT`], so in an aligned array every record starts on the
/// boundary. There is no implicit compiler padding, which is what lets the
/// record be viewed as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointWithInfo {
    position: [f32; 4],
    color: [f32; 4],
    weight: f32,
    _pad: [u8; PAD_BYTES],
}

const _: () = assert!(size_of::<PointWithInfo>() % POINT_ALIGNMENT == 0);
const _: () = assert!(size_of::<PointWithInfo>() == PAYLOAD_BYTES + PAD_BYTES);

impl PointWithInfo {
    /// All fields and padding set to zero.
    pub fn zeroed() -> Self {
        <Self as Zeroable>::zeroed()
    }

    pub fn new(position: [f32; 4], color: [f32; 4], weight: f32) -> Self {
        Self {
            position,
            color,
            weight,
            _pad: [0; PAD_BYTES],
        }
    }

    /// Homogeneous `[x, y, z, w]`.
    pub fn position(&self) -> &[f32; 4] {
        &self.position
    }

    pub fn position_mut(&mut self) -> &mut [f32; 4] {
        &mut self.position
    }

    /// `[x, y, z]` without the homogeneous coordinate.
    pub fn xyz(&self) -> [f32; 3] {
        [self.position[0], self.position[1], self.position[2]]
    }

    /// `[r, g, b, a]`, nominally in `0..=255`.
    pub fn color(&self) -> &[f32; 4] {
        &self.color
    }

    pub fn color_mut(&mut self) -> &mut [f32; 4] {
        &mut self.color
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn weight_mut(&mut self) -> &mut f32 {
        &mut self.weight
    }

    /// Resets every byte of the record, padding included.
    pub fn set_zero(&mut self) {
        *self = Self::zeroed();
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for PointWithInfo {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl fmt::Display for PointWithInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z, w] = self.position;
        let [r, g, b, a] = self.color;
        write!(
            f,
            "[{} {} {} {}] <{} {} {} {}> w: {}",
            x, y, z, w, r, g, b, a, self.weight
        )
    }
}
