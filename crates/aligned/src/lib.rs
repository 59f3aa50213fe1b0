//! Heap storage whose base address is aligned to a compile-time byte
//! boundary.
//!
//! [`AlignedAllocator`] hands out raw blocks; [`AlignedVec`] is the growable
//! container built on it that point records live in.

pub mod allocator;
pub mod error;
mod raw;
pub mod vec;

pub use allocator::{AlignedAllocator, DEFAULT_ALIGNMENT};
pub use error::AllocError;
pub use vec::AlignedVec;
