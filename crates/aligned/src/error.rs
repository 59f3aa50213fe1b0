use thiserror::Error;

/// Why an aligned allocation could not be made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    /// The requested element count does not fit in `isize::MAX` bytes.
    #[error("capacity overflow: {count} elements of {elem_size} bytes")]
    CapacityOverflow { count: usize, elem_size: usize },
    /// The platform allocator returned no memory.
    #[error("out of memory: failed to allocate {size} bytes aligned to {align}")]
    OutOfMemory { size: usize, align: usize },
}
