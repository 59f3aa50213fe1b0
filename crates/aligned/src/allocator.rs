use std::alloc::Layout;
use std::fmt;
use std::marker::PhantomData;
use std::mem::{align_of, size_of};
use std::ptr::{self, NonNull};

use crate::error::AllocError;
use crate::raw;

/// Alignment used when none is given: one 128-bit SIMD register.
pub const DEFAULT_ALIGNMENT: usize = 16;

/// Stateless allocator whose blocks start on an `ALIGN`-byte boundary.
///
/// The allocator carries no data, so every instance with the same `ALIGN`
/// can release memory handed out by any other, regardless of element type
/// it was rebound from. Equality reflects that: two allocators with the same
/// alignment always compare equal.
///
/// The effective alignment is `max(ALIGN, align_of::<T>())`, so an
/// over-aligned `T` is never under-aligned by a small `ALIGN`.
pub struct AlignedAllocator<T, const ALIGN: usize = DEFAULT_ALIGNMENT> {
    _marker: PhantomData<fn() -> T>,
}

impl<T, const ALIGN: usize> AlignedAllocator<T, ALIGN> {
    const POWER_OF_TWO: () = assert!(
        ALIGN.is_power_of_two(),
        "AlignedAllocator alignment must be a power of two"
    );

    /// Alignment of every non-empty block this allocator returns.
    pub const ALIGNMENT: usize = if ALIGN > align_of::<T>() {
        ALIGN
    } else {
        align_of::<T>()
    };

    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::POWER_OF_TWO;
        Self {
            _marker: PhantomData,
        }
    }

    /// The same allocator for another element type. Alignment is kept.
    pub const fn rebind<U>(&self) -> AlignedAllocator<U, ALIGN> {
        AlignedAllocator::new()
    }

    /// A non-null, `ALIGNMENT`-aligned pointer that owns no memory.
    ///
    /// Returned for zero-sized requests.
    pub const fn dangling() -> NonNull<T> {
        let addr = ptr::null_mut::<u8>().wrapping_add(Self::ALIGNMENT);
        // SAFETY: ALIGNMENT is a power of two and therefore non-zero.
        unsafe { NonNull::new_unchecked(addr.cast::<T>()) }
    }

    /// Layout of a block holding `n` contiguous `T`.
    pub fn layout_for(&self, n: usize) -> Result<Layout, AllocError> {
        Layout::array::<T>(n)
            .and_then(|layout| layout.align_to(Self::ALIGNMENT))
            .map_err(|_| AllocError::CapacityOverflow {
                count: n,
                elem_size: size_of::<T>(),
            })
    }

    /// Allocates uninitialized space for `n` elements.
    ///
    /// A request of zero bytes (`n == 0` or zero-sized `T`) does not touch
    /// the heap and yields [`Self::dangling`].
    pub fn allocate(&self, n: usize) -> Result<NonNull<T>, AllocError> {
        let layout = self.layout_for(n)?;
        if layout.size() == 0 {
            return Ok(Self::dangling());
        }

        // SAFETY: the layout is non-empty.
        let ptr = unsafe { raw::alloc(layout) };
        NonNull::new(ptr.cast::<T>()).ok_or(AllocError::OutOfMemory {
            size: layout.size(),
            align: layout.align(),
        })
    }

    /// Releases a block returned by [`Self::allocate`].
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate(n)` on an allocator equal
    /// to this one, with the same `n`, and must not be released twice. The
    /// elements are not dropped.
    pub unsafe fn deallocate(&self, ptr: NonNull<T>, n: usize) {
        let Ok(layout) = self.layout_for(n) else {
            return;
        };
        if layout.size() == 0 {
            return;
        }
        unsafe { raw::dealloc(ptr.as_ptr().cast::<u8>(), layout) }
    }
}

impl<T, const ALIGN: usize> Clone for AlignedAllocator<T, ALIGN> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const ALIGN: usize> Copy for AlignedAllocator<T, ALIGN> {}

impl<T, const ALIGN: usize> Default for AlignedAllocator<T, ALIGN> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const ALIGN: usize> fmt::Debug for AlignedAllocator<T, ALIGN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedAllocator")
            .field("align", &Self::ALIGNMENT)
            .finish()
    }
}

impl<T, U, const ALIGN: usize> PartialEq<AlignedAllocator<U, ALIGN>> for AlignedAllocator<T, ALIGN> {
    fn eq(&self, _other: &AlignedAllocator<U, ALIGN>) -> bool {
        true
    }
}

impl<T, const ALIGN: usize> Eq for AlignedAllocator<T, ALIGN> {}
