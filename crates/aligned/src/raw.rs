//! Aligned block allocation behind one entry point.
//!
//! Two strategies are always compiled: `system` hands the layout to the
//! global allocator, which honours the alignment natively on every platform
//! std supports; `offset` only asks the global allocator for word alignment,
//! bumps the pointer to the requested boundary and remembers the real block
//! start in the word just below the returned address. The `over-allocate`
//! feature picks `offset`.

use std::alloc::Layout;

/// Allocates a block for `layout`. Returns null on failure.
///
/// # Safety
///
/// `layout.size()` must be non-zero.
pub(crate) unsafe fn alloc(layout: Layout) -> *mut u8 {
    if cfg!(feature = "over-allocate") {
        unsafe { offset::alloc(layout) }
    } else {
        unsafe { system::alloc(layout) }
    }
}

/// Releases a block obtained from [`alloc`].
///
/// # Safety
///
/// `ptr` must come from [`alloc`] called with the same `layout`, and must not
/// have been released already.
pub(crate) unsafe fn dealloc(ptr: *mut u8, layout: Layout) {
    if cfg!(feature = "over-allocate") {
        unsafe { offset::dealloc(ptr, layout) }
    } else {
        unsafe { system::dealloc(ptr, layout) }
    }
}

pub(crate) mod system {
    use std::alloc::{self, Layout};

    pub(crate) unsafe fn alloc(layout: Layout) -> *mut u8 {
        unsafe { alloc::alloc(layout) }
    }

    pub(crate) unsafe fn dealloc(ptr: *mut u8, layout: Layout) {
        unsafe { alloc::dealloc(ptr, layout) }
    }
}

pub(crate) mod offset {
    use std::alloc::{self, Layout};
    use std::mem::{align_of, size_of};
    use std::ptr;

    const HEADER: usize = size_of::<*mut u8>();

    /// Layout of the underlying block: room for the header word, the worst
    /// case bump to the next boundary, and the payload.
    fn backing_layout(layout: Layout) -> Option<Layout> {
        let size = layout
            .size()
            .checked_add(layout.align())?
            .checked_add(HEADER)?;
        Layout::from_size_align(size, align_of::<*mut u8>()).ok()
    }

    pub(crate) unsafe fn alloc(layout: Layout) -> *mut u8 {
        let Some(backing) = backing_layout(layout) else {
            return ptr::null_mut();
        };
        let base = unsafe { alloc::alloc(backing) };
        if base.is_null() {
            return base;
        }

        let align = layout.align();
        let first = base as usize + HEADER;
        let aligned = (first + align - 1) & !(align - 1);
        let offset = aligned - base as usize;

        unsafe {
            let user = base.add(offset);
            user.sub(HEADER).cast::<*mut u8>().write_unaligned(base);
            user
        }
    }

    pub(crate) unsafe fn dealloc(ptr: *mut u8, layout: Layout) {
        let base = unsafe { ptr.sub(HEADER).cast::<*mut u8>().read_unaligned() };
        if let Some(backing) = backing_layout(layout) {
            unsafe { alloc::dealloc(base, backing) }
        }
    }
}
