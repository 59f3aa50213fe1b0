use std::alloc::{handle_alloc_error, Layout};
use std::fmt;
use std::mem::size_of;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use crate::allocator::{AlignedAllocator, DEFAULT_ALIGNMENT};
use crate::error::AllocError;

const MIN_NON_ZERO_CAP: usize = 4;

/// A growable array whose buffer starts on an `ALIGN`-byte boundary.
///
/// Storage comes from [`AlignedAllocator`]; every reallocation keeps the
/// alignment and preserves element order. When `size_of::<T>()` is a
/// multiple of `ALIGN`, every element is `ALIGN`-aligned, not just the first.
pub struct AlignedVec<T, const ALIGN: usize = DEFAULT_ALIGNMENT> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    alloc: AlignedAllocator<T, ALIGN>,
}

// SAFETY: AlignedVec owns its elements exactly like Vec<T> does.
unsafe impl<T: Send, const ALIGN: usize> Send for AlignedVec<T, ALIGN> {}
unsafe impl<T: Sync, const ALIGN: usize> Sync for AlignedVec<T, ALIGN> {}

impl<T, const ALIGN: usize> AlignedVec<T, ALIGN> {
    const IS_ZST: bool = size_of::<T>() == 0;

    pub const fn new() -> Self {
        Self {
            ptr: AlignedAllocator::<T, ALIGN>::dangling(),
            cap: if Self::IS_ZST { usize::MAX } else { 0 },
            len: 0,
            alloc: AlignedAllocator::new(),
        }
    }

    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through
    /// [`handle_alloc_error`] if the allocation fails.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut v = Self::new();
        v.grow_to(capacity);
        v
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        let mut v = Self::new();
        v.try_grow_to(capacity)?;
        Ok(v)
    }

    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        let mut v = Self::with_capacity(items.len());
        v.extend_from_slice(items);
        v
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn allocator(&self) -> &AlignedAllocator<T, ALIGN> {
        &self.alloc
    }

    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialized.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: the first `len` slots are initialized and uniquely borrowed.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Ensures room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve(additional) {
            alloc_failure(err);
        }
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(AllocError::CapacityOverflow {
                count: usize::MAX,
                elem_size: size_of::<T>(),
            })?;
        if required <= self.cap {
            return Ok(());
        }
        let doubled = self.cap.saturating_mul(2);
        self.try_grow_to(required.max(doubled).max(MIN_NON_ZERO_CAP))
    }

    pub fn push(&mut self, value: T) {
        if self.len == self.cap {
            self.reserve(1);
        }
        // SAFETY: len < cap after the reserve above.
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was initialized and is now outside the live range.
        Some(unsafe { self.ptr.as_ptr().add(self.len).read() })
    }

    /// Drops every element past `len`. Capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = ptr::slice_from_raw_parts_mut(
            // SAFETY: len < self.len, so the offset stays in bounds.
            unsafe { self.ptr.as_ptr().add(len) },
            self.len - len,
        );
        // Shrink first so a panicking Drop cannot cause a double drop.
        self.len = len;
        unsafe { ptr::drop_in_place(tail) };
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Grows by appending `f()` results or shrinks from the end.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len - self.len);
        while self.len < new_len {
            self.push(f());
        }
    }

    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_with(new_len, || value.clone());
    }

    pub fn extend_from_slice(&mut self, items: &[T])
    where
        T: Clone,
    {
        self.reserve(items.len());
        for item in items {
            self.push(item.clone());
        }
    }

    fn grow_to(&mut self, new_cap: usize) {
        if let Err(err) = self.try_grow_to(new_cap) {
            alloc_failure(err);
        }
    }

    fn try_grow_to(&mut self, new_cap: usize) -> Result<(), AllocError> {
        if new_cap <= self.cap {
            return Ok(());
        }
        let new_ptr = self.alloc.allocate(new_cap)?;
        if self.cap > 0 {
            // SAFETY: both blocks hold at least `len` elements and are
            // distinct; the old block came from `allocate(self.cap)`.
            unsafe {
                ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
                self.alloc.deallocate(self.ptr, self.cap);
            }
        }
        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }
}

fn alloc_failure(err: AllocError) -> ! {
    match err {
        AllocError::OutOfMemory { size, align } => match Layout::from_size_align(size, align) {
            Ok(layout) => handle_alloc_error(layout),
            Err(_) => panic!("{err}"),
        },
        AllocError::CapacityOverflow { .. } => panic!("capacity overflow"),
    }
}

impl<T, const ALIGN: usize> Drop for AlignedVec<T, ALIGN> {
    fn drop(&mut self) {
        // SAFETY: the live range is initialized; the block came from
        // `allocate(self.cap)` when cap is non-zero.
        unsafe {
            ptr::drop_in_place(self.as_mut_slice());
            if !Self::IS_ZST && self.cap > 0 {
                self.alloc.deallocate(self.ptr, self.cap);
            }
        }
    }
}

impl<T, const ALIGN: usize> Deref for AlignedVec<T, ALIGN> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const ALIGN: usize> DerefMut for AlignedVec<T, ALIGN> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const ALIGN: usize> AsRef<[T]> for AlignedVec<T, ALIGN> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, const ALIGN: usize> AsMut<[T]> for AlignedVec<T, ALIGN> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Clone, const ALIGN: usize> Clone for AlignedVec<T, ALIGN> {
    fn clone(&self) -> Self {
        Self::from_slice(self)
    }
}

impl<T: fmt::Debug, const ALIGN: usize> fmt::Debug for AlignedVec<T, ALIGN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const ALIGN: usize> PartialEq for AlignedVec<T, ALIGN> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const ALIGN: usize> Eq for AlignedVec<T, ALIGN> {}

impl<T, const ALIGN: usize> Default for AlignedVec<T, ALIGN> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const ALIGN: usize> Extend<T> for AlignedVec<T, ALIGN> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<T, const ALIGN: usize> FromIterator<T> for AlignedVec<T, ALIGN> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::new();
        v.extend(iter);
        v
    }
}

impl<T, const ALIGN: usize> From<Vec<T>> for AlignedVec<T, ALIGN> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Clone, const ALIGN: usize> From<&[T]> for AlignedVec<T, ALIGN> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<'a, T, const ALIGN: usize> IntoIterator for &'a AlignedVec<T, ALIGN> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const ALIGN: usize> IntoIterator for &'a mut AlignedVec<T, ALIGN> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
