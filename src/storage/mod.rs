//! Storage buffers backing a sequence.
//!
//! A buffer owns the raw capacity and the live element count. It knows
//! nothing about where the live window sits inside the capacity; that is the
//! concern of the location strategy, which drives the buffer through the raw
//! placement primitives defined here.

use core::fmt;
use core::mem::MaybeUninit;
use core::ptr;

use crate::error::StorageError;
use crate::index::Index;

#[cfg(feature = "alloc")]
pub(crate) mod alloc;

#[cfg(feature = "alloc")]
pub use self::alloc::{HeapBuffer, ReservedBuffer, SmallBuffer};

/// The storage strategy of a sequence: raw capacity plus a live element
/// count.
///
/// Elements occupy a contiguous sub-range of the capacity chosen by the
/// caller; slots outside that range are uninitialized memory. The caller is
/// responsible for keeping the length in agreement with the number of slots
/// it has initialized, and for destroying live elements before the buffer is
/// dropped: dropping a buffer releases its backing memory only.
pub trait SeqBuffer<T>: Sized {
    type Index: Index;

    /// An empty buffer with no live elements.
    const NEW: Self;

    /// The number of element slots currently backed by real memory.
    fn capacity(&self) -> usize;

    fn length(&self) -> Self::Index;

    /// # Safety
    /// The new length must agree with the number of initialized slots.
    unsafe fn set_length(&mut self, length: Self::Index);

    /// Pointer to the start of the capacity, not of the live window.
    fn data_ptr(&self) -> *const T;

    fn data_ptr_mut(&mut self) -> *mut T;

    /// Move the live elements into a new backing block of at least
    /// `min_capacity` slots, preferring `preferred` when the strategy
    /// permits. The live window currently begins at `start`; its position in
    /// the new block is chosen by `place`, which receives the actual new
    /// capacity. Returns the new window start.
    ///
    /// Fixed-capacity strategies always fail with `CapacityLimit`. On any
    /// failure the buffer is left completely unmodified.
    fn try_relocate<F>(
        &mut self,
        min_capacity: usize,
        preferred: usize,
        start: usize,
        place: F,
    ) -> Result<usize, StorageError>
    where
        F: FnOnce(usize) -> usize;

    #[inline]
    fn len_usize(&self) -> usize {
        self.length().to_usize()
    }

    /// Placement-construct `value` at the uninitialized slot `slot` and
    /// increment the length.
    ///
    /// # Safety
    /// The slot must lie within the capacity, outside the live window.
    #[inline]
    unsafe fn write(&mut self, slot: usize, value: T) {
        debug_assert!(self.len_usize() < self.capacity());
        debug_assert!(slot < self.capacity());
        let length = self.length();
        self.data_ptr_mut().add(slot).write(value);
        self.set_length(length.saturating_add(1));
    }

    /// Move the element out of `slot` and decrement the length.
    ///
    /// # Safety
    /// The slot must hold a live element, and it must be a boundary slot of
    /// the live window (or the caller must close the gap itself).
    #[inline]
    unsafe fn read(&mut self, slot: usize) -> T {
        debug_assert!(self.len_usize() > 0);
        debug_assert!(slot < self.capacity());
        let length = self.length();
        let value = self.data_ptr().add(slot).read();
        self.set_length(length.saturating_sub(1));
        value
    }

    /// Relocate the live sub-range `[start, end)` by `dist` slots, positive
    /// toward higher slots. Source slots left behind become uninitialized;
    /// the ranges may overlap.
    ///
    /// # Safety
    /// Both the source and destination ranges must lie within the capacity.
    #[inline]
    unsafe fn shift(&mut self, start: usize, end: usize, dist: isize) {
        debug_assert!(start <= end && end <= self.capacity());
        debug_assert!((start as isize + dist) >= 0);
        debug_assert!((end as isize + dist) as usize <= self.capacity());
        if start < end {
            let data = self.data_ptr_mut();
            ptr::copy(data.add(start), data.offset(start as isize + dist), end - start);
        }
    }
}

/// Local fixed storage: an inline array of exactly `N` slots. Never
/// allocates and never grows. This is the storage of `std::vec`-style
/// containers with the heap removed entirely.
pub struct InlineBuffer<T, I: Index, const N: usize> {
    data: [MaybeUninit<T>; N],
    length: I,
}

impl<T, I: Index, const N: usize> InlineBuffer<T, I, N> {
    const FITS: () = assert!(
        N <= I::MAX_USIZE,
        "Inline capacity exceeds the range of the size counter type"
    );

    pub const fn new() -> Self {
        let () = Self::FITS;
        Self {
            data: unsafe { MaybeUninit::uninit().assume_init() },
            length: I::ZERO,
        }
    }
}

impl<T, I: Index, const N: usize> Default for InlineBuffer<T, I, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, I: Index, const N: usize> SeqBuffer<T> for InlineBuffer<T, I, N> {
    type Index = I;

    const NEW: Self = Self::new();

    #[inline]
    fn capacity(&self) -> usize {
        N
    }

    #[inline]
    fn length(&self) -> I {
        self.length
    }

    #[inline]
    unsafe fn set_length(&mut self, length: I) {
        self.length = length;
    }

    #[inline]
    fn data_ptr(&self) -> *const T {
        self.data.as_ptr().cast()
    }

    #[inline]
    fn data_ptr_mut(&mut self) -> *mut T {
        self.data.as_mut_ptr().cast()
    }

    #[inline]
    fn try_relocate<F>(
        &mut self,
        _min_capacity: usize,
        _preferred: usize,
        _start: usize,
        _place: F,
    ) -> Result<usize, StorageError>
    where
        F: FnOnce(usize) -> usize,
    {
        Err(StorageError::CapacityLimit)
    }
}

impl<T, I: Index, const N: usize> fmt::Debug for InlineBuffer<T, I, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineBuffer")
            .field("capacity", &N)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}
