//! Heap-backed storage buffers.

use core::alloc::Layout;
use core::fmt;
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};

use alloc::alloc::{alloc as raw_alloc, dealloc as raw_dealloc};

use crate::error::StorageError;
use crate::index::Index;

use super::SeqBuffer;

#[inline]
fn array_layout<T>(count: usize) -> Result<Layout, StorageError> {
    Layout::array::<T>(count).map_err(StorageError::LayoutError)
}

/// Allocate an uninitialized array of `capacity` elements. Zero-sized
/// element types receive a dangling pointer and no allocation.
fn alloc_array<T>(capacity: usize) -> Result<NonNull<T>, StorageError> {
    let layout = array_layout::<T>(capacity)?;
    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }
    match NonNull::new(unsafe { raw_alloc(layout) }) {
        Some(data) => Ok(data.cast()),
        None => Err(StorageError::AllocError),
    }
}

/// # Safety
/// The pointer must have been returned by `alloc_array::<T>(capacity)`.
unsafe fn release_array<T>(data: NonNull<T>, capacity: usize) {
    if let Ok(layout) = array_layout::<T>(capacity) {
        if layout.size() > 0 {
            raw_dealloc(data.as_ptr().cast(), layout);
        }
    }
}

#[inline]
fn clamp_capacity<T, I: Index>(min_capacity: usize, preferred: usize) -> Result<usize, StorageError> {
    let capacity = if core::mem::size_of::<T>() == 0 {
        I::MAX_USIZE
    } else {
        preferred.max(min_capacity).min(I::MAX_USIZE)
    };
    if capacity < min_capacity {
        return Err(StorageError::CapacityLimit);
    }
    Ok(capacity)
}

/// Heap variable storage without a small buffer: pure heap backing, with the
/// first allocation deferred until the first insertion requires it.
pub struct HeapBuffer<T, I: Index = usize> {
    data: NonNull<T>,
    capacity: I,
    length: I,
}

impl<T, I: Index> HeapBuffer<T, I> {
    pub const fn new() -> Self {
        Self {
            data: NonNull::dangling(),
            capacity: I::ZERO,
            length: I::ZERO,
        }
    }
}

impl<T, I: Index> Default for HeapBuffer<T, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, I: Index> SeqBuffer<T> for HeapBuffer<T, I> {
    type Index = I;

    const NEW: Self = Self::new();

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity.to_usize()
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
        self.data.as_ptr()
    }

    #[inline]
    fn data_ptr_mut(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    fn try_relocate<F>(
        &mut self,
        min_capacity: usize,
        preferred: usize,
        start: usize,
        place: F,
    ) -> Result<usize, StorageError>
    where
        F: FnOnce(usize) -> usize,
    {
        let capacity = clamp_capacity::<T, I>(min_capacity, preferred)?;
        let data = alloc_array::<T>(capacity)?;
        let length = self.length.to_usize();
        let new_start = place(capacity);
        debug_assert!(new_start + length <= capacity);
        unsafe {
            ptr::copy_nonoverlapping(
                self.data.as_ptr().add(start),
                data.as_ptr().add(new_start),
                length,
            );
        }
        if self.capacity != I::ZERO {
            unsafe { release_array(self.data, self.capacity.to_usize()) };
        }
        self.data = data;
        self.capacity = I::from_usize(capacity);
        Ok(new_start)
    }
}

impl<T, I: Index> Drop for HeapBuffer<T, I> {
    fn drop(&mut self) {
        if self.capacity != I::ZERO {
            unsafe { release_array(self.data, self.capacity.to_usize()) };
        }
    }
}

impl<T, I: Index> fmt::Debug for HeapBuffer<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapBuffer")
            .field("capacity", &self.capacity)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// Heap fixed storage: one allocation of exactly `N` slots, made lazily when
/// the first insertion needs it. Behaves like a vector whose capacity was
/// pre-reserved and is never allowed to grow past the reserve.
///
/// The committed capacity reads as zero until the allocation exists, so the
/// ordinary grow path of the facade performs the first allocation; a second
/// relocation request is a genuine exhaustion and fails.
pub struct ReservedBuffer<T, I: Index, const N: usize> {
    data: NonNull<T>,
    allocated: bool,
    length: I,
}

impl<T, I: Index, const N: usize> ReservedBuffer<T, I, N> {
    const FITS: () = assert!(
        N <= I::MAX_USIZE,
        "Reserved capacity exceeds the range of the size counter type"
    );

    pub const fn new() -> Self {
        let () = Self::FITS;
        Self {
            data: NonNull::dangling(),
            allocated: false,
            length: I::ZERO,
        }
    }
}

impl<T, I: Index, const N: usize> Default for ReservedBuffer<T, I, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, I: Index, const N: usize> SeqBuffer<T> for ReservedBuffer<T, I, N> {
    type Index = I;

    const NEW: Self = Self::new();

    #[inline]
    fn capacity(&self) -> usize {
        if self.allocated {
            N
        } else {
            0
        }
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
        self.data.as_ptr()
    }

    #[inline]
    fn data_ptr_mut(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    fn try_relocate<F>(
        &mut self,
        min_capacity: usize,
        _preferred: usize,
        _start: usize,
        place: F,
    ) -> Result<usize, StorageError>
    where
        F: FnOnce(usize) -> usize,
    {
        if self.allocated || min_capacity > N {
            return Err(StorageError::CapacityLimit);
        }
        // First use: the buffer is empty, so there is nothing to move.
        debug_assert!(self.length == I::ZERO);
        self.data = alloc_array::<T>(N)?;
        self.allocated = true;
        Ok(place(N))
    }
}

impl<T, I: Index, const N: usize> Drop for ReservedBuffer<T, I, N> {
    fn drop(&mut self) {
        if self.allocated {
            unsafe { release_array(self.data, N) };
        }
    }
}

impl<T, I: Index, const N: usize> fmt::Debug for ReservedBuffer<T, I, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReservedBuffer")
            .field("capacity", &self.capacity())
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// Heap variable storage with a small buffer: insertions use an inline
/// buffer of `N` slots until one would not fit, at which point the live
/// elements are promoted to a heap allocation sized by the growth policy.
/// The inline slots are embedded in the container and are never used again
/// after promotion.
pub struct SmallBuffer<T, I: Index, const N: usize> {
    inline: [MaybeUninit<T>; N],
    heap: Option<NonNull<T>>,
    heap_capacity: I,
    length: I,
}

impl<T, I: Index, const N: usize> SmallBuffer<T, I, N> {
    const FITS: () = assert!(
        N <= I::MAX_USIZE,
        "Small buffer capacity exceeds the range of the size counter type"
    );

    pub const fn new() -> Self {
        let () = Self::FITS;
        Self {
            inline: unsafe { MaybeUninit::uninit().assume_init() },
            heap: None,
            heap_capacity: I::ZERO,
            length: I::ZERO,
        }
    }

    /// Whether the elements have been promoted to the heap.
    #[inline]
    pub fn is_spilled(&self) -> bool {
        self.heap.is_some()
    }
}

impl<T, I: Index, const N: usize> Default for SmallBuffer<T, I, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, I: Index, const N: usize> SeqBuffer<T> for SmallBuffer<T, I, N> {
    type Index = I;

    const NEW: Self = Self::new();

    #[inline]
    fn capacity(&self) -> usize {
        match self.heap {
            None => N,
            Some(_) => self.heap_capacity.to_usize(),
        }
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
        match self.heap {
            None => self.inline.as_ptr().cast(),
            Some(data) => data.as_ptr(),
        }
    }

    #[inline]
    fn data_ptr_mut(&mut self) -> *mut T {
        match self.heap {
            None => self.inline.as_mut_ptr().cast(),
            Some(data) => data.as_ptr(),
        }
    }

    fn try_relocate<F>(
        &mut self,
        min_capacity: usize,
        preferred: usize,
        start: usize,
        place: F,
    ) -> Result<usize, StorageError>
    where
        F: FnOnce(usize) -> usize,
    {
        let capacity = clamp_capacity::<T, I>(min_capacity, preferred)?;
        let data = alloc_array::<T>(capacity)?;
        let length = self.length.to_usize();
        let new_start = place(capacity);
        debug_assert!(new_start + length <= capacity);
        unsafe {
            ptr::copy_nonoverlapping(
                self.data_ptr().add(start),
                data.as_ptr().add(new_start),
                length,
            );
        }
        if let Some(old) = self.heap {
            unsafe { release_array(old, self.heap_capacity.to_usize()) };
        }
        self.heap = Some(data);
        self.heap_capacity = I::from_usize(capacity);
        Ok(new_start)
    }
}

impl<T, I: Index, const N: usize> Drop for SmallBuffer<T, I, N> {
    fn drop(&mut self) {
        if let Some(data) = self.heap {
            unsafe { release_array(data, self.heap_capacity.to_usize()) };
        }
    }
}

impl<T, I: Index, const N: usize> fmt::Debug for SmallBuffer<T, I, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmallBuffer")
            .field("capacity", &self.capacity())
            .field("length", &self.length)
            .field("spilled", &self.is_spilled())
            .finish_non_exhaustive()
    }
}
