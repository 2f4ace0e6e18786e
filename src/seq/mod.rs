//! The sequence container.

use core::borrow::{Borrow, BorrowMut};
use core::fmt;
use core::mem::ManuallyDrop;
use core::ops::{Deref, DerefMut};
use core::ptr;
use core::slice;

use const_default::ConstDefault;

use crate::config::{Inline, Profile, SeqConfig};
use crate::error::InsertionError;
use crate::index::Index;
use crate::location::{Front, Location, LocationState};
use crate::storage::SeqBuffer;

#[cfg(feature = "alloc")]
use crate::config::{Alloc, Reserved, Small};

pub use self::into_iter::IntoIter;

mod into_iter;

/// A sequence with local fixed storage of `N` slots.
pub type InlineSeq<T, const N: usize, L = Front> = Sequence<T, Inline<N, L>>;

#[cfg(feature = "alloc")]
/// A sequence with plain growable heap storage.
pub type HeapSeq<T, L = Front> = Sequence<T, Alloc<L>>;

#[cfg(feature = "alloc")]
/// A sequence with a lazily reserved, fixed heap capacity of `N` slots.
pub type ReservedSeq<T, const N: usize, L = Front> = Sequence<T, Reserved<N, L>>;

#[cfg(feature = "alloc")]
/// A sequence with `N` inline slots, spilling to the heap when they are
/// exhausted.
pub type SmallSeq<T, const N: usize, L = Front> = Sequence<T, Small<N, L>>;

#[cold]
#[inline(never)]
pub(crate) fn index_panic() -> ! {
    panic!("Invalid element index");
}

/// A double-ended sequence container whose storage, growth and element
/// placement policies are chosen at compile time by the configuration
/// parameter `C`.
///
/// The live elements always form one contiguous window, so slice access is
/// available regardless of configuration. Where that window sits inside the
/// backing capacity, and therefore which operations are cheap, is the
/// location policy's concern; see the [`location`](crate::location) module.
#[cfg(feature = "alloc")]
pub struct Sequence<T, C: SeqConfig = Alloc> {
    buffer: C::Buffer<T>,
    state: <C::Location as Location>::State<C::Index>,
}

/// A double-ended sequence container whose storage, growth and element
/// placement policies are chosen at compile time by the configuration
/// parameter `C`.
///
/// The live elements always form one contiguous window, so slice access is
/// available regardless of configuration. Where that window sits inside the
/// backing capacity, and therefore which operations are cheap, is the
/// location policy's concern; see the [`location`](crate::location) module.
#[cfg(not(feature = "alloc"))]
pub struct Sequence<T, C: SeqConfig> {
    buffer: C::Buffer<T>,
    state: <C::Location as Location>::State<C::Index>,
}

impl<T, C: SeqConfig> Sequence<T, C> {
    /// Constructs a new, empty sequence.
    ///
    /// Heap-backed configurations perform no allocation until an element is
    /// pushed.
    pub const fn new() -> Self {
        Self {
            buffer: <C::Buffer<T> as SeqBuffer<T>>::NEW,
            state: <<C::Location as Location>::State<C::Index> as LocationState<C::Index>>::EMPTY,
        }
    }

    /// The configured policies of this sequence, for display and
    /// diagnostics.
    pub const fn profile() -> Profile {
        C::PROFILE
    }

    #[inline]
    fn start(&self) -> usize {
        C::Location::start(&self.state, &self.buffer)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len_usize()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of element slots currently backed by real memory. For
    /// lazily allocating configurations this is zero until the first push.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The slot within the capacity where the live window currently begins.
    ///
    /// `start_offset() + len() <= capacity()` holds after every operation.
    #[inline]
    pub fn start_offset(&self) -> usize {
        self.start()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buffer.data_ptr().add(self.start()), self.len()) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let start = self.start();
        let length = self.len();
        unsafe { slice::from_raw_parts_mut(self.buffer.data_ptr_mut().add(start), length) }
    }

    /// Appends an element to the back of the sequence.
    ///
    /// Panics when the configuration cannot grow to fit it; see
    /// [`try_push_back`](Self::try_push_back).
    #[inline]
    pub fn push_back(&mut self, value: T) {
        match self.try_push_back(value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Prepends an element to the front of the sequence.
    ///
    /// Panics when the configuration cannot grow to fit it; see
    /// [`try_push_front`](Self::try_push_front).
    #[inline]
    pub fn push_front(&mut self, value: T) {
        match self.try_push_front(value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Appends an element to the back of the sequence.
    ///
    /// On failure the sequence is unchanged and the error returns ownership
    /// of the value.
    #[inline]
    pub fn try_push_back(&mut self, value: T) -> Result<(), InsertionError<T>> {
        C::Location::try_push_back::<T, C::Buffer<T>, C::Grow>(
            &mut self.state,
            &mut self.buffer,
            value,
        )
    }

    /// Prepends an element to the front of the sequence.
    ///
    /// On failure the sequence is unchanged and the error returns ownership
    /// of the value.
    #[inline]
    pub fn try_push_front(&mut self, value: T) -> Result<(), InsertionError<T>> {
        C::Location::try_push_front::<T, C::Buffer<T>, C::Grow>(
            &mut self.state,
            &mut self.buffer,
            value,
        )
    }

    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        C::Location::pop_back(&mut self.state, &mut self.buffer)
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        C::Location::pop_front(&mut self.state, &mut self.buffer)
    }

    /// Inserts an element at logical index `index`, shifting as few
    /// elements as the location policy allows.
    ///
    /// Panics when `index > len()` or when the configuration cannot grow.
    pub fn insert(&mut self, index: usize, value: T) {
        match self.try_insert(index, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Fallible form of [`insert`](Self::insert). An out-of-range index is
    /// still a contract violation and panics.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), InsertionError<T>> {
        if index > self.len() {
            index_panic();
        }
        C::Location::try_insert::<T, C::Buffer<T>, C::Grow>(
            &mut self.state,
            &mut self.buffer,
            index,
            value,
        )
    }

    /// Removes and returns the element at logical index `index`.
    ///
    /// Panics when `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        if index >= self.len() {
            index_panic();
        }
        C::Location::remove(&mut self.state, &mut self.buffer, index)
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Shortens the sequence to at most `length` elements, dropping the
    /// excess from the back.
    pub fn truncate(&mut self, length: usize) {
        let old_len = self.len();
        let new_len = length.min(old_len);
        let remove = old_len - new_len;
        if remove > 0 {
            let old_start = self.start();
            unsafe {
                let to_drop: &mut [T] = slice::from_raw_parts_mut(
                    self.buffer.data_ptr_mut().add(old_start + new_len),
                    remove,
                );
                self.buffer.set_length(C::Index::from_usize(new_len));
                ptr::drop_in_place(to_drop);
                // A back-anchored window moves when the length changes.
                let new_start = self.start();
                if new_start != old_start {
                    self.buffer.shift(
                        old_start,
                        old_start + new_len,
                        new_start as isize - old_start as isize,
                    );
                }
            }
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    #[inline]
    fn into_inner(self) -> (C::Buffer<T>, usize) {
        let me = ManuallyDrop::new(self);
        let start = me.start();
        (unsafe { ptr::read(&me.buffer) }, start)
    }
}

impl<T, C: SeqConfig> AsRef<[T]> for Sequence<T, C> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, C: SeqConfig> AsMut<[T]> for Sequence<T, C> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, C: SeqConfig> Borrow<[T]> for Sequence<T, C> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, C: SeqConfig> BorrowMut<[T]> for Sequence<T, C> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, C: SeqConfig> Clone for Sequence<T, C> {
    fn clone(&self) -> Self {
        let mut seq = Self::new();
        for item in self.as_slice() {
            seq.push_back(item.clone());
        }
        seq
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        for item in source.as_slice() {
            self.push_back(item.clone());
        }
    }
}

impl<T: fmt::Debug, C: SeqConfig> fmt::Debug for Sequence<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

impl<T, C: SeqConfig> Default for Sequence<T, C> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: SeqConfig> ConstDefault for Sequence<T, C> {
    const DEFAULT: Self = Self::new();
}

impl<T, C: SeqConfig> Deref for Sequence<T, C> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, C: SeqConfig> DerefMut for Sequence<T, C> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, C: SeqConfig> Drop for Sequence<T, C> {
    fn drop(&mut self) {
        let length = self.len();
        if length > 0 {
            let start = self.start();
            unsafe {
                let to_drop: &mut [T] =
                    slice::from_raw_parts_mut(self.buffer.data_ptr_mut().add(start), length);
                self.buffer.set_length(C::Index::ZERO);
                ptr::drop_in_place(to_drop);
            }
        }
    }
}

impl<T, C: SeqConfig> Extend<T> for Sequence<T, C> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Clone + 'a, C: SeqConfig> Extend<&'a T> for Sequence<T, C> {
    fn extend<A: IntoIterator<Item = &'a T>>(&mut self, iter: A) {
        for value in iter {
            self.push_back(value.clone());
        }
    }
}

impl<T, C: SeqConfig> FromIterator<T> for Sequence<T, C> {
    fn from_iter<A: IntoIterator<Item = T>>(iter: A) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<T, C: SeqConfig, const N: usize> From<[T; N]> for Sequence<T, C> {
    fn from(data: [T; N]) -> Self {
        Self::from_iter(data)
    }
}

impl<T: PartialEq, C: SeqConfig, D: SeqConfig> PartialEq<Sequence<T, D>> for Sequence<T, C> {
    #[inline]
    fn eq(&self, other: &Sequence<T, D>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, C: SeqConfig> PartialEq<[T]> for Sequence<T, C> {
    #[inline]
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, C: SeqConfig> PartialEq<&[T]> for Sequence<T, C> {
    #[inline]
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq, C: SeqConfig, const N: usize> PartialEq<[T; N]> for Sequence<T, C> {
    #[inline]
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<T: Eq, C: SeqConfig> Eq for Sequence<T, C> {}

impl<'a, T, C: SeqConfig> IntoIterator for &'a Sequence<T, C> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, C: SeqConfig> IntoIterator for &'a mut Sequence<T, C> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, C: SeqConfig> IntoIterator for Sequence<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    fn into_iter(self) -> Self::IntoIter {
        let length = self.len();
        let (buffer, start) = self.into_inner();
        IntoIter::new(buffer, start, start + length)
    }
}

// If a particular SeqBuffer is not `Send` or `Sync` then the SeqConfig type
// must reflect that.
unsafe impl<T: Send, C: SeqConfig + Send> Send for Sequence<T, C> {}
unsafe impl<T: Sync, C: SeqConfig + Sync> Sync for Sequence<T, C> {}

#[cfg(feature = "zeroize")]
impl<T: zeroize::Zeroize, C: SeqConfig> zeroize::Zeroize for Sequence<T, C> {
    fn zeroize(&mut self) {
        for item in self.as_mut_slice() {
            item.zeroize();
        }
        self.clear();
    }
}
