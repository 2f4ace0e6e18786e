//! Element location strategies.
//!
//! A location strategy decides where the live window of elements sits inside
//! the capacity owned by a [`SeqBuffer`](crate::storage::SeqBuffer), and
//! implements the push, pop, insert and remove operations in terms of the
//! buffer's raw placement primitives:
//!
//! - [`Front`]: the window is anchored at the lowest slots. Appending is
//!   O(1) amortized; prepending shifts the whole window, like a plain
//!   vector.
//! - [`Back`]: the window is anchored at the highest slots, the mirror
//!   image of `Front`.
//! - [`Middle`]: the window floats, tracked by an explicit offset. Both ends
//!   are O(1) amortized: when one side's gap is exhausted the window is
//!   recentered, donating slack from the other side.
//!
//! Capacity growth always happens before any gap management; recentering
//! only redistributes existing capacity and is never asked to create room
//! that does not exist.

use core::fmt::Debug;

use crate::error::{InsertionError, StorageError};
use crate::index::{Grow, Index};
use crate::storage::SeqBuffer;

/// The element location strategy of a sequence configuration, for
/// introspection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LocationKind {
    Front,
    Middle,
    Back,
}

/// Per-instance state carried for a location strategy; a window offset for
/// [`Middle`], nothing for the anchored strategies.
pub trait LocationState<I: Index>: Copy + Debug {
    const EMPTY: Self;
}

impl<I: Index> LocationState<I> for () {
    const EMPTY: Self = ();
}

/// The floating window offset of a [`Middle`] located sequence.
///
/// The offset marks the slot where the live window begins; it is recomputed
/// on first use and on every growth or recenter. The invariant
/// `offset + length <= capacity` holds after every operation.
#[derive(Debug, Clone, Copy)]
pub struct MiddleState<I: Index> {
    offset: I,
}

impl<I: Index> LocationState<I> for MiddleState<I> {
    const EMPTY: Self = MiddleState { offset: I::ZERO };
}

/// A strategy placing the live window within the backing capacity.
pub trait Location: Debug {
    const KIND: LocationKind;

    type State<I: Index>: LocationState<I>;

    /// First slot of the live window.
    fn start<T, B: SeqBuffer<T>>(state: &Self::State<B::Index>, buf: &B) -> usize;

    fn try_push_front<T, B: SeqBuffer<T>, G: Grow>(
        state: &mut Self::State<B::Index>,
        buf: &mut B,
        value: T,
    ) -> Result<(), InsertionError<T>>;

    fn try_push_back<T, B: SeqBuffer<T>, G: Grow>(
        state: &mut Self::State<B::Index>,
        buf: &mut B,
        value: T,
    ) -> Result<(), InsertionError<T>>;

    fn pop_front<T, B: SeqBuffer<T>>(state: &mut Self::State<B::Index>, buf: &mut B)
        -> Option<T>;

    fn pop_back<T, B: SeqBuffer<T>>(state: &mut Self::State<B::Index>, buf: &mut B)
        -> Option<T>;

    /// Insert at logical index `index`, which the caller has checked to be
    /// at most the current length.
    fn try_insert<T, B: SeqBuffer<T>, G: Grow>(
        state: &mut Self::State<B::Index>,
        buf: &mut B,
        index: usize,
        value: T,
    ) -> Result<(), InsertionError<T>>;

    /// Remove at logical index `index`, which the caller has checked to be
    /// below the current length.
    fn remove<T, B: SeqBuffer<T>>(
        state: &mut Self::State<B::Index>,
        buf: &mut B,
        index: usize,
    ) -> T;
}

/// Grow the buffer so one more element fits, keeping the live window where
/// the placement function says it belongs in the new capacity. Only ever
/// called when the buffer is exactly full.
fn grow_to_fit<T, B, G, F>(buf: &mut B, start: usize, place: F) -> Result<usize, StorageError>
where
    B: SeqBuffer<T>,
    G: Grow,
    F: FnOnce(usize) -> usize,
{
    debug_assert_eq!(buf.len_usize(), buf.capacity());
    let length = buf.len_usize();
    let Some(minimum) = B::Index::try_from_usize(length + 1) else {
        return Err(StorageError::CapacityLimit);
    };
    let preferred = G::next_capacity::<T, B::Index>(buf.length(), minimum);
    buf.try_relocate(minimum.to_usize(), preferred.to_usize(), start, place)
}

/// Live window anchored at the low end of the capacity.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Front;

impl Location for Front {
    const KIND: LocationKind = LocationKind::Front;

    type State<I: Index> = ();

    #[inline]
    fn start<T, B: SeqBuffer<T>>(_state: &(), _buf: &B) -> usize {
        0
    }

    fn try_push_front<T, B: SeqBuffer<T>, G: Grow>(
        _state: &mut (),
        buf: &mut B,
        value: T,
    ) -> Result<(), InsertionError<T>> {
        let length = buf.len_usize();
        if length == buf.capacity() {
            if let Err(error) = grow_to_fit::<T, B, G, _>(buf, 0, |_| 0) {
                return Err(InsertionError::new(error, value));
            }
        }
        unsafe {
            buf.shift(0, length, 1);
            buf.write(0, value);
        }
        Ok(())
    }

    fn try_push_back<T, B: SeqBuffer<T>, G: Grow>(
        _state: &mut (),
        buf: &mut B,
        value: T,
    ) -> Result<(), InsertionError<T>> {
        let length = buf.len_usize();
        if length == buf.capacity() {
            if let Err(error) = grow_to_fit::<T, B, G, _>(buf, 0, |_| 0) {
                return Err(InsertionError::new(error, value));
            }
        }
        unsafe { buf.write(length, value) };
        Ok(())
    }

    fn pop_front<T, B: SeqBuffer<T>>(_state: &mut (), buf: &mut B) -> Option<T> {
        let length = buf.len_usize();
        if length == 0 {
            return None;
        }
        unsafe {
            let value = buf.read(0);
            buf.shift(1, length, -1);
            Some(value)
        }
    }

    fn pop_back<T, B: SeqBuffer<T>>(_state: &mut (), buf: &mut B) -> Option<T> {
        let length = buf.len_usize();
        if length == 0 {
            return None;
        }
        Some(unsafe { buf.read(length - 1) })
    }

    fn try_insert<T, B: SeqBuffer<T>, G: Grow>(
        _state: &mut (),
        buf: &mut B,
        index: usize,
        value: T,
    ) -> Result<(), InsertionError<T>> {
        let length = buf.len_usize();
        if length == buf.capacity() {
            if let Err(error) = grow_to_fit::<T, B, G, _>(buf, 0, |_| 0) {
                return Err(InsertionError::new(error, value));
            }
        }
        unsafe {
            buf.shift(index, length, 1);
            buf.write(index, value);
        }
        Ok(())
    }

    fn remove<T, B: SeqBuffer<T>>(_state: &mut (), buf: &mut B, index: usize) -> T {
        let length = buf.len_usize();
        unsafe {
            let value = buf.read(index);
            buf.shift(index + 1, length, -1);
            value
        }
    }
}

/// Live window anchored at the high end of the capacity.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Back;

impl Location for Back {
    const KIND: LocationKind = LocationKind::Back;

    type State<I: Index> = ();

    #[inline]
    fn start<T, B: SeqBuffer<T>>(_state: &(), buf: &B) -> usize {
        buf.capacity() - buf.len_usize()
    }

    fn try_push_front<T, B: SeqBuffer<T>, G: Grow>(
        _state: &mut (),
        buf: &mut B,
        value: T,
    ) -> Result<(), InsertionError<T>> {
        let length = buf.len_usize();
        if length == buf.capacity() {
            if let Err(error) = grow_to_fit::<T, B, G, _>(buf, 0, move |cap| cap - length) {
                return Err(InsertionError::new(error, value));
            }
        }
        let start = buf.capacity() - length;
        unsafe { buf.write(start - 1, value) };
        Ok(())
    }

    fn try_push_back<T, B: SeqBuffer<T>, G: Grow>(
        _state: &mut (),
        buf: &mut B,
        value: T,
    ) -> Result<(), InsertionError<T>> {
        let length = buf.len_usize();
        if length == buf.capacity() {
            let start = buf.capacity() - length;
            if let Err(error) = grow_to_fit::<T, B, G, _>(buf, start, move |cap| cap - length) {
                return Err(InsertionError::new(error, value));
            }
        }
        let capacity = buf.capacity();
        unsafe {
            buf.shift(capacity - length, capacity, -1);
            buf.write(capacity - 1, value);
        }
        Ok(())
    }

    fn pop_front<T, B: SeqBuffer<T>>(_state: &mut (), buf: &mut B) -> Option<T> {
        let length = buf.len_usize();
        if length == 0 {
            return None;
        }
        let start = buf.capacity() - length;
        Some(unsafe { buf.read(start) })
    }

    fn pop_back<T, B: SeqBuffer<T>>(_state: &mut (), buf: &mut B) -> Option<T> {
        let length = buf.len_usize();
        if length == 0 {
            return None;
        }
        let capacity = buf.capacity();
        unsafe {
            let value = buf.read(capacity - 1);
            buf.shift(capacity - length, capacity - 1, 1);
            Some(value)
        }
    }

    fn try_insert<T, B: SeqBuffer<T>, G: Grow>(
        _state: &mut (),
        buf: &mut B,
        index: usize,
        value: T,
    ) -> Result<(), InsertionError<T>> {
        let length = buf.len_usize();
        if length == buf.capacity() {
            let start = buf.capacity() - length;
            if let Err(error) = grow_to_fit::<T, B, G, _>(buf, start, move |cap| cap - length) {
                return Err(InsertionError::new(error, value));
            }
        }
        let start = buf.capacity() - length;
        unsafe {
            buf.shift(start, start + index, -1);
            buf.write(start + index - 1, value);
        }
        Ok(())
    }

    fn remove<T, B: SeqBuffer<T>>(_state: &mut (), buf: &mut B, index: usize) -> T {
        let length = buf.len_usize();
        let start = buf.capacity() - length;
        unsafe {
            let value = buf.read(start + index);
            buf.shift(start, start + index, 1);
            value
        }
    }
}

/// Live window floating in the middle of the capacity.
///
/// Every element type is relocatable in Rust, so unlike anchored locations
/// there is no usage pattern of a middle-located sequence that avoids
/// element moves; pinned data should not be stored in one.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Middle;

impl Location for Middle {
    const KIND: LocationKind = LocationKind::Middle;

    type State<I: Index> = MiddleState<I>;

    #[inline]
    fn start<T, B: SeqBuffer<T>>(state: &MiddleState<B::Index>, _buf: &B) -> usize {
        state.offset.to_usize()
    }

    fn try_push_front<T, B: SeqBuffer<T>, G: Grow>(
        state: &mut MiddleState<B::Index>,
        buf: &mut B,
        value: T,
    ) -> Result<(), InsertionError<T>> {
        let length = buf.len_usize();
        if length == buf.capacity() {
            let start = state.offset.to_usize();
            match grow_to_fit::<T, B, G, _>(buf, start, move |cap| (cap - length) / 2) {
                Ok(new_start) => state.offset = B::Index::from_usize(new_start),
                Err(error) => return Err(InsertionError::new(error, value)),
            }
        }
        let mut offset = state.offset.to_usize();
        if offset == 0 {
            // No free slot ahead of the window: recenter, donating half of
            // the back gap.
            let free = buf.capacity() - length;
            let new_start = free.div_ceil(2);
            unsafe { buf.shift(0, length, new_start as isize) };
            offset = new_start;
        }
        offset -= 1;
        state.offset = B::Index::from_usize(offset);
        unsafe { buf.write(offset, value) };
        Ok(())
    }

    fn try_push_back<T, B: SeqBuffer<T>, G: Grow>(
        state: &mut MiddleState<B::Index>,
        buf: &mut B,
        value: T,
    ) -> Result<(), InsertionError<T>> {
        let length = buf.len_usize();
        if length == buf.capacity() {
            let start = state.offset.to_usize();
            match grow_to_fit::<T, B, G, _>(buf, start, move |cap| (cap - length) / 2) {
                Ok(new_start) => state.offset = B::Index::from_usize(new_start),
                Err(error) => return Err(InsertionError::new(error, value)),
            }
        }
        let mut offset = state.offset.to_usize();
        if buf.capacity() - (offset + length) == 0 {
            // No free slot behind the window: recenter, donating half of
            // the front gap.
            let new_offset = offset / 2;
            unsafe { buf.shift(offset, offset + length, -((offset - new_offset) as isize)) };
            offset = new_offset;
            state.offset = B::Index::from_usize(offset);
        }
        unsafe { buf.write(offset + length, value) };
        Ok(())
    }

    fn pop_front<T, B: SeqBuffer<T>>(
        state: &mut MiddleState<B::Index>,
        buf: &mut B,
    ) -> Option<T> {
        let length = buf.len_usize();
        if length == 0 {
            return None;
        }
        let offset = state.offset.to_usize();
        let value = unsafe { buf.read(offset) };
        state.offset = B::Index::from_usize(offset + 1);
        Some(value)
    }

    fn pop_back<T, B: SeqBuffer<T>>(
        state: &mut MiddleState<B::Index>,
        buf: &mut B,
    ) -> Option<T> {
        let length = buf.len_usize();
        if length == 0 {
            return None;
        }
        let offset = state.offset.to_usize();
        Some(unsafe { buf.read(offset + length - 1) })
    }

    fn try_insert<T, B: SeqBuffer<T>, G: Grow>(
        state: &mut MiddleState<B::Index>,
        buf: &mut B,
        index: usize,
        value: T,
    ) -> Result<(), InsertionError<T>> {
        let length = buf.len_usize();
        if length == buf.capacity() {
            let start = state.offset.to_usize();
            match grow_to_fit::<T, B, G, _>(buf, start, move |cap| (cap - length) / 2) {
                Ok(new_start) => state.offset = B::Index::from_usize(new_start),
                Err(error) => return Err(InsertionError::new(error, value)),
            }
        }
        let offset = state.offset.to_usize();
        let back_gap = buf.capacity() - (offset + length);
        // Open the gap on whichever side is cheaper, falling back to the
        // side that still has free capacity.
        if offset > 0 && (index * 2 <= length || back_gap == 0) {
            unsafe {
                buf.shift(offset, offset + index, -1);
                buf.write(offset + index - 1, value);
            }
            state.offset = B::Index::from_usize(offset - 1);
        } else {
            unsafe {
                buf.shift(offset + index, offset + length, 1);
                buf.write(offset + index, value);
            }
        }
        Ok(())
    }

    fn remove<T, B: SeqBuffer<T>>(
        state: &mut MiddleState<B::Index>,
        buf: &mut B,
        index: usize,
    ) -> T {
        let length = buf.len_usize();
        let offset = state.offset.to_usize();
        if index * 2 < length {
            let value = unsafe { buf.read(offset + index) };
            unsafe { buf.shift(offset, offset + index, 1) };
            state.offset = B::Index::from_usize(offset + 1);
            value
        } else {
            let value = unsafe { buf.read(offset + index) };
            unsafe { buf.shift(offset + index + 1, offset + length, -1) };
            value
        }
    }
}
