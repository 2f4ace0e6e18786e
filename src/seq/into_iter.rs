use core::fmt;
use core::iter::FusedIterator;
use core::ptr;
use core::slice;

use crate::config::SeqConfig;
use crate::storage::SeqBuffer;

/// An owning iterator over a sequence's elements, front to back.
///
/// Elements not yet yielded are dropped with the iterator; the backing
/// storage is released when the iterator is dropped.
pub struct IntoIter<T, C: SeqConfig> {
    buffer: C::Buffer<T>,
    start: usize,
    end: usize,
}

impl<T, C: SeqConfig> IntoIter<T, C> {
    pub(crate) fn new(buffer: C::Buffer<T>, start: usize, end: usize) -> Self {
        Self { buffer, start, end }
    }

    /// The remaining elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            slice::from_raw_parts(self.buffer.data_ptr().add(self.start), self.end - self.start)
        }
    }
}

impl<T, C: SeqConfig> Iterator for IntoIter<T, C> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let value = unsafe { self.buffer.data_ptr().add(self.start).read() };
        self.start += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remain = self.end - self.start;
        (remain, Some(remain))
    }
}

impl<T, C: SeqConfig> DoubleEndedIterator for IntoIter<T, C> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        Some(unsafe { self.buffer.data_ptr().add(self.end).read() })
    }
}

impl<T, C: SeqConfig> ExactSizeIterator for IntoIter<T, C> {}

impl<T, C: SeqConfig> FusedIterator for IntoIter<T, C> {}

impl<T, C: SeqConfig> Drop for IntoIter<T, C> {
    fn drop(&mut self) {
        let remain = self.end - self.start;
        if remain > 0 {
            unsafe {
                let to_drop: &mut [T] = slice::from_raw_parts_mut(
                    self.buffer.data_ptr_mut().add(self.start),
                    remain,
                );
                ptr::drop_in_place(to_drop);
            }
        }
    }
}

impl<T: fmt::Debug, C: SeqConfig> fmt::Debug for IntoIter<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

// If a particular SeqBuffer is not `Send` or `Sync` then the SeqConfig type
// must reflect that.
unsafe impl<T: Send, C: SeqConfig + Send> Send for IntoIter<T, C> {}
unsafe impl<T: Sync, C: SeqConfig + Sync> Sync for IntoIter<T, C> {}
