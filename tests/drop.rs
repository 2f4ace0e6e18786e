//! Construction and destruction accounting for owned elements.

use std::cell::Cell;

use flex_seq::{InlineSeq, Middle, StorageError};

#[cfg(feature = "alloc")]
use flex_seq::{HeapSeq, SmallSeq};

thread_local! {
    static LIVE: Cell<i64> = const { Cell::new(0) };
}

fn live() -> i64 {
    LIVE.with(|count| count.get())
}

#[derive(Debug, PartialEq)]
struct Tracked(u32);

impl Tracked {
    fn new(value: u32) -> Self {
        LIVE.with(|count| count.set(count.get() + 1));
        Tracked(value)
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Tracked::new(self.0)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        LIVE.with(|count| count.set(count.get() - 1));
    }
}

#[cfg(feature = "alloc")]
#[test]
fn drop_every_element_exactly_once() {
    {
        let mut seq = HeapSeq::<Tracked, Middle>::new();
        for value in 0..50 {
            if value % 2 == 0 {
                seq.push_back(Tracked::new(value));
            } else {
                seq.push_front(Tracked::new(value));
            }
        }
        // Relocations and recenters move elements without cloning them.
        assert_eq!(live(), 50);
    }
    assert_eq!(live(), 0);
}

#[test]
fn drop_inline_elements() {
    {
        let mut seq = InlineSeq::<Tracked, 8, Middle>::new();
        for value in 0..8 {
            seq.push_front(Tracked::new(value));
        }
        assert_eq!(live(), 8);
    }
    assert_eq!(live(), 0);
}

#[test]
fn drop_failed_push_returns_the_value() {
    let mut seq = InlineSeq::<Tracked, 2>::new();
    seq.push_back(Tracked::new(1));
    seq.push_back(Tracked::new(2));
    let err = seq.try_push_back(Tracked::new(3)).unwrap_err();
    assert_eq!(*err.error(), StorageError::CapacityLimit);
    assert_eq!(err.into_value().0, 3);
    assert_eq!(live(), 2);
    drop(seq);
    assert_eq!(live(), 0);
}

#[test]
fn drop_pop_transfers_ownership() {
    let mut seq = InlineSeq::<Tracked, 4>::new();
    for value in 0..3 {
        seq.push_back(Tracked::new(value));
    }
    let front = seq.pop_front().unwrap();
    assert_eq!(live(), 3);
    drop(front);
    assert_eq!(live(), 2);
    seq.pop_back();
    assert_eq!(live(), 1);
}

#[test]
fn drop_remove_truncate_clear() {
    let mut seq = InlineSeq::<Tracked, 8>::new();
    for value in 0..6 {
        seq.push_back(Tracked::new(value));
    }
    let removed = seq.remove(2);
    assert_eq!(removed.0, 2);
    drop(removed);
    assert_eq!(live(), 5);
    seq.truncate(2);
    assert_eq!(live(), 2);
    seq.clear();
    assert_eq!(live(), 0);
}

#[cfg(feature = "alloc")]
#[test]
fn drop_partially_consumed_into_iter() {
    let seq = HeapSeq::<Tracked>::from_iter((0..5).map(Tracked::new));
    let mut iter = seq.into_iter();
    let first = iter.next().unwrap();
    let last = iter.next_back().unwrap();
    assert_eq!(live(), 5);
    drop(iter);
    assert_eq!(live(), 2);
    drop((first, last));
    assert_eq!(live(), 0);
}

#[cfg(feature = "alloc")]
#[test]
fn drop_clone_creates_independent_elements() {
    let seq = SmallSeq::<Tracked, 2>::from_iter((0..3).map(Tracked::new));
    assert_eq!(live(), 3);
    let copy = seq.clone();
    assert_eq!(live(), 6);
    drop(copy);
    assert_eq!(live(), 3);
    assert_eq!(seq.len(), 3);
}
