//! Inline-configured sequences must never touch the heap.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use flex_seq::{InlineSeq, Middle, StorageError};

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

struct Counting;

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        ALLOCATIONS.with(|count| count.set(count.get() + 1));
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static ALLOCATOR: Counting = Counting;

#[test]
fn inline_sequence_performs_no_allocation() {
    let before = ALLOCATIONS.with(|count| count.get());

    let mut seq = InlineSeq::<u32, 16, Middle>::new();
    for value in 0..8 {
        seq.push_back(value);
        seq.push_front(value);
    }
    assert_eq!(seq.len(), 16);
    let err = seq.try_push_back(99).unwrap_err();
    assert_eq!(*err.error(), StorageError::CapacityLimit);
    while seq.pop_front().is_some() {}
    assert!(seq.is_empty());

    assert_eq!(ALLOCATIONS.with(|count| count.get()), before);
}
