#![cfg(feature = "zeroize")]

use zeroize::Zeroize;

use flex_seq::{InlineSeq, Middle};

#[cfg(feature = "alloc")]
use flex_seq::HeapSeq;

#[test]
fn zeroize_inline_clears_elements() {
    let mut seq = InlineSeq::<u32, 8, Middle>::from([1, 2, 3, 4]);
    seq.zeroize();
    assert!(seq.is_empty());
}

#[cfg(feature = "alloc")]
#[test]
fn zeroize_heap_clears_elements() {
    let mut seq = HeapSeq::<u64>::from_iter(0..20);
    let capacity = seq.capacity();
    seq.zeroize();
    assert!(seq.is_empty());
    // Storage is retained; only the contents are destroyed.
    assert_eq!(seq.capacity(), capacity);
    seq.push_back(7);
    assert_eq!(seq, [7]);
}
