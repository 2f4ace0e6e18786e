use core::mem::size_of;

use rstest::rstest;

use flex_seq::{
    Back, Front, GrowthKind, Inline, InlineSeq, LocationKind, Middle, SeqConfig, Sequence,
    StorageError,
};

#[cfg(feature = "alloc")]
use flex_seq::{Alloc, Exponential, HeapSeq, Linear, Reserved, ReservedSeq, Small, SmallSeq};

fn check_push_back<C: SeqConfig>() {
    let mut seq = Sequence::<u32, C>::new();
    for value in 0..20 {
        seq.push_back(value);
    }
    assert_eq!(seq.len(), 20);
    assert!(seq.iter().copied().eq(0..20));
}

fn check_push_front<C: SeqConfig>() {
    let mut seq = Sequence::<u32, C>::new();
    for value in 0..20 {
        seq.push_front(value);
    }
    assert_eq!(seq.len(), 20);
    assert!(seq.iter().copied().eq((0..20).rev()));
}

fn check_pop_round_trip<C: SeqConfig>() {
    let mut seq = Sequence::<u32, C>::from_iter(0..10);
    for expect in 0..5 {
        assert_eq!(seq.pop_front(), Some(expect));
    }
    for expect in (5..10).rev() {
        assert_eq!(seq.pop_back(), Some(expect));
    }
    assert!(seq.is_empty());
    assert_eq!(seq.pop_front(), None);
    assert_eq!(seq.pop_back(), None);
}

fn check_insert_remove<C: SeqConfig>() {
    let mut seq = Sequence::<u32, C>::from_iter(0..10);
    let mut model = Vec::from_iter(0..10);
    for &(index, value) in &[(0usize, 100u32), (5, 101), (11, 102), (3, 103)] {
        seq.insert(index, value);
        model.insert(index, value);
        assert_eq!(seq.as_slice(), model.as_slice());
    }
    for &index in &[0usize, 6, 11, 3] {
        assert_eq!(seq.remove(index), model.remove(index));
        assert_eq!(seq.as_slice(), model.as_slice());
    }
}

macro_rules! location_tests {
    ($name:ident, $loc:ty) => {
        mod $name {
            use super::*;

            #[test]
            fn seq_inline_push_back() {
                check_push_back::<Inline<32, $loc>>();
            }

            #[test]
            fn seq_inline_push_front() {
                check_push_front::<Inline<32, $loc>>();
            }

            #[cfg(feature = "alloc")]
            #[test]
            fn seq_heap_push_back() {
                check_push_back::<Alloc<$loc>>();
            }

            #[cfg(feature = "alloc")]
            #[test]
            fn seq_heap_push_front() {
                check_push_front::<Alloc<$loc>>();
            }

            #[cfg(feature = "alloc")]
            #[test]
            fn seq_small_push_back() {
                check_push_back::<Small<4, $loc>>();
            }

            #[cfg(feature = "alloc")]
            #[test]
            fn seq_small_push_front() {
                check_push_front::<Small<4, $loc>>();
            }

            #[cfg(feature = "alloc")]
            #[test]
            fn seq_reserved_push_back() {
                check_push_back::<Reserved<32, $loc>>();
            }

            #[cfg(feature = "alloc")]
            #[test]
            fn seq_reserved_push_front() {
                check_push_front::<Reserved<32, $loc>>();
            }

            #[test]
            fn seq_pop_round_trip() {
                check_pop_round_trip::<Inline<32, $loc>>();
                #[cfg(feature = "alloc")]
                check_pop_round_trip::<Alloc<$loc>>();
            }

            #[test]
            fn seq_insert_remove() {
                check_insert_remove::<Inline<32, $loc>>();
                #[cfg(feature = "alloc")]
                {
                    check_insert_remove::<Alloc<$loc>>();
                    check_insert_remove::<Small<4, $loc>>();
                }
            }
        }
    };
}

location_tests!(front, Front);
location_tests!(middle, Middle);
location_tests!(back, Back);

#[test]
fn seq_back_located_inline_prepend() {
    let mut seq = InlineSeq::<i32, 10, Back>::new();
    for value in 1..=5 {
        seq.push_front(value);
    }
    assert_eq!(seq, [5, 4, 3, 2, 1]);
    for value in 6..=10 {
        seq.push_front(value);
    }
    assert_eq!(seq.len(), 10);
    assert_eq!(seq.capacity(), 10);
    let err = seq.try_push_front(11).unwrap_err();
    assert_eq!(*err.error(), StorageError::CapacityLimit);
    assert_eq!(err.into_value(), 11);
    assert_eq!(seq, [10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);
}

#[test]
fn seq_middle_recenters_when_one_side_fills() {
    let mut seq = InlineSeq::<u32, 4, Middle>::new();
    seq.push_front(1);
    seq.push_back(2);
    seq.push_front(3);
    seq.push_back(4);
    assert_eq!(seq, [3, 1, 2, 4]);
    assert_eq!(seq.capacity(), 4);
    let err = seq.try_push_front(5).unwrap_err();
    assert_eq!(*err.error(), StorageError::CapacityLimit);
    assert_eq!(seq, [3, 1, 2, 4]);
}

#[test]
fn seq_middle_prepend_donates_back_slack() {
    let mut seq = InlineSeq::<u32, 6, Middle>::new();
    for value in 0..4 {
        seq.push_front(value);
    }
    assert_eq!(seq, [3, 2, 1, 0]);
    seq.push_back(9);
    assert_eq!(seq, [3, 2, 1, 0, 9]);
    assert!(seq.start_offset() + seq.len() <= seq.capacity());
}

#[cfg(feature = "alloc")]
fn capacity_trace<C: SeqConfig>(count: usize) -> Vec<usize> {
    let mut seq = Sequence::<usize, C>::new();
    (0..count)
        .map(|value| {
            seq.push_back(value);
            seq.capacity()
        })
        .collect()
}

#[cfg(feature = "alloc")]
#[test]
fn seq_doubling_capacity_growth() {
    assert_eq!(
        capacity_trace::<Alloc>(10),
        vec![4, 4, 4, 4, 8, 8, 8, 8, 16, 16]
    );
}

#[cfg(feature = "alloc")]
#[test]
fn seq_doubling_seeds_by_element_size() {
    let mut seq = HeapSeq::<u8>::new();
    seq.push_back(1);
    assert_eq!(seq.capacity(), 8);
}

#[cfg(feature = "alloc")]
#[test]
fn seq_linear_capacity_growth() {
    assert_eq!(
        capacity_trace::<Alloc<Front, Linear<3>>>(10),
        vec![3, 3, 3, 6, 6, 6, 9, 9, 9, 12]
    );
}

#[cfg(feature = "alloc")]
#[test]
fn seq_exponential_capacity_growth() {
    assert_eq!(
        capacity_trace::<Alloc<Front, Exponential<2, 1>>>(10),
        vec![1, 2, 4, 4, 8, 8, 8, 8, 16, 16]
    );
    assert_eq!(
        capacity_trace::<Alloc<Front, Exponential>>(10),
        vec![1, 2, 3, 5, 5, 8, 8, 8, 12, 12]
    );
}

#[cfg(feature = "alloc")]
#[test]
fn seq_reserved_allocates_in_full_on_first_push() {
    let mut seq = ReservedSeq::<u32, 10>::new();
    assert_eq!(seq.capacity(), 0);
    seq.push_back(1);
    assert_eq!(seq.capacity(), 10);
    seq.extend(2..=10);
    assert_eq!(seq.capacity(), 10);
    let err = seq.try_push_back(11).unwrap_err();
    assert_eq!(*err.error(), StorageError::CapacityLimit);
    assert_eq!(err.into_value(), 11);
    assert!(seq.iter().copied().eq(1..=10));
}

#[cfg(feature = "alloc")]
#[test]
fn seq_small_buffer_spills_to_heap() {
    let mut seq = SmallSeq::<u32, 4>::new();
    assert_eq!(seq.capacity(), 4);
    seq.extend(0..4);
    assert_eq!(seq.capacity(), 4);
    seq.push_back(4);
    assert_eq!(seq.capacity(), 8);
    assert!(seq.iter().copied().eq(0..5));
}

#[cfg(feature = "alloc")]
#[test]
fn seq_narrow_index_caps_capacity() {
    let mut seq = Sequence::<u32, Alloc<Front, flex_seq::Doubling, u8>>::new();
    for value in 0..255 {
        seq.push_back(value);
    }
    assert_eq!(seq.len(), 255);
    assert_eq!(seq.capacity(), 255);
    let err = seq.try_push_back(255).unwrap_err();
    assert_eq!(*err.error(), StorageError::CapacityLimit);
    assert_eq!(seq.len(), 255);
}

#[cfg(feature = "alloc")]
#[rstest]
#[case(1)]
#[case(7)]
#[case(42)]
fn seq_middle_window_invariant(#[case] seed: u64) {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::VecDeque;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut seq = HeapSeq::<u32, Middle>::new();
    let mut model = VecDeque::new();
    for step in 0..1000u32 {
        match rng.gen_range(0..6) {
            0 | 1 => {
                seq.push_back(step);
                model.push_back(step);
            }
            2 | 3 => {
                seq.push_front(step);
                model.push_front(step);
            }
            4 => assert_eq!(seq.pop_back(), model.pop_back()),
            _ => assert_eq!(seq.pop_front(), model.pop_front()),
        }
        assert!(seq.start_offset() + seq.len() <= seq.capacity() || seq.capacity() == 0);
        assert!(seq.iter().eq(model.iter()));
    }
}

#[test]
fn seq_profile_describes_configuration() {
    let p = Sequence::<u8, Inline<10, Back, u8>>::profile();
    assert!(!p.dynamic);
    assert!(!p.variable);
    assert_eq!(p.capacity, 10);
    assert_eq!(p.location, LocationKind::Back);
    assert_eq!(p.size_width, 1);

    #[cfg(feature = "alloc")]
    {
        let p = Sequence::<u32, Alloc<Middle, Linear<2>>>::profile();
        assert!(p.dynamic);
        assert!(p.variable);
        assert_eq!(p.capacity, 0);
        assert_eq!(p.location, LocationKind::Middle);
        assert_eq!(p.growth, GrowthKind::Linear);
        assert_eq!(p.increment, 2);
        assert_eq!(p.size_width, size_of::<usize>());

        let p = Sequence::<u32, Small<4, Front, Exponential>>::profile();
        assert_eq!(p.capacity, 4);
        assert_eq!(p.growth, GrowthKind::Exponential);
        assert_eq!(p.factor, 1.5);
    }
}

#[test]
fn seq_inline_footprint_is_counter_plus_slots() {
    assert_eq!(size_of::<Sequence<u32, Inline<4, Front, u32>>>(), 20);
    assert_eq!(size_of::<Sequence<u8, Inline<6, Back, u8>>>(), 7);
    // A middle location carries one extra counter for the window offset.
    assert_eq!(size_of::<Sequence<u32, Inline<4, Middle, u32>>>(), 24);
}

#[cfg(feature = "alloc")]
#[test]
fn seq_default_config_is_heap() {
    let mut seq = Sequence::<u32>::new();
    seq.push_back(1);
    seq.push_front(0);
    assert_eq!(seq, [0, 1]);
    assert!(Sequence::<u32>::profile().dynamic);
}

#[test]
fn seq_const_construction() {
    static SEQ: InlineSeq<u32, 4> = InlineSeq::new();
    assert!(SEQ.is_empty());
    let mut seq = InlineSeq::<u32, 4>::new();
    seq.push_back(1);
    assert_eq!(seq, [1]);
}

#[test]
fn seq_empty_queries() {
    let mut seq = InlineSeq::<u32, 4>::new();
    assert!(seq.is_empty());
    assert_eq!(seq.pop_front(), None);
    assert_eq!(seq.pop_back(), None);
    assert_eq!(seq.front(), None);
    assert_eq!(seq.back(), None);
    assert_eq!(seq.as_slice(), &[] as &[u32]);
}

#[cfg(feature = "alloc")]
#[test]
fn seq_slice_access() {
    let mut seq = HeapSeq::<u32, Middle>::from([1, 2, 3, 4]);
    assert_eq!(seq.front(), Some(&1));
    assert_eq!(seq.back(), Some(&4));
    assert_eq!(seq.get(2), Some(&3));
    assert_eq!(seq.get(4), None);
    seq[1] = 20;
    *seq.get_mut(0).unwrap() = 10;
    assert_eq!(seq.as_slice(), &[10, 20, 3, 4]);
}

#[cfg(feature = "alloc")]
#[test]
fn seq_equality_across_configurations() {
    let a = HeapSeq::<u32, Front>::from([1, 2, 3]);
    let b = InlineSeq::<u32, 8, Back>::from([1, 2, 3]);
    assert_eq!(a, b);
    assert_eq!(a, [1, 2, 3]);
    assert_eq!(format!("{:?}", a), "[1, 2, 3]");
}

#[cfg(feature = "alloc")]
#[test]
fn seq_clone_and_truncate() {
    let seq = HeapSeq::<u32, Middle>::from_iter(0..10);
    let mut copy = seq.clone();
    assert_eq!(copy, seq);
    copy.truncate(4);
    assert!(copy.iter().copied().eq(0..4));
    copy.truncate(10);
    assert_eq!(copy.len(), 4);
    copy.clear();
    assert!(copy.is_empty());
    assert_eq!(seq.len(), 10);
}

#[test]
fn seq_truncate_reanchors_back_located_window() {
    let mut seq = InlineSeq::<u32, 8, Back>::from_iter(0..6);
    seq.truncate(3);
    assert_eq!(seq, [0, 1, 2]);
    seq.push_back(9);
    seq.push_front(8);
    assert_eq!(seq, [8, 0, 1, 2, 9]);
}

#[cfg(feature = "alloc")]
#[test]
fn seq_into_iter_yields_from_both_ends() {
    let seq = HeapSeq::<u32, Back>::from_iter(0..6);
    let mut iter = seq.into_iter();
    assert_eq!(iter.len(), 6);
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(5));
    assert_eq!(iter.as_slice(), &[1, 2, 3, 4]);
    assert!(iter.eq(1u32..5));
}

#[test]
fn seq_extend_from_refs() {
    let mut seq = InlineSeq::<u32, 8>::new();
    seq.extend([1, 2, 3].iter());
    assert_eq!(seq, [1, 2, 3]);
}

#[cfg(feature = "alloc")]
#[test]
fn seq_zero_sized_elements() {
    let mut seq = HeapSeq::<(), Middle>::new();
    for _ in 0..100 {
        seq.push_back(());
        seq.push_front(());
    }
    assert_eq!(seq.len(), 200);
    assert_eq!(seq.pop_back(), Some(()));
    assert_eq!(seq.len(), 199);
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn seq_insert_past_end_panics() {
    let mut seq = InlineSeq::<u32, 4>::new();
    seq.push_back(1);
    seq.insert(2, 9);
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn seq_remove_past_end_panics() {
    let mut seq = InlineSeq::<u32, 4>::from([1]);
    seq.remove(1);
}

#[test]
#[should_panic]
fn seq_push_past_fixed_capacity_panics() {
    let mut seq = InlineSeq::<u32, 2>::new();
    seq.push_back(1);
    seq.push_back(2);
    seq.push_back(3);
}
