//! Sequence containers with configurable storage and element placement.
//!
//! A [`Sequence`] is a contiguous container whose behavior is selected at
//! compile time along two independent axes:
//!
//! - **Storage**: a growable heap vector ([`Alloc`]), a small-buffer
//!   optimized vector ([`Small`]), a fixed pre-reserved heap buffer
//!   ([`Reserved`]), or a fixed inline buffer ([`Inline`]).
//! - **Location**: the live elements may be anchored at the low end of the
//!   capacity ([`Front`], cheap `push_back`), at the high end ([`Back`],
//!   cheap `push_front`), or float in the middle ([`Middle`], both ends
//!   cheap).
//!
//! Growth policy ([`Linear`], [`Exponential`], [`Doubling`]) and the size
//! counter width complete the configuration.
//!
//! ```
//! # #[cfg(feature = "alloc")] {
//! use flex_seq::{Back, HeapSeq, InlineSeq, Middle};
//!
//! // A double-ended heap sequence.
//! let mut seq = HeapSeq::<u32, Middle>::new();
//! seq.push_back(2);
//! seq.push_front(1);
//! seq.push_back(3);
//! assert_eq!(seq, [1, 2, 3]);
//!
//! // A fixed-capacity inline sequence optimized for prepending.
//! let mut seq = InlineSeq::<u32, 10, Back>::new();
//! seq.push_front(5);
//! seq.push_front(4);
//! assert_eq!(seq, [4, 5]);
//! # }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod config;

pub(crate) mod error;

pub(crate) mod index;

pub mod location;

pub mod storage;

pub mod seq;

pub use {
    self::config::{Alloc, Inline, Profile, SeqConfig},
    self::error::{InsertionError, StorageError},
    self::index::{Doubling, Exponential, Grow, GrowthKind, Index, Linear},
    self::location::{Back, Front, Location, LocationKind, Middle},
    self::seq::{InlineSeq, IntoIter, Sequence},
};

#[cfg(feature = "alloc")]
pub use {
    self::config::{Reserved, Small},
    self::seq::{HeapSeq, ReservedSeq, SmallSeq},
};
