//! Size counter types and capacity growth policies.
//!
//! The index type of a sequence configuration determines the integer width
//! used to track the live element count (and, for middle-located sequences,
//! the window offset). Narrow counters make small inline sequences of small
//! types meaningfully more space efficient; they do not change semantics.

use core::fmt::{Debug, Display};

/// An unsigned integer type usable as a sequence size counter.
pub trait Index:
    Copy
    + Clone
    + Debug
    + Display
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Send
    + Sync
    + Sized
    + 'static
{
    const ZERO: Self;
    const MAX_USIZE: usize;

    fn from_usize(val: usize) -> Self;

    fn try_from_usize(val: usize) -> Option<Self>;

    fn to_usize(self) -> usize;

    #[inline]
    fn saturating_add(self, val: usize) -> Self {
        Self::from_usize(self.to_usize().saturating_add(val).min(Self::MAX_USIZE))
    }

    #[inline]
    fn saturating_sub(self, val: usize) -> Self {
        Self::from_usize(self.to_usize().saturating_sub(val))
    }

    #[inline]
    fn saturating_mul(self, val: usize) -> Self {
        Self::from_usize(self.to_usize().saturating_mul(val).min(Self::MAX_USIZE))
    }
}

macro_rules! impl_index {
    ($($t:ty),*) => {
        $(impl Index for $t {
            const ZERO: Self = 0;
            const MAX_USIZE: usize = <$t>::MAX as usize;

            #[inline]
            fn from_usize(val: usize) -> Self {
                val as Self
            }

            #[inline]
            fn try_from_usize(val: usize) -> Option<Self> {
                val.try_into().ok()
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }
        })*
    };
}

impl_index!(u8, u16, u32);

impl Index for usize {
    const ZERO: Self = 0usize;
    const MAX_USIZE: usize = usize::MAX;

    #[inline]
    fn from_usize(val: usize) -> Self {
        val
    }

    #[inline]
    fn try_from_usize(val: usize) -> Option<Self> {
        Some(val)
    }

    #[inline]
    fn to_usize(self) -> usize {
        self
    }
}

/// The growth rule of a sequence configuration, for introspection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum GrowthKind {
    /// Capacity grows by a fixed number of elements.
    Linear,
    /// Capacity grows by a fixed factor.
    Exponential,
    /// Capacity grows by an amortized-constant doubling rule.
    Doubling,
}

/// A policy determining the next capacity when a buffer must grow.
///
/// `next_capacity` receives the current capacity and the minimum capacity
/// able to hold the pending insertion, and returns the preferred new
/// capacity, which is never below the minimum.
pub trait Grow: Debug {
    const KIND: GrowthKind;
    const INCREMENT: usize = 1;
    const FACTOR: f32 = 2.0;

    fn next_capacity<T, I: Index>(prev: I, minimum: I) -> I;
}

/// Grow the capacity by a fixed increment of `BY` elements.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Linear<const BY: usize = 1>;

impl<const BY: usize> Linear<BY> {
    const VALID: () = assert!(BY > 0, "Linear capacity growth must be greater than 0");
}

impl<const BY: usize> Grow for Linear<BY> {
    const KIND: GrowthKind = GrowthKind::Linear;
    const INCREMENT: usize = BY;
    const FACTOR: f32 = 1.0;

    #[inline]
    fn next_capacity<T, I: Index>(prev: I, minimum: I) -> I {
        let () = Self::VALID;
        prev.saturating_add(BY).max(minimum)
    }
}

/// Grow the capacity by the rational factor `NUM / DEN`, which must exceed
/// one. The growth is never less than a single element regardless of how
/// close to one the factor is.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Exponential<const NUM: usize = 3, const DEN: usize = 2>;

impl<const NUM: usize, const DEN: usize> Exponential<NUM, DEN> {
    const VALID: () = assert!(
        DEN > 0 && NUM > DEN,
        "Exponential capacity growth must be greater than 1.0"
    );
}

impl<const NUM: usize, const DEN: usize> Grow for Exponential<NUM, DEN> {
    const KIND: GrowthKind = GrowthKind::Exponential;
    const FACTOR: f32 = NUM as f32 / DEN as f32;

    #[inline]
    fn next_capacity<T, I: Index>(prev: I, minimum: I) -> I {
        let () = Self::VALID;
        let scaled = prev.to_usize().saturating_mul(NUM).div_ceil(DEN);
        I::from_usize(scaled.min(I::MAX_USIZE))
            .max(prev.saturating_add(1))
            .max(minimum)
    }
}

/// Grow the capacity with amortized doubling, matching the behavior of the
/// standard library vector: a small element-size-dependent initial capacity,
/// doubled on each subsequent growth.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Doubling;

impl Grow for Doubling {
    const KIND: GrowthKind = GrowthKind::Doubling;

    #[inline]
    fn next_capacity<T, I: Index>(prev: I, minimum: I) -> I {
        let preferred = if prev == I::ZERO {
            I::from_usize(min_non_zero_cap::<T>().min(I::MAX_USIZE))
        } else {
            prev.saturating_mul(2)
        };
        preferred.max(minimum)
    }
}

pub(crate) const fn min_non_zero_cap<T>() -> usize {
    if core::mem::size_of::<T>() == 1 {
        8
    } else if core::mem::size_of::<T>() <= 1024 {
        4
    } else {
        1
    }
}
