//! Sequence configurations.
//!
//! A configuration is a zero-sized policy type binding together a storage
//! strategy, an element location strategy, a growth policy and a size
//! counter type. The policy is resolved entirely at compile time: each
//! combination monomorphizes its own container, and no operation ever
//! branches on a policy value at runtime. A runtime-readable [`Profile`]
//! mirror of the policy is provided for display and diagnostics only.

use core::fmt::Debug;
use core::marker::PhantomData;
use core::mem::size_of;

use const_default::ConstDefault;

use crate::index::{Doubling, Grow, GrowthKind, Index};
use crate::location::{Front, Location, LocationKind};
use crate::storage::{InlineBuffer, SeqBuffer};

#[cfg(feature = "alloc")]
use crate::storage::{HeapBuffer, ReservedBuffer, SmallBuffer};

/// A description of a sequence configuration's policies.
///
/// Two profiles are equal when every field is equal. The profile exists for
/// introspection and display; container behavior is determined by the
/// configuration type itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    /// Whether storage may be heap allocated.
    pub dynamic: bool,
    /// Whether the capacity is permitted to grow.
    pub variable: bool,
    /// The fixed capacity, or the small buffer capacity for dynamic
    /// storage. Zero means no small buffer.
    pub capacity: usize,
    /// Where the live window sits within the capacity.
    pub location: LocationKind,
    /// How the capacity grows when growth is necessary.
    pub growth: GrowthKind,
    /// The linear growth step, in elements.
    pub increment: usize,
    /// The exponential growth factor.
    pub factor: f32,
    /// The width of the live size counter, in bytes.
    pub size_width: usize,
}

impl Profile {
    const fn new<L: Location, G: Grow, I: Index>(
        dynamic: bool,
        variable: bool,
        capacity: usize,
    ) -> Self {
        Self {
            dynamic,
            variable,
            capacity,
            location: L::KIND,
            growth: G::KIND,
            increment: G::INCREMENT,
            factor: G::FACTOR,
            size_width: size_of::<I>(),
        }
    }
}

/// The compile-time configuration of a [`Sequence`](crate::seq::Sequence).
pub trait SeqConfig: Debug {
    type Index: Index;
    type Grow: Grow;
    type Location: Location;
    type Buffer<T>: SeqBuffer<T, Index = Self::Index>;

    /// Runtime mirror of this configuration's policies.
    const PROFILE: Profile;
}

/// Local fixed storage: an inline buffer of exactly `N` slots and no heap
/// involvement, like `inplace_vector`. Inline storage cannot grow, so this
/// configuration has no growth parameter.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Inline<const N: usize, L: Location = Front, I: Index = usize>(PhantomData<(L, I)>);

impl<const N: usize, L: Location, I: Index> SeqConfig for Inline<N, L, I> {
    type Index = I;
    type Grow = Doubling;
    type Location = L;
    type Buffer<T> = InlineBuffer<T, I, N>;

    const PROFILE: Profile = Profile::new::<L, Doubling, I>(false, false, N);
}

impl<const N: usize, L: Location, I: Index> ConstDefault for Inline<N, L, I> {
    const DEFAULT: Self = Self(PhantomData);
}

/// Heap fixed storage: a single lazy allocation of exactly `N` slots which
/// is never grown, like a vector with a pre-reserved capacity that must not
/// be exceeded.
#[cfg(feature = "alloc")]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Reserved<const N: usize, L: Location = Front, I: Index = usize>(PhantomData<(L, I)>);

#[cfg(feature = "alloc")]
impl<const N: usize, L: Location, I: Index> SeqConfig for Reserved<N, L, I> {
    type Index = I;
    type Grow = Doubling;
    type Location = L;
    type Buffer<T> = ReservedBuffer<T, I, N>;

    const PROFILE: Profile = Profile::new::<L, Doubling, I>(true, false, N);
}

#[cfg(feature = "alloc")]
impl<const N: usize, L: Location, I: Index> ConstDefault for Reserved<N, L, I> {
    const DEFAULT: Self = Self(PhantomData);
}

/// Heap variable storage without a small buffer: a growable heap vector
/// whose first allocation is deferred until first use.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Alloc<L: Location = Front, G: Grow = Doubling, I: Index = usize>(
    PhantomData<(L, G, I)>,
);

#[cfg(feature = "alloc")]
impl<L: Location, G: Grow, I: Index> SeqConfig for Alloc<L, G, I> {
    type Index = I;
    type Grow = G;
    type Location = L;
    type Buffer<T> = HeapBuffer<T, I>;

    const PROFILE: Profile = Profile::new::<L, G, I>(true, true, 0);
}

impl<L: Location, G: Grow, I: Index> ConstDefault for Alloc<L, G, I> {
    const DEFAULT: Self = Self(PhantomData);
}

/// Heap variable storage with a small buffer: `N` inline slots are used
/// until an insertion would not fit, then the elements are promoted to the
/// heap and grow there.
#[cfg(feature = "alloc")]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Small<const N: usize, L: Location = Front, G: Grow = Doubling, I: Index = usize>(
    PhantomData<(L, G, I)>,
);

#[cfg(feature = "alloc")]
impl<const N: usize, L: Location, G: Grow, I: Index> SeqConfig for Small<N, L, G, I> {
    type Index = I;
    type Grow = G;
    type Location = L;
    type Buffer<T> = SmallBuffer<T, I, N>;

    const PROFILE: Profile = Profile::new::<L, G, I>(true, true, N);
}

#[cfg(feature = "alloc")]
impl<const N: usize, L: Location, G: Grow, I: Index> ConstDefault for Small<N, L, G, I> {
    const DEFAULT: Self = Self(PhantomData);
}
