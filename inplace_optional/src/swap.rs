/*!
Contains the `Swap` trait, the swap operation of a held type.
*/

use std::{
    borrow::Cow,
    cell::{Cell, RefCell},
    cmp::{Ordering, Reverse},
    collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque},
    ffi::OsString,
    marker::PhantomData,
    mem,
    num::Wrapping,
    path::PathBuf,
    rc::Rc,
    sync::Arc,
    time::{Duration, Instant, SystemTime},
};

use crate::{optional::BasicOptional, slot::Slot};

/// Swaps two values of the same type.
///
/// [`swap`](crate::swap) uses this to swap the values of two engaged `Optional`s,
/// so types with a custom swap can override `swap_with`,
/// and types without one can use the default (`std::mem::swap`) with an empty impl.
///
/// # Example
///
/// ```
/// use inplace_optional::{Optional, Swap};
///
/// #[derive(Debug, PartialEq)]
/// struct Counted {
///     value: u32,
///     swaps: u32,
/// }
///
/// impl Swap for Counted {
///     fn swap_with(&mut self, other: &mut Self) {
///         std::mem::swap(&mut self.value, &mut other.value);
///         self.swaps += 1;
///         other.swaps += 1;
///     }
/// }
///
/// let mut a = Optional::some(Counted { value: 3, swaps: 0 });
/// let mut b = Optional::some(Counted { value: 5, swaps: 0 });
///
/// inplace_optional::swap(&mut a, &mut b);
///
/// assert_eq!(*a, Counted { value: 5, swaps: 1 });
/// assert_eq!(*b, Counted { value: 3, swaps: 1 });
///
/// ```
pub trait Swap: Sized {
    /// Swaps the contents of `self` and `other`.
    #[inline]
    fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }
}

macro_rules! impl_default_swap {
    ( $( [$($params:tt)*] $ty:ty ),* $(,)* ) => (
        $(
            impl<$($params)*> Swap for $ty {}
        )*
    )
}

impl_default_swap! {
    [] bool, [] char,
    [] u8, [] u16, [] u32, [] u64, [] u128, [] usize,
    [] i8, [] i16, [] i32, [] i64, [] i128, [] isize,
    [] f32, [] f64,
    [] (),
    [] String,
    [] OsString,
    [] PathBuf,
    [] Duration,
    [] Instant,
    [] SystemTime,
    [] Ordering,
    ['a, T: ?Sized] &'a T,
    ['a, T: ?Sized] &'a mut T,
    [T: ?Sized] PhantomData<T>,
    [T] Reverse<T>,
    [T] Wrapping<T>,
    [T] Vec<T>,
    [T] VecDeque<T>,
    [T] LinkedList<T>,
    [T] BinaryHeap<T>,
    [T: ?Sized] Box<T>,
    [T: ?Sized] Rc<T>,
    [T: ?Sized] Arc<T>,
    [T] Cell<T>,
    [T] RefCell<T>,
    [T] Option<T>,
    [T, E] Result<T, E>,
    [K, V, S] HashMap<K, V, S>,
    [T, S] HashSet<T, S>,
    [K, V] BTreeMap<K, V>,
    [T] BTreeSet<T>,
    ['a, B: ?Sized + ToOwned] Cow<'a, B>,
    [T, const N: usize] [T; N],
}

macro_rules! impl_tuple_swap {
    ( $( ($($tparam:ident),*) )* ) => (
        $(
            impl<$($tparam),*> Swap for ($($tparam,)*) {}
        )*
    )
}

impl_tuple_swap! {
    (A)
    (A, B)
    (A, B, C)
    (A, B, C, D)
    (A, B, C, D, E)
    (A, B, C, D, E, F)
    (A, B, C, D, E, F, G)
    (A, B, C, D, E, F, G, H)
    (A, B, C, D, E, F, G, H, I)
    (A, B, C, D, E, F, G, H, I, J)
    (A, B, C, D, E, F, G, H, I, J, K)
    (A, B, C, D, E, F, G, H, I, J, K, L)
}

impl<T, S> Swap for BasicOptional<T, S>
where
    S: Slot<T>,
{
    #[inline]
    fn swap_with(&mut self, other: &mut Self) {
        self.swap(other)
    }
}

/// Swaps the contents of two `Optional`s,
/// using the [`Swap`] impl of `T` when both hold a value.
///
/// - Both empty: does nothing.
///
/// - Both engaged: calls `T::swap_with` once.
///
/// - One engaged: moves the value into the empty one, leaving the other empty.
///
/// # Example
///
/// ```
/// use inplace_optional::{swap, Optional};
///
/// let mut a = Optional::some(10);
/// let mut b = Optional::new();
///
/// swap(&mut a, &mut b);
///
/// assert!(!a.is_engaged());
/// assert_eq!(*b, 10);
///
/// ```
#[inline]
pub fn swap<T, S>(left: &mut BasicOptional<T, S>, right: &mut BasicOptional<T, S>)
where
    T: Swap,
    S: Slot<T>,
{
    left.swap_by(right, T::swap_with)
}
