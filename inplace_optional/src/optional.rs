//! Contains `BasicOptional`, and its `Optional`/`CopyOptional` aliases.

use std::{
    any,
    cmp::Ordering,
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem,
    ops::{Deref, DerefMut},
};

use core_extensions::SelfOps;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::EmptyOptionalError,
    markers::{InPlace, NullOpt},
    slot::{CopySlot, DropSlot, Slot},
};


/// A nullable value stored inline, which either holds one `T` or nothing.
///
/// This is the `Optional` type for any `T`,
/// its [`DropSlot`] drops the held value when the `Optional` is dropped.
///
/// Because [`DropSlot`] implements `Drop`, this type is never `Copy`
/// and always has drop glue, even when `T` has none
/// (the destructor does nothing in that case).
/// Use [`CopyOptional`] for `Copy` types to get an `Optional`
/// that is itself `Copy` and has no drop glue.
///
/// # Example
///
/// ```
/// use inplace_optional::{Optional, NULLOPT};
///
/// let mut name = Optional::<String>::new();
/// assert!(!name.is_engaged());
///
/// name.emplace("Ferris".to_string());
/// assert_eq!(name.len(), 6);
///
/// let mut other = name.clone();
/// other.push_str(" the crab");
/// assert!(name < other);
///
/// other.assign_null(NULLOPT);
/// assert!(other < name);
///
/// ```
pub type Optional<T> = BasicOptional<T, DropSlot<T>>;

/// A nullable value stored inline, for `Copy` types.
///
/// Unlike [`Optional`], this is `Copy` and has no drop glue,
/// and it can be constructed and inspected in const contexts.
///
/// # Example
///
/// ```
/// use inplace_optional::{slot::CopySlot, CopyOptional};
///
/// const ANSWER: CopyOptional<u32> = CopyOptional::from_slot(CopySlot::new(42));
/// const NOTHING: CopyOptional<u32> = CopyOptional::new();
///
/// const ANSWER_IS_ENGAGED: bool = ANSWER.slot().as_raw().is_engaged();
///
/// assert!(ANSWER_IS_ENGAGED);
/// assert_eq!(ANSWER.slot().as_raw().get(), Some(&42));
///
/// let copy = ANSWER;
/// assert_eq!(copy, ANSWER);
/// assert!(NOTHING < ANSWER);
/// assert!(!std::mem::needs_drop::<CopyOptional<u32>>());
///
/// ```
pub type CopyOptional<T> = BasicOptional<T, CopySlot<T>>;

/// A nullable value stored inline, generic over its lifecycle tier.
///
/// Use it through the [`Optional`] and [`CopyOptional`] aliases.
///
/// `S` owns the storage and decides whether the value is dropped,
/// everything else (construction, assignment, comparison, swapping)
/// is implemented here for both tiers.
///
/// The traits implemented by this type mirror those of `T`:
/// it's `Clone` only if `T: Clone`,
/// comparable only if `T` is comparable,
/// serializable only if `T` is serializable.
pub struct BasicOptional<T, S> {
    slot: S,
    _marker: PhantomData<T>,
}

impl<T, S> BasicOptional<T, S>
where
    S: Slot<T>,
{
    /// Constructs an empty `Optional`, without constructing a `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_optional::Optional;
    ///
    /// struct NoDefault(#[allow(dead_code)] u8);
    ///
    /// let opt = Optional::<NoDefault>::new();
    /// assert!(!opt.is_engaged());
    ///
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self::from_slot(S::EMPTY)
    }

    /// Constructs an empty `Optional` from the [`NULLOPT`](crate::NULLOPT) marker.
    #[inline]
    pub const fn null(_: NullOpt) -> Self {
        Self::new()
    }

    /// Constructs an `Optional` holding `value`.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_optional::Optional;
    ///
    /// let opt = Optional::some(42);
    /// assert!(opt.is_engaged());
    /// assert_eq!(*opt, 42);
    ///
    /// ```
    #[inline]
    pub fn some(value: T) -> Self {
        Self::from_slot(S::from_value(value))
    }

    /// Constructs an `Optional` from its storage.
    #[inline]
    pub const fn from_slot(slot: S) -> Self {
        Self {
            slot,
            _marker: PhantomData,
        }
    }

    /// Gets the storage of this `Optional`.
    #[inline]
    pub const fn slot(&self) -> &S {
        &self.slot
    }

    /// Constructs an `Optional` whose value is the return value of `f`,
    /// written directly into its storage.
    ///
    /// The arguments of `T`'s constructor are the values captured by `f`.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_optional::{Optional, IN_PLACE};
    ///
    /// struct Point {
    ///     x: u32,
    ///     y: u32,
    /// }
    ///
    /// impl Point {
    ///     fn new(x: u32, y: u32) -> Self {
    ///         Point { x, y }
    ///     }
    /// }
    ///
    /// let (x, y) = (3, 5);
    /// let point = Optional::in_place(IN_PLACE, || Point::new(x, y));
    /// assert_eq!((point.x, point.y), (3, 5));
    ///
    /// ```
    #[inline]
    pub fn in_place<F>(_: InPlace, f: F) -> Self
    where
        F: FnOnce() -> T,
    {
        let mut this = Self::new();
        this.emplace_with(f);
        this
    }

    /// Fallible version of [`in_place`](Self::in_place),
    /// which returns the error of `f` unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_optional::{Optional, IN_PLACE};
    ///
    /// let parsed = Optional::<u8>::try_in_place(IN_PLACE, || "100".parse());
    /// assert_eq!(*parsed.unwrap(), 100);
    ///
    /// let failed = Optional::<u8>::try_in_place(IN_PLACE, || "300".parse());
    /// assert!(failed.is_err());
    ///
    /// ```
    #[inline]
    pub fn try_in_place<F, E>(_: InPlace, f: F) -> Result<Self, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut this = Self::new();
        this.try_emplace_with(f)?;
        this.piped(Ok)
    }

    /// Whether this holds a value.
    #[inline]
    pub fn is_engaged(&self) -> bool {
        self.slot.raw().is_engaged()
    }

    /// Alias for [`is_engaged`](Self::is_engaged).
    #[inline]
    pub fn has_value(&self) -> bool {
        self.is_engaged()
    }

    /// Whether this holds no value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.is_engaged()
    }

    /// Gets a reference to the held value, if there is one.
    #[inline]
    pub fn as_ref(&self) -> Option<&T> {
        self.slot.raw().get()
    }

    /// Gets a mutable reference to the held value, if there is one.
    #[inline]
    pub fn as_mut(&mut self) -> Option<&mut T> {
        self.slot.raw_mut().get_mut()
    }

    /// Gets a reference to the held value without checking that there is one.
    ///
    /// # Safety
    ///
    /// `self` must be engaged.
    #[inline]
    pub unsafe fn get_unchecked(&self) -> &T {
        self.slot.raw().get_unchecked()
    }

    /// Gets a mutable reference to the held value without checking that there is one.
    ///
    /// # Safety
    ///
    /// `self` must be engaged.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self) -> &mut T {
        self.slot.raw_mut().get_unchecked_mut()
    }

    /// Gets a reference to the held value,
    /// returning an error if there is none.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_optional::Optional;
    ///
    /// assert_eq!(Optional::some(5).value(), Ok(&5));
    /// assert!(Optional::<u32>::new().value().is_err());
    ///
    /// ```
    #[inline]
    pub fn value(&self) -> Result<&T, EmptyOptionalError> {
        self.as_ref().ok_or_else(EmptyOptionalError::new::<T>)
    }

    /// Gets a mutable reference to the held value,
    /// returning an error if there is none.
    #[inline]
    pub fn value_mut(&mut self) -> Result<&mut T, EmptyOptionalError> {
        self.as_mut().ok_or_else(EmptyOptionalError::new::<T>)
    }

    /// Unwraps the held value.
    ///
    /// # Panics
    ///
    /// Panics if `self` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_optional::Optional;
    ///
    /// assert_eq!(Optional::some(vec![1, 2]).into_inner(), vec![1, 2]);
    ///
    /// ```
    ///
    /// This one panics:
    /// ```should_panic
    /// use inplace_optional::Optional;
    ///
    /// let _ = Optional::<u32>::new().into_inner();
    /// ```
    #[inline]
    #[track_caller]
    pub fn into_inner(self) -> T {
        match self.into_option() {
            Some(value) => value,
            None => empty_access::<T>(),
        }
    }

    /// Converts this into a `std::option::Option`.
    #[inline]
    pub fn into_option(mut self) -> Option<T> {
        self.take()
    }

    /// Moves the held value out, leaving `self` empty.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        self.slot.raw_mut().take()
    }

    /// Replaces the held value with `value`, returning the previous one.
    #[inline]
    pub fn replace(&mut self, value: T) -> Option<T> {
        let previous = self.take();
        self.emplace(value);
        previous
    }

    /// Moves the held value into a new `Optional`,
    /// leaving `T::default()` (the moved-from value) in `self`.
    ///
    /// Unlike [`take`](Self::take), this doesn't change whether `self` is engaged.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_optional::Optional;
    ///
    /// let mut source = Optional::some(String::from("hello"));
    /// let moved = source.move_out();
    ///
    /// assert_eq!(*moved, "hello");
    /// assert!(source.is_engaged());
    /// assert_eq!(*source, "");
    ///
    /// let mut empty = Optional::<String>::new();
    /// assert!(empty.move_out().is_empty());
    /// assert!(empty.is_empty());
    ///
    /// ```
    #[inline]
    pub fn move_out(&mut self) -> Self
    where
        T: Default,
    {
        match self.as_mut() {
            Some(value) => Self::some(mem::take(value)),
            None => Self::new(),
        }
    }

    /// Drops the held value (if any), then stores `value`.
    #[inline]
    pub fn emplace(&mut self, value: T) -> &mut T {
        self.slot.raw_mut().write(value)
    }

    /// Drops the held value (if any),
    /// then stores the return value of `f`.
    ///
    /// If `f` panics, `self` is left empty.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_optional::Optional;
    ///
    /// let mut opt = Optional::some(vec![0u8; 3]);
    /// opt.emplace_with(|| vec![1; 2]).push(2);
    /// assert_eq!(*opt, [1, 1, 2]);
    ///
    /// ```
    #[inline]
    pub fn emplace_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace_with(|| Ok::<T, std::convert::Infallible>(f())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Drops the held value (if any),
    /// then stores the value returned by `f`.
    ///
    /// If `f` returns an error (or panics),
    /// `self` is left empty and the error is returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_optional::Optional;
    ///
    /// let mut opt = Optional::some(3u8);
    ///
    /// assert_eq!(opt.try_emplace_with(|| "4".parse()), Ok(&mut 4));
    ///
    /// assert!(opt.try_emplace_with(|| "-1".parse::<u8>()).is_err());
    /// assert!(opt.is_empty());
    ///
    /// ```
    #[inline]
    pub fn try_emplace_with<F, E>(&mut self, f: F) -> Result<&mut T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.slot.raw_mut().try_construct(f)
    }

    /// Drops the held value, leaving `self` empty.
    ///
    /// Does nothing if `self` is already empty.
    #[inline]
    pub fn reset(&mut self) {
        self.slot.raw_mut().drop_value();
    }

    /// Assigns the contents of `source` to `self`.
    ///
    /// | `self` \ `source` | empty       | engaged                         |
    /// |-------------------|-------------|---------------------------------|
    /// | empty             | nothing     | moves the value into `self`     |
    /// | engaged           | `reset()`   | assigns onto the held value     |
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_optional::Optional;
    ///
    /// let mut target = Optional::some(1);
    /// target.assign(Optional::some(2));
    /// assert_eq!(*target, 2);
    ///
    /// target.assign(Optional::new());
    /// assert!(target.is_empty());
    ///
    /// ```
    #[inline]
    pub fn assign(&mut self, source: Self) {
        match source.into_option() {
            Some(value) => {
                self.assign_value(value);
            }
            None => self.reset(),
        }
    }

    /// Assigns `value` to `self`.
    ///
    /// If `self` is engaged this assigns onto the held value
    /// (dropping the old value as part of the assignment),
    /// otherwise this stores `value` in `self`.
    #[inline]
    pub fn assign_value(&mut self, value: T) -> &mut T {
        if self.is_engaged() {
            // SAFETY: just checked that `self` is engaged.
            let held = unsafe { self.get_unchecked_mut() };
            *held = value;
            held
        } else {
            self.emplace(value)
        }
    }

    /// Makes `self` empty, equivalent to [`reset`](Self::reset).
    #[inline]
    pub fn assign_null(&mut self, _: NullOpt) {
        self.reset();
    }

    /// Swaps the contents of `self` and `other`.
    ///
    /// When both are engaged the values are swapped with `std::mem::swap`,
    /// use [`swap`](crate::swap) to use the [`Swap`](crate::Swap) impl of `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_optional::Optional;
    ///
    /// let mut a = Optional::some('a');
    /// let mut b = Optional::new();
    ///
    /// a.swap(&mut b);
    /// assert!(a.is_empty());
    /// assert_eq!(*b, 'a');
    ///
    /// ```
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.swap_by(other, mem::swap)
    }

    pub(crate) fn swap_by<F>(&mut self, other: &mut Self, swap_values: F)
    where
        F: FnOnce(&mut T, &mut T),
    {
        match (self.as_mut(), other.as_mut()) {
            (Some(left), Some(right)) => swap_values(left, right),
            (Some(_), None) => Self::transfer(self, other),
            (None, Some(_)) => Self::transfer(other, self),
            (None, None) => {}
        }
    }

    // Moves the value of `from` into the empty `to`.
    fn transfer(from: &mut Self, to: &mut Self) {
        if let Some(value) = from.take() {
            to.emplace(value);
        }
    }

    fn compare_by<U, S2, F, G>(
        &self,
        other: &BasicOptional<U, S2>,
        on_values: F,
        on_engagement: G,
    ) -> bool
    where
        S2: Slot<U>,
        F: FnOnce(&T, &U) -> bool,
        G: FnOnce(&bool, &bool) -> bool,
    {
        match (self.as_ref(), other.as_ref()) {
            (Some(left), Some(right)) => on_values(left, right),
            (left, right) => on_engagement(&left.is_some(), &right.is_some()),
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn empty_access<T>() -> ! {
    panic!(
        "attempted to access the value of an empty Optional<{}>",
        any::type_name::<T>(),
    )
}

//////////////////////////////////////////////////////////////////////////////

/// The default value is empty.
impl<T, S> Default for BasicOptional<T, S>
where
    S: Slot<T>,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> From<NullOpt> for BasicOptional<T, S>
where
    S: Slot<T>,
{
    #[inline]
    fn from(marker: NullOpt) -> Self {
        Self::null(marker)
    }
}

impl<T, S> From<Option<T>> for BasicOptional<T, S>
where
    S: Slot<T>,
{
    #[inline]
    fn from(this: Option<T>) -> Self {
        match this {
            Some(value) => Self::some(value),
            None => Self::new(),
        }
    }
}

impl<T, S> From<BasicOptional<T, S>> for Option<T>
where
    S: Slot<T>,
{
    #[inline]
    fn from(this: BasicOptional<T, S>) -> Self {
        this.into_option()
    }
}

//////////////////////////////////////////////////////////////////////////////

/// Dereferences to the held value.
///
/// # Panics
///
/// Panics if `self` is empty, callers must check that there is a value first.
impl<T, S> Deref for BasicOptional<T, S>
where
    S: Slot<T>,
{
    type Target = T;

    #[inline]
    #[track_caller]
    fn deref(&self) -> &T {
        match self.as_ref() {
            Some(value) => value,
            None => empty_access::<T>(),
        }
    }
}

/// Dereferences to the held value.
///
/// # Panics
///
/// Panics if `self` is empty, callers must check that there is a value first.
impl<T, S> DerefMut for BasicOptional<T, S>
where
    S: Slot<T>,
{
    #[inline]
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        match self.as_mut() {
            Some(value) => value,
            None => empty_access::<T>(),
        }
    }
}

//////////////////////////////////////////////////////////////////////////////

impl<T, S> Clone for BasicOptional<T, S>
where
    T: Clone,
    S: Slot<T>,
{
    fn clone(&self) -> Self {
        match self.as_ref() {
            Some(value) => Self::some(value.clone()),
            None => Self::new(),
        }
    }

    /// Assigns a clone of `source` to `self`.
    ///
    /// When both are engaged this calls `T::clone_from`,
    /// reusing the value held by `self`.
    fn clone_from(&mut self, source: &Self) {
        match source.as_ref() {
            Some(src) => match self.as_mut() {
                Some(dst) => dst.clone_from(src),
                None => {
                    self.emplace_with(|| src.clone());
                }
            },
            None => self.reset(),
        }
    }
}

impl<T> Copy for BasicOptional<T, CopySlot<T>> where T: Copy {}

impl<T, S> Debug for BasicOptional<T, S>
where
    T: Debug,
    S: Slot<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_ref() {
            Some(value) => f.debug_tuple("Engaged").field(value).finish(),
            None => f.write_str("Empty"),
        }
    }
}

impl<T, S> Hash for BasicOptional<T, S>
where
    T: Hash,
    S: Slot<T>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_ref().hash(state)
    }
}

//////////////////////////////////////////////////////////////////////////////

/// Empty `Optional`s are equal,
/// engaged ones are compared with the `PartialEq` impl of the held values.
impl<T, U, S, S2> PartialEq<BasicOptional<U, S2>> for BasicOptional<T, S>
where
    T: PartialEq<U>,
    S: Slot<T>,
    S2: Slot<U>,
{
    #[inline]
    fn eq(&self, other: &BasicOptional<U, S2>) -> bool {
        self.compare_by(other, <T as PartialEq<U>>::eq, <bool as PartialEq>::eq)
    }

    #[inline]
    #[allow(clippy::partialeq_ne_impl)]
    fn ne(&self, other: &BasicOptional<U, S2>) -> bool {
        self.compare_by(other, <T as PartialEq<U>>::ne, <bool as PartialEq>::ne)
    }
}

impl<T, S> Eq for BasicOptional<T, S>
where
    T: Eq,
    S: Slot<T>,
{
}

impl<T, S> PartialEq<NullOpt> for BasicOptional<T, S>
where
    S: Slot<T>,
{
    #[inline]
    fn eq(&self, _: &NullOpt) -> bool {
        self.is_empty()
    }
}

impl<T, S> PartialEq<BasicOptional<T, S>> for NullOpt
where
    S: Slot<T>,
{
    #[inline]
    fn eq(&self, other: &BasicOptional<T, S>) -> bool {
        other.is_empty()
    }
}

/// Empty `Optional`s compare less than engaged ones,
/// engaged ones are compared with the `PartialOrd` impl of the held values.
///
/// Every method calls the method with the same name on the held values
/// when both are engaged, exactly once.
impl<T, U, S, S2> PartialOrd<BasicOptional<U, S2>> for BasicOptional<T, S>
where
    T: PartialOrd<U>,
    S: Slot<T>,
    S2: Slot<U>,
{
    fn partial_cmp(&self, other: &BasicOptional<U, S2>) -> Option<Ordering> {
        match (self.as_ref(), other.as_ref()) {
            (Some(left), Some(right)) => left.partial_cmp(right),
            (left, right) => left.is_some().partial_cmp(&right.is_some()),
        }
    }

    #[inline]
    fn lt(&self, other: &BasicOptional<U, S2>) -> bool {
        self.compare_by(other, <T as PartialOrd<U>>::lt, <bool as PartialOrd>::lt)
    }

    #[inline]
    fn le(&self, other: &BasicOptional<U, S2>) -> bool {
        self.compare_by(other, <T as PartialOrd<U>>::le, <bool as PartialOrd>::le)
    }

    #[inline]
    fn gt(&self, other: &BasicOptional<U, S2>) -> bool {
        self.compare_by(other, <T as PartialOrd<U>>::gt, <bool as PartialOrd>::gt)
    }

    #[inline]
    fn ge(&self, other: &BasicOptional<U, S2>) -> bool {
        self.compare_by(other, <T as PartialOrd<U>>::ge, <bool as PartialOrd>::ge)
    }
}

impl<T, S> Ord for BasicOptional<T, S>
where
    T: Ord,
    S: Slot<T>,
{
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_ref(), other.as_ref()) {
            (Some(left), Some(right)) => left.cmp(right),
            (left, right) => left.is_some().cmp(&right.is_some()),
        }
    }
}

//////////////////////////////////////////////////////////////////////////////

/// Deserializes the same way as `Option<T>`.
impl<'de, T, S> Deserialize<'de> for BasicOptional<T, S>
where
    T: Deserialize<'de>,
    S: Slot<T>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::deserialize(deserializer).map(Self::from)
    }
}

/// Serializes the same way as `Option<T>`.
impl<T, S> Serialize for BasicOptional<T, S>
where
    T: Serialize,
    S: Slot<T>,
{
    fn serialize<Z>(&self, serializer: Z) -> Result<Z::Ok, Z::Error>
    where
        Z: Serializer,
    {
        self.as_ref().serialize(serializer)
    }
}
