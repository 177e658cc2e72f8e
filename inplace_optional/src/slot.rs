/*!
Contains the inline storage of an [`Optional`](crate::Optional),
and the lifecycle tiers deciding whether that storage has drop glue.

[`RawSlot`] is the storage engine: a discriminant plus uninitialized memory
with the size and alignment of `T`.
It never drops what it holds.

The [`Slot`] trait is implemented by the two tiers that own a `RawSlot`:

- [`DropSlot`]: drops the held value (if any) when it is dropped.
Usable with any `T`.

- [`CopySlot`]: only usable with `T: Copy`, has no drop glue and is itself `Copy`.

*/

use std::{
    fmt::{self, Debug},
    mem::{self, MaybeUninit},
    ptr,
};


mod sealed {
    pub trait Sealed {}
}
use self::sealed::Sealed;

/// Declares a method that is a `const fn` when the compiler
/// supports mutable references in const contexts.
macro_rules! const_mut_fn {
    (
        $(#[$attr:meta])*
        $vis:vis fn $($rest:tt)*
    ) => (
        #[cfg(feature = "rust_1_83")]
        $(#[$attr])*
        $vis const fn $($rest)*

        #[cfg(not(feature = "rust_1_83"))]
        $(#[$attr])*
        $vis fn $($rest)*
    )
}

//////////////////////////////////////////////////////////////////////////////

/// Inline storage for zero or one `T`.
///
/// `value` holds a live `T` if and only if `engaged` is true.
///
/// Dropping a `RawSlot` never drops the value it holds,
/// wrap it in a [`Slot`] implementor to get that.
///
/// # Example
///
/// ```
/// use inplace_optional::slot::RawSlot;
///
/// let mut slot = RawSlot::<String>::empty();
/// assert!(!slot.is_engaged());
///
/// slot.try_construct(|| Ok::<_, ()>("hello".to_string())).unwrap();
/// assert_eq!(slot.get().map(|s| s.as_str()), Some("hello"));
///
/// assert_eq!(slot.take(), Some("hello".to_string()));
/// assert!(!slot.is_engaged());
///
/// ```
pub struct RawSlot<T> {
    engaged: bool,
    value: MaybeUninit<T>,
}

impl<T> RawSlot<T> {
    /// A slot which holds no value.
    pub const EMPTY: Self = Self {
        engaged: false,
        value: MaybeUninit::uninit(),
    };

    /// Constructs a slot which holds no value.
    #[inline]
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Constructs a slot holding `value`.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self {
            engaged: true,
            value: MaybeUninit::new(value),
        }
    }

    /// Whether this slot holds a value.
    #[inline]
    pub const fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Gets a reference to the held value, if there is one.
    #[inline]
    pub const fn get(&self) -> Option<&T> {
        if self.engaged {
            // SAFETY: `value` is initialized while `engaged` is true.
            Some(unsafe { self.value.assume_init_ref() })
        } else {
            None
        }
    }

    const_mut_fn! {
        /// Gets a mutable reference to the held value, if there is one.
        #[inline]
        pub fn get_mut(&mut self) -> Option<&mut T> {
            if self.engaged {
                // SAFETY: `value` is initialized while `engaged` is true.
                Some(unsafe { self.value.assume_init_mut() })
            } else {
                None
            }
        }
    }

    /// Gets a reference to the held value without checking the discriminant.
    ///
    /// # Safety
    ///
    /// The slot must be engaged.
    #[inline]
    pub unsafe fn get_unchecked(&self) -> &T {
        debug_assert!(self.engaged);
        self.value.assume_init_ref()
    }

    /// Gets a mutable reference to the held value without checking the discriminant.
    ///
    /// # Safety
    ///
    /// The slot must be engaged.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self) -> &mut T {
        debug_assert!(self.engaged);
        self.value.assume_init_mut()
    }

    /// Drops the held value (if any),
    /// then constructs a new one from the return value of `f`.
    ///
    /// `f` only runs once the slot is empty,
    /// so if it returns an error or panics the slot stays empty.
    ///
    /// The slot is only engaged after `f` successfully returned
    /// and its value was written into storage.
    pub fn try_construct<F, E>(&mut self, f: F) -> Result<&mut T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.drop_value();

        let value = f()?;
        Ok(self.write(value))
    }

    /// Drops the held value (if any), then stores `value`.
    #[inline]
    pub fn write(&mut self, value: T) -> &mut T {
        self.drop_value();

        let value = self.value.write(value);
        self.engaged = true;
        value
    }

    /// Moves the held value out of the slot, leaving it empty.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        if mem::replace(&mut self.engaged, false) {
            // SAFETY: the slot was engaged,
            // and the discriminant was cleared so the value isn't read again.
            Some(unsafe { self.value.assume_init_read() })
        } else {
            None
        }
    }

    /// Drops the held value in place, leaving the slot empty.
    ///
    /// The discriminant is cleared before the value's destructor runs,
    /// so a panicking destructor leaves the slot empty.
    #[inline]
    pub fn drop_value(&mut self) {
        if mem::replace(&mut self.engaged, false) {
            // SAFETY: the slot was engaged,
            // and the discriminant was cleared so the value isn't dropped twice.
            unsafe { ptr::drop_in_place(self.value.as_mut_ptr()) }
        }
    }
}

impl<T: Copy> Clone for RawSlot<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy> Copy for RawSlot<T> {}

impl<T: Debug> Debug for RawSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSlot")
            .field("engaged", &self.engaged)
            .field("value", &self.get())
            .finish()
    }
}

//////////////////////////////////////////////////////////////////////////////

/// The lifecycle tier of an [`Optional`](crate::Optional),
/// which owns its [`RawSlot`].
///
/// This trait is sealed, it is only implemented by [`DropSlot`] and [`CopySlot`].
pub trait Slot<T>: Sealed + Sized {
    /// A slot which holds no value.
    const EMPTY: Self;

    /// Constructs a slot holding `value`.
    fn from_value(value: T) -> Self;

    /// Gets the storage of this slot.
    fn raw(&self) -> &RawSlot<T>;

    /// Gets the storage of this slot mutably.
    fn raw_mut(&mut self) -> &mut RawSlot<T>;
}

//////////////////////////////////////////////////////////////////////////////

/// A [`Slot`] which drops the value it holds when it's dropped.
///
/// This is the default slot of [`Optional`](crate::Optional).
///
/// If `T` has no drop glue the destructor doesn't do anything,
/// the check is resolved when the type is monomorphized.
#[repr(transparent)]
pub struct DropSlot<T>(RawSlot<T>);

impl<T> DropSlot<T> {
    /// Constructs a slot holding `value`.
    #[inline]
    pub const fn new(value: T) -> Self {
        DropSlot(RawSlot::new(value))
    }

    /// Gets the storage of this slot.
    #[inline]
    pub const fn as_raw(&self) -> &RawSlot<T> {
        &self.0
    }
}

impl<T> Sealed for DropSlot<T> {}

impl<T> Slot<T> for DropSlot<T> {
    const EMPTY: Self = DropSlot(RawSlot::EMPTY);

    #[inline]
    fn from_value(value: T) -> Self {
        Self::new(value)
    }

    #[inline]
    fn raw(&self) -> &RawSlot<T> {
        &self.0
    }

    #[inline]
    fn raw_mut(&mut self) -> &mut RawSlot<T> {
        &mut self.0
    }
}

impl<T> Drop for DropSlot<T> {
    fn drop(&mut self) {
        if mem::needs_drop::<T>() {
            self.0.drop_value();
        }
    }
}

//////////////////////////////////////////////////////////////////////////////

/// A [`Slot`] for `Copy` types, which is itself `Copy` and has no drop glue.
///
/// # Example
///
/// ```
/// use inplace_optional::slot::CopySlot;
///
/// const SLOT: CopySlot<u32> = CopySlot::new(3);
///
/// let copy = SLOT;
/// assert_eq!(copy.as_raw().get(), Some(&3));
/// assert!(!std::mem::needs_drop::<CopySlot<u32>>());
///
/// ```
#[repr(transparent)]
pub struct CopySlot<T: Copy>(RawSlot<T>);

impl<T: Copy> CopySlot<T> {
    /// Constructs a slot holding `value`.
    #[inline]
    pub const fn new(value: T) -> Self {
        CopySlot(RawSlot::new(value))
    }

    /// Gets the storage of this slot.
    #[inline]
    pub const fn as_raw(&self) -> &RawSlot<T> {
        &self.0
    }
}

impl<T: Copy> Clone for CopySlot<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy> Copy for CopySlot<T> {}

impl<T: Copy> Sealed for CopySlot<T> {}

impl<T: Copy> Slot<T> for CopySlot<T> {
    const EMPTY: Self = CopySlot(RawSlot::EMPTY);

    #[inline]
    fn from_value(value: T) -> Self {
        Self::new(value)
    }

    #[inline]
    fn raw(&self) -> &RawSlot<T> {
        &self.0
    }

    #[inline]
    fn raw_mut(&mut self) -> &mut RawSlot<T> {
        &mut self.0
    }
}
