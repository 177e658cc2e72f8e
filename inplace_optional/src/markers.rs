/*!
Zero-sized marker types used to select how an `Optional` is constructed.
*/

/// Marker type for an [`Optional`](crate::Optional) that holds no value.
///
/// Its only instance is [`NULLOPT`].
///
/// # Example
///
/// ```
/// use inplace_optional::{Optional, NULLOPT};
///
/// let opt = Optional::<String>::from(NULLOPT);
/// assert!(!opt.is_engaged());
/// assert_eq!(opt, NULLOPT);
///
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NullOpt {
    _priv: (),
}

/// The canonical (and only) instance of [`NullOpt`].
pub static NULLOPT: NullOpt = NullOpt { _priv: () };

/// Marker type for constructing the value of an [`Optional`](crate::Optional)
/// directly in its storage.
///
/// Its only instance is [`IN_PLACE`].
///
/// # Example
///
/// ```
/// use inplace_optional::{Optional, IN_PLACE};
///
/// let opt = Optional::in_place(IN_PLACE, || vec![3; 4]);
/// assert_eq!(*opt, [3, 3, 3, 3]);
///
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InPlace {
    _priv: (),
}

/// The canonical (and only) instance of [`InPlace`].
pub static IN_PLACE: InPlace = InPlace { _priv: () };
