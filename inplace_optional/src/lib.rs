/*!

A nullable value type which stores its value inline,
without requiring the value type to have a null state of its own.

An [`Optional<T>`] is either empty or holds exactly one `T` ("engaged"),
in storage with the size and alignment of `T`, plus a discriminant.

# Features

- Construction without touching `T`: [`Optional::new`],
[`Optional::from(NULLOPT)`](NULLOPT), and `Default` never construct a `T`.

- In-place construction from a closure: [`Optional::in_place`],
[`emplace_with`](BasicOptional::emplace_with),
and their fallible `try_*` versions.

- Transactional mutators:
a failed (or panicking) in-place construction leaves the `Optional` empty,
never holding the previous value nor a partially constructed one.

- Capabilities mirroring the held type:
`Clone`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`, `Debug`,
`Serialize`, `Deserialize` are only implemented when `T` implements them.

- Triviality propagation: [`CopyOptional<T>`] is `Copy` and has no drop glue
when `T: Copy`, and it can be used in const contexts.

# Ordering

Empty `Optional`s are equal to each other and less than engaged ones,
engaged `Optional`s are compared by calling the comparison method of the held values
with the same name (`lt` calls `lt`, `ge` calls `ge`, and so on), exactly once.

# Example

```
use inplace_optional::{swap, Optional, IN_PLACE, NULLOPT};

let a = Optional::some(42);
let mut b = Optional::<i32>::new();
b.clone_from(&a);
assert_eq!(*b, 42);

let mut c = Optional::some(41);
let d = Optional::some(42);
assert!(c < d);
c.clone_from(&d);
assert!(c == d);

let mut e = Optional::in_place(IN_PLACE, || 41 + 1);
let mut f = Optional::from(NULLOPT);
swap(&mut e, &mut f);
assert_eq!(e, NULLOPT);
assert_eq!(f, d);

```

*/

#![warn(rust_2018_idioms)]

#[cfg(test)]
#[macro_use]
mod test_utils;

pub mod error;
pub mod markers;
pub mod optional;
pub mod slot;
pub mod swap;

pub use crate::{
    error::EmptyOptionalError,
    markers::{InPlace, NullOpt, IN_PLACE, NULLOPT},
    optional::{BasicOptional, CopyOptional, Optional},
    swap::{swap, Swap},
};
