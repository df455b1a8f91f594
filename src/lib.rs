//! Classify and unwrap transparent single-field wrapper types.
//!
//! Wrapper types opt in with `#[derive(Describe)]` plus `#[repr(transparent)]`
//! (or `#[reflect(transparent)]`). Values then travel as `&dyn Reflect` and an
//! [`Unboxer`] reduces them to the value they wrap:
//!
//! ```
//! use transval::{AccessorCache, Describe, Unboxer};
//!
//! #[derive(Describe)]
//! #[repr(transparent)]
//! struct Meters(u32);
//!
//! #[derive(Describe)]
//! #[repr(transparent)]
//! struct Squared(Meters);
//!
//! let cache = AccessorCache::new();
//! let unboxer = Unboxer::new(&cache);
//! let squared = Squared(Meters(42));
//!
//! let inner = unboxer.unwrap_fully(Some(&squared)).unwrap();
//! assert_eq!(inner.downcast_ref::<u32>(), Some(&42));
//!
//! let once = unboxer.boxed_value(&squared).unwrap();
//! assert!(once.is::<Meters>());
//! ```

mod cache;
mod classify;
mod error;
mod reflect;
mod unbox;

#[doc(inline)]
pub use transval_impl::*;

pub use cache::{AccessorCache, BackingAccessor};
pub use classify::is_transparent;
pub use error::{IntrospectError, Result, UnwrapError};
pub use reflect::{Describe, Field, Member, ReadFn, Reflect, Storage, Transparent, TypeHandle};
pub use unbox::{ReturnContract, Unboxer};
