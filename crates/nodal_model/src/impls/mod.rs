//! Built-in [`Reflect`](crate::Reflect) implementations and helpers for
//! writing new ones.
//!
//! - Simple: `bool`, `char`, integers, floats, `String`, `Duration`,
//!   IP and socket addresses, [`uuid::Uuid`] and the `chrono` date/time types.
//! - Optional: `Option<T>`.
//! - List: `Vec<T>`, `VecDeque<T>`.
//! - Dictionary: `HashMap<K, V, S>`, `BTreeMap<K, V>`.
//! - Legacy containers without item types: [`UntypedList`], [`UntypedDictionary`].
//!
//! User scalar types with `FromStr + Display` are declared simple through
//! [`impl_reflect_simple!`](crate::impl_reflect_simple).

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod construct;
mod date_time;
mod list;
mod map;
mod option;
mod simple;
mod std_types;
mod untyped;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
pub use construct::{default_of, from_parent_of};
pub use simple::{format_display, parse_from_str};
pub use untyped::{UntypedDictionary, UntypedList};
