//! Hash states shared by the `nodal` crates.

mod hasher;

pub use hasher::{FixedHashState, FixedHasher, NoOpHashState, NoOpHasher};

/// `hashbrown` map hashed with [`FixedHashState`] unless told otherwise.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;
