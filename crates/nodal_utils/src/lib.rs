//! Small containers used across `nodal`.
//!
//! [`hash::HashMap`] backs the option tables of the mapper, [`TypeIdMap`]
//! backs the per-type caches of the model.
#![no_std]

mod typeid_map;

pub mod hash;

pub use typeid_map::TypeIdMap;
