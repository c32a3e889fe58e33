//! Helpers for the `nodal` derive crates.
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro crate")]

mod manifest;

pub use manifest::Manifest;
