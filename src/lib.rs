#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use nodal_mapper as mapper;
pub use nodal_model as model;
pub use nodal_utils as utils;

/// Commonly used items, `use nodal::prelude::*;`.
pub mod prelude {
    pub use nodal_mapper::{Format, Mapper, MappingError, Node, NodeKind, Options};
    pub use nodal_model::info::Typed;

    // With the `derive` feature this also brings `#[derive(Reflect)]`.
    pub use nodal_model::Reflect;
}
