//! Node Mapper of the `nodal` mapping engine.
//!
//! Maps values implementing [`Reflect`](nodal_model::Reflect) to format
//! node trees and back:
//!
//! - [`node`]: the shared [`Node`] contract and its JSON, XML, CSV and form families.
//! - [`naming`]: ordered naming convention chains for types, members, array items and enum values.
//! - [`convert`]: the conversion pipeline between raw wire text and simple values.
//! - [`options`]: immutable call configuration, built with [`OptionsBuilder`].
//! - [`Mapper`]: the traversal engine.
//!
//! ## Example
//!
//! ```
//! use nodal_mapper::{Mapper, Options};
//! use nodal_mapper::naming::Case;
//! use nodal_model::Reflect;
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! #[reflect(default)]
//! struct Order {
//!     order_id: u32,
//!     lines: Vec<String>,
//! }
//!
//! let mapper = Mapper::new();
//! let options = Options::builder().member_case(Case::Camel).build();
//!
//! let order = Order { order_id: 7, lines: vec!["tea".into()] };
//! let text = mapper.to_json_string(&order, &options).unwrap();
//! assert_eq!(text, r#"{"orderId":7,"lines":["tea"]}"#);
//!
//! let back: Order = mapper.from_json_str(&text, &options).unwrap();
//! assert_eq!(back, order);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod mapper;

pub mod convert;
pub mod naming;
pub mod node;
pub mod options;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::{BoxError, ErrorKind, MappingError, Result};
pub use mapper::Mapper;
pub use node::{Format, Node, NodeError, NodeKind};
pub use options::{Mode, Options, OptionsBuilder, VisitContext};
