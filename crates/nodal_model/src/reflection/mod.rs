// -----------------------------------------------------------------------------
// Modules

mod from_parent;
mod reflect;

// -----------------------------------------------------------------------------
// Exports

pub use from_parent::FromParent;
pub use reflect::Reflect;
