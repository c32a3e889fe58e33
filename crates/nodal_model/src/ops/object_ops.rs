use crate::Reflect;

/// A value with named members.
///
/// Members are addressed by their declared name, not their wire name.
pub trait Object: Reflect {
    /// Returns the member declared as `name`.
    fn member(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns the mutable member declared as `name`.
    fn member_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;
}
