use crate::Reflect;

/// A nullable value.
pub trait Optional: Reflect {
    /// Returns the present value, `None` for the null value.
    fn value(&self) -> Option<&dyn Reflect>;
}
