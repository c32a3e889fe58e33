/// Construction from the enclosing instance.
///
/// A type deriving `Reflect` with `#[reflect(parent = P)]` is built through
/// this trait when the mapper creates it as a member (or list item) of a `P`.
///
/// # Example
///
/// ```
/// use nodal_model::{FromParent, Reflect};
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Order {
///     id: u32,
///     line: Line,
/// }
///
/// #[derive(Reflect)]
/// #[reflect(parent = Order)]
/// struct Line {
///     #[reflect(ignore)]
///     order_id: u32,
///     quantity: u32,
/// }
///
/// impl Default for Line {
///     fn default() -> Self {
///         Self { order_id: 0, quantity: 1 }
///     }
/// }
///
/// impl FromParent<Order> for Line {
///     fn from_parent(parent: &Order) -> Self {
///         Self { order_id: parent.id, ..Self::default() }
///     }
/// }
/// ```
pub trait FromParent<P> {
    /// Creates a value owned by `parent`.
    fn from_parent(parent: &P) -> Self;
}
