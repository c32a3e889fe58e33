//! Naming convention chains.
//!
//! A chain turns the default wire name of a type, member, array item or
//! enum value into the final one. Rules run in registration order, each
//! one receiving the name produced by the previous rule. A rule with a
//! predicate only runs when the predicate accepts the context; the
//! context never changes while the chain runs.

use alloc::sync::Arc;
use core::fmt;

// -----------------------------------------------------------------------------
// Modules

mod case;
mod context;

// -----------------------------------------------------------------------------
// Exports

pub use case::Case;
pub use context::{ArrayItemNameContext, EnumValueNameContext, MemberNameContext, TypeNameContext};

// -----------------------------------------------------------------------------
// NamingConventions

type Transform<C> = Arc<dyn Fn(&str, &C) -> String + Send + Sync>;
type Predicate<C> = Arc<dyn Fn(&C) -> bool + Send + Sync>;

struct Rule<C> {
    transform: Transform<C>,
    predicate: Option<Predicate<C>>,
}

impl<C> Clone for Rule<C> {
    fn clone(&self) -> Self {
        Self {
            transform: self.transform.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

/// An ordered chain of naming rules over the context `C`.
///
/// # Example
///
/// ```
/// use nodal_mapper::naming::NamingConventions;
///
/// let mut chain = NamingConventions::<bool>::new();
/// chain.add(|name, _| name.to_uppercase());
/// chain.add_when(|is_root| *is_root, |name, _| format!("{name}Root"));
///
/// assert_eq!(chain.resolve("order", &false), "ORDER");
/// assert_eq!(chain.resolve("order", &true), "ORDERRoot");
/// ```
pub struct NamingConventions<C> {
    rules: Vec<Rule<C>>,
}

impl<C> NamingConventions<C> {
    #[inline]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends an unconditional rule.
    pub fn add<F>(&mut self, transform: F)
    where
        F: Fn(&str, &C) -> String + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            transform: Arc::new(transform),
            predicate: None,
        });
    }

    /// Appends a rule that runs only when `predicate` accepts the context.
    pub fn add_when<P, F>(&mut self, predicate: P, transform: F)
    where
        P: Fn(&C) -> bool + Send + Sync + 'static,
        F: Fn(&str, &C) -> String + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            transform: Arc::new(transform),
            predicate: Some(Arc::new(predicate)),
        });
    }

    /// Folds every applicable rule over `default`, in registration order.
    pub fn resolve(&self, default: &str, context: &C) -> String {
        self.rules
            .iter()
            .filter(|rule| rule.predicate.as_ref().is_none_or(|accepts| accepts(context)))
            .fold(String::from(default), |name, rule| (rule.transform)(&name, context))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<C> Default for NamingConventions<C> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for NamingConventions<C> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<C> fmt::Debug for NamingConventions<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamingConventions")
            .field("rules", &self.rules.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::NamingConventions;

    fn upper(name: &str, _: &u8) -> String {
        name.to_uppercase()
    }

    fn suffix(name: &str, _: &u8) -> String {
        format!("{name}_x")
    }

    #[test]
    fn registration_order_is_significant() {
        let mut a_then_b = NamingConventions::new();
        a_then_b.add(upper);
        a_then_b.add(suffix);

        let mut b_then_a = NamingConventions::new();
        b_then_a.add(suffix);
        b_then_a.add(upper);

        assert_eq!(a_then_b.resolve("id", &0), "ID_x");
        assert_eq!(b_then_a.resolve("id", &0), "ID_X");
    }

    #[test]
    fn predicates_see_the_original_context() {
        let mut chain = NamingConventions::<u8>::new();
        chain.add(|name, _| format!("{name}!"));
        // Gated on the context, not on the intermediate name.
        chain.add_when(|ctx| *ctx > 1, |name, ctx| format!("{name}{ctx}"));

        assert_eq!(chain.resolve("n", &1), "n!");
        assert_eq!(chain.resolve("n", &2), "n!2");
        assert!(NamingConventions::<u8>::new().resolve("same", &9) == "same");
    }
}
