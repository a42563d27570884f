//! Registered dispatch rules.

use std::fmt;

use crate::signature::CallArgs;
use crate::tag::TypeTag;

/// A handler invoked with the full call arguments once its rule wins.
///
/// Handlers report failures through `anyhow`; the dispatcher propagates them
/// to the caller unchanged. Dispatch over constructible types needs no
/// special casing: a closure that builds and returns a value is a handler
/// like any other.
pub type HandlerFn<V> = dyn Fn(&CallArgs<V>) -> anyhow::Result<V>;

/// A registered pairing of per-position type constraints and a handler.
///
/// Rules are immutable once added to a dispatcher. A constraint of
/// [`TypeTag::ANY`] at some position accepts every value there, which is how
/// partial dispatch is expressed.
pub struct Rule<V> {
    constraints: Vec<TypeTag>,
    handler: Box<HandlerFn<V>>,
}

impl<V> Rule<V> {
    pub(crate) fn new(constraints: Vec<TypeTag>, handler: Box<HandlerFn<V>>) -> Self {
        Self {
            constraints,
            handler,
        }
    }

    /// The per-position type constraints, one per dispatch position.
    pub fn constraints(&self) -> &[TypeTag] {
        &self.constraints
    }

    pub(crate) fn invoke(&self, args: &CallArgs<V>) -> anyhow::Result<V> {
        (self.handler)(args)
    }
}

impl<V> fmt::Debug for Rule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("constraints", &self.constraints)
            .finish_non_exhaustive()
    }
}
