//! Builder-style wrapper coupling a default handler with typed overrides.
//!
//! This is the one-step declaration form: wrap a base handler together with
//! its own constraint tuple (or with none, making it a fallback), then
//! attach further type-qualified overrides incrementally. It is sugar over
//! [`FunctionDispatcher`]; resolution semantics are identical.

use std::fmt;
use std::sync::Arc;

use crate::error::DispatchError;
use crate::registry::FunctionDispatcher;
use crate::rule::HandlerFn;
use crate::signature::{CallArgs, Signature};
use crate::tag::{DispatchValue, TypeHierarchy, TypeTag};

/// A dispatcher bundled with an optional no-match fallback.
pub struct Multifunction<V> {
    dispatcher: FunctionDispatcher<V>,
    fallback: Option<Box<HandlerFn<V>>>,
}

impl<V: DispatchValue> Multifunction<V> {
    /// Wrap a handler with no seed constraints.
    ///
    /// The wrapped handler becomes the fallback invoked whenever no
    /// registered rule matches; dispatch is driven entirely by rules added
    /// later. The dispatch arity is the full parameter count, so override
    /// tuples cover every position.
    pub fn new<F>(
        hierarchy: Arc<TypeHierarchy>,
        params: &[&str],
        handler: F,
    ) -> Result<Self, DispatchError>
    where
        F: Fn(&CallArgs<V>) -> anyhow::Result<V> + 'static,
    {
        let signature = Signature::new(params, params.len(), false, false, &[])?;
        Ok(Self {
            dispatcher: FunctionDispatcher::new(hierarchy, signature),
            fallback: Some(Box::new(handler)),
        })
    }

    /// Wrap a handler together with its own constraint tuple.
    ///
    /// The dispatch arity is the tuple's length and the wrapped handler is
    /// registered as an ordinary rule; there is no fallback, so a call
    /// matching no rule fails.
    pub fn with_rule<F>(
        hierarchy: Arc<TypeHierarchy>,
        params: &[&str],
        constraints: &[TypeTag],
        handler: F,
    ) -> Result<Self, DispatchError>
    where
        F: Fn(&CallArgs<V>) -> anyhow::Result<V> + 'static,
    {
        let signature = Signature::new(params, constraints.len(), false, false, &[])?;
        let mut dispatcher = FunctionDispatcher::new(hierarchy, signature);
        dispatcher.register_rule(constraints, handler)?;
        Ok(Self {
            dispatcher,
            fallback: None,
        })
    }

    /// Register a further override on the underlying dispatcher.
    ///
    /// Chainable, like [`FunctionDispatcher::register_rule`].
    pub fn register<F>(
        &mut self,
        constraints: &[TypeTag],
        handler: F,
    ) -> Result<&mut Self, DispatchError>
    where
        F: Fn(&CallArgs<V>) -> anyhow::Result<V> + 'static,
    {
        self.dispatcher.register_rule(constraints, handler)?;
        Ok(self)
    }

    /// Dispatch a call, falling back to the wrapped handler on no match.
    pub fn call(&self, args: &CallArgs<V>) -> Result<V, DispatchError> {
        match self.dispatcher.call(args) {
            Err(DispatchError::NoMatch(err)) => match &self.fallback {
                Some(fallback) => fallback(args).map_err(DispatchError::from),
                None => Err(DispatchError::NoMatch(err)),
            },
            other => other,
        }
    }

    /// The underlying dispatcher.
    pub fn dispatcher(&self) -> &FunctionDispatcher<V> {
        &self.dispatcher
    }
}

impl<V> fmt::Debug for Multifunction<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Multifunction")
            .field("dispatcher", &self.dispatcher)
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}
