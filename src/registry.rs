//! The dispatch registry.
//!
//! A [`FunctionDispatcher`] is created once per dispatch point, accumulates
//! rules over its lifetime, and is queried many times. It owns its signature
//! and rule collection exclusively; rules are append-only and immutable once
//! added. Calls never mutate the registry.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::DispatchError;
use crate::resolver::RuleResolver;
use crate::rule::{HandlerFn, Rule};
use crate::signature::{CallArgs, Signature};
use crate::tag::{DispatchValue, TypeHierarchy, TypeTag};

/// A registry mapping tuples of type constraints to handlers.
///
/// Generic over the value type `V` flowing through calls; `V` reports its
/// own [`TypeTag`] via [`DispatchValue`].
pub struct FunctionDispatcher<V> {
    signature: Signature,
    hierarchy: Arc<TypeHierarchy>,
    rules: Vec<Rule<V>>,
}

impl<V: DispatchValue> FunctionDispatcher<V> {
    /// Create a dispatcher for a validated signature.
    ///
    /// The signature fixes the dispatch arity for the registry's lifetime;
    /// see [`Signature::new`] for the construction-time validation.
    pub fn new(hierarchy: Arc<TypeHierarchy>, signature: Signature) -> Self {
        Self {
            signature,
            hierarchy,
            rules: Vec::new(),
        }
    }

    /// The signature this dispatcher was built for.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The hierarchy this dispatcher resolves against.
    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    /// Number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Register a rule pairing the constraint tuple with a handler.
    ///
    /// Fails with [`DispatchError::RuleArity`] when the constraint count
    /// differs from the dispatch arity; the rule collection is unchanged on
    /// failure. Returns `&mut Self` so registrations chain.
    ///
    /// Registration order matters only as a tie-break: among equally
    /// specific rules the most recent wins, so registering the same
    /// constraint tuple again overrides the earlier handler.
    pub fn register_rule<F>(
        &mut self,
        constraints: &[TypeTag],
        handler: F,
    ) -> Result<&mut Self, DispatchError>
    where
        F: Fn(&CallArgs<V>) -> anyhow::Result<V> + 'static,
    {
        let expected = self.signature.dispatch_arity();
        if constraints.len() != expected {
            return Err(DispatchError::RuleArity {
                expected,
                found: constraints.len(),
            });
        }

        debug!(rule = self.rules.len(), ?constraints, "registered dispatch rule");
        let handler: Box<HandlerFn<V>> = Box::new(handler);
        self.rules.push(Rule::new(constraints.to_vec(), handler));
        Ok(self)
    }

    /// Select and invoke the most specific applicable handler.
    ///
    /// The full argument list is forwarded to the winning handler; only the
    /// leading dispatch positions are examined here. Handler errors pass
    /// through unchanged.
    pub fn call(&self, args: &CallArgs<V>) -> Result<V, DispatchError> {
        self.signature.check_call(args)?;

        let tags = args.dispatch_tags(self.signature.dispatch_arity());
        let resolver = RuleResolver::new(&self.hierarchy);
        let rule = resolver.resolve(&self.rules, &tags)?;

        rule.invoke(args).map_err(DispatchError::from)
    }
}

impl<V> fmt::Debug for FunctionDispatcher<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDispatcher")
            .field("signature", &self.signature)
            .field("rules", &self.rules)
            .finish()
    }
}
