//! Call signatures and call arguments.
//!
//! A [`Signature`] captures, once at dispatcher construction, everything the
//! dispatcher needs to know about the underlying callable's shape: the
//! ordered parameter names, how many leading positions drive dispatch, which
//! parameters carry defaults, and whether extra positional or named
//! arguments are accepted. Nothing is re-derived per call.
//!
//! [`CallArgs`] is the explicit value for one invocation: positional values
//! plus named values in insertion order. The signature validates a call's
//! shape before any rule is consulted.

use indexmap::IndexMap;

use crate::error::DispatchError;
use crate::tag::{DispatchValue, TypeTag};

/// The declared shape of a dispatch point's underlying callable.
#[derive(Debug, Clone)]
pub struct Signature {
    /// Ordered parameter names.
    params: Vec<String>,
    /// Number of leading positional parameters examined for dispatch.
    dispatch_arity: usize,
    /// Whether extra unnamed positional arguments are accepted.
    accepts_positional_rest: bool,
    /// Whether extra named arguments are accepted.
    accepts_keyword_rest: bool,
    /// Names of parameters carrying default values.
    defaulted: Vec<String>,
}

impl Signature {
    /// Validate and build a signature.
    ///
    /// Fails with [`DispatchError::ArityExceedsParams`] when `dispatch_arity`
    /// exceeds the number of parameters without defaults. This is the only
    /// construction-time check; it runs here rather than at call time so a
    /// misdeclared dispatch point fails as soon as it is created.
    pub fn new(
        params: &[&str],
        dispatch_arity: usize,
        accepts_positional_rest: bool,
        accepts_keyword_rest: bool,
        defaulted: &[&str],
    ) -> Result<Self, DispatchError> {
        let required = params.iter().filter(|p| !defaulted.contains(*p)).count();
        if dispatch_arity > required {
            return Err(DispatchError::ArityExceedsParams {
                arity: dispatch_arity,
                required,
            });
        }

        Ok(Self {
            params: params.iter().map(|p| p.to_string()).collect(),
            dispatch_arity,
            accepts_positional_rest,
            accepts_keyword_rest,
            defaulted: defaulted.iter().map(|p| p.to_string()).collect(),
        })
    }

    /// The number of leading positions examined for dispatch.
    pub fn dispatch_arity(&self) -> usize {
        self.dispatch_arity
    }

    /// The ordered parameter names.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Whether the named parameter carries a default value.
    pub fn is_defaulted(&self, name: &str) -> bool {
        self.defaulted.iter().any(|p| p == name)
    }

    /// Validate a call's shape against this signature.
    ///
    /// Runs before rule resolution; a shape error means no handler is ever
    /// consulted for the call.
    pub(crate) fn check_call<V>(&self, args: &CallArgs<V>) -> Result<(), DispatchError> {
        let positional = args.positional();

        // Every dispatch position needs a positional value to take its tag from.
        if positional.len() < self.dispatch_arity {
            return Err(DispatchError::MissingArgument {
                name: self.params[positional.len()].clone(),
            });
        }

        if positional.len() > self.params.len() && !self.accepts_positional_rest {
            return Err(DispatchError::TooManyPositional {
                expected: self.params.len(),
                found: positional.len(),
            });
        }

        for name in args.named().keys() {
            let param_index = self.params.iter().position(|p| p == name);
            match param_index {
                // Already bound by a positional value at the same slot.
                Some(index) if index < positional.len() => {
                    return Err(DispatchError::DuplicateArgument { name: name.clone() });
                }
                Some(_) => {}
                None if self.accepts_keyword_rest => {}
                None => {
                    return Err(DispatchError::UnexpectedKeyword { name: name.clone() });
                }
            }
        }

        for (index, param) in self.params.iter().enumerate() {
            let bound = index < positional.len() || args.named().contains_key(param);
            if !bound && !self.is_defaulted(param) {
                return Err(DispatchError::MissingArgument {
                    name: param.clone(),
                });
            }
        }

        Ok(())
    }
}

/// The arguments of one dispatcher invocation.
///
/// Positional values are ordered; named values keep their insertion order so
/// diagnostics report them the way the caller wrote them. The whole value is
/// forwarded to the winning handler; only the leading dispatch positions are
/// examined by the dispatcher itself.
#[derive(Debug, Clone)]
pub struct CallArgs<V> {
    positional: Vec<V>,
    named: IndexMap<String, V>,
}

impl<V> CallArgs<V> {
    /// Build a call from positional values.
    pub fn new(positional: Vec<V>) -> Self {
        Self {
            positional,
            named: IndexMap::new(),
        }
    }

    /// Add a named value.
    pub fn with_named(mut self, name: impl Into<String>, value: V) -> Self {
        self.named.insert(name.into(), value);
        self
    }

    /// The positional values, in call order.
    pub fn positional(&self) -> &[V] {
        &self.positional
    }

    /// The named values, in insertion order.
    pub fn named(&self) -> &IndexMap<String, V> {
        &self.named
    }

    /// The positional value at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&V> {
        self.positional.get(index)
    }

    /// The named value for `name`, if present.
    pub fn get_named(&self, name: &str) -> Option<&V> {
        self.named.get(name)
    }
}

impl<V: DispatchValue> CallArgs<V> {
    /// Tags of the leading `arity` positional values.
    ///
    /// Callers must have validated that at least `arity` positional values
    /// are present.
    pub(crate) fn dispatch_tags(&self, arity: usize) -> Vec<TypeTag> {
        self.positional[..arity].iter().map(V::type_tag).collect()
    }
}
