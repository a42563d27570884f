//! Dispatch error types.
//!
//! Every failure surfaces synchronously to the immediate caller; nothing is
//! logged-and-swallowed and nothing retries. Handler-raised errors pass
//! through the transparent [`DispatchError::Handler`] variant unchanged.

use std::fmt;

use thiserror::Error;

/// Errors raised by dispatcher construction, registration, and calls.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Construction-time: the requested dispatch arity cannot be satisfied
    /// by the declared parameter list.
    #[error("dispatch arity {arity} exceeds the {required} required positional parameters")]
    ArityExceedsParams {
        /// The requested dispatch arity.
        arity: usize,
        /// The number of non-defaulted positional parameters.
        required: usize,
    },

    /// Registration-time: a rule supplied the wrong number of type
    /// constraints. No rule is added.
    #[error("rule declares {found} type constraints, dispatcher expects {expected}")]
    RuleArity {
        /// The dispatcher's dispatch arity.
        expected: usize,
        /// The number of constraints the rule supplied.
        found: usize,
    },

    /// Call-time: a non-defaulted parameter was bound by neither a
    /// positional nor a named argument.
    #[error("missing required argument `{name}`")]
    MissingArgument {
        /// The unbound parameter's name.
        name: String,
    },

    /// Call-time: more positional arguments than declared parameters, and
    /// the signature does not accept a positional rest.
    #[error("expected at most {expected} positional arguments, got {found}")]
    TooManyPositional {
        /// The declared parameter count.
        expected: usize,
        /// The number of positional arguments supplied.
        found: usize,
    },

    /// Call-time: a named argument does not correspond to any declared
    /// parameter, and the signature does not accept a keyword rest.
    #[error("unexpected keyword argument `{name}`")]
    UnexpectedKeyword {
        /// The offending argument name.
        name: String,
    },

    /// Call-time: a parameter was bound both positionally and by name.
    #[error("got multiple values for argument `{name}`")]
    DuplicateArgument {
        /// The doubly-bound parameter's name.
        name: String,
    },

    /// Call-time: no registered rule matches the observed argument types.
    #[error(transparent)]
    NoMatch(#[from] NoMatchError),

    /// An error raised by the chosen handler, propagated unchanged.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

/// Error when no registered rule matches the arguments.
///
/// Carries the names of the observed dispatch-position types so the caller
/// can see what the registry was asked to match.
#[derive(Debug, Clone)]
pub struct NoMatchError {
    /// Names of the observed dispatch-position types, in call order.
    pub arg_types: Vec<String>,
    /// How many rules were registered when the call failed.
    pub rules_considered: usize,
}

impl fmt::Display for NoMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no applicable rule for argument types ({})",
            self.arg_types.join(", ")
        )?;
        if self.rules_considered == 1 {
            write!(f, "; 1 rule considered")
        } else {
            write!(f, "; {} rules considered", self.rules_considered)
        }
    }
}

impl std::error::Error for NoMatchError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_match_display() {
        let err = NoMatchError {
            arg_types: vec!["int".to_string(), "str".to_string()],
            rules_considered: 3,
        };
        assert_eq!(
            err.to_string(),
            "no applicable rule for argument types (int, str); 3 rules considered"
        );
    }

    #[test]
    fn test_handler_error_is_transparent() {
        let inner = anyhow::anyhow!("boom");
        let err = DispatchError::from(inner);
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_arity_display() {
        let err = DispatchError::RuleArity {
            expected: 1,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "rule declares 2 type constraints, dispatcher expects 1"
        );
    }
}
