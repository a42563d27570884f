//! Runtime multiple dispatch over explicit type hierarchies.
//!
//! A [`FunctionDispatcher`] maps ordered tuples of type constraints to
//! handlers and, at call time, selects the most specific applicable handler
//! based on the runtime types of the leading positional arguments.
//!
//! # Algorithm Overview
//!
//! 1. **Validate the call shape** against the [`Signature`] fixed at
//!    construction
//! 2. **Filter applicable rules**: each dispatch argument's tag must be the
//!    rule's constraint tag or a subtype of it
//! 3. **Rank by specificity**: per-position subtype distances, compared
//!    lexicographically with position 1 first
//! 4. **Select and invoke**: smallest distance vector wins, ties go to the
//!    most recently registered rule, and the full argument list is forwarded
//!    to the winner
//!
//! Types are modeled explicitly: a [`TypeHierarchy`] registers tags and
//! their declared "is-a" edges, and values implement [`DispatchValue`] to
//! report their tag. A constraint of [`TypeTag::ANY`] matches every value,
//! which is how partial dispatch is expressed.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use multidispatch::{
//!     CallArgs, DispatchValue, FunctionDispatcher, Signature, TypeHierarchy, TypeTag,
//! };
//!
//! const INT: TypeTag = TypeTag::new(1);
//! const STR: TypeTag = TypeTag::new(2);
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Value {
//!     Int(i64),
//!     Str(String),
//! }
//!
//! impl DispatchValue for Value {
//!     fn type_tag(&self) -> TypeTag {
//!         match self {
//!             Value::Int(_) => INT,
//!             Value::Str(_) => STR,
//!         }
//!     }
//! }
//!
//! let mut hierarchy = TypeHierarchy::new();
//! assert_eq!(hierarchy.register("int"), INT);
//! assert_eq!(hierarchy.register("str"), STR);
//!
//! let signature = Signature::new(&["x"], 1, false, false, &[])?;
//! let mut dispatcher = FunctionDispatcher::new(Arc::new(hierarchy), signature);
//!
//! dispatcher.register_rule(&[INT], |args| match &args.positional()[0] {
//!     Value::Int(n) => Ok(Value::Int(n + 1)),
//!     other => anyhow::bail!("expected int, got {other:?}"),
//! })?;
//!
//! let result = dispatcher.call(&CallArgs::new(vec![Value::Int(1)]))?;
//! assert_eq!(result, Value::Int(2));
//!
//! // No rule covers strings yet.
//! assert!(dispatcher
//!     .call(&CallArgs::new(vec![Value::Str("s".into())]))
//!     .is_err());
//! # Ok::<(), multidispatch::DispatchError>(())
//! ```

pub mod error;
pub mod multifunction;
pub mod registry;
pub mod resolver;
pub mod rule;
pub mod signature;
pub mod tag;

pub use error::{DispatchError, NoMatchError};
pub use multifunction::Multifunction;
pub use registry::FunctionDispatcher;
pub use resolver::RuleResolver;
pub use rule::{HandlerFn, Rule};
pub use signature::{CallArgs, Signature};
pub use tag::{DispatchValue, TypeHierarchy, TypeTag};
