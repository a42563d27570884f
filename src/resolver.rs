//! Dispatch resolution: applicability filtering and specificity ranking.
//!
//! This module implements the algorithm that selects which rule handles a
//! call based on the runtime types of the leading dispatch arguments.
//!
//! # Algorithm Overview
//!
//! 1. **Filter applicable**: keep rules where every dispatch tag is the
//!    constraint tag itself or a subtype of it
//! 2. **Rank by specificity**: each surviving rule gets a vector of
//!    per-position subtype distances (0 = exact match); vectors compare
//!    lexicographically, position 1 first
//! 3. **Select best**: the smallest vector wins; ties go to the most
//!    recently registered rule, so re-registering a constraint tuple
//!    overrides the earlier handler

use tracing::trace;

use crate::error::NoMatchError;
use crate::rule::Rule;
use crate::tag::{TypeHierarchy, TypeTag};

/// Resolves a call's dispatch tags against a rule set.
///
/// Borrows the hierarchy for the duration of one resolution; holds no rules
/// of its own.
pub struct RuleResolver<'a> {
    hierarchy: &'a TypeHierarchy,
}

impl<'a> RuleResolver<'a> {
    /// Create a resolver over the given hierarchy.
    pub fn new(hierarchy: &'a TypeHierarchy) -> Self {
        Self { hierarchy }
    }

    /// Select the most specific applicable rule for the given dispatch tags.
    ///
    /// Returns [`NoMatchError`] naming the observed types when no rule
    /// survives filtering. Resolution never mutates the rule set.
    pub fn resolve<V>(
        &self,
        rules: &'a [Rule<V>],
        arg_tags: &[TypeTag],
    ) -> Result<&'a Rule<V>, NoMatchError> {
        let mut best: Option<(Vec<u32>, &Rule<V>)> = None;

        for (index, rule) in rules.iter().enumerate() {
            let Some(vector) = self.distance_vector(rule.constraints(), arg_tags) else {
                continue;
            };
            trace!(rule = index, distances = ?vector, "applicable rule");

            // Later rules replace on equality, so the most recently
            // registered rule wins ties.
            let replace = match &best {
                Some((incumbent, _)) => vector <= *incumbent,
                None => true,
            };
            if replace {
                best = Some((vector, rule));
            }
        }

        match best {
            Some((distances, rule)) => {
                trace!(?distances, "selected rule");
                Ok(rule)
            }
            None => Err(NoMatchError {
                arg_types: arg_tags
                    .iter()
                    .map(|tag| self.hierarchy.name(*tag).to_string())
                    .collect(),
                rules_considered: rules.len(),
            }),
        }
    }

    /// Check whether a rule's constraints accept the given dispatch tags.
    pub fn is_applicable(&self, constraints: &[TypeTag], arg_tags: &[TypeTag]) -> bool {
        self.distance_vector(constraints, arg_tags).is_some()
    }

    /// Per-position subtype distances, or `None` if any position fails.
    fn distance_vector(&self, constraints: &[TypeTag], arg_tags: &[TypeTag]) -> Option<Vec<u32>> {
        if constraints.len() != arg_tags.len() {
            return None;
        }
        constraints
            .iter()
            .zip(arg_tags)
            .map(|(constraint, tag)| self.hierarchy.distance(*tag, *constraint))
            .collect()
    }
}
