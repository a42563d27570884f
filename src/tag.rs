//! Explicit type tags and the declared "is-a" hierarchy.
//!
//! Dispatch never inspects host-runtime types. Every value participating in
//! dispatch carries a [`TypeTag`] allocated from a [`TypeHierarchy`], and
//! generalization between tags follows the edges declared when the tags were
//! registered. The hierarchy owns a distinguished universal top tag
//! ([`TypeTag::ANY`]): a tag registered without explicit parents generalizes
//! to `ANY` in one step, so a rule constrained on `ANY` matches every value.
//!
//! Subtype distance is the length of the shortest generalization path from a
//! value's tag to a rule's constraint tag. Distance 0 is an exact match;
//! each step up the hierarchy adds 1.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

/// A dense index identifying a type registered in a [`TypeHierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag {
    /// Index into the owning hierarchy's tag table.
    pub index: u32,
}

impl TypeTag {
    /// The universal top tag. Every registered tag generalizes to `ANY`.
    pub const ANY: TypeTag = TypeTag::new(0);

    /// Create a tag from a raw index.
    pub const fn new(index: u32) -> Self {
        Self { index }
    }
}

/// A registered tag: its name and declared immediate supertypes.
#[derive(Debug, Clone)]
struct TagInfo {
    name: String,
    parents: Vec<TypeTag>,
}

/// Append-only registry of type tags and their "is-a" edges.
///
/// Built once during application setup and shared (behind an `Arc`) by every
/// dispatcher that resolves against it. Tags are never removed.
#[derive(Debug, Clone)]
pub struct TypeHierarchy {
    tags: Vec<TagInfo>,
    by_name: FxHashMap<String, TypeTag>,
}

impl TypeHierarchy {
    /// Create a hierarchy containing only the universal `any` tag.
    pub fn new() -> Self {
        let mut hierarchy = Self {
            tags: Vec::new(),
            by_name: FxHashMap::default(),
        };
        let any = hierarchy.insert("any", Vec::new());
        debug_assert_eq!(any, TypeTag::ANY);
        hierarchy
    }

    /// Register a root type whose only supertype is `ANY`.
    pub fn register(&mut self, name: &str) -> TypeTag {
        self.insert(name, vec![TypeTag::ANY])
    }

    /// Register a type with explicit immediate supertypes.
    ///
    /// Parents must already be registered in this hierarchy. An empty
    /// parent list is equivalent to [`TypeHierarchy::register`]: the tag
    /// parents `ANY`, so it still generalizes to the top in finitely many
    /// steps.
    pub fn register_subtype(&mut self, name: &str, parents: &[TypeTag]) -> TypeTag {
        if parents.is_empty() {
            return self.register(name);
        }
        for parent in parents {
            assert!(
                (parent.index as usize) < self.tags.len(),
                "parent tag {} is not registered",
                parent.index
            );
        }
        self.insert(name, parents.to_vec())
    }

    fn insert(&mut self, name: &str, parents: Vec<TypeTag>) -> TypeTag {
        assert!(
            !self.by_name.contains_key(name),
            "type `{name}` is already registered"
        );
        let tag = TypeTag::new(self.tags.len() as u32);
        self.tags.push(TagInfo {
            name: name.to_string(),
            parents,
        });
        self.by_name.insert(name.to_string(), tag);
        tag
    }

    /// Look up a tag by its registered name.
    pub fn lookup(&self, name: &str) -> Option<TypeTag> {
        self.by_name.get(name).copied()
    }

    /// The name a tag was registered under.
    pub fn name(&self, tag: TypeTag) -> &str {
        &self.tags[tag.index as usize].name
    }

    /// Number of registered tags, including `ANY`.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True only for a hierarchy with no tags at all (never constructible
    /// through [`TypeHierarchy::new`], which seeds `ANY`).
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Shortest generalization distance from `from` to `to`.
    ///
    /// Returns `Some(0)` when the tags are equal, `Some(n)` when `to` is
    /// reachable in `n` parent steps, and `None` when `to` is not an
    /// ancestor of `from`. Multiple parents are searched breadth-first, so
    /// the reported distance is minimal.
    pub fn distance(&self, from: TypeTag, to: TypeTag) -> Option<u32> {
        if from == to {
            return Some(0);
        }

        let mut visited = vec![false; self.tags.len()];
        let mut queue = VecDeque::new();
        visited[from.index as usize] = true;
        queue.push_back((from, 0u32));

        while let Some((tag, depth)) = queue.pop_front() {
            for &parent in &self.tags[tag.index as usize].parents {
                if parent == to {
                    return Some(depth + 1);
                }
                if !visited[parent.index as usize] {
                    visited[parent.index as usize] = true;
                    queue.push_back((parent, depth + 1));
                }
            }
        }

        None
    }

    /// Check if tag `a` is `b` itself or a subtype of `b`.
    pub fn is_subtype(&self, a: TypeTag, b: TypeTag) -> bool {
        self.distance(a, b).is_some()
    }
}

impl Default for TypeHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

/// Implemented by values that participate in dispatch.
///
/// The tag a value reports must come from the same hierarchy the dispatcher
/// resolves against; tags from different hierarchies are meaningless to each
/// other.
pub trait DispatchValue {
    /// The tag of this value's runtime type.
    fn type_tag(&self) -> TypeTag;
}
