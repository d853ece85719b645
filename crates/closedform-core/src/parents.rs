//! Side index of child to parent links.
//!
//! Nodes own their children and never point back up. When a subtree must be
//! invalidated from below, a [`ParentIndex`] built over the tree supplies
//! the ancestors by identity.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::expr::Expr;
use crate::id::NodeId;

/// Weak child to parent relations keyed by node identity.
#[derive(Debug, Clone, Default)]
pub struct ParentIndex {
    parents: HashMap<NodeId, SmallVec<[NodeId; 2]>>,
}

impl ParentIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every child to parent link of `root`.
    #[must_use]
    pub fn build(root: &Expr) -> Self {
        let mut index = Self::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            for child in node.children() {
                index.link(child.id(), node.id());
                stack.push(child);
            }
        }
        index
    }

    /// Records that `parent` is a parent of `child`. Duplicate links are
    /// ignored.
    pub fn link(&mut self, child: NodeId, parent: NodeId) {
        let entry = self.parents.entry(child).or_default();
        if !entry.contains(&parent) {
            entry.push(parent);
        }
    }

    /// Recorded parents of `id`.
    #[must_use]
    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        self.parents.get(&id).map_or(&[], |p| p.as_slice())
    }

    /// Number of nodes with at least one recorded parent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns true if no links are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// All transitive ancestors of `id`. Terminates on cyclic links.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> HashSet<NodeId> {
        let mut seen = HashSet::new();
        let mut stack: Vec<NodeId> = self.parents(id).to_vec();
        while let Some(next) = stack.pop() {
            if seen.insert(next) {
                stack.extend_from_slice(self.parents(next));
            }
        }
        seen
    }

    /// Marks `id` and every recorded ancestor of it inside `root` dirty.
    ///
    /// Returns the number of nodes marked. Marking is idempotent.
    pub fn invalidate(&self, root: &mut Expr, id: NodeId) -> usize {
        let mut targets = self.ancestors(id);
        targets.insert(id);

        let mut marked = 0;
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if targets.contains(&node.id()) {
                node.mark_dirty();
                marked += 1;
            }
            stack.extend(node.children_mut());
        }
        marked
    }
}
