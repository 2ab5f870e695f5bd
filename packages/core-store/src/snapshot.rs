//! Serializable copies of a subtree, for diagnostics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A detached, ordered copy of a node and its descendants.
///
/// Flat on purpose: every node of the subtree is keyed by its path relative
/// to the copied node (`""` for the node itself), so arbitrarily deep trees
/// serialize and drop without recursion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeSnapshot {
    pub nodes: BTreeMap<String, BTreeMap<String, String>>,
}

impl NodeSnapshot {
    /// Entries of the node at `path`, relative to the copied node.
    pub fn entries(&self, path: &str) -> Option<&BTreeMap<String, String>> {
        self.nodes.get(path)
    }

    /// True if no node of the subtree holds an entry.
    pub fn is_empty(&self) -> bool {
        self.nodes.values().all(BTreeMap::is_empty)
    }

    /// Total number of entries in the subtree.
    pub fn entry_count(&self) -> usize {
        self.nodes.values().map(BTreeMap::len).sum()
    }
}
