//! In-memory preference tree.
//!
//! Every node of a tree lives in one arena owned by [`PreferenceTree`]. A node
//! owns its child name table (name -> [`NodeId`]) and keeps a plain id of its
//! parent for path reconstruction, so there are no reference cycles.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Error;
use crate::name::{self, SEPARATOR};
use crate::partition::Partition;
use crate::snapshot::NodeSnapshot;
use crate::traits::PreferenceStore;

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

/// Handle to a node of a particular [`PreferenceTree`].
///
/// Ids are only meaningful for the tree that issued them. Handing an id to a
/// different tree is a programming error and panics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    tree: u64,
    index: usize,
}

#[derive(Debug)]
struct Node {
    name: String,
    parent: Option<NodeId>,
    entries: HashMap<String, String>,
    children: HashMap<String, NodeId>,
}

impl Node {
    fn new(parent: Option<NodeId>, name: &str) -> Result<Self, Error> {
        name::validate_node_name(name, parent.is_none())?;
        Ok(Self {
            name: name.to_string(),
            parent,
            entries: HashMap::new(),
            children: HashMap::new(),
        })
    }
}

/// A rooted tree of preference nodes in one [`Partition`].
///
/// Children are created the first time they are addressed and are never
/// unlinked. Removing a node only clears entries.
///
/// # Example
///
/// ```rust
/// use prefstore_core::{Partition, PreferenceStore, PreferenceTree};
///
/// let mut tree = PreferenceTree::new(Partition::User);
/// let node = tree.node(tree.root(), "/com/example/app").unwrap();
/// tree.put(node, "theme", "dark");
///
/// assert_eq!(tree.get(node, "theme"), Some("dark"));
/// assert_eq!(tree.absolute_path(node), "/com/example/app");
/// ```
#[derive(Debug)]
pub struct PreferenceTree {
    id: u64,
    partition: Partition,
    nodes: Vec<Node>,
}

impl PreferenceTree {
    /// Create a tree holding only an unnamed root.
    pub fn new(partition: Partition) -> Self {
        let id = NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed);
        let root = Node {
            name: String::new(),
            parent: None,
            entries: HashMap::new(),
            children: HashMap::new(),
        };
        Self {
            id,
            partition,
            nodes: vec![root],
        }
    }

    pub fn partition(&self) -> Partition {
        self.partition
    }

    /// Number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn slot(&self, node: NodeId) -> &Node {
        assert_eq!(node.tree, self.id, "node id belongs to a different tree");
        &self.nodes[node.index]
    }

    fn slot_mut(&mut self, node: NodeId) -> &mut Node {
        assert_eq!(node.tree, self.id, "node id belongs to a different tree");
        &mut self.nodes[node.index]
    }

    /// Name of `node` relative to its parent; empty for the root.
    pub fn name(&self, node: NodeId) -> &str {
        &self.slot(node).name
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slot(node).parent
    }

    /// Slash-separated names from the root to `node`; `/` for the root.
    pub fn absolute_path(&self, node: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let slot = self.slot(id);
            if slot.parent.is_some() {
                names.push(slot.name.as_str());
            }
            current = slot.parent;
        }
        if names.is_empty() {
            return SEPARATOR.to_string();
        }
        names.reverse();
        let mut path = String::new();
        for name in names {
            path.push(SEPARATOR);
            path.push_str(name);
        }
        path
    }

    /// The existing child of `parent` called `name`, without creating it.
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.slot(parent).children.get(name).copied()
    }

    /// Names of the resident children of `node`, sorted.
    pub fn child_names(&self, node: NodeId) -> Vec<&str> {
        let mut names: Vec<&str> = self.slot(node).children.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up `key`, falling back to `default` when it is unset.
    pub fn get_or<'a>(&'a self, node: NodeId, key: &str, default: &'a str) -> &'a str {
        self.get(node, key).unwrap_or(default)
    }

    /// Resolve `path` from `from`, creating missing nodes along the way.
    ///
    /// Absolute paths start at the root. `""` returns `from` and `"/"` the
    /// root. Nothing is created if any component is invalid.
    pub fn node(&mut self, from: NodeId, path: &str) -> Result<NodeId, Error> {
        let parsed = name::parse_path(path)?;
        let mut current = if parsed.absolute { self.root() } else { from };
        for component in parsed.components {
            current = self.get_or_create_child(current, component)?;
        }
        Ok(current)
    }

    /// Resolve `path` like [`node`](Self::node) without creating anything.
    pub fn node_exists(&self, from: NodeId, path: &str) -> Result<bool, Error> {
        Ok(self.find(from, path)?.is_some())
    }

    /// Resolve `path` to an existing node.
    pub fn find(&self, from: NodeId, path: &str) -> Result<Option<NodeId>, Error> {
        let parsed = name::parse_path(path)?;
        let mut current = if parsed.absolute { self.root() } else { from };
        for component in parsed.components {
            match self.child(current, component) {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Logically remove `node` and its subtree by clearing every entry.
    ///
    /// The nodes stay linked and addressable.
    pub fn remove_node(&mut self, node: NodeId) {
        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            pending.extend(self.slot(current).children.values().copied());
            self.remove_all_entries(current);
        }
    }

    /// Copy `node` and its subtree into a serializable value.
    pub fn snapshot(&self, node: NodeId) -> NodeSnapshot {
        let mut snapshot = NodeSnapshot::default();
        let mut pending = vec![(node, String::new())];
        while let Some((current, path)) = pending.pop() {
            let slot = self.slot(current);
            for (name, child) in &slot.children {
                let child_path = if path.is_empty() {
                    name.clone()
                } else {
                    format!("{}{}{}", path, SEPARATOR, name)
                };
                pending.push((*child, child_path));
            }
            let entries = slot
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            snapshot.nodes.insert(path, entries);
        }
        snapshot
    }
}

impl PreferenceStore for PreferenceTree {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        NodeId {
            tree: self.id,
            index: 0,
        }
    }

    fn is_user_node(&self, node: NodeId) -> bool {
        // Partition is a property of the whole tree; the lookup still checks
        // that `node` was issued by it.
        self.slot(node);
        self.partition.is_user()
    }

    fn get_or_create_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId, Error> {
        if let Some(existing) = self.child(parent, name) {
            return Ok(existing);
        }
        let child = Node::new(Some(parent), name)?;
        let id = NodeId {
            tree: self.id,
            index: self.nodes.len(),
        };
        self.nodes.push(child);
        self.slot_mut(parent).children.insert(name.to_string(), id);
        Ok(id)
    }

    fn list_child_names(&self, node: NodeId) -> Vec<String> {
        self.slot(node);
        Vec::new()
    }

    fn list_keys(&self, node: NodeId) -> Vec<String> {
        self.slot(node).entries.keys().cloned().collect()
    }

    fn get(&self, node: NodeId, key: &str) -> Option<&str> {
        self.slot(node).entries.get(key).map(String::as_str)
    }

    fn put(&mut self, node: NodeId, key: &str, value: &str) {
        self.slot_mut(node)
            .entries
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, node: NodeId, key: &str) {
        self.slot_mut(node).entries.remove(key);
    }

    fn remove_all_entries(&mut self, node: NodeId) {
        self.slot_mut(node).entries.clear();
    }
}
