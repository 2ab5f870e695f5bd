//! The node-level operations a preference backend provides.

use crate::error::Error;

/// Storage operations on the nodes of one preference tree.
///
/// This is the narrow surface an importer or a host preference API drives.
/// Implementations do no locking: callers serialize access to a tree, either
/// per node or with one exclusive section for the whole tree.
pub trait PreferenceStore {
    /// Handle identifying a node of this store.
    type Node: Copy + Eq + std::fmt::Debug;

    /// The root node, which has the empty name and no parent.
    fn root(&self) -> Self::Node;

    /// True if `node` belongs to the user partition.
    fn is_user_node(&self, node: Self::Node) -> bool;

    /// Return the child of `parent` called `name`, creating it if needed.
    ///
    /// Calling this repeatedly with the same name yields the same node.
    fn get_or_create_child(&mut self, parent: Self::Node, name: &str) -> Result<Self::Node, Error>;

    /// Names of children the store knows about but has not yet handed out.
    ///
    /// An in-memory store has every child resident already, so this is
    /// allowed to be empty.
    fn list_child_names(&self, node: Self::Node) -> Vec<String>;

    /// Keys currently set on `node`, in no particular order.
    fn list_keys(&self, node: Self::Node) -> Vec<String>;

    fn get(&self, node: Self::Node, key: &str) -> Option<&str>;

    /// Insert or overwrite a value.
    fn put(&mut self, node: Self::Node, key: &str, value: &str);

    /// Delete a key. Removing an unset key does nothing.
    fn remove(&mut self, node: Self::Node, key: &str);

    /// Clear every entry of `node`, leaving it linked to its parent.
    fn remove_all_entries(&mut self, node: Self::Node);
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for &mut T {
    type Node = T::Node;

    fn root(&self) -> Self::Node {
        (**self).root()
    }

    fn is_user_node(&self, node: Self::Node) -> bool {
        (**self).is_user_node(node)
    }

    fn get_or_create_child(
        &mut self,
        parent: Self::Node,
        name: &str,
    ) -> Result<Self::Node, Error> {
        (**self).get_or_create_child(parent, name)
    }

    fn list_child_names(&self, node: Self::Node) -> Vec<String> {
        (**self).list_child_names(node)
    }

    fn list_keys(&self, node: Self::Node) -> Vec<String> {
        (**self).list_keys(node)
    }

    fn get(&self, node: Self::Node, key: &str) -> Option<&str> {
        (**self).get(node, key)
    }

    fn put(&mut self, node: Self::Node, key: &str, value: &str) {
        (**self).put(node, key, value)
    }

    fn remove(&mut self, node: Self::Node, key: &str) {
        (**self).remove(node, key)
    }

    fn remove_all_entries(&mut self, node: Self::Node) {
        (**self).remove_all_entries(node)
    }
}
