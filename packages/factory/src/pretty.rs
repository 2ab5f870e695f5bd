//! Human-readable dump of a preference tree, for logs.

use std::fmt::Write;

use prefstore_core::{NodeId, PreferenceStore, PreferenceTree};

const INDENT: &str = "    ";

/// Render `tree`, or `None` if its root has neither keys nor children.
///
/// Each key is printed as `<node path>/<key> : <value>`, so keys of the root
/// itself come out as `//key`. A node without keys or children is printed as
/// its bare path. Keys and children are sorted.
///
/// ```text
///     Preferences type : USER
///         /com/example/host : localhost
///         /com/empty
/// ```
pub fn pretty_print(tree: &PreferenceTree) -> Option<String> {
    let root = tree.root();
    if is_bare(tree, root) {
        return None;
    }
    let mut out = String::new();
    let label = if tree.is_user_node(root) {
        "USER"
    } else {
        "SYSTEM"
    };
    let _ = writeln!(out, "{}Preferences type : {}", INDENT, label);
    print_node(tree, root, &mut out);
    Some(out)
}

/// Render both trees, system first, separated by a newline.
pub fn pretty_print_all(system: &PreferenceTree, user: &PreferenceTree) -> String {
    match (pretty_print(system), pretty_print(user)) {
        (Some(system), Some(user)) => format!("{}\n{}", system, user),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => format!("{}(no preferences)\n", INDENT),
    }
}

fn is_bare(tree: &PreferenceTree, node: NodeId) -> bool {
    tree.child_names(node).is_empty() && tree.list_keys(node).is_empty()
}

fn print_node(tree: &PreferenceTree, node: NodeId, out: &mut String) {
    let mut pending = vec![node];
    while let Some(node) = pending.pop() {
        let path = tree.absolute_path(node);
        if is_bare(tree, node) {
            let _ = writeln!(out, "{0}{0}{1}", INDENT, path);
            continue;
        }

        let mut keys = tree.list_keys(node);
        keys.sort();
        for key in keys {
            let value = tree.get(node, &key).unwrap_or_default();
            let _ = writeln!(out, "{0}{0}{1}/{2} : {3}", INDENT, path, key, value);
        }
        let children = tree.child_names(node);
        pending.extend(children.iter().rev().filter_map(|name| tree.child(node, name)));
    }
}
