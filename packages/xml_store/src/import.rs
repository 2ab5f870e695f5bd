//! Applying a preferences document to a pair of trees.

use std::io::Read;

use log::{debug, trace};
use prefstore_core::{Partition, PreferenceStore};

use crate::document::{Document, TreeDescriptor, EXTERNAL_XML_VERSION};
use crate::error::ImportError;

/// Read a preferences document from `input` and import it.
///
/// The document names its own target: its tree is written under `user` or
/// `system` according to the declared partition. The whole document is read
/// and validated before anything is written, so format and version errors
/// leave both trees untouched.
///
/// The import is not atomic. An invalid node name found while writing stops
/// the import with [`ImportError::Store`] and keeps what was already applied.
///
/// # Example
///
/// ```rust
/// use prefstore_core::{Partition, PreferenceStore, PreferenceTree};
/// use prefstore_xml::import_preferences;
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <!DOCTYPE preferences SYSTEM "http://java.sun.com/dtd/preferences.dtd">
/// <preferences EXTERNAL_XML_VERSION="1.0">
///   <root type="user">
///     <map><entry key="greeting" value="hello"/></map>
///   </root>
/// </preferences>"#;
///
/// let mut user = PreferenceTree::new(Partition::User);
/// let mut system = PreferenceTree::new(Partition::System);
/// import_preferences(xml.as_bytes(), &mut user, &mut system).unwrap();
///
/// assert_eq!(user.get(user.root(), "greeting"), Some("hello"));
/// assert!(system.list_keys(system.root()).is_empty());
/// ```
pub fn import_preferences<R, S>(
    mut input: R,
    user: &mut S,
    system: &mut S,
) -> Result<(), ImportError>
where
    R: Read,
    S: PreferenceStore,
{
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    let document = Document::parse(&bytes)?;
    import_document(&document, user, system)
}

/// Import a document held in a string.
pub fn import_preferences_from_str<S: PreferenceStore>(
    text: &str,
    user: &mut S,
    system: &mut S,
) -> Result<(), ImportError> {
    import_preferences(text.as_bytes(), user, system)
}

/// Import an already parsed document.
///
/// Fails with [`ImportError::UnsupportedVersion`], before touching either
/// tree, if the document is newer than this crate understands.
pub fn import_document<S: PreferenceStore>(
    document: &Document,
    user: &mut S,
    system: &mut S,
) -> Result<(), ImportError> {
    if document.is_newer_than_supported() {
        return Err(ImportError::UnsupportedVersion {
            found: document.version.clone(),
            supported: EXTERNAL_XML_VERSION,
        });
    }

    let target = match document.tree.partition {
        Partition::User => user,
        Partition::System => system,
    };
    debug!(
        "Importing {} preferences (format version {})",
        document.tree.partition, document.version
    );
    import_tree(target, &document.tree)
}

fn import_tree<S: PreferenceStore>(
    store: &mut S,
    tree: &TreeDescriptor,
) -> Result<(), ImportError> {
    let mut pending = vec![(store.root(), tree.root())];
    while let Some((node, block)) = pending.pop() {
        if let Some(name) = &block.name {
            debug!("Importing node '{}'", name);
        }
        for entry in &block.entries {
            trace!("{:?}: {} = {}", node, entry.key, entry.value);
            store.put(node, &entry.key, &entry.value);
        }

        // Resolve every child before descending into any of them.
        let mut children = Vec::with_capacity(block.children.len());
        for &id in &block.children {
            let child = tree.block(id);
            let name = child.name.as_deref().unwrap_or_default();
            children.push((store.get_or_create_child(node, name)?, child));
        }
        // Reversed so the first child in document order is imported next.
        pending.extend(children.into_iter().rev());
    }
    Ok(())
}
