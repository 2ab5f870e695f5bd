//! Typed view of a preferences document.
//!
//! The element tree produced by the parser is checked against the fixed
//! document shape:
//!
//! ```text
//! preferences (EXTERNAL_XML_VERSION?)  -> root
//! root        (type = user | system)   -> map, node*
//! node        (name)                   -> map, node*
//! map         (MAP_XML_VERSION?)       -> entry*
//! entry       (key, value)             -> empty
//! ```

use prefstore_core::Partition;

use crate::dom::{self, Dom, Element};
use crate::error::FormatError;

/// Newest document format version this crate reads.
pub const EXTERNAL_XML_VERSION: &str = "1.0";

/// Version assumed when a document does not declare one.
pub const DEFAULT_XML_VERSION: &str = "0.0";

/// Index of a [`NodeBlock`] within its [`TreeDescriptor`].
pub type BlockId = usize;

/// A validated preferences document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub version: String,
    pub tree: TreeDescriptor,
}

/// The single tree in a document and the partition it targets.
///
/// Node blocks are stored flat. Block 0 is the tree root and every other
/// block is reachable from it through [`NodeBlock::children`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDescriptor {
    pub partition: Partition,
    blocks: Vec<NodeBlock>,
}

/// Entries of one `<root>` or `<node>` element, in document order, and the
/// blocks nested directly inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeBlock {
    /// `None` for the tree root.
    pub name: Option<String>,
    pub entries: Vec<Entry>,
    pub children: Vec<BlockId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Document {
    /// Parse and validate a complete document.
    ///
    /// The version is recorded but not checked here.
    pub fn parse(input: &[u8]) -> Result<Self, FormatError> {
        let dom = dom::parse(input)?;
        Self::from_dom(&dom)
    }

    /// True if the declared version is newer than [`EXTERNAL_XML_VERSION`].
    ///
    /// Versions are compared as plain strings.
    pub fn is_newer_than_supported(&self) -> bool {
        self.version.as_str() > EXTERNAL_XML_VERSION
    }

    fn from_dom(dom: &Dom) -> Result<Self, FormatError> {
        let element = dom.root();
        expect_name(element, "preferences")?;
        allow_attributes(element, &["EXTERNAL_XML_VERSION"])?;
        let version = element
            .attribute("EXTERNAL_XML_VERSION")
            .unwrap_or(DEFAULT_XML_VERSION)
            .to_string();

        let tree = match element.children.as_slice() {
            [root] => TreeDescriptor::from_element(dom, dom.element(*root))?,
            [] => return Err(FormatError::structure("<preferences> has no <root>")),
            _ => {
                return Err(FormatError::structure(
                    "<preferences> must contain exactly one <root>",
                ))
            }
        };

        Ok(Document { version, tree })
    }
}

impl TreeDescriptor {
    pub fn root(&self) -> &NodeBlock {
        &self.blocks[0]
    }

    pub fn block(&self, id: BlockId) -> &NodeBlock {
        &self.blocks[id]
    }

    /// Number of blocks, the root included.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    fn from_element(dom: &Dom, element: &Element) -> Result<Self, FormatError> {
        expect_name(element, "root")?;
        allow_attributes(element, &["type"])?;
        let label = required_attribute(element, "type")?;
        let partition = label
            .trim()
            .parse::<Partition>()
            .map_err(|e| FormatError::structure(format!("<root> attribute 'type': {}", e)))?;

        let mut blocks = vec![NodeBlock::default()];
        let mut pending = vec![(element, 0)];
        while let Some((element, id)) = pending.pop() {
            let (map, nodes) = element.children.split_first().ok_or_else(|| {
                FormatError::structure(format!("<{}> is missing its <map>", element.name))
            })?;
            let map = dom.element(*map);
            if map.name != "map" {
                return Err(FormatError::structure(format!(
                    "first child of <{}> must be <map>, found <{}>",
                    element.name, map.name
                )));
            }
            blocks[id].entries = entries_from_map(dom, map)?;

            for &node in nodes {
                let node = dom.element(node);
                expect_name(node, "node")?;
                allow_attributes(node, &["name"])?;
                let child = blocks.len();
                blocks.push(NodeBlock {
                    name: Some(required_attribute(node, "name")?.to_string()),
                    ..NodeBlock::default()
                });
                blocks[id].children.push(child);
                pending.push((node, child));
            }
        }

        Ok(TreeDescriptor { partition, blocks })
    }
}

fn entries_from_map(dom: &Dom, map: &Element) -> Result<Vec<Entry>, FormatError> {
    allow_attributes(map, &["MAP_XML_VERSION"])?;
    dom.children(map)
        .map(|entry| -> Result<Entry, FormatError> {
            expect_name(entry, "entry")?;
            allow_attributes(entry, &["key", "value"])?;
            if !entry.children.is_empty() {
                return Err(FormatError::structure("<entry> must be empty"));
            }
            Ok(Entry {
                key: required_attribute(entry, "key")?.to_string(),
                value: required_attribute(entry, "value")?.to_string(),
            })
        })
        .collect()
}

fn expect_name(element: &Element, expected: &str) -> Result<(), FormatError> {
    if element.name == expected {
        Ok(())
    } else {
        Err(FormatError::structure(format!(
            "expected <{}>, found <{}>",
            expected, element.name
        )))
    }
}

fn allow_attributes(element: &Element, allowed: &[&str]) -> Result<(), FormatError> {
    match element
        .attributes
        .iter()
        .find(|(key, _)| !allowed.contains(&key.as_str()))
    {
        Some((key, _)) => Err(FormatError::structure(format!(
            "attribute '{}' is not allowed on <{}>",
            key, element.name
        ))),
        None => Ok(()),
    }
}

fn required_attribute<'a>(element: &'a Element, key: &str) -> Result<&'a str, FormatError> {
    element.attribute(key).ok_or_else(|| {
        FormatError::structure(format!(
            "<{}> is missing required attribute '{}'",
            element.name, key
        ))
    })
}
