//! Node name and path validation.
//!
//! Paths are `/`-separated sequences of node names. A leading `/` makes a
//! path absolute (resolved from the root of the tree); anything else is
//! resolved relative to a starting node.

use crate::error::Error;

/// Separator between node names in a path.
pub const SEPARATOR: char = '/';

/// Longest node name accepted, in characters.
pub const MAX_NAME_LENGTH: usize = 80;

/// Validate the name of a node about to be created.
///
/// A root (no parent) must have the empty name. Every other node needs a
/// non-empty name of at most [`MAX_NAME_LENGTH`] characters without a
/// [`SEPARATOR`].
pub fn validate_node_name(name: &str, is_root: bool) -> Result<(), Error> {
    if is_root {
        return if name.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_name(name, "a root node must have an empty name"))
        };
    }
    validate_component(name, None)
}

fn validate_component(component: &str, position: Option<usize>) -> Result<(), Error> {
    let at = |message: &str| match position {
        Some(position) => format!("{} (component {})", message, position),
        None => message.to_string(),
    };

    if component.is_empty() {
        return Err(Error::invalid_name(component, at("empty name")));
    }
    if component.contains(SEPARATOR) {
        return Err(Error::invalid_name(
            component,
            at(&format!("name may not contain '{}'", SEPARATOR)),
        ));
    }
    if component.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::invalid_name(
            component,
            at(&format!("name longer than {} characters", MAX_NAME_LENGTH)),
        ));
    }
    Ok(())
}

/// A path split into its starting point and validated components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedPath<'a> {
    pub absolute: bool,
    pub components: Vec<&'a str>,
}

/// Split a node path, validating each component.
///
/// `""` is the starting node itself and `"/"` is the root. Empty components
/// (`a//b`) and a trailing separator are rejected.
pub(crate) fn parse_path(path: &str) -> Result<ParsedPath<'_>, Error> {
    let (absolute, rest) = match path.strip_prefix(SEPARATOR) {
        Some(rest) => (true, rest),
        None => (false, path),
    };

    if rest.is_empty() {
        return Ok(ParsedPath {
            absolute,
            components: Vec::new(),
        });
    }
    if rest.ends_with(SEPARATOR) {
        return Err(Error::invalid_name(path, "path may not end with a separator"));
    }

    let components: Vec<&str> = rest.split(SEPARATOR).collect();
    for (i, component) in components.iter().enumerate() {
        validate_component(component, Some(i)).map_err(|_| {
            Error::invalid_name(
                path,
                format!("component {} ('{}') is not a valid node name", i, component),
            )
        })?;
    }

    Ok(ParsedPath {
        absolute,
        components,
    })
}
