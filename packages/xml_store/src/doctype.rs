//! Document type declaration handling.
//!
//! The only external resource a preferences document may name is the
//! preferences DTD itself. Its identifier is checked against a fixed
//! allow-list before anything is resolved, and nothing is ever fetched.

use crate::error::FormatError;

/// System identifier of the preferences DTD.
pub const PREFS_DTD_URI: &str = "http://java.sun.com/dtd/preferences.dtd";

/// Name the declaration must give the document element.
pub const DOCUMENT_ELEMENT: &str = "preferences";

/// The parts of a `<!DOCTYPE ...>` declaration this crate cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocType {
    pub root: String,
    pub public_id: Option<String>,
    pub system_id: String,
}

impl DocType {
    /// Parse the body of a declaration (the text after `<!DOCTYPE`).
    pub fn parse(body: &str) -> Result<Self, FormatError> {
        let body = body.trim();
        if body.contains('[') {
            return Err(doctype_error("internal DTD subsets are not supported"));
        }

        let (root, rest) = split_token(body);
        if root.is_empty() {
            return Err(doctype_error("missing document element name"));
        }

        let (keyword, rest) = split_token(rest);
        let (public_id, system_id, rest) = match keyword {
            "SYSTEM" => {
                let (system_id, rest) = quoted_literal(rest)?;
                (None, system_id, rest)
            }
            "PUBLIC" => {
                let (public_id, rest) = quoted_literal(rest)?;
                let (system_id, rest) = quoted_literal(rest)?;
                (Some(public_id), system_id, rest)
            }
            "" => return Err(doctype_error("no system identifier declared")),
            other => {
                return Err(doctype_error(format!(
                    "expected SYSTEM or PUBLIC, found '{}'",
                    other
                )))
            }
        };

        if !rest.trim().is_empty() {
            return Err(doctype_error(format!(
                "unexpected trailing content '{}'",
                rest.trim()
            )));
        }

        Ok(DocType {
            root: root.to_string(),
            public_id,
            system_id,
        })
    }

    /// Accept only a declaration of the preferences DTD.
    pub fn check(&self) -> Result<(), FormatError> {
        if self.system_id != PREFS_DTD_URI {
            return Err(FormatError::UnrecognizedSystemId(self.system_id.clone()));
        }
        if self.root != DOCUMENT_ELEMENT {
            return Err(doctype_error(format!(
                "document element declared as <{}>, expected <{}>",
                self.root, DOCUMENT_ELEMENT
            )));
        }
        Ok(())
    }
}

fn doctype_error(message: impl Into<String>) -> FormatError {
    FormatError::DocType {
        message: message.into(),
    }
}

fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], &s[end..]),
        None => (s, ""),
    }
}

fn quoted_literal(s: &str) -> Result<(String, &str), FormatError> {
    let s = s.trim_start();
    let quote = match s.chars().next() {
        Some(q @ ('"' | '\'')) => q,
        _ => return Err(doctype_error("expected a quoted identifier")),
    };
    let body = &s[1..];
    let end = body
        .find(quote)
        .ok_or_else(|| doctype_error("unterminated quoted identifier"))?;
    Ok((body[..end].to_string(), &body[end + 1..]))
}
