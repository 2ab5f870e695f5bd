//! Import errors.

/// The document could not be read as a preferences document.
///
/// Covers markup that is not well formed as well as well-formed markup that
/// does not have the preferences document shape.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("malformed XML at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed attribute in <{element}>: {message}")]
    Attribute { element: String, message: String },

    #[error("markup is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("document has no document type declaration")]
    MissingDocType,

    #[error("invalid document type declaration: {message}")]
    DocType { message: String },

    #[error("invalid system identifier: {0}")]
    UnrecognizedSystemId(String),

    #[error("document ended inside <{0}>")]
    UnexpectedEof(String),

    #[error("document has no root element")]
    NoRootElement,

    #[error("{message}")]
    Structure { message: String },
}

impl FormatError {
    pub(crate) fn structure(message: impl Into<String>) -> Self {
        FormatError::Structure {
            message: message.into(),
        }
    }
}

/// Errors returned by an import.
///
/// An import is not atomic: when one of these is returned after the
/// document was validated, the target tree keeps whatever was applied
/// before the failure.
#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("failed to read preferences document: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "preferences file format version {found} is not supported; \
         versions {supported} or older can be read"
    )]
    UnsupportedVersion {
        found: String,
        supported: &'static str,
    },

    #[error("invalid preferences format: {0}")]
    InvalidFormat(#[from] FormatError),

    #[error(transparent)]
    Store(#[from] prefstore_core::Error),
}
