//! Preferences XML import.
//!
//! Reads documents in the preferences XML format and writes their contents
//! into a [`prefstore_core::PreferenceStore`]:
//!
//! ```text
//! <!DOCTYPE preferences SYSTEM "http://java.sun.com/dtd/preferences.dtd">
//! <preferences EXTERNAL_XML_VERSION="1.0">
//!   <root type="user">
//!     <map>
//!       <entry key="serverList" value="host1 host2"/>
//!     </map>
//!     <node name="com">
//!       <map/>
//!     </node>
//!   </root>
//! </preferences>
//! ```
//!
//! Parsing is strict. Anything the parser reports is fatal, the document
//! type declaration must name the preferences DTD, and no external resource
//! is ever fetched.

mod doctype;
mod document;
mod dom;
mod error;
mod import;

pub use doctype::{DocType, PREFS_DTD_URI};
pub use document::{
    BlockId, Document, Entry, NodeBlock, TreeDescriptor, DEFAULT_XML_VERSION,
    EXTERNAL_XML_VERSION,
};
pub use error::{FormatError, ImportError};
pub use import::{import_document, import_preferences, import_preferences_from_str};

/// Parse and validate a document without importing it.
pub fn parse_document(input: &[u8]) -> Result<Document, FormatError> {
    Document::parse(input)
}
