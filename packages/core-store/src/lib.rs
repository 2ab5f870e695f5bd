//! In-memory hierarchical preferences.
//!
//! - [`PreferenceTree`]: a rooted tree of named nodes, each holding a
//!   string-to-string map
//! - [`Partition`]: the user/system tag fixed on a root and inherited by
//!   every descendant
//! - [`PreferenceStore`]: the node-level operations importers and hosts use
//!
//! Nothing here performs I/O and nothing is persisted. Callers serialize
//! access to a tree; the tree itself does no locking.
//!
//! # Example
//!
//! ```rust
//! use prefstore_core::{Partition, PreferenceStore, PreferenceTree};
//!
//! let mut user = PreferenceTree::new(Partition::User);
//! let root = user.root();
//! let conn = user.get_or_create_child(root, "connections").unwrap();
//! user.put(conn, "host", "localhost");
//!
//! assert!(user.is_user_node(conn));
//! assert_eq!(user.list_keys(conn), vec!["host".to_string()]);
//! ```

mod error;
pub mod name;
mod partition;
mod snapshot;
mod traits;
mod tree;

pub use error::{Error, UnknownPartition};
pub use name::{MAX_NAME_LENGTH, SEPARATOR};
pub use partition::Partition;
pub use snapshot::NodeSnapshot;
pub use traits::PreferenceStore;
pub use tree::{NodeId, PreferenceTree};
