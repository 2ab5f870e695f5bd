//! Bootstrap for in-memory preferences.
//!
//! [`PreferencesFactory`] creates the user and system roots and, when
//! configured through [`FactoryConfig`] (normally the `PREF2GO_XML_FILE` and
//! `PREF2GO_PRINT_PREF` environment variables), loads a preferences XML file
//! into them at construction.
//!
//! ```rust,no_run
//! use prefstore_core::PreferenceStore;
//! use prefstore_factory::{FactoryConfig, PreferencesFactory};
//!
//! let config = FactoryConfig::default().with_xml_file("prefs.xml");
//! let factory = PreferencesFactory::with_config(config).unwrap();
//! let user = factory.user_root();
//! if let Some(node) = user.find(user.root(), "/com/example").unwrap() {
//!     println!("{:?}", user.get(node, "host"));
//! }
//! ```

mod config;
mod error;
mod factory;
pub mod pretty;

pub use config::{FactoryConfig, KEY_PRINT_PREF, KEY_XML_FILE};
pub use error::FactoryError;
pub use factory::PreferencesFactory;
pub use pretty::{pretty_print, pretty_print_all};
