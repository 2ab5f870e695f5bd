//! The pair of preference roots a host works with.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{info, trace};
use prefstore_core::{Partition, PreferenceStore, PreferenceTree};
use prefstore_xml::import_preferences;

use crate::config::FactoryConfig;
use crate::error::FactoryError;
use crate::pretty::pretty_print_all;

/// Node whose presence marks a tree as holding RFA connection settings.
const RFA_NODE: &str = "com/reuters/rfa";

/// Owns one user and one system [`PreferenceTree`].
///
/// Construction optionally loads a preferences XML file, as configured by
/// [`FactoryConfig`]. Nothing is ever written back.
#[derive(Debug)]
pub struct PreferencesFactory {
    config: FactoryConfig,
    system: PreferenceTree,
    user: PreferenceTree,
}

impl PreferencesFactory {
    /// Build from the process environment (see [`FactoryConfig::from_env`]).
    pub fn new() -> Result<Self, FactoryError> {
        Self::with_config(FactoryConfig::from_env())
    }

    /// Build with an explicit configuration.
    pub fn with_config(config: FactoryConfig) -> Result<Self, FactoryError> {
        let mut factory = Self {
            config,
            system: PreferenceTree::new(Partition::System),
            user: PreferenceTree::new(Partition::User),
        };
        if let Some(path) = factory.config.xml_file.clone() {
            trace!("Preferences file configured: \"{}\"", path.display());
            factory.load_file(&path)?;
            if factory.config.print_preferences {
                let kind = if factory.is_rfa() { "RFA " } else { "" };
                info!("{}Preference values :\n{}", kind, factory.describe());
            }
        }
        Ok(factory)
    }

    /// Import a preferences XML file into the matching root.
    pub fn load_file(&mut self, path: &Path) -> Result<(), FactoryError> {
        trace!("Attempting to load preferences from: {}", path.display());
        let file = File::open(path).map_err(|source| FactoryError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.load(file)?;
        info!("Preferences successfully loaded from file \"{}\"", path.display());
        Ok(())
    }

    /// Import a preferences XML document from any reader.
    pub fn load<R: Read>(&mut self, input: R) -> Result<(), FactoryError> {
        import_preferences(input, &mut self.user, &mut self.system)?;
        Ok(())
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn user_root(&self) -> &PreferenceTree {
        &self.user
    }

    pub fn system_root(&self) -> &PreferenceTree {
        &self.system
    }

    pub fn user_root_mut(&mut self) -> &mut PreferenceTree {
        &mut self.user
    }

    pub fn system_root_mut(&mut self) -> &mut PreferenceTree {
        &mut self.system
    }

    /// The tree for `partition`.
    pub fn root(&self, partition: Partition) -> &PreferenceTree {
        match partition {
            Partition::User => &self.user,
            Partition::System => &self.system,
        }
    }

    /// True if either tree contains RFA settings.
    pub fn is_rfa(&self) -> bool {
        [&self.system, &self.user]
            .iter()
            .any(|tree| tree.node_exists(tree.root(), RFA_NODE).unwrap_or(false))
    }

    /// Pretty-printed contents of both trees.
    pub fn describe(&self) -> String {
        pretty_print_all(&self.system, &self.user)
    }
}
