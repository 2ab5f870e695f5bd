//! Command execution, separated from argument parsing so it can be tested.

use std::io::Write;
use std::path::PathBuf;

use log::debug;
use prefstore_core::{Partition, PreferenceStore};
use prefstore_factory::{FactoryConfig, FactoryError, PreferencesFactory};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(
        "no preferences file given; pass --xml-file or set {}",
        prefstore_factory::KEY_XML_FILE
    )]
    NoFile,

    #[error(transparent)]
    Factory(#[from] FactoryError),

    #[error(transparent)]
    Path(#[from] prefstore_core::Error),

    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Dump { json: bool },
    Get { path: String, key: String, system: bool },
    Keys { path: String, system: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    Missing,
}

/// Load the preferences file and answer `request` on `out`.
///
/// `xml_file` overrides the file named by the environment.
pub fn run<W: Write>(
    xml_file: Option<PathBuf>,
    request: Request,
    out: &mut W,
) -> Result<Outcome, CliError> {
    let mut config = FactoryConfig::from_env();
    if let Some(path) = xml_file {
        config = config.with_xml_file(path);
    }
    if config.xml_file.is_none() {
        return Err(CliError::NoFile);
    }
    debug!("Loading preferences with {:?}", config);
    let factory = PreferencesFactory::with_config(config)?;
    execute(&factory, request, out)
}

pub fn execute<W: Write>(
    factory: &PreferencesFactory,
    request: Request,
    out: &mut W,
) -> Result<Outcome, CliError> {
    match request {
        Request::Dump { json: false } => {
            write!(out, "{}", factory.describe())?;
            Ok(Outcome::Found)
        }
        Request::Dump { json: true } => {
            let system = factory.system_root();
            let user = factory.user_root();
            let snapshot = serde_json::json!({
                "system": system.snapshot(system.root()),
                "user": user.snapshot(user.root()),
            });
            serde_json::to_writer_pretty(&mut *out, &snapshot)?;
            writeln!(out)?;
            Ok(Outcome::Found)
        }
        Request::Get { path, key, system } => {
            let tree = factory.root(partition(system));
            let value = tree
                .find(tree.root(), &path)?
                .and_then(|node| tree.get(node, &key));
            match value {
                Some(value) => {
                    writeln!(out, "{}", value)?;
                    Ok(Outcome::Found)
                }
                None => Ok(Outcome::Missing),
            }
        }
        Request::Keys { path, system } => {
            let tree = factory.root(partition(system));
            match tree.find(tree.root(), &path)? {
                Some(node) => {
                    let mut keys = tree.list_keys(node);
                    keys.sort();
                    for key in keys {
                        writeln!(out, "{}", key)?;
                    }
                    Ok(Outcome::Found)
                }
                None => Ok(Outcome::Missing),
            }
        }
    }
}

fn partition(system: bool) -> Partition {
    if system {
        Partition::System
    } else {
        Partition::User
    }
}
