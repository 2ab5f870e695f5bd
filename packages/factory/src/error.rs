use std::path::PathBuf;

use prefstore_xml::ImportError;

#[derive(thiserror::Error, Debug)]
pub enum FactoryError {
    #[error("cannot open preferences file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot load preferences: {0}")]
    Import(#[from] ImportError),
}
