//! The two independent preference trees.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownPartition;

/// Which of the two root trees a node belongs to.
///
/// Fixed when a root is created and inherited by every descendant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    User,
    System,
}

impl Partition {
    /// The lowercase label used in preference documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Partition::User => "user",
            Partition::System => "system",
        }
    }

    pub fn is_user(self) -> bool {
        self == Partition::User
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Partition {
    type Err = UnknownPartition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Partition::User),
            "system" => Ok(Partition::System),
            other => Err(UnknownPartition(other.to_string())),
        }
    }
}
