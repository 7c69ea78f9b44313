//! Taxonomic kingdom enumeration.
//!
//! The kingdom column is a closed set. Values arriving from a form selector
//! or a database row are parsed through [`Kingdom::from_str`], so nothing
//! outside the six variants is ever representable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Display / storage names of every kingdom, in selector order.
pub const KINGDOM_NAMES: &[&str] = &[
    "Animalia", "Plantae", "Fungi", "Protista", "Archaea", "Bacteria",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kingdom {
    Animalia,
    Plantae,
    Fungi,
    Protista,
    Archaea,
    Bacteria,
}

impl Kingdom {
    /// All variants in selector order.
    pub const ALL: [Kingdom; 6] = [
        Self::Animalia,
        Self::Plantae,
        Self::Fungi,
        Self::Protista,
        Self::Archaea,
        Self::Bacteria,
    ];

    /// Storage name, identical to the display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Animalia => "Animalia",
            Self::Plantae => "Plantae",
            Self::Fungi => "Fungi",
            Self::Protista => "Protista",
            Self::Archaea => "Archaea",
            Self::Bacteria => "Bacteria",
        }
    }
}

impl FromStr for Kingdom {
    type Err = CoreError;

    /// Exact, case-sensitive match against [`KINGDOM_NAMES`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid kingdom '{s}'. Must be one of: {}",
                    KINGDOM_NAMES.join(", ")
                ))
            })
    }
}

impl fmt::Display for Kingdom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
