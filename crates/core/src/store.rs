//! Record store port.
//!
//! The hosted relational store is an external collaborator. The edit flow
//! only needs keyed updates; the list pages need whole-table selects.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::profile::{Profile, ProfileUpdate};
use crate::species::{Species, SpeciesUpdate};
use crate::types::{DbId, UserId};

pub const SPECIES_TABLE: &str = "species";
pub const PROFILES_TABLE: &str = "profiles";

/// One keyed update: table, editable field map, and the id to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordUpdate {
    Species { id: DbId, fields: SpeciesUpdate },
    Profile { id: UserId, fields: ProfileUpdate },
}

impl RecordUpdate {
    pub fn table(&self) -> &'static str {
        match self {
            Self::Species { .. } => SPECIES_TABLE,
            Self::Profile { .. } => PROFILES_TABLE,
        }
    }

    /// Value matched against the table's `id` column.
    pub fn match_id(&self) -> String {
        match self {
            Self::Species { id, .. } => id.to_string(),
            Self::Profile { id, .. } => id.to_string(),
        }
    }

    /// Column -> value map of exactly the fields being written.
    pub fn field_map(&self) -> Map<String, Value> {
        let value = match self {
            Self::Species { fields, .. } => serde_json::to_value(fields),
            Self::Profile { fields, .. } => serde_json::to_value(fields),
        };
        match value {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("No row in {table} with id {id}")]
    NotFound { table: &'static str, id: String },

    #[error("Record store error: {0}")]
    Backend(String),
}

/// Keyed reads and updates against the hosted store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Apply `update` to the single row it addresses.
    ///
    /// Returns [`StoreError::NotFound`] when no row matched.
    async fn update(&self, update: &RecordUpdate) -> Result<(), StoreError>;

    async fn list_species(&self) -> Result<Vec<Species>, StoreError>;

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError>;

    /// Keyed species lookup. The default scans [`Self::list_species`].
    async fn find_species(&self, id: DbId) -> Result<Species, StoreError> {
        self.list_species()
            .await?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound {
                table: SPECIES_TABLE,
                id: id.to_string(),
            })
    }

    /// Keyed profile lookup. The default scans [`Self::list_profiles`].
    async fn find_profile(&self, id: UserId) -> Result<Profile, StoreError> {
        self.list_profiles()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound {
                table: PROFILES_TABLE,
                id: id.to_string(),
            })
    }
}
