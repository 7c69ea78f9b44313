//! [`RecordStore`] backed by the PostgreSQL pool.

use async_trait::async_trait;
use biodex_core::profile::Profile;
use biodex_core::species::Species;
use biodex_core::store::{RecordStore, RecordUpdate, StoreError, PROFILES_TABLE, SPECIES_TABLE};
use biodex_core::types::{DbId, UserId};

use crate::repositories::{ProfileRepo, SpeciesRepo};
use crate::DbPool;

fn backend(err: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[derive(Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn update(&self, update: &RecordUpdate) -> Result<(), StoreError> {
        let matched = match update {
            RecordUpdate::Species { id, fields } => SpeciesRepo::update(&self.pool, *id, fields)
                .await
                .map(|row| row.is_some()),
            RecordUpdate::Profile { id, fields } => ProfileRepo::update(&self.pool, *id, fields)
                .await
                .map(|row| row.is_some()),
        }
        .map_err(|err| {
            tracing::error!(
                table = update.table(),
                id = %update.match_id(),
                error = %err,
                "Update query failed",
            );
            backend(err)
        })?;

        if !matched {
            tracing::warn!(table = update.table(), id = %update.match_id(), "Update matched no row");
            return Err(StoreError::NotFound {
                table: update.table(),
                id: update.match_id(),
            });
        }
        tracing::debug!(table = update.table(), id = %update.match_id(), "Row updated");
        Ok(())
    }

    async fn list_species(&self) -> Result<Vec<Species>, StoreError> {
        SpeciesRepo::list(&self.pool)
            .await
            .map_err(backend)?
            .into_iter()
            .map(|row| Species::try_from(row).map_err(backend))
            .collect()
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let rows = ProfileRepo::list(&self.pool).await.map_err(backend)?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn find_species(&self, id: DbId) -> Result<Species, StoreError> {
        let row = SpeciesRepo::find_by_id(&self.pool, id)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::NotFound {
                table: SPECIES_TABLE,
                id: id.to_string(),
            })?;
        Species::try_from(row).map_err(backend)
    }

    async fn find_profile(&self, id: UserId) -> Result<Profile, StoreError> {
        let row = ProfileRepo::find_by_id(&self.pool, id)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::NotFound {
                table: PROFILES_TABLE,
                id: id.to_string(),
            })?;
        Ok(row.into())
    }
}
