//! Species row model.

use biodex_core::error::CoreError;
use biodex_core::kingdom::Kingdom;
use biodex_core::species::Species;
use biodex_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `species` table.
///
/// `kingdom` is stored as text and re-parsed on conversion, so a row that
/// slipped past the CHECK constraint still cannot become a [`Species`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SpeciesRow {
    pub id: DbId,
    pub scientific_name: Option<String>,
    pub common_name: Option<String>,
    pub kingdom: String,
    pub total_population: Option<i64>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub author: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<SpeciesRow> for Species {
    type Error = CoreError;

    fn try_from(row: SpeciesRow) -> Result<Self, Self::Error> {
        let kingdom: Kingdom = row.kingdom.parse()?;
        Ok(Species {
            id: row.id,
            scientific_name: row.scientific_name,
            common_name: row.common_name,
            kingdom,
            total_population: row.total_population,
            description: row.description,
            image: row.image,
            author: row.author,
        })
    }
}
