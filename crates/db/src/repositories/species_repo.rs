//! Repository for the `species` table.

use biodex_core::species::SpeciesUpdate;
use biodex_core::types::DbId;
use sqlx::PgPool;

use crate::models::species::SpeciesRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, scientific_name, common_name, kingdom, total_population, \
                       description, image, author, created_at, updated_at";

pub struct SpeciesRepo;

impl SpeciesRepo {
    /// List every species in id order.
    pub async fn list(pool: &PgPool) -> Result<Vec<SpeciesRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM species ORDER BY id");
        sqlx::query_as::<_, SpeciesRow>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SpeciesRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM species WHERE id = $1");
        sqlx::query_as::<_, SpeciesRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every editable column. `NULL` in `input` clears the column.
    /// `author` is never touched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SpeciesUpdate,
    ) -> Result<Option<SpeciesRow>, sqlx::Error> {
        let query = format!(
            "UPDATE species SET
                scientific_name = $2,
                common_name = $3,
                kingdom = $4,
                total_population = $5,
                image = $6,
                description = $7,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpeciesRow>(&query)
            .bind(id)
            .bind(&input.scientific_name)
            .bind(&input.common_name)
            .bind(input.kingdom.as_str())
            .bind(input.total_population)
            .bind(&input.image)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }
}
