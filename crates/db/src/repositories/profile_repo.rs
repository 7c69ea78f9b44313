//! Repository for the `profiles` table.

use biodex_core::profile::ProfileUpdate;
use biodex_core::types::UserId;
use sqlx::PgPool;

use crate::models::profile::ProfileRow;

const COLUMNS: &str = "id, email, display_name, biography, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    /// List all profiles ordered by display name.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProfileRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles ORDER BY display_name, id");
        sqlx::query_as::<_, ProfileRow>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<ProfileRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, ProfileRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite `display_name` and `biography`. `email` is read-only here.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: UserId,
        input: &ProfileUpdate,
    ) -> Result<Option<ProfileRow>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                display_name = $2,
                biography = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProfileRow>(&query)
            .bind(id)
            .bind(&input.display_name)
            .bind(&input.biography)
            .fetch_optional(pool)
            .await
    }
}
