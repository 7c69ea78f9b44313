//! Profile row model.

use biodex_core::profile::Profile;
use biodex_core::types::{Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `profiles` table. `id` is the auth service's user id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileRow {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub biography: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            biography: row.biography,
        }
    }
}
