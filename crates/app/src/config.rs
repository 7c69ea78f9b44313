use biodex_core::species::NameRequirement;

use crate::auth::jwt::JwtConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Pool size (default: `5`).
    pub max_connections: u32,
    /// Access token identifying the caller, if signed in.
    pub access_token: Option<String>,
    /// Whether species names are required on edit (default: strict).
    pub name_rule: NameRequirement,
    /// Token signing/verification settings.
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Required | Default  |
    /// |-----------------------|----------|----------|
    /// | `DATABASE_URL`        | **yes**  | --       |
    /// | `DB_MAX_CONNECTIONS`  | no       | `5`      |
    /// | `BIODEX_ACCESS_TOKEN` | no       | none     |
    /// | `SPECIES_NAME_RULE`   | no       | `strict` |
    ///
    /// plus the variables read by [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on a missing required variable or an unparsable value.
    pub fn from_env() -> Self {
        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in the environment");

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let access_token = std::env::var("BIODEX_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let name_rule: NameRequirement = std::env::var("SPECIES_NAME_RULE")
            .unwrap_or_else(|_| "strict".into())
            .parse()
            .unwrap_or_else(|e| panic!("SPECIES_NAME_RULE: {e}"));

        let jwt = JwtConfig::from_env();

        Self {
            database_url,
            max_connections,
            access_token,
            name_rule,
            jwt,
        }
    }
}
