/// Species primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Users are identified by the auth service's UUID. A profile's id is its owner's id.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
