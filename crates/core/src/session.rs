//! Session lookup and the ownership gate.
//!
//! A record may only be mutated by the user named in its owner attribute
//! (`author` for species, `id` for profiles). The check runs at submit time
//! against the freshly fetched session.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::UserId;

/// Route an unauthenticated caller is sent to.
pub const LANDING_ROUTE: &str = "/";

/// Inline message shown when the signed-in user does not own the record.
pub const WRONG_ACCOUNT_MESSAGE: &str = "Login to the correct account to edit";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The caller's authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
}

impl Session {
    pub fn for_user(id: UserId) -> Self {
        Self {
            user: SessionUser { id, email: None },
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}

/// Source of the current session.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// `Ok(None)` when nobody is signed in.
    async fn get_session(&self) -> Result<Option<Session>, CoreError>;
}

/// Fetch the session, treating a provider failure as "signed out".
pub async fn current_session(provider: &dyn SessionProvider) -> Option<Session> {
    match provider.get_session().await {
        Ok(session) => session,
        Err(err) => {
            tracing::warn!(error = %err, "Session lookup failed, treating caller as signed out");
            None
        }
    }
}

/// Reject `session` unless it belongs to `owner`.
pub fn authorize_owner(session: &Session, owner: UserId) -> Result<(), CoreError> {
    if session.user_id() == owner {
        Ok(())
    } else {
        Err(CoreError::Forbidden(WRONG_ACCOUNT_MESSAGE.to_string()))
    }
}
