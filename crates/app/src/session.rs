//! Session provider backed by a bearer access token.

use async_trait::async_trait;
use biodex_core::error::CoreError;
use biodex_core::session::{Session, SessionProvider, SessionUser};

use crate::auth::jwt::{validate_token, JwtConfig};

/// Resolves the caller from an optional access token.
///
/// No token means nobody is signed in. A token that fails verification is
/// reported as [`CoreError::Unauthorized`], which the edit flow treats as
/// signed out.
pub struct TokenSessionProvider {
    token: Option<String>,
    jwt: JwtConfig,
}

impl TokenSessionProvider {
    pub fn new(token: Option<String>, jwt: JwtConfig) -> Self {
        Self { token, jwt }
    }
}

#[async_trait]
impl SessionProvider for TokenSessionProvider {
    async fn get_session(&self) -> Result<Option<Session>, CoreError> {
        let Some(token) = self.token.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let claims = validate_token(token, &self.jwt)
            .map_err(|e| CoreError::Unauthorized(format!("Invalid access token: {e}")))?;
        tracing::debug!(user_id = %claims.sub, "Session resolved from access token");

        Ok(Some(Session {
            user: SessionUser {
                id: claims.sub,
                email: claims.email,
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{generate_access_token, DEFAULT_AUDIENCE};
    use assert_matches::assert_matches;
    use biodex_core::session::current_session;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;
    use uuid::Uuid;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "session-test-secret".into(),
            access_token_expiry_mins: 5,
            audience: Some(DEFAULT_AUDIENCE.into()),
        }
    }

    /// Claims in the shape the hosted auth service signs: no `jti`, plus a
    /// `role` the session ignores.
    #[derive(Serialize)]
    struct HostedClaims<'a> {
        sub: Uuid,
        aud: &'a str,
        role: &'a str,
        email: &'a str,
        exp: i64,
        iat: i64,
    }

    fn hosted_token(user: Uuid, aud: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = HostedClaims {
            sub: user,
            aud,
            role: "authenticated",
            email: "host@example.org",
            exp: now + 300,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt().secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_no_token_is_no_session() {
        let provider = TokenSessionProvider::new(None, jwt());
        assert_eq!(provider.get_session().await.unwrap(), None);

        let blank = TokenSessionProvider::new(Some("   ".into()), jwt());
        assert_eq!(blank.get_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_valid_token_yields_subject() {
        let user = Uuid::new_v4();
        let token = generate_access_token(user, Some("u1@example.org"), &jwt()).unwrap();
        let provider = TokenSessionProvider::new(Some(token), jwt());

        let session = provider.get_session().await.unwrap().unwrap();
        assert_eq!(session.user_id(), user);
        assert_eq!(session.user.email.as_deref(), Some("u1@example.org"));
    }

    #[tokio::test]
    async fn test_bad_token_is_unauthorized_and_fails_open() {
        let provider = TokenSessionProvider::new(Some("garbage".into()), jwt());
        assert_matches!(provider.get_session().await, Err(CoreError::Unauthorized(_)));
        assert_eq!(current_session(&provider).await, None);
    }

    #[tokio::test]
    async fn test_hosted_service_token_is_accepted() {
        let user = Uuid::new_v4();
        let provider =
            TokenSessionProvider::new(Some(hosted_token(user, DEFAULT_AUDIENCE)), jwt());

        let session = provider.get_session().await.unwrap().unwrap();
        assert_eq!(session.user_id(), user);
        assert_eq!(session.user.email.as_deref(), Some("host@example.org"));
        assert_eq!(current_session(&provider).await, Some(session));
    }

    #[tokio::test]
    async fn test_token_for_another_audience_is_unauthorized() {
        let provider =
            TokenSessionProvider::new(Some(hosted_token(Uuid::new_v4(), "anon-service")), jwt());
        assert_matches!(provider.get_session().await, Err(CoreError::Unauthorized(_)));
    }
}
