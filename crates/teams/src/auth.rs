//! OAuth2 client-credentials token provider.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::GraphError;

/// Re-acquire the token this long before it actually expires.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Acquires and caches bearer tokens via the client-credentials grant.
///
/// One provider instance is shared by every operation of a client. The
/// token is fetched lazily on first use and reused until it is within
/// [`EXPIRY_SKEW_SECS`] of expiry.
pub struct TokenProvider {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

// Secrets and tokens stay out of debug output.
impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_SKEW_SECS) > Utc::now()
    }
}

/// Token endpoint response.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: i64,
}

impl TokenProvider {
    /// Create a provider for the given tenant's token endpoint.
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        authority_url: &str,
        tenant_id: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        let token_url = format!(
            "{}/{tenant_id}/oauth2/v2.0/token",
            authority_url.trim_end_matches('/')
        );

        Self {
            http,
            token_url,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: scope.into(),
            cached: Mutex::new(None),
        }
    }

    /// Return a valid bearer token, acquiring a new one if the cached
    /// token is missing or about to expire.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Service`] if the identity platform rejects
    /// the grant, or [`GraphError::Http`] on transport failure.
    pub async fn get_token(&self) -> Result<String, GraphError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh() {
                return Ok(token.access_token.clone());
            }
        }

        let token = self.acquire().await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }

    async fn acquire(&self) -> Result<CachedToken, GraphError> {
        debug!(token_url = %self.token_url, "Acquiring access token");

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::service(status, &body));
        }

        let body = response.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)?;
        debug!(expires_in = token.expires_in, "Access token acquired");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> TokenProvider {
        TokenProvider::new(
            reqwest::Client::new(),
            &server.uri(),
            "tenant-1",
            "client-1",
            "secret",
            "https://graph.microsoft.com/.default",
        )
    }

    fn token_body(token: &str, expires_in: i64) -> serde_json::Value {
        serde_json::json!({
            "token_type": "Bearer",
            "expires_in": expires_in,
            "access_token": token,
        })
    }

    #[tokio::test]
    async fn token_is_cached_while_fresh() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=client-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-1", 3599)))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider(&server);
        assert_eq!(provider.get_token().await.unwrap(), "tok-1");
        assert_eq!(provider.get_token().await.unwrap(), "tok-1");
    }

    #[tokio::test]
    async fn expired_token_is_reacquired() {
        let server = MockServer::start().await;

        // expires_in of zero is already inside the skew window
        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-2", 0)))
            .expect(2)
            .mount(&server)
            .await;

        let provider = provider(&server);
        provider.get_token().await.unwrap();
        provider.get_token().await.unwrap();
    }

    #[test]
    fn debug_output_redacts_client_secret() {
        let provider = TokenProvider::new(
            reqwest::Client::new(),
            "https://login.microsoftonline.com",
            "tenant-1",
            "client-1",
            "s3cret-value",
            "https://graph.microsoft.com/.default",
        );

        let rendered = format!("{provider:?}");
        assert!(!rendered.contains("s3cret-value"));
        assert!(rendered.contains("client-1"));
    }

    #[tokio::test]
    async fn rejected_credentials_surface_as_service_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": "invalid_client",
                "error_description": "Invalid client secret provided."
            })))
            .mount(&server)
            .await;

        let err = provider(&server).get_token().await.unwrap_err();
        match err {
            GraphError::Service { status, .. } => assert_eq!(status.as_u16(), 401),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
