//! Configuration for the Teams directory client.

use std::env;

use crate::error::GraphError;

/// Default Microsoft Graph endpoint.
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Default identity platform authority.
pub const DEFAULT_AUTHORITY_URL: &str = "https://login.microsoftonline.com";

/// Client configuration, supplied by the environment.
///
/// Credentials are never embedded in source; a deployment provides them via
/// environment variables (or a secret store that populates them).
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Entra tenant id.
    pub tenant_id: String,
    /// Application (client) id.
    pub client_id: String,
    /// Client secret for the credentials grant.
    pub client_secret: String,
    /// Team targeted by default for messages and channel creation.
    pub team_id: String,
    /// Channel targeted by default for messages.
    pub channel_id: String,
    /// Email of the user made owner of newly created teams.
    pub owner_email: String,
    /// Graph API base URL (overridable for tests).
    pub graph_base_url: String,
    /// Identity authority base URL (overridable for tests).
    pub authority_url: String,
}

impl GraphConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Config`] naming the first required variable
    /// that is missing or empty.
    pub fn from_env() -> Result<Self, GraphError> {
        Ok(Self {
            tenant_id: require("GRAPH_TENANT_ID")?,
            client_id: require("GRAPH_CLIENT_ID")?,
            client_secret: require("GRAPH_CLIENT_SECRET")?,
            team_id: require("TEAMS_DEFAULT_TEAM_ID")?,
            channel_id: require("TEAMS_DEFAULT_CHANNEL_ID")?,
            owner_email: require("TEAMS_OWNER_EMAIL")?,
            graph_base_url: env::var("GRAPH_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.to_string()),
            authority_url: env::var("GRAPH_AUTHORITY_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_AUTHORITY_URL.to_string()),
        })
    }

    /// OAuth scope for the client-credentials grant: the Graph resource
    /// origin plus `/.default`.
    #[must_use]
    pub fn scope(&self) -> String {
        let origin = self.graph_base_url.trim_end_matches('/');
        let origin = origin.strip_suffix("/v1.0").unwrap_or(origin);
        format!("{origin}/.default")
    }
}

fn require(name: &str) -> Result<String, GraphError> {
    env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| GraphError::Config(format!("{name} is not set")))
}
