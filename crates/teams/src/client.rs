//! Microsoft Graph client for Teams directory operations.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::auth::TokenProvider;
use crate::config::GraphConfig;
use crate::error::GraphError;
use crate::models::{
    Channel, ChannelMembershipType, ChatMessage, CreateChannelRequest, CreateTeamRequest,
    ListResponse, SentMessage, Team, TeamWithChannels, User,
};

/// Authenticated client for Teams messaging and directory operations.
///
/// One instance is constructed per configuration and is safe to share:
/// nothing on it mutates after construction except the internally
/// synchronized token cache. Construction performs no network I/O; the
/// first operation acquires the access token.
#[derive(Debug)]
pub struct DirectoryClient {
    http: reqwest::Client,
    tokens: TokenProvider,
    base_url: String,
    team_id: String,
    channel_id: String,
    owner_email: String,
}

impl DirectoryClient {
    /// Create a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &GraphConfig) -> Result<Self, GraphError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        let tokens = TokenProvider::new(
            http.clone(),
            &config.authority_url,
            &config.tenant_id,
            config.client_id.clone(),
            config.client_secret.clone(),
            config.scope(),
        );

        Ok(Self {
            http,
            tokens,
            base_url: config.graph_base_url.trim_end_matches('/').to_string(),
            team_id: config.team_id.clone(),
            channel_id: config.channel_id.clone(),
            owner_email: config.owner_email.clone(),
        })
    }

    // =========================================================================
    // Messaging
    // =========================================================================

    /// Send an HTML message to the configured default team and channel.
    ///
    /// The message body is passed through as-is; validating it is the
    /// caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Service`] for a non-success Graph response,
    /// [`GraphError::Http`] for transport failures. No retries.
    pub async fn send_message(&self, text: &str) -> Result<SentMessage, GraphError> {
        self.send_message_to(&self.team_id, &self.channel_id, text)
            .await
    }

    /// Send an HTML message to an explicit team and channel.
    pub async fn send_message_to(
        &self,
        team_id: &str,
        channel_id: &str,
        text: &str,
    ) -> Result<SentMessage, GraphError> {
        let message = ChatMessage::html(text);
        let url = format!("{}/teams/{team_id}/channels/{channel_id}/messages", self.base_url);

        let sent: SentMessage = self.post_json(&url, &message).await?;
        info!(message_id = %sent.id, channel_id = %channel_id, "Message sent");
        Ok(sent)
    }

    // =========================================================================
    // Directory listing
    // =========================================================================

    /// Fetch all visible teams and, for each team, its channels.
    ///
    /// Fetches a single page of teams and one channel list per team, in
    /// the order teams were returned, strictly sequentially. The first
    /// failure aborts the whole listing; there is no partial result.
    pub async fn list_teams_and_channels(&self) -> Result<Vec<TeamWithChannels>, GraphError> {
        let teams: ListResponse<Team> = self.get_json(&format!("{}/teams", self.base_url)).await?;
        debug!(count = teams.value.len(), "Fetched teams");

        let mut listing = Vec::with_capacity(teams.value.len());
        for team in teams.value {
            let channels: ListResponse<Channel> = self
                .get_json(&format!("{}/teams/{}/channels", self.base_url, team.id))
                .await?;

            listing.push(TeamWithChannels {
                team,
                channels: channels.value,
            });
        }

        Ok(listing)
    }

    /// Resolve a directory user's id by email or principal name.
    ///
    /// Returns `Ok(None)` when the directory has no such user.
    pub(crate) async fn resolve_user_id(&self, email: &str) -> Result<Option<String>, GraphError> {
        let token = self.tokens.get_token().await?;
        let url = format!("{}/users/{email}", self.base_url);

        let response = self.http.get(&url).bearer_auth(&token).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            debug!(email = %email, "User not found in directory");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::service(status, &body));
        }

        let user: User = response.json().await?;
        Ok(Some(user.id))
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Create a team from the standard template, owned by the configured
    /// owner.
    ///
    /// The owner email is resolved first; if no matching user exists the
    /// operation aborts with [`GraphError::UserNotFound`] without touching
    /// the creation endpoint.
    ///
    /// Graph provisions teams asynchronously and may answer 202 Accepted
    /// with an empty body, reported as [`GraphError::EmptyResponse`].
    ///
    /// Creation is not idempotent: re-invoking after an ambiguous failure
    /// (for example a timeout on a request that actually succeeded) may
    /// create a duplicate team. This client does not prevent that.
    pub async fn create_team(
        &self,
        display_name: &str,
        description: &str,
    ) -> Result<Team, GraphError> {
        let owner_id = self
            .resolve_user_id(&self.owner_email)
            .await?
            .ok_or_else(|| GraphError::UserNotFound(self.owner_email.clone()))?;

        debug!(owner_id = %owner_id, "Resolved team owner");

        let request =
            CreateTeamRequest::standard(&self.base_url, display_name, description, &owner_id);

        let token = self.tokens.get_token().await?;
        let url = format!("{}/teams", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::service(status, &body));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(GraphError::EmptyResponse);
        }

        let team: Team = serde_json::from_str(&body)?;
        info!(team_id = %team.id, "Team created");
        Ok(team)
    }

    /// Create a standard-membership channel in the configured team.
    pub async fn create_channel(
        &self,
        display_name: &str,
        description: &str,
    ) -> Result<Channel, GraphError> {
        let request = CreateChannelRequest {
            display_name: display_name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            membership_type: ChannelMembershipType::Standard,
        };

        let url = format!("{}/teams/{}/channels", self.base_url, self.team_id);
        let channel: Channel = self.post_json(&url, &request).await?;

        info!(channel_id = %channel.id, name = %channel.display_name, "Channel created");
        Ok(channel)
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    async fn get_json<R: DeserializeOwned>(&self, url: &str) -> Result<R, GraphError> {
        let token = self.tokens.get_token().await?;
        let response = self.http.get(url).bearer_auth(&token).send().await?;
        Self::parse(response).await
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<R, GraphError> {
        let token = self.tokens.get_token().await?;
        let response = self
            .http
            .post(url)
            .bearer_auth(&token)
            .json(body)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn parse<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, GraphError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::service(status, &body));
        }

        // Reading the body and decoding separately keeps transport failures
        // in Http and malformed bodies in Decode.
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(GraphError::Decode)
    }
}
