//! Microsoft Graph resource types and request payloads.
//!
//! These are pass-through representations of remote resources; nothing
//! here is cached or persisted by the client.

use serde::{Deserialize, Serialize};

/// Graph collection envelope: `{"value": [...]}`.
///
/// The default points at `Vec::new` so the derive does not require
/// `T: Default`; the element types are remote resources and have no
/// meaningful default value.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// A Microsoft Teams team.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A channel within a team.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub membership_type: Option<ChannelMembershipType>,
}

/// Channel membership type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChannelMembershipType {
    Standard,
    Private,
    Shared,
}

/// Content type of a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyContentType {
    Text,
    Html,
}

/// Message body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    pub content_type: BodyContentType,
    pub content: String,
}

/// Outgoing channel message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub body: ItemBody,
}

impl ChatMessage {
    /// Wrap text as an HTML-content message.
    #[must_use]
    pub fn html(content: impl Into<String>) -> Self {
        Self {
            body: ItemBody {
                content_type: BodyContentType::Html,
                content: content.into(),
            },
        }
    }
}

/// A message as returned by Graph after posting.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub id: String,
    #[serde(default)]
    pub created_date_time: Option<String>,
}

/// A directory user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
    #[serde(default)]
    pub user_principal_name: Option<String>,
}

/// A team together with its channels, as produced by the listing
/// operation.
#[derive(Debug, Clone)]
pub struct TeamWithChannels {
    pub team: Team,
    pub channels: Vec<Channel>,
}

/// Request to create a channel.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub membership_type: ChannelMembershipType,
}

/// Request to create a team from the standard template.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    #[serde(rename = "template@odata.bind")]
    pub template_bind: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub members: Vec<ConversationMember>,
}

impl CreateTeamRequest {
    /// Build a standard-template creation request with a single owner.
    #[must_use]
    pub fn standard(
        graph_base_url: &str,
        display_name: &str,
        description: &str,
        owner_id: &str,
    ) -> Self {
        let base = graph_base_url.trim_end_matches('/');

        Self {
            template_bind: format!("{base}/teamsTemplates('standard')"),
            display_name: display_name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            members: vec![ConversationMember::owner(base, owner_id)],
        }
    }
}

/// A member entry in a team-creation request.
#[derive(Debug, Serialize)]
pub struct ConversationMember {
    #[serde(rename = "@odata.type")]
    pub odata_type: &'static str,
    pub roles: Vec<String>,
    #[serde(rename = "user@odata.bind")]
    pub user_bind: String,
}

impl ConversationMember {
    /// An owner member bound to the given directory user id.
    #[must_use]
    pub fn owner(graph_base_url: &str, user_id: &str) -> Self {
        Self {
            odata_type: "#microsoft.graph.aadUserConversationMember",
            roles: vec!["owner".to_string()],
            user_bind: format!("{graph_base_url}/users('{user_id}')"),
        }
    }
}
