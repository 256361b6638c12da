//! Microsoft Graph client for Teams messaging and directory operations.
//!
//! This crate provides:
//! - Client-credentials authentication against the Microsoft identity
//!   platform, with expiry-aware token caching
//! - Sending HTML messages to a team channel
//! - Enumerating visible teams and their channels
//! - Creating teams (standard template, single owner) and channels
//!
//! Every operation returns a [`GraphError`]-discriminated result; nothing
//! is logged-and-swallowed, so callers decide whether to log, retry, or
//! escalate.
//!
//! # Usage
//!
//! ```no_run
//! use teams::{DirectoryClient, GraphConfig};
//!
//! # async fn example() -> Result<(), teams::GraphError> {
//! let config = GraphConfig::from_env()?;
//! let client = DirectoryClient::new(&config)?;
//!
//! client.send_message("Deploy finished.").await?;
//!
//! for entry in client.list_teams_and_channels().await? {
//!     println!("{}: {} channels", entry.team.display_name, entry.channels.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! Supplied entirely by the environment; see [`GraphConfig::from_env`]:
//!
//! - `GRAPH_TENANT_ID`, `GRAPH_CLIENT_ID`, `GRAPH_CLIENT_SECRET`
//! - `TEAMS_DEFAULT_TEAM_ID`, `TEAMS_DEFAULT_CHANNEL_ID`
//! - `TEAMS_OWNER_EMAIL` (owner of newly created teams)
//! - `GRAPH_BASE_URL`, `GRAPH_AUTHORITY_URL` (optional overrides)

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Many async API methods can fail

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use auth::TokenProvider;
pub use client::DirectoryClient;
pub use config::GraphConfig;
pub use error::GraphError;
pub use models::{
    BodyContentType, Channel, ChannelMembershipType, ChatMessage, SentMessage, Team,
    TeamWithChannels, User,
};
