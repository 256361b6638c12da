//! Teams directory CLI.
//!
//! Thin command-line front end over the library: send a message, list
//! teams and channels, create a team or a channel. Configuration comes
//! from the environment (see the crate docs).

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use teams::{DirectoryClient, GraphConfig, GraphError};

#[derive(Parser)]
#[command(name = "teams", about = "Microsoft Teams directory operations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send an HTML message to the configured default channel
    Send {
        /// Message body (HTML)
        text: String,
    },
    /// List all visible teams with their channels
    List,
    /// Create a team owned by the configured owner
    CreateTeam {
        display_name: String,
        #[arg(default_value = "")]
        description: String,
    },
    /// Create a standard channel in the configured team
    CreateChannel {
        name: String,
        #[arg(default_value = "")]
        description: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("teams=info".parse()?))
        .init();

    let cli = Cli::parse();

    let config = GraphConfig::from_env()?;
    let client = DirectoryClient::new(&config)?;

    match cli.command {
        Command::Send { text } => {
            let sent = client.send_message(&text).await?;
            println!("Message sent: {}", sent.id);
        }
        Command::List => {
            for entry in client.list_teams_and_channels().await? {
                println!("Team {}: {}", entry.team.id, entry.team.display_name);
                for channel in entry.channels {
                    println!("\tChannel {}: {}", channel.id, channel.display_name);
                }
            }
        }
        Command::CreateTeam {
            display_name,
            description,
        } => match client.create_team(&display_name, &description).await {
            Ok(team) => println!("Team created with ID: {}", team.id),
            Err(GraphError::EmptyResponse) => {
                println!("Team creation accepted; provisioning is still in progress.");
            }
            Err(e) => return Err(e.into()),
        },
        Command::CreateChannel { name, description } => {
            let channel = client.create_channel(&name, &description).await?;
            println!(
                "Channel '{}' created with ID: {}",
                channel.display_name, channel.id
            );
        }
    }

    Ok(())
}
