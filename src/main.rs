//! Chatwork MCP - Chatwork REST API as MCP tools
//!
//! Serves the tools over stdio by default; the other subcommands run a
//! single operation and print its JSON result.

mod api;
mod archive;
mod config;
mod models;
mod server;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::ChatworkClient;
use config::Config;
use tools::params::*;

#[derive(Parser)]
#[command(name = "chatwork-mcp")]
#[command(about = "MCP server exposing the Chatwork API as tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve tools over stdin/stdout (default)
    Serve,

    /// Show whether an API token is configured
    Status,

    /// List rooms
    Rooms,

    /// Fetch room messages and save a transcript
    Messages {
        /// Room ID (from `rooms` output)
        room_id: i64,

        /// Directory to save the transcript under
        #[arg(short, long)]
        dest: String,

        /// Fetch the latest history instead of only new messages
        #[arg(long)]
        full: bool,
    },

    /// List room tasks
    Tasks {
        /// Room ID (from `rooms` output)
        room_id: i64,
    },

    /// List tasks assigned to you
    MyTasks {
        /// open or done
        #[arg(short, long, default_value = "open")]
        status: String,
    },

    /// Post a message
    Send {
        /// Room ID (from `rooms` output)
        room_id: i64,

        /// Message body
        body: String,

        /// Keep the message unread for yourself
        #[arg(long)]
        self_unread: bool,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the MCP protocol; logs go to stderr.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = Config::load()?;
    if config.api_token().is_none() {
        tracing::warn!(
            "{} is not set; tool calls will fail until it is configured",
            config::TOKEN_ENV
        );
    }
    let client = ChatworkClient::new(config.into_api_token());

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            server::run(client).await?;
        }
        Commands::Status => match client.token() {
            Ok(_) => println!("API token: configured"),
            Err(_) => println!("API token: not configured (set {})", config::TOKEN_ENV),
        },
        Commands::Rooms => {
            print_json(&tools::list_rooms(&client).await?)?;
        }
        Commands::Messages {
            room_id,
            dest,
            full,
        } => {
            let params = ListRoomMessagesParams {
                room_id,
                save_dir_path: dest,
                force: u8::from(full),
            };
            print_json(&tools::list_room_messages(&client, &params).await?)?;
        }
        Commands::Tasks { room_id } => {
            print_json(&tools::list_room_tasks(&client, &RoomParams { room_id }).await?)?;
        }
        Commands::MyTasks { status } => {
            print_json(&tools::list_my_tasks(&client, &ListMyTasksParams { status }).await?)?;
        }
        Commands::Send {
            room_id,
            body,
            self_unread,
        } => {
            tracing::info!("Sending message...");
            let params = PostRoomMessageParams {
                room_id,
                body,
                self_unread,
            };
            print_json(&tools::post_room_message(&client, &params).await?)?;
        }
    }

    Ok(())
}
