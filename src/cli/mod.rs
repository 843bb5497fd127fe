//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments, resolving the backend
//! and identity, and executing the appropriate command.

pub mod say;
pub mod thread_list;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::api::HttpChatApi;
use crate::cli::say::run_say;
use crate::cli::thread_list::list_threads;
use crate::core::config::{Config, ENV_API_BASE_URL};
use crate::core::identity::{
    ensure_identity, FileIdentityStore, IdentityStore, MemoryIdentityStore, UserId,
};
use crate::core::location::Location;
use crate::core::state_file::StateFile;
use crate::ui::chat_loop::{run_chat, ChatSession};
use crate::utils::url::validate_base_url;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ")"
);

#[derive(Parser)]
#[command(name = "spur-chat")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "A terminal client for thread-based AI chat backends")]
#[command(
    long_about = "spur-chat is a full-screen terminal client for a thread-based chat backend. \
It lists your conversation threads, shows their messages, and sends new messages, \
showing them right away while the server replies.\n\n\
Identity:\n\
  An anonymous user is created on first run and remembered. Use \
'spur-chat identity' to show, set, or reset it.\n\n\
Environment Variables:\n\
  SPUR_API_BASE_URL   Backend base URL (overrides the config file)\n\
  SPUR_LOG            Log filter directives (default: spur_chat=info)\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a newline\n\
  Tab               Switch between the thread list and the input\n\
  n / d / r         New, delete, refresh threads (thread list)\n\
  PgUp/PgDn         Scroll the conversation\n\
  Ctrl+C            Quit the application\n\n\
Commands:\n\
  /help             Show commands and keys\n\
  /new [title]      Create a thread\n\
  /link [URL]       Show the current link or open one"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL, e.g. http://localhost:4000/api
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Open this thread
    #[arg(short = 't', long, global = true, value_name = "ID", conflicts_with = "link")]
    pub thread: Option<String>,

    /// Open the thread named by a link such as spur://chat/?thread=ID
    #[arg(long, global = true, value_name = "URL")]
    pub link: Option<String>,

    /// Write diagnostic logs to this file
    #[arg(short = 'l', long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Keep the identity and last link in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Print your threads
    Threads,
    /// Send one message and print the reply
    Say {
        /// Message text (can be multiple words)
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Show, set, or reset the anonymous user id
    Identity {
        #[command(subcommand)]
        command: IdentityCommands,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key
        value: Option<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

#[derive(Subcommand)]
pub enum IdentityCommands {
    /// Print the stored user id
    Show,
    /// Use an existing user id
    Set { user_id: String },
    /// Forget the stored user id
    Reset,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    crate::logging::init(args.log_file.as_deref())?;

    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    let command = args.command.unwrap_or(Commands::Chat);

    match &command {
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            match (key.as_deref(), value.as_deref()) {
                (Some(key), Some(value)) => match apply_setting(&mut config, key, value) {
                    Ok(message) => {
                        config.save()?;
                        println!("✅ {message}");
                    }
                    Err(message) => {
                        eprintln!("❌ {message}");
                        std::process::exit(1);
                    }
                },
                _ => config.print_all(),
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match apply_unset(&mut config, key) {
                Ok(message) => {
                    config.save()?;
                    println!("✅ {message}");
                }
                Err(message) => {
                    eprintln!("❌ {message}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Identity { command } => {
            let store = identity_store(args.ephemeral)?;
            match command {
                IdentityCommands::Show => match store.load()? {
                    Some(user_id) => println!("{user_id}"),
                    None => println!("No user ID set"),
                },
                IdentityCommands::Set { user_id } => {
                    let user_id = UserId::parse(user_id)?;
                    store.store(&user_id)?;
                    println!("✅ Using user ID: {user_id}");
                }
                IdentityCommands::Reset => {
                    store.clear()?;
                    println!("✅ Cleared user ID");
                }
            }
            Ok(())
        }
        Commands::Chat | Commands::Threads | Commands::Say { .. } => {
            let config = Config::load()?;
            let env_url = std::env::var(ENV_API_BASE_URL).ok();
            let base_url = validate_base_url(
                &config.resolve_api_base_url(args.api_url.as_deref(), env_url.as_deref()),
            )?;

            let api = HttpChatApi::new(base_url.clone());
            let store = identity_store(args.ephemeral)?;
            let identity = match ensure_identity(store.as_ref(), &api).await {
                Ok(identity) => identity,
                Err(err) => {
                    eprintln!("❌ {err}");
                    std::process::exit(1);
                }
            };
            api.set_user_id(Some(identity.user_id.as_str().to_string()));
            info!(api_base_url = %base_url, created = identity.created, "Identity ready");

            match &command {
                Commands::Threads => list_threads(&api).await,
                Commands::Say { text } => run_say(&api, args.thread.as_deref(), text).await,
                _ => {
                    let state_file = state_file(args.ephemeral)?;
                    let last_link = match &state_file {
                        Some(file) if config.resume_last_thread() => {
                            file.load().ok().and_then(|state| state.last_link)
                        }
                        _ => None,
                    };
                    let location = resolve_location(
                        args.thread.as_deref(),
                        args.link.as_deref(),
                        last_link.as_deref(),
                    )?;

                    run_chat(ChatSession {
                        api: Arc::new(api),
                        api_base_url: base_url,
                        user_id: identity.user_id.into_inner(),
                        location,
                        state_file,
                        notification_ttl: Duration::from_secs(config.notification_seconds()),
                    })
                    .await
                }
            }
        }
    }
}

fn state_file(ephemeral: bool) -> Result<Option<StateFile>, Box<dyn Error>> {
    if ephemeral {
        return Ok(None);
    }
    Ok(Some(StateFile::default_location()?))
}

fn identity_store(ephemeral: bool) -> Result<Box<dyn IdentityStore>, Box<dyn Error>> {
    Ok(match state_file(ephemeral)? {
        Some(file) => Box::new(FileIdentityStore::new(file)),
        None => Box::new(MemoryIdentityStore::default()),
    })
}

/// Pick the starting link: an explicit thread, then an explicit link, then
/// the remembered one. A remembered link that no longer parses is ignored.
pub(crate) fn resolve_location(
    thread: Option<&str>,
    link: Option<&str>,
    last_link: Option<&str>,
) -> Result<Location, String> {
    if let Some(thread) = thread.map(str::trim).filter(|id| !id.is_empty()) {
        return Ok(Location::for_thread(thread));
    }
    if let Some(link) = link {
        return Location::parse(link);
    }
    match last_link.map(Location::parse) {
        Some(Ok(location)) => Ok(location),
        Some(Err(err)) => {
            warn!(error = %err, "Ignoring remembered link");
            Ok(Location::default())
        }
        None => Ok(Location::default()),
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

pub(crate) fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<String, String> {
    match key {
        "api-url" => {
            let url = validate_base_url(value)?;
            config.api_base_url = Some(url.clone());
            Ok(format!("Set api-url to: {url}"))
        }
        "resume-last-thread" => {
            let enabled = parse_switch(value)
                .ok_or_else(|| format!("Expected on or off for resume-last-thread, got '{value}'"))?;
            config.resume_last_thread = Some(enabled);
            Ok(format!(
                "Set resume-last-thread to: {}",
                if enabled { "on" } else { "off" }
            ))
        }
        "notification-seconds" => {
            let seconds = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|seconds| *seconds > 0)
                .ok_or_else(|| format!("Expected a positive number of seconds, got '{value}'"))?;
            config.notification_seconds = Some(seconds);
            Ok(format!("Set notification-seconds to: {seconds}"))
        }
        _ => Err(format!("Unknown config key: {key}")),
    }
}

pub(crate) fn apply_unset(config: &mut Config, key: &str) -> Result<String, String> {
    match key {
        "api-url" => config.api_base_url = None,
        "resume-last-thread" => config.resume_last_thread = None,
        "notification-seconds" => config.notification_seconds = None,
        _ => return Err(format!("Unknown config key: {key}")),
    }
    Ok(format!("Unset {key}"))
}
