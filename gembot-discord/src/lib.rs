//! # gembot-discord
//!
//! Discord framework layer: serenity adapters, [`gembot_core::ChatGateway`]
//! implementation, minimal config, and the event runner. Handles only Discord
//! connectivity and handler-chain execution; no history or AI logic.

mod adapters;
mod config;
mod gateway;
mod runner;

pub use adapters::{DiscordMessageWrapper, DiscordUserWrapper};
pub use config::DiscordConfig;
pub use gateway::SerenityGateway;
pub use runner::{default_intents, DiscordRunner};
