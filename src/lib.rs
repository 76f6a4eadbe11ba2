#![forbid(unsafe_code)]

//! Discord bot that records tagged posts and `CHANNEL_HRS` messages into a
//! spreadsheet webhook, with a liveness endpoint for the host.

pub mod collector;
pub mod config;
pub mod discord;
pub mod errors;
pub mod health;
pub mod models;
pub mod registry;
pub mod state;
pub mod webhook;

pub use config::BotConfig;
pub use errors::{AppError, Result};
