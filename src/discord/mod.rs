//! Discord gateway bridge modules.

pub mod client;
pub mod commands;
pub mod components;
pub mod events;
pub mod handlers;
