//! Single-session social networking console backed by flat text files.
//!
//! Users live in a comma-separated users file; whichever user is logged in
//! is saved to a shared current-user file on every post and on logout.

pub mod app;
pub mod config;
pub mod console;
pub mod list;
pub mod menu;
pub mod storage;
pub mod user;

pub use app::{SocialApp, SocialError};
pub use config::{Config, ConfigError, ReloadMode};
