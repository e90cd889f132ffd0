//! Spinlist command-line player
//!
//! Library half of the `spinlist` binary: configuration, the headless media
//! handle and the application wiring, exposed so they can be tested.

pub mod app;
pub mod config;
pub mod error;
pub mod headless;

pub use app::{Collaborators, PlayerApp};
pub use config::AppConfig;
pub use error::{CliError, Result};
