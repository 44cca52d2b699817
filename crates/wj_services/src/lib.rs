//! Windjammer Services Layer
//!
//! Host-side services around the core: settings persistence and logging.

pub mod logging;
pub mod settings;

pub use settings::{Settings, SettingsError};
