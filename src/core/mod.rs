//! # Core Module
//!
//! Configuration and shared Discord utilities for the attendance bot.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial creation with config and response modules

pub mod config;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use response::{chunk_for_message, chunk_text, MESSAGE_LIMIT};
