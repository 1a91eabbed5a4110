//! Per-command handler implementations
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial creation with utility and admin handlers

pub mod admin;
pub mod utility;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![Arc::new(utility::UtilityHandler), Arc::new(admin::AdminHandler)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_handlers_cover_the_command_set() {
        let names: Vec<&str> = create_all_handlers()
            .iter()
            .flat_map(|h| h.command_names().iter().copied())
            .collect();

        for expected in ["ping", "help", "version", "uptime", "set_time", "clear_time", "list_users"]
        {
            assert!(names.contains(&expected), "Missing handler for: {expected}");
        }
        assert_eq!(names.len(), 7);
    }
}
