//! Slash command dispatch
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial creation as a thin registry dispatcher

use anyhow::Result;
use log::{info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handlers::create_all_handlers;
use crate::commands::registry::CommandRegistry;

/// Dispatches slash command interactions to their registered handlers.
pub struct CommandHandler {
    registry: CommandRegistry,
    context: Arc<CommandContext>,
}

impl CommandHandler {
    /// Create the handler with every command handler registered.
    pub fn new(context: CommandContext) -> Self {
        let mut registry = CommandRegistry::new();
        for handler in create_all_handlers() {
            registry.register(handler);
        }
        Self {
            registry,
            context: Arc::new(context),
        }
    }

    /// Handle one slash command interaction.
    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let user_id = command.user.id.to_string();
        let guild_id = command
            .guild_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "DM".to_string());

        info!(
            "[{}] 📥 Slash command received | Command: {} | User: {} | Guild: {}",
            request_id, command.data.name, user_id, guild_id
        );

        match self.registry.get(command.data.name.as_str()) {
            Some(handler) => {
                handler
                    .handle(Arc::clone(&self.context), ctx, command)
                    .await?;
                info!("[{}] ✅ Command {} completed", request_id, command.data.name);
            }
            None => {
                warn!("[{}] Unknown slash command: {}", request_id, command.data.name);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_declared_commands() {
        let mut registry = CommandRegistry::new();
        for handler in create_all_handlers() {
            registry.register(handler);
        }
        for name in ["ping", "help", "version", "uptime", "set_time", "clear_time", "list_users"]
        {
            assert!(registry.contains(name), "Missing registration for: {name}");
        }
        assert_eq!(registry.len(), 7);
    }
}
