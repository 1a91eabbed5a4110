//! Utility command handlers
//!
//! Handles: ping, help, version, uptime
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;

/// Handler for utility commands: ping, help, version, uptime
pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ping", "help", "version", "uptime"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "ping" => self.handle_ping(serenity_ctx, command).await,
            "help" => self.handle_help(serenity_ctx, command).await,
            "version" => self.handle_version(serenity_ctx, command).await,
            "uptime" => self.handle_uptime(&ctx, serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl UtilityHandler {
    /// Handle /ping command
    async fn handle_ping(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content("Pong!"))
            })
            .await?;

        info!("Ping command completed for user {}", command.user.id);
        Ok(())
    }

    /// Handle /help command
    async fn handle_help(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let help_text = r#"**출석체크 봇 명령어:**
`/ping` - 봇 응답 확인
`/help` - 이 도움말
`/version` - 봇 버전 정보
`/uptime` - 봇 가동 시간

**관리자 명령어:**
`/set_time <year> <month> <day> <hour> <minute> <second>` - 테스트용 시간 설정
`/clear_time` - 시간 설정 초기화 (시스템 시간 사용)
`/list_users` - 서버의 봇을 제외한 유저 목록

**출석체크 방법:**
매주 월요일 출석체크 메시지가 올라옵니다.
그날의 요일 이모지로 반응하면 출석이 기록됩니다."#;

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content(help_text))
            })
            .await?;

        Ok(())
    }

    /// Handle /version command
    async fn handle_version(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let mut output = format!(
            "**출석체크 봇 v{}**\n\n",
            crate::features::get_bot_version()
        );
        output.push_str("**Feature Versions:**\n");

        for feature in crate::features::get_features() {
            output.push_str(&format!("• {} v{}\n", feature.name, feature.version));
        }

        command
            .create_interaction_response(&serenity_ctx.http, |r| {
                r.kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|m| m.content(output))
            })
            .await?;

        info!("Version command completed for user {}", command.user.id);
        Ok(())
    }

    /// Handle /uptime command
    async fn handle_uptime(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let uptime = ctx.start_time.elapsed();
        let days = uptime.as_secs() / 86400;
        let hours = (uptime.as_secs() % 86400) / 3600;
        let minutes = (uptime.as_secs() % 3600) / 60;
        let seconds = uptime.as_secs() % 60;

        let response = if days > 0 {
            format!("⏱️ Uptime: {days}d {hours}h {minutes}m {seconds}s")
        } else if hours > 0 {
            format!("⏱️ Uptime: {hours}h {minutes}m {seconds}s")
        } else if minutes > 0 {
            format!("⏱️ Uptime: {minutes}m {seconds}s")
        } else {
            format!("⏱️ Uptime: {seconds}s")
        };

        command
            .create_interaction_response(&serenity_ctx.http, |r| {
                r.kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|m| m.content(response))
            })
            .await?;

        info!("Uptime command completed for user {}", command.user.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_handler_commands() {
        let handler = UtilityHandler;
        let names = handler.command_names();

        assert!(names.contains(&"ping"));
        assert!(names.contains(&"help"));
        assert!(names.contains(&"version"));
        assert!(names.contains(&"uptime"));
        assert_eq!(names.len(), 4);
    }
}
