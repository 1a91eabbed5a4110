//! Admin command handlers
//!
//! Handles: set_time, clear_time, list_users
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{Context as AnyhowContext, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOption,
};
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::AttachmentType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::get_integer_option;
use crate::features::roster::{build_roster_reply, RosterMember, RosterReply};

/// Handler for admin commands: set_time, clear_time, list_users
pub struct AdminHandler;

#[async_trait]
impl SlashCommandHandler for AdminHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["set_time", "clear_time", "list_users"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "set_time" => self.handle_set_time(&ctx, serenity_ctx, command).await,
            "clear_time" => self.handle_clear_time(&ctx, serenity_ctx, command).await,
            "list_users" => self.handle_list_users(serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl AdminHandler {
    /// Handle /set_time command - freeze the bot clock at the given moment
    async fn handle_set_time(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let time = match parse_override(&command.data.options) {
            Some(time) => time,
            None => {
                reply(serenity_ctx, command, "유효하지 않은 날짜/시간입니다.").await?;
                return Ok(());
            }
        };

        ctx.clock.set_override(time).await;
        info!("Clock override set to {time} by user {}", command.user.id);

        reply(
            serenity_ctx,
            command,
            &format!("시간이 {}으로 설정되었습니다.", time.format("%Y-%m-%d %H:%M:%S")),
        )
        .await
    }

    /// Handle /clear_time command - return to the system clock
    async fn handle_clear_time(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        ctx.clock.clear_override().await;
        info!("Clock override cleared by user {}", command.user.id);

        reply(
            serenity_ctx,
            command,
            "시간 설정이 초기화되었습니다. 현재 시스템 시간을 사용합니다.",
        )
        .await
    }

    /// Handle /list_users command - list the guild's non-bot members
    async fn handle_list_users(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let guild_id = match command.guild_id {
            Some(id) => id,
            None => {
                reply(serenity_ctx, command, "이 명령어는 서버에서만 사용할 수 있습니다.")
                    .await?;
                return Ok(());
            }
        };

        let members = serenity_ctx
            .http
            .get_guild_members(guild_id.0, Some(1000), None)
            .await
            .context("Failed to fetch guild members for /list_users")?;

        let roster: Vec<RosterMember> = members
            .iter()
            .filter(|m| !m.user.bot)
            .map(|m| RosterMember {
                nickname: m.nick.clone().unwrap_or_else(|| m.user.name.clone()),
                user_id: m.user.id.0,
            })
            .collect();

        match build_roster_reply(&roster) {
            RosterReply::Empty => {
                reply(serenity_ctx, command, "봇을 제외한 유저가 없습니다.").await?;
            }
            RosterReply::Inline(text) => {
                reply(serenity_ctx, command, &text).await?;
            }
            RosterReply::Attachment(listing) => {
                reply(
                    serenity_ctx,
                    command,
                    "서버 유저 목록이 너무 깁니다. 파일로 첨부합니다.",
                )
                .await?;
                command
                    .create_followup_message(&serenity_ctx.http, |message| {
                        message.add_file(AttachmentType::Bytes {
                            data: listing.into_bytes().into(),
                            filename: "user_list.txt".to_string(),
                        })
                    })
                    .await?;
            }
        }

        info!(
            "Listed {} non-bot members for user {}",
            roster.len(),
            command.user.id
        );
        Ok(())
    }
}

/// Build the override time from the six /set_time options.
///
/// Discord enforces the option ranges; the calendar check (e.g. Feb 30)
/// happens here.
fn parse_override(options: &[CommandDataOption]) -> Option<NaiveDateTime> {
    let year = get_integer_option(options, "year")?;
    let month = get_integer_option(options, "month")?;
    let day = get_integer_option(options, "day")?;
    let hour = get_integer_option(options, "hour")?;
    let minute = get_integer_option(options, "minute")?;
    let second = get_integer_option(options, "second")?;

    NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)?
        .and_hms_opt(hour as u32, minute as u32, second as u32)
}

async fn reply(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    content: &str,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(content))
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_admin_handler_commands() {
        let handler = AdminHandler;
        let names = handler.command_names();

        assert!(names.contains(&"set_time"));
        assert!(names.contains(&"clear_time"));
        assert!(names.contains(&"list_users"));
        assert_eq!(names.len(), 3);
    }

    fn options(values: &[(&str, i64)]) -> Vec<CommandDataOption> {
        values
            .iter()
            .map(|(name, value)| {
                serde_json::from_value(json!({
                    "name": name,
                    "type": 4,
                    "value": value,
                }))
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_parse_override_valid() {
        let opts = options(&[
            ("year", 2024),
            ("month", 12),
            ("day", 2),
            ("hour", 9),
            ("minute", 30),
            ("second", 0),
        ]);
        let time = parse_override(&opts).unwrap();
        assert_eq!(time.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-12-02 09:30:00");
    }

    #[test]
    fn test_parse_override_rejects_impossible_date() {
        let opts = options(&[
            ("year", 2024),
            ("month", 2),
            ("day", 30),
            ("hour", 0),
            ("minute", 0),
            ("second", 0),
        ]);
        assert!(parse_override(&opts).is_none());
    }

    #[test]
    fn test_parse_override_requires_all_options() {
        let opts = options(&[("year", 2024), ("month", 12)]);
        assert!(parse_override(&opts).is_none());
    }
}
