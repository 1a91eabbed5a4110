//! Reaction check-in processing
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use chrono::{Datelike, Weekday};
use log::{debug, info, warn};
use serenity::http::Http;
use serenity::model::channel::{Reaction, ReactionType};
use serenity::model::id::{EmojiId, MessageId, UserId};
use uuid::Uuid;

use crate::features::schedule::{Clock, WeekTracker};

use super::config::AttendanceConfig;
use super::ledger::day_label;
use super::store::AttendanceStore;

/// Classification of one `reaction_add` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// Valid check-in, written to the ledger
    Recorded { user_id: u64, day: Weekday },
    /// Valid emoji but the user already checked in today
    Duplicate { user_id: u64, day: Weekday },
    /// Not today's emoji; the reaction was removed from the message
    WrongEmoji { user_id: u64 },
    /// One of the bot's own seeded reactions
    OwnReaction,
    /// No active weekly message, or a reaction on some other message
    Inactive,
}

/// Turns reactions on the weekly message into ledger check-ins.
///
/// A reaction counts only when it is the custom emoji mapped to the current
/// weekday; anything else on the weekly message is removed. All other
/// reactions in the guild are ignored.
#[derive(Clone)]
pub struct CheckInProcessor {
    store: AttendanceStore,
    clock: Clock,
    tracker: WeekTracker,
    config: AttendanceConfig,
}

impl CheckInProcessor {
    pub fn new(
        store: AttendanceStore,
        clock: Clock,
        tracker: WeekTracker,
        config: AttendanceConfig,
    ) -> Self {
        Self {
            store,
            clock,
            tracker,
            config,
        }
    }

    /// Process one gateway reaction event.
    ///
    /// Removal failures (missing permission, HTTP error) are logged and do
    /// not fail the event.
    pub async fn process(
        &self,
        http: &Http,
        bot_id: UserId,
        reaction: &Reaction,
    ) -> Result<CheckInOutcome> {
        let request_id = Uuid::new_v4();

        let user_id = match reaction.user_id {
            Some(id) => id,
            None => {
                // Gateway reaction events carry the reactor with our intents
                debug!("[{request_id}] Reaction without a user id ignored");
                return Ok(CheckInOutcome::Inactive);
            }
        };

        let now = self.clock.now().await;
        let today = now.date().weekday();
        let expected = self.config.emoji_for(today);
        let active = self.tracker.active_message().await;

        match classify(
            active,
            reaction.message_id,
            user_id,
            bot_id,
            custom_emoji_id(&reaction.emoji),
            expected,
        ) {
            Gate::Inactive => {
                debug!("[{request_id}] Reaction on message {} ignored, no active weekly message match", reaction.message_id);
                Ok(CheckInOutcome::Inactive)
            }
            Gate::OwnReaction => {
                debug!("[{request_id}] Ignoring the bot's own seeded reaction");
                Ok(CheckInOutcome::OwnReaction)
            }
            Gate::WrongEmoji => {
                info!(
                    "[{request_id}] Wrong emoji {} from user {user_id}, expected {} ({})",
                    reaction.emoji,
                    expected,
                    day_label(today)
                );
                if let Err(e) = http
                    .delete_reaction(
                        reaction.channel_id.0,
                        reaction.message_id.0,
                        Some(user_id.0),
                        &reaction.emoji,
                    )
                    .await
                {
                    warn!("[{request_id}] Failed to remove reaction from user {user_id}: {e}");
                }
                Ok(CheckInOutcome::WrongEmoji { user_id: user_id.0 })
            }
            Gate::CheckIn => {
                let recorded = self.store.record_check_in(today, user_id.0).await?;
                if recorded {
                    info!(
                        "[{request_id}] Recorded {} check-in for user {user_id}",
                        day_label(today)
                    );
                    Ok(CheckInOutcome::Recorded {
                        user_id: user_id.0,
                        day: today,
                    })
                } else {
                    debug!(
                        "[{request_id}] Duplicate {} check-in from user {user_id}",
                        day_label(today)
                    );
                    Ok(CheckInOutcome::Duplicate {
                        user_id: user_id.0,
                        day: today,
                    })
                }
            }
        }
    }
}

/// Filter decision before any file or REST work.
#[derive(Debug, PartialEq, Eq)]
enum Gate {
    Inactive,
    OwnReaction,
    WrongEmoji,
    CheckIn,
}

/// The custom emoji id of a reaction, `None` for unicode emoji.
fn custom_emoji_id(emoji: &ReactionType) -> Option<EmojiId> {
    match emoji {
        ReactionType::Custom { id, .. } => Some(*id),
        _ => None,
    }
}

fn classify(
    active: Option<MessageId>,
    message: MessageId,
    user: UserId,
    bot: UserId,
    reacted: Option<EmojiId>,
    expected: EmojiId,
) -> Gate {
    match active {
        Some(active) if active == message => {}
        _ => return Gate::Inactive,
    }
    if user == bot {
        return Gate::OwnReaction;
    }
    if reacted == Some(expected) {
        Gate::CheckIn
    } else {
        Gate::WrongEmoji
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEEKLY: MessageId = MessageId(100);
    const BOT: UserId = UserId(1);
    const USER: UserId = UserId(2);
    const TODAY: EmojiId = EmojiId(10);
    const OTHER_DAY: EmojiId = EmojiId(11);

    #[test]
    fn test_no_active_message_is_inert() {
        // Restart behavior: reactions do nothing until the next rollover
        let gate = classify(None, WEEKLY, USER, BOT, Some(TODAY), TODAY);
        assert_eq!(gate, Gate::Inactive);
    }

    #[test]
    fn test_other_message_is_ignored() {
        let gate = classify(Some(WEEKLY), MessageId(999), USER, BOT, Some(TODAY), TODAY);
        assert_eq!(gate, Gate::Inactive);
    }

    #[test]
    fn test_bot_seed_reaction_is_skipped() {
        let gate = classify(Some(WEEKLY), WEEKLY, BOT, BOT, Some(TODAY), TODAY);
        assert_eq!(gate, Gate::OwnReaction);
    }

    #[test]
    fn test_todays_emoji_checks_in() {
        let gate = classify(Some(WEEKLY), WEEKLY, USER, BOT, Some(TODAY), TODAY);
        assert_eq!(gate, Gate::CheckIn);
    }

    #[test]
    fn test_other_days_emoji_is_removed() {
        let gate = classify(Some(WEEKLY), WEEKLY, USER, BOT, Some(OTHER_DAY), TODAY);
        assert_eq!(gate, Gate::WrongEmoji);
    }

    #[test]
    fn test_unicode_emoji_is_removed() {
        let gate = classify(Some(WEEKLY), WEEKLY, USER, BOT, None, TODAY);
        assert_eq!(gate, Gate::WrongEmoji);
    }

    #[test]
    fn test_custom_emoji_id_extraction() {
        let custom = ReactionType::Custom {
            animated: false,
            id: EmojiId(5),
            name: Some("Mon".to_string()),
        };
        assert_eq!(custom_emoji_id(&custom), Some(EmojiId(5)));
        assert_eq!(custom_emoji_id(&ReactionType::Unicode("👍".to_string())), None);
    }
}
