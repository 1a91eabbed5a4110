//! Attendance channel and emoji configuration
//!
//! YAML-based schedule configuration with validation at startup.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use serenity::model::channel::ReactionType;
use serenity::model::id::{ChannelId, EmojiId};

use super::ledger::{day_label, WEEKDAYS};

/// Attendance configuration loaded from `attendance.yaml`.
///
/// The bot cannot run without its channel and weekday emoji table, so
/// loading or validation failure is fatal at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AttendanceConfig {
    /// Channel the weekly banner and reports are posted to
    pub channel_id: u64,
    /// Custom emoji ids per weekday; the emoji name on Discord must equal
    /// the day label (e.g. `<:Mon:1311954291287654410>`)
    pub emojis: WeekdayEmojis,
}

/// The weekday to custom-emoji-id table, all seven required.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeekdayEmojis {
    #[serde(rename = "Mon")]
    pub mon: u64,
    #[serde(rename = "Tue")]
    pub tue: u64,
    #[serde(rename = "Wed")]
    pub wed: u64,
    #[serde(rename = "Thu")]
    pub thu: u64,
    #[serde(rename = "Fri")]
    pub fri: u64,
    #[serde(rename = "Sat")]
    pub sat: u64,
    #[serde(rename = "Sun")]
    pub sun: u64,
}

impl AttendanceConfig {
    /// Load and validate the configuration from a YAML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read attendance config {path}: {e}"))?;
        let config: AttendanceConfig = serde_yaml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Invalid attendance config {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate ids: channel and emojis nonzero, emojis distinct.
    pub fn validate(&self) -> Result<()> {
        if self.channel_id == 0 {
            return Err(anyhow::anyhow!("channel_id must be a nonzero Discord id"));
        }
        let mut seen = std::collections::HashSet::new();
        for day in WEEKDAYS {
            let id = self.emojis.id_for(day);
            if id == 0 {
                return Err(anyhow::anyhow!(
                    "Emoji id for {} must be a nonzero Discord id",
                    day_label(day)
                ));
            }
            if !seen.insert(id) {
                return Err(anyhow::anyhow!(
                    "Emoji id {id} is assigned to more than one weekday"
                ));
            }
        }
        Ok(())
    }

    /// The channel the weekly banner and reports go to.
    pub fn channel(&self) -> ChannelId {
        ChannelId(self.channel_id)
    }

    /// Expected custom emoji for a weekday's check-in.
    pub fn emoji_for(&self, day: Weekday) -> EmojiId {
        EmojiId(self.emojis.id_for(day))
    }

    /// Reaction to seed on the weekly message for a weekday.
    pub fn reaction_for(&self, day: Weekday) -> ReactionType {
        ReactionType::Custom {
            animated: false,
            id: self.emoji_for(day),
            name: Some(day_label(day).to_string()),
        }
    }

    /// The seven weekdays in seeding (Mon..Sun) order.
    pub fn week(&self) -> impl Iterator<Item = Weekday> {
        WEEKDAYS.into_iter()
    }
}

impl WeekdayEmojis {
    fn id_for(&self, day: Weekday) -> u64 {
        match day {
            Weekday::Mon => self.mon,
            Weekday::Tue => self.tue,
            Weekday::Wed => self.wed,
            Weekday::Thu => self.thu,
            Weekday::Fri => self.fri,
            Weekday::Sat => self.sat,
            Weekday::Sun => self.sun,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_yaml() -> &'static str {
        r#"
channel_id: 1311973759179030548
emojis:
  Mon: 1311954291287654410
  Tue: 1311954288905551912
  Wed: 1311954287449866300
  Thu: 1311954285625479229
  Fri: 1311954284027318312
  Sat: 1311954282236350556
  Sun: 1311954280214958201
"#
    }

    #[test]
    fn test_parse_and_validate() {
        let config: AttendanceConfig = serde_yaml::from_str(valid_yaml()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.channel(), ChannelId(1311973759179030548));
        assert_eq!(config.emoji_for(Weekday::Mon), EmojiId(1311954291287654410));
        assert_eq!(config.emoji_for(Weekday::Sun), EmojiId(1311954280214958201));
    }

    #[test]
    fn test_missing_day_is_rejected() {
        let yaml = r#"
channel_id: 1
emojis:
  Mon: 1
  Tue: 2
"#;
        assert!(serde_yaml::from_str::<AttendanceConfig>(yaml).is_err());
    }

    #[test]
    fn test_zero_channel_is_rejected() {
        let mut config: AttendanceConfig = serde_yaml::from_str(valid_yaml()).unwrap();
        config.channel_id = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_emoji_is_rejected() {
        let mut config: AttendanceConfig = serde_yaml::from_str(valid_yaml()).unwrap();
        config.emojis.thu = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_emoji_is_rejected() {
        let mut config: AttendanceConfig = serde_yaml::from_str(valid_yaml()).unwrap();
        config.emojis.sat = config.emojis.fri;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reaction_carries_day_name() {
        let config: AttendanceConfig = serde_yaml::from_str(valid_yaml()).unwrap();
        match config.reaction_for(Weekday::Wed) {
            ReactionType::Custom { id, name, animated } => {
                assert_eq!(id, EmojiId(1311954287449866300));
                assert_eq!(name.as_deref(), Some("Wed"));
                assert!(!animated);
            }
            other => panic!("expected custom reaction, got {other:?}"),
        }
    }

    #[test]
    fn test_week_order() {
        let config: AttendanceConfig = serde_yaml::from_str(valid_yaml()).unwrap();
        let days: Vec<Weekday> = config.week().collect();
        assert_eq!(days.first(), Some(&Weekday::Mon));
        assert_eq!(days.last(), Some(&Weekday::Sun));
        assert_eq!(days.len(), 7);
    }
}
