//! # Roster Feature
//!
//! Guild member listing for the `/list_users` admin command.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.2.0
//! - **Toggleable**: false

use crate::core::response::MESSAGE_LIMIT;

/// A non-bot guild member as the roster lists it.
#[derive(Debug, Clone)]
pub struct RosterMember {
    /// Guild nickname when set, else the account name
    pub nickname: String,
    pub user_id: u64,
}

/// How the roster should be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterReply {
    /// Fits in one Discord message, sent inline with its header
    Inline(String),
    /// Too long for one message; the listing goes out as a `user_list.txt`
    /// attachment built from these bytes
    Attachment(String),
    /// No non-bot members to list
    Empty,
}

/// Render the member listing and decide inline versus attachment delivery.
pub fn build_roster_reply(members: &[RosterMember]) -> RosterReply {
    if members.is_empty() {
        return RosterReply::Empty;
    }

    let listing = members
        .iter()
        .map(|m| format!("닉네임: {}, ID: {}", m.nickname, m.user_id))
        .collect::<Vec<_>>()
        .join("\n");

    let inline = format!("서버 유저 목록:\n{listing}");
    if inline.len() <= MESSAGE_LIMIT {
        RosterReply::Inline(inline)
    } else {
        RosterReply::Attachment(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(nickname: &str, user_id: u64) -> RosterMember {
        RosterMember {
            nickname: nickname.to_string(),
            user_id,
        }
    }

    #[test]
    fn test_empty_roster() {
        assert_eq!(build_roster_reply(&[]), RosterReply::Empty);
    }

    #[test]
    fn test_short_roster_is_inline_with_header() {
        let reply = build_roster_reply(&[member("철수", 111), member("영희", 222)]);
        assert_eq!(
            reply,
            RosterReply::Inline(
                "서버 유저 목록:\n닉네임: 철수, ID: 111\n닉네임: 영희, ID: 222".to_string()
            )
        );
    }

    #[test]
    fn test_long_roster_becomes_attachment() {
        // Korean nicknames are three bytes per character, so a modest member
        // count already passes the message limit
        let members: Vec<RosterMember> = (0..200)
            .map(|i| member("출석체크유저", 1_000_000 + i))
            .collect();

        match build_roster_reply(&members) {
            RosterReply::Attachment(listing) => {
                assert!(listing.len() >= MESSAGE_LIMIT);
                assert!(listing.starts_with("닉네임: 출석체크유저, ID: 1000000"));
                assert!(!listing.contains("서버 유저 목록"));
            }
            other => panic!("expected attachment, got {other:?}"),
        }
    }

    #[test]
    fn test_boundary_uses_full_message_with_header() {
        // Header + line + pad lands exactly on the limit; a full message
        // still goes inline
        let pad = "a".repeat(MESSAGE_LIMIT - 40);
        match build_roster_reply(&[member(&pad, 1)]) {
            RosterReply::Inline(text) => assert_eq!(text.len(), MESSAGE_LIMIT),
            other => panic!("expected inline, got {other:?}"),
        }
    }

    #[test]
    fn test_one_byte_past_the_limit_becomes_attachment() {
        let pad = "a".repeat(MESSAGE_LIMIT - 39);
        assert!(matches!(
            build_roster_reply(&[member(&pad, 1)]),
            RosterReply::Attachment(_)
        ));
    }
}
