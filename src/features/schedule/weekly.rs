//! Weekly rollover poll loop
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{Context as AnyhowContext, Result};
use chrono::{Datelike, Duration, IsoWeek, NaiveDate, NaiveDateTime, Weekday};
use log::{debug, error, info, warn};
use serenity::http::Http;
use serenity::model::id::{GuildId, MessageId};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::response::chunk_for_message;
use crate::features::attendance::{
    build_report, day_label, AttendanceConfig, AttendanceStore, ReportMember, WeekClose,
};

use super::clock::Clock;

/// Poll cadence for the rollover check.
const POLL_INTERVAL_SECS: u64 = 10;

/// Shared week state: the active banner message, the last ISO week a banner
/// was posted for, and the guild the bot serves.
///
/// Written by `ready` (guild) and the scheduler (message, week), read by the
/// check-in processor. Clones share state.
#[derive(Clone, Default)]
pub struct WeekTracker {
    inner: Arc<RwLock<WeekState>>,
}

#[derive(Default)]
struct WeekState {
    active_message: Option<MessageId>,
    previous_week: Option<IsoWeek>,
    guild: Option<GuildId>,
}

impl WeekTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn guild(&self) -> Option<GuildId> {
        self.inner.read().await.guild
    }

    pub async fn set_guild(&self, guild: GuildId) {
        self.inner.write().await.guild = Some(guild);
    }

    /// The weekly banner message whose reactions count as check-ins.
    ///
    /// `None` until the first rollover after startup; reactions are inert
    /// until then.
    pub async fn active_message(&self) -> Option<MessageId> {
        self.inner.read().await.active_message
    }

    pub async fn set_active_message(&self, message: MessageId) {
        self.inner.write().await.active_message = Some(message);
    }

    pub async fn previous_week(&self) -> Option<IsoWeek> {
        self.inner.read().await.previous_week
    }

    pub async fn set_previous_week(&self, week: IsoWeek) {
        self.inner.write().await.previous_week = Some(week);
    }
}

/// Background task that posts the weekly attendance message and runs the
/// Monday close-out.
///
/// Spawned from main; polls every ten seconds and fires when the clock says
/// Monday of an ISO week no banner has been posted for. A failed rollover is
/// logged and retried on the next tick.
pub struct WeeklyScheduler {
    clock: Clock,
    store: AttendanceStore,
    tracker: WeekTracker,
    config: AttendanceConfig,
    /// A close-out whose report has not been posted yet. The store commits
    /// the fold-and-reset before the report goes out, so a failed post must
    /// keep the snapshot here for the retry instead of re-reading the
    /// already-reset ledger.
    pending_close: Option<WeekClose>,
}

impl WeeklyScheduler {
    pub fn new(
        clock: Clock,
        store: AttendanceStore,
        tracker: WeekTracker,
        config: AttendanceConfig,
    ) -> Self {
        Self {
            clock,
            store,
            tracker,
            config,
            pending_close: None,
        }
    }

    /// Run the poll loop forever.
    pub async fn run(mut self, http: Arc<Http>) {
        info!(
            "Weekly attendance scheduler started ({POLL_INTERVAL_SECS}s poll, channel {})",
            self.config.channel_id
        );
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(POLL_INTERVAL_SECS));
        loop {
            interval.tick().await;
            if let Err(e) = self.tick(&http).await {
                error!("Weekly rollover failed, retrying next tick: {e:#}");
            }
        }
    }

    /// One poll: check the clock and run the rollover when due.
    ///
    /// `previous_week` only advances after the new banner is posted, so any
    /// failure repeats the whole rollover on the next tick.
    async fn tick(&mut self, http: &Arc<Http>) -> Result<()> {
        let guild_id = match self.tracker.guild().await {
            Some(id) => id,
            None => {
                debug!("Schedule tick skipped: no guild known yet");
                return Ok(());
            }
        };

        let now = self.clock.now().await;
        let previous = self.tracker.previous_week().await;
        if !should_fire(now, previous) {
            return Ok(());
        }

        let week = now.iso_week();
        info!(
            "Weekly rollover firing for {}-W{:02}",
            week.year(),
            week.week()
        );

        // First Monday after a restart posts a fresh banner without a report
        if previous.is_some() {
            self.close_out(http, guild_id).await?;
        }

        let channel = self.config.channel();
        let message = channel
            .say(http, banner_text(now.date()))
            .await
            .context("Failed to post weekly attendance message")?;
        self.tracker.set_active_message(message.id).await;
        info!("Posted weekly attendance message {}", message.id);

        for day in self.config.week() {
            if let Err(e) = http
                .create_reaction(
                    self.config.channel_id,
                    message.id.0,
                    &self.config.reaction_for(day),
                )
                .await
            {
                warn!(
                    "Failed to seed {} reaction on weekly message: {e}",
                    day_label(day)
                );
            }
        }

        self.tracker.set_previous_week(week).await;
        Ok(())
    }

    /// Post last week's report and fold it into the cumulative totals.
    async fn close_out(&mut self, http: &Arc<Http>, guild_id: GuildId) -> Result<()> {
        // Fetch the roster before touching the files, so a REST failure
        // leaves the ledger intact for the retry
        let members = fetch_report_members(http, guild_id).await?;
        let close = take_or_close_out(&mut self.pending_close, &self.store).await?;

        let report = build_report(&close.ledger, &members);
        let channel = self.config.channel();
        for chunk in chunk_for_message(&report) {
            if let Err(e) = channel.say(http, chunk).await {
                // The fold already happened; stash the snapshot so the
                // retry reposts last week's counts, not the reset ledger
                self.pending_close = Some(close);
                return Err(e).context("Failed to post attendance report");
            }
        }

        info!(
            "Closed out week: report covers {} members, {} users in totals",
            members.len(),
            close.totals.len()
        );
        Ok(())
    }
}

/// The close-out snapshot for this rollover: a stashed one from a previous
/// failed attempt if present, otherwise a fresh fold-and-reset.
async fn take_or_close_out(
    pending: &mut Option<WeekClose>,
    store: &AttendanceStore,
) -> Result<WeekClose> {
    match pending.take() {
        Some(close) => {
            info!("Reusing close-out snapshot from a previously failed report post");
            Ok(close)
        }
        None => store.close_out_week().await,
    }
}

/// All non-bot guild members for the report, in the order Discord returns.
async fn fetch_report_members(http: &Arc<Http>, guild_id: GuildId) -> Result<Vec<ReportMember>> {
    let members = http
        .get_guild_members(guild_id.0, Some(1000), None)
        .await
        .context("Failed to fetch guild members for the attendance report")?;

    Ok(members
        .iter()
        .filter(|m| !m.user.bot)
        .map(|m| ReportMember {
            display_name: m.display_name().into_owned(),
            user_id: m.user.id.0,
        })
        .collect())
}

/// True when `now` is a Monday in an ISO week no banner was posted for.
fn should_fire(now: NaiveDateTime, previous: Option<IsoWeek>) -> bool {
    now.weekday() == Weekday::Mon && Some(now.iso_week()) != previous
}

/// The weekly banner: Monday's date through the following Sunday's.
fn banner_text(start: NaiveDate) -> String {
    let end = start + Duration::days(6);
    format!(
        "{}년 {}월 {}일 월요일 ~ {}년 {}월 {}일 일요일 출석체크",
        start.year(),
        start.month(),
        start.day(),
        end.year(),
        end.month(),
        end.day()
    )
}
