//! Guarded flat-file persistence for attendance data
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add cumulative totals file folded in at week close-out
//! - 1.0.0: Initial creation with weekly ledger read-modify-write

use anyhow::{Context, Result};
use chrono::Weekday;
use log::warn;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::ledger::WeekLedger;

/// Cumulative per-user attended-day counts across completed weeks.
pub type Totals = BTreeMap<u64, u64>;

/// Snapshot returned by [`AttendanceStore::close_out_week`]: the ledger as it
/// stood before the reset, and the totals after folding it in.
#[derive(Debug, Clone)]
pub struct WeekClose {
    pub ledger: WeekLedger,
    pub totals: Totals,
}

/// Flat-file attendance storage.
///
/// Two JSON files: the weekly ledger and the cumulative totals. One mutex
/// guards every read-modify-write, so a check-in can never interleave with
/// the week close-out. Cheap to clone; all clones share the lock.
#[derive(Clone)]
pub struct AttendanceStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    ledger_path: PathBuf,
    totals_path: PathBuf,
    lock: Mutex<()>,
}

impl AttendanceStore {
    pub fn new(ledger_path: impl Into<PathBuf>, totals_path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                ledger_path: ledger_path.into(),
                totals_path: totals_path.into(),
                lock: Mutex::new(()),
            }),
        }
    }

    /// Create either file with an empty document when missing.
    ///
    /// Called once at `ready` so the first check-in never races file creation.
    pub async fn ensure_initialized(&self) -> Result<()> {
        let _guard = self.inner.lock.lock().await;
        if !self.inner.ledger_path.exists() {
            self.write_ledger(&WeekLedger::default())?;
        }
        if !self.inner.totals_path.exists() {
            self.write_totals(&Totals::new())?;
        }
        Ok(())
    }

    /// Read the current week's ledger.
    ///
    /// A missing file is initialized empty; a corrupt file is logged,
    /// rewritten empty, and the empty ledger returned.
    pub async fn load_week(&self) -> Result<WeekLedger> {
        let _guard = self.inner.lock.lock().await;
        self.read_ledger()
    }

    /// Read the cumulative totals, with the same recovery rules as the ledger.
    pub async fn load_totals(&self) -> Result<Totals> {
        let _guard = self.inner.lock.lock().await;
        self.read_totals()
    }

    /// Record a check-in for `user_id` on `day`.
    ///
    /// Returns `true` when the ledger changed, `false` for a duplicate
    /// same-day check-in.
    pub async fn record_check_in(&self, day: Weekday, user_id: u64) -> Result<bool> {
        let _guard = self.inner.lock.lock().await;
        let mut ledger = self.read_ledger()?;
        let entries = ledger.day_mut(day);
        if entries.contains(&user_id) {
            return Ok(false);
        }
        entries.push(user_id);
        self.write_ledger(&ledger)?;
        Ok(true)
    }

    /// Close out the week: fold the ledger into the totals, persist the
    /// totals, and reset the ledger, all in one critical section.
    ///
    /// No check-in can land between the tally and the reset; the returned
    /// snapshot is exactly what was folded in.
    pub async fn close_out_week(&self) -> Result<WeekClose> {
        let _guard = self.inner.lock.lock().await;
        let ledger = self.read_ledger()?;
        let mut totals = self.read_totals()?;
        for (user_id, days) in ledger.tally() {
            *totals.entry(user_id).or_insert(0) += days;
        }
        self.write_totals(&totals)?;
        self.write_ledger(&WeekLedger::default())?;
        Ok(WeekClose { ledger, totals })
    }

    // The helpers below assume the caller holds `lock`.

    fn read_ledger(&self) -> Result<WeekLedger> {
        match read_json(&self.inner.ledger_path)? {
            ReadOutcome::Ok(ledger) => Ok(ledger),
            ReadOutcome::Missing => {
                let ledger = WeekLedger::default();
                self.write_ledger(&ledger)?;
                Ok(ledger)
            }
            ReadOutcome::Corrupt(e) => {
                warn!(
                    "Attendance ledger at {} is corrupt ({e}), reinitializing empty",
                    self.inner.ledger_path.display()
                );
                let ledger = WeekLedger::default();
                self.write_ledger(&ledger)?;
                Ok(ledger)
            }
        }
    }

    fn write_ledger(&self, ledger: &WeekLedger) -> Result<()> {
        write_json(&self.inner.ledger_path, ledger)
    }

    fn read_totals(&self) -> Result<Totals> {
        match read_json(&self.inner.totals_path)? {
            ReadOutcome::Ok(totals) => Ok(totals),
            ReadOutcome::Missing => {
                let totals = Totals::new();
                self.write_totals(&totals)?;
                Ok(totals)
            }
            ReadOutcome::Corrupt(e) => {
                warn!(
                    "Attendance totals at {} are corrupt ({e}), reinitializing empty",
                    self.inner.totals_path.display()
                );
                let totals = Totals::new();
                self.write_totals(&totals)?;
                Ok(totals)
            }
        }
    }

    fn write_totals(&self, totals: &Totals) -> Result<()> {
        write_json(&self.inner.totals_path, totals)
    }
}

enum ReadOutcome<T> {
    Ok(T),
    Missing,
    Corrupt(serde_json::Error),
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<ReadOutcome<T>> {
    if !path.exists() {
        return Ok(ReadOutcome::Missing);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    match serde_json::from_str(&text) {
        Ok(value) => Ok(ReadOutcome::Ok(value)),
        Err(e) => Ok(ReadOutcome::Corrupt(e)),
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}
