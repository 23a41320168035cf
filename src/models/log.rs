//! Daily log model: the outcome of a single habit on a single calendar day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a habit on a given day.
///
/// Written automatically when a habit is scored (derived from the new streak
/// level) or set explicitly through the day editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    /// Successful day
    Positive,
    /// Partial / difficult day (neutral streak)
    Partial,
    /// Missed / failed day
    Negative,
    /// No data for the day (explicit reset)
    Untracked,
}

/// Per-day, per-habit record. At most one log exists per (habit, date) pair;
/// the document ID encodes that key so writes are upserts and the last write
/// wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLog {
    pub habit_id: Uuid,
    pub user_id: Uuid,
    /// Calendar date, date-only, no time component
    pub date: NaiveDate,
    pub status: LogStatus,
    /// Free-text reflection
    #[serde(default)]
    pub notes: String,
}

impl DailyLog {
    /// Document ID for the (habit, date) upsert key.
    pub fn doc_id(habit_id: Uuid, date: NaiveDate) -> String {
        format!("{}_{}", habit_id, date)
    }
}
