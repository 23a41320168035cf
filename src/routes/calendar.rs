// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar history routes: month views and manual day edits.

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{DailyLog, LogStatus};
use crate::routes::habits::owned_habit;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/habits/{id}/calendar", get(get_calendar))
        .route("/api/habits/{id}/logs", put(upsert_log))
}

// ─── Month View ──────────────────────────────────────────────

#[derive(Deserialize)]
struct CalendarQuery {
    year: i32,
    /// 1-based calendar month
    month: u32,
}

#[derive(Serialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub status: LogStatus,
    pub notes: String,
}

#[derive(Serialize)]
pub struct CalendarResponse {
    pub habit_id: Uuid,
    pub year: i32,
    pub month: u32,
    /// Logged days only; days without a log are untracked
    pub days: Vec<DayEntry>,
}

/// Get one month of a habit's daily logs.
async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(habit_id): Path<Uuid>,
    Query(params): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>> {
    let (start, end) = month_bounds(params.year, params.month)
        .ok_or_else(|| AppError::BadRequest("Invalid year/month".to_string()))?;

    owned_habit(&state, user.user_id, habit_id).await?;

    let logs = state.db.logs_in_range(habit_id, start, end).await?;

    let days = logs
        .into_iter()
        .map(|log| DayEntry {
            date: log.date,
            status: log.status,
            notes: log.notes,
        })
        .collect();

    Ok(Json(CalendarResponse {
        habit_id,
        year: params.year,
        month: params.month,
        days,
    }))
}

/// First and last day of a calendar month.
fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, next_month.pred_opt()?))
}

// ─── Manual Day Edit ─────────────────────────────────────────

#[derive(Deserialize)]
struct LogEditRequest {
    date: NaiveDate,
    status: LogStatus,
    #[serde(default)]
    notes: String,
}

/// Set a day's status and notes by hand.
///
/// Writes land on the same (habit, date) key as auto-logged statuses, so the
/// last write wins either way.
async fn upsert_log(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(habit_id): Path<Uuid>,
    Json(payload): Json<LogEditRequest>,
) -> Result<Json<DailyLog>> {
    owned_habit(&state, user.user_id, habit_id).await?;

    let log = DailyLog {
        habit_id,
        user_id: user.user_id,
        date: payload.date,
        status: payload.status,
        notes: payload.notes,
    };
    state.db.upsert_log(&log).await?;

    tracing::debug!(
        user_id = %user.user_id,
        habit_id = %habit_id,
        date = %payload.date,
        status = ?payload.status,
        "Daily log edited"
    );

    Ok(Json(log))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds_regular_month() {
        let (start, end) = month_bounds(2026, 3).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());
    }

    #[test]
    fn test_month_bounds_december_rolls_year() {
        let (start, end) = month_bounds(2026, 12).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn test_month_bounds_leap_february() {
        let (_, end) = month_bounds(2028, 2).unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn test_month_bounds_rejects_bad_month() {
        assert!(month_bounds(2026, 0).is_none());
        assert!(month_bounds(2026, 13).is_none());
    }
}
