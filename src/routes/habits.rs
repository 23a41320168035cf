// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Habit CRUD and scoring routes.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::achievement::ids;
use crate::models::{DailyLog, Habit, Profile};
use crate::scoring::Direction;
use crate::services::achievements;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/habits", get(list_habits))
        .route("/api/habits", post(create_habit))
        .route("/api/habits/{id}", put(update_habit))
        .route("/api/habits/{id}", delete(delete_habit))
        .route("/api/habits/{id}/score", post(score_habit))
}

/// Fetch a habit and check it belongs to the user. Foreign habits look like
/// missing ones.
pub(crate) async fn owned_habit(
    state: &AppState,
    user_id: Uuid,
    habit_id: Uuid,
) -> Result<Habit> {
    state
        .db
        .get_habit(habit_id)
        .await?
        .filter(|h| h.user_id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("Habit {} not found", habit_id)))
}

// ─── CRUD ────────────────────────────────────────────────────

/// Get all habits for the current user, newest first.
async fn list_habits(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Habit>>> {
    let habits = state.db.habits_for_user(user.user_id).await?;
    Ok(Json(habits))
}

/// Editable habit fields, shared by create and update.
#[derive(Deserialize, Validate)]
pub struct HabitPayload {
    #[validate(length(max = 200, message = "title must be at most 200 characters"))]
    title: String,
    #[serde(default)]
    tracks_positive: bool,
    #[serde(default)]
    tracks_negative: bool,
    #[validate(range(min = 1, max = 10, message = "difficulty must be between 1 and 10"))]
    difficulty: i32,
}

impl HabitPayload {
    /// Edit-time validation. Scoring clamps difficulty instead of rejecting,
    /// but the editor holds the stricter line.
    fn checked_title(&self) -> Result<String> {
        self.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::BadRequest(
                "Habit title cannot be empty".to_string(),
            ));
        }
        if !self.tracks_positive && !self.tracks_negative {
            return Err(AppError::BadRequest(
                "A habit must be positive, negative, or both".to_string(),
            ));
        }

        Ok(title.to_string())
    }
}

/// Create a habit.
async fn create_habit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<HabitPayload>,
) -> Result<Json<Habit>> {
    let title = payload.checked_title()?;

    let now = chrono::Utc::now().to_rfc3339();
    let habit = Habit::new(
        user.user_id,
        title,
        payload.tracks_positive,
        payload.tracks_negative,
        payload.difficulty,
        &now,
    );
    state.db.upsert_habit(&habit).await?;

    tracing::info!(user_id = %user.user_id, habit_id = %habit.id, "Habit created");

    achievements::grant(&state.db, user.user_id, ids::FIRST_HABIT).await;

    Ok(Json(habit))
}

/// Update a habit's editable fields. The streak is owned by scoring and is
/// left untouched.
async fn update_habit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(habit_id): Path<Uuid>,
    Json(payload): Json<HabitPayload>,
) -> Result<Json<Habit>> {
    let title = payload.checked_title()?;

    let mut habit = owned_habit(&state, user.user_id, habit_id).await?;
    habit.title = title;
    habit.tracks_positive = payload.tracks_positive;
    habit.tracks_negative = payload.tracks_negative;
    habit.difficulty = payload.difficulty;

    state.db.upsert_habit(&habit).await?;

    Ok(Json(habit))
}

#[derive(Serialize)]
pub struct DeleteHabitResponse {
    pub success: bool,
    pub removed_logs: usize,
}

/// Delete a habit and its daily logs.
async fn delete_habit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(habit_id): Path<Uuid>,
) -> Result<Json<DeleteHabitResponse>> {
    owned_habit(&state, user.user_id, habit_id).await?;

    let removed_logs = state.db.delete_habit(habit_id).await?;

    tracing::info!(
        user_id = %user.user_id,
        habit_id = %habit_id,
        removed_logs,
        "Habit deleted"
    );

    Ok(Json(DeleteHabitResponse {
        success: true,
        removed_logs,
    }))
}

// ─── Scoring ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct ScoreRequest {
    direction: Direction,
    /// Calendar day to log; the server's local date when omitted
    date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct ScoreResponse {
    pub habit: Habit,
    pub profile: Profile,
    pub log: DailyLog,
}

/// Score a "+" or "-" press on a habit.
async fn score_habit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(habit_id): Path<Uuid>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>> {
    let date = payload
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let record = state
        .scorekeeper
        .score_habit(user.user_id, habit_id, payload.direction, date)
        .await?;

    Ok(Json(ScoreResponse {
        habit: record.habit,
        profile: record.profile,
        log: record.log,
    }))
}
