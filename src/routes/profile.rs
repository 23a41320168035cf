// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile and achievement routes for authenticated users.

use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Profile, ALL_ACHIEVEMENTS};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/achievements", get(get_achievements))
}

/// Get the current user's profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Profile>> {
    let profile = state.db.get_profile(user.user_id).await?.ok_or_else(|| {
        crate::error::AppError::NotFound(format!("Profile {} not found", user.user_id))
    })?;

    Ok(Json(profile))
}

// ─── Achievements ────────────────────────────────────────────

#[derive(Serialize)]
pub struct AchievementStatus {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub is_achieved: bool,
    pub achieved_at: Option<String>,
}

#[derive(Serialize)]
pub struct AchievementsResponse {
    pub achievements: Vec<AchievementStatus>,
}

/// Full achievement catalog merged with the user's statuses.
async fn get_achievements(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<AchievementsResponse>> {
    let statuses: HashMap<String, String> = state
        .db
        .achievements_for_user(user.user_id)
        .await?
        .into_iter()
        .filter(|s| s.is_achieved)
        .map(|s| (s.achievement_id, s.achieved_at))
        .collect();

    let achievements = ALL_ACHIEVEMENTS
        .iter()
        .map(|def| {
            let achieved_at = statuses.get(def.id).cloned();
            AchievementStatus {
                id: def.id,
                title: def.title,
                description: def.description,
                is_achieved: achieved_at.is_some(),
                achieved_at,
            }
        })
        .collect();

    Ok(Json(AchievementsResponse { achievements }))
}
