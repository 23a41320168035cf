// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Seasonal story routes.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::StoryProgress;
use crate::services::stories::StoryNode;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/stories", get(get_stories))
        .route("/api/stories/{id}/pause", post(toggle_pause))
}

#[derive(Serialize)]
pub struct StoriesResponse {
    pub stories: Vec<StoryNode>,
}

/// The current season's story chain with the user's progress.
async fn get_stories(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<StoriesResponse>> {
    let stories = state.stories.season_overview(user.user_id).await?;
    Ok(Json(StoriesResponse { stories }))
}

/// Pause or resume a story.
async fn toggle_pause(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(story_id): Path<String>,
) -> Result<Json<StoryProgress>> {
    let progress = state.stories.toggle_pause(user.user_id, &story_id).await?;
    Ok(Json(progress))
}
