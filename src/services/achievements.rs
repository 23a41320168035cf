// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Achievement awarding.

use uuid::Uuid;

use crate::db::FirestoreDb;
use crate::models::{achievement, UserAchievement};

/// Record an achievement for a user.
///
/// Failures are logged and swallowed: an award can never fail the operation
/// that earned it. Awarding is idempotent (the status row is keyed by
/// (user, achievement)).
pub async fn grant(db: &FirestoreDb, user_id: Uuid, achievement_id: &str) {
    if achievement::find(achievement_id).is_none() {
        tracing::warn!(achievement_id, "Unknown achievement ID, not granting");
        return;
    }

    let now = chrono::Utc::now().to_rfc3339();
    let status = UserAchievement::new(user_id, achievement_id, &now);

    match db.upsert_achievement(&status).await {
        Ok(()) => {
            tracing::info!(user_id = %user_id, achievement_id, "Achievement granted");
        }
        Err(e) => {
            tracing::warn!(user_id = %user_id, achievement_id, error = %e, "Failed to grant achievement");
        }
    }
}
