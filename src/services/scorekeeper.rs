// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Habit scoring workflow.
//!
//! Runs the pure calculator, then persists its outputs:
//! 1. Habit streak update
//! 2. Profile stats update
//! 3. Daily log upsert for the scored date
//!
//! The three writes are sequential and independent. There is no transaction
//! or rollback: the first failure aborts the remaining writes and earlier
//! writes stay in place. The calculator itself cannot fail.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::achievement::{ids, STEADY_FLAME_STREAK};
use crate::models::{DailyLog, Habit, Profile};
use crate::scoring::{self, Direction};
use crate::services::achievements;

/// Scoring workflow over the document store.
#[derive(Clone)]
pub struct Scorekeeper {
    db: FirestoreDb,
}

/// Persisted result of a score press.
#[derive(Debug, Clone)]
pub struct ScoreRecord {
    pub habit: Habit,
    pub profile: Profile,
    pub log: DailyLog,
}

impl Scorekeeper {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Score one press on a habit owned by `user_id` and persist the results.
    ///
    /// `date` is the calendar day the log is written for (normally today from
    /// the caller's point of view).
    pub async fn score_habit(
        &self,
        user_id: Uuid,
        habit_id: Uuid,
        direction: Direction,
        date: NaiveDate,
    ) -> Result<ScoreRecord> {
        let mut habit = self
            .db
            .get_habit(habit_id)
            .await?
            .filter(|h| h.user_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("Habit {} not found", habit_id)))?;

        if !habit.tracks(direction) {
            return Err(AppError::BadRequest(format!(
                "Habit does not track {} presses",
                match direction {
                    Direction::Up => "positive",
                    Direction::Down => "negative",
                }
            )));
        }

        let mut profile = self
            .db
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user_id)))?;

        let outcome = scoring::score(&habit, direction);
        habit.streak_level = outcome.streak_level;
        profile.apply(outcome.delta);

        // Carry over notes from an existing log for the day; scoring only
        // owns the status.
        let notes = self
            .db
            .get_log(habit_id, date)
            .await?
            .map(|log| log.notes)
            .unwrap_or_default();

        let log = DailyLog {
            habit_id,
            user_id,
            date,
            status: outcome.log_status,
            notes,
        };

        self.db.upsert_habit(&habit).await?;
        self.db.upsert_profile(&profile).await?;
        self.db.upsert_log(&log).await?;

        tracing::info!(
            user_id = %user_id,
            habit_id = %habit_id,
            direction = ?direction,
            streak_level = habit.streak_level,
            health_change = outcome.delta.health,
            energeia_change = outcome.delta.energeia,
            "Habit scored"
        );

        if habit.streak_level >= STEADY_FLAME_STREAK {
            achievements::grant(&self.db, user_id, ids::STEADY_FLAME).await;
        }

        Ok(ScoreRecord {
            habit,
            profile,
            log,
        })
    }
}
