// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Profiles (player resource pools)
//! - Habits and their daily logs
//! - Item catalog and per-user inventory
//! - Seasonal stories, story progress, and achievement statuses

use chrono::NaiveDate;
use futures_util::{stream, StreamExt};
use uuid::Uuid;

use crate::db::collections;
use crate::error::AppError;
use crate::models::{
    DailyLog, Habit, InventoryEntry, ItemDefinition, Profile, SeasonalStory, StoryProgress,
    UserAchievement,
};

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a profile by user ID.
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PROFILES)
            .obj()
            .one(user_id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a profile.
    pub async fn upsert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PROFILES)
            .document_id(profile.user_id.to_string())
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Habit Operations ────────────────────────────────────────

    /// Get a habit by ID.
    pub async fn get_habit(&self, habit_id: Uuid) -> Result<Option<Habit>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::HABITS)
            .obj()
            .one(habit_id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all habits for a user, newest first.
    pub async fn habits_for_user(&self, user_id: Uuid) -> Result<Vec<Habit>, AppError> {
        let uid = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::HABITS)
            .filter(move |q| q.for_all([q.field("user_id").eq(uid.clone())]))
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a habit.
    pub async fn upsert_habit(&self, habit: &Habit) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::HABITS)
            .document_id(habit.id.to_string())
            .object(habit)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a habit and all of its daily logs.
    ///
    /// Log deletions run concurrently with a limit to avoid overloading
    /// Firestore. Returns the number of logs removed.
    pub async fn delete_habit(&self, habit_id: Uuid) -> Result<usize, AppError> {
        let client = self.get_client()?;

        let hid = habit_id.to_string();
        let logs: Vec<DailyLog> = client
            .fluent()
            .select()
            .from(collections::DAILY_LOGS)
            .filter(move |q| q.for_all([q.field("habit_id").eq(hid.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let removed = logs.len();

        stream::iter(logs)
            .map(|log| async move {
                self.get_client()?
                    .fluent()
                    .delete()
                    .from(collections::DAILY_LOGS)
                    .document_id(DailyLog::doc_id(log.habit_id, log.date))
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok::<_, AppError>(())
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        client
            .fluent()
            .delete()
            .from(collections::HABITS)
            .document_id(habit_id.to_string())
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(habit_id = %habit_id, removed, "Habit and logs deleted");

        Ok(removed)
    }

    // ─── Daily Log Operations ────────────────────────────────────

    /// Get the log for one (habit, date) pair.
    pub async fn get_log(
        &self,
        habit_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DailyLog>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::DAILY_LOGS)
            .obj()
            .one(DailyLog::doc_id(habit_id, date))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or overwrite the log for a (habit, date) pair.
    pub async fn upsert_log(&self, log: &DailyLog) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::DAILY_LOGS)
            .document_id(DailyLog::doc_id(log.habit_id, log.date))
            .object(log)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get a habit's logs within an inclusive date range, oldest first.
    ///
    /// Dates are stored as `YYYY-MM-DD` strings, so lexicographic range
    /// filters match chronological order.
    pub async fn logs_in_range(
        &self,
        habit_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyLog>, AppError> {
        let hid = habit_id.to_string();
        let start = start.to_string();
        let end = end.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::DAILY_LOGS)
            .filter(move |q| {
                q.for_all([
                    q.field("habit_id").eq(hid.clone()),
                    q.field("date").greater_than_or_equal(start.clone()),
                    q.field("date").less_than_or_equal(end.clone()),
                ])
            })
            .order_by([("date", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Item Catalog Operations ─────────────────────────────────

    /// Get a catalog item by ID.
    pub async fn get_item(&self, item_id: Uuid) -> Result<Option<ItemDefinition>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ITEMS)
            .obj()
            .one(item_id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all catalog items currently offered in the market.
    pub async fn market_items(&self) -> Result<Vec<ItemDefinition>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ITEMS)
            .filter(|q| q.for_all([q.field("in_market").eq(true)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the full item catalog.
    pub async fn all_items(&self) -> Result<Vec<ItemDefinition>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ITEMS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Inventory Operations ────────────────────────────────────

    /// Get an inventory entry by ID.
    pub async fn get_inventory_entry(
        &self,
        entry_id: Uuid,
    ) -> Result<Option<InventoryEntry>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::INVENTORY)
            .obj()
            .one(entry_id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all inventory entries for a user.
    pub async fn inventory_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<InventoryEntry>, AppError> {
        let uid = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::INVENTORY)
            .filter(move |q| q.for_all([q.field("user_id").eq(uid.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update an inventory entry.
    pub async fn upsert_inventory_entry(&self, entry: &InventoryEntry) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::INVENTORY)
            .document_id(entry.id.to_string())
            .object(entry)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete an inventory entry (sale or consumption).
    pub async fn delete_inventory_entry(&self, entry_id: Uuid) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::INVENTORY)
            .document_id(entry_id.to_string())
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Seasonal Story Operations ───────────────────────────────

    /// Get active stories for a season, ordered by part number.
    pub async fn stories_for_season(
        &self,
        season_label: &str,
    ) -> Result<Vec<SeasonalStory>, AppError> {
        let season = season_label.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::SEASONAL_STORIES)
            .filter(move |q| {
                q.for_all([
                    q.field("season").eq(season.clone()),
                    q.field("is_active").eq(true),
                ])
            })
            .order_by([(
                "part_number",
                firestore::FirestoreQueryDirection::Ascending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a story by ID.
    pub async fn get_story(&self, story_id: &str) -> Result<Option<SeasonalStory>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::SEASONAL_STORIES)
            .obj()
            .one(story_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all story progress rows for a user.
    pub async fn story_progress_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<StoryProgress>, AppError> {
        let uid = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::STORY_PROGRESS)
            .filter(move |q| q.for_all([q.field("user_id").eq(uid.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a story progress row.
    pub async fn upsert_story_progress(&self, progress: &StoryProgress) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::STORY_PROGRESS)
            .document_id(StoryProgress::doc_id(progress.user_id, &progress.story_id))
            .object(progress)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Achievement Operations ──────────────────────────────────

    /// Get all achievement statuses for a user.
    pub async fn achievements_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserAchievement>, AppError> {
        let uid = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USER_ACHIEVEMENTS)
            .filter(move |q| q.for_all([q.field("user_id").eq(uid.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Record an achievement status for a user.
    pub async fn upsert_achievement(&self, status: &UserAchievement) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USER_ACHIEVEMENTS)
            .document_id(UserAchievement::doc_id(
                status.user_id,
                &status.achievement_id,
            ))
            .object(status)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
