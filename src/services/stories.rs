// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Seasonal story workflows.
//!
//! Stories are listed for the current season only. A part is locked until the
//! previous part is completed. The first time a user looks at a season with
//! no progress at all, progress for part 1 is initialized automatically.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Season, SeasonalStory, StoryProgress};

/// Story operations over the document store.
#[derive(Clone)]
pub struct StoryService {
    db: FirestoreDb,
}

/// One story part combined with the user's progress and lock state.
#[derive(Debug, Clone, Serialize)]
pub struct StoryNode {
    pub story: SeasonalStory,
    pub progress: Option<StoryProgress>,
    pub locked: bool,
}

impl StoryService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// The current season's active story chain with the user's progress.
    pub async fn season_overview(&self, user_id: Uuid) -> Result<Vec<StoryNode>> {
        let season = Season::current();
        let stories = self.db.stories_for_season(season.label()).await?;

        let mut progress: HashMap<String, StoryProgress> = self
            .db
            .story_progress_for_user(user_id)
            .await?
            .into_iter()
            .map(|p| (p.story_id.clone(), p))
            .collect();

        // First look at a season with no progress at all: start part 1.
        if let Some(first) = stories.first() {
            if progress.is_empty() {
                let fresh = StoryProgress::new(user_id, &first.id);
                self.db.upsert_story_progress(&fresh).await?;
                tracing::info!(
                    user_id = %user_id,
                    story_id = %first.id,
                    "Initialized story progress"
                );
                progress.insert(first.id.clone(), fresh);
            }
        }

        Ok(assemble_nodes(stories, &progress))
    }

    /// Pause or resume a story the user has progress on.
    pub async fn toggle_pause(&self, user_id: Uuid, story_id: &str) -> Result<StoryProgress> {
        // The story must exist; progress is keyed per user.
        self.db
            .get_story(story_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Story {} not found", story_id)))?;

        let mut progress = self
            .db
            .story_progress_for_user(user_id)
            .await?
            .into_iter()
            .find(|p| p.story_id == story_id)
            .ok_or_else(|| {
                AppError::BadRequest("No progress on this story yet".to_string())
            })?;

        progress.is_paused = !progress.is_paused;
        self.db.upsert_story_progress(&progress).await?;

        tracing::info!(
            user_id = %user_id,
            story_id,
            paused = progress.is_paused,
            "Story pause toggled"
        );

        Ok(progress)
    }
}

/// Combine a season's story chain with per-user progress. A part is locked if
/// it is not the first and the previous part is not completed.
fn assemble_nodes(
    stories: Vec<SeasonalStory>,
    progress: &HashMap<String, StoryProgress>,
) -> Vec<StoryNode> {
    let mut nodes: Vec<StoryNode> = Vec::with_capacity(stories.len());

    for (index, story) in stories.into_iter().enumerate() {
        let locked = index > 0
            && !nodes[index - 1]
                .progress
                .as_ref()
                .is_some_and(|p| p.is_completed);

        nodes.push(StoryNode {
            progress: progress.get(&story.id).cloned(),
            locked,
            story,
        });
    }

    nodes
}
