//! Seasonal story models.
//!
//! Stories are narrative quest chains tied to the calendar season. Each part
//! unlocks when the previous part is completed.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Calendar season, derived from the current month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Season for a 1-based calendar month.
    pub fn for_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Autumn,
        }
    }

    /// Season of today's local date.
    pub fn current() -> Self {
        Self::for_month(chrono::Local::now().month())
    }

    /// Label as stored on story documents.
    pub fn label(&self) -> &'static str {
        match self {
            Season::Winter => "Winter (Dec–Feb)",
            Season::Spring => "Spring (Mar–May)",
            Season::Summer => "Summer (Jun–Aug)",
            Season::Autumn => "Autumn (Sep–Nov)",
        }
    }
}

/// One part of a seasonal quest chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalStory {
    /// Story ID (also used as document ID)
    pub id: String,
    pub title: String,
    pub intro_text: String,
    /// Season label this part belongs to
    pub season: String,
    /// Position within the chain, 1-based
    pub part_number: i32,
    /// How many of the required item complete this part
    pub required_items_count: i32,
    pub required_item_name: String,
    pub is_active: bool,
    pub quest_image: Option<String>,
}

/// Per-user progress through one story part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryProgress {
    pub user_id: Uuid,
    pub story_id: String,
    pub current_count: i32,
    pub is_completed: bool,
    pub is_paused: bool,
}

impl StoryProgress {
    pub fn new(user_id: Uuid, story_id: &str) -> Self {
        Self {
            user_id,
            story_id: story_id.to_string(),
            current_count: 0,
            is_completed: false,
            is_paused: false,
        }
    }

    /// Document ID for the (user, story) upsert key.
    pub fn doc_id(user_id: Uuid, story_id: &str) -> String {
        format!("{}_{}", user_id, story_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_for_month_boundaries() {
        assert_eq!(Season::for_month(12), Season::Winter);
        assert_eq!(Season::for_month(1), Season::Winter);
        assert_eq!(Season::for_month(2), Season::Winter);
        assert_eq!(Season::for_month(3), Season::Spring);
        assert_eq!(Season::for_month(5), Season::Spring);
        assert_eq!(Season::for_month(6), Season::Summer);
        assert_eq!(Season::for_month(8), Season::Summer);
        assert_eq!(Season::for_month(9), Season::Autumn);
        assert_eq!(Season::for_month(11), Season::Autumn);
    }

    #[test]
    fn test_new_progress_starts_at_zero() {
        let progress = StoryProgress::new(Uuid::new_v4(), "winter-1");
        assert_eq!(progress.current_count, 0);
        assert!(!progress.is_completed);
        assert!(!progress.is_paused);
    }
}
