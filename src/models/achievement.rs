//! Achievement catalog and per-user statuses.
//!
//! The catalog is static; only the per-user status rows live in the store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Achievement IDs used by the award hooks.
pub mod ids {
    pub const FIRST_HABIT: &str = "first_habit";
    pub const FIRST_ITEM: &str = "first_item";
    pub const ALL_ITEMS: &str = "all_items";
    pub const STEADY_FLAME: &str = "steady_flame";
}

/// Streak level that earns [`ids::STEADY_FLAME`].
pub const STEADY_FLAME_STREAK: i32 = 7;

/// A static catalog entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Full list of achievements, in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDefinition] = &[
    AchievementDefinition {
        id: ids::FIRST_HABIT,
        title: "Take the First Vow",
        description: "Define your first habit. Every discipline begins with a single rule.",
    },
    AchievementDefinition {
        id: ids::FIRST_ITEM,
        title: "First Possession",
        description: "Purchase your first item. Don't forget to equip it to benefit from its use!",
    },
    AchievementDefinition {
        id: ids::ALL_ITEMS,
        title: "Collect All Items",
        description: "You have been busy! Enough books and ink for a small library!",
    },
    AchievementDefinition {
        id: ids::STEADY_FLAME,
        title: "Steady Flame",
        description: "Keep a habit streak burning for seven presses in a row.",
    },
];

/// Look up a catalog entry by ID.
pub fn find(id: &str) -> Option<&'static AchievementDefinition> {
    ALL_ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Per-user achievement status stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAchievement {
    pub user_id: Uuid,
    pub achievement_id: String,
    pub is_achieved: bool,
    /// When the achievement unlocked (ISO 8601)
    pub achieved_at: String,
}

impl UserAchievement {
    pub fn new(user_id: Uuid, achievement_id: &str, achieved_at: &str) -> Self {
        Self {
            user_id,
            achievement_id: achievement_id.to_string(),
            is_achieved: true,
            achieved_at: achieved_at.to_string(),
        }
    }

    /// Document ID for the (user, achievement) upsert key.
    pub fn doc_id(user_id: Uuid, achievement_id: &str) -> String {
        format!("{}_{}", user_id, achievement_id)
    }
}
