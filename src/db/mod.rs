//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const PROFILES: &str = "profiles";
    pub const HABITS: &str = "habits";
    /// Daily logs (keyed by `{habit_id}_{date}`)
    pub const DAILY_LOGS: &str = "daily_logs";
    /// Item catalog, shared by all players
    pub const ITEMS: &str = "items";
    pub const INVENTORY: &str = "inventory";
    pub const SEASONAL_STORIES: &str = "seasonal_stories";
    /// Story progress (keyed by `{user_id}_{story_id}`)
    pub const STORY_PROGRESS: &str = "story_progress";
    /// Achievement statuses (keyed by `{user_id}_{achievement_id}`)
    pub const USER_ACHIEVEMENTS: &str = "user_achievements";
}
