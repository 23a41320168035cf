//! Habit model for storage and API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::Direction;

/// A trackable habit stored in Firestore.
///
/// A habit may be scored up, down, or both; at least one of the two flags
/// must be set, enforced when the habit is created or edited (never when it
/// is scored).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    /// Habit ID (also used as document ID)
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    pub title: String,
    /// Whether the "+" control is offered
    pub tracks_positive: bool,
    /// Whether the "-" control is offered
    pub tracks_negative: bool,
    /// Effort rating, 1-10
    pub difficulty: i32,
    /// Signed streak counter; negative values floor at -3
    pub streak_level: i32,
    /// When the habit was created (ISO 8601)
    pub created_at: String,
}

impl Habit {
    pub fn new(
        user_id: Uuid,
        title: String,
        tracks_positive: bool,
        tracks_negative: bool,
        difficulty: i32,
        created_at: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            tracks_positive,
            tracks_negative,
            difficulty,
            streak_level: 0,
            created_at: created_at.to_string(),
        }
    }

    /// Whether this habit accepts presses in the given direction.
    pub fn tracks(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.tracks_positive,
            Direction::Down => self.tracks_negative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_matches_flags() {
        let habit = Habit::new(
            Uuid::new_v4(),
            "Morning prayer".to_string(),
            true,
            false,
            3,
            "2026-01-15T10:00:00Z",
        );

        assert!(habit.tracks(Direction::Up));
        assert!(!habit.tracks(Direction::Down));
        assert_eq!(habit.streak_level, 0);
    }
}
