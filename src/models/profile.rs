//! Player profile model for storage and API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::StatDelta;

/// Starting pool sizes for a fresh profile.
pub const STARTING_MAX_HEALTH: i32 = 100;
pub const STARTING_MAX_ENERGEIA: i32 = 100;

/// Sprite shown until the player equips something better.
const DEFAULT_CHARACTER_IMAGE: &str = "sprites/characters/monk/novice-monk-male.png";

/// Player profile stored in Firestore.
///
/// Invariant: `0 <= current_health <= max_health` and
/// `0 <= current_energeia <= max_energeia` after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Auth user ID (also used as document ID)
    pub user_id: Uuid,
    /// Generated display name
    pub username: String,
    pub current_health: i32,
    pub max_health: i32,
    /// Energeia is the spendable currency
    pub current_energeia: i32,
    pub max_energeia: i32,
    /// Path or URL of the character sprite
    pub character_image_path: String,
    /// When the profile was created (ISO 8601)
    pub created_at: String,
}

impl Profile {
    /// Create a fresh profile with default pools and a generated username.
    pub fn new(user_id: Uuid, created_at: &str) -> Self {
        let short_id = user_id.simple().to_string();
        Self {
            user_id,
            username: format!("Novice-{}", &short_id[..4]),
            current_health: STARTING_MAX_HEALTH,
            max_health: STARTING_MAX_HEALTH,
            current_energeia: 0,
            max_energeia: STARTING_MAX_ENERGEIA,
            character_image_path: DEFAULT_CHARACTER_IMAGE.to_string(),
            created_at: created_at.to_string(),
        }
    }

    /// Apply a stat change, clamping both pools into their valid ranges.
    pub fn apply(&mut self, delta: StatDelta) {
        self.current_health = (self.current_health + delta.health).clamp(0, self.max_health);
        self.current_energeia =
            (self.current_energeia + delta.energeia).clamp(0, self.max_energeia);
    }
}
