//! Item catalog and inventory models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happens when an item is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// One-shot: applies its bonus and is destroyed
    Consumable,
    /// Toggles on/off and stays in the inventory
    Equippable,
}

/// Which pool an item's bonus feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BonusStat {
    Energeia,
    Health,
    Defense,
}

/// Catalog entry, shared by all players.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Item ID (also used as document ID)
    pub id: Uuid,
    pub name: String,
    /// Short in-world blurb
    pub flavor_text: String,
    /// What the item actually does
    pub description: String,
    /// Market price in energeia
    pub base_energeia_cost: i32,
    pub kind: ItemKind,
    pub bonus_stat: BonusStat,
    pub bonus_value: i32,
    /// Unique items disappear from the market once owned
    pub is_unique: bool,
    /// Whether the item is currently purchasable
    pub in_market: bool,
    /// Sprite path or URL
    pub image_path: Option<String>,
}

impl ItemDefinition {
    /// Items sell back for half their purchase price, rounded down.
    pub fn sell_price(&self) -> i32 {
        self.base_energeia_cost / 2
    }
}

/// A single owned item instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// Inventory row ID (also used as document ID)
    pub id: Uuid,
    pub user_id: Uuid,
    /// Catalog item this row is an instance of
    pub item_id: Uuid,
    pub is_equipped: bool,
    /// When the item was acquired (ISO 8601)
    pub acquired_at: String,
}

impl InventoryEntry {
    pub fn new(user_id: Uuid, item_id: Uuid, acquired_at: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            item_id,
            is_equipped: false,
            acquired_at: acquired_at.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle() -> ItemDefinition {
        ItemDefinition {
            id: Uuid::new_v4(),
            name: "Beeswax Candle".to_string(),
            flavor_text: "A small light against the darkness.".to_string(),
            description: "Restores a little energeia.".to_string(),
            base_energeia_cost: 15,
            kind: ItemKind::Consumable,
            bonus_stat: BonusStat::Energeia,
            bonus_value: 2,
            is_unique: false,
            in_market: true,
            image_path: None,
        }
    }

    #[test]
    fn test_sell_price_is_half_rounded_down() {
        let mut item = candle();
        assert_eq!(item.sell_price(), 7);

        item.base_energeia_cost = 100;
        assert_eq!(item.sell_price(), 50);

        item.base_energeia_cost = 1;
        assert_eq!(item.sell_price(), 0);
    }

    #[test]
    fn test_new_entry_starts_unequipped() {
        let entry = InventoryEntry::new(Uuid::new_v4(), Uuid::new_v4(), "2026-01-15T10:00:00Z");
        assert!(!entry.is_equipped);
    }
}
