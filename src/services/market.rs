// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Market and inventory workflows.
//!
//! Purchases and sales follow the same independent-writes stance as scoring:
//! sequential store calls, first failure aborts the rest, no rollback.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::achievement::ids;
use crate::models::{BonusStat, InventoryEntry, ItemDefinition, ItemKind, Profile};
use crate::scoring::StatDelta;
use crate::services::achievements;

/// Market and inventory operations over the document store.
#[derive(Clone)]
pub struct MarketService {
    db: FirestoreDb,
}

/// One row of the inventory view. Consumable duplicates are stacked.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryView {
    /// An entry ID usable for sell/activate calls
    pub entry_id: Uuid,
    pub item: ItemDefinition,
    pub is_equipped: bool,
    pub quantity: u32,
}

/// What activating an inventory entry did.
#[derive(Debug, Clone)]
pub enum Activation {
    /// Equippable toggled; current state returned
    Equipped { entry: InventoryEntry },
    /// Consumable applied and destroyed; updated profile returned
    Consumed { profile: Profile },
}

impl MarketService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Items currently for sale, hiding unique items the user already owns.
    /// Consumables stay in the shop forever.
    pub async fn browse(&self, user_id: Uuid) -> Result<Vec<ItemDefinition>> {
        let items = self.db.market_items().await?;
        let owned = self.owned_item_ids(user_id).await?;

        Ok(items
            .into_iter()
            .filter(|item| !(item.is_unique && owned.contains(&item.id)))
            .collect())
    }

    /// Buy an item: inventory insert, then energeia deduction.
    pub async fn buy(&self, user_id: Uuid, item_id: Uuid) -> Result<Profile> {
        let item = self
            .db
            .get_item(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", item_id)))?;

        if !item.in_market {
            return Err(AppError::BadRequest("Item is not for sale".to_string()));
        }

        let owned = self.owned_item_ids(user_id).await?;
        if item.is_unique && owned.contains(&item.id) {
            return Err(AppError::BadRequest("Item already owned".to_string()));
        }

        let mut profile = self.profile(user_id).await?;
        if profile.current_energeia < item.base_energeia_cost {
            return Err(AppError::BadRequest("Cannot afford this item".to_string()));
        }

        let now = chrono::Utc::now().to_rfc3339();
        let entry = InventoryEntry::new(user_id, item.id, &now);
        self.db.upsert_inventory_entry(&entry).await?;

        profile.apply(StatDelta {
            health: 0,
            energeia: -item.base_energeia_cost,
        });
        self.db.upsert_profile(&profile).await?;

        tracing::info!(
            user_id = %user_id,
            item = %item.name,
            cost = item.base_energeia_cost,
            "Item purchased"
        );

        achievements::grant(&self.db, user_id, ids::FIRST_ITEM).await;
        self.maybe_grant_all_items(user_id, &owned, item.id).await;

        Ok(profile)
    }

    /// Sell an inventory entry for half its base cost.
    pub async fn sell(&self, user_id: Uuid, entry_id: Uuid) -> Result<Profile> {
        let entry = self.owned_entry(user_id, entry_id).await?;
        let item = self
            .db
            .get_item(entry.item_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", entry.item_id)))?;

        self.db.delete_inventory_entry(entry.id).await?;

        let mut profile = self.profile(user_id).await?;
        profile.apply(StatDelta {
            health: 0,
            energeia: item.sell_price(),
        });
        self.db.upsert_profile(&profile).await?;

        tracing::info!(
            user_id = %user_id,
            item = %item.name,
            price = item.sell_price(),
            "Item sold"
        );

        Ok(profile)
    }

    /// Use a consumable or toggle an equippable.
    pub async fn activate(&self, user_id: Uuid, entry_id: Uuid) -> Result<Activation> {
        let mut entry = self.owned_entry(user_id, entry_id).await?;
        let item = self
            .db
            .get_item(entry.item_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", entry.item_id)))?;

        match item.kind {
            ItemKind::Equippable => {
                entry.is_equipped = !entry.is_equipped;
                self.db.upsert_inventory_entry(&entry).await?;
                tracing::info!(
                    user_id = %user_id,
                    item = %item.name,
                    equipped = entry.is_equipped,
                    "Equipment toggled"
                );
                Ok(Activation::Equipped { entry })
            }
            ItemKind::Consumable => {
                let mut profile = self.profile(user_id).await?;
                profile.apply(consumable_delta(&item));
                self.db.upsert_profile(&profile).await?;
                self.db.delete_inventory_entry(entry.id).await?;
                tracing::info!(
                    user_id = %user_id,
                    item = %item.name,
                    "Consumable used"
                );
                Ok(Activation::Consumed { profile })
            }
        }
    }

    /// Inventory entries joined with catalog data, consumables stacked.
    pub async fn inventory(&self, user_id: Uuid) -> Result<Vec<InventoryView>> {
        let entries = self.db.inventory_for_user(user_id).await?;
        let catalog: HashMap<Uuid, ItemDefinition> = self
            .db
            .all_items()
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

        let joined: Vec<(InventoryEntry, ItemDefinition)> = entries
            .into_iter()
            .filter_map(|entry| {
                // Entries whose catalog item vanished are dropped from the view
                catalog.get(&entry.item_id).map(|item| (entry, item.clone()))
            })
            .collect();

        Ok(stack_inventory(joined))
    }

    async fn profile(&self, user_id: Uuid) -> Result<Profile> {
        self.db
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user_id)))
    }

    async fn owned_entry(&self, user_id: Uuid, entry_id: Uuid) -> Result<InventoryEntry> {
        self.db
            .get_inventory_entry(entry_id)
            .await?
            .filter(|entry| entry.user_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("Inventory entry {} not found", entry_id)))
    }

    async fn owned_item_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>> {
        Ok(self
            .db
            .inventory_for_user(user_id)
            .await?
            .into_iter()
            .map(|entry| entry.item_id)
            .collect())
    }

    /// Grant the collector achievement once every catalog item is owned.
    /// Read failures here are logged, not surfaced.
    async fn maybe_grant_all_items(
        &self,
        user_id: Uuid,
        owned_before: &HashSet<Uuid>,
        just_bought: Uuid,
    ) {
        let catalog = match self.db.all_items().await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping all-items achievement check");
                return;
            }
        };

        let complete = catalog
            .iter()
            .all(|item| item.id == just_bought || owned_before.contains(&item.id));

        if complete {
            achievements::grant(&self.db, user_id, ids::ALL_ITEMS).await;
        }
    }
}

/// Stat change from consuming an item. Defense has no pool to feed, so a
/// defense consumable is a no-op on the profile.
fn consumable_delta(item: &ItemDefinition) -> StatDelta {
    match item.bonus_stat {
        BonusStat::Energeia => StatDelta {
            health: 0,
            energeia: item.bonus_value,
        },
        BonusStat::Health => StatDelta {
            health: item.bonus_value,
            energeia: 0,
        },
        BonusStat::Defense => StatDelta {
            health: 0,
            energeia: 0,
        },
    }
}

/// Collapse consumable duplicates into single rows with a quantity.
/// Equippables are always listed individually.
fn stack_inventory(joined: Vec<(InventoryEntry, ItemDefinition)>) -> Vec<InventoryView> {
    let mut views: Vec<InventoryView> = Vec::with_capacity(joined.len());
    let mut stacked: HashMap<Uuid, usize> = HashMap::new();

    for (entry, item) in joined {
        if item.kind == ItemKind::Consumable {
            if let Some(&idx) = stacked.get(&item.id) {
                views[idx].quantity += 1;
                continue;
            }
            stacked.insert(item.id, views.len());
        }

        views.push(InventoryView {
            entry_id: entry.id,
            is_equipped: entry.is_equipped,
            quantity: 1,
            item,
        });
    }

    views
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: ItemKind, stat: BonusStat, value: i32) -> ItemDefinition {
        ItemDefinition {
            id: Uuid::new_v4(),
            name: "Test Item".to_string(),
            flavor_text: String::new(),
            description: String::new(),
            base_energeia_cost: 10,
            kind,
            bonus_stat: stat,
            bonus_value: value,
            is_unique: false,
            in_market: true,
            image_path: None,
        }
    }

    fn entry_for(item: &ItemDefinition) -> InventoryEntry {
        InventoryEntry::new(Uuid::new_v4(), item.id, "2026-01-15T10:00:00Z")
    }

    #[test]
    fn test_stack_inventory_collapses_consumables() {
        let candle = item(ItemKind::Consumable, BonusStat::Energeia, 2);
        let joined = vec![
            (entry_for(&candle), candle.clone()),
            (entry_for(&candle), candle.clone()),
            (entry_for(&candle), candle.clone()),
        ];

        let views = stack_inventory(joined);

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].quantity, 3);
    }

    #[test]
    fn test_stack_inventory_keeps_equippables_separate() {
        let sword = item(ItemKind::Equippable, BonusStat::Defense, 4);
        let joined = vec![
            (entry_for(&sword), sword.clone()),
            (entry_for(&sword), sword.clone()),
        ];

        let views = stack_inventory(joined);

        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.quantity == 1));
    }

    #[test]
    fn test_stack_inventory_mixed_kinds() {
        let candle = item(ItemKind::Consumable, BonusStat::Energeia, 2);
        let sword = item(ItemKind::Equippable, BonusStat::Defense, 4);
        let joined = vec![
            (entry_for(&sword), sword.clone()),
            (entry_for(&candle), candle.clone()),
            (entry_for(&candle), candle.clone()),
        ];

        let views = stack_inventory(joined);

        assert_eq!(views.len(), 2);
        let candle_view = views.iter().find(|v| v.item.id == candle.id).unwrap();
        assert_eq!(candle_view.quantity, 2);
    }

    #[test]
    fn test_consumable_delta_per_stat() {
        let energeia = item(ItemKind::Consumable, BonusStat::Energeia, 5);
        assert_eq!(
            consumable_delta(&energeia),
            StatDelta {
                health: 0,
                energeia: 5
            }
        );

        let health = item(ItemKind::Consumable, BonusStat::Health, 7);
        assert_eq!(
            consumable_delta(&health),
            StatDelta {
                health: 7,
                energeia: 0
            }
        );

        let defense = item(ItemKind::Consumable, BonusStat::Defense, 9);
        assert_eq!(
            consumable_delta(&defense),
            StatDelta {
                health: 0,
                energeia: 0
            }
        );
    }
}
