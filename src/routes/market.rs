// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Market and inventory routes.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{InventoryEntry, ItemDefinition, Profile};
use crate::services::market::{Activation, InventoryView};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/market", get(browse_market))
        .route("/api/market/{item_id}/buy", post(buy_item))
        .route("/api/inventory", get(get_inventory))
        .route("/api/inventory/{id}/sell", post(sell_item))
        .route("/api/inventory/{id}/activate", post(activate_item))
}

#[derive(Serialize)]
pub struct MarketResponse {
    pub items: Vec<ItemDefinition>,
}

/// Items currently for sale to this user.
async fn browse_market(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MarketResponse>> {
    let items = state.market.browse(user.user_id).await?;
    Ok(Json(MarketResponse { items }))
}

#[derive(Serialize)]
pub struct PurchaseResponse {
    pub profile: Profile,
}

/// Buy a market item.
async fn buy_item(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(item_id): Path<Uuid>,
) -> Result<Json<PurchaseResponse>> {
    let profile = state.market.buy(user.user_id, item_id).await?;
    Ok(Json(PurchaseResponse { profile }))
}

#[derive(Serialize)]
pub struct InventoryResponse {
    pub items: Vec<InventoryView>,
}

/// The user's inventory, consumables stacked.
async fn get_inventory(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<InventoryResponse>> {
    let items = state.market.inventory(user.user_id).await?;
    Ok(Json(InventoryResponse { items }))
}

/// Sell an owned item for half its base cost.
async fn sell_item(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<PurchaseResponse>> {
    let profile = state.market.sell(user.user_id, entry_id).await?;
    Ok(Json(PurchaseResponse { profile }))
}

#[derive(Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ActivateResponse {
    Equipped { entry: InventoryEntry },
    Consumed { profile: Profile },
}

/// Use a consumable or toggle an equippable.
async fn activate_item(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<ActivateResponse>> {
    let response = match state.market.activate(user.user_id, entry_id).await? {
        Activation::Equipped { entry } => ActivateResponse::Equipped { entry },
        Activation::Consumed { profile } => ActivateResponse::Consumed { profile },
    };
    Ok(Json(response))
}
