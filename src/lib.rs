// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Novice-Tracker: a habit RPG backend.
//!
//! This crate provides the API for tracking habits, scoring them against the
//! player's health and energeia pools, and the surrounding game economy
//! (market, inventory, seasonal stories, achievements).

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod scoring;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::{MarketService, Scorekeeper, StoryService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub scorekeeper: Scorekeeper,
    pub market: MarketService,
    pub stories: StoryService,
}
