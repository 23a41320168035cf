// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod achievements;
pub mod market;
pub mod scorekeeper;
pub mod stories;

pub use market::MarketService;
pub use scorekeeper::Scorekeeper;
pub use stories::StoryService;
