// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (set FIRESTORE_EMULATOR_HOST). Each test uses fresh UUIDs for isolation.

use chrono::NaiveDate;
use novice_tracker::models::{DailyLog, Habit, LogStatus, Profile};
use novice_tracker::scoring::Direction;
use novice_tracker::services::Scorekeeper;
use uuid::Uuid;

mod common;
use common::test_db;

fn test_habit(user_id: Uuid, difficulty: i32) -> Habit {
    Habit::new(
        user_id,
        "Morning prayer".to_string(),
        true,
        true,
        difficulty,
        &chrono::Utc::now().to_rfc3339(),
    )
}

#[tokio::test]
async fn test_profile_round_trip() {
    require_emulator!();

    let db = test_db().await;
    let user_id = Uuid::new_v4();

    let before = db.get_profile(user_id).await.unwrap();
    assert!(before.is_none(), "Profile should not exist before creation");

    let profile = Profile::new(user_id, &chrono::Utc::now().to_rfc3339());
    db.upsert_profile(&profile).await.unwrap();

    let fetched = db.get_profile(user_id).await.unwrap().unwrap();
    assert_eq!(fetched.user_id, user_id);
    assert_eq!(fetched.current_health, 100);
    assert_eq!(fetched.max_energeia, 100);
    assert!(fetched.username.starts_with("Novice-"));
}

#[tokio::test]
async fn test_habit_listing_is_per_user() {
    require_emulator!();

    let db = test_db().await;
    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();

    db.upsert_habit(&test_habit(user_a, 3)).await.unwrap();
    db.upsert_habit(&test_habit(user_a, 5)).await.unwrap();
    db.upsert_habit(&test_habit(user_b, 7)).await.unwrap();

    let habits_a = db.habits_for_user(user_a).await.unwrap();
    let habits_b = db.habits_for_user(user_b).await.unwrap();

    assert_eq!(habits_a.len(), 2);
    assert_eq!(habits_b.len(), 1);
}

#[tokio::test]
async fn test_log_upsert_is_last_write_wins() {
    require_emulator!();

    let db = test_db().await;
    let user_id = Uuid::new_v4();
    let habit_id = Uuid::new_v4();
    let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

    // Auto-logged status first
    let auto = DailyLog {
        habit_id,
        user_id,
        date,
        status: LogStatus::Positive,
        notes: String::new(),
    };
    db.upsert_log(&auto).await.unwrap();

    // Manual edit afterwards overwrites the same (habit, date) key
    let manual = DailyLog {
        habit_id,
        user_id,
        date,
        status: LogStatus::Negative,
        notes: "Slipped after vespers".to_string(),
    };
    db.upsert_log(&manual).await.unwrap();

    let stored = db.get_log(habit_id, date).await.unwrap().unwrap();
    assert_eq!(stored.status, LogStatus::Negative);
    assert_eq!(stored.notes, "Slipped after vespers");

    // Still a single document for the day
    let logs = db.logs_in_range(habit_id, date, date).await.unwrap();
    assert_eq!(logs.len(), 1);
}

#[tokio::test]
async fn test_logs_in_range_respects_bounds() {
    require_emulator!();

    let db = test_db().await;
    let user_id = Uuid::new_v4();
    let habit_id = Uuid::new_v4();

    for day in [1u32, 15, 28] {
        let log = DailyLog {
            habit_id,
            user_id,
            date: NaiveDate::from_ymd_opt(2026, 2, day).unwrap(),
            status: LogStatus::Positive,
            notes: String::new(),
        };
        db.upsert_log(&log).await.unwrap();
    }
    // A neighboring month that must not appear
    let stray = DailyLog {
        habit_id,
        user_id,
        date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        status: LogStatus::Negative,
        notes: String::new(),
    };
    db.upsert_log(&stray).await.unwrap();

    let logs = db
        .logs_in_range(
            habit_id,
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(logs.len(), 3);
    assert!(logs.windows(2).all(|w| w[0].date <= w[1].date));
}

#[tokio::test]
async fn test_score_flow_persists_all_three_writes() {
    require_emulator!();

    let db = test_db().await;
    let scorekeeper = Scorekeeper::new(db.clone());
    let user_id = Uuid::new_v4();
    let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

    let mut profile = Profile::new(user_id, &chrono::Utc::now().to_rfc3339());
    profile.current_energeia = 50;
    db.upsert_profile(&profile).await.unwrap();

    let habit = test_habit(user_id, 10);
    db.upsert_habit(&habit).await.unwrap();

    let record = scorekeeper
        .score_habit(user_id, habit.id, Direction::Up, date)
        .await
        .unwrap();

    assert_eq!(record.habit.streak_level, 1);
    assert_eq!(record.profile.current_energeia, 65);
    assert_eq!(record.log.status, LogStatus::Positive);

    // All three writes are visible in the store
    let stored_habit = db.get_habit(habit.id).await.unwrap().unwrap();
    assert_eq!(stored_habit.streak_level, 1);

    let stored_profile = db.get_profile(user_id).await.unwrap().unwrap();
    assert_eq!(stored_profile.current_energeia, 65);

    let stored_log = db.get_log(habit.id, date).await.unwrap().unwrap();
    assert_eq!(stored_log.status, LogStatus::Positive);
}

#[tokio::test]
async fn test_scoring_untracked_direction_rejected() {
    require_emulator!();

    let db = test_db().await;
    let scorekeeper = Scorekeeper::new(db.clone());
    let user_id = Uuid::new_v4();

    db.upsert_profile(&Profile::new(user_id, &chrono::Utc::now().to_rfc3339()))
        .await
        .unwrap();

    let mut habit = test_habit(user_id, 3);
    habit.tracks_negative = false;
    db.upsert_habit(&habit).await.unwrap();

    let result = scorekeeper
        .score_habit(
            user_id,
            habit.id,
            Direction::Down,
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        )
        .await;

    assert!(matches!(
        result,
        Err(novice_tracker::error::AppError::BadRequest(_))
    ));
}

#[tokio::test]
async fn test_delete_habit_removes_logs() {
    require_emulator!();

    let db = test_db().await;
    let user_id = Uuid::new_v4();
    let habit = test_habit(user_id, 3);
    db.upsert_habit(&habit).await.unwrap();

    for day in 1..=5u32 {
        let log = DailyLog {
            habit_id: habit.id,
            user_id,
            date: NaiveDate::from_ymd_opt(2026, 4, day).unwrap(),
            status: LogStatus::Positive,
            notes: String::new(),
        };
        db.upsert_log(&log).await.unwrap();
    }

    let removed = db.delete_habit(habit.id).await.unwrap();
    assert_eq!(removed, 5);

    assert!(db.get_habit(habit.id).await.unwrap().is_none());
    let remaining = db
        .logs_in_range(
            habit.id,
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 4, 30).unwrap(),
        )
        .await
        .unwrap();
    assert!(remaining.is_empty());
}
