// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Habit scoring calculator.
//!
//! Pure stat math for a "+"/"-" press on a habit: the reward or penalty
//! applied to the health and energeia pools, the streak transition, and the
//! calendar status derived from the new streak. No I/O happens here; the
//! caller persists the results.

use serde::{Deserialize, Serialize};

use crate::models::{Habit, LogStatus};

pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 10;

/// Streak levels never drop below this.
pub const STREAK_FLOOR: i32 = -3;

/// Rewards grow linearly up to this difficulty, then twice as fast.
const RAMP_KNEE: i32 = 5;

/// Health penalties are 1.5x steeper than energeia penalties.
const HEALTH_PENALTY_FACTOR: f64 = 1.5;

/// Which control the user pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Signed change to the two resource pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatDelta {
    pub health: i32,
    pub energeia: i32,
}

/// Everything a single press produces. The caller persists the habit streak,
/// the profile, and the daily log as three independent writes.
#[derive(Debug, Clone, Copy)]
pub struct ScoreOutcome {
    pub delta: StatDelta,
    pub streak_level: i32,
    pub log_status: LogStatus,
}

/// Score a single press on a habit.
pub fn score(habit: &Habit, direction: Direction) -> ScoreOutcome {
    let delta = stat_delta(habit.difficulty, direction);
    let streak_level = next_streak_level(habit.streak_level, direction);
    ScoreOutcome {
        delta,
        streak_level,
        log_status: status_for_streak(streak_level),
    }
}

/// Pool changes for a press at the given difficulty.
///
/// Malformed difficulty is clamped into [1, 10], never rejected. Health is
/// never rewarded on an up-press.
pub fn stat_delta(difficulty: i32, direction: Direction) -> StatDelta {
    let d = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    match direction {
        Direction::Up => StatDelta {
            health: 0,
            energeia: reward_magnitude(d),
        },
        Direction::Down => {
            let penalty = penalty_magnitude(d);
            StatDelta {
                health: -round_half_away(f64::from(penalty) * HEALTH_PENALTY_FACTOR),
                energeia: -penalty,
            }
        }
    }
}

/// Streak transition for a press.
///
/// A press opposite to the current sign snaps the streak back to exactly 0
/// rather than stepping through it. The result floors at [`STREAK_FLOOR`];
/// there is no ceiling on the positive side.
pub fn next_streak_level(previous: i32, direction: Direction) -> i32 {
    let next = match direction {
        Direction::Up if previous < 0 => 0,
        Direction::Up => previous + 1,
        Direction::Down if previous > 0 => 0,
        Direction::Down => previous - 1,
    };
    next.max(STREAK_FLOOR)
}

/// Calendar status derived from a streak level.
pub fn status_for_streak(streak_level: i32) -> LogStatus {
    if streak_level > 0 {
        LogStatus::Positive
    } else if streak_level < 0 {
        LogStatus::Negative
    } else {
        LogStatus::Partial
    }
}

fn reward_magnitude(d: i32) -> i32 {
    if d <= RAMP_KNEE {
        d
    } else {
        RAMP_KNEE + (d - RAMP_KNEE) * 2
    }
}

fn penalty_magnitude(d: i32) -> i32 {
    d.min(RAMP_KNEE)
}

// f64::round rounds half away from zero, the convention for the 1.5x
// health penalty (penalty 5 -> 7.5 -> 8).
fn round_half_away(value: f64) -> i32 {
    value.round() as i32
}
