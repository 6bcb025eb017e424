//! Fixture (one scheduled match), its result, and Matchday.

use crate::models::player::PlayerId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fixture.
pub type FixtureId = Uuid;

/// Highest finish possible with three darts (T20, T20, bull).
pub const MAX_CHECKOUT: u32 = 170;

/// Scores at or below 170 that cannot be checked out with three darts.
pub const IMPOSSIBLE_CHECKOUTS: [u32; 7] = [159, 162, 163, 165, 166, 168, 169];

/// Whether `score` can be finished with at most three darts ending on a double.
pub fn is_valid_checkout(score: u32) -> bool {
    (2..=MAX_CHECKOUT).contains(&score) && !IMPOSSIBLE_CHECKOUTS.contains(&score)
}

/// Result of a fixture from the home player's point of view.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

/// Per-player statistics entered with a result.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatchStats {
    #[serde(default)]
    pub one_eighties: u32,
    /// Highest finish in the match, if any leg was won.
    #[serde(default)]
    pub high_checkout: Option<u32>,
}

/// Legs won by each side plus optional statistics.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FixtureResult {
    pub home_legs: u32,
    pub away_legs: u32,
    #[serde(default)]
    pub home_stats: PlayerMatchStats,
    #[serde(default)]
    pub away_stats: PlayerMatchStats,
}

impl FixtureResult {
    pub fn new(home_legs: u32, away_legs: u32) -> Self {
        Self {
            home_legs,
            away_legs,
            ..Self::default()
        }
    }

    pub fn with_stats(mut self, home: PlayerMatchStats, away: PlayerMatchStats) -> Self {
        self.home_stats = home;
        self.away_stats = away;
        self
    }

    pub fn outcome(&self) -> Outcome {
        use std::cmp::Ordering::*;
        match self.home_legs.cmp(&self.away_legs) {
            Greater => Outcome::HomeWin,
            Less => Outcome::AwayWin,
            Equal => Outcome::Draw,
        }
    }
}

/// A single scheduled match between two participants.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    /// 1-based matchday this fixture belongs to.
    pub matchday: u32,
    pub home: PlayerId,
    pub away: PlayerId,
    /// None if not yet played.
    pub result: Option<FixtureResult>,
}

impl Fixture {
    pub fn new(matchday: u32, home: PlayerId, away: PlayerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            matchday,
            home,
            away,
            result: None,
        }
    }

    pub fn is_played(&self) -> bool {
        self.result.is_some()
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.home == player || self.away == player
    }
}

/// One round of the schedule.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Matchday {
    pub number: u32,
    pub date: Option<NaiveDate>,
    pub fixtures: Vec<Fixture>,
    /// Participant sitting out this matchday (odd participant count).
    pub bye: Option<PlayerId>,
}
