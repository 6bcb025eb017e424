//! Season, its settings, and SeasonState.

use crate::models::fixture::{Fixture, FixtureId, Matchday};
use crate::models::league::LeagueError;
use crate::models::player::PlayerId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a season.
pub type SeasonId = Uuid;

/// Whether every pairing is played once or twice (home and away).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundMode {
    #[default]
    Single,
    Double,
}

/// How many legs a fixture consists of; used to validate entered scores.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum MatchFormat {
    /// No constraint on the leg counts.
    #[default]
    Open,
    /// All `legs` are played; draws are possible when `legs` is even.
    FixedLegs { legs: u32 },
    /// First to `legs / 2 + 1`; `legs` must be odd.
    BestOf { legs: u32 },
}

impl MatchFormat {
    /// Reject formats that cannot produce a result (zero legs, even best-of).
    pub fn validate(&self) -> Result<(), LeagueError> {
        match *self {
            MatchFormat::Open => Ok(()),
            MatchFormat::FixedLegs { legs } if legs > 0 => Ok(()),
            MatchFormat::BestOf { legs } if legs % 2 == 1 => Ok(()),
            _ => Err(LeagueError::InvalidFormat(*self)),
        }
    }

    /// Check a leg score against this format.
    pub fn check_score(&self, home_legs: u32, away_legs: u32) -> Result<(), LeagueError> {
        let ok = match *self {
            MatchFormat::Open => true,
            MatchFormat::FixedLegs { legs } => home_legs.checked_add(away_legs) == Some(legs),
            MatchFormat::BestOf { legs } => {
                let target = legs / 2 + 1;
                (home_legs == target && away_legs < target)
                    || (away_legs == target && home_legs < target)
            }
        };
        if ok {
            Ok(())
        } else {
            Err(LeagueError::InvalidScore {
                home_legs,
                away_legs,
                format: *self,
            })
        }
    }
}

/// Points awarded per fixture outcome.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PointsRule {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl Default for PointsRule {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

fn default_days_between_matchdays() -> u32 {
    7
}

/// Everything chosen when a season is created.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeasonSettings {
    pub name: String,
    #[serde(default)]
    pub round_mode: RoundMode,
    #[serde(default)]
    pub format: MatchFormat,
    #[serde(default)]
    pub points: PointsRule,
    /// Date of matchday 1; later matchdays are spaced by `days_between_matchdays`.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default = "default_days_between_matchdays")]
    pub days_between_matchdays: u32,
}

impl SeasonSettings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            round_mode: RoundMode::default(),
            format: MatchFormat::default(),
            points: PointsRule::default(),
            start_date: None,
            days_between_matchdays: default_days_between_matchdays(),
        }
    }

    pub fn round_mode(mut self, mode: RoundMode) -> Self {
        self.round_mode = mode;
        self
    }

    pub fn format(mut self, format: MatchFormat) -> Self {
        self.format = format;
        self
    }

    pub fn points(mut self, points: PointsRule) -> Self {
        self.points = points;
        self
    }

    pub fn starting(mut self, date: NaiveDate, days_between_matchdays: u32) -> Self {
        self.start_date = Some(date);
        self.days_between_matchdays = days_between_matchdays;
        self
    }
}

/// Current phase of the season.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonState {
    /// Choosing participants and settings; no schedule yet.
    #[default]
    Setup,
    /// Schedule generated; results being entered.
    InProgress,
    /// Every fixture has a result.
    Completed,
}

/// A round-robin season between a subset of the league roster.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub settings: SeasonSettings,
    /// Participants in schedule order (anchor first once started).
    pub participants: Vec<PlayerId>,
    pub state: SeasonState,
    pub matchdays: Vec<Matchday>,
    pub started_at: Option<DateTime<Utc>>,
}

impl Season {
    /// Create a new season in Setup state with no participants.
    pub fn new(settings: SeasonSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            settings,
            participants: Vec::new(),
            state: SeasonState::Setup,
            matchdays: Vec::new(),
            started_at: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.settings.name
    }

    pub fn is_participant(&self, player_id: PlayerId) -> bool {
        self.participants.contains(&player_id)
    }

    /// Add a participant (Setup only).
    pub fn add_participant(&mut self, player_id: PlayerId) -> Result<(), LeagueError> {
        if self.state != SeasonState::Setup {
            return Err(LeagueError::InvalidState);
        }
        if self.is_participant(player_id) {
            return Err(LeagueError::AlreadyParticipant(player_id));
        }
        self.participants.push(player_id);
        Ok(())
    }

    /// Remove a participant (Setup only).
    pub fn remove_participant(&mut self, player_id: PlayerId) -> Result<(), LeagueError> {
        if self.state != SeasonState::Setup {
            return Err(LeagueError::InvalidState);
        }
        let idx = self
            .participants
            .iter()
            .position(|&p| p == player_id)
            .ok_or(LeagueError::PlayerNotFound(player_id))?;
        self.participants.remove(idx);
        Ok(())
    }

    /// Replace the settings (Setup only). The name is kept.
    pub fn update_settings(&mut self, settings: SeasonSettings) -> Result<(), LeagueError> {
        if self.state != SeasonState::Setup {
            return Err(LeagueError::InvalidState);
        }
        settings.format.validate()?;
        let name = std::mem::take(&mut self.settings.name);
        self.settings = SeasonSettings { name, ..settings };
        Ok(())
    }

    pub fn fixtures(&self) -> impl Iterator<Item = &Fixture> {
        self.matchdays.iter().flat_map(|md| md.fixtures.iter())
    }

    pub fn fixture(&self, id: FixtureId) -> Option<&Fixture> {
        self.fixtures().find(|f| f.id == id)
    }

    pub fn fixture_mut(&mut self, id: FixtureId) -> Option<&mut Fixture> {
        self.matchdays
            .iter_mut()
            .flat_map(|md| md.fixtures.iter_mut())
            .find(|f| f.id == id)
    }

    pub fn matchday_mut(&mut self, number: u32) -> Option<&mut Matchday> {
        self.matchdays.iter_mut().find(|md| md.number == number)
    }

    /// True once a schedule exists and every fixture has a result.
    pub fn all_fixtures_played(&self) -> bool {
        !self.matchdays.is_empty() && self.fixtures().all(Fixture::is_played)
    }
}
