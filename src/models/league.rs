//! League (roster + seasons) and LeagueError.

use crate::models::fixture::FixtureId;
use crate::models::player::{Player, PlayerId};
use crate::models::season::{MatchFormat, Season, SeasonId, SeasonSettings, SeasonState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during league operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// Season is not in a state that allows this action.
    InvalidState,
    /// Player, league or season name is blank.
    EmptyName,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// A season with this name already exists in the league.
    DuplicateSeasonName,
    PlayerNotFound(PlayerId),
    SeasonNotFound(SeasonId),
    FixtureNotFound(FixtureId),
    MatchdayNotFound(u32),
    /// Player is already taking part in the season.
    AlreadyParticipant(PlayerId),
    /// Player takes part in a season that has been started and cannot be removed.
    PlayerInActiveSeason(PlayerId),
    /// Need at least `required` participants to build a schedule.
    NotEnoughParticipants { required: usize, actual: usize },
    /// Match format can never produce a valid result.
    InvalidFormat(MatchFormat),
    /// Leg score does not fit the season's match format.
    InvalidScore {
        home_legs: u32,
        away_legs: u32,
        format: MatchFormat,
    },
    /// Start date plus matchday spacing runs past the supported calendar.
    DateOutOfRange { matchday: u32 },
    /// Checkout value cannot be finished with three darts.
    InvalidCheckout(u32),
    /// Roster CSV could not be read.
    Import(String),
    /// CSV download could not be written.
    Export(String),
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::InvalidState => write!(f, "Invalid state for this action"),
            LeagueError::EmptyName => write!(f, "Name must not be empty"),
            LeagueError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            LeagueError::DuplicateSeasonName => write!(f, "A season with this name already exists"),
            LeagueError::PlayerNotFound(_) => write!(f, "Player not found"),
            LeagueError::SeasonNotFound(_) => write!(f, "Season not found"),
            LeagueError::FixtureNotFound(_) => write!(f, "Fixture not found"),
            LeagueError::MatchdayNotFound(n) => write!(f, "Matchday {} not found", n),
            LeagueError::AlreadyParticipant(_) => {
                write!(f, "Player is already a participant of this season")
            }
            LeagueError::PlayerInActiveSeason(_) => {
                write!(f, "Player takes part in a started season and cannot be removed")
            }
            LeagueError::NotEnoughParticipants { required, actual } => {
                write!(f, "Need at least {} participants (have {})", required, actual)
            }
            LeagueError::InvalidFormat(format) => write!(f, "Invalid match format: {:?}", format),
            LeagueError::InvalidScore {
                home_legs,
                away_legs,
                format,
            } => write!(
                f,
                "Score {}-{} is not possible for format {:?}",
                home_legs, away_legs, format
            ),
            LeagueError::DateOutOfRange { matchday } => {
                write!(f, "Date of matchday {} is out of range", matchday)
            }
            LeagueError::InvalidCheckout(score) => {
                write!(f, "{} is not a possible checkout", score)
            }
            LeagueError::Import(msg) => write!(f, "Import failed: {}", msg),
            LeagueError::Export(msg) => write!(f, "Export failed: {}", msg),
        }
    }
}

impl std::error::Error for LeagueError {}

/// Unique identifier for a league.
pub type LeagueId = Uuid;

/// A league: the player roster and every season played between them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub players: Vec<Player>,
    pub seasons: Vec<Season>,
    pub created_at: DateTime<Utc>,
}

impl League {
    /// Create an empty league.
    pub fn new(name: impl Into<String>) -> Result<Self, LeagueError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(LeagueError::EmptyName);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            players: Vec::new(),
            seasons: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn season(&self, id: SeasonId) -> Option<&Season> {
        self.seasons.iter().find(|s| s.id == id)
    }

    pub fn season_mut(&mut self, id: SeasonId) -> Option<&mut Season> {
        self.seasons.iter_mut().find(|s| s.id == id)
    }

    /// Trimmed, non-empty name that no other player uses (case-insensitive).
    fn check_player_name(&self, name: &str, except: Option<PlayerId>) -> Result<String, LeagueError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(LeagueError::EmptyName);
        }
        let is_duplicate = self
            .players
            .iter()
            .filter(|p| Some(p.id) != except)
            .any(|p| p.name.eq_ignore_ascii_case(trimmed));
        if is_duplicate {
            return Err(LeagueError::DuplicatePlayerName);
        }
        Ok(trimmed.to_string())
    }

    /// Add a player to the roster. Names must be unique (case-insensitive).
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        nickname: Option<String>,
    ) -> Result<PlayerId, LeagueError> {
        let name = self.check_player_name(&name.into(), None)?;
        let mut player = Player::new(name);
        if let Some(nick) = nickname {
            player = player.with_nickname(nick);
        }
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    pub fn rename_player(&mut self, id: PlayerId, name: &str) -> Result<(), LeagueError> {
        let name = self.check_player_name(name, Some(id))?;
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(LeagueError::PlayerNotFound(id))?;
        player.name = name;
        Ok(())
    }

    /// Remove a player from the roster. Not allowed while they take part in a started season;
    /// Setup seasons simply lose them as a participant.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), LeagueError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(LeagueError::PlayerNotFound(id))?;
        let in_started_season = self
            .seasons
            .iter()
            .any(|s| s.state != SeasonState::Setup && s.is_participant(id));
        if in_started_season {
            return Err(LeagueError::PlayerInActiveSeason(id));
        }
        for season in &mut self.seasons {
            season.participants.retain(|&p| p != id);
        }
        self.players.remove(idx);
        Ok(())
    }

    /// Create a season in Setup state. Season names are unique within the league.
    pub fn create_season(&mut self, mut settings: SeasonSettings) -> Result<SeasonId, LeagueError> {
        let name = settings.name.trim().to_string();
        if name.is_empty() {
            return Err(LeagueError::EmptyName);
        }
        if self.seasons.iter().any(|s| s.name().eq_ignore_ascii_case(&name)) {
            return Err(LeagueError::DuplicateSeasonName);
        }
        settings.format.validate()?;
        settings.name = name;
        let season = Season::new(settings);
        let id = season.id;
        self.seasons.push(season);
        Ok(id)
    }

    /// Delete a season and everything recorded in it.
    pub fn remove_season(&mut self, id: SeasonId) -> Result<(), LeagueError> {
        let idx = self
            .seasons
            .iter()
            .position(|s| s.id == id)
            .ok_or(LeagueError::SeasonNotFound(id))?;
        self.seasons.remove(idx);
        Ok(())
    }

    /// Enter a rostered player into a season (Setup only).
    pub fn add_participant(&mut self, season_id: SeasonId, player_id: PlayerId) -> Result<(), LeagueError> {
        if self.player(player_id).is_none() {
            return Err(LeagueError::PlayerNotFound(player_id));
        }
        self.season_mut(season_id)
            .ok_or(LeagueError::SeasonNotFound(season_id))?
            .add_participant(player_id)
    }

    pub fn remove_participant(&mut self, season_id: SeasonId, player_id: PlayerId) -> Result<(), LeagueError> {
        self.season_mut(season_id)
            .ok_or(LeagueError::SeasonNotFound(season_id))?
            .remove_participant(player_id)
    }
}
