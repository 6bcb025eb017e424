//! Season lifecycle: start (Setup -> InProgress) and restart (back to Setup).

use crate::logic::schedule::build_matchdays;
use crate::models::{LeagueError, Season, SeasonState};
use chrono::Utc;
use rand::seq::SliceRandom;

/// Participants needed before a schedule can be generated.
pub const MIN_PARTICIPANTS: usize = 2;

/// Start the season: require at least 2 participants, optionally shuffle the draw order,
/// generate all matchdays and move to InProgress.
pub fn start_season(season: &mut Season, shuffle: bool) -> Result<(), LeagueError> {
    if season.state != SeasonState::Setup {
        return Err(LeagueError::InvalidState);
    }
    if season.participants.len() < MIN_PARTICIPANTS {
        return Err(LeagueError::NotEnoughParticipants {
            required: MIN_PARTICIPANTS,
            actual: season.participants.len(),
        });
    }
    season.settings.format.validate()?;

    let mut order = season.participants.clone();
    if shuffle {
        order.shuffle(&mut rand::thread_rng());
    }
    let matchdays = build_matchdays(&order, &season.settings)?;
    season.participants = order;
    season.matchdays = matchdays;
    season.state = SeasonState::InProgress;
    season.started_at = Some(Utc::now());
    log::info!(
        "Season '{}' started: {} participants, {} matchdays",
        season.name(),
        season.participants.len(),
        season.matchdays.len()
    );
    Ok(())
}

/// Restart the season: drop the schedule and every result, keep participants and settings.
pub fn restart_season(season: &mut Season) -> Result<(), LeagueError> {
    if season.state == SeasonState::Setup {
        return Err(LeagueError::InvalidState);
    }
    season.matchdays.clear();
    season.started_at = None;
    season.state = SeasonState::Setup;
    log::info!("Season '{}' restarted", season.name());
    Ok(())
}
