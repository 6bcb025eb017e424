//! Entering and correcting fixture results.

use crate::models::{
    is_valid_checkout, FixtureId, FixtureResult, LeagueError, PlayerMatchStats, Season,
    SeasonState,
};
use chrono::NaiveDate;

fn check_stats(stats: &PlayerMatchStats) -> Result<(), LeagueError> {
    match stats.high_checkout {
        Some(score) if !is_valid_checkout(score) => Err(LeagueError::InvalidCheckout(score)),
        _ => Ok(()),
    }
}

/// Record (or overwrite) the result of a fixture.
///
/// The score must fit the season's match format and any entered checkout must be finishable.
/// Once every fixture has a result the season is Completed.
pub fn record_result(
    season: &mut Season,
    fixture_id: FixtureId,
    result: FixtureResult,
) -> Result<(), LeagueError> {
    if season.state == SeasonState::Setup {
        return Err(LeagueError::InvalidState);
    }
    season
        .settings
        .format
        .check_score(result.home_legs, result.away_legs)?;
    check_stats(&result.home_stats)?;
    check_stats(&result.away_stats)?;

    season
        .fixture_mut(fixture_id)
        .ok_or(LeagueError::FixtureNotFound(fixture_id))?
        .result = Some(result);

    if season.all_fixtures_played() && season.state != SeasonState::Completed {
        season.state = SeasonState::Completed;
        log::info!("Season '{}' completed", season.name());
    }
    Ok(())
}

/// Remove a fixture's result. A Completed season goes back to InProgress.
pub fn clear_result(season: &mut Season, fixture_id: FixtureId) -> Result<(), LeagueError> {
    if season.state == SeasonState::Setup {
        return Err(LeagueError::InvalidState);
    }
    season
        .fixture_mut(fixture_id)
        .ok_or(LeagueError::FixtureNotFound(fixture_id))?
        .result = None;
    season.state = SeasonState::InProgress;
    Ok(())
}

/// Move a matchday to another date (postponements). Not available before the schedule exists.
pub fn set_matchday_date(
    season: &mut Season,
    number: u32,
    date: Option<NaiveDate>,
) -> Result<(), LeagueError> {
    if season.state == SeasonState::Setup {
        return Err(LeagueError::InvalidState);
    }
    season
        .matchday_mut(number)
        .ok_or(LeagueError::MatchdayNotFound(number))?
        .date = date;
    Ok(())
}

/// Number of fixtures with a result and total number of fixtures.
pub fn season_progress(season: &Season) -> (usize, usize) {
    season.fixtures().fold((0, 0), |(played, total), f| {
        (played + usize::from(f.is_played()), total + 1)
    })
}
