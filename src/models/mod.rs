//! Data structures for the darts league: players, seasons, fixtures, league state.

mod fixture;
mod league;
mod player;
mod season;

pub use fixture::{
    is_valid_checkout, Fixture, FixtureId, FixtureResult, Matchday, Outcome, PlayerMatchStats,
    IMPOSSIBLE_CHECKOUTS, MAX_CHECKOUT,
};
pub use league::{League, LeagueError, LeagueId};
pub use player::{Player, PlayerId};
pub use season::{
    MatchFormat, PointsRule, RoundMode, Season, SeasonId, SeasonSettings, SeasonState,
};
