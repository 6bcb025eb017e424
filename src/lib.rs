//! Darts league web app: library with models, scheduling and standings logic.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::ServerConfig;
pub use logic::{
    build_matchdays, clear_result, compute_standings, import_players_csv, record_result,
    restart_season, round_robin, schedule_csv, season_progress, set_matchday_date, standings_csv,
    start_season, Pairing, Round, StandingRow,
};
pub use models::{
    Fixture, FixtureId, FixtureResult, League, LeagueError, LeagueId, MatchFormat, Matchday,
    Outcome, Player, PlayerId, PlayerMatchStats, PointsRule, RoundMode, Season, SeasonId,
    SeasonSettings, SeasonState,
};
pub use store::{write_snapshot, LeagueStore, LeagueSummary, StoreError};
