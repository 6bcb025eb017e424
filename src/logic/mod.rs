//! League business logic: scheduling, season lifecycle, results, standings, CSV.

mod export;
mod results;
mod schedule;
mod setup;
mod standings;

pub use export::{import_players_csv, schedule_csv, standings_csv, BYE_LABEL};
pub use results::{clear_result, record_result, season_progress, set_matchday_date};
pub use schedule::{build_matchdays, round_robin, Pairing, Round};
pub use setup::{restart_season, start_season, MIN_PARTICIPANTS};
pub use standings::{compute_standings, StandingRow};
