//! CSV downloads (schedule, standings) and roster import.

use crate::logic::standings::StandingRow;
use crate::models::{League, LeagueError, Player, PlayerId, Season};
use std::collections::HashMap;
use std::io::Read;

/// Away column value for a participant sitting out a matchday.
pub const BYE_LABEL: &str = "BYE";

fn export_err(e: impl std::fmt::Display) -> LeagueError {
    LeagueError::Export(e.to_string())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, LeagueError> {
    let bytes = writer.into_inner().map_err(export_err)?;
    String::from_utf8(bytes).map_err(export_err)
}

/// Full schedule, one row per fixture (and per bye), in matchday order.
pub fn schedule_csv(season: &Season, players: &[Player]) -> Result<String, LeagueError> {
    let names: HashMap<PlayerId, &str> = players.iter().map(|p| (p.id, p.name.as_str())).collect();
    let name = |id: &PlayerId| names.get(id).copied().unwrap_or("");

    let mut w = csv::Writer::from_writer(Vec::new());
    w.write_record(["matchday", "date", "home", "away", "home_legs", "away_legs"])
        .map_err(export_err)?;
    for md in &season.matchdays {
        let number = md.number.to_string();
        let date = md.date.map(|d| d.to_string()).unwrap_or_default();
        for f in &md.fixtures {
            let (home_legs, away_legs) = match f.result {
                Some(r) => (r.home_legs.to_string(), r.away_legs.to_string()),
                None => (String::new(), String::new()),
            };
            w.write_record([
                number.as_str(),
                date.as_str(),
                name(&f.home),
                name(&f.away),
                home_legs.as_str(),
                away_legs.as_str(),
            ])
            .map_err(export_err)?;
        }
        if let Some(bye) = &md.bye {
            w.write_record([number.as_str(), date.as_str(), name(bye), BYE_LABEL, "", ""])
                .map_err(export_err)?;
        }
    }
    finish(w)
}

/// League table as CSV, in ranking order.
pub fn standings_csv(rows: &[StandingRow]) -> Result<String, LeagueError> {
    let mut w = csv::Writer::from_writer(Vec::new());
    w.write_record([
        "position",
        "player",
        "played",
        "won",
        "drawn",
        "lost",
        "legs_for",
        "legs_against",
        "leg_difference",
        "points",
        "one_eighties",
        "high_checkout",
    ])
    .map_err(export_err)?;
    for r in rows {
        w.write_record([
            r.position.to_string(),
            r.player_name.clone(),
            r.played.to_string(),
            r.won.to_string(),
            r.drawn.to_string(),
            r.lost.to_string(),
            r.legs_for.to_string(),
            r.legs_against.to_string(),
            r.leg_difference.to_string(),
            r.points.to_string(),
            r.one_eighties.to_string(),
            r.high_checkout.map(|c| c.to_string()).unwrap_or_default(),
        ])
        .map_err(export_err)?;
    }
    finish(w)
}

/// Import players from CSV with a header row containing `name` and optionally `nickname`.
///
/// Blank names and names already on the roster are skipped. Returns how many players were added.
/// A record that fails to parse rejects the whole file and nothing is added.
pub fn import_players_csv<R: Read>(league: &mut League, reader: R) -> Result<usize, LeagueError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| LeagueError::Import(e.to_string()))?
        .clone();
    let name_col = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("name"))
        .ok_or_else(|| LeagueError::Import("missing 'name' column".to_string()))?;
    let nickname_col = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("nickname"));

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| LeagueError::Import(e.to_string()))?;
        let name = record.get(name_col).unwrap_or("");
        if name.is_empty() {
            continue;
        }
        let nickname = nickname_col
            .and_then(|c| record.get(c))
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        rows.push((name.to_string(), nickname));
    }

    // Roster is only touched once every record parsed.
    let before = league.players.len();
    let mut added = 0;
    for (name, nickname) in rows {
        match league.add_player(name.as_str(), nickname) {
            Ok(_) => added += 1,
            Err(LeagueError::DuplicatePlayerName) => {
                log::debug!("Skipping duplicate player '{}' in import", name);
            }
            Err(e) => {
                league.players.truncate(before);
                return Err(e);
            }
        }
    }
    log::info!("Imported {} player(s) into league '{}'", added, league.name);
    Ok(added)
}
