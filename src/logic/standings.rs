//! League table: aggregate played fixtures into ranked standings.

use crate::models::{
    Fixture, FixtureResult, Outcome, Player, PlayerId, PlayerMatchStats, PointsRule, Season,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One line of the league table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    /// 1-based rank after tie-breaks.
    pub position: usize,
    pub player_id: PlayerId,
    pub player_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub legs_for: u64,
    pub legs_against: u64,
    pub leg_difference: i64,
    pub points: u64,
    pub one_eighties: u64,
    pub high_checkout: Option<u32>,
}

/// Which side of a fixture a row is being updated for.
#[derive(Clone, Copy)]
enum Side {
    Home,
    Away,
}

impl StandingRow {
    fn new(player_id: PlayerId, player_name: String) -> Self {
        Self {
            player_id,
            player_name,
            ..Self::default()
        }
    }

    fn apply(&mut self, result: &FixtureResult, side: Side, points: &PointsRule) {
        let (legs_for, legs_against, stats, won, lost) = match side {
            Side::Home => (
                result.home_legs,
                result.away_legs,
                &result.home_stats,
                Outcome::HomeWin,
                Outcome::AwayWin,
            ),
            Side::Away => (
                result.away_legs,
                result.home_legs,
                &result.away_stats,
                Outcome::AwayWin,
                Outcome::HomeWin,
            ),
        };
        self.played += 1;
        match result.outcome() {
            o if o == won => {
                self.won += 1;
                self.points += u64::from(points.win);
            }
            o if o == lost => {
                self.lost += 1;
                self.points += u64::from(points.loss);
            }
            _ => {
                self.drawn += 1;
                self.points += u64::from(points.draw);
            }
        }
        self.legs_for += u64::from(legs_for);
        self.legs_against += u64::from(legs_against);
        self.leg_difference += i64::from(legs_for) - i64::from(legs_against);
        self.add_stats(stats);
    }

    fn add_stats(&mut self, stats: &PlayerMatchStats) {
        self.one_eighties += u64::from(stats.one_eighties);
        self.high_checkout = self.high_checkout.max(stats.high_checkout);
    }

    fn primary_key(&self) -> (u64, i64, u64) {
        (self.points, self.leg_difference, self.legs_for)
    }
}

/// Points each player in `group` earned in fixtures played only against other members of `group`.
fn head_to_head_points(
    fixtures: &[&Fixture],
    group: &HashSet<PlayerId>,
    points: &PointsRule,
) -> HashMap<PlayerId, u64> {
    let mut table: HashMap<PlayerId, u64> = group.iter().map(|&id| (id, 0)).collect();
    for f in fixtures {
        if !(group.contains(&f.home) && group.contains(&f.away)) {
            continue;
        }
        let Some(result) = f.result else { continue };
        let (home, away) = match result.outcome() {
            Outcome::HomeWin => (points.win, points.loss),
            Outcome::AwayWin => (points.loss, points.win),
            Outcome::Draw => (points.draw, points.draw),
        };
        *table.entry(f.home).or_default() += u64::from(home);
        *table.entry(f.away).or_default() += u64::from(away);
    }
    table
}

/// Compute the league table for a season.
///
/// Every participant found in `players` is listed, played or not. Ranking order:
/// 1. points
/// 2. leg difference
/// 3. legs won
/// 4. head-to-head points among the players still level on 1-3
/// 5. fixtures won
/// 6. name (case-insensitive, ascending)
pub fn compute_standings(season: &Season, players: &[Player]) -> Vec<StandingRow> {
    let names: HashMap<PlayerId, &str> = players.iter().map(|p| (p.id, p.name.as_str())).collect();
    let points = &season.settings.points;

    let mut rows: HashMap<PlayerId, StandingRow> = season
        .participants
        .iter()
        .filter_map(|&id| {
            let name = names.get(&id)?;
            Some((id, StandingRow::new(id, name.to_string())))
        })
        .collect();

    let played: Vec<&Fixture> = season.fixtures().filter(|f| f.is_played()).collect();
    for f in &played {
        let Some(result) = f.result else { continue };
        if let Some(row) = rows.get_mut(&f.home) {
            row.apply(&result, Side::Home, points);
        }
        if let Some(row) = rows.get_mut(&f.away) {
            row.apply(&result, Side::Away, points);
        }
    }

    let mut table: Vec<StandingRow> = rows.into_values().collect();
    table.sort_by(|a, b| b.primary_key().cmp(&a.primary_key()));

    let mut start = 0;
    while start < table.len() {
        let key = table[start].primary_key();
        let len = table[start..]
            .iter()
            .take_while(|r| r.primary_key() == key)
            .count();
        let end = start + len;
        if len > 1 {
            let group: HashSet<PlayerId> = table[start..end].iter().map(|r| r.player_id).collect();
            let h2h = head_to_head_points(&played, &group, points);
            table[start..end].sort_by(|a, b| {
                h2h[&b.player_id]
                    .cmp(&h2h[&a.player_id])
                    .then(b.won.cmp(&a.won))
                    .then_with(|| {
                        a.player_name
                            .to_lowercase()
                            .cmp(&b.player_name.to_lowercase())
                    })
            });
        }
        start = end;
    }

    for (idx, row) in table.iter_mut().enumerate() {
        row.position = idx + 1;
    }
    table
}
