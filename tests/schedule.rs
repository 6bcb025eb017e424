//! Integration tests for round-robin generation and matchday building.

use chrono::NaiveDate;
use darts_league_web::{build_matchdays, round_robin, LeagueError, RoundMode, SeasonSettings};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

fn unordered(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

#[test]
fn single_round_meets_every_opponent_once() {
    for n in 2..=9 {
        let participants: Vec<usize> = (0..n).collect();
        let rounds = round_robin(&participants, RoundMode::Single);
        let expected_rounds = if n % 2 == 0 { n - 1 } else { n };
        assert_eq!(rounds.len(), expected_rounds, "n = {n}");

        let mut meetings: HashMap<(usize, usize), u32> = HashMap::new();
        for round in &rounds {
            let mut seen = HashSet::new();
            for p in &round.pairings {
                assert!(seen.insert(p.home), "n = {n}: {} plays twice in a round", p.home);
                assert!(seen.insert(p.away), "n = {n}: {} plays twice in a round", p.away);
                *meetings.entry(unordered(p.home, p.away)).or_default() += 1;
            }
            if let Some(bye) = round.bye {
                assert!(seen.insert(bye), "n = {n}: bye player also scheduled");
            }
            assert_eq!(seen.len(), n, "n = {n}: everyone plays or sits out");
        }
        assert_eq!(meetings.len(), n * (n - 1) / 2, "n = {n}");
        assert!(meetings.values().all(|&c| c == 1), "n = {n}");
    }
}

#[test]
fn odd_field_has_one_bye_per_round_and_per_player() {
    let participants: Vec<usize> = (0..7).collect();
    let rounds = round_robin(&participants, RoundMode::Single);
    let byes: Vec<usize> = rounds.iter().map(|r| r.bye.unwrap()).collect();
    let distinct: HashSet<usize> = byes.iter().copied().collect();
    assert_eq!(byes.len(), 7);
    assert_eq!(distinct.len(), 7);
    // The anchor sits out first: it is paired with the padding slot in round 1.
    assert_eq!(byes[0], 0);
}

#[test]
fn anchor_plays_at_home_against_the_rotating_slot() {
    let rounds = round_robin(&['A', 'B', 'C', 'D', 'E', 'F'], RoundMode::Single);
    let anchor_opponents: Vec<char> = rounds
        .iter()
        .map(|r| {
            assert_eq!(r.pairings[0].home, 'A');
            r.pairings[0].away
        })
        .collect();
    // Last slot moves into position 1 each round, so the anchor's opponent walks backwards.
    assert_eq!(anchor_opponents, vec!['F', 'E', 'D', 'C', 'B']);
}

#[test]
fn double_round_mirrors_first_pass() {
    let participants: Vec<usize> = (0..5).collect();
    let single = round_robin(&participants, RoundMode::Single);
    let double = round_robin(&participants, RoundMode::Double);
    assert_eq!(double.len(), single.len() * 2);

    for (first, second) in single.iter().zip(&double[single.len()..]) {
        assert_eq!(first.bye, second.bye);
        assert_eq!(first.pairings.len(), second.pairings.len());
        for (a, b) in first.pairings.iter().zip(&second.pairings) {
            assert_eq!((a.home, a.away), (b.away, b.home));
        }
    }

    // Every ordered (home, away) pair occurs exactly once.
    let ordered: HashSet<(usize, usize)> = double
        .iter()
        .flat_map(|r| r.pairings.iter().map(|p| (p.home, p.away)))
        .collect();
    assert_eq!(ordered.len(), 5 * 4);
}

#[test]
fn matchdays_are_numbered_and_dated() {
    let players: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
    let start = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    let settings = SeasonSettings::new("Autumn")
        .round_mode(RoundMode::Double)
        .starting(start, 14);

    let matchdays = build_matchdays(&players, &settings).unwrap();
    assert_eq!(matchdays.len(), 6);
    for (idx, md) in matchdays.iter().enumerate() {
        assert_eq!(md.number, idx as u32 + 1);
        assert_eq!(md.fixtures.len(), 2);
        assert!(md.bye.is_none());
        assert!(md.fixtures.iter().all(|f| f.matchday == md.number && f.result.is_none()));
    }
    assert_eq!(matchdays[0].date, Some(start));
    assert_eq!(matchdays[5].date, NaiveDate::from_ymd_opt(2026, 11, 10));

    let ids: HashSet<Uuid> = matchdays
        .iter()
        .flat_map(|md| md.fixtures.iter().map(|f| f.id))
        .collect();
    assert_eq!(ids.len(), 12);
}

#[test]
fn matchdays_without_start_date_are_undated() {
    let players: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
    let matchdays = build_matchdays(&players, &SeasonSettings::new("Open")).unwrap();
    assert_eq!(matchdays.len(), 3);
    assert!(matchdays.iter().all(|md| md.date.is_none() && md.bye.is_some()));
}

#[test]
fn matchday_dates_past_the_calendar_are_rejected() {
    let players: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let settings = SeasonSettings::new("Forever").starting(start, u32::MAX);
    // Matchday 1 is the start date itself; matchday 2 is ~11.7 million years later.
    assert_eq!(
        build_matchdays(&players, &settings),
        Err(LeagueError::DateOutOfRange { matchday: 2 })
    );
}
