//! Integration tests for the league table and its tie-breaks.

use darts_league_web::{
    compute_standings, record_result, start_season, FixtureResult, League, MatchFormat,
    PlayerId, PlayerMatchStats, PointsRule, Season, SeasonId, SeasonSettings,
};

fn started_league(names: &[&str], settings: SeasonSettings) -> (League, SeasonId, Vec<PlayerId>) {
    let mut league = League::new("Table League").unwrap();
    let ids: Vec<PlayerId> = names
        .iter()
        .map(|n| league.add_player(*n, None).unwrap())
        .collect();
    let season_id = league.create_season(settings).unwrap();
    for &id in &ids {
        league.add_participant(season_id, id).unwrap();
    }
    start_season(league.season_mut(season_id).unwrap(), false).unwrap();
    (league, season_id, ids)
}

/// Record `winner_legs`-`loser_legs` for the fixture between the two players, whichever is home.
fn play(season: &mut Season, winner: PlayerId, loser: PlayerId, winner_legs: u32, loser_legs: u32) {
    let fixture = season
        .fixtures()
        .find(|f| f.involves(winner) && f.involves(loser) && !f.is_played())
        .unwrap()
        .clone();
    let result = if fixture.home == winner {
        FixtureResult::new(winner_legs, loser_legs)
    } else {
        FixtureResult::new(loser_legs, winner_legs)
    };
    record_result(season, fixture.id, result).unwrap();
}

fn order(league: &League, season_id: SeasonId) -> Vec<String> {
    let season = league.season(season_id).unwrap();
    compute_standings(season, &league.players)
        .into_iter()
        .map(|r| r.player_name)
        .collect()
}

#[test]
fn unplayed_season_lists_everyone_with_zeros() {
    let (league, season_id, _) = started_league(&["Cat", "amy", "Bob"], SeasonSettings::new("S"));
    let rows = compute_standings(league.season(season_id).unwrap(), &league.players);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.played == 0 && r.points == 0));
    // Fully level: alphabetical, case-insensitive.
    assert_eq!(order(&league, season_id), vec!["amy", "Bob", "Cat"]);
    assert_eq!(
        rows.iter().map(|r| r.position).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn wins_draws_and_losses_score_three_one_zero() {
    let settings = SeasonSettings::new("S").format(MatchFormat::FixedLegs { legs: 4 });
    let (mut league, season_id, ids) = started_league(&["Ann", "Ben", "Cy"], settings);
    let season = league.season_mut(season_id).unwrap();
    play(season, ids[0], ids[1], 3, 1);
    play(season, ids[1], ids[2], 2, 2);
    play(season, ids[2], ids[0], 4, 0);

    let rows = compute_standings(league.season(season_id).unwrap(), &league.players);
    let row = |name: &str| rows.iter().find(|r| r.player_name == name).unwrap();

    assert_eq!((row("Cy").won, row("Cy").drawn, row("Cy").lost), (1, 1, 0));
    assert_eq!(row("Cy").points, 4);
    assert_eq!(row("Ann").points, 3);
    assert_eq!(row("Ben").points, 1);
    assert_eq!(row("Ann").legs_for, 3);
    assert_eq!(row("Ann").legs_against, 5);
    assert_eq!(row("Ann").leg_difference, -2);
    assert!(rows.iter().all(|r| r.played == 2));
    assert_eq!(order(&league, season_id), vec!["Cy", "Ann", "Ben"]);
}

#[test]
fn leg_difference_breaks_points_ties() {
    let (mut league, season_id, ids) = started_league(&["Ann", "Ben", "Cy"], SeasonSettings::new("S"));
    let season = league.season_mut(season_id).unwrap();
    // Everyone wins once; Cy wins big, Ann loses big.
    play(season, ids[0], ids[1], 3, 2);
    play(season, ids[1], ids[2], 3, 2);
    play(season, ids[2], ids[0], 3, 0);
    assert_eq!(order(&league, season_id), vec!["Cy", "Ben", "Ann"]);
}

#[test]
fn head_to_head_decides_before_name() {
    let (mut league, season_id, ids) =
        started_league(&["Zed", "Bob", "Cat", "Dan"], SeasonSettings::new("S"));
    let (zed, bob, cat, dan) = (ids[0], ids[1], ids[2], ids[3]);
    let season = league.season_mut(season_id).unwrap();
    play(season, zed, bob, 3, 2);
    play(season, cat, zed, 3, 2);
    play(season, zed, dan, 3, 0);
    play(season, bob, cat, 3, 0);
    play(season, bob, dan, 3, 2);
    play(season, dan, cat, 3, 0);

    let rows = compute_standings(league.season(season_id).unwrap(), &league.players);
    // Zed and Bob: 6 points, +3 legs, 8 legs won each; Zed won their meeting.
    assert_eq!((rows[0].points, rows[0].leg_difference, rows[0].legs_for), (6, 3, 8));
    assert_eq!((rows[1].points, rows[1].leg_difference, rows[1].legs_for), (6, 3, 8));
    assert_eq!(order(&league, season_id), vec!["Zed", "Bob", "Dan", "Cat"]);
}

#[test]
fn custom_points_rule_and_stats_are_aggregated() {
    let settings = SeasonSettings::new("S")
        .format(MatchFormat::FixedLegs { legs: 2 })
        .points(PointsRule {
            win: 2,
            draw: 1,
            loss: 0,
        });
    let (mut league, season_id, ids) = started_league(&["Ann", "Ben"], settings);
    let season = league.season_mut(season_id).unwrap();
    let fixture = season.fixtures().next().unwrap().clone();
    let stats = |one_eighties, high_checkout| PlayerMatchStats {
        one_eighties,
        high_checkout,
    };
    record_result(
        season,
        fixture.id,
        FixtureResult::new(1, 1).with_stats(stats(2, Some(121)), stats(1, None)),
    )
    .unwrap();

    let rows = compute_standings(league.season(season_id).unwrap(), &league.players);
    assert!(rows.iter().all(|r| r.points == 1 && r.drawn == 1));
    let home = rows.iter().find(|r| r.player_id == fixture.home).unwrap();
    let away = rows.iter().find(|r| r.player_id == fixture.away).unwrap();
    assert_eq!((home.one_eighties, home.high_checkout), (2, Some(121)));
    assert_eq!((away.one_eighties, away.high_checkout), (1, None));
    assert!(ids.contains(&home.player_id) && ids.contains(&away.player_id));
}

#[test]
fn totals_beyond_a_single_fixture_limit_do_not_wrap() {
    let max = u32::MAX;
    let settings = SeasonSettings::new("S").points(PointsRule {
        win: max,
        draw: 0,
        loss: 0,
    });
    let (mut league, season_id, _) = started_league(&["Ann", "Ben", "Cy"], settings);
    let season = league.season_mut(season_id).unwrap();
    let fixtures: Vec<_> = season.fixtures().map(|f| f.id).collect();
    let big = PlayerMatchStats {
        one_eighties: max,
        high_checkout: None,
    };
    for id in fixtures {
        let result = FixtureResult::new(max, 0).with_stats(big, PlayerMatchStats::default());
        record_result(season, id, result).unwrap();
    }

    // Ann is at home twice, Ben once, Cy never.
    let rows = compute_standings(league.season(season_id).unwrap(), &league.players);
    let twice = 2 * u64::from(max);
    assert_eq!(rows[0].player_name, "Ann");
    assert_eq!((rows[0].legs_for, rows[0].points, rows[0].one_eighties), (twice, twice, twice));
    assert_eq!(rows[0].leg_difference, 2 * i64::from(max));
    assert_eq!(order(&league, season_id), vec!["Ann", "Ben", "Cy"]);
    assert_eq!(rows.iter().map(|r| r.legs_for).sum::<u64>(), 3 * u64::from(max));
}

#[test]
fn participants_missing_from_the_roster_are_left_out() {
    let (league, season_id, ids) = started_league(&["Ann", "Ben"], SeasonSettings::new("S"));
    let season = league.season(season_id).unwrap();
    assert!(compute_standings(season, &[]).is_empty());

    let rows = compute_standings(season, &league.players[..1]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].player_id, ids[0]);
}
