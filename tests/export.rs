//! Integration tests for CSV downloads and roster import.

use darts_league_web::{
    compute_standings, import_players_csv, record_result, schedule_csv, standings_csv,
    start_season, FixtureResult, League, LeagueError, SeasonSettings,
};

fn started_three_player_league() -> (League, darts_league_web::SeasonId) {
    let mut league = League::new("CSV League").unwrap();
    let ids: Vec<_> = ["Ann", "Ben", "Cy"]
        .iter()
        .map(|n| league.add_player(*n, None).unwrap())
        .collect();
    let season_id = league.create_season(SeasonSettings::new("S")).unwrap();
    for &id in &ids {
        league.add_participant(season_id, id).unwrap();
    }
    start_season(league.season_mut(season_id).unwrap(), false).unwrap();
    (league, season_id)
}

#[test]
fn schedule_csv_lists_fixtures_and_byes() {
    let (mut league, season_id) = started_three_player_league();
    let season = league.season_mut(season_id).unwrap();
    let first = season.matchdays[0].fixtures[0].id;
    record_result(season, first, FixtureResult::new(3, 1)).unwrap();

    let csv = schedule_csv(league.season(season_id).unwrap(), &league.players).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "matchday,date,home,away,home_legs,away_legs");
    // Matchday 1: Ann has the bye, Ben hosts Cy.
    assert_eq!(lines[1], "1,,Ben,Cy,3,1");
    assert_eq!(lines[2], "1,,Ann,BYE,,");
    // 3 fixtures + 3 byes.
    assert_eq!(lines.len(), 7);
}

#[test]
fn standings_csv_has_one_row_per_participant() {
    let (mut league, season_id) = started_three_player_league();
    let season = league.season_mut(season_id).unwrap();
    let first = season.matchdays[0].fixtures[0].id;
    record_result(season, first, FixtureResult::new(3, 1)).unwrap();

    let rows = compute_standings(league.season(season_id).unwrap(), &league.players);
    let csv = standings_csv(&rows).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "position,player,played,won,drawn,lost,legs_for,legs_against,leg_difference,points,one_eighties,high_checkout"
    );
    assert_eq!(lines[1], "1,Ben,1,1,0,0,3,1,2,3,0,");
    assert_eq!(lines.len(), 4);
}

#[test]
fn import_adds_new_players_and_skips_duplicates() {
    let mut league = League::new("Import League").unwrap();
    league.add_player("Phil", None).unwrap();
    let data = "name,nickname\nPhil,The Power\n  Michael , Mighty Mike\n,\nGerwyn,\n";

    let added = import_players_csv(&mut league, data.as_bytes()).unwrap();
    assert_eq!(added, 2);
    assert_eq!(league.players.len(), 3);
    let michael = league.players.iter().find(|p| p.name == "Michael").unwrap();
    assert_eq!(michael.nickname.as_deref(), Some("Mighty Mike"));
    let gerwyn = league.players.iter().find(|p| p.name == "Gerwyn").unwrap();
    assert_eq!(gerwyn.nickname, None);
}

#[test]
fn import_requires_name_column() {
    let mut league = League::new("Import League").unwrap();
    let err = import_players_csv(&mut league, "player\nPhil\n".as_bytes()).unwrap_err();
    assert!(matches!(err, LeagueError::Import(_)));
    assert!(league.players.is_empty());
}

#[test]
fn import_with_a_bad_record_leaves_the_roster_alone() {
    let mut league = League::new("Import League").unwrap();
    league.add_player("Phil", None).unwrap();
    let data: &[u8] = b"name,nickname\nAnn,a\nBen,b\n\xff\xfe,c\n";

    let err = import_players_csv(&mut league, data).unwrap_err();
    assert!(matches!(err, LeagueError::Import(_)));
    assert_eq!(league.players.len(), 1);
    assert_eq!(league.players[0].name, "Phil");
}
