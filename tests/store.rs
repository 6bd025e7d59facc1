mod common;

use std::path::Path;

use wasserball_analytics::store::{
    load_decided_games, load_players, load_scorers, load_teams, open_db,
};
use wasserball_analytics::AnalyticsError;

use common::*;

#[test]
fn decided_games_exclude_open_results() {
    let conn = fixture_db();
    insert_decided_game(&conn, "g1", "2020-dm", 1, 2, 10, 4);
    insert_open_game(&conn, "g2", "2020-dm", 2, 1);
    insert_decided_game(&conn, "g3", "2021-dm", 1, 2, 0, 0);

    let games = load_decided_games(&conn).unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].id, "g1");
    assert_eq!(games[1].id, "g3");

    let g1 = &games[0];
    assert_eq!(g1.home_score, 10);
    assert_eq!(g1.guest_score, 4);
    assert_eq!(g1.season_year(), Some(2020));
}

#[test]
fn fixture_games_satisfy_total_goals_invariant() {
    let conn = fixture_db();
    insert_decided_game(&conn, "g1", "2020-dm", 1, 2, 10, 4);
    insert_decided_game(&conn, "g2", "2020-dm", 2, 1, 3, 3);
    insert_decided_game(&conn, "g3", "2021-dm", 1, 2, 0, 7);

    for game in load_decided_games(&conn).unwrap() {
        if let Some(total) = game.total_goals {
            assert_eq!(total, game.home_score + game.guest_score);
        }
        assert_eq!(game.total(), game.home_score + game.guest_score);
    }
}

#[test]
fn entity_loaders_map_rows() {
    let conn = fixture_db();
    insert_team(&conn, 3, "SV Gamma");
    insert_team(&conn, 1, "SV Alpha");
    insert_player(&conn, 10, "Anna", Some(1992));
    insert_player(&conn, 11, "Birte", None);
    insert_scorer(&conn, 10, "2019-dm-damen", "SV Alpha", 44, 16);

    let teams = load_teams(&conn).unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].id, 1);
    assert_eq!(teams[1].name, "SV Gamma");

    let players = load_players(&conn).unwrap();
    assert_eq!(players[0].birth_year, Some(1992));
    assert_eq!(players[1].birth_year, None);

    let scorers = load_scorers(&conn).unwrap();
    assert_eq!(scorers.len(), 1);
    assert_eq!(scorers[0].player_id, 10);
    assert_eq!(scorers[0].team, "SV Alpha");
    assert_eq!(scorers[0].goals, 44);
}

#[test]
fn open_db_reports_connection_error_for_bad_path() {
    let err = open_db(Path::new("/definitely/not/here/seasons.db")).unwrap_err();
    assert!(matches!(err, AnalyticsError::Connection { .. }));
}
