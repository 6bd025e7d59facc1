#![allow(dead_code)]

use rusqlite::{params, Connection};

/// In-memory replica of the archive schema. `games.id` deliberately has no
/// primary key so duplicate-id scenarios stay constructible for the audit.
pub fn fixture_db() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch(
        r#"
        CREATE TABLE seasons (id TEXT NOT NULL, name TEXT NOT NULL);
        CREATE TABLE leagues (id TEXT NOT NULL, season_id TEXT NOT NULL, name TEXT);
        CREATE TABLE teams (id INTEGER NOT NULL, name TEXT NOT NULL);
        CREATE TABLE players (id INTEGER NOT NULL, name TEXT NOT NULL, birth_year INTEGER);
        CREATE TABLE games (
            id TEXT NOT NULL,
            league_id TEXT NOT NULL,
            home_team_id INTEGER,
            guest_team_id INTEGER,
            home_team TEXT,
            guest_team TEXT,
            result TEXT,
            home_score INTEGER,
            guest_score INTEGER,
            total_goals INTEGER,
            start_month INTEGER,
            start_month_name TEXT,
            start_day_of_week TEXT,
            is_details_processed INTEGER NOT NULL DEFAULT 0,
            notes TEXT
        );
        CREATE TABLE scorers (
            player_id INTEGER NOT NULL,
            league_id TEXT NOT NULL,
            team TEXT NOT NULL DEFAULT '',
            goals INTEGER NOT NULL,
            games INTEGER NOT NULL
        );
        CREATE TABLE game_events (game_id TEXT NOT NULL, event_type TEXT);
        CREATE TABLE game_quarter_scores (game_id TEXT NOT NULL, quarter INTEGER);
        CREATE TABLE game_officials (game_id TEXT NOT NULL, name TEXT);
        CREATE TABLE game_lineups (game_id TEXT NOT NULL, player TEXT);
        CREATE TABLE game_team_details (game_id TEXT NOT NULL, team TEXT);
        "#,
    )
    .expect("create fixture schema");
    conn
}

pub fn insert_team(conn: &Connection, id: i64, name: &str) {
    conn.execute("INSERT INTO teams (id, name) VALUES (?1, ?2)", params![id, name])
        .expect("insert team");
}

pub fn insert_player(conn: &Connection, id: i64, name: &str, birth_year: Option<i64>) {
    conn.execute(
        "INSERT INTO players (id, name, birth_year) VALUES (?1, ?2, ?3)",
        params![id, name, birth_year],
    )
    .expect("insert player");
}

pub fn insert_scorer(
    conn: &Connection,
    player_id: i64,
    league_id: &str,
    team: &str,
    goals: i64,
    games: i64,
) {
    conn.execute(
        "INSERT INTO scorers (player_id, league_id, team, goals, games) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![player_id, league_id, team, goals, games],
    )
    .expect("insert scorer");
}

pub fn insert_decided_game(
    conn: &Connection,
    id: &str,
    league_id: &str,
    home_team_id: i64,
    guest_team_id: i64,
    home_score: i64,
    guest_score: i64,
) {
    conn.execute(
        r#"
        INSERT INTO games (
            id, league_id, home_team_id, guest_team_id,
            result, home_score, guest_score, total_goals
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            id,
            league_id,
            home_team_id,
            guest_team_id,
            format!("{home_score} : {guest_score}"),
            home_score,
            guest_score,
            home_score + guest_score,
        ],
    )
    .expect("insert decided game");
}

/// A scheduled game whose result has not been recorded yet.
pub fn insert_open_game(
    conn: &Connection,
    id: &str,
    league_id: &str,
    home_team_id: i64,
    guest_team_id: i64,
) {
    conn.execute(
        r#"
        INSERT INTO games (id, league_id, home_team_id, guest_team_id, result)
        VALUES (?1, ?2, ?3, ?4, ' - ')
        "#,
        params![id, league_id, home_team_id, guest_team_id],
    )
    .expect("insert open game");
}

pub fn insert_game_event(conn: &Connection, game_id: &str, event_type: &str) {
    conn.execute(
        "INSERT INTO game_events (game_id, event_type) VALUES (?1, ?2)",
        params![game_id, event_type],
    )
    .expect("insert game event");
}

pub fn set_details_processed(conn: &Connection, game_id: &str) {
    conn.execute(
        "UPDATE games SET is_details_processed = 1 WHERE id = ?1",
        params![game_id],
    )
    .expect("mark game processed");
}

pub fn set_notes(conn: &Connection, game_id: &str, notes: &str) {
    conn.execute(
        "UPDATE games SET notes = ?1 WHERE id = ?2",
        params![notes, game_id],
    )
    .expect("set game notes");
}

pub fn set_team_names(conn: &Connection, game_id: &str, home: &str, guest: &str) {
    conn.execute(
        "UPDATE games SET home_team = ?1, guest_team = ?2 WHERE id = ?3",
        params![home, guest, game_id],
    )
    .expect("set denormalized team names");
}
