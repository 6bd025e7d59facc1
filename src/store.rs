use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use serde::Serialize;

use crate::error::{AnalyticsError, Result};

/// Opens the snapshot read-only. Every consumer of this module is a pure
/// reader; the tool never mutates the archive.
pub fn open_db(path: &Path) -> Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| AnalyticsError::Connection {
        path: path.to_path_buf(),
        source,
    })
}

/// A game with both scores recorded. Undecided games never leave the store
/// layer, so every analysis can assume complete results.
#[derive(Debug, Clone, Serialize)]
pub struct DecidedGame {
    pub id: String,
    pub league_id: String,
    pub home_team_id: i64,
    pub guest_team_id: i64,
    pub home_score: i64,
    pub guest_score: i64,
    pub total_goals: Option<i64>,
    pub start_month: Option<i64>,
    pub start_month_name: Option<String>,
    pub start_day_of_week: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    HomeWin,
    Draw,
    GuestWin,
}

impl DecidedGame {
    pub fn outcome(&self) -> Outcome {
        if self.home_score > self.guest_score {
            Outcome::HomeWin
        } else if self.home_score < self.guest_score {
            Outcome::GuestWin
        } else {
            Outcome::Draw
        }
    }

    /// Combined goals. The stored `total_goals` column equals the sum of the
    /// scores whenever it is present, so the computed sum is authoritative
    /// and a null derived column cannot drop a decided game from an average.
    pub fn total(&self) -> i64 {
        self.total_goals
            .unwrap_or(self.home_score + self.guest_score)
    }

    pub fn goal_diff(&self) -> i64 {
        self.home_score - self.guest_score
    }

    /// Season year of the league this game belongs to.
    pub fn season_year(&self) -> Option<i64> {
        season_year(&self.league_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerRow {
    pub id: i64,
    pub name: String,
    pub birth_year: Option<i64>,
}

/// One player's tally in one league-season. `team` is the denormalized text
/// name as stored, not a reference into `teams`.
#[derive(Debug, Clone, Serialize)]
pub struct ScorerRow {
    pub player_id: i64,
    pub league_id: String,
    pub team: String,
    pub goals: i64,
    pub games: i64,
}

/// League identifiers embed their season year as the leading four
/// characters ("2019-dm-herren" -> 2019). That prefix is the only place the
/// year lives, so identifiers that do not follow the convention yield None.
pub fn season_year(league_id: &str) -> Option<i64> {
    let prefix = league_id.get(0..4)?;
    prefix.parse::<i64>().ok()
}

pub fn load_decided_games(conn: &Connection) -> Result<Vec<DecidedGame>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT
                id, league_id, home_team_id, guest_team_id,
                home_score, guest_score, total_goals,
                start_month, start_month_name, start_day_of_week
            FROM games
            WHERE home_score IS NOT NULL
              AND guest_score IS NOT NULL
            ORDER BY id ASC
            "#,
        )
        .map_err(AnalyticsError::query("prepare decided games query"))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(DecidedGame {
                id: row.get(0)?,
                league_id: row.get(1)?,
                home_team_id: row.get(2)?,
                guest_team_id: row.get(3)?,
                home_score: row.get(4)?,
                guest_score: row.get(5)?,
                total_goals: row.get(6)?,
                start_month: row.get(7)?,
                start_month_name: row.get(8)?,
                start_day_of_week: row.get(9)?,
            })
        })
        .map_err(AnalyticsError::query("query decided games"))?;

    collect_rows(rows, "decode decided game row")
}

pub fn load_teams(conn: &Connection) -> Result<Vec<TeamRow>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM teams ORDER BY id ASC")
        .map_err(AnalyticsError::query("prepare teams query"))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(TeamRow {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .map_err(AnalyticsError::query("query teams"))?;
    collect_rows(rows, "decode team row")
}

pub fn load_players(conn: &Connection) -> Result<Vec<PlayerRow>> {
    let mut stmt = conn
        .prepare("SELECT id, name, birth_year FROM players ORDER BY id ASC")
        .map_err(AnalyticsError::query("prepare players query"))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(PlayerRow {
                id: row.get(0)?,
                name: row.get(1)?,
                birth_year: row.get(2)?,
            })
        })
        .map_err(AnalyticsError::query("query players"))?;
    collect_rows(rows, "decode player row")
}

pub fn load_scorers(conn: &Connection) -> Result<Vec<ScorerRow>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT player_id, league_id, team, goals, games
            FROM scorers
            ORDER BY player_id ASC, league_id ASC
            "#,
        )
        .map_err(AnalyticsError::query("prepare scorers query"))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(ScorerRow {
                player_id: row.get(0)?,
                league_id: row.get(1)?,
                team: row.get(2)?,
                goals: row.get(3)?,
                games: row.get(4)?,
            })
        })
        .map_err(AnalyticsError::query("query scorers"))?;
    collect_rows(rows, "decode scorer row")
}

fn collect_rows<T>(
    rows: impl Iterator<Item = rusqlite::Result<T>>,
    what: &'static str,
) -> Result<Vec<T>> {
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(AnalyticsError::query(what))?);
    }
    Ok(out)
}
