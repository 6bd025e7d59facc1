use std::fmt;

use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;

use crate::config::Config;
use crate::error::{AnalyticsError, Result};

/// Logical tables counted by the census. The ancillary detail tables are
/// only relevant here; the metrics layer never touches them.
pub const CENSUS_TABLES: [&str; 11] = [
    "seasons",
    "leagues",
    "teams",
    "players",
    "games",
    "scorers",
    "game_events",
    "game_quarter_scores",
    "game_officials",
    "game_lineups",
    "game_team_details",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
    Suggestion,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Suggestion => "SUGGESTION",
        };
        f.write_str(label)
    }
}

/// One diagnostic observation. The auditor only reports; it never repairs.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexInfo {
    pub name: String,
    pub table: String,
}

/// Health report over one snapshot: informational baseline numbers plus the
/// ordered findings list.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub table_counts: Vec<TableCount>,
    pub size_bytes: u64,
    pub total_games: u64,
    pub games_without_result: u64,
    pub missing_result_ratio: f64,
    pub games_with_details: u64,
    pub details_ratio: f64,
    pub games_with_events: u64,
    pub event_coverage: f64,
    pub duplicate_game_ids: u64,
    pub indexes: Vec<IndexInfo>,
    pub avg_notes_len: Option<f64>,
    pub findings: Vec<Finding>,
}

/// Runs every check against the snapshot. Read-only throughout; a missing
/// table or column fails the whole audit rather than being papered over.
pub fn run_audit(conn: &Connection, cfg: &Config) -> Result<AuditReport> {
    let mut table_counts = Vec::with_capacity(CENSUS_TABLES.len());
    for table in CENSUS_TABLES {
        let rows = count(
            conn,
            &format!("SELECT COUNT(*) FROM {table}"),
            "census row count",
        )?;
        table_counts.push(TableCount { table, rows });
    }

    let size_bytes = count(
        conn,
        "SELECT page_count * page_size FROM pragma_page_count(), pragma_page_size()",
        "database size estimate",
    )?;

    let total_games = count(conn, "SELECT COUNT(*) FROM games", "count games")?;
    let games_without_result = count(
        conn,
        "SELECT COUNT(*) FROM games WHERE result IS NULL OR result = '' OR result = ' - '",
        "count games without result",
    )?;
    let games_with_details = count(
        conn,
        "SELECT COUNT(*) FROM games WHERE is_details_processed = 1",
        "count detail-processed games",
    )?;
    let games_with_events = count(
        conn,
        "SELECT COUNT(DISTINCT game_id) FROM game_events",
        "count games with events",
    )?;
    let duplicate_game_ids = count(
        conn,
        "SELECT COUNT(*) - COUNT(DISTINCT id) FROM games",
        "duplicate game id check",
    )?;

    let indexes = load_indexes(conn)?;
    let avg_notes_len = conn
        .query_row(
            "SELECT AVG(LENGTH(notes)) FROM games WHERE notes IS NOT NULL",
            [],
            |row| row.get::<_, Option<f64>>(0),
        )
        .map_err(AnalyticsError::query("average notes length"))?;
    let top_team_name = conn
        .query_row(
            r#"
            SELECT home_team, COUNT(*) AS cnt
            FROM games
            WHERE home_team IS NOT NULL
            GROUP BY home_team
            ORDER BY cnt DESC, home_team ASC
            LIMIT 1
            "#,
            [],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?)),
        )
        .optional()
        .map_err(AnalyticsError::query("most frequent team name"))?;

    let missing_result_ratio = ratio(games_without_result, total_games);
    let details_ratio = ratio(games_with_details, total_games);
    let event_coverage = ratio(games_with_events, total_games);

    // Findings in fixed check order; the census, size estimate and event
    // coverage stay informational.
    let mut findings = Vec::new();
    if total_games > 0 && missing_result_ratio > 0.5 {
        findings.push(Finding {
            severity: Severity::Warning,
            message: format!(
                "most games have no recorded result ({games_without_result} of {total_games}, {:.1}%)",
                100.0 * missing_result_ratio
            ),
        });
    }
    if total_games > 0 && details_ratio < cfg.min_details_ratio {
        findings.push(Finding {
            severity: Severity::Warning,
            message: format!(
                "only {:.1}% of games have detailed data (threshold {:.0}%)",
                100.0 * details_ratio,
                100.0 * cfg.min_details_ratio
            ),
        });
    }
    if duplicate_game_ids > 0 {
        findings.push(Finding {
            severity: Severity::Error,
            message: format!("{duplicate_game_ids} duplicate game ids detected"),
        });
    }
    if indexes.is_empty() {
        findings.push(Finding {
            severity: Severity::Warning,
            message: "no custom indexes defined; grouped queries will scan full tables"
                .to_string(),
        });
    }
    if let Some(avg) = avg_notes_len {
        if avg > cfg.max_avg_notes_len {
            findings.push(Finding {
                severity: Severity::Suggestion,
                message: format!(
                    "large notes field (avg {avg:.0} chars); consider compression"
                ),
            });
        }
    }
    if let Some((name, occurrences)) = top_team_name {
        findings.push(Finding {
            severity: Severity::Suggestion,
            message: format!(
                "team names stored as text ({occurrences} occurrences of '{name}'); consider normalization"
            ),
        });
    }

    Ok(AuditReport {
        table_counts,
        size_bytes,
        total_games,
        games_without_result,
        missing_result_ratio,
        games_with_details,
        details_ratio,
        games_with_events,
        event_coverage,
        duplicate_game_ids,
        indexes,
        avg_notes_len,
        findings,
    })
}

fn count(conn: &Connection, sql: &str, what: &'static str) -> Result<u64> {
    conn.query_row(sql, [], |row| row.get::<_, u64>(0))
        .map_err(AnalyticsError::query(what))
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn load_indexes(conn: &Connection) -> Result<Vec<IndexInfo>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT name, tbl_name
            FROM sqlite_master
            WHERE type = 'index' AND name NOT LIKE 'sqlite_%'
            ORDER BY name ASC
            "#,
        )
        .map_err(AnalyticsError::query("prepare index listing"))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(IndexInfo {
                name: row.get(0)?,
                table: row.get(1)?,
            })
        })
        .map_err(AnalyticsError::query("query index listing"))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(AnalyticsError::query("decode index row"))?);
    }
    Ok(out)
}
