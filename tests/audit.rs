mod common;

use wasserball_analytics::audit::{run_audit, Severity, CENSUS_TABLES};
use wasserball_analytics::Config;

use common::*;

#[test]
fn census_counts_every_logical_table() {
    let conn = fixture_db();
    insert_team(&conn, 1, "SV Alpha");
    insert_team(&conn, 2, "SV Beta");
    insert_decided_game(&conn, "g1", "2020-dm", 1, 2, 10, 4);
    insert_game_event(&conn, "g1", "goal");
    insert_game_event(&conn, "g1", "timeout");

    let report = run_audit(&conn, &Config::default()).unwrap();
    assert_eq!(report.table_counts.len(), CENSUS_TABLES.len());
    let rows_of = |table: &str| {
        report
            .table_counts
            .iter()
            .find(|c| c.table == table)
            .unwrap()
            .rows
    };
    assert_eq!(rows_of("teams"), 2);
    assert_eq!(rows_of("games"), 1);
    assert_eq!(rows_of("game_events"), 2);
    assert_eq!(rows_of("scorers"), 0);
    assert!(report.size_bytes > 0);
}

#[test]
fn duplicate_game_id_yields_one_error_finding() {
    let conn = fixture_db();
    insert_team(&conn, 1, "SV Alpha");
    insert_team(&conn, 2, "SV Beta");
    insert_decided_game(&conn, "g1", "2020-dm", 1, 2, 10, 4);
    insert_decided_game(&conn, "g1", "2020-dm", 2, 1, 4, 10);
    insert_decided_game(&conn, "g2", "2020-dm", 1, 2, 7, 7);

    let report = run_audit(&conn, &Config::default()).unwrap();
    assert_eq!(report.duplicate_game_ids, 1);
    let dup_findings: Vec<_> = report
        .findings
        .iter()
        .filter(|f| f.severity == Severity::Error && f.message.contains("duplicate game ids"))
        .collect();
    assert_eq!(dup_findings.len(), 1);
}

#[test]
fn clean_games_table_has_no_duplicate_finding() {
    let conn = fixture_db();
    insert_decided_game(&conn, "g1", "2020-dm", 1, 2, 5, 3);
    insert_decided_game(&conn, "g2", "2020-dm", 2, 1, 3, 5);

    let report = run_audit(&conn, &Config::default()).unwrap();
    assert_eq!(report.duplicate_game_ids, 0);
    assert!(report.findings.iter().all(|f| f.severity != Severity::Error));
}

#[test]
fn low_detail_coverage_warns_against_threshold() {
    let conn = fixture_db();
    for n in 0..4 {
        insert_decided_game(&conn, &format!("g{n}"), "2020-dm", 1, 2, 5, 3);
    }
    set_details_processed(&conn, "g0");

    let report = run_audit(&conn, &Config::default()).unwrap();
    assert_eq!(report.games_with_details, 1);
    assert!(report
        .findings
        .iter()
        .any(|f| f.severity == Severity::Warning && f.message.contains("detailed data")));

    // A lower configured threshold silences the warning.
    let relaxed = Config {
        min_details_ratio: 0.2,
        ..Config::default()
    };
    let report = run_audit(&conn, &relaxed).unwrap();
    assert!(!report
        .findings
        .iter()
        .any(|f| f.message.contains("detailed data")));
}

#[test]
fn missing_results_warn_when_most_games_lack_them() {
    let conn = fixture_db();
    insert_decided_game(&conn, "g1", "2020-dm", 1, 2, 5, 3);
    for n in 2..=5 {
        insert_open_game(&conn, &format!("g{n}"), "2020-dm", 1, 2);
    }
    set_details_processed(&conn, "g1");

    let report = run_audit(&conn, &Config::default()).unwrap();
    assert_eq!(report.games_without_result, 4);
    assert_eq!(report.total_games, 5);
    assert!(report
        .findings
        .iter()
        .any(|f| f.severity == Severity::Warning && f.message.contains("no recorded result")));
}

#[test]
fn index_presence_check() {
    let conn = fixture_db();
    insert_decided_game(&conn, "g1", "2020-dm", 1, 2, 5, 3);

    let report = run_audit(&conn, &Config::default()).unwrap();
    assert!(report.indexes.is_empty());
    assert!(report
        .findings
        .iter()
        .any(|f| f.severity == Severity::Warning && f.message.contains("indexes")));

    conn.execute_batch("CREATE INDEX idx_games_league ON games(league_id);")
        .unwrap();
    let report = run_audit(&conn, &Config::default()).unwrap();
    assert_eq!(report.indexes.len(), 1);
    assert_eq!(report.indexes[0].name, "idx_games_league");
    assert_eq!(report.indexes[0].table, "games");
    assert!(!report.findings.iter().any(|f| f.message.contains("indexes")));
}

#[test]
fn oversized_notes_suggest_compression() {
    let conn = fixture_db();
    insert_decided_game(&conn, "g1", "2020-dm", 1, 2, 5, 3);
    insert_decided_game(&conn, "g2", "2020-dm", 2, 1, 3, 5);
    let long_notes = "x".repeat(2000);
    set_notes(&conn, "g1", &long_notes);
    set_notes(&conn, "g2", &long_notes);

    let report = run_audit(&conn, &Config::default()).unwrap();
    assert_eq!(report.avg_notes_len, Some(2000.0));
    assert!(report
        .findings
        .iter()
        .any(|f| f.severity == Severity::Suggestion && f.message.contains("notes")));
}

#[test]
fn denormalized_team_names_are_surfaced() {
    let conn = fixture_db();
    for n in 0..3 {
        let id = format!("g{n}");
        insert_decided_game(&conn, &id, "2020-dm", 1, 2, 5, 3);
        set_team_names(&conn, &id, "Wasserfreunde Spandau", "SV Cannstatt");
    }
    insert_decided_game(&conn, "g9", "2020-dm", 2, 1, 4, 4);
    set_team_names(&conn, "g9", "SV Cannstatt", "Wasserfreunde Spandau");

    let report = run_audit(&conn, &Config::default()).unwrap();
    let finding = report
        .findings
        .iter()
        .find(|f| f.severity == Severity::Suggestion && f.message.contains("team names"))
        .expect("denormalization finding");
    assert!(finding.message.contains("3 occurrences"));
    assert!(finding.message.contains("Wasserfreunde Spandau"));
}

#[test]
fn empty_games_table_produces_no_ratio_findings() {
    let conn = fixture_db();
    let report = run_audit(&conn, &Config::default()).unwrap();
    assert_eq!(report.total_games, 0);
    assert_eq!(report.missing_result_ratio, 0.0);
    assert_eq!(report.details_ratio, 0.0);
    assert_eq!(report.event_coverage, 0.0);
    assert!(!report.findings.iter().any(|f| f.message.contains("result")));
    assert!(!report
        .findings
        .iter()
        .any(|f| f.message.contains("detailed data")));
    // The index warning is still expected on a bare fixture.
    assert!(report.findings.iter().any(|f| f.message.contains("indexes")));
}

#[test]
fn findings_keep_fixed_check_order() {
    let conn = fixture_db();
    // Trip every finding at once: mostly missing results, no details,
    // duplicate ids, no indexes, huge notes, denormalized names.
    insert_decided_game(&conn, "g1", "2020-dm", 1, 2, 5, 3);
    insert_decided_game(&conn, "g1", "2020-dm", 1, 2, 5, 3);
    for n in 2..=9 {
        insert_open_game(&conn, &format!("g{n}"), "2020-dm", 1, 2);
    }
    set_notes(&conn, "g1", &"n".repeat(3000));
    set_team_names(&conn, "g1", "SV Alpha", "SV Beta");

    let report = run_audit(&conn, &Config::default()).unwrap();
    let needles = [
        "no recorded result",
        "detailed data",
        "duplicate game ids",
        "indexes",
        "notes",
        "team names",
    ];
    let positions: Vec<usize> = needles
        .iter()
        .map(|needle| {
            report
                .findings
                .iter()
                .position(|f| f.message.contains(needle))
                .unwrap_or_else(|| panic!("missing finding for {needle}"))
        })
        .collect();
    for pair in positions.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn audit_is_idempotent_on_unchanged_snapshot() {
    let conn = fixture_db();
    insert_decided_game(&conn, "g1", "2020-dm", 1, 2, 5, 3);
    insert_open_game(&conn, "g2", "2020-dm", 2, 1);

    let first = serde_json::to_string(&run_audit(&conn, &Config::default()).unwrap()).unwrap();
    let second = serde_json::to_string(&run_audit(&conn, &Config::default()).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn event_coverage_is_informational_only() {
    let conn = fixture_db();
    insert_decided_game(&conn, "g1", "2020-dm", 1, 2, 5, 3);
    insert_decided_game(&conn, "g2", "2020-dm", 2, 1, 2, 2);
    insert_game_event(&conn, "g1", "goal");
    insert_game_event(&conn, "g1", "exclusion");
    set_details_processed(&conn, "g1");
    set_details_processed(&conn, "g2");

    let report = run_audit(&conn, &Config::default()).unwrap();
    assert_eq!(report.games_with_events, 1);
    assert!((report.event_coverage - 0.5).abs() < 1e-9);
    assert!(!report.findings.iter().any(|f| f.message.contains("event")));
}
