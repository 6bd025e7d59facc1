use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Chart, ChartType, Workbook, Worksheet};
use serde::Serialize;

use crate::audit::AuditReport;
use crate::career_scoring::PlayerCareer;
use crate::home_advantage::HomeAdvantage;
use crate::season_trends::SeasonTrend;
use crate::seasonal_patterns::{MonthPattern, WeekdayPattern};
use crate::standings::TeamStanding;

/// Everything one run produces, serialized as a single artifact. Contains
/// no timestamps so re-running against an unchanged snapshot is
/// byte-identical.
#[derive(Serialize)]
pub struct RunSummary<'a> {
    pub standings: &'a [TeamStanding],
    pub top_scorers: &'a [PlayerCareer],
    pub season_trends: &'a [SeasonTrend],
    pub month_patterns: &'a [MonthPattern],
    pub weekday_patterns: &'a [WeekdayPattern],
    pub home_advantage: &'a HomeAdvantage,
    pub audit: &'a AuditReport,
}

// ---------------------------------------------------------------------------
// Console rendering
// ---------------------------------------------------------------------------

fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "-".repeat(80));
}

fn opt_to_string<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn print_standings(rows: &[TeamStanding]) {
    section("TOP TEAMS BY WIN RATE");
    if rows.is_empty() {
        println!("  (no qualifying rows)");
        return;
    }
    println!(
        "  {:<28} {:>6} {:>6} {:>9} {:>8} {:>9}",
        "team", "games", "wins", "win_rate", "scored", "conceded"
    );
    for row in rows {
        println!(
            "  {:<28} {:>6} {:>6} {:>8.2}% {:>8.2} {:>9.2}",
            row.name, row.games, row.wins, row.win_rate, row.avg_goals_scored, row.avg_goals_conceded
        );
    }
}

pub fn print_scorers(rows: &[PlayerCareer]) {
    section("TOP SCORERS (CAREER)");
    if rows.is_empty() {
        println!("  (no qualifying rows)");
        return;
    }
    println!(
        "  {:<28} {:>4} {:>6} {:>6} {:>7} {:>8} {:>6} {:>6}",
        "player", "age", "goals", "games", "g/game", "leagues", "first", "last"
    );
    for row in rows {
        println!(
            "  {:<28} {:>4} {:>6} {:>6} {:>7} {:>8} {:>6} {:>6}",
            row.name,
            opt_to_string(row.age),
            row.career_goals,
            row.career_games,
            row.goals_per_game
                .map(|v| format!("{v:.2}"))
                .unwrap_or_else(|| "-".to_string()),
            row.leagues_played,
            opt_to_string(row.first_season),
            opt_to_string(row.last_season),
        );
    }
}

pub fn print_trends(rows: &[SeasonTrend]) {
    section("DEVELOPMENT PER SEASON");
    if rows.is_empty() {
        println!("  (no qualifying rows)");
        return;
    }
    println!(
        "  {:<8} {:>7} {:>10} {:>10} {:>12}",
        "season", "games", "avg_goals", "max_goals", "unique_teams"
    );
    for row in rows {
        println!(
            "  {:<8} {:>7} {:>10.2} {:>10} {:>12}",
            row.season, row.games, row.avg_goals, row.max_goals, row.unique_teams
        );
    }
}

pub fn print_seasonal(months: &[MonthPattern], weekdays: &[WeekdayPattern]) {
    section("GAMES PER MONTH");
    if months.is_empty() {
        println!("  (no qualifying rows)");
    } else {
        println!("  {:<4} {:<12} {:>7} {:>10}", "#", "month", "games", "avg_goals");
        for row in months {
            println!(
                "  {:<4} {:<12} {:>7} {:>10.2}",
                row.month, row.name, row.games, row.avg_goals
            );
        }
    }

    section("GAMES PER WEEKDAY");
    if weekdays.is_empty() {
        println!("  (no qualifying rows)");
    } else {
        println!("  {:<4} {:<12} {:>7} {:>10}", "#", "weekday", "games", "avg_goals");
        for row in weekdays {
            println!(
                "  {:<4} {:<12} {:>7} {:>10.2}",
                row.day.number(),
                row.day.label(),
                row.games,
                row.avg_goals
            );
        }
    }
}

pub fn print_home_advantage(summary: &HomeAdvantage) {
    section("HOME ADVANTAGE");
    println!("  Decided games:       {}", summary.total_games);
    println!("  Avg goal diff:       {:+.2}", summary.avg_goal_diff);
    println!("  Home wins:           {:.1}%", summary.home_win_pct);
    println!("  Draws:               {:.1}%", summary.draw_pct);
    println!("  Away wins:           {:.1}%", summary.away_win_pct);
}

pub fn print_audit(report: &AuditReport) {
    section("TABLE COUNTS");
    for entry in &report.table_counts {
        println!("  {:<25} {:>10}", entry.table, entry.rows);
    }
    println!(
        "\n  Database size: {:.1} MB",
        report.size_bytes as f64 / (1024.0 * 1024.0)
    );

    section("DATA QUALITY");
    println!(
        "  Games without result: {} / {} ({:.1}%)",
        report.games_without_result,
        report.total_games,
        100.0 * report.missing_result_ratio
    );
    println!(
        "  Games with details:   {} / {} ({:.1}%)",
        report.games_with_details,
        report.total_games,
        100.0 * report.details_ratio
    );
    println!(
        "  Games with events:    {} / {} ({:.1}%)",
        report.games_with_events,
        report.total_games,
        100.0 * report.event_coverage
    );
    println!("  Duplicate game ids:   {}", report.duplicate_game_ids);

    section("INDEXES");
    if report.indexes.is_empty() {
        println!("  (none)");
    } else {
        for index in &report.indexes {
            println!("  {:<35} on {}", index.name, index.table);
        }
    }

    section("FINDINGS");
    if report.findings.is_empty() {
        println!("  no issues detected");
    } else {
        for (i, finding) in report.findings.iter().enumerate() {
            println!("  {}. [{}] {}", i + 1, finding.severity, finding.message);
        }
    }
}

// ---------------------------------------------------------------------------
// Chart artifacts
// ---------------------------------------------------------------------------

fn write_header(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *header)
            .context("write header cell")?;
    }
    Ok(())
}

/// Bar/column/line chart over one label column and one value column of the
/// data sheet. Skipped for empty tables (a chart over zero rows is not a
/// valid range).
fn insert_series_chart(
    sheet: &mut Worksheet,
    chart_type: ChartType,
    title: &str,
    series_name: &str,
    rows: usize,
    label_col: u16,
    value_col: u16,
    anchor_col: u16,
) -> Result<()> {
    if rows == 0 {
        return Ok(());
    }
    let last_row = rows as u32;
    let mut chart = Chart::new(chart_type);
    chart
        .add_series()
        .set_categories(("Data", 1, label_col, last_row, label_col))
        .set_values(("Data", 1, value_col, last_row, value_col))
        .set_name(series_name);
    chart.title().set_name(title);
    sheet
        .insert_chart(1, anchor_col, &chart)
        .context("insert chart")?;
    Ok(())
}

pub fn export_standings(path: &Path, rows: &[TeamStanding]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Data")?;
    write_header(
        sheet,
        &["team", "games", "wins", "win_rate", "avg_scored", "avg_conceded"],
    )?;
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, &row.name)?;
        sheet.write_number(r, 1, row.games as f64)?;
        sheet.write_number(r, 2, row.wins as f64)?;
        sheet.write_number(r, 3, row.win_rate)?;
        sheet.write_number(r, 4, row.avg_goals_scored)?;
        sheet.write_number(r, 5, row.avg_goals_conceded)?;
    }
    insert_series_chart(
        sheet,
        ChartType::Bar,
        "Top teams by win rate",
        "win rate (%)",
        rows.len(),
        0,
        3,
        8,
    )?;
    save_workbook(workbook, path)
}

pub fn export_scorers(path: &Path, rows: &[PlayerCareer]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Data")?;
    write_header(
        sheet,
        &[
            "player",
            "age",
            "career_goals",
            "career_games",
            "goals_per_game",
            "leagues",
            "first_season",
            "last_season",
        ],
    )?;
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, &row.name)?;
        write_opt_number(sheet, r, 1, row.age.map(|v| v as f64))?;
        sheet.write_number(r, 2, row.career_goals as f64)?;
        sheet.write_number(r, 3, row.career_games as f64)?;
        write_opt_number(sheet, r, 4, row.goals_per_game)?;
        sheet.write_number(r, 5, row.leagues_played as f64)?;
        write_opt_number(sheet, r, 6, row.first_season.map(|v| v as f64))?;
        write_opt_number(sheet, r, 7, row.last_season.map(|v| v as f64))?;
    }
    insert_series_chart(
        sheet,
        ChartType::Bar,
        "Top scorers (career goals)",
        "career goals",
        rows.len(),
        0,
        2,
        10,
    )?;
    save_workbook(workbook, path)
}

pub fn export_trends(path: &Path, rows: &[SeasonTrend]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Data")?;
    write_header(
        sheet,
        &["season", "games", "avg_goals", "max_goals", "unique_teams"],
    )?;
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_number(r, 0, row.season as f64)?;
        sheet.write_number(r, 1, row.games as f64)?;
        sheet.write_number(r, 2, row.avg_goals)?;
        sheet.write_number(r, 3, row.max_goals as f64)?;
        sheet.write_number(r, 4, row.unique_teams as f64)?;
    }
    insert_series_chart(
        sheet,
        ChartType::Line,
        "Average goals per season",
        "avg goals",
        rows.len(),
        0,
        2,
        7,
    )?;
    save_workbook(workbook, path)
}

pub fn export_seasonal(
    path: &Path,
    months: &[MonthPattern],
    weekdays: &[WeekdayPattern],
) -> Result<()> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Data")?;
        write_header(sheet, &["month", "name", "games", "avg_goals"])?;
        for (i, row) in months.iter().enumerate() {
            let r = (i + 1) as u32;
            sheet.write_number(r, 0, row.month as f64)?;
            sheet.write_string(r, 1, &row.name)?;
            sheet.write_number(r, 2, row.games as f64)?;
            sheet.write_number(r, 3, row.avg_goals)?;
        }
        insert_series_chart(
            sheet,
            ChartType::Column,
            "Games per month",
            "games",
            months.len(),
            1,
            2,
            6,
        )?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Weekdays")?;
        write_header(sheet, &["day", "weekday", "games", "avg_goals"])?;
        for (i, row) in weekdays.iter().enumerate() {
            let r = (i + 1) as u32;
            sheet.write_number(r, 0, row.day.number() as f64)?;
            sheet.write_string(r, 1, row.day.label())?;
            sheet.write_number(r, 2, row.games as f64)?;
            sheet.write_number(r, 3, row.avg_goals)?;
        }
        if !weekdays.is_empty() {
            let last_row = weekdays.len() as u32;
            let mut chart = Chart::new(ChartType::Column);
            chart
                .add_series()
                .set_categories(("Weekdays", 1, 1, last_row, 1))
                .set_values(("Weekdays", 1, 2, last_row, 2))
                .set_name("games");
            chart.title().set_name("Games per weekday");
            sheet.insert_chart(1, 6, &chart).context("insert chart")?;
        }
    }
    save_workbook(workbook, path)
}

pub fn export_home_advantage(path: &Path, summary: &HomeAdvantage) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Data")?;
    write_header(sheet, &["outcome", "percentage"])?;
    let slices = [
        ("home wins", summary.home_win_pct),
        ("draws", summary.draw_pct),
        ("away wins", summary.away_win_pct),
    ];
    for (i, (label, value)) in slices.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, *label)?;
        sheet.write_number(r, 1, *value)?;
    }
    sheet.write_string(5, 0, "decided games")?;
    sheet.write_number(5, 1, summary.total_games as f64)?;
    sheet.write_string(6, 0, "avg goal diff")?;
    sheet.write_number(6, 1, summary.avg_goal_diff)?;

    let mut chart = Chart::new(ChartType::Pie);
    chart
        .add_series()
        .set_categories(("Data", 1, 0, 3, 0))
        .set_values(("Data", 1, 1, 3, 1))
        .set_name("outcomes");
    chart.title().set_name("Outcome distribution");
    sheet.insert_chart(1, 4, &chart).context("insert chart")?;
    save_workbook(workbook, path)
}

fn write_opt_number(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
) -> Result<()> {
    match value {
        Some(v) => sheet.write_number(row, col, v).context("write number cell")?,
        None => sheet.write_string(row, col, "-").context("write placeholder cell")?,
    };
    Ok(())
}

fn save_workbook(mut workbook: Workbook, path: &Path) -> Result<()> {
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON summary
// ---------------------------------------------------------------------------

/// Writes the run summary atomically (temp file + rename) so a crashed run
/// never leaves a half-written artifact behind.
pub fn write_summary_json(path: &Path, summary: &RunSummary<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("serialize run summary")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("rename into {}", path.display()))?;
    Ok(())
}
