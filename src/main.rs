use std::fs;

use anyhow::{Context, Result};
use chrono::Utc;

use wasserball_analytics::report::{self, RunSummary};
use wasserball_analytics::{audit, career_scoring, home_advantage, season_trends, seasonal_patterns, standings, store, Config};

/// Runs every analysis and the integrity audit against one snapshot, in a
/// fixed order, writing console tables plus one chart workbook per analysis
/// and a JSON summary. Any failure aborts the remaining steps and exits
/// non-zero.
fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cfg = Config::from_env();

    println!("{}", "=".repeat(80));
    println!("SEASON ARCHIVE ANALYTICS - {}", cfg.db_path.display());
    println!("run started {}", Utc::now().to_rfc3339());
    println!("{}", "=".repeat(80));

    fs::create_dir_all(&cfg.output_dir)
        .with_context(|| format!("create output dir {}", cfg.output_dir.display()))?;

    let conn = store::open_db(&cfg.db_path)?;

    let teams = store::load_teams(&conn)?;
    let games = store::load_decided_games(&conn)?;
    let players = store::load_players(&conn)?;
    let scorers = store::load_scorers(&conn)?;

    let standings = standings::compute_team_standings(&teams, &games);
    report::print_standings(&standings);
    report::export_standings(&cfg.output_dir.join("top_teams.xlsx"), &standings)
        .context("export team standings")?;

    let top_scorers = career_scoring::compute_career_scoring(&players, &scorers, cfg.reference_year);
    report::print_scorers(&top_scorers);
    report::export_scorers(&cfg.output_dir.join("top_scorers.xlsx"), &top_scorers)
        .context("export top scorers")?;

    let trends = season_trends::compute_season_trends(&games);
    report::print_trends(&trends);
    report::export_trends(&cfg.output_dir.join("trends_over_time.xlsx"), &trends)
        .context("export season trends")?;

    let months = seasonal_patterns::compute_month_patterns(&games);
    let weekdays = seasonal_patterns::compute_weekday_patterns(&games);
    report::print_seasonal(&months, &weekdays);
    report::export_seasonal(
        &cfg.output_dir.join("seasonal_patterns.xlsx"),
        &months,
        &weekdays,
    )
    .context("export seasonal patterns")?;

    let advantage = home_advantage::compute_home_advantage(&games)?;
    report::print_home_advantage(&advantage);
    report::export_home_advantage(&cfg.output_dir.join("home_advantage.xlsx"), &advantage)
        .context("export home advantage")?;

    let audit_report = audit::run_audit(&conn, &cfg)?;
    report::print_audit(&audit_report);

    let summary = RunSummary {
        standings: &standings,
        top_scorers: &top_scorers,
        season_trends: &trends,
        month_patterns: &months,
        weekday_patterns: &weekdays,
        home_advantage: &advantage,
        audit: &audit_report,
    };
    report::write_summary_json(&cfg.output_dir.join("analysis_summary.json"), &summary)
        .context("write json summary")?;

    println!();
    println!("{}", "=".repeat(80));
    println!("all analyses completed; artifacts in {}", cfg.output_dir.display());
    println!("{}", "=".repeat(80));

    Ok(())
}
