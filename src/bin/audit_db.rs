use anyhow::Result;
use chrono::Utc;

use wasserball_analytics::{audit, report, store, Config};

/// Audit-only pass: census, completeness ratios, duplicate-key and index
/// checks, without running the analyses or writing artifacts.
fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cfg = Config::from_env();

    println!("{}", "=".repeat(80));
    println!("DATABASE AUDIT - {}", cfg.db_path.display());
    println!("run started {}", Utc::now().to_rfc3339());
    println!("{}", "=".repeat(80));

    let conn = store::open_db(&cfg.db_path)?;
    let audit_report = audit::run_audit(&conn, &cfg)?;
    report::print_audit(&audit_report);

    Ok(())
}
