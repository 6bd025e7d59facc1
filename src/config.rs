use std::env;
use std::path::PathBuf;

/// Runtime configuration for a full analytics run.
///
/// Everything is an explicit value handed to the core at construction; there
/// is no process-wide mutable state. `from_env` layers `WASSERBALL_*`
/// overrides (a `.env` file is honored when the binary loads one) on top of
/// the defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite snapshot.
    pub db_path: PathBuf,
    /// Directory for chart workbooks and the JSON summary.
    pub output_dir: PathBuf,
    /// Fixed reference year for player-age derivation. Deliberately not
    /// "now": results must not depend on when the run happens.
    pub reference_year: i64,
    /// Audit warns when fewer than this fraction of games has detail data.
    pub min_details_ratio: f64,
    /// Audit suggests compression when the average notes length exceeds this.
    pub max_avg_notes_len: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("data/seasons.db"),
            output_dir: PathBuf::from("analysis_output"),
            reference_year: 2026,
            min_details_ratio: 0.5,
            max_avg_notes_len: 1000.0,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            db_path: env::var("WASSERBALL_DB")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            output_dir: env::var("WASSERBALL_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            reference_year: env::var("WASSERBALL_REFERENCE_YEAR")
                .ok()
                .and_then(|val| val.parse::<i64>().ok())
                .unwrap_or(defaults.reference_year),
            min_details_ratio: env::var("WASSERBALL_DETAILS_WARN_RATIO")
                .ok()
                .and_then(|val| val.parse::<f64>().ok())
                .filter(|ratio| (0.0..=1.0).contains(ratio))
                .unwrap_or(defaults.min_details_ratio),
            max_avg_notes_len: env::var("WASSERBALL_NOTES_LEN_LIMIT")
                .ok()
                .and_then(|val| val.parse::<f64>().ok())
                .filter(|len| *len > 0.0)
                .unwrap_or(defaults.max_avg_notes_len),
        }
    }
}
