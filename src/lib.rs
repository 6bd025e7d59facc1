//! Descriptive analytics and integrity checks for a `seasons.db` match
//! archive: team standings, career scoring, temporal and seasonal patterns,
//! home advantage, plus a read-only schema health audit.

pub mod audit;
pub mod career_scoring;
pub mod config;
pub mod error;
pub mod home_advantage;
pub mod report;
mod round;
pub mod season_trends;
pub mod seasonal_patterns;
pub mod standings;
pub mod store;

pub use crate::config::Config;
pub use crate::error::{AnalyticsError, Result};
