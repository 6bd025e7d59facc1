use serde::Serialize;

use crate::error::{AnalyticsError, Result};
use crate::round::{round1, round2};
use crate::store::{DecidedGame, Outcome};

#[derive(Debug, Clone, Serialize)]
pub struct HomeAdvantage {
    pub total_games: u64,
    /// Average home-minus-guest goal differential, two decimals.
    pub avg_goal_diff: f64,
    /// Outcome shares in percent, one decimal each. The three values sum to
    /// 100 within rounding tolerance.
    pub home_win_pct: f64,
    pub draw_pct: f64,
    pub away_win_pct: f64,
}

/// Outcome distribution over the full decided-game population. No grouping,
/// no minimum-sample filter; an empty population is an explicit error, not
/// a NaN result.
pub fn compute_home_advantage(games: &[DecidedGame]) -> Result<HomeAdvantage> {
    if games.is_empty() {
        return Err(AnalyticsError::Computation {
            what: "home advantage analysis",
            reason: "no decided games in the dataset".to_string(),
        });
    }

    let mut diff_sum = 0i64;
    let mut home_wins = 0u64;
    let mut draws = 0u64;
    let mut away_wins = 0u64;
    for game in games {
        diff_sum += game.goal_diff();
        match game.outcome() {
            Outcome::HomeWin => home_wins += 1,
            Outcome::Draw => draws += 1,
            Outcome::GuestWin => away_wins += 1,
        }
    }

    let total = games.len() as f64;
    Ok(HomeAdvantage {
        total_games: games.len() as u64,
        avg_goal_diff: round2(diff_sum as f64 / total),
        home_win_pct: round1(100.0 * home_wins as f64 / total),
        draw_pct: round1(100.0 * draws as f64 / total),
        away_win_pct: round1(100.0 * away_wins as f64 / total),
    })
}
