use std::collections::HashMap;

use serde::Serialize;

use crate::round::round2;
use crate::store::{DecidedGame, TeamRow};

/// Teams below this many decided games are excluded from the table.
pub const MIN_TEAM_GAMES: u64 = 20;
/// Number of rows kept after ranking.
pub const STANDINGS_LIMIT: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct TeamStanding {
    pub team_id: i64,
    pub name: String,
    pub games: u64,
    pub wins: u64,
    /// Percentage of decided games won, rounded to two decimals.
    pub win_rate: f64,
    pub avg_goals_scored: f64,
    pub avg_goals_conceded: f64,
}

#[derive(Default)]
struct TeamAcc {
    games: u64,
    wins: u64,
    scored: i64,
    conceded: i64,
}

impl TeamAcc {
    fn record(&mut self, scored: i64, conceded: i64) {
        self.games += 1;
        self.scored += scored;
        self.conceded += conceded;
        if scored > conceded {
            self.wins += 1;
        }
    }
}

/// Ranks teams by win rate over their decided games, each game counted once
/// per participating side. Games referencing a team id with no `teams` row
/// are skipped for that side (inner-join semantics, as the source query).
pub fn compute_team_standings(teams: &[TeamRow], games: &[DecidedGame]) -> Vec<TeamStanding> {
    let names: HashMap<i64, &str> = teams.iter().map(|t| (t.id, t.name.as_str())).collect();

    let mut acc: HashMap<i64, TeamAcc> = HashMap::new();
    for game in games {
        if names.contains_key(&game.home_team_id) {
            acc.entry(game.home_team_id)
                .or_default()
                .record(game.home_score, game.guest_score);
        }
        if names.contains_key(&game.guest_team_id) {
            acc.entry(game.guest_team_id)
                .or_default()
                .record(game.guest_score, game.home_score);
        }
    }

    let mut rows: Vec<TeamStanding> = acc
        .into_iter()
        .filter(|(_, stats)| stats.games >= MIN_TEAM_GAMES)
        .map(|(team_id, stats)| {
            let games = stats.games as f64;
            TeamStanding {
                team_id,
                name: names
                    .get(&team_id)
                    .map(|name| (*name).to_string())
                    .unwrap_or_default(),
                games: stats.games,
                wins: stats.wins,
                win_rate: round2(100.0 * stats.wins as f64 / games),
                avg_goals_scored: round2(stats.scored as f64 / games),
                avg_goals_conceded: round2(stats.conceded as f64 / games),
            }
        })
        .collect();

    // Win rate descending; team id ascending keeps equal rates deterministic.
    rows.sort_by(|a, b| {
        b.win_rate
            .total_cmp(&a.win_rate)
            .then(a.team_id.cmp(&b.team_id))
    });
    rows.truncate(STANDINGS_LIMIT);
    rows
}
