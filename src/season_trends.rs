use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::round::round2;
use crate::store::DecidedGame;

#[derive(Debug, Clone, Serialize)]
pub struct SeasonTrend {
    pub season: i64,
    pub games: u64,
    pub avg_goals: f64,
    pub max_goals: i64,
    pub unique_teams: u64,
}

#[derive(Default)]
struct SeasonAcc {
    games: u64,
    goals: i64,
    max_goals: i64,
    teams: HashSet<i64>,
}

/// Per-season development: game volume, scoring averages and peaks, and how
/// many distinct teams took part. Chronological by construction (ordered
/// map keyed by season year); games whose league id carries no parseable
/// year are skipped.
pub fn compute_season_trends(games: &[DecidedGame]) -> Vec<SeasonTrend> {
    let mut acc: BTreeMap<i64, SeasonAcc> = BTreeMap::new();
    for game in games {
        let Some(season) = game.season_year() else {
            continue;
        };
        let entry = acc.entry(season).or_default();
        let total = game.total();
        entry.games += 1;
        entry.goals += total;
        entry.max_goals = entry.max_goals.max(total);
        entry.teams.insert(game.home_team_id);
        entry.teams.insert(game.guest_team_id);
    }

    acc.into_iter()
        .map(|(season, stats)| SeasonTrend {
            season,
            games: stats.games,
            avg_goals: round2(stats.goals as f64 / stats.games as f64),
            max_goals: stats.max_goals,
            unique_teams: stats.teams.len() as u64,
        })
        .collect()
}
