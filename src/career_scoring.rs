use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::round::round2;
use crate::store::{season_year, PlayerRow, ScorerRow};

/// Players below this many career games are excluded.
pub const MIN_CAREER_GAMES: i64 = 10;
/// Number of rows kept after ranking.
pub const SCORERS_LIMIT: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerCareer {
    pub player_id: i64,
    pub name: String,
    pub birth_year: Option<i64>,
    /// Reference year minus birth year; None when the birth year is unknown.
    pub age: Option<i64>,
    pub career_goals: i64,
    pub career_games: i64,
    /// None when a player somehow has zero recorded games. Never a division
    /// fault.
    pub goals_per_game: Option<f64>,
    pub leagues_played: u64,
    pub first_season: Option<i64>,
    pub last_season: Option<i64>,
}

#[derive(Default)]
struct CareerAcc<'a> {
    goals: i64,
    games: i64,
    leagues: HashSet<&'a str>,
    first_season: Option<i64>,
    last_season: Option<i64>,
}

/// Aggregates every scorer row of a player into a career line, ranked by
/// total goals. The age is derived from a fixed reference year so that the
/// output is stable no matter when the analysis runs.
pub fn compute_career_scoring(
    players: &[PlayerRow],
    scorers: &[ScorerRow],
    reference_year: i64,
) -> Vec<PlayerCareer> {
    let mut acc: HashMap<i64, CareerAcc<'_>> = HashMap::new();
    for row in scorers {
        let entry = acc.entry(row.player_id).or_default();
        entry.goals += row.goals;
        entry.games += row.games;
        entry.leagues.insert(row.league_id.as_str());
        if let Some(year) = season_year(&row.league_id) {
            entry.first_season = Some(entry.first_season.map_or(year, |y| y.min(year)));
            entry.last_season = Some(entry.last_season.map_or(year, |y| y.max(year)));
        }
    }

    let mut rows: Vec<PlayerCareer> = players
        .iter()
        .filter_map(|player| {
            let career = acc.get(&player.id)?;
            if career.games < MIN_CAREER_GAMES {
                return None;
            }
            let goals_per_game = if career.games > 0 {
                Some(round2(career.goals as f64 / career.games as f64))
            } else {
                None
            };
            Some(PlayerCareer {
                player_id: player.id,
                name: player.name.clone(),
                birth_year: player.birth_year,
                age: player.birth_year.map(|year| reference_year - year),
                career_goals: career.goals,
                career_games: career.games,
                goals_per_game,
                leagues_played: career.leagues.len() as u64,
                first_season: career.first_season,
                last_season: career.last_season,
            })
        })
        .collect();

    // Career goals descending; player id ascending on ties.
    rows.sort_by(|a, b| {
        b.career_goals
            .cmp(&a.career_goals)
            .then(a.player_id.cmp(&b.player_id))
    });
    rows.truncate(SCORERS_LIMIT);
    rows
}
