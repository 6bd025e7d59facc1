use std::collections::BTreeMap;

use serde::Serialize;

use crate::round::round2;
use crate::store::DecidedGame;

/// Canonical weekday order, Monday first. Scheduling order must never
/// depend on lexical or locale sorting of the stored names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The snapshot stores German day names; English spellings are accepted
    /// as well. Anything else is not a weekday for this analysis.
    pub fn from_name(name: &str) -> Option<Weekday> {
        match name {
            "Montag" | "Monday" => Some(Weekday::Monday),
            "Dienstag" | "Tuesday" => Some(Weekday::Tuesday),
            "Mittwoch" | "Wednesday" => Some(Weekday::Wednesday),
            "Donnerstag" | "Thursday" => Some(Weekday::Thursday),
            "Freitag" | "Friday" => Some(Weekday::Friday),
            "Samstag" | "Saturday" => Some(Weekday::Saturday),
            "Sonntag" | "Sunday" => Some(Weekday::Sunday),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthPattern {
    pub month: i64,
    pub name: String,
    pub games: u64,
    pub avg_goals: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekdayPattern {
    pub day: Weekday,
    pub games: u64,
    pub avg_goals: f64,
}

#[derive(Default)]
struct PatternAcc {
    games: u64,
    goals: i64,
    name: Option<String>,
}

/// Game volume and scoring by calendar month, month number ascending. Games
/// without scheduling metadata are left out.
pub fn compute_month_patterns(games: &[DecidedGame]) -> Vec<MonthPattern> {
    let mut acc: BTreeMap<i64, PatternAcc> = BTreeMap::new();
    for game in games {
        let Some(month) = game.start_month else {
            continue;
        };
        let entry = acc.entry(month).or_default();
        entry.games += 1;
        entry.goals += game.total();
        if entry.name.is_none() {
            entry.name = game.start_month_name.clone();
        }
    }

    acc.into_iter()
        .map(|(month, stats)| MonthPattern {
            month,
            name: stats.name.unwrap_or_default(),
            games: stats.games,
            avg_goals: round2(stats.goals as f64 / stats.games as f64),
        })
        .collect()
}

/// Game volume and scoring by weekday in canonical Monday..Sunday order.
/// Rows with an unrecognized day name are dropped from this grouping only.
pub fn compute_weekday_patterns(games: &[DecidedGame]) -> Vec<WeekdayPattern> {
    let mut acc: BTreeMap<Weekday, PatternAcc> = BTreeMap::new();
    for game in games {
        let Some(day) = game.start_day_of_week.as_deref().and_then(Weekday::from_name) else {
            continue;
        };
        let entry = acc.entry(day).or_default();
        entry.games += 1;
        entry.goals += game.total();
    }

    Weekday::ALL
        .iter()
        .filter_map(|day| {
            let stats = acc.get(day)?;
            Some(WeekdayPattern {
                day: *day,
                games: stats.games,
                avg_goals: round2(stats.goals as f64 / stats.games as f64),
            })
        })
        .collect()
}
