//! Streak and activity statistics over journal entries.
//!
//! Pure functions: callers pass the entries and the current time, so results are
//! deterministic. Calendar days are taken in the timezone of `now`.

use crate::constants::{DEFAULT_MOOD, NO_DATA_MOOD, SEEDED_MOODS};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;
use tracing::debug;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// The parts of an entry the aggregator needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodSample {
    /// Mood label as stored, if any
    pub mood: Option<String>,
    /// When the entry was created
    pub created_at: DateTime<Utc>,
}

impl MoodSample {
    /// Creates a new sample.
    pub fn new(mood: Option<impl Into<String>>, created_at: DateTime<Utc>) -> Self {
        Self {
            mood: mood.map(Into::into),
            created_at,
        }
    }
}

/// Dashboard statistics for a set of entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityStats {
    /// Number of entries
    pub total_count: usize,
    /// Consecutive active days ending today or yesterday
    pub current_streak: u32,
    /// Entries per week since the first entry
    pub avg_per_week: f64,
    /// Most frequent mood, or "No Data"
    pub dominant_mood: String,
    /// Entry count per normalised mood, seeded moods first, then in order of appearance
    pub mood_counts: Vec<(String, usize)>,
    /// Entry count per active calendar day
    pub daily_counts: BTreeMap<NaiveDate, usize>,
}

impl ActivityStats {
    /// Per-day entry counts for the `days` days ending on `today`, oldest first.
    ///
    /// Days without entries are included with a count of zero.
    pub fn activity_timeline(&self, today: NaiveDate, days: u32) -> Vec<(NaiveDate, usize)> {
        (0..i64::from(days))
            .rev()
            .map(|offset| {
                let date = today - Duration::days(offset);
                (date, self.daily_counts.get(&date).copied().unwrap_or(0))
            })
            .collect()
    }

    /// Moods with at least one entry, most frequent first.
    ///
    /// Equal counts keep their order from `mood_counts`.
    pub fn mood_distribution(&self) -> Vec<(String, usize)> {
        let mut moods: Vec<(String, usize)> = self
            .mood_counts
            .iter()
            .filter(|(_, count)| *count > 0)
            .cloned()
            .collect();
        moods.sort_by(|a, b| b.1.cmp(&a.1));
        moods
    }
}

/// Normalises a mood label: trimmed, first letter upper-case, rest lower-case.
///
/// Missing or blank moods become "Neutral".
///
/// # Examples
///
/// ```
/// use moodlog::ops::stats::normalize_mood;
///
/// assert_eq!(normalize_mood(Some("hAPPY")), "Happy");
/// assert_eq!(normalize_mood(Some(" ")), "Neutral");
/// assert_eq!(normalize_mood(None), "Neutral");
/// ```
pub fn normalize_mood(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => DEFAULT_MOOD.to_string(),
    }
}

/// Computes dashboard statistics for `entries` as of `now`.
///
/// - Entries are grouped by calendar day in the timezone of `now`.
/// - The streak counts back from the most recent active day while each earlier
///   active day is exactly one day before the next. It is zero unless that most
///   recent day is today or yesterday.
/// - The weekly average is `total / max(1, days since first entry) * 7`, with
///   fractional days.
/// - The dominant mood is the highest count in `mood_counts`; ties go to the
///   earlier key. With no entries it is "No Data".
pub fn aggregate<Tz: TimeZone>(entries: &[MoodSample], now: &DateTime<Tz>) -> ActivityStats {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut mood_counts: Vec<(String, usize)> =
        SEEDED_MOODS.iter().map(|m| (m.to_string(), 0)).collect();
    let mut daily_counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    for entry in entries {
        let mood = normalize_mood(entry.mood.as_deref());
        match mood_counts.iter_mut().find(|(name, _)| *name == mood) {
            Some((_, count)) => *count += 1,
            None => mood_counts.push((mood, 1)),
        }

        let day = entry.created_at.with_timezone(&tz).date_naive();
        *daily_counts.entry(day).or_insert(0) += 1;
    }

    let total_count = entries.len();
    let current_streak = current_streak(&daily_counts, today);
    let avg_per_week = average_per_week(entries, now.with_timezone(&Utc));
    let dominant_mood = dominant_mood(&mood_counts, total_count);

    debug!(
        "Aggregated {} entries: streak {}, {:.1}/week",
        total_count, current_streak, avg_per_week
    );

    ActivityStats {
        total_count,
        current_streak,
        avg_per_week,
        dominant_mood,
        mood_counts,
        daily_counts,
    }
}

fn current_streak(daily_counts: &BTreeMap<NaiveDate, usize>, today: NaiveDate) -> u32 {
    let mut days = daily_counts.keys().rev();
    let Some(&latest) = days.next() else {
        return 0;
    };

    let yesterday = today - Duration::days(1);
    if latest != today && latest != yesterday {
        return 0;
    }

    let mut streak = 1;
    let mut previous = latest;
    for &day in days {
        if (previous - day).num_days() != 1 {
            break;
        }
        streak += 1;
        previous = day;
    }
    streak
}

fn average_per_week(entries: &[MoodSample], now: DateTime<Utc>) -> f64 {
    let Some(first) = entries.iter().map(|e| e.created_at).min() else {
        return 0.0;
    };

    let elapsed_days = (now - first).num_milliseconds() as f64 / MILLIS_PER_DAY;
    entries.len() as f64 / elapsed_days.max(1.0) * 7.0
}

fn dominant_mood(mood_counts: &[(String, usize)], total_count: usize) -> String {
    if total_count == 0 {
        return NO_DATA_MOOD.to_string();
    }

    let mut best: Option<&(String, usize)> = None;
    for candidate in mood_counts {
        if best.map_or(true, |(_, count)| candidate.1 > *count) {
            best = Some(candidate);
        }
    }
    best.map(|(mood, _)| mood.clone())
        .unwrap_or_else(|| NO_DATA_MOOD.to_string())
}
