//! Display statistics derived from fetched GitHub data.
//!
//! Everything here is a pure function of its inputs: the fetcher's state is
//! borrowed, never mutated, and nothing is cached between calls.

use crate::fetcher::ProfileState;
use crate::models::{
    ActivityDay, ActivitySummary, DistributionSlice, LanguageMap, LanguageTotals, Repository,
    Skill,
};
use serde::Serialize;

/// Languages shown in the skill list.
pub const SKILL_COUNT: usize = 8;
/// Slices shown in the distribution chart.
pub const DISTRIBUTION_COUNT: usize = 6;

/// Sum every repository's language map. Languages keep the order of first appearance.
pub fn language_totals(repositories: &[Repository]) -> LanguageTotals {
    let mut totals: LanguageMap = repositories
        .iter()
        .flat_map(|r| r.languages.iter())
        .collect();
    totals.retain(|(_, bytes)| *bytes > 0);
    totals
}

/// Totals sorted by descending byte count. Ties keep first-appearance order.
pub fn ranked(totals: &LanguageTotals) -> Vec<(&str, u64)> {
    let mut entries: Vec<_> = totals.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

/// Top languages with their share of *all* bytes, not just the displayed ones.
pub fn skills(totals: &LanguageTotals) -> Vec<Skill> {
    let total = totals.total_bytes();
    if total == 0 {
        return Vec::new();
    }

    ranked(totals)
        .into_iter()
        .take(SKILL_COUNT)
        .map(|(name, bytes)| Skill {
            name: name.to_string(),
            level: bytes as f64 / total as f64 * 100.0,
        })
        .collect()
}

pub fn distribution(totals: &LanguageTotals) -> Vec<DistributionSlice> {
    ranked(totals)
        .into_iter()
        .take(DISTRIBUTION_COUNT)
        .map(|(name, value)| DistributionSlice {
            name: name.to_string(),
            value,
        })
        .collect()
}

pub fn summarize_activity(days: &[ActivityDay]) -> ActivitySummary {
    days.iter()
        .fold(ActivitySummary::default(), |mut acc, day| {
            acc.total_contributions += u64::from(day.contributions);
            if day.contributions > 0 {
                acc.active_days += 1;
            }
            acc
        })
}

/// Round half away from zero to one decimal place, as shown on the page.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Everything the charts and counters consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub skills: Vec<Skill>,
    pub distribution: Vec<DistributionSlice>,
    pub total_contributions: u64,
    pub active_days: u64,
}

impl Aggregate {
    pub fn derive(state: &ProfileState, activity: &[ActivityDay]) -> Self {
        let totals = &state.language_totals;
        let summary = summarize_activity(activity);
        Self {
            skills: skills(totals),
            distribution: distribution(totals),
            total_contributions: summary.total_contributions,
            active_days: summary.active_days,
        }
    }
}
