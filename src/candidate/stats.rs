//! Tier distribution and registration statistics

use super::record::Candidate;
use crate::classification::SkillTier;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Window counted as recent registrations
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Window for the per-day registration series
pub const TIMELINE_WINDOW_DAYS: i64 = 7;

/// Count of candidates in one tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierStat {
    pub tier: SkillTier,
    pub tier_name: String,
    pub count: usize,
    /// Share of all candidates, two decimals
    pub percentage: String,
}

/// Registrations on one calendar day (UTC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: usize,
}

/// Registry-wide statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateStats {
    pub total_candidates: usize,
    pub recent_registrations: usize,
    /// Only tiers with at least one candidate, lowest first
    pub tier_distribution: Vec<TierStat>,
    /// Days with at least one registration, oldest first
    pub registrations_over_time: Vec<DailyCount>,
}

impl CandidateStats {
    /// Aggregate statistics as of `now`
    pub fn compute<'a>(
        candidates: impl IntoIterator<Item = &'a Candidate>,
        now: DateTime<Utc>,
    ) -> Self {
        let recent_cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
        let timeline_cutoff = now - Duration::days(TIMELINE_WINDOW_DAYS);

        let mut total = 0usize;
        let mut recent = 0usize;
        let mut by_tier: BTreeMap<SkillTier, usize> = BTreeMap::new();
        let mut by_day: BTreeMap<String, usize> = BTreeMap::new();

        for candidate in candidates {
            total += 1;
            *by_tier.entry(candidate.assigned_tier).or_default() += 1;

            if candidate.created_at >= recent_cutoff {
                recent += 1;
            }
            if candidate.created_at >= timeline_cutoff {
                let day = candidate.created_at.format("%Y-%m-%d").to_string();
                *by_day.entry(day).or_default() += 1;
            }
        }

        let tier_distribution = by_tier
            .into_iter()
            .map(|(tier, count)| TierStat {
                tier,
                tier_name: tier.name().to_string(),
                count,
                percentage: percentage(count, total),
            })
            .collect();

        let registrations_over_time = by_day
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect();

        Self {
            total_candidates: total,
            recent_registrations: recent,
            tier_distribution,
            registrations_over_time,
        }
    }

    /// Count for one tier, zero when absent
    pub fn tier_count(&self, tier: SkillTier) -> usize {
        self.tier_distribution
            .iter()
            .find(|stat| stat.tier == tier)
            .map(|stat| stat.count)
            .unwrap_or(0)
    }
}

fn percentage(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", count as f64 * 100.0 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 3), "33.33");
        assert_eq!(percentage(2, 3), "66.67");
        assert_eq!(percentage(0, 0), "0.00");
        assert_eq!(percentage(4, 4), "100.00");
    }

    #[test]
    fn test_empty() {
        let stats = CandidateStats::compute(std::iter::empty(), Utc::now());
        assert_eq!(stats.total_candidates, 0);
        assert!(stats.tier_distribution.is_empty());
        assert_eq!(stats.tier_count(SkillTier::Tier2), 0);
    }
}
