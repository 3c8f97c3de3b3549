//! Listing queries: filtering, sorting and pagination

use super::record::Candidate;
use crate::classification::SkillTier;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Field to sort candidate listings by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Email,
    #[default]
    CreatedAt,
    AssignedTier,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Parse a tier list such as `"0"` or `"1,3"`
pub fn parse_tiers(value: &str) -> Result<Vec<SkillTier>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let raw: u8 = part
                .parse()
                .map_err(|_| Error::validation("tier", format!("'{}' is not a tier number", part)))?;
            SkillTier::try_from(raw)
        })
        .collect()
}

fn within(
    created_at: DateTime<Utc>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> bool {
    start.map_or(true, |start| created_at >= start) && end.map_or(true, |end| created_at <= end)
}

// =============================================================================
// Candidate Query
// =============================================================================

/// Listing query over the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateQuery {
    /// Only these tiers; empty means all
    pub tiers: Vec<SkillTier>,
    /// Case-insensitive substring over name, email and phone
    pub search: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
}

impl Default for CandidateQuery {
    fn default() -> Self {
        Self {
            tiers: Vec::new(),
            search: None,
            start_date: None,
            end_date: None,
            sort_by: SortField::CreatedAt,
            sort_order: SortOrder::Desc,
            page: 1,
            limit: 10,
        }
    }
}

impl CandidateQuery {
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(Error::validation("page", "page starts at 1"));
        }
        if self.limit == 0 {
            return Err(Error::validation("limit", "limit must be at least 1"));
        }
        Ok(())
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        if !self.tiers.is_empty() && !self.tiers.contains(&candidate.assigned_tier) {
            return false;
        }

        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let hit = [&candidate.name, &candidate.email, &candidate.phone]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        within(candidate.created_at, self.start_date, self.end_date)
    }

    /// Order two candidates; ties fall back to creation time, then id
    pub fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        let primary = match self.sort_by {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Email => a.email.cmp(&b.email),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::AssignedTier => a.assigned_tier.cmp(&b.assigned_tier),
        };
        let ordered = primary
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id));

        match self.sort_order {
            SortOrder::Asc => ordered,
            SortOrder::Desc => ordered.reverse(),
        }
    }
}

// =============================================================================
// Results
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub page: u32,
    pub pages: u32,
    pub limit: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn new(total: usize, page: u32, limit: u32) -> Self {
        let pages = total.div_ceil(limit as usize) as u32;
        Self {
            total,
            page,
            pages,
            limit,
            has_next_page: page < pages,
            has_prev_page: page > 1,
        }
    }

    /// Index of the first item on this page
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePage {
    pub data: Vec<Candidate>,
    pub pagination: Pagination,
}

/// Which candidates to export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportFilter {
    pub tiers: Vec<SkillTier>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl ExportFilter {
    pub fn matches(&self, candidate: &Candidate) -> bool {
        (self.tiers.is_empty() || self.tiers.contains(&candidate.assigned_tier))
            && within(candidate.created_at, self.start_date, self.end_date)
    }
}
