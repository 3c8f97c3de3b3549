//! Scoring Configuration
//!
//! Per-axis weights and the ordered threshold table that turns an aggregate
//! score into a tier. The table is plain data so it can be inspected,
//! loaded from YAML, and tested without the rest of the registration flow.

use super::tier::SkillTier;
use crate::assessment::{AssessmentResponse, CapabilityAxis, ExperienceLevel, KnowledgeAxis};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Largest weight a single answer may carry
pub const MAX_WEIGHT: u32 = 1_000;

// =============================================================================
// Axis Contribution
// =============================================================================

/// A scored question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Axis {
    Knowledge(KnowledgeAxis),
    Capability(CapabilityAxis),
}

impl Axis {
    pub fn field_name(self) -> &'static str {
        match self {
            Axis::Knowledge(axis) => axis.field_name(),
            Axis::Capability(axis) => axis.field_name(),
        }
    }
}

/// Points one axis contributed to the aggregate score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisContribution {
    pub axis: Axis,
    /// Short label used in rationales, e.g. `Golang (intermediate)`
    pub label: String,
    pub points: u32,
}

// =============================================================================
// Threshold Table
// =============================================================================

/// One row of the threshold table.
///
/// The tier applies when the score is strictly above `above` and every
/// capability in `requires` is answered yes. A score exactly on the
/// boundary stays in the lower tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierThreshold {
    pub above: u32,
    pub tier: SkillTier,
    #[serde(default)]
    pub requires: Vec<CapabilityAxis>,
}

impl TierThreshold {
    pub fn new(above: u32, tier: SkillTier, requires: &[CapabilityAxis]) -> Self {
        Self {
            above,
            tier,
            requires: requires.to_vec(),
        }
    }

    /// Capabilities this row requires that the response lacks
    pub fn missing(&self, response: &AssessmentResponse) -> Vec<CapabilityAxis> {
        self.requires
            .iter()
            .copied()
            .filter(|axis| !response.capability(*axis))
            .collect()
    }
}

/// Outcome of looking a score up in the threshold table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierDecision {
    pub tier: SkillTier,
    /// Highest tier the score alone would have reached, when a gate held it back
    pub capped_from: Option<SkillTier>,
    /// Capabilities missing for `capped_from`
    pub missing: Vec<CapabilityAxis>,
}

// =============================================================================
// Scoring Config
// =============================================================================

/// Weights and thresholds for tier classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    /// Multiplier for the 0-3 ordinal of each knowledge answer
    pub knowledge_weights: BTreeMap<KnowledgeAxis, u32>,
    /// Points for each capability answered yes
    pub capability_weights: BTreeMap<CapabilityAxis, u32>,
    /// Rows ordered by ascending tier
    pub thresholds: Vec<TierThreshold>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        use CapabilityAxis::*;

        let knowledge_weights = BTreeMap::from([
            (KnowledgeAxis::HtmlCssJs, 1),
            (KnowledgeAxis::ReactNextJs, 2),
            (KnowledgeAxis::Database, 2),
            (KnowledgeAxis::ExpressHono, 2),
            (KnowledgeAxis::Laravel, 1),
            (KnowledgeAxis::Golang, 2),
        ]);

        let capability_weights = BTreeMap::from([
            (CrudApp, 4),
            (Auth, 3),
            (GoogleAuth, 3),
            (AuthenticatedApi, 3),
            (ApiDocs, 2),
            (GoApi, 5),
            (Deploy, 3),
        ]);

        // Max score is 53
        let thresholds = vec![
            TierThreshold::new(13, SkillTier::Tier1, &[CrudApp]),
            TierThreshold::new(23, SkillTier::Tier2, &[CrudApp, Auth]),
            TierThreshold::new(35, SkillTier::Tier3, &[CrudApp, Auth, AuthenticatedApi]),
            TierThreshold::new(45, SkillTier::Tier4, &[CrudApp, Auth, GoogleAuth, GoApi]),
        ];

        Self {
            knowledge_weights,
            capability_weights,
            thresholds,
        }
    }
}

impl ScoringConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ScoringConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading scoring config from {}", path.display());
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn knowledge_weight(&self, axis: KnowledgeAxis) -> u32 {
        self.knowledge_weights.get(&axis).copied().unwrap_or(0)
    }

    pub fn capability_weight(&self, axis: CapabilityAxis) -> u32 {
        self.capability_weights.get(&axis).copied().unwrap_or(0)
    }

    /// The threshold table, lowest tier first
    pub fn thresholds(&self) -> &[TierThreshold] {
        &self.thresholds
    }

    /// Score of an answer sheet with every answer at its best
    pub fn max_score(&self) -> u32 {
        self.score(&AssessmentResponse::uniform(ExperienceLevel::Advanced, true))
    }

    /// Highest score reachable while every answer is `none`/`basic` and `false`
    pub fn baseline_score(&self) -> u32 {
        self.score(&AssessmentResponse::uniform(ExperienceLevel::Basic, false))
    }

    /// Per-axis points for a response, in questionnaire order
    pub fn contributions(&self, response: &AssessmentResponse) -> Vec<AxisContribution> {
        let knowledge = KnowledgeAxis::ALL.into_iter().map(|axis| {
            let level = response.knowledge(axis);
            AxisContribution {
                axis: Axis::Knowledge(axis),
                label: format!("{} ({})", axis.label(), level),
                points: level.ordinal().saturating_mul(self.knowledge_weight(axis)),
            }
        });

        let capability = CapabilityAxis::ALL.into_iter().map(|axis| AxisContribution {
            axis: Axis::Capability(axis),
            label: axis.label().to_string(),
            points: if response.capability(axis) {
                self.capability_weight(axis)
            } else {
                0
            },
        });

        knowledge.chain(capability).collect()
    }

    /// Aggregate score for a response
    pub fn score(&self, response: &AssessmentResponse) -> u32 {
        self.contributions(response)
            .iter()
            .fold(0u32, |total, c| total.saturating_add(c.points))
    }

    /// Tier reached by score alone, ignoring capability gates
    pub fn tier_for_score(&self, score: u32) -> SkillTier {
        self.thresholds
            .iter()
            .rev()
            .find(|row| score > row.above)
            .map(|row| row.tier)
            .unwrap_or(SkillTier::Tier0)
    }

    /// Tier reached by score and gates together.
    ///
    /// Walks the table from the top and takes the first row whose threshold
    /// and gates are both met.
    pub fn decide(&self, score: u32, response: &AssessmentResponse) -> TierDecision {
        let mut capped: Option<(SkillTier, Vec<CapabilityAxis>)> = None;

        for row in self.thresholds.iter().rev() {
            if score <= row.above {
                continue;
            }
            let missing = row.missing(response);
            if missing.is_empty() {
                let (capped_from, missing) = match capped {
                    Some((tier, missing)) => (Some(tier), missing),
                    None => (None, Vec::new()),
                };
                return TierDecision {
                    tier: row.tier,
                    capped_from,
                    missing,
                };
            }
            if capped.is_none() {
                capped = Some((row.tier, missing));
            }
        }

        let (capped_from, missing) = match capped {
            Some((tier, missing)) => (Some(tier), missing),
            None => (None, Vec::new()),
        };
        TierDecision {
            tier: SkillTier::Tier0,
            capped_from,
            missing,
        }
    }

    /// Check the table is usable.
    ///
    /// Rows must cover tiers 1-4 in order with strictly increasing
    /// thresholds, the lowest threshold must hold all `none`/`basic` answers
    /// at tier 0, and the highest must be reachable.
    pub fn validate(&self) -> Result<()> {
        let weights = self
            .knowledge_weights
            .iter()
            .map(|(axis, weight)| (axis.field_name(), *weight))
            .chain(
                self.capability_weights
                    .iter()
                    .map(|(axis, weight)| (axis.field_name(), *weight)),
            );
        for (field, weight) in weights {
            if weight > MAX_WEIGHT {
                return Err(Error::Configuration(format!(
                    "weight for {} ({}) exceeds the maximum of {}",
                    field, weight, MAX_WEIGHT
                )));
            }
        }

        let expected = &SkillTier::ALL[1..];
        let tiers: Vec<SkillTier> = self.thresholds.iter().map(|row| row.tier).collect();
        if tiers != expected {
            return Err(Error::Configuration(format!(
                "threshold table must list tiers 1-4 in ascending order, got {:?}",
                tiers.iter().map(|t| t.value()).collect::<Vec<_>>()
            )));
        }

        for pair in self.thresholds.windows(2) {
            if pair[1].above <= pair[0].above {
                return Err(Error::Configuration(format!(
                    "threshold for {} ({}) must be above threshold for {} ({})",
                    pair[1].tier, pair[1].above, pair[0].tier, pair[0].above
                )));
            }
        }

        let baseline = self.baseline_score();
        if let Some(first) = self.thresholds.first() {
            if first.above < baseline {
                return Err(Error::Configuration(format!(
                    "threshold for {} ({}) is below the baseline score {}",
                    first.tier, first.above, baseline
                )));
            }
        }

        let max = self.max_score();
        if let Some(last) = self.thresholds.last() {
            if last.above >= max {
                return Err(Error::Configuration(format!(
                    "threshold for {} ({}) is unreachable, maximum score is {}",
                    last.tier, last.above, max
                )));
            }
        }

        Ok(())
    }
}
