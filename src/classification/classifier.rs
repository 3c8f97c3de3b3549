//! Tier Classifier
//!
//! Classifies a candidate's assessment answers into a skill tier based on
//! weighted per-axis scores, the threshold table, and capability gates.

use super::scoring::{AxisContribution, ScoringConfig};
use super::tier::SkillTier;
use crate::assessment::{parse_responses, AssessmentResponse};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Number of axes named in a rationale
const RATIONALE_AXES: usize = 3;

// =============================================================================
// Classification Result
// =============================================================================

/// Complete classification result for an answer sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierClassification {
    /// Assigned tier
    pub tier: SkillTier,
    /// Aggregate weighted score
    pub score: u32,
    /// Best possible score under the active config
    pub max_score: u32,
    /// Which answers drove the decision
    pub rationale: String,
    /// Tier the score alone would have reached, when a gate held it back
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capped_from: Option<SkillTier>,
    /// Per-axis points
    pub contributions: Vec<AxisContribution>,
}

impl TierClassification {
    /// Score as a percentage of the maximum (0-100)
    pub fn score_percent(&self) -> u32 {
        if self.max_score == 0 {
            return 0;
        }
        (u64::from(self.score) * 100 / u64::from(self.max_score)) as u32
    }
}

// =============================================================================
// Tier Classifier
// =============================================================================

/// Classifies assessment answers into tiers.
///
/// Holds no mutable state; one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct TierClassifier {
    config: ScoringConfig,
}

impl TierClassifier {
    /// Create a new classifier with the default scoring table
    pub fn new() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }

    /// Create a classifier with a custom scoring table
    pub fn with_config(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Classify a typed answer sheet
    pub fn classify(&self, response: &AssessmentResponse) -> TierClassification {
        let contributions = self.config.contributions(response);
        let score = contributions
            .iter()
            .fold(0u32, |total, c| total.saturating_add(c.points));
        let max_score = self.config.max_score();
        let decision = self.config.decide(score, response);

        let mut drivers: Vec<&AxisContribution> =
            contributions.iter().filter(|c| c.points > 0).collect();
        // Stable sort keeps questionnaire order among equal contributions
        drivers.sort_by(|a, b| b.points.cmp(&a.points));

        let lead = if drivers.is_empty() {
            "no demonstrated skills".to_string()
        } else {
            drivers
                .iter()
                .take(RATIONALE_AXES)
                .map(|c| c.label.as_str())
                .collect::<Vec<_>>()
                .join(" + ")
        };

        // Capabilities the reached row required
        let gates = self
            .config
            .thresholds()
            .iter()
            .find(|row| row.tier == decision.tier)
            .filter(|row| !row.requires.is_empty())
            .map(|row| {
                let labels: Vec<&str> = row.requires.iter().map(|axis| axis.label()).collect();
                format!(" with {}", labels.join(", "))
            })
            .unwrap_or_default();

        let mut rationale = format!(
            "{}{} -> {} {} (score {}/{})",
            lead,
            gates,
            decision.tier,
            decision.tier.name(),
            score,
            max_score
        );

        if let Some(capped_from) = decision.capped_from {
            let missing = decision
                .missing
                .iter()
                .map(|axis| axis.label())
                .collect::<Vec<_>>()
                .join(", ");
            rationale.push_str(&format!("; held below {} by missing {}", capped_from, missing));
        }

        debug!(
            "Classified assessment: {} (score {}/{})",
            decision.tier, score, max_score
        );

        TierClassification {
            tier: decision.tier,
            score,
            max_score,
            rationale,
            capped_from: decision.capped_from,
            contributions,
        }
    }

    /// Classify an empty submission
    pub fn classify_absent(&self) -> TierClassification {
        TierClassification {
            tier: SkillTier::Tier0,
            score: 0,
            max_score: self.config.max_score(),
            rationale: format!(
                "no assessment responses -> {} {}",
                SkillTier::Tier0,
                SkillTier::Tier0.name()
            ),
            capped_from: None,
            contributions: Vec::new(),
        }
    }

    /// Classify an optional answer sheet
    pub fn classify_optional(&self, response: Option<&AssessmentResponse>) -> TierClassification {
        match response {
            Some(response) => self.classify(response),
            None => self.classify_absent(),
        }
    }

    /// Validate and classify a raw `assessmentResponses` value.
    ///
    /// Empty submissions classify to tier 0; malformed ones fail with a
    /// validation error.
    pub fn classify_value(&self, value: Option<&Value>) -> Result<TierClassification> {
        let response = parse_responses(value)?;
        Ok(self.classify_optional(response.as_ref()))
    }
}

impl Default for TierClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify with the default scoring table, returning tier and rationale
pub fn classify(response: &AssessmentResponse) -> (SkillTier, String) {
    let result = TierClassifier::new().classify(response);
    (result.tier, result.rationale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::ExperienceLevel;
    use crate::error::Error;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn mid_level_fixture() -> Value {
        json!({
            "htmlCssJsKnowledge": "advanced",
            "reactNextJsKnowledge": "intermediate",
            "canBuildCrudApp": true,
            "canImplementAuth": true,
            "canImplementGoogleAuth": false,
            "databaseKnowledge": "intermediate",
            "expressHonoKnowledge": "intermediate",
            "canBuildAuthenticatedApi": true,
            "canDocumentApi": true,
            "laravelKnowledge": "none",
            "golangKnowledge": "none",
            "canBuildGoApi": false,
            "canDeployApps": true
        })
    }

    fn beginner_fixture() -> Value {
        json!({
            "htmlCssJsKnowledge": "basic",
            "reactNextJsKnowledge": "basic",
            "canBuildCrudApp": false,
            "canImplementAuth": false,
            "canImplementGoogleAuth": false,
            "databaseKnowledge": "none",
            "expressHonoKnowledge": "none",
            "canBuildAuthenticatedApi": false,
            "canDocumentApi": false,
            "laravelKnowledge": "none",
            "golangKnowledge": "none",
            "canBuildGoApi": false,
            "canDeployApps": false
        })
    }

    fn advanced_fixture() -> Value {
        json!({
            "htmlCssJsKnowledge": "advanced",
            "reactNextJsKnowledge": "advanced",
            "canBuildCrudApp": true,
            "canImplementAuth": true,
            "canImplementGoogleAuth": true,
            "databaseKnowledge": "advanced",
            "expressHonoKnowledge": "advanced",
            "canBuildAuthenticatedApi": true,
            "canDocumentApi": true,
            "laravelKnowledge": "none",
            "golangKnowledge": "intermediate",
            "canBuildGoApi": true,
            "canDeployApps": true
        })
    }

    #[test]
    fn test_mid_level_fixture() {
        let classifier = TierClassifier::new();
        let result = classifier.classify_value(Some(&mid_level_fixture())).unwrap();

        assert!(matches!(result.tier, SkillTier::Tier2 | SkillTier::Tier3));
        assert_eq!(result.score, 30);
        assert_eq!(result.capped_from, None);
    }

    #[test]
    fn test_beginner_fixture() {
        let classifier = TierClassifier::new();
        let result = classifier.classify_value(Some(&beginner_fixture())).unwrap();

        assert_eq!(result.tier, SkillTier::Tier0);
        assert_eq!(result.score, 3);
    }

    #[test]
    fn test_advanced_fixture() {
        let classifier = TierClassifier::new();
        let result = classifier.classify_value(Some(&advanced_fixture())).unwrap();

        assert_eq!(result.tier, SkillTier::Tier4);
        assert_eq!(result.score, 48);
        assert!(result
            .rationale
            .starts_with("React/Next.js (advanced) + Database (advanced) + Express/Hono (advanced)"));
        assert!(result.rationale.contains(
            "with CRUD app, auth, Google OAuth, Go API -> Tier 4 Advanced Full-Stack Developer"
        ));
    }

    #[test]
    fn test_extremes() {
        let classifier = TierClassifier::new();

        let lowest = AssessmentResponse::uniform(ExperienceLevel::Basic, false);
        assert_eq!(classifier.classify(&lowest).tier, SkillTier::Tier0);

        let nothing = AssessmentResponse::default();
        let result = classifier.classify(&nothing);
        assert_eq!(result.tier, SkillTier::Tier0);
        assert!(result.rationale.starts_with("no demonstrated skills"));

        let highest = AssessmentResponse::uniform(ExperienceLevel::Advanced, true);
        let result = classifier.classify(&highest);
        assert_eq!(result.tier, SkillTier::Tier4);
        assert_eq!(result.score_percent(), 100);
    }

    #[test]
    fn test_absent_responses() {
        let classifier = TierClassifier::new();

        for value in [None, Some(json!(null)), Some(json!({})), Some(json!([]))] {
            let result = classifier.classify_value(value.as_ref()).unwrap();
            assert_eq!(result.tier, SkillTier::Tier0);
            assert!(result.rationale.starts_with("no assessment responses"));
        }
    }

    #[test]
    fn test_malformed_enum() {
        let classifier = TierClassifier::new();
        let mut answers = mid_level_fixture();
        answers["htmlCssJsKnowledge"] = json!("expert");

        let err = classifier.classify_value(Some(&answers)).unwrap_err();
        assert_matches!(err, Error::Validation { ref field, .. } if field == "htmlCssJsKnowledge");
    }

    #[test]
    fn test_capped_rationale() {
        let classifier = TierClassifier::new();
        let mut response = AssessmentResponse::uniform(ExperienceLevel::Advanced, true);
        response.can_build_go_api = false;

        let result = classifier.classify(&response);

        assert_eq!(result.tier, SkillTier::Tier3);
        assert_eq!(result.capped_from, Some(SkillTier::Tier4));
        assert!(result.rationale.contains(
            "with CRUD app, auth, authenticated API -> Tier 3 Multi-Framework Developer"
        ));
        assert!(result.rationale.ends_with("held below Tier 4 by missing Go API"));
    }

    #[test]
    fn test_deterministic() {
        let classifier = TierClassifier::new();
        let response = AssessmentResponse::from_value(&mid_level_fixture()).unwrap();

        let first = classifier.classify(&response);
        let _ = classifier.classify(&AssessmentResponse::default());
        let second = classifier.classify(&response);

        assert_eq!(first, second);
        assert_eq!(classify(&response), (first.tier, first.rationale));
    }

    #[test]
    fn test_with_config_validates() {
        let mut config = ScoringConfig::default();
        config.thresholds.reverse();

        assert!(TierClassifier::with_config(config).is_err());
    }
}
