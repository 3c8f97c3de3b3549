//! Candidate Record
//!
//! A registered candidate: identity, answers, and the tier derived from
//! them. The tier is computed once at registration and only changes through
//! an explicit recompute.

use super::validation::{normalize_country, normalize_email, normalize_name, normalize_phone};
use crate::assessment::{parse_responses, AssessmentResponse};
use crate::classification::{SkillTier, TierClassifier, TierInfo};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// =============================================================================
// Candidate ID
// =============================================================================

/// Unique identifier for a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub Uuid);

impl CandidateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from the hyphenated string form
    pub fn parse(id: &str) -> Option<Self> {
        Uuid::parse_str(id).ok().map(Self)
    }
}

impl Default for CandidateId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CandidateId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

// =============================================================================
// Inputs
// =============================================================================

/// Registration payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub country: Option<String>,
    /// Raw answers; validated during registration
    #[serde(default)]
    pub assessment_responses: Option<Value>,
}

/// Identity fields an administrator may change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl CandidateUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.country.is_none()
    }
}

// =============================================================================
// Candidate
// =============================================================================

/// A registered candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// `None` when the candidate submitted no answers
    pub assessment_responses: Option<AssessmentResponse>,
    pub assigned_tier: SkillTier,
    pub rationale: String,
    pub score: u32,
    pub tier_assigned_at: DateTime<Utc>,
    pub notification_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Candidate {
    /// Validate a registration and assign its tier
    pub fn register(input: CandidateInput, classifier: &TierClassifier) -> Result<Self> {
        let name = normalize_name(&input.name)?;
        let email = normalize_email(&input.email)?;
        let phone = normalize_phone(&input.phone)?;
        let country = normalize_country(input.country.as_deref())?;
        let responses = parse_responses(input.assessment_responses.as_ref())?;

        let classification = classifier.classify_optional(responses.as_ref());
        let now = Utc::now();

        Ok(Self {
            id: CandidateId::new(),
            name,
            email,
            phone,
            country,
            assessment_responses: responses,
            assigned_tier: classification.tier,
            rationale: classification.rationale,
            score: classification.score,
            tier_assigned_at: now,
            notification_sent: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Re-run classification on the stored answers. Returns the previous tier.
    pub fn recompute_tier(&mut self, classifier: &TierClassifier) -> SkillTier {
        let previous = self.assigned_tier;
        let classification = classifier.classify_optional(self.assessment_responses.as_ref());
        let now = Utc::now();

        self.assigned_tier = classification.tier;
        self.rationale = classification.rationale;
        self.score = classification.score;
        self.tier_assigned_at = now;
        self.updated_at = now;

        previous
    }

    /// Apply identity changes. The tier is left untouched.
    pub fn apply_update(&mut self, update: CandidateUpdate) -> Result<()> {
        // Validate everything before touching the record
        let name = update.name.as_deref().map(normalize_name).transpose()?;
        let phone = update.phone.as_deref().map(normalize_phone).transpose()?;
        let country = match update.country.as_deref() {
            Some(country) => Some(normalize_country(Some(country))?),
            None => None,
        };

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(country) = country {
            self.country = country;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Record that the tier result was delivered
    pub fn mark_notified(&mut self) {
        self.notification_sent = true;
        self.updated_at = Utc::now();
    }

    pub fn tier_info(&self) -> TierInfo {
        self.assigned_tier.info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn advanced_input(email: &str) -> CandidateInput {
        CandidateInput {
            name: "Advanced Developer".into(),
            email: email.into(),
            phone: "+1234567892".into(),
            country: Some("UK".into()),
            assessment_responses: Some(json!({
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
            })),
        }
    }

    #[test]
    fn test_register() {
        let classifier = TierClassifier::new();
        let candidate =
            Candidate::register(advanced_input(" Advanced@Example.com "), &classifier).unwrap();

        assert_eq!(candidate.email, "advanced@example.com");
        assert_eq!(candidate.assigned_tier, SkillTier::Tier4);
        assert_eq!(candidate.score, 48);
        assert!(!candidate.notification_sent);
        assert_eq!(candidate.tier_info().name, "Advanced Full-Stack Developer");
    }

    #[test]
    fn test_register_invalid_email_with_empty_answers() {
        let classifier = TierClassifier::new();
        let input = CandidateInput {
            name: "Invalid User".into(),
            email: "invalidemail".into(),
            phone: "+1234567893".into(),
            country: None,
            assessment_responses: Some(json!({})),
        };

        let err = Candidate::register(input, &classifier).unwrap_err();
        assert_matches!(err, Error::Validation { ref field, .. } if field == "email");
    }

    #[test]
    fn test_register_without_answers() {
        let classifier = TierClassifier::new();
        let mut input = advanced_input("nobody@example.com");
        input.assessment_responses = None;

        let candidate = Candidate::register(input, &classifier).unwrap();
        assert_eq!(candidate.assigned_tier, SkillTier::Tier0);
        assert_eq!(candidate.assessment_responses, None);
    }

    #[test]
    fn test_update_leaves_tier() {
        let classifier = TierClassifier::new();
        let mut candidate =
            Candidate::register(advanced_input("adv@example.com"), &classifier).unwrap();

        candidate
            .apply_update(CandidateUpdate {
                phone: Some("+9876543210".into()),
                country: Some("Updated Location".into()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(candidate.phone, "+9876543210");
        assert_eq!(candidate.country.as_deref(), Some("Updated Location"));
        assert_eq!(candidate.assigned_tier, SkillTier::Tier4);
    }

    #[test]
    fn test_invalid_update_is_atomic() {
        let classifier = TierClassifier::new();
        let mut candidate =
            Candidate::register(advanced_input("adv@example.com"), &classifier).unwrap();

        let err = candidate
            .apply_update(CandidateUpdate {
                name: Some("Renamed".into()),
                phone: Some("not a phone".into()),
                country: None,
            })
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(candidate.name, "Advanced Developer");
    }

    #[test]
    fn test_recompute_with_new_config() {
        use crate::classification::ScoringConfig;

        let classifier = TierClassifier::new();
        let mut candidate =
            Candidate::register(advanced_input("adv@example.com"), &classifier).unwrap();

        let mut config = ScoringConfig::default();
        config.thresholds[3].above = 50;
        let stricter = TierClassifier::with_config(config).unwrap();

        let previous = candidate.recompute_tier(&stricter);
        assert_eq!(previous, SkillTier::Tier4);
        assert_eq!(candidate.assigned_tier, SkillTier::Tier3);

        candidate.recompute_tier(&classifier);
        assert_eq!(candidate.assigned_tier, SkillTier::Tier4);
    }

    #[test]
    fn test_serialized_shape() {
        let classifier = TierClassifier::new();
        let candidate =
            Candidate::register(advanced_input("adv@example.com"), &classifier).unwrap();
        let value = serde_json::to_value(&candidate).unwrap();

        assert_eq!(value["assignedTier"], json!(4));
        assert_eq!(value["assessmentResponses"]["golangKnowledge"], json!("intermediate"));
        assert_eq!(value["notificationSent"], json!(false));
    }

    #[test]
    fn test_deserialize_keeps_answers_strict() {
        let classifier = TierClassifier::new();
        let candidate =
            Candidate::register(advanced_input("adv@example.com"), &classifier).unwrap();
        let mut value = serde_json::to_value(&candidate).unwrap();

        let restored: Candidate = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(restored, candidate);

        value["assessmentResponses"] = json!({"golangKnowledge": "advanced"});
        assert!(serde_json::from_value::<Candidate>(value).is_err());
    }
}
