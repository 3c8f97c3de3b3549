//! Assessment Response
//!
//! Typed record of a candidate's questionnaire answers. Every knowledge
//! question maps to an [`ExperienceLevel`], every capability question to a
//! boolean. Parsing from JSON is strict: unknown levels and wrong types are
//! rejected instead of being coerced.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Experience Level
// =============================================================================

/// Self-reported proficiency for a knowledge question
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    None,
    Basic,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    /// All levels, lowest first
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::None,
        ExperienceLevel::Basic,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Advanced,
    ];

    /// Ordinal used for scoring (0-3)
    pub fn ordinal(self) -> u32 {
        match self {
            ExperienceLevel::None => 0,
            ExperienceLevel::Basic => 1,
            ExperienceLevel::Intermediate => 2,
            ExperienceLevel::Advanced => 3,
        }
    }

    /// Wire name of the level
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::None => "none",
            ExperienceLevel::Basic => "basic",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }

    /// Parse a wire name. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }

    /// The next level up, if any
    pub fn upgrade(self) -> Option<Self> {
        match self {
            ExperienceLevel::None => Some(ExperienceLevel::Basic),
            ExperienceLevel::Basic => Some(ExperienceLevel::Intermediate),
            ExperienceLevel::Intermediate => Some(ExperienceLevel::Advanced),
            ExperienceLevel::Advanced => None,
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Question Axes
// =============================================================================

/// Knowledge questions, answered with an experience level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KnowledgeAxis {
    #[serde(rename = "htmlCssJsKnowledge")]
    HtmlCssJs,
    #[serde(rename = "reactNextJsKnowledge")]
    ReactNextJs,
    #[serde(rename = "databaseKnowledge")]
    Database,
    #[serde(rename = "expressHonoKnowledge")]
    ExpressHono,
    #[serde(rename = "laravelKnowledge")]
    Laravel,
    #[serde(rename = "golangKnowledge")]
    Golang,
}

impl KnowledgeAxis {
    pub const ALL: [KnowledgeAxis; 6] = [
        KnowledgeAxis::HtmlCssJs,
        KnowledgeAxis::ReactNextJs,
        KnowledgeAxis::Database,
        KnowledgeAxis::ExpressHono,
        KnowledgeAxis::Laravel,
        KnowledgeAxis::Golang,
    ];

    /// JSON field name
    pub fn field_name(self) -> &'static str {
        match self {
            KnowledgeAxis::HtmlCssJs => "htmlCssJsKnowledge",
            KnowledgeAxis::ReactNextJs => "reactNextJsKnowledge",
            KnowledgeAxis::Database => "databaseKnowledge",
            KnowledgeAxis::ExpressHono => "expressHonoKnowledge",
            KnowledgeAxis::Laravel => "laravelKnowledge",
            KnowledgeAxis::Golang => "golangKnowledge",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            KnowledgeAxis::HtmlCssJs => "HTML/CSS/JS",
            KnowledgeAxis::ReactNextJs => "React/Next.js",
            KnowledgeAxis::Database => "Database",
            KnowledgeAxis::ExpressHono => "Express/Hono",
            KnowledgeAxis::Laravel => "Laravel",
            KnowledgeAxis::Golang => "Golang",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.field_name() == name)
    }
}

impl std::fmt::Display for KnowledgeAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

/// Capability questions, answered yes or no
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CapabilityAxis {
    #[serde(rename = "canBuildCrudApp")]
    CrudApp,
    #[serde(rename = "canImplementAuth")]
    Auth,
    #[serde(rename = "canImplementGoogleAuth")]
    GoogleAuth,
    #[serde(rename = "canBuildAuthenticatedApi")]
    AuthenticatedApi,
    #[serde(rename = "canDocumentApi")]
    ApiDocs,
    #[serde(rename = "canBuildGoApi")]
    GoApi,
    #[serde(rename = "canDeployApps")]
    Deploy,
}

impl CapabilityAxis {
    pub const ALL: [CapabilityAxis; 7] = [
        CapabilityAxis::CrudApp,
        CapabilityAxis::Auth,
        CapabilityAxis::GoogleAuth,
        CapabilityAxis::AuthenticatedApi,
        CapabilityAxis::ApiDocs,
        CapabilityAxis::GoApi,
        CapabilityAxis::Deploy,
    ];

    /// JSON field name
    pub fn field_name(self) -> &'static str {
        match self {
            CapabilityAxis::CrudApp => "canBuildCrudApp",
            CapabilityAxis::Auth => "canImplementAuth",
            CapabilityAxis::GoogleAuth => "canImplementGoogleAuth",
            CapabilityAxis::AuthenticatedApi => "canBuildAuthenticatedApi",
            CapabilityAxis::ApiDocs => "canDocumentApi",
            CapabilityAxis::GoApi => "canBuildGoApi",
            CapabilityAxis::Deploy => "canDeployApps",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            CapabilityAxis::CrudApp => "CRUD app",
            CapabilityAxis::Auth => "auth",
            CapabilityAxis::GoogleAuth => "Google OAuth",
            CapabilityAxis::AuthenticatedApi => "authenticated API",
            CapabilityAxis::ApiDocs => "API docs",
            CapabilityAxis::GoApi => "Go API",
            CapabilityAxis::Deploy => "deployment",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.field_name() == name)
    }
}

impl std::fmt::Display for CapabilityAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

// =============================================================================
// Assessment Response
// =============================================================================

/// A candidate's answers to the assessment questionnaire.
///
/// Deserializing goes through [`AssessmentResponse::from_value`], so every
/// answer is required.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct AssessmentResponse {
    // HTML/CSS/JavaScript
    pub html_css_js_knowledge: ExperienceLevel,

    // React/Next.js
    pub react_next_js_knowledge: ExperienceLevel,
    pub can_build_crud_app: bool,

    // Authentication
    pub can_implement_auth: bool,
    pub can_implement_google_auth: bool,

    // Database
    pub database_knowledge: ExperienceLevel,

    // Backend frameworks
    pub express_hono_knowledge: ExperienceLevel,
    pub can_build_authenticated_api: bool,
    pub can_document_api: bool,

    pub laravel_knowledge: ExperienceLevel,

    // Golang
    pub golang_knowledge: ExperienceLevel,
    pub can_build_go_api: bool,

    pub can_deploy_apps: bool,
}

impl AssessmentResponse {
    /// Every knowledge axis at one level, every capability at one value
    pub fn uniform(level: ExperienceLevel, capable: bool) -> Self {
        let mut response = Self::default();
        for axis in KnowledgeAxis::ALL {
            response.set_knowledge(axis, level);
        }
        for axis in CapabilityAxis::ALL {
            response.set_capability(axis, capable);
        }
        response
    }

    pub fn knowledge(&self, axis: KnowledgeAxis) -> ExperienceLevel {
        match axis {
            KnowledgeAxis::HtmlCssJs => self.html_css_js_knowledge,
            KnowledgeAxis::ReactNextJs => self.react_next_js_knowledge,
            KnowledgeAxis::Database => self.database_knowledge,
            KnowledgeAxis::ExpressHono => self.express_hono_knowledge,
            KnowledgeAxis::Laravel => self.laravel_knowledge,
            KnowledgeAxis::Golang => self.golang_knowledge,
        }
    }

    pub fn set_knowledge(&mut self, axis: KnowledgeAxis, level: ExperienceLevel) {
        let slot = match axis {
            KnowledgeAxis::HtmlCssJs => &mut self.html_css_js_knowledge,
            KnowledgeAxis::ReactNextJs => &mut self.react_next_js_knowledge,
            KnowledgeAxis::Database => &mut self.database_knowledge,
            KnowledgeAxis::ExpressHono => &mut self.express_hono_knowledge,
            KnowledgeAxis::Laravel => &mut self.laravel_knowledge,
            KnowledgeAxis::Golang => &mut self.golang_knowledge,
        };
        *slot = level;
    }

    pub fn capability(&self, axis: CapabilityAxis) -> bool {
        match axis {
            CapabilityAxis::CrudApp => self.can_build_crud_app,
            CapabilityAxis::Auth => self.can_implement_auth,
            CapabilityAxis::GoogleAuth => self.can_implement_google_auth,
            CapabilityAxis::AuthenticatedApi => self.can_build_authenticated_api,
            CapabilityAxis::ApiDocs => self.can_document_api,
            CapabilityAxis::GoApi => self.can_build_go_api,
            CapabilityAxis::Deploy => self.can_deploy_apps,
        }
    }

    pub fn set_capability(&mut self, axis: CapabilityAxis, value: bool) {
        let slot = match axis {
            CapabilityAxis::CrudApp => &mut self.can_build_crud_app,
            CapabilityAxis::Auth => &mut self.can_implement_auth,
            CapabilityAxis::GoogleAuth => &mut self.can_implement_google_auth,
            CapabilityAxis::AuthenticatedApi => &mut self.can_build_authenticated_api,
            CapabilityAxis::ApiDocs => &mut self.can_document_api,
            CapabilityAxis::GoApi => &mut self.can_build_go_api,
            CapabilityAxis::Deploy => &mut self.can_deploy_apps,
        };
        *slot = value;
    }

    /// Strictly parse a JSON object. All thirteen answers are required.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            Error::validation("assessmentResponses", "expected an object of answers")
        })?;

        let mut response = Self::default();

        for axis in KnowledgeAxis::ALL {
            let field = axis.field_name();
            let raw = match object.get(field) {
                Some(Value::Null) | None => {
                    return Err(Error::validation(
                        field,
                        format!("{} knowledge level is required", axis.label()),
                    ))
                }
                Some(raw) => raw,
            };
            let text = raw.as_str().ok_or_else(|| {
                Error::validation(field, format!("expected an experience level, got {}", raw))
            })?;
            let level = ExperienceLevel::parse(text).ok_or_else(|| {
                Error::validation(
                    field,
                    format!(
                        "unknown experience level '{}' (expected none, basic, intermediate or advanced)",
                        text
                    ),
                )
            })?;
            response.set_knowledge(axis, level);
        }

        for axis in CapabilityAxis::ALL {
            let field = axis.field_name();
            let value = match object.get(field) {
                Some(Value::Bool(value)) => *value,
                Some(Value::Null) | None => {
                    return Err(Error::validation(
                        field,
                        format!("{} capability is required", axis.label()),
                    ))
                }
                Some(other) => {
                    return Err(Error::validation(
                        field,
                        format!("expected a boolean, got {}", other),
                    ))
                }
            };
            response.set_capability(axis, value);
        }

        Ok(response)
    }
}

impl TryFrom<Value> for AssessmentResponse {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn full_answers() -> Value {
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

    #[test]
    fn test_level_ordering() {
        assert!(ExperienceLevel::None < ExperienceLevel::Basic);
        assert!(ExperienceLevel::Intermediate < ExperienceLevel::Advanced);
        assert_eq!(ExperienceLevel::Advanced.ordinal(), 3);
        assert_eq!(ExperienceLevel::Advanced.upgrade(), None);
        assert_eq!(ExperienceLevel::parse("expert"), None);
        assert_eq!(ExperienceLevel::parse("Basic"), None);
    }

    #[test]
    fn test_from_value() {
        let response = AssessmentResponse::from_value(&full_answers()).unwrap();

        assert_eq!(response.html_css_js_knowledge, ExperienceLevel::Advanced);
        assert_eq!(response.knowledge(KnowledgeAxis::Golang), ExperienceLevel::None);
        assert!(response.capability(CapabilityAxis::CrudApp));
        assert!(!response.capability(CapabilityAxis::GoogleAuth));
    }

    #[test]
    fn test_unknown_level_rejected() {
        let mut answers = full_answers();
        answers["htmlCssJsKnowledge"] = json!("expert");

        let err = AssessmentResponse::from_value(&answers).unwrap_err();
        assert_matches!(err, Error::Validation { ref field, .. } if field == "htmlCssJsKnowledge");
    }

    #[test]
    fn test_wrong_types_rejected() {
        let mut answers = full_answers();
        answers["canDeployApps"] = json!("yes");
        let err = AssessmentResponse::from_value(&answers).unwrap_err();
        assert_matches!(err, Error::Validation { ref field, .. } if field == "canDeployApps");

        let mut answers = full_answers();
        answers["golangKnowledge"] = json!(2);
        let err = AssessmentResponse::from_value(&answers).unwrap_err();
        assert_matches!(err, Error::Validation { ref field, .. } if field == "golangKnowledge");

        let err = AssessmentResponse::from_value(&json!("advanced")).unwrap_err();
        assert_matches!(err, Error::Validation { ref field, .. } if field == "assessmentResponses");
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut answers = full_answers();
        answers.as_object_mut().unwrap().remove("canBuildGoApi");

        let err = AssessmentResponse::from_value(&answers).unwrap_err();
        assert_matches!(err, Error::Validation { ref field, .. } if field == "canBuildGoApi");
    }

    #[test]
    fn test_extra_keys_ignored() {
        let mut answers = full_answers();
        answers["favouriteEditor"] = json!("vim");

        assert!(AssessmentResponse::from_value(&answers).is_ok());
    }

    #[test]
    fn test_serde_wire_names() {
        let response = AssessmentResponse::from_value(&full_answers()).unwrap();
        let value = serde_json::to_value(response).unwrap();

        assert_eq!(value, full_answers());
    }

    #[test]
    fn test_deserialize_is_strict() {
        let partial = json!({"htmlCssJsKnowledge": "advanced", "canBuildGoApi": true});
        let err = serde_json::from_value::<AssessmentResponse>(partial).unwrap_err();
        assert!(err.to_string().contains("reactNextJsKnowledge"));

        let response: AssessmentResponse = serde_json::from_value(full_answers()).unwrap();
        assert_eq!(response, AssessmentResponse::from_value(&full_answers()).unwrap());
    }

    #[test]
    fn test_schema_requires_every_answer() {
        let schema = serde_json::to_value(schemars::schema_for!(AssessmentResponse)).unwrap();
        let required = schema["required"].as_array().unwrap();

        assert_eq!(required.len(), 13);
        for axis in KnowledgeAxis::ALL {
            assert!(required.contains(&json!(axis.field_name())));
        }
        for axis in CapabilityAxis::ALL {
            assert!(required.contains(&json!(axis.field_name())));
        }
    }

    #[test]
    fn test_uniform() {
        let top = AssessmentResponse::uniform(ExperienceLevel::Advanced, true);
        assert!(KnowledgeAxis::ALL
            .iter()
            .all(|axis| top.knowledge(*axis) == ExperienceLevel::Advanced));
        assert!(CapabilityAxis::ALL.iter().all(|axis| top.capability(*axis)));
    }
}
