//! Skill Tiers
//!
//! The five tiers a candidate can be routed into, with the names and
//! descriptions shown to candidates and administrators.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Skill tier, serialized as its integer value (0-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SkillTier {
    /// Beginner
    Tier0,
    /// CRUD Developer
    Tier1,
    /// Full-Stack Next.js Developer
    Tier2,
    /// Multi-Framework Developer
    Tier3,
    /// Advanced Full-Stack Developer
    Tier4,
}

impl SkillTier {
    /// All tiers, lowest first
    pub const ALL: [SkillTier; 5] = [
        SkillTier::Tier0,
        SkillTier::Tier1,
        SkillTier::Tier2,
        SkillTier::Tier3,
        SkillTier::Tier4,
    ];

    pub fn value(self) -> u8 {
        match self {
            SkillTier::Tier0 => 0,
            SkillTier::Tier1 => 1,
            SkillTier::Tier2 => 2,
            SkillTier::Tier3 => 3,
            SkillTier::Tier4 => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SkillTier::Tier0 => "Beginner",
            SkillTier::Tier1 => "CRUD Developer",
            SkillTier::Tier2 => "Full-Stack Next.js Developer",
            SkillTier::Tier3 => "Multi-Framework Developer",
            SkillTier::Tier4 => "Advanced Full-Stack Developer",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SkillTier::Tier0 => {
                "A complete beginner. Has done HTML, CSS, and basic JavaScript. Knows the basics \
                 of Next.js or React but is not capable of building a CRUD app with a database."
            }
            SkillTier::Tier1 => {
                "Knows some Next.js/React. Can build a CRUD application with a database using \
                 server actions or API routes, but cannot add advanced authentication."
            }
            SkillTier::Tier2 => {
                "Knows Next.js/React. Can build and deploy an authenticated CRUD app, but has no \
                 backend framework experience for building an authenticated CRUD API."
            }
            SkillTier::Tier3 => {
                "Knows Next.js/React and Express/Hono. Can build an authenticated CRUD app and an \
                 authenticated, documented CRUD API, but does not know Golang."
            }
            SkillTier::Tier4 => {
                "Knows Next.js/React, Express/Hono and Golang. Implements full authentication \
                 including Google OAuth and can build, integrate and deploy a Go API."
            }
        }
    }

    /// Name and description bundle
    pub fn info(self) -> TierInfo {
        TierInfo {
            tier: self,
            name: self.name().to_string(),
            description: self.description().to_string(),
        }
    }
}

impl Default for SkillTier {
    fn default() -> Self {
        SkillTier::Tier0
    }
}

impl std::fmt::Display for SkillTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tier {}", self.value())
    }
}

impl TryFrom<u8> for SkillTier {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SkillTier::ALL
            .into_iter()
            .find(|tier| tier.value() == value)
            .ok_or_else(|| Error::validation("tier", format!("tier must be 0-4, got {}", value)))
    }
}

impl From<SkillTier> for u8 {
    fn from(tier: SkillTier) -> Self {
        tier.value()
    }
}

/// Detailed tier information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierInfo {
    pub tier: SkillTier,
    pub name: String,
    pub description: String,
}
