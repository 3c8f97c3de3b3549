//! Registry Events
//!
//! Events emitted by the candidate registry for external consumers, such as
//! a notifier that emails tier results.

use super::record::CandidateId;
use crate::classification::SkillTier;
use serde::{Deserialize, Serialize};

/// Events emitted by the candidate registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A candidate registered and was assigned a tier
    CandidateRegistered {
        id: CandidateId,
        email: String,
        tier: SkillTier,
    },

    /// Identity fields changed
    CandidateUpdated { id: CandidateId },

    /// A candidate was removed
    CandidateDeleted { id: CandidateId },

    /// The tier was recomputed on request
    TierRecomputed {
        id: CandidateId,
        previous: SkillTier,
        current: SkillTier,
    },
}

impl RegistryEvent {
    /// Get the candidate ID associated with this event
    pub fn candidate_id(&self) -> CandidateId {
        match self {
            RegistryEvent::CandidateRegistered { id, .. } => *id,
            RegistryEvent::CandidateUpdated { id } => *id,
            RegistryEvent::CandidateDeleted { id } => *id,
            RegistryEvent::TierRecomputed { id, .. } => *id,
        }
    }

    /// Check if the event changed a candidate's tier
    pub fn changes_tier(&self) -> bool {
        match self {
            RegistryEvent::CandidateRegistered { .. } => true,
            RegistryEvent::TierRecomputed { previous, current, .. } => previous != current,
            _ => false,
        }
    }
}
