//! Candidate Registry
//!
//! In-memory, thread-safe store of registered candidates with a unique
//! email index. Readers share a lock; every mutation emits a
//! [`RegistryEvent`] on a broadcast channel.

use super::events::RegistryEvent;
use super::export::to_csv;
use super::query::{CandidatePage, CandidateQuery, ExportFilter, Pagination};
use super::record::{Candidate, CandidateId, CandidateInput, CandidateUpdate};
use super::stats::CandidateStats;
use crate::classification::TierClassifier;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Capacity of the event channel
const EVENT_CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, Default)]
struct RegistryState {
    candidates: HashMap<CandidateId, Candidate>,
    /// Normalized email to candidate
    by_email: HashMap<String, CandidateId>,
}

/// Registry of candidates and their assigned tiers
pub struct CandidateRegistry {
    state: RwLock<RegistryState>,
    classifier: TierClassifier,
    event_sender: broadcast::Sender<RegistryEvent>,
}

impl std::fmt::Debug for CandidateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateRegistry")
            .field("candidates", &self.state.read().candidates.len())
            .finish()
    }
}

impl CandidateRegistry {
    /// Create a registry using the default scoring table
    pub fn new() -> Arc<Self> {
        Self::with_classifier(TierClassifier::new())
    }

    /// Create a registry with a custom classifier
    pub fn with_classifier(classifier: TierClassifier) -> Arc<Self> {
        let (event_sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Arc::new(Self {
            state: RwLock::new(RegistryState::default()),
            classifier,
            event_sender,
        })
    }

    /// Get an event receiver
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.event_sender.subscribe()
    }

    pub fn classifier(&self) -> &TierClassifier {
        &self.classifier
    }

    /// Validate, classify and store a new candidate
    pub fn register(&self, input: CandidateInput) -> Result<Candidate> {
        let candidate = Candidate::register(input, &self.classifier)?;

        {
            let mut state = self.state.write();
            if state.by_email.contains_key(&candidate.email) {
                return Err(Error::CandidateExists {
                    email: candidate.email,
                });
            }
            state.by_email.insert(candidate.email.clone(), candidate.id);
            state.candidates.insert(candidate.id, candidate.clone());
        }

        info!(
            "Registered candidate {} as {} ({})",
            candidate.id,
            candidate.assigned_tier,
            candidate.assigned_tier.name()
        );

        let _ = self.event_sender.send(RegistryEvent::CandidateRegistered {
            id: candidate.id,
            email: candidate.email.clone(),
            tier: candidate.assigned_tier,
        });

        Ok(candidate)
    }

    /// Get a candidate by ID
    pub fn get(&self, id: CandidateId) -> Result<Candidate> {
        self.state
            .read()
            .candidates
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::CandidateNotFound { id: id.to_string() })
    }

    /// Look a candidate up by email
    pub fn find_by_email(&self, email: &str) -> Option<Candidate> {
        let email = email.trim().to_lowercase();
        let state = self.state.read();
        state
            .by_email
            .get(&email)
            .and_then(|id| state.candidates.get(id))
            .cloned()
    }

    /// Update identity fields
    pub fn update(&self, id: CandidateId, update: CandidateUpdate) -> Result<Candidate> {
        if update.is_empty() {
            return self.get(id);
        }

        let updated = {
            let mut state = self.state.write();
            let candidate = state
                .candidates
                .get_mut(&id)
                .ok_or_else(|| Error::CandidateNotFound { id: id.to_string() })?;
            candidate.apply_update(update)?;
            candidate.clone()
        };

        debug!("Updated candidate {}", id);
        let _ = self.event_sender.send(RegistryEvent::CandidateUpdated { id });

        Ok(updated)
    }

    /// Re-run classification for one candidate
    pub fn recompute(&self, id: CandidateId) -> Result<Candidate> {
        let (previous, updated) = {
            let mut state = self.state.write();
            let candidate = state
                .candidates
                .get_mut(&id)
                .ok_or_else(|| Error::CandidateNotFound { id: id.to_string() })?;
            let previous = candidate.recompute_tier(&self.classifier);
            (previous, candidate.clone())
        };

        if previous != updated.assigned_tier {
            info!(
                "Candidate {} moved from {} to {}",
                id, previous, updated.assigned_tier
            );
        }

        let _ = self.event_sender.send(RegistryEvent::TierRecomputed {
            id,
            previous,
            current: updated.assigned_tier,
        });

        Ok(updated)
    }

    /// Record that a candidate's tier result was delivered
    pub fn mark_notified(&self, id: CandidateId) -> Result<()> {
        let mut state = self.state.write();
        let candidate = state
            .candidates
            .get_mut(&id)
            .ok_or_else(|| Error::CandidateNotFound { id: id.to_string() })?;
        candidate.mark_notified();
        Ok(())
    }

    /// Remove a candidate
    pub fn delete(&self, id: CandidateId) -> Result<Candidate> {
        let removed = {
            let mut state = self.state.write();
            let candidate = state
                .candidates
                .remove(&id)
                .ok_or_else(|| Error::CandidateNotFound { id: id.to_string() })?;
            state.by_email.remove(&candidate.email);
            candidate
        };

        info!("Deleted candidate {}", id);
        let _ = self.event_sender.send(RegistryEvent::CandidateDeleted { id });

        Ok(removed)
    }

    /// Number of registered candidates
    pub fn len(&self) -> usize {
        self.state.read().candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Filtered, sorted, paginated listing
    pub fn list(&self, query: &CandidateQuery) -> Result<CandidatePage> {
        query.validate()?;

        let mut matched: Vec<Candidate> = self
            .state
            .read()
            .candidates
            .values()
            .filter(|candidate| query.matches(candidate))
            .cloned()
            .collect();

        matched.sort_by(|a, b| query.compare(a, b));

        let pagination = Pagination::new(matched.len(), query.page, query.limit);
        let data = matched
            .into_iter()
            .skip(pagination.offset())
            .take(query.limit as usize)
            .collect();

        Ok(CandidatePage { data, pagination })
    }

    /// Statistics as of now
    pub fn stats(&self) -> CandidateStats {
        self.stats_at(Utc::now())
    }

    /// Statistics as of `now`
    pub fn stats_at(&self, now: DateTime<Utc>) -> CandidateStats {
        CandidateStats::compute(self.state.read().candidates.values(), now)
    }

    /// Candidates matching an export filter, newest first
    pub fn export(&self, filter: &ExportFilter) -> Vec<Candidate> {
        let mut matched: Vec<Candidate> = self
            .state
            .read()
            .candidates
            .values()
            .filter(|candidate| filter.matches(candidate))
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        matched
    }

    /// CSV export of matching candidates
    pub fn export_csv(&self, filter: &ExportFilter) -> Result<String> {
        let candidates = self.export(filter);
        if candidates.is_empty() {
            return Err(Error::NoCandidatesToExport);
        }
        debug!("Exporting {} candidates", candidates.len());
        Ok(to_csv(&candidates))
    }
}
