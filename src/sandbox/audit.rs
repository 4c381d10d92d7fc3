/*!
 * Resolution Audit Trail
 * Tracks cross-boundary resolutions and denials per accessing package
 */

use super::types::Resolution;
use crate::core::limits::{MAX_AUDIT_EVENTS, MAX_AUDIT_EVENTS_PER_PACKAGE};
use crate::core::{PackError, PackageName};
use ahash::RandomState;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use std::collections::VecDeque;
use std::time::SystemTime;

/// Recorded outcome of one resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AuditOutcome {
    Found { provider: PackageName },
    Denied { error: PackError },
    Absent,
    Failed { error: PackError },
}

impl From<&Resolution> for AuditOutcome {
    fn from(resolution: &Resolution) -> Self {
        match resolution {
            Resolution::Found { provider, .. } => AuditOutcome::Found {
                provider: provider.clone(),
            },
            Resolution::Denied(error) => AuditOutcome::Denied { error: error.clone() },
            Resolution::Absent => AuditOutcome::Absent,
            Resolution::Failed(error) => AuditOutcome::Failed { error: error.clone() },
        }
    }
}

/// Resolution audit event
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub accessor: PackageName,
    pub symbol: String,
    pub outcome: AuditOutcome,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub logged_at: SystemTime,
}

impl AuditEvent {
    pub fn new(accessor: impl Into<PackageName>, symbol: impl Into<String>, outcome: AuditOutcome) -> Self {
        Self {
            accessor: accessor.into(),
            symbol: symbol.into(),
            outcome,
            logged_at: SystemTime::now(),
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self.outcome, AuditOutcome::Denied { .. })
    }
}

/// Audit log of resolver decisions
pub struct ResolutionAudit {
    /// Global event log (ring buffer)
    events: RwLock<VecDeque<AuditEvent>>,
    package_events: DashMap<PackageName, VecDeque<AuditEvent>, RandomState>,
    denial_counts: DashMap<PackageName, u64, RandomState>,
}

impl ResolutionAudit {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(VecDeque::with_capacity(1024)),
            package_events: DashMap::with_hasher(RandomState::new()),
            denial_counts: DashMap::with_hasher(RandomState::new()),
        }
    }

    pub fn log(&self, event: AuditEvent) {
        let accessor = event.accessor.clone();
        let is_denied = event.is_denied();

        {
            let mut events = self.events.write();
            if events.len() >= MAX_AUDIT_EVENTS {
                events.pop_front();
            }
            events.push_back(event.clone());
        }

        {
            let mut entry = self.package_events.entry(accessor.clone()).or_default();
            if entry.len() >= MAX_AUDIT_EVENTS_PER_PACKAGE {
                entry.pop_front();
            }
            entry.push_back(event);
        }

        if is_denied {
            *self.denial_counts.entry(accessor).or_insert(0) += 1;
        }
    }

    /// Most recent events first
    pub fn recent(&self, limit: usize) -> Vec<AuditEvent> {
        self.events.read().iter().rev().take(limit).cloned().collect()
    }

    /// Most recent events of one accessing package first
    pub fn for_package(&self, accessor: &str, limit: usize) -> Vec<AuditEvent> {
        self.package_events
            .get(accessor)
            .map(|entry| entry.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    pub fn denial_count(&self, accessor: &str) -> u64 {
        self.denial_counts.get(accessor).map(|e| *e).unwrap_or(0)
    }

    /// Accessors with at least one denial, sorted by name
    pub fn packages_with_denials(&self) -> Vec<(PackageName, u64)> {
        let mut denials: Vec<(PackageName, u64)> = self
            .denial_counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        denials.sort();
        denials
    }

    pub fn clear(&self) {
        self.events.write().clear();
        self.package_events.clear();
        self.denial_counts.clear();
    }

    pub fn stats(&self) -> AuditStats {
        AuditStats {
            total_events: self.events.read().len(),
            total_denials: self.denial_counts.iter().map(|e| *e.value()).sum(),
            packages_tracked: self.package_events.len(),
        }
    }

    /// Global log as a JSON array, oldest first
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        let events = self.events.read();
        serde_json::to_string(&*events)
    }
}

impl Default for ResolutionAudit {
    fn default() -> Self {
        Self::new()
    }
}

/// Audit statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStats {
    pub total_events: usize,
    pub total_denials: u64,
    pub packages_tracked: usize,
}
