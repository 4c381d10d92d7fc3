/*!
 * Visibility Policy
 * Allow-list of packages that may reference a visibility-enforcing package
 */

use super::types::{AccessPolicy, AccessRequest, PolicyDecision};
use crate::core::{PackError, PolicyKind};
use crate::package::PackageDescriptor;
use log::debug;

/// Visibility evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityPolicy;

impl VisibilityPolicy {
    pub fn is_visible(target: &PackageDescriptor, accessor: &PackageDescriptor) -> bool {
        !target.policy.enforce_visibility
            || target.policy.visible_to.iter().any(|name| name == &accessor.name)
    }
}

impl AccessPolicy for VisibilityPolicy {
    fn evaluate(&self, request: &AccessRequest<'_>) -> PolicyDecision {
        if !request.target.policy.enforce_visibility {
            return PolicyDecision::Abstain;
        }

        if Self::is_visible(request.target, request.accessor) {
            PolicyDecision::Allow
        } else {
            debug!("'{}' is not visible to '{}'", request.target.name, request.accessor.name);
            PolicyDecision::Deny(PackError::VisibilityViolation {
                symbol: request.symbol.to_string(),
                owner: request.target.name.clone(),
                accessor: request.accessor.name.clone(),
            })
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Visibility
    }
}
