/*!
 * Policy Engine
 * Composes the resolution-time access policies; the first denial wins
 */

use super::folder::FolderPrivacyPolicy;
use super::privacy::PrivacyPolicy;
use super::types::{AccessPolicy, AccessRequest, PolicyDecision};
use super::visibility::VisibilityPolicy;
use crate::core::PackResult;
use log::debug;

/// Ordered set of access policies
pub struct PolicyEngine {
    policies: Vec<Box<dyn AccessPolicy>>,
}

impl PolicyEngine {
    /// Privacy, then visibility, then folder privacy
    pub fn new() -> Self {
        Self {
            policies: vec![
                Box::new(PrivacyPolicy),
                Box::new(VisibilityPolicy),
                Box::new(FolderPrivacyPolicy),
            ],
        }
    }

    /// Engine without any policy
    pub fn empty() -> Self {
        Self { policies: Vec::new() }
    }

    /// Add a policy
    pub fn add_policy(&mut self, policy: Box<dyn AccessPolicy>) {
        self.policies.push(policy);
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Evaluate a request through all policies.
    ///
    /// Unlike a permission check, a reference that no policy denies is allowed:
    /// packages that enforce nothing are open.
    pub fn check(&self, request: &AccessRequest<'_>) -> PackResult<()> {
        debug!(
            "Evaluating access: symbol={}, owner={}, accessor={}",
            request.symbol, request.target.name, request.accessor.name
        );

        for policy in &self.policies {
            match policy.evaluate(request) {
                PolicyDecision::Deny(err) => {
                    debug!("Policy '{}' denied request", policy.kind());
                    return Err(err);
                }
                PolicyDecision::Allow => {
                    debug!("Policy '{}' allowed request", policy.kind());
                }
                PolicyDecision::Abstain => {
                    debug!("Policy '{}' abstained", policy.kind());
                }
            }
        }
        Ok(())
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new()
    }
}
