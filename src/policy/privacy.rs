/*!
 * Privacy Policy
 * Only public symbols of a privacy-enforcing package may be referenced
 */

use super::types::{AccessPolicy, AccessRequest, PolicyDecision};
use crate::core::{is_same_or_nested, PackError, PolicyKind};
use crate::index::PublicSymbols;
use crate::package::PackageDescriptor;
use log::debug;

/// Privacy evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct PrivacyPolicy;

impl PrivacyPolicy {
    /// Public unless privacy is enforced; explicit private symbols always lose
    pub fn is_public(symbol: &str, package: &PackageDescriptor, public: &PublicSymbols) -> bool {
        if !package.policy.enforce_privacy {
            return true;
        }
        if Self::is_explicitly_private(symbol, package) {
            return false;
        }
        public.contains(symbol)
    }

    /// Symbol matches, or is nested under, a declared private symbol
    pub fn is_explicitly_private(symbol: &str, package: &PackageDescriptor) -> bool {
        package
            .policy
            .private_symbols
            .iter()
            .any(|private| is_same_or_nested(symbol, private))
    }
}

impl AccessPolicy for PrivacyPolicy {
    fn evaluate(&self, request: &AccessRequest<'_>) -> PolicyDecision {
        if !request.target.policy.enforce_privacy {
            return PolicyDecision::Abstain;
        }

        if Self::is_public(request.symbol, request.target, request.public_symbols) {
            PolicyDecision::Allow
        } else {
            debug!(
                "Privacy denied {} in '{}' to '{}'",
                request.symbol, request.target.name, request.accessor.name
            );
            PolicyDecision::Deny(PackError::PrivacyViolation {
                symbol: request.symbol.to_string(),
                owner: request.target.name.clone(),
                accessor: request.accessor.name.clone(),
            })
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Privacy
    }
}
