/*!
 * Folder Privacy Policy
 * Restricts a package to its siblings, ancestors, their descendants and the root
 */

use super::types::{AccessPolicy, AccessRequest, PolicyDecision};
use crate::core::{PackError, PolicyKind};
use crate::package::{parent_folder, PackageDescriptor};
use log::debug;

/// Folder-locality evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct FolderPrivacyPolicy;

impl FolderPrivacyPolicy {
    pub fn is_accessible(target: &PackageDescriptor, accessor: &PackageDescriptor) -> bool {
        if !target.policy.enforce_folder_privacy || accessor.is_root() {
            return true;
        }

        // Accessor is an ancestor directory of the target
        if is_folder_ancestor(&accessor.name, &target.name) {
            return true;
        }

        let Some(target_parent) = target.parent_folder() else {
            return false;
        };

        // Accessor's parent chain reaches the target's parent (covers siblings)
        let mut current = accessor.parent_folder();
        while let Some(folder) = current {
            if folder == target_parent {
                return true;
            }
            if folder.is_empty() {
                break;
            }
            current = parent_folder(folder);
        }
        false
    }
}

/// `ancestor` is a strict directory prefix of `name`
fn is_folder_ancestor(ancestor: &str, name: &str) -> bool {
    name.len() > ancestor.len()
        && name.starts_with(ancestor)
        && name.as_bytes()[ancestor.len()] == b'/'
}

impl AccessPolicy for FolderPrivacyPolicy {
    fn evaluate(&self, request: &AccessRequest<'_>) -> PolicyDecision {
        if !request.target.policy.enforce_folder_privacy {
            return PolicyDecision::Abstain;
        }

        if Self::is_accessible(request.target, request.accessor) {
            PolicyDecision::Allow
        } else {
            debug!(
                "Folder privacy denied '{}' to '{}'",
                request.target.name, request.accessor.name
            );
            PolicyDecision::Deny(PackError::FolderPrivacyViolation {
                symbol: request.symbol.to_string(),
                owner: request.target.name.clone(),
                accessor: request.accessor.name.clone(),
            })
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::FolderPrivacy
    }
}
