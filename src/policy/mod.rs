/*!
 * Policy Module
 * Access policies evaluated on cross-package references and edges
 */

mod engine;
mod folder;
mod layer;
mod privacy;
mod types;
mod visibility;

pub use engine::PolicyEngine;
pub use folder::FolderPrivacyPolicy;
pub use layer::LayerPolicy;
pub use privacy::PrivacyPolicy;
pub use types::{AccessPolicy, AccessRequest, PolicyDecision};
pub use visibility::VisibilityPolicy;
