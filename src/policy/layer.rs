/*!
 * Layer Policy
 * Architectural layering check, applied once per declared edge at boot
 */

use crate::core::{PackError, PackResult};
use crate::package::PackageDescriptor;
use log::debug;

/// Layering evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerPolicy;

impl LayerPolicy {
    /// Validate the edge `from -> to` against the ordered layer list.
    ///
    /// Layers listed later are lower. A package may depend on its own layer or
    /// any lower one. Unknown or missing layers make the check a no-op.
    pub fn validate(from: &PackageDescriptor, to: &PackageDescriptor, layers: &[String]) -> PackResult<()> {
        if !from.policy.enforce_layers {
            return Ok(());
        }

        let (Some(from_layer), Some(to_layer)) = (from.layer(), to.layer()) else {
            return Ok(());
        };
        let (Some(from_idx), Some(to_idx)) = (layer_index(layers, from_layer), layer_index(layers, to_layer))
        else {
            return Ok(());
        };

        if to_idx < from_idx {
            debug!(
                "Layer violation {} ({}) -> {} ({})",
                from.name, from_layer, to.name, to_layer
            );
            return Err(PackError::LayerViolation {
                package: from.name.clone(),
                layer: from_layer.to_string(),
                dependency: to.name.clone(),
                dependency_layer: to_layer.to_string(),
            });
        }
        Ok(())
    }
}

fn layer_index(layers: &[String], layer: &str) -> Option<usize> {
    layers.iter().position(|l| l == layer)
}
