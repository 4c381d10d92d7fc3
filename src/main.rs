/*!
 * Packbox - Main Entry Point
 *
 * Discovers the packages under a project root, validates the dependency
 * graph and boots every package into a simulated isolated context.
 */

use miette::Result;
use packbox::{init_tracing, boot_project, SimulatedHost};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    info!(root = %root.display(), "Packbox starting");

    let (graph, orchestrator, stats) = boot_project(&root, Arc::new(SimulatedHost::new()))?;

    info!(
        packages = graph.len(),
        layers = ?graph.layers(),
        "Dependency graph validated"
    );
    for (position, name) in stats.boot_order.iter().enumerate() {
        let symbols = orchestrator.package_box(name).map(|b| b.index.len()).unwrap_or(0);
        info!(position, package = %name, symbols, "Boot order");
    }

    info!(
        session = %stats.session_id,
        packages = stats.packages_booted,
        symbols = stats.symbols_indexed,
        namespaces = stats.namespaces_evaluated,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "Packbox ready"
    );
    Ok(())
}
