/*!
 * Host Capability Tests
 * Orchestrator behavior against mocked and instrumented hosts
 */

use crate::fixture::Project;
use mockall::mock;
use packbox::sandbox::{ExecutionContext, Host, HostPlatform, LibraryIsolation};
use packbox::{PackError, PackResult, PackageDescriptor, SandboxOrchestrator, SimulatedHost};
use parking_lot::Mutex;
use std::sync::Arc;

mock! {
    pub Runtime {}

    impl Host for Runtime {
        fn is_supported(&self) -> bool;
        fn platform(&self) -> HostPlatform;
        fn create_context(&self, package: &PackageDescriptor) -> PackResult<Arc<dyn ExecutionContext>>;
    }
}

fn small_project() -> Project {
    let project = Project::new();
    project
        .package("packs/app", "dependencies:\n  - packs/lib\n")
        .package("packs/lib", "")
        .file("packs/lib/lib/tool.rb", "");
    project
}

#[test]
fn test_missing_capability_is_fatal_at_startup() {
    let mut host = MockRuntime::new();
    host.expect_is_supported().return_const(false);
    host.expect_platform().return_const(HostPlatform::Native);
    host.expect_create_context().never();

    let err = SandboxOrchestrator::new(Arc::new(host)).err().unwrap();
    assert!(matches!(err, PackError::HostCapabilityMissing { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_context_creation_failure_aborts_boot() {
    let mut host = MockRuntime::new();
    host.expect_is_supported().return_const(true);
    host.expect_platform().return_const(HostPlatform::Native);
    host.expect_create_context().returning(|package| {
        Err(PackError::HostFailure {
            package: package.name.clone(),
            reason: "out of contexts".into(),
        })
    });

    let project = small_project();
    let graph = project.graph().unwrap();
    let orchestrator = SandboxOrchestrator::new(Arc::new(host)).unwrap();

    let err = orchestrator.boot_all(&graph).unwrap_err();
    assert!(matches!(err, PackError::HostFailure { ref package, .. } if package == "."));
    assert!(orchestrator.booted_packages().is_empty());
}

#[test]
fn test_one_context_per_package() {
    let simulated = SimulatedHost::new();
    let mut host = MockRuntime::new();
    host.expect_is_supported().return_const(true);
    host.expect_platform().return_const(HostPlatform::Simulation);
    host.expect_create_context()
        .times(3)
        .returning(move |package| simulated.create_context(package));

    let project = small_project();
    let graph = project.graph().unwrap();
    let orchestrator = SandboxOrchestrator::new(Arc::new(host)).unwrap();

    orchestrator.boot_all(&graph).unwrap();
    orchestrator.boot_all(&graph).unwrap();

    assert_eq!(orchestrator.booted_packages(), vec![".", "packs/app", "packs/lib"]);
    assert!(orchestrator.resolve("packs/app", "Tool").is_ok());
}

#[derive(Default)]
struct RecordingIsolation {
    isolated: Mutex<Vec<String>>,
}

impl LibraryIsolation for RecordingIsolation {
    fn isolate(&self, package: &PackageDescriptor, context: &dyn ExecutionContext) -> PackResult<()> {
        assert_eq!(context.owner(), package.name);
        self.isolated.lock().push(package.name.clone());
        Ok(())
    }
}

#[test]
fn test_library_isolation_runs_per_package_in_boot_order() {
    let isolation = Arc::new(RecordingIsolation::default());
    let project = small_project();
    let graph = project.graph().unwrap();
    let orchestrator = SandboxOrchestrator::new(Arc::new(SimulatedHost::new()))
        .unwrap()
        .with_isolation(isolation.clone());

    let stats = orchestrator.boot_all(&graph).unwrap();

    assert_eq!(*isolation.isolated.lock(), stats.boot_order);
    assert_eq!(stats.boot_order, vec![".", "packs/lib", "packs/app"]);
    assert_eq!(stats.packages_booted, 3);
}
