//! Per-scenario Tokio runtime and mock DELTA backend.
//!
//! rstest-bdd steps are synchronous, so every scenario keeps one runtime in
//! its state and drives the async client through [`ScenarioRuntime::block_on`].
//! The mock backend is started on that runtime the first time a step asks for
//! it, so all steps of a scenario talk to the same server.

use std::future::Future;
use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Cloneable handle to the runtime owned by one scenario.
#[derive(Clone)]
pub struct ScenarioRuntime(Rc<Runtime>);

impl ScenarioRuntime {
    fn start() -> io::Result<Self> {
        Runtime::new().map(|runtime| Self(Rc::new(runtime)))
    }

    /// Runs `future` to completion on the scenario runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.0.block_on(future)
    }
}

/// Returns the scenario runtime, starting it and the mock backend on first
/// use.
///
/// # Errors
///
/// Returns an error when the Tokio runtime cannot be built.
pub fn scenario_runtime(
    runtime: &Slot<ScenarioRuntime>,
    backend: &Slot<MockServer>,
) -> io::Result<ScenarioRuntime> {
    let shared = match runtime.get() {
        Some(shared) => shared,
        None => {
            let shared = ScenarioRuntime::start()?;
            runtime.set(shared.clone());
            shared
        }
    };

    if backend.with_ref(|_| ()).is_none() {
        backend.set(shared.block_on(MockServer::start()));
    }

    Ok(shared)
}
