//! Blocking runtime and mock movie service shared by scenario steps.

use std::cell::RefCell;
use std::future::Future;
use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Tokio runtime that steps can clone out of their scenario state.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    /// Runs `future` to completion on the scenario's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Starts the runtime and the mock service on first use and returns the
/// runtime.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, io::Error> {
    if runtime.with_ref(|_| ()).is_none() {
        runtime.set(SharedRuntime(Rc::new(RefCell::new(Runtime::new()?))));
    }
    let shared = runtime
        .get()
        .ok_or_else(|| io::Error::other("runtime slot is empty"))?;
    if server.with_ref(|_| ()).is_none() {
        server.set(shared.block_on(MockServer::start()));
    }
    Ok(shared)
}
