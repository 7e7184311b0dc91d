//! Query lifecycle state machine with stale-response suppression.
//!
//! Each page-level query owns one orchestrator. Issuing a new query does not
//! abort the in-flight network call; it invalidates it logically: every
//! request carries a monotonically increasing token, and a response is only
//! applied while its token is still current. "Last issued wins", never "last
//! arrived wins".

use crate::client::{PubTracker, Query};
use crate::error::Result;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Identifies one issued request; strictly increasing per machine.
pub type RequestToken = u64;

/// Observable state of one logical query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub status: QueryStatus,
    /// Payload of the last applied successful response.
    pub data: Option<T>,
    /// Human-readable message of the last applied failure.
    pub error: Option<String>,
    pub token: RequestToken,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            token: 0,
        }
    }
}

/// Synchronous core of the orchestrator. Driving it from async code is the
/// caller's concern ([`Orchestrator`] does exactly that), which keeps every
/// transition unit-testable without a runtime.
#[derive(Debug)]
pub struct QueryStateMachine<T> {
    state: QueryState<T>,
}

impl<T> Default for QueryStateMachine<T> {
    fn default() -> Self {
        Self {
            state: QueryState::default(),
        }
    }
}

impl<T> QueryStateMachine<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &QueryState<T> {
        &self.state
    }

    /// Start a new query. Any in-flight request is superseded from this
    /// point on; the previous payload stays visible while loading.
    pub fn begin(&mut self) -> RequestToken {
        self.state.token += 1;
        self.state.status = QueryStatus::Loading;
        self.state.error = None;
        debug!(token = self.state.token, "query issued");
        self.state.token
    }

    /// Apply the outcome of the request identified by `token`.
    ///
    /// Returns `false` and leaves the state untouched when a newer query was
    /// issued after this one.
    pub fn resolve(&mut self, token: RequestToken, outcome: Result<T>) -> bool {
        if token != self.state.token {
            debug!(token, current = self.state.token, "discarding stale response");
            return false;
        }
        match outcome {
            Ok(data) => {
                self.state.status = QueryStatus::Success;
                self.state.data = Some(data);
                self.state.error = None;
            }
            Err(err) => {
                // A failure drops the previous payload; pages render the
                // error instead of stale data. Applied uniformly to every
                // query type.
                warn!(token, error = %err, "query failed");
                self.state.status = QueryStatus::Error;
                self.state.data = None;
                self.state.error = Some(err.to_string());
            }
        }
        true
    }

    /// Record a pre-flight validation failure. No token is issued and no
    /// Loading transition happens; the current payload is kept so the page
    /// can show the message next to whatever it already renders.
    pub fn fail_validation(&mut self, message: &str) {
        self.state.status = QueryStatus::Error;
        self.state.error = Some(message.to_owned());
    }
}

/// Async driver around [`QueryStateMachine`]. Clones share the same state,
/// so overlapping submissions from different tasks race safely.
#[derive(Debug, Clone)]
pub struct Orchestrator<T> {
    machine: Arc<Mutex<QueryStateMachine<T>>>,
}

impl<T> Default for Orchestrator<T> {
    fn default() -> Self {
        Self {
            machine: Arc::new(Mutex::new(QueryStateMachine::default())),
        }
    }
}

impl<T: Clone> Orchestrator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state for observers.
    pub fn state(&self) -> QueryState<T> {
        self.machine.lock().unwrap().state().clone()
    }

    /// Issue a query and apply its outcome unless superseded in the
    /// meantime. Returns whether the outcome was applied.
    pub async fn submit<F>(&self, fut: F) -> bool
    where
        F: Future<Output = Result<T>>,
    {
        let token = self.machine.lock().unwrap().begin();
        let outcome = fut.await;
        self.machine.lock().unwrap().resolve(token, outcome)
    }

    /// Convenience: run an API [`Query`] through this orchestrator.
    pub async fn run<Q>(&self, client: &PubTracker, query: &Q) -> bool
    where
        Q: Query<Response = T> + Sync,
    {
        self.submit(query.query(client)).await
    }

    /// Surface a validation failure without issuing a request.
    pub fn reject(&self, message: &str) {
        self.machine.lock().unwrap().fail_validation(message);
    }
}
