//! The request lifecycle shared by every screen
//!
//! `AnalysisWorkflow` owns its state and never performs I/O itself. A
//! submission hands out a [`Ticket`]; whoever performs the network call
//! reports back through [`AnalysisWorkflow::settle`]. Outcomes whose ticket
//! is no longer current are dropped, which covers both cancellation and
//! disposal of the hosting screen.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::analysis::Analysis;
use crate::error::{TransportError, ValidationFailure};
use crate::kind::AnalysisKind;
use crate::payload::RequestPayload;
use crate::transport::{EndpointTable, Transport};

/// Lifecycle state of one workflow instance
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState<R> {
    Idle,
    Validating,
    Submitting,
    Success(R),
    Failed(String),
}

impl<R> Default for WorkflowState<R> {
    fn default() -> Self {
        WorkflowState::Idle
    }
}

impl<R> WorkflowState<R> {
    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowState::Submitting)
    }

    pub fn result(&self) -> Option<&R> {
        match self {
            WorkflowState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WorkflowState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Validating => "validating",
            WorkflowState::Submitting => "submitting",
            WorkflowState::Success(_) => "success",
            WorkflowState::Failed(_) => "failed",
        }
    }

    pub fn map<T>(&self, f: impl FnOnce(&R) -> T) -> WorkflowState<T> {
        match self {
            WorkflowState::Idle => WorkflowState::Idle,
            WorkflowState::Validating => WorkflowState::Validating,
            WorkflowState::Submitting => WorkflowState::Submitting,
            WorkflowState::Success(result) => WorkflowState::Success(f(result)),
            WorkflowState::Failed(reason) => WorkflowState::Failed(reason.clone()),
        }
    }
}

/// Proof of one accepted submission
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    generation: u64,
    request: RequestPayload,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &RequestPayload {
        &self.request
    }

    pub fn kind(&self) -> AnalysisKind {
        self.request.kind()
    }
}

pub struct AnalysisWorkflow<A: Analysis> {
    state: WorkflowState<A::Output>,
    payload: Option<A::Payload>,
    generation: u64,
    disposed: bool,
}

impl<A: Analysis> Default for AnalysisWorkflow<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Analysis> AnalysisWorkflow<A> {
    pub fn new() -> Self {
        Self {
            state: WorkflowState::Idle,
            payload: None,
            generation: 0,
            disposed: false,
        }
    }

    pub fn state(&self) -> &WorkflowState<A::Output> {
        &self.state
    }

    /// Payload of the latest accepted submission
    pub fn payload(&self) -> Option<&A::Payload> {
        self.payload.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Begin a submission; `None` while one is in flight or after disposal
    pub fn submit(&mut self, payload: A::Payload) -> Option<Ticket> {
        if self.disposed {
            debug!(screen = %A::SCREEN, "submit ignored, workflow disposed");
            return None;
        }
        if self.state.is_submitting() {
            debug!(screen = %A::SCREEN, "submit ignored, request already in flight");
            return None;
        }

        self.generation += 1;
        let request: RequestPayload = payload.clone().into();
        info!(
            screen = %A::SCREEN,
            kind = %request.kind(),
            generation = self.generation,
            "submitting analysis request"
        );
        self.payload = Some(payload);
        self.state = WorkflowState::Submitting;
        Some(Ticket {
            generation: self.generation,
            request,
        })
    }

    /// Validate raw input, then submit it
    ///
    /// A rejected input leaves the previous state (and any result it shows)
    /// untouched.
    pub fn submit_input(&mut self, input: &A::Input) -> Result<Option<Ticket>, ValidationFailure> {
        if self.disposed || self.state.is_submitting() {
            return Ok(None);
        }

        let previous = std::mem::replace(&mut self.state, WorkflowState::Validating);
        match A::validate(input) {
            Ok(payload) => {
                self.state = previous;
                Ok(self.submit(payload))
            }
            Err(failure) => {
                debug!(screen = %A::SCREEN, reasons = %failure, "input rejected");
                self.state = previous;
                Err(failure)
            }
        }
    }

    /// Apply the outcome of a submission; returns false when it was discarded
    pub fn settle(&mut self, ticket: &Ticket, outcome: Result<Value, TransportError>) -> bool {
        if self.disposed {
            debug!(
                screen = %A::SCREEN,
                generation = ticket.generation,
                "response after disposal discarded"
            );
            return false;
        }
        if ticket.generation != self.generation || !self.state.is_submitting() {
            debug!(
                screen = %A::SCREEN,
                ticket = ticket.generation,
                current = self.generation,
                "stale response discarded"
            );
            return false;
        }
        let Some(payload) = self.payload.as_ref() else {
            return false;
        };

        self.state = match outcome {
            Ok(body) => {
                info!(screen = %A::SCREEN, generation = ticket.generation, "analysis succeeded");
                WorkflowState::Success(A::shape(payload, &body))
            }
            Err(err) => {
                warn!(
                    screen = %A::SCREEN,
                    generation = ticket.generation,
                    error = %err,
                    "analysis failed"
                );
                WorkflowState::Failed(err.reason())
            }
        };
        true
    }

    /// Abandon the in-flight request, if any
    pub fn cancel(&mut self) {
        if self.state.is_submitting() {
            debug!(screen = %A::SCREEN, generation = self.generation, "request cancelled");
            self.generation += 1;
            self.state = WorkflowState::Idle;
        }
    }

    /// Tear down: nothing may change this instance afterwards
    pub fn dispose(&mut self) {
        self.cancel();
        self.disposed = true;
    }

    /// Submit, send and settle in one go
    ///
    /// Returns `None` when the submission was not accepted.
    pub async fn run(
        &mut self,
        transport: &dyn Transport,
        endpoints: &EndpointTable,
        payload: A::Payload,
    ) -> Option<&WorkflowState<A::Output>> {
        let ticket = self.submit(payload)?;
        let endpoint = endpoints.endpoint(ticket.kind());
        let outcome = transport.send(&endpoint, ticket.request()).await;
        self.settle(&ticket, outcome);
        Some(&self.state)
    }
}
