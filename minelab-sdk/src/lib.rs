//! Core of the MineLab analytics client
//!
//! Raw form input is validated into a [`RequestPayload`], handed to an
//! [`AnalysisWorkflow`] which tracks the request lifecycle, sent through a
//! [`Transport`], and the response body is shaped into a
//! [`NormalizedResult`] that a view can render without further branching.

pub mod analysis;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod kind;
pub mod options;
pub mod payload;
pub mod shape;
pub mod transport;
pub mod validate;
pub mod workflow;

// Re-export async trait for transport implementors
pub use async_trait::async_trait;

pub use analysis::{
    Analysis, AssociationAnalysis, ClassificationAnalysis, ClusterAnalysis, CorrelationAnalysis,
    NaiveBayesAnalysis, RoughSetAnalysis,
};
pub use error::{ConfigError, TransportError, ValidationFailure};
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use kind::{AnalysisKind, Encoding, Screen};
pub use payload::{FileHandle, RequestBody, RequestPayload};
pub use shape::{shape, shape_error, NormalizedResult, GENERIC_ERROR};
pub use transport::{Endpoint, EndpointTable, Transport};
pub use validate::{
    validate, AssociationForm, BayesMode, ClassificationForm, ClusterForm, CorrelationForm,
    NaiveBayesForm, RawInput, RoughSetForm,
};
pub use workflow::{AnalysisWorkflow, Ticket, WorkflowState};
