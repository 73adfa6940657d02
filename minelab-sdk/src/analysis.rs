//! Per-analysis pairing of validator and shaper

use serde_json::Value;

use crate::error::ValidationFailure;
use crate::kind::{AnalysisKind, Screen};
use crate::payload::{
    AssociationPayload, ClassificationPayload, ClusterPayload, CorrelationPayload,
    NaiveBayesPayload, RequestPayload, RoughSetPayload,
};
use crate::shape::{
    self, AssociationResult, ClassificationResult, ClusterResult, CorrelationResult,
    NaiveBayesResult, NormalizedResult, RoughSetResult,
};
use crate::validate::{
    self, AssociationForm, ClassificationForm, ClusterForm, CorrelationForm, NaiveBayesForm,
    RoughSetForm,
};

/// One analysis: its raw input, validated payload and shaped output
///
/// [`AnalysisWorkflow`](crate::workflow::AnalysisWorkflow) is generic over
/// this trait, so every screen runs the same state machine.
pub trait Analysis: Send + 'static {
    type Input: Clone + Default + Send;
    type Payload: Clone + Into<RequestPayload> + Send;
    type Output: Clone + Into<NormalizedResult> + Send;

    const SCREEN: Screen;

    fn validate(input: &Self::Input) -> Result<Self::Payload, ValidationFailure>;

    /// Shape a success body; the payload tells which endpoint answered
    fn shape(payload: &Self::Payload, body: &Value) -> Self::Output;
}

pub struct CorrelationAnalysis;

impl Analysis for CorrelationAnalysis {
    type Input = CorrelationForm;
    type Payload = CorrelationPayload;
    type Output = CorrelationResult;

    const SCREEN: Screen = Screen::Correlation;

    fn validate(input: &CorrelationForm) -> Result<CorrelationPayload, ValidationFailure> {
        validate::validate_correlation(input)
    }

    fn shape(_: &CorrelationPayload, body: &Value) -> CorrelationResult {
        shape::shape_correlation(body)
    }
}

pub struct NaiveBayesAnalysis;

impl Analysis for NaiveBayesAnalysis {
    type Input = NaiveBayesForm;
    type Payload = NaiveBayesPayload;
    type Output = NaiveBayesResult;

    const SCREEN: Screen = Screen::NaiveBayes;

    fn validate(input: &NaiveBayesForm) -> Result<NaiveBayesPayload, ValidationFailure> {
        validate::validate_naive_bayes(input)
    }

    fn shape(payload: &NaiveBayesPayload, body: &Value) -> NaiveBayesResult {
        match payload.kind() {
            AnalysisKind::NaiveBayesBulk => shape::shape_schema(body),
            _ => shape::shape_prediction(body),
        }
    }
}

pub struct ClusterAnalysis;

impl Analysis for ClusterAnalysis {
    type Input = ClusterForm;
    type Payload = ClusterPayload;
    type Output = ClusterResult;

    const SCREEN: Screen = Screen::Cluster;

    fn validate(input: &ClusterForm) -> Result<ClusterPayload, ValidationFailure> {
        validate::validate_cluster(input)
    }

    fn shape(_: &ClusterPayload, body: &Value) -> ClusterResult {
        shape::shape_cluster(body)
    }
}

pub struct ClassificationAnalysis;

impl Analysis for ClassificationAnalysis {
    type Input = ClassificationForm;
    type Payload = ClassificationPayload;
    type Output = ClassificationResult;

    const SCREEN: Screen = Screen::Classification;

    fn validate(input: &ClassificationForm) -> Result<ClassificationPayload, ValidationFailure> {
        validate::validate_classification(input)
    }

    fn shape(_: &ClassificationPayload, body: &Value) -> ClassificationResult {
        shape::shape_classification(body)
    }
}

pub struct AssociationAnalysis;

impl Analysis for AssociationAnalysis {
    type Input = AssociationForm;
    type Payload = AssociationPayload;
    type Output = AssociationResult;

    const SCREEN: Screen = Screen::Association;

    fn validate(input: &AssociationForm) -> Result<AssociationPayload, ValidationFailure> {
        validate::validate_association(input)
    }

    fn shape(_: &AssociationPayload, body: &Value) -> AssociationResult {
        shape::shape_association(body)
    }
}

pub struct RoughSetAnalysis;

impl Analysis for RoughSetAnalysis {
    type Input = RoughSetForm;
    type Payload = RoughSetPayload;
    type Output = RoughSetResult;

    const SCREEN: Screen = Screen::RoughSet;

    fn validate(input: &RoughSetForm) -> Result<RoughSetPayload, ValidationFailure> {
        validate::validate_rough_set(input)
    }

    fn shape(_: &RoughSetPayload, body: &Value) -> RoughSetResult {
        shape::shape_rough_set(body)
    }
}
