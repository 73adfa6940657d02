//! Screen bindings
//!
//! Every screen pairs an editable form with one [`AnalysisWorkflow`]. The
//! App only sees the object-safe [`ScreenBinding`] view of that pair, so tab
//! handling is the same for all six analyses.

mod forms;

pub use forms::{FieldKind, FieldSpec, Form};

use minelab_sdk::{
    Analysis, AnalysisWorkflow, AssociationAnalysis, ClassificationAnalysis, ClusterAnalysis,
    CorrelationAnalysis, NaiveBayesAnalysis, NormalizedResult, RoughSetAnalysis, Screen, Ticket,
    TransportError, ValidationFailure, WorkflowState,
};
use serde_json::Value;

/// Type-erased form and workflow of one screen
pub trait ScreenBinding {
    fn screen(&self) -> Screen;

    /// Fields currently shown; may depend on other field values
    fn fields(&self) -> Vec<FieldSpec>;

    fn value(&self, field: &str) -> String;

    fn set_value(&mut self, field: &str, value: &str);

    /// Step a closed-set field to its next (or previous) option
    fn cycle(&mut self, field: &str, forward: bool);

    /// Validate the form and begin a submission
    ///
    /// `Ok(None)` means a request is already in flight and nothing changed.
    fn submit(&mut self) -> Result<Option<Ticket>, ValidationFailure>;

    fn settle(&mut self, ticket: &Ticket, outcome: Result<Value, TransportError>) -> bool;

    fn cancel(&mut self);

    fn dispose(&mut self);

    fn state(&self) -> WorkflowState<NormalizedResult>;

    fn is_submitting(&self) -> bool;

    /// Values of the free-text fields, for input history
    fn text_values(&self) -> Vec<(&'static str, String)> {
        self.fields()
            .into_iter()
            .filter(|f| matches!(f.kind, FieldKind::Text))
            .map(|f| (f.name, self.value(f.name)))
            .collect()
    }
}

/// Form state plus workflow for one analysis
pub struct Binding<A: Analysis> {
    form: A::Input,
    workflow: AnalysisWorkflow<A>,
}

impl<A: Analysis> Binding<A> {
    pub fn new() -> Self {
        Self {
            form: A::Input::default(),
            workflow: AnalysisWorkflow::new(),
        }
    }
}

impl<A: Analysis> Default for Binding<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> ScreenBinding for Binding<A>
where
    A: Analysis,
    A::Input: Form,
{
    fn screen(&self) -> Screen {
        A::SCREEN
    }

    fn fields(&self) -> Vec<FieldSpec> {
        self.form.fields()
    }

    fn value(&self, field: &str) -> String {
        self.form.value(field)
    }

    fn set_value(&mut self, field: &str, value: &str) {
        self.form.set_value(field, value);
    }

    fn cycle(&mut self, field: &str, forward: bool) {
        self.form.cycle(field, forward);
    }

    fn submit(&mut self) -> Result<Option<Ticket>, ValidationFailure> {
        self.workflow.submit_input(&self.form)
    }

    fn settle(&mut self, ticket: &Ticket, outcome: Result<Value, TransportError>) -> bool {
        self.workflow.settle(ticket, outcome)
    }

    fn cancel(&mut self) {
        self.workflow.cancel();
    }

    fn dispose(&mut self) {
        self.workflow.dispose();
    }

    fn state(&self) -> WorkflowState<NormalizedResult> {
        self.workflow.state().map(|result| result.clone().into())
    }

    fn is_submitting(&self) -> bool {
        self.workflow.state().is_submitting()
    }
}

/// Fresh binding for a screen
pub fn binding_for(screen: Screen) -> Box<dyn ScreenBinding> {
    match screen {
        Screen::Correlation => Box::new(Binding::<CorrelationAnalysis>::new()),
        Screen::NaiveBayes => Box::new(Binding::<NaiveBayesAnalysis>::new()),
        Screen::Cluster => Box::new(Binding::<ClusterAnalysis>::new()),
        Screen::Classification => Box::new(Binding::<ClassificationAnalysis>::new()),
        Screen::Association => Box::new(Binding::<AssociationAnalysis>::new()),
        Screen::RoughSet => Box::new(Binding::<RoughSetAnalysis>::new()),
    }
}
