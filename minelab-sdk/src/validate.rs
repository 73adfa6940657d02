//! Raw form state and the validation rules that turn it into payloads
//!
//! Validation is pure: it never touches the filesystem or the network, and
//! the same input always yields the same outcome.

use crate::error::ValidationFailure;
use crate::kind::AnalysisKind;
use crate::options::{
    self, Humidity, Outlook, Temperature, Wind, CLUSTER_COUNTS, DECISION_TABLE_EXTENSIONS,
    SPREADSHEET_EXTENSIONS,
};
use crate::payload::{
    AssociationPayload, ClassificationPayload, ClusterPayload, CorrelationPayload, FileHandle,
    NaiveBayesPayload, PredictPayload, RequestPayload, RoughSetPayload,
};

pub const SELECT_A_FILE: &str = "select a file";

/// Two comma-separated numeric sequences; the second may be left empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationForm {
    pub first: String,
    pub second: String,
}

/// Which naive-Bayes endpoint the form targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BayesMode {
    #[default]
    Predict,
    Bulk,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NaiveBayesForm {
    pub mode: BayesMode,
    pub outlook: String,
    pub temperature: String,
    pub humidity: String,
    pub wind: String,
    pub file: Option<FileHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterForm {
    pub file: Option<FileHandle>,
    pub n_clusters: u32,
}

impl Default for ClusterForm {
    fn default() -> Self {
        Self {
            file: None,
            n_clusters: options::DEFAULT_CLUSTER_COUNT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationForm {
    pub file: Option<FileHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssociationForm {
    pub file: Option<FileHandle>,
    pub min_support: f64,
    pub min_confidence: f64,
}

impl Default for AssociationForm {
    fn default() -> Self {
        Self {
            file: None,
            min_support: options::DEFAULT_THRESHOLD,
            min_confidence: options::DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoughSetForm {
    pub file: Option<FileHandle>,
    pub decision_attribute: String,
    /// Comma-separated attribute names
    pub condition_attributes: String,
    /// Optional target set `X`
    pub concept: String,
}

/// Raw input of any screen, tagged by analysis
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    Correlation(CorrelationForm),
    NaiveBayes(NaiveBayesForm),
    Cluster(ClusterForm),
    Classification(ClassificationForm),
    Association(AssociationForm),
    RoughSet(RoughSetForm),
}

impl RawInput {
    /// Kind the input would be sent as
    pub fn kind(&self) -> AnalysisKind {
        match self {
            RawInput::Correlation(_) => AnalysisKind::Correlation,
            RawInput::NaiveBayes(form) => match form.mode {
                BayesMode::Predict => AnalysisKind::NaiveBayesPredict,
                BayesMode::Bulk => AnalysisKind::NaiveBayesBulk,
            },
            RawInput::Cluster(_) => AnalysisKind::Cluster,
            RawInput::Classification(_) => AnalysisKind::Classification,
            RawInput::Association(_) => AnalysisKind::Association,
            RawInput::RoughSet(_) => AnalysisKind::RoughSet,
        }
    }
}

/// Validate any raw input into its tagged payload
pub fn validate(raw: &RawInput) -> Result<RequestPayload, ValidationFailure> {
    match raw {
        RawInput::Correlation(form) => validate_correlation(form).map(Into::into),
        RawInput::NaiveBayes(form) => validate_naive_bayes(form).map(Into::into),
        RawInput::Cluster(form) => validate_cluster(form).map(Into::into),
        RawInput::Classification(form) => validate_classification(form).map(Into::into),
        RawInput::Association(form) => validate_association(form).map(Into::into),
        RawInput::RoughSet(form) => validate_rough_set(form).map(Into::into),
    }
}

/// Split on commas and keep the tokens that parse as finite numbers
pub fn parse_series(text: &str) -> Vec<f64> {
    text.split(',')
        .map(str::trim)
        .filter_map(|token| token.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .collect()
}

pub fn validate_correlation(
    form: &CorrelationForm,
) -> Result<CorrelationPayload, ValidationFailure> {
    let mut reasons = Vec::new();

    let first = parse_series(&form.first);
    if first.len() < 2 {
        reasons.push("first sequence needs at least 2 numeric values".to_string());
    }

    let second = if form.second.trim().is_empty() {
        None
    } else {
        let values = parse_series(&form.second);
        if values.len() < 2 {
            reasons.push("second sequence needs at least 2 numeric values".to_string());
        }
        Some(values)
    };

    if let Some(second) = &second {
        if first.len() >= 2 && second.len() >= 2 && first.len() != second.len() {
            reasons.push(format!(
                "sequences must have the same length ({} vs {})",
                first.len(),
                second.len()
            ));
        }
    }

    fail_if_any(reasons)?;
    Ok(match second {
        None => CorrelationPayload::single(first),
        Some(second) => CorrelationPayload::pair(first, second),
    })
}

pub fn validate_naive_bayes(form: &NaiveBayesForm) -> Result<NaiveBayesPayload, ValidationFailure> {
    match form.mode {
        BayesMode::Predict => validate_prediction(form).map(NaiveBayesPayload::predict),
        BayesMode::Bulk => {
            let file = require_file(form.file.as_ref(), SPREADSHEET_EXTENSIONS)
                .map_err(ValidationFailure::new)?;
            Ok(NaiveBayesPayload::bulk(file))
        }
    }
}

fn validate_prediction(form: &NaiveBayesForm) -> Result<PredictPayload, ValidationFailure> {
    let fields = [
        (Outlook::FIELD, form.outlook.as_str()),
        (Temperature::FIELD, form.temperature.as_str()),
        (Humidity::FIELD, form.humidity.as_str()),
        (Wind::FIELD, form.wind.as_str()),
    ];
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationFailure::new(format!(
            "select a value for every field (missing: {})",
            missing.join(", ")
        )));
    }

    let mut reasons = Vec::new();
    let outlook = form.outlook.parse::<Outlook>().map_err(|e| reasons.push(e)).ok();
    let temperature = form
        .temperature
        .parse::<Temperature>()
        .map_err(|e| reasons.push(e))
        .ok();
    let humidity = form.humidity.parse::<Humidity>().map_err(|e| reasons.push(e)).ok();
    let wind = form.wind.parse::<Wind>().map_err(|e| reasons.push(e)).ok();

    match (outlook, temperature, humidity, wind) {
        (Some(o), Some(t), Some(h), Some(w)) => Ok(PredictPayload::new(o, t, h, w)),
        _ => Err(ValidationFailure::from_reasons(reasons)
            .unwrap_or_else(|| ValidationFailure::new("select a value for every field"))),
    }
}

pub fn validate_cluster(form: &ClusterForm) -> Result<ClusterPayload, ValidationFailure> {
    let mut reasons = Vec::new();
    let file = require_file(form.file.as_ref(), SPREADSHEET_EXTENSIONS)
        .map_err(|r| reasons.push(r))
        .ok();
    if !CLUSTER_COUNTS.contains(&form.n_clusters) {
        reasons.push(format!(
            "number of clusters must be one of {}",
            join_options(CLUSTER_COUNTS.iter())
        ));
    }
    fail_if_any(reasons)?;
    match file {
        Some(file) => Ok(ClusterPayload::new(file, form.n_clusters)),
        None => Err(ValidationFailure::new(SELECT_A_FILE)),
    }
}

pub fn validate_classification(
    form: &ClassificationForm,
) -> Result<ClassificationPayload, ValidationFailure> {
    let file = require_file(form.file.as_ref(), SPREADSHEET_EXTENSIONS)
        .map_err(ValidationFailure::new)?;
    Ok(ClassificationPayload::new(file))
}

pub fn validate_association(
    form: &AssociationForm,
) -> Result<AssociationPayload, ValidationFailure> {
    let mut reasons = Vec::new();
    let file = require_file(form.file.as_ref(), SPREADSHEET_EXTENSIONS)
        .map_err(|r| reasons.push(r))
        .ok();
    let support = options::threshold_option(form.min_support);
    if support.is_none() {
        reasons.push(format!(
            "minimum support must be one of {}",
            join_options(options::THRESHOLDS.iter())
        ));
    }
    let confidence = options::threshold_option(form.min_confidence);
    if confidence.is_none() {
        reasons.push(format!(
            "minimum confidence must be one of {}",
            join_options(options::THRESHOLDS.iter())
        ));
    }
    fail_if_any(reasons)?;
    match (file, support, confidence) {
        (Some(file), Some(s), Some(c)) => Ok(AssociationPayload::new(file, s, c)),
        _ => Err(ValidationFailure::new(SELECT_A_FILE)),
    }
}

pub fn validate_rough_set(form: &RoughSetForm) -> Result<RoughSetPayload, ValidationFailure> {
    let mut reasons = Vec::new();
    let file = require_file(form.file.as_ref(), DECISION_TABLE_EXTENSIONS)
        .map_err(|r| reasons.push(r))
        .ok();

    let decision = form.decision_attribute.trim();
    if decision.is_empty() {
        reasons.push("enter the decision attribute".to_string());
    }

    let conditions: Vec<String> = form
        .condition_attributes
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();
    if conditions.is_empty() {
        reasons.push("enter at least one condition attribute".to_string());
    }

    fail_if_any(reasons)?;
    let concept = Some(form.concept.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    match file {
        Some(file) => Ok(RoughSetPayload::new(
            file,
            decision.to_string(),
            conditions,
            concept,
        )),
        None => Err(ValidationFailure::new(SELECT_A_FILE)),
    }
}

/// Presence and extension check; returns the failure reason on rejection
fn require_file(file: Option<&FileHandle>, extensions: &[&str]) -> Result<FileHandle, String> {
    let file = file
        .filter(|f| !f.path().as_os_str().is_empty())
        .ok_or_else(|| SELECT_A_FILE.to_string())?;
    if extensions.iter().any(|ext| file.has_extension(ext)) {
        Ok(file.clone())
    } else {
        let accepted: Vec<String> = extensions.iter().map(|e| format!(".{}", e)).collect();
        Err(format!(
            "'{}' is not an accepted file type (expected {})",
            file.name(),
            accepted.join(" or ")
        ))
    }
}

fn fail_if_any(reasons: Vec<String>) -> Result<(), ValidationFailure> {
    match ValidationFailure::from_reasons(reasons) {
        Some(failure) => Err(failure),
        None => Ok(()),
    }
}

fn join_options<T: std::fmt::Display>(options: impl Iterator<Item = T>) -> String {
    options.map(|o| o.to_string()).collect::<Vec<_>>().join(", ")
}
