//! Validated request payloads
//!
//! Every payload type here has private fields and crate-private constructors,
//! so the only way to obtain one is a successful validation.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use crate::kind::AnalysisKind;
use crate::options::{Humidity, Outlook, Temperature, Wind};

/// Opaque reference to a user-selected file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    path: PathBuf,
    name: String,
}

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive extension check; `ext` is given without the dot
    pub fn has_extension(&self, ext: &str) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(ext))
            .unwrap_or(false)
    }
}

/// Wire form of a payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Multipart {
        file: FileHandle,
        fields: Vec<(&'static str, String)>,
    },
}

/// One or two numeric series
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationPayload {
    first: Vec<f64>,
    second: Option<Vec<f64>>,
}

impl CorrelationPayload {
    pub(crate) fn single(values: Vec<f64>) -> Self {
        Self {
            first: values,
            second: None,
        }
    }

    pub(crate) fn pair(a: Vec<f64>, b: Vec<f64>) -> Self {
        Self {
            first: a,
            second: Some(b),
        }
    }

    pub fn first(&self) -> &[f64] {
        &self.first
    }

    pub fn second(&self) -> Option<&[f64]> {
        self.second.as_deref()
    }

    pub fn body(&self) -> RequestBody {
        match &self.second {
            None => RequestBody::Json(json!({ "values": self.first })),
            Some(b) => RequestBody::Json(json!({ "a": self.first, "b": b })),
        }
    }
}

/// Fully selected weather observation
#[derive(Debug, Clone, PartialEq)]
pub struct PredictPayload {
    outlook: Outlook,
    temperature: Temperature,
    humidity: Humidity,
    wind: Wind,
}

impl PredictPayload {
    pub(crate) fn new(
        outlook: Outlook,
        temperature: Temperature,
        humidity: Humidity,
        wind: Wind,
    ) -> Self {
        Self {
            outlook,
            temperature,
            humidity,
            wind,
        }
    }

    pub fn outlook(&self) -> Outlook {
        self.outlook
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn humidity(&self) -> Humidity {
        self.humidity
    }

    pub fn wind(&self) -> Wind {
        self.wind
    }
}

#[derive(Debug, Clone, PartialEq)]
enum BayesRequest {
    Predict(PredictPayload),
    Bulk(FileHandle),
}

/// Either a single prediction or a training-sheet upload
#[derive(Debug, Clone, PartialEq)]
pub struct NaiveBayesPayload {
    request: BayesRequest,
}

impl NaiveBayesPayload {
    pub(crate) fn predict(payload: PredictPayload) -> Self {
        Self {
            request: BayesRequest::Predict(payload),
        }
    }

    pub(crate) fn bulk(file: FileHandle) -> Self {
        Self {
            request: BayesRequest::Bulk(file),
        }
    }

    pub fn kind(&self) -> AnalysisKind {
        match self.request {
            BayesRequest::Predict(_) => AnalysisKind::NaiveBayesPredict,
            BayesRequest::Bulk(_) => AnalysisKind::NaiveBayesBulk,
        }
    }

    pub fn prediction(&self) -> Option<&PredictPayload> {
        match &self.request {
            BayesRequest::Predict(p) => Some(p),
            BayesRequest::Bulk(_) => None,
        }
    }

    pub fn upload(&self) -> Option<&FileHandle> {
        match &self.request {
            BayesRequest::Predict(_) => None,
            BayesRequest::Bulk(file) => Some(file),
        }
    }

    pub fn body(&self) -> RequestBody {
        match &self.request {
            BayesRequest::Predict(p) => RequestBody::Json(json!({
                "Outlook": p.outlook,
                "Temperature": p.temperature,
                "Humidity": p.humidity,
                "Wind": p.wind,
            })),
            BayesRequest::Bulk(file) => RequestBody::Multipart {
                file: file.clone(),
                fields: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPayload {
    file: FileHandle,
    n_clusters: u32,
}

impl ClusterPayload {
    pub(crate) fn new(file: FileHandle, n_clusters: u32) -> Self {
        Self { file, n_clusters }
    }

    pub fn file(&self) -> &FileHandle {
        &self.file
    }

    pub fn n_clusters(&self) -> u32 {
        self.n_clusters
    }

    pub fn body(&self) -> RequestBody {
        RequestBody::Multipart {
            file: self.file.clone(),
            fields: vec![("n_clusters", self.n_clusters.to_string())],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationPayload {
    file: FileHandle,
}

impl ClassificationPayload {
    pub(crate) fn new(file: FileHandle) -> Self {
        Self { file }
    }

    pub fn file(&self) -> &FileHandle {
        &self.file
    }

    pub fn body(&self) -> RequestBody {
        RequestBody::Multipart {
            file: self.file.clone(),
            fields: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssociationPayload {
    file: FileHandle,
    min_support: f64,
    min_confidence: f64,
}

impl AssociationPayload {
    pub(crate) fn new(file: FileHandle, min_support: f64, min_confidence: f64) -> Self {
        Self {
            file,
            min_support,
            min_confidence,
        }
    }

    pub fn file(&self) -> &FileHandle {
        &self.file
    }

    pub fn min_support(&self) -> f64 {
        self.min_support
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    pub fn body(&self) -> RequestBody {
        RequestBody::Multipart {
            file: self.file.clone(),
            fields: vec![
                ("min_support", self.min_support.to_string()),
                ("min_confidence", self.min_confidence.to_string()),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoughSetPayload {
    file: FileHandle,
    decision_attribute: String,
    condition_attributes: Vec<String>,
    concept: Option<String>,
}

impl RoughSetPayload {
    pub(crate) fn new(
        file: FileHandle,
        decision_attribute: String,
        condition_attributes: Vec<String>,
        concept: Option<String>,
    ) -> Self {
        Self {
            file,
            decision_attribute,
            condition_attributes,
            concept,
        }
    }

    pub fn file(&self) -> &FileHandle {
        &self.file
    }

    pub fn decision_attribute(&self) -> &str {
        &self.decision_attribute
    }

    pub fn condition_attributes(&self) -> &[String] {
        &self.condition_attributes
    }

    /// Target set `X` to approximate, when given
    pub fn concept(&self) -> Option<&str> {
        self.concept.as_deref()
    }

    pub fn body(&self) -> RequestBody {
        let mut fields = vec![
            ("decision_attribute", self.decision_attribute.clone()),
            ("condition_attributes", self.condition_attributes.join(",")),
        ];
        if let Some(concept) = &self.concept {
            fields.push(("X", concept.clone()));
        }
        RequestBody::Multipart {
            file: self.file.clone(),
            fields,
        }
    }
}

/// Tagged union over every validated payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPayload {
    Correlation(CorrelationPayload),
    NaiveBayes(NaiveBayesPayload),
    Cluster(ClusterPayload),
    Classification(ClassificationPayload),
    Association(AssociationPayload),
    RoughSet(RoughSetPayload),
}

impl RequestPayload {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            RequestPayload::Correlation(_) => AnalysisKind::Correlation,
            RequestPayload::NaiveBayes(p) => p.kind(),
            RequestPayload::Cluster(_) => AnalysisKind::Cluster,
            RequestPayload::Classification(_) => AnalysisKind::Classification,
            RequestPayload::Association(_) => AnalysisKind::Association,
            RequestPayload::RoughSet(_) => AnalysisKind::RoughSet,
        }
    }

    pub fn body(&self) -> RequestBody {
        match self {
            RequestPayload::Correlation(p) => p.body(),
            RequestPayload::NaiveBayes(p) => p.body(),
            RequestPayload::Cluster(p) => p.body(),
            RequestPayload::Classification(p) => p.body(),
            RequestPayload::Association(p) => p.body(),
            RequestPayload::RoughSet(p) => p.body(),
        }
    }

    /// File that accompanies the request, if any
    pub fn attachment(&self) -> Option<&FileHandle> {
        match self {
            RequestPayload::Correlation(_) => None,
            RequestPayload::NaiveBayes(p) => p.upload(),
            RequestPayload::Cluster(p) => Some(&p.file),
            RequestPayload::Classification(p) => Some(&p.file),
            RequestPayload::Association(p) => Some(&p.file),
            RequestPayload::RoughSet(p) => Some(&p.file),
        }
    }
}

macro_rules! into_request {
    ($($variant:ident($payload:ty)),+ $(,)?) => {
        $(
            impl From<$payload> for RequestPayload {
                fn from(payload: $payload) -> Self {
                    RequestPayload::$variant(payload)
                }
            }
        )+
    };
}

into_request!(
    Correlation(CorrelationPayload),
    NaiveBayes(NaiveBayesPayload),
    Cluster(ClusterPayload),
    Classification(ClassificationPayload),
    Association(AssociationPayload),
    RoughSet(RoughSetPayload),
);
