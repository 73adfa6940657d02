//! Turning response bodies into renderer-ready results
//!
//! Shaping never fails. Missing or malformed fields degrade to empty
//! containers (or `None` for scalars) so a partial result still renders.
//! Numbers keep their full precision here; rounding is a display concern.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::kind::AnalysisKind;

/// Shown when the service gave nothing usable to explain a failure
pub const GENERIC_ERROR: &str =
    "The analysis service could not complete the request. Please try again.";

/// Normalize an error body (structured, plain text or absent) into one message
pub fn shape_error(body: Option<&str>) -> String {
    let Some(text) = body.map(str::trim).filter(|t| !t.is_empty()) else {
        return GENERIC_ERROR.to_string();
    };

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => ["error", "message", "detail"]
            .iter()
            .find_map(|key| non_empty_str(map.get(*key)))
            .unwrap_or_else(|| GENERIC_ERROR.to_string()),
        Ok(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Ok(_) => GENERIC_ERROR.to_string(),
        Err(_) if !text.starts_with('<') => text.to_string(),
        Err(_) => GENERIC_ERROR.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub coefficient: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnValues {
    pub column: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NaiveBayesResult {
    /// Answer to a single predict request
    Prediction { label: Option<String> },
    /// Column schema discovered in an uploaded training sheet
    Schema { columns: Vec<ColumnValues> },
}

/// Points that share one label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSeries {
    pub label: i64,
    /// Positions of the points in the response's `points` array
    pub indices: Vec<usize>,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterResult {
    /// One series per distinct label, in first-seen order
    pub clusters: Vec<ClusterSeries>,
    pub centroids: Vec<Vec<f64>>,
    /// Number of point/label pairs considered
    pub point_count: usize,
}

impl ClusterResult {
    /// Flatten back to one label per point; `None` where a point was dropped
    pub fn point_labels(&self) -> Vec<Option<i64>> {
        let mut labels = vec![None; self.point_count];
        for series in &self.clusters {
            for &index in &series.indices {
                if let Some(slot) = labels.get_mut(index) {
                    *slot = Some(series.label);
                }
            }
        }
        labels
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Criterion {
    Gini,
    Entropy,
}

impl Criterion {
    pub fn as_str(self) -> &'static str {
        match self {
            Criterion::Gini => "gini",
            Criterion::Entropy => "entropy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeImage {
    pub criterion: Criterion,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub trees: Vec<TreeImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequentItemset {
    pub items: Vec<String>,
    pub support: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationRule {
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationResult {
    pub frequent_itemsets: Vec<FrequentItemset>,
    pub maximal_itemsets: Vec<Vec<String>>,
    pub rules: Vec<AssociationRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoughSetResult {
    pub equivalence_classes: Vec<Vec<String>>,
    pub lower_approximation: Vec<String>,
    pub upper_approximation: Vec<String>,
    pub boundary_region: Vec<String>,
    pub outside_region: Vec<String>,
    pub dependency_degree: Option<f64>,
    pub reducts: Vec<Vec<String>>,
}

/// Shaped result of any analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "kebab-case")]
pub enum NormalizedResult {
    Correlation(CorrelationResult),
    NaiveBayes(NaiveBayesResult),
    Cluster(ClusterResult),
    Classification(ClassificationResult),
    Association(AssociationResult),
    RoughSet(RoughSetResult),
}

macro_rules! into_normalized {
    ($($variant:ident($result:ty)),+ $(,)?) => {
        $(
            impl From<$result> for NormalizedResult {
                fn from(result: $result) -> Self {
                    NormalizedResult::$variant(result)
                }
            }
        )+
    };
}

into_normalized!(
    Correlation(CorrelationResult),
    NaiveBayes(NaiveBayesResult),
    Cluster(ClusterResult),
    Classification(ClassificationResult),
    Association(AssociationResult),
    RoughSet(RoughSetResult),
);

/// Shape a response body according to the kind it answers
pub fn shape(kind: AnalysisKind, body: &Value) -> NormalizedResult {
    match kind {
        AnalysisKind::Correlation => shape_correlation(body).into(),
        AnalysisKind::NaiveBayesPredict => shape_prediction(body).into(),
        AnalysisKind::NaiveBayesBulk => shape_schema(body).into(),
        AnalysisKind::Cluster => shape_cluster(body).into(),
        AnalysisKind::Classification => shape_classification(body).into(),
        AnalysisKind::Association => shape_association(body).into(),
        AnalysisKind::RoughSet => shape_rough_set(body).into(),
    }
}

pub fn shape_correlation(body: &Value) -> CorrelationResult {
    CorrelationResult {
        coefficient: body.get("correlation").and_then(number),
    }
}

pub fn shape_prediction(body: &Value) -> NaiveBayesResult {
    NaiveBayesResult::Prediction {
        label: body.get("prediction").and_then(scalar_string),
    }
}

pub fn shape_schema(body: &Value) -> NaiveBayesResult {
    let unique = body.get("unique_values").and_then(Value::as_object);
    let mut names = string_list(body.get("columns"));
    if names.is_empty() {
        names = unique.map(|m| m.keys().cloned().collect()).unwrap_or_default();
    }

    let columns = names
        .into_iter()
        .map(|column| {
            let values = string_list(unique.and_then(|m| m.get(&column)));
            ColumnValues { column, values }
        })
        .collect();
    NaiveBayesResult::Schema { columns }
}

pub fn shape_cluster(body: &Value) -> ClusterResult {
    let points = array(body.get("points"));
    let labels = array(body.get("labels"));
    let point_count = points.len().min(labels.len());

    let mut clusters: Vec<ClusterSeries> = Vec::new();
    for (index, (point, label)) in points.iter().zip(labels).enumerate() {
        let (Some(xy), Some(label)) = (point_xy(point), integer(label)) else {
            continue;
        };
        match clusters.iter_mut().find(|s| s.label == label) {
            Some(series) => {
                series.indices.push(index);
                series.points.push(xy);
            }
            None => clusters.push(ClusterSeries {
                label,
                indices: vec![index],
                points: vec![xy],
            }),
        }
    }

    let centroids = array(body.get("centroids"))
        .iter()
        .map(|c| array(Some(c)).iter().filter_map(number).collect())
        .collect();

    ClusterResult {
        clusters,
        centroids,
        point_count,
    }
}

pub fn shape_classification(body: &Value) -> ClassificationResult {
    let trees = [
        (Criterion::Gini, "gini_tree"),
        (Criterion::Entropy, "entropy_tree"),
    ]
    .into_iter()
    .filter_map(|(criterion, key)| {
        non_empty_str(body.get(key)).map(|url| TreeImage { criterion, url })
    })
    .collect();
    ClassificationResult { trees }
}

pub fn shape_association(body: &Value) -> AssociationResult {
    let frequent_itemsets = array(body.get("frequent_itemsets"))
        .iter()
        .filter_map(|entry| {
            let support = entry.get("support").and_then(number)?;
            let items = string_list(either(entry, "itemsets", "items"));
            Some(FrequentItemset { items, support })
        })
        .collect();

    let maximal_itemsets = array(body.get("maximal_itemsets"))
        .iter()
        .map(|entry| match entry {
            Value::Object(_) => string_list(either(entry, "itemsets", "items")),
            other => string_list(Some(other)),
        })
        .collect();

    let rules = array(body.get("rules"))
        .iter()
        .filter_map(|entry| {
            let confidence = entry.get("confidence").and_then(number)?;
            Some(AssociationRule {
                antecedent: string_list(either(entry, "antecedents", "antecedent")),
                consequent: string_list(either(entry, "consequents", "consequent")),
                confidence,
            })
        })
        .collect();

    AssociationResult {
        frequent_itemsets,
        maximal_itemsets,
        rules,
    }
}

pub fn shape_rough_set(body: &Value) -> RoughSetResult {
    RoughSetResult {
        equivalence_classes: nested_lists(body.get("equivalence_classes")),
        lower_approximation: string_list(body.get("lower_approximation")),
        upper_approximation: string_list(body.get("upper_approximation")),
        boundary_region: string_list(body.get("boundary_region")),
        outside_region: string_list(body.get("outside_region")),
        dependency_degree: body.get("dependency_degree").and_then(number),
        reducts: nested_lists(body.get("reduct_attributes")),
    }
}

fn either<'a>(entry: &'a Value, plural: &str, singular: &str) -> Option<&'a Value> {
    entry.get(plural).or_else(|| entry.get(singular))
}

fn array(value: Option<&Value>) -> &[Value] {
    value.and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

fn point_xy(value: &Value) -> Option<[f64; 2]> {
    match array(Some(value)) {
        [x, y, ..] => Some([number(x)?, number(y)?]),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A list of scalars; a lone scalar counts as a one-element list
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_string).collect(),
        Some(other) => scalar_string(other).into_iter().collect(),
        None => Vec::new(),
    }
}

/// A list of lists; object values and a flat list are accepted too
fn nested_lists(value: Option<&Value>) -> Vec<Vec<String>> {
    match value {
        Some(Value::Array(items)) if items.iter().all(|i| !i.is_array()) => {
            let flat = string_list(value);
            if flat.is_empty() {
                Vec::new()
            } else {
                vec![flat]
            }
        }
        Some(Value::Array(items)) => items
            .iter()
            .filter(|i| i.is_array())
            .map(|i| string_list(Some(i)))
            .collect(),
        Some(Value::Object(map)) => object_lists(map),
        _ => Vec::new(),
    }
}

fn object_lists(map: &Map<String, Value>) -> Vec<Vec<String>> {
    map.values().map(|v| string_list(Some(v))).collect()
}
