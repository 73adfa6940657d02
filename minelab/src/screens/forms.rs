//! Editable fields of each analysis form

use minelab_sdk::options::{
    bayes_options, cycle, Humidity, Outlook, Temperature, Wind, CLUSTER_COUNTS,
    DECISION_TABLE_EXTENSIONS, SPREADSHEET_EXTENSIONS, THRESHOLDS,
};
use minelab_sdk::{
    AssociationForm, BayesMode, ClassificationForm, ClusterForm, CorrelationForm, FileHandle,
    NaiveBayesForm, RoughSetForm,
};

const PREDICT: &str = "Predict";
const BULK_UPLOAD: &str = "Bulk upload";

/// How a field is edited
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text, edited inline
    Text,
    /// Closed set, cycled with the arrow keys
    Choice(Vec<String>),
    /// Path picked in the file browser, limited to these extensions
    File(&'static [&'static str]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub help: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    fn text(name: &'static str, label: &'static str, help: &'static str) -> Self {
        Self {
            name,
            label,
            help,
            kind: FieldKind::Text,
        }
    }

    fn choice(
        name: &'static str,
        label: &'static str,
        help: &'static str,
        options: Vec<String>,
    ) -> Self {
        Self {
            name,
            label,
            help,
            kind: FieldKind::Choice(options),
        }
    }

    fn file(label: &'static str, help: &'static str, extensions: &'static [&'static str]) -> Self {
        Self {
            name: "file",
            label,
            help,
            kind: FieldKind::File(extensions),
        }
    }
}

/// Raw form state that a screen can edit field by field
pub trait Form {
    fn fields(&self) -> Vec<FieldSpec>;

    fn value(&self, name: &str) -> String;

    /// Unknown names and unparsable choice values are ignored
    fn set_value(&mut self, name: &str, value: &str);

    fn cycle(&mut self, name: &str, forward: bool) {
        let options = self.fields().into_iter().find_map(|f| match f.kind {
            FieldKind::Choice(options) if f.name == name => Some(options),
            _ => None,
        });
        let Some(options) = options else {
            return;
        };
        if options.is_empty() {
            return;
        }

        let current = self.value(name);
        let choices: Vec<&str> = options.iter().map(String::as_str).collect();
        let next = cycle(&choices, current.as_str(), forward).to_string();
        self.set_value(name, &next);
    }
}

fn file_value(file: &Option<FileHandle>) -> String {
    file.as_ref()
        .map(|f| f.path().display().to_string())
        .unwrap_or_default()
}

fn parse_file(value: &str) -> Option<FileHandle> {
    let value = value.trim();
    (!value.is_empty()).then(|| FileHandle::new(value))
}

fn static_options(options: &[&str]) -> Vec<String> {
    options.iter().map(|o| o.to_string()).collect()
}

fn threshold_options() -> Vec<String> {
    THRESHOLDS.iter().map(f64::to_string).collect()
}

impl Form for CorrelationForm {
    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::text(
                "first",
                "First sequence",
                "Comma-separated numbers, e.g. 175, 133, 185",
            ),
            FieldSpec::text("second", "Second sequence", "Optional; same length as the first"),
        ]
    }

    fn value(&self, name: &str) -> String {
        match name {
            "first" => self.first.clone(),
            "second" => self.second.clone(),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, name: &str, value: &str) {
        match name {
            "first" => self.first = value.to_string(),
            "second" => self.second = value.to_string(),
            _ => {}
        }
    }
}

impl Form for NaiveBayesForm {
    fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = vec![FieldSpec::choice(
            "mode",
            "Mode",
            "Predict one day or upload a training sheet",
            static_options(&[PREDICT, BULK_UPLOAD]),
        )];
        match self.mode {
            BayesMode::Predict => {
                for (name, field) in [
                    ("outlook", Outlook::FIELD),
                    ("temperature", Temperature::FIELD),
                    ("humidity", Humidity::FIELD),
                    ("wind", Wind::FIELD),
                ] {
                    fields.push(FieldSpec::choice(
                        name,
                        field,
                        "Use ←/→ to pick a value",
                        static_options(bayes_options(field)),
                    ));
                }
            }
            BayesMode::Bulk => fields.push(FieldSpec::file(
                "Training sheet",
                "Excel workbook with one column per feature",
                SPREADSHEET_EXTENSIONS,
            )),
        }
        fields
    }

    fn value(&self, name: &str) -> String {
        match name {
            "mode" => match self.mode {
                BayesMode::Predict => PREDICT.to_string(),
                BayesMode::Bulk => BULK_UPLOAD.to_string(),
            },
            "outlook" => self.outlook.clone(),
            "temperature" => self.temperature.clone(),
            "humidity" => self.humidity.clone(),
            "wind" => self.wind.clone(),
            "file" => file_value(&self.file),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, name: &str, value: &str) {
        match name {
            "mode" => match value {
                PREDICT => self.mode = BayesMode::Predict,
                BULK_UPLOAD => self.mode = BayesMode::Bulk,
                _ => {}
            },
            "outlook" => self.outlook = value.to_string(),
            "temperature" => self.temperature = value.to_string(),
            "humidity" => self.humidity = value.to_string(),
            "wind" => self.wind = value.to_string(),
            "file" => self.file = parse_file(value),
            _ => {}
        }
    }
}

impl Form for ClusterForm {
    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::file(
                "Data sheet",
                "Excel workbook of numeric columns",
                SPREADSHEET_EXTENSIONS,
            ),
            FieldSpec::choice(
                "n_clusters",
                "Number of clusters",
                "Use ←/→ to change",
                CLUSTER_COUNTS.iter().map(u32::to_string).collect(),
            ),
        ]
    }

    fn value(&self, name: &str) -> String {
        match name {
            "file" => file_value(&self.file),
            "n_clusters" => self.n_clusters.to_string(),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, name: &str, value: &str) {
        match name {
            "file" => self.file = parse_file(value),
            "n_clusters" => {
                if let Ok(n) = value.trim().parse() {
                    self.n_clusters = n;
                }
            }
            _ => {}
        }
    }
}

impl Form for ClassificationForm {
    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::file(
            "Training sheet",
            "Excel workbook whose last column is the class",
            SPREADSHEET_EXTENSIONS,
        )]
    }

    fn value(&self, name: &str) -> String {
        match name {
            "file" => file_value(&self.file),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, name: &str, value: &str) {
        if name == "file" {
            self.file = parse_file(value);
        }
    }
}

impl Form for AssociationForm {
    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::file(
                "Transactions",
                "Excel workbook, one transaction per row",
                SPREADSHEET_EXTENSIONS,
            ),
            FieldSpec::choice(
                "min_support",
                "Minimum support",
                "Use ←/→ to change",
                threshold_options(),
            ),
            FieldSpec::choice(
                "min_confidence",
                "Minimum confidence",
                "Use ←/→ to change",
                threshold_options(),
            ),
        ]
    }

    fn value(&self, name: &str) -> String {
        match name {
            "file" => file_value(&self.file),
            "min_support" => self.min_support.to_string(),
            "min_confidence" => self.min_confidence.to_string(),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, name: &str, value: &str) {
        let threshold = value.trim().parse::<f64>().ok();
        match (name, threshold) {
            ("file", _) => self.file = parse_file(value),
            ("min_support", Some(t)) => self.min_support = t,
            ("min_confidence", Some(t)) => self.min_confidence = t,
            _ => {}
        }
    }
}

impl Form for RoughSetForm {
    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::file("Decision table", "Excel or CSV file", DECISION_TABLE_EXTENSIONS),
            FieldSpec::text(
                "decision_attribute",
                "Decision attribute",
                "Column holding the decision",
            ),
            FieldSpec::text(
                "condition_attributes",
                "Condition attributes",
                "Comma-separated column names",
            ),
            FieldSpec::text("concept", "Concept X", "Optional decision value to approximate"),
        ]
    }

    fn value(&self, name: &str) -> String {
        match name {
            "file" => file_value(&self.file),
            "decision_attribute" => self.decision_attribute.clone(),
            "condition_attributes" => self.condition_attributes.clone(),
            "concept" => self.concept.clone(),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, name: &str, value: &str) {
        match name {
            "file" => self.file = parse_file(value),
            "decision_attribute" => self.decision_attribute = value.to_string(),
            "condition_attributes" => self.condition_attributes = value.to_string(),
            "concept" => self.concept = value.to_string(),
            _ => {}
        }
    }
}
