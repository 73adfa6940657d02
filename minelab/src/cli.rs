//! Command-line arguments and the headless `submit` command
//!
//! Without a subcommand the terminal UI starts. `minelab submit <analysis>`
//! validates the given input, sends it once, and prints the rendered result.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use minelab_sdk::options::{DEFAULT_CLUSTER_COUNT, DEFAULT_THRESHOLD};
use minelab_sdk::{
    Analysis, AnalysisWorkflow, AssociationAnalysis, AssociationForm, BayesMode,
    ClassificationAnalysis, ClassificationForm, ClusterAnalysis, ClusterForm, CorrelationAnalysis,
    CorrelationForm, EndpointTable, FileHandle, NaiveBayesAnalysis, NaiveBayesForm,
    NormalizedResult, RawInput, RoughSetAnalysis, RoughSetForm, Transport, WorkflowState,
};

use crate::render;

/// Terminal client for the MineLab data-mining service
#[derive(Parser, Debug, Clone)]
#[command(name = "minelab")]
#[command(version)]
pub struct Args {
    /// Base URL of the analysis service
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// YAML configuration file
    ///
    /// Defaults to config.yaml in the platform config directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Where to write the log
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run one analysis without the terminal UI
    Submit {
        #[command(subcommand)]
        analysis: SubmitCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SubmitCommand {
    /// Pearson correlation of one or two numeric series
    Correlation {
        /// Comma-separated numbers
        #[arg(long)]
        first: String,

        /// Optional second series of the same length
        #[arg(long, default_value = "")]
        second: String,
    },

    /// Naive-Bayes prediction for one day
    Predict {
        #[arg(long)]
        outlook: String,
        #[arg(long)]
        temperature: String,
        #[arg(long)]
        humidity: String,
        #[arg(long)]
        wind: String,
    },

    /// Upload a naive-Bayes training sheet
    BayesUpload {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// K-means clustering of a spreadsheet
    Cluster {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long, default_value_t = DEFAULT_CLUSTER_COUNT)]
        clusters: u32,
    },

    /// Gini and entropy decision trees
    Classify {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write embedded tree images into this directory
        #[arg(long, value_name = "DIR")]
        export_dir: Option<PathBuf>,
    },

    /// Frequent itemsets and association rules
    Apriori {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        min_support: f64,

        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        min_confidence: f64,
    },

    /// Rough set approximations and reducts
    RoughSet {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Decision attribute column
        #[arg(long)]
        decision: String,

        /// Comma-separated condition attribute columns
        #[arg(long)]
        conditions: String,

        /// Decision value to approximate
        #[arg(long, default_value = "")]
        concept: String,
    },
}

impl SubmitCommand {
    /// Raw form input equivalent to the flags
    pub fn to_input(&self) -> RawInput {
        match self.clone() {
            SubmitCommand::Correlation { first, second } => {
                RawInput::Correlation(CorrelationForm { first, second })
            }
            SubmitCommand::Predict {
                outlook,
                temperature,
                humidity,
                wind,
            } => RawInput::NaiveBayes(NaiveBayesForm {
                mode: BayesMode::Predict,
                outlook,
                temperature,
                humidity,
                wind,
                file: None,
            }),
            SubmitCommand::BayesUpload { file } => RawInput::NaiveBayes(NaiveBayesForm {
                mode: BayesMode::Bulk,
                file: Some(FileHandle::new(file)),
                ..Default::default()
            }),
            SubmitCommand::Cluster { file, clusters } => RawInput::Cluster(ClusterForm {
                file: Some(FileHandle::new(file)),
                n_clusters: clusters,
            }),
            SubmitCommand::Classify { file, .. } => RawInput::Classification(ClassificationForm {
                file: Some(FileHandle::new(file)),
            }),
            SubmitCommand::Apriori {
                file,
                min_support,
                min_confidence,
            } => RawInput::Association(AssociationForm {
                file: Some(FileHandle::new(file)),
                min_support,
                min_confidence,
            }),
            SubmitCommand::RoughSet {
                file,
                decision,
                conditions,
                concept,
            } => RawInput::RoughSet(RoughSetForm {
                file: Some(FileHandle::new(file)),
                decision_attribute: decision,
                condition_attributes: conditions,
                concept,
            }),
        }
    }

    fn export_dir(&self) -> Option<&Path> {
        match self {
            SubmitCommand::Classify { export_dir, .. } => export_dir.as_deref(),
            _ => None,
        }
    }
}

/// Validate, send once, and return the rendered result lines
///
/// Validation and request failures are returned as errors so the binary
/// exits non-zero.
pub async fn run_submit(
    command: &SubmitCommand,
    transport: &dyn Transport,
    endpoints: &EndpointTable,
    base_url: &str,
) -> Result<Vec<String>> {
    let result = match command.to_input() {
        RawInput::Correlation(form) => {
            run_analysis::<CorrelationAnalysis>(&form, transport, endpoints).await?
        }
        RawInput::NaiveBayes(form) => {
            run_analysis::<NaiveBayesAnalysis>(&form, transport, endpoints).await?
        }
        RawInput::Cluster(form) => {
            run_analysis::<ClusterAnalysis>(&form, transport, endpoints).await?
        }
        RawInput::Classification(form) => {
            run_analysis::<ClassificationAnalysis>(&form, transport, endpoints).await?
        }
        RawInput::Association(form) => {
            run_analysis::<AssociationAnalysis>(&form, transport, endpoints).await?
        }
        RawInput::RoughSet(form) => {
            run_analysis::<RoughSetAnalysis>(&form, transport, endpoints).await?
        }
    };

    let mut lines = render::result_lines(&result, base_url);

    if let (Some(dir), NormalizedResult::Classification(trees)) = (command.export_dir(), &result) {
        let written = render::export_tree_images(trees, dir)
            .with_context(|| format!("Failed to export tree images to {}", dir.display()))?;
        for path in written {
            lines.push(format!("Saved {}", path.display()));
        }
    }

    Ok(lines)
}

async fn run_analysis<A: Analysis>(
    input: &A::Input,
    transport: &dyn Transport,
    endpoints: &EndpointTable,
) -> Result<NormalizedResult> {
    let payload = A::validate(input).map_err(|failure| {
        anyhow!("invalid input:\n  - {}", failure.reasons().join("\n  - "))
    })?;

    info!(screen = %A::SCREEN, "Submitting headless request");
    let mut workflow = AnalysisWorkflow::<A>::new();
    match workflow.run(transport, endpoints, payload).await {
        Some(WorkflowState::Success(result)) => Ok(result.clone().into()),
        Some(WorkflowState::Failed(reason)) => bail!("request failed: {}", reason),
        _ => bail!("request was not submitted"),
    }
}
