//! Analysis kinds, screens and wire encodings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// How a request body is put on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Multipart,
}

/// One remote operation exposed by the analytics service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisKind {
    Correlation,
    NaiveBayesPredict,
    NaiveBayesBulk,
    Cluster,
    Classification,
    Association,
    RoughSet,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 7] = [
        AnalysisKind::Correlation,
        AnalysisKind::NaiveBayesPredict,
        AnalysisKind::NaiveBayesBulk,
        AnalysisKind::Cluster,
        AnalysisKind::Classification,
        AnalysisKind::Association,
        AnalysisKind::RoughSet,
    ];

    /// Stable identifier used in configuration files and the CLI
    pub fn slug(self) -> &'static str {
        match self {
            AnalysisKind::Correlation => "correlation",
            AnalysisKind::NaiveBayesPredict => "naive-bayes",
            AnalysisKind::NaiveBayesBulk => "naive-bayes-bulk",
            AnalysisKind::Cluster => "kmeans",
            AnalysisKind::Classification => "decision-tree",
            AnalysisKind::Association => "apriori",
            AnalysisKind::RoughSet => "rough-set",
        }
    }

    pub fn encoding(self) -> Encoding {
        match self {
            AnalysisKind::Correlation | AnalysisKind::NaiveBayesPredict => Encoding::Json,
            _ => Encoding::Multipart,
        }
    }

    /// Path on the analytics service when nothing else is configured
    pub fn default_path(self) -> &'static str {
        match self {
            AnalysisKind::Correlation => "/api/correlation/",
            AnalysisKind::NaiveBayesPredict => "/api/naive-bayes/",
            AnalysisKind::NaiveBayesBulk => "/api/naive-bayes/upload/",
            AnalysisKind::Cluster => "/api/kmeans-clustering/",
            AnalysisKind::Classification => "/api/decision_tree/",
            AnalysisKind::Association => "/api/apriori/",
            AnalysisKind::RoughSet => "/api/rough-set/",
        }
    }

    /// Screen that hosts this kind
    pub fn screen(self) -> Screen {
        match self {
            AnalysisKind::Correlation => Screen::Correlation,
            AnalysisKind::NaiveBayesPredict | AnalysisKind::NaiveBayesBulk => Screen::NaiveBayes,
            AnalysisKind::Cluster => Screen::Cluster,
            AnalysisKind::Classification => Screen::Classification,
            AnalysisKind::Association => Screen::Association,
            AnalysisKind::RoughSet => Screen::RoughSet,
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for AnalysisKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnalysisKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| ConfigError::UnknownKind(s.to_string()))
    }
}

/// A screen of the client; each owns exactly one workflow instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Correlation,
    NaiveBayes,
    Cluster,
    Classification,
    Association,
    RoughSet,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::Correlation,
        Screen::Cluster,
        Screen::NaiveBayes,
        Screen::Classification,
        Screen::Association,
        Screen::RoughSet,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Screen::Correlation => "correlation",
            Screen::NaiveBayes => "naive-bayes",
            Screen::Cluster => "cluster",
            Screen::Classification => "classification",
            Screen::Association => "association",
            Screen::RoughSet => "rough-set",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Correlation => "Correlation",
            Screen::NaiveBayes => "Naive Bayes",
            Screen::Cluster => "K-Means Clustering",
            Screen::Classification => "Decision Tree",
            Screen::Association => "Apriori Rules",
            Screen::RoughSet => "Rough Set",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Screen::Correlation => "Pearson coefficient between two numeric series",
            Screen::NaiveBayes => "Probabilistic prediction from categorical weather features",
            Screen::Cluster => "Group similar rows of a spreadsheet into k clusters",
            Screen::Classification => "Gini and entropy decision trees for a labelled sheet",
            Screen::Association => "Frequent itemsets and association rules",
            Screen::RoughSet => "Approximations, regions and reducts of a decision table",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
