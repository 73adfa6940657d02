//! Pure helpers that turn shaped results into display text
//!
//! Nothing here touches the terminal; the TUI and the headless CLI share
//! these functions.

use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use ratatui::style::Color;
use std::path::{Path, PathBuf};

use minelab_sdk::shape::{
    AssociationResult, AssociationRule, ClassificationResult, ClusterResult, CorrelationResult,
    FrequentItemset, NaiveBayesResult, RoughSetResult,
};
use minelab_sdk::NormalizedResult;

/// Colours assigned to clusters in order of first appearance
pub const CLUSTER_PALETTE: [Color; 5] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::LightRed,
];

pub fn cluster_color(position: usize) -> Color {
    CLUSTER_PALETTE[position % CLUSTER_PALETTE.len()]
}

/// Four decimals, used for support, confidence, coefficients and degrees
pub fn format_measure(value: f64) -> String {
    format!("{:.4}", value)
}

pub fn correlation_strength(coefficient: f64) -> String {
    if coefficient == 0.0 {
        return "no linear correlation".to_string();
    }
    let magnitude = coefficient.abs();
    let strength = if magnitude < 0.2 {
        "very weak"
    } else if magnitude < 0.4 {
        "weak"
    } else if magnitude < 0.6 {
        "moderate"
    } else if magnitude < 0.8 {
        "strong"
    } else {
        "very strong"
    };
    let direction = if coefficient > 0.0 { "positive" } else { "negative" };
    format!("{} {}", strength, direction)
}

/// Whether to play, given the predicted label
pub fn bayes_verdict(label: &str) -> &'static str {
    if label.trim().eq_ignore_ascii_case("no") {
        "Don't play"
    } else {
        "Play"
    }
}

/// Itemsets ordered by support, highest first; ties keep server order
pub fn itemsets_by_support(itemsets: &[FrequentItemset]) -> Vec<&FrequentItemset> {
    let mut sorted: Vec<&FrequentItemset> = itemsets.iter().collect();
    sorted.sort_by(|a, b| b.support.total_cmp(&a.support));
    sorted
}

pub fn rule_line(rule: &AssociationRule) -> String {
    format!(
        "{{{}}} => {{{}}}  confidence {}",
        rule.antecedent.join(", "),
        rule.consequent.join(", "),
        format_measure(rule.confidence)
    )
}

/// Absolute URL for a tree image reference
pub fn resolve_image_url(url: &str, base_url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("data:") {
        return url.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{}{}", base, url)
    } else {
        format!("{}/{}", base, url)
    }
}

/// Bytes of a base64 `data:` URL, `None` for anything else
pub fn decode_data_url(url: &str) -> Option<Vec<u8>> {
    let rest = url.trim().strip_prefix("data:")?;
    let (header, data) = rest.split_once(',')?;
    if !header.ends_with(";base64") {
        return None;
    }
    general_purpose::STANDARD.decode(data.trim()).ok()
}

/// Write every embedded tree image into `dir`; remote references are skipped
pub fn export_tree_images(result: &ClassificationResult, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for tree in &result.trees {
        let Some(bytes) = decode_data_url(&tree.url) else {
            continue;
        };
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(format!("{}_tree.png", tree.criterion.as_str()));
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

/// Plain-text rendering of any result
pub fn result_lines(result: &NormalizedResult, base_url: &str) -> Vec<String> {
    match result {
        NormalizedResult::Correlation(r) => correlation_lines(r),
        NormalizedResult::NaiveBayes(r) => naive_bayes_lines(r),
        NormalizedResult::Cluster(r) => cluster_lines(r),
        NormalizedResult::Classification(r) => classification_lines(r, base_url),
        NormalizedResult::Association(r) => association_lines(r),
        NormalizedResult::RoughSet(r) => rough_set_lines(r),
    }
}

fn correlation_lines(result: &CorrelationResult) -> Vec<String> {
    match result.coefficient {
        Some(r) => vec![
            format!("Correlation coefficient: {}", format_measure(r)),
            format!("Strength: {}", correlation_strength(r)),
        ],
        None => vec!["The service returned no coefficient".to_string()],
    }
}

fn naive_bayes_lines(result: &NaiveBayesResult) -> Vec<String> {
    match result {
        NaiveBayesResult::Prediction { label: Some(label) } => vec![
            format!("Prediction: {}", label),
            format!("Verdict: {}", bayes_verdict(label)),
        ],
        NaiveBayesResult::Prediction { label: None } => {
            vec!["The service returned no prediction".to_string()]
        }
        NaiveBayesResult::Schema { columns } if columns.is_empty() => {
            vec!["No columns were found in the uploaded sheet".to_string()]
        }
        NaiveBayesResult::Schema { columns } => {
            let mut lines = vec!["Columns in the uploaded sheet:".to_string()];
            for column in columns {
                lines.push(format!("  {}: {}", column.column, column.values.join(", ")));
            }
            lines
        }
    }
}

fn cluster_lines(result: &ClusterResult) -> Vec<String> {
    let mut lines = vec![format!(
        "{} points in {} clusters",
        result.point_count,
        result.clusters.len()
    )];
    for series in &result.clusters {
        lines.push(format!("  Cluster {}: {} points", series.label, series.points.len()));
    }
    for (i, centroid) in result.centroids.iter().enumerate() {
        let coords: Vec<String> = centroid.iter().map(|c| format_measure(*c)).collect();
        lines.push(format!("  Centroid {}: ({})", i, coords.join(", ")));
    }
    lines
}

fn classification_lines(result: &ClassificationResult, base_url: &str) -> Vec<String> {
    if result.trees.is_empty() {
        return vec!["The service returned no tree images".to_string()];
    }
    result
        .trees
        .iter()
        .map(|tree| {
            let reference = if tree.url.starts_with("data:") {
                "embedded image (press e to export)".to_string()
            } else {
                resolve_image_url(&tree.url, base_url)
            };
            format!("{} tree: {}", tree.criterion.as_str(), reference)
        })
        .collect()
}

fn association_lines(result: &AssociationResult) -> Vec<String> {
    let mut lines = vec!["Frequent itemsets:".to_string()];
    for itemset in itemsets_by_support(&result.frequent_itemsets) {
        lines.push(format!(
            "  {{{}}}  support {}",
            itemset.items.join(", "),
            format_measure(itemset.support)
        ));
    }
    if !result.maximal_itemsets.is_empty() {
        lines.push("Maximal itemsets:".to_string());
        for items in &result.maximal_itemsets {
            lines.push(format!("  {{{}}}", items.join(", ")));
        }
    }
    lines.push("Rules:".to_string());
    if result.rules.is_empty() {
        lines.push("  none above the confidence threshold".to_string());
    }
    for rule in &result.rules {
        lines.push(format!("  {}", rule_line(rule)));
    }
    lines
}

fn set_line(label: &str, items: &[String]) -> String {
    format!("{}: {{{}}}", label, items.join(", "))
}

fn rough_set_lines(result: &RoughSetResult) -> Vec<String> {
    let mut lines = vec!["Equivalence classes:".to_string()];
    for class in &result.equivalence_classes {
        lines.push(format!("  {{{}}}", class.join(", ")));
    }
    lines.push(set_line("Lower approximation", &result.lower_approximation));
    lines.push(set_line("Upper approximation", &result.upper_approximation));
    lines.push(set_line("Boundary region", &result.boundary_region));
    lines.push(set_line("Outside region", &result.outside_region));
    if let Some(degree) = result.dependency_degree {
        lines.push(format!("Dependency degree: {}", format_measure(degree)));
    }
    lines.push("Reducts:".to_string());
    for reduct in &result.reducts {
        lines.push(format!("  {{{}}}", reduct.join(", ")));
    }
    lines
}
