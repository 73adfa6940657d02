//! Tests for the display helpers shared by the TUI and the CLI

use super::common::*;
use minelab::render::*;
use minelab_sdk::shape::{
    AssociationResult, AssociationRule, ClassificationResult, CorrelationResult, Criterion,
    FrequentItemset, NaiveBayesResult, RoughSetResult, TreeImage,
};
use minelab_sdk::NormalizedResult;

fn itemset(items: &[&str], support: f64) -> FrequentItemset {
    FrequentItemset {
        items: items.iter().map(|s| s.to_string()).collect(),
        support,
    }
}

// ============================================================================
// Measures and verdicts
// ============================================================================

#[test]
fn test_measures_use_four_decimals() {
    assert_eq!(format_measure(0.987654321), "0.9877");
    assert_eq!(format_measure(0.5), "0.5000");
    assert_eq!(format_measure(-0.12345), "-0.1235");
}

#[test]
fn test_correlation_strength_bands() {
    assert_eq!(correlation_strength(0.0), "no linear correlation");
    assert_eq!(correlation_strength(0.1), "very weak positive");
    assert_eq!(correlation_strength(-0.3), "weak negative");
    assert_eq!(correlation_strength(0.5), "moderate positive");
    assert_eq!(correlation_strength(-0.79), "strong negative");
    assert_eq!(correlation_strength(0.8234), "very strong positive");
    assert_eq!(correlation_strength(-1.0), "very strong negative");
}

#[test]
fn test_bayes_verdict() {
    assert_eq!(bayes_verdict("Yes"), "Play");
    assert_eq!(bayes_verdict("No"), "Don't play");
    assert_eq!(bayes_verdict(" no "), "Don't play");
}

// ============================================================================
// Association rules
// ============================================================================

#[test]
fn test_itemsets_sorted_by_support_with_stable_ties() {
    let itemsets = vec![
        itemset(&["bread"], 0.4),
        itemset(&["milk"], 0.7),
        itemset(&["tea"], 0.4),
        itemset(&["milk", "bread"], 0.55),
    ];
    let order: Vec<&str> = itemsets_by_support(&itemsets)
        .iter()
        .map(|i| i.items[0].as_str())
        .collect();
    assert_eq!(order, vec!["milk", "milk", "bread", "tea"]);
    assert_eq!(itemsets_by_support(&itemsets)[1].items, vec!["milk", "bread"]);
}

#[test]
fn test_rule_line_format() {
    let rule = AssociationRule {
        antecedent: vec!["milk".into(), "eggs".into()],
        consequent: vec!["bread".into()],
        confidence: 0.987654321,
    };
    assert_eq!(rule_line(&rule), "{milk, eggs} => {bread}  confidence 0.9877");
}

#[test]
fn test_association_without_rules_says_so() {
    let result = NormalizedResult::Association(AssociationResult {
        frequent_itemsets: vec![itemset(&["bread"], 0.6)],
        maximal_itemsets: Vec::new(),
        rules: Vec::new(),
    });
    let lines = result_lines(&result, "http://x");
    assert_eq!(lines[1], "  {bread}  support 0.6000");
    assert!(lines.contains(&"  none above the confidence threshold".to_string()));
}

// ============================================================================
// Tree images
// ============================================================================

#[test]
fn test_image_urls_resolve_against_base() {
    assert_eq!(
        resolve_image_url("/media/gini.png", "http://127.0.0.1:8000/"),
        "http://127.0.0.1:8000/media/gini.png"
    );
    assert_eq!(
        resolve_image_url("media/gini.png", "http://127.0.0.1:8000"),
        "http://127.0.0.1:8000/media/gini.png"
    );
    assert_eq!(
        resolve_image_url("https://cdn.example/t.png", "http://127.0.0.1:8000"),
        "https://cdn.example/t.png"
    );
}

#[test]
fn test_data_urls_decode() {
    let url = format!("data:image/png;base64,{}", PNG_HEADER_B64);
    assert_eq!(decode_data_url(&url), Some(vec![0x89, 0x50, 0x4E, 0x47]));
    assert_eq!(decode_data_url("data:image/png,raw"), None);
    assert_eq!(decode_data_url("/media/gini.png"), None);
    assert_eq!(decode_data_url("data:image/png;base64,***"), None);
}

#[test]
fn test_export_writes_embedded_trees_only() {
    let dir = tempfile::tempdir().unwrap();
    let result = ClassificationResult {
        trees: vec![
            TreeImage {
                criterion: Criterion::Gini,
                url: format!("data:image/png;base64,{}", PNG_HEADER_B64),
            },
            TreeImage {
                criterion: Criterion::Entropy,
                url: "/media/entropy.png".into(),
            },
        ],
    };

    let written = export_tree_images(&result, dir.path()).unwrap();

    assert_eq!(written, vec![dir.path().join("gini_tree.png")]);
    assert_eq!(
        std::fs::read(dir.path().join("gini_tree.png")).unwrap(),
        vec![0x89, 0x50, 0x4E, 0x47]
    );
    assert!(!dir.path().join("entropy_tree.png").exists());
}

// ============================================================================
// Result text
// ============================================================================

#[test]
fn test_correlation_lines() {
    let result = NormalizedResult::Correlation(CorrelationResult {
        coefficient: Some(0.8234),
    });
    assert_eq!(
        result_lines(&result, "http://x"),
        vec![
            "Correlation coefficient: 0.8234".to_string(),
            "Strength: very strong positive".to_string(),
        ]
    );
}

#[test]
fn test_prediction_lines() {
    let result = NormalizedResult::NaiveBayes(NaiveBayesResult::Prediction {
        label: Some("No".into()),
    });
    assert_eq!(
        result_lines(&result, "http://x"),
        vec!["Prediction: No".to_string(), "Verdict: Don't play".to_string()]
    );
}

#[test]
fn test_rough_set_lines_include_degree_and_reducts() {
    let result = NormalizedResult::RoughSet(RoughSetResult {
        equivalence_classes: vec![vec!["1".into(), "4".into()]],
        lower_approximation: vec!["1".into(), "4".into()],
        upper_approximation: vec!["1".into(), "4".into()],
        boundary_region: Vec::new(),
        outside_region: vec!["2".into()],
        dependency_degree: Some(1.0 / 3.0),
        reducts: vec![vec!["Headache".into()]],
    });
    let lines = result_lines(&result, "http://x");

    assert!(lines.contains(&"Lower approximation: {1, 4}".to_string()));
    assert!(lines.contains(&"Boundary region: {}".to_string()));
    assert!(lines.contains(&"Dependency degree: 0.3333".to_string()));
    assert_eq!(lines.last().unwrap(), "  {Headache}");
}

#[test]
fn test_cluster_colors_wrap() {
    assert_eq!(cluster_color(0), CLUSTER_PALETTE[0]);
    assert_eq!(cluster_color(CLUSTER_PALETTE.len()), CLUSTER_PALETTE[0]);
}
