//! Closed option sets offered by the forms

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Cluster counts the clustering screen offers
pub const CLUSTER_COUNTS: [u32; 4] = [2, 3, 4, 5];
pub const DEFAULT_CLUSTER_COUNT: u32 = 3;

/// Support / confidence thresholds the association screen offers
pub const THRESHOLDS: [f64; 3] = [0.3, 0.5, 0.7];
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Upload extensions accepted by the spreadsheet based analyses
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx"];
/// Rough set also takes plain CSV decision tables
pub const DECISION_TABLE_EXTENSIONS: &[&str] = &["xlsx", "csv"];

/// Canonical threshold equal to `value`, if it is one of [`THRESHOLDS`]
pub fn threshold_option(value: f64) -> Option<f64> {
    THRESHOLDS
        .into_iter()
        .find(|option| (option - value).abs() < 1e-9)
}

/// Next option after `current` (wrapping), or the previous one when `forward` is false
pub fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    match options.iter().position(|o| *o == current) {
        Some(i) if forward => options[(i + 1) % len],
        Some(i) => options[(i + len - 1) % len],
        None => options[0],
    }
}

macro_rules! categorical {
    ($(#[$meta:meta])* $name:ident, $field:literal, [$($variant:ident),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const FIELD: &'static str = $field;

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| format!("'{}' is not a valid {}", s, $field))
            }
        }
    };
}

categorical!(
    /// Sky condition
    Outlook, "Outlook", [Sunny, Overcast, Rainy]
);
categorical!(Temperature, "Temperature", [Hot, Mild, Cool]);
categorical!(Humidity, "Humidity", [High, Normal]);
categorical!(Wind, "Wind", [Weak, Strong]);

/// Option labels for a naive-Bayes field, by wire name
pub fn bayes_options(field: &str) -> &'static [&'static str] {
    match field {
        "Outlook" => &["Sunny", "Overcast", "Rainy"],
        "Temperature" => &["Hot", "Mild", "Cool"],
        "Humidity" => &["High", "Normal"],
        "Wind" => &["Weak", "Strong"],
        _ => &[],
    }
}
