//! Reading Categorization
//!
//! Converts a raw reading into its discrete band: Low/Medium/High for the
//! nutrient-style parameters (N, P, K, OC), Acidic/Neutral/Alkaline for pH,
//! Unknown when the value is absent. Also renders the human-readable rule
//! text that the explainability trace carries for each classification.
//!
//! Boundary semantics: strict `<` at the lower boundary, non-strict at the
//! upper one. A value exactly at `medium` is Medium, exactly at `high` is
//! High. For pH both boundary values are Neutral.

use serde::Serialize;

use super::thresholds::{NutrientBands, PhBands};

/// Discrete band a reading falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Low,
    Medium,
    High,
    Acidic,
    Neutral,
    Alkaline,
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Low => "Low",
            Category::Medium => "Medium",
            Category::High => "High",
            Category::Acidic => "Acidic",
            Category::Neutral => "Neutral",
            Category::Alkaline => "Alkaline",
            Category::Unknown => "Unknown",
        }
    }
}

/// Classify a nutrient-style reading (N, P, K, OC) against its bands.
///
/// Absent or non-finite values are Unknown.
pub fn categorize_nutrient(bands: &NutrientBands, value: Option<f64>) -> Category {
    match value {
        Some(v) if v.is_finite() => {
            if v < bands.medium {
                Category::Low
            } else if v < bands.high {
                Category::Medium
            } else {
                Category::High
            }
        }
        _ => Category::Unknown,
    }
}

/// Classify a pH reading against its bands.
pub fn categorize_ph(bands: &PhBands, value: Option<f64>) -> Category {
    match value {
        Some(v) if v.is_finite() => {
            if v < bands.acidic {
                Category::Acidic
            } else if v > bands.alkaline {
                Category::Alkaline
            } else {
                Category::Neutral
            }
        }
        _ => Category::Unknown,
    }
}

/// Rule text for a nutrient classification, e.g. `"< 40 => Low"`.
///
/// Unknown yields an empty string; there is no matched rule to restate.
pub fn nutrient_rule_text(bands: &NutrientBands, category: Category) -> String {
    match category {
        Category::Low => format!("< {} => Low", bands.medium),
        Category::Medium => format!("{} <= value < {} => Medium", bands.medium, bands.high),
        Category::High => format!(">= {} => High", bands.high),
        _ => String::new(),
    }
}

/// Rule text for a pH classification, e.g. `"< 5.5 => Acidic"`.
pub fn ph_rule_text(bands: &PhBands, category: Category) -> String {
    match category {
        Category::Acidic => format!("< {} => Acidic", bands.acidic),
        Category::Alkaline => format!("> {} => Alkaline", bands.alkaline),
        Category::Neutral => format!("{} <= value <= {} => Neutral", bands.acidic, bands.alkaline),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands() -> NutrientBands {
        NutrientBands {
            medium: 40.0,
            high: 80.0,
        }
    }

    fn ph_bands() -> PhBands {
        PhBands {
            acidic: 5.5,
            alkaline: 7.5,
        }
    }

    #[test]
    fn test_nutrient_boundaries() {
        assert_eq!(categorize_nutrient(&bands(), Some(39.9)), Category::Low);
        // Exactly at `medium` is Medium, not Low
        assert_eq!(categorize_nutrient(&bands(), Some(40.0)), Category::Medium);
        assert_eq!(categorize_nutrient(&bands(), Some(79.9)), Category::Medium);
        // Exactly at `high` is High
        assert_eq!(categorize_nutrient(&bands(), Some(80.0)), Category::High);
        assert_eq!(categorize_nutrient(&bands(), Some(500.0)), Category::High);
    }

    #[test]
    fn test_ph_boundaries() {
        assert_eq!(categorize_ph(&ph_bands(), Some(5.4)), Category::Acidic);
        // Both boundary values are Neutral
        assert_eq!(categorize_ph(&ph_bands(), Some(5.5)), Category::Neutral);
        assert_eq!(categorize_ph(&ph_bands(), Some(7.5)), Category::Neutral);
        assert_eq!(categorize_ph(&ph_bands(), Some(7.6)), Category::Alkaline);
    }

    #[test]
    fn test_absent_and_non_finite_are_unknown() {
        assert_eq!(categorize_nutrient(&bands(), None), Category::Unknown);
        assert_eq!(categorize_nutrient(&bands(), Some(f64::NAN)), Category::Unknown);
        assert_eq!(categorize_ph(&ph_bands(), None), Category::Unknown);
        assert_eq!(
            categorize_ph(&ph_bands(), Some(f64::INFINITY)),
            Category::Unknown
        );
    }

    #[test]
    fn test_nutrient_rule_text() {
        assert_eq!(nutrient_rule_text(&bands(), Category::Low), "< 40 => Low");
        assert_eq!(
            nutrient_rule_text(&bands(), Category::Medium),
            "40 <= value < 80 => Medium"
        );
        assert_eq!(nutrient_rule_text(&bands(), Category::High), ">= 80 => High");
        assert_eq!(nutrient_rule_text(&bands(), Category::Unknown), "");
    }

    #[test]
    fn test_ph_rule_text() {
        assert_eq!(ph_rule_text(&ph_bands(), Category::Acidic), "< 5.5 => Acidic");
        assert_eq!(
            ph_rule_text(&ph_bands(), Category::Alkaline),
            "> 7.5 => Alkaline"
        );
        assert_eq!(
            ph_rule_text(&ph_bands(), Category::Neutral),
            "5.5 <= value <= 7.5 => Neutral"
        );
        assert_eq!(ph_rule_text(&ph_bands(), Category::Unknown), "");
    }

    #[test]
    fn test_category_serializes_as_display_string() {
        assert_eq!(
            serde_json::to_string(&Category::Acidic).unwrap(),
            "\"Acidic\""
        );
        assert_eq!(
            serde_json::to_string(&Category::Unknown).unwrap(),
            "\"Unknown\""
        );
    }
}
