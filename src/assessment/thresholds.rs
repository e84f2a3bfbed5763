//! Threshold Table
//!
//! The one piece of static configuration the engine depends on: per-parameter
//! band boundaries. Loaded (or defaulted) once at process start, validated,
//! and never mutated afterwards; callers share it behind the assessor.
//!
//! JSON shape, keyed by wire name:
//!
//! ```json
//! {
//!   "N":  {"medium": 50,  "high": 120},
//!   "P":  {"medium": 40,  "high": 80},
//!   "K":  {"medium": 40,  "high": 80},
//!   "OC": {"medium": 0.5, "high": 0.75},
//!   "pH": {"acidic": 5.5, "alkaline": 7.5}
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::category::{
    categorize_nutrient, categorize_ph, nutrient_rule_text, ph_rule_text, Category,
};
use super::sample::Parameter;

/// Fatal configuration failure. A process that hits one of these at startup
/// must not serve requests.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read threshold table at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse threshold table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid threshold bands for {parameter}: {detail}")]
    InvalidBand {
        parameter: &'static str,
        detail: String,
    },
}

/// Band boundaries for a Low/Medium/High parameter (N, P, K, OC).
/// Invariant: `medium < high`. Some published tables name the lower
/// boundary "low"; both keys are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientBands {
    #[serde(alias = "low")]
    pub medium: f64,
    pub high: f64,
}

/// Band boundaries for pH. Invariant: `acidic < alkaline`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhBands {
    pub acidic: f64,
    pub alkaline: f64,
}

/// Full threshold table for the five assessed parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    #[serde(rename = "N")]
    pub n: NutrientBands,
    #[serde(rename = "P")]
    pub p: NutrientBands,
    #[serde(rename = "K")]
    pub k: NutrientBands,
    #[serde(rename = "OC")]
    pub oc: NutrientBands,
    #[serde(rename = "pH")]
    pub ph: PhBands,
}

impl Default for ThresholdTable {
    /// Built-in universal bands, applied when no override is configured.
    fn default() -> Self {
        Self {
            n: NutrientBands {
                medium: 50.0,
                high: 120.0,
            },
            p: NutrientBands {
                medium: 40.0,
                high: 80.0,
            },
            k: NutrientBands {
                medium: 40.0,
                high: 80.0,
            },
            oc: NutrientBands {
                medium: 0.5,
                high: 0.75,
            },
            ph: PhBands {
                acidic: 5.5,
                alkaline: 7.5,
            },
        }
    }
}

impl ThresholdTable {
    /// Parse and validate a table from raw JSON.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let table: Self = serde_json::from_str(raw)?;
        table.validate()?;
        Ok(table)
    }

    /// Load and validate a table from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Enforce band ordering for every parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let nutrients = [
            (Parameter::N, &self.n),
            (Parameter::P, &self.p),
            (Parameter::K, &self.k),
            (Parameter::Oc, &self.oc),
        ];
        for (param, bands) in nutrients {
            if !(bands.medium < bands.high) {
                return Err(ConfigError::InvalidBand {
                    parameter: param.as_str(),
                    detail: format!("medium ({}) must be < high ({})", bands.medium, bands.high),
                });
            }
        }
        if !(self.ph.acidic < self.ph.alkaline) {
            return Err(ConfigError::InvalidBand {
                parameter: Parameter::Ph.as_str(),
                detail: format!(
                    "acidic ({}) must be < alkaline ({})",
                    self.ph.acidic, self.ph.alkaline
                ),
            });
        }
        Ok(())
    }

    /// Classify one reading against this table.
    pub fn categorize(&self, param: Parameter, value: Option<f64>) -> Category {
        match param {
            Parameter::N => categorize_nutrient(&self.n, value),
            Parameter::P => categorize_nutrient(&self.p, value),
            Parameter::K => categorize_nutrient(&self.k, value),
            Parameter::Oc => categorize_nutrient(&self.oc, value),
            Parameter::Ph => categorize_ph(&self.ph, value),
        }
    }

    /// Rule text for a classification made against this table.
    pub fn rule_text(&self, param: Parameter, category: Category) -> String {
        match param {
            Parameter::N => nutrient_rule_text(&self.n, category),
            Parameter::P => nutrient_rule_text(&self.p, category),
            Parameter::K => nutrient_rule_text(&self.k, category),
            Parameter::Oc => nutrient_rule_text(&self.oc, category),
            Parameter::Ph => ph_rule_text(&self.ph, category),
        }
    }
}
