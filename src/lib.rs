//! Soil Advisor
//!
//! Farming-advisory backend centered on a deterministic soil-health rule
//! engine: raw N/P/K/pH/OC readings in, a graded assessment with a
//! combination-aware remediation plan and a field-by-field explainability
//! trace out.
//!
//! - `assessment/`: threshold table, categorization, grading, plan builder
//! - `api_server`: axum JSON API over the engine (feature `api`)

pub mod assessment;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use assessment::{
    Category, ConfigError, Explainability, Grade, NutrientBands, Parameter, ParamTrace, PhBands,
    Problem, SampleMetadata, SoilAssessment, SoilAssessor, SoilSample, ThresholdTable,
};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
