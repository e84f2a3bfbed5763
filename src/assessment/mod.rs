//! Soil Assessment
//!
//! The deterministic rule engine: threshold configuration, reading
//! categorization, problem collection, grading, plan generation, and the
//! explainability trace.

pub mod category;
pub mod engine;
pub mod plan;
pub mod sample;
pub mod thresholds;

pub use category::Category;
pub use engine::{Explainability, Grade, ParamTrace, Problem, SoilAssessment, SoilAssessor};
pub use sample::{Parameter, SampleMetadata, SoilSample};
pub use thresholds::{ConfigError, NutrientBands, PhBands, ThresholdTable};
