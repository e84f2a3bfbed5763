//! Soil Assessment Engine
//!
//! The core service object: categorize each reading against the threshold
//! table, collect deficiency/extremity problems, grade the soil, build the
//! improvement plan, and emit a per-parameter explainability trace.
//!
//! The engine is total over its declared input: any combination of absent
//! readings produces a valid result, and no call mutates shared state. One
//! deliberate asymmetry in the grading policy: only deficiencies and pH
//! extremes drive problems and the plan. A High nutrient band is visible in
//! explainability but flags nothing.

use serde::Serialize;

use super::category::Category;
use super::plan::build_improvement_plan;
use super::sample::{Parameter, SampleMetadata, SoilSample};
use super::thresholds::ThresholdTable;

/// A named deficiency or extremity finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Problem {
    #[serde(rename = "Low N")]
    LowN,
    #[serde(rename = "Low P")]
    LowP,
    #[serde(rename = "Low K")]
    LowK,
    #[serde(rename = "Low OC")]
    LowOc,
    #[serde(rename = "Acidic pH")]
    AcidicPh,
    #[serde(rename = "Alkaline pH")]
    AlkalinePh,
}

impl Problem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Problem::LowN => "Low N",
            Problem::LowP => "Low P",
            Problem::LowK => "Low K",
            Problem::LowOc => "Low OC",
            Problem::AcidicPh => "Acidic pH",
            Problem::AlkalinePh => "Alkaline pH",
        }
    }

    /// pH extremities do not count toward the Low tally used for grading.
    pub fn is_ph(&self) -> bool {
        matches!(self, Problem::AcidicPh | Problem::AlkalinePh)
    }
}

/// Overall soil-health verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    Good,
    Fair,
    Poor,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Good => "Good",
            Grade::Fair => "Fair",
            Grade::Poor => "Poor",
        }
    }
}

/// Explainability record for one parameter: the reading, the band it fell
/// into, and a restatement of the boundary test that produced it. Absent
/// readings carry category Unknown and an empty rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamTrace {
    pub value: Option<f64>,
    pub category: Category,
    pub rule: String,
}

/// Per-parameter explainability, serialized under the wire names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explainability {
    #[serde(rename = "N")]
    pub n: ParamTrace,
    #[serde(rename = "P")]
    pub p: ParamTrace,
    #[serde(rename = "K")]
    pub k: ParamTrace,
    #[serde(rename = "OC")]
    pub oc: ParamTrace,
    #[serde(rename = "pH")]
    pub ph: ParamTrace,
}

impl Explainability {
    pub fn get(&self, param: Parameter) -> &ParamTrace {
        match param {
            Parameter::N => &self.n,
            Parameter::P => &self.p,
            Parameter::K => &self.k,
            Parameter::Oc => &self.oc,
            Parameter::Ph => &self.ph,
        }
    }
}

/// Complete assessment for one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilAssessment {
    pub grade: Grade,
    pub problems: Vec<Problem>,
    pub improvement_plan: Vec<String>,
    pub explainability: Explainability,
}

/// The assessment service. Holds the validated threshold table loaded at
/// process start; constructed once and shared by handle, so request
/// handlers never reach for hidden module-level state.
#[derive(Debug, Clone)]
pub struct SoilAssessor {
    thresholds: ThresholdTable,
}

impl SoilAssessor {
    pub fn new(thresholds: ThresholdTable) -> Self {
        Self { thresholds }
    }

    /// The active threshold table.
    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Assess one sample. Pure: identical input yields identical output.
    ///
    /// `_metadata` (crop, soil type, lab method) is accepted but does not
    /// alter threshold selection; reserved for per-crop tuning.
    pub fn assess(&self, sample: &SoilSample, _metadata: &SampleMetadata) -> SoilAssessment {
        let explainability = Explainability {
            n: self.trace(Parameter::N, sample.n),
            p: self.trace(Parameter::P, sample.p),
            k: self.trace(Parameter::K, sample.k),
            oc: self.trace(Parameter::Oc, sample.oc),
            ph: self.trace(Parameter::Ph, sample.ph),
        };

        // Walk in fixed order so the problems list reads N, P, K, OC, pH
        let mut problems: Vec<Problem> = Vec::new();
        let mut low_count = 0usize;
        for param in Parameter::IN_ORDER {
            match (param, explainability.get(param).category) {
                (Parameter::N, Category::Low) => {
                    problems.push(Problem::LowN);
                    low_count += 1;
                }
                (Parameter::P, Category::Low) => {
                    problems.push(Problem::LowP);
                    low_count += 1;
                }
                (Parameter::K, Category::Low) => {
                    problems.push(Problem::LowK);
                    low_count += 1;
                }
                (Parameter::Oc, Category::Low) => {
                    problems.push(Problem::LowOc);
                    low_count += 1;
                }
                (Parameter::Ph, Category::Acidic) => problems.push(Problem::AcidicPh),
                (Parameter::Ph, Category::Alkaline) => problems.push(Problem::AlkalinePh),
                _ => {}
            }
        }

        let grade = compute_grade(low_count, problems.iter().any(|p| p.is_ph()));
        let improvement_plan =
            build_improvement_plan(&problems, explainability.ph.category);

        SoilAssessment {
            grade,
            problems,
            improvement_plan,
            explainability,
        }
    }

    fn trace(&self, param: Parameter, value: Option<f64>) -> ParamTrace {
        let category = self.thresholds.categorize(param, value);
        let rule = self.thresholds.rule_text(param, category);
        ParamTrace {
            value,
            category,
            rule,
        }
    }
}

/// Grading policy over the Low tally and pH state.
///
/// A lone pH extremity with zero Low nutrients counts as a single flagged
/// problem and grades Fair; it never escalates to Poor on its own.
fn compute_grade(low_count: usize, ph_problem: bool) -> Grade {
    match (low_count, ph_problem) {
        (0, false) => Grade::Good,
        (0, true) => Grade::Fair,
        (1, _) => Grade::Fair,
        _ => Grade::Poor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessor() -> SoilAssessor {
        SoilAssessor::new(ThresholdTable::default())
    }

    fn assess(sample: SoilSample) -> SoilAssessment {
        assessor().assess(&sample, &SampleMetadata::default())
    }

    #[test]
    fn test_grade_matrix() {
        assert_eq!(compute_grade(0, false), Grade::Good);
        assert_eq!(compute_grade(0, true), Grade::Fair);
        assert_eq!(compute_grade(1, false), Grade::Fair);
        assert_eq!(compute_grade(1, true), Grade::Fair);
        assert_eq!(compute_grade(2, false), Grade::Poor);
        assert_eq!(compute_grade(2, true), Grade::Poor);
        assert_eq!(compute_grade(4, false), Grade::Poor);
    }

    #[test]
    fn test_problems_collected_in_walk_order() {
        // Default bands: every nutrient Low, pH acidic
        let result = assess(SoilSample {
            n: Some(10.0),
            p: Some(10.0),
            k: Some(10.0),
            oc: Some(0.1),
            ph: Some(4.5),
        });
        assert_eq!(
            result.problems,
            vec![
                Problem::LowN,
                Problem::LowP,
                Problem::LowK,
                Problem::LowOc,
                Problem::AcidicPh,
            ]
        );
        assert_eq!(result.grade, Grade::Poor);
    }

    #[test]
    fn test_ph_extremity_does_not_add_to_low_tally() {
        // One Low nutrient plus an alkaline pH is still a Fair, not Poor
        let result = assess(SoilSample {
            n: Some(10.0),
            p: Some(100.0),
            k: Some(100.0),
            oc: Some(1.0),
            ph: Some(8.2),
        });
        assert_eq!(result.problems, vec![Problem::LowN, Problem::AlkalinePh]);
        assert_eq!(result.grade, Grade::Fair);
    }

    #[test]
    fn test_high_nutrient_excess_is_not_a_problem() {
        let result = assess(SoilSample {
            n: Some(500.0),
            p: Some(500.0),
            k: Some(500.0),
            oc: Some(5.0),
            ph: Some(6.5),
        });
        assert!(result.problems.is_empty());
        assert_eq!(result.grade, Grade::Good);
        assert_eq!(result.explainability.n.category, Category::High);
    }

    #[test]
    fn test_absent_readings_trace_unknown_with_empty_rule() {
        let result = assess(SoilSample::default());
        for param in Parameter::IN_ORDER {
            let trace = result.explainability.get(param);
            assert_eq!(trace.value, None);
            assert_eq!(trace.category, Category::Unknown);
            assert_eq!(trace.rule, "");
        }
        assert_eq!(result.grade, Grade::Good);
    }

    #[test]
    fn test_assess_is_idempotent() {
        let sample = SoilSample {
            n: Some(120.0),
            p: Some(8.0),
            k: Some(85.0),
            oc: Some(0.45),
            ph: Some(5.8),
        };
        let a = assess(sample);
        let b = assess(sample);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_metadata_does_not_alter_result() {
        let sample = SoilSample {
            n: Some(30.0),
            ..SoilSample::default()
        };
        let plain = assessor().assess(&sample, &SampleMetadata::default());
        let with_meta = assessor().assess(
            &sample,
            &SampleMetadata {
                crop: Some("wheat".to_string()),
                soil_type: Some("clay".to_string()),
                lab_method: Some("olsen".to_string()),
            },
        );
        assert_eq!(plain, with_meta);
    }

    #[test]
    fn test_serialized_contract_shape() {
        let result = assess(SoilSample {
            ph: Some(5.0),
            ..SoilSample::default()
        });
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["grade"], "Fair");
        assert_eq!(json["problems"][0], "Acidic pH");
        assert!(json["improvement_plan"].is_array());
        assert_eq!(json["explainability"]["pH"]["category"], "Acidic");
        assert_eq!(json["explainability"]["N"]["value"], serde_json::Value::Null);
        assert_eq!(json["explainability"]["N"]["rule"], "");
    }
}
