//! Run the soil assessment engine on a canned sample and print the JSON
//! result. Handy for eyeballing the plan wording and explainability trace.
//!
//! Run with: cargo run --bin assess_sample

use serde_json::json;
use soil_advisor::{SampleMetadata, SoilAssessor, SoilSample, ThresholdTable};

fn main() -> anyhow::Result<()> {
    let assessor = SoilAssessor::new(ThresholdTable::default());

    let payload = json!({
        "N": 120,
        "P": 8,
        "K": 85,
        "pH": 5.8,
        "OC": 0.45,
        "crop": "wheat"
    });

    let sample = SoilSample::from_json(&payload);
    let metadata = SampleMetadata::from_json(&payload);
    let assessment = assessor.assess(&sample, &metadata);

    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}
