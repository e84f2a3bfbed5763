//! Improvement Plan Generation
//!
//! Builds the ordered remediation plan from the collected problems. Rules
//! are combination-aware: a simultaneous phosphorus and organic-carbon
//! deficiency gets one combined prescription instead of the two standalone
//! lines, and the phosphorus wording is conditioned on the pH band because
//! pH governs P availability. Recommendations are conservative and general;
//! swap in local extension tables where available.

use super::category::Category;
use super::engine::Problem;

/// Build the prioritized, de-duplicated improvement plan.
///
/// Rule order is fixed: the P+OC combination first, then the standalone
/// phosphorus wording, nitrogen, potassium, standalone organic carbon, pH
/// correction, and finally the maintenance fallback when nothing else fired.
pub fn build_improvement_plan(problems: &[Problem], ph_category: Category) -> Vec<String> {
    let mut plan: Vec<String> = Vec::new();

    let low_p = problems.contains(&Problem::LowP);
    let low_oc = problems.contains(&Problem::LowOc);

    // Combined P + OC deficiency supersedes both standalone lines
    if low_p && low_oc {
        plan.push(
            "Apply 20 kg P/ha as single super phosphate (SSP) at sowing to correct phosphorus."
                .to_string(),
        );
        plan.push(
            "Add 2 t/ha farmyard manure or compost before planting to raise organic carbon \
             and improve P availability."
                .to_string(),
        );
    } else if low_p {
        match ph_category {
            Category::Acidic => plan.push(
                "Apply 20 kg P/ha as SSP at sowing and consider band application; acidic \
                 soils reduce P availability."
                    .to_string(),
            ),
            Category::Alkaline => plan.push(
                "Apply 20 kg P/ha as SSP or DAP with banding; consider long-term acidifying \
                 practices if needed."
                    .to_string(),
            ),
            _ => plan.push(
                "Apply 20 kg P/ha as single super phosphate at sowing (banding recommended)."
                    .to_string(),
            ),
        }
    }

    if problems.contains(&Problem::LowN) {
        plan.push(
            "Apply nitrogen in split doses (e.g., 50% at sowing, 50% at vegetative stage) \
             using recommended N sources (urea/other)."
                .to_string(),
        );
    }

    if problems.contains(&Problem::LowK) {
        plan.push(
            "Apply potassium (e.g., muriate of potash) according to crop needs; split \
             application recommended for some crops."
                .to_string(),
        );
    }

    // Standalone OC line only when the combined rule did not fire
    if low_oc && !low_p {
        plan.push(
            "Apply 2–5 t/ha farmyard manure or compost annually and use cover crops/green \
             manures to build organic carbon."
                .to_string(),
        );
    }

    if ph_category == Category::Acidic {
        plan.push(
            "Soil is acidic — apply lime based on a buffer pH test; small initial liming \
             improves P availability."
                .to_string(),
        );
    }
    if ph_category == Category::Alkaline {
        plan.push(
            "Soil is alkaline — consider gypsum and organic matter to improve structure and \
             nutrient availability."
                .to_string(),
        );
    }

    if plan.is_empty() {
        plan.push(
            "Soil appears adequate — maintain balanced fertilization and organic matter \
             management."
                .to_string(),
        );
    }

    dedupe_preserving_order(plan)
}

/// Drop exact duplicates, keeping the first occurrence.
fn dedupe_preserving_order(plan: Vec<String>) -> Vec<String> {
    let mut deduped: Vec<String> = Vec::with_capacity(plan.len());
    for entry in plan {
        if !deduped.contains(&entry) {
            deduped.push(entry);
        }
    }
    deduped
}
