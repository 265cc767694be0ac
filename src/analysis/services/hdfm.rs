//! Hybrid decision-fusion scoring.
//!
//! Fuses four per-finding metrics (CVSS-derived severity, topological
//! criticality, vector exposure, exploitability) into a single score.
//! The metric weights are derived from the Shannon entropy of each
//! metric column across the finding population: a metric whose values
//! are flat across the population carries little discriminative
//! information and receives little weight.

use std::collections::BTreeMap;

use crate::analysis::domain::{Finding, Priority};

/// Metric columns the entropy weighting runs over, in canonical order.
pub const METRIC_COLUMNS: [&str; 4] = ["severity", "tcs", "vei", "exploitability"];

/// Fallback weights used when a metric is absent from the weight map.
const DEFAULT_W_EXPLOITABILITY: f64 = 0.3;
const DEFAULT_W_SEVERITY: f64 = 0.3;
const DEFAULT_W_VEI: f64 = 0.1;
const DEFAULT_W_TCS: f64 = 0.3;

/// Static threshold floors: a quiet population must not promote mild
/// risks into the top bands.
const TAU_CRIT_FLOOR: f64 = 7.0;
const TAU_HIGH_FLOOR: f64 = 4.0;
const TAU_CRIT_STATIC: f64 = 9.0;
const TAU_HIGH_STATIC: f64 = 7.0;

/// Column-wise scratch layout over the four scoring metrics of a
/// finding population.
#[derive(Debug, Default)]
pub struct MetricMatrix {
    severity: Vec<f64>,
    tcs: Vec<f64>,
    vei: Vec<f64>,
    exploitability: Vec<f64>,
}

impl MetricMatrix {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut matrix = Self::default();
        for finding in findings {
            matrix.severity.push(finding.severity);
            matrix.tcs.push(finding.tcs);
            matrix.vei.push(finding.vei);
            matrix.exploitability.push(finding.exploitability);
        }
        matrix
    }

    pub fn len(&self) -> usize {
        self.severity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.severity.is_empty()
    }

    fn column(&self, name: &str) -> &[f64] {
        match name {
            "severity" => &self.severity,
            "tcs" => &self.tcs,
            "vei" => &self.vei,
            "exploitability" => &self.exploitability,
            other => panic!("unknown metric column: {}", other),
        }
    }
}

/// Entropy-derived metric weights plus the population EPSS baseline.
///
/// `epss_baseline` (η) is reserved for contextual rules; the current
/// branching does not consume it but it is computed for every analysis.
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub weights: BTreeMap<String, f64>,
    pub epss_baseline: f64,
}

pub struct HdfmModel;

impl HdfmModel {
    /// Vector Exposure Index from a CVSS v3 vector string.
    ///
    /// First matching attack-vector token wins; an absent or unmatched
    /// vector scores the neutral 0.5.
    pub fn calculate_vei(cvss_vector: &str) -> f64 {
        if cvss_vector.is_empty() {
            return 0.5;
        }

        const VECTOR_MAP: [(&str, f64); 4] = [
            ("AV:N", 0.85),
            ("AV:A", 0.6),
            ("AV:L", 0.3),
            ("AV:P", 0.1),
        ];

        for (token, value) in VECTOR_MAP {
            if cvss_vector.contains(token) {
                return value;
            }
        }

        0.5
    }

    /// Exploitability fusion: `E = 1 - (1 - P_EPSS)(1 - P_KEV)`.
    pub fn exploitability_fusion(epss: f64, kev: bool) -> f64 {
        let p_kev = if kev { 1.0 } else { 0.0 };
        1.0 - (1.0 - epss) * (1.0 - p_kev)
    }

    /// Coarse CVSS synthesis from vector tokens, used only when the
    /// upstream database omits a numeric score. Capped at 10.0.
    pub fn cvss_from_vector(cvss_vector: &str) -> f64 {
        if cvss_vector.is_empty() {
            return 0.0;
        }

        let mut score: f64 = 0.0;
        if cvss_vector.contains("AV:N") {
            score += 3.0;
        } else if cvss_vector.contains("AV:A") {
            score += 2.0;
        } else if cvss_vector.contains("AV:L") {
            score += 1.0;
        }
        if cvss_vector.contains("AC:L") {
            score += 2.0;
        }
        if cvss_vector.contains("PR:N") {
            score += 2.0;
        }
        if cvss_vector.contains("C:H") {
            score += 1.0;
        }
        if cvss_vector.contains("I:H") {
            score += 1.0;
        }
        if cvss_vector.contains("A:H") {
            score += 1.0;
        }
        score.min(10.0)
    }

    /// Shannon-entropy weights over the metric columns.
    ///
    /// Degenerate paths: a population of one (or zero) findings and an
    /// all-zero weight vector both yield the uniform map.
    pub fn calculate_entropy_weights(matrix: &MetricMatrix) -> BTreeMap<String, f64> {
        let m = matrix.len();

        if m <= 1 {
            return Self::uniform_weights();
        }

        let k = 1.0 / (m as f64).ln();
        let mut weights = BTreeMap::new();

        for name in METRIC_COLUMNS {
            let column = matrix.column(name);
            let col_sum: f64 = column.iter().sum();

            if col_sum == 0.0 {
                weights.insert(name.to_string(), 0.0);
                continue;
            }

            let entropy: f64 = -k
                * column
                    .iter()
                    .map(|x| x / col_sum)
                    .filter(|p| *p > 0.0)
                    .map(|p| p * p.ln())
                    .sum::<f64>();

            // A column flat to machine precision carries no information;
            // snap the float noise around H = 1 to an exact zero weight.
            let weight = 1.0 - entropy;
            weights.insert(
                name.to_string(),
                if weight.abs() < 1e-9 { 0.0 } else { weight },
            );
        }

        let total: f64 = weights.values().sum();
        if total == 0.0 {
            return Self::uniform_weights();
        }

        weights.into_iter().map(|(k, v)| (k, v / total)).collect()
    }

    /// Uniform degenerate weight map: 0.25 per metric.
    pub fn uniform_weights() -> BTreeMap<String, f64> {
        METRIC_COLUMNS
            .iter()
            .map(|name| (name.to_string(), 0.25))
            .collect()
    }

    /// η: the median EPSS probability across the finding population;
    /// 0.0 when empty.
    pub fn calculate_epss_median(findings: &[Finding]) -> f64 {
        let mut scores: Vec<f64> = findings.iter().map(|f| f.epss).collect();
        if scores.is_empty() {
            return 0.0;
        }
        scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mid = scores.len() / 2;
        if scores.len() % 2 == 1 {
            scores[mid]
        } else {
            (scores[mid - 1] + scores[mid]) / 2.0
        }
    }

    /// Derives the weights and the η baseline for a finding population.
    pub fn derive_weights(findings: &[Finding]) -> ScoringWeights {
        ScoringWeights {
            weights: Self::calculate_entropy_weights(&MetricMatrix::from_findings(findings)),
            epss_baseline: Self::calculate_epss_median(findings),
        }
    }

    /// Raw fused score for one finding, clipped to 1.0.
    ///
    /// The weighted base is amplified or damped by the first matching
    /// contextual branch:
    /// - critical CVSS on a hub with live exploitability: x1.5
    /// - critical CVSS with network exposure on a relevant node: x1.2
    /// - significant exposure: x1.0
    /// - latent / local risk: x0.5
    pub fn calculate_hdfm_score(finding: &Finding, weights: &BTreeMap<String, f64>) -> f64 {
        let w = |name: &str, fallback: f64| weights.get(name).copied().unwrap_or(fallback);

        let base_score = finding.exploitability * w("exploitability", DEFAULT_W_EXPLOITABILITY)
            + finding.severity * w("severity", DEFAULT_W_SEVERITY)
            + finding.vei * w("vei", DEFAULT_W_VEI)
            + finding.tcs * w("tcs", DEFAULT_W_TCS);

        let multiplier = if finding.cvss_score >= 9.8
            && finding.tcs >= 0.7
            && finding.exploitability >= 0.5
        {
            1.5
        } else if finding.cvss_score >= 9.0 && finding.vei >= 0.85 && finding.tcs >= 0.5 {
            1.2
        } else if finding.vei >= 0.8 && finding.tcs >= 0.4 {
            1.0
        } else {
            0.5
        };

        (base_score * multiplier).min(1.0)
    }

    /// Collapses a scored population to the worst finding per component
    /// name. Ties keep the first-seen finding; the relative first-seen
    /// order of the winners is preserved.
    pub fn collapse_worst_per_component(findings: Vec<Finding>) -> Vec<Finding> {
        let mut winners: Vec<Finding> = Vec::new();
        let mut index_by_component: std::collections::HashMap<String, usize> =
            std::collections::HashMap::new();

        for finding in findings {
            match index_by_component.get(&finding.component_name) {
                Some(&i) => {
                    if finding.hdfm_score > winners[i].hdfm_score {
                        winners[i] = finding;
                    }
                }
                None => {
                    index_by_component.insert(finding.component_name.clone(), winners.len());
                    winners.push(finding);
                }
            }
        }

        winners
    }

    /// Assigns priorities from the score distribution.
    ///
    /// Thresholds are the 90th/70th percentiles of `10 * hdfm_score`
    /// over the nonzero-score sub-population, floored so a quiet
    /// population cannot label mild risks critical; a population with
    /// no risky findings falls back to static thresholds.
    pub fn assign_priorities(findings: &mut [Finding]) {
        let risky_scores: Vec<f64> = findings
            .iter()
            .map(|f| f.hdfm_score * 10.0)
            .filter(|s| *s > 0.0)
            .collect();

        let (tau_crit, tau_high) = if risky_scores.is_empty() {
            (TAU_CRIT_STATIC, TAU_HIGH_STATIC)
        } else {
            let mut sorted = risky_scores;
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            (
                percentile(&sorted, 90.0).max(TAU_CRIT_FLOOR),
                percentile(&sorted, 70.0).max(TAU_HIGH_FLOOR),
            )
        };

        for finding in findings.iter_mut() {
            let x = finding.hdfm_score * 10.0;
            finding.priority = if x <= 0.0 {
                Priority::Low
            } else if x >= tau_crit {
                Priority::Critical
            } else if x >= tau_high {
                Priority::High
            } else {
                Priority::Medium
            };
        }
    }

    /// Sorts findings by fused score, highest first. Equal scores keep
    /// their first-seen order.
    pub fn sort_by_score_desc(findings: &mut [Finding]) {
        findings.sort_by(|a, b| {
            b.hdfm_score
                .partial_cmp(&a.hdfm_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}

/// Percentile with linear interpolation between closest ranks over a
/// pre-sorted slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = (sorted.len() - 1) as f64 * p / 100.0;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
