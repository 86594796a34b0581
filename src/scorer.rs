//! Impact Scorer - canonical environmental impact calculation
//!
//! Turns a garment's fiber composition and weight into a sustainability
//! score, a letter grade, and absolute water/carbon totals. This module is
//! the single source of truth for the formula; both the scan write path and
//! any read-path recomputation call into it.
//!
//! All functions here are pure, synchronous and total: no input produces an
//! error. Unknown fibers resolve through the reference table fallback and
//! malformed percentages compute as supplied.

use crate::fibers::{self, FiberImpactProfile};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One component of a garment's fiber composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiberEntry {
    /// Fiber name, matched case-insensitively against the reference table
    pub name: String,
    /// Share of total garment mass by weight, nominally 0-100.
    /// Missing values deserialize to 0 and contribute nothing.
    #[serde(default)]
    pub percentage: f64,
}

impl FiberEntry {
    pub fn new(name: impl Into<String>, percentage: f64) -> Self {
        Self {
            name: name.into(),
            percentage,
        }
    }
}

/// Letter grade bucket derived from the sustainability score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a sustainability score to its letter grade.
///
/// Thresholds (first match wins): >=80 A, >=65 B, >=50 C, >=35 D, else F.
pub fn score_to_grade(score: i32) -> Grade {
    if score >= 80 {
        Grade::A
    } else if score >= 65 {
        Grade::B
    } else if score >= 50 {
        Grade::C
    } else if score >= 35 {
        Grade::D
    } else {
        Grade::F
    }
}

/// Result of one impact calculation.
///
/// Created fresh per call and never mutated; the serde field names are the
/// persisted column names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub score: i32,
    pub grade: Grade,
    pub water_usage_liters: f64,
    pub carbon_footprint_kg: f64,
}

/// Tolerance on the percentage sum before score renormalization kicks in
const PERCENT_SUM_TOLERANCE: f64 = 0.1;

/// Neutral default for a garment with no composition data
const NEUTRAL_SCORE: i32 = 50;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calculate the environmental impact of a fiber composition.
///
/// # Arguments
/// * `fibers` - Fiber composition (name + mass percentage per entry)
/// * `weight_grams` - Garment weight in grams
///
/// # Algorithm
/// Each fiber contributes `coefficient * weight_kg * percentage/100` to the
/// water and carbon totals and `base_score * percentage/100` to the weighted
/// score. When the percentages do not sum to 100 (beyond a 0.1 tolerance)
/// the *score* is rescaled to a composition normalized to 100%; the water
/// and carbon totals are not rescaled, since they are physical quantities
/// tied to the literal mass fractions supplied. Percentages outside [0,100]
/// are not clamped and propagate into the arithmetic.
///
/// An empty composition returns the neutral default: score 50, grade C,
/// zero totals. Absence of data is treated as "unknown", not zero impact.
///
/// # Examples
/// ```
/// use garment_scorer_rust::scorer::{calculate_impact, FiberEntry, Grade};
///
/// let fibers = vec![FiberEntry::new("Cotton", 100.0)];
/// let impact = calculate_impact(&fibers, 1000.0);
/// assert_eq!(impact.score, 60);
/// assert_eq!(impact.grade, Grade::C);
/// assert_eq!(impact.water_usage_liters, 10000.0);
/// ```
pub fn calculate_impact(fibers: &[FiberEntry], weight_grams: f64) -> ImpactResult {
    if fibers.is_empty() {
        return ImpactResult {
            score: NEUTRAL_SCORE,
            grade: score_to_grade(NEUTRAL_SCORE),
            water_usage_liters: 0.0,
            carbon_footprint_kg: 0.0,
        };
    }

    let weight_kg = weight_grams / 1000.0;

    let mut total_water = 0.0;
    let mut total_carbon = 0.0;
    let mut weighted_score = 0.0;
    let mut total_pct = 0.0;

    for fiber in fibers {
        let profile = fibers::lookup(&fiber.name);
        let fraction = fiber.percentage / 100.0;

        total_water += profile.water_per_kg * weight_kg * fraction;
        total_carbon += profile.co2_per_kg * weight_kg * fraction;
        weighted_score += profile.base_score * fraction;
        total_pct += fiber.percentage;
    }

    // Score reflects a composition normalized to 100%; absolute totals stay
    // proportional to the literal percentages supplied.
    if total_pct > 0.0 && (total_pct - 100.0).abs() > PERCENT_SUM_TOLERANCE {
        weighted_score = weighted_score * 100.0 / total_pct;
    }

    let score = weighted_score.round() as i32;

    ImpactResult {
        score,
        grade: score_to_grade(score),
        water_usage_liters: round2(total_water),
        carbon_footprint_kg: round2(total_carbon),
    }
}

/// Score many compositions in parallel.
///
/// Scoring is pure, so items can be chunked across the Rayon pool with no
/// coordination; output order matches input order.
pub fn calculate_impact_batch(items: &[(Vec<FiberEntry>, f64)]) -> Vec<ImpactResult> {
    items
        .par_iter()
        .map(|(fibers, weight_grams)| calculate_impact(fibers, *weight_grams))
        .collect()
}

/// Per-fiber share of a garment's totals, for breakdown views
#[derive(Debug, Clone, Serialize)]
pub struct FiberContribution {
    pub water_liters: f64,
    pub carbon_kg: f64,
    pub profile: &'static FiberImpactProfile,
}

/// Compute one fiber's contribution to a garment's water and carbon totals.
///
/// Pure lookup + scaling: no aggregation and no rounding, display formatting
/// is owned by the caller. Unknown fibers resolve through the table fallback.
pub fn fiber_contribution(name: &str, percentage: f64, weight_grams: f64) -> FiberContribution {
    let profile = fibers::lookup(name);
    let weight_kg = weight_grams / 1000.0;
    let fraction = percentage / 100.0;

    FiberContribution {
        water_liters: profile.water_per_kg * weight_kg * fraction,
        carbon_kg: profile.co2_per_kg * weight_kg * fraction,
        profile,
    }
}

/// Suggest more sustainable substitutions for low-scoring fibers.
///
/// Fibers not present in the reference table are skipped (no fallback here:
/// a suggestion for a fiber we cannot identify would be noise). Purely
/// advisory, deduplicated, insertion order preserved.
pub fn suggest_alternatives(fibers: &[FiberEntry]) -> Vec<&'static str> {
    let mut suggestions: Vec<&'static str> = Vec::new();

    for fiber in fibers {
        let Some(profile) = fibers::find(&fiber.name) else {
            continue;
        };
        if profile.base_score >= 70.0 {
            continue;
        }

        let suggestion = if profile.name == "Cotton" {
            Some("Organic Cotton")
        } else if profile.name == "Polyester" {
            Some("Recycled Polyester")
        } else if fiber.name.to_lowercase().contains("polyester") {
            Some("Hemp or Linen")
        } else {
            None
        };

        if let Some(s) = suggestion {
            if !suggestions.contains(&s) {
                suggestions.push(s);
            }
        }
    }

    suggestions
}

// ============================================================================
// TESTS
// ============================================================================
