//! Fiber Impact Reference Table
//!
//! Maps canonical textile fiber names to per-kilogram environmental
//! coefficients: water usage (liters), carbon emissions (kg CO2), a base
//! sustainability score (0-100, higher = more sustainable), biodegradability,
//! and an approximate decomposition time where one is documented.
//!
//! The table is static, process-wide data. Coefficient changes are a data
//! versioning event, not a runtime mutation; after one, stored records are
//! re-scored via the store's `recompute_all`.

use serde::Serialize;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Fiber family grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FiberFamily {
    /// Plant-derived cellulosic fibers (cotton, bast and leaf fibers)
    NaturalCellulosic,
    /// Animal-derived protein fibers (wool, silk)
    Animal,
    /// Petrochemical synthetics (polyester, nylon, acrylic, elastomers)
    Synthetic,
    /// Regenerated cellulosics (viscose process and derivatives)
    Regenerated,
}

impl FiberFamily {
    /// Friendly name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            FiberFamily::NaturalCellulosic => "Natural",
            FiberFamily::Animal => "Animal",
            FiberFamily::Synthetic => "Synthetic",
            FiberFamily::Regenerated => "Regenerated",
        }
    }
}

/// Per-kilogram environmental coefficients for one fiber
#[derive(Debug, Clone, Serialize)]
pub struct FiberImpactProfile {
    pub name: &'static str,
    pub family: FiberFamily,
    /// Liters of water per kg of fiber produced
    pub water_per_kg: f64,
    /// Kg of CO2 per kg of fiber produced
    pub co2_per_kg: f64,
    /// Base sustainability score, 0-100 (higher = more sustainable)
    pub base_score: f64,
    pub biodegradable: bool,
    /// Approximate decomposition time, where documented. Metadata only;
    /// never enters the score arithmetic.
    pub decomposition: Option<&'static str>,
}

// ============================================================================
// EMBEDDED FIBER IMPACT DATA
// ============================================================================

static FIBER_TABLE: &[FiberImpactProfile] = &[
    // Natural cellulosic fibers
    FiberImpactProfile { name: "Cotton", family: FiberFamily::NaturalCellulosic, water_per_kg: 10000.0, co2_per_kg: 1.55, base_score: 60.0, biodegradable: true, decomposition: Some("1-5 months") },
    FiberImpactProfile { name: "Organic Cotton", family: FiberFamily::NaturalCellulosic, water_per_kg: 5000.0, co2_per_kg: 1.0, base_score: 80.0, biodegradable: true, decomposition: Some("1-5 months") },
    FiberImpactProfile { name: "Flax", family: FiberFamily::NaturalCellulosic, water_per_kg: 2500.0, co2_per_kg: 0.66, base_score: 85.0, biodegradable: true, decomposition: None },
    FiberImpactProfile { name: "Linen", family: FiberFamily::NaturalCellulosic, water_per_kg: 2500.0, co2_per_kg: 0.66, base_score: 85.0, biodegradable: true, decomposition: Some("2 weeks") },
    FiberImpactProfile { name: "Jute", family: FiberFamily::NaturalCellulosic, water_per_kg: 2000.0, co2_per_kg: 0.67, base_score: 82.0, biodegradable: true, decomposition: None },
    FiberImpactProfile { name: "Hemp", family: FiberFamily::NaturalCellulosic, water_per_kg: 2500.0, co2_per_kg: 0.70, base_score: 84.0, biodegradable: true, decomposition: Some("2-8 weeks") },
    FiberImpactProfile { name: "Ramie", family: FiberFamily::NaturalCellulosic, water_per_kg: 2800.0, co2_per_kg: 1.77, base_score: 68.0, biodegradable: true, decomposition: None },
    FiberImpactProfile { name: "Kenaf", family: FiberFamily::NaturalCellulosic, water_per_kg: 2200.0, co2_per_kg: 0.60, base_score: 83.0, biodegradable: true, decomposition: None },
    FiberImpactProfile { name: "Sisal", family: FiberFamily::NaturalCellulosic, water_per_kg: 1800.0, co2_per_kg: 0.27, base_score: 88.0, biodegradable: true, decomposition: None },
    FiberImpactProfile { name: "Bamboo", family: FiberFamily::NaturalCellulosic, water_per_kg: 3000.0, co2_per_kg: 3.90, base_score: 55.0, biodegradable: true, decomposition: None },
    FiberImpactProfile { name: "Pineapple Leaf", family: FiberFamily::NaturalCellulosic, water_per_kg: 2000.0, co2_per_kg: 0.78, base_score: 82.0, biodegradable: true, decomposition: None },
    FiberImpactProfile { name: "Banana Leaf", family: FiberFamily::NaturalCellulosic, water_per_kg: 1500.0, co2_per_kg: 0.40, base_score: 86.0, biodegradable: true, decomposition: None },
    FiberImpactProfile { name: "Corn Husk", family: FiberFamily::NaturalCellulosic, water_per_kg: 1800.0, co2_per_kg: 0.74, base_score: 83.0, biodegradable: true, decomposition: None },
    FiberImpactProfile { name: "Soy Protein", family: FiberFamily::NaturalCellulosic, water_per_kg: 1600.0, co2_per_kg: 0.35, base_score: 87.0, biodegradable: true, decomposition: None },
    FiberImpactProfile { name: "Nettle", family: FiberFamily::NaturalCellulosic, water_per_kg: 1900.0, co2_per_kg: 0.40, base_score: 86.0, biodegradable: true, decomposition: None },
    FiberImpactProfile { name: "Bhimal", family: FiberFamily::NaturalCellulosic, water_per_kg: 2100.0, co2_per_kg: 0.82, base_score: 81.0, biodegradable: true, decomposition: None },
    FiberImpactProfile { name: "Sugarcane Bagasse", family: FiberFamily::NaturalCellulosic, water_per_kg: 1700.0, co2_per_kg: 0.68, base_score: 84.0, biodegradable: true, decomposition: None },

    // Animal fibers
    FiberImpactProfile { name: "Wool", family: FiberFamily::Animal, water_per_kg: 125000.0, co2_per_kg: 10.4, base_score: 45.0, biodegradable: true, decomposition: Some("1-5 years") },
    FiberImpactProfile { name: "Silk", family: FiberFamily::Animal, water_per_kg: 3400.0, co2_per_kg: 4.5, base_score: 50.0, biodegradable: true, decomposition: Some("1-4 years") },

    // Synthetic fibers
    FiberImpactProfile { name: "Polyester", family: FiberFamily::Synthetic, water_per_kg: 45.0, co2_per_kg: 9.52, base_score: 30.0, biodegradable: false, decomposition: Some("200+ years") },
    FiberImpactProfile { name: "Nylon", family: FiberFamily::Synthetic, water_per_kg: 250.0, co2_per_kg: 7.6, base_score: 35.0, biodegradable: false, decomposition: Some("30-40 years") },
    FiberImpactProfile { name: "Acrylic", family: FiberFamily::Synthetic, water_per_kg: 132.0, co2_per_kg: 8.5, base_score: 25.0, biodegradable: false, decomposition: None },
    FiberImpactProfile { name: "Spandex", family: FiberFamily::Synthetic, water_per_kg: 120.0, co2_per_kg: 9.0, base_score: 20.0, biodegradable: false, decomposition: None },
    FiberImpactProfile { name: "Elastane", family: FiberFamily::Synthetic, water_per_kg: 120.0, co2_per_kg: 9.0, base_score: 20.0, biodegradable: false, decomposition: None },

    // Regenerated cellulosic fibers
    FiberImpactProfile { name: "Rayon", family: FiberFamily::Regenerated, water_per_kg: 400.0, co2_per_kg: 1.2, base_score: 58.0, biodegradable: true, decomposition: Some("5 weeks - 5 months") },
    FiberImpactProfile { name: "Viscose", family: FiberFamily::Regenerated, water_per_kg: 400.0, co2_per_kg: 1.2, base_score: 58.0, biodegradable: true, decomposition: None },
    FiberImpactProfile { name: "Modal", family: FiberFamily::Regenerated, water_per_kg: 350.0, co2_per_kg: 0.03, base_score: 75.0, biodegradable: true, decomposition: None },
    FiberImpactProfile { name: "Lyocell", family: FiberFamily::Regenerated, water_per_kg: 200.0, co2_per_kg: 0.05, base_score: 80.0, biodegradable: true, decomposition: Some("4-6 weeks") },
    FiberImpactProfile { name: "Tencel", family: FiberFamily::Regenerated, water_per_kg: 200.0, co2_per_kg: 0.05, base_score: 80.0, biodegradable: true, decomposition: Some("4-6 weeks") },
];

/// Lowercased name -> profile index, built once on first lookup
fn name_index() -> &'static FxHashMap<String, &'static FiberImpactProfile> {
    static INDEX: OnceLock<FxHashMap<String, &'static FiberImpactProfile>> = OnceLock::new();
    INDEX.get_or_init(|| {
        FIBER_TABLE
            .iter()
            .map(|p| (p.name.to_lowercase(), p))
            .collect()
    })
}

// ============================================================================
// LOOKUP FUNCTIONS
// ============================================================================

/// Look up a fiber profile by canonical name (case-insensitive).
///
/// Unrecognized names resolve to the Cotton profile; `lookup` never fails.
/// Callers depend on this: label scans routinely produce fiber names the
/// table does not know, and scoring must still proceed.
///
/// # Examples
/// ```
/// use garment_scorer_rust::fibers::lookup;
///
/// assert_eq!(lookup("polyester").name, "Polyester");
/// assert_eq!(lookup("vicuna wool blend #7").name, "Cotton");
/// ```
pub fn lookup(name: &str) -> &'static FiberImpactProfile {
    find(name).unwrap_or_else(fallback)
}

/// Look up a fiber profile by canonical name (case-insensitive), without
/// the Cotton fallback. Used where unknown fibers should be skipped rather
/// than substituted (e.g. alternative suggestions).
pub fn find(name: &str) -> Option<&'static FiberImpactProfile> {
    name_index().get(&name.trim().to_lowercase()).copied()
}

/// The designated fallback profile (Cotton)
pub fn fallback() -> &'static FiberImpactProfile {
    &FIBER_TABLE[0]
}

/// All profiles in table order
pub fn all() -> &'static [FiberImpactProfile] {
    FIBER_TABLE
}

/// All canonical fiber names, sorted alphabetically (picker lists)
pub fn fiber_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = FIBER_TABLE.iter().map(|p| p.name).collect();
    names.sort_unstable();
    names
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert_eq!(FIBER_TABLE.len(), 29);
    }

    /// Every profile carries coefficients inside the documented ranges
    #[test]
    fn test_coefficient_ranges() {
        for profile in all() {
            assert!(
                profile.water_per_kg >= 0.0,
                "{} has negative water coefficient",
                profile.name
            );
            assert!(
                profile.co2_per_kg >= 0.0,
                "{} has negative CO2 coefficient",
                profile.name
            );
            assert!(
                (0.0..=100.0).contains(&profile.base_score),
                "{} base score {} outside 0-100",
                profile.name,
                profile.base_score
            );
        }
    }

    #[test]
    fn test_lookup_case_insensitive() {
        for profile in all() {
            assert_eq!(lookup(&profile.name.to_uppercase()).name, profile.name);
            assert_eq!(lookup(&profile.name.to_lowercase()).name, profile.name);
        }
        assert_eq!(lookup("ORGANIC COTTON").base_score, 80.0);
        assert_eq!(lookup("  linen  ").name, "Linen");
    }

    #[test]
    fn test_unknown_fiber_falls_back_to_cotton() {
        let profile = lookup("totally-unknown-fiber");
        assert_eq!(profile.name, "Cotton");
        assert_eq!(profile.water_per_kg, 10000.0);
        assert_eq!(profile.co2_per_kg, 1.55);
        assert_eq!(profile.base_score, 60.0);
        // Same static row, not a copy
        assert!(std::ptr::eq(profile, fallback()));
    }

    #[test]
    fn test_find_has_no_fallback() {
        assert!(find("Hemp").is_some());
        assert!(find("totally-unknown-fiber").is_none());
    }

    /// Only the petrochemical synthetics are non-biodegradable
    #[test]
    fn test_biodegradability_flags() {
        let non_biodegradable: Vec<&str> = all()
            .iter()
            .filter(|p| !p.biodegradable)
            .map(|p| p.name)
            .collect();
        assert_eq!(
            non_biodegradable,
            vec!["Polyester", "Nylon", "Acrylic", "Spandex", "Elastane"]
        );
        for profile in all().iter().filter(|p| !p.biodegradable) {
            assert_eq!(profile.family, FiberFamily::Synthetic);
        }
    }

    #[test]
    fn test_reference_values() {
        assert_eq!(lookup("Wool").water_per_kg, 125000.0);
        assert_eq!(lookup("Wool").co2_per_kg, 10.4);
        assert_eq!(lookup("Polyester").decomposition, Some("200+ years"));
        assert_eq!(lookup("Wool").decomposition, Some("1-5 years"));
        assert_eq!(lookup("Linen").decomposition, Some("2 weeks"));
        assert_eq!(lookup("Sisal").base_score, 88.0);
        assert_eq!(lookup("Spandex").base_score, 20.0);
        // Tencel is the trade name for lyocell; same coefficients
        assert_eq!(lookup("Tencel").water_per_kg, lookup("Lyocell").water_per_kg);
        assert_eq!(lookup("Tencel").co2_per_kg, lookup("Lyocell").co2_per_kg);
    }

    #[test]
    fn test_fiber_names_sorted_unique() {
        let names = fiber_names();
        assert_eq!(names.len(), 29);
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted, "names should be sorted and unique");
    }

    #[test]
    fn test_family_display_names() {
        assert_eq!(FiberFamily::NaturalCellulosic.display_name(), "Natural");
        assert_eq!(FiberFamily::Synthetic.display_name(), "Synthetic");
        assert_eq!(lookup("Wool").family, FiberFamily::Animal);
        assert_eq!(lookup("Viscose").family, FiberFamily::Regenerated);
    }
}
