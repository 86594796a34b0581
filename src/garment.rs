//! Garment Type Weight Defaults
//!
//! Clothing categories with typical garment weights in grams. The scan
//! write path resolves the estimated weight from the item type label before
//! scoring; unrecognized labels fall back to the generic 300g garment.

use serde::Serialize;

/// Broad clothing category grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GarmentCategory {
    Tops,
    Bottoms,
    Outerwear,
    Dresses,
    Undergarments,
    Accessories,
    General,
}

impl GarmentCategory {
    /// Friendly name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            GarmentCategory::Tops => "Tops",
            GarmentCategory::Bottoms => "Bottoms",
            GarmentCategory::Outerwear => "Outerwear",
            GarmentCategory::Dresses => "Dresses",
            GarmentCategory::Undergarments => "Undergarments",
            GarmentCategory::Accessories => "Accessories",
            GarmentCategory::General => "General",
        }
    }
}

/// One garment type with its estimated weight
#[derive(Debug, Clone, Serialize)]
pub struct GarmentType {
    pub name: &'static str,
    pub weight_grams: u32,
    pub category: GarmentCategory,
}

/// Weight used when the item type label is not recognized
pub const DEFAULT_WEIGHT_GRAMS: u32 = 300;

static GARMENT_TYPES: &[GarmentType] = &[
    GarmentType { name: "Shirt", weight_grams: 200, category: GarmentCategory::Tops },
    GarmentType { name: "T-Shirt", weight_grams: 150, category: GarmentCategory::Tops },
    GarmentType { name: "Blouse", weight_grams: 180, category: GarmentCategory::Tops },
    GarmentType { name: "Sweater", weight_grams: 400, category: GarmentCategory::Tops },
    GarmentType { name: "Hoodie", weight_grams: 500, category: GarmentCategory::Tops },
    GarmentType { name: "Jacket", weight_grams: 600, category: GarmentCategory::Outerwear },
    GarmentType { name: "Coat", weight_grams: 800, category: GarmentCategory::Outerwear },
    GarmentType { name: "Jeans", weight_grams: 600, category: GarmentCategory::Bottoms },
    GarmentType { name: "Pants", weight_grams: 400, category: GarmentCategory::Bottoms },
    GarmentType { name: "Shorts", weight_grams: 250, category: GarmentCategory::Bottoms },
    GarmentType { name: "Skirt", weight_grams: 300, category: GarmentCategory::Bottoms },
    GarmentType { name: "Dress", weight_grams: 350, category: GarmentCategory::Dresses },
    GarmentType { name: "Underwear", weight_grams: 50, category: GarmentCategory::Undergarments },
    GarmentType { name: "Socks", weight_grams: 40, category: GarmentCategory::Undergarments },
    GarmentType { name: "Scarf", weight_grams: 100, category: GarmentCategory::Accessories },
    GarmentType { name: "Garment", weight_grams: 300, category: GarmentCategory::General },
];

/// Find a garment type by name (case-insensitive)
pub fn find(name: &str) -> Option<&'static GarmentType> {
    let name = name.trim();
    GARMENT_TYPES.iter().find(|g| g.name.eq_ignore_ascii_case(name))
}

/// Estimated weight in grams for an item type label.
///
/// Unrecognized labels fall back to [`DEFAULT_WEIGHT_GRAMS`].
pub fn estimated_weight_grams(name: &str) -> u32 {
    find(name).map(|g| g.weight_grams).unwrap_or(DEFAULT_WEIGHT_GRAMS)
}

/// All garment types in table order
pub fn all() -> &'static [GarmentType] {
    GARMENT_TYPES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_weights() {
        assert_eq!(estimated_weight_grams("T-Shirt"), 150);
        assert_eq!(estimated_weight_grams("Jeans"), 600);
        assert_eq!(estimated_weight_grams("Coat"), 800);
        assert_eq!(estimated_weight_grams("Socks"), 40);
        assert_eq!(estimated_weight_grams("Garment"), 300);
    }

    #[test]
    fn test_lookup_case_insensitive() {
        assert_eq!(estimated_weight_grams("t-shirt"), 150);
        assert_eq!(estimated_weight_grams("HOODIE"), 500);
        assert_eq!(estimated_weight_grams("  dress "), 350);
    }

    #[test]
    fn test_unknown_type_falls_back() {
        assert_eq!(estimated_weight_grams("Kimono"), DEFAULT_WEIGHT_GRAMS);
        assert_eq!(estimated_weight_grams(""), DEFAULT_WEIGHT_GRAMS);
        assert!(find("Kimono").is_none());
    }

    #[test]
    fn test_table_integrity() {
        assert_eq!(all().len(), 16);
        for garment in all() {
            assert!(garment.weight_grams > 0, "{} has zero weight", garment.name);
        }
        // Names are unique ignoring case
        for (i, a) in all().iter().enumerate() {
            for b in &all()[i + 1..] {
                assert!(
                    !a.name.eq_ignore_ascii_case(b.name),
                    "duplicate garment type {}",
                    a.name
                );
            }
        }
    }

    #[test]
    fn test_categories() {
        assert_eq!(find("Jacket").unwrap().category, GarmentCategory::Outerwear);
        assert_eq!(find("Skirt").unwrap().category, GarmentCategory::Bottoms);
        assert_eq!(GarmentCategory::Undergarments.display_name(), "Undergarments");
    }
}
