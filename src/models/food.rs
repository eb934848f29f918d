use serde::{Deserialize, Serialize};

use crate::models::MacroTarget;

/// Per-100g macronutrient amounts for a food.
///
/// Each field is `None` when the source data has no entry for that
/// nutrient. Unknown is not the same as zero: a verified zero is a
/// legitimate non-contributor, while an unknown value disqualifies the
/// food from gap-filling on that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub carbs: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
}

impl NutrientProfile {
    pub fn new(carbs: Option<f64>, protein: Option<f64>, fat: Option<f64>) -> Self {
        Self {
            carbs,
            protein,
            fat,
        }
    }

    /// Per-gram coefficients [carbs, protein, fat].
    ///
    /// Unknown values contribute zero to the solver; foods with all three
    /// unknown must be filtered out before this is called.
    pub fn coefficients(&self) -> [f64; 3] {
        [
            self.carbs.unwrap_or(0.0) / 100.0,
            self.protein.unwrap_or(0.0) / 100.0,
            self.fat.unwrap_or(0.0) / 100.0,
        ]
    }

    /// Macro amounts contributed by `grams` of this food.
    pub fn amounts_for(&self, grams: f64) -> MacroTarget {
        let multiplier = grams / 100.0;
        MacroTarget::new(
            self.carbs.unwrap_or(0.0) * multiplier,
            self.protein.unwrap_or(0.0) * multiplier,
            self.fat.unwrap_or(0.0) * multiplier,
        )
    }

    pub fn is_fully_unknown(&self) -> bool {
        self.carbs.is_none() && self.protein.is_none() && self.fat.is_none()
    }

    pub fn is_all_zero(&self) -> bool {
        self.carbs.unwrap_or(0.0) == 0.0
            && self.protein.unwrap_or(0.0) == 0.0
            && self.fat.unwrap_or(0.0) == 0.0
    }
}

/// A food item: name, category, and per-100g nutrient data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Category")]
    pub category: String,

    #[serde(rename = "Carbs", default)]
    pub carbs: Option<f64>,

    #[serde(rename = "Protein", default)]
    pub protein: Option<f64>,

    #[serde(rename = "Fats", default)]
    pub fat: Option<f64>,
}

impl Food {
    pub fn profile(&self) -> NutrientProfile {
        NutrientProfile::new(self.carbs, self.protein, self.fat)
    }

    /// Whether this food has data worth optimizing against.
    ///
    /// All three macros must be present unless the food sits in a fats/oils
    /// category, where fat-only data is acceptable (many oil entries carry
    /// no carb or protein rows at all). All-zero profiles are excluded
    /// either way since they cannot move any macro.
    pub fn has_usable_macros(&self) -> bool {
        let profile = self.profile();

        if profile.is_fully_unknown() || profile.is_all_zero() {
            return false;
        }

        if self.is_fat_source() {
            return self.fat.unwrap_or(0.0) > 0.0;
        }

        self.carbs.is_some() && self.protein.is_some() && self.fat.is_some()
    }

    /// Fats/oils categories qualify on fat data alone.
    pub fn is_fat_source(&self) -> bool {
        let category = self.category.to_lowercase();
        category.contains("fat") || category.contains("oil")
    }

    /// Basic validation: present values must be non-negative.
    pub fn is_valid(&self) -> bool {
        self.carbs.unwrap_or(0.0) >= 0.0
            && self.protein.unwrap_or(0.0) >= 0.0
            && self.fat.unwrap_or(0.0) >= 0.0
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl PartialEq for Food {
    fn eq(&self, other: &Self) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

impl Eq for Food {}

impl std::hash::Hash for Food {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.to_lowercase().hash(state);
    }
}
