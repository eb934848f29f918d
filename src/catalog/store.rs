use std::collections::{BTreeSet, HashMap};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Food;

/// In-memory food catalog: the read-only data source for composition.
///
/// Foods are keyed by lowercase name. Category queries match category
/// names case-insensitively.
pub struct FoodCatalog {
    foods: HashMap<String, Food>,
}

impl FoodCatalog {
    /// Build a catalog from a list of foods, deduplicating by lowercase
    /// name (last occurrence wins).
    pub fn new(foods: Vec<Food>) -> Self {
        let mut map = HashMap::new();
        for food in foods {
            map.insert(food.key(), food);
        }
        Self { foods: map }
    }

    /// Get a food by name (case-insensitive).
    pub fn get_food(&self, name: &str) -> Option<&Food> {
        self.foods.get(&name.to_lowercase())
    }

    /// All foods in any of the given categories.
    pub fn foods_in_categories(&self, categories: &[String]) -> Vec<&Food> {
        let wanted: BTreeSet<String> = categories.iter().map(|c| c.to_lowercase()).collect();
        self.foods
            .values()
            .filter(|f| wanted.contains(&f.category.to_lowercase()))
            .collect()
    }

    /// A random sample of up to `k` foods from one category.
    ///
    /// Selection diversity for the composer: repeated calls with a live
    /// RNG return different batches.
    pub fn sample_in_category<R: Rng>(&self, rng: &mut R, category: &str, k: usize) -> Vec<&Food> {
        let category = category.to_lowercase();
        let mut candidates: Vec<&Food> = self
            .foods
            .values()
            .filter(|f| f.category.to_lowercase() == category)
            .collect();

        // Sort before shuffling so the draw is a pure function of the RNG
        // state, independent of HashMap iteration order.
        candidates.sort_by(|a, b| a.name.cmp(&b.name));
        candidates.shuffle(rng);
        candidates.truncate(k);
        candidates
    }

    /// Whether any food exists in the given category.
    pub fn has_category(&self, category: &str) -> bool {
        let category = category.to_lowercase();
        self.foods
            .values()
            .any(|f| f.category.to_lowercase() == category)
    }

    /// Sorted list of distinct category names.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut names = Vec::new();
        for food in self.foods.values() {
            if seen.insert(food.category.to_lowercase()) {
                names.push(food.category.clone());
            }
        }
        names.sort();
        names
    }

    pub fn all_foods(&self) -> Vec<&Food> {
        self.foods.values().collect()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}
