use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::models::Food;

/// Load foods from a JSON file.
///
/// Deduplicates by lowercase name (last occurrence wins).
pub fn load_foods<P: AsRef<Path>>(path: P) -> Result<Vec<Food>> {
    let content = fs::read_to_string(path)?;
    let foods: Vec<Food> = serde_json::from_str(&content)?;

    let mut seen: HashMap<String, Food> = HashMap::new();
    for food in foods {
        seen.insert(food.key(), food);
    }

    Ok(seen.into_values().collect())
}

/// Save foods to a JSON file.
///
/// Deduplicates by lowercase name before saving.
pub fn save_foods<P: AsRef<Path>>(path: P, foods: &[Food]) -> Result<()> {
    let mut seen: HashMap<String, &Food> = HashMap::new();
    for food in foods {
        seen.insert(food.key(), food);
    }

    let mut deduped: Vec<&Food> = seen.into_values().collect();
    deduped.sort_by(|a, b| a.name.cmp(&b.name));
    let json = serde_json::to_string_pretty(&deduped)?;
    fs::write(path, json)?;
    Ok(())
}

/// One row of a nutrient CSV export.
///
/// Empty macro cells deserialize to None, preserving the unknown-vs-zero
/// distinction from the source data.
#[derive(Debug, Deserialize)]
struct CsvFoodRow {
    #[serde(rename = "name")]
    name: String,
    #[serde(rename = "category")]
    category: String,
    #[serde(rename = "carbs_per_100g")]
    carbs: Option<f64>,
    #[serde(rename = "protein_per_100g")]
    protein: Option<f64>,
    #[serde(rename = "fat_per_100g")]
    fat: Option<f64>,
}

/// Import foods from a CSV export with columns
/// `name,category,carbs_per_100g,protein_per_100g,fat_per_100g`.
///
/// Rows with invalid (negative) values are skipped; duplicates collapse
/// by lowercase name, last occurrence winning.
pub fn import_foods_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Food>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut seen: HashMap<String, Food> = HashMap::new();

    for row in reader.deserialize() {
        let row: CsvFoodRow = row?;
        let food = Food {
            name: row.name,
            category: row.category,
            carbs: row.carbs,
            protein: row.protein,
            fat: row.fat,
        };

        if !food.is_valid() {
            continue;
        }

        seen.insert(food.key(), food);
    }

    Ok(seen.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_and_save_roundtrip() {
        let json = r#"[
            {"Name": "Apple", "Category": "Fruits and Fruit Juices", "Carbs": 14.0, "Protein": 0.3, "Fats": 0.2}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let foods = load_foods(file.path()).unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].name, "Apple");
        assert_eq!(foods[0].carbs, Some(14.0));

        let out_file = NamedTempFile::new().unwrap();
        save_foods(out_file.path(), &foods).unwrap();

        let reloaded = load_foods(out_file.path()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].name, "Apple");
    }

    #[test]
    fn test_missing_macros_load_as_unknown() {
        let json = r#"[
            {"Name": "Olive Oil", "Category": "Fats and Oils", "Fats": 100.0}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let foods = load_foods(file.path()).unwrap();
        assert_eq!(foods[0].carbs, None);
        assert_eq!(foods[0].protein, None);
        assert_eq!(foods[0].fat, Some(100.0));
    }

    #[test]
    fn test_deduplication() {
        let json = r#"[
            {"Name": "Apple", "Category": "Fruits and Fruit Juices", "Carbs": 14.0, "Protein": 0.3, "Fats": 0.2},
            {"Name": "apple", "Category": "Fruits and Fruit Juices", "Carbs": 15.0, "Protein": 0.3, "Fats": 0.2}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let foods = load_foods(file.path()).unwrap();
        assert_eq!(foods.len(), 1);
        // Last occurrence wins
        assert_eq!(foods[0].carbs, Some(15.0));
    }

    #[test]
    fn test_csv_import() {
        let csv = "name,category,carbs_per_100g,protein_per_100g,fat_per_100g\n\
                   Chicken Breast,Poultry Products,0.0,31.0,3.6\n\
                   Olive Oil,Fats and Oils,,,100.0\n";

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        let mut foods = import_foods_csv(file.path()).unwrap();
        foods.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(foods.len(), 2);

        assert_eq!(foods[0].name, "Chicken Breast");
        assert_eq!(foods[0].carbs, Some(0.0));

        assert_eq!(foods[1].name, "Olive Oil");
        assert_eq!(foods[1].carbs, None);
        assert_eq!(foods[1].fat, Some(100.0));
    }

    #[test]
    fn test_csv_import_skips_invalid_rows() {
        let csv = "name,category,carbs_per_100g,protein_per_100g,fat_per_100g\n\
                   Bad Row,Test,-5.0,1.0,1.0\n\
                   Good Row,Test,5.0,1.0,1.0\n";

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        let foods = import_foods_csv(file.path()).unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].name, "Good Row");
    }
}
