//! Category → subcategories index.
//!
//! Seeded from the server snapshot once per load and grown client-side as
//! ingredients are created; entries are never removed between snapshots.
//! Keys are matched case-insensitively while the original display casing of
//! the first sighting is preserved.

use std::collections::HashMap;

/// The known subcategories and canonical casing for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    /// Display casing from the first time this category was seen.
    pub name: String,
    subs: Vec<String>,
}

impl CategoryEntry {
    /// Subcategories in insertion order.
    pub fn subcategories(&self) -> &[String] {
        &self.subs
    }

    /// Case-insensitive lookup of a subcategory, returning its canonical
    /// casing.
    pub fn canonical_sub(&self, sub: &str) -> Option<&str> {
        let needle = sub.to_lowercase();
        self.subs
            .iter()
            .find(|s| s.to_lowercase() == needle)
            .map(String::as_str)
    }
}

/// In-memory index from category name to its known subcategories.
#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    /// Lowercased category name → entry.
    entries: HashMap<String, CategoryEntry>,
    /// Lowercased keys in insertion order, for a stable category listing.
    order: Vec<String>,
}

impl CategoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the catalog from snapshot seed data.
    ///
    /// Seed keys are sorted lexicographically so the category listing is
    /// deterministic regardless of JSON object order. Subcategory values
    /// are trimmed, empties dropped, and case-insensitive duplicates
    /// collapsed to their first spelling.
    pub fn from_seed(seed: &HashMap<String, Vec<String>>) -> Self {
        let mut catalog = Self::new();
        let mut names: Vec<&String> = seed.keys().collect();
        names.sort();
        for name in names {
            catalog.merge(name, "");
            if let Some(subs) = seed.get(name) {
                for sub in subs {
                    catalog.merge(name, sub);
                }
            }
        }
        catalog
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, category: &str) -> Option<&CategoryEntry> {
        self.entries.get(&category.trim().to_lowercase())
    }

    /// Merge a (category, subcategory) sighting into the index.
    ///
    /// An unseen category creates an entry with a single subcategory (or
    /// none if the subcategory is empty). A seen category appends the
    /// subcategory only if it is not already present case-insensitively.
    /// Insertion order and the category's original display casing are
    /// preserved; calling twice with the same arguments is a no-op the
    /// second time.
    pub fn merge(&mut self, category: &str, sub_category: &str) {
        let category = category.trim();
        if category.is_empty() {
            return;
        }
        let sub_category = sub_category.trim();
        let key = category.to_lowercase();

        match self.entries.get_mut(&key) {
            None => {
                let subs = if sub_category.is_empty() {
                    Vec::new()
                } else {
                    vec![sub_category.to_string()]
                };
                self.entries.insert(
                    key.clone(),
                    CategoryEntry {
                        name: category.to_string(),
                        subs,
                    },
                );
                self.order.push(key);
            }
            Some(entry) => {
                if !sub_category.is_empty() && entry.canonical_sub(sub_category).is_none() {
                    entry.subs.push(sub_category.to_string());
                }
            }
        }
    }

    /// Subcategory options for a category; empty if unseen or none known.
    pub fn options_for(&self, category: &str) -> &[String] {
        self.lookup(category)
            .map(CategoryEntry::subcategories)
            .unwrap_or_default()
    }

    /// Category display names in insertion order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key))
            .map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_creates_entry_with_casing() {
        let mut catalog = CategoryCatalog::new();
        catalog.merge("Liqueur", "Amaro");

        let entry = catalog.lookup("liqueur").unwrap();
        assert_eq!(entry.name, "Liqueur");
        assert_eq!(entry.subcategories(), ["Amaro"]);
    }

    #[test]
    fn test_merge_without_subcategory() {
        let mut catalog = CategoryCatalog::new();
        catalog.merge("Liqueur", "");

        let entry = catalog.lookup("Liqueur").unwrap();
        assert!(entry.subcategories().is_empty());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut catalog = CategoryCatalog::new();
        catalog.merge("Gin", "London Dry");
        let once = catalog.lookup("gin").cloned();

        catalog.merge("Gin", "London Dry");
        assert_eq!(catalog.lookup("gin").cloned(), once);
    }

    #[test]
    fn test_merge_dedups_case_insensitively() {
        let mut catalog = CategoryCatalog::new();
        catalog.merge("Gin", "London Dry");
        catalog.merge("GIN", "london dry");
        catalog.merge("gin", "Old Tom");

        let entry = catalog.lookup("Gin").unwrap();
        assert_eq!(entry.name, "Gin"); // first sighting wins
        assert_eq!(entry.subcategories(), ["London Dry", "Old Tom"]);
    }

    #[test]
    fn test_merge_empty_category_is_noop() {
        let mut catalog = CategoryCatalog::new();
        catalog.merge("", "Something");
        catalog.merge("   ", "Something");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_options_for_unknown_is_empty() {
        let catalog = CategoryCatalog::new();
        assert!(catalog.options_for("Vermouth").is_empty());
    }

    #[test]
    fn test_from_seed_sorts_and_dedups() {
        let mut seed = HashMap::new();
        seed.insert(
            "Whiskey".to_string(),
            vec![
                "Bourbon".to_string(),
                " Rye ".to_string(),
                "bourbon".to_string(),
                "".to_string(),
            ],
        );
        seed.insert("Gin".to_string(), vec!["London Dry".to_string()]);

        let catalog = CategoryCatalog::from_seed(&seed);
        let names: Vec<&str> = catalog.categories().collect();
        assert_eq!(names, vec!["Gin", "Whiskey"]);
        assert_eq!(catalog.options_for("whiskey"), ["Bourbon", "Rye"]);
    }

    #[test]
    fn test_canonical_sub_returns_original_casing() {
        let mut catalog = CategoryCatalog::new();
        catalog.merge("Gin", "London Dry");
        let entry = catalog.lookup("gin").unwrap();
        assert_eq!(entry.canonical_sub("LONDON DRY"), Some("London Dry"));
        assert_eq!(entry.canonical_sub("Navy"), None);
    }

    #[test]
    fn test_categories_insertion_order() {
        let mut catalog = CategoryCatalog::new();
        catalog.merge("Rum", "");
        catalog.merge("Amaro", "");
        catalog.merge("Vodka", "");
        let names: Vec<&str> = catalog.categories().collect();
        assert_eq!(names, vec!["Rum", "Amaro", "Vodka"]);
    }
}
