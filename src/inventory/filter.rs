//! Client-side filter/search engine.
//!
//! Holds the active filter token and the search text, and recomputes
//! per-row visibility over the in-memory row set. Visibility is the
//! conjunction of two independent predicates: the text match and the
//! filter match. Section counts are a pure function of the visible rows.

use super::{BarItem, ItemKind};

// ============================================================================
// Filter Tokens
// ============================================================================

/// The single active filter.
///
/// `Spirit`/`Modifier` match the row's kind tag; `Term` matches the row's
/// category or subcategory case-insensitively; `All` matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterToken {
    #[default]
    All,
    Spirit,
    Modifier,
    /// Stored lowercased.
    Term(String),
}

impl FilterToken {
    /// Parse a raw token. Anything that is not one of the fixed tokens is a
    /// category/subcategory term.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "all" => Self::All,
            "spirit" => Self::Spirit,
            "modifier" => Self::Modifier,
            term => Self::Term(term.to_string()),
        }
    }

    /// Label for the filter panel and status line.
    pub fn label(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Spirit => "spirits",
            Self::Modifier => "modifiers",
            Self::Term(term) => term,
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Result of a visibility recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Number of visible rows.
    pub visible: usize,
    /// True when a search term is present and nothing matched — the cue to
    /// offer creating a new ingredient.
    pub offer_create: bool,
}

/// Search text + active filter over the row set.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    /// Trimmed, lowercased search text.
    search: String,
    active: FilterToken,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn active(&self) -> &FilterToken {
        &self.active
    }

    /// Set the search text. Stored trimmed and lowercased; matching is
    /// substring, case-insensitive.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.trim().to_lowercase();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Toggle the active filter: selecting the token already active resets
    /// to `All`.
    pub fn toggle_filter(&mut self, token: FilterToken) {
        if self.active == token {
            self.active = FilterToken::All;
        } else {
            self.active = token;
        }
    }

    pub fn reset_filter(&mut self) {
        self.active = FilterToken::All;
    }

    fn matches_text(&self, item: &BarItem) -> bool {
        if self.search.is_empty() {
            return true;
        }
        item.name.to_lowercase().contains(&self.search)
            || item.category.to_lowercase().contains(&self.search)
            || item.sub_category.to_lowercase().contains(&self.search)
    }

    fn matches_filter(&self, item: &BarItem) -> bool {
        match &self.active {
            FilterToken::All => true,
            FilterToken::Spirit => item.kind == ItemKind::Spirit,
            FilterToken::Modifier => item.kind == ItemKind::Modifier,
            FilterToken::Term(term) => {
                item.category.to_lowercase() == *term || item.sub_category.to_lowercase() == *term
            }
        }
    }

    /// Recompute visibility for every row.
    ///
    /// A row is visible iff it matches both the search text and the active
    /// filter; the two predicates never interact.
    pub fn recompute(&self, items: &mut [BarItem]) -> FilterOutcome {
        let mut visible = 0;
        for item in items.iter_mut() {
            item.visible = self.matches_text(item) && self.matches_filter(item);
            if item.visible {
                visible += 1;
            }
        }
        FilterOutcome {
            visible,
            offer_create: !self.search.is_empty() && visible == 0,
        }
    }
}

// ============================================================================
// Section Counts
// ============================================================================

/// Visible-row count for one category section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCount {
    pub category: String,
    pub visible: usize,
}

/// Per-category visible counts, in the order categories are first
/// encountered in the row set. Sections with zero visible rows are included
/// here; rendering hides them.
pub fn section_counts(items: &[BarItem]) -> Vec<SectionCount> {
    let mut counts: Vec<SectionCount> = Vec::new();
    for item in items {
        let key = item.category.to_lowercase();
        match counts
            .iter_mut()
            .find(|c| c.category.to_lowercase() == key)
        {
            Some(count) => {
                if item.visible {
                    count.visible += 1;
                }
            }
            None => counts.push(SectionCount {
                category: item.category.clone(),
                visible: usize::from(item.visible),
            }),
        }
    }
    counts
}

/// Count label for a section header: "1 item", "3 items".
pub fn count_label(n: usize) -> String {
    if n == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{BarItem, ItemKind};
    use proptest::prelude::*;

    fn item(name: &str, category: &str, sub: &str, kind: ItemKind) -> BarItem {
        BarItem {
            name: name.to_string(),
            category: category.to_string(),
            sub_category: sub.to_string(),
            kind,
            visible: true,
        }
    }

    fn sample_rows() -> Vec<BarItem> {
        vec![
            item("Gin", "Gin", "London Dry", ItemKind::Spirit),
            item("Tonic", "Mixer", "", ItemKind::Modifier),
        ]
    }

    #[test]
    fn test_search_gin_matches_only_gin() {
        let mut rows = sample_rows();
        let mut engine = FilterEngine::new();
        engine.set_search("gin");

        let outcome = engine.recompute(&mut rows);
        assert_eq!(outcome.visible, 1);
        assert!(rows[0].visible);
        assert!(!rows[1].visible);
        assert!(!outcome.offer_create);
    }

    #[test]
    fn test_spirit_filter_section_count() {
        let mut rows = sample_rows();
        let mut engine = FilterEngine::new();
        engine.toggle_filter(FilterToken::Spirit);

        let outcome = engine.recompute(&mut rows);
        assert_eq!(outcome.visible, 1);

        let counts = section_counts(&rows);
        assert_eq!(counts[0].category, "Gin");
        assert_eq!(counts[0].visible, 1);
        assert_eq!(counts[1].visible, 0);
    }

    #[test]
    fn test_term_filter_matches_category_or_subcategory() {
        let mut rows = vec![
            item("Beefeater", "Gin", "London Dry", ItemKind::Spirit),
            item("Hayman's", "Gin", "Old Tom", ItemKind::Spirit),
            item("Tonic", "Mixer", "", ItemKind::Modifier),
        ];
        let mut engine = FilterEngine::new();

        engine.toggle_filter(FilterToken::parse("London Dry"));
        assert_eq!(engine.recompute(&mut rows).visible, 1);
        assert!(rows[0].visible);

        engine.toggle_filter(FilterToken::parse("London Dry")); // back to all
        engine.toggle_filter(FilterToken::parse("GIN"));
        assert_eq!(engine.recompute(&mut rows).visible, 2);
    }

    #[test]
    fn test_toggle_same_token_twice_restores_all() {
        let mut rows = sample_rows();
        let mut engine = FilterEngine::new();

        engine.toggle_filter(FilterToken::Spirit);
        engine.recompute(&mut rows);
        assert!(!rows[1].visible);

        engine.toggle_filter(FilterToken::Spirit);
        assert_eq!(*engine.active(), FilterToken::All);
        let outcome = engine.recompute(&mut rows);
        assert_eq!(outcome.visible, rows.len());
    }

    #[test]
    fn test_offer_create_only_with_search() {
        let mut rows = sample_rows();
        let mut engine = FilterEngine::new();

        engine.set_search("yuzu liqueur");
        assert!(engine.recompute(&mut rows).offer_create);

        // No search term: an empty visible set is not an offer cue
        engine.clear_search();
        engine.toggle_filter(FilterToken::Term("absinthe".to_string()));
        let outcome = engine.recompute(&mut rows);
        assert_eq!(outcome.visible, 0);
        assert!(!outcome.offer_create);
    }

    #[test]
    fn test_search_matches_subcategory() {
        let mut rows = sample_rows();
        let mut engine = FilterEngine::new();
        engine.set_search("london");
        assert_eq!(engine.recompute(&mut rows).visible, 1);
    }

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(0), "0 items");
        assert_eq!(count_label(1), "1 item");
        assert_eq!(count_label(2), "2 items");
    }

    #[test]
    fn test_section_counts_preserve_encounter_order() {
        let rows = vec![
            item("Tonic", "Mixer", "", ItemKind::Modifier),
            item("Gin", "Gin", "", ItemKind::Spirit),
            item("Soda", "Mixer", "", ItemKind::Modifier),
        ];
        let counts = section_counts(&rows);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].category, "Mixer");
        assert_eq!(counts[0].visible, 2);
        assert_eq!(counts[1].category, "Gin");
    }

    // Strategy for a small arbitrary row set.
    fn arb_rows() -> impl Strategy<Value = Vec<BarItem>> {
        proptest::collection::vec(
            (
                "[a-zA-Z ]{0,10}",
                "[a-zA-Z]{0,8}",
                "[a-zA-Z ]{0,8}",
                prop_oneof![
                    Just(ItemKind::Spirit),
                    Just(ItemKind::Modifier),
                    Just(ItemKind::Other)
                ],
            )
                .prop_map(|(name, category, sub, kind)| BarItem {
                    name,
                    category,
                    sub_category: sub,
                    kind,
                    visible: false,
                }),
            0..12,
        )
    }

    proptest! {
        /// Visibility is exactly the conjunction of the two predicates.
        #[test]
        fn prop_visibility_is_conjunction(
            mut rows in arb_rows(),
            search in "[a-zA-Z]{0,6}",
            spirit_filter in proptest::bool::ANY,
        ) {
            let mut engine = FilterEngine::new();
            engine.set_search(&search);
            if spirit_filter {
                engine.toggle_filter(FilterToken::Spirit);
            }
            engine.recompute(&mut rows);

            let needle = search.trim().to_lowercase();
            for row in &rows {
                let text_ok = needle.is_empty()
                    || row.name.to_lowercase().contains(&needle)
                    || row.category.to_lowercase().contains(&needle)
                    || row.sub_category.to_lowercase().contains(&needle);
                let filter_ok = !spirit_filter || row.kind == ItemKind::Spirit;
                prop_assert_eq!(row.visible, text_ok && filter_ok);
            }
        }

        /// Toggling the same token twice restores full visibility modulo
        /// search, and changing the filter never perturbs the text
        /// predicate.
        #[test]
        fn prop_toggle_twice_is_identity(
            mut rows in arb_rows(),
            search in "[a-zA-Z]{0,6}",
        ) {
            let mut engine = FilterEngine::new();
            engine.set_search(&search);
            engine.recompute(&mut rows);
            let baseline: Vec<bool> = rows.iter().map(|r| r.visible).collect();

            engine.toggle_filter(FilterToken::Modifier);
            engine.recompute(&mut rows);
            engine.toggle_filter(FilterToken::Modifier);
            engine.recompute(&mut rows);

            let restored: Vec<bool> = rows.iter().map(|r| r.visible).collect();
            prop_assert_eq!(baseline, restored);
        }
    }
}
