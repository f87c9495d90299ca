//! Inventory domain logic.
//!
//! Everything here is synchronous and in-memory: the bar rows loaded from
//! the server snapshot, the filter/search engine that recomputes their
//! visibility, the category → subcategories catalog, the master-list
//! type-ahead, and the new-ingredient validation pipeline.
//!
//! # Module Structure
//!
//! - `catalog` - category → subcategories index
//! - `filter` - search/filter engine and section counts
//! - `lookup` - master-list type-ahead and duplicate detection
//! - `submit` - new-ingredient validation

pub mod catalog;
pub mod filter;
pub mod lookup;
pub mod submit;

pub use catalog::{CategoryCatalog, CategoryEntry};
pub use filter::{section_counts, FilterEngine, FilterOutcome, FilterToken, SectionCount};
pub use lookup::{find_existing, suggestions};
pub use submit::{prepare_new_ingredient, NewIngredientOutcome, RejectedField};

use crate::api::SnapshotItem;
use crate::util::sanitize_text;

// ============================================================================
// Bar Items
// ============================================================================

/// Kind tag the server assigns each bar item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Spirit,
    Modifier,
    Other,
}

impl ItemKind {
    /// Parse the server's `type` tag. Unknown tags are "other".
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "spirit" => Self::Spirit,
            "modifier" => Self::Modifier,
            _ => Self::Other,
        }
    }

    /// Short label for row rendering. Untagged items render nothing.
    pub fn label(self) -> &'static str {
        match self {
            Self::Spirit => "spirit",
            Self::Modifier => "modifier",
            Self::Other => "",
        }
    }
}

/// One bar row.
///
/// Fields other than `visible` are fixed once built from a snapshot; the
/// whole set is replaced when the snapshot reloads. `visible` is derived
/// state owned by the filter engine's `recompute`.
#[derive(Debug, Clone)]
pub struct BarItem {
    pub name: String,
    pub category: String,
    /// Empty string when the item has no subcategory.
    pub sub_category: String,
    pub kind: ItemKind,
    pub visible: bool,
}

impl BarItem {
    /// Build a row from a snapshot item, sanitizing server text for
    /// terminal display.
    pub fn from_snapshot(item: SnapshotItem) -> Self {
        Self {
            name: sanitize_text(&item.name).into_owned(),
            category: sanitize_text(&item.category).into_owned(),
            sub_category: sanitize_text(item.sub_category.as_deref().unwrap_or_default())
                .into_owned(),
            kind: ItemKind::from_tag(&item.kind),
            visible: true,
        }
    }
}

// ============================================================================
// Sorting
// ============================================================================

/// Sortable row columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Category,
    SubCategory,
}

impl SortColumn {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Category => "category",
            Self::SubCategory => "subcategory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Current sort: column plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortState {
    /// Selecting the column already in effect flips its direction; any
    /// other column starts ascending.
    pub fn toggle(current: Option<SortState>, column: SortColumn) -> SortState {
        match current {
            Some(state) if state.column == column => SortState {
                column,
                direction: match state.direction {
                    SortDirection::Ascending => SortDirection::Descending,
                    SortDirection::Descending => SortDirection::Ascending,
                },
            },
            _ => SortState {
                column,
                direction: SortDirection::Ascending,
            },
        }
    }
}

/// Stable, case-insensitive sort of the row set.
///
/// Stability keeps the relative order of equal keys, so grouping rows into
/// category sections is unaffected by sorting on any column.
pub fn apply_sort(items: &mut [BarItem], sort: &SortState) {
    let key = |item: &BarItem| -> String {
        match sort.column {
            SortColumn::Name => item.name.to_lowercase(),
            SortColumn::Category => item.category.to_lowercase(),
            SortColumn::SubCategory => item.sub_category.to_lowercase(),
        }
    };
    match sort.direction {
        SortDirection::Ascending => items.sort_by_key(key),
        SortDirection::Descending => items.sort_by(|a, b| key(b).cmp(&key(a))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: &str, sub: &str, kind: ItemKind) -> BarItem {
        BarItem {
            name: name.to_string(),
            category: category.to_string(),
            sub_category: sub.to_string(),
            kind,
            visible: true,
        }
    }

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(ItemKind::from_tag("spirit"), ItemKind::Spirit);
        assert_eq!(ItemKind::from_tag("modifier"), ItemKind::Modifier);
        assert_eq!(ItemKind::from_tag(""), ItemKind::Other);
        assert_eq!(ItemKind::from_tag("garnish"), ItemKind::Other);
    }

    #[test]
    fn test_from_snapshot_sanitizes() {
        let row = BarItem::from_snapshot(crate::api::SnapshotItem {
            name: "Gin\u{1b}[31m".to_string(),
            category: "Gin".to_string(),
            sub_category: None,
            kind: "spirit".to_string(),
        });
        assert_eq!(row.name, "Gin");
        assert_eq!(row.sub_category, "");
        assert!(row.visible);
    }

    #[test]
    fn test_sort_toggle_flips_direction() {
        let first = SortState::toggle(None, SortColumn::Name);
        assert_eq!(first.direction, SortDirection::Ascending);

        let second = SortState::toggle(Some(first), SortColumn::Name);
        assert_eq!(second.direction, SortDirection::Descending);

        let third = SortState::toggle(Some(second), SortColumn::Category);
        assert_eq!(third.column, SortColumn::Category);
        assert_eq!(third.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let mut items = vec![
            item("tonic", "Mixer", "", ItemKind::Modifier),
            item("Aperol", "Liqueur", "", ItemKind::Spirit),
            item("CAMPARI", "Liqueur", "", ItemKind::Spirit),
        ];
        apply_sort(
            &mut items,
            &SortState {
                column: SortColumn::Name,
                direction: SortDirection::Ascending,
            },
        );
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Aperol", "CAMPARI", "tonic"]);
    }

    #[test]
    fn test_sort_descending_and_stability() {
        let mut items = vec![
            item("Gin A", "Gin", "", ItemKind::Spirit),
            item("Gin B", "Gin", "", ItemKind::Spirit),
            item("Rum A", "Rum", "", ItemKind::Spirit),
        ];
        apply_sort(
            &mut items,
            &SortState {
                column: SortColumn::Category,
                direction: SortDirection::Descending,
            },
        );
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        // Equal category keys keep their original relative order
        assert_eq!(names, vec!["Rum A", "Gin A", "Gin B"]);
    }
}
