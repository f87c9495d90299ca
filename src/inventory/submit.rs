//! New-ingredient validation pipeline.
//!
//! The synchronous front half of the create-ingredient flow: validate the
//! typed fields against the catalog, then check the master list for a
//! duplicate. Only a `Ready` outcome proceeds to the network.

use super::catalog::CategoryCatalog;
use super::lookup::find_existing;

/// Which input field a rejection refers to, so the dialog can refocus it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectedField {
    Name,
    Category,
    SubCategory,
}

/// Outcome of validating a new-ingredient submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewIngredientOutcome {
    /// Validation failed; nothing was mutated and no request goes out.
    Rejected {
        field: RejectedField,
        message: String,
    },
    /// The name already exists in the master list (case-insensitively).
    /// The existing entry should be selected; no request goes out.
    Duplicate { existing: String },
    /// Validated fields with canonical casing, ready to POST.
    Ready {
        name: String,
        category: String,
        sub_category: String,
    },
}

/// Validate a new-ingredient submission.
///
/// Steps, in order:
/// 1. Name and category must be non-empty.
/// 2. The category must resolve against the catalog (it is normally
///    constrained to known values, so this is a loud guard rather than an
///    expected path); its canonical casing is substituted.
/// 3. If the category has known subcategories and one was entered, it must
///    match one of them case-insensitively; the canonical casing is
///    substituted. A category without known subcategories clears the
///    entered subcategory.
/// 4. A name already present in the master list short-circuits as
///    `Duplicate` with the canonical spelling.
pub fn prepare_new_ingredient(
    name: &str,
    category: &str,
    sub_category: &str,
    catalog: &CategoryCatalog,
    master: &[String],
) -> NewIngredientOutcome {
    let name = name.trim();
    let category = category.trim();
    let sub_category = sub_category.trim();

    if name.is_empty() {
        return NewIngredientOutcome::Rejected {
            field: RejectedField::Name,
            message: "Please enter a name for the ingredient.".to_string(),
        };
    }

    if category.is_empty() {
        return NewIngredientOutcome::Rejected {
            field: RejectedField::Category,
            message: "Please provide a category.".to_string(),
        };
    }

    let Some(entry) = catalog.lookup(category) else {
        return NewIngredientOutcome::Rejected {
            field: RejectedField::Category,
            message: format!("{} is not a known category.", category),
        };
    };
    let category = entry.name.clone();

    let sub_category = if entry.subcategories().is_empty() {
        String::new()
    } else if sub_category.is_empty() {
        String::new()
    } else {
        match entry.canonical_sub(sub_category) {
            Some(canonical) => canonical.to_string(),
            None => {
                return NewIngredientOutcome::Rejected {
                    field: RejectedField::SubCategory,
                    message: "Please choose a valid subcategory.".to_string(),
                }
            }
        }
    };

    if let Some(existing) = find_existing(master, name) {
        return NewIngredientOutcome::Duplicate {
            existing: existing.to_string(),
        };
    }

    NewIngredientOutcome::Ready {
        name: name.to_string(),
        category,
        sub_category,
    }
}
