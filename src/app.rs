use crate::api::{ApiClient, BarSnapshot, IngredientDetails};
use crate::inventory::{
    apply_sort, lookup, section_counts, BarItem, CategoryCatalog, FilterEngine, FilterToken,
    SortColumn, SortState,
};
use crate::keybindings::KeybindingRegistry;
use crate::theme::{StyleMap, ThemeVariant};
use crate::util::sanitize_text;
use ratatui::style::Style;
use std::borrow::Cow;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;

/// Default toast display duration.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);
/// Shorter duration used for informational toasts (duplicate notices,
/// creation confirmations).
pub const TOAST_DURATION_SHORT: Duration = Duration::from_millis(2500);

// ============================================================================
// Dialog State Machine
// ============================================================================

/// Per-dialog transition phase.
///
/// Dialogs move `Opening -> Open` and `Open -> Closing -> (removed)` on
/// event-loop ticks rather than wall-clock timers; the closed state is the
/// dialog's slot being `None`. Re-opening a dialog that is `Closing`
/// replaces it with a fresh `Opening` instance, so rapid open/close cannot
/// race into an inconsistent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    Opening,
    Open,
    Closing,
}

impl Default for DialogPhase {
    fn default() -> Self {
        Self::Opening
    }
}

/// A dialog with a transition phase.
trait DialogState {
    fn phase_mut(&mut self) -> &mut DialogPhase;
}

/// Advance one dialog slot's phase by a tick. Returns true if anything
/// changed (a redraw is needed).
fn step_dialog<T: DialogState>(slot: &mut Option<T>) -> bool {
    let mut remove = false;
    let mut changed = false;
    if let Some(dialog) = slot.as_mut() {
        let phase = dialog.phase_mut();
        match *phase {
            DialogPhase::Opening => {
                *phase = DialogPhase::Open;
                changed = true;
            }
            DialogPhase::Closing => remove = true,
            DialogPhase::Open => {}
        }
    }
    if remove {
        *slot = None;
        changed = true;
    }
    changed
}

// ============================================================================
// Add-Item Dialog
// ============================================================================

/// State for the add-item dialog: type-ahead over the master list plus the
/// pending category/subcategory fields filled from the details endpoint.
#[derive(Debug, Clone, Default)]
pub struct AddItemDialog {
    pub phase: DialogPhase,
    /// Free-typed name input.
    pub input: String,
    /// Current type-ahead suggestions.
    pub suggestions: Vec<String>,
    /// Selected suggestion index.
    pub selected: usize,
    /// Master-list entry chosen via the type-ahead; retained until the
    /// input is cleared or a new suggestion is picked.
    pub chosen: Option<String>,
    /// Pending fields mirroring the hidden form inputs; filled by the
    /// details prefetch and cleared before submission.
    pub category: String,
    pub sub_category: String,
    /// True when the input has no match — the cue to offer creating a new
    /// ingredient instead.
    pub offer_create: bool,
}

impl DialogState for AddItemDialog {
    fn phase_mut(&mut self) -> &mut DialogPhase {
        &mut self.phase
    }
}

impl AddItemDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute suggestions for the current input.
    ///
    /// Empty input clears the suggestions, the chosen entry, and the
    /// dependent category/subcategory fields.
    pub fn refresh_suggestions(&mut self, master: &[String]) {
        if self.input.trim().is_empty() {
            self.suggestions.clear();
            self.selected = 0;
            self.chosen = None;
            self.category.clear();
            self.sub_category.clear();
            self.offer_create = false;
            return;
        }
        self.suggestions = lookup::suggestions(master, &self.input)
            .into_iter()
            .map(str::to_owned)
            .collect();
        self.selected = self.selected.min(self.suggestions.len().saturating_sub(1));
        self.offer_create = self.suggestions.is_empty();
    }

    /// Take the selected suggestion as the chosen ingredient.
    pub fn choose_selected(&mut self) -> Option<String> {
        let choice = self.suggestions.get(self.selected)?.clone();
        self.input = choice.clone();
        self.chosen = Some(choice.clone());
        self.suggestions.clear();
        self.selected = 0;
        self.offer_create = false;
        Some(choice)
    }

    /// Select a master-list entry directly (duplicate short-circuit,
    /// post-creation selection).
    pub fn select_name(&mut self, name: &str) {
        self.input = name.to_string();
        self.chosen = Some(name.to_string());
        self.suggestions.clear();
        self.selected = 0;
        self.offer_create = false;
    }
}

// ============================================================================
// New-Ingredient Dialog
// ============================================================================

/// Focusable fields of the new-ingredient dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewIngredientField {
    Name,
    Category,
    SubCategory,
}

impl NewIngredientField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Category,
            Self::Category => Self::SubCategory,
            Self::SubCategory => Self::Name,
        }
    }
}

/// State for the new-ingredient dialog.
///
/// The category field is constrained to catalog values (cycled, not typed),
/// mirroring the original's select element; the subcategory field cycles
/// the category's known options plus a blank choice.
#[derive(Debug, Clone)]
pub struct NewIngredientDialog {
    pub phase: DialogPhase,
    pub name: String,
    pub category: String,
    pub sub_category: String,
    pub focus: NewIngredientField,
    /// Options for the current category, refreshed on category change.
    pub sub_options: Vec<String>,
}

impl DialogState for NewIngredientDialog {
    fn phase_mut(&mut self) -> &mut DialogPhase {
        &mut self.phase
    }
}

impl NewIngredientDialog {
    pub fn new(name: String, category: String) -> Self {
        Self {
            phase: DialogPhase::Opening,
            name,
            category,
            sub_category: String::new(),
            focus: NewIngredientField::Name,
            sub_options: Vec::new(),
        }
    }

    /// Refresh subcategory options for the current category; a subcategory
    /// that no longer belongs to the options is cleared.
    pub fn sync_sub_options(&mut self, catalog: &CategoryCatalog) {
        self.sub_options = catalog.options_for(&self.category).to_vec();
        if !self.sub_category.is_empty() {
            let current = self.sub_category.to_lowercase();
            if !self
                .sub_options
                .iter()
                .any(|s| s.to_lowercase() == current)
            {
                self.sub_category.clear();
            }
        }
    }

    /// Cycle the category field through the catalog's categories.
    pub fn cycle_category(&mut self, catalog: &CategoryCatalog, forward: bool) {
        let names: Vec<&str> = catalog.categories().collect();
        if names.is_empty() {
            return;
        }
        let current = self.category.to_lowercase();
        let position = names.iter().position(|n| n.to_lowercase() == current);
        let next = match (position, forward) {
            (Some(i), true) => (i + 1) % names.len(),
            (Some(i), false) => (i + names.len() - 1) % names.len(),
            (None, _) => 0,
        };
        self.category = names[next].to_string();
        self.sync_sub_options(catalog);
    }

    /// Cycle the subcategory field through blank + the known options.
    pub fn cycle_sub_category(&mut self, forward: bool) {
        if self.sub_options.is_empty() {
            self.sub_category.clear();
            return;
        }
        // Slot 0 is the blank "no subcategory" choice.
        let slots = self.sub_options.len() + 1;
        let current = self.sub_category.to_lowercase();
        let position = if current.is_empty() {
            0
        } else {
            self.sub_options
                .iter()
                .position(|s| s.to_lowercase() == current)
                .map(|i| i + 1)
                .unwrap_or(0)
        };
        let next = if forward {
            (position + 1) % slots
        } else {
            (position + slots - 1) % slots
        };
        self.sub_category = if next == 0 {
            String::new()
        } else {
            self.sub_options[next - 1].clone()
        };
    }
}

// ============================================================================
// Filter and Delete Dialogs
// ============================================================================

/// State for the filter panel dialog.
#[derive(Debug, Clone)]
pub struct FilterDialog {
    pub phase: DialogPhase,
    /// Offered tokens: all/spirits/modifiers plus the categories and
    /// subcategories present in the row set.
    pub tokens: Vec<FilterToken>,
    pub selected: usize,
}

/// State for the delete confirmation dialog.
#[derive(Debug, Clone)]
pub struct DeleteConfirmDialog {
    pub phase: DialogPhase,
    /// Name of the item to delete.
    pub name: String,
}

impl DialogState for FilterDialog {
    fn phase_mut(&mut self) -> &mut DialogPhase {
        &mut self.phase
    }
}

impl DialogState for DeleteConfirmDialog {
    fn phase_mut(&mut self) -> &mut DialogPhase {
        &mut self.phase
    }
}

// ============================================================================
// Toast
// ============================================================================

/// The single shared toast message. Setting a new toast replaces the
/// previous one, so there is exactly one pending dismissal at any time.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: Cow<'static, str>,
    shown_at: Instant,
    duration: Duration,
}

// ============================================================================
// List Rows
// ============================================================================

/// One line of the inventory list: a category section header or an item.
///
/// `Item` carries the index into `App::items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRow {
    Header {
        category: String,
        visible: usize,
        collapsed: bool,
    },
    Item {
        index: usize,
    },
}

// ============================================================================
// Background Task Events
// ============================================================================

/// Events from background tasks.
pub enum AppEvent {
    /// Inventory snapshot load finished.
    SnapshotLoaded(Result<BarSnapshot, String>),
    /// Details prefetch for a chosen ingredient finished.
    ///
    /// `Err` carries a server-reported message to surface verbatim;
    /// transport failures during prefetch are logged by the task and send
    /// no event.
    DetailsPrefetched {
        name: String,
        result: Result<IngredientDetails, String>,
    },
    /// The create-ingredient POST succeeded.
    IngredientCreated {
        name: String,
        category: String,
        sub_category: String,
        /// Continue the use-selected flow for the add dialog.
        continue_add: bool,
    },
    /// The create-ingredient POST failed (transport or non-2xx).
    IngredientCreateFailed { name: String, error: String },
    /// The full use-selected flow (details + add POST) succeeded.
    ItemAdded { name: String },
    /// The use-selected flow failed; `message` is already user-facing.
    ItemAddFailed { message: String },
    /// The delete succeeded.
    ItemDeleted { name: String },
    /// The delete failed.
    ItemDeleteFailed { name: String, error: String },
    /// A background task panicked.
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
pub struct App {
    pub client: ApiClient,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    // Keybindings
    pub keybindings: KeybindingRegistry,

    // Inventory data (replaced wholesale on snapshot reload)
    pub items: Vec<BarItem>,
    pub master_names: Vec<String>,
    pub catalog: CategoryCatalog,

    // Filter/search/sort state (persists across reloads)
    pub filter: FilterEngine,
    pub search_mode: bool,
    pub search_input: String,
    pub visible_count: usize,
    pub offer_create: bool,
    pub sort: Option<SortState>,
    /// Lowercased category names of collapsed sections.
    pub collapsed_sections: HashSet<String>,
    /// Selection index into `list_rows()`.
    pub selected: usize,

    // Dialogs
    pub add_item: Option<AddItemDialog>,
    pub filter_dialog: Option<FilterDialog>,
    pub new_ingredient: Option<NewIngredientDialog>,
    pub delete_confirm: Option<DeleteConfirmDialog>,

    // Chrome
    pub toast: Option<Toast>,
    pub loading_snapshot: bool,
    pub show_help: bool,
    pub help_scroll_offset: usize,
    pub needs_redraw: bool,
}

impl App {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            theme_variant: ThemeVariant::Dark,
            theme: StyleMap::from_palette(&ThemeVariant::Dark.palette()),
            keybindings: KeybindingRegistry::new(),
            items: Vec::new(),
            master_names: Vec::new(),
            catalog: CategoryCatalog::new(),
            filter: FilterEngine::new(),
            search_mode: false,
            search_input: String::new(),
            visible_count: 0,
            offer_create: false,
            sort: None,
            collapsed_sections: HashSet::new(),
            selected: 0,
            add_item: None,
            filter_dialog: None,
            new_ingredient: None,
            delete_confirm: None,
            toast: None,
            loading_snapshot: false,
            show_help: false,
            help_scroll_offset: 0,
            needs_redraw: true,
        }
    }

    // ------------------------------------------------------------------
    // Theme
    // ------------------------------------------------------------------

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant. Returns the new name for status
    /// display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    // ------------------------------------------------------------------
    // Snapshot / filtering
    // ------------------------------------------------------------------

    /// Replace the inventory from a fresh snapshot.
    ///
    /// The catalog is rebuilt from the snapshot's seed map; search, filter,
    /// sort, and collapsed-section state persist across reloads.
    pub fn apply_snapshot(&mut self, snapshot: BarSnapshot) {
        self.items = snapshot
            .items
            .into_iter()
            .map(BarItem::from_snapshot)
            .collect();
        self.master_names = snapshot
            .possible_names
            .iter()
            .map(|name| sanitize_text(name).into_owned())
            .collect();
        self.catalog = CategoryCatalog::from_seed(&snapshot.subcategories);
        if let Some(sort) = self.sort {
            apply_sort(&mut self.items, &sort);
        }
        self.refilter();
    }

    /// Recompute row visibility from the current search input and filter.
    pub fn refilter(&mut self) {
        self.filter.set_search(&self.search_input);
        let outcome = self.filter.recompute(&mut self.items);
        self.visible_count = outcome.visible;
        self.offer_create = outcome.offer_create;
        self.clamp_selection();
        self.needs_redraw = true;
    }

    /// Toggle sorting by a column and re-apply it to the row set.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        let next = SortState::toggle(self.sort, column);
        self.sort = Some(next);
        apply_sort(&mut self.items, &next);
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------
    // List rows and selection
    // ------------------------------------------------------------------

    /// Flatten the visible inventory into renderable/navigable lines:
    /// section headers followed by their visible rows (unless collapsed).
    /// Sections with zero visible rows are dropped entirely.
    pub fn list_rows(&self) -> Vec<ListRow> {
        let mut rows = Vec::new();
        for section in section_counts(&self.items) {
            if section.visible == 0 {
                continue;
            }
            let key = section.category.to_lowercase();
            let collapsed = self.collapsed_sections.contains(&key);
            rows.push(ListRow::Header {
                category: section.category.clone(),
                visible: section.visible,
                collapsed,
            });
            if collapsed {
                continue;
            }
            for (index, item) in self.items.iter().enumerate() {
                if item.visible && item.category.to_lowercase() == key {
                    rows.push(ListRow::Item { index });
                }
            }
        }
        rows
    }

    /// Clamp the selection to the current list length.
    pub fn clamp_selection(&mut self) {
        let len = self.list_rows().len();
        self.selected = if len == 0 {
            0
        } else {
            self.selected.min(len - 1)
        };
    }

    pub fn nav_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn nav_down(&mut self) {
        let len = self.list_rows().len();
        if len > 0 {
            self.selected = self.selected.saturating_add(1).min(len - 1);
        }
    }

    /// The item under the cursor, if the cursor is on an item row.
    pub fn selected_item(&self) -> Option<&BarItem> {
        match self.list_rows().get(self.selected) {
            Some(ListRow::Item { index }) => self.items.get(*index),
            _ => None,
        }
    }

    /// Collapse/expand the section under the cursor (header or any of its
    /// rows).
    pub fn toggle_selected_section(&mut self) {
        let category = match self.list_rows().get(self.selected) {
            Some(ListRow::Header { category, .. }) => Some(category.clone()),
            Some(ListRow::Item { index }) => self.items.get(*index).map(|i| i.category.clone()),
            None => None,
        };
        if let Some(category) = category {
            let key = category.to_lowercase();
            if !self.collapsed_sections.remove(&key) {
                self.collapsed_sections.insert(key);
            }
            self.clamp_selection();
            self.needs_redraw = true;
        }
    }

    // ------------------------------------------------------------------
    // Toast
    // ------------------------------------------------------------------

    /// Show a toast with the default duration. Empty messages are a no-op.
    pub fn show_toast(&mut self, message: impl Into<Cow<'static, str>>) {
        self.show_toast_for(message, TOAST_DURATION);
    }

    /// Show a toast for a specific duration. Replaces any current toast —
    /// the newest call wins and only its dismissal is pending.
    pub fn show_toast_for(
        &mut self,
        message: impl Into<Cow<'static, str>>,
        duration: Duration,
    ) {
        let message = message.into();
        if message.is_empty() {
            return;
        }
        self.toast = Some(Toast {
            message,
            shown_at: Instant::now(),
            duration,
        });
        self.needs_redraw = true;
    }

    /// Drop the toast once its duration has elapsed. Returns true if a
    /// message was actually cleared.
    pub fn clear_expired_toast(&mut self) -> bool {
        if let Some(toast) = &self.toast {
            if toast.shown_at.elapsed() >= toast.duration {
                self.toast = None;
                return true;
            }
        }
        false
    }

    // ------------------------------------------------------------------
    // Dialogs
    // ------------------------------------------------------------------

    pub fn any_dialog_open(&self) -> bool {
        self.add_item.is_some()
            || self.filter_dialog.is_some()
            || self.new_ingredient.is_some()
            || self.delete_confirm.is_some()
    }

    /// Advance all dialog state machines by one tick. Returns true if any
    /// phase changed.
    pub fn advance_dialogs(&mut self) -> bool {
        let mut changed = false;
        changed |= step_dialog(&mut self.add_item);
        changed |= step_dialog(&mut self.filter_dialog);
        changed |= step_dialog(&mut self.new_ingredient);
        changed |= step_dialog(&mut self.delete_confirm);
        changed
    }

    /// Begin closing every open dialog (the Escape behavior: all open
    /// dialogs close, not just the topmost).
    pub fn close_all_dialogs(&mut self) {
        if let Some(dialog) = self.add_item.as_mut() {
            dialog.phase = DialogPhase::Closing;
        }
        if let Some(dialog) = self.filter_dialog.as_mut() {
            dialog.phase = DialogPhase::Closing;
        }
        if let Some(dialog) = self.new_ingredient.as_mut() {
            dialog.phase = DialogPhase::Closing;
        }
        if let Some(dialog) = self.delete_confirm.as_mut() {
            dialog.phase = DialogPhase::Closing;
        }
        self.needs_redraw = true;
    }

    /// Open the add-item dialog. Replacing a `Closing` instance restarts
    /// the state machine in `Opening`.
    pub fn open_add_item(&mut self) {
        self.add_item = Some(AddItemDialog::new());
        self.needs_redraw = true;
    }

    /// Open the filter panel, cursor on the active token.
    pub fn open_filter_dialog(&mut self) {
        let tokens = self.filter_tokens();
        let selected = tokens
            .iter()
            .position(|t| t == self.filter.active())
            .unwrap_or(0);
        self.filter_dialog = Some(FilterDialog {
            phase: DialogPhase::Opening,
            tokens,
            selected,
        });
        self.needs_redraw = true;
    }

    /// Open the new-ingredient dialog, pre-filled from the add dialog's
    /// current input and pending category, with subcategory options synced
    /// from the catalog.
    pub fn open_new_ingredient(&mut self) {
        let (name, category) = match &self.add_item {
            Some(dialog) => (dialog.input.trim().to_string(), dialog.category.clone()),
            None => (String::new(), String::new()),
        };
        let category = if category.is_empty() {
            self.catalog
                .categories()
                .next()
                .unwrap_or_default()
                .to_string()
        } else {
            category
        };
        let mut dialog = NewIngredientDialog::new(name, category);
        dialog.sync_sub_options(&self.catalog);
        self.new_ingredient = Some(dialog);
        self.needs_redraw = true;
    }

    /// Open the delete confirmation for the selected item.
    pub fn open_delete_confirm(&mut self) {
        let Some(name) = self.selected_item().map(|item| item.name.clone()) else {
            return;
        };
        self.delete_confirm = Some(DeleteConfirmDialog {
            phase: DialogPhase::Opening,
            name,
        });
        self.needs_redraw = true;
    }

    /// Tokens offered by the filter panel: the fixed tokens plus every
    /// category and subcategory present in the row set, deduplicated
    /// case-insensitively.
    pub fn filter_tokens(&self) -> Vec<FilterToken> {
        let mut tokens = vec![FilterToken::All, FilterToken::Spirit, FilterToken::Modifier];
        let mut seen: HashSet<String> = HashSet::new();
        for item in &self.items {
            let category = item.category.trim().to_lowercase();
            if !category.is_empty() && seen.insert(category.clone()) {
                tokens.push(FilterToken::Term(category));
            }
        }
        for item in &self.items {
            let sub = item.sub_category.trim().to_lowercase();
            if !sub.is_empty() && seen.insert(sub.clone()) {
                tokens.push(FilterToken::Term(sub));
            }
        }
        tokens
    }
}
