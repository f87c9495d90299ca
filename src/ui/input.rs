//! Input handling for the TUI.
//!
//! Dispatch order mirrors dialog stacking: the help overlay and dialogs
//! capture input first (delete confirm, new ingredient, add item, filter
//! panel), then search mode, then the browse keybindings. Escape closes
//! every open dialog, not just the topmost one.

use crate::app::{App, AppEvent, DialogPhase, NewIngredientField, TOAST_DURATION_SHORT};
use crate::inventory::{
    prepare_new_ingredient, FilterToken, NewIngredientOutcome, RejectedField, SortColumn,
};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::util::MAX_SEARCH_LENGTH;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::{
    spawn_add_to_bar, spawn_create_ingredient, spawn_delete_item, spawn_details_prefetch,
    spawn_snapshot_load,
};
use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    // Help overlay captures all keys when visible
    if app.show_help {
        return handle_help_input(app, code);
    }

    // Escape closes ALL open dialogs simultaneously
    if code == KeyCode::Esc && app.any_dialog_open() {
        app.close_all_dialogs();
        return Action::Continue;
    }

    // Dialogs capture input in priority order
    if app.delete_confirm.is_some() {
        return handle_delete_confirm_input(app, code, event_tx);
    }
    if app.new_ingredient.is_some() {
        return handle_new_ingredient_input(app, code, event_tx);
    }
    if app.add_item.is_some() {
        return handle_add_item_input(app, code, event_tx);
    }
    if app.filter_dialog.is_some() {
        return handle_filter_input(app, code);
    }

    if app.search_mode {
        return handle_search_input(app, code);
    }

    handle_browse_input(app, code, modifiers, event_tx)
}

/// Handle input while the help overlay is visible.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input in the browse view through the keybinding registry.
fn handle_browse_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Inventory);

    match action {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::Back) => {
            if !app.search_input.is_empty() {
                app.search_input.clear();
                app.refilter();
            }
        }
        Some(KbAction::NavDown) => app.nav_down(),
        Some(KbAction::NavUp) => app.nav_up(),
        Some(KbAction::ToggleSection) => app.toggle_selected_section(),
        Some(KbAction::EnterSearch) => {
            app.search_mode = true;
        }
        Some(KbAction::ClearFilter) => {
            app.search_input.clear();
            app.refilter();
        }
        Some(KbAction::OpenAddItem) => app.open_add_item(),
        Some(KbAction::OpenFilterPanel) => app.open_filter_dialog(),
        Some(KbAction::OpenNewIngredient) => app.open_new_ingredient(),
        Some(KbAction::DeleteItem) => app.open_delete_confirm(),
        Some(KbAction::Refresh) => spawn_snapshot_load(app, event_tx),
        Some(KbAction::SortByName) => app.toggle_sort(SortColumn::Name),
        Some(KbAction::SortByCategory) => app.toggle_sort(SortColumn::Category),
        Some(KbAction::SortBySubcategory) => app.toggle_sort(SortColumn::SubCategory),
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme();
            app.show_toast(format!("Theme: {}", name));
        }
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
        }
        None => {}
    }
    Action::Continue
}

/// Handle input in search mode: live filtering on every keystroke.
fn handle_search_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc => {
            // Cancel: leave search mode and restore full visibility
            app.search_mode = false;
            app.search_input.clear();
            app.refilter();
        }
        KeyCode::Enter => {
            // Keep the search applied and return to browsing
            app.search_mode = false;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            app.refilter();
        }
        KeyCode::Char(c) => {
            if app.search_input.len() < MAX_SEARCH_LENGTH {
                app.search_input.push(c);
                app.refilter();
            }
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input for the filter panel dialog.
fn handle_filter_input(app: &mut App, code: KeyCode) -> Action {
    let mut apply: Option<FilterToken> = None;
    let mut close = false;

    if let Some(dialog) = app.filter_dialog.as_mut() {
        if dialog.phase == DialogPhase::Closing {
            return Action::Continue;
        }
        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                if !dialog.tokens.is_empty() {
                    dialog.selected = (dialog.selected + 1).min(dialog.tokens.len() - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                dialog.selected = dialog.selected.saturating_sub(1);
            }
            // Space toggles and keeps the panel open; Enter toggles and
            // closes it.
            KeyCode::Char(' ') => {
                apply = dialog.tokens.get(dialog.selected).cloned();
            }
            KeyCode::Enter => {
                apply = dialog.tokens.get(dialog.selected).cloned();
                close = true;
            }
            _ => {}
        }
        if close {
            dialog.phase = DialogPhase::Closing;
        }
    }

    if let Some(token) = apply {
        app.filter.toggle_filter(token);
        app.refilter();
    }
    Action::Continue
}

/// Handle input for the delete confirmation dialog.
fn handle_delete_confirm_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    let mut delete: Option<String> = None;

    if let Some(dialog) = app.delete_confirm.as_mut() {
        if dialog.phase == DialogPhase::Closing {
            return Action::Continue;
        }
        match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                // The dialog stays open until the server answers
                delete = Some(dialog.name.clone());
            }
            KeyCode::Char('n') => {
                dialog.phase = DialogPhase::Closing;
            }
            _ => {}
        }
    }

    if let Some(name) = delete {
        spawn_delete_item(app, name, event_tx);
    }
    Action::Continue
}

/// Handle input for the add-item dialog (type-ahead + submission).
fn handle_add_item_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    let mut prefetch: Option<String> = None;
    let mut submit: Option<String> = None;
    let mut open_new_ingredient = false;
    let mut invalid_selection = false;

    if let Some(dialog) = app.add_item.as_mut() {
        if dialog.phase == DialogPhase::Closing {
            return Action::Continue;
        }
        match code {
            KeyCode::Down => {
                if !dialog.suggestions.is_empty() {
                    dialog.selected = (dialog.selected + 1).min(dialog.suggestions.len() - 1);
                }
            }
            KeyCode::Up => {
                dialog.selected = dialog.selected.saturating_sub(1);
            }
            KeyCode::Tab => {
                // The create-new affordance is only offered when the input
                // matches nothing.
                open_new_ingredient = dialog.offer_create;
            }
            KeyCode::Enter => {
                if !dialog.suggestions.is_empty() {
                    // First Enter picks the highlighted suggestion and
                    // prefetches its metadata.
                    prefetch = dialog.choose_selected();
                } else if let Some(chosen) = dialog.chosen.clone() {
                    // Second Enter submits the use-selected flow: clear the
                    // pending fields, then fetch-and-POST in the background.
                    dialog.category.clear();
                    dialog.sub_category.clear();
                    submit = Some(chosen);
                } else {
                    invalid_selection = true;
                }
            }
            KeyCode::Backspace => {
                dialog.input.pop();
                dialog.refresh_suggestions(&app.master_names);
            }
            KeyCode::Char(c) => {
                dialog.input.push(c);
                dialog.refresh_suggestions(&app.master_names);
            }
            _ => {}
        }
    }

    if let Some(name) = prefetch {
        spawn_details_prefetch(app, name, event_tx);
    }
    if let Some(name) = submit {
        spawn_add_to_bar(app, name, event_tx);
    }
    if open_new_ingredient {
        app.open_new_ingredient();
    }
    if invalid_selection {
        app.show_toast("Please select a valid item.");
    }
    Action::Continue
}

/// Map a validation rejection to the dialog field to refocus.
fn rejected_focus(field: RejectedField) -> NewIngredientField {
    match field {
        RejectedField::Name => NewIngredientField::Name,
        RejectedField::Category => NewIngredientField::Category,
        RejectedField::SubCategory => NewIngredientField::SubCategory,
    }
}

/// Handle input for the new-ingredient dialog.
fn handle_new_ingredient_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    enum Submit {
        Toast(String),
        Duplicate(String),
        Create {
            name: String,
            category: String,
            sub_category: String,
        },
    }
    let mut submit: Option<Submit> = None;

    if let Some(dialog) = app.new_ingredient.as_mut() {
        if dialog.phase == DialogPhase::Closing {
            return Action::Continue;
        }
        match code {
            KeyCode::Tab => dialog.focus = dialog.focus.next(),
            KeyCode::Left | KeyCode::Right => {
                let forward = code == KeyCode::Right;
                match dialog.focus {
                    NewIngredientField::Category => dialog.cycle_category(&app.catalog, forward),
                    NewIngredientField::SubCategory => dialog.cycle_sub_category(forward),
                    NewIngredientField::Name => {}
                }
            }
            KeyCode::Backspace => {
                if dialog.focus == NewIngredientField::Name {
                    dialog.name.pop();
                }
            }
            KeyCode::Char(c) => {
                if dialog.focus == NewIngredientField::Name {
                    dialog.name.push(c);
                }
            }
            KeyCode::Enter => {
                match prepare_new_ingredient(
                    &dialog.name,
                    &dialog.category,
                    &dialog.sub_category,
                    &app.catalog,
                    &app.master_names,
                ) {
                    NewIngredientOutcome::Rejected { field, message } => {
                        dialog.focus = rejected_focus(field);
                        submit = Some(Submit::Toast(message));
                    }
                    NewIngredientOutcome::Duplicate { existing } => {
                        dialog.phase = DialogPhase::Closing;
                        submit = Some(Submit::Duplicate(existing));
                    }
                    NewIngredientOutcome::Ready {
                        name,
                        category,
                        sub_category,
                    } => {
                        submit = Some(Submit::Create {
                            name,
                            category,
                            sub_category,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    match submit {
        Some(Submit::Toast(message)) => app.show_toast(message),
        Some(Submit::Duplicate(existing)) => {
            // Select the existing entry instead; no network call is made.
            if let Some(dialog) = app.add_item.as_mut() {
                dialog.select_name(&existing);
            }
            spawn_details_prefetch(app, existing.clone(), event_tx);
            app.show_toast_for(
                format!("{} already exists in your master list.", existing),
                TOAST_DURATION_SHORT,
            );
        }
        Some(Submit::Create {
            name,
            category,
            sub_category,
        }) => {
            let continue_add = app.add_item.is_some();
            spawn_create_ingredient(app, name, category, sub_category, continue_add, event_tx);
        }
        None => {}
    }
    Action::Continue
}
