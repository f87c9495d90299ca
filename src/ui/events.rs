//! Application event handling.
//!
//! Processes background task completion events: snapshot loads, details
//! prefetches, and the create/add/delete submission flows. Every failure
//! path leaves the UI in a known-good state — a dialog stays open, or
//! closes and the snapshot reloads only on confirmed success.

use crate::app::{App, AppEvent, DialogPhase, TOAST_DURATION_SHORT};
use crate::util::sanitize_text;
use tokio::sync::mpsc;

use super::helpers::{spawn_add_to_bar, spawn_snapshot_load};

/// Handle application events from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    match event {
        AppEvent::SnapshotLoaded(Ok(snapshot)) => {
            app.loading_snapshot = false;
            app.apply_snapshot(snapshot);
            tracing::debug!(items = app.items.len(), "Applied inventory snapshot");
        }
        AppEvent::SnapshotLoaded(Err(error)) => {
            app.loading_snapshot = false;
            tracing::error!(error = %error, "Inventory load failed");
            app.show_toast("Unable to load inventory. Please try again.");
        }
        AppEvent::DetailsPrefetched { name, result } => {
            handle_details_prefetched(app, name, result);
        }
        AppEvent::IngredientCreated {
            name,
            category,
            sub_category,
            continue_add,
        } => {
            handle_ingredient_created(app, name, category, sub_category, continue_add, event_tx);
        }
        AppEvent::IngredientCreateFailed { name, error } => {
            tracing::error!(name = %name, error = %error, "Create ingredient failed");
            app.show_toast("Unable to add ingredient. Please try again.");
        }
        AppEvent::ItemAdded { name } => {
            app.show_toast(format!("{} added to your bar.", name));
            if let Some(dialog) = app.add_item.as_mut() {
                dialog.phase = DialogPhase::Closing;
            }
            // Full re-render from server state is the recovery mechanism
            spawn_snapshot_load(app, event_tx);
        }
        AppEvent::ItemAddFailed { message } => {
            // Either a server message surfaced verbatim or the generic
            // retry text; the dialog stays open for another attempt.
            app.show_toast(sanitize_text(&message).into_owned());
        }
        AppEvent::ItemDeleted { name } => {
            if let Some(dialog) = app.delete_confirm.as_mut() {
                dialog.phase = DialogPhase::Closing;
            }
            app.show_toast(format!("{} removed from your bar.", name));
            spawn_snapshot_load(app, event_tx);
        }
        AppEvent::ItemDeleteFailed { name, error } => {
            tracing::error!(name = %name, error = %error, "Delete failed");
            app.show_toast("Error deleting item.");
            if let Some(dialog) = app.delete_confirm.as_mut() {
                dialog.phase = DialogPhase::Closing;
            }
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error, "Background task panicked");
            app.show_toast(format!("Internal error in {} task", task));
        }
    }
}

/// Fill the add dialog's pending fields from a details prefetch.
///
/// Stale responses (the chosen name has changed since the fetch was
/// spawned) are dropped.
fn handle_details_prefetched(
    app: &mut App,
    name: String,
    result: Result<crate::api::IngredientDetails, String>,
) {
    match result {
        Ok(details) => {
            if let Some(dialog) = app.add_item.as_mut() {
                if dialog.chosen.as_deref() == Some(name.as_str()) {
                    dialog.category =
                        sanitize_text(details.category.as_deref().unwrap_or_default())
                            .into_owned();
                    dialog.sub_category =
                        sanitize_text(details.sub_category.as_deref().unwrap_or_default())
                            .into_owned();
                    dialog.offer_create = false;
                } else {
                    tracing::debug!(name = %name, "Dropping stale details prefetch");
                }
            }
        }
        Err(message) => {
            // Server-reported error, surfaced verbatim
            app.show_toast(sanitize_text(&message).into_owned());
        }
    }
}

/// Commit a successful ingredient creation: extend the master list and the
/// catalog, select the new entry, close the dialog, and continue the
/// add-to-bar flow when one is pending.
fn handle_ingredient_created(
    app: &mut App,
    name: String,
    category: String,
    sub_category: String,
    continue_add: bool,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    app.master_names.push(name.clone());
    app.catalog.merge(&category, &sub_category);

    if let Some(dialog) = app.add_item.as_mut() {
        dialog.select_name(&name);
        dialog.category = category.clone();
        dialog.sub_category = sub_category.clone();
    }
    if let Some(dialog) = app.new_ingredient.as_mut() {
        dialog.phase = DialogPhase::Closing;
    }

    app.show_toast_for(
        format!("{} added to master ingredients.", name),
        TOAST_DURATION_SHORT,
    );

    if continue_add && app.add_item.is_some() {
        if let Some(dialog) = app.add_item.as_mut() {
            dialog.category.clear();
            dialog.sub_category.clear();
        }
        spawn_add_to_bar(app, name, event_tx);
    }
    app.needs_redraw = true;
}
