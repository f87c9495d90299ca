//! Helper functions for UI operations: panic-safe task spawning and
//! overlay layout.

use crate::api::ApiError;
use crate::app::{App, AppEvent};
use futures::FutureExt;
use ratatui::layout::Rect;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Generic failure message for the use-selected-ingredient flow.
pub(super) const ERR_ADD_ITEM: &str = "There was a problem adding the item.";

/// Wraps a future to catch panics and convert them to errors.
///
/// A panic in a spawned task would otherwise vanish into the runtime; this
/// converts it into `Err(message)` so the UI can report it via
/// `AppEvent::TaskPanicked`.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            }
        })
}

/// Spawn the inventory snapshot load.
///
/// There is deliberately no in-flight guard: repeating the action issues
/// another request, same as reloading the page.
pub(super) fn spawn_snapshot_load(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    app.loading_snapshot = true;
    app.needs_redraw = true;
    let client = app.client.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let event = match catch_task_panic(async { client.fetch_snapshot().await }).await {
            Ok(result) => AppEvent::SnapshotLoaded(result.map_err(|e| e.to_string())),
            Err(error) => AppEvent::TaskPanicked {
                task: "snapshot",
                error,
            },
        };
        if tx.send(event).await.is_err() {
            tracing::warn!("Failed to send snapshot result (receiver dropped)");
        }
    });
}

/// Spawn a details prefetch for a chosen ingredient.
///
/// Server-reported errors are forwarded for verbatim display; transport
/// failures during a prefetch are only logged (the flow that actually
/// submits re-fetches and surfaces its own errors).
pub(super) fn spawn_details_prefetch(
    app: &App,
    name: String,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    let client = app.client.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let event = match catch_task_panic(async { client.ingredient_details(&name).await }).await
        {
            Ok(Ok(details)) => AppEvent::DetailsPrefetched {
                name,
                result: Ok(details),
            },
            Ok(Err(ApiError::Server(message))) => AppEvent::DetailsPrefetched {
                name,
                result: Err(message),
            },
            Ok(Err(error)) => {
                tracing::warn!(name = %name, error = %error, "Details prefetch failed");
                return;
            }
            Err(error) => AppEvent::TaskPanicked {
                task: "details",
                error,
            },
        };
        if tx.send(event).await.is_err() {
            tracing::warn!("Failed to send details result (receiver dropped)");
        }
    });
}

/// Spawn the create-ingredient POST.
pub(super) fn spawn_create_ingredient(
    app: &App,
    name: String,
    category: String,
    sub_category: String,
    continue_add: bool,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    let client = app.client.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let event = match catch_task_panic(async {
            client
                .create_ingredient(&name, &category, &sub_category)
                .await
        })
        .await
        {
            Ok(Ok(())) => AppEvent::IngredientCreated {
                name,
                category,
                sub_category,
                continue_add,
            },
            Ok(Err(error)) => AppEvent::IngredientCreateFailed {
                name,
                error: error.to_string(),
            },
            Err(error) => AppEvent::TaskPanicked {
                task: "create_ingredient",
                error,
            },
        };
        if tx.send(event).await.is_err() {
            tracing::warn!("Failed to send create result (receiver dropped)");
        }
    });
}

/// Spawn the use-selected-ingredient flow: fetch details, then POST the
/// add-to-bar form. An `error` payload from the details endpoint aborts the
/// submission and is surfaced verbatim.
pub(super) fn spawn_add_to_bar(app: &App, name: String, event_tx: &mpsc::Sender<AppEvent>) {
    let client = app.client.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let flow = async {
            let details = client.ingredient_details(&name).await?;
            client
                .add_to_bar(
                    &name,
                    details.category.as_deref().unwrap_or_default(),
                    details.sub_category.as_deref().unwrap_or_default(),
                )
                .await
        };
        let event = match catch_task_panic(flow).await {
            Ok(Ok(())) => AppEvent::ItemAdded { name },
            Ok(Err(ApiError::Server(message))) => AppEvent::ItemAddFailed { message },
            Ok(Err(error)) => {
                tracing::error!(name = %name, error = %error, "Add-to-bar flow failed");
                AppEvent::ItemAddFailed {
                    message: ERR_ADD_ITEM.to_string(),
                }
            }
            Err(error) => AppEvent::TaskPanicked {
                task: "add_to_bar",
                error,
            },
        };
        if tx.send(event).await.is_err() {
            tracing::warn!("Failed to send add result (receiver dropped)");
        }
    });
}

/// Spawn the delete-item DELETE.
pub(super) fn spawn_delete_item(app: &App, name: String, event_tx: &mpsc::Sender<AppEvent>) {
    let client = app.client.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let event = match catch_task_panic(async { client.delete_item(&name).await }).await {
            Ok(Ok(())) => AppEvent::ItemDeleted { name },
            Ok(Err(error)) => AppEvent::ItemDeleteFailed {
                name,
                error: error.to_string(),
            },
            Err(error) => AppEvent::TaskPanicked {
                task: "delete_item",
                error,
            },
        };
        if tx.send(event).await.is_err() {
            tracing::warn!("Failed to send delete result (receiver dropped)");
        }
    });
}

/// Center a fixed-size rect inside `area`, clamped to fit.
pub(super) fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Center a percentage-sized rect inside `area`.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    centered_fixed(width, height, area)
}
