//! Render functions for the TUI.
//!
//! Dispatches to the inventory list, then stacks dialog overlays in
//! priority order and the help overlay on top.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame,
};

use super::{dialogs, help, inventory, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 8;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    inventory::render(f, app, chunks[0]);
    status::render(f, app, chunks[1]);

    // Dialog overlays, bottom of the stack first
    if app.filter_dialog.is_some() {
        dialogs::render_filter(f, app);
    }
    if app.add_item.is_some() {
        dialogs::render_add_item(f, app);
    }
    if app.new_ingredient.is_some() {
        dialogs::render_new_ingredient(f, app);
    }
    if app.delete_confirm.is_some() {
        dialogs::render_delete_confirm(f, app);
    }

    if app.show_help {
        help::render(f, app);
    }
}
