//! Status line: toast messages, search input, and keybinding hints.

use crate::app::App;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status line.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Toasts beat everything else on the single status line
    let (text, style): (Cow<'_, str>, _) = if let Some(toast) = &app.toast {
        (Cow::Borrowed(toast.message.as_ref()), app.style("toast"))
    } else if app.search_mode {
        (
            Cow::Owned(format!(
                "Search: {}▏  (ENTER keep, ESC clear)",
                app.search_input
            )),
            app.style("status_bar"),
        )
    } else if app.loading_snapshot {
        (Cow::Borrowed("Loading inventory..."), app.style("status_bar"))
    } else {
        let mut hints =
            String::from("[/]search [f]ilter [a]dd [n]ew [d]elete [r]eload [?]help [q]uit");
        if !app.search_input.is_empty() {
            hints.push_str(&format!("  search: {}", app.search_input));
        }
        let filter = app.filter.active();
        if *filter != crate::inventory::FilterToken::All {
            hints.push_str(&format!("  filter: {}", filter.label()));
        }
        hints.push_str(&format!("  {} visible", app.visible_count));
        (Cow::Owned(hints), app.style("status_bar"))
    };

    f.render_widget(Paragraph::new(text).style(style), area);
}
