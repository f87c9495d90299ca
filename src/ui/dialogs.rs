//! Dialog overlays: add item, new ingredient, filter panel, delete
//! confirmation.
//!
//! A dialog in its `Opening` phase renders dimmed-out (one tick, the entry
//! transition); `Closing` dialogs still render until the next tick removes
//! them, so the exit transition completes before removal.

use crate::app::{App, DialogPhase, NewIngredientField};
use crate::inventory::FilterToken;
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::helpers::centered_fixed;

/// Style for a dialog frame, dimmed while the open/close transition runs.
fn frame_style(app: &App, phase: DialogPhase) -> Style {
    match phase {
        DialogPhase::Open => app.style("panel_border_focused"),
        DialogPhase::Opening | DialogPhase::Closing => app.style("panel_border"),
    }
}

/// Clear the backdrop and draw the dialog frame, returning the inner area.
fn dialog_frame(f: &mut Frame, app: &App, title: &str, phase: DialogPhase, size: (u16, u16)) -> Rect {
    let area = centered_fixed(size.0, size.1, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(frame_style(app, phase))
        .title(format!(" {} ", title));
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

/// Render the add-item dialog: name input, type-ahead suggestions, and the
/// pending category/subcategory fields.
pub(super) fn render_add_item(f: &mut Frame, app: &App) {
    let Some(dialog) = app.add_item.as_ref() else {
        return;
    };
    let inner = dialog_frame(f, app, "Add to bar", dialog.phase, (46, 14));
    if inner.width < 4 || inner.height < 4 {
        return;
    }
    let width = inner.width as usize;

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Name: ", app.style("dialog_field_focused")),
            Span::raw(format!("{}▏", dialog.input)),
        ]),
        Line::from(""),
    ];

    if dialog.suggestions.is_empty() {
        if dialog.offer_create {
            lines.push(Line::styled(
                "No match in the master list.",
                app.style("empty_notice"),
            ));
            lines.push(Line::styled(
                "Tab: create it as a new ingredient",
                app.style("dialog_hint"),
            ));
        } else if let Some(chosen) = &dialog.chosen {
            lines.push(Line::from(vec![
                Span::styled("Selected: ", app.style("dialog_field")),
                Span::styled(chosen.clone(), app.style("dialog_title")),
            ]));
            let category = if dialog.category.is_empty() {
                "—".to_string()
            } else if dialog.sub_category.is_empty() {
                dialog.category.clone()
            } else {
                format!("{} / {}", dialog.category, dialog.sub_category)
            };
            lines.push(Line::from(vec![
                Span::styled("Category: ", app.style("dialog_field")),
                Span::raw(category),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::styled(
                "Enter: add to bar",
                app.style("dialog_hint"),
            ));
        }
    } else {
        let max = (inner.height as usize).saturating_sub(3).min(6);
        for (i, suggestion) in dialog.suggestions.iter().take(max).enumerate() {
            let style = if i == dialog.selected {
                app.style("suggestion_selected")
            } else {
                app.style("dialog_field")
            };
            lines.push(Line::styled(
                truncate_to_width(suggestion, width).into_owned(),
                style,
            ));
        }
        if dialog.suggestions.len() > max {
            lines.push(Line::styled(
                format!("… {} more", dialog.suggestions.len() - max),
                app.style("dialog_hint"),
            ));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::styled(
        "↑/↓ select  Enter choose/submit  Esc close",
        app.style("dialog_hint"),
    ));

    f.render_widget(Paragraph::new(lines), inner);
}

/// Render the new-ingredient dialog: free-text name, cycled category, and
/// cycled subcategory (shown only when the category has options).
pub(super) fn render_new_ingredient(f: &mut Frame, app: &App) {
    let Some(dialog) = app.new_ingredient.as_ref() else {
        return;
    };
    let inner = dialog_frame(f, app, "New ingredient", dialog.phase, (46, 11));
    if inner.width < 4 || inner.height < 4 {
        return;
    }

    let field_style = |field: NewIngredientField| {
        if dialog.focus == field {
            app.style("dialog_field_focused")
        } else {
            app.style("dialog_field")
        }
    };

    let name_cursor = if dialog.focus == NewIngredientField::Name {
        "▏"
    } else {
        ""
    };
    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Name:        ", field_style(NewIngredientField::Name)),
            Span::raw(format!("{}{}", dialog.name, name_cursor)),
        ]),
        Line::from(vec![
            Span::styled("Category:    ", field_style(NewIngredientField::Category)),
            Span::raw(format!("‹ {} ›", dialog.category)),
        ]),
    ];

    // The subcategory row only exists while the category has known options
    if !dialog.sub_options.is_empty() {
        let sub = if dialog.sub_category.is_empty() {
            "(none)"
        } else {
            dialog.sub_category.as_str()
        };
        lines.push(Line::from(vec![
            Span::styled(
                "Subcategory: ",
                field_style(NewIngredientField::SubCategory),
            ),
            Span::raw(format!("‹ {} ›", sub)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Tab next field  ←/→ cycle  Enter submit  Esc close",
        app.style("dialog_hint"),
    ));

    f.render_widget(Paragraph::new(lines), inner);
}

/// Render the filter panel: fixed tokens plus the row set's categories and
/// subcategories, the active one marked.
pub(super) fn render_filter(f: &mut Frame, app: &App) {
    let Some(dialog) = app.filter_dialog.as_ref() else {
        return;
    };
    let height = (dialog.tokens.len() as u16 + 4).min(18);
    let inner = dialog_frame(f, app, "Filter", dialog.phase, (34, height));
    if inner.width < 4 || inner.height < 3 {
        return;
    }

    let viewport = (inner.height as usize).saturating_sub(2);
    let skip = dialog.selected.saturating_sub(viewport.saturating_sub(1));

    let mut lines: Vec<Line> = Vec::new();
    for (i, token) in dialog.tokens.iter().enumerate().skip(skip).take(viewport) {
        let active = token == app.filter.active();
        let marker = if active { "●" } else { " " };
        let style = if i == dialog.selected {
            app.style("suggestion_selected")
        } else if active {
            app.style("filter_active")
        } else {
            app.style("dialog_field")
        };
        let label = match token {
            FilterToken::All => "all items",
            other => other.label(),
        };
        lines.push(Line::styled(format!("{} {}", marker, label), style));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Space toggle  Enter apply  Esc close",
        app.style("dialog_hint"),
    ));

    f.render_widget(Paragraph::new(lines), inner);
}

/// Render the delete confirmation.
pub(super) fn render_delete_confirm(f: &mut Frame, app: &App) {
    let Some(dialog) = app.delete_confirm.as_ref() else {
        return;
    };
    let inner = dialog_frame(f, app, "Delete item", dialog.phase, (50, 6));
    if inner.width < 4 || inner.height < 3 {
        return;
    }
    let width = inner.width as usize;

    let lines = vec![
        Line::raw(
            truncate_to_width(
                &format!(
                    "Are you sure you want to delete {} from your bar?",
                    dialog.name
                ),
                width * 2,
            )
            .into_owned(),
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", app.style("error_text")),
            Span::raw(" delete   "),
            Span::styled("[n]", app.style("dialog_field_focused")),
            Span::raw(" cancel"),
        ]),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}
