//! Inventory list widget: category sections with visible-row counts and
//! their rows, windowed around the selection.

use crate::app::{App, ListRow};
use crate::inventory::filter::count_label;
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the inventory list.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let title = format!(" bar inventory — {} ", app.client.base());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = app.list_rows();
    if rows.is_empty() {
        render_empty(f, app, inner);
        return;
    }

    let viewport = inner.height as usize;
    let width = inner.width as usize;

    // Window the list so the selection stays in view
    let skip = if app.selected >= viewport {
        app.selected + 1 - viewport
    } else {
        0
    };

    let mut lines: Vec<Line> = Vec::with_capacity(viewport);
    for (offset, row) in rows.iter().enumerate().skip(skip).take(viewport) {
        let selected = offset == app.selected;
        lines.push(render_row(app, row, selected, width));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Render one list line: a section header or an item row.
fn render_row<'a>(app: &App, row: &ListRow, selected: bool, width: usize) -> Line<'a> {
    match row {
        ListRow::Header {
            category,
            visible,
            collapsed,
        } => {
            let chevron = if *collapsed { "▸" } else { "▾" };
            let header_style = if selected {
                app.style("row_selected")
            } else {
                app.style("section_header")
            };
            Line::from(vec![
                Span::styled(
                    format!(
                        "{} {}",
                        chevron,
                        truncate_to_width(category, width.saturating_sub(12))
                    ),
                    header_style,
                ),
                Span::styled(
                    format!("  {}", count_label(*visible)),
                    app.style("section_count"),
                ),
            ])
        }
        ListRow::Item { index } => {
            let Some(item) = app.items.get(*index) else {
                return Line::from("");
            };
            let row_style = if selected {
                app.style("row_selected")
            } else {
                app.style("row_normal")
            };
            let mut spans = vec![Span::styled(
                format!(
                    "  {}",
                    truncate_to_width(&item.name, width.saturating_sub(4))
                ),
                row_style,
            )];
            if !item.sub_category.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", truncate_to_width(&item.sub_category, 24)),
                    app.style("row_subcategory"),
                ));
            }
            let kind_label = item.kind.label();
            if !kind_label.is_empty() {
                let kind_role = match item.kind {
                    crate::inventory::ItemKind::Spirit => "kind_spirit",
                    _ => "kind_modifier",
                };
                spans.push(Span::styled(
                    format!("  [{}]", kind_label),
                    app.style(kind_role),
                ));
            }
            Line::from(spans)
        }
    }
}

/// Render the empty state: loading, no matches, or an empty bar.
fn render_empty(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    if app.loading_snapshot && app.items.is_empty() {
        lines.push(Line::styled("Loading inventory...", app.style("empty_notice")));
    } else if app.items.is_empty() {
        lines.push(Line::styled(
            "Your bar is empty. Press a to add an ingredient.",
            app.style("empty_notice"),
        ));
    } else {
        lines.push(Line::styled(
            "No ingredients match.",
            app.style("empty_notice"),
        ));
        if app.offer_create {
            lines.push(Line::styled(
                "Press n to create a new master ingredient.",
                app.style("dialog_hint"),
            ));
        }
    }
    f.render_widget(Paragraph::new(lines), area);
}
