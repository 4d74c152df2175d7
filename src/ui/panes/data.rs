//! Data pane rendering
//!
//! Draws the `data` snapshot of the current step. The shape decides the
//! layout:
//!
//! - `Ints`: one horizontal bar per element, scaled to the largest magnitude
//! - `Grid`: a table of right-aligned cells
//! - `Record`: one line per field, arrays drawn inline
//! - anything else: its formatted text
//!
//! Highlighted indices and cells are drawn on a warm background.

use super::formatting::{format_value_string, format_value_styled};
use crate::step::value::Value;
use crate::step::Highlight;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the data pane
pub fn render_data_pane(
    frame: &mut Frame,
    area: Rect,
    data: &Value,
    highlight: Option<&Highlight>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Data ")
        .borders(Borders::ALL)
        .border_style(border_style);

    // Width left for bars after borders, index column and value label
    let bar_width = area.width.saturating_sub(18).max(1) as usize;
    let lines = data_lines(data, highlight, bar_width);

    if lines.is_empty() {
        let paragraph = Paragraph::new("(nothing to draw)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let total_items = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(ListItem::new)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

fn data_lines(data: &Value, highlight: Option<&Highlight>, bar_width: usize) -> Vec<Line<'static>> {
    match data {
        Value::Empty => Vec::new(),
        Value::Ints(values) => bar_lines(values, highlight, bar_width),
        Value::Grid(rows) => grid_lines(rows, highlight),
        Value::Record(fields) => {
            // Indices refer to the first array field only
            let mut pending = highlight;
            fields
                .iter()
                .map(|(name, value)| {
                    let mut spans = vec![Span::styled(
                        format!("{}: ", name),
                        Style::default().fg(DEFAULT_THEME.name),
                    )];
                    match value {
                        Value::Ints(values) => {
                            spans.extend(inline_array(values, pending.take()))
                        }
                        other => spans.extend(format_value_styled(other)),
                    }
                    Line::from(spans)
                })
                .collect()
        }
        other => vec![Line::from(format_value_styled(other))],
    }
}

fn bar_lines(values: &[i64], highlight: Option<&Highlight>, bar_width: usize) -> Vec<Line<'static>> {
    let max_magnitude = values
        .iter()
        .map(|v| v.unsigned_abs())
        .max()
        .unwrap_or(0)
        .max(1);

    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let len = ((v.unsigned_abs() as u128 * bar_width as u128) / max_magnitude as u128) as usize;
            let is_hot = highlight.is_some_and(|h| h.has_index(i));
            let bar_style = if is_hot {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else if v < 0 {
                Style::default().fg(DEFAULT_THEME.error)
            } else {
                Style::default().fg(DEFAULT_THEME.primary)
            };

            Line::from(vec![
                Span::styled(
                    format!("{:>3} ", i),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled("█".repeat(len.max(1)), bar_style),
                Span::styled(
                    format!(" {}", v),
                    if is_hot {
                        bar_style
                    } else {
                        Style::default().fg(DEFAULT_THEME.number)
                    },
                ),
            ])
        })
        .collect()
}

fn grid_lines(rows: &[Vec<i64>], highlight: Option<&Highlight>) -> Vec<Line<'static>> {
    let width = rows
        .iter()
        .flatten()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);

    rows.iter()
        .enumerate()
        .map(|(r, row)| {
            let spans: Vec<Span<'static>> = row
                .iter()
                .enumerate()
                .map(|(c, v)| {
                    let style = if highlight.is_some_and(|h| h.has_cell(r, c)) {
                        Style::default()
                            .fg(DEFAULT_THEME.secondary)
                            .bg(DEFAULT_THEME.highlight_bg)
                            .add_modifier(Modifier::BOLD)
                    } else if *v == 0 {
                        Style::default().fg(DEFAULT_THEME.comment)
                    } else {
                        Style::default().fg(DEFAULT_THEME.number)
                    };
                    Span::styled(format!(" {:>w$} ", v, w = width), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn inline_array(values: &[i64], highlight: Option<&Highlight>) -> Vec<Span<'static>> {
    if values.is_empty() {
        return vec![Span::styled(
            format_value_string(&Value::Ints(Vec::new())),
            Style::default().fg(DEFAULT_THEME.comment),
        )];
    }
    let mut spans = vec![Span::styled("[", Style::default().fg(DEFAULT_THEME.comment))];
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(", ", Style::default().fg(DEFAULT_THEME.comment)));
        }
        let style = if highlight.is_some_and(|h| h.has_index(i)) {
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .bg(DEFAULT_THEME.highlight_bg)
        } else {
            Style::default().fg(DEFAULT_THEME.number)
        };
        spans.push(Span::styled(v.to_string(), style));
    }
    spans.push(Span::styled("]", Style::default().fg(DEFAULT_THEME.comment)));
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bars_scale_to_largest_value() {
        let lines = bar_lines(&[1, 4], None, 8);
        let bar = |line: &Line| line.spans[1].content.chars().count();
        assert_eq!(bar(&lines[0]), 2);
        assert_eq!(bar(&lines[1]), 8);
    }

    #[test]
    fn test_grid_cells_are_padded() {
        let lines = grid_lines(&[vec![1, 10]], None);
        assert_eq!(lines[0].spans[0].content, "  1 ");
        assert_eq!(lines[0].spans[1].content, " 10 ");
    }

    #[test]
    fn test_record_highlight_marks_first_array_only() {
        let mut fields = std::collections::BTreeMap::new();
        fields.insert("items".to_string(), Value::Ints(vec![1, 2, 3]));
        fields.insert("path".to_string(), Value::Ints(vec![2, 1]));
        let highlight = Highlight::indices([1]);
        let lines = data_lines(&Value::Record(fields), Some(&highlight), 10);

        let marked = |line: &Line| {
            line.spans
                .iter()
                .filter(|span| span.style.bg == Some(DEFAULT_THEME.highlight_bg))
                .map(|span| span.content.to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(marked(&lines[0]), vec!["2"]);
        assert!(marked(&lines[1]).is_empty());
    }

    #[test]
    fn test_empty_data_draws_nothing() {
        assert!(data_lines(&Value::Empty, None, 10).is_empty());
        assert_eq!(data_lines(&Value::Int(3), None, 10).len(), 1);
    }
}
