//! Variables pane rendering

use super::formatting::format_value_styled;
use crate::step::Variables;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the variables of the current step, one per line
pub fn render_variables_pane(
    frame: &mut Frame,
    area: Rect,
    variables: &Variables,
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
        .title(" Variables ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if variables.is_empty() {
        let paragraph = Paragraph::new("(none at this step)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = variables
        .iter()
        .map(|(name, value)| {
            let name_style = if name == "result" {
                Style::default()
                    .fg(DEFAULT_THEME.result)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.name)
            };
            let mut spans = vec![
                Span::styled(name.to_string(), name_style),
                Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
            ];
            spans.extend(format_value_styled(value));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
