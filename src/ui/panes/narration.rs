//! Step narration pane

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Render the description of the current step
pub fn render_narration_pane(
    frame: &mut Frame,
    area: Rect,
    algorithm: &str,
    description: &str,
    step_id: u64,
) {
    let block = Block::default()
        .title(format!(" {} ", algorithm))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 1, 0, 0));

    let line = Line::from(vec![
        Span::styled(
            format!("#{} ", step_id),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            description.to_string(),
            Style::default()
                .fg(DEFAULT_THEME.fg)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(line)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
