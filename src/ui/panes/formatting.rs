use crate::step::value::Value;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

/// Format a value as plain text
pub(crate) fn format_value_string(value: &Value) -> String {
    match value {
        Value::Empty => "-".to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(x) => format!("{:.4}", x),
        Value::Bool(b) => b.to_string(),
        Value::Text(s) => format!("\"{}\"", s),
        Value::Ints(v) => format!("{:?}", v),
        Value::Grid(rows) => {
            let inner: Vec<String> = rows.iter().map(|r| format!("{:?}", r)).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::List(items) => {
            let inner: Vec<String> = items.iter().map(format_value_string).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Record(fields) => {
            let inner: Vec<String> = fields
                .iter()
                .map(|(k, v)| format!("{}: {}", k, format_value_string(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

/// Format a value with styled spans
pub(crate) fn format_value_styled(value: &Value) -> Vec<Span<'static>> {
    match value {
        Value::Int(_) | Value::Float(_) => vec![Span::styled(
            format_value_string(value),
            Style::default().fg(DEFAULT_THEME.number),
        )],
        Value::Bool(b) => vec![Span::styled(
            b.to_string(),
            Style::default()
                .fg(if *b {
                    DEFAULT_THEME.success
                } else {
                    DEFAULT_THEME.error
                })
                .add_modifier(Modifier::BOLD),
        )],
        Value::Text(_) => vec![Span::styled(
            format_value_string(value),
            Style::default().fg(DEFAULT_THEME.string),
        )],
        Value::Empty => vec![Span::styled(
            "-",
            Style::default()
                .fg(DEFAULT_THEME.comment)
                .add_modifier(Modifier::DIM),
        )],
        _ => highlight_value_string(&format_value_string(value)),
    }
}

/// Colour the digits of a formatted container, leave punctuation grey
fn highlight_value_string(s: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_number = false;

    for ch in s.chars() {
        let is_num = ch.is_ascii_digit() || (ch == '-' && !in_number);
        if is_num != in_number && !current.is_empty() {
            spans.push(styled_chunk(std::mem::take(&mut current), in_number));
        }
        in_number = is_num;
        current.push(ch);
    }
    if !current.is_empty() {
        spans.push(styled_chunk(current, in_number));
    }
    spans
}

fn styled_chunk(text: String, is_number: bool) -> Span<'static> {
    let color = if is_number {
        DEFAULT_THEME.number
    } else {
        DEFAULT_THEME.comment
    };
    Span::styled(text, Style::default().fg(color))
}
