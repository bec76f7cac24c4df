use crate::app::{App, InputMode};
use crate::ui::utils::centered_rect;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let Some(ref input) = app.input_state else {
        return;
    };
    let theme = &app.theme;

    let width = 60.min(f.area().width.saturating_sub(4));
    let area = centered_rect(f.area(), width, 6);
    f.render_widget(Clear, area);

    // Keep the tail visible once the address outgrows the box
    let room = width.saturating_sub(6) as usize;
    let skip = input.value.chars().count().saturating_sub(room);
    let visible: String = input.value.chars().skip(skip).collect();

    let hint = match input.mode {
        InputMode::ConnectWallet => "0x followed by 40 hex digits · Enter to connect",
    };

    let lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " > ",
                Style::default()
                    .fg(theme.green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(visible, Style::default().fg(theme.text)),
            Span::styled(
                "▌",
                Style::default()
                    .fg(theme.green)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(format!(" {}", hint), Style::default().fg(theme.overlay))),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue))
        .title(format!(" {} ", input.title))
        .title_alignment(Alignment::Left)
        .style(Style::default().bg(Color::Reset));

    let p = Paragraph::new(lines).block(block);
    f.render_widget(p, area);
}
