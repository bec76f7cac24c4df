use crate::access::AccessDecision;
use crate::app::App;
use crate::gallery::ViewMode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(28)])
        .split(area);

    // Title + view tabs
    let mut spans = vec![Span::styled(
        " ▣ gatefold ",
        Style::default().fg(theme.magenta).add_modifier(Modifier::BOLD),
    )];
    if let Some(ref name) = app.token_name {
        spans.push(Span::styled(format!("· {} ", name), Style::default().fg(theme.overlay)));
    }

    if app.access_decision() == AccessDecision::Granted {
        spans.push(Span::raw("  "));
        let keys = [&app.keys.view_grid, &app.keys.view_tiles, &app.keys.view_list];
        for (mode, key) in ViewMode::ALL.iter().zip(keys) {
            let style = if *mode == app.gallery.view_mode {
                Style::default()
                    .fg(theme.base)
                    .bg(theme.blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.overlay)
            };
            spans.push(Span::styled(
                format!(" {} {} ", app.keys.display(key), mode.label()),
                style,
            ));
            spans.push(Span::raw(" "));
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    // Wallet badge
    let badge = match app.wallet.short_address() {
        Some(addr) => Line::from(vec![
            Span::styled("● ", Style::default().fg(theme.green)),
            Span::styled(format!("{} ", addr), Style::default().fg(theme.text)),
        ]),
        None => Line::from(vec![
            Span::styled("○ ", Style::default().fg(theme.overlay)),
            Span::styled("not connected ", Style::default().fg(theme.overlay)),
        ]),
    };
    f.render_widget(Paragraph::new(badge).alignment(Alignment::Right), chunks[1]);
}
