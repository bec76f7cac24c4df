use crate::access::AccessDecision;
use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let k = &app.keys;
    let pair = |a: &str, b: &str| format!("{}/{}", k.display(a), k.display(b));

    // 🎹 WhichKey-style floating popup, keys for whatever is on screen
    let (title, keys): (&str, Vec<(String, &str, &str)>) = match app.access_decision() {
        AccessDecision::Granted if app.gallery.selection().is_some() => (
            "Viewer",
            vec![
                (pair(&k.nav_left, &k.nav_left_alt), "⏮️", "Previous photo"),
                (pair(&k.nav_right, &k.nav_right_alt), "⏭️", "Next photo"),
                (k.display(&k.download), "💾", "Download"),
                (pair(&k.close, &k.close_alt), "✖️", "Close"),
                ("drag".to_string(), "🖱️", "Drag down to dismiss"),
            ],
        ),
        AccessDecision::Granted => (
            "Gallery",
            vec![
                (
                    format!(
                        "{}{}{}",
                        k.display(&k.view_grid),
                        k.display(&k.view_tiles),
                        k.display(&k.view_list)
                    ),
                    "🗂️",
                    "Grid / Tiles / List",
                ),
                (k.display(&k.cycle_view), "🔄", "Next layout"),
                (
                    format!(
                        "{}{}{}{}",
                        k.display(&k.nav_left),
                        k.display(&k.nav_down),
                        k.display(&k.nav_up),
                        k.display(&k.nav_right)
                    ),
                    "🧭",
                    "Move",
                ),
                (k.display(&k.open), "🖼️", "Open photo"),
                (k.display(&k.download), "💾", "Download"),
            ],
        ),
        AccessDecision::ConnectPrompt => (
            "Gate",
            vec![(k.display(&k.connect), "🔗", "Connect wallet")],
        ),
        AccessDecision::Checking | AccessDecision::Denied => (
            "Gate",
            vec![
                (k.display(&k.recheck), "↺", "Check again"),
                (k.display(&k.disconnect), "⏏️", "Disconnect"),
            ],
        ),
    };

    let mut global_keys: Vec<(String, &str, &str)> = Vec::new();
    if app.wallet.is_connected() && app.access_decision() == AccessDecision::Granted {
        global_keys.push((k.display(&k.recheck), "↺", "Re-check access"));
        global_keys.push((k.display(&k.disconnect), "⏏️", "Disconnect"));
    }
    global_keys.push((k.display(&k.toggle_keyhints), "❓", "Toggle keys"));
    global_keys.push((k.display(&k.quit), "🚪", "Quit"));

    // Build popup content first to calculate exact height
    let mut lines: Vec<Line> = Vec::new();
    for (key, icon, desc) in &keys {
        lines.push(key_line(key, icon, desc, theme.yellow, theme.text));
    }
    if !keys.is_empty() {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "────── Global ──────",
        Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    for (key, icon, desc) in &global_keys {
        lines.push(key_line(key, icon, desc, theme.green, theme.text));
    }

    // Calculate popup size - fit content exactly 📏
    let content_width = keys
        .iter()
        .chain(global_keys.iter())
        .map(|(k, _i, d)| 2 + k.width().max(7) + 3 + 3 + d.width())
        .max()
        .unwrap_or(20)
        .max(22);

    let max_height = f.area().height.saturating_sub(4);
    let popup_height = (lines.len() as u16 + 2).min(max_height); // +2 for borders
    let popup_width = (content_width as u16 + 4).min(f.area().width.saturating_sub(2));

    // Position at bottom-right
    let popup_x = f.area().width.saturating_sub(popup_width + 1);
    let popup_y = f.area().height.saturating_sub(popup_height + 2);
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.blue))
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Left)
            .style(Style::default().bg(Color::Reset)),
    );
    f.render_widget(popup, popup_area);
}

fn key_line<'a>(key: &str, icon: &str, desc: &'a str, key_color: Color, text_color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!(" {:<7} ", key),
            Style::default().fg(key_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::raw(format!("{} ", icon)),
        Span::styled(desc, Style::default().fg(text_color)),
    ])
}
