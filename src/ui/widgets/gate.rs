use crate::access::{AccessDecision, BalanceQuery};
use crate::app::App;
use crate::ui::utils::{centered_rect, truncate};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Connect prompt, balance check, or access denied 🔐
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let keys = &app.keys;
    let token = app
        .token_name
        .clone()
        .unwrap_or_else(|| "the collection token".to_string());

    let key_style = Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(theme.text);
    let dim_style = Style::default().fg(theme.overlay);

    let (title, accent, mut lines) = match app.access_decision() {
        AccessDecision::ConnectPrompt => (
            " 🔐 Members only ",
            theme.blue,
            vec![
                Line::from(Span::styled(
                    format!("This gallery is open to holders of {}.", token),
                    text_style,
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Press ", dim_style),
                    Span::styled(keys.display(&keys.connect), key_style),
                    Span::styled(" to connect a wallet", dim_style),
                ]),
            ],
        ),
        AccessDecision::Checking => (
            " ⏳ Checking ",
            theme.yellow,
            vec![
                Line::from(Span::styled(
                    format!(
                        "Looking up {} for {}…",
                        token,
                        app.wallet.short_address().unwrap_or_default()
                    ),
                    text_style,
                )),
                Line::from(""),
                Line::from(Span::styled("This only reads the chain.", dim_style)),
            ],
        ),
        AccessDecision::Denied => {
            let mut lines = vec![
                Line::from(Span::styled(
                    "Access required",
                    Style::default().fg(theme.red).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!(
                        "{} holds no {}.",
                        app.wallet.short_address().unwrap_or_default(),
                        token
                    ),
                    text_style,
                )),
            ];
            if let BalanceQuery::Failed(ref reason) = app.balance {
                lines.push(Line::from(Span::styled(
                    format!("Balance lookup failed: {}", truncate(reason, 60)),
                    Style::default().fg(theme.red),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(keys.display(&keys.recheck), key_style),
                Span::styled(" check again   ", dim_style),
                Span::styled(keys.display(&keys.disconnect), key_style),
                Span::styled(" disconnect", dim_style),
            ]));
            (" 🚫 Access Required ", theme.red, lines)
        }
        // Drawn by the gallery instead
        AccessDecision::Granted => return,
    };

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Contract ", dim_style),
        Span::styled(app.contract.clone(), Style::default().fg(theme.cyan)),
    ]));
    if let Some(ref project) = app.walletconnect_project_id {
        lines.push(Line::from(vec![
            Span::styled("Project  ", dim_style),
            Span::styled(project.clone(), dim_style),
        ]));
    }

    let height = lines.len() as u16 + 4;
    let card = centered_rect(area, 64, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .title(title)
        .title_alignment(Alignment::Center);

    let p = Paragraph::new(lines)
        .block(block.padding(Padding::uniform(1)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(p, card);
}
