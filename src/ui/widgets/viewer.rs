use crate::app::App;
use crate::preview::PreviewState;
use crate::ui::utils::{centered_rect, truncate};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// Below this opacity the image is drawn dimmed.
const DIM_BELOW: f32 = 0.6;

/// Full-body photo modal 🖼️
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let Some(photo) = app.gallery.selected().cloned() else {
        app.viewer_area = None;
        return;
    };
    let position = app.gallery.position();
    let drag = app.gallery.viewer.drag.clone();
    let downloading_this = app.gallery.is_downloading(photo.id);
    let show_overlay = app.gallery.viewer.show_overlay(downloading_this);
    let theme = app.theme.clone();

    f.render_widget(Clear, area);

    // Name and "i of n"; the counter is dropped if the photo left the list
    let mut caption = vec![Span::styled(
        format!(" {} ", truncate(&photo.name, 40)),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )];
    if let Some(label) = position.as_ref().and_then(|p| p.label()) {
        caption.push(Span::styled(format!("· {} ", label), Style::default().fg(theme.overlay)));
    }
    let keys = &app.keys;
    let hint = Line::from(vec![
        Span::styled(
            format!(" {}/{} ", keys.display(&keys.nav_left_alt), keys.display(&keys.nav_right_alt)),
            Style::default().fg(theme.yellow),
        ),
        Span::styled("browse  ", Style::default().fg(theme.overlay)),
        Span::styled(format!("{} ", keys.display(&keys.download)), Style::default().fg(theme.yellow)),
        Span::styled("save  ", Style::default().fg(theme.overlay)),
        Span::styled(format!("{} ", keys.display(&keys.close)), Style::default().fg(theme.yellow)),
        Span::styled("close ", Style::default().fg(theme.overlay)),
    ])
    .right_aligned();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue))
        .title_bottom(Line::from(caption).left_aligned())
        .title_bottom(hint)
        .style(Style::default().bg(Color::Reset));
    let inner = block.inner(area);
    f.render_widget(block, area);
    app.viewer_area = Some(inner);

    // Two columns either side for the arrows
    let image_area = Rect::new(
        inner.x + 2,
        inner.y,
        inner.width.saturating_sub(4),
        inner.height,
    );

    // Drag: shift rows with the pointer, fade with distance
    let opacity = drag.opacity();
    let shift = if app.drag_units_per_row > 0.0 {
        (drag.offset() / app.drag_units_per_row).round() as i32
    } else {
        0
    };

    let failed = matches!(app.previews.state(photo.id), Some(PreviewState::Failed));
    if failed {
        let p = Paragraph::new(Span::styled(
            "✗ This photo could not be loaded",
            Style::default().fg(theme.red),
        ))
        .alignment(Alignment::Center);
        f.render_widget(p, centered_rect(image_area, image_area.width, 1));
    } else if opacity > 0.0 {
        if let Some(lines) = app.previews.lines(photo.id, image_area.width, image_area.height) {
            let mut lines = lines.to_vec();
            if opacity < DIM_BELOW {
                lines = lines
                    .into_iter()
                    .map(|line| line.patch_style(Style::default().add_modifier(Modifier::DIM)))
                    .collect();
            }
            let rows = lines.len() as u16;
            let top = image_area.height.saturating_sub(rows) / 2;
            let target = shifted(image_area, top, shift);
            let skip = (-(top as i32 + shift)).max(0) as u16;
            let p = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .scroll((skip, 0));
            f.render_widget(p, target);
        }
    }

    // Prev / next arrows
    if let Some(pos) = position {
        let mid = inner.y + inner.height / 2;
        let arrow_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
        if pos.has_previous() && inner.width > 0 {
            f.render_widget(Paragraph::new(Span::styled("‹", arrow_style)), Rect::new(inner.x, mid, 1, 1));
        }
        if pos.has_next() && inner.width > 1 {
            f.render_widget(
                Paragraph::new(Span::styled("›", arrow_style)),
                Rect::new(inner.right() - 1, mid, 1, 1),
            );
        }
    }

    // Loading / saving overlay
    if show_overlay {
        let label = if downloading_this { "⬇ Saving…" } else { "Loading…" };
        let overlay = centered_rect(inner, 16, 3);
        f.render_widget(Clear, overlay);
        let p = Paragraph::new(Span::styled(label, Style::default().fg(theme.yellow)))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme.overlay)),
            );
        f.render_widget(p, overlay);
    }
}

/// `area` with its content pushed down by `top + shift` rows, clipped to `area`.
fn shifted(area: Rect, top: u16, shift: i32) -> Rect {
    let down = (top as i32 + shift).clamp(0, area.height as i32) as u16;
    Rect::new(area.x, area.y + down, area.width, area.height - down)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_clips_to_area() {
        let area = Rect::new(0, 5, 20, 10);
        assert_eq!(shifted(area, 2, 0), Rect::new(0, 7, 20, 8));
        assert_eq!(shifted(area, 2, 3), Rect::new(0, 10, 20, 5));
        // Dragging up past the top keeps the area, content scrolls instead
        assert_eq!(shifted(area, 2, -6), area);
        assert_eq!(shifted(area, 2, 40), Rect::new(0, 15, 20, 0));
    }
}
