use crate::app::App;
use crate::gallery::ViewMode;
use crate::preview::{PreviewCache, PreviewState};
use crate::storage::Photo;
use crate::ui::layout::{tile_grid, TileSlot};
use crate::ui::theme::Theme;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
    Frame,
};

/// Placeholder tiles shown while the photo list loads.
pub const SKELETON_TILES: usize = 6;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let mode = app.gallery.view_mode;
    let columns = mode.columns(area.width);
    let tile_height = mode.tile_height(area.width / columns as u16);
    app.grid_columns = columns;

    if app.gallery.is_loading() {
        app.tile_areas.clear();
        for slot in tile_grid(area, columns, tile_height, SKELETON_TILES, 0) {
            render_skeleton(f, slot.area, &app.theme);
        }
        return;
    }

    if app.gallery.is_empty() {
        app.tile_areas.clear();
        let theme = &app.theme;
        let y = area.y + area.height / 2;
        let line_area = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
        let p = Paragraph::new(Line::from(Span::styled(
            "No photos in this gallery yet",
            Style::default().fg(theme.overlay),
        )))
        .alignment(Alignment::Center);
        f.render_widget(p, line_area);
        return;
    }

    let slots = tile_grid(
        area,
        columns,
        tile_height,
        app.gallery.photos().len(),
        app.gallery.cursor(),
    );

    let mut tile_areas = Vec::with_capacity(slots.len());
    for TileSlot { area: tile, index } in slots {
        let Some(photo) = app.gallery.photos().get(index) else {
            continue;
        };
        let focused = index == app.gallery.cursor();
        let downloading = app.gallery.is_downloading(photo.id);
        render_tile(
            f,
            tile,
            photo,
            mode,
            TileFlags { focused, downloading },
            &app.theme,
            &mut app.previews,
        );
        tile_areas.push((tile, photo.id));
    }
    app.tile_areas = tile_areas;
}

struct TileFlags {
    focused: bool,
    downloading: bool,
}

fn render_tile(
    f: &mut Frame,
    area: Rect,
    photo: &Photo,
    mode: ViewMode,
    flags: TileFlags,
    theme: &Theme,
    previews: &mut PreviewCache,
) {
    let border_style = if flags.focused {
        Style::default().fg(theme.blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.surface)
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    // List rows carry the name in the side panel instead
    if mode != ViewMode::List {
        let title_width = area.width.saturating_sub(4) as usize;
        block = block.title(Span::styled(
            format!(" {} ", truncate(&photo.name, title_width.saturating_sub(2))),
            Style::default().fg(if flags.focused { theme.text } else { theme.overlay }),
        ));
    }
    if flags.downloading {
        block = block.title_bottom(
            Line::from(Span::styled(" ⬇ saving ", Style::default().fg(theme.green))).right_aligned(),
        );
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    if mode == ViewMode::List {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Min(10)])
            .split(inner);
        render_thumbnail(f, chunks[0], photo, theme, previews);
        render_details(f, chunks[1], photo, flags.focused, theme);
    } else {
        render_thumbnail(f, inner, photo, theme, previews);
    }
}

fn render_thumbnail(f: &mut Frame, area: Rect, photo: &Photo, theme: &Theme, previews: &mut PreviewCache) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let placeholder = match previews.state(photo.id) {
        Some(PreviewState::Loaded(_)) => None,
        Some(PreviewState::Failed) => Some(("✗ no preview", theme.red)),
        Some(PreviewState::Loading) | None => Some(("Loading…", theme.overlay)),
    };

    if let Some((text, color)) = placeholder {
        let y = area.y + area.height / 2;
        let p = Paragraph::new(Span::styled(text, Style::default().fg(color))).alignment(Alignment::Center);
        f.render_widget(p, Rect::new(area.x, y, area.width, 1));
        return;
    }

    if let Some(lines) = previews.lines(photo.id, area.width, area.height) {
        let rows = lines.len() as u16;
        let top = area.height.saturating_sub(rows) / 2;
        let image_area = Rect::new(area.x, area.y + top, area.width, area.height - top);
        let p = Paragraph::new(lines.to_vec()).alignment(Alignment::Center);
        f.render_widget(p, image_area);
    }
}

fn render_details(f: &mut Frame, area: Rect, photo: &Photo, focused: bool, theme: &Theme) {
    let width = area.width.saturating_sub(2) as usize;
    let name_style = if focused {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(truncate(&photo.name, width), name_style)),
        Line::from(Span::styled(
            truncate(&photo.file_name, width),
            Style::default().fg(theme.overlay),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(photo.extension().to_uppercase(), Style::default().fg(theme.cyan)),
            Span::styled(format!("  {}", photo.id), Style::default().fg(theme.overlay)),
        ]),
    ];
    let block = Block::default().padding(Padding::horizontal(1));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_skeleton(f: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.surface));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let fill: Vec<Line> = (0..inner.height)
        .map(|_| Line::from(Span::styled("░".repeat(inner.width as usize), Style::default().fg(theme.surface))))
        .collect();
    f.render_widget(Paragraph::new(fill), inner);
}
