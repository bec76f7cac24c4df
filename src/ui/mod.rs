pub mod layout;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use crate::access::AccessDecision;
use crate::app::App;
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // 1. Layout
    let main_layout = layout::get_main_layout(area);

    // 2. Header
    widgets::header::render(f, main_layout.header_area, app);

    // 3. Body: the gate until access is granted, then the gallery
    if app.access_decision() == AccessDecision::Granted {
        widgets::gallery::render(f, main_layout.body_area, app);

        // 4. Viewer sits on top of the gallery
        if app.gallery.selection().is_some() {
            widgets::viewer::render(f, main_layout.body_area, app);
        } else {
            app.viewer_area = None;
        }
    } else {
        app.tile_areas.clear();
        app.viewer_area = None;
        widgets::gate::render(f, main_layout.body_area, app);
    }

    // 5. Footer Hint (if no popup active)
    if !app.show_keyhints {
        let theme = &app.theme;
        let hint = Line::from(vec![
            Span::styled(
                format!(" {} ", app.keys.display(&app.keys.toggle_keyhints)),
                Style::default()
                    .fg(theme.overlay)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("keys ", Style::default().fg(theme.overlay)),
        ]);
        let footer = Paragraph::new(hint).alignment(Alignment::Right);
        f.render_widget(footer, main_layout.footer_area);
    }

    // 6. Popups (Overlays)
    widgets::popups::render(f, app);
}
