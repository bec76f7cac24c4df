use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

/// Truncates to `max_width` display columns, appending "…" if cut 🛡️
pub fn truncate(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// A `width` x `height` rect centered in `area`, clipped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_by_display_width() {
        assert_eq!(truncate("DSCF0001", 20), "DSCF0001");
        assert_eq!(truncate("DSCF0001", 5), "DSCF…");
        // Wide glyphs count double
        assert_eq!(truncate("富士山の写真", 5), "富士…");
    }

    #[test]
    fn test_centered_rect_clips() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered_rect(area, 4, 2), Rect::new(3, 1, 4, 2));
        assert_eq!(centered_rect(area, 40, 20), area);
    }
}
