use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    // Header and footer keep one line each; the body takes the rest
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    MainLayout {
        header_area: chunks[0],
        body_area: chunks[1],
        footer_area: chunks[2],
    }
}

/// One cell of the tile grid; `index` points into the photo list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSlot {
    pub area: Rect,
    pub index: usize,
}

/// Lays out `count` tiles in rows of `columns`, scrolled so that the row
/// holding `cursor` is on screen. Only visible tiles are returned.
pub fn tile_grid(area: Rect, columns: usize, tile_height: u16, count: usize, cursor: usize) -> Vec<TileSlot> {
    let columns = columns.max(1);
    if count == 0 || area.width == 0 || area.height == 0 {
        return Vec::new();
    }

    let tile_height = tile_height.clamp(1, area.height);
    let visible_rows = (area.height / tile_height).max(1) as usize;
    let total_rows = count.div_ceil(columns);
    let cursor_row = cursor.min(count - 1) / columns;

    // Scroll clamping 📏 keep the cursor row last on screen once it passes the fold
    let first_row = cursor_row
        .saturating_sub(visible_rows - 1)
        .min(total_rows.saturating_sub(visible_rows));

    let tile_width = area.width / columns as u16;
    let mut slots = Vec::new();
    for row in first_row..(first_row + visible_rows).min(total_rows) {
        let y = area.y + (row - first_row) as u16 * tile_height;
        for col in 0..columns {
            let index = row * columns + col;
            if index >= count {
                break;
            }
            // Last column soaks up the rounding remainder
            let width = if col + 1 == columns {
                area.width - tile_width * col as u16
            } else {
                tile_width
            };
            slots.push(TileSlot {
                area: Rect::new(area.x + tile_width * col as u16, y, width, tile_height),
                index,
            });
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_layout_reserves_header_and_footer() {
        let layout = get_main_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header_area.height, 1);
        assert_eq!(layout.footer_area.y, 23);
        assert_eq!(layout.body_area.height, 22);
    }

    #[test]
    fn test_grid_fills_rows_left_to_right() {
        let slots = tile_grid(Rect::new(0, 0, 90, 30), 3, 10, 5, 0);
        let indices: Vec<usize> = slots.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(slots[1].area, Rect::new(30, 0, 30, 10));
        assert_eq!(slots[3].area.y, 10);
    }

    #[test]
    fn test_scroll_clamping() {
        // 2 visible rows of 3 columns, 12 photos = 4 rows
        let area = Rect::new(0, 0, 90, 20);

        // Cursor on screen: no scroll
        let slots = tile_grid(area, 3, 10, 12, 4);
        assert_eq!(slots.first().map(|s| s.index), Some(0));

        // Cursor on row 2 scrolls one row
        let slots = tile_grid(area, 3, 10, 12, 7);
        assert_eq!(slots.first().map(|s| s.index), Some(3));
        assert!(slots.iter().any(|s| s.index == 7));

        // Past the end clamps to the last page
        let slots = tile_grid(area, 3, 10, 12, 99);
        assert_eq!(slots.first().map(|s| s.index), Some(6));
        assert_eq!(slots.last().map(|s| s.index), Some(11));
    }

    #[test]
    fn test_last_column_takes_remainder() {
        let slots = tile_grid(Rect::new(0, 0, 100, 10), 3, 10, 3, 0);
        assert_eq!(slots[2].area.width, 34);
    }

    #[test]
    fn test_empty_grid() {
        assert!(tile_grid(Rect::new(0, 0, 100, 10), 3, 10, 0, 0).is_empty());
        assert!(tile_grid(Rect::new(0, 0, 0, 0), 3, 10, 4, 0).is_empty());
    }
}
