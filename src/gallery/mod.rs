pub mod download;
pub mod viewer;

pub use download::{DownloadError, Downloader};
pub use viewer::{DragState, Position, ViewerCommand, ViewerState};

use crate::storage::{Photo, PhotoId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Gallery layout 🖼️
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    Tiles,
    List,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Grid, ViewMode::Tiles, ViewMode::List];

    pub fn next(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::Tiles,
            ViewMode::Tiles => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Grid => "Grid",
            ViewMode::Tiles => "Tiles",
            ViewMode::List => "List",
        }
    }

    /// Columns for a body `width` cells wide.
    pub fn columns(self, width: u16) -> usize {
        match self {
            ViewMode::Grid if width >= 120 => 3,
            ViewMode::Grid if width >= 70 => 2,
            ViewMode::Grid => 1,
            ViewMode::Tiles if width >= 120 => 4,
            ViewMode::Tiles if width >= 70 => 3,
            ViewMode::Tiles => 2,
            ViewMode::List => 1,
        }
    }

    /// Tile height in rows for a tile `tile_width` cells wide.
    pub fn tile_height(self, tile_width: u16) -> u16 {
        match self {
            // Half-block cells are twice as tall as wide: square tiles.
            ViewMode::Grid => (tile_width / 2).max(6),
            ViewMode::Tiles => 10,
            ViewMode::List => 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryPhase {
    Loading,
    Ready,
}

/// Why a download request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadRejected {
    Busy(PhotoId),
    UnknownPhoto,
}

/// Photo list, layout, cursor, selection, and the single download slot.
#[derive(Debug, Clone)]
pub struct Gallery {
    photos: Vec<Photo>,
    phase: GalleryPhase,
    pub view_mode: ViewMode,
    cursor: usize,
    selection: Option<PhotoId>,
    downloading: Option<PhotoId>,
    pub viewer: ViewerState,
}

impl Gallery {
    pub fn new(view_mode: ViewMode) -> Self {
        Self {
            photos: Vec::new(),
            phase: GalleryPhase::Loading,
            view_mode,
            cursor: 0,
            selection: None,
            downloading: None,
            viewer: ViewerState::default(),
        }
    }

    /// Discards the current list and waits for a new one. A running download
    /// keeps the slot; only its completion frees it.
    pub fn begin_loading(&mut self) {
        self.photos.clear();
        self.phase = GalleryPhase::Loading;
        self.cursor = 0;
        self.selection = None;
        self.viewer.reset();
    }

    pub fn populate(&mut self, photos: Vec<Photo>) {
        debug!(count = photos.len(), "gallery populated");
        self.photos = photos;
        self.phase = GalleryPhase::Ready;
        self.cursor = self.cursor.min(self.photos.len().saturating_sub(1));
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn is_loading(&self) -> bool {
        self.phase == GalleryPhase::Loading
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn photo(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    // --- Cursor ---

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_photo(&self) -> Option<&Photo> {
        self.photos.get(self.cursor)
    }

    /// Moves the cursor `dx` columns and `dy` rows, clamped to the list.
    pub fn move_cursor(&mut self, dx: isize, dy: isize, columns: usize) {
        if self.photos.is_empty() {
            return;
        }
        let columns = columns.max(1) as isize;
        let last = self.photos.len() as isize - 1;
        let target = self.cursor as isize + dx + dy * columns;
        self.cursor = target.clamp(0, last) as usize;
    }

    // --- View mode ---

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn cycle_view_mode(&mut self) {
        self.view_mode = self.view_mode.next();
    }

    // --- Selection ---

    pub fn selection(&self) -> Option<PhotoId> {
        self.selection
    }

    pub fn selected(&self) -> Option<&Photo> {
        self.selection.and_then(|id| self.photo(id))
    }

    /// Opens the viewer on `id`. Ignored if `id` is not in the list.
    pub fn select(&mut self, id: PhotoId) -> bool {
        let Some(index) = self.photos.iter().position(|p| p.id == id) else {
            return false;
        };
        self.selection = Some(id);
        self.cursor = index;
        self.viewer.photo_changed(id);
        true
    }

    pub fn select_at_cursor(&mut self) -> bool {
        match self.cursor_photo().map(|p| p.id) {
            Some(id) => self.select(id),
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.viewer.reset();
    }

    pub fn position(&self) -> Option<Position> {
        self.selection.map(|id| Position::locate(&self.photos, id))
    }

    pub fn show_next(&mut self) -> bool {
        match self.position() {
            Some(pos) if pos.has_next() => {
                let id = self.photos[pos.index.unwrap_or(0) + 1].id;
                self.select(id)
            }
            _ => false,
        }
    }

    pub fn show_previous(&mut self) -> bool {
        match self.position() {
            Some(pos) if pos.has_previous() => {
                let id = self.photos[pos.index.unwrap_or(1) - 1].id;
                self.select(id)
            }
            _ => false,
        }
    }

    /// Ends a drag on the viewer, dismissing it past the threshold.
    pub fn release_drag(&mut self) -> bool {
        let dismiss = self.viewer.drag.release();
        if dismiss {
            self.clear_selection();
        }
        dismiss
    }

    // --- Downloads ---

    pub fn downloading(&self) -> Option<PhotoId> {
        self.downloading
    }

    pub fn is_downloading(&self, id: PhotoId) -> bool {
        self.downloading == Some(id)
    }

    /// Claims the download slot for `id`. Only one download runs at a time.
    pub fn begin_download(&mut self, id: PhotoId) -> Result<&Photo, DownloadRejected> {
        if let Some(busy) = self.downloading {
            return Err(DownloadRejected::Busy(busy));
        }
        if self.photo(id).is_none() {
            return Err(DownloadRejected::UnknownPhoto);
        }
        self.downloading = Some(id);
        self.photo(id).ok_or(DownloadRejected::UnknownPhoto)
    }

    /// Frees the slot if `id` holds it.
    pub fn finish_download(&mut self, id: PhotoId) {
        if self.downloading == Some(id) {
            self.downloading = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery_with(n: u32) -> Gallery {
        let mut gallery = Gallery::new(ViewMode::default());
        gallery.populate(
            (0..n)
                .map(|i| Photo {
                    id: PhotoId::new(i),
                    name: format!("photo-{}", i),
                    file_name: format!("photo-{}.jpg", i),
                    url: format!("https://cdn.test/photo-{}.jpg", i),
                })
                .collect(),
        );
        gallery
    }

    #[test]
    fn test_starts_loading_in_grid() {
        let gallery = Gallery::new(ViewMode::default());
        assert!(gallery.is_loading());
        assert_eq!(gallery.view_mode, ViewMode::Grid);
        assert_eq!(gallery.selection(), None);
    }

    #[test]
    fn test_next_and_previous_navigation() {
        let mut gallery = gallery_with(5);
        assert!(gallery.select(PhotoId::new(2)));

        assert!(gallery.show_next());
        assert_eq!(gallery.selection(), Some(PhotoId::new(3)));

        assert!(gallery.show_next());
        assert!(!gallery.show_next(), "no-op at the last photo");
        assert_eq!(gallery.selection(), Some(PhotoId::new(4)));

        gallery.select(PhotoId::new(0));
        assert!(!gallery.show_previous(), "no-op at the first photo");
        assert_eq!(gallery.selection(), Some(PhotoId::new(0)));
    }

    #[test]
    fn test_select_unknown_photo_is_ignored() {
        let mut gallery = gallery_with(2);
        assert!(!gallery.select(PhotoId::new(7)));
        assert_eq!(gallery.selection(), None);
    }

    #[test]
    fn test_drag_release_dismisses_past_threshold() {
        let mut gallery = gallery_with(3);
        gallery.select(PhotoId::new(1));

        gallery.viewer.drag.begin(0);
        gallery.viewer.drag.drag_to(80.0);
        assert!(!gallery.release_drag());
        assert_eq!(gallery.selection(), Some(PhotoId::new(1)));
        assert_eq!(gallery.viewer.drag.offset(), 0.0);

        gallery.viewer.drag.begin(0);
        gallery.viewer.drag.drag_to(150.0);
        assert!(gallery.release_drag());
        assert_eq!(gallery.selection(), None);
    }

    #[test]
    fn test_cursor_moves_by_rows_and_clamps() {
        let mut gallery = gallery_with(7);
        gallery.move_cursor(0, 1, 3);
        assert_eq!(gallery.cursor(), 3);
        gallery.move_cursor(1, 1, 3);
        assert_eq!(gallery.cursor(), 6, "clamped to last");
        gallery.move_cursor(-10, 0, 3);
        assert_eq!(gallery.cursor(), 0);
    }

    #[test]
    fn test_single_download_slot() {
        let mut gallery = gallery_with(3);
        assert!(gallery.begin_download(PhotoId::new(0)).is_ok());
        assert_eq!(
            gallery.begin_download(PhotoId::new(1)).map(|p| p.id),
            Err(DownloadRejected::Busy(PhotoId::new(0)))
        );

        // Finishing someone else's download leaves the slot alone
        gallery.finish_download(PhotoId::new(1));
        assert_eq!(gallery.downloading(), Some(PhotoId::new(0)));

        gallery.finish_download(PhotoId::new(0));
        assert_eq!(gallery.downloading(), None);
        assert_eq!(
            gallery.begin_download(PhotoId::new(9)).map(|p| p.id),
            Err(DownloadRejected::UnknownPhoto)
        );
    }

    #[test]
    fn test_view_mode_cycle_and_columns() {
        let mut gallery = gallery_with(1);
        gallery.cycle_view_mode();
        assert_eq!(gallery.view_mode, ViewMode::Tiles);
        gallery.cycle_view_mode();
        gallery.cycle_view_mode();
        assert_eq!(gallery.view_mode, ViewMode::Grid);

        assert_eq!(ViewMode::Grid.columns(60), 1);
        assert_eq!(ViewMode::Tiles.columns(200), 4);
        assert_eq!(ViewMode::List.columns(200), 1);
    }

    #[test]
    fn test_reload_drops_selection() {
        let mut gallery = gallery_with(3);
        gallery.select(PhotoId::new(2));
        gallery.begin_loading();
        assert!(gallery.is_loading());
        assert!(gallery.is_empty());
        assert_eq!(gallery.selection(), None);
    }

    #[test]
    fn test_reload_keeps_running_download() {
        let mut gallery = gallery_with(3);
        assert!(gallery.begin_download(PhotoId::new(1)).is_ok());

        gallery.begin_loading();
        assert_eq!(gallery.downloading(), Some(PhotoId::new(1)));

        gallery.populate(gallery_with(3).photos().to_vec());
        assert_eq!(
            gallery.begin_download(PhotoId::new(2)).map(|p| p.id),
            Err(DownloadRejected::Busy(PhotoId::new(1)))
        );
        gallery.finish_download(PhotoId::new(1));
        assert!(gallery.begin_download(PhotoId::new(2)).is_ok());
    }
}
