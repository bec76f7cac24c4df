//! Full-screen photo viewer state: position, drag-to-dismiss, image loading.

use crate::storage::{Photo, PhotoId};

/// Vertical drag distance past which releasing dismisses the viewer.
pub const DISMISS_THRESHOLD: f32 = 100.0;
/// Drag distance at which the viewer is fully faded.
pub const FADE_DISTANCE: f32 = 500.0;

/// Where the selected photo sits in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// `None` when the selected id is no longer in the sequence.
    pub index: Option<usize>,
    pub total: usize,
}

impl Position {
    pub fn locate(photos: &[Photo], id: PhotoId) -> Self {
        Self {
            index: photos.iter().position(|p| p.id == id),
            total: photos.len(),
        }
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    pub fn has_next(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.total)
    }

    /// "3 of 12"
    pub fn label(&self) -> Option<String> {
        self.index.map(|i| format!("{} of {}", i + 1, self.total))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    Next,
    Previous,
    Dismiss,
    Download,
}

/// Tracks a vertical pointer drag on the viewer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    offset: f32,
    anchor_row: Option<u16>,
}

impl DragState {
    pub fn begin(&mut self, row: u16) {
        self.anchor_row = Some(row);
        self.offset = 0.0;
    }

    /// Updates the live offset from a terminal row, scaled to drag units.
    pub fn drag_to_row(&mut self, row: u16, units_per_row: f32) {
        if let Some(anchor) = self.anchor_row {
            self.offset = (row as f32 - anchor as f32) * units_per_row;
        }
    }

    pub fn drag_to(&mut self, offset: f32) {
        self.offset = offset;
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor_row.is_some()
    }

    /// Not clamped; rendering decides what a negative opacity looks like.
    pub fn opacity(&self) -> f32 {
        1.0 - self.offset.abs() / FADE_DISTANCE
    }

    /// Ends the drag. Returns whether the release should dismiss the viewer.
    pub fn release(&mut self) -> bool {
        let dismiss = self.offset.abs() > DISMISS_THRESHOLD;
        self.offset = 0.0;
        self.anchor_row = None;
        dismiss
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    pub drag: DragState,
    showing: Option<PhotoId>,
    image_loading: bool,
}

impl ViewerState {
    pub fn photo_changed(&mut self, id: PhotoId) {
        if self.showing != Some(id) {
            self.showing = Some(id);
            self.image_loading = true;
        }
    }

    /// The preview for `id` finished loading (or failed to).
    pub fn image_settled(&mut self, id: PhotoId) {
        if self.showing == Some(id) {
            self.image_loading = false;
        }
    }

    pub fn is_image_loading(&self) -> bool {
        self.image_loading
    }

    pub fn show_overlay(&self, downloading_this: bool) -> bool {
        self.image_loading || downloading_this
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photos(n: u32) -> Vec<Photo> {
        (0..n)
            .map(|i| Photo {
                id: PhotoId::new(i),
                name: format!("p{}", i),
                file_name: format!("p{}.jpg", i),
                url: format!("https://cdn.test/p{}.jpg", i),
            })
            .collect()
    }

    #[test]
    fn test_position_bounds() {
        let list = photos(5);
        let first = Position::locate(&list, PhotoId::new(0));
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = Position::locate(&list, PhotoId::new(4));
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert_eq!(last.label().as_deref(), Some("5 of 5"));
    }

    #[test]
    fn test_missing_selection_disables_navigation() {
        let list = photos(3);
        let gone = Position::locate(&list, PhotoId::new(9));
        assert_eq!(gone.index, None);
        assert!(!gone.has_previous());
        assert!(!gone.has_next());
        assert_eq!(gone.label(), None);
    }

    #[test]
    fn test_drag_release_threshold() {
        let mut drag = DragState::default();
        drag.begin(10);
        drag.drag_to(150.0);
        assert!((drag.opacity() - 0.7).abs() < 1e-6);
        assert!(drag.release());
        assert_eq!(drag.offset(), 0.0);

        drag.begin(10);
        drag.drag_to(-80.0);
        assert!(!drag.release());
        assert_eq!(drag.offset(), 0.0);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drag_rows_scale() {
        let mut drag = DragState::default();
        drag.drag_to_row(30, 20.0);
        assert_eq!(drag.offset(), 0.0, "no anchor, no movement");

        drag.begin(10);
        drag.drag_to_row(4, 20.0);
        assert_eq!(drag.offset(), -120.0);
        assert!(drag.release());
    }

    #[test]
    fn test_image_loading_follows_photo() {
        let mut viewer = ViewerState::default();
        viewer.photo_changed(PhotoId::new(1));
        assert!(viewer.is_image_loading());

        // A late result for another photo does not clear the flag
        viewer.image_settled(PhotoId::new(0));
        assert!(viewer.is_image_loading());

        viewer.image_settled(PhotoId::new(1));
        assert!(!viewer.is_image_loading());
        assert!(viewer.show_overlay(true));
        assert!(!viewer.show_overlay(false));
    }
}
