use crate::fetch::AssetFetcher;
use crate::storage::PhotoId;
use anyhow::{Context, Result};
use image::{DynamicImage, GenericImageView};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::debug;

pub enum PreviewState {
    Loading,
    Loaded(DynamicImage),
    Failed,
}

/// Fetches photos and shrinks them to preview size.
pub struct PreviewLoader {
    fetcher: Arc<dyn AssetFetcher>,
    max_dim: u32,
}

impl PreviewLoader {
    pub fn new(fetcher: Arc<dyn AssetFetcher>, max_dim: u32) -> Self {
        Self {
            fetcher,
            max_dim: max_dim.max(16),
        }
    }

    pub async fn load(&self, url: &str) -> Result<DynamicImage> {
        let bytes = self.fetcher.fetch(url).await?;
        let max_dim = self.max_dim;
        // Decoding a full-size camera JPEG is too slow for the event loop.
        tokio::task::spawn_blocking(move || -> Result<DynamicImage> {
            let img = image::load_from_memory(&bytes).context("undecodable image")?;
            Ok(img.thumbnail(max_dim, max_dim))
        })
        .await
        .context("preview decode task panicked")?
    }
}

/// Size of an image fitted into `width` x `height` cells, in half-block pixels.
pub fn fit_within(img_w: u32, img_h: u32, width: u16, height: u16) -> (u32, u32) {
    let box_w = width as f64;
    let box_h = height as f64 * 2.0;
    if img_w == 0 || img_h == 0 || box_w < 1.0 || box_h < 2.0 {
        return (0, 0);
    }
    let scale = (box_w / img_w as f64).min(box_h / img_h as f64);
    let w = ((img_w as f64 * scale).floor() as u32).max(1);
    let h = ((img_h as f64 * scale).floor() as u32).max(2);
    // Two pixel rows per terminal row
    (w, h - h % 2)
}

/// Renders an image as upper-half-block cells (fg = top pixel, bg = bottom).
pub fn render_half_blocks(img: &DynamicImage, width: u16, height: u16) -> Vec<Line<'static>> {
    let (w, h) = fit_within(img.width(), img.height(), width, height);
    if w == 0 || h == 0 {
        return Vec::new();
    }
    let resized = img.resize_exact(w, h, image::imageops::FilterType::Triangle);

    let mut lines = Vec::with_capacity((h / 2) as usize);
    for y in (0..h).step_by(2) {
        let mut spans = Vec::with_capacity(w as usize);
        for x in 0..w {
            let top = resized.get_pixel(x, y);
            let bottom = if y + 1 < h { resized.get_pixel(x, y + 1) } else { top };

            let fg = Color::Rgb(top[0], top[1], top[2]);
            let bg = Color::Rgb(bottom[0], bottom[1], bottom[2]);
            spans.push(Span::styled("▀", Style::default().fg(fg).bg(bg)));
        }
        lines.push(Line::from(spans));
    }
    lines
}

/// Decoded previews kept when nothing else is configured.
pub const DEFAULT_CACHE_SIZE: usize = 96;
/// A photo is drawn at most twice per frame: as a tile and in the viewer.
const SIZES_PER_PHOTO: usize = 2;

type Rendered = ((u16, u16), Vec<Line<'static>>);

/// Decoded previews plus the cells last rendered for each, at the most
/// recent sizes only. Once more than
/// `capacity` previews are loaded, the least recently drawn are dropped and
/// fetched again if they come back into view.
pub struct PreviewCache {
    states: HashMap<PhotoId, PreviewState>,
    rendered: HashMap<PhotoId, Vec<Rendered>>,
    /// Loaded ids, least recently used first.
    recent: VecDeque<PhotoId>,
    capacity: usize,
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

impl PreviewCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            states: HashMap::new(),
            rendered: HashMap::new(),
            recent: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn state(&self, id: PhotoId) -> Option<&PreviewState> {
        self.states.get(&id)
    }

    pub fn is_settled(&self, id: PhotoId) -> bool {
        matches!(
            self.states.get(&id),
            Some(PreviewState::Loaded(_)) | Some(PreviewState::Failed)
        )
    }

    /// Marks `id` as loading. Returns false if it was already requested.
    pub fn mark_loading(&mut self, id: PhotoId) -> bool {
        if self.states.contains_key(&id) {
            return false;
        }
        self.states.insert(id, PreviewState::Loading);
        true
    }

    pub fn store(&mut self, id: PhotoId, image: Option<DynamicImage>) {
        self.rendered.remove(&id);
        self.recent.retain(|r| *r != id);
        match image {
            Some(img) => {
                self.states.insert(id, PreviewState::Loaded(img));
                self.recent.push_back(id);
                self.evict();
            }
            None => {
                self.states.insert(id, PreviewState::Failed);
            }
        }
    }

    /// Number of decoded previews held.
    pub fn loaded(&self) -> usize {
        self.recent.len()
    }

    /// Rendered cells for `id` at `width` x `height`, if its image is loaded.
    pub fn lines(&mut self, id: PhotoId, width: u16, height: u16) -> Option<&[Line<'static>]> {
        if !matches!(self.states.get(&id), Some(PreviewState::Loaded(_))) {
            return None;
        }
        self.touch(id);

        let size = (width, height);
        let sizes = self.rendered.entry(id).or_default();
        match sizes.iter().position(|(s, _)| *s == size) {
            Some(at) => {
                // Most recent first
                let hit = sizes.remove(at);
                sizes.insert(0, hit);
            }
            None => {
                let Some(PreviewState::Loaded(img)) = self.states.get(&id) else {
                    return None;
                };
                sizes.insert(0, (size, render_half_blocks(img, width, height)));
                sizes.truncate(SIZES_PER_PHOTO);
            }
        }
        sizes.first().map(|(_, lines)| lines.as_slice())
    }

    pub fn clear(&mut self) {
        self.states.clear();
        self.rendered.clear();
        self.recent.clear();
    }

    fn touch(&mut self, id: PhotoId) {
        if self.recent.back() == Some(&id) {
            return;
        }
        if let Some(at) = self.recent.iter().position(|r| *r == id) {
            self.recent.remove(at);
            self.recent.push_back(id);
        }
    }

    fn evict(&mut self) {
        while self.recent.len() > self.capacity {
            let Some(oldest) = self.recent.pop_front() else {
                break;
            };
            self.states.remove(&oldest);
            self.rendered.remove(&oldest);
            debug!(id = %oldest, "preview evicted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_fit_keeps_aspect_and_even_height() {
        // 3:2 landscape into 30x10 cells (30x20 px box)
        assert_eq!(fit_within(300, 200, 30, 10), (30, 20));
        // Portrait is height-bound
        assert_eq!(fit_within(200, 400, 30, 10), (10, 20));
        assert_eq!(fit_within(0, 10, 30, 10), (0, 0));
        assert_eq!(fit_within(10, 10, 0, 10), (0, 0));
    }

    #[test]
    fn test_render_half_blocks_colors() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.put_pixel(1, 1, Rgb([0, 0, 255]));
        let img = DynamicImage::ImageRgb8(img);

        let lines = render_half_blocks(&img, 2, 1);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(lines[0].spans[0].style.bg, Some(Color::Rgb(0, 0, 255)));
    }

    #[test]
    fn test_cache_tracks_requests() {
        let mut cache = PreviewCache::default();
        let id = PhotoId::new(3);
        assert!(cache.mark_loading(id));
        assert!(!cache.mark_loading(id));
        assert!(!cache.is_settled(id));
        assert!(cache.lines(id, 4, 2).is_none());

        cache.store(id, Some(DynamicImage::new_rgb8(4, 4)));
        assert!(cache.is_settled(id));
        assert_eq!(cache.lines(id, 4, 2).map(|l| l.len()), Some(2));

        cache.store(PhotoId::new(4), None);
        assert!(cache.is_settled(PhotoId::new(4)));
    }

    #[test]
    fn test_cache_stays_under_its_bound() {
        let mut cache = PreviewCache::new(3);
        for i in 0..10 {
            let id = PhotoId::new(i);
            cache.mark_loading(id);
            cache.store(id, Some(DynamicImage::new_rgb8(4, 4)));
            assert!(cache.loaded() <= 3);
        }
        assert_eq!(cache.loaded(), 3);
        // Evicted ids can be requested again
        assert!(cache.state(PhotoId::new(0)).is_none());
        assert!(cache.mark_loading(PhotoId::new(0)));
        assert!(cache.is_settled(PhotoId::new(9)));
    }

    #[test]
    fn test_drawing_keeps_a_preview_alive() {
        let mut cache = PreviewCache::new(2);
        let (a, b, c) = (PhotoId::new(1), PhotoId::new(2), PhotoId::new(3));
        cache.store(a, Some(DynamicImage::new_rgb8(4, 4)));
        cache.store(b, Some(DynamicImage::new_rgb8(4, 4)));

        // `a` drawn after `b`, so `b` goes first
        assert!(cache.lines(a, 4, 2).is_some());
        cache.store(c, Some(DynamicImage::new_rgb8(4, 4)));
        assert!(cache.is_settled(a));
        assert!(cache.state(b).is_none());
    }

    #[test]
    fn test_resize_replaces_rendered_cells() {
        let mut cache = PreviewCache::new(4);
        let id = PhotoId::new(5);
        cache.store(id, Some(DynamicImage::new_rgb8(8, 8)));

        assert_eq!(cache.lines(id, 8, 4).map(|l| l.len()), Some(4));
        assert_eq!(cache.lines(id, 4, 2).map(|l| l.len()), Some(2));
        assert_eq!(cache.lines(id, 6, 3).map(|l| l.len()), Some(3));
        assert_eq!(cache.rendered.len(), 1);
        assert_eq!(cache.rendered[&id].len(), SIZES_PER_PHOTO);
        assert_eq!(cache.rendered[&id][0].0, (6, 3));
    }
}
