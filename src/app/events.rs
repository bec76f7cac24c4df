use crate::access::{ChainError, TokenBalance};
use crate::gallery::DownloadError;
use crate::storage::{Photo, PhotoId};
use crossterm::event::Event;
use image::DynamicImage;
use std::path::PathBuf;

/// Everything the event loop reacts to. Background results carry the
/// access session they were started in so stale ones can be dropped.
pub enum AppEvent {
    Input(Event),
    Tick,
    BalanceResolved {
        session: u64,
        result: Result<TokenBalance, ChainError>,
    },
    TokenNameResolved {
        session: u64,
        name: String,
    },
    PhotosLoaded {
        session: u64,
        photos: Vec<Photo>,
    },
    PreviewLoaded {
        session: u64,
        id: PhotoId,
        image: Option<DynamicImage>,
    },
    DownloadFinished {
        session: u64,
        id: PhotoId,
        result: Result<PathBuf, DownloadError>,
    },
}
