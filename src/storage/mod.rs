pub mod adapter;
pub mod bucket;

pub use adapter::{display_name, is_image, PhotoSource, PhotoSourceAdapter, DEFAULT_PAGE_LIMIT};
pub use bucket::{ListOptions, ObjectStore, StorageError, StorageObject, SupabaseStorage};

use std::fmt;

/// Stable identifier assigned to a photo when a listing is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoId(u32);

impl PhotoId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A displayable photo 📷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: PhotoId,
    /// Display label, extension stripped.
    pub name: String,
    /// Object name as listed, extension kept.
    pub file_name: String,
    pub url: String,
}

impl Photo {
    pub fn extension(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && !ext.contains('/'))
            .unwrap_or("jpg")
    }
}
