use super::bucket::{ListOptions, ObjectStore, StorageObject};
use super::{Photo, PhotoId};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Where the gallery gets its photos from.
///
/// Never fails: listing errors are logged and whatever was gathered so far
/// (possibly nothing) is returned.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    async fn list_photos(&self) -> Vec<Photo>;
}

fn split_extension(name: &str) -> Option<(&str, &str)> {
    let (stem, ext) = name.rsplit_once('.')?;
    if ext.is_empty() || ext.contains('/') {
        None
    } else {
        Some((stem, ext))
    }
}

pub fn is_image(name: &str) -> bool {
    split_extension(name)
        .map(|(_, ext)| IMAGE_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// File name minus its final extension.
pub fn display_name(name: &str) -> &str {
    split_extension(name).map(|(stem, _)| stem).unwrap_or(name)
}

/// Turns a bucket listing into an ordered, de-duplicated photo sequence.
pub struct PhotoSourceAdapter {
    store: Arc<dyn ObjectStore>,
    prefix: String,
    page_limit: usize,
}

impl PhotoSourceAdapter {
    pub fn new(store: Arc<dyn ObjectStore>, prefix: &str, page_limit: usize) -> Self {
        Self {
            store,
            prefix: prefix.trim_matches('/').to_string(),
            page_limit: page_limit.max(1),
        }
    }

    /// Walks the listing one page at a time until a short page or an error.
    pub async fn list_all_objects(&self) -> Vec<StorageObject> {
        let mut objects = Vec::new();
        let mut offset = 0;

        loop {
            let options = ListOptions::page(&self.prefix, self.page_limit, offset);
            match self.store.list_objects(&options).await {
                Ok(page) => {
                    let count = page.len();
                    debug!(offset, count, "storage page fetched");
                    objects.extend(page);
                    if count < self.page_limit {
                        break;
                    }
                    offset += count;
                }
                Err(e) => {
                    warn!(offset, error = %e, kept = objects.len(), "storage listing stopped early");
                    break;
                }
            }
        }

        objects
    }

    fn object_path(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.prefix, name)
        }
    }

    pub fn to_photos(&self, objects: Vec<StorageObject>) -> Vec<Photo> {
        let mut named: Vec<(String, String)> = objects
            .into_iter()
            .filter(|o| is_image(&o.name))
            .map(|o| (display_name(&o.name).to_string(), o.name))
            .filter(|(display, _)| !display.is_empty())
            .collect();

        named.sort();
        let before = named.len();
        named.dedup_by(|a, b| a.0 == b.0);
        if named.len() != before {
            debug!(dropped = before - named.len(), "duplicate display names dropped");
        }

        named
            .into_iter()
            .enumerate()
            .map(|(i, (name, file_name))| Photo {
                id: PhotoId::new(i as u32),
                url: self.store.public_url(&self.object_path(&file_name)),
                name,
                file_name,
            })
            .collect()
    }
}

#[async_trait]
impl PhotoSource for PhotoSourceAdapter {
    async fn list_photos(&self) -> Vec<Photo> {
        let objects = self.list_all_objects().await;
        let photos = self.to_photos(objects);
        info!(count = photos.len(), "photo listing complete");
        photos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::bucket::StorageError;
    use std::sync::Mutex;

    /// Serves `total` images named `img-0000.jpg`.. in pages, optionally
    /// failing at a given offset.
    struct PagedStore {
        names: Vec<String>,
        fail_at: Option<usize>,
        calls: Mutex<Vec<usize>>,
    }

    impl PagedStore {
        fn with_images(total: usize) -> Self {
            Self {
                names: (0..total).map(|i| format!("img-{:04}.jpg", i)).collect(),
                fail_at: None,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ObjectStore for PagedStore {
        async fn list_objects(&self, options: &ListOptions) -> Result<Vec<StorageObject>, StorageError> {
            self.calls.lock().unwrap().push(options.offset);
            if self.fail_at == Some(options.offset) {
                return Err(StorageError::Status { status: 500, body: "nope".into() });
            }
            Ok(self
                .names
                .iter()
                .skip(options.offset)
                .take(options.limit)
                .map(|n| StorageObject::named(n))
                .collect())
        }

        fn public_url(&self, path: &str) -> String {
            format!("https://cdn.test/{}", path)
        }
    }

    #[tokio::test]
    async fn test_exhausts_pages_until_short_page() {
        // 3 full pages of 10 and a final page of 4
        let store = Arc::new(PagedStore::with_images(34));
        let adapter = PhotoSourceAdapter::new(store.clone(), "", 10);

        let photos = adapter.list_photos().await;
        assert_eq!(photos.len(), 34);
        assert_eq!(*store.calls.lock().unwrap(), vec![0, 10, 20, 30]);

        let names: Vec<&str> = photos.iter().map(|p| p.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted, "ascending and unique");
    }

    #[tokio::test]
    async fn test_exact_multiple_needs_one_empty_page() {
        let store = Arc::new(PagedStore::with_images(20));
        let adapter = PhotoSourceAdapter::new(store.clone(), "", 10);

        assert_eq!(adapter.list_photos().await.len(), 20);
        assert_eq!(*store.calls.lock().unwrap(), vec![0, 10, 20]);
    }

    #[tokio::test]
    async fn test_error_keeps_accumulated_pages() {
        let mut store = PagedStore::with_images(50);
        store.fail_at = Some(20);
        let adapter = PhotoSourceAdapter::new(Arc::new(store), "", 10);

        assert_eq!(adapter.list_photos().await.len(), 20);
    }

    #[tokio::test]
    async fn test_first_page_error_yields_empty() {
        let mut store = PagedStore::with_images(5);
        store.fail_at = Some(0);
        let adapter = PhotoSourceAdapter::new(Arc::new(store), "", 10);

        assert!(adapter.list_photos().await.is_empty());
    }

    #[test]
    fn test_filters_and_strips_extensions() {
        let adapter = PhotoSourceAdapter::new(Arc::new(PagedStore::with_images(0)), "/album/", 10);
        let objects = ["b.PNG", "notes.txt", "a.jpeg", ".emptyFolderPlaceholder", "c.gif", "raw.RAF", "a.jpg"]
            .into_iter()
            .map(StorageObject::named)
            .collect();

        let photos = adapter.to_photos(objects);
        let names: Vec<&str> = photos.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        // "a.jpeg" sorts before "a.jpg" and wins the duplicate
        assert_eq!(photos[0].file_name, "a.jpeg");
        assert_eq!(photos[0].url, "https://cdn.test/album/a.jpeg");
        assert_eq!(photos[1].id, PhotoId::new(1));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("DSCF0001.JPG"), "DSCF0001");
        assert_eq!(display_name("archive.tar.gif"), "archive.tar");
        assert_eq!(display_name("no_extension"), "no_extension");
        assert_eq!(display_name("dir.v2/file"), "dir.v2/file");
        assert!(is_image("x.JpEg"));
        assert!(!is_image("x.webp"));
        assert!(!is_image("jpg"));
    }
}
