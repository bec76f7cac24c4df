use crate::fetch::{AssetFetcher, FetchError};
use crate::storage::Photo;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("could not fetch photo: {0}")]
    Fetch(#[from] FetchError),
    #[error("could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Removes the partially written file unless the download completed.
struct PartialFile {
    path: PathBuf,
    committed: bool,
}

impl PartialFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            committed: false,
        }
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = std::fs::remove_file(&self.path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %self.path.display(), error = %e, "could not remove partial download");
                }
            }
        }
    }
}

fn safe_file_stem(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if trimmed.is_empty() {
        "photo".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Saves photos into a download directory.
pub struct Downloader {
    fetcher: Arc<dyn AssetFetcher>,
    dir: PathBuf,
}

impl Downloader {
    pub fn new(fetcher: Arc<dyn AssetFetcher>, dir: PathBuf) -> Self {
        Self { fetcher, dir }
    }

    pub fn target_path(&self, photo: &Photo) -> PathBuf {
        self.dir
            .join(format!("{}.{}", safe_file_stem(&photo.name), photo.extension()))
    }

    pub async fn download(&self, photo: &Photo) -> Result<PathBuf, DownloadError> {
        let bytes = self.fetcher.fetch(&photo.url).await?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| DownloadError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let target = self.target_path(photo);
        let partial_path = target.with_extension(format!("{}.part", photo.extension()));
        let partial = PartialFile::new(partial_path.clone());

        tokio::fs::write(&partial_path, &bytes)
            .await
            .map_err(|source| DownloadError::Io {
                path: partial_path.clone(),
                source,
            })?;
        tokio::fs::rename(&partial_path, &target)
            .await
            .map_err(|source| DownloadError::Io {
                path: target.clone(),
                source,
            })?;
        partial.commit();

        info!(photo = %photo.name, path = %target.display(), bytes = bytes.len(), "photo saved");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::PhotoId;
    use async_trait::async_trait;

    struct StaticFetcher(Option<Vec<u8>>);

    #[async_trait]
    impl AssetFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
            self.0.clone().ok_or(FetchError::Status(404))
        }
    }

    fn photo(name: &str, file_name: &str) -> Photo {
        Photo {
            id: PhotoId::new(0),
            name: name.to_string(),
            file_name: file_name.to_string(),
            url: format!("https://cdn.test/{}", file_name),
        }
    }

    #[tokio::test]
    async fn test_download_writes_file_with_source_extension() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = Downloader::new(
            Arc::new(StaticFetcher(Some(b"PNGDATA".to_vec()))),
            dir.path().join("saved"),
        );

        let path = downloader.download(&photo("DSCF0001", "DSCF0001.png")).await.unwrap();
        assert_eq!(path, dir.path().join("saved").join("DSCF0001.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"PNGDATA");

        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("saved"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = Downloader::new(Arc::new(StaticFetcher(None)), dir.path().to_path_buf());

        let err = downloader.download(&photo("gone", "gone.jpg")).await.unwrap_err();
        assert!(matches!(err, DownloadError::Fetch(FetchError::Status(404))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unsafe_names_are_cleaned() {
        assert_eq!(safe_file_stem("trip/day:1"), "trip_day_1");
        assert_eq!(safe_file_stem(".."), "photo");
        assert_eq!(safe_file_stem("  ok  "), "ok");
    }
}
