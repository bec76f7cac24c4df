use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("storage returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid storage url: {0}")]
    InvalidUrl(String),
}

/// One entry of a bucket listing. Folder placeholders come back with no `id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageObject {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl StorageObject {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            id: Some(name.to_string()),
            metadata: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortBy {
    pub column: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    pub prefix: String,
    pub limit: usize,
    pub offset: usize,
    pub sort_by: SortBy,
}

impl ListOptions {
    /// One page of `limit` entries sorted by name, ascending.
    pub fn page(prefix: &str, limit: usize, offset: usize) -> Self {
        Self {
            prefix: prefix.to_string(),
            limit,
            offset,
            sort_by: SortBy {
                column: "name".to_string(),
                order: SortOrder::Asc,
            },
        }
    }
}

/// Remote bucket the gallery reads from.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn list_objects(&self, options: &ListOptions) -> Result<Vec<StorageObject>, StorageError>;
    fn public_url(&self, path: &str) -> String;
}

/// Supabase Storage REST client for a single bucket.
pub struct SupabaseStorage {
    client: Client,
    base: Url,
    bucket: String,
    key: String,
    timeout: Option<Duration>,
}

impl SupabaseStorage {
    pub fn new(client: Client, base_url: &str, bucket: &str, key: &str) -> Result<Self, StorageError> {
        let base = Url::parse(base_url).map_err(|e| StorageError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(StorageError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            client,
            base,
            bucket: bucket.to_string(),
            key: key.to_string(),
            timeout: None,
        })
    }

    /// Limits each listing request to `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn object_endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["storage", "v1", "object"])
                .extend(segments);
        }
        url
    }
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    async fn list_objects(&self, options: &ListOptions) -> Result<Vec<StorageObject>, StorageError> {
        let endpoint = self.object_endpoint(["list", self.bucket.as_str()]);
        let mut request = self
            .client
            .post(endpoint)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .json(options);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    fn public_url(&self, path: &str) -> String {
        let segments = ["public", self.bucket.as_str()]
            .into_iter()
            .chain(path.split('/').filter(|s| !s.is_empty()));
        self.object_endpoint(segments).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(base: &str) -> SupabaseStorage {
        SupabaseStorage::new(Client::new(), base, "fuji-x-photos-v1", "anon").unwrap()
    }

    #[test]
    fn test_public_url_layout() {
        let s = storage("https://abc.supabase.co");
        assert_eq!(
            s.public_url("DSCF0001.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/fuji-x-photos-v1/DSCF0001.jpg"
        );
    }

    #[test]
    fn test_public_url_encodes_segments() {
        let s = storage("https://abc.supabase.co/");
        assert_eq!(
            s.public_url("trip/day one.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/fuji-x-photos-v1/trip/day%20one.jpg"
        );
    }

    #[test]
    fn test_rejects_bad_base() {
        assert!(SupabaseStorage::new(Client::new(), "not a url", "b", "k").is_err());
        assert!(SupabaseStorage::new(Client::new(), "mailto:me@example.com", "b", "k").is_err());
    }

    #[test]
    fn test_list_options_wire_shape() {
        let json = serde_json::to_value(ListOptions::page("", 100, 200)).unwrap();
        assert_eq!(json["limit"], 100);
        assert_eq!(json["offset"], 200);
        assert_eq!(json["sortBy"]["column"], "name");
        assert_eq!(json["sortBy"]["order"], "asc");
    }

    #[test]
    fn test_listing_entry_tolerates_missing_fields() {
        let entries: Vec<StorageObject> =
            serde_json::from_str(r#"[{"name":"a.jpg","id":"1","metadata":{"size":10}},{"name":"folder","id":null}]"#)
                .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].id, None);
    }
}
