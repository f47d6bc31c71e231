//! Metadata records and the provider contract that produces them.

/// Display-ready metadata for one track.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TrackMetadata {
    pub name: String,
    pub artist: String,
    pub album: String,
    /// Display-formatted release date, e.g. `June 09, 2017`.
    pub released: String,
    /// `MM:SS`.
    pub duration: String,
    /// Cover reference: URL or local path.
    pub image: String,
    pub label: String,
    /// Catalog id encoded into the scan code.
    pub id: String,
}

/// Display-ready metadata for one album.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AlbumMetadata {
    pub name: String,
    pub artist: String,
    pub released: String,
    pub image: String,
    pub label: String,
    pub id: String,
    /// Track names in album order.
    #[serde(default)]
    pub tracks: Vec<String>,
}

/// Failures a metadata provider can report. "Not found" is `Ok(None)`, not an error.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    /// Network or service hiccup; the same request may succeed later.
    #[error("transient provider failure: {0}")]
    Transient(String),

    /// Credentials expired; refreshing and retrying is expected to succeed.
    #[error("provider credentials expired")]
    ExpiredCredentials,

    #[error("invalid query '{0}'")]
    InvalidQuery(String),
}

/// Source of track and album metadata.
pub trait MetadataProvider: Send + Sync {
    fn search_track(&self, query: &str) -> Result<Option<TrackMetadata>, ProviderError>;

    fn search_album(&self, query: &str) -> Result<Option<AlbumMetadata>, ProviderError>;
}

/// Wraps a provider and repeats a call once when it reports expired credentials.
///
/// The inner provider is expected to refresh its token on the failing call.
#[derive(Debug)]
pub struct RetryingProvider<P> {
    inner: P,
}

impl<P: MetadataProvider> RetryingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }

    fn call<T>(
        &self,
        op: &str,
        query: &str,
        f: impl Fn(&P) -> Result<T, ProviderError>,
    ) -> Result<T, ProviderError> {
        match f(&self.inner) {
            Err(ProviderError::ExpiredCredentials) => {
                tracing::info!(op, query, "provider credentials expired; retrying once");
                f(&self.inner)
            }
            other => other,
        }
    }
}

impl<P: MetadataProvider> MetadataProvider for RetryingProvider<P> {
    fn search_track(&self, query: &str) -> Result<Option<TrackMetadata>, ProviderError> {
        self.call("search_track", query, |p| p.search_track(query))
    }

    fn search_album(&self, query: &str) -> Result<Option<AlbumMetadata>, ProviderError> {
        self.call("search_album", query, |p| p.search_album(query))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/provider/metadata.rs"]
mod tests;
