use std::path::PathBuf;

use crate::{
    compose::poster::{PosterEngine, PosterOptions},
    foundation::error::PosterError,
    provider::{
        lyrics::{INSTRUMENTAL_PLACEHOLDER, LyricsError, LyricsProvider, select_lines},
        metadata::{MetadataProvider, ProviderError},
    },
};

#[derive(thiserror::Error, Debug)]
pub enum StudioError {
    #[error("no match for '{0}'")]
    NotFound(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Lyrics(#[from] LyricsError),

    #[error(transparent)]
    Poster(#[from] PosterError),
}

/// Search, fetch lyrics, and compose, using injected providers.
pub struct PosterStudio<'a> {
    engine: &'a PosterEngine,
    metadata: &'a dyn MetadataProvider,
    lyrics: &'a dyn LyricsProvider,
}

impl<'a> PosterStudio<'a> {
    pub fn new(
        engine: &'a PosterEngine,
        metadata: &'a dyn MetadataProvider,
        lyrics: &'a dyn LyricsProvider,
    ) -> Self {
        Self {
            engine,
            metadata,
            lyrics,
        }
    }

    /// Track poster for the first match of `query`, showing the `lines` selection (e.g. `"5-9"`).
    /// Tracks without lyrics get [`INSTRUMENTAL_PLACEHOLDER`].
    pub fn track_poster(
        &self,
        query: &str,
        lines: &str,
        opts: &PosterOptions,
    ) -> Result<PathBuf, StudioError> {
        let track = self
            .metadata
            .search_track(query)?
            .ok_or_else(|| StudioError::NotFound(query.to_string()))?;

        let excerpt = match self.lyrics.lyrics(&track) {
            Ok(all) => select_lines(&all, lines)?,
            Err(LyricsError::NoLyricsAvailable(_)) => {
                tracing::info!(track = %track.name, "no lyrics; using instrumental placeholder");
                INSTRUMENTAL_PLACEHOLDER.to_string()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(self.engine.track(&track, &excerpt, opts)?)
    }

    pub fn album_poster(&self, query: &str, opts: &PosterOptions) -> Result<PathBuf, StudioError> {
        let album = self
            .metadata
            .search_album(query)?
            .ok_or_else(|| StudioError::NotFound(query.to_string()))?;
        Ok(self.engine.album(&album, opts)?)
    }
}
