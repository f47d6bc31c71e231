use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::decode::{decode_image, fill_exact},
    foundation::error::{PosterError, PosterResult},
};

/// Where cover bytes come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoverSource {
    /// Remote `http`/`https` resource.
    Url(String),
    /// Local file.
    Path(PathBuf),
}

impl CoverSource {
    /// Classify a reference: `http(s)://` is remote, everything else is a local path
    /// (`file://` prefix stripped, leading `~` expanded).
    pub fn parse(reference: &str) -> PosterResult<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(PosterError::validation("cover reference must be non-empty"));
        }
        let lower = reference.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(Self::Url(reference.to_string()));
        }
        let path = reference.strip_prefix("file://").unwrap_or(reference);
        Ok(Self::Path(expand_home(path)))
    }
}

impl std::fmt::Display for CoverSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Expand a leading `~` component using `$HOME`; other paths are returned unchanged.
///
/// Works on raw path components, so non-UTF-8 paths survive untouched.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => Path::new(&home).join(rest),
        _ => path.to_path_buf(),
    }
}

/// Fetches raw cover bytes. Implementations perform no retries and no decoding.
pub trait CoverLoader: Send + Sync {
    fn fetch(&self, source: &CoverSource) -> anyhow::Result<Vec<u8>>;
}

/// Filesystem loader, plus blocking HTTP when the `remote-covers` feature is enabled.
///
/// Remote fetches have no internal timeout; callers needing resilience wrap the loader.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultCoverLoader;

impl CoverLoader for DefaultCoverLoader {
    fn fetch(&self, source: &CoverSource) -> anyhow::Result<Vec<u8>> {
        match source {
            CoverSource::Path(path) => {
                std::fs::read(path).with_context(|| format!("read cover '{}'", path.display()))
            }
            #[cfg(feature = "remote-covers")]
            CoverSource::Url(url) => {
                let resp = reqwest::blocking::get(url)
                    .with_context(|| format!("fetch cover '{url}'"))?
                    .error_for_status()
                    .with_context(|| format!("fetch cover '{url}'"))?;
                let bytes = resp
                    .bytes()
                    .with_context(|| format!("read cover body '{url}'"))?;
                Ok(bytes.to_vec())
            }
            #[cfg(not(feature = "remote-covers"))]
            CoverSource::Url(url) => Err(anyhow::anyhow!(
                "remote cover '{url}' requires the `remote-covers` feature"
            )),
        }
    }
}

/// Load the cover and crop-scale it to exactly `width x height`.
///
/// `override_ref` takes precedence; if it cannot be loaded the metadata cover is tried before
/// giving up with [`PosterError::CoverUnavailable`].
pub fn prepare_cover(
    loader: &dyn CoverLoader,
    metadata_ref: &str,
    override_ref: Option<&str>,
    width: u32,
    height: u32,
) -> PosterResult<image::RgbaImage> {
    let mut failures = Vec::new();

    if let Some(reference) = override_ref {
        match load_one(loader, reference) {
            Ok(img) => return Ok(fill_exact(&img, width, height)),
            Err(reason) => {
                tracing::warn!(cover = reference, %reason, "custom cover unavailable, using metadata cover");
                failures.push((reference, reason));
            }
        }
    }

    match load_one(loader, metadata_ref) {
        Ok(img) => Ok(fill_exact(&img, width, height)),
        Err(reason) => {
            failures.push((metadata_ref, reason));
            Err(PosterError::CoverUnavailable {
                reference: failures
                    .iter()
                    .map(|(r, _)| *r)
                    .collect::<Vec<_>>()
                    .join(", "),
                reason: failures
                    .iter()
                    .map(|(_, e)| e.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            })
        }
    }
}

fn load_one(loader: &dyn CoverLoader, reference: &str) -> Result<image::DynamicImage, String> {
    let source = CoverSource::parse(reference).map_err(|e| e.to_string())?;
    let bytes = loader.fetch(&source).map_err(|e| format!("{e:#}"))?;
    decode_image(&bytes).map_err(|e| format!("{source}: {e}"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cover.rs"]
mod tests;
