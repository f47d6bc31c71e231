use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::error::{PosterError, PosterResult},
    layout::template::PosterLayout,
    text::fonts::FontPaths,
};

pub const ENV_ASSETS_DIR: &str = "BEATPRINT_ASSETS_DIR";
pub const ENV_OUTPUT_DIR: &str = "BEATPRINT_OUTPUT_DIR";

/// Engine configuration, loaded from JSON. Every field is optional in the file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Root of bundled assets; theme templates live in `<assets_dir>/templates`.
    pub assets_dir: PathBuf,
    /// Explicit font files. Defaults to `<assets_dir>/fonts/{Regular,Bold,Light}.ttf`.
    pub fonts: Option<FontPaths>,
    /// Save directory used when a request does not name one.
    pub output_dir: PathBuf,
    pub layout: PosterLayout,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            fonts: None,
            output_dir: PathBuf::from("posters"),
            layout: PosterLayout::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_path(path: &Path) -> PosterResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        serde_json::from_str(&text).map_err(|e| {
            PosterError::validation(format!("config '{}': {e}", path.display()))
        })
    }

    /// Config file (or defaults) with `BEATPRINT_*` environment overrides applied.
    pub fn load(path: Option<&Path>) -> PosterResult<Self> {
        let base = match path {
            Some(p) => Self::from_path(p)?,
            None => Self::default(),
        };
        Ok(base.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply overrides from `lookup` (normally the process environment). Empty values are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(dir) = get(ENV_ASSETS_DIR) {
            self.assets_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.assets_dir.join("templates")
    }

    pub fn font_paths(&self) -> FontPaths {
        self.fonts
            .clone()
            .unwrap_or_else(|| FontPaths::in_dir(&self.assets_dir.join("fonts")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
