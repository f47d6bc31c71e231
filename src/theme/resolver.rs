use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;

use crate::foundation::{
    core::Rgb8,
    error::{PosterError, PosterResult},
};

/// Closed set of poster themes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Theme {
    Light,
    Dark,
    Catppuccin,
    Gruvbox,
    Nord,
    RosePine,
    Everforest,
}

/// Static per-theme configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeSpec {
    /// Foreground color used for all text and the scan code.
    pub foreground: Rgb8,
    /// Strip color used when accent extraction is disabled.
    pub neutral: Rgb8,
    /// Template file name inside the templates directory.
    pub template_file: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 7] = [
        Theme::Light,
        Theme::Dark,
        Theme::Catppuccin,
        Theme::Gruvbox,
        Theme::Nord,
        Theme::RosePine,
        Theme::Everforest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Catppuccin => "Catppuccin",
            Theme::Gruvbox => "Gruvbox",
            Theme::Nord => "Nord",
            Theme::RosePine => "RosePine",
            Theme::Everforest => "Everforest",
        }
    }

    pub fn spec(self) -> ThemeSpec {
        let (foreground, neutral, template_file) = match self {
            Theme::Light => (Rgb8::new(0, 0, 0), Rgb8::new(224, 224, 224), "light.png"),
            Theme::Dark => (Rgb8::new(255, 255, 255), Rgb8::new(48, 48, 48), "dark.png"),
            Theme::Catppuccin => (
                Rgb8::new(205, 214, 244),
                Rgb8::new(69, 71, 90),
                "catppuccin.png",
            ),
            Theme::Gruvbox => (
                Rgb8::new(235, 219, 178),
                Rgb8::new(80, 73, 69),
                "gruvbox.png",
            ),
            Theme::Nord => (Rgb8::new(216, 222, 233), Rgb8::new(76, 86, 106), "nord.png"),
            Theme::RosePine => (
                Rgb8::new(224, 222, 244),
                Rgb8::new(64, 61, 82),
                "rosepine.png",
            ),
            Theme::Everforest => (
                Rgb8::new(211, 198, 170),
                Rgb8::new(71, 82, 88),
                "everforest.png",
            ),
        };
        ThemeSpec {
            foreground,
            neutral,
            template_file,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = PosterError;

    /// Case-sensitive lookup against [`Theme::ALL`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| PosterError::theme_not_found(s))
    }
}

/// Outcome of resolving a theme name: colors plus the template to load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub theme: Theme,
    pub color: Rgb8,
    pub neutral: Rgb8,
    pub template: PathBuf,
}

/// Maps theme names to `(color, template)` pairs rooted at a templates directory.
#[derive(Clone, Debug)]
pub struct ThemeCatalog {
    templates_dir: PathBuf,
}

impl ThemeCatalog {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Pure lookup; performs no IO so unknown names fail before any image work.
    pub fn resolve(&self, name: &str) -> PosterResult<ResolvedTheme> {
        let theme = Theme::from_str(name)?;
        Ok(self.resolve_theme(theme))
    }

    pub fn resolve_theme(&self, theme: Theme) -> ResolvedTheme {
        let spec = theme.spec();
        ResolvedTheme {
            theme,
            color: spec.foreground,
            neutral: spec.neutral,
            template: self.templates_dir.join(spec.template_file),
        }
    }

    /// Decode the template fresh; callers own the returned image exclusively.
    pub fn load_template(&self, resolved: &ResolvedTheme) -> PosterResult<image::DynamicImage> {
        let path = &resolved.template;
        std::fs::read(path)
            .with_context(|| format!("read template '{}'", path.display()))
            .and_then(|bytes| image::load_from_memory(&bytes).context("decode template"))
            .map_err(|e| PosterError::Template {
                path: path.clone(),
                reason: format!("{e:#}"),
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/resolver.rs"]
mod tests;
