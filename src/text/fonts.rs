use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::error::{PosterError, PosterResult};

/// Font weight selector. Purely cosmetic: it picks the face, never the layout algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FontWeight {
    Regular,
    Bold,
    Light,
}

impl FontWeight {
    pub const ALL: [FontWeight; 3] = [FontWeight::Regular, FontWeight::Bold, FontWeight::Light];

    pub(crate) fn index(self) -> usize {
        match self {
            FontWeight::Regular => 0,
            FontWeight::Bold => 1,
            FontWeight::Light => 2,
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FontWeight::Regular => "Regular",
            FontWeight::Bold => "Bold",
            FontWeight::Light => "Light",
        })
    }
}

/// Font files for each weight.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FontPaths {
    pub regular: PathBuf,
    pub bold: PathBuf,
    pub light: PathBuf,
}

impl FontPaths {
    /// `<dir>/Regular.ttf`, `<dir>/Bold.ttf`, `<dir>/Light.ttf`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            regular: dir.join("Regular.ttf"),
            bold: dir.join("Bold.ttf"),
            light: dir.join("Light.ttf"),
        }
    }

    pub fn path(&self, weight: FontWeight) -> &Path {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
            FontWeight::Light => &self.light,
        }
    }
}

/// Raw font bytes for every weight, loaded once and shared read-only.
#[derive(Clone)]
pub struct FontSet {
    faces: [Arc<Vec<u8>>; 3],
}

impl fmt::Debug for FontSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontSet")
            .field("regular_len", &self.faces[0].len())
            .field("bold_len", &self.faces[1].len())
            .field("light_len", &self.faces[2].len())
            .finish()
    }
}

impl FontSet {
    pub fn from_bytes(regular: Vec<u8>, bold: Vec<u8>, light: Vec<u8>) -> PosterResult<Self> {
        let faces = [Arc::new(regular), Arc::new(bold), Arc::new(light)];
        for weight in FontWeight::ALL {
            if faces[weight.index()].is_empty() {
                return Err(PosterError::font(format!("{weight} font is empty")));
            }
        }
        Ok(Self { faces })
    }

    pub fn load(paths: &FontPaths) -> PosterResult<Self> {
        let read = |weight: FontWeight| -> PosterResult<Vec<u8>> {
            let path = paths.path(weight);
            std::fs::read(path)
                .with_context(|| format!("read {weight} font '{}'", path.display()))
                .map_err(|e| PosterError::font(format!("{e:#}")))
        };
        Self::from_bytes(
            read(FontWeight::Regular)?,
            read(FontWeight::Bold)?,
            read(FontWeight::Light)?,
        )
    }

    pub fn bytes(&self, weight: FontWeight) -> &Arc<Vec<u8>> {
        &self.faces[weight.index()]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
