use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use anyhow::Context;

use crate::{
    assets::cover::expand_home,
    foundation::error::{PosterError, PosterResult},
};

const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Byte cap for one sanitized name component, so `<name>_<artist>.png` stays well under the
/// 255-byte filename limit of common filesystems.
pub const MAX_COMPONENT_BYTES: usize = 100;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Make `s` safe as one path component.
///
/// Separators and reserved characters are dropped, whitespace runs become `_`, the result is cut
/// at a char boundary to [`MAX_COMPONENT_BYTES`], and an empty result becomes `untitled`.
pub fn sanitize_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_sep = false;
    for c in s.chars() {
        if RESERVED.contains(&c) || (c.is_control() && !c.is_whitespace()) {
            continue;
        }
        if c.is_whitespace() || c == '_' {
            pending_sep = true;
            continue;
        }
        let sep = pending_sep && !out.is_empty();
        if out.len() + usize::from(sep) + c.len_utf8() > MAX_COMPONENT_BYTES {
            break;
        }
        if sep {
            out.push('_');
        }
        pending_sep = false;
        out.push(c);
    }
    let trimmed = out.trim_start_matches('.');
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `<name>_<artist>.png`, both parts sanitized.
pub fn poster_filename(name: &str, artist: &str) -> String {
    format!(
        "{}_{}.png",
        sanitize_component(name),
        sanitize_component(artist)
    )
}

/// Expand `~` and make `dir` absolute against the working directory.
pub fn resolve_save_dir(dir: &Path) -> PosterResult<PathBuf> {
    let expanded = expand_home(dir);
    std::path::absolute(&expanded).map_err(|e| PosterError::SaveFailed {
        path: expanded,
        source: anyhow::Error::new(e).context("resolve save directory"),
    })
}

/// Write `bytes` to `dir/file_name` through a temporary sibling and a rename, creating `dir` if
/// needed. Returns the absolute final path.
pub fn write_atomic(dir: &Path, file_name: &str, bytes: &[u8]) -> PosterResult<PathBuf> {
    let dir = resolve_save_dir(dir)?;
    let path = dir.join(file_name);

    // Fixed length; `file_name` may already sit near the filename limit.
    let tmp = dir.join(format!(
        ".beatprint.{}.{}.tmp",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let result = std::fs::create_dir_all(&dir)
        .with_context(|| format!("create directory '{}'", dir.display()))
        .and_then(|()| {
            std::fs::write(&tmp, bytes).with_context(|| format!("write '{}'", tmp.display()))
        })
        .and_then(|()| {
            std::fs::rename(&tmp, &path).with_context(|| format!("rename '{}'", tmp.display()))
        });

    if let Err(source) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(PosterError::SaveFailed { path, source });
    }
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/output.rs"]
mod tests;
