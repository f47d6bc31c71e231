use crate::{
    foundation::error::{PosterError, PosterResult},
    text::{fonts::FontWeight, typeset::Typesetter},
};

/// Measuring parameters for the track list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackStyle {
    pub weight: FontWeight,
    pub size_px: f32,
    /// Lines per column.
    pub max_lines: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub lines: Vec<String>,
    /// Widest measured line.
    pub width: f64,
}

/// Track names split into fixed-height columns, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedTracks {
    pub columns: Vec<Column>,
}

impl PackedTracks {
    pub fn widths(&self) -> Vec<f64> {
        self.columns.iter().map(|c| c.width).collect()
    }

    /// Left edge of each column when laid out from `x` with `gap` between columns.
    pub fn column_offsets(&self, x: f64, gap: f64) -> Vec<f64> {
        let mut offsets = Vec::with_capacity(self.columns.len());
        let mut cursor = x;
        for column in &self.columns {
            offsets.push(cursor);
            cursor += column.width + gap;
        }
        offsets
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Zero-padded number prefix, at least two digits wide.
pub fn index_width(total: usize) -> usize {
    total.max(1).to_string().len().max(2)
}

/// Pack `tracks` into columns of at most `style.max_lines` lines.
///
/// With `indexed`, names get a global 1-based `NN. ` prefix that keeps counting across columns.
/// Names are never shortened and no column is dropped, even if the result overflows its region.
pub fn pack(
    typesetter: &dyn Typesetter,
    tracks: &[String],
    indexed: bool,
    style: &PackStyle,
) -> PosterResult<PackedTracks> {
    if style.max_lines == 0 {
        return Err(PosterError::validation("track list max_lines must be > 0"));
    }
    let pad = index_width(tracks.len());

    let mut columns = Vec::with_capacity(tracks.len().div_ceil(style.max_lines));
    for (chunk_idx, chunk) in tracks.chunks(style.max_lines).enumerate() {
        let mut lines = Vec::with_capacity(chunk.len());
        let mut width = 0.0f64;
        for (i, name) in chunk.iter().enumerate() {
            let line = if indexed {
                let number = chunk_idx * style.max_lines + i + 1;
                format!("{number:0pad$}. {name}")
            } else {
                name.clone()
            };
            width = width.max(typesetter.line_width(&line, style.weight, style.size_px)?);
            lines.push(line);
        }
        columns.push(Column { lines, width });
    }

    tracing::debug!(
        tracks = tracks.len(),
        columns = columns.len(),
        indexed,
        "packed track list"
    );
    Ok(PackedTracks { columns })
}

#[cfg(test)]
#[path = "../../tests/unit/tracklist/packer.rs"]
mod tests;
