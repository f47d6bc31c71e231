//! Beatprint composes printable posters for music tracks and albums.
//!
//! A poster is a themed template with the cover art, a palette row, a scan code for the catalog
//! id, and typeset metadata: the heading, artist, release date and label, plus either a lyrics
//! excerpt (tracks) or a packed track list (albums).
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: theme name -> `(color, template)` ([`ThemeCatalog`]), no IO
//! 2. **Prepare**: load the template, fetch and crop the cover, extract its palette
//! 3. **Code**: render the scan code into a transparent layer
//! 4. **Text**: lay out text blocks ([`layout_text`], [`layout_heading`], [`pack`]) and rasterize
//!    them through a [`Typesetter`]
//! 5. **Save**: encode PNG and write it atomically
//!
//! [`PosterEngine`] drives all five steps; [`PosterStudio`] adds metadata search and lyric
//! selection on top through injected providers.
#![forbid(unsafe_code)]

mod assets {
    pub mod cover;
    pub mod decode;
    pub mod palette;
}
mod compose {
    pub mod output;
    pub mod poster;
    pub mod studio;
}
mod config;
mod foundation {
    pub mod core;
    pub mod error;
    pub mod math;
}
mod layout {
    pub mod template;
}
mod provider {
    pub mod format;
    pub mod lyrics;
    pub mod metadata;
}
mod render {
    pub mod canvas;
    pub mod composite;
}
mod scannable {
    pub mod code;
}
mod text {
    pub mod fonts;
    pub mod layout;
    pub mod typeset;
}
mod theme {
    pub mod resolver;
}
mod tracklist {
    pub mod packer;
}

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;

pub use assets::cover::{CoverLoader, CoverSource, DefaultCoverLoader, expand_home, prepare_cover};
pub use assets::decode::{decode_image, fill_exact};
pub use assets::palette::{Palette, Swatch, extract_palette};
pub use compose::output::{
    MAX_COMPONENT_BYTES, poster_filename, resolve_save_dir, sanitize_component, write_atomic,
};
pub use compose::poster::{PosterEngine, PosterOptions, Stage};
pub use compose::studio::{PosterStudio, StudioError};
pub use config::{ENV_ASSETS_DIR, ENV_OUTPUT_DIR, EngineConfig};
pub use foundation::core::{Point, Rect, Region, Rgb8};
pub use foundation::error::{PosterError, PosterResult};
pub use layout::template::{PosterLayout, TextSlot, TrackListSlot};
pub use provider::format::{
    DatePrecision, MAX_LABEL_CHARS, display_label, format_duration, format_release_date,
    normalize_track_query, relaxed_query,
};
pub use provider::lyrics::{
    INSTRUMENTAL_PLACEHOLDER, LyricsError, LyricsProvider, MAX_SELECTED_LINES, select_lines,
};
pub use provider::metadata::{
    AlbumMetadata, MetadataProvider, ProviderError, RetryingProvider, TrackMetadata,
};
pub use render::canvas::{Canvas, PremulLayer};
pub use scannable::code::{CodeKind, ScanCode, render_scannable};
pub use text::fonts::{FontPaths, FontSet, FontWeight};
pub use text::layout::{
    Anchor, ELLIPSIS, HAlign, TextStyle, VAlign, layout_heading, layout_text, truncate_to_width,
};
pub use text::typeset::{FontTypesetter, LineMetrics, PlacedLine, TextBlock, Typesetter};
pub use theme::resolver::{ResolvedTheme, Theme, ThemeCatalog, ThemeSpec};
pub use tracklist::packer::{Column, PackStyle, PackedTracks, index_width, pack};
