//! Poster composition.
//!
//! One [`PosterEngine`] serves many requests; each `track`/`album` call owns its canvas from
//! template load to save and moves through [`Stage`]s in order:
//!
//! 1. resolve the theme (pure, fails fast on unknown names)
//! 2. load the template, paste the cover, draw palette swatches and the accent strip
//! 3. composite the scan code
//! 4. lay out and rasterize heading, artist, label and the body text
//! 5. encode and save atomically

use std::{path::PathBuf, sync::Arc};

use crate::{
    assets::{
        cover::{CoverLoader, DefaultCoverLoader, prepare_cover},
        palette::extract_palette,
    },
    compose::output::{poster_filename, write_atomic},
    config::EngineConfig,
    foundation::{
        core::{Point, Rect, Rgb8},
        error::{PosterError, PosterResult},
    },
    layout::template::{PosterLayout, TextSlot},
    provider::metadata::{AlbumMetadata, TrackMetadata},
    render::canvas::Canvas,
    scannable::code::render_scannable,
    text::{
        fonts::{FontSet, FontWeight},
        layout::{Anchor, TextStyle, layout_heading, layout_text},
        typeset::{FontTypesetter, TextBlock, Typesetter},
    },
    theme::resolver::{ResolvedTheme, ThemeCatalog},
    tracklist::packer::{PackStyle, pack},
};

const LABEL_LINE_SPACING: f64 = 4.0;
const SWATCH_GAP: f64 = 8.0;

/// Per-request choices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PosterOptions {
    /// Overrides the configured output directory.
    pub save_dir: Option<PathBuf>,
    /// Tint the accent strip with the cover's dominant color.
    pub accent: bool,
    /// Case-sensitive theme name.
    pub theme: String,
    /// Cover reference that takes precedence over the metadata cover.
    pub custom_cover: Option<String>,
    /// Number album tracks (`01. `, `02. `, ...).
    pub indexing: bool,
}

impl Default for PosterOptions {
    fn default() -> Self {
        Self {
            save_dir: None,
            accent: false,
            theme: "Light".to_string(),
            custom_cover: None,
            indexing: false,
        }
    }
}

/// Composition progress of a single request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Init,
    ThemeResolved,
    CoverReady,
    CodeReady,
    TextComposed,
    Saved,
}

struct Poster {
    canvas: Canvas,
    theme: ResolvedTheme,
    stage: Stage,
}

impl Poster {
    fn advance(&mut self, next: Stage) {
        debug_assert!(next > self.stage);
        tracing::debug!(from = ?self.stage, to = ?next, "composition stage");
        self.stage = next;
    }
}

/// Composes track and album posters onto themed templates.
///
/// Immutable after construction; share it (e.g. behind an `Arc`) across threads.
pub struct PosterEngine {
    layout: PosterLayout,
    output_dir: PathBuf,
    themes: ThemeCatalog,
    typesetter: Arc<dyn Typesetter>,
    covers: Arc<dyn CoverLoader>,
}

impl std::fmt::Debug for PosterEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosterEngine")
            .field("output_dir", &self.output_dir)
            .field("themes", &self.themes)
            .finish_non_exhaustive()
    }
}

impl PosterEngine {
    pub fn new(config: EngineConfig, typesetter: Arc<dyn Typesetter>) -> PosterResult<Self> {
        config.layout.validate()?;
        Ok(Self {
            themes: ThemeCatalog::new(config.templates_dir()),
            layout: config.layout,
            output_dir: config.output_dir,
            typesetter,
            covers: Arc::new(DefaultCoverLoader),
        })
    }

    /// Engine backed by the configured font files.
    pub fn from_config(config: EngineConfig) -> PosterResult<Self> {
        let fonts = FontSet::load(&config.font_paths())?;
        let typesetter = FontTypesetter::new(&fonts)?;
        Self::new(config, Arc::new(typesetter))
    }

    pub fn with_cover_loader(mut self, covers: Arc<dyn CoverLoader>) -> Self {
        self.covers = covers;
        self
    }

    pub fn layout(&self) -> &PosterLayout {
        &self.layout
    }

    pub fn themes(&self) -> &ThemeCatalog {
        &self.themes
    }

    /// Track poster with a lyrics excerpt. Returns the absolute path of the saved PNG.
    ///
    /// `lyrics` is drawn verbatim; substituting a placeholder for missing lyrics is the caller's
    /// job.
    #[tracing::instrument(skip_all, fields(track = %metadata.name, theme = %opts.theme))]
    pub fn track(
        &self,
        metadata: &TrackMetadata,
        lyrics: &str,
        opts: &PosterOptions,
    ) -> PosterResult<PathBuf> {
        let mut poster = self.prepare(&metadata.image, &metadata.id, false, opts)?;
        self.draw_header(
            &mut poster,
            &metadata.name,
            &metadata.artist,
            &metadata.released,
            &metadata.label,
        )?;

        let color = poster.theme.color;
        let duration = &self.layout.duration;
        self.draw(
            &mut poster.canvas,
            duration.region.origin,
            &metadata.duration,
            TextStyle::new(FontWeight::Regular, duration.size_px, color),
            Anchor::RIGHT_BASELINE,
            0.0,
        )?;

        let lyrics_slot = &self.layout.lyrics;
        self.draw(
            &mut poster.canvas,
            lyrics_slot.region.origin,
            lyrics,
            TextStyle::new(FontWeight::Light, lyrics_slot.size_px, color),
            Anchor::LEFT_TOP,
            self.layout.lyrics_line_spacing,
        )?;
        poster.advance(Stage::TextComposed);

        self.save(poster, &metadata.name, &metadata.artist, opts)
    }

    /// Album poster with a packed track list. Returns the absolute path of the saved PNG.
    #[tracing::instrument(skip_all, fields(album = %metadata.name, theme = %opts.theme))]
    pub fn album(&self, metadata: &AlbumMetadata, opts: &PosterOptions) -> PosterResult<PathBuf> {
        let mut poster = self.prepare(&metadata.image, &metadata.id, true, opts)?;
        self.draw_header(
            &mut poster,
            &metadata.name,
            &metadata.artist,
            &metadata.released,
            &metadata.label,
        )?;

        let slot = &self.layout.tracks;
        let style = PackStyle {
            weight: FontWeight::Light,
            size_px: slot.size_px,
            max_lines: slot.max_lines,
        };
        let packed = pack(
            self.typesetter.as_ref(),
            &metadata.tracks,
            opts.indexing,
            &style,
        )?;
        let origin = slot.region.origin;
        let text_style = TextStyle::new(style.weight, style.size_px, poster.theme.color);
        for (column, x) in packed
            .columns
            .iter()
            .zip(packed.column_offsets(origin.x, slot.column_gap))
        {
            self.draw(
                &mut poster.canvas,
                Point::new(x, origin.y),
                &column.lines.join("\n"),
                text_style,
                Anchor::LEFT_TOP,
                slot.line_spacing,
            )?;
        }
        poster.advance(Stage::TextComposed);

        self.save(poster, &metadata.name, &metadata.artist, opts)
    }

    /// Theme, template, cover, swatches, accent strip and scan code.
    fn prepare(
        &self,
        cover_ref: &str,
        catalog_id: &str,
        is_album: bool,
        opts: &PosterOptions,
    ) -> PosterResult<Poster> {
        tracing::debug!(stage = ?Stage::Init, "composition stage");
        let theme = self.themes.resolve(&opts.theme)?;
        tracing::debug!(stage = ?Stage::ThemeResolved, theme = %theme.theme, "composition stage");

        let template = self.themes.load_template(&theme)?;
        let mut poster = Poster {
            canvas: Canvas::from_template(template),
            theme,
            stage: Stage::ThemeResolved,
        };
        let (w, h) = (poster.canvas.width(), poster.canvas.height());
        if (w, h) != (self.layout.canvas_width, self.layout.canvas_height) {
            tracing::warn!(
                template = %poster.theme.template.display(),
                width = w,
                height = h,
                "template size differs from layout canvas"
            );
        }

        let (cover_w, cover_h) = self.layout.cover.pixel_size()?;
        let cover = prepare_cover(
            self.covers.as_ref(),
            cover_ref,
            opts.custom_cover.as_deref(),
            cover_w,
            cover_h,
        )?;
        let cover_at = self.layout.cover.origin;
        poster
            .canvas
            .paste(&cover, cover_at.x.round() as i64, cover_at.y.round() as i64);

        let palette = extract_palette(&cover, self.layout.palette_swatches as usize);
        if let Some(row) = self.layout.palette.rect() {
            draw_swatches(&mut poster.canvas, row, palette.colors());
        }
        let strip = if opts.accent {
            palette.dominant().unwrap_or(poster.theme.neutral)
        } else {
            poster.theme.neutral
        };
        if let Some(rect) = self.layout.accent_strip.rect() {
            poster.canvas.fill_rect(rect, strip);
        }
        poster.advance(Stage::CoverReady);

        let (code_w, code_h) = self.layout.code.pixel_size()?;
        let code = render_scannable(catalog_id, poster.theme.theme, is_album, code_w, code_h)?;
        let code_at = self.layout.code.origin;
        poster
            .canvas
            .composite(&code, code_at.x.round() as i64, code_at.y.round() as i64);
        poster.advance(Stage::CodeReady);

        Ok(poster)
    }

    fn draw_header(
        &self,
        poster: &mut Poster,
        name: &str,
        artist: &str,
        released: &str,
        label: &str,
    ) -> PosterResult<()> {
        let color = poster.theme.color;
        let heading = &self.layout.heading;
        let max_width = heading
            .region
            .max_width
            .unwrap_or_else(|| f64::from(poster.canvas.width()) - heading.region.origin.x);
        let block = layout_heading(
            self.typesetter.as_ref(),
            heading.region.origin,
            max_width,
            name,
            color,
            heading.size_px,
            self.layout.heading_min_size_px,
        )?;
        self.typesetter.rasterize(&block, &mut poster.canvas)?;

        self.draw_slot(poster, &self.layout.artist, artist, Anchor::LEFT_BASELINE, 0.0)?;
        self.draw_slot(
            poster,
            &self.layout.label,
            &format!("{released}\n{label}"),
            Anchor::RIGHT_TOP,
            LABEL_LINE_SPACING,
        )?;
        Ok(())
    }

    fn draw_slot(
        &self,
        poster: &mut Poster,
        slot: &TextSlot,
        text: &str,
        anchor: Anchor,
        spacing: f64,
    ) -> PosterResult<TextBlock> {
        let style = TextStyle::new(FontWeight::Regular, slot.size_px, poster.theme.color);
        self.draw(
            &mut poster.canvas,
            slot.region.origin,
            text,
            style,
            anchor,
            spacing,
        )
    }

    fn draw(
        &self,
        canvas: &mut Canvas,
        origin: Point,
        text: &str,
        style: TextStyle,
        anchor: Anchor,
        spacing: f64,
    ) -> PosterResult<TextBlock> {
        let block = layout_text(
            self.typesetter.as_ref(),
            origin,
            text,
            style,
            anchor,
            spacing,
        )?;
        self.typesetter.rasterize(&block, canvas)?;
        Ok(block)
    }

    fn save(
        &self,
        mut poster: Poster,
        name: &str,
        artist: &str,
        opts: &PosterOptions,
    ) -> PosterResult<PathBuf> {
        let file_name = poster_filename(name, artist);
        let dir = opts.save_dir.as_ref().unwrap_or(&self.output_dir);
        let bytes = poster
            .canvas
            .encode_png()
            .map_err(|e| PosterError::SaveFailed {
                path: dir.join(&file_name),
                source: anyhow::Error::new(e),
            })?;
        let path = write_atomic(dir, &file_name, &bytes)?;
        poster.advance(Stage::Saved);
        tracing::info!(path = %path.display(), "poster saved");
        Ok(path)
    }
}

/// Equal-width swatches across `row`, separated by a small gap.
fn draw_swatches(canvas: &mut Canvas, row: Rect, colors: impl ExactSizeIterator<Item = Rgb8>) {
    let n = colors.len();
    if n == 0 {
        return;
    }
    let gap = SWATCH_GAP.min(row.width() / (n as f64 * 4.0));
    let cell = (row.width() - gap * (n as f64 - 1.0)) / n as f64;
    for (i, color) in colors.enumerate() {
        let x0 = row.x0 + i as f64 * (cell + gap);
        canvas.fill_rect(Rect::new(x0, row.y0, x0 + cell, row.y1), color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/poster.rs"]
mod tests;
