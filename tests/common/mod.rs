#![allow(dead_code)]

use std::{
    io::Cursor,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use beatprint::{
    AlbumMetadata, Canvas, CoverLoader, CoverSource, EngineConfig, FontWeight, LineMetrics,
    PosterEngine, PosterResult, Rect, Rgb8, TextBlock, Theme, TrackMetadata, Typesetter,
};

pub const LIGHT_BG: Rgb8 = Rgb8::WHITE;
pub const DARK_BG: Rgb8 = Rgb8::new(16, 16, 16);

/// Every glyph is a solid box `0.5 * size` wide; ascent and descent are 0.8 and 0.2 of the size.
pub struct BoxTypesetter;

impl Typesetter for BoxTypesetter {
    fn line_width(&self, text: &str, _weight: FontWeight, size_px: f32) -> PosterResult<f64> {
        Ok(text.chars().count() as f64 * 0.5 * f64::from(size_px))
    }

    fn metrics(&self, _weight: FontWeight, size_px: f32) -> PosterResult<LineMetrics> {
        let size = f64::from(size_px);
        Ok(LineMetrics {
            ascent: 0.8 * size,
            descent: 0.2 * size,
        })
    }

    fn rasterize(&self, block: &TextBlock, canvas: &mut Canvas) -> PosterResult<()> {
        let size = f64::from(block.size_px);
        for line in &block.lines {
            canvas.fill_rect(
                Rect::new(
                    line.x,
                    line.baseline - 0.8 * size,
                    line.x + line.width,
                    line.baseline + 0.2 * size,
                ),
                block.color,
            );
        }
        Ok(())
    }
}

/// Box typesetter that remembers every block it drew.
#[derive(Default)]
pub struct RecordingTypesetter {
    pub drawn: Mutex<Vec<TextBlock>>,
}

impl RecordingTypesetter {
    pub fn texts(&self) -> Vec<String> {
        self.drawn.lock().unwrap().iter().map(|b| b.text()).collect()
    }

    pub fn blocks(&self) -> Vec<TextBlock> {
        self.drawn.lock().unwrap().clone()
    }
}

impl Typesetter for RecordingTypesetter {
    fn line_width(&self, text: &str, weight: FontWeight, size_px: f32) -> PosterResult<f64> {
        BoxTypesetter.line_width(text, weight, size_px)
    }

    fn metrics(&self, weight: FontWeight, size_px: f32) -> PosterResult<LineMetrics> {
        BoxTypesetter.metrics(weight, size_px)
    }

    fn rasterize(&self, block: &TextBlock, canvas: &mut Canvas) -> PosterResult<()> {
        self.drawn.lock().unwrap().push(block.clone());
        BoxTypesetter.rasterize(block, canvas)
    }
}

/// Cover loader that fails the test if it is ever reached.
pub struct PanickingLoader;

impl CoverLoader for PanickingLoader {
    fn fetch(&self, source: &CoverSource) -> anyhow::Result<Vec<u8>> {
        panic!("cover fetch attempted for {source}");
    }
}

pub fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

pub fn solid_png(color: Rgb8, w: u32, h: u32) -> Vec<u8> {
    png_bytes(image::RgbaImage::from_pixel(w, h, color.to_rgba()))
}

/// Scratch assets (templates + covers) and output directories.
pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub config: EngineConfig,
}

impl Fixture {
    /// Light and Dark templates at the default canvas size.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig {
            assets_dir: dir.path().join("assets"),
            output_dir: dir.path().join("out"),
            ..EngineConfig::default()
        };
        let fixture = Self { dir, config };
        fixture.write_template(Theme::Light, LIGHT_BG);
        fixture.write_template(Theme::Dark, DARK_BG);
        fixture
    }

    pub fn write_template(&self, theme: Theme, bg: Rgb8) {
        let templates = self.config.templates_dir();
        std::fs::create_dir_all(&templates).unwrap();
        let layout = &self.config.layout;
        std::fs::write(
            templates.join(theme.spec().template_file),
            solid_png(bg, layout.canvas_width, layout.canvas_height),
        )
        .unwrap();
    }

    pub fn write_cover(&self, name: &str, color: Rgb8) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, solid_png(color, 64, 64)).unwrap();
        path
    }

    pub fn out_dir(&self) -> PathBuf {
        self.config.output_dir.clone()
    }

    pub fn engine(&self) -> PosterEngine {
        PosterEngine::new(self.config.clone(), Arc::new(BoxTypesetter)).unwrap()
    }

    pub fn engine_with(&self, typesetter: Arc<dyn Typesetter>) -> PosterEngine {
        PosterEngine::new(self.config.clone(), typesetter).unwrap()
    }
}

pub fn track(cover: &Path) -> TrackMetadata {
    TrackMetadata {
        name: "Apocalypse".to_string(),
        artist: "Cigarettes After Sex".to_string(),
        album: "Cigarettes After Sex".to_string(),
        released: "June 09, 2017".to_string(),
        duration: "04:50".to_string(),
        image: cover.display().to_string(),
        label: "Partisan Records".to_string(),
        id: "1oAwsWBovWRIp7qLMGPIet".to_string(),
    }
}

pub fn album(cover: &Path, tracks: usize) -> AlbumMetadata {
    AlbumMetadata {
        name: "Cigarettes After Sex".to_string(),
        artist: "Cigarettes After Sex".to_string(),
        released: "June 09, 2017".to_string(),
        image: cover.display().to_string(),
        label: "Partisan Records".to_string(),
        id: "0ZDCGjvXkFfZWpKxUCCFzE".to_string(),
        tracks: (1..=tracks).map(|i| format!("Track {i}")).collect(),
    }
}

pub fn open_rgb(path: &Path) -> image::RgbImage {
    let img = image::open(path).unwrap();
    assert!(matches!(img, image::DynamicImage::ImageRgb8(_)), "poster must be RGB8");
    img.to_rgb8()
}

pub fn rgb_at(img: &image::RgbImage, x: u32, y: u32) -> Rgb8 {
    let p = img.get_pixel(x, y);
    Rgb8::new(p[0], p[1], p[2])
}

pub fn close(a: Rgb8, b: Rgb8, tol: u8) -> bool {
    a.r.abs_diff(b.r) <= tol && a.g.abs_diff(b.g) <= tol && a.b.abs_diff(b.b) <= tol
}
