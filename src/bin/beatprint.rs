use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "beatprint", version, about = "Compose track and album posters")]
struct Cli {
    /// Engine configuration JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a track poster with a lyrics excerpt.
    Track(TrackArgs),
    /// Compose an album poster with its track list.
    Album(AlbumArgs),
    /// List available theme names.
    Themes,
}

#[derive(Args, Debug)]
struct PosterArgs {
    /// Metadata record (JSON).
    #[arg(long)]
    meta: PathBuf,

    /// Theme name (case-sensitive).
    #[arg(long, default_value = "Light")]
    theme: String,

    /// Tint the accent strip with the cover's dominant color.
    #[arg(long)]
    accent: bool,

    /// Cover override: URL or local path.
    #[arg(long)]
    cover: Option<String>,

    /// Output directory (defaults to the configured one).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TrackArgs {
    #[command(flatten)]
    poster: PosterArgs,

    /// Lyrics text file, one lyric line per line. Without it the instrumental placeholder is used.
    #[arg(long)]
    lyrics: Option<PathBuf>,

    /// 1-based inclusive line range to print.
    #[arg(long, default_value = "5-9")]
    lines: String,
}

#[derive(Args, Debug)]
struct AlbumArgs {
    #[command(flatten)]
    poster: PosterArgs,

    /// Number the tracks.
    #[arg(long)]
    indexing: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Track(args) => cmd_track(cli.config.as_deref(), args),
        Command::Album(args) => cmd_album(cli.config.as_deref(), args),
        Command::Themes => {
            for theme in beatprint::Theme::ALL {
                println!("{theme}");
            }
            Ok(())
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse JSON '{}'", path.display()))
}

fn make_engine(config: Option<&Path>) -> anyhow::Result<beatprint::PosterEngine> {
    let config = beatprint::EngineConfig::load(config)?;
    Ok(beatprint::PosterEngine::from_config(config)?)
}

fn options(args: &PosterArgs, indexing: bool) -> beatprint::PosterOptions {
    beatprint::PosterOptions {
        save_dir: args.out.clone(),
        accent: args.accent,
        theme: args.theme.clone(),
        custom_cover: args.cover.clone(),
        indexing,
    }
}

fn cmd_track(config: Option<&Path>, args: TrackArgs) -> anyhow::Result<()> {
    let meta: beatprint::TrackMetadata = read_json(&args.poster.meta)?;
    let excerpt = match &args.lyrics {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read lyrics '{}'", path.display()))?;
            let lines: Vec<String> = text.lines().map(str::to_string).collect();
            beatprint::select_lines(&lines, &args.lines)?
        }
        None => beatprint::INSTRUMENTAL_PLACEHOLDER.to_string(),
    };

    let engine = make_engine(config)?;
    let path = engine.track(&meta, &excerpt, &options(&args.poster, false))?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_album(config: Option<&Path>, args: AlbumArgs) -> anyhow::Result<()> {
    let meta: beatprint::AlbumMetadata = read_json(&args.poster.meta)?;
    let engine = make_engine(config)?;
    let path = engine.album(&meta, &options(&args.poster, args.indexing))?;
    println!("{}", path.display());
    Ok(())
}
