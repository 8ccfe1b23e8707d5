use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "twibbon", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a photo under a frame and save the PNG.
    Compose(ComposeArgs),
    /// Replay a recorded gesture script and print the resulting transform as JSON.
    Gestures(GesturesArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// User photo (any format the `image` crate decodes).
    #[arg(long)]
    photo: PathBuf,

    /// Frame overlay, normally a PNG with a transparent window.
    #[arg(long)]
    frame: PathBuf,

    /// Directory the export is written into.
    #[arg(long)]
    out_dir: PathBuf,

    /// Initial photo scale.
    #[arg(long)]
    scale: Option<f64>,

    /// Initial photo offset in surface pixels, as `X,Y`.
    #[arg(long, value_parser = parse_offset, allow_hyphen_values = true)]
    offset: Option<twibbon::Vec2>,

    /// Gesture script replayed after the initial transform.
    #[arg(long)]
    gestures: Option<PathBuf>,

    /// Editor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct GesturesArgs {
    /// Gesture script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Treat the photo as uploaded, so controls are enabled.
    #[arg(long, default_value_t = false)]
    photo_loaded: bool,

    /// Editor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Gestures(args) => cmd_gestures(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<twibbon::EditorConfig> {
    match path {
        Some(p) => Ok(twibbon::EditorConfig::from_path(p)?),
        None => Ok(twibbon::EditorConfig::default()),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    let frame = std::fs::read(&args.frame)
        .with_context(|| format!("read frame '{}'", args.frame.display()))?;
    let photo = std::fs::read(&args.photo)
        .with_context(|| format!("read photo '{}'", args.photo.display()))?;

    let mut sess = twibbon::EditorSession::new(config)?;
    sess.set_frame(frame)?;
    sess.upload_photo(photo);
    let pumped = sess.pump();
    report_notices(&mut sess);
    pumped?;

    if let Some(offset) = args.offset {
        sess.dispatch(twibbon::TransformAction::SetOffset(offset));
    }
    if let Some(scale) = args.scale {
        sess.dispatch(twibbon::TransformAction::PinchScale(scale));
    }
    if let Some(path) = &args.gestures {
        let script = twibbon::GestureScript::from_path(path)?;
        sess.apply_script(&script);
    }
    sess.pump()?;

    let t = sess.transform();
    tracing::info!(
        scale = t.scale,
        offset_x = t.offset.x,
        offset_y = t.offset.y,
        "final transform"
    );

    let mut sink = twibbon::FileSink::new(&args.out_dir);
    let exported = sess.export_to(&mut sink);
    report_notices(&mut sess);
    let location = exported?;

    eprintln!("wrote {location}");
    Ok(())
}

fn cmd_gestures(args: GesturesArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    let script = twibbon::GestureScript::from_path(&args.script)?;

    let state = if args.photo_loaded {
        script.replay_transform(twibbon::TransformState::default(), &config.limits)
    } else {
        tracing::warn!("no photo loaded; controls are disabled and the script has no effect");
        twibbon::TransformState::default()
    };

    let json = serde_json::to_string_pretty(&state).context("serialize transform")?;
    println!("{json}");
    Ok(())
}

fn report_notices(sess: &mut twibbon::EditorSession) {
    for notice in sess.drain_notices() {
        match notice.level() {
            twibbon::NoticeLevel::Success => eprintln!("{notice}"),
            twibbon::NoticeLevel::Error => eprintln!("error: {notice}"),
        }
    }
}

fn parse_offset(s: &str) -> Result<twibbon::Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad X '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad Y '{y}': {e}"))?;
    Ok(twibbon::Vec2::new(x, y))
}
