use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use motionbox::driver::sink::write_png;
use motionbox::{
    CanvasWrapper, CpuSurface, DriverConfig, HeadlessOpts, InMemorySink, PngSequenceSink,
    run_headless, scenes,
};

#[derive(Parser, Debug)]
#[command(name = "motionbox", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the registered scenes.
    List,
    /// Render the frame shown at a given time as a PNG.
    Frame(FrameArgs),
    /// Render a run of frames as a numbered PNG sequence.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct DriverArgs {
    /// Scene name, see `motionbox list`.
    #[arg(long)]
    scene: String,

    /// Driver config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory textures are loaded from (overrides the config).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Draw debug overlays.
    #[arg(long)]
    debug: bool,

    /// Synthetic frame rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    driver: DriverArgs,

    /// Scene time in seconds.
    #[arg(long)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    driver: DriverArgs,

    /// Number of frames, starting at time zero.
    #[arg(long)]
    frames: u64,

    /// Output directory for `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_list() -> anyhow::Result<()> {
    for entry in scenes::registry() {
        println!("{:<22} {}", entry.name, entry.summary);
    }
    Ok(())
}

fn read_config(path: Option<&Path>) -> anyhow::Result<DriverConfig> {
    match path {
        Some(path) => DriverConfig::from_path(path)
            .with_context(|| format!("load driver config '{}'", path.display())),
        None => Ok(DriverConfig::default()),
    }
}

fn make_driver(args: &DriverArgs) -> anyhow::Result<CanvasWrapper<CpuSurface>> {
    let entry = scenes::find(&args.scene).with_context(|| {
        let known: Vec<_> = scenes::names().collect();
        format!("unknown scene '{}' (known: {})", args.scene, known.join(", "))
    })?;

    let mut config = read_config(args.config.as_deref())?;
    config.debug |= args.debug;
    if let Some(assets) = &args.assets {
        config.assets_root = Some(assets.clone());
    }
    config.validate()?;

    let [w, h] = config.resolution;
    let width = (f64::from(w) * config.resolution_scale).round().max(1.0) as u32;
    let height = (f64::from(h) * config.resolution_scale).round().max(1.0) as u32;
    let mut surface = CpuSurface::new(width, height)?;
    if let Some(font) = &config.font {
        let bytes =
            std::fs::read(font).with_context(|| format!("read font '{}'", font.display()))?;
        surface = surface.with_font(bytes)?;
    }

    let mut driver = CanvasWrapper::new(Some(surface), config)?;
    driver.set_scene(&(entry.provider)());
    Ok(driver)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut driver = make_driver(&args.driver)?;
    let opts = HeadlessOpts::single_at(args.driver.fps, args.time)?;
    let mut sink = InMemorySink::new();
    let stats = run_headless(&mut driver, opts, &mut sink)?;

    let (_, frame) = sink
        .frames()
        .first()
        .context("headless run emitted no frame")?;
    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    write_png(&args.out, frame).with_context(|| format!("write png '{}'", args.out.display()))?;

    if stats.diagnostics > 0 {
        eprintln!("{} render diagnostics", stats.diagnostics);
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut driver = make_driver(&args.driver)?;
    let mut sink = PngSequenceSink::new(args.out_dir.clone());
    let stats = run_headless(
        &mut driver,
        HeadlessOpts::new(args.driver.fps, args.frames),
        &mut sink,
    )?;

    if stats.diagnostics > 0 {
        eprintln!("{} render diagnostics", stats.diagnostics);
    }
    eprintln!(
        "wrote {} frames to {}",
        stats.frames_emitted,
        args.out_dir.display()
    );
    Ok(())
}
