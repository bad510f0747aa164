use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use quadwarp::{
    ImageLayer, Point, Quality, Raster, RasterMut, Rect, RenderDesc, RenderThreading,
    Rgba8Surface, Surface, Warp, WarpParams,
};

#[derive(Parser, Debug)]
#[command(name = "quadwarp", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Warp a PNG placed on the source rectangle and write the result as a PNG.
    Render(RenderArgs),
    /// Print where a point maps under the warp.
    Map(MapArgs),
    /// Print the default warp parameters as JSON.
    Defaults,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input PNG, stretched over the source rectangle.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Warp parameters JSON (defaults when omitted).
    #[arg(long)]
    params: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output width in pixels.
    #[arg(long, default_value_t = 512)]
    width: u32,

    /// Output height in pixels (derived from the window aspect when omitted).
    #[arg(long)]
    height: Option<u32>,

    /// World window `X0 Y0 X1 Y1` (covers the source rectangle and destination quad when omitted).
    #[arg(long, num_args = 4, value_names = ["X0", "Y0", "X1", "Y1"], allow_negative_numbers = true)]
    window: Option<Vec<f64>>,

    /// Quality level: 0..=4 cubic, 5..=6 linear, above nearest.
    #[arg(long, default_value_t = 4)]
    quality: u8,

    /// Render strips on a rayon pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Destination rows per strip.
    #[arg(long, default_value_t = 64)]
    rows_per_strip: u32,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct MapArgs {
    /// Warp parameters JSON (defaults when omitted).
    #[arg(long)]
    params: Option<PathBuf>,

    /// Point x coordinate.
    #[arg(long, allow_negative_numbers = true)]
    x: f64,

    /// Point y coordinate.
    #[arg(long, allow_negative_numbers = true)]
    y: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Map(args) => cmd_map(args),
        Command::Defaults => cmd_defaults(),
    }
}

fn load_params(path: Option<&PathBuf>) -> anyhow::Result<WarpParams> {
    match path {
        Some(p) => Ok(WarpParams::from_path(p)?),
        None => Ok(WarpParams::default()),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let params = load_params(args.params.as_ref())?;
    let warp = Warp::new(params.clone())?;

    let input = image::open(&args.in_path)
        .with_context(|| format!("read png '{}'", args.in_path.display()))?
        .to_rgba8();
    let layer = ImageLayer::from_rgba8(&input, params.src_tl, params.src_br)?;

    let window = match args.window.as_deref() {
        Some(&[x0, y0, x1, y1]) => Rect::new(x0, y0, x1, y1),
        Some(_) => anyhow::bail!("--window takes exactly four values"),
        None => params.src_rect().union(params.dest_quad().bounds()),
    };
    if !(window.width() > 0.0 && window.height() > 0.0) {
        anyhow::bail!("window {window:?} has no area");
    }
    let height = args.height.unwrap_or_else(|| {
        ((f64::from(args.width) * window.height() / window.width()).round() as u32).max(1)
    });
    // y grows upward in world space, downward in the image
    let desc = RenderDesc::new(
        Point::new(window.x0, window.y1),
        Point::new(window.x1, window.y0),
        args.width,
        height,
    );

    let threading = RenderThreading {
        parallel: args.parallel,
        rows_per_strip: args.rows_per_strip,
        threads: args.threads,
    };
    let mut surface = Surface::default();
    let mut report = |_: u64, _: u64| true;
    let stats = quadwarp::render_tiled(
        &warp,
        &layer,
        &mut surface,
        Quality(args.quality),
        &desc,
        &threading,
        &mut report,
    )?;
    tracing::info!(strips = stats.strips, rows = stats.rows, "rendered");

    let mut out = Rgba8Surface::new(surface.width(), surface.height());
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            out.set_pixel(x, y, surface.pixel(x, y));
        }
    }

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    out.as_image()
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_map(args: MapArgs) -> anyhow::Result<()> {
    let params = load_params(args.params.as_ref())?;
    let warp = Warp::new(params)?;
    let h = warp.homography();
    let p = Point::new(args.x, args.y);

    let report = serde_json::json!({
        "point": p,
        "forward": h.map_forward(p),
        "forward_depth": h.depth_forward(p),
        "backward": h.map_backward(p),
        "backward_depth": h.depth_backward(p),
        "singular": h.is_singular(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_defaults() -> anyhow::Result<()> {
    println!("{}", WarpParams::default().to_json_pretty()?);
    Ok(())
}
