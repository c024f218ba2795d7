use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use roadscape_common::Viewport;
use roadscape_render::{RecordingSurface, SceneConfig, SvgSurface, TerrainRenderer};
use roadscape_tools::{FrameClock, FrameInspector, FrameTimer, draw_digest, grid_digest};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roadscape-cli", about = "Render the scrolling road landscape")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SceneArgs {
    /// Viewport width in pixels
    #[arg(long, default_value = "1280")]
    width: u32,
    /// Viewport height in pixels
    #[arg(long, default_value = "720")]
    height: u32,
    /// Noise seed (overrides the config file)
    #[arg(long)]
    seed: Option<u32>,
    /// Scene config file (.yaml, .yml or .json)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct TimeArgs {
    /// Frame time in milliseconds
    #[arg(short, long, default_value = "0")]
    time: f64,
    /// Freeze at this many seconds instead (0 = live clock)
    #[arg(long, conflicts_with = "time")]
    freeze: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Format {
    Svg,
    Json,
}

impl Format {
    fn default_output(self) -> PathBuf {
        match self {
            Format::Svg => PathBuf::from("frame.svg"),
            Format::Json => PathBuf::from("frame.json"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info and the grid chosen for a viewport
    Info {
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Render a single frame
    Render {
        #[command(flatten)]
        scene: SceneArgs,
        #[command(flatten)]
        time: TimeArgs,
        /// Output format: SVG image or JSON draw-call trace
        #[arg(long, value_enum, default_value = "svg")]
        format: Format,
        /// Output file [default: frame.svg or frame.json, by format]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a sequence of SVG frames
    Animate {
        #[command(flatten)]
        scene: SceneArgs,
        /// Number of frames
        #[arg(long, default_value = "60")]
        frames: usize,
        /// Frames per second of simulated time
        #[arg(long, default_value = "30")]
        fps: f64,
        /// Time of the first frame in milliseconds
        #[arg(long, default_value = "0")]
        start: f64,
        /// Directory for frame_NNNN.svg files
        #[arg(short, long, default_value = "frames")]
        output_dir: PathBuf,
    },
    /// Render a frozen frame twice and compare digests
    Verify {
        #[command(flatten)]
        scene: SceneArgs,
        #[command(flatten)]
        time: TimeArgs,
    },
    /// Time repeated frame renders
    Bench {
        #[command(flatten)]
        scene: SceneArgs,
        /// Number of frames to render
        #[arg(long, default_value = "120")]
        frames: usize,
        /// Freeze at this many seconds (0 = live clock)
        #[arg(long, default_value = "0")]
        freeze: u64,
    },
    /// Print the default scene config as YAML
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info { scene } => {
            println!("roadscape-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", roadscape_common::crate_info());
            println!("noise: {}", roadscape_noise::crate_info());
            println!("terrain: {}", roadscape_terrain::crate_info());
            println!("render: {}", roadscape_render::crate_info());
            println!("tools: {}", roadscape_tools::crate_info());

            let (viewport, config) = load_scene(&scene)?;
            let (gw, gh) = config.grid.resolution(viewport);
            println!(
                "viewport {}x{} -> grid {gw}x{gh}, seed={}",
                viewport.width(),
                viewport.height(),
                config.seed
            );
        }
        Commands::Render {
            scene,
            time,
            format,
            output,
        } => {
            let (viewport, config) = load_scene(&scene)?;
            let mut renderer = TerrainRenderer::with_seed(viewport, &config)?;
            let t = frame_time(&time);
            let output = output.unwrap_or_else(|| format.default_output());

            let stats = match format {
                Format::Svg => {
                    let mut surface = SvgSurface::new(viewport);
                    let stats = renderer.render(t, &mut surface);
                    write_file(&output, surface.finish().as_bytes())?;
                    stats
                }
                Format::Json => {
                    let mut surface = RecordingSurface::new();
                    let stats = renderer.render(t, &mut surface);
                    let json = serde_json::to_vec_pretty(&surface.into_calls())?;
                    write_file(&output, &json)?;
                    stats
                }
            };

            println!("Frame t={t}ms -> {}", output.display());
            println!(
                "Quads: drawn={} culled={} (offscreen={}, backfacing={}, degenerate={})",
                stats.quads_drawn,
                stats.culled(),
                stats.culled_offscreen,
                stats.culled_backfacing,
                stats.culled_degenerate
            );
            println!(
                "{}",
                FrameInspector::summary(renderer.grid(), config.fade_threshold)
            );
        }
        Commands::Animate {
            scene,
            frames,
            fps,
            start,
            output_dir,
        } => {
            if !(fps.is_finite() && fps > 0.0) {
                anyhow::bail!("fps must be positive, got {fps}");
            }
            let (viewport, config) = load_scene(&scene)?;
            let mut renderer = TerrainRenderer::with_seed(viewport, &config)?;
            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("creating {}", output_dir.display()))?;

            for i in 0..frames {
                let t = start + i as f64 * 1000.0 / fps;
                let mut surface = SvgSurface::new(viewport);
                let stats = renderer.render(t, &mut surface);
                let path = output_dir.join(format!("frame_{i:04}.svg"));
                write_file(&path, surface.finish().as_bytes())?;
                tracing::debug!(
                    frame = i,
                    t,
                    drawn = stats.quads_drawn,
                    "wrote {}",
                    path.display()
                );
            }
            println!("Wrote {frames} frames to {}", output_dir.display());
        }
        Commands::Verify { scene, time } => {
            let (viewport, config) = load_scene(&scene)?;
            let mut renderer = TerrainRenderer::with_seed(viewport, &config)?;
            let t = frame_time(&time);
            println!("Frozen frame check: t={t}ms, seed={}", config.seed);

            let mut first = RecordingSurface::new();
            renderer.render(t, &mut first);
            let first_grid = grid_digest(renderer.grid());

            let mut second = RecordingSurface::new();
            renderer.render(t, &mut second);
            let second_grid = grid_digest(renderer.grid());

            let first_draw = draw_digest(first.calls())?;
            let second_draw = draw_digest(second.calls())?;
            println!(
                "Run 1: calls={}, draw={first_draw}, grid={first_grid}",
                first.calls().len()
            );
            println!(
                "Run 2: calls={}, draw={second_draw}, grid={second_grid}",
                second.calls().len()
            );

            let matched = first_draw == second_draw && first_grid == second_grid;
            println!("Match: {}", if matched { "OK" } else { "MISMATCH" });
            if !matched {
                anyhow::bail!("frozen frames differ");
            }
        }
        Commands::Bench {
            scene,
            frames,
            freeze,
        } => {
            let (viewport, config) = load_scene(&scene)?;
            let mut renderer = TerrainRenderer::with_seed(viewport, &config)?;
            let clock = FrameClock::from_freeze_seconds(freeze);
            let mut timer = FrameTimer::new(frames);
            let mut surface = RecordingSurface::new();

            for _ in 0..frames {
                surface.clear();
                timer.time_frame(|| renderer.render(clock.now_ms(), &mut surface));
            }

            println!(
                "Bench: {} frames, {}x{} viewport, grid {}x{}, clock={}",
                timer.count(),
                viewport.width(),
                viewport.height(),
                renderer.grid().width(),
                renderer.grid().height(),
                if clock.is_frozen() { "frozen" } else { "live" }
            );
            println!(
                "Frame time: avg={:?} min={:?} max={:?} ({:.1} fps)",
                timer.average(),
                timer.min(),
                timer.max(),
                timer.fps()
            );
            println!(
                "Quads: avg drawn={:.1}, culled={:.1}%",
                timer.average_drawn(),
                timer.cull_ratio() * 100.0
            );
        }
        Commands::Config => {
            print!("{}", SceneConfig::default().to_yaml()?);
        }
    }

    Ok(())
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<(Viewport, SceneConfig)> {
    let viewport = Viewport::new(args.width, args.height)?;
    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SceneConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok((viewport, config))
}

fn frame_time(args: &TimeArgs) -> f64 {
    match args.freeze {
        Some(seconds) => FrameClock::from_freeze_seconds(seconds).now_ms(),
        None => args.time,
    }
}

fn write_file(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))
}
