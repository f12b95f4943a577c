use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use texcube_common::Dimensions;
use texcube_input::{PointerButton, SceneEvent};
use texcube_render::TextSurface;
use texcube_runtime::{AppContext, SceneConfig, WindowedOnly};
use texcube_tools::SceneInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "texcube-cli", about = "Headless driver for the texcube demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON scene config; missing fields take their defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, effective config and scene summary
    Info,
    /// Run the frame loop against a text surface with a simulated clock
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "10")]
        frames: u64,
        /// Simulated refresh rate
        #[arg(long, default_value = "60")]
        fps: f64,
        #[arg(long, default_value = "800")]
        width: u32,
        #[arg(long, default_value = "600")]
        height: u32,
        /// Host device pixel ratio before clamping
        #[arg(long, default_value = "1.0")]
        pixel_ratio: f64,
        /// Horizontal orbit drag in pixels, applied before the first frame
        #[arg(long, default_value = "0")]
        drag: f32,
        /// Print every frame instead of only the last
        #[arg(long)]
        all: bool,
    },
    /// Print every scene node as JSON
    DumpScene,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SceneConfig> {
    match path {
        Some(p) => SceneConfig::load(p).with_context(|| format!("loading config {}", p.display())),
        None => Ok(SceneConfig::default()),
    }
}

struct SimulateOptions {
    frames: u64,
    fps: f64,
    dimensions: Dimensions,
    pixel_ratio: f64,
    drag: f32,
    all: bool,
}

/// Drive `frames` ticks at a fixed interval; returns the surface for output.
fn simulate(config: SceneConfig, opts: &SimulateOptions) -> anyhow::Result<TextSurface> {
    if !(opts.fps > 0.0 && opts.fps.is_finite()) {
        anyhow::bail!("fps must be positive, got {}", opts.fps);
    }
    let interval = Duration::try_from_secs_f64(1.0 / opts.fps)
        .with_context(|| format!("frame interval at {} fps is out of range", opts.fps))?;
    let t0 = Instant::now();

    let mut ctx = AppContext::new(config, opts.dimensions, opts.pixel_ratio, t0);
    let mut surface = TextSurface::new();
    ctx.configure_surface(&mut surface);

    if opts.drag != 0.0 {
        ctx.push(SceneEvent::PointerDrag {
            button: PointerButton::Primary,
            dx: opts.drag,
            dy: 0.0,
        });
    }

    let mut now = t0;
    for _ in 0..opts.frames {
        now = match now.checked_add(interval) {
            Some(next) => next,
            None => anyhow::bail!("simulated clock overflowed at frame {}", ctx.stats().frame),
        };
        ctx.process_events(&mut surface, &WindowedOnly);
        let stats = match ctx.tick(now, &mut surface) {
            Ok(stats) => stats,
            Err(never) => match never {},
        };
        if opts.all {
            print!("{}", surface.last_frame());
        }
        tracing::debug!(
            "frame {} at {:.3}s",
            stats.frame,
            stats.elapsed.as_secs_f32()
        );
    }
    Ok(surface)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            println!("texcube-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("{}", serde_json::to_string_pretty(&config)?);
            let dims = Dimensions::new(config.width, config.height);
            let ctx = AppContext::new(config, dims, 1.0, Instant::now());
            println!("{}", SceneInspector::summary(ctx.scene()));
        }
        Commands::Simulate {
            frames,
            fps,
            width,
            height,
            pixel_ratio,
            drag,
            all,
        } => {
            let opts = SimulateOptions {
                frames,
                fps,
                dimensions: Dimensions::new(width, height),
                pixel_ratio,
                drag,
                all,
            };
            let surface = simulate(config, &opts)?;
            if !all {
                print!("{}", surface.last_frame());
            }
            println!("Rendered {} frames", surface.frames());
        }
        Commands::DumpScene => {
            let dims = Dimensions::new(config.width, config.height);
            let ctx = AppContext::new(config, dims, 1.0, Instant::now());
            let nodes = SceneInspector::list_nodes(ctx.scene());
            println!("{}", serde_json::to_string_pretty(&nodes)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(frames: u64) -> SimulateOptions {
        SimulateOptions {
            frames,
            fps: 10.0,
            dimensions: Dimensions::new(800, 600),
            pixel_ratio: 3.0,
            drag: 0.0,
            all: false,
        }
    }

    #[test]
    fn simulate_renders_requested_frames() {
        let surface = simulate(SceneConfig::default(), &opts(5)).unwrap();
        assert_eq!(surface.frames(), 5);
        assert_eq!(surface.buffer_size(), (1600, 1200));
        assert!(surface.last_frame().contains("Frame 5"));
        // 5 frames at 10 fps: the cube has spun for half a second.
        assert!(surface.last_frame().contains("rot=(0.50, 0.50, 0.00)"));
    }

    #[test]
    fn simulate_rejects_zero_fps() {
        let mut o = opts(1);
        o.fps = 0.0;
        assert!(simulate(SceneConfig::default(), &o).is_err());
    }

    #[test]
    fn simulate_rejects_unrepresentable_interval() {
        let mut o = opts(1);
        o.fps = 1e-30;
        let err = simulate(SceneConfig::default(), &o).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn config_loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{ "fov_degrees": 70.0 }"#).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.fov_degrees, 70.0);
        assert_eq!(config.damping_factor, 0.1);
    }
}
