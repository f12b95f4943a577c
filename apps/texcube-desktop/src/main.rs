mod app;
mod input;
mod surface;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use texcube_common::Dimensions;
use texcube_render_wgpu::TextureImage;
use texcube_runtime::{AppContext, SceneConfig};
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "texcube-desktop", about = "Textured cube demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON scene config; missing fields take their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cube texture, overrides the config
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long)]
    width: Option<u32>,

    /// Initial window height in logical pixels
    #[arg(long)]
    height: Option<u32>,
}

impl Cli {
    fn scene_config(&self) -> Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SceneConfig::default(),
        };
        if let Some(texture) = &self.texture {
            config.texture = texture.clone();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("texcube-desktop starting");

    let config = cli.scene_config()?;
    let texture = TextureImage::load_or_white(&config.texture);
    let dimensions = Dimensions::new(config.width, config.height);
    let context = AppContext::new(config, dimensions, 1.0, Instant::now());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::GpuApp::new(context, texture);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.take_startup_error() {
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from(["texcube-desktop", "--width", "800", "--texture", "a.png"]);
        let config = cli.scene_config().unwrap();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, SceneConfig::default().height);
        assert_eq!(config.texture, PathBuf::from("a.png"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["texcube-desktop", "--config", "/nonexistent/texcube.json"]);
        let err = cli.scene_config().unwrap_err();
        assert!(err.to_string().contains("loading config"));
    }
}
