/// Teapot3D Terminal - Smol Teapot wireframe viewer
///
/// Renders the built-in teapot into a 128x64 monochrome bitmap and shows it
/// in the terminal.
/// Controls:
///   - Arrows / WASD: Rotate
///   - Enter / Space: Reset rotation, or next axis while auto-rotating
///   - Tab / M: Toggle auto-rotation
///   - Q / ESC: Quit
///
/// Usage: teapot3d [config.json]
use anyhow::Context;
use log::info;
use std::env;
use std::fs::File;
use teapot3d_core::{Model, RendererConfig};
use teapot3d_terminal::TerminalApp;

const DEFAULT_LOG_FILE: &str = "teapot3d.log";

fn init_logging() -> anyhow::Result<()> {
    let path = env::var("TEAPOT3D_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let log_file =
        File::create(&path).with_context(|| format!("Failed to create log file {}", path))?;

    // The terminal is in the alternate screen, so logs go to a file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("Starting teapot3d...");

    let config = match env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            RendererConfig::load(&path)
                .with_context(|| format!("Failed to load configuration from {}", path))?
        }
        None => RendererConfig::default(),
    };

    let model = Model::teapot();
    info!("Model loaded: {} triangles", model.len());

    let app = TerminalApp::new(config, model).context("Failed to initialize renderer")?;
    app.run().context("Terminal renderer failed")?;

    println!("Thank you for using Teapot3D!");
    Ok(())
}
