mod app;
mod camera;
mod error;
mod gl;
mod graphics;
mod lighting;
mod math;
mod primitives;
mod scene;
mod state;
mod terminal;
mod tessellate;
mod vertex;

use crate::app::{Application, Flow};
use crate::gl::Gl;
use crate::graphics::Raster;
use crate::terminal::{FpsCounter, Input, Terminal};
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Write log output to this file (the terminal is busy drawing)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Show a status line with FPS, camera and lights
    #[arg(short, long)]
    debug: bool,

    /// Exit after rendering this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Idle tick interval in milliseconds
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::sink),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let mut app = Application::new();
    let (cols, rows) = terminal::size();
    let (width, height) = terminal::frame_size(cols, rows, args.debug);
    let mut raster = Raster::new(width, height);
    let mut fps = FpsCounter::new();
    let tick = Duration::from_millis(args.tick_ms);
    let mut frames = 0u64;

    let mut screen = Terminal::enter("Cricket Stadium")?;
    info!(width, height, "entered terminal");

    loop {
        let redraw = if event::poll(tick).context("polling terminal events")? {
            match event::read().context("reading terminal event")? {
                Event::Key(key) => {
                    let flow = match terminal::translate_key(&key) {
                        Some(Input::Key(c)) => app.on_key_down(c),
                        Some(Input::Special(special)) => app.on_special_key(special),
                        None => Flow::Continue,
                    };
                    if flow == Flow::Exit {
                        break;
                    }
                }
                Event::Resize(cols, rows) => {
                    let (width, height) = terminal::frame_size(cols, rows, args.debug);
                    info!(width, height, "terminal resized");
                    raster.resize(width, height);
                }
                _ => {}
            }
            true
        } else {
            app.on_idle_tick()
        };
        if !redraw {
            continue;
        }

        app.on_render(&mut raster);
        if let Some(err) = raster.take_error() {
            warn!(%err, "render error");
        }

        let rate = fps.frame();
        let status = args.debug.then(|| terminal::status_line(&app.state, rate));
        screen.present(&raster, status.as_deref())?;

        frames += 1;
        if args.frames.is_some_and(|limit| frames >= limit) {
            info!(frames, "frame limit reached");
            break;
        }
    }

    drop(screen);
    info!("terminal restored");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;
    info!(?args, "starting");
    run(&args)
}
