//! Headless frame benchmark: render N frames into the software back-end.
//!
//! ```bash
//! cargo run --release --bin bench -- --frames 500 --spin
//! ```

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use yacast_rs::{
    config::ConfigArgs,
    engine::Engine,
    renderer::{CommandList, Renderer, RendererExt, Software},
    sim::Command,
};

#[derive(Parser)]
#[command(name = "bench", about = "Render frames without a window and time them")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Number of frames to render
    #[arg(short, long, default_value = "300")]
    frames: usize,

    /// Turn right once per frame instead of holding still
    #[arg(long)]
    spin: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings = cli
        .config
        .load()
        .and_then(|cfg| cfg.validate())
        .context("invalid configuration")?;
    let (w, h) = (settings.screen.w, settings.screen.h);
    let mut engine = Engine::new(Software::default(), settings.clone());

    let mut checksum = 0u64;
    let t0 = Instant::now();
    for _ in 0..cli.frames {
        if cli.spin {
            engine.apply_command(Command::RotateRight)?;
        }
        engine.render_frame()?;
        engine.end_frame(|fb, _, _| {
            checksum = fb
                .iter()
                .fold(checksum, |acc, &px| acc.rotate_left(5) ^ px as u64);
        });
    }
    let elapsed = t0.elapsed();

    let frames = cli.frames.max(1) as f64;
    let avg_ms = elapsed.as_secs_f64() * 1000.0 / frames;
    info!(
        "{} frames at {w}x{h}: avg {:.3} ms ({:.1} FPS), checksum {checksum:#018x}",
        cli.frames,
        avg_ms,
        1000.0 / avg_ms
    );

    // cross-check: the same view recorded as draw calls and replayed
    let mut recorder = Engine::new(CommandList::default(), settings);
    if cli.spin {
        for _ in 0..cli.frames {
            recorder.apply_command(Command::RotateRight)?;
        }
    }
    recorder.render_frame()?;
    let mut replayed = Software::default();
    replayed.begin_frame(w, h);
    replayed.replay(recorder.renderer.calls());

    let mut direct = Vec::new();
    engine.end_frame(|fb, _, _| direct.extend_from_slice(fb));
    let mut again = Vec::new();
    replayed.end_frame(|fb, _, _| again.extend_from_slice(fb));
    anyhow::ensure!(
        cli.frames == 0 || direct == again,
        "replayed draw list differs from the direct frame"
    );
    info!("{} draw calls replay to the same frame", recorder.renderer.calls().len());
    Ok(())
}
