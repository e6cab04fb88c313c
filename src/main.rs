//! Desktop viewer.
//!
//! Controls  ↑/W = forward  ↓/S = back  ←/A = turn left  →/D = turn right  Esc = quit
//!
//! ```bash
//! cargo run --release -- --map maps/room.txt
//! ```

use std::{
    thread,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use yacast_rs::{
    config::ConfigArgs,
    engine::Engine,
    renderer::Software,
    sim::{Command, FrameClock, MoveOutcome},
};

#[derive(Parser)]
#[command(name = "yacast", about = "First-person grid raycaster")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

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
    let mut clock = FrameClock::new(settings.frame_period);
    let mut engine = Engine::new(Software::default(), settings);

    let mut win = Window::new("yacast", w, h, WindowOptions::default())?;

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last

    while win.is_open() && !win.is_key_down(Key::Escape) {
        /* --------------- input: one command per key event -------------- */
        for key in win.get_keys_pressed(KeyRepeat::Yes) {
            if let Some(cmd) = command_for(key) {
                if engine.apply_command(cmd)? == MoveOutcome::Blocked {
                    debug!(?cmd, "bumped into a wall");
                }
            }
        }

        /* --------------- render on the frame clock --------------------- */
        if !clock.due() {
            thread::sleep(clock.remaining());
            win.update();
            continue;
        }

        let t0 = Instant::now();
        engine.render_frame()?;
        acc_time += t0.elapsed();
        acc_frames += 1;

        let mut shown = Ok(());
        engine.end_frame(|fb, w, h| shown = win.update_with_buffer(fb, w, h));
        shown?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            info!(
                "avg render: {:.2} ms  ({} frames, period {:?})",
                avg_ms,
                acc_frames,
                clock.period()
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

fn command_for(key: Key) -> Option<Command> {
    match key {
        Key::Up | Key::W => Some(Command::MoveForward),
        Key::Down | Key::S => Some(Command::MoveBackward),
        Key::Left | Key::A => Some(Command::RotateLeft),
        Key::Right | Key::D => Some(Command::RotateRight),
        _ => None,
    }
}
