//! Epicycles - redraw a closed curve with rotating Fourier vectors
//!
//! Headless driver: feeds a preset or file curve into a session as if it
//! were drawn with a pointer, ticks the animation, then exports the frame.

use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use log::info;

use epicycles::cli::Args;
use epicycles::{export, shapes, Session};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let animation_config = args.animation_config()?;
    let tick_interval = Duration::from_millis(animation_config.tick_interval_ms);
    let mut session = Session::new(args.spectrum_config()?, animation_config)?;

    let points = match &args.points {
        Some(file) => shapes::load_points(file)?,
        None => shapes::generate(&args.parse_shape_preset(), &args.shape_config())?,
    };

    // Replay the curve the way a pointer stroke arrives
    session.on_capture_started();
    for point in points {
        session.record_point(point);
    }
    session.finish_capture()?;

    let period_ticks = session.animator().period_ticks(args.speed);
    let ticks = (period_ticks * args.periods).ceil() as usize;
    info!(
        "Animating {} epicycles for {} ticks ({:.2} per turn)",
        session.spectrum().len(),
        ticks,
        period_ticks
    );

    let start = Instant::now();
    for _ in 0..ticks {
        session.on_tick();
        if args.realtime {
            thread::sleep(tick_interval);
        }
    }
    info!(
        "Finished at t = {:.4} rad in {:.2}ms",
        session.animator().clock().time(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let state = session.render_state();
    let export_config = args.export_config()?;

    if let Some(file) = &args.png {
        export::write_png(&state, &export_config, file)?;
    }
    if let Some(file) = &args.wav {
        export::write_xy_wav(&state.reconstruction_path, &export_config, file)?;
    }
    if args.json {
        println!("{}", export::to_json(&state)?);
    }

    Ok(())
}
