//! Pointer Motion CLI - dry-run entry point
//!
//! Plays a humanized click and drag against an in-memory sink and prints
//! the resulting event trace, without touching a real browser.
//!
//! Usage: `pmotion [config.json]`

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use pointer_motion::{Button, LogHook, MotionConfig, Point, Pointer, RecordingSink};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            MotionConfig::from_json(&json)?
        }
        None => MotionConfig::default(),
    };

    println!("Pointer Motion - humanized pointer synthesis");
    println!("============================================");
    println!();

    let sink = Arc::new(RecordingSink::new());
    let pointer = Pointer::new(sink.clone(), config)?.with_debug_hook(Arc::new(LogHook));

    let started = Instant::now();
    pointer
        .click(Point::new(640.0, 360.0), Button::Left, 1, true)
        .await?;
    report("Click (640, 360)", &sink, started);

    sink.clear();
    let started = Instant::now();
    pointer
        .drag(Point::new(200.0, 500.0), Point::new(900.0, 250.0), true)
        .await?;
    report("Drag (200, 500) -> (900, 250)", &sink, started);

    sink.clear();
    let started = Instant::now();
    pointer.double_click(Point::new(100.0, 100.0), true).await?;
    report("Double-click (100, 100)", &sink, started);

    let state = pointer.state();
    println!("Final position: ({:.1}, {:.1})", state.position.x, state.position.y);
    println!("Buttons held: {:?}", state.pressed_buttons);

    Ok(())
}

fn report(label: &str, sink: &RecordingSink, started: Instant) {
    let moves = sink.moves();
    println!("{label}");
    println!("  - Frames: {}", moves.len());
    println!("  - Presses: {}", sink.presses());
    println!("  - Releases: {}", sink.releases());
    println!("  - Elapsed: {:.3}s", started.elapsed().as_secs_f64());

    if let Some(last) = moves.last() {
        println!("  - Last frame: ({:.1}, {:.1})", last.x, last.y);
    }
    println!();
}
