//! Drives the sample looping timeline through a fixed-step host loop and prints
//! the animated position twice per simulated second.
//!
//! RUST_LOG=metamorph_core=debug cargo run -p metamorph-core --example sample_loop

use metamorph_core::{parse_stored_timeline_json, Config, FrameScheduler, TickOutcome};

fn main() -> anyhow::Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "metamorph_core=info".to_string());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::default().with_frame_rate(30.0);
    let json = metamorph_test_fixtures::timelines::json("sample-loop")?;
    let timeline = parse_stored_timeline_json(&json)?;
    let cycle = timeline.duration();

    let mut scheduler = FrameScheduler::new(&config)?;
    let mut engine = timeline.into_engine(&config, scheduler.clock())?;

    // Two full cycles plus a little.
    let frames = (cycle.as_secs_f32() * config.frame_rate * 2.2) as u64;
    scheduler.run(&mut engine, frames, |frame, outcome, node| {
        if outcome == TickOutcome::Restarted {
            println!("frame {frame:>4}: -- loop restart --");
        }
        if frame % 15 == 0 {
            let p = node.position;
            println!(
                "frame {frame:>4}: position = ({:>7.3}, {:>7.3}, {:>7.3})",
                p.x, p.y, p.z
            );
        }
    })?;
    Ok(())
}
