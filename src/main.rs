//! objwin demo
//!
//! Opens a window of draggable shapes and a traffic light on the X display.
//!
//! Shapes window: drag shapes with any button, right click on empty space to
//! add one, `R` clears the window. Over a circle, `L` locks it in place and
//! `D` deletes it. The quit chord (Alt+F4 unless configured otherwise) leaves
//! the demo.

mod demo;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use objwin::{Config, EventLoop, X11Platform};

fn main() -> Result<()> {
    let config = Config::load();

    // Initialize logging
    let fallback = config
        .as_ref()
        .map(|c| c.logging.filter.clone())
        .unwrap_or_else(|_| objwin::config::LoggingConfig::default().filter);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or(fallback),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting objwin demo");

    let config = config?;
    let quit_policy = config.quit_policy()?;

    let platform = X11Platform::connect().context("Failed to set up graphics")?;
    let mut event_loop = EventLoop::new(platform).with_quit_policy(quit_policy);

    demo::open_shapes(&mut event_loop, &config)?;
    demo::open_traffic_light(&mut event_loop, &config)?;

    event_loop.run()?;

    info!("objwin demo finished");
    Ok(())
}
