//! `tracing` subscriber setup.
//!
//! `RUST_LOG` takes precedence over the level chosen on the command line.
//! Everything goes to stderr; stdout is reserved for the `--json` report.

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

pub fn level_for(debug: bool) -> Level {
    if debug {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

fn build_filter(level: Level) -> EnvFilter {
    if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(format!("extract_code={}", level))
    }
}

/// Colour only when a human is watching stderr.
fn use_ansi() -> bool {
    atty::is(atty::Stream::Stderr)
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(level: Level) {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(build_filter(level))
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_ansi())
                    .with_target(false),
            )
            .init();
    });
}
