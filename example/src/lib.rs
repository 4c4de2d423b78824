//! Portfolio demo for `folio-carousel`: replays scripted input sessions
//! against the four-slide deck and prints each frame as text.

pub mod app;
pub mod portfolio;
pub mod session;

pub use app::{Replay, ReplaySummary};
pub use session::{DEFAULT_SESSION, Session};

/// Installs the global subscriber. `RUST_LOG` takes precedence.
pub fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "error,folio_carousel=info,folio_example=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}
