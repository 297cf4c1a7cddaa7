//! Tracing setup shared by demos and test binaries.

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, Layer, prelude::*, registry::LookupSpan};

pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// Initialize logging to stdout.
///
/// The filter comes from `RUST_LOG` (default `info`); setting
/// `RUST_LOG_FORMAT=json` switches to JSON output. Does nothing if a
/// subscriber is already installed, so it is safe to call from tests.
pub fn init_logging() {
    let _ = tracing_subscriber::registry().with(stdout()).try_init();
}

fn stdout<S>() -> BoxedLayer<S>
where
    S: Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let log_env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_fmt = std::env::var("RUST_LOG_FORMAT")
        .map(|val| val == "json")
        .unwrap_or(false);

    if json_fmt {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .json()
            .with_filter(log_env_filter)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .with_target(true)
            .with_filter(log_env_filter)
            .boxed()
    }
}
