use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Events go to stderr so they never mix with
/// the shell transcript on stdout; `RUST_LOG` overrides the `warn` default.
pub fn init() {
    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
