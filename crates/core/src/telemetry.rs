//! Tracing setup shared by the `chainfolio` binary and the API server.
use std::sync::OnceLock;

use color_eyre::eyre::{self, WrapErr as _, eyre};
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt as _};

static TELEMETRY_INIT: OnceLock<()> = OnceLock::new();

/// HTTP and RPC plumbing that is capped at `warn` whatever the level.
const QUIET_TARGETS: &[&str] = &[
    "h2",
    "hyper_util",
    "reqwest",
    "alloy_transport_http",
    "tower_http",
];

/// `RUST_LOG` when set, `default_level` otherwise.
pub fn env_filter(default_level: &str) -> eyre::Result<EnvFilter> {
    let level: LevelFilter = default_level
        .parse()
        .wrap_err_with(|| format!("invalid log level {default_level:?}"))?;
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    QUIET_TARGETS.iter().try_fold(filter, |filter, target| {
        let directive = format!("{target}=warn")
            .parse()
            .wrap_err_with(|| format!("invalid directive for {target}"))?;
        Ok(filter.add_directive(directive))
    })
}

pub fn get_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync {
    // stdout carries command output, logs go to stderr
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    tracing_subscriber::Registry::default()
        .with(filter)
        .with(fmt_layer)
}

pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> eyre::Result<()> {
    TELEMETRY_INIT
        .set(())
        .map_err(|()| eyre!("telemetry already initialised"))?;
    tracing::subscriber::set_global_default(subscriber)
        .wrap_err("failed to set global tracing subscriber")
}
