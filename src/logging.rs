use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_ENV_VAR: &str = "GITLINES_LOG";

/// Install a stderr subscriber. `GITLINES_LOG` overrides `default_level`.
pub fn setup_logger(default_level: LevelFilter) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let fmt = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // A subscriber may already be installed, e.g. by an embedding test harness.
    let _ = tracing_subscriber::registry().with(fmt).with(env_filter).try_init();
}
