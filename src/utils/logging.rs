use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: &str, format: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        "pretty" => registry.with(tracing_subscriber::fmt::layer().pretty()).try_init()?,
        _ => registry.with(tracing_subscriber::fmt::layer().compact()).try_init()?,
    }

    Ok(())
}
