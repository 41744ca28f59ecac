use crate::cli::LogFormatArg;
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init(format: LogFormatArg) -> anyhow::Result<()> {
    LogTracer::init()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormatArg::Pretty => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormatArg::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }

    Ok(())
}
