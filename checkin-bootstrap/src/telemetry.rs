use anyhow::{anyhow, Result};
use tracing::subscriber::DefaultGuard;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use checkin_infrastructure::AppConfig;

/// Stderr subscriber scoped to the current thread, so warnings raised while
/// the config is loaded are not lost. Drop it before [`init_tracing`].
pub fn startup_subscriber() -> DefaultGuard {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// Installs the global subscriber. `RUST_LOG` overrides the `info` default.
/// The returned guard flushes the file writer and must outlive the server.
pub fn init_tracing(config: &AppConfig) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = config.log_format == "json";

    let Some(dir) = &config.log_dir else {
        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let installed = if json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        installed.map_err(|err| anyhow!("failed to init tracing: {}", err))?;
        return Ok(None);
    };

    let appender = tracing_appender::rolling::daily(dir, "checkin-server.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| anyhow!("failed to init tracing: {}", err))?;
    Ok(Some(guard))
}
