//! tracing 初始化
//!
//! Library crates log through `log`; records are bridged into `tracing` here.

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LoggingConfig};

const LOG_FILE_PREFIX: &str = "mailalias.log";

/// 非法的 level 指令回退到 `info`
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    tracing_log::LogTracer::init().context("failed to bridge log records")?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    match config.format {
        LogFormat::Text => layers.push(fmt::layer().with_target(true).boxed()),
        LogFormat::Json => layers.push(fmt::layer().json().with_target(true).boxed()),
    }

    let guard = match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory).with_context(|| {
                format!("failed to create log directory {}", directory.display())
            })?;
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(fmt::layer().with_ansi(false).with_writer(writer).boxed());
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter(&config.level))
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_falls_back() {
        let filter = env_filter("mailalias=loud");
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn accepts_target_directives() {
        let filter = env_filter("mailalias_core=debug,warn");
        let rendered = filter.to_string();
        assert!(rendered.contains("mailalias_core=debug"));
        assert!(rendered.contains("warn"));
    }
}
