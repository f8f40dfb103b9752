use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Initialize structured logging based on configuration
///
/// `json` is meant for hosted deployments, `pretty` for local runs.
/// `RUST_LOG` overrides the configured level when set.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let log_level = parse_log_level(&config.level)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.format.as_str() == "json" {
        let json_layer = fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true)
            .with_line_number(true);

        match open_log_file(config.file_path.as_deref())? {
            Some(file) => registry.with(json_layer.with_writer(file)).init(),
            None => registry.with(json_layer).init(),
        }
    } else {
        let pretty_layer = fmt::layer()
            .pretty()
            .with_target(true)
            .with_line_number(true)
            .with_file(false);

        match open_log_file(config.file_path.as_deref())? {
            Some(file) => registry.with(pretty_layer.with_ansi(false).with_writer(file)).init(),
            None => registry.with(pretty_layer).init(),
        }
    }

    Ok(())
}

fn open_log_file(path: Option<&str>) -> anyhow::Result<Option<std::sync::Arc<std::fs::File>>> {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return Ok(None);
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(Some(std::sync::Arc::new(file)))
}

/// Parse log level string to tracing Level
fn parse_log_level(level: &str) -> anyhow::Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(anyhow::anyhow!("Invalid log level: {level}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
        assert!(parse_log_level("loud").is_err());
    }

    #[test]
    fn test_open_log_file() {
        assert!(open_log_file(None).unwrap().is_none());
        assert!(open_log_file(Some("")).unwrap().is_none());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tunein.log");
        let file = open_log_file(path.to_str()).unwrap();
        assert!(file.is_some());
        assert!(path.exists());
    }
}
