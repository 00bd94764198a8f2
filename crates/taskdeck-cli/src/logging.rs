use flexi_logger::{Logger, LoggerHandle};

/// Environment variable holding a log spec such as `info` or
/// `taskdeck_store=debug`.
pub const LOG_ENV: &str = "TASKDECK_LOG";

/// Start stderr logging. The returned handle must stay alive for the life of
/// the process; `None` means logging could not be started and is disabled.
pub fn init(verbose: bool) -> Option<LoggerHandle> {
    let spec = std::env::var(LOG_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| if verbose { "debug" } else { "warn" }.to_string());

    match Logger::try_with_str(&spec).and_then(|logger| {
        logger
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()
    }) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("warning: logging disabled ({LOG_ENV}={spec}): {e}");
            None
        }
    }
}
