//! Rolling-file logging for jotter core.
//!
//! # Invariants
//! - The backend starts at most once per process; repeating `init_logging`
//!   with the same level and directory is a no-op, anything else is refused.
//! - Initialization reports failures as strings and never panics.
//! - Log events carry metadata only. Panic payloads are flattened to one line
//!   and capped before they are written.

use crate::config::LoggingConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::panic::{self, PanicHookInfo};
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "jotter";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 5;
const PANIC_PAYLOAD_CAP: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: LevelFilter,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Starts file logging described by `config`.
///
/// # Errors
/// - Unknown level, or `off`.
/// - Empty or relative directory, or one that cannot be created.
/// - Logging already running with another level or directory.
pub fn init_logging(config: &LoggingConfig) -> Result<(), String> {
    let level = parse_level(&config.level)?;
    let dir = parse_log_dir(&config.log_dir)?;

    let active = ACTIVE_LOGGER.get_or_try_init(|| start(level, &dir))?;
    if active.dir != dir {
        return Err(format!(
            "logging already writes to `{}`; refusing to switch to `{}`",
            active.dir.display(),
            dir.display()
        ));
    }
    if active.level != level {
        return Err(format!(
            "logging already runs at `{}`; refusing to switch to `{}`",
            active.level, level
        ));
    }
    Ok(())
}

/// Level used when none is configured: `debug` in debug builds, else `info`.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(level: LevelFilter, dir: &Path) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(dir)
        .map_err(|err| format!("cannot create log directory `{}`: {err}", dir.display()))?;

    let handle = Logger::try_with_str(level.as_str().to_ascii_lowercase())
        .map_err(|err| format!("invalid log specification: {err}"))?
        .log_to_file(FileSpec::default().directory(dir).basename(LOG_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();
    info!(
        "event=core_init module=core status=ok platform={} version={} level={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        level
    );

    Ok(ActiveLogger {
        level,
        dir: dir.to_path_buf(),
        _handle: handle,
    })
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    match raw.trim().parse::<LevelFilter>() {
        Ok(LevelFilter::Off) | Err(_) => Err(format!(
            "unsupported log level `{}`; expected trace|debug|info|warn|error",
            raw.trim()
        )),
        Ok(level) => Ok(level),
    }
}

fn parse_log_dir(raw: &str) -> Result<PathBuf, String> {
    let dir = PathBuf::from(raw.trim());
    if dir.as_os_str().is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    if !dir.is_absolute() {
        return Err(format!("log_dir must be absolute, got `{}`", dir.display()));
    }
    Ok(dir)
}

// Only reached from `start`, which runs once per process.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic_captured module=core status=error location={location} payload={}",
            one_line(&panic_payload(info), PANIC_PAYLOAD_CAP)
        );
        previous(info);
    }));
}

fn panic_payload(info: &PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .map(|text| (*text).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

fn one_line(text: &str, cap: usize) -> String {
    let mut line: String = text
        .chars()
        .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
        .take(cap)
        .collect();
    if text.chars().count() > cap {
        line.push_str("...");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{init_logging, one_line, parse_level, parse_log_dir};
    use crate::config::LoggingConfig;
    use log::LevelFilter;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(label: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir()
            .join(format!("jotter-logging-{label}-{nanos}"))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn levels_parse_case_insensitively_and_off_is_refused() {
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::Warn);
        assert!(parse_level("off").is_err());
        assert!(parse_level("verbose").unwrap_err().contains("verbose"));
    }

    #[test]
    fn log_dir_must_be_absolute_and_non_empty() {
        assert!(parse_log_dir("  ").is_err());
        assert!(parse_log_dir("logs/dev").unwrap_err().contains("absolute"));
    }

    #[test]
    fn panic_payloads_are_flattened_and_capped() {
        assert_eq!(one_line("a\nb\rc", 10), "a b c");
        assert_eq!(one_line("title: secret", 5), "title...");
    }

    #[test]
    fn repeated_init_is_accepted_only_for_the_same_settings() {
        let dir = scratch_dir("primary");
        let config = LoggingConfig::new("info", dir.as_str());
        init_logging(&config).unwrap();
        init_logging(&LoggingConfig::new("INFO", dir.as_str())).unwrap();

        let level_err = init_logging(&LoggingConfig::new("debug", dir.as_str())).unwrap_err();
        assert!(level_err.contains("refusing to switch"));

        let other_dir = scratch_dir("secondary");
        let dir_err = init_logging(&LoggingConfig::new("info", other_dir)).unwrap_err();
        assert!(dir_err.contains("refusing to switch"));
    }
}
