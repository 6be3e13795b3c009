use crate::config::{LoggingConfig, Section};
use file_rotate::{compression::Compression, suffix::AppendCount, ContentLimit, FileRotate};
use parking_lot::Mutex;
use std::{
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{level_filters::LevelFilter, Level};
use tracing_subscriber::{filter::Targets, fmt};

const DEFAULT_SECTION: &str = "default";

fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

fn level_filter(raw: &str) -> LevelFilter {
    parse_tracing_level(raw)
        .map(LevelFilter::from_level)
        .unwrap_or(LevelFilter::OFF)
}

/// The "default" section sets the fallback level; every other key is a target prefix.
fn build_targets(cfg: &LoggingConfig, level_of: impl Fn(&Section) -> &str) -> Targets {
    let fallback = cfg
        .get(DEFAULT_SECTION)
        .map(|s| level_filter(level_of(s)))
        .unwrap_or(LevelFilter::OFF);

    cfg.iter()
        .filter(|(name, _)| name.as_str() != DEFAULT_SECTION)
        .fold(Targets::new().with_default(fallback), |targets, (name, s)| {
            targets.with_target(name.clone(), level_filter(level_of(s)))
        })
}

fn console_targets(cfg: &LoggingConfig) -> Targets {
    build_targets(cfg, |s| s.console_level.as_str())
}

fn file_targets(cfg: &LoggingConfig) -> Targets {
    build_targets(cfg, |s| s.file_level.as_str())
}

/// Rotating file shared by every writer handle the fmt layer asks for.
#[derive(Clone)]
struct SharedRotation(Arc<Mutex<FileRotate<AppendCount>>>);

impl<'a> fmt::MakeWriter<'a> for SharedRotation {
    type Writer = RotationGuard;
    fn make_writer(&'a self) -> Self::Writer {
        RotationGuard(self.0.clone())
    }
}

struct RotationGuard(Arc<Mutex<FileRotate<AppendCount>>>);

impl Write for RotationGuard {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().flush()
    }
}

/// Relative log paths live under `base_dir`.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(file);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    base_dir.join(path)
}

/// Missing directories on the way to `log_path` are created.
fn open_rotating_file(
    log_path: &Path,
    max_bytes: usize,
    max_backups: usize,
) -> std::io::Result<SharedRotation> {
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let rotation = FileRotate::new(
        log_path,
        AppendCount::new(max_backups),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    Ok(SharedRotation(Arc::new(Mutex::new(rotation))))
}

fn default_section_writer(section: &Section, base_dir: &Path) -> Option<SharedRotation> {
    if section.file.trim().is_empty() {
        return None;
    }

    let size_mb = section.max_size_mb.unwrap_or(100) as usize;
    let log_path = resolve_log_path(&section.file, base_dir);

    open_rotating_file(&log_path, size_mb * 1024 * 1024, section.max_backups.unwrap_or(3))
        .map_err(|e| eprintln!("Cannot open log file {}: {}", log_path.display(), e))
        .ok()
}

/// Initialize logging from a configuration.
/// - `cfg`: logging sections keyed by target prefix ("default" is the fallback)
/// - `base_dir`: directory used to resolve a relative log file path
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

    // must run before a subscriber is installed
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let console_layer = fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(console_targets(cfg));

    let file_layer = cfg
        .get(DEFAULT_SECTION)
        .and_then(|section| default_section_writer(section, base_dir))
        .map(|writer| {
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_writer(writer)
                .with_filter(file_targets(cfg))
        });

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

fn init_default_logging() {
    let _ = fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}
