//! Logging subsystem
//!
//! One-time `tracing` initialization for the session layer. Messages go
//! either to stderr or to an append-only `<program>.log` file readable by
//! the owner only. The effective verbose level is the maximum of the
//! level passed at initialization and the separately settable
//! configuration level, mapped onto tracing levels (0 = info, 1 = debug,
//! 2 and above = trace).

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::thread;

use directories::ProjectDirs;
use thiserror::Error;
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Logging options, typically taken from `[log]` settings plus a
/// command-line verbosity flag.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// ANSI-colored messages when logging to a tty.
    pub colored_log: bool,
    /// Log to stderr instead of a log file.
    pub logtostderr: bool,
    /// Log file directory; `None` means the default data directory.
    pub log_dir: Option<PathBuf>,
    /// Verbose level requested by the caller (e.g. a `-v` flag).
    pub verbose_level: i32,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            colored_log: true,
            logtostderr: false,
            log_dir: None,
            verbose_level: 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum LogError {
    #[error("could not determine the logging directory")]
    NoLogDir,
    #[error("could not open the log file: {0}")]
    Io(#[from] io::Error),
    #[error("could not install the tracing subscriber: {0}")]
    Subscriber(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Keeps the non-blocking log writer alive. Dropped on shutdown, it
/// flushes and closes the log stream.
#[derive(Debug)]
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static CONFIG_VERBOSE_LEVEL: AtomicI32 = AtomicI32::new(0);

/// Set the configuration-provided verbose level. Must be called before
/// `init` to take effect; the log directory and sinks are fixed at
/// initialization.
pub fn set_config_verbose_level(level: i32) {
    CONFIG_VERBOSE_LEVEL.store(level, Ordering::Relaxed);
}

/// The verbose level actually in effect for a given flag level.
pub fn effective_verbose_level(flag_level: i32) -> i32 {
    flag_level.max(CONFIG_VERBOSE_LEVEL.load(Ordering::Relaxed))
}

fn level_filter(verbose_level: i32) -> LevelFilter {
    match verbose_level {
        i32::MIN..=0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn default_log_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "kasane", "kasane").map(|dirs| dirs.data_dir().join("log"))
}

/// Open the log file in append mode, restrict it to the owner, and write
/// the creation header.
fn prepare_log_file(path: &Path, argv0: &str) -> io::Result<()> {
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let timestamp = now.format(&format).unwrap_or_default();
    writeln!(
        file,
        "Log file created at: {} {} {:?}",
        timestamp,
        process::id(),
        thread::current().id()
    )?;
    writeln!(file, "Program name: {argv0}")?;
    Ok(())
}

/// Initialize the logging subsystem once. Later calls return an empty
/// guard without touching the installed subscriber.
pub fn init(argv0: &str, options: &LogOptions) -> Result<LogGuard, LogError> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(LogGuard { _worker: None });
    }

    let verbose = effective_verbose_level(options.verbose_level);
    let filter = EnvFilter::builder()
        .with_default_directive(level_filter(verbose).into())
        .from_env_lossy();

    if options.logtostderr {
        let ansi = options.colored_log && io::stderr().is_terminal();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_ansi(ansi)
            .try_init()?;
        return Ok(LogGuard { _worker: None });
    }

    let program = Path::new(argv0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "kasane".to_string());
    let log_dir = options
        .log_dir
        .clone()
        .or_else(default_log_dir)
        .ok_or(LogError::NoLogDir)?;
    fs::create_dir_all(&log_dir)?;

    let file_name = format!("{program}.log");
    prepare_log_file(&log_dir.join(&file_name), argv0)?;

    let appender = tracing_appender::rolling::never(&log_dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()?;
    Ok(LogGuard {
        _worker: Some(guard),
    })
}
