use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

// Keeps the background writer alive so buffered lines reach the file.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialise logging. With `debug` the default level is `debug` and can be
/// overridden via the `RUST_LOG` environment variable; otherwise the level is
/// fixed at `info`.
///
/// When `file` is given, output is appended to that file instead of stderr.
/// Calling this more than once is harmless; only the first call installs a
/// subscriber.
pub fn init(debug: bool, file: Option<PathBuf>) {
    // Without debug we force `info` so a stray `RUST_LOG` in the user's
    // environment cannot turn on verbose output.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match file.and_then(file_writer) {
        Some(writer) => {
            let _ = builder.with_writer(writer).with_ansi(false).try_init();
        }
        None => {
            let _ = builder.try_init();
        }
    }
}

fn file_writer(path: PathBuf) -> Option<tracing_appender::non_blocking::NonBlocking> {
    if FILE_GUARD.get().is_some() {
        return None;
    }
    let file_name = path.file_name()?.to_owned();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if let Err(err) = std::fs::create_dir_all(&dir) {
        eprintln!("failed to create log directory {}: {err}", dir.display());
        return None;
    }
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = FILE_GUARD.set(guard);
    Some(writer)
}
