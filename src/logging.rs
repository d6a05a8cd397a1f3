//! Tracing setup
//!
//! The TUI owns the terminal, so log lines go to a file instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Filter used when `RUST_LOG` is unset. Event targets start with the
/// binary's crate name.
pub const DEFAULT_FILTER: &str = "mocal=info";

/// Log file under the user's data directory
pub fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("motivational-calendar")
        .join("mocal.log")
}

fn open(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to `path`.
///
/// If the file cannot be opened logging is disabled; nothing may be written
/// to the terminal once the alternate screen is up.
pub fn init(path: &Path) {
    let writer = match open(path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(e) => {
            eprintln!("Logging disabled, cannot open {}: {}", path.display(), e);
            BoxMakeWriter::new(io::sink)
        }
    };

    tracing_subscriber::registry()
        .with(filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();
}

/// Run `f` under a scoped subscriber with `filter` and return what it logged
#[cfg(test)]
pub(crate) fn capture(filter: &str, f: impl FnOnce()) -> String {
    use std::sync::Arc;

    #[derive(Clone)]
    struct Capture(Arc<parking_lot::Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let out = Capture(Arc::new(parking_lot::Mutex::new(Vec::new())));
    let writer = out.clone();
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(move || writer.clone()),
        );
    tracing::subscriber::with_default(subscriber, f);

    let bytes = out.0.lock();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::QuoteStore;
    use crate::storage::{Storage, CUSTOM_QUOTES_KEY};

    fn key(s: &str) -> crate::date_key::DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_filter_keeps_info_and_warnings() {
        let out = capture(DEFAULT_FILTER, || {
            let storage = Storage::in_memory();
            storage.set_item(CUSTOM_QUOTES_KEY, "{ not json").unwrap();
            let mut store = QuoteStore::load_all(storage);
            store.set(Some(key("2024-03-15")), "Keep going").unwrap();
        });

        assert!(out.contains("WARN"), "{}", out);
        assert!(out.contains("Stored quotes are unreadable"), "{}", out);
        assert!(out.contains("Loaded 0 custom quotes"), "{}", out);
        // Per-action events stay below the default level
        assert!(!out.contains("Saved quote for"), "{}", out);
    }

    #[test]
    fn test_debug_filter_shows_per_action_events() {
        let out = capture("mocal=debug", || {
            let mut store = QuoteStore::load_all(Storage::in_memory());
            store.set(Some(key("2024-03-15")), "Keep going").unwrap();
        });
        assert!(out.contains("Saved quote for 2024-03-15"), "{}", out);
    }

    #[test]
    fn test_log_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("mocal.log");
        open(&path).unwrap();
        assert!(path.exists());
    }
}
