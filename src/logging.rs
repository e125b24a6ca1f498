//! Logging setup
//!
//! Library code only emits `tracing` events; the binary decides where they
//! go. Two sinks are installed: the console (stderr, filtered by `RUST_LOG`)
//! and a durable log file in the data directory that records everything at
//! debug level.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::paths::{ExpensePaths, LOG_FILE_NAME};
use crate::error::{ExpenseError, ExpenseResult};

/// Directives for everything this package emits
const CRATE_DEBUG: &str = "expense_tracker=debug,expense=debug";

/// Install the console and file sinks as the global subscriber
///
/// The returned guard flushes the file sink when dropped and must be kept
/// alive for the whole run.
pub fn init_logging(paths: &ExpensePaths, verbose: bool) -> ExpenseResult<WorkerGuard> {
    paths.ensure_directories()?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(paths.base_dir())
        .map_err(|e| ExpenseError::Config(format!("Failed to open log file: {}", e)))?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let console_filter = if verbose {
        EnvFilter::new(CRATE_DEBUG)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(console_filter);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_filter(EnvFilter::new(CRATE_DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ExpenseError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;
    use tracing_subscriber::fmt::MakeWriter;

    use crate::models::Money;
    use crate::reports::ExpenseSummary;

    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl CaptureWriter {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CaptureWriter {
        type Writer = CaptureWriter;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_events_reach_scoped_subscriber() {
        let writer = CaptureWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer.clone())
            .with_ansi(false)
            .finish();

        let last_day = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            ExpenseSummary::generate(&[], Money::from_cents(1000), last_day).unwrap();
        });

        let logged = writer.contents();
        assert!(logged.contains("Summarizing expenses"));
        assert!(logged.contains("WARN"));
        assert!(logged.contains("No days remaining"));
    }
}
