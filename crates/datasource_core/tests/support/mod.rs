//! Shared helpers for integration tests.

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::{Lazy, OnceCell};
use std::sync::Mutex;
use std::thread::{self, ThreadId};

pub const SELECT_TARGET: &str = "datasource_core::select";

struct CapturedLine {
    thread: ThreadId,
    level: Level,
    target: String,
    message: String,
}

#[derive(Default)]
struct CaptureLogger {
    lines: Mutex<Vec<CapturedLine>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let line = CapturedLine {
            thread: thread::current().id(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        self.lines.lock().unwrap().push(line);
    }

    fn flush(&self) {}
}

static LOGGER: Lazy<CaptureLogger> = Lazy::new(CaptureLogger::default);
static INSTALLED: OnceCell<()> = OnceCell::new();

/// Installs the capturing logger for this test binary.
pub fn capture_logs() {
    INSTALLED.get_or_init(|| {
        log::set_logger(&*LOGGER).expect("no other logger should be installed");
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Messages logged by the current test thread under `target`.
pub fn messages_for(target: &str) -> Vec<String> {
    messages_where(|line| line.target == target)
}

/// Messages logged by the current test thread at info level or louder, any target.
pub fn info_messages() -> Vec<String> {
    messages_where(|line| line.level <= Level::Info)
}

fn messages_where(keep: impl Fn(&CapturedLine) -> bool) -> Vec<String> {
    let current = thread::current().id();
    LOGGER
        .lines
        .lock()
        .unwrap()
        .iter()
        .filter(|line| line.thread == current && keep(line))
        .map(|line| line.message.clone())
        .collect()
}
