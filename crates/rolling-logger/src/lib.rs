//! Rolling Logger
//!
//! A `log` backend that keeps the most recent lines in a circular buffer and
//! forwards each line to the browser console (stderr off the browser).
//!
//! ```ignore
//! rolling_logger::init_logger("Listing", log::LevelFilter::Debug)?;
//! log::info!("[APP] started");
//! let tail = rolling_logger::recent_lines();
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Lines kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

/// Fixed-capacity line buffer; the oldest line is evicted first.
#[derive(Debug)]
pub struct RingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub struct RollingLogger {
    app_name: String,
    level: LevelFilter,
    buffer: Mutex<RingBuffer>,
}

impl RollingLogger {
    pub fn new(app_name: &str, level: LevelFilter, capacity: usize) -> Self {
        Self {
            app_name: app_name.to_string(),
            level,
            buffer: Mutex::new(RingBuffer::new(capacity)),
        }
    }

    pub fn format_line(&self, level: Level, target: &str, message: &str) -> String {
        format!(
            "{} {:<5} [{}] {}: {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            level,
            self.app_name,
            target,
            message
        )
    }

    pub fn recent(&self) -> Vec<String> {
        match self.buffer.lock() {
            Ok(buffer) => buffer.lines(),
            Err(poisoned) => poisoned.into_inner().lines(),
        }
    }

    fn remember(&self, line: String) {
        let mut buffer = match self.buffer.lock() {
            Ok(buffer) => buffer,
            Err(poisoned) => poisoned.into_inner(),
        };
        buffer.push(line);
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format_line(record.level(), record.target(), &record.args().to_string());
        sink::write(record.level(), &line);
        self.remember(line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
mod sink {
    use log::Level;
    use wasm_bindgen::JsValue;

    pub fn write(level: Level, line: &str) {
        let value = JsValue::from_str(line);
        match level {
            Level::Error => web_sys::console::error_1(&value),
            Level::Warn => web_sys::console::warn_1(&value),
            Level::Info => web_sys::console::info_1(&value),
            Level::Debug | Level::Trace => web_sys::console::log_1(&value),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod sink {
    use log::Level;

    pub fn write(_level: Level, line: &str) {
        eprintln!("{}", line);
    }
}

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Install the process-wide logger. Fails if another logger is already set.
pub fn init_logger(app_name: &str, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(app_name, level, DEFAULT_CAPACITY));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Most recent lines, oldest first. Empty before [`init_logger`].
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(RollingLogger::recent).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let mut ring = RingBuffer::new(3);
        for i in 0..5 {
            ring.push(format!("line {}", i));
        }
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.lines(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_zero_capacity_still_keeps_last_line() {
        let mut ring = RingBuffer::new(0);
        ring.push("a".into());
        ring.push("b".into());
        assert_eq!(ring.lines(), vec!["b"]);
    }

    #[test]
    fn test_logger_filters_by_level_and_buffers() {
        let logger = RollingLogger::new("Listing", LevelFilter::Info, 10);
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("listing")
                .args(format_args!("hidden"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .target("listing")
                .args(format_args!("[API] retry 1/1"))
                .build(),
        );

        let lines = logger.recent();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("WARN"));
        assert!(lines[0].contains("[Listing] listing: [API] retry 1/1"));
    }
}
