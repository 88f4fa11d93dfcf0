//! Tracing setup for a full-screen TUI.
//!
//! Writing log lines to stderr would tear the alternate screen apart, so the
//! subscriber writes into a bounded in-memory buffer that the shell renders
//! as an overlay (F12). Before the buffer is installed, lines fall back to
//! stderr.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::Level;

const MAX_LINES: usize = 500;

#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: Vec<String>,
    partial: String,
}

impl LogBuffer {
    fn push_bytes(&mut self, buf: &[u8]) {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            self.lines.push(line.trim_end().to_string());
        }
        if self.lines.len() > MAX_LINES {
            let excess = self.lines.len() - MAX_LINES;
            self.lines.drain(..excess);
        }
    }

    pub fn tail(&self, count: usize) -> Vec<String> {
        let start = self.lines.len().saturating_sub(count);
        self.lines[start..].to_vec()
    }
}

static GLOBAL_LOG: OnceLock<Arc<Mutex<LogBuffer>>> = OnceLock::new();

pub fn global_log() -> Arc<Mutex<LogBuffer>> {
    GLOBAL_LOG
        .get_or_init(|| Arc::new(Mutex::new(LogBuffer::default())))
        .clone()
}

pub struct DelegatingWriter;

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match global_log().lock() {
            Ok(mut log) => {
                log.push_bytes(buf);
                Ok(buf.len())
            }
            Err(_) => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SubscriberMakeWriter;

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter
    }
}

/// Install the global subscriber. Safe to call multiple times; later calls
/// are no-ops.
pub fn init_default() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(SubscriberMakeWriter)
        .with_target(false)
        .with_thread_names(false)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_splits_lines_and_bounds_history() {
        let mut log = LogBuffer::default();
        log.push_bytes(b"one\ntwo\npart");
        assert_eq!(log.tail(10), vec!["one".to_string(), "two".to_string()]);
        log.push_bytes(b"ial\n");
        assert_eq!(log.tail(1), vec!["partial".to_string()]);

        for i in 0..(MAX_LINES + 50) {
            log.push_bytes(format!("line {i}\n").as_bytes());
        }
        assert_eq!(log.tail(usize::MAX).len(), MAX_LINES);
    }
}
