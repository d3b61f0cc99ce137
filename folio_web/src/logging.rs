//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Events are formatted by the fmt subscriber (no timestamps, no colours)
//! and each finished line is handed to the matching `console` method, so
//! warnings and errors keep their highlighting in browser devtools.
//!
//! The level comes from [`LogPolicy`]: informational output only on
//! development hosts.

use std::io::{self, Write};

use folio_core::errors::{FolioError, FolioResult};
use folio_core::logger::LogPolicy;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

/// Install the global subscriber.
pub fn init_logging(policy: LogPolicy) -> FolioResult<()> {
    tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(policy.max_level)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| FolioError::internal(format!("logging init failed: {e}")))
}

/// Hands out one [`ConsoleWriter`] per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and emits it to the console on drop.
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        ConsoleWriter {
            level,
            buffer: Vec::with_capacity(128),
        }
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let Some(line) = console_line(&self.buffer) else {
            return;
        };
        let value = JsValue::from_str(&line);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&value),
            Level::WARN => web_sys::console::warn_1(&value),
            Level::INFO => web_sys::console::info_1(&value),
            _ => web_sys::console::debug_1(&value),
        }
    }
}

/// The text to print for a buffered event, without the trailing newline.
fn console_line(buffer: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(buffer);
    let line = text.trim_end();
    (!line.is_empty()).then(|| line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_line_trims_newline() {
        assert_eq!(
            console_line(b" INFO portfolio initialized projects=6\n"),
            Some(" INFO portfolio initialized projects=6".to_string())
        );
    }

    #[test]
    fn test_empty_buffer_prints_nothing() {
        assert_eq!(console_line(b""), None);
        assert_eq!(console_line(b"\n"), None);
    }
}
