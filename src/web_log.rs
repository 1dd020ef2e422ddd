//! Browser console logging
//!
//! A `tracing-subscriber` fmt layer whose writer hands each formatted event
//! to `console.error` / `warn` / `info` / `debug` by level.

use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Collects one formatted event and logs it when dropped
pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }

        let message = line.to_string().into();
        match self.level {
            Level::ERROR => web_sys::console::error_1(&message),
            Level::WARN => web_sys::console::warn_1(&message),
            Level::INFO => web_sys::console::info_1(&message),
            _ => web_sys::console::debug_1(&message),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

/// Route `tracing` events at `info` and above to the browser console
///
/// Safe to call more than once; later calls are ignored.
pub fn init_console_logging() {
    // No clock on wasm32-unknown-unknown, so no timestamps
    let _ = tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter)
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init();
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::io::Write;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_writer_buffers_until_drop() {
        let mut writer = MakeConsoleWriter.make_writer();
        writer.write_all(b"Ignoring invalid backend origin override\n").unwrap();
        assert_eq!(writer.buf.len(), 41);
        assert_eq!(writer.level, Level::INFO);
    }

    #[wasm_bindgen_test]
    fn test_init_is_idempotent() {
        init_console_logging();
        init_console_logging();
        tracing::warn!(base = "ftp://nope", "Ignoring invalid backend origin override");
    }
}
