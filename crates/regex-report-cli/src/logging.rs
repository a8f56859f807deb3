//! Tracing subscriber setup.
//!
//! Log events are routed through the [`Console`] so they never tear the
//! progress bar. `RUST_LOG` takes precedence over `--verbose`.

use std::io::{self, Write};
use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::console::Console;

/// Install the global subscriber.
pub fn init(verbose: bool, console: Arc<Console>) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(console.is_terminal())
        .with_writer(ConsoleLog { console })
        .init();
}

/// Makes one buffered writer per log event.
struct ConsoleLog {
    console: Arc<Console>,
}

impl<'a> MakeWriter<'a> for ConsoleLog {
    type Writer = ConsoleLogEvent;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLogEvent {
            console: Arc::clone(&self.console),
            buffer: Vec::new(),
        }
    }
}

/// Buffers one formatted event and hands it to the console on drop.
struct ConsoleLogEvent {
    console: Arc<Console>,
    buffer: Vec<u8>,
}

impl Write for ConsoleLogEvent {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLogEvent {
    fn drop(&mut self) {
        if !self.buffer.is_empty() {
            self.console.write_log(&self.buffer);
        }
    }
}
