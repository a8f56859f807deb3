//! Terminal output: a prefix progress bar plus colored status lines.
//!
//! Everything that reaches the terminal during a run goes through one mutex,
//! so status lines and log events clear the bar before printing and the bar
//! is redrawn afterwards.

use std::io::{self, IsTerminal, Write};
use std::sync::{Mutex, MutexGuard};

use colored::Colorize;
use regex_report::{StatusColor, StatusLine, StatusSink};

const BAR_WIDTH: usize = 30;
const CLEAR_LINE: &str = "\r\x1b[2K";

#[derive(Debug, Default)]
struct Progress {
    total: usize,
    done: usize,
    current: String,
    active: bool,
}

impl Progress {
    fn render(&self) -> String {
        let fraction = if self.total == 0 {
            1.0
        } else {
            self.done as f64 / self.total as f64
        };
        let filled = ((fraction * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        let bar: String = "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled);

        format!(
            "Calculating consistencies {} {}/{} {}",
            bar.cyan(),
            self.done,
            self.total,
            self.current.dimmed()
        )
    }
}

/// Serialized writer for everything shown during a run.
#[derive(Debug)]
pub struct Console {
    progress: Mutex<Progress>,
    terminal: bool,
}

impl Console {
    pub fn new() -> Self {
        Self {
            progress: Mutex::new(Progress::default()),
            terminal: io::stderr().is_terminal(),
        }
    }

    /// Whether the bar is drawn at all.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn lock(&self) -> MutexGuard<'_, Progress> {
        // A panic while printing leaves nothing worth protecting.
        self.progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn clear(&self, progress: &Progress, stderr: &mut impl Write) {
        if self.terminal && progress.active {
            let _ = write!(stderr, "{}", CLEAR_LINE);
        }
    }

    fn draw(&self, progress: &Progress, stderr: &mut impl Write) {
        if self.terminal && progress.active {
            let _ = write!(stderr, "{}{}", CLEAR_LINE, progress.render());
            let _ = stderr.flush();
        }
    }

    /// Print raw log output above the bar.
    pub fn write_log(&self, bytes: &[u8]) {
        let progress = self.lock();
        let mut stderr = io::stderr().lock();
        self.clear(&progress, &mut stderr);
        let _ = stderr.write_all(bytes);
        self.draw(&progress, &mut stderr);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for Console {
    fn emit(&self, line: StatusLine) {
        let progress = self.lock();
        let mut stderr = io::stderr().lock();
        self.clear(&progress, &mut stderr);

        let text = line.to_string();
        let colored = match line.color() {
            StatusColor::Green => text.green(),
            StatusColor::Yellow => text.yellow(),
            StatusColor::Red => text.red(),
        };
        {
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "{}", colored);
            let _ = stdout.flush();
        }

        self.draw(&progress, &mut stderr);
    }

    fn start(&self, total: usize) {
        let mut progress = self.lock();
        *progress = Progress {
            total,
            done: 0,
            current: String::new(),
            active: true,
        };
        let mut stderr = io::stderr().lock();
        self.draw(&progress, &mut stderr);
    }

    fn advance(&self, prefix: &str) {
        let mut progress = self.lock();
        if !progress.current.is_empty() {
            progress.done += 1;
        }
        progress.current = prefix.to_string();
        let mut stderr = io::stderr().lock();
        self.draw(&progress, &mut stderr);
    }

    fn finish(&self) {
        let mut progress = self.lock();
        let mut stderr = io::stderr().lock();
        self.clear(&progress, &mut stderr);
        let _ = stderr.flush();
        progress.done = progress.total;
        progress.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_counts() {
        colored::control::set_override(false);
        let progress = Progress {
            total: 4,
            done: 1,
            current: "chebi".to_string(),
            active: true,
        };
        let rendered = progress.render();
        assert!(rendered.contains("1/4"));
        assert!(rendered.contains("chebi"));
        assert_eq!(rendered.matches('█').count(), 8);
    }

    #[test]
    fn test_render_empty_run_is_full() {
        colored::control::set_override(false);
        let progress = Progress::default();
        assert_eq!(progress.render().matches('█').count(), BAR_WIDTH);
    }
}
