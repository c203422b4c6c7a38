//! Colored terminal output.

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// User-facing terminal output with consistent coloring.
///
/// Write failures are swallowed; terminal output is never worth failing a
/// pipeline over.
pub struct OutputManager;

impl OutputManager {
    /// Creates an output manager.
    pub fn new() -> Self {
        OutputManager
    }

    /// Progress line for a started stage.
    pub fn progress(&self, message: &str) {
        self.colored(Color::Cyan, "›", message);
    }

    /// Success line.
    pub fn success(&self, message: &str) {
        self.colored(Color::Green, "✓", message);
    }

    /// Error line, written to stderr.
    pub fn error(&self, message: &str) {
        let mut stream = StandardStream::stderr(ColorChoice::Auto);
        let _ = stream.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
        let _ = write!(stream, "error:");
        let _ = stream.reset();
        let _ = writeln!(stream, " {message}");
    }

    fn colored(&self, color: Color, prefix: &str, message: &str) {
        let mut stream = StandardStream::stdout(ColorChoice::Auto);
        let _ = stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(stream, "{prefix}");
        let _ = stream.reset();
        let _ = writeln!(stream, " {message}");
    }
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::new()
    }
}
