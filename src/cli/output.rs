//! Colored terminal output for pipeline progress.

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, Write};

const RULE_WIDTH: usize = 70;

/// A closed reader (`grp-build | head -1`) must not stop a running build.
fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Writes user-facing status lines.
///
/// Normal output goes to stdout, warnings and errors to stderr. Quiet mode
/// keeps only errors; verbose mode adds detail lines.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    color: ColorChoice,
}

impl OutputManager {
    /// Create an output manager with automatic color detection.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            color: ColorChoice::Auto,
        }
    }

    /// Output manager that prints nothing but errors.
    pub fn silent() -> Self {
        Self {
            verbose: false,
            quiet: true,
            color: ColorChoice::Never,
        }
    }

    /// Enable or disable colors.
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = if enabled {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        self
    }

    /// Returns true in verbose mode.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Returns true in quiet mode.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn write_line(
        &self,
        to_stderr: bool,
        color: Option<Color>,
        bold: bool,
        prefix: &str,
        message: &str,
    ) -> io::Result<()> {
        ignore_broken_pipe(self.emit(to_stderr, color, bold, prefix, message))
    }

    fn emit(
        &self,
        to_stderr: bool,
        color: Option<Color>,
        bold: bool,
        prefix: &str,
        message: &str,
    ) -> io::Result<()> {
        let mut stream = if to_stderr {
            StandardStream::stderr(self.color)
        } else {
            StandardStream::stdout(self.color)
        };

        if color.is_some() || bold {
            let mut spec = ColorSpec::new();
            spec.set_fg(color).set_bold(bold);
            stream.set_color(&spec)?;
            write!(stream, "{prefix}")?;
            stream.reset()?;
        } else {
            write!(stream, "{prefix}")?;
        }
        writeln!(stream, "{message}")?;
        stream.flush()
    }

    /// Print a section header framed by rules.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let rule = "=".repeat(RULE_WIDTH);
        self.write_line(false, None, false, "", "")?;
        self.write_line(false, Some(Color::Cyan), false, &rule, "")?;
        self.write_line(false, None, true, title, "")?;
        self.write_line(false, Some(Color::Cyan), false, &rule, "")
    }

    /// Print a progress step.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_line(false, Some(Color::Blue), true, "▸ ", message)
    }

    /// Print a success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_line(false, Some(Color::Green), true, "  ✓ ", message)
    }

    /// Print a warning line.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_line(true, Some(Color::Yellow), true, "  ⚠ ", message)
    }

    /// Print an error line. Shown even in quiet mode.
    pub fn error(&self, message: &str) -> io::Result<()> {
        self.write_line(true, Some(Color::Red), true, "  ✗ ", message)
    }

    /// Print indented text.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_line(false, None, false, "    ", message)
    }

    /// Print a detail line in verbose mode only.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        self.write_line(false, Some(Color::White), false, "    · ", message)
    }

    /// Print an empty line.
    pub fn blank(&self) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_line(false, None, false, "", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broken_pipe_is_swallowed() {
        let closed = Err(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(ignore_broken_pipe(closed).is_ok());
    }

    #[test]
    fn other_write_errors_still_surface() {
        let denied = Err(io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(
            ignore_broken_pipe(denied).unwrap_err().kind(),
            io::ErrorKind::PermissionDenied
        );
    }

    #[test]
    fn silent_manager_is_quiet_and_colorless() {
        let output = OutputManager::silent();
        assert!(output.is_quiet());
        assert!(!output.is_verbose());
        assert!(output.success("not shown").is_ok());
    }
}
