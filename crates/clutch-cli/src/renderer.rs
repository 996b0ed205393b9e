//! Terminal rendering for plans and status lines.
//!
//! Markdown goes through termimad when color is enabled and is printed
//! verbatim otherwise, so `--no-color` output stays greppable.

use std::io::{self, Write};

use anyhow::Result;
use clutch_core::OperationStatus;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout
    pub fn render(&self, markdown: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        if self.rich_enabled {
            for line in markdown.lines() {
                // Headers keep their hashes so day groups stay scannable
                if line.starts_with('#') {
                    writeln!(out, "\x1b[34m{line}\x1b[0m")?;
                } else {
                    writeln!(out, "{}", self.skin.inline(line))?;
                }
            }
        } else {
            write!(out, "{markdown}")?;
            if !markdown.ends_with('\n') {
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Render a one-line operation status
    pub fn status(&self, status: &OperationStatus) -> Result<()> {
        self.render(&format!("{status}\n"))
    }

    /// Print a prompt without a trailing newline
    pub fn prompt(&self, label: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        if self.rich_enabled {
            write!(out, "\x1b[36m{label}\x1b[0m ")?;
        } else {
            write!(out, "{label} ")?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn is_rich(&self) -> bool {
        self.rich_enabled
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.is_rich());
        assert!(renderer.render("# Plan\n").is_ok());
    }

    #[test]
    fn test_rich_renderer() {
        let renderer = TerminalRenderer::new(true);
        assert!(renderer.is_rich());
        assert!(renderer.render("**bold** line without newline").is_ok());
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().is_rich());
    }

    #[test]
    fn test_status_renders() {
        let renderer = TerminalRenderer::new(false);
        assert!(renderer.status(&OperationStatus::success("Plan ready")).is_ok());
    }
}
