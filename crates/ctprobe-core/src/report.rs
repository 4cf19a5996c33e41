//! Console report rendering

use crate::conclusion::Conclusion;
use crate::error::error_chain;
use crate::runner::ProbeResults;
use chrono::Local;
use colored::Colorize;
use reqwest::header::HeaderMap;
use std::error::Error as StdError;
use std::fmt::Display;
use std::io::{self, Write};
use url::Url;

const RULE_WIDTH: usize = 60;
const BANNER_WIDTH: usize = 62;

/// Writes the human-readable probe report
///
/// All output of a run flows through one `Reporter`, so tests can capture it
/// with `Reporter::new(Vec::new())`.
pub struct Reporter<W: Write = io::Stdout> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Boxed banner naming the tool and the target
    pub fn banner(&mut self, target: &Url) -> io::Result<()> {
        let rows = [
            String::new(),
            format!("ctprobe {}", env!("CARGO_PKG_VERSION")),
            "Content-Type diagnostics".to_string(),
            String::new(),
            "Purpose: find which request encodings the server accepts".to_string(),
            format!("Target:  {}", target),
            String::new(),
        ];

        writeln!(self.out, "╔{}╗", "═".repeat(BANNER_WIDTH))?;
        for row in &rows {
            let pad = (BANNER_WIDTH - 2).saturating_sub(row.chars().count());
            writeln!(self.out, "║  {}{}║", row, " ".repeat(pad))?;
        }
        writeln!(self.out, "╚{}╝", "═".repeat(BANNER_WIDTH))
    }

    pub fn section(&mut self, title: &str) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out)?;
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "{}", title.bold())?;
        writeln!(self.out, "{}", rule)
    }

    pub fn field(&mut self, label: &str, value: impl Display) -> io::Result<()> {
        writeln!(self.out, "{}: {}", label, value)
    }

    pub fn headers(&mut self, label: &str, headers: &HeaderMap) -> io::Result<()> {
        writeln!(self.out, "{}:", label)?;
        for (name, value) in headers {
            let value = value.to_str().unwrap_or("<non-UTF-8 value>");
            writeln!(self.out, "  {}: {}", name, value)?;
        }
        Ok(())
    }

    /// Error line carrying the full cause chain
    pub fn error(&mut self, err: &(dyn StdError + 'static)) -> io::Result<()> {
        writeln!(self.out, "{} {}", "❌ Error:".red().bold(), error_chain(err))
    }

    /// Pretty JSON body of a successful JSON response
    pub fn json_success(&mut self, pretty: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "✅ Success! Response data:".green().bold())?;
        writeln!(self.out, "{}", pretty)
    }

    /// One line per probe, in execution order
    pub fn summary(&mut self, results: &ProbeResults) -> io::Result<()> {
        self.section("Summary")?;
        for (kind, success) in results.iter() {
            let marker = if success {
                "✅ success".green()
            } else {
                "❌ failure".red()
            };
            writeln!(self.out, "{}: {}", kind.label(), marker)?;
        }
        Ok(())
    }

    /// Diagnosis section; prints nothing under the heading when no rule fired
    pub fn diagnosis(&mut self, conclusions: &[Conclusion]) -> io::Result<()> {
        self.section("Diagnosis")?;
        for conclusion in conclusions {
            let finding = if conclusion.is_positive() {
                format!("✅ {}", conclusion.finding()).green()
            } else {
                format!("❌ {}", conclusion.finding()).red()
            };
            writeln!(self.out, "{}", finding)?;
            writeln!(self.out, "{}", format!("💡 {}", conclusion.hint()).yellow())?;
        }
        writeln!(self.out)
    }

    pub fn timestamp(&mut self) -> io::Result<()> {
        writeln!(self.out, "Finished: {}", Local::now().to_rfc3339())
    }
}
