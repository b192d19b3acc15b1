use std::io::{self, Write};
use tracing::warn;

use super::Renderer;
use crate::orchestrator::{AggregateView, Entry, ProviderState};
use crate::provider::ProviderId;
use crate::ui::Style;

/// Writes each published view as a block of lines, one per visible entry.
///
/// Results and failures are shown, in-flight providers get a hint line, and
/// idle, skipped or empty results are left out.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_view(&mut self, view: &AggregateView, order: &[ProviderId]) -> io::Result<()> {
        if let Some(query) = view.query() {
            writeln!(self.out, "{} {}", Style::header("›"), Style::header(query))?;
        }
        for id in order {
            if let Some(line) = entry_line(view.entry(*id)) {
                writeln!(self.out, "  {line}")?;
            }
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, view: &AggregateView, order: &[ProviderId]) {
        if let Err(e) = self.write_view(view, order) {
            warn!(error = %e, "failed to render view");
        }
    }
}

/// The display line for one entry, or `None` if the entry is not shown.
pub fn entry_line(entry: &Entry) -> Option<String> {
    let title = Style::secondary(entry.title);
    match &entry.state {
        ProviderState::Succeeded(text) if !text.is_empty() => {
            Some(format!("{}  {title}", Style::result(text)))
        }
        ProviderState::Pending => Some(format!("{}  {title}", Style::hint("translating..."))),
        ProviderState::Failed(message) => {
            Some(format!("{} {}  {title}", Style::error("✗"), Style::error(message)))
        }
        ProviderState::Idle | ProviderState::Skipped | ProviderState::Succeeded(_) => None,
    }
}
