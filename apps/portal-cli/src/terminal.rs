use std::collections::HashMap;
use std::io::{self, Write};

use portal_client_core::{ContentCard, Destination, Input, PageSurface, Region, TranscriptLine};

/// Renders page output as plain text lines. Inputs are supplied up front from
/// command-line arguments.
///
/// `PageSurface` methods cannot fail, so the first write error is kept and
/// surfaced by [`TerminalSurface::finish`].
pub struct TerminalSurface<W: Write> {
    out: W,
    inputs: HashMap<Input, String>,
    write_error: Option<io::Error>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            inputs: HashMap::new(),
            write_error: None,
        }
    }

    pub fn with_input(mut self, input: Input, value: impl Into<String>) -> Self {
        self.inputs.insert(input, value.into());
        self
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(error) = self.write_error.take() {
            return Err(error);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn line(&mut self, text: &str) {
        if self.write_error.is_some() {
            return;
        }
        if let Err(error) = writeln!(self.out, "{text}") {
            self.write_error = Some(error);
        }
    }
}

impl<W: Write> PageSurface for TerminalSurface<W> {
    fn alert(&mut self, message: &str) {
        self.line(&format!("! {message}"));
    }

    fn navigate(&mut self, destination: Destination) {
        let hint = match destination {
            Destination::Login => "run `portal login` to continue",
            Destination::MemberDashboard => "run `portal dashboard` to continue",
            Destination::AdminDashboard => "run `portal admin` to continue",
        };
        self.line(&format!("-> {} ({hint})", destination.path()));
    }

    fn set_text(&mut self, region: Region, text: &str) {
        match region {
            Region::MessageArea => self.line(text),
            _ => self.line(&format!("{}: {text}", region.dom_id())),
        }
    }

    fn replace_list(&mut self, region: Region, items: &[String]) {
        self.line(&format!("{}:", region.dom_id()));
        if items.is_empty() {
            self.line("  (none)");
        }
        for item in items {
            self.line(&format!("  - {item}"));
        }
    }

    fn replace_cards(&mut self, _region: Region, cards: &[ContentCard]) {
        for card in cards {
            self.line(&card.heading);
            self.line(&format!("  {}", card.description));
            self.line(&format!("  [{}]", card.action_label));
        }
    }

    fn replace_transcript(&mut self, lines: &[TranscriptLine]) {
        for line in lines {
            self.line(&line.display());
        }
    }

    fn append_transcript(&mut self, line: &TranscriptLine) {
        self.line(&line.display());
    }

    fn read_input(&self, input: Input) -> String {
        self.inputs.get(&input).cloned().unwrap_or_default()
    }

    fn clear_input(&mut self, input: Input) {
        self.inputs.remove(&input);
    }
}
