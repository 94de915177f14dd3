use std::io::Write;

use fcetool_core::AppViewModel;
use fcetool_logging::fce_warn;

use super::render::{render, render_partitions};
use super::ExtractorUi;

/// Line-oriented front-end writing to any `Write` sink (stdout in the app).
pub struct TerminalUi<W: Write> {
    out: W,
    partitions_shown: bool,
}

impl<W: Write> TerminalUi<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            partitions_shown: false,
        }
    }

    pub fn show_partitions(&mut self, view: &AppViewModel) {
        self.write_block(&render_partitions(view));
        self.partitions_shown = true;
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_block(&mut self, lines: &[String]) {
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{line}"))
            .and_then(|()| writeln!(self.out))
            .and_then(|()| self.out.flush());
        if let Err(err) = result {
            fce_warn!("Failed to write to terminal: {}", err);
        }
    }
}

impl<W: Write> ExtractorUi for TerminalUi<W> {
    fn render(&mut self, view: &AppViewModel) {
        if !self.partitions_shown {
            self.show_partitions(view);
        }
        self.write_block(&render(view));
    }

    fn notice(&mut self, lines: &[String]) {
        self.write_block(lines);
    }
}
