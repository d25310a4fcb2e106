//! Console styling and plain-text tables.

use console::{Alignment, Style, measure_text_width, pad_str};

/// Colour policy for console output, passed to every renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormatter {
    /// `None` follows terminal detection
    force: Option<bool>,
}

impl ConsoleFormatter {
    pub fn new(no_color: bool) -> Self {
        Self {
            force: no_color.then_some(false),
        }
    }

    pub fn plain() -> Self {
        Self { force: Some(false) }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        let style = match self.force {
            Some(force) => style.force_styling(force),
            None => style,
        };
        style.apply_to(text).to_string()
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(Style::new().cyan(), text)
    }

    pub fn title(&self, text: &str) -> String {
        self.paint(Style::new().green().bold(), text)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(Style::new().green(), text)
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(Style::new().yellow(), text)
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(Style::new().red(), text)
    }
}

/// Render rows as a "simple" table: headers, a dash rule per column, and
/// columns separated by two spaces
pub fn simple_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(measure_text_width(cell));
            }
        }
    }

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(pad_row(headers.iter().copied(), &widths));
    out.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        out.push(pad_row(row.iter().map(String::as_str), &widths));
    }
    out.join("\n")
}

fn pad_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| pad_str(cell, width, Alignment::Left, None).into_owned())
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
