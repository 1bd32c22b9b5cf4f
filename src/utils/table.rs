//! Table rendering utilities for CLI outputs.
//!
//! Cells may carry ANSI colours; widths are measured on the visible text.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]"));

pub fn strip_ansi(s: &str) -> String {
    match ANSI_RE.as_ref() {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Left,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Right,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    separators: Vec<usize>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separators: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Horizontal rule before the next row.
    pub fn add_separator(&mut self) {
        self.separators.push(self.rows.len());
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| visible_width(c))
                    .chain(std::iter::once(visible_width(&col.header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn render_cell(out: &mut String, text: &str, width: usize, align: Align) {
        let pad = " ".repeat(width.saturating_sub(visible_width(text)));
        match align {
            Align::Left => {
                out.push_str(text);
                out.push_str(&pad);
            }
            Align::Right => {
                out.push_str(&pad);
                out.push_str(text);
            }
        }
        out.push_str("  ");
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let total: usize = widths.iter().map(|w| w + 2).sum();
        let rule = format!("{}\n", "-".repeat(total.saturating_sub(2)));
        let mut out = String::new();

        for (col, w) in self.columns.iter().zip(&widths) {
            Self::render_cell(&mut out, &col.header, *w, col.align);
        }
        out = out.trim_end().to_string();
        out.push('\n');
        out.push_str(&rule);

        for (idx, row) in self.rows.iter().enumerate() {
            if self.separators.contains(&idx) {
                out.push_str(&rule);
            }
            let mut line = String::new();
            for (i, (col, w)) in self.columns.iter().zip(&widths).enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                Self::render_cell(&mut line, cell, *w, col.align);
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }
}
