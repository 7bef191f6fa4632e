//! # ASCII Table Formatter
//!
//! Renders query results as MySQL-style ASCII tables:
//!
//! ```text
//! +----+--------+-------+
//! | id | name   | price |
//! +----+--------+-------+
//! | 1  | widget | 9.99  |
//! +----+--------+-------+
//! ```
//!
//! Column widths are the maximum of the header length and the longest
//! value, clamped to a maximum width with `...` truncation. The engine
//! already formatted every cell as text, so this module never sees typed
//! values.

use std::fmt::Write;

use crate::database::QueryResult;

const MAX_COLUMN_WIDTH: usize = 50;

pub struct TableFormatter {
    headers: Vec<String>,
    widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl TableFormatter {
    pub fn new(result: &QueryResult) -> Self {
        let mut widths: Vec<usize> = result.columns.iter().map(|h| h.len().max(1)).collect();

        for row in &result.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.len()).min(MAX_COLUMN_WIDTH);
                }
            }
        }

        Self {
            headers: result.columns.clone(),
            widths,
            rows: result.rows.clone(),
        }
    }

    pub fn render(&self) -> String {
        let mut output = String::new();

        self.write_separator(&mut output);
        self.write_row(&mut output, &self.headers);
        self.write_separator(&mut output);

        for row in &self.rows {
            self.write_row(&mut output, row);
        }

        self.write_separator(&mut output);
        output
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn write_separator(&self, output: &mut String) {
        output.push('+');
        for width in &self.widths {
            for _ in 0..(*width + 2) {
                output.push('-');
            }
            output.push('+');
        }
        output.push('\n');
    }

    fn write_row(&self, output: &mut String, cells: &[String]) {
        output.push('|');
        for (i, cell) in cells.iter().enumerate() {
            let width = self.widths.get(i).copied().unwrap_or(1);
            let _ = write!(output, " {:<width$} |", truncate(cell, width), width = width);
        }
        output.push('\n');
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let mut result: String = s.chars().take(max_len - 3).collect();
        result.push_str("...");
        result
    }
}
