// src/table/row.rs

//! Slicing data rows with a [`FieldLayout`].

use crate::errors::{DockwrapError, Result};
use crate::table::layout::FieldLayout;

/// Separator for the multi-valued last column.
pub const LIST_SEPARATOR: char = ',';

/// One parsed data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
    last_values: Vec<String>,
}

impl Record {
    /// Trimmed value of the column called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Trimmed values in layout order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// The last column split on [`LIST_SEPARATOR`].
    pub fn last_values(&self) -> &[String] {
        &self.last_values
    }
}

/// Slice `line` into a [`Record`].
///
/// - Every column but the last is cut at `[start, start + width)`, clamped to
///   the end of the line.
/// - The last column runs to the end of the line, however wide it is.
/// - Values are trimmed; the last value is also split on `,`.
/// - A line that ends before a column starts is [`DockwrapError::RowTooShort`].
pub fn parse_row(line: &str, layout: &FieldLayout) -> Result<Record> {
    // Byte index of every char boundary, plus the end of the line.
    let bounds: Vec<usize> = line
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()))
        .collect();
    let char_len = bounds.len() - 1;

    let columns = layout.columns();
    let mut fields = Vec::with_capacity(columns.len());

    for (idx, column) in columns.iter().enumerate() {
        if column.start > char_len {
            return Err(DockwrapError::RowTooShort {
                column: column.name.clone(),
                offset: column.start,
                len: char_len,
                row: line.to_string(),
            });
        }

        let is_last = idx + 1 == columns.len();
        let end = if is_last {
            char_len
        } else {
            (column.start + column.width).min(char_len)
        };

        let value = line[bounds[column.start]..bounds[end]].trim().to_string();
        fields.push((column.name.clone(), value));
    }

    let last_values = fields
        .last()
        .map(|(_, v)| {
            v.split(LIST_SEPARATOR)
                .map(|s| s.trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    Ok(Record {
        fields,
        last_values,
    })
}

/// Parse a whole table: the first non-blank line is the header, every other
/// non-blank line is a data row.
///
/// A table with a header and no rows yields an empty vector.
pub fn parse_table<S: AsRef<str>>(text: &str, expected: &[S]) -> Result<Vec<Record>> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header = lines.next().unwrap_or("");
    let layout = FieldLayout::from_header(header, expected)?;

    lines.map(|line| parse_row(line, &layout)).collect()
}
