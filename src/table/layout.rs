// src/table/layout.rs

//! Column layout inference from a header line.

use regex::Regex;
use tracing::debug;

use crate::errors::{DockwrapError, Result};

/// One column of a [`FieldLayout`].
///
/// Offsets and widths are counted in characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Where the label starts in the header.
    pub start: usize,
    /// Label plus its trailing padding, as seen in the header.
    pub width: usize,
}

/// Column boundaries inferred once from a header line and reused for every
/// data row of the same table.
///
/// Columns are stored in the order they were requested and their start
/// offsets are strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    columns: Vec<Column>,
}

impl FieldLayout {
    /// Locate each of `expected` in `header`, in order.
    ///
    /// Each label is matched together with the spaces that pad it. Searching
    /// resumes after the previous match, so a label can never be found to the
    /// left of the column before it. Any label that cannot be found fails the
    /// whole layout with [`DockwrapError::HeaderMismatch`].
    pub fn from_header<S: AsRef<str>>(header: &str, expected: &[S]) -> Result<Self> {
        let mut columns = Vec::with_capacity(expected.len());
        let mut search_from = 0usize;

        for name in expected {
            let name = name.as_ref();
            let mismatch = || DockwrapError::HeaderMismatch {
                missing: name.to_string(),
                header: header.to_string(),
            };

            if name.is_empty() {
                return Err(mismatch());
            }

            let pattern = Regex::new(&format!("({}) *", regex::escape(name)))
                .map_err(|e| DockwrapError::Other(e.into()))?;
            let m = pattern.find_at(header, search_from).ok_or_else(mismatch)?;

            let start = header[..m.start()].chars().count();
            let width = m.as_str().chars().count();
            debug!(column = %name, start, width, "located column");

            columns.push(Column {
                name: name.to_string(),
                start,
                width,
            });
            search_from = m.end();
        }

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Index of the column called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}
