#![allow(dead_code)]

use dockwrap::docker::PS_COLUMNS;

/// Builder for `ps`-style tables.
///
/// Each column is padded to the widest of its label and its values plus
/// `gap` spaces, the way the real tool aligns its output. The last column is
/// never padded.
pub struct PsTableBuilder {
    rows: Vec<[String; 7]>,
    gap: usize,
}

impl PsTableBuilder {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            gap: 3,
        }
    }

    pub fn gap(mut self, gap: usize) -> Self {
        self.gap = gap.max(1);
        self
    }

    pub fn row(
        mut self,
        id: &str,
        image: &str,
        command: &str,
        created: &str,
        status: &str,
        ports: &str,
        names: &str,
    ) -> Self {
        self.rows.push([
            id.to_string(),
            image.to_string(),
            command.to_string(),
            created.to_string(),
            status.to_string(),
            ports.to_string(),
            names.to_string(),
        ]);
        self
    }

    pub fn build(self) -> String {
        let mut widths: Vec<usize> = PS_COLUMNS.iter().map(|c| c.len()).collect();
        for row in &self.rows {
            for (i, value) in row.iter().enumerate() {
                widths[i] = widths[i].max(value.chars().count());
            }
        }

        let mut out = render_line(&PS_COLUMNS, &widths, self.gap);
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            out.push_str(&render_line(&cells, &widths, self.gap));
            out.push('\n');
        }
        out
    }
}

fn render_line(cells: &[&str], widths: &[usize], gap: usize) -> String {
    let mut line = String::new();
    let last = cells.len().saturating_sub(1);
    for (i, cell) in cells.iter().enumerate() {
        line.push_str(cell);
        if i < last {
            let pad = widths[i] - cell.chars().count() + gap;
            line.push_str(&" ".repeat(pad));
        }
    }
    line
}

impl Default for PsTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
