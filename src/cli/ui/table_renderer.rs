use crate::cli::output::current_preferences;

/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

/// Header and width constraints for one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            header: header.into(),
            min_width: 0,
            max_width: None,
            alignment,
        }
    }

    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = width;
        self
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Column metadata plus string rows, rendered as plain text.
#[derive(Clone, Debug)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub show_headers: bool,
    pub padding: usize,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            show_headers: true,
            padding: 1,
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Content width per column: the widest cell or header, clamped to the
    /// column's limits.
    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let widest_cell = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| visible_width(cell))
                    .max()
                    .unwrap_or(0);
                let width = visible_width(&column.header)
                    .max(column.min_width)
                    .max(widest_cell);
                column.max_width.map_or(width, |max| width.min(max))
            })
            .collect()
    }

    pub fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, *width, column.alignment, self.padding)
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    }

    /// Header, rule, then one line per row. No trailing newline.
    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        if self.show_headers {
            let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
            lines.push(self.render_row(&header, &widths));
            lines.push(horizontal_rule(&widths, self.padding));
        }
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));

        lines.join("\n")
    }
}

/// Length of the ANSI CSI sequence starting at `start`, or zero.
fn escape_len(bytes: &[u8], start: usize) -> usize {
    if bytes.get(start) != Some(&0x1b) || bytes.get(start + 1) != Some(&b'[') {
        return 0;
    }
    let mut idx = start + 2;
    while idx < bytes.len() {
        let byte = bytes[idx];
        idx += 1;
        if (0x40..=0x7E).contains(&byte) {
            break;
        }
    }
    idx - start
}

/// Number of printable characters, ignoring ANSI colour sequences.
pub fn visible_width(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut idx = 0;
    let mut width = 0;
    while idx < bytes.len() {
        let skip = escape_len(bytes, idx);
        if skip > 0 {
            idx += skip;
            continue;
        }
        match text[idx..].chars().next() {
            Some(ch) => {
                width += 1;
                idx += ch.len_utf8();
            }
            None => break,
        }
    }
    width
}

/// Cuts text down to `width` visible characters, ending in an ellipsis.
/// Styled input gets a reset appended so colour never bleeds.
fn truncate_text(text: &str, width: usize) -> String {
    if visible_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let keep = width - 1;
    let bytes = text.as_bytes();
    let mut idx = 0;
    let mut visible = 0;
    let mut styled = false;
    let mut result = String::new();

    while idx < bytes.len() && visible < keep {
        let skip = escape_len(bytes, idx);
        if skip > 0 {
            result.push_str(&text[idx..idx + skip]);
            idx += skip;
            styled = true;
            continue;
        }
        match text[idx..].chars().next() {
            Some(ch) => {
                result.push(ch);
                visible += 1;
                idx += ch.len_utf8();
            }
            None => break,
        }
    }

    result.push('…');
    if styled {
        result.push_str("\u{1b}[0m");
    }
    result
}

pub fn render_cell(text: &str, width: usize, alignment: Alignment, padding: usize) -> String {
    let fitted = truncate_text(text, width);
    let remaining = width.saturating_sub(visible_width(&fitted));
    let (left, right) = match alignment {
        Alignment::Left => (0, remaining),
        Alignment::Right => (remaining, 0),
        Alignment::Center => (remaining / 2, remaining - remaining / 2),
    };
    format!(
        "{}{}{}",
        " ".repeat(padding + left),
        fitted,
        " ".repeat(right + padding)
    )
}

/// Rule spanning every padded column and the single-space gaps between them.
pub fn horizontal_rule(widths: &[usize], padding: usize) -> String {
    if widths.is_empty() {
        return String::new();
    }
    let total: usize = widths.iter().map(|w| w + padding * 2).sum::<usize>() + widths.len() - 1;
    let ch = if current_preferences().plain_mode {
        '-'
    } else {
        '─'
    };
    ch.to_string().repeat(total)
}
