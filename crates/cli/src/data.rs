//! Grid data loading and column typing.
//!
//! Loads a CSV into row-major string cells, derives per-column field names,
//! and infers each column's `FieldKind` from the data so the demo registers
//! cells the way a real dashboard schema would.

use std::collections::HashSet;
use std::path::Path;

use unicode_width::UnicodeWidthStr;

use editgrid_core::cell_id::col_to_letters;
use editgrid_core::FieldKind;

const MIN_COL_WIDTH: usize = 3;
const MAX_COL_WIDTH: usize = 24;

pub struct GridData {
    /// Per-column field names: header values (--headers) or generated a, b, c...
    pub fields: Vec<String>,
    /// Per-column value kinds inferred from the data.
    pub kinds: Vec<FieldKind>,
    /// Row-major cell data.
    pub rows: Vec<Vec<String>>,
    /// Pre-computed display column widths.
    pub col_widths: Vec<usize>,
}

impl GridData {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn set(&mut self, row: usize, col: usize, value: String) {
        if let Some(r) = self.rows.get_mut(row) {
            if let Some(cell) = r.get_mut(col) {
                *cell = value;
            }
        }
    }

    /// Load a CSV file. With `headers`, the first row names the fields;
    /// otherwise field names are generated from column letters.
    pub fn load_csv(path: &Path, headers: bool) -> Result<Self, String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| format!("failed to open {}: {}", path.display(), e))?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| format!("csv parse error: {}", e))?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        let num_cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(num_cols, String::new());
        }

        let fields: Vec<String> = if headers && !rows.is_empty() {
            let header = rows.remove(0);
            header
                .into_iter()
                .enumerate()
                .map(|(c, name)| {
                    let name = name.trim().to_lowercase().replace(' ', "_");
                    if name.is_empty() { generated_field(c) } else { name }
                })
                .collect()
        } else {
            (0..num_cols).map(generated_field).collect()
        };

        let kinds = (0..num_cols)
            .map(|c| infer_kind(rows.iter().map(|r| r[c].as_str())))
            .collect();
        let col_widths = compute_widths(&fields, &rows, num_cols);

        Ok(Self { fields, kinds, rows, col_widths })
    }

    /// Built-in sample used when `egrid demo` is run without a file.
    pub fn sample() -> Self {
        let fields = ["name", "email", "quantity", "status", "active"];
        let rows = vec![
            ["Ada Lovelace", "ada@example.com", "12", "shipped", "true"],
            ["Grace Hopper", "grace@example.com", "3", "pending", "true"],
            ["Alan Turing", "alan@example.com", "42", "pending", "false"],
            ["Edsger Dijkstra", "edsger@example.com", "7", "shipped", "true"],
            ["Barbara Liskov", "barbara@example.com", "19", "cancelled", "false"],
            ["Donald Knuth", "don@example.com", "1", "shipped", "true"],
        ];
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect();
        let fields: Vec<String> = fields.iter().map(|s| s.to_string()).collect();
        let kinds = (0..fields.len())
            .map(|c| infer_kind(rows.iter().map(|r| r[c].as_str())))
            .collect();
        let col_widths = compute_widths(&fields, &rows, fields.len());
        Self { fields, kinds, rows, col_widths }
    }
}

fn generated_field(col: usize) -> String {
    col_to_letters(col).to_lowercase()
}

/// Infer a column kind from its values. Booleans before numbers: "1"/"0"
/// columns are ambiguous and number wins only when a non-boolean numeral
/// appears.
fn infer_kind<'a>(values: impl Iterator<Item = &'a str>) -> FieldKind {
    let mut non_empty = 0usize;
    let mut all_bool = true;
    let mut all_number = true;
    let mut distinct: HashSet<String> = HashSet::new();
    let mut total = 0usize;

    for raw in values {
        total += 1;
        let v = raw.trim();
        if v.is_empty() {
            continue;
        }
        non_empty += 1;
        if !matches!(v.to_ascii_lowercase().as_str(), "true" | "false") {
            all_bool = false;
        }
        if v.parse::<f64>().is_err() {
            all_number = false;
        }
        if distinct.len() <= 8 {
            distinct.insert(v.to_ascii_lowercase());
        }
    }

    if non_empty == 0 {
        return FieldKind::Text;
    }
    if all_bool {
        return FieldKind::Boolean;
    }
    if all_number {
        return FieldKind::Number;
    }
    // A small closed set of repeated labels reads as an enum column.
    if total >= 6 && distinct.len() <= 4 && distinct.len() * 2 <= non_empty {
        return FieldKind::Select;
    }
    FieldKind::Text
}

// Widths are display columns, not bytes: the renderer pads by display
// width, so wide and multi-byte characters must measure the same here.
fn compute_widths(fields: &[String], rows: &[Vec<String>], num_cols: usize) -> Vec<usize> {
    (0..num_cols)
        .map(|c| {
            let mut w = fields.get(c).map(|f| f.width()).unwrap_or(0);
            for row in rows {
                if let Some(v) = row.get(c) {
                    w = w.max(v.width());
                }
            }
            w.clamp(MIN_COL_WIDTH, MAX_COL_WIDTH)
        })
        .collect()
}
