//! Persistence pairs and the delimited text table they arrive in.
//!
//! The table must carry a header row with columns named exactly `birth` and
//! `death`; any other columns are ignored. The delimiter is the first of
//! `,`, `;` or tab found outside quotes in the header. Cells may be
//! double-quoted, and a leading byte-order mark is skipped.
use log::warn;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// A (birth, death) filtration interval as read from the table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PersistencePair {
    pub birth: f64,
    pub death: f64,
}

impl PersistencePair {
    pub fn new(birth: f64, death: f64) -> Self {
        Self { birth, death }
    }

    pub fn persistence(&self) -> f64 {
        self.death - self.birth
    }

    /// Integer endpoints, truncated toward zero; non-finite values map to 0.
    pub fn truncated(&self) -> (i64, i64) {
        (truncate(self.birth), truncate(self.death))
    }
}

#[inline]
fn truncate(v: f64) -> i64 {
    if v.is_finite() {
        v.trunc() as i64
    } else {
        0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PairTableError {
    #[error("pair table is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("pair table has no header row")]
    MissingHeader,
}

/// Ordered list of persistence pairs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PairTable {
    pub pairs: Vec<PersistencePair>,
}

impl PairTable {
    pub fn parse(text: &str) -> Result<Self, PairTableError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());
        let (_, header) = lines.next().ok_or(PairTableError::MissingHeader)?;
        let delim = detect_delimiter(header);
        let columns = split_record(header, delim);
        let find = |name: &'static str| {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or(PairTableError::MissingColumn(name))
        };
        let birth_col = find("birth")?;
        let death_col = find("death")?;

        let pairs = lines
            .map(|(lineno, line)| {
                let cells = split_record(line, delim);
                let birth = parse_cell(&cells, birth_col, lineno, "birth");
                let death = parse_cell(&cells, death_col, lineno, "death");
                PersistencePair::new(birth, death)
            })
            .collect();
        Ok(Self { pairs })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Keep pairs whose persistence is at least `threshold`, in order.
    pub fn filter_min_persistence(mut self, threshold: f64) -> Self {
        self.pairs.retain(|p| p.persistence() >= threshold);
        self
    }
}

impl From<Vec<PersistencePair>> for PairTable {
    fn from(pairs: Vec<PersistencePair>) -> Self {
        Self { pairs }
    }
}

/// Load a pair table from disk.
pub fn load_pair_table(path: &Path) -> Result<PairTable, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read pairs {}: {e}", path.display()))?;
    PairTable::parse(&text).map_err(|e| format!("{}: {e}", path.display()))
}

/// First of `,`, `;` or tab that appears outside double quotes.
fn detect_delimiter(header: &str) -> char {
    let mut quoted = false;
    for c in header.chars() {
        match c {
            '"' => quoted = !quoted,
            ',' | ';' | '\t' if !quoted => return c,
            _ => {}
        }
    }
    ','
}

/// Split one record on `delim`, honouring double-quoted cells.
///
/// Inside quotes the delimiter is literal and `""` stands for one `"`.
/// Cells are trimmed; records never span lines.
fn split_record(line: &str, delim: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if quoted {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    cell.push('"');
                }
                '"' => quoted = false,
                _ => cell.push(c),
            }
        } else if c == '"' && cell.trim().is_empty() {
            cell.clear();
            quoted = true;
        } else if c == delim {
            cells.push(cell.trim().to_string());
            cell.clear();
        } else {
            cell.push(c);
        }
    }
    cells.push(cell.trim().to_string());
    cells
}

fn parse_cell(cells: &[String], col: usize, lineno: usize, name: &str) -> f64 {
    match cells.get(col).map(|c| c.parse::<f64>()) {
        Some(Ok(v)) => v,
        _ => {
            warn!(
                "line {}: unreadable {name} value {:?}, treating as NaN",
                lineno + 1,
                cells.get(col)
            );
            f64::NAN
        }
    }
}
