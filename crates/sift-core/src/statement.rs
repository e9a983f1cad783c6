//! Bank statement parsing
//!
//! Consumes a decoded spreadsheet extract (an ordered list of rows of cells),
//! locates the transaction header row, and produces staged transaction
//! candidates. Bank exports prepend a variable number of title/metadata rows
//! before the real header, so the header search scans from the top looking
//! for a row that carries both a date and a narration column.
//!
//! Document-level problems (no rows, no header, missing columns) are
//! descriptive errors. Individual malformed rows are dropped silently; the
//! human review step that follows surfaces the result count, which is the
//! integrity check for noisy exports.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::io::Read;
use tracing::debug;

use crate::categorize::Categorizer;
use crate::dates::{format_date, parse_date};
use crate::dedupe::import_hash;
use crate::error::{Error, Result};
use crate::models::StagedTransaction;

/// Required header tokens, case-insensitive and whitespace-trimmed
const COL_DATE: &str = "date";
const COL_NARRATION: &str = "narration";
const COL_WITHDRAWAL: &str = "withdrawal amt.";
const COL_DEPOSIT: &str = "deposit amt.";

/// One spreadsheet cell, as handed over by the decoding collaborator.
///
/// Some decoders pre-convert date columns to calendar values; the parser
/// accepts both forms rather than guessing from strings alone.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text content, if any
    fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Decode a CSV statement export into rows of cells.
///
/// Headerless and flexible: bank exports have ragged preamble rows before
/// the real header, so every line is kept as-is for the header search.
pub fn rows_from_csv<R: Read>(reader: R) -> Result<Vec<Vec<Cell>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row: Vec<Cell> = record
            .iter()
            .map(|field| {
                if field.trim().is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    debug!("Decoded {} statement rows", rows.len());
    Ok(rows)
}

/// Column positions resolved from the header row
struct Columns {
    date: usize,
    narration: usize,
    withdrawal: usize,
    deposit: usize,
}

/// Find the header row: the first row from the top containing both a date
/// and a narration column.
fn find_header(rows: &[Vec<Cell>]) -> Option<usize> {
    rows.iter().position(|row| {
        let has_date = row.iter().any(|c| cell_matches(c, COL_DATE));
        let has_narration = row.iter().any(|c| cell_matches(c, COL_NARRATION));
        has_date && has_narration
    })
}

fn cell_matches(cell: &Cell, token: &str) -> bool {
    cell.as_text()
        .map(|s| s.trim().eq_ignore_ascii_case(token))
        .unwrap_or(false)
}

fn resolve_columns(header: &[Cell]) -> Result<Columns> {
    let find = |token: &str| -> Result<usize> {
        header
            .iter()
            .position(|c| cell_matches(c, token))
            .ok_or_else(|| Error::MissingColumn(token.to_string()))
    };

    Ok(Columns {
        date: find(COL_DATE)?,
        narration: find(COL_NARRATION)?,
        withdrawal: find(COL_WITHDRAWAL)?,
        deposit: find(COL_DEPOSIT)?,
    })
}

/// Parse an amount cell, stripping everything except digits, '.' and '-'.
/// Blank or unparseable cells are zero.
fn parse_amount_cell(cell: Option<&Cell>) -> f64 {
    match cell {
        Some(Cell::Number(n)) => *n,
        Some(Cell::Text(s)) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            cleaned.parse().unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Parse a date cell: pre-converted calendar values pass through, text goes
/// through the date normalizer.
fn parse_date_cell(cell: Option<&Cell>) -> Option<NaiveDate> {
    match cell {
        Some(Cell::Date(d)) => Some(*d),
        Some(Cell::Text(s)) => parse_date(s),
        _ => None,
    }
}

/// Parse a decoded statement into staged transaction candidates.
///
/// Fails with a descriptive error when the document has zero rows, when no
/// header row can be found, or when the header lacks a required column.
/// Data rows are processed in order; rows that are blank, footer markers
/// (first cell starting with '*'), undated, unnamed, or without any cash
/// movement are skipped.
pub fn parse_statement(
    rows: &[Vec<Cell>],
    categorizer: &Categorizer,
) -> Result<Vec<StagedTransaction>> {
    if rows.is_empty() {
        return Err(Error::EmptyStatement);
    }

    let header_idx = find_header(rows).ok_or(Error::MissingHeader)?;
    let columns = resolve_columns(&rows[header_idx])?;

    let mut staged = Vec::new();

    for (offset, row) in rows[header_idx + 1..].iter().enumerate() {
        if row.is_empty() || row.iter().all(Cell::is_empty) {
            continue;
        }

        // Statement footer/separator convention
        if let Some(first) = row.first().and_then(Cell::as_text) {
            if first.trim_start().starts_with('*') {
                continue;
            }
        }

        let date = match parse_date_cell(row.get(columns.date)) {
            Some(d) => d,
            None => {
                debug!("Skipping row {}: unparseable date", header_idx + 1 + offset);
                continue;
            }
        };

        let description = match row.get(columns.narration).and_then(Cell::as_text) {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => continue,
        };

        let withdrawal = parse_amount_cell(row.get(columns.withdrawal));
        let deposit = parse_amount_cell(row.get(columns.deposit));

        // Deposit wins; a row with neither records no cash movement
        let amount = if deposit > 0.0 {
            deposit
        } else if withdrawal > 0.0 {
            -withdrawal
        } else {
            continue;
        };

        let category = categorizer.categorize(&description);
        let import_hash = import_hash(&format_date(date), &description, amount);

        staged.push(StagedTransaction {
            date,
            description,
            amount,
            category,
            import_hash,
        });
    }

    debug!("Parsed {} staged transactions", staged.len());
    Ok(staged)
}
