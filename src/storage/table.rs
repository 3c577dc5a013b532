//! Ledger table encoding
//!
//! The ledger is stored as a `;`-separated table with a header row and a
//! leading row-index column:
//!
//! ```text
//! index;Ordem;Descrição;Valor;Categoria;Data;Fixo;Credito
//! 0;DESPESA;Mercado;300.00;Alimentação;2024-01-10;0;0
//! 1;RECEITA;Salário;1000.00;Salário;2024-01-05;1;0
//! ```
//!
//! The reader is lenient about the header (the index column may be unnamed or
//! missing entirely), date formats and boolean spellings. Any row it cannot
//! interpret fails the whole read with `CorruptRecord`.

use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use super::dates::{format_stored_date, normalize_date};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Kind, Ledger, Money, Transaction};

/// Field delimiter of the ledger table
pub const DELIMITER: u8 = b';';

/// Header row, in the order columns are written
pub const HEADER: [&str; 8] = [
    "index",
    "Ordem",
    "Descrição",
    "Valor",
    "Categoria",
    "Data",
    "Fixo",
    "Credito",
];

/// Number of data columns after the index column
const DATA_COLUMNS: usize = HEADER.len() - 1;

/// Read a ledger table
pub fn read_ledger<R: Read>(reader: R) -> LedgerResult<Ledger> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = rdr.headers().map_err(|e| read_error(0, e))?.clone();
    if header.is_empty() || (header.len() == 1 && header[0].trim().is_empty()) {
        return Ok(Ledger::new());
    }

    // Files written without the index column carry only the data columns
    let offset = match header.len() {
        n if n == HEADER.len() => 1,
        n if n == DATA_COLUMNS => 0,
        n => {
            return Err(LedgerError::corrupt(
                0,
                format!("expected {} columns in header, found {}", HEADER.len(), n),
            ))
        }
    };

    // Columns are decoded by position, so their names must line up
    for (name, expected) in header.iter().skip(offset).zip(&HEADER[1..]) {
        if name.trim().to_lowercase() != expected.to_lowercase() {
            return Err(LedgerError::corrupt(
                0,
                format!("expected column '{}' in header, found '{}'", expected, name.trim()),
            ));
        }
    }

    let mut transactions = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|e| read_error(row, e))?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if record.len() != header.len() {
            return Err(LedgerError::corrupt(
                row,
                format!("expected {} columns, found {}", header.len(), record.len()),
            ));
        }
        transactions.push(decode_row(row, &record, offset)?);
    }

    Ok(Ledger::from_transactions(transactions))
}

/// Write the full ledger table, regenerating the index column
pub fn write_ledger<W: Write>(writer: W, ledger: &Ledger) -> LedgerResult<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(writer);

    wtr.write_record(HEADER)?;

    for (index, txn) in ledger.iter().enumerate() {
        wtr.write_record([
            index.to_string(),
            txn.kind.stored_label().to_string(),
            txn.description.clone(),
            txn.amount.to_string(),
            txn.category.stored_label().to_string(),
            format_stored_date(txn.date),
            flag(txn.recurring).to_string(),
            flag(txn.credit).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn decode_row(row: usize, record: &StringRecord, offset: usize) -> LedgerResult<Transaction> {
    let field = |column: usize| record.get(offset + column).unwrap_or("").trim();

    let kind: Kind = field(0)
        .parse()
        .map_err(|e| LedgerError::corrupt(row, format!("{}", e)))?;

    let description = field(1);

    let amount = Money::parse(field(2)).map_err(|e| LedgerError::corrupt(row, e.to_string()))?;

    let category = Category::parse_for(kind, field(3))
        .map_err(|_| {
            LedgerError::corrupt(
                row,
                format!("category '{}' is not valid for {} entries", field(3), kind),
            )
        })?;

    let date = normalize_date(field(4))
        .ok_or_else(|| LedgerError::corrupt(row, format!("unparseable date '{}'", field(4))))?;

    let recurring = parse_flag(field(5))
        .ok_or_else(|| LedgerError::corrupt(row, format!("invalid recurring flag '{}'", field(5))))?;
    let credit = parse_flag(field(6))
        .ok_or_else(|| LedgerError::corrupt(row, format!("invalid credit flag '{}'", field(6))))?;

    let txn = Transaction::new(kind, description, amount, category, date)
        .map_err(|e| LedgerError::corrupt(row, e.to_string()))?;

    Ok(txn.with_recurring(recurring).with_credit(credit))
}

/// I/O failures mean the table could not be read at all; anything else is a bad row
fn read_error(row: usize, err: csv::Error) -> LedgerError {
    if err.is_io_error() {
        LedgerError::StorageUnavailable(format!("Failed to read ledger table: {}", err))
    } else {
        LedgerError::corrupt(row, err.to_string())
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Parse a stored boolean: 0/1, true/false (any case); empty means false
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "" | "0" | "0.0" | "false" => Some(false),
        "1" | "1.0" | "true" => Some(true),
        _ => None,
    }
}
