//! Raw spreadsheet rows and the header-alias schema.
//!
//! Exports arrive with human-language column headers that drift between
//! spreadsheet versions ("Telefoon" vs "Tel"). Each canonical field owns an
//! ordered alias list; the first present, non-empty cell wins.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::dates::parse_local_date;

/// One untyped row as ingested: header → cell value. Never outlives
/// normalization.
pub type RawRow = BTreeMap<String, Value>;

pub const ARRIVAL: &[&str] = &["Aankomst"];
pub const DEPARTURE: &[&str] = &["Vertrek"];
pub const NIGHTS: &[&str] = &["Nachten"];
pub const INCOME: &[&str] = &["Inkomsten", "Bruto", "Gross"];
pub const BOOKING_LABEL: &[&str] = &["Boeking"];
pub const GUEST: &[&str] = &["Gast", "Naam"];
pub const ADULTS: &[&str] = &["Volw.", "Volwassenen"];
pub const CHILDREN: &[&str] = &["Knd.", "Kinderen"];
pub const INFANTS: &[&str] = &["Bab.", "Baby"];
pub const PHONE: &[&str] = &["Telefoon", "Phone", "Tel"];
pub const EMAIL: &[&str] = &["E-mailadres", "Email", "E-mail", "Mail"];
pub const COUNTRY: &[&str] = &["Land", "Landcode", "Country code", "CC"];

/// First present, non-empty cell among the aliases.
pub fn cell<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|key| {
        row.get(*key).filter(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
    })
}

/// Cell as trimmed text; numbers and booleans are stringified.
pub fn text_cell(cell: &Value) -> Option<String> {
    match cell {
        Value::String(s) => {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// String rendering of a possibly-absent cell, used where the raw text
/// matters (owner-use classification). Absent cells render empty.
pub fn raw_text(cell: Option<&Value>) -> String {
    match cell {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Numeric cell value; strings accept a decimal comma. `None` for empty,
/// placeholder or non-finite content.
pub fn number_cell(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() || t == "-" {
                return None;
            }
            t.replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// Small non-negative count (party sizes), zero when absent or invalid.
pub fn count_cell(cell: Option<&Value>) -> u32 {
    cell.and_then(number_cell)
        .filter(|n| *n >= 0.0)
        .map_or(0, |n| n.trunc() as u32)
}

/// Date cell; only string cells can carry dates in an export.
pub fn date_cell(cell: &Value) -> Option<NaiveDate> {
    match cell {
        Value::String(s) => parse_local_date(s),
        _ => None,
    }
}
