//! Owner-use classification of raw spreadsheet rows.

use super::fields::{self, RawRow, cell, raw_text};

/// Marker the booking label carries for owner stays, in any casing.
const OWNER_LABEL_MARKER: &str = "huiseigenaar";

/// Whether a row is the owner blocking dates for personal use rather than
/// a paying reservation.
///
/// Two independent signals, either one suffices: the income cell holds a
/// "no charge" placeholder (empty, `-` or `—`), or the booking label names
/// the home owner.
pub fn is_owner_use(row: &RawRow) -> bool {
    let income = raw_text(cell(row, fields::INCOME));
    let income = income.trim();
    if income.is_empty() || income == "-" || income == "—" {
        return true;
    }

    raw_text(cell(row, fields::BOOKING_LABEL))
        .to_lowercase()
        .contains(OWNER_LABEL_MARKER)
}
