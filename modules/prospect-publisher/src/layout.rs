//! Worksheet layout: the full-replace payload is a pure function of the
//! table and a timestamp, so repeated publishes of the same record set
//! converge to the same visible state.

use prospect_common::store::CsvTable;

/// One-based sheet rows. The header sits below the metadata row and a blank
/// separator; data starts right under the header.
pub const HEADER_ROW: u32 = 3;
pub const FIRST_DATA_ROW: u32 = 4;
/// The dropdown validation covers a generous fixed range so rows added by
/// hand later still get the constraint.
pub const VALIDATION_LAST_ROW: u32 = 1000;

/// Build the complete write payload: metadata row, blank separator, header
/// row, then one row per record in store order.
pub fn build_rows(table: &CsvTable, timestamp: &str, status_note: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(table.len() + 3);
    rows.push(vec![
        format!("Last Updated: {timestamp}"),
        format!("Total Investors: {}", table.len()),
        status_note.to_string(),
    ]);
    rows.push(Vec::new());
    rows.push(table.headers.clone());
    rows.extend(table.rows.iter().cloned());
    rows
}

/// Spreadsheet column letter for a zero-based index (A, B, … Z, AA, …).
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}
