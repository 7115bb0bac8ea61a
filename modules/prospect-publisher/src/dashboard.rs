//! Derived dashboard worksheet of destination-evaluated aggregates.
//!
//! The formulas are opaque strings handed to the spreadsheet backend;
//! nothing here computes them locally. The whole sheet is best-effort:
//! a failure is the caller's warning, never a publish failure.

use anyhow::Result;
use serde_json::{json, Value};
use tracing::info;

use prospect_common::store::CsvTable;
use sheets_client::{GridRange, SheetsClient, SpreadsheetRef};

use crate::layout::{column_letter, FIRST_DATA_ROW};

pub const DASHBOARD_WORKSHEET: &str = "Dashboard";
const DASHBOARD_ROWS: u32 = 30;
const DASHBOARD_COLS: u32 = 10;
const DASHBOARD_TITLE: &str = "UAE Investor Research Dashboard";

/// Regenerate the dashboard worksheet from scratch.
pub async fn update_dashboard(
    sheets: &SheetsClient,
    spreadsheet: &SpreadsheetRef,
    data_worksheet: &str,
    table: &CsvTable,
) -> Result<()> {
    let existing = sheets
        .worksheets(&spreadsheet.id)
        .await?
        .into_iter()
        .find(|props| props.title == DASHBOARD_WORKSHEET);
    let sheet_id = match existing {
        Some(props) => props.sheet_id,
        None => {
            sheets
                .add_worksheet(&spreadsheet.id, DASHBOARD_WORKSHEET, DASHBOARD_ROWS, DASHBOARD_COLS)
                .await?
        }
    };

    sheets.clear_values(&spreadsheet.id, DASHBOARD_WORKSHEET).await?;

    let rows = dashboard_rows(data_worksheet, table);
    sheets
        .update_values(&spreadsheet.id, DASHBOARD_WORKSHEET, &rows)
        .await?;

    sheets
        .format_range(
            &spreadsheet.id,
            GridRange::cells(sheet_id, 0, 1, 0, 4),
            title_format(),
        )
        .await?;

    info!("Dashboard updated");
    Ok(())
}

/// Build the dashboard payload. Metric rows whose source column is missing
/// from the table are omitted rather than pointing formulas at nothing.
pub fn dashboard_rows(data_worksheet: &str, table: &CsvTable) -> Vec<Vec<String>> {
    let sheet_ref = format!("'{}'", data_worksheet.replace('\'', "''"));
    let letter_of = |field: &str| table.column(field).map(column_letter);

    let mut rows = vec![
        vec![DASHBOARD_TITLE.to_string()],
        Vec::new(),
        vec!["Metric".to_string(), "Value".to_string()],
        vec![
            "Total Investors".to_string(),
            format!("=COUNTA({sheet_ref}!A{FIRST_DATA_ROW}:A)"),
        ],
    ];

    if let Some(col) = letter_of("linkedin_url") {
        rows.push(vec![
            "With LinkedIn".to_string(),
            format!("=COUNTIF({sheet_ref}!{col}:{col},\"http*\")"),
        ]);
    }
    if let Some(col) = letter_of("email") {
        rows.push(vec![
            "With Email".to_string(),
            format!("=COUNTIF({sheet_ref}!{col}:{col},\"*@*\")"),
        ]);
    }
    if let Some(col) = letter_of("outreach_status") {
        rows.push(vec![
            "Contacted".to_string(),
            format!("=COUNTIF({sheet_ref}!{col}:{col},\"*sent\")"),
        ]);
        rows.push(vec![
            "Meetings Scheduled".to_string(),
            format!("=COUNTIF({sheet_ref}!{col}:{col},\"*scheduled\")"),
        ]);
    }

    rows.push(Vec::new());
    rows.push(vec!["Top Locations".to_string()]);
    rows.push(vec!["Location".to_string(), "Count".to_string()]);
    rows
}

fn title_format() -> Value {
    json!({
        "backgroundColor": { "red": 0.4, "green": 0.5, "blue": 0.9 },
        "textFormat": {
            "bold": true,
            "fontSize": 14,
            "foregroundColor": { "red": 1.0, "green": 1.0, "blue": 1.0 }
        },
        "horizontalAlignment": "CENTER"
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investor_table() -> CsvTable {
        CsvTable {
            headers: vec![
                "full_name".into(),
                "title".into(),
                "company".into(),
                "location".into(),
                "linkedin_url".into(),
                "email".into(),
                "investment_focus".into(),
                "portfolio_companies".into(),
                "personalized_message".into(),
                "outreach_status".into(),
                "date_added".into(),
                "source_url".into(),
            ],
            rows: vec![],
        }
    }

    #[test]
    fn formulas_reference_columns_by_derived_letter() {
        let rows = dashboard_rows("Investors", &investor_table());
        let formula_for = |label: &str| {
            rows.iter()
                .find(|r| r.first().map(String::as_str) == Some(label))
                .map(|r| r[1].clone())
                .unwrap()
        };
        assert_eq!(formula_for("Total Investors"), "=COUNTA('Investors'!A4:A)");
        assert_eq!(formula_for("With LinkedIn"), "=COUNTIF('Investors'!E:E,\"http*\")");
        assert_eq!(formula_for("With Email"), "=COUNTIF('Investors'!F:F,\"*@*\")");
        assert_eq!(formula_for("Contacted"), "=COUNTIF('Investors'!J:J,\"*sent\")");
        assert_eq!(
            formula_for("Meetings Scheduled"),
            "=COUNTIF('Investors'!J:J,\"*scheduled\")"
        );
    }

    #[test]
    fn missing_columns_omit_their_metric_rows() {
        let table = CsvTable {
            headers: vec!["full_name".into()],
            rows: vec![],
        };
        let rows = dashboard_rows("Investors", &table);
        assert!(rows.iter().all(|r| r.first().map(String::as_str) != Some("With LinkedIn")));
        assert!(rows.iter().all(|r| r.first().map(String::as_str) != Some("Contacted")));
        // The static sections are always present.
        assert_eq!(rows[0][0], DASHBOARD_TITLE);
        assert!(rows.iter().any(|r| r.first().map(String::as_str) == Some("Top Locations")));
    }

    #[test]
    fn worksheet_names_with_quotes_are_escaped() {
        let rows = dashboard_rows("Jane's Data", &investor_table());
        assert!(rows[3][1].starts_with("=COUNTA('Jane''s Data'!A4:A)"));
    }
}
