//! Full-replace sync of the record store into the destination spreadsheet.

use anyhow::{bail, Result};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use prospect_common::store::CsvTable;
use prospect_common::OutreachStatus;
use sheets_client::{GridRange, SheetsClient, SpreadsheetRef};

use crate::layout::{build_rows, FIRST_DATA_ROW, HEADER_ROW, VALIDATION_LAST_ROW};

const STATUS_NOTE: &str = "Status: Auto-updated by prospect-publisher";

/// New worksheets are created with room to grow.
const NEW_SHEET_ROWS: u32 = 1000;
const NEW_SHEET_COLS: u32 = 20;

pub struct SheetPublisher<'a> {
    sheets: &'a SheetsClient,
    spreadsheet_name: String,
    worksheet_name: String,
}

impl<'a> SheetPublisher<'a> {
    pub fn new(sheets: &'a SheetsClient, spreadsheet_name: &str, worksheet_name: &str) -> Self {
        Self {
            sheets,
            spreadsheet_name: spreadsheet_name.to_string(),
            worksheet_name: worksheet_name.to_string(),
        }
    }

    /// Run the publish state machine: resolve-or-create spreadsheet and
    /// worksheet, clear, write all blocks in one batched update, then apply
    /// the presentation directives. Any failure here is a publish failure.
    pub async fn publish(&self, table: &CsvTable) -> Result<SpreadsheetRef> {
        if table.is_empty() {
            bail!("no records to publish");
        }

        let spreadsheet = match self.sheets.find_spreadsheet(&self.spreadsheet_name).await? {
            Some(found) => {
                info!(spreadsheet = self.spreadsheet_name.as_str(), "Found spreadsheet");
                found
            }
            None => {
                info!(
                    spreadsheet = self.spreadsheet_name.as_str(),
                    "Creating new spreadsheet"
                );
                self.sheets.create_spreadsheet(&self.spreadsheet_name).await?
            }
        };

        let sheet_id = self
            .resolve_worksheet(&spreadsheet.id, &self.worksheet_name, NEW_SHEET_ROWS, NEW_SHEET_COLS)
            .await?;

        self.sheets
            .clear_values(&spreadsheet.id, &self.worksheet_name)
            .await?;

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
        let rows = build_rows(table, &timestamp, STATUS_NOTE);
        self.sheets
            .update_values(&spreadsheet.id, &self.worksheet_name, &rows)
            .await?;

        self.apply_presentation(&spreadsheet.id, sheet_id, table).await?;

        info!(
            count = table.len(),
            url = spreadsheet.url.as_str(),
            "Updated spreadsheet"
        );
        Ok(spreadsheet)
    }

    /// Resolve a worksheet id by title, creating the worksheet when absent.
    async fn resolve_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
        rows: u32,
        columns: u32,
    ) -> Result<i64> {
        let existing = self
            .sheets
            .worksheets(spreadsheet_id)
            .await?
            .into_iter()
            .find(|props| props.title == title);
        match existing {
            Some(props) => Ok(props.sheet_id),
            None => {
                info!(worksheet = title, "Creating worksheet");
                Ok(self.sheets.add_worksheet(spreadsheet_id, title, rows, columns).await?)
            }
        }
    }

    async fn apply_presentation(
        &self,
        spreadsheet_id: &str,
        sheet_id: i64,
        table: &CsvTable,
    ) -> Result<()> {
        let columns = table.headers.len() as u32;

        self.sheets
            .format_range(
                spreadsheet_id,
                GridRange::cells(sheet_id, HEADER_ROW - 1, HEADER_ROW, 0, columns),
                header_format(),
            )
            .await?;

        self.sheets
            .format_range(
                spreadsheet_id,
                GridRange::cells(sheet_id, 0, 1, 0, 3),
                metadata_format(),
            )
            .await?;

        self.sheets
            .auto_resize_columns(spreadsheet_id, sheet_id, 0, columns)
            .await?;

        if let Some(status_col) = table.column("outreach_status") {
            let allowed: Vec<String> =
                OutreachStatus::ALL.iter().map(ToString::to_string).collect();
            self.sheets
                .set_dropdown_validation(
                    spreadsheet_id,
                    GridRange::cells(
                        sheet_id,
                        FIRST_DATA_ROW - 1,
                        VALIDATION_LAST_ROW,
                        status_col as u32,
                        status_col as u32 + 1,
                    ),
                    &allowed,
                )
                .await?;
        }

        self.sheets.freeze_rows(spreadsheet_id, sheet_id, HEADER_ROW).await?;
        Ok(())
    }
}

fn header_format() -> Value {
    json!({
        "backgroundColor": { "red": 0.4, "green": 0.5, "blue": 0.9 },
        "textFormat": {
            "bold": true,
            "foregroundColor": { "red": 1.0, "green": 1.0, "blue": 1.0 }
        },
        "horizontalAlignment": "CENTER"
    })
}

fn metadata_format() -> Value {
    json!({
        "backgroundColor": { "red": 0.95, "green": 0.95, "blue": 0.95 },
        "textFormat": { "italic": true }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_format_is_bold_white_on_blue() {
        let format = header_format();
        assert_eq!(format["textFormat"]["bold"], true);
        assert_eq!(format["backgroundColor"]["blue"], 0.9);
        assert_eq!(format["horizontalAlignment"], "CENTER");
    }

    #[test]
    fn metadata_format_is_italic_on_gray() {
        let format = metadata_format();
        assert_eq!(format["textFormat"]["italic"], true);
        assert_eq!(format["backgroundColor"]["red"], 0.95);
    }
}
