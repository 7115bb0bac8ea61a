pub mod auth;
pub mod error;
mod types;

pub use error::{Result, SheetsError};
pub use types::{GridRange, SheetProperties, SpreadsheetRef};

use serde_json::{json, Value};
use tracing::debug;

use types::{CreatedSpreadsheet, DriveFileList, SpreadsheetMeta, ValueRange};

const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

pub struct SheetsClient {
    http: reqwest::Client,
    access_token: String,
    sheets_url: String,
    drive_url: String,
}

impl SheetsClient {
    /// Authenticate with a service-account credential JSON and return a
    /// ready client holding a bearer token.
    pub async fn connect(credentials_json: &str) -> Result<Self> {
        let http = reqwest::Client::new();
        let access_token = auth::access_token(&http, credentials_json).await?;
        Ok(Self {
            http,
            access_token,
            sheets_url: SHEETS_API_URL.to_string(),
            drive_url: DRIVE_API_URL.to_string(),
        })
    }

    pub fn with_base_urls(mut self, sheets_url: &str, drive_url: &str) -> Self {
        self.sheets_url = sheets_url.trim_end_matches('/').to_string();
        self.drive_url = drive_url.trim_end_matches('/').to_string();
        self
    }

    // =========================================================================
    // Spreadsheet and worksheet resolution
    // =========================================================================

    /// Find a spreadsheet by exact name via the Drive file listing.
    pub async fn find_spreadsheet(&self, name: &str) -> Result<Option<SpreadsheetRef>> {
        let query = format!(
            "name = '{}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false",
            name.replace('\'', "\\'")
        );
        let response = self
            .http
            .get(&self.drive_url)
            .bearer_auth(&self.access_token)
            .query(&[("q", query.as_str()), ("fields", "files(id, name)")])
            .send()
            .await?;
        let listing: DriveFileList = Self::checked_json(response).await?;
        Ok(listing
            .files
            .into_iter()
            .next()
            .map(|file| SpreadsheetRef {
                url: spreadsheet_url(&file.id),
                id: file.id,
            }))
    }

    pub async fn create_spreadsheet(&self, name: &str) -> Result<SpreadsheetRef> {
        let body = json!({ "properties": { "title": name } });
        let response = self
            .http
            .post(&self.sheets_url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        let created: CreatedSpreadsheet = Self::checked_json(response).await?;
        Ok(SpreadsheetRef {
            id: created.spreadsheet_id,
            url: created.spreadsheet_url,
        })
    }

    /// List worksheet properties (id + title) for a spreadsheet.
    pub async fn worksheets(&self, spreadsheet_id: &str) -> Result<Vec<SheetProperties>> {
        let url = format!("{}/{spreadsheet_id}", self.sheets_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("fields", "sheets.properties")])
            .send()
            .await?;
        let meta: SpreadsheetMeta = Self::checked_json(response).await?;
        Ok(meta.sheets.into_iter().map(|s| s.properties).collect())
    }

    /// Create a worksheet and return its sheet id.
    pub async fn add_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
        rows: u32,
        columns: u32,
    ) -> Result<i64> {
        let request = json!({
            "addSheet": {
                "properties": {
                    "title": title,
                    "gridProperties": { "rowCount": rows, "columnCount": columns }
                }
            }
        });
        let reply = self.batch_update(spreadsheet_id, vec![request]).await?;
        reply["replies"][0]["addSheet"]["properties"]["sheetId"]
            .as_i64()
            .ok_or_else(|| SheetsError::Api {
                status: 200,
                message: "addSheet reply missing sheetId".to_string(),
            })
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Clear every value in a worksheet.
    pub async fn clear_values(&self, spreadsheet_id: &str, worksheet: &str) -> Result<()> {
        let url = format!(
            "{}/{spreadsheet_id}/values/{}:clear",
            self.sheets_url,
            quoted_range(worksheet)
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&json!({}))
            .send()
            .await?;
        Self::checked(response).await?;
        Ok(())
    }

    /// Write a block of rows starting at the top-left of the worksheet, with
    /// user-entered semantics (formula strings become live formulas).
    pub async fn update_values(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
        values: &[Vec<String>],
    ) -> Result<()> {
        let range = format!("{}!A1", quoted_range(worksheet));
        let url = format!("{}/{spreadsheet_id}/values/{range}", self.sheets_url);
        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.access_token)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&ValueRange { values })
            .send()
            .await?;
        Self::checked(response).await?;
        debug!(spreadsheet_id, worksheet, rows = values.len(), "Updated values");
        Ok(())
    }

    // =========================================================================
    // Presentation directives
    // =========================================================================

    pub async fn format_range(
        &self,
        spreadsheet_id: &str,
        range: GridRange,
        format: Value,
    ) -> Result<()> {
        self.batch_update(spreadsheet_id, vec![repeat_cell_request(range, format)])
            .await?;
        Ok(())
    }

    pub async fn auto_resize_columns(
        &self,
        spreadsheet_id: &str,
        sheet_id: i64,
        start_column: u32,
        end_column: u32,
    ) -> Result<()> {
        let request = auto_resize_request(sheet_id, start_column, end_column);
        self.batch_update(spreadsheet_id, vec![request]).await?;
        Ok(())
    }

    /// Constrain a range to a dropdown of allowed values.
    pub async fn set_dropdown_validation(
        &self,
        spreadsheet_id: &str,
        range: GridRange,
        allowed: &[String],
    ) -> Result<()> {
        self.batch_update(spreadsheet_id, vec![dropdown_request(range, allowed)])
            .await?;
        Ok(())
    }

    /// Keep the top `rows` rows visible while scrolling.
    pub async fn freeze_rows(&self, spreadsheet_id: &str, sheet_id: i64, rows: u32) -> Result<()> {
        self.batch_update(spreadsheet_id, vec![freeze_rows_request(sheet_id, rows)])
            .await?;
        Ok(())
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    async fn batch_update(&self, spreadsheet_id: &str, requests: Vec<Value>) -> Result<Value> {
        let url = format!("{}/{spreadsheet_id}:batchUpdate", self.sheets_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&json!({ "requests": requests }))
            .send()
            .await?;
        Self::checked_json(response).await
    }

    async fn checked(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn checked_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let response = Self::checked(response).await?;
        Ok(response.json().await?)
    }
}

fn spreadsheet_url(id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{id}")
}

/// Worksheet names with spaces or punctuation must be quoted in A1 ranges.
fn quoted_range(worksheet: &str) -> String {
    format!("'{}'", worksheet.replace('\'', "''"))
}

// --- batchUpdate request builders ---

fn repeat_cell_request(range: GridRange, format: Value) -> Value {
    json!({
        "repeatCell": {
            "range": range,
            "cell": { "userEnteredFormat": format },
            "fields": "userEnteredFormat"
        }
    })
}

fn auto_resize_request(sheet_id: i64, start_column: u32, end_column: u32) -> Value {
    json!({
        "autoResizeDimensions": {
            "dimensions": {
                "sheetId": sheet_id,
                "dimension": "COLUMNS",
                "startIndex": start_column,
                "endIndex": end_column
            }
        }
    })
}

fn dropdown_request(range: GridRange, allowed: &[String]) -> Value {
    let values: Vec<Value> = allowed
        .iter()
        .map(|v| json!({ "userEnteredValue": v }))
        .collect();
    json!({
        "setDataValidation": {
            "range": range,
            "rule": {
                "condition": { "type": "ONE_OF_LIST", "values": values },
                "showCustomUi": true,
                "strict": false
            }
        }
    })
}

fn freeze_rows_request(sheet_id: i64, rows: u32) -> Value {
    json!({
        "updateSheetProperties": {
            "properties": {
                "sheetId": sheet_id,
                "gridProperties": { "frozenRowCount": rows }
            },
            "fields": "gridProperties.frozenRowCount"
        }
    })
}
