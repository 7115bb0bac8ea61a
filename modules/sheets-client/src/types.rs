use serde::{Deserialize, Serialize};

/// Handle to a spreadsheet resolved or created by name.
#[derive(Debug, Clone)]
pub struct SpreadsheetRef {
    pub id: String,
    pub url: String,
}

/// Properties of one worksheet within a spreadsheet.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
}

/// Cell range addressed the way the batchUpdate API addresses ranges:
/// sheet id plus zero-based half-open row/column index ranges. A `None`
/// bound means unbounded on that side.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_row_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_row_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column_index: Option<u32>,
}

impl GridRange {
    /// A single full row (all columns).
    pub fn row(sheet_id: i64, row: u32) -> Self {
        Self {
            sheet_id,
            start_row_index: Some(row),
            end_row_index: Some(row + 1),
            start_column_index: None,
            end_column_index: None,
        }
    }

    /// A rectangular cell block.
    pub fn cells(
        sheet_id: i64,
        start_row: u32,
        end_row: u32,
        start_column: u32,
        end_column: u32,
    ) -> Self {
        Self {
            sheet_id,
            start_row_index: Some(start_row),
            end_row_index: Some(end_row),
            start_column_index: Some(start_column),
            end_column_index: Some(end_column),
        }
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
pub(crate) struct ValueRange<'a> {
    pub values: &'a [Vec<String>],
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SheetEntry {
    pub properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DriveFileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DriveFile {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatedSpreadsheet {
    pub spreadsheet_id: String,
    pub spreadsheet_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_range_serializes_camel_case_and_skips_unbounded_sides() {
        let range = GridRange::row(7, 2);
        let value = serde_json::to_value(range).unwrap();
        assert_eq!(value["sheetId"], 7);
        assert_eq!(value["startRowIndex"], 2);
        assert_eq!(value["endRowIndex"], 3);
        assert!(value.get("startColumnIndex").is_none());
    }

    #[test]
    fn cell_block_carries_all_bounds() {
        let range = GridRange::cells(0, 3, 1000, 9, 10);
        let value = serde_json::to_value(range).unwrap();
        assert_eq!(value["startRowIndex"], 3);
        assert_eq!(value["endRowIndex"], 1000);
        assert_eq!(value["startColumnIndex"], 9);
        assert_eq!(value["endColumnIndex"], 10);
    }

    #[test]
    fn sheet_properties_deserialize_from_api_shape() {
        let json = r#"{"sheetId": 123, "title": "Investors", "index": 0}"#;
        let props: SheetProperties = serde_json::from_str(json).unwrap();
        assert_eq!(props.sheet_id, 123);
        assert_eq!(props.title, "Investors");
    }
}
