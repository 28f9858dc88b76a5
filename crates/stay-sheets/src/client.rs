//! Hosted spreadsheet API client.
//!
//! A thin, synchronous wrapper over the Google Sheets v4 REST surface; the
//! value is the API, not logic added here. Construct one client at process
//! start and pass it by reference; it owns the HTTP connection pool and is
//! the only long-lived resource in the system.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use stay_model::RowRef;

use crate::error::{Result, SheetsError};
use crate::store::SheetStore;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Client for one spreadsheet, bound to a single worksheet tab.
pub struct SheetsClient {
    http: reqwest::blocking::Client,
    access_token: String,
    spreadsheet_id: String,
    /// Worksheet (tab) title used for A1 ranges.
    worksheet: String,
    /// Numeric sheet id of the worksheet, needed for row deletion.
    sheet_gid: i64,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<Value>>>,
}

impl SheetsClient {
    pub fn new(
        access_token: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        worksheet: impl Into<String>,
        sheet_gid: i64,
    ) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            access_token: access_token.into(),
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: worksheet.into(),
            sheet_gid,
            base_url: SHEETS_API_BASE.to_string(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// A1 range scoped to the configured worksheet, e.g. `'시트1'!B4:U4`.
    fn range(&self, a1: &str) -> String {
        format!("'{}'!{}", self.worksheet, a1)
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{}/{}/values/{}{}",
            self.base_url,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(range),
            suffix,
        )
    }

    fn check(&self, response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let code = status.as_u16();
        let message = api_error_message(response);
        if code == 401 || code == 403 {
            Err(SheetsError::Permission {
                status: code,
                message,
            })
        } else {
            Err(SheetsError::Api {
                status: code,
                message,
            })
        }
    }
}

/// Pulls the human-readable message out of an API error body.
fn api_error_message(response: reqwest::blocking::Response) -> String {
    let body = response.text().unwrap_or_default();
    serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or(body)
}

/// Renders one API cell value as the raw string the normalizer expects.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl SheetStore for SheetsClient {
    fn read_all(&self) -> Result<Vec<Vec<String>>> {
        let url = self.values_url(&self.range("A:V"), "");
        debug!(spreadsheet = %self.spreadsheet_id, "fetching all rows");
        let response = self
            .http
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()?;
        let range: ValueRange = self
            .check(response)?
            .json()
            .map_err(|error| SheetsError::Decode(error.to_string()))?;
        let rows = range
            .values
            .unwrap_or_default()
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        Ok(rows)
    }

    fn append_row(&mut self, cells: &[String]) -> Result<()> {
        let url = self.values_url(&self.range("A1"), ":append?valueInputOption=USER_ENTERED");
        debug!(cells = cells.len(), "appending row");
        let response = self
            .http
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&json!({ "values": [cells] }))
            .send()?;
        self.check(response)?;
        Ok(())
    }

    fn update_cells(&mut self, row: RowRef, start_col: usize, cells: &[String]) -> Result<()> {
        if cells.is_empty() {
            return Ok(());
        }
        let start = column_letter(start_col);
        let end = column_letter(start_col + cells.len() - 1);
        let a1 = format!("{start}{row}:{end}{row}");
        let range = self.range(&a1);
        let url = self.values_url(&range, "?valueInputOption=USER_ENTERED");
        debug!(%row, range = %a1, "updating cells");
        let response = self
            .http
            .put(&url)
            .header("Authorization", self.auth_header())
            .json(&json!({ "range": range, "values": [cells] }))
            .send()?;
        self.check(response)?;
        Ok(())
    }

    fn delete_row(&mut self, row: RowRef) -> Result<()> {
        let url = format!(
            "{}/{}:batchUpdate",
            self.base_url,
            urlencoding::encode(&self.spreadsheet_id),
        );
        debug!(%row, "deleting row");
        // DeleteDimension takes 0-based, end-exclusive indices.
        let response = self
            .http
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&json!({
                "requests": [{
                    "deleteDimension": {
                        "range": {
                            "sheetId": self.sheet_gid,
                            "dimension": "ROWS",
                            "startIndex": row.0 - 1,
                            "endIndex": row.0,
                        }
                    }
                }]
            }))
            .send()?;
        self.check(response)?;
        Ok(())
    }
}

/// 1-based column index to A1 letter. The schema never exceeds 26 columns.
fn column_letter(index: usize) -> char {
    (b'A' + (index - 1) as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters() {
        assert_eq!(column_letter(1), 'A');
        assert_eq!(column_letter(2), 'B');
        assert_eq!(column_letter(21), 'U');
        assert_eq!(column_letter(22), 'V');
    }

    #[test]
    fn cell_text_handles_mixed_value_types() {
        assert_eq!(cell_text(&Value::String("홍길동".into())), "홍길동");
        assert_eq!(cell_text(&json!(150000)), "150000");
        assert_eq!(cell_text(&Value::Null), "");
    }

    #[test]
    fn ranges_are_worksheet_scoped() {
        let client = SheetsClient::new("token", "sheet-id", "시트1", 0);
        assert_eq!(client.range("B4:U4"), "'시트1'!B4:U4");
    }
}
