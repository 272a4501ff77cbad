//! HTTP client for the spreadsheet values API.

use crate::config::SheetTarget;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

/// How the sheet interprets written cells.
///
/// Reconciliation always writes `UserEntered` so date strings render as
/// dates on the sheet side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInput {
    Raw,
    UserEntered,
}

impl ValueInput {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInput::Raw => "RAW",
            ValueInput::UserEntered => "USER_ENTERED",
        }
    }
}

/// One targeted range write within a batch.
#[derive(Debug, Clone)]
pub struct RangeWrite {
    pub range: String,
    pub values: Vec<Vec<String>>,
}

/// The consumed sheet surface: read a range, write a batch of targeted
/// ranges, append after the last populated row.
#[async_trait]
pub trait SheetValues: Send + Sync {
    /// Returns the raw string cells of `range`, one `Vec<String>` per row.
    /// An empty range yields an empty list; that is a valid state, not an
    /// error.
    async fn get_rows(&self, sheet_id: &str, range: &str) -> Result<Vec<Vec<String>>>;

    /// Submits all ranges as one batch; the external system either accepts
    /// the whole batch or the call fails as a whole.
    async fn update_ranges(
        &self,
        sheet_id: &str,
        writes: &[RangeWrite],
        input: ValueInput,
    ) -> Result<()>;

    /// Appends `values` after the last populated row of the table that
    /// `range_hint` points into.
    async fn append_rows(
        &self,
        sheet_id: &str,
        range_hint: &str,
        values: &[Vec<String>],
        input: ValueInput,
    ) -> Result<()>;
}

/// Google Sheets v4 values API over HTTP with a bearer token.
pub struct GoogleSheetValues {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

impl GoogleSheetValues {
    pub fn new(target: &SheetTarget) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: target.api_base.clone(),
            token: target.token.clone(),
        })
    }
}

#[async_trait]
impl SheetValues for GoogleSheetValues {
    async fn get_rows(&self, sheet_id: &str, range: &str) -> Result<Vec<Vec<String>>> {
        let url = format!("{}/v4/spreadsheets/{sheet_id}/values/{range}", self.api_base);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| read_error(range, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(read_error(range, format!("{status}: {body}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| read_error(range, e.to_string()))?;

        // A range with no data comes back without a "values" key at all.
        let rows = body
            .get("values")
            .and_then(Value::as_array)
            .map(|rows| rows.iter().map(cells_of).collect())
            .unwrap_or_default();

        Ok(rows)
    }

    async fn update_ranges(
        &self,
        sheet_id: &str,
        writes: &[RangeWrite],
        input: ValueInput,
    ) -> Result<()> {
        let url = format!(
            "{}/v4/spreadsheets/{sheet_id}/values:batchUpdate",
            self.api_base
        );
        let ranges = writes
            .iter()
            .map(|w| w.range.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let data: Vec<Value> = writes
            .iter()
            .map(|w| json!({ "range": w.range, "values": w.values }))
            .collect();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({
                "valueInputOption": input.as_str(),
                "data": data,
            }))
            .send()
            .await
            .map_err(|e| write_error("update", &ranges, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(write_error("update", &ranges, format!("{status}: {body}")));
        }

        Ok(())
    }

    async fn append_rows(
        &self,
        sheet_id: &str,
        range_hint: &str,
        values: &[Vec<String>],
        input: ValueInput,
    ) -> Result<()> {
        let url = format!(
            "{}/v4/spreadsheets/{sheet_id}/values/{range_hint}:append",
            self.api_base
        );

        let response = self
            .client
            .post(&url)
            .query(&[
                ("valueInputOption", input.as_str()),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .bearer_auth(&self.token)
            .json(&json!({ "values": values }))
            .send()
            .await
            .map_err(|e| write_error("append", range_hint, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(write_error(
                "append",
                range_hint,
                format!("{status}: {body}"),
            ));
        }

        Ok(())
    }
}

fn cells_of(row: &Value) -> Vec<String> {
    row.as_array()
        .map(|cells| {
            cells
                .iter()
                .map(|c| match c {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn read_error(range: &str, message: String) -> Error {
    Error::ExternalRead {
        range: range.to_string(),
        message,
    }
}

fn write_error(operation: &'static str, range: &str, message: String) -> Error {
    Error::ExternalWrite {
        operation,
        range: range.to_string(),
        message,
    }
}
