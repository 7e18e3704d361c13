//! Profiles feed client — pulls row records from a published spreadsheet.
//!
//! The feed speaks the Google Visualization wire format: a JSONP-wrapped
//! `google.visualization.Query.setResponse({...})` payload carrying a column
//! header list and cell rows. The client makes exactly one GET per call with
//! a bounded timeout and never retries; callers own failure policy.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::engine::FeedSource;
use crate::error::EngineError;
use crate::row::RawRow;

/// Hard cap on one feed round-trip.
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

static JSONP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)setResponse\((\{.*\})\)").expect("jsonp regex"));

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GvizPayload {
    table: GvizTable,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    #[serde(default)]
    cols: Vec<GvizCol>,
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizCol {
    #[serde(default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: Value,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP feed source for a gviz-published sheet.
pub struct GvizFeed {
    url: String,
    client: reqwest::Client,
}

impl GvizFeed {
    pub fn new(url: impl Into<String>) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl FeedSource for GvizFeed {
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, EngineError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_gviz(&body)
    }
}

/// Parse a gviz JSONP body into raw rows. Cells are matched to fields by
/// column label; unknown labels are ignored, null cells read as absent.
pub fn parse_gviz(body: &str) -> Result<Vec<RawRow>, EngineError> {
    let captures = JSONP_RE
        .captures(body)
        .ok_or_else(|| EngineError::malformed("no setResponse(...) wrapper in feed body"))?;

    let payload: GvizPayload = serde_json::from_str(&captures[1])
        .map_err(|e| EngineError::malformed(format!("gviz payload: {}", e)))?;

    let labels: Vec<&str> = payload.table.cols.iter().map(|c| c.label.as_str()).collect();

    let mut rows = Vec::with_capacity(payload.table.rows.len());
    for wire_row in &payload.table.rows {
        let mut row = RawRow::default();
        for (i, cell) in wire_row.c.iter().enumerate() {
            let Some(label) = labels.get(i) else { break };
            let Some(cell) = cell else { continue };
            match *label {
                "avatar_uuid" => row.avatar_uuid = as_string(&cell.v),
                "display_name" => row.display_name = as_string(&cell.v),
                "timestamp" => row.timestamp = as_f64(&cell.v),
                "messages" => row.messages = as_f64(&cell.v).map(|n| n as i64),
                "context_sample" => row.context_sample = as_string(&cell.v),
                _ => {}
            }
        }
        rows.push(row);
    }

    tracing::debug!(rows = rows.len(), "parsed profiles feed");
    Ok(rows)
}

fn as_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(json: &str) -> String {
        format!(
            "/*O_o*/\ngoogle.visualization.Query.setResponse({});",
            json
        )
    }

    #[test]
    fn test_parse_feed_rows() {
        let body = wrap(
            r#"{"table":{
                "cols":[{"label":"avatar_uuid"},{"label":"display_name"},
                        {"label":"timestamp"},{"label":"messages"},
                        {"label":"context_sample"}],
                "rows":[
                  {"c":[{"v":"a1"},{"v":"Aria"},{"v":1700000000},{"v":3},{"v":"hi lol"}]},
                  {"c":[{"v":"b2"},{"v":"Bex"},{"v":"1700000100"},null,{"v":""}]}
                ]}}"#,
        );
        let rows = parse_gviz(&body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].avatar_uuid.as_deref(), Some("a1"));
        assert_eq!(rows[0].messages, Some(3));
        assert_eq!(rows[0].context_sample.as_deref(), Some("hi lol"));
        // numeric-in-string timestamp parses, null messages stay absent
        assert_eq!(rows[1].timestamp, Some(1700000100.0));
        assert_eq!(rows[1].messages, None);
        // empty string reads as absent
        assert_eq!(rows[1].context_sample, None);
    }

    #[test]
    fn test_missing_wrapper_is_malformed() {
        let err = parse_gviz("<html>sign in required</html>").unwrap_err();
        assert!(matches!(err, EngineError::FeedMalformed { .. }));
    }

    #[test]
    fn test_bad_json_is_malformed() {
        let err = parse_gviz("setResponse({not json})").unwrap_err();
        assert!(matches!(err, EngineError::FeedMalformed { .. }));
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let body = wrap(
            r#"{"table":{
                "cols":[{"label":"region"},{"label":"avatar_uuid"}],
                "rows":[{"c":[{"v":"sandbox"},{"v":"a1"}]}]}}"#,
        );
        let rows = parse_gviz(&body).unwrap();
        assert_eq!(rows[0].avatar_uuid.as_deref(), Some("a1"));
    }
}
