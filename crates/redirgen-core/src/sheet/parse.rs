//! Parse a gviz response body into redirect rows.

use serde::Deserialize;
use serde_json::Value;

use crate::error::SourceFetchError;
use crate::row::RedirectRow;

const PAYLOAD_PREFIX: &str = "google.visualization.Query.setResponse(";
const PAYLOAD_SUFFIX: &str = ");";

static NULL: Value = Value::Null;

const FROM: &str = "from";
const TO: &str = "to";
const STATUS: &str = "status";

#[derive(Debug, Deserialize)]
struct GvizResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    errors: Vec<GvizError>,
    #[serde(default)]
    table: Option<GvizTable>,
}

#[derive(Debug, Deserialize)]
struct GvizError {
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detailed_message: Option<String>,
}

impl GvizError {
    fn describe(self) -> String {
        self.detailed_message
            .or(self.message)
            .or(self.reason)
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
struct GvizTable {
    #[serde(default)]
    cols: Vec<GvizColumn>,
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizColumn {
    #[serde(default)]
    label: Option<String>,
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

impl GvizRow {
    fn value(&self, index: usize) -> &Value {
        self.c
            .get(index)
            .and_then(Option::as_ref)
            .map_or(&NULL, |cell| &cell.v)
    }
}

/// Strip the `setResponse(...);` wrapper and return the JSON object inside.
pub(crate) fn extract_payload(body: &str) -> Option<&str> {
    let start = body.find(PAYLOAD_PREFIX)? + PAYLOAD_PREFIX.len();
    let end = body.rfind(PAYLOAD_SUFFIX)?;
    (start < end).then(|| &body[start..end])
}

/// Parse a full gviz response body into rows, in sheet order.
pub(crate) fn parse_rows(body: &str) -> Result<Vec<RedirectRow>, SourceFetchError> {
    let payload = extract_payload(body).ok_or(SourceFetchError::MissingPayload)?;
    let response: GvizResponse = serde_json::from_str(payload)?;

    if response.status == "error" {
        let message = response
            .errors
            .into_iter()
            .next()
            .map_or_else(|| "unknown error".to_string(), GvizError::describe);
        return Err(SourceFetchError::Remote(message));
    }

    let table = response.table.unwrap_or_default();
    let has_labels = table
        .cols
        .iter()
        .any(|col| col.label.as_deref().is_some_and(|l| !l.is_empty()));

    // Unlabelled columns mean the header is the first data row.
    let (header, rows): (Vec<String>, &[GvizRow]) = if has_labels {
        let header = table
            .cols
            .iter()
            .map(|col| col.label.clone().unwrap_or_default())
            .collect();
        (header, table.rows.as_slice())
    } else {
        match table.rows.split_first() {
            Some((first, rest)) => {
                let header = (0..first.c.len())
                    .map(|i| cell_text(first.value(i)).unwrap_or_default())
                    .collect();
                (header, rest)
            }
            None => (Vec::new(), &[][..]),
        }
    };

    let position = |name: &str| header.iter().position(|h| h == name);
    let (from_idx, to_idx, status_idx) = match (position(FROM), position(TO), position(STATUS)) {
        (Some(f), Some(t), Some(s)) => (f, t, s),
        (f, t, s) => {
            let missing = [(f, FROM), (t, TO), (s, STATUS)]
                .into_iter()
                .filter_map(|(idx, name)| idx.is_none().then_some(name))
                .collect();
            return Err(SourceFetchError::MissingColumns(missing));
        }
    };

    Ok(rows
        .iter()
        .map(|row| RedirectRow {
            from: cell_text(row.value(from_idx)).unwrap_or_default(),
            to: cell_text(row.value(to_idx)).unwrap_or_default(),
            status: cell_int(row.value(status_idx)),
        })
        .collect())
}

/// Text of a cell value; `None` for an empty cell.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => i.to_string(),
            None => match n.as_f64().and_then(integral) {
                Some(i) => i.to_string(),
                None => n.to_string(),
            },
        }),
        other => Some(other.to_string()),
    }
}

/// Integer value of a numeric or numeric-string cell.
fn cell_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64)
}
