//! Command output: pretty JSON, single-line JSON, or an aligned table.
//!
//! Tables lead with identifying columns (`id`, the PR/PO number, status)
//! and drop long free text from list views; `get` still shows every field.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{Table, TableOptions};

const LEADING_COLUMNS: &[&str] = &[
    "id",
    "pr_number",
    "po_number",
    "org_id",
    "org_name",
    "title",
    "name",
    "status",
];

const LIST_HIDDEN: &[&str] = &["description", "justification"];

const MONEY_FIELDS: &[&str] = &["estimated_cost", "total_amount", "amount", "remaining"];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table(&serde_json::to_value(value)?)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table(value: &Value) -> String {
    let table = match value {
        Value::Array(items) if items.is_empty() => return String::from("(no rows)"),
        Value::Array(items) => list_table(items),
        Value::Object(map) => record_table(map),
        scalar => {
            let mut table = Table::new(["value"]);
            table.push_row(vec![cell("value", scalar)]);
            table
        }
    };
    table.render(table_options())
}

fn column_order(a: &str, b: &str) -> Ordering {
    let rank = |key: &str| {
        let leaf = key.rsplit('.').next().unwrap_or(key);
        LEADING_COLUMNS
            .iter()
            .position(|c| *c == leaf)
            .unwrap_or(LEADING_COLUMNS.len())
    };
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

fn list_table(items: &[Value]) -> Table {
    if !items.iter().all(Value::is_object) {
        let mut table = Table::new(["value"]);
        for item in items {
            table.push_row(vec![cell("value", item)]);
        }
        return table;
    }

    let mut headers: Vec<&str> = Vec::new();
    for key in items.iter().filter_map(Value::as_object).flat_map(Map::keys) {
        if !LIST_HIDDEN.contains(&key.as_str()) && !headers.contains(&key.as_str()) {
            headers.push(key);
        }
    }
    headers.sort_by(|a, b| column_order(a, b));

    let mut table = Table::new(headers.iter().copied());
    for map in items.iter().filter_map(Value::as_object) {
        let row = headers
            .iter()
            .map(|header| {
                map.get(*header)
                    .map_or_else(|| "-".to_string(), |v| cell(header, v))
            })
            .collect();
        table.push_row(row);
    }
    table
}

/// One row per field. Nested objects (e.g. the requisition inside an
/// approval outcome) are flattened into `parent.field` rows.
fn record_table(map: &Map<String, Value>) -> Table {
    let mut fields = Vec::new();
    flatten("", map, &mut fields);
    fields.sort_by(|a, b| column_order(&a.0, &b.0));
    Table::record(fields)
}

fn flatten(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, value) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) => flatten(&name, inner, out),
            other => {
                let rendered = cell(key, other);
                out.push((name, rendered));
            }
        }
    }
}

fn cell(key: &str, value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(n) if MONEY_FIELDS.contains(&key) => n
            .as_f64()
            .map_or_else(|| n.to_string(), |amount| format!("{amount:.2}")),
        Value::Number(n) => n.to_string(),
        Value::String(s) if key.ends_with("_at") => short_timestamp(s),
        Value::String(s) => s.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

fn short_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| raw.to_string(),
        |at| at.with_timezone(&Utc).format("%Y-%m-%d %H:%M").to_string(),
    )
}
