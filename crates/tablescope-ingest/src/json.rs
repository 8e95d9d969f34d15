//! JSON table parsing.
//!
//! Three layouts are accepted:
//!
//! - records: `[{"a": 1, "b": 2}, {"a": 3, "b": 4}]`
//! - columns: `{"a": [1, 3], "b": [2, 4]}`
//! - indexed columns: `{"a": {"0": 1, "1": 3}, "b": {"0": 2, "1": 4}}`
//!
//! Key order is preserved. A column whose non-null values are all integers
//! (with no nulls) becomes `Int64`, all numbers becomes `Float64`, all
//! booleans becomes `Boolean`, anything else becomes `String`.

use polars::prelude::*;
use serde_json::{Map, Value};

use crate::error::{IngestError, Result};
use crate::loader::DataFormat;

fn parse_error(message: impl Into<String>) -> IngestError {
    IngestError::Parse {
        format: DataFormat::Json,
        message: message.into(),
    }
}

/// Parses JSON bytes into a `DataFrame`.
pub(crate) fn read_json(content: &[u8]) -> Result<DataFrame> {
    let value: Value =
        serde_json::from_slice(content).map_err(|e| parse_error(e.to_string()))?;
    let columns = match value {
        Value::Array(records) => columns_from_records(records)?,
        Value::Object(map) => columns_from_object(map)?,
        _ => {
            return Err(parse_error(
                "expected an array of records or an object of columns",
            ));
        }
    };
    let frame_columns = columns
        .into_iter()
        .map(|(name, values)| build_column(&name, &values))
        .collect::<Vec<_>>();
    DataFrame::new(frame_columns).map_err(|e| parse_error(e.to_string()))
}

fn columns_from_records(records: Vec<Value>) -> Result<Vec<(String, Vec<Value>)>> {
    let mut names: Vec<String> = Vec::new();
    let mut rows: Vec<Map<String, Value>> = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let Value::Object(map) = record else {
            return Err(parse_error(format!("record {index} is not an object")));
        };
        for key in map.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
        rows.push(map);
    }
    Ok(names
        .into_iter()
        .map(|name| {
            let values = rows
                .iter()
                .map(|row| row.get(&name).cloned().unwrap_or(Value::Null))
                .collect();
            (name, values)
        })
        .collect())
}

fn columns_from_object(map: Map<String, Value>) -> Result<Vec<(String, Vec<Value>)>> {
    if map.values().all(Value::is_array) {
        let columns: Vec<(String, Vec<Value>)> = map
            .into_iter()
            .map(|(name, value)| match value {
                Value::Array(values) => (name, values),
                _ => (name, Vec::new()),
            })
            .collect();
        if let Some((_, first)) = columns.first() {
            let expected = first.len();
            if let Some((name, values)) = columns.iter().find(|(_, v)| v.len() != expected) {
                return Err(parse_error(format!(
                    "column '{name}' has {} values, expected {expected}",
                    values.len()
                )));
            }
        }
        return Ok(columns);
    }
    if map.values().all(Value::is_object) {
        let mut index: Vec<String> = Vec::new();
        for value in map.values() {
            if let Value::Object(cells) = value {
                for key in cells.keys() {
                    if !index.contains(key) {
                        index.push(key.clone());
                    }
                }
            }
        }
        return Ok(map
            .into_iter()
            .map(|(name, value)| {
                let values = match value {
                    Value::Object(cells) => index
                        .iter()
                        .map(|key| cells.get(key).cloned().unwrap_or(Value::Null))
                        .collect(),
                    _ => Vec::new(),
                };
                (name, values)
            })
            .collect());
    }
    Err(parse_error(
        "object values must be all arrays or all objects",
    ))
}

fn build_column(name: &str, values: &[Value]) -> Column {
    let present = values.iter().filter(|v| !v.is_null());
    let has_null = values.iter().any(Value::is_null);
    let all_numbers = present.clone().all(Value::is_number);
    let all_bools = present.clone().all(Value::is_boolean);
    let any_present = present.clone().next().is_some();

    if any_present && all_numbers && !has_null && values.iter().all(|v| v.as_i64().is_some()) {
        let ints: Vec<i64> = values.iter().filter_map(Value::as_i64).collect();
        return Column::new(name.into(), ints);
    }
    if any_present && all_numbers {
        let floats: Vec<Option<f64>> = values.iter().map(Value::as_f64).collect();
        return Column::new(name.into(), floats);
    }
    if any_present && all_bools {
        let bools: Vec<Option<bool>> = values.iter().map(Value::as_bool).collect();
        return Column::new(name.into(), bools);
    }
    let strings: Vec<Option<String>> = values
        .iter()
        .map(|value| match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
        .collect();
    Column::new(name.into(), strings)
}
