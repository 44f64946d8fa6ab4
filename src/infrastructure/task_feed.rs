use crate::domain::models::{TaskPriority, TaskRecord};
use crate::infrastructure::error::InfraError;
use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TaskFeedPayload {
    tasks: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTaskRecord {
    id: String,
    #[serde(default)]
    title: String,
    start: String,
    end: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    all_day: Option<bool>,
    #[serde(default)]
    priority: Option<String>,
}

/// Decodes the `{ "tasks": [...] }` body returned by the task store for one day.
///
/// A body without a `tasks` array is an error so the caller can keep its previous
/// snapshot. Individual malformed records are skipped.
pub fn decode_task_feed(payload: &str) -> Result<Vec<TaskRecord>, InfraError> {
    let parsed: TaskFeedPayload = serde_json::from_str(payload)?;
    let Some(entries) = parsed.tasks else {
        return Err(InfraError::InvalidPayload(
            "response does not contain a tasks array".to_string(),
        ));
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match decode_record(entry) {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!(
                    "event=task_feed_skip module=task_feed status=skipped index={index} reason={error}"
                );
            }
        }
    }
    Ok(records)
}

fn decode_record(entry: serde_json::Value) -> Result<TaskRecord, InfraError> {
    let raw: RawTaskRecord = serde_json::from_value(entry)?;
    let record = TaskRecord {
        id: raw.id.trim().to_string(),
        title: raw.title,
        start: parse_rfc3339_utc(&raw.start, "start")?,
        end: parse_rfc3339_utc(&raw.end, "end")?,
        color: raw
            .color
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()),
        all_day: raw.all_day.unwrap_or(false),
        priority: raw.priority.as_deref().map(parse_priority),
    };
    record.validate().map_err(InfraError::InvalidPayload)?;
    Ok(record)
}

fn parse_rfc3339_utc(value: &str, field_name: &str) -> Result<DateTime<Utc>, InfraError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|value| value.with_timezone(&Utc))
        .map_err(|error| {
            InfraError::InvalidPayload(format!("invalid task {field_name} '{value}': {error}"))
        })
}

fn parse_priority(value: &str) -> TaskPriority {
    match value.trim().to_ascii_uppercase().as_str() {
        "LOW" => TaskPriority::Low,
        "HIGH" => TaskPriority::High,
        "CRITICAL" => TaskPriority::Critical,
        _ => TaskPriority::Normal,
    }
}
