use crate::domain::models::LayoutConfig;
use crate::infrastructure::error::InfraError;
use chrono_tz::Tz;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const APP_JSON: &str = "app.json";
const TIMELINE_JSON: &str = "timeline.json";
const DEFAULT_TIMEZONE: &str = "UTC";

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigBundle {
    pub app: serde_json::Value,
    pub timeline: serde_json::Value,
}

fn default_files() -> HashMap<&'static str, serde_json::Value> {
    let defaults = LayoutConfig::default();
    HashMap::from([
        (
            APP_JSON,
            serde_json::json!({
                "schema": 1,
                "appName": "Daily Plan",
                "timezone": DEFAULT_TIMEZONE
            }),
        ),
        (
            TIMELINE_JSON,
            serde_json::json!({
                "schema": 1,
                "pixelsPerHour": defaults.pixels_per_hour,
                "minimumDurationMinutes": defaults.minimum_duration_minutes,
                "minimumBlockHeightPixels": defaults.minimum_block_height_pixels,
                "columnWidthPixels": defaults.column_width_pixels,
                "columnGapPixels": defaults.column_gap_pixels,
                "gutterWidthPixels": defaults.gutter_width_pixels,
                "scrollTopPaddingPixels": defaults.scroll_top_padding_pixels,
                "defaultTaskMinutes": defaults.default_task_minutes
            }),
        ),
    ])
}

pub fn ensure_default_configs(config_dir: &Path) -> Result<(), InfraError> {
    for (name, value) in default_files() {
        let path = config_dir.join(name);
        if !path.exists() {
            let formatted = serde_json::to_string_pretty(&value)?;
            fs::write(&path, format!("{formatted}\n"))?;
            info!(
                "event=config_default_written module=config status=ok path={}",
                path.display()
            );
        }
    }
    Ok(())
}

fn read_config(path: &Path) -> Result<serde_json::Value, InfraError> {
    let raw = fs::read_to_string(path)?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)?;
    let schema = parsed
        .get("schema")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| InfraError::InvalidConfig(format!("missing schema in {}", path.display())))?;
    if schema != 1 {
        return Err(InfraError::InvalidConfig(format!(
            "unsupported schema {} in {}",
            schema,
            path.display()
        )));
    }
    Ok(parsed)
}

pub fn load_configs(config_dir: &Path) -> Result<ConfigBundle, InfraError> {
    Ok(ConfigBundle {
        app: read_config(&config_dir.join(APP_JSON))?,
        timeline: read_config(&config_dir.join(TIMELINE_JSON))?,
    })
}

/// Reads `timeline.json`; keys that are absent keep their default values.
pub fn load_layout_config(config_dir: &Path) -> Result<LayoutConfig, InfraError> {
    let path = config_dir.join(TIMELINE_JSON);
    let mut timeline = read_config(&path)?;
    if let Some(object) = timeline.as_object_mut() {
        object.remove("schema");
    }
    let config: LayoutConfig = serde_json::from_value(timeline)?;
    config
        .validate()
        .map_err(|message| InfraError::InvalidConfig(format!("{message} in {}", path.display())))?;
    Ok(config)
}

pub fn read_timezone(config_dir: &Path) -> Result<Tz, InfraError> {
    let app = read_config(&config_dir.join(APP_JSON))?;
    let name = app
        .get("timezone")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_TIMEZONE);
    name.parse::<Tz>()
        .map_err(|error| InfraError::InvalidConfig(format!("invalid timezone '{name}': {error}")))
}
