use crate::domain::models::LayoutConfig;
use crate::infrastructure::config::{
    ensure_default_configs, load_configs, load_layout_config, read_timezone,
};
use crate::infrastructure::error::InfraError;
use chrono_tz::Tz;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct BootstrapResult {
    pub workspace_root: PathBuf,
    pub config_dir: PathBuf,
    pub layout_config: LayoutConfig,
    pub timezone: Tz,
}

pub fn bootstrap_workspace(workspace_root: &Path) -> Result<BootstrapResult, InfraError> {
    let config_dir = workspace_root.join("config");
    fs::create_dir_all(&config_dir)?;

    ensure_default_configs(&config_dir)?;
    let _ = load_configs(&config_dir)?;
    let layout_config = load_layout_config(&config_dir)?;
    let timezone = read_timezone(&config_dir)?;

    Ok(BootstrapResult {
        workspace_root: workspace_root.to_path_buf(),
        config_dir,
        layout_config,
        timezone,
    })
}
