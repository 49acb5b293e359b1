use std::{fs, path::Path};

use serde::Deserialize;

use crate::core::error::WorkbenchError;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub db_path: String,
    pub log_file: String,
    pub report_dir: String,
}

pub fn load_config(path: Option<&str>) -> Result<AppConfig, WorkbenchError> {
    let default_path = Path::new("config/stride-workbench.toml");
    let path = path.map(Path::new).unwrap_or(default_path);

    if !path.exists() {
        return Ok(default_config());
    }

    let content = fs::read_to_string(path).map_err(|e| WorkbenchError::Config(e.to_string()))?;
    let cfg: AppConfig =
        toml::from_str(&content).map_err(|e| WorkbenchError::Config(e.to_string()))?;
    Ok(cfg)
}

fn default_config() -> AppConfig {
    AppConfig {
        db_path: "data/workbench.db".to_string(),
        log_file: "data/workbench.log".to_string(),
        report_dir: "data/reports".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load_config(Some("does/not/exist.toml")).unwrap();
        assert_eq!(cfg.db_path, "data/workbench.db");
        assert_eq!(cfg.report_dir, "data/reports");
    }
}
