pub mod dedupe;
pub mod inventory;
pub mod layout;
pub mod run;
pub mod status;

mod records_csv;

use anyhow::{Context, Result};
use rayon::ThreadPool;

use crate::cli::PipelineOverrides;
use crate::config::PipelineConfig;

const MANIFEST_DIR: &str = "manifests";
const INVENTORY_MANIFEST: &str = "inventory.json";
const RUN_MANIFEST_PREFIX: &str = "run_";

pub fn load_pipeline_config(overrides: &PipelineOverrides) -> Result<PipelineConfig> {
    let mut config = PipelineConfig::load(overrides.config.as_deref())?;

    if let Some(rate) = overrides.exchange_rate {
        config.extract.exchange_rate = rate;
    }
    if let Some(split_x) = overrides.split_x {
        config.layout.split_x = Some(split_x);
    }
    if overrides.no_sidebar {
        config.layout.sidebar_x = None;
    } else if let Some(sidebar_x) = overrides.sidebar_x {
        config.layout.sidebar_x = Some(sidebar_x);
    }
    if let Some(order) = overrides.column_order {
        config.layout.column_order = order;
    }

    config.validate()?;
    Ok(config)
}

pub fn build_worker_pool(jobs: usize) -> Result<ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("failed to build worker pool")
}

pub fn render_command_line() -> String {
    std::env::args().collect::<Vec<String>>().join(" ")
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::config::ColumnOrder;

    fn config_file(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("pipeline.json");
        let raw = r#"{
            "layout": {
                "sidebar_x": 150.0,
                "split_x": 320.0,
                "column_order": "per_document",
                "y_tolerance": 2.0
            },
            "extract": { "exchange_rate": 1200.0 }
        }"#;
        fs::write(&path, raw).expect("write config");
        path
    }

    #[test]
    fn config_file_values_apply_without_flags() {
        let dir = tempfile::tempdir().expect("tempdir");
        let overrides = PipelineOverrides {
            config: Some(config_file(dir.path())),
            ..PipelineOverrides::default()
        };

        let config = load_pipeline_config(&overrides).expect("config");
        assert_eq!(config.extract.exchange_rate, 1200.0);
        assert_eq!(config.layout.split_x, Some(320.0));
        assert_eq!(config.layout.sidebar_x, Some(150.0));
        assert_eq!(config.layout.column_order, ColumnOrder::PerDocument);
        assert_eq!(config.layout.y_tolerance, 2.0);
        assert_eq!(config.extract.year_km_window, 12);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let overrides = PipelineOverrides {
            config: Some(config_file(dir.path())),
            exchange_rate: Some(1000.0),
            split_x: Some(300.0),
            sidebar_x: Some(180.0),
            no_sidebar: false,
            column_order: Some(ColumnOrder::PerPage),
        };

        let config = load_pipeline_config(&overrides).expect("config");
        assert_eq!(config.extract.exchange_rate, 1000.0);
        assert_eq!(config.layout.split_x, Some(300.0));
        assert_eq!(config.layout.sidebar_x, Some(180.0));
        assert_eq!(config.layout.column_order, ColumnOrder::PerPage);
        assert_eq!(config.layout.y_tolerance, 2.0);
    }

    #[test]
    fn no_sidebar_disables_configured_threshold() {
        let dir = tempfile::tempdir().expect("tempdir");
        let overrides = PipelineOverrides {
            config: Some(config_file(dir.path())),
            no_sidebar: true,
            ..PipelineOverrides::default()
        };

        let config = load_pipeline_config(&overrides).expect("config");
        assert_eq!(config.layout.sidebar_x, None);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let overrides = PipelineOverrides {
            exchange_rate: Some(0.0),
            ..PipelineOverrides::default()
        };
        assert!(load_pipeline_config(&overrides).is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let overrides = PipelineOverrides {
            config: Some(dir.path().join("absent.json")),
            ..PipelineOverrides::default()
        };
        assert!(load_pipeline_config(&overrides).is_err());
    }
}
