use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ColumnOrder;

#[derive(Parser, Debug)]
#[command(
    name = "autolistings",
    version,
    about = "Batch extraction of vehicle listings from converted marketplace pages"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Inventory(InventoryArgs),
    Layout(LayoutArgs),
    Run(RunArgs),
    Dedupe(DedupeArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct PipelineOverrides {
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub exchange_rate: Option<f64>,

    #[arg(long)]
    pub split_x: Option<f64>,

    #[arg(long)]
    pub sidebar_x: Option<f64>,

    #[arg(long, default_value_t = false, conflicts_with = "sidebar_x")]
    pub no_sidebar: bool,

    #[arg(long, value_enum)]
    pub column_order: Option<ColumnOrder>,
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = "data/words")]
    pub input_root: PathBuf,

    #[arg(long, default_value = ".cache/autolistings")]
    pub work_root: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    #[arg(long, default_value = "data/words")]
    pub input_root: PathBuf,

    #[arg(long, default_value = "data/layout")]
    pub output_root: PathBuf,

    #[arg(long, default_value_t = 0)]
    pub jobs: usize,

    #[command(flatten)]
    pub pipeline: PipelineOverrides,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(long, default_value = "data/words")]
    pub input_root: PathBuf,

    #[arg(long, default_value = ".cache/autolistings")]
    pub work_root: PathBuf,

    #[arg(long, default_value = "autos_dataset.csv")]
    pub output_csv: PathBuf,

    #[arg(long)]
    pub run_manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = 0)]
    pub jobs: usize,

    #[arg(long, default_value_t = false)]
    pub skip_clean: bool,

    #[command(flatten)]
    pub pipeline: PipelineOverrides,
}

#[derive(Args, Debug, Clone)]
pub struct DedupeArgs {
    #[arg(long, default_value = "autos_dataset.csv")]
    pub input_csv: PathBuf,

    #[arg(long, default_value = "autos_dataset_limpio.csv")]
    pub output_csv: PathBuf,

    #[arg(long, default_value_t = false)]
    pub skip_clean: bool,

    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/autolistings")]
    pub work_root: PathBuf,
}
