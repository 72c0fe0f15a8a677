use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::process::ExitCode;

use coco2csv::{process_dataset, Args, DatasetPaths};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let coco_dir = Path::new(&args.coco_dir);
    if !coco_dir.is_dir() {
        error!("The specified coco_dir does not exist: {}", args.coco_dir);
        return ExitCode::FAILURE;
    }

    info!("Starting COCO to CSV conversion for {}...", args.dataset);

    let paths = DatasetPaths::from_args(&args);
    match process_dataset(&paths, Path::new(&args.csv_file), args.join_policy(), true) {
        Ok(stats) => {
            stats.print_summary();
            info!("Conversion process completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to convert dataset: {}", e);
            ExitCode::FAILURE
        }
    }
}
