use indicatif::ProgressBar;
use log::info;
use std::path::{Path, PathBuf};

use crate::coco::CocoIndex;
use crate::config::{Args, JoinPolicy};
use crate::conversion::convert_annotations;
use crate::error::Result;
use crate::io::{load_coco_file, write_csv};
use crate::types::ConversionStats;
use crate::utils::create_progress_bar;

/// Locations derived from the dataset root and split name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    /// `<coco_dir>/annotations/instances_<dataset>.json`
    pub annotation_file: PathBuf,
    /// `<coco_dir>/images/<dataset>`
    pub images_dir: PathBuf,
}

impl DatasetPaths {
    pub fn new(coco_dir: &Path, dataset: &str) -> Self {
        Self {
            annotation_file: coco_dir
                .join("annotations")
                .join(format!("instances_{}.json", dataset)),
            images_dir: coco_dir.join("images").join(dataset),
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self::new(Path::new(&args.coco_dir), &args.dataset)
    }
}

/// Main conversion pipeline: load, join, write
///
/// Every row is built before the output file is touched, so a malformed
/// bbox never leaves a partial CSV behind. The progress bar is only drawn
/// when `show_progress` is set.
pub fn process_dataset(
    paths: &DatasetPaths,
    csv_file: &Path,
    policy: JoinPolicy,
    show_progress: bool,
) -> Result<ConversionStats> {
    let index = CocoIndex::new(load_coco_file(&paths.annotation_file)?);

    let mut stats = ConversionStats {
        images_found: index.images().len(),
        annotations_found: index.annotation_count(),
        orphan_annotations: index.orphan_annotations(),
        ..Default::default()
    };
    info!("found {} images", stats.images_found);
    info!("found {} annotations", stats.annotations_found);

    let rows = convert_annotations(&index, &paths.images_dir, policy)?;
    stats.background_rows = rows.iter().filter(|row| row.is_background()).count();
    stats.annotations_exported = rows.len() - stats.background_rows;

    let pb = if show_progress {
        create_progress_bar(rows.len() as u64, "CSV")
    } else {
        ProgressBar::hidden()
    };
    if let Err(e) = write_csv(csv_file, &rows, &pb) {
        pb.abandon();
        return Err(e);
    }
    pb.finish_and_clear();

    // background rows count too, matching the number of lines written
    info!("exported {} annotations", stats.rows_written());
    Ok(stats)
}
