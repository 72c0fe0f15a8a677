//! COCO to CSV converter
//!
//! This library reads a COCO object-detection annotation file and flattens it
//! into a headerless CSV of `file_path,x1,y1,x2,y2` rows.

pub mod coco;
pub mod config;
pub mod conversion;
pub mod dataset;
pub mod error;
pub mod io;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use coco::{Annotation, CocoFile, CocoIndex, Image};
pub use config::{Args, JoinPolicy};
pub use conversion::{convert_annotations, truncate_coord, BBox};
pub use dataset::{process_dataset, DatasetPaths};
pub use error::{ConvertError, Result};
pub use io::{load_coco_file, write_csv};
pub use types::{ConversionStats, CsvRow};
