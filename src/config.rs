use clap::Parser;

/// Command-line arguments parser for converting COCO annotations to CSV.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Directory where the COCO dataset is stored
    #[arg(short = 'd', long = "coco_dir")]
    pub coco_dir: String,

    /// Dataset split to convert, e.g. train2017 or val2017
    #[arg(long = "dataset", default_value = "train2017", value_parser = validate_dataset)]
    pub dataset: String,

    /// Output CSV file
    #[arg(short = 'o', long = "csv_file")]
    pub csv_file: String,

    /// Flag to emit blank-coordinate rows for images without annotations
    #[arg(long = "include_background")]
    pub include_background: bool,
}

impl Args {
    /// Join policy selected by the command-line flags
    pub fn join_policy(&self) -> JoinPolicy {
        if self.include_background {
            JoinPolicy::RightOuter
        } else {
            JoinPolicy::Inner
        }
    }
}

/// How annotations are joined onto the image table
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum JoinPolicy {
    /// Only images with at least one annotation produce rows
    #[default]
    Inner,
    /// Every image produces a row; unannotated images get empty coordinates
    RightOuter,
}

// The split name is substituted into a file name and a directory name
pub fn validate_dataset(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("DATASET must not be empty".to_string());
    }
    if s.contains(['/', '\\']) || s == "." || s == ".." {
        return Err("DATASET must be a plain split name, not a path".to_string());
    }
    Ok(s.to_string())
}
