use std::path::PathBuf;

/// Everything that can stop a conversion run.
///
/// Nothing is recovered internally; each variant bubbles up to `main`.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The annotation file is missing or cannot be opened.
    #[error("Failed to open annotation file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The annotation file is not valid JSON.
    #[error("Failed to parse JSON ({}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON is well formed but a required field is absent or mistyped.
    #[error("Unexpected COCO structure in {}: {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed bbox in annotation #{index} (image_id {image_id}): {reason}")]
    Shape {
        index: usize,
        image_id: u64,
        reason: String,
    },

    #[error("Failed to write CSV file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
