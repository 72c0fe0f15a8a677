use indicatif::{ProgressBar, ProgressStyle};
use serde_json::error::Category;
use std::path::Path;

use crate::error::ConvertError;

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template(&format!(
            "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
            label
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// Sort a serde_json failure into a syntax problem or a structure problem
pub fn classify_json_error(path: &Path, source: serde_json::Error) -> ConvertError {
    let path = path.to_path_buf();
    match source.classify() {
        Category::Data => ConvertError::Schema { path, source },
        Category::Io | Category::Syntax | Category::Eof => ConvertError::Parse { path, source },
    }
}
