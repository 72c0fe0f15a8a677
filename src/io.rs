use indicatif::ProgressBar;
use log::info;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::coco::CocoFile;
use crate::error::{ConvertError, Result};
use crate::types::CsvRow;
use crate::utils::classify_json_error;

/// Read and parse a COCO annotation file.
///
/// The JSON is parsed straight from a buffered file stream.
pub fn load_coco_file(path: &Path) -> Result<CocoFile> {
    info!("Loading annotations from {}", path.display());
    let file = File::open(path).map_err(|source| ConvertError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| classify_json_error(path, e))
}

/// Quote a CSV field only when it needs it
pub fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Render one row as `file_path,x1,y1,x2,y2` without the line terminator
pub fn format_row(row: &CsvRow) -> String {
    let file_path = row.file_path.to_string_lossy();
    match row.coords {
        Some([x1, y1, x2, y2]) => format!("{},{},{},{},{}", csv_field(&file_path), x1, y1, x2, y2),
        None => format!("{},,,,", csv_field(&file_path)),
    }
}

/// Write rows to `path` as a headerless CSV, replacing any existing file
pub fn write_csv(path: &Path, rows: &[CsvRow], pb: &ProgressBar) -> Result<usize> {
    let write_error = |source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(write_error)?);
    for row in rows {
        writer.write_all(format_row(row).as_bytes()).map_err(write_error)?;
        writer.write_all(b"\n").map_err(write_error)?;
        pb.inc(1);
    }
    writer.flush().map_err(write_error)?;

    info!("Wrote {}", path.display());
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("/data/a.jpg"), "/data/a.jpg");
        assert_eq!(csv_field("/data/a,b.jpg"), "\"/data/a,b.jpg\"");
        assert_eq!(csv_field("say \"hi\".jpg"), "\"say \"\"hi\"\".jpg\"");
        assert_eq!(csv_field("two\nlines.jpg"), "\"two\nlines.jpg\"");
    }

    #[test]
    fn test_format_row() {
        let row = CsvRow::new(PathBuf::from("/data/images/val2017/a.jpg"), [10, 20, 40, 60]);
        assert_eq!(format_row(&row), "/data/images/val2017/a.jpg,10,20,40,60");

        let background = CsvRow::background(PathBuf::from("/data/images/val2017/b.jpg"));
        assert_eq!(format_row(&background), "/data/images/val2017/b.jpg,,,,");

        let negative = CsvRow::new(PathBuf::from("c.jpg"), [-1, 0, -3, 5]);
        assert_eq!(format_row(&negative), "c.jpg,-1,0,-3,5");
    }
}
