use std::path::PathBuf;

// Corner-form box: x1, y1, x2, y2
pub type Corners = [i64; 4];

// One line of the output CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub file_path: PathBuf,
    /// `None` for a background image kept by a right-outer join
    pub coords: Option<Corners>,
}

impl CsvRow {
    pub fn new(file_path: PathBuf, coords: Corners) -> Self {
        Self {
            file_path,
            coords: Some(coords),
        }
    }

    pub fn background(file_path: PathBuf) -> Self {
        Self {
            file_path,
            coords: None,
        }
    }

    pub fn is_background(&self) -> bool {
        self.coords.is_none()
    }
}

// Counters reported at the end of a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    pub images_found: usize,
    pub annotations_found: usize,
    pub orphan_annotations: usize,
    pub annotations_exported: usize,
    pub background_rows: usize,
}

impl ConversionStats {
    pub fn rows_written(&self) -> usize {
        self.annotations_exported + self.background_rows
    }

    pub fn print_summary(&self) {
        log::info!("=== Conversion Summary ===");
        log::info!("Images found: {}", self.images_found);
        log::info!("Annotations found: {}", self.annotations_found);
        log::info!("Annotations exported: {}", self.annotations_exported);
        if self.background_rows > 0 {
            log::info!("Background rows: {}", self.background_rows);
        }
        if self.orphan_annotations > 0 {
            log::warn!(
                "Annotations without a matching image: {}",
                self.orphan_annotations
            );
        }
    }
}
