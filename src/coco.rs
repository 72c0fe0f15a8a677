//! COCO format data structures
//!
//! Only the fields needed to flatten detections into CSV rows are modelled;
//! the rest of a COCO file (info, licenses, categories, segmentation, ...)
//! is accepted and skipped by serde.

use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;

/// COCO image information
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
    pub id: u64,
    pub file_name: String,
}

impl Image {
    pub fn new(id: u64, file_name: impl Into<String>) -> Self {
        Self {
            id,
            file_name: file_name.into(),
        }
    }
}

/// COCO annotation information
///
/// `bbox` stays as a raw JSON value so that a short, non-numeric or non-array
/// box is reported as a shape problem of that annotation rather than a parse
/// failure of the whole file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Annotation {
    pub image_id: u64,
    pub bbox: serde_json::Value, // [x, y, width, height]
}

impl Annotation {
    pub fn new(image_id: u64, bbox: [f64; 4]) -> Self {
        Self {
            image_id,
            bbox: serde_json::Value::from(bbox.to_vec()),
        }
    }
}

/// The parts of a COCO dataset file this tool reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CocoFile {
    pub images: Vec<Image>,
    pub annotations: Vec<Annotation>,
}

/// Image table plus a per-image lookup of annotations
#[derive(Debug)]
pub struct CocoIndex {
    images: Vec<Image>,
    image_positions: HashMap<u64, usize>,
    annotations_by_image: HashMap<u64, Vec<Annotation>>,
    orphan_annotations: usize,
}

impl CocoIndex {
    /// Build the index from a parsed COCO file.
    ///
    /// A repeated image id keeps its first position and takes the later
    /// record. Annotations pointing at unknown images are counted and dropped.
    pub fn new(coco: CocoFile) -> Self {
        let mut images: Vec<Image> = Vec::with_capacity(coco.images.len());
        let mut image_positions: HashMap<u64, usize> =
            HashMap::with_capacity(coco.images.len());

        for image in coco.images {
            match image_positions.get(&image.id).copied() {
                Some(pos) => {
                    warn!(
                        "Duplicate image id {}: {} replaces {}",
                        image.id, image.file_name, images[pos].file_name
                    );
                    images[pos] = image;
                }
                None => {
                    image_positions.insert(image.id, images.len());
                    images.push(image);
                }
            }
        }

        let mut annotations_by_image: HashMap<u64, Vec<Annotation>> = HashMap::new();
        let mut orphan_annotations = 0;
        for annotation in coco.annotations {
            if image_positions.contains_key(&annotation.image_id) {
                annotations_by_image
                    .entry(annotation.image_id)
                    .or_default()
                    .push(annotation);
            } else {
                debug!(
                    "Annotation references unknown image_id {}",
                    annotation.image_id
                );
                orphan_annotations += 1;
            }
        }
        if orphan_annotations > 0 {
            warn!(
                "Skipped {} annotations whose image_id is not in the image list",
                orphan_annotations
            );
        }

        Self {
            images,
            image_positions,
            annotations_by_image,
            orphan_annotations,
        }
    }

    /// All images in file order
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn image(&self, id: u64) -> Option<&Image> {
        self.image_positions.get(&id).map(|&pos| &self.images[pos])
    }

    /// Annotations of one image in file order; empty for unknown or unannotated images
    pub fn annotations_for(&self, image_id: u64) -> &[Annotation] {
        self.annotations_by_image
            .get(&image_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every reachable annotation, grouped by image in image order
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> + '_ {
        self.images
            .iter()
            .flat_map(move |image| self.annotations_for(image.id).iter())
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations_by_image.values().map(Vec::len).sum()
    }

    pub fn orphan_annotations(&self) -> usize {
        self.orphan_annotations
    }
}
