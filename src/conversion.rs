use log::debug;
use serde_json::Value;
use std::path::Path;

use crate::coco::{Annotation, CocoIndex};
use crate::config::JoinPolicy;
use crate::error::{ConvertError, Result};
use crate::types::{Corners, CsvRow};

// Largest magnitude an f64 can have and still truncate into an i64
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// COCO bounding box with every component already truncated to an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BBox {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl BBox {
    /// Validate a raw bbox JSON value, which must be an array
    pub fn from_json(value: &Value) -> std::result::Result<Self, String> {
        match value.as_array() {
            Some(values) => Self::from_values(values),
            None => Err(format!("expected an array of 4 numbers, found {}", value)),
        }
    }

    /// Validate and truncate a raw `[x, y, width, height]` COCO box
    pub fn from_values(values: &[Value]) -> std::result::Result<Self, String> {
        if values.len() != 4 {
            return Err(format!("expected 4 elements, found {}", values.len()));
        }
        let mut parts = [0i64; 4];
        for (slot, value) in parts.iter_mut().zip(values) {
            let number = value
                .as_f64()
                .ok_or_else(|| format!("element {} is not a number", value))?;
            *slot = truncate_coord(number).ok_or_else(|| {
                format!("element {} is not a finite integer-sized number", value)
            })?;
        }
        let [x, y, width, height] = parts;
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Convert to `[x1, y1, x2, y2]`
    pub fn to_corners(self) -> Option<Corners> {
        Some([
            self.x,
            self.y,
            self.x.checked_add(self.width)?,
            self.y.checked_add(self.height)?,
        ])
    }
}

/// Truncate a coordinate toward zero, `None` for NaN, infinities and values
/// outside the `i64` range
pub fn truncate_coord(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    if truncated >= I64_BOUND || truncated < -I64_BOUND {
        return None;
    }
    Some(truncated as i64)
}

/// Corner coordinates of a single annotation
pub fn annotation_corners(index: usize, annotation: &Annotation) -> Result<Corners> {
    let shape_error = |reason: String| ConvertError::Shape {
        index,
        image_id: annotation.image_id,
        reason,
    };
    let bbox = BBox::from_json(&annotation.bbox).map_err(shape_error)?;
    bbox.to_corners()
        .ok_or_else(|| shape_error("x2/y2 overflow a 64-bit integer".to_string()))
}

/// Resolve a COCO file name under `<images_dir>`
pub fn resolve_image_path(images_dir: &Path, file_name: &str) -> std::path::PathBuf {
    images_dir.join(file_name)
}

/// Join annotations onto their images and build the CSV rows.
///
/// Rows follow image order, then annotation order within an image. Every
/// bbox is validated before anything is returned, so a malformed box fails
/// the whole conversion.
pub fn convert_annotations(
    index: &CocoIndex,
    images_dir: &Path,
    policy: JoinPolicy,
) -> Result<Vec<CsvRow>> {
    let mut rows = Vec::with_capacity(index.annotation_count());
    let mut position = 0;

    for image in index.images() {
        let annotations = index.annotations_for(image.id);
        let file_path = resolve_image_path(images_dir, &image.file_name);

        if annotations.is_empty() {
            match policy {
                JoinPolicy::Inner => {
                    debug!("Skipping image without annotations: {}", image.file_name)
                }
                JoinPolicy::RightOuter => rows.push(CsvRow::background(file_path)),
            }
            continue;
        }

        for annotation in annotations {
            let corners = annotation_corners(position, annotation)?;
            rows.push(CsvRow::new(file_path.clone(), corners));
            position += 1;
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_coord_rounds_toward_zero() {
        assert_eq!(truncate_coord(10.9), Some(10));
        assert_eq!(truncate_coord(-1.7), Some(-1));
        assert_eq!(truncate_coord(0.0), Some(0));
        assert_eq!(truncate_coord(-0.4), Some(0));
        assert_eq!(truncate_coord(f64::NAN), None);
        assert_eq!(truncate_coord(f64::INFINITY), None);
        assert_eq!(truncate_coord(1e20), None);
    }

    #[test]
    fn test_bbox_from_values() {
        let bbox =
            BBox::from_values(&[json!(10.5), json!(20), json!(30.99), json!(40.01)]).unwrap();
        assert_eq!(
            bbox,
            BBox {
                x: 10,
                y: 20,
                width: 30,
                height: 40
            }
        );
        assert_eq!(bbox.to_corners(), Some([10, 20, 40, 60]));
    }

    #[test]
    fn test_corners_use_truncated_components() {
        // 0.6 + 0.6 would be 1.2 before truncation, 0 after
        let bbox = BBox::from_values(&[json!(0.6), json!(0.6), json!(0.6), json!(0.6)]).unwrap();
        assert_eq!(bbox.to_corners(), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_bbox_rejects_wrong_length() {
        let err = BBox::from_values(&[json!(1), json!(2), json!(3)]).unwrap_err();
        assert!(err.contains("expected 4 elements, found 3"));
        assert!(BBox::from_values(&[]).is_err());
    }

    #[test]
    fn test_bbox_rejects_non_numeric() {
        let err = BBox::from_values(&[json!(1), json!("2"), json!(3), json!(4)]).unwrap_err();
        assert!(err.contains("not a number"));
        assert!(BBox::from_values(&[json!(1), json!(null), json!(3), json!(4)]).is_err());
    }

    #[test]
    fn test_bbox_from_json_requires_array() {
        assert!(BBox::from_json(&json!([1, 2, 3, 4])).is_ok());
        for value in [json!(null), json!(4), json!("1,2,3,4"), json!({"x": 1})] {
            let err = BBox::from_json(&value).unwrap_err();
            assert!(err.contains("expected an array"), "{}", err);
        }
    }

    #[test]
    fn test_annotation_corners_reports_out_of_range() {
        // i64::MAX rounds up to 2^63 as f64
        let too_large = Annotation {
            image_id: 7,
            bbox: json!([i64::MAX, 0, 1, 0]),
        };
        assert!(matches!(
            annotation_corners(3, &too_large),
            Err(ConvertError::Shape {
                index: 3,
                image_id: 7,
                ..
            })
        ));

        let overflowing = Annotation {
            image_id: 8,
            bbox: json!([1i64 << 62, 0, 1i64 << 62, 0]),
        };
        match annotation_corners(0, &overflowing) {
            Err(ConvertError::Shape { reason, .. }) => assert!(reason.contains("overflow")),
            other => panic!("expected shape error, got {:?}", other),
        }
    }
}
