// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label hit-testing.
//!
//! Finds the topmost label whose rendered bounding box contains a
//! point. The box of a label is `[x, x + width] x [y - size, y]` with
//! `(x, y)` the baseline origin and `width` the measured text width.
//! The measure function is supplied by the caller so that hit-testing
//! and rendering share the same text measurement.

use super::annotation::TextAnnotation;

/// Index of the topmost label containing `(x, y)`, or None.
///
/// Later labels draw on top of earlier ones, so the list is scanned
/// back to front and the first match wins.
pub fn hit_test<F>(annotations: &[TextAnnotation], x: f32, y: f32, measure: F) -> Option<usize>
where
    F: Fn(&TextAnnotation) -> f32,
{
    for (i, label) in annotations.iter().enumerate().rev() {
        let width = measure(label);
        let size = label.size as f32;
        if x >= label.x && x <= label.x + width && y >= label.y - size && y <= label.y {
            return Some(i);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str, x: f32, y: f32, size: u32) -> TextAnnotation {
        TextAnnotation::new(
            text.to_string(),
            "Arial".to_string(),
            "#000000".to_string(),
            size,
            x,
            y,
        )
    }

    /// Deterministic stand-in for the galley measurement: 10 px per char.
    fn measure(label: &TextAnnotation) -> f32 {
        label.text.chars().count() as f32 * 10.0
    }

    #[test]
    fn test_hit_inside_box() {
        let labels = vec![label("Hi", 100.0, 50.0, 20)];
        // Box is [100, 120] x [30, 50].
        assert_eq!(hit_test(&labels, 110.0, 40.0, measure), Some(0));
        assert_eq!(hit_test(&labels, 100.0, 50.0, measure), Some(0));
        assert_eq!(hit_test(&labels, 120.0, 30.0, measure), Some(0));
    }

    #[test]
    fn test_miss_outside_box() {
        let labels = vec![label("Hi", 100.0, 50.0, 20)];
        assert_eq!(hit_test(&labels, 99.0, 40.0, measure), None);
        assert_eq!(hit_test(&labels, 121.0, 40.0, measure), None);
        assert_eq!(hit_test(&labels, 110.0, 29.0, measure), None);
        assert_eq!(hit_test(&labels, 110.0, 51.0, measure), None);
        assert_eq!(hit_test(&[], 0.0, 0.0, measure), None);
    }

    #[test]
    fn test_topmost_label_wins_overlap() {
        let labels = vec![
            label("under", 100.0, 50.0, 20),
            label("over", 105.0, 55.0, 20),
        ];
        // Point inside both boxes; the most recently added label wins.
        assert_eq!(hit_test(&labels, 110.0, 45.0, measure), Some(1));
        // Point only inside the first label's box.
        assert_eq!(hit_test(&labels, 101.0, 32.0, measure), Some(0));
    }

    #[test]
    fn test_empty_text_is_unhittable() {
        let labels = vec![label("", 100.0, 50.0, 20)];
        // Zero width: only the degenerate x == 100 line could match,
        // and a point there still counts as a hit per the closed box.
        assert_eq!(hit_test(&labels, 101.0, 40.0, measure), None);
        assert_eq!(hit_test(&labels, 100.0, 40.0, measure), Some(0));
    }
}
