// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Special mission zone classification.

use crate::models::{GeoBounds, GeoPoint};
use crate::services::geometry;

/// Tests whether a centroid falls inside the configured special mission
/// region. Stateless and deterministic; the region is fixed at
/// construction and never mutated.
#[derive(Debug, Clone)]
pub struct ZoneClassifier {
    region: GeoBounds,
}

impl ZoneClassifier {
    pub fn new(region: GeoBounds) -> Self {
        Self { region }
    }

    pub fn region(&self) -> &GeoBounds {
        &self.region
    }

    /// Inclusive membership test on all four edges.
    ///
    /// Malformed input (NaN coordinates) fails closed - returns `false` -
    /// since the classification only feeds a UI decoration.
    pub fn classify(&self, centroid: &GeoPoint) -> bool {
        if !centroid.is_finite() {
            return false;
        }
        geometry::rect_contains(centroid, &self.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> ZoneClassifier {
        ZoneClassifier::new(GeoBounds::new(40.0, 38.5, -121.0, -122.5))
    }

    #[test]
    fn test_inside_and_outside() {
        let classifier = classifier();
        assert!(classifier.classify(&GeoPoint::new(39.2, -121.8)));
        assert!(!classifier.classify(&GeoPoint::new(41.5, -121.8)));
        assert!(!classifier.classify(&GeoPoint::new(39.2, -120.0)));
    }

    #[test]
    fn test_edges_are_inside() {
        let classifier = classifier();
        assert!(classifier.classify(&GeoPoint::new(40.0, -121.8)));
        assert!(classifier.classify(&GeoPoint::new(38.5, -121.8)));
        assert!(classifier.classify(&GeoPoint::new(39.2, -121.0)));
        assert!(classifier.classify(&GeoPoint::new(39.2, -122.5)));
    }

    #[test]
    fn test_nan_fails_closed() {
        let classifier = classifier();
        assert!(!classifier.classify(&GeoPoint::new(f64::NAN, -121.8)));
        assert!(!classifier.classify(&GeoPoint::new(39.2, f64::NAN)));
    }
}
