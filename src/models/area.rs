// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Analyzed farm area model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{FarmPolygon, GeoBounds, GeoPoint};
use crate::surface::{MarkerIcon, OverlayStyle};

/// A previously analyzed farm area with its decision outcome.
///
/// Identity is the `key`: the centroid rounded to 4 decimal places
/// (~11 m). Two analyses whose centroids round to the same key are the
/// same area - the registry overwrites outcome, timestamp, and boundary in
/// place so exactly one marker exists per distinct location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedArea {
    /// Dedup key derived from the rounded centroid.
    pub key: String,
    /// The boundary as originally drawn. Absent in snapshots taken before
    /// boundaries were persisted; rendering then falls back to `bounds`.
    #[serde(default)]
    pub polygon: Option<FarmPolygon>,
    /// Axis-aligned bounding box of the boundary.
    pub bounds: GeoBounds,
    /// Coordinate-wise mean of the boundary corners.
    pub centroid: GeoPoint,
    /// Enclosed area in hectares.
    pub area_hectares: f64,
    /// Whether the player's fertilizer/irrigation decision matched the
    /// recommendation.
    pub correct_decision: bool,
    /// Whether the centroid falls inside the special mission zone.
    pub special_zone: bool,
    /// When this outcome was recorded (overwritten on repeat analyses).
    pub recorded_at: DateTime<Utc>,
}

impl AnalyzedArea {
    /// Marker icon encoding the outcome: special-zone hits only get the
    /// special icon when the decision was also correct.
    pub fn marker_icon(&self) -> MarkerIcon {
        match (self.correct_decision, self.special_zone) {
            (true, true) => MarkerIcon::SpecialCorrect,
            (true, false) => MarkerIcon::Correct,
            (false, _) => MarkerIcon::Incorrect,
        }
    }

    /// Overlay stroke style matching the marker icon.
    pub fn overlay_style(&self) -> OverlayStyle {
        match (self.correct_decision, self.special_zone) {
            (true, true) => OverlayStyle::Special,
            (true, false) => OverlayStyle::Correct,
            (false, _) => OverlayStyle::Incorrect,
        }
    }

    /// The ring to render as the boundary overlay: the drawn corners when
    /// available, otherwise the bounding rectangle.
    pub fn boundary_ring(&self) -> Vec<GeoPoint> {
        match &self.polygon {
            Some(polygon) => polygon.corners().to_vec(),
            None => self.bounds.corner_ring(),
        }
    }
}
