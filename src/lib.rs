// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Agrisim: core library of the agricultural analysis game.
//!
//! Players draw quadrilateral farm boundaries on a map, receive a
//! synthetically generated agronomy analysis, and have their fertilizer
//! decision scored against the canned recommendation. This crate holds the
//! interactive boundary selection, the registry of analyzed areas, the
//! special-zone classifier, and the synthetic analysis pipeline; the host
//! application supplies the rendering surface and the event wiring (see
//! [`surface::MapSurface`]).

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod surface;

use config::Config;
use models::{AnalyzedArea, FarmPolygon};
use services::{CompletedAreaRegistry, ZoneClassifier};
use surface::MapSurface;

/// Shared application state.
///
/// Explicitly constructed and caller-owned - the core requires no ambient
/// globals. The surrounding application typically holds a single instance
/// and threads it through its event handlers.
pub struct AppState {
    pub config: Config,
    pub classifier: ZoneClassifier,
    pub registry: CompletedAreaRegistry,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let classifier = ZoneClassifier::new(config.zone_region);
        Self {
            config,
            classifier,
            registry: CompletedAreaRegistry::new(),
        }
    }

    /// Record a scored decision for a confirmed boundary.
    ///
    /// The scoring collaborator must have produced `is_correct` before this
    /// is called; zone membership is derived here from the boundary's
    /// centroid so callers never pass it explicitly.
    pub fn record_decision(
        &mut self,
        surface: &mut dyn MapSurface,
        polygon: FarmPolygon,
        is_correct: bool,
    ) -> &AnalyzedArea {
        let centroid = services::geometry::polygon_centroid(polygon.corners());
        let is_special_zone = self.classifier.classify(&centroid);
        self.registry
            .record_outcome(surface, polygon, is_correct, is_special_zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use crate::surface::RecordingSurface;

    #[test]
    fn test_record_decision_classifies_zone() {
        let mut state = AppState::new(Config::default());
        let mut surface = RecordingSurface::new();

        // Inside the default Sacramento Valley zone.
        let inside = FarmPolygon::try_from(vec![
            GeoPoint::new(39.0, -122.0),
            GeoPoint::new(39.0, -121.99),
            GeoPoint::new(39.01, -121.99),
            GeoPoint::new(39.01, -122.0),
        ])
        .unwrap();
        let area = state.record_decision(&mut surface, inside, true);
        assert!(area.special_zone);
        assert!(area.correct_decision);

        // Far outside the zone.
        let outside = FarmPolygon::try_from(vec![
            GeoPoint::new(50.0, 8.0),
            GeoPoint::new(50.0, 8.01),
            GeoPoint::new(50.01, 8.01),
            GeoPoint::new(50.01, 8.0),
        ])
        .unwrap();
        let area = state.record_decision(&mut surface, outside, false);
        assert!(!area.special_zone);

        assert_eq!(state.registry.len(), 2);
    }
}
