// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registry of analyzed farm areas keyed by rounded centroid.
//!
//! The registry is the single source of truth for recorded areas and their
//! on-map rendering: it owns the marker/overlay layer handles and removes
//! stale layers before drawing replacements, so an updated outcome never
//! leaves old visuals on screen. Only ever touched from the single UI
//! thread; it holds no locks.

use std::collections::HashMap;

use chrono::Utc;
use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde::{Deserialize, Serialize};

use crate::models::{AnalyzedArea, FarmPolygon, GeoPoint, RegistryStats};
use crate::services::geometry;
use crate::surface::{LayerHandle, MapSurface};

/// Layers drawn for one analyzed area: exactly one marker and one
/// non-interactive boundary overlay.
#[derive(Debug, Clone, Copy)]
struct AreaLayers {
    marker: LayerHandle,
    overlay: LayerHandle,
}

/// Serializable image of the registry for the persistence collaborator.
///
/// When to save and under which storage key is the caller's concern; the
/// registry only produces and consumes the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RegistrySnapshot {
    pub areas: Vec<AnalyzedArea>,
}

/// Keyed store of previously analyzed areas.
#[derive(Debug, Default)]
pub struct CompletedAreaRegistry {
    areas: HashMap<String, AnalyzedArea>,
    layers: HashMap<String, AreaLayers>,
}

impl CompletedAreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dedup key for a centroid: both coordinates rounded to 4 decimal
    /// places (~11 m) and concatenated. This is the sole identity
    /// mechanism - two analyses rounding to the same pair are the same
    /// area even if the drawn boundaries differ slightly.
    pub fn key_for(centroid: &GeoPoint) -> String {
        format!("{:.4},{:.4}", centroid.latitude, centroid.longitude)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&AnalyzedArea> {
        self.areas.get(key)
    }

    pub fn areas(&self) -> impl Iterator<Item = &AnalyzedArea> {
        self.areas.values()
    }

    /// Record a scored outcome for a confirmed boundary.
    ///
    /// The scoring decision must already be made - `is_correct` and
    /// `is_special_zone` are inputs, never inferred here. Inserts a new
    /// area for an unseen key; for a seen key, overwrites outcome,
    /// timestamp, and boundary in place and replaces the old marker and
    /// overlay on the surface (newer outcome wins, one marker per
    /// location).
    pub fn record_outcome(
        &mut self,
        surface: &mut dyn MapSurface,
        polygon: FarmPolygon,
        is_correct: bool,
        is_special_zone: bool,
    ) -> &AnalyzedArea {
        let centroid = geometry::polygon_centroid(polygon.corners());
        let area_hectares = geometry::polygon_area_hectares(polygon.corners());
        let key = Self::key_for(&centroid);

        let area = AnalyzedArea {
            key: key.clone(),
            bounds: polygon.bounds(),
            polygon: Some(polygon),
            centroid,
            area_hectares,
            correct_decision: is_correct,
            special_zone: is_special_zone,
            recorded_at: Utc::now(),
        };

        // Stale visuals must be gone before the replacements appear.
        if let Some(old) = self.layers.remove(&key) {
            surface.remove_layer(old.marker);
            surface.remove_layer(old.overlay);
            tracing::debug!(key = %key, "Replacing previously analyzed area");
        }

        let layers = Self::render(surface, &area);
        self.layers.insert(key.clone(), layers);

        tracing::info!(
            key = %key,
            area_hectares,
            correct = is_correct,
            special_zone = is_special_zone,
            "Recorded analyzed area"
        );

        use std::collections::hash_map::Entry;
        match self.areas.entry(key) {
            Entry::Occupied(mut entry) => {
                entry.insert(area);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(area),
        }
    }

    /// Remove every area and its layers. Used for a full progress reset.
    pub fn clear_all(&mut self, surface: &mut dyn MapSurface) {
        for layers in self.layers.values() {
            surface.remove_layer(layers.marker);
            surface.remove_layer(layers.overlay);
        }
        let count = self.areas.len();
        self.layers.clear();
        self.areas.clear();
        tracing::info!(count, "Cleared analyzed areas");
    }

    /// Aggregate accuracy over current entries. Pure, no side effects.
    pub fn statistics(&self) -> RegistryStats {
        RegistryStats::from_areas(self.areas.values())
    }

    /// Snapshot for persistence.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            areas: self.areas.values().cloned().collect(),
        }
    }

    /// Rebuild a registry from a snapshot and re-render every area.
    pub fn restore(snapshot: RegistrySnapshot, surface: &mut dyn MapSurface) -> Self {
        let mut registry = Self::new();
        let count = snapshot.areas.len();

        for area in snapshot.areas {
            let layers = Self::render(surface, &area);
            registry.layers.insert(area.key.clone(), layers);
            registry.areas.insert(area.key.clone(), area);
        }

        tracing::info!(count, "Restored analyzed areas from snapshot");
        registry
    }

    /// Export all boundaries as a GeoJSON feature collection with outcome
    /// properties, for map overlays or external tooling.
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .areas
            .values()
            .map(|area| {
                let mut ring: Vec<Vec<f64>> = area
                    .boundary_ring()
                    .iter()
                    .map(|p| vec![p.longitude, p.latitude])
                    .collect();
                if let Some(first) = ring.first().cloned() {
                    ring.push(first);
                }

                let mut properties = serde_json::Map::new();
                properties.insert("key".to_string(), area.key.clone().into());
                properties.insert("correct".to_string(), area.correct_decision.into());
                properties.insert("special_zone".to_string(), area.special_zone.into());
                properties.insert("area_hectares".to_string(), area.area_hectares.into());
                properties.insert(
                    "recorded_at".to_string(),
                    area.recorded_at.to_rfc3339().into(),
                );

                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    fn render(surface: &mut dyn MapSurface, area: &AnalyzedArea) -> AreaLayers {
        let marker = surface.draw_marker(area.centroid, area.marker_icon());
        let overlay = surface.draw_final_polygon(&area.boundary_ring(), area.overlay_style());
        AreaLayers { marker, overlay }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MarkerIcon, RecordingSurface, SurfaceCall};

    fn polygon(base_lat: f64, base_lon: f64) -> FarmPolygon {
        FarmPolygon::try_from(vec![
            GeoPoint::new(base_lat, base_lon),
            GeoPoint::new(base_lat, base_lon + 0.002),
            GeoPoint::new(base_lat + 0.002, base_lon + 0.002),
            GeoPoint::new(base_lat + 0.002, base_lon),
        ])
        .unwrap()
    }

    #[test]
    fn test_key_rounds_to_four_decimals() {
        assert_eq!(
            CompletedAreaRegistry::key_for(&GeoPoint::new(10.00001, 20.00001)),
            "10.0000,20.0000"
        );
        assert_eq!(
            CompletedAreaRegistry::key_for(&GeoPoint::new(10.00009, 20.00009)),
            "10.0001,20.0001"
        );
    }

    #[test]
    fn test_record_draws_marker_and_overlay() {
        let mut surface = RecordingSurface::new();
        let mut registry = CompletedAreaRegistry::new();

        let area = registry.record_outcome(&mut surface, polygon(40.0, -73.0), true, false);
        assert!(area.correct_decision);
        assert!(area.area_hectares > 0.0);
        assert_eq!(surface.live_layer_count(), 2);
        assert!(matches!(
            surface.calls()[0],
            SurfaceCall::Marker(_, MarkerIcon::Correct)
        ));
    }

    #[test]
    fn test_dedup_same_key_overwrites_in_place() {
        let mut surface = RecordingSurface::new();
        let mut registry = CompletedAreaRegistry::new();

        registry.record_outcome(&mut surface, polygon(40.0, -73.0), true, false);
        // Same boundary again with the opposite outcome.
        registry.record_outcome(&mut surface, polygon(40.0, -73.0), false, false);

        assert_eq!(registry.len(), 1);
        let area = registry.areas().next().unwrap();
        assert!(!area.correct_decision, "second outcome wins");

        // Old marker + overlay removed, exactly one pair live.
        assert_eq!(surface.live_layer_count(), 2);
    }

    #[test]
    fn test_near_identical_centroids_dedup_by_rounding() {
        let mut surface = RecordingSurface::new();
        let mut registry = CompletedAreaRegistry::new();

        // Centroids differ by far less than the 4-decimal rounding step.
        registry.record_outcome(&mut surface, polygon(10.000001, 20.000001), true, false);
        registry.record_outcome(&mut surface, polygon(10.000009, 20.000009), false, true);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_keys_create_distinct_areas() {
        let mut surface = RecordingSurface::new();
        let mut registry = CompletedAreaRegistry::new();

        registry.record_outcome(&mut surface, polygon(10.0, 20.0), true, false);
        registry.record_outcome(&mut surface, polygon(10.01, 20.01), true, false);

        assert_eq!(registry.len(), 2);
        assert_eq!(surface.live_layer_count(), 4);
    }

    #[test]
    fn test_update_removes_stale_layers_before_redraw() {
        let mut surface = RecordingSurface::new();
        let mut registry = CompletedAreaRegistry::new();

        registry.record_outcome(&mut surface, polygon(40.0, -73.0), true, false);
        let before = surface.calls().len();

        registry.record_outcome(&mut surface, polygon(40.0, -73.0), false, false);
        let since = surface.calls_since(before);

        // Two removals strictly before the replacement marker/overlay.
        assert!(matches!(since[0], SurfaceCall::Remove(_)));
        assert!(matches!(since[1], SurfaceCall::Remove(_)));
        assert!(matches!(since[2], SurfaceCall::Marker(_, MarkerIcon::Incorrect)));
        assert!(matches!(since[3], SurfaceCall::FinalPolygon(_, _)));
    }

    #[test]
    fn test_clear_all_removes_everything() {
        let mut surface = RecordingSurface::new();
        let mut registry = CompletedAreaRegistry::new();

        registry.record_outcome(&mut surface, polygon(10.0, 20.0), true, false);
        registry.record_outcome(&mut surface, polygon(11.0, 21.0), false, true);

        registry.clear_all(&mut surface);
        assert!(registry.is_empty());
        assert_eq!(surface.live_layer_count(), 0);
        assert_eq!(registry.statistics().total, 0);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut surface = RecordingSurface::new();
        let mut registry = CompletedAreaRegistry::new();

        registry.record_outcome(&mut surface, polygon(10.0, 20.0), true, true);
        registry.record_outcome(&mut surface, polygon(12.0, 22.0), false, false);

        let snapshot = registry.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: RegistrySnapshot = serde_json::from_str(&json).unwrap();

        let mut fresh_surface = RecordingSurface::new();
        let restored = CompletedAreaRegistry::restore(parsed, &mut fresh_surface);

        assert_eq!(restored.len(), 2);
        // One marker + one overlay per restored area.
        assert_eq!(fresh_surface.live_layer_count(), 4);

        let stats = restored.statistics();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.correct, 1);
        assert_eq!(stats.special_zone_total, 1);
    }

    #[test]
    fn test_snapshot_without_polygon_renders_bounds_fallback() {
        // Simulates a snapshot from before boundaries were persisted.
        let json = r#"{"areas":[{
            "key": "10.0010,20.0010",
            "bounds": {"north": 10.002, "south": 10.0, "east": 20.002, "west": 20.0},
            "centroid": {"latitude": 10.001, "longitude": 20.001},
            "area_hectares": 4.9,
            "correct_decision": true,
            "special_zone": false,
            "recorded_at": "2025-06-01T12:00:00Z"
        }]}"#;
        let snapshot: RegistrySnapshot = serde_json::from_str(json).unwrap();

        let mut surface = RecordingSurface::new();
        let restored = CompletedAreaRegistry::restore(snapshot, &mut surface);
        assert_eq!(restored.len(), 1);

        let overlay_ring = surface.calls().iter().find_map(|call| match call {
            SurfaceCall::FinalPolygon(points, _) => Some(points.clone()),
            _ => None,
        });
        // Bounding rectangle fallback: 4 corners from the stored bounds.
        assert_eq!(overlay_ring.unwrap().len(), 4);
    }

    #[test]
    fn test_geojson_export_has_closed_rings() {
        let mut surface = RecordingSurface::new();
        let mut registry = CompletedAreaRegistry::new();
        registry.record_outcome(&mut surface, polygon(10.0, 20.0), true, false);

        let collection = registry.to_geojson();
        assert_eq!(collection.features.len(), 1);

        let feature = &collection.features[0];
        let geometry = feature.geometry.as_ref().unwrap();
        match &geometry.value {
            Value::Polygon(rings) => {
                let ring = &rings[0];
                assert_eq!(ring.len(), 5, "ring must close back on itself");
                assert_eq!(ring.first(), ring.last());
            }
            other => panic!("expected polygon geometry, got {other:?}"),
        }

        let properties = feature.properties.as_ref().unwrap();
        assert_eq!(properties["correct"], serde_json::Value::Bool(true));
    }
}
