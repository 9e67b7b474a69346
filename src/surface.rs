// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Boundary contract with the host map rendering surface.
//!
//! The core never performs pixel math; the host surface converts pointer
//! events to geocoordinates before they reach this crate, and all drawing
//! primitives here speak geocoordinates only.

use std::collections::HashSet;

use crate::models::GeoPoint;

/// Opaque identifier for a layer drawn on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerHandle(pub u64);

/// Marker icon variants for analyzed areas.
///
/// Encodes the decision outcome: correct, incorrect, or correct inside the
/// special mission zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Correct,
    Incorrect,
    SpecialCorrect,
}

/// Stroke styling for a recorded boundary overlay.
///
/// Overlays must be rendered as non-interactive layers so they never
/// intercept pointer events meant for the base map; otherwise previously
/// analyzed areas would block future selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayStyle {
    Correct,
    Incorrect,
    Special,
}

/// Host rendering surface primitives.
///
/// Implemented by the surrounding application's map adapter (e.g. a Leaflet
/// or MapLibre wrapper). Each draw call returns a handle the core stores to
/// remove the layer later.
pub trait MapSurface {
    /// Draw a single corner marker while drafting.
    fn draw_point(&mut self, point: GeoPoint) -> LayerHandle;

    /// Draw the two-point preview segment.
    fn draw_preview_line(&mut self, points: &[GeoPoint]) -> LayerHandle;

    /// Draw the in-progress boundary outline (3-4 points).
    fn draw_preview_polygon(&mut self, points: &[GeoPoint]) -> LayerHandle;

    /// Draw a completed, recorded boundary overlay.
    fn draw_final_polygon(&mut self, points: &[GeoPoint], style: OverlayStyle) -> LayerHandle;

    /// Draw an analyzed-area marker at a point.
    fn draw_marker(&mut self, point: GeoPoint, icon: MarkerIcon) -> LayerHandle;

    /// Remove a previously drawn layer. Removing an unknown handle is a
    /// no-op.
    fn remove_layer(&mut self, handle: LayerHandle);
}

/// Every call accepted by a [`RecordingSurface`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Point(GeoPoint),
    PreviewLine(Vec<GeoPoint>),
    PreviewPolygon(Vec<GeoPoint>),
    FinalPolygon(Vec<GeoPoint>, OverlayStyle),
    Marker(GeoPoint, MarkerIcon),
    Remove(LayerHandle),
}

/// In-memory surface that records calls and tracks live layers.
///
/// Stands in for the production map adapter in tests and headless runs,
/// the same way the storage layer offers offline mock constructors.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_handle: u64,
    live: HashSet<LayerHandle>,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of layers currently on the surface.
    pub fn live_layer_count(&self) -> usize {
        self.live.len()
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Calls made since the given index (for asserting on a sub-sequence).
    pub fn calls_since(&self, index: usize) -> &[SurfaceCall] {
        &self.calls[index..]
    }

    fn allocate(&mut self, call: SurfaceCall) -> LayerHandle {
        self.next_handle += 1;
        let handle = LayerHandle(self.next_handle);
        self.live.insert(handle);
        self.calls.push(call);
        handle
    }
}

impl MapSurface for RecordingSurface {
    fn draw_point(&mut self, point: GeoPoint) -> LayerHandle {
        self.allocate(SurfaceCall::Point(point))
    }

    fn draw_preview_line(&mut self, points: &[GeoPoint]) -> LayerHandle {
        self.allocate(SurfaceCall::PreviewLine(points.to_vec()))
    }

    fn draw_preview_polygon(&mut self, points: &[GeoPoint]) -> LayerHandle {
        self.allocate(SurfaceCall::PreviewPolygon(points.to_vec()))
    }

    fn draw_final_polygon(&mut self, points: &[GeoPoint], style: OverlayStyle) -> LayerHandle {
        self.allocate(SurfaceCall::FinalPolygon(points.to_vec(), style))
    }

    fn draw_marker(&mut self, point: GeoPoint, icon: MarkerIcon) -> LayerHandle {
        self.allocate(SurfaceCall::Marker(point, icon))
    }

    fn remove_layer(&mut self, handle: LayerHandle) {
        self.live.remove(&handle);
        self.calls.push(SurfaceCall::Remove(handle));
    }
}
