// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geographic value types: coordinates, farm boundaries, bounding regions.

use geo::{coord, BoundingRect, Coord, LineString, Rect};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Number of corners in a completed farm boundary.
///
/// The game only supports quadrilateral farm plots; fewer points are an
/// in-progress draft, never a valid boundary.
pub const FARM_CORNERS: usize = 4;

/// A geographic coordinate in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeoPoint {
    /// Latitude in degrees
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    /// Longitude in degrees
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True if both coordinates are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(p: GeoPoint) -> Self {
        // geo convention: x = longitude, y = latitude
        coord! { x: p.longitude, y: p.latitude }
    }
}

/// Errors constructing a farm boundary from raw points.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PolygonError {
    #[error("farm boundary requires exactly {FARM_CORNERS} corners, got {0}")]
    WrongCornerCount(usize),
}

/// A completed farm boundary: exactly four corners in placement order.
///
/// Corner order is significant - it defines the boundary traversal used by
/// the area formula and by re-rendering of the exact drawn shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmPolygon {
    corners: [GeoPoint; FARM_CORNERS],
}

impl FarmPolygon {
    /// Corners in the order they were placed.
    pub fn corners(&self) -> &[GeoPoint] {
        &self.corners
    }

    /// Convert to a closed `geo` polygon (exterior ring only).
    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let mut ring: Vec<Coord<f64>> = self.corners.iter().map(|&p| p.into()).collect();
        // Close the ring explicitly; geo tolerates both but downstream
        // GeoJSON export requires a closed exterior.
        ring.push(self.corners[0].into());
        geo::Polygon::new(LineString::from(ring), vec![])
    }

    /// Axis-aligned bounding box of the boundary.
    pub fn bounds(&self) -> GeoBounds {
        match self.to_geo().bounding_rect() {
            Some(rect) => GeoBounds::from_geo_rect(&rect),
            // Unreachable for a 4-corner polygon, but keep a defined fallback
            // consistent with the degenerate-geometry policy.
            None => GeoBounds {
                north: 0.0,
                south: 0.0,
                east: 0.0,
                west: 0.0,
            },
        }
    }
}

impl TryFrom<Vec<GeoPoint>> for FarmPolygon {
    type Error = PolygonError;

    fn try_from(points: Vec<GeoPoint>) -> Result<Self, Self::Error> {
        let corners: [GeoPoint; FARM_CORNERS] = points
            .try_into()
            .map_err(|v: Vec<GeoPoint>| PolygonError::WrongCornerCount(v.len()))?;
        Ok(Self { corners })
    }
}

/// Axis-aligned geographic rectangle in degrees.
///
/// Used both for the statically configured special-mission zone and as the
/// stored bounding box of an analyzed area (the render fallback when the
/// original boundary corners are unavailable).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeoBounds {
    #[validate(range(min = -90.0, max = 90.0))]
    pub north: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub south: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub east: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub west: f64,
}

impl GeoBounds {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Geometric center of the rectangle.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        )
    }

    /// Check that north/south and east/west are consistently ordered.
    pub fn is_well_formed(&self) -> bool {
        self.north >= self.south && self.east >= self.west
    }

    /// The rectangle's corners as a boundary ring, north-west first,
    /// traversed clockwise.
    pub fn corner_ring(&self) -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(self.north, self.west),
            GeoPoint::new(self.north, self.east),
            GeoPoint::new(self.south, self.east),
            GeoPoint::new(self.south, self.west),
        ]
    }

    pub fn to_geo_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.west, y: self.south },
            coord! { x: self.east, y: self.north },
        )
    }

    pub fn from_geo_rect(rect: &Rect<f64>) -> Self {
        Self {
            north: rect.max().y,
            south: rect.min().y,
            east: rect.max().x,
            west: rect.min().x,
        }
    }
}
